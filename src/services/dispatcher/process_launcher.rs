use crate::edges_error;
use crate::error::Result;
use crate::utils::wordsplit::ArgumentVector;
use tokio::process::Command;
use tracing::{debug, warn};

use super::r#trait::CommandLauncherTrait;

/// Запуск команд как дочерних процессов (поиск в PATH, окружение наследуется)
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProcessLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CommandLauncherTrait for ProcessLauncher {
    async fn launch(&self, args: &ArgumentVector, blocking: bool) -> Result<Option<u32>> {
        let program = args
            .program()
            .ok_or_else(|| edges_error!(internal, "пустой вектор аргументов"))?;

        let mut child = Command::new(program).args(args.args()).spawn()?;
        let pid = child.id();
        debug!("Запущен процесс {} (pid {:?})", program, pid);

        if blocking {
            let status = child.wait().await?;
            debug!("Процесс {} завершился: {}", program, status);
        } else {
            // Не ждём здесь, но забираем статус в фоне, чтобы не оставить зомби
            let program = program.to_string();
            tokio::spawn(async move {
                match child.wait().await {
                    Ok(status) => debug!("Фоновый процесс {} завершился: {}", program, status),
                    Err(e) => warn!("Не удалось дождаться процесса {}: {}", program, e),
                }
            });
        }

        Ok(pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EdgesError;
    use std::path::Path;
    use std::time::{Duration, Instant};

    fn argv(words: &[&str]) -> ArgumentVector {
        ArgumentVector::new(words.iter().map(|s| s.to_string()).collect())
    }

    #[tokio::test]
    async fn test_blocking_waits_for_child() {
        let launcher = ProcessLauncher::new();
        let started = Instant::now();
        let pid = launcher.launch(&argv(&["sleep", "0.3"]), true).await.unwrap();
        assert!(pid.is_some());
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_non_blocking_returns_immediately() {
        let launcher = ProcessLauncher::new();
        let started = Instant::now();
        launcher.launch(&argv(&["sleep", "2"]), false).await.unwrap();
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_non_blocking_child_is_reaped() {
        let launcher = ProcessLauncher::new();
        let pid = launcher.launch(&argv(&["true"]), false).await.unwrap().unwrap();

        let proc_entry = format!("/proc/{}", pid);
        let deadline = Instant::now() + Duration::from_secs(5);
        while Path::new(&proc_entry).exists() && Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        // после reap запись в /proc исчезает, зомби бы остался
        assert!(!Path::new(&proc_entry).exists());
    }

    #[tokio::test]
    async fn test_missing_program_is_an_error() {
        let launcher = ProcessLauncher::new();
        let result = launcher
            .launch(&argv(&["edges-test-no-such-program-xyz"]), true)
            .await;
        assert!(matches!(result, Err(EdgesError::Io(_))));
    }

    #[tokio::test]
    async fn test_empty_vector_is_rejected() {
        let launcher = ProcessLauncher::new();
        let result = launcher.launch(&ArgumentVector::default(), true).await;
        assert!(matches!(result, Err(EdgesError::Internal(_))));
    }
}
