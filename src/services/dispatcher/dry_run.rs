use crate::error::Result;
use crate::utils::wordsplit::ArgumentVector;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

use super::r#trait::CommandLauncherTrait;

/// Ничего не запускает, только пишет в лог и запоминает команды
#[derive(Clone, Default)]
pub struct DryRunLauncher {
    launched: Arc<Mutex<Vec<ArgumentVector>>>,
}

impl DryRunLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Команды, которые были бы запущены, в порядке вызова
    #[allow(dead_code)]
    pub fn launched(&self) -> Vec<ArgumentVector> {
        self.launched.lock().clone()
    }
}

#[async_trait::async_trait]
impl CommandLauncherTrait for DryRunLauncher {
    async fn launch(&self, args: &ArgumentVector, blocking: bool) -> Result<Option<u32>> {
        info!("[DRY RUN] Запуск команды: {} (blocking: {})", args, blocking);
        self.launched.lock().push(args.clone());
        Ok(None)
    }
}
