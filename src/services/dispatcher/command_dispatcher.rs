use crate::config::Commands;
use crate::error::Result;
use crate::events::{Region, NUM_REGIONS};
use crate::utils::wordsplit::{prepare_command, ArgumentVector};
use crate::utils::VERBOSE_TARGET;
use tracing::{error, info};

use super::r#trait::CommandLauncherTrait;

/// Подготовленные команды, по одной на область
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandTable {
    commands: [Option<ArgumentVector>; NUM_REGIONS],
}

impl CommandTable {
    /// Разбить строки команд на аргументы один раз при старте
    pub fn prepare(commands: &Commands) -> Result<Self> {
        let mut table = Self::default();
        for region in Region::ALL {
            if let Some(index) = region.index() {
                table.commands[index] = prepare_command(commands.get(region))?;
            }
        }
        Ok(table)
    }

    pub fn get(&self, region: Region) -> Option<&ArgumentVector> {
        region.index().and_then(|index| self.commands[index].as_ref())
    }

    /// Сколько областей имеют команду
    pub fn configured(&self) -> usize {
        self.commands.iter().filter(|command| command.is_some()).count()
    }
}

pub struct CommandDispatcher {
    table: CommandTable,
    launcher: Box<dyn CommandLauncherTrait + Send + Sync>,
    blocking: bool,
    verbose: bool,
}

impl CommandDispatcher {
    pub fn new(
        table: CommandTable,
        launcher: Box<dyn CommandLauncherTrait + Send + Sync>,
        blocking: bool,
        verbose: bool,
    ) -> Self {
        info!(
            "Инициализация CommandDispatcher (команд: {}, blocking: {})",
            table.configured(),
            blocking
        );
        Self {
            table,
            launcher,
            blocking,
            verbose,
        }
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Запустить команду, привязанную к области
    pub async fn dispatch(&self, region: Region) {
        self.dispatch_args(self.table.get(region)).await;
    }

    /// Запустить готовый вектор аргументов.
    ///
    /// Ошибка запуска только логируется: одна неверная команда не должна
    /// останавливать отслеживание курсора.
    pub async fn dispatch_args(&self, args: Option<&ArgumentVector>) {
        let args = match args {
            Some(args) => args,
            None => {
                if self.verbose {
                    info!(target: VERBOSE_TARGET, "Command: None");
                }
                return;
            }
        };

        if self.verbose {
            info!(target: VERBOSE_TARGET, "Command: {}", args);
        }

        if let Err(e) = self.launcher.launch(args, self.blocking).await {
            error!("Не удалось запустить команду '{}': {}", args, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EdgesError;
    use crate::services::dispatcher::{DryRunLauncher, ProcessLauncher};

    fn commands() -> Commands {
        Commands {
            top_left: Some("rofi -show drun".to_string()),
            bottom: Some("   ".to_string()),
            right: Some("notify-send 'right edge'".to_string()),
            ..Commands::default()
        }
    }

    #[test]
    fn test_prepare_table() {
        let table = CommandTable::prepare(&commands()).unwrap();
        assert_eq!(table.configured(), 2);
        assert_eq!(table.get(Region::TopLeft).unwrap().program(), Some("rofi"));
        assert_eq!(
            table.get(Region::Right).unwrap().args(),
            &["right edge".to_string()]
        );
        assert!(table.get(Region::Bottom).is_none());
        assert!(table.get(Region::Top).is_none());
        assert!(table.get(Region::None).is_none());
    }

    #[test]
    fn test_prepare_table_rejects_unbalanced_quotes() {
        let commands = Commands {
            left: Some("echo \"oops".to_string()),
            ..Commands::default()
        };
        assert!(matches!(
            CommandTable::prepare(&commands),
            Err(EdgesError::Split(_))
        ));
    }

    #[tokio::test]
    async fn test_dispatch_launches_bound_command() {
        let launcher = DryRunLauncher::new();
        let table = CommandTable::prepare(&commands()).unwrap();
        let dispatcher = CommandDispatcher::new(table, Box::new(launcher.clone()), true, true);

        dispatcher.dispatch(Region::TopLeft).await;
        dispatcher.dispatch(Region::Right).await;

        let launched = launcher.launched();
        assert_eq!(launched.len(), 2);
        assert_eq!(launched[0].to_string(), "rofi -show drun");
        assert_eq!(launched[1].program(), Some("notify-send"));
    }

    #[tokio::test]
    async fn test_dispatch_without_command_is_noop() {
        let launcher = DryRunLauncher::new();
        let table = CommandTable::prepare(&commands()).unwrap();
        let dispatcher = CommandDispatcher::new(table, Box::new(launcher.clone()), true, false);

        dispatcher.dispatch(Region::Bottom).await;
        dispatcher.dispatch(Region::None).await;
        dispatcher.dispatch_args(None).await;

        assert!(launcher.launched().is_empty());
    }

    #[tokio::test]
    async fn test_spawn_failure_is_not_fatal() {
        let commands = Commands {
            top: Some("edges-test-no-such-program-xyz --flag".to_string()),
            ..Commands::default()
        };
        let table = CommandTable::prepare(&commands).unwrap();
        let dispatcher = CommandDispatcher::new(table, Box::new(ProcessLauncher::new()), true, false);

        // ошибка запуска логируется, повторный вызов снова пытается запустить
        dispatcher.dispatch(Region::Top).await;
        dispatcher.dispatch(Region::Top).await;
    }
}
