//! CommandDispatcher: запуск внешних команд для "горячих" областей
//!
//! Модуль отвечает только за хранение подготовленных команд и их запуск.
//! Он не знает ничего о геометрии экрана и событиях курсора: решение, какую
//! область обслуживать, принимает EdgeWatcher.

mod command_dispatcher;
mod dry_run;
mod process_launcher;
mod r#trait;

pub use self::command_dispatcher::{CommandDispatcher, CommandTable};
pub use self::dry_run::DryRunLauncher;
pub use self::process_launcher::ProcessLauncher;
pub use self::r#trait::{create_command_launcher, CommandLauncherTrait};
