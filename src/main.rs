use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
mod config;
mod error;
mod events;
mod services;
mod utils;

use config::{Commands, Options};
use services::{
    create_command_launcher,
    create_pointer_source,
    CommandDispatcher,
    CommandTable,
    EdgeWatcher,
};
use utils::ShutdownSignal;

#[derive(Parser, Debug)]
#[command(name = "edges", version)]
#[command(about = "Запуск команд при попадании курсора в углы и края экрана")]
#[command(arg_required_else_help = true)]
struct Args {
    /// Команда для левого верхнего угла
    #[arg(long, value_name = "CMD")]
    top_left: Option<String>,

    /// Команда для правого верхнего угла
    #[arg(long, value_name = "CMD")]
    top_right: Option<String>,

    /// Команда для правого нижнего угла
    #[arg(long, value_name = "CMD")]
    bottom_right: Option<String>,

    /// Команда для левого нижнего угла
    #[arg(long, value_name = "CMD")]
    bottom_left: Option<String>,

    /// Команда для левого края
    #[arg(long, value_name = "CMD")]
    left: Option<String>,

    /// Команда для верхнего края
    #[arg(long, value_name = "CMD")]
    top: Option<String>,

    /// Команда для правого края
    #[arg(long, value_name = "CMD")]
    right: Option<String>,

    /// Команда для нижнего края
    #[arg(long, value_name = "CMD")]
    bottom: Option<String>,

    /// Не ждать завершения запущенной команды
    #[arg(short = 'b', long)]
    no_blocking: bool,

    /// Читать команды из ~/.config/edges/edges.rc, игнорируя опции
    #[arg(short = 'c', long)]
    use_config: bool,

    /// Печатать положение курсора и запускаемые команды
    #[arg(short, long)]
    verbose: bool,

    /// Задержка в миллисекундах перед запуском (не больше 1000)
    #[arg(short, long, value_name = "MS", default_value_t = 0)]
    delay: u64,

    /// Режим сухого запуска (без X сервера и реальных процессов)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn options(&self) -> Options {
        Options {
            blocking: !self.no_blocking,
            use_config: self.use_config,
            verbose: self.verbose,
            dry_run: self.dry_run,
            ..Options::default()
        }
        .with_delay_ms(self.delay)
    }

    fn commands(&self) -> Commands {
        Commands {
            top_left: self.top_left.clone(),
            top_right: self.top_right.clone(),
            bottom_right: self.bottom_right.clone(),
            bottom_left: self.bottom_left.clone(),
            left: self.left.clone(),
            top: self.top.clone(),
            right: self.right.clone(),
            bottom: self.bottom.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Инициализация системы логирования
    init_tracing(&args.log_level, args.verbose)?;

    info!("Запуск edges v{}", env!("CARGO_PKG_VERSION"));

    let options = args.options();

    // Команды из опций или из файла конфигурации
    let commands = if options.use_config {
        let path = config::default_config_path()?;
        let commands = Commands::load(&path)?;
        info!("Конфигурация загружена из: {}", path.display());
        commands
    } else {
        args.commands()
    };

    let table = CommandTable::prepare(&commands)?;
    if table.configured() == 0 {
        warn!("Ни для одной области не задана команда");
    }

    let shutdown = ShutdownSignal::new();
    let signal_handle = shutdown.install()?;

    if options.dry_run {
        warn!("Режим сухого запуска - реальные команды не запускаются");
    } else {
        utils::session::check_session()?;
    }

    // Инициализация компонентов
    let source = create_pointer_source(options.dry_run)?;
    let launcher = create_command_launcher(options.dry_run);
    let dispatcher = CommandDispatcher::new(table, launcher, options.blocking, options.verbose);
    let watcher = EdgeWatcher::new(source, dispatcher, shutdown, &options);

    info!("Все компоненты инициализированы");

    let result = watcher.run().await;

    signal_handle.abort();
    info!("edges завершил работу");

    result.map_err(Into::into)
}

fn init_tracing(level: &str, verbose: bool) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;
    let filter = with_verbose(filter, verbose)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    Ok(())
}

/// С `-v` события [`utils::VERBOSE_TARGET`] печатаются на уровне info
/// при любом фильтре для остальных
fn with_verbose(
    filter: tracing_subscriber::EnvFilter,
    verbose: bool,
) -> Result<tracing_subscriber::EnvFilter> {
    if !verbose {
        return Ok(filter);
    }
    let directive = format!("{}=info", utils::VERBOSE_TARGET).parse()?;
    Ok(filter.add_directive(directive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_no_arguments_is_usage_error() {
        let err = Args::try_parse_from(["edges"]).unwrap_err();
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn test_region_options() {
        let args = Args::try_parse_from([
            "edges",
            "--top-left",
            "rofi -show drun",
            "--bottom",
            "xterm",
            "-b",
            "-v",
        ])
        .unwrap();

        let commands = args.commands();
        assert_eq!(commands.top_left.as_deref(), Some("rofi -show drun"));
        assert_eq!(commands.bottom.as_deref(), Some("xterm"));
        assert_eq!(commands.left, None);

        let options = args.options();
        assert!(!options.blocking);
        assert!(options.verbose);
        assert!(!options.use_config);
        assert_eq!(options.delay, Duration::ZERO);
    }

    #[test]
    fn test_defaults_and_delay() {
        let args = Args::try_parse_from(["edges", "-c", "--delay", "5000"]).unwrap();
        let options = args.options();
        assert!(options.blocking);
        assert!(options.use_config);
        assert_eq!(options.delay, config::MAX_DELAY);
    }

    #[test]
    fn test_help_and_version_exit_successfully() {
        let help = Args::try_parse_from(["edges", "--help"]).unwrap_err();
        assert_eq!(help.exit_code(), 0);
        let version = Args::try_parse_from(["edges", "--version"]).unwrap_err();
        assert_eq!(version.exit_code(), 0);
    }

    #[test]
    fn test_verbose_directive_added_only_with_flag() {
        use tracing_subscriber::EnvFilter;

        let quiet = with_verbose(EnvFilter::new("warn"), false).unwrap();
        assert!(!quiet.to_string().contains(utils::VERBOSE_TARGET));

        let verbose = with_verbose(EnvFilter::new("warn"), true).unwrap();
        assert!(verbose.to_string().contains("edges::verbose=info"));
    }
}
