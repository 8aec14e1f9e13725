use crate::events::Region;
use anyhow::{Context, Result};
use figment::{
    value::{Dict, Map, Value},
    Figment, Metadata, Profile, Provider, Source,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "edges";

/// Максимальная задержка перед запуском команды
pub const MAX_DELAY: Duration = Duration::from_millis(1000);

/// Поведение при срабатывании области
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Ждать завершения запущенной команды
    pub blocking: bool,
    pub use_config: bool,
    pub verbose: bool,
    /// Задержка перед повторной проверкой положения курсора
    pub delay: Duration,
    pub dry_run: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            blocking: true,
            use_config: false,
            verbose: false,
            delay: Duration::ZERO,
            dry_run: false,
        }
    }
}

impl Options {
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay = Duration::from_millis(delay_ms).min(MAX_DELAY);
        self
    }
}

/// Строки команд для каждой области, как они заданы пользователем
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Commands {
    pub top_left: Option<String>,
    pub top_right: Option<String>,
    pub bottom_right: Option<String>,
    pub bottom_left: Option<String>,
    pub left: Option<String>,
    pub top: Option<String>,
    pub right: Option<String>,
    pub bottom: Option<String>,
}

impl Commands {
    pub fn get(&self, region: Region) -> Option<&str> {
        let command = match region {
            Region::TopLeft => &self.top_left,
            Region::TopRight => &self.top_right,
            Region::BottomRight => &self.bottom_right,
            Region::BottomLeft => &self.bottom_left,
            Region::Left => &self.left,
            Region::Top => &self.top,
            Region::Right => &self.right,
            Region::Bottom => &self.bottom,
            Region::None => return None,
        };
        command.as_deref()
    }

    /// Загрузить команды из rc файла; переменные `EDGES_*` перекрывают файл
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        Self::load_with(config_path, EnvOverrides::from_env())
    }

    pub fn load_with<P: AsRef<Path>>(config_path: P, overrides: EnvOverrides) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::new()
            .merge(RcFile::new(config_path))
            .merge(overrides);

        figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))
    }
}

/// Путь к файлу конфигурации: `$HOME/.config/edges/edges.rc`
pub fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var_os("HOME").context("Failed to get home directory")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join(APP_NAME)
        .join(format!("{}.rc", APP_NAME)))
}

/// Провайдер figment для построчного формата `key = value`.
///
/// Пустые строки и строки с `#` в начале пропускаются, неизвестные ключи
/// игнорируются, строка без `=` считается синтаксической ошибкой.
pub struct RcFile {
    path: PathBuf,
}

impl RcFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read(&self) -> Result<Vec<(Region, String)>> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to open '{}'", self.path.display()))?;
        parse_rc(&content, &self.path)
    }
}

impl Provider for RcFile {
    fn metadata(&self) -> Metadata {
        Metadata::named("edges rc file").source(Source::File(self.path.clone()))
    }

    fn data(&self) -> std::result::Result<Map<Profile, Dict>, figment::Error> {
        let entries = self
            .read()
            .map_err(|e| figment::Error::from(format!("{:#}", e)))?;

        let mut dict = Dict::new();
        for (region, value) in entries {
            // ключи файла через дефис, поля Commands через подчёркивание
            dict.insert(region.key().replace('-', "_"), Value::from(value));
        }

        Ok(Profile::Default.collect(dict))
    }
}

/// Переменные окружения `EDGES_<REGION>` поверх rc файла.
///
/// Значения берутся как есть, без разбора в bool/число/список: это строки
/// команд, их кавычки нужны при разбиении на аргументы.
pub struct EnvOverrides {
    vars: Vec<(String, String)>,
}

impl EnvOverrides {
    pub const PREFIX: &'static str = "EDGES_";

    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl Provider for EnvOverrides {
    fn metadata(&self) -> Metadata {
        Metadata::named(format!("`{}` environment variables", Self::PREFIX))
    }

    fn data(&self) -> std::result::Result<Map<Profile, Dict>, figment::Error> {
        let mut dict = Dict::new();
        for (name, value) in &self.vars {
            let key = match name.strip_prefix(Self::PREFIX) {
                Some(key) => key.to_ascii_lowercase().replace('_', "-"),
                None => continue,
            };
            if let Some(region) = Region::from_key(&key) {
                dict.insert(region.key().replace('-', "_"), Value::from(value.clone()));
            }
        }

        Ok(Profile::Default.collect(dict))
    }
}

/// Разобрать содержимое rc файла. Более поздняя строка с тем же ключом
/// перекрывает предыдущую.
pub fn parse_rc(content: &str, path: &Path) -> Result<Vec<(Region, String)>> {
    let mut entries = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, value) = match line.split_once('=') {
            Some(pair) => pair,
            None => anyhow::bail!("{}:{} - syntax error", path.display(), i + 1),
        };

        if let Some(region) = Region::from_key(key.trim()) {
            entries.push((region, value.trim().to_string()));
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
# edges config
top-left = rofi -show drun

  bottom-right=xset dpms force off
unknown-key = whatever
left = notify-send \"left = edge\"
top-left = rofi -show run
";

    fn write_rc(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn no_env() -> EnvOverrides {
        EnvOverrides::from_vars(Vec::<(String, String)>::new())
    }

    #[test]
    fn test_parse_rc() {
        let entries = parse_rc(SAMPLE, Path::new("edges.rc")).unwrap();
        assert_eq!(
            entries,
            vec![
                (Region::TopLeft, "rofi -show drun".to_string()),
                (Region::BottomRight, "xset dpms force off".to_string()),
                (Region::Left, "notify-send \"left = edge\"".to_string()),
                (Region::TopLeft, "rofi -show run".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_rc_syntax_error_reports_line() {
        let err = parse_rc("top = a\n\nthis line is broken\n", Path::new("/tmp/edges.rc"))
            .unwrap_err();
        assert_eq!(err.to_string(), "/tmp/edges.rc:3 - syntax error");
    }

    #[test]
    fn test_load_commands_from_file() {
        let file = write_rc(SAMPLE);
        let commands = Commands::load_with(file.path(), no_env()).unwrap();

        assert_eq!(commands.get(Region::TopLeft), Some("rofi -show run"));
        assert_eq!(commands.get(Region::BottomRight), Some("xset dpms force off"));
        assert_eq!(commands.get(Region::Left), Some("notify-send \"left = edge\""));
        assert_eq!(commands.get(Region::Top), None);
        assert_eq!(commands.get(Region::None), None);
    }

    #[test]
    fn test_load_reports_malformed_file() {
        let file = write_rc("right = a\nbroken\n");
        let err = Commands::load_with(file.path(), no_env()).unwrap_err();
        assert!(format!("{:#}", err).contains(":2 - syntax error"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Commands::load_with(dir.path().join("missing.rc"), no_env()).is_err());
    }

    #[test]
    fn test_env_overrides_keep_values_verbatim() {
        let file = write_rc("left = xterm\ntop = rofi -show run\n");
        let overrides = EnvOverrides::from_vars([
            ("EDGES_LEFT", "notify-send \"quoted arg\""),
            ("EDGES_TOP_RIGHT", "true"),
            ("EDGES_RIGHT", "42"),
            ("EDGES_BOTTOM", "[a, b]"),
            ("EDGES_UNKNOWN", "ignored"),
            ("PATH", "/usr/bin"),
        ]);
        let commands = Commands::load_with(file.path(), overrides).unwrap();

        assert_eq!(commands.get(Region::Left), Some("notify-send \"quoted arg\""));
        assert_eq!(commands.get(Region::TopRight), Some("true"));
        assert_eq!(commands.get(Region::Right), Some("42"));
        assert_eq!(commands.get(Region::Bottom), Some("[a, b]"));
        assert_eq!(commands.get(Region::Top), Some("rofi -show run"));

        // кавычки сохраняются до разбиения на аргументы
        let argv = crate::utils::wordsplit::prepare_command(commands.get(Region::Left))
            .unwrap()
            .unwrap();
        assert_eq!(argv.args(), &["quoted arg".to_string()]);
    }

    #[test]
    fn test_options_delay_is_clamped() {
        assert_eq!(Options::default().with_delay_ms(250).delay, Duration::from_millis(250));
        assert_eq!(Options::default().with_delay_ms(60_000).delay, MAX_DELAY);
        assert!(Options::default().blocking);
    }
}
