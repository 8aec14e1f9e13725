//! Разбиение строки команды на аргументы для запуска процесса.
//!
//! Правила близки к shell, но без подстановок: пробельные символы разделяют
//! слова, одинарные и двойные кавычки группируют, а обратный слеш перед
//! кавычкой делает её обычным символом.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    #[error("незакрытая кавычка {quote} в позиции {position}")]
    UnbalancedQuote { quote: char, position: usize },
}

/// Разобранная команда: имя программы и её аргументы
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentVector(Vec<String>);

impl ArgumentVector {
    pub fn new(args: Vec<String>) -> Self {
        Self(args)
    }

    /// Имя исполняемого файла (`argv[0]`)
    pub fn program(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Аргументы после `argv[0]`
    pub fn args(&self) -> &[String] {
        self.0.get(1..).unwrap_or(&[])
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[allow(dead_code)]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for ArgumentVector {
    fn from(args: Vec<String>) -> Self {
        Self(args)
    }
}

impl fmt::Display for ArgumentVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

// Тот же набор, что и у isspace() в C локали
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

fn is_quote(c: char) -> bool {
    c == '\'' || c == '"'
}

/// Разбить строку на слова.
///
/// Пустая строка даёт пустой вектор. Незакрытая кавычка приводит к
/// [`SplitError::UnbalancedQuote`] с позицией открывающей кавычки.
pub fn split(raw: &str) -> Result<ArgumentVector, SplitError> {
    let chars: Vec<char> = raw.chars().collect();
    let n = chars.len();
    let mut words = Vec::new();

    let mut i = skip_spaces(&chars, 0);
    while i < n {
        let mut word = String::new();

        while i < n && !is_space(chars[i]) {
            let c = chars[i];

            if is_quote(c) {
                let quote = c;
                let start = i;
                i += 1;
                loop {
                    if i >= n {
                        return Err(SplitError::UnbalancedQuote {
                            quote,
                            position: start,
                        });
                    }
                    if chars[i] == quote {
                        i += 1;
                        break;
                    }
                    if chars[i] == '\\' && i + 1 < n && chars[i + 1] == quote {
                        i += 1;
                    }
                    word.push(chars[i]);
                    i += 1;
                }
            } else {
                if c == '\\' && i + 1 < n && is_quote(chars[i + 1]) {
                    i += 1;
                }
                word.push(chars[i]);
                i += 1;
            }
        }

        words.push(word);
        i = skip_spaces(&chars, i);
    }

    Ok(ArgumentVector(words))
}

fn skip_spaces(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && is_space(chars[i]) {
        i += 1;
    }
    i
}

/// Подготовить команду из конфигурации к запуску.
///
/// `None`, пустая строка или команда, у которой первое слово после
/// обрезки пробелов пустое, означают "команды нет".
pub fn prepare_command(raw: Option<&str>) -> Result<Option<ArgumentVector>, SplitError> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(None),
    };

    let mut argv = split(raw)?;
    let program = match argv.0.first_mut() {
        Some(program) => program,
        None => return Ok(None),
    };

    let trimmed = program.trim_matches(is_space);
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.len() != program.len() {
        *program = trimmed.to_string();
    }

    Ok(Some(argv))
}
