use crate::utils::wordsplit::SplitError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdgesError {
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ошибка разбора команды: {0}")]
    Split(#[from] SplitError),

    #[error("Ошибка дисплея: {0}")]
    Display(String),

    /// Курсор оказался вне всех известных мониторов
    #[error("Нарушена топология мониторов: {0}")]
    Topology(String),

    #[error("Не удалось настроить обработку сигналов: {0}")]
    Signal(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl EdgesError {
    pub fn display<T>(msg: impl Into<String>) -> Result<T> {
        Err(EdgesError::Display(msg.into()))
    }
}

pub type Result<T> = std::result::Result<T, EdgesError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! edges_error {
    (display, $($arg:tt)*) => {
        $crate::error::EdgesError::Display(format!($($arg)*))
    };
    (topology, $($arg:tt)*) => {
        $crate::error::EdgesError::Topology(format!($($arg)*))
    };
    (signal, $($arg:tt)*) => {
        $crate::error::EdgesError::Signal(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::EdgesError::Internal(format!($($arg)*))
    };
}
