pub mod session;
pub mod shutdown;
pub mod wordsplit;

pub use shutdown::ShutdownSignal;

/// Цель для событий `-v`: положения курсора и запускаемые команды
pub const VERBOSE_TARGET: &str = "edges::verbose";

// ✅ Макросы условного логирования для горячего пути (события курсора)
#[macro_export]
macro_rules! debug_if_enabled {
    ($($arg:tt)*) => {
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! trace_if_enabled {
    ($($arg:tt)*) => {
        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!($($arg)*);
        }
    };
}
