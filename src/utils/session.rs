use crate::error::{EdgesError, Result};
use tracing::{info, warn};

/// Проверить, что запущены в X11 сессии
pub fn check_session() -> Result<()> {
    info!("Проверка графической сессии...");

    let wayland_var = std::env::var("WAYLAND_DISPLAY").ok();
    let display_var = std::env::var("DISPLAY").ok();
    check_environment(wayland_var.as_deref(), display_var.as_deref())?;

    info!("X11 дисплей: {}", display_var.as_deref().unwrap_or_default());
    Ok(())
}

fn check_environment(wayland: Option<&str>, display: Option<&str>) -> Result<()> {
    if wayland.is_some() {
        return EdgesError::display("Global pointer query not supported on Wayland");
    }

    match display {
        Some(display) if !display.is_empty() => Ok(()),
        _ => {
            warn!("Переменная DISPLAY не задана");
            EdgesError::display("DISPLAY is not set, no X server to connect to")
        }
    }
}
