use crate::edges_error;
use crate::error::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::info;

/// Флаг завершения, общий для обработчика сигналов и основного цикла
#[derive(Clone, Default)]
pub struct ShutdownSignal {
    requested: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
        // notify_one сохраняет разрешение, даже если цикл ещё не ждёт
        self.notify.notify_one();
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Дождаться запроса на завершение
    pub async fn wait(&self) {
        if self.is_requested() {
            return;
        }
        self.notify.notified().await;
    }

    /// Подписаться на SIGINT, SIGTERM и SIGHUP.
    ///
    /// Сами обработчики tokio только будят задачу; флаг выставляется уже в
    /// обычном контексте.
    pub fn install(&self) -> Result<JoinHandle<()>> {
        let mut interrupt = signal(SignalKind::interrupt())
            .map_err(|e| edges_error!(signal, "SIGINT: {}", e))?;
        let mut terminate = signal(SignalKind::terminate())
            .map_err(|e| edges_error!(signal, "SIGTERM: {}", e))?;
        let mut hangup = signal(SignalKind::hangup())
            .map_err(|e| edges_error!(signal, "SIGHUP: {}", e))?;

        let shutdown = self.clone();
        Ok(tokio::spawn(async move {
            let name = tokio::select! {
                _ = interrupt.recv() => "SIGINT",
                _ = terminate.recv() => "SIGTERM",
                _ = hangup.recv() => "SIGHUP",
            };
            info!("Получен сигнал завершения ({})", name);
            shutdown.request();
        }))
    }
}
