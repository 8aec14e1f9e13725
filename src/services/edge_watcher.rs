use crate::config::Options;
use crate::error::Result;
use crate::events::{PointerSample, Region};
use crate::services::debouncer::MotionDebouncer;
use crate::services::dispatcher::CommandDispatcher;
use crate::services::edge_classifier::classify_sample;
use crate::services::geometry::resolve;
use crate::services::pointer_source::PointerSourceTrait;
use crate::utils::{ShutdownSignal, VERBOSE_TARGET};
use crate::{debug_if_enabled, trace_if_enabled};
use std::time::Duration;
use tracing::info;

/// Основной цикл: событие курсора -> границы -> debounce -> область -> команда.
///
/// Владеет источником событий и таблицей команд, поэтому соединение с
/// дисплеем и команды освобождаются при любом выходе из `run`.
pub struct EdgeWatcher {
    source: Box<dyn PointerSourceTrait>,
    dispatcher: CommandDispatcher,
    debouncer: MotionDebouncer,
    shutdown: ShutdownSignal,
    verbose: bool,
    delay: Duration,
}

impl EdgeWatcher {
    pub fn new(
        source: Box<dyn PointerSourceTrait>,
        dispatcher: CommandDispatcher,
        shutdown: ShutdownSignal,
        options: &Options,
    ) -> Self {
        Self {
            source,
            dispatcher,
            debouncer: MotionDebouncer::new(),
            shutdown,
            verbose: options.verbose,
            delay: options.delay,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        info!(
            "EdgeWatcher запущен: мониторов {}, команд {}",
            self.source.monitors().len(),
            self.dispatcher.table().configured()
        );

        loop {
            if self.shutdown.is_requested() {
                break;
            }

            let sample = tokio::select! {
                sample = self.source.next_sample() => sample?,
                _ = self.shutdown.wait() => break,
            };

            match sample {
                Some(sample) => {
                    self.handle_sample(sample).await?;
                }
                None => {
                    info!("Источник событий курсора закрыт");
                    break;
                }
            }
        }

        info!("EdgeWatcher остановлен");
        Ok(())
    }

    /// Обработать одно положение курсора; возвращает область, для которой
    /// была вызвана команда
    pub async fn handle_sample(&mut self, sample: PointerSample) -> Result<Option<Region>> {
        if self.verbose {
            info!(target: VERBOSE_TARGET, "{}", sample);
        }

        let bounds = resolve(sample, self.source.display_size(), self.source.monitors())?;

        // Команда должна срабатывать один раз на попадание в край
        if !self.debouncer.accept(sample, &bounds) {
            trace_if_enabled!("Событие {} подавлено (предыдущее {})", sample, self.debouncer.previous());
            return Ok(None);
        }

        let region = classify_sample(sample, &bounds);
        if region == Region::None {
            return Ok(None);
        }
        debug_if_enabled!(
            "Курсор {} в области {} ({})",
            sample,
            region,
            if region.is_corner() { "угол" } else { "край" }
        );

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;

            // Запускаем, только если курсор всё ещё в той же области
            let now = self.source.query_pointer()?;
            let still = classify_sample(now, &bounds);
            if still != region {
                debug_if_enabled!("Курсор покинул {} за время задержки ({})", region, now);
                return Ok(None);
            }
        }

        self.dispatcher.dispatch(region).await;
        Ok(Some(region))
    }
}
