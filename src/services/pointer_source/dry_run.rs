use crate::error::Result;
use crate::events::PointerSample;
use crate::services::geometry::Rectangle;
use tokio::time::{interval, Duration, Interval};
use tracing::info;

use super::r#trait::PointerSourceTrait;

const WIDTH: i32 = 1920;
const HEIGHT: i32 = 1080;

// Курсор по очереди посещает все углы и края, возвращаясь в центр
const TOUR: [(i32, i32); 16] = [
    (0, 0),
    (960, 540),
    (WIDTH - 1, 0),
    (960, 540),
    (WIDTH - 1, HEIGHT - 1),
    (960, 540),
    (0, HEIGHT - 1),
    (960, 540),
    (0, 540),
    (960, 540),
    (960, 0),
    (960, 540),
    (WIDTH - 1, 540),
    (960, 540),
    (960, HEIGHT - 1),
    (960, 540),
];

/// Эмуляция курсора без X сервера
pub struct DryRunPointerSource {
    monitors: Vec<Rectangle>,
    ticker: Interval,
    step: usize,
    current: PointerSample,
}

impl DryRunPointerSource {
    pub fn new() -> Self {
        info!("Dry-run режим - PointerSource работает в режиме эмуляции ({}x{})", WIDTH, HEIGHT);
        Self {
            monitors: vec![Rectangle::new(0, 0, WIDTH, HEIGHT)],
            ticker: interval(Duration::from_secs(2)),
            step: 0,
            current: PointerSample::new(960, 540),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl PointerSourceTrait for DryRunPointerSource {
    async fn next_sample(&mut self) -> Result<Option<PointerSample>> {
        self.ticker.tick().await;

        let (x, y) = TOUR[self.step];
        self.step = (self.step + 1) % TOUR.len();
        self.current = PointerSample::new(x, y);

        info!("Dry-run: эмулируем перемещение курсора в {}", self.current);
        Ok(Some(self.current))
    }

    fn query_pointer(&self) -> Result<PointerSample> {
        Ok(self.current)
    }

    fn display_size(&self) -> (i32, i32) {
        (WIDTH, HEIGHT)
    }

    fn monitors(&self) -> &[Rectangle] {
        &self.monitors
    }
}
