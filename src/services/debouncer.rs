use crate::events::PointerSample;
use crate::services::geometry::Bounds;

/// Нужно ли классифицировать новое положение курсора.
///
/// Повторное событие в той же точке, а также движение вдоль края внутри
/// полосы срабатывания подавляются, чтобы команда не запускалась заново,
/// пока курсор лежит на краю.
pub fn should_classify(
    current: PointerSample,
    previous: PointerSample,
    max_x: i32,
    max_y: i32,
    offset: i32,
) -> bool {
    if current == previous {
        return false;
    }
    if current.x == previous.x && current.y > offset && current.y < max_y - offset {
        return false;
    }
    if current.y == previous.y && current.x > offset && current.x < max_x - offset {
        return false;
    }
    true
}

/// Хранит предыдущее принятое положение курсора
#[derive(Debug, Clone)]
pub struct MotionDebouncer {
    previous: PointerSample,
}

impl MotionDebouncer {
    pub fn new() -> Self {
        Self {
            previous: PointerSample::SENTINEL,
        }
    }

    /// Проверить событие и, если оно принято, запомнить его
    pub fn accept(&mut self, current: PointerSample, bounds: &Bounds) -> bool {
        if !should_classify(current, self.previous, bounds.max_x, bounds.max_y, bounds.offset) {
            return false;
        }
        self.previous = current;
        true
    }

    pub fn previous(&self) -> PointerSample {
        self.previous
    }
}

impl Default for MotionDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
