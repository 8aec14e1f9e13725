use std::fmt;

/// Положение курсора в координатах корневого окна
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerSample {
    pub x: i32,
    pub y: i32,
}

impl PointerSample {
    /// Начальное "предыдущее" положение: не совпадает ни с углом (0,0),
    /// ни с краями обычного экрана, поэтому первое событие всегда
    /// классифицируется.
    pub const SENTINEL: PointerSample = PointerSample { x: 1, y: 1 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Default for PointerSample {
    fn default() -> Self {
        Self::SENTINEL
    }
}

impl fmt::Display for PointerSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.x, self.y)
    }
}
