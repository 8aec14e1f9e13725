//! Вычисление границ экрана для текущего положения курсора.
//!
//! При одном мониторе границами служат размеры экрана X11. При нескольких
//! мониторах правая и нижняя границы берутся у монитора, на котором
//! находится курсор, если этот край лежит внутри экрана.

use crate::edges_error;
use crate::error::Result;
use crate::events::PointerSample;

/// Доля высоты, отступ на которую от углов отключает срабатывание краёв
pub const EDGE_OFFSET_RATIO: f64 = 0.25;

/// Прямоугольник монитора в пикселях экрана
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, point: PointerSample) -> bool {
        (self.x <= point.x && point.x < self.x + self.width)
            && (self.y <= point.y && point.y < self.y + self.height)
    }
}

/// Границы для одного события курсора
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub max_x: i32,
    pub max_y: i32,
    pub offset: i32,
}

impl Bounds {
    pub fn new(max_x: i32, max_y: i32) -> Self {
        let offset = ((max_y as f64) * EDGE_OFFSET_RATIO) as i32;
        Self {
            max_x,
            max_y,
            offset: offset.max(0),
        }
    }
}

/// Рассчитать границы для `pointer` на экране `display` (ширина, высота).
///
/// Если мониторов несколько, а курсор не лежит ни в одном из них,
/// возвращается [`EdgesError::Topology`](crate::error::EdgesError::Topology):
/// список мониторов не согласуется с экраном и продолжать нельзя.
pub fn resolve(pointer: PointerSample, display: (i32, i32), monitors: &[Rectangle]) -> Result<Bounds> {
    let (width, height) = display;
    let mut max_x = width - 1;
    let mut max_y = height - 1;

    if monitors.len() == 1 {
        return Ok(Bounds::new(max_x, max_y));
    }

    let monitor = monitors
        .iter()
        .find(|rect| rect.contains(pointer))
        .ok_or_else(|| {
            edges_error!(
                topology,
                "курсор ({}, {}) не находится ни на одном из {} мониторов",
                pointer.x,
                pointer.y,
                monitors.len()
            )
        })?;

    if monitor.x + monitor.width <= max_x {
        max_x = monitor.x + monitor.width - 1;
    }
    if monitor.y + monitor.height <= max_y {
        max_y = monitor.y + monitor.height - 1;
    }

    Ok(Bounds::new(max_x, max_y))
}
