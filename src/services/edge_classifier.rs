use crate::events::{PointerSample, Region};
use crate::services::geometry::Bounds;

/// Определить, в какую область попал курсор.
///
/// Углы проверяются раньше краёв и требуют точного совпадения по обеим
/// осям. Края срабатывают только строго внутри полосы
/// `offset < coord < max - offset`: значения на самой границе полосы дают
/// `Region::None`.
pub fn classify(x: i32, y: i32, max_x: i32, max_y: i32, offset: i32) -> Region {
    if x == 0 && y == 0 {
        Region::TopLeft
    } else if x == max_x && y == 0 {
        Region::TopRight
    } else if x == max_x && y == max_y {
        Region::BottomRight
    } else if x == 0 && y == max_y {
        Region::BottomLeft
    } else if x == 0 && y > offset && y < max_y - offset {
        Region::Left
    } else if y == 0 && x > offset && x < max_x - offset {
        Region::Top
    } else if x == max_x && y > offset && y < max_y - offset {
        Region::Right
    } else if y == max_y && x > offset && x < max_x - offset {
        Region::Bottom
    } else {
        Region::None
    }
}

/// То же, что [`classify`], для готовых границ
pub fn classify_sample(sample: PointerSample, bounds: &Bounds) -> Region {
    classify(sample.x, sample.y, bounds.max_x, bounds.max_y, bounds.offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_X: i32 = 1919;
    const MAX_Y: i32 = 1079;
    const OFFSET: i32 = 269;

    fn at(x: i32, y: i32) -> Region {
        classify(x, y, MAX_X, MAX_Y, OFFSET)
    }

    #[test]
    fn test_corners() {
        assert_eq!(at(0, 0), Region::TopLeft);
        assert_eq!(at(MAX_X, 0), Region::TopRight);
        assert_eq!(at(MAX_X, MAX_Y), Region::BottomRight);
        assert_eq!(at(0, MAX_Y), Region::BottomLeft);
    }

    #[test]
    fn test_edges() {
        assert_eq!(at(0, 540), Region::Left);
        assert_eq!(at(960, 0), Region::Top);
        assert_eq!(at(MAX_X, 540), Region::Right);
        assert_eq!(at(960, MAX_Y), Region::Bottom);
    }

    #[test]
    fn test_none_inside_screen() {
        assert_eq!(at(960, 540), Region::None);
        assert_eq!(at(1, 1), Region::None);
    }

    #[test]
    fn test_band_limits_are_exclusive() {
        // вертикальная полоса: (269, 810)
        assert_eq!(at(0, OFFSET), Region::None);
        assert_eq!(at(0, OFFSET + 1), Region::Left);
        assert_eq!(at(0, MAX_Y - OFFSET), Region::None);
        assert_eq!(at(0, MAX_Y - OFFSET - 1), Region::Left);
        assert_eq!(at(MAX_X, OFFSET), Region::None);
        assert_eq!(at(MAX_X, MAX_Y - OFFSET), Region::None);

        // горизонтальная полоса использует тот же offset: (269, 1650)
        assert_eq!(at(OFFSET, 0), Region::None);
        assert_eq!(at(OFFSET + 1, 0), Region::Top);
        assert_eq!(at(MAX_X - OFFSET, 0), Region::None);
        assert_eq!(at(MAX_X - OFFSET - 1, MAX_Y), Region::Bottom);
        assert_eq!(at(MAX_X - OFFSET, MAX_Y), Region::None);
    }

    #[test]
    fn test_near_corner_is_none() {
        assert_eq!(at(0, 1), Region::None);
        assert_eq!(at(1, 0), Region::None);
        assert_eq!(at(MAX_X - 1, MAX_Y), Region::None);
    }

    #[test]
    fn test_classify_sample() {
        let bounds = Bounds::new(MAX_X, MAX_Y);
        assert_eq!(classify_sample(PointerSample::new(0, 0), &bounds), Region::TopLeft);
        assert_eq!(classify_sample(PointerSample::new(960, MAX_Y), &bounds), Region::Bottom);
    }
}
