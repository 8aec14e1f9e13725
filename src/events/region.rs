use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// Количество "горячих" областей (4 угла и 4 края)
pub const NUM_REGIONS: usize = 8;

/// Результат классификации положения курсора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    Left,
    Top,
    Right,
    Bottom,
    None,
}

// Статическая карта ключей конфигурации
static KEY_TO_REGION: Lazy<HashMap<&'static str, Region>> = Lazy::new(|| {
    Region::ALL.iter().map(|region| (region.key(), *region)).collect()
});

impl Region {
    /// Все области, для которых можно задать команду, в порядке индексов
    pub const ALL: [Region; NUM_REGIONS] = [
        Region::TopLeft,
        Region::TopRight,
        Region::BottomRight,
        Region::BottomLeft,
        Region::Left,
        Region::Top,
        Region::Right,
        Region::Bottom,
    ];

    /// Имя области в конфигурации и в опциях командной строки
    pub fn key(&self) -> &'static str {
        match self {
            Region::TopLeft => "top-left",
            Region::TopRight => "top-right",
            Region::BottomRight => "bottom-right",
            Region::BottomLeft => "bottom-left",
            Region::Left => "left",
            Region::Top => "top",
            Region::Right => "right",
            Region::Bottom => "bottom",
            Region::None => "none",
        }
    }

    /// Найти область по ключу конфигурации (`top-left`, `bottom` и т.д.)
    pub fn from_key(key: &str) -> Option<Region> {
        KEY_TO_REGION.get(key).copied()
    }

    /// Индекс в таблице команд; у `Region::None` индекса нет
    pub fn index(&self) -> Option<usize> {
        Region::ALL.iter().position(|region| region == self)
    }

    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            Region::TopLeft | Region::TopRight | Region::BottomRight | Region::BottomLeft
        )
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_lookup() {
        assert_eq!(Region::from_key("top-left"), Some(Region::TopLeft));
        assert_eq!(Region::from_key("bottom"), Some(Region::Bottom));
        assert_eq!(Region::from_key("none"), None);
        assert_eq!(Region::from_key("TOP"), None);
    }

    #[test]
    fn test_indexes_are_stable() {
        for (i, region) in Region::ALL.iter().enumerate() {
            assert_eq!(region.index(), Some(i));
            assert_eq!(Region::from_key(region.key()), Some(*region));
        }
        assert_eq!(Region::None.index(), None);
    }

    #[test]
    fn test_corners() {
        assert!(Region::BottomLeft.is_corner());
        assert!(!Region::Left.is_corner());
        assert!(!Region::None.is_corner());
    }
}
