use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};

pub(crate) trait EnumExt: Enum {
    /// Iterate over all variants in declaration order
    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }
}

impl<T: Enum> EnumExt for T {}

/// Return a rectangle of the given size centered within `area`
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}
