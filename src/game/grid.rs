use rand::Rng;
use ratatui::layout::Size;
use serde::Deserialize;
use std::fmt;

/// A cell on the play field.  The top-left corner is `(0, 0)`.
///
/// Coordinates are signed so that a snake's next head can be computed before
/// checking it against the field's [`Bounds`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Position {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Position {
    /// Reserved marker for "no position".  It lies outside every field.
    pub(crate) const END: Position = Position { x: -1, y: -1 };

    pub(crate) const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    pub(crate) fn is_end(self) -> bool {
        self == Position::END
    }

    /// Return the position shifted by `(dx, dy)`
    pub(crate) fn offset(self, (dx, dy): (i32, i32)) -> Position {
        Position {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The extents of the rectangular play field
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl Bounds {
    pub(crate) const fn new(width: u16, height: u16) -> Bounds {
        Bounds { width, height }
    }

    /// True if `p` is a cell of the field
    pub(crate) fn contains(self, p: Position) -> bool {
        (0..i32::from(self.width)).contains(&p.x) && (0..i32::from(self.height)).contains(&p.y)
    }

    /// Total number of cells in the field
    pub(crate) fn area(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    pub(crate) fn center(self) -> Position {
        Position::new(i32::from(self.width / 2), i32::from(self.height / 2))
    }

    /// Pick a cell of the field uniformly at random.  The field must not be
    /// empty.
    pub(crate) fn random_position<R: Rng>(self, rng: &mut R) -> Position {
        Position::new(
            rng.random_range(0..i32::from(self.width)),
            rng.random_range(0..i32::from(self.height)),
        )
    }

    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Convert `p` to the unsigned position of a terminal cell relative to
    /// the field's top-left corner, or `None` if `p` lies outside the field.
    pub(crate) fn cell(self, p: Position) -> Option<ratatui::layout::Position> {
        if !self.contains(p) {
            return None;
        }
        let x = u16::try_from(p.x).ok()?;
        let y = u16::try_from(p.y).ok()?;
        Some(ratatui::layout::Position { x, y })
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
