use super::grid::{Bounds, Position};
use super::paused::Paused;
use crate::consts;
use crate::options::{Difficulty, Player};
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::Line,
    widgets::{Block, Widget},
};
use std::io;
use thiserror::Error;

/// Something the game can draw its field on
pub(crate) trait Surface {
    /// Draw `glyph` at `pos` in the colors for `paint`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `pos` lies outside the field.
    fn draw_cell(&mut self, pos: Position, glyph: char, paint: Paint) -> Result<(), RenderError>;

    /// Reset the cell at `pos` to the background.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `pos` lies outside the field.
    fn clear_cell(&mut self, pos: Position) -> Result<(), RenderError>;

    /// Show the field's current contents along with the status bar
    fn present(&mut self, hud: &Hud) -> Result<(), RenderError>;
}

/// The color scheme for a drawn cell
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Paint {
    Obstacle,
    Snake(Player),
    Collision,
}

impl Paint {
    fn style(self) -> Style {
        match self {
            Paint::Obstacle => consts::OBSTACLE_STYLE,
            Paint::Snake(Player::One) => consts::SNAKE_ONE_STYLE,
            Paint::Snake(Player::Two) => consts::SNAKE_TWO_STYLE,
            Paint::Collision => consts::COLLISION_STYLE,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Mark {
    glyph: char,
    paint: Paint,
}

/// In-memory contents of the play field
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Board {
    bounds: Bounds,
    cells: Vec<Option<Mark>>,
}

impl Board {
    pub(crate) fn new(bounds: Bounds) -> Board {
        Board {
            bounds,
            cells: vec![None; bounds.area()],
        }
    }

    /// Return the glyph & paint drawn at `pos`, if any
    pub(crate) fn get(&self, pos: Position) -> Option<(char, Paint)> {
        let i = self.index(pos).ok()?;
        self.cells[i].map(|m| (m.glyph, m.paint))
    }

    fn index(&self, pos: Position) -> Result<usize, RenderError> {
        let cell = self.bounds.cell(pos).ok_or(RenderError::OutOfBounds {
            pos,
            bounds: self.bounds,
        })?;
        Ok(usize::from(cell.y) * usize::from(self.bounds.width) + usize::from(cell.x))
    }
}

impl Surface for Board {
    fn draw_cell(&mut self, pos: Position, glyph: char, paint: Paint) -> Result<(), RenderError> {
        let i = self.index(pos)?;
        self.cells[i] = Some(Mark { glyph, paint });
        Ok(())
    }

    fn clear_cell(&mut self, pos: Position) -> Result<(), RenderError> {
        let i = self.index(pos)?;
        self.cells[i] = None;
        Ok(())
    }

    fn present(&mut self, _hud: &Hud) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Snapshot of the session state shown around the field
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Hud {
    pub(crate) score: u32,
    pub(crate) lengths: Vec<(Player, usize)>,
    pub(crate) difficulty: Difficulty,
    pub(crate) paused: bool,
    /// Description of how the game ended, once it has
    pub(crate) outcome: Option<String>,
}

impl Hud {
    fn status_line(&self) -> String {
        let mut parts = vec![format!(" Score: {}", self.score)];
        match self.lengths.as_slice() {
            [(_, len)] => parts.push(format!("Length: {len}")),
            lengths => parts.extend(
                lengths
                    .iter()
                    .map(|(player, len)| format!("P{}: {len}", player.number())),
            ),
        }
        parts.push(self.difficulty.to_string());
        parts.join(" | ")
    }

    fn message_line(&self) -> String {
        if let Some(ref outcome) = self.outcome {
            format!(" GAME OVER: {outcome}")
        } else if self.lengths.len() > 1 {
            String::from(" P1: ←/→  P2: q/s | p: pause | n: quit")
        } else {
            String::from(" ←/→: turn | p: pause | n: quit")
        }
    }
}

/// Widget drawing the whole game screen: status bar, bordered field, and
/// message line
#[derive(Clone, Copy, Debug)]
pub(crate) struct View<'a> {
    pub(crate) board: &'a Board,
    pub(crate) hud: &'a Hud,
}

impl View<'_> {
    /// The terminal area needed to show a field of size `bounds`
    pub(crate) fn required_size(bounds: Bounds) -> Size {
        Size {
            width: bounds.width.saturating_add(2),
            height: bounds.height.saturating_add(4),
        }
    }

    /// The largest field that fits in a terminal of size `size`
    pub(crate) fn field_for(size: Size) -> Bounds {
        Bounds::new(size.width.saturating_sub(2), size.height.saturating_sub(4))
    }
}

impl Widget for View<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [status_area, field_area, msg_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);
        Line::styled(self.hud.status_line(), consts::SCORE_BAR_STYLE).render(status_area, buf);

        let mut block_size = self.board.bounds.size();
        block_size.width = block_size.width.saturating_add(2);
        block_size.height = block_size.height.saturating_add(2);
        let block_area = center_rect(field_area, block_size);
        Block::bordered().render(block_area, buf);
        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for (i, mark) in self.board.cells.iter().enumerate() {
            let Some(mark) = mark else {
                continue;
            };
            let width = usize::from(self.board.bounds.width);
            let (Ok(x), Ok(y)) = (u16::try_from(i % width), u16::try_from(i / width)) else {
                continue;
            };
            canvas.draw_cell(x, y, mark.glyph, mark.paint.style());
        }

        Line::from(self.hud.message_line()).render(msg_area, buf);

        if self.hud.paused {
            Paused.render(
                center_rect(
                    block_area,
                    Size {
                        width: Paused::WIDTH,
                        height: Paused::HEIGHT,
                    },
                ),
                buf,
            );
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, x: u16, y: u16, symbol: char, style: Style) {
        if x >= self.area.width || y >= self.area.height {
            return;
        }
        if let Some(cell) = self.buf.cell_mut((self.area.x + x, self.area.y + y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum RenderError {
    #[error("cannot draw at {pos}: cell lies outside the {bounds} field")]
    OutOfBounds { pos: Position, bounds: Bounds },
    #[error("failed to draw to terminal")]
    Io(#[from] io::Error),
}
