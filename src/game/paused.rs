use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A widget for displaying the pause pop-up
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Paused;

impl Paused {
    /// The height that should be used for the `Rect` passed to
    /// `Paused::render()`
    pub(super) const HEIGHT: u16 = 4;

    /// The width that should be used for the `Rect` passed to
    /// `Paused::render()`
    pub(super) const WIDTH: u16 = 21;
}

impl Widget for Paused {
    /*
     * ┌────── PAUSED ─────┐
     * │ Press any key to  │
     * │ resume, n to quit │
     * └───────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        let lines = [
            Line::from("Press any key to"),
            Line::from_iter([
                Span::raw("resume, "),
                Span::styled("n", consts::KEY_STYLE),
                Span::raw(" to quit"),
            ]),
        ];
        for (line, row) in lines.into_iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_paused() {
        let area = Rect::new(0, 0, Paused::WIDTH, Paused::HEIGHT);
        let mut buffer = Buffer::empty(area);
        Paused.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "┌───── PAUSED ──────┐",
            "│ Press any key to  │",
            "│ resume, n to quit │",
            "└───────────────────┘",
        ]);
        expected.set_style(area, Style::reset());
        expected.set_style(Rect::new(10, 2, 1, 1), consts::KEY_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }
}
