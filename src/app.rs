use crate::command::KeyboardInput;
use crate::game::{
    play, Board, Bounds, GameStatus, Hud, InputSource, Paint, Position, RenderError, Session,
    Summary, Surface, View,
};
use crate::options::Options;
use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{backend::Backend, layout::Size, Terminal};

/// The game program: sets up a session from the options and runs it in the
/// terminal
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    options: Options,
}

impl App {
    pub(crate) fn new(options: Options) -> App {
        App { options }
    }

    /// Determine the field size, set up the session, and play it out in the
    /// terminal, returning the final statistics
    pub(crate) fn run(self) -> anyhow::Result<Summary> {
        let bounds = self.field_bounds()?;
        let mut rng = match self.options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let session = Session::new(&self.options, bounds, &mut rng)
            .context("failed to set up game")?;
        let terminal = ratatui::init();
        let r = App::play(terminal, session, KeyboardInput::new(self.options.players));
        ratatui::restore();
        r
    }

    fn play<B: Backend>(
        mut terminal: Terminal<B>,
        session: Session,
        mut input: KeyboardInput,
    ) -> anyhow::Result<Summary> {
        let mut screen = Screen::new(&mut terminal, session.bounds());
        let summary = play(session, &mut input, &mut screen).context("game aborted")?;
        if summary.status != GameStatus::Stopped {
            // Leave the final board up until the player has seen it
            input.next_event(None).context("failed to read input")?;
        }
        Ok(summary)
    }

    /// Return the configured field size, or the largest field that fits in
    /// the terminal
    fn field_bounds(&self) -> anyhow::Result<Bounds> {
        let (width, height) =
            crossterm::terminal::size().context("failed to get terminal size")?;
        let term = Size { width, height };
        let Some(bounds) = self.options.grid else {
            return Ok(View::field_for(term));
        };
        let needed = View::required_size(bounds);
        if needed.width > term.width || needed.height > term.height {
            anyhow::bail!(
                "terminal is too small for a {bounds} field: need {}x{}, have {}x{}",
                needed.width,
                needed.height,
                term.width,
                term.height
            );
        }
        Ok(bounds)
    }
}

/// A [`Surface`] that keeps the field in a [`Board`] and shows it in the
/// terminal
#[derive(Debug)]
struct Screen<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    board: Board,
}

impl<'a, B: Backend> Screen<'a, B> {
    fn new(terminal: &'a mut Terminal<B>, bounds: Bounds) -> Self {
        Screen {
            terminal,
            board: Board::new(bounds),
        }
    }
}

impl<B: Backend> Surface for Screen<'_, B> {
    fn draw_cell(&mut self, pos: Position, glyph: char, paint: Paint) -> Result<(), RenderError> {
        self.board.draw_cell(pos, glyph, paint)
    }

    fn clear_cell(&mut self, pos: Position) -> Result<(), RenderError> {
        self.board.clear_cell(pos)
    }

    fn present(&mut self, hud: &Hud) -> Result<(), RenderError> {
        let board = &self.board;
        self.terminal.draw(|frame| {
            frame.render_widget(View { board, hud }, frame.area());
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts;
    use crate::options::{Difficulty, Player};
    use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect};

    #[test]
    fn screen_presents_board() {
        let mut terminal = Terminal::new(TestBackend::new(14, 7)).unwrap();
        let bounds = Bounds::new(12, 3);
        let mut screen = Screen::new(&mut terminal, bounds);
        screen
            .draw_cell(Position::new(0, 0), 'v', Paint::Snake(Player::One))
            .unwrap();
        screen
            .draw_cell(Position::new(11, 2), 'x', Paint::Obstacle)
            .unwrap();
        screen.clear_cell(Position::new(11, 2)).unwrap();
        assert!(screen.draw_cell(Position::new(12, 0), 'x', Paint::Obstacle).is_err());
        let hud = Hud {
            score: 12,
            lengths: vec![(Player::One, 5)],
            difficulty: Difficulty::Easy,
            paused: false,
            outcome: Some(String::from("player 1 left")),
        };
        screen.present(&hud).unwrap();
        let mut expected = Buffer::with_lines([
            " Score: 12 | L",
            "┌────────────┐",
            "│v           │",
            "│            │",
            "│            │",
            "└────────────┘",
            " GAME OVER: pl",
        ]);
        expected.set_style(Rect::new(0, 0, 14, 1), consts::SCORE_BAR_STYLE);
        expected.set_style(Rect::new(1, 2, 1, 1), consts::SNAKE_ONE_STYLE);
        terminal.backend().assert_buffer(&expected);
    }
}
