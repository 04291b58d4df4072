mod board;
mod chain;
mod direction;
mod grid;
mod obstacles;
mod paused;
mod resolver;
mod snake;
pub(crate) use self::board::{Board, Hud, Paint, RenderError, Surface, View};
use self::chain::{ChainError, PositionChain};
pub(crate) use self::direction::Turn;
pub(crate) use self::grid::{Bounds, Position};
use self::obstacles::ObstacleError;
use self::resolver::Step;
use self::snake::Snake;
use crate::consts;
use crate::options::{Difficulty, Options, OptionsError, Parameters, Player, Players};
use crate::util::EnumExt;
use enum_map::{Enum, EnumMap};
use rand::Rng;
use std::fmt;
use std::io;
use std::time::{Duration, Instant};
use thiserror::Error;

/// The state of a game session
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameStatus {
    Running,
    /// A player asked to quit
    Stopped,
    ExitedBounds,
    HitObstacle,
    HitSnake,
    /// A snake reached its maximum length; its player wins
    MaxLengthReached,
}

impl GameStatus {
    /// True if the game is over
    pub(crate) fn is_terminal(self) -> bool {
        self != GameStatus::Running
    }
}

/// An input event as seen by the game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum InputEvent {
    Quit,
    Turn(Player, Turn),
    Pause,
    /// A key press with no meaning to the game.  Resumes a paused game.
    Other,
    /// Nothing happened before the wait expired
    Timeout,
}

/// A source of [`InputEvent`]s
pub(crate) trait InputSource {
    /// Wait for the next input event.  If `timeout` is `Some`, give up after
    /// that long and return [`InputEvent::Timeout`]; if it is `None`, wait
    /// indefinitely.
    fn next_event(&mut self, timeout: Option<Duration>) -> io::Result<InputEvent>;
}

/// A game in progress: the field, the snakes, and the run state
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Session {
    bounds: Bounds,
    params: Parameters,
    difficulty: Difficulty,
    snakes: Vec<Snake>,
    obstacles: PositionChain,
    /// Ticks left until the next growth tick
    grow_countdown: u32,
    score: u32,
    status: GameStatus,
    /// The player whose move ended the game
    culprit: Option<Player>,
    paused: bool,
}

impl Session {
    /// Set up a new game on a field of size `bounds`, placing obstacles with
    /// `rng`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the options are inconsistent or the field cannot hold
    /// the snakes & obstacles they call for.
    pub(crate) fn new<R: Rng>(
        options: &Options,
        bounds: Bounds,
        rng: &mut R,
    ) -> Result<Session, SetupError> {
        let params = options.parameters()?;
        if bounds.area() == 0 {
            return Err(SetupError::EmptyField(bounds));
        }
        if params.max_len < consts::INITIAL_SNAKE_LENGTH {
            return Err(SetupError::MaxLength {
                max_len: params.max_len,
            });
        }
        let mut reserved = Vec::new();
        for player in options.players.iter() {
            let cells = Snake::start_cells(bounds, player).collect::<Vec<_>>();
            if !cells.iter().all(|&p| bounds.contains(p)) {
                return Err(SetupError::FieldTooSmall {
                    bounds,
                    players: options.players,
                });
            }
            reserved.extend(cells);
        }
        if params.max_len > bounds.area() {
            return Err(SetupError::LongerThanField {
                max_len: params.max_len,
                bounds,
            });
        }
        let snakes = options
            .players
            .iter()
            .map(|player| Snake::spawn(bounds, player, params.max_len))
            .collect::<Result<Vec<_>, _>>()?;
        for snake in &snakes {
            reserved.extend(
                std::iter::successors(Some(snake.head()), |&p| {
                    Some(snake.direction().advance(p))
                })
                .skip(1)
                .take(consts::FORWARDS_CLEARANCE),
            );
        }
        let obstacles = obstacles::generate(bounds, params.obstacles, &reserved, rng)?;
        log::info!(
            "Starting {}-player game at difficulty {} on {bounds} field: {params:?}",
            options.players,
            options.difficulty
        );
        for (player, snake) in Player::iter().zip(&snakes) {
            log::debug!(
                "{player} starts with head at {} and tail at {}, room for {} cells",
                snake.head(),
                snake.body().tail().unwrap_or(Position::END),
                snake.body().capacity() - 1
            );
        }
        Ok(Session {
            bounds,
            params,
            difficulty: options.difficulty,
            snakes,
            obstacles,
            grow_countdown: params.grow_interval,
            score: 0,
            status: GameStatus::Running,
            culprit: None,
            paused: false,
        })
    }

    pub(crate) fn status(&self) -> GameStatus {
        self.status
    }

    pub(crate) fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Iterate over the players & their snakes
    fn players(&self) -> impl Iterator<Item = (Player, &Snake)> {
        Player::iter().zip(&self.snakes)
    }

    /// Move the snakes one step and update the score & growth schedule.
    /// Returns `None` without doing anything if the game is already over.
    fn tick(&mut self) -> Option<Step> {
        if self.status.is_terminal() {
            return None;
        }
        let grow = self.grow_countdown == 0;
        if grow {
            self.grow_countdown = self.params.grow_interval;
        } else {
            self.grow_countdown -= 1;
        }
        let step = resolver::advance(&mut self.snakes, &self.obstacles, self.bounds, grow);
        self.score = self.score.saturating_add(1);
        self.status = step.status;
        self.culprit = step.culprit;
        if self.status.is_terminal() {
            log::info!("Game over after {} ticks: {}", self.score, self.outcome());
        }
        Some(step)
    }

    /// Apply a turn or quit request.  Other events are ignored.
    fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => {
                log::info!("Quit requested after {} ticks", self.score);
                self.status = GameStatus::Stopped;
            }
            InputEvent::Turn(player, side) => {
                if let Some(snake) = self.snakes.get_mut(player.into_usize()) {
                    snake.turn(side);
                }
            }
            InputEvent::Pause | InputEvent::Other | InputEvent::Timeout => (),
        }
    }

    /// Handle input until the current tick's time is up or the game is
    /// stopped.  A pause ends the tick once the game is resumed.
    ///
    /// Each snake turns at most once per tick; further turns for the same
    /// player before the deadline are dropped.
    fn wait_for_tick<I, S>(&mut self, input: &mut I, surface: &mut S) -> Result<(), PlayError>
    where
        I: InputSource,
        S: Surface,
    {
        let deadline = Instant::now() + self.params.tick;
        let mut turned = EnumMap::<Player, bool>::default();
        while !self.status.is_terminal() {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if timeout.is_zero() {
                break;
            }
            match input.next_event(Some(timeout))? {
                InputEvent::Timeout => break,
                InputEvent::Pause => {
                    self.pause(input, surface)?;
                    break;
                }
                InputEvent::Turn(player, side) if turned[player] => {
                    log::trace!("Dropping extra {side:?} turn for {player} this tick");
                }
                event => {
                    if let InputEvent::Turn(player, _) = event {
                        turned[player] = true;
                    }
                    self.apply(event);
                }
            }
        }
        Ok(())
    }

    /// Block until the next input event.  A quit request is honored; any other
    /// event just resumes the game.
    fn pause<I, S>(&mut self, input: &mut I, surface: &mut S) -> Result<(), PlayError>
    where
        I: InputSource,
        S: Surface,
    {
        log::info!("Game paused");
        self.paused = true;
        surface.present(&self.hud())?;
        let event = input.next_event(None)?;
        self.paused = false;
        if event == InputEvent::Quit {
            self.apply(event);
        } else {
            log::info!("Game resumed");
            surface.present(&self.hud())?;
        }
        Ok(())
    }

    /// Draw the obstacles & snakes in full
    fn draw_all<S: Surface>(&self, surface: &mut S) -> Result<(), RenderError> {
        for p in self.obstacles.iter() {
            surface.draw_cell(p, consts::OBSTACLE_SYMBOL, Paint::Obstacle)?;
        }
        for (player, snake) in self.players() {
            let paint = Paint::Snake(player);
            for p in snake.body().iter().skip(1) {
                surface.draw_cell(p, consts::SNAKE_BODY_SYMBOL, paint)?;
            }
            surface.draw_cell(snake.head(), snake.head_symbol(), paint)?;
        }
        Ok(())
    }

    /// Redraw only the cells changed by `step`
    fn draw_step<S: Surface>(&self, step: &Step, surface: &mut S) -> Result<(), RenderError> {
        for mv in &step.moves {
            let paint = Paint::Snake(mv.player);
            if let Some(tail) = mv.old_tail {
                surface.clear_cell(tail)?;
            }
            if !mv.old_head.is_end() {
                surface.draw_cell(mv.old_head, consts::SNAKE_BODY_SYMBOL, paint)?;
            }
            let glyph = self
                .snakes
                .get(mv.player.into_usize())
                .map_or(consts::SNAKE_BODY_SYMBOL, Snake::head_symbol);
            surface.draw_cell(mv.new_head, glyph, paint)?;
        }
        if let Some(p) = step.collision {
            surface.draw_cell(p, consts::COLLISION_SYMBOL, Paint::Collision)?;
        }
        Ok(())
    }

    fn lengths(&self) -> Vec<(Player, usize)> {
        self.players()
            .map(|(player, snake)| (player, snake.len()))
            .collect()
    }

    /// Describe how the game ended
    fn outcome(&self) -> String {
        let who = self
            .culprit
            .map_or_else(|| String::from("a snake"), |p| p.to_string());
        match self.status {
            GameStatus::Running => String::from("game in progress"),
            GameStatus::Stopped => String::from("game stopped at the player's request"),
            GameStatus::ExitedBounds => format!("{who} left the field"),
            GameStatus::HitObstacle => format!("{who} hit an obstacle"),
            GameStatus::HitSnake => format!("{who} ran into a snake"),
            GameStatus::MaxLengthReached => {
                format!("{who} reached length {} and wins!", self.params.max_len)
            }
        }
    }

    /// Return the state shown alongside the field
    pub(crate) fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            lengths: self.lengths(),
            difficulty: self.difficulty,
            paused: self.paused,
            outcome: self.status.is_terminal().then(|| self.outcome()),
        }
    }

    /// Return the final statistics of the game
    pub(crate) fn summary(&self) -> Summary {
        Summary {
            status: self.status,
            outcome: self.outcome(),
            score: self.score,
            lengths: self.lengths(),
        }
    }
}

/// Run `session` to completion, reading input from `input` and drawing on
/// `surface`
///
/// # Errors
///
/// Returns `Err` if reading input or drawing fails.
pub(crate) fn play<I, S>(
    mut session: Session,
    input: &mut I,
    surface: &mut S,
) -> Result<Summary, PlayError>
where
    I: InputSource,
    S: Surface,
{
    session.draw_all(surface)?;
    surface.present(&session.hud())?;
    while let Some(step) = session.tick() {
        session.draw_step(&step, surface)?;
        surface.present(&session.hud())?;
        session.wait_for_tick(input, surface)?;
    }
    Ok(session.summary())
}

/// Final statistics of a finished game
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Summary {
    pub(crate) status: GameStatus,
    pub(crate) outcome: String,
    pub(crate) score: u32,
    pub(crate) lengths: Vec<(Player, usize)>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Game over: {}", self.outcome)?;
        match self.lengths.as_slice() {
            [(_, len)] => writeln!(f, "Your snake reached length {len}")?,
            lengths => {
                for (player, len) in lengths {
                    writeln!(f, "Player {}'s snake reached length {len}", player.number())?;
                }
            }
        }
        write!(f, "Score: {}", self.score)
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum SetupError {
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error("the {0} play field is empty")]
    EmptyField(Bounds),
    #[error("maximum snake length {max_len} is less than the starting length {initial}", initial = consts::INITIAL_SNAKE_LENGTH)]
    MaxLength { max_len: usize },
    #[error("maximum snake length {max_len} does not fit in a {bounds} field")]
    LongerThanField { max_len: usize, bounds: Bounds },
    #[error("a {bounds} field is too small for {players} player(s)")]
    FieldTooSmall { bounds: Bounds, players: Players },
    #[error(transparent)]
    Obstacles(#[from] ObstacleError),
    #[error("failed to create snake")]
    Chain(#[from] ChainError),
}

#[derive(Debug, Error)]
pub(crate) enum PlayError {
    #[error("failed to read input")]
    Input(#[from] io::Error),
    #[error("failed to draw game")]
    Render(#[from] RenderError),
}
