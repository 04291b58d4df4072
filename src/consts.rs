//! Assorted constants & hard-coded configuration
use ratatui::style::{Color, Modifier, Style};

/// Length of each snake at the start of a game
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 5;

/// When placing obstacles, keep this many cells in front of each snake's
/// head clear.
pub(crate) const FORWARDS_CLEARANCE: usize = 3;

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the parts of a snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for obstacles
pub(crate) const OBSTACLE_SYMBOL: char = '█';

/// Glyph drawn where a snake's head hit an obstacle or a snake
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for player 1's snake
pub(crate) const SNAKE_ONE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for player 2's snake
pub(crate) const SNAKE_TWO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Style for obstacles
pub(crate) const OBSTACLE_STYLE: Style = Style::new().fg(Color::Gray);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
