use super::chain::{ChainError, PositionChain};
use super::direction::{Direction, Turn};
use super::grid::{Bounds, Position};
use crate::consts;
use crate::options::Player;

/// A snake on the field
///
/// All positions are relative to the top-left corner of the field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The cells of the snake, head first
    pub(super) body: PositionChain,

    /// The direction in which the snake is currently facing
    pub(super) direction: Direction,
}

impl Snake {
    /// Create a snake from an existing body
    pub(crate) fn new(body: PositionChain, direction: Direction) -> Snake {
        Snake { body, direction }
    }

    /// Create the starting snake for `player`: a horizontal line of
    /// [`INITIAL_SNAKE_LENGTH`][consts::INITIAL_SNAKE_LENGTH] cells beginning
    /// at the center of the field and offset downwards by the player number,
    /// with its head at the left end and facing west.
    ///
    /// `max_len` is the length at which the snake is full grown.
    pub(crate) fn spawn(bounds: Bounds, player: Player, max_len: usize) -> Result<Snake, ChainError> {
        let start = Snake::start_cells(bounds, player);
        let capacity = max_len.checked_add(1).ok_or(ChainError::Overflow)?;
        let body = PositionChain::from_positions(capacity, start)?;
        Ok(Snake::new(body, Direction::West))
    }

    /// Return the cells [`Snake::spawn()`] places `player`'s snake on, head
    /// first
    pub(crate) fn start_cells(bounds: Bounds, player: Player) -> impl Iterator<Item = Position> {
        let center = bounds.center();
        let y = center.y + player.row_offset();
        (0..consts::INITIAL_SNAKE_LENGTH).map(move |i| {
            Position::new(
                center.x.saturating_add(i32::try_from(i).unwrap_or(i32::MAX)),
                y,
            )
        })
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        self.body.head().unwrap_or(Position::END)
    }

    /// Return the glyph to use for drawing the snake's head
    pub(crate) fn head_symbol(&self) -> char {
        match self.direction {
            Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
            Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
            Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
            Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
        }
    }

    /// Return the cells of the snake, head first
    pub(crate) fn body(&self) -> &PositionChain {
        &self.body
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    /// Rotate the snake's heading
    pub(crate) fn turn(&mut self, side: Turn) {
        self.direction = self.direction.turn(side);
    }

    /// Return the cell the head would move into on the next tick
    pub(crate) fn next_head(&self) -> Position {
        self.direction.advance(self.head())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_player_one() {
        let snake = Snake::spawn(Bounds::new(20, 10), Player::One, 90).unwrap();
        assert_eq!(
            snake.body().iter().collect::<Vec<_>>(),
            [
                Position::new(10, 6),
                Position::new(11, 6),
                Position::new(12, 6),
                Position::new(13, 6),
                Position::new(14, 6),
            ]
        );
        assert_eq!(snake.head(), Position::new(10, 6));
        assert_eq!(snake.direction(), Direction::West);
        assert_eq!(snake.body().capacity(), 91);
        assert_eq!(snake.next_head(), Position::new(9, 6));
    }

    #[test]
    fn spawn_player_two_below_player_one() {
        let snake = Snake::spawn(Bounds::new(20, 10), Player::Two, 90).unwrap();
        assert_eq!(snake.head(), Position::new(10, 7));
        assert_eq!(snake.len(), consts::INITIAL_SNAKE_LENGTH);
    }

    #[test]
    fn spawn_longer_than_max() {
        assert_eq!(
            Snake::spawn(Bounds::new(20, 10), Player::One, 4),
            Err(ChainError::Full { capacity: 5 })
        );
    }

    #[test]
    fn spawn_with_unrepresentable_capacity() {
        assert_eq!(
            Snake::spawn(Bounds::new(20, 10), Player::One, usize::MAX),
            Err(ChainError::Overflow)
        );
    }

    #[test]
    fn turning() {
        let mut snake = Snake::spawn(Bounds::new(20, 10), Player::One, 90).unwrap();
        snake.turn(Turn::Right);
        assert_eq!(snake.direction(), Direction::North);
        assert_eq!(snake.head_symbol(), consts::SNAKE_HEAD_NORTH_SYMBOL);
        assert_eq!(snake.next_head(), Position::new(10, 5));
        snake.turn(Turn::Left);
        snake.turn(Turn::Left);
        assert_eq!(snake.direction(), Direction::South);
    }
}
