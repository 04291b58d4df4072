//! Movement & collision resolution for a single tick
use super::chain::PositionChain;
use super::grid::{Bounds, Position};
use super::snake::Snake;
use super::GameStatus;
use crate::options::Player;
use crate::util::EnumExt;

/// The result of advancing the snakes by one tick
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Step {
    /// The game's status after the tick
    pub(crate) status: GameStatus,

    /// The snakes that moved this tick, in player order
    pub(crate) moves: Vec<Move>,

    /// The player whose move ended the game, if it ended
    pub(crate) culprit: Option<Player>,

    /// For obstacle & snake collisions, the cell that was hit
    pub(crate) collision: Option<Position>,
}

/// How one snake's cells changed during a tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Move {
    pub(crate) player: Player,
    pub(crate) new_head: Position,
    pub(crate) old_head: Position,
    /// The cell vacated by the tail, if the snake did not grow
    pub(crate) old_tail: Option<Position>,
}

/// A terminal outcome detected for one snake
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Halt {
    status: GameStatus,
    collision: Option<Position>,
}

/// Advance every snake one cell along its heading.
///
/// Snakes are resolved in player order against the obstacles and the current
/// bodies of all snakes, including any moves already made this tick.  As soon
/// as one snake's move ends the game, the remaining snakes are left where
/// they are.
///
/// If `grow` is true, each snake that moves keeps its tail and becomes one
/// cell longer; a snake that is already full grown instead ends the game
/// with [`GameStatus::MaxLengthReached`].
pub(crate) fn advance(
    snakes: &mut [Snake],
    obstacles: &PositionChain,
    bounds: Bounds,
    grow: bool,
) -> Step {
    let mut moves = Vec::with_capacity(snakes.len());
    for (i, player) in (0..snakes.len()).zip(Player::iter()) {
        match advance_one(i, snakes, obstacles, bounds, grow) {
            Ok(old_tail) => moves.push(Move {
                player,
                new_head: snakes[i].head(),
                old_head: snakes[i].body.get(1).unwrap_or(Position::END),
                old_tail,
            }),
            Err(halt) => {
                log::trace!("{player} stopped at {}: {:?}", snakes[i].head(), halt.status);
                return Step {
                    status: halt.status,
                    moves,
                    culprit: Some(player),
                    collision: halt.collision,
                };
            }
        }
    }
    Step {
        status: GameStatus::Running,
        moves,
        culprit: None,
        collision: None,
    }
}

/// Move `snakes[actor]`.  On success, returns the cell vacated by its tail.
/// On failure, no snake is modified.
fn advance_one(
    actor: usize,
    snakes: &mut [Snake],
    obstacles: &PositionChain,
    bounds: Bounds,
    grow: bool,
) -> Result<Option<Position>, Halt> {
    let candidate = snakes[actor].next_head();
    if !bounds.contains(candidate) {
        return Err(Halt {
            status: GameStatus::ExitedBounds,
            collision: None,
        });
    }
    if obstacles.contains(candidate) {
        return Err(Halt {
            status: GameStatus::HitObstacle,
            collision: Some(candidate),
        });
    }
    if snakes.iter().any(|s| s.body.contains(candidate)) {
        return Err(Halt {
            status: GameStatus::HitSnake,
            collision: Some(candidate),
        });
    }
    let body = &mut snakes[actor].body;
    let old_tail = if grow {
        if body.is_full() {
            return Err(Halt {
                status: GameStatus::MaxLengthReached,
                collision: None,
            });
        }
        None
    } else {
        body.pop_back()
    };
    body.push_front(candidate)
        .expect("chain should have room for the new head after the tail check");
    Ok(old_tail)
}
