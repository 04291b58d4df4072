use super::chain::{ChainError, PositionChain};
use super::grid::{Bounds, Position};
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;

/// Place `count` distinct obstacles uniformly at random within `bounds`,
/// avoiding every cell in `reserved`.
///
/// Cells are drawn one at a time and redrawn whenever they hit an existing
/// obstacle or a reserved cell, so the result is uniform without replacement
/// over the unreserved cells.  The returned chain has capacity `count + 1`.
///
/// # Errors
///
/// Returns `Err` unless `count` is strictly less than the number of
/// unreserved cells, so that at least one cell stays open.
pub(crate) fn generate<R: Rng>(
    bounds: Bounds,
    count: usize,
    reserved: &[Position],
    rng: &mut R,
) -> Result<PositionChain, ObstacleError> {
    let reserved = reserved
        .iter()
        .copied()
        .filter(|&p| bounds.contains(p))
        .collect::<HashSet<_>>();
    let free = bounds.area().saturating_sub(reserved.len());
    if count >= free {
        return Err(ObstacleError::Crowded { count, free });
    }
    let mut obstacles = PositionChain::with_capacity(count + 1)?;
    while obstacles.len() < count {
        let p = bounds.random_position(rng);
        if !reserved.contains(&p) && !obstacles.contains(p) {
            obstacles.push_back(p)?;
        }
    }
    Ok(obstacles)
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum ObstacleError {
    #[error("cannot place {count} obstacles in {free} free cells; at least one must stay open")]
    Crowded { count: usize, free: usize },
    #[error(transparent)]
    Chain(#[from] ChainError),
}
