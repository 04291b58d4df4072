use super::grid::Position;
use std::collections::VecDeque;
use thiserror::Error;

/// An ordered, bounded sequence of grid positions.
///
/// The capacity of a chain counts one slot for the terminator that follows
/// the last real element, so a chain with capacity `c` holds at most `c - 1`
/// positions.  The terminator itself is never stored; [`Position::END`] is
/// only kept out of the chain so that [`PositionChain::find()`] can never
/// report it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PositionChain {
    cells: VecDeque<Position>,
    capacity: usize,
}

impl PositionChain {
    /// Create an empty chain with room for `capacity - 1` positions.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `capacity` is 0, as there would be no slot for the
    /// terminator.  A chain with capacity 1 is always empty.
    pub(crate) fn with_capacity(capacity: usize) -> Result<PositionChain, ChainError> {
        if capacity == 0 {
            return Err(ChainError::TooSmall { capacity });
        }
        Ok(PositionChain {
            cells: VecDeque::with_capacity(capacity - 1),
            capacity,
        })
    }

    /// Create a chain with the given capacity holding `positions` in order.
    pub(crate) fn from_positions<I>(capacity: usize, positions: I) -> Result<PositionChain, ChainError>
    where
        I: IntoIterator<Item = Position>,
    {
        let mut chain = PositionChain::with_capacity(capacity)?;
        for p in positions {
            chain.push_back(p)?;
        }
        Ok(chain)
    }

    /// Remove every position from the chain
    pub(crate) fn clear(&mut self) {
        self.cells.clear();
    }

    /// Return the number of real positions in the chain
    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Return the number of slots in the chain, including the terminator's
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// True if no further position can be added
    pub(crate) fn is_full(&self) -> bool {
        self.cells.len() + 1 >= self.capacity
    }

    /// Append `p` after the last position.
    pub(crate) fn push_back(&mut self, p: Position) -> Result<(), ChainError> {
        self.check_push(p)?;
        self.cells.push_back(p);
        Ok(())
    }

    /// Insert `p` before the first position, shifting every existing position
    /// one index higher.
    pub(crate) fn push_front(&mut self, p: Position) -> Result<(), ChainError> {
        self.check_push(p)?;
        self.cells.push_front(p);
        Ok(())
    }

    /// Remove and return the last position, or `None` if the chain is empty
    pub(crate) fn pop_back(&mut self) -> Option<Position> {
        self.cells.pop_back()
    }

    /// Return the index of the first occurrence of `p`, or `None` if `p` is
    /// not in the chain.  [`Position::END`] is never found.
    pub(crate) fn find(&self, p: Position) -> Option<usize> {
        if p.is_end() {
            return None;
        }
        self.cells.iter().position(|&q| q == p)
    }

    pub(crate) fn contains(&self, p: Position) -> bool {
        self.find(p).is_some()
    }

    /// Return the first position (a snake's head)
    pub(crate) fn head(&self) -> Option<Position> {
        self.cells.front().copied()
    }

    /// Return the last position (a snake's tail)
    pub(crate) fn tail(&self) -> Option<Position> {
        self.cells.back().copied()
    }

    pub(crate) fn get(&self, index: usize) -> Option<Position> {
        self.cells.get(index).copied()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }

    fn check_push(&self, p: Position) -> Result<(), ChainError> {
        if p.is_end() {
            Err(ChainError::Sentinel)
        } else if self.is_full() {
            Err(ChainError::Full {
                capacity: self.capacity,
            })
        } else {
            Ok(())
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum ChainError {
    #[error("position chain with capacity {capacity} is full")]
    Full { capacity: usize },
    #[error("position chain capacity must be at least 1")]
    TooSmall { capacity: usize },
    #[error("position chain capacity is too large")]
    Overflow,
    #[error("the terminator position cannot be stored in a position chain")]
    Sentinel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> PositionChain {
        // Same layout as built by pushes in `mixed_pushes_and_pops`
        PositionChain::from_positions(
            5,
            [
                Position::new(0, 567),
                Position::new(12, 23),
                Position::new(45, 67),
                Position::new(134, 86),
            ],
        )
        .unwrap()
    }

    #[test]
    fn new_chain_is_empty() {
        let chain = PositionChain::with_capacity(5).unwrap();
        assert_eq!(chain.len(), 0);
        assert!(chain.is_empty());
        assert_eq!(chain.head(), None);
        assert_eq!(chain.capacity(), 5);
    }

    #[test]
    fn capacity_too_small() {
        assert_eq!(
            PositionChain::with_capacity(0),
            Err(ChainError::TooSmall { capacity: 0 })
        );
    }

    #[test]
    fn capacity_one_is_always_full() {
        let mut chain = PositionChain::with_capacity(1).unwrap();
        assert!(chain.is_full());
        assert_eq!(
            chain.push_front(Position::new(0, 0)),
            Err(ChainError::Full { capacity: 1 })
        );
        assert!(chain.is_empty());
    }

    #[test]
    fn mixed_pushes_and_pops() {
        let p1 = Position::new(45, 67);
        let p2 = Position::new(12, 23);
        let p3 = Position::new(134, 86);
        let p4 = Position::new(0, 567);
        let mut chain = PositionChain::with_capacity(5).unwrap();
        chain.push_front(p1).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.get(0), Some(p1));
        chain.push_front(p2).unwrap();
        assert_eq!(chain.iter().collect::<Vec<_>>(), [p2, p1]);
        chain.push_back(p3).unwrap();
        assert_eq!(chain.iter().collect::<Vec<_>>(), [p2, p1, p3]);
        chain.push_front(p4).unwrap();
        assert_eq!(chain, sample());
        assert!(chain.is_full());
        assert_eq!(chain.pop_back(), Some(p3));
        assert_eq!(chain.pop_back(), Some(p1));
        assert_eq!(chain.pop_back(), Some(p2));
        assert_eq!(chain.pop_back(), Some(p4));
        assert_eq!(chain.pop_back(), None);
        assert!(chain.is_empty());
    }

    #[test]
    fn push_back_appends_at_old_length() {
        let mut chain = PositionChain::from_positions(
            10,
            [Position::new(1, 1), Position::new(2, 1), Position::new(3, 1)],
        )
        .unwrap();
        let before = chain.len();
        let p = Position::new(3, 2);
        chain.push_back(p).unwrap();
        assert_eq!(chain.len(), before + 1);
        assert_eq!(chain.get(before), Some(p));
        assert_eq!(chain.tail(), Some(p));
    }

    #[test]
    fn push_front_then_pop_back_reverses() {
        let original = [
            Position::new(3, 4),
            Position::new(9, 0),
            Position::new(0, 0),
            Position::new(7, 7),
        ];
        let mut chain = PositionChain::with_capacity(original.len() + 1).unwrap();
        for &p in &original {
            chain.push_front(p).unwrap();
        }
        let mut popped = Vec::new();
        while let Some(p) = chain.pop_back() {
            popped.push(p);
        }
        assert_eq!(popped, original);
    }

    #[test]
    fn full_chain_rejects_pushes() {
        let mut chain = sample();
        let err = ChainError::Full { capacity: 5 };
        assert_eq!(chain.push_back(Position::new(1, 1)), Err(err));
        assert_eq!(chain.push_front(Position::new(1, 1)), Err(err));
        assert_eq!(chain, sample());
    }

    #[test]
    fn sentinel_rejected() {
        let mut chain = PositionChain::with_capacity(3).unwrap();
        assert_eq!(chain.push_back(Position::END), Err(ChainError::Sentinel));
        assert_eq!(chain.push_front(Position::END), Err(ChainError::Sentinel));
        assert!(chain.is_empty());
    }

    #[rstest]
    #[case(Position::new(0, 567), Some(0))]
    #[case(Position::new(12, 23), Some(1))]
    #[case(Position::new(45, 67), Some(2))]
    #[case(Position::new(134, 86), Some(3))]
    #[case(Position::new(98, 218), None)]
    #[case(Position::END, None)]
    fn test_find(#[case] p: Position, #[case] index: Option<usize>) {
        assert_eq!(sample().find(p), index);
    }

    #[test]
    fn find_returns_first_match() {
        let p = Position::new(2, 2);
        let chain = PositionChain::from_positions(4, [Position::new(1, 2), p, p]).unwrap();
        assert_eq!(chain.find(p), Some(1));
    }

    #[test]
    fn find_in_empty_chain() {
        let chain = PositionChain::with_capacity(2).unwrap();
        assert_eq!(chain.find(Position::new(0, 0)), None);
        assert_eq!(chain.find(Position::END), None);
    }

    #[test]
    fn clear_empties() {
        let mut chain = sample();
        chain.clear();
        assert!(chain.is_empty());
        assert!(!chain.is_full());
        assert_eq!(chain.capacity(), 5);
    }
}
