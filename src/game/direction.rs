use super::grid::Position;

/// The heading of a snake
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Return the cell one step from `pos` in this direction.  The result is
    /// not checked against the field's bounds.
    pub(crate) fn advance(self, pos: Position) -> Position {
        pos.offset(self.delta())
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Rotate 90° clockwise
    pub(crate) fn turn_right(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Rotate 90° counter-clockwise
    pub(crate) fn turn_left(self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::East => Direction::North,
            Direction::South => Direction::East,
            Direction::West => Direction::South,
        }
    }

    pub(crate) fn turn(self, side: Turn) -> Direction {
        match side {
            Turn::Left => self.turn_left(),
            Turn::Right => self.turn_right(),
        }
    }
}

/// Which way a player asked their snake to turn
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Turn {
    Left,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[rstest]
    #[case(Direction::North, Position::new(2, 7), Position::new(2, 6))]
    #[case(Direction::South, Position::new(2, 7), Position::new(2, 8))]
    #[case(Direction::East, Position::new(2, 7), Position::new(3, 7))]
    #[case(Direction::West, Position::new(2, 7), Position::new(1, 7))]
    #[case(Direction::West, Position::new(0, 7), Position::new(-1, 7))]
    #[case(Direction::North, Position::new(2, 0), Position::new(2, -1))]
    fn test_direction_advance(#[case] d: Direction, #[case] pos: Position, #[case] r: Position) {
        assert_eq!(d.advance(pos), r);
    }

    #[rstest]
    #[case(Direction::North, Direction::East)]
    #[case(Direction::East, Direction::South)]
    #[case(Direction::South, Direction::West)]
    #[case(Direction::West, Direction::North)]
    fn test_turn_right(#[case] before: Direction, #[case] after: Direction) {
        assert_eq!(before.turn_right(), after);
        assert_eq!(before.turn(Turn::Right), after);
    }

    #[rstest]
    #[case(Direction::North, Direction::West)]
    #[case(Direction::West, Direction::South)]
    #[case(Direction::South, Direction::East)]
    #[case(Direction::East, Direction::North)]
    fn test_turn_left(#[case] before: Direction, #[case] after: Direction) {
        assert_eq!(before.turn_left(), after);
        assert_eq!(before.turn(Turn::Left), after);
    }

    #[test]
    fn turns_are_inverse() {
        for d in ALL {
            assert_eq!(d.turn_left().turn_right(), d);
            assert_eq!(d.turn_right().turn_right(), d.turn_left().turn_left());
            assert_ne!(d.turn_right(), d.turn_left());
        }
    }
}
