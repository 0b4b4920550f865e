use std::fmt;

use super::types::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The requested head cell lies outside the grid.
    OutOfBounds(Position),
    /// The requested head cell is already covered by a snake.
    CellOccupied(Position),
    /// A segment of the new snake would cover an existing snake's head.
    OverlapsHead(Position),
    InvalidLength(usize),
    InvalidSnakeIndex(usize),
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArenaError::OutOfBounds(p) => write!(f, "Position {} is outside the arena", p),
            ArenaError::CellOccupied(p) => write!(f, "Position {} is occupied by a snake", p),
            ArenaError::OverlapsHead(p) => {
                write!(f, "Segment at {} would overlap the head of another snake", p)
            }
            ArenaError::InvalidLength(len) => write!(f, "Invalid snake length: {}", len),
            ArenaError::InvalidSnakeIndex(index) => write!(f, "No snake with index {}", index),
        }
    }
}

impl std::error::Error for ArenaError {}
