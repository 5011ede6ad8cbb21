use std::{error::Error, fmt};

use crate::Square;

/// Error when a move cannot be played on a board.
///
/// A board is never partially mutated when this is returned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlayError {
    /// There is no piece on the origin square.
    EmptySquare { square: Square },
    /// A promotion by a piece other than a pawn, or one that does not land
    /// on the back rank of the mover.
    InvalidPromotion,
    /// The fields of the move do not fit the board: a null move, a castle
    /// without king and rook in place, or an en passant capture without a
    /// pawn to take.
    InvalidMoveEncoding,
    /// The move is well formed but not legal in the position.
    IllegalMove,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PlayError::EmptySquare { square } => write!(f, "no piece on {square}"),
            PlayError::InvalidPromotion => f.write_str("invalid promotion"),
            PlayError::InvalidMoveEncoding => f.write_str("move does not fit the board"),
            PlayError::IllegalMove => f.write_str("illegal move"),
        }
    }
}

impl Error for PlayError {}

/// Error when parsing a board diagram.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseBoardError {
    /// A character that is neither a piece letter nor an empty marker.
    InvalidChar { ch: char },
    /// The diagram does not describe exactly 64 cells.
    WrongCellCount { count: usize },
}

impl fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ParseBoardError::InvalidChar { ch } => write!(f, "invalid board character {ch:?}"),
            ParseBoardError::WrongCellCount { count } => {
                write!(f, "expected 64 cells in board diagram, got {count}")
            }
        }
    }
}

impl Error for ParseBoardError {}
