//! Count legal move paths.
//!
//! # Examples
//!
//! ```
//! use mailbox::{perft, Position};
//!
//! let pos = Position::new();
//! assert_eq!(perft(&pos, 1), 20);
//! assert_eq!(perft(&pos, 2), 400);
//! assert_eq!(perft(&pos, 3), 8902);
//! ```

use std::{error::Error, fmt, str::FromStr};

use tracing::info;

use crate::{
    board::Board,
    castling_side::CastlingRights,
    color::Side,
    m::Move,
    position::Position,
};

/// Who moves after each ply of a [`perft_with()`] walk.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum TurnOrder {
    /// Turns alternate as in a game.
    #[default]
    Alternate,
    /// The same side keeps moving. Useful for counting the tours of a
    /// single piece.
    SameSide,
}

impl TurnOrder {
    fn next(self, side: Side) -> Side {
        match (self, side) {
            (TurnOrder::Alternate, Side::Only(color)) => Side::Only(!color),
            _ => side,
        }
    }
}

/// Error when parsing an invalid [`TurnOrder`].
#[derive(Clone, Debug)]
pub struct ParseTurnOrderError;

impl fmt::Display for ParseTurnOrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid turn order")
    }
}

impl Error for ParseTurnOrderError {}

impl FromStr for TurnOrder {
    type Err = ParseTurnOrderError;

    fn from_str(s: &str) -> Result<TurnOrder, ParseTurnOrderError> {
        Ok(match s {
            "alternate" => TurnOrder::Alternate,
            "same" | "same-side" => TurnOrder::SameSide,
            _ => return Err(ParseTurnOrderError),
        })
    }
}

/// Counts legal move paths of a given length.
///
/// Castling rights are refreshed from the board at every node, and every
/// child is played on its own copy of the board. With [`Side::Both`] the
/// counts of both colors are added up.
///
/// Paths with mate or stalemate are not counted unless it occurs in the final
/// position. Useful for comparing, testing and debugging move generation
/// correctness and performance.
///
/// # Examples
///
/// ```
/// use mailbox::{perft_with, Board, CastlingRights, Color, TurnOrder};
///
/// // A lone knight touring from h1.
/// let board: Board = "......../......../......../......../......../......../......../.......N".parse()?;
/// assert_eq!(perft_with(&board, 3, Color::White, CastlingRights::empty(), None, TurnOrder::SameSide), 64);
/// # Ok::<_, mailbox::ParseBoardError>(())
/// ```
pub fn perft_with(
    board: &Board,
    depth: u32,
    side: impl Into<Side>,
    castles: CastlingRights,
    last_move: Option<Move>,
    order: TurnOrder,
) -> u64 {
    perft_inner(board.clone(), depth, side.into(), castles, last_move, order)
}

fn perft_inner(
    mut board: Board,
    depth: u32,
    side: Side,
    mut castles: CastlingRights,
    last_move: Option<Move>,
    order: TurnOrder,
) -> u64 {
    if depth < 1 {
        return 1;
    }

    castles.refresh(&board);
    let moves = board.legal_moves(side, castles, last_move);

    if depth == 1 {
        moves.len() as u64
    } else {
        let next = order.next(side);
        moves
            .iter()
            .map(|&m| {
                let mut child = board.clone();
                child.play_unchecked(m);
                perft_inner(child, depth - 1, next, castles, Some(m), order)
            })
            .sum()
    }
}

/// Counts legal move paths of a given length from a game position, with
/// alternating turns.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    perft_with(
        &pos.board,
        depth,
        pos.turn,
        pos.castles,
        pos.last_move,
        TurnOrder::Alternate,
    )
}

/// Like [`perft()`], but also reports the count below each root move
/// through [`tracing`] at info level.
pub fn debug_perft(pos: &Position, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }

    let nodes: u64 = pos
        .legal_moves()
        .iter()
        .map(|&m| {
            let mut child = pos.clone();
            child.play_unchecked(m);
            let nodes = perft(&child, depth - 1);
            info!(uci = %m, san = %pos.san_plus(m), depth = depth - 1, nodes, "divide");
            nodes
        })
        .sum();

    info!(depth, nodes, "perft");
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_zero() {
        let pos = Position::new();
        assert_eq!(perft(&pos, 0), 1);
        assert_eq!(debug_perft(&pos, 0), 1);
    }

    #[test]
    fn test_initial() {
        let pos = Position::new();
        assert_eq!(perft(&pos, 1), 20);
        assert_eq!(perft(&pos, 2), 400);
        assert_eq!(debug_perft(&pos, 2), 400);
    }

    #[test]
    fn test_both_sides_is_sum() {
        let board = Board::new();
        let both = perft_with(&board, 1, Side::Both, CastlingRights::INITIAL, None, TurnOrder::Alternate);
        assert_eq!(both, 40);
    }

    #[test]
    fn test_turn_order_parse() {
        assert_eq!("alternate".parse::<TurnOrder>().ok(), Some(TurnOrder::Alternate));
        assert_eq!("same".parse::<TurnOrder>().ok(), Some(TurnOrder::SameSide));
        assert!("sideways".parse::<TurnOrder>().is_err());
    }
}
