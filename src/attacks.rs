//! Offset tables and guarded stepping on the 64-cell board.
//!
//! Squares are addressed by a linear index, so adding an offset can wrap
//! from one edge of the board to the other. Every walk in this module
//! checks the [Chebyshev distance](Square::distance) of each step and stops
//! when a step jumps further than the piece could actually move.
//!
//! # Examples
//!
//! ```
//! use mailbox::{attacks, Square};
//!
//! // The ray from c2 towards the upper right ends at h7.
//! let ray: Vec<Square> = attacks::ray(Square::C2, -7).collect();
//! assert_eq!(ray, [Square::D3, Square::E4, Square::F5, Square::G6, Square::H7]);
//!
//! // A knight on a8 does not wrap around to the h-file.
//! assert_eq!(attacks::knight_targets(Square::A8).count(), 2);
//! ```

use std::iter::FusedIterator;

use crate::{Color, Square};

/// Knight jumps.
pub const KNIGHT_DELTAS: [i32; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];

/// King steps, also the queen's ray directions for move generation.
pub const KING_DELTAS: [i32; 8] = [-1, 1, -8, 8, -9, -7, 7, 9];

pub const ROOK_DELTAS: [i32; 4] = [-8, 8, -1, 1];

pub const BISHOP_DELTAS: [i32; 4] = [-9, -7, 7, 9];

pub const QUEEN_DELTAS: [i32; 8] = [-8, 8, -1, 1, -9, -7, 7, 9];

/// Ray directions scanned when looking for attackers. The first four are
/// orthogonal.
pub const ATTACK_DELTAS: [i32; 8] = [1, -1, 8, -8, 9, 7, -9, -7];

/// Checks if a ray direction runs along a rank or file.
#[inline]
pub const fn is_orthogonal(delta: i32) -> bool {
    matches!(delta, 1 | -1 | 8 | -8)
}

/// Takes one step of `delta` from `sq`.
///
/// Returns `None` if the target is off the board, or if it is more than
/// `max_distance` king steps away, which means the index wrapped around an
/// edge.
#[inline]
pub fn step(sq: Square, delta: i32, max_distance: u32) -> Option<Square> {
    sq.offset(delta)
        .filter(|&target| target.distance(sq) <= max_distance)
}

/// Iterator over the squares of a ray, see [`ray()`].
#[derive(Debug, Clone)]
pub struct Ray {
    current: Option<Square>,
    delta: i32,
}

impl Iterator for Ray {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        let next = step(self.current?, self.delta, 1);
        self.current = next;
        next
    }
}

impl FusedIterator for Ray {}

/// Walks from `sq` (exclusive) in direction `delta` to the edge of the
/// board. Callers stop at the first occupied square themselves.
#[inline]
pub fn ray(sq: Square, delta: i32) -> Ray {
    Ray {
        current: Some(sq),
        delta,
    }
}

/// Squares a knight on `sq` jumps to.
pub fn knight_targets(sq: Square) -> impl Iterator<Item = Square> {
    KNIGHT_DELTAS
        .into_iter()
        .filter_map(move |delta| step(sq, delta, 2))
}

/// Squares a king on `sq` steps to.
pub fn king_targets(sq: Square) -> impl Iterator<Item = Square> {
    KING_DELTAS
        .into_iter()
        .filter_map(move |delta| step(sq, delta, 1))
}

/// Squares a pawn of `color` on `sq` captures on, towards the a-file first.
pub fn pawn_targets(color: Color, sq: Square) -> impl Iterator<Item = Square> {
    let push = color.pawn_push();
    [push - 1, push + 1]
        .into_iter()
        .filter_map(move |delta| step(sq, delta, 1))
}

/// Squares from which a pawn of `color` would capture on `sq`.
pub fn pawn_sources(color: Color, sq: Square) -> impl Iterator<Item = Square> {
    let back = -color.pawn_push();
    [back - 1, back + 1]
        .into_iter()
        .filter_map(move |delta| step(sq, delta, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_stops_at_edge() {
        assert_eq!(ray(Square::H4, 1).count(), 0);
        assert_eq!(ray(Square::A4, -1).count(), 0);
        assert_eq!(ray(Square::A4, 1).count(), 7);
        assert_eq!(ray(Square::E1, 8).count(), 0);
        assert_eq!(ray(Square::E1, -8).count(), 7);
        assert_eq!(ray(Square::H8, 9).count(), 0);
    }

    #[test]
    fn test_ray_diagonal_no_wrap() {
        let squares: Vec<Square> = ray(Square::G2, -7).collect();
        assert_eq!(squares, [Square::H3]);
        let squares: Vec<Square> = ray(Square::B7, -9).collect();
        assert_eq!(squares, [Square::A8]);
    }

    #[test]
    fn test_knight_targets() {
        assert_eq!(knight_targets(Square::H1).count(), 2);
        assert_eq!(knight_targets(Square::E4).count(), 8);
        assert_eq!(knight_targets(Square::B7).count(), 4);
        for sq in knight_targets(Square::H5) {
            assert!(sq.col() >= 5);
        }
    }

    #[test]
    fn test_king_targets() {
        assert_eq!(king_targets(Square::A1).count(), 3);
        assert_eq!(king_targets(Square::H4).count(), 5);
        assert_eq!(king_targets(Square::D5).count(), 8);
    }

    #[test]
    fn test_pawn_geometry() {
        let targets: Vec<Square> = pawn_targets(Color::White, Square::E4).collect();
        assert_eq!(targets, [Square::D5, Square::F5]);
        let targets: Vec<Square> = pawn_targets(Color::Black, Square::A5).collect();
        assert_eq!(targets, [Square::B4]);
        let sources: Vec<Square> = pawn_sources(Color::White, Square::H5).collect();
        assert_eq!(sources, [Square::G4]);
        let sources: Vec<Square> = pawn_sources(Color::Black, Square::D4).collect();
        assert_eq!(sources, [Square::C5, Square::E5]);
    }
}
