use std::ops;

use bitflags::bitflags;

use crate::{Board, Color, File, Square};

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    #[inline]
    pub const fn is_queen_side(self) -> bool {
        matches!(self, CastlingSide::QueenSide)
    }

    #[inline]
    pub const fn is_king_side(self) -> bool {
        matches!(self, CastlingSide::KingSide)
    }

    #[inline]
    pub const fn from_king_side(king_side: bool) -> CastlingSide {
        if king_side {
            CastlingSide::KingSide
        } else {
            CastlingSide::QueenSide
        }
    }

    pub const fn rook_from_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::H,
            CastlingSide::QueenSide => File::A,
        }
    }

    pub const fn king_to_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::G,
            CastlingSide::QueenSide => File::C,
        }
    }

    pub const fn rook_to_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::F,
            CastlingSide::QueenSide => File::D,
        }
    }

    /// Files between king and rook that must be empty.
    pub const fn empty_files(self) -> &'static [File] {
        match self {
            CastlingSide::KingSide => &[File::F, File::G],
            CastlingSide::QueenSide => &[File::B, File::C, File::D],
        }
    }

    /// Files the king passes over or lands on. None of them may be attacked.
    pub const fn transit_files(self) -> &'static [File] {
        match self {
            CastlingSide::KingSide => &[File::F, File::G],
            CastlingSide::QueenSide => &[File::D, File::C],
        }
    }

    /// The square the king starts on, e1 or e8.
    #[inline]
    pub fn king_from(color: Color) -> Square {
        Square::from_coords(File::E, color.backrank())
    }

    pub fn king_to(self, color: Color) -> Square {
        Square::from_coords(self.king_to_file(), color.backrank())
    }

    pub fn rook_from(self, color: Color) -> Square {
        Square::from_coords(self.rook_from_file(), color.backrank())
    }

    pub fn rook_to(self, color: Color) -> Square {
        Square::from_coords(self.rook_to_file(), color.backrank())
    }

    #[must_use]
    #[inline]
    pub const fn other(self) -> CastlingSide {
        match self {
            CastlingSide::KingSide => CastlingSide::QueenSide,
            CastlingSide::QueenSide => CastlingSide::KingSide,
        }
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

impl ops::Not for CastlingSide {
    type Output = CastlingSide;

    #[inline]
    fn not(self) -> CastlingSide {
        self.other()
    }
}

bitflags! {
    /// Castling rights: one flag per king and per rook that has never left
    /// its original square.
    ///
    /// Flags are only ever cleared. [`CastlingRights::refresh()`] drops the
    /// flag of every king or rook that no longer stands on its original
    /// square, so a piece that leaves and returns stays ineligible as long
    /// as the caller keeps the mask across plies.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox::{Board, CastlingRights, CastlingSide, Color, Square};
    ///
    /// let mut board = Board::new();
    /// board.remove_piece_at(Square::H1);
    ///
    /// let mut castles = CastlingRights::INITIAL;
    /// castles.refresh(&board);
    /// assert!(!castles.has(Color::White, CastlingSide::KingSide));
    /// assert!(castles.has(Color::White, CastlingSide::QueenSide));
    /// assert!(castles.has(Color::Black, CastlingSide::KingSide));
    /// ```
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
    pub struct CastlingRights: u8 {
        /// White king on e1.
        const WHITE_KING = 1;
        /// White rook on a1.
        const WHITE_ROOK_A = 1 << 1;
        /// White rook on h1.
        const WHITE_ROOK_H = 1 << 2;
        /// Black king on e8.
        const BLACK_KING = 1 << 3;
        /// Black rook on a8.
        const BLACK_ROOK_A = 1 << 4;
        /// Black rook on h8.
        const BLACK_ROOK_H = 1 << 5;
    }
}

impl CastlingRights {
    /// All six flags, as in the starting position.
    pub const INITIAL: CastlingRights = CastlingRights::all();

    pub const fn king(color: Color) -> CastlingRights {
        match color {
            Color::White => CastlingRights::WHITE_KING,
            Color::Black => CastlingRights::BLACK_KING,
        }
    }

    pub const fn rook(color: Color, side: CastlingSide) -> CastlingRights {
        match (color, side) {
            (Color::White, CastlingSide::QueenSide) => CastlingRights::WHITE_ROOK_A,
            (Color::White, CastlingSide::KingSide) => CastlingRights::WHITE_ROOK_H,
            (Color::Black, CastlingSide::QueenSide) => CastlingRights::BLACK_ROOK_A,
            (Color::Black, CastlingSide::KingSide) => CastlingRights::BLACK_ROOK_H,
        }
    }

    /// Clears the flag of every king or rook that is not on its original
    /// square.
    pub fn refresh(&mut self, board: &Board) {
        for color in Color::ALL {
            if board.piece_at(CastlingSide::king_from(color)) != Some(color.king()) {
                self.remove(CastlingRights::king(color));
            }
            for side in CastlingSide::ALL {
                if board.piece_at(side.rook_from(color)) != Some(color.rook()) {
                    self.remove(CastlingRights::rook(color, side));
                }
            }
        }
    }

    /// Checks that both the king flag and the rook flag for `side` are set.
    #[inline]
    pub fn has(self, color: Color, side: CastlingSide) -> bool {
        self.contains(CastlingRights::king(color) | CastlingRights::rook(color, side))
    }

    /// Checks if `color` keeps any castling right at all on `board`.
    ///
    /// This does not look at checks or blocked paths. It answers whether
    /// castling can ever happen again, given the current flags.
    pub fn can_castle(self, board: &Board, color: Color) -> bool {
        let mut rights = self;
        rights.refresh(board);
        CastlingSide::ALL
            .into_iter()
            .any(|side| rights.has(color, side))
    }
}

impl Default for CastlingRights {
    fn default() -> CastlingRights {
        CastlingRights::INITIAL
    }
}
