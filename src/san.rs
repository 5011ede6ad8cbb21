//! Write Standard Algebraic Notation.
//!
//! This is a formatter only. There is no parser, and the output is not
//! guaranteed to read back into the same move.
//!
//! # Examples
//!
//! ```
//! use mailbox::{san::{SanOptions, SanPlus}, Board, CastlingRights, Color, Move, Square};
//!
//! let mut board = Board::new();
//! let legals = board.legal_moves(Color::White, CastlingRights::INITIAL, None);
//! let m = Move::normal(Square::G1, Square::F3);
//! assert_eq!(SanPlus::from_move(&board, m, &legals, SanOptions::default()).to_string(), "Nf3");
//! ```

use std::fmt;

use crate::{
    board::Board,
    castling_side::CastlingSide,
    color::{Color, Side},
    m::{Move, MoveList},
    role::Role,
    square::{File, Rank, Square},
};

/// Formatting choices.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct SanOptions {
    /// Mark captures with `x`. Pawn captures always name the origin file,
    /// with or without the marker.
    pub captures: bool,
}

impl Default for SanOptions {
    fn default() -> SanOptions {
        SanOptions { captures: true }
    }
}

/// A move in Standard Algebraic Notation.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum San {
    Normal {
        role: Role,
        file: Option<File>,
        rank: Option<Rank>,
        capture: bool,
        to: Square,
        promotion: Option<Role>,
    },
    Castle(CastlingSide),
}

impl San {
    /// Converts a move to Standard Algebraic Notation.
    ///
    /// `legals` are the legal moves on `board`. Other moves of the same kind
    /// of piece to the same square decide how much of the origin square is
    /// written.
    pub fn from_move(board: &Board, m: Move, legals: &MoveList, options: SanOptions) -> San {
        if let Some(side) = m.castling_side() {
            return San::Castle(side);
        }

        let from = m.from();
        let to = m.to();
        let piece = board.piece_at(from);
        let role = piece.map_or(Role::Pawn, |piece| piece.role);
        let capture = board.is_capture(m);
        let promotion = m.promotion().map(|p| p.role());

        if role == Role::Pawn {
            return San::Normal {
                role,
                file: if capture { Some(from.file()) } else { None },
                rank: None,
                capture: capture && options.captures,
                to,
                promotion,
            };
        }

        // Disambiguate.
        let (rank, file) = legals
            .iter()
            .filter(|c| {
                !c.is_castle()
                    && c.to() == to
                    && c.promotion() == m.promotion()
                    && board.piece_at(c.from()) == piece
            })
            .fold((false, false), |(rank, file), c| {
                let candidate = c.from();
                if from == candidate {
                    (rank, file)
                } else if from.rank() == candidate.rank() || from.file() != candidate.file() {
                    (rank, true)
                } else {
                    (true, file)
                }
            });

        San::Normal {
            role,
            file: if file { Some(from.file()) } else { None },
            rank: if rank { Some(from.rank()) } else { None },
            capture: capture && options.captures,
            to,
            promotion,
        }
    }
}

impl fmt::Display for San {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            San::Normal {
                role,
                file,
                rank,
                capture,
                to,
                promotion,
            } => {
                if role != Role::Pawn {
                    write!(f, "{}", role.upper_char())?;
                }
                if let Some(file) = file {
                    write!(f, "{}", file.char())?;
                }
                if let Some(rank) = rank {
                    write!(f, "{}", rank.char())?;
                }
                if capture {
                    write!(f, "x")?;
                }
                write!(f, "{to}")?;
                if let Some(promotion) = promotion {
                    write!(f, "={}", promotion.upper_char())?;
                }
                Ok(())
            }
            San::Castle(CastlingSide::KingSide) => write!(f, "O-O"),
            San::Castle(CastlingSide::QueenSide) => write!(f, "O-O-O"),
        }
    }
}

/// Check (`+`) or checkmate (`#`) suffix.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Suffix {
    Check,
    Checkmate,
}

impl Suffix {
    pub const fn char(self) -> char {
        match self {
            Suffix::Check => '+',
            Suffix::Checkmate => '#',
        }
    }

    pub const fn from_char(ch: char) -> Option<Suffix> {
        match ch {
            '+' => Some(Suffix::Check),
            '#' => Some(Suffix::Checkmate),
            _ => None,
        }
    }

    /// Suffix for a board on which `defender` is to reply to `last_move`.
    ///
    /// A check against either king counts.
    pub fn from_board(board: &mut Board, defender: Color, last_move: Option<Move>) -> Option<Suffix> {
        if board.is_checkmate(defender, last_move) {
            Some(Suffix::Checkmate)
        } else if board.is_in_check(Side::Both) {
            Some(Suffix::Check)
        } else {
            None
        }
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A [`San`] and possible check and checkmate suffixes.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct SanPlus {
    pub san: San,
    pub suffix: Option<Suffix>,
}

impl SanPlus {
    /// Converts a move to Standard Algebraic Notation including possible
    /// check and checkmate suffixes.
    ///
    /// The suffix is computed by playing the move on a copy of `board`. A
    /// move that does not fit the board gets no suffix.
    pub fn from_move(board: &Board, m: Move, legals: &MoveList, options: SanOptions) -> SanPlus {
        let san = San::from_move(board, m, legals, options);
        let mut after = board.clone();
        let suffix = match (board.color_at(m.from()), after.make_move(m)) {
            (Some(mover), Ok(_)) => Suffix::from_board(&mut after, !mover, Some(m)),
            _ => None,
        };
        SanPlus { san, suffix }
    }
}

impl fmt::Display for SanPlus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.san)?;
        if let Some(suffix) = self.suffix {
            write!(f, "{suffix}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{castling_side::CastlingRights, m::Promotion};

    fn san(diagram: &str, color: Color, m: Move, options: SanOptions) -> String {
        let mut board: Board = diagram.parse().expect("valid diagram");
        let legals = board.legal_moves(color, CastlingRights::INITIAL, None);
        assert!(legals.contains(&m), "{m} not legal");
        SanPlus::from_move(&board, m, &legals, options).to_string()
    }

    #[test]
    fn test_castles() {
        let diagram = "r...k..r/......../......../......../......../......../......../R...K..R";
        let options = SanOptions::default();
        assert_eq!(san(diagram, Color::White, Move::castle(Square::E1, Square::G1), options), "O-O");
        assert_eq!(san(diagram, Color::Black, Move::castle(Square::E8, Square::C8), options), "O-O-O");
    }

    #[test]
    fn test_disambiguation() {
        // Knights on b1 and f1 both reach d2.
        let diagram = "....k.../......../......../......../......../......../......../.N...NK.";
        let m = Move::normal(Square::B1, Square::D2);
        assert_eq!(san(diagram, Color::White, m, SanOptions::default()), "Nbd2");

        // Rooks on a1 and a5 both reach a3.
        let diagram = "....k.../......../......../R......./......../......../......../R.....K.";
        let m = Move::normal(Square::A1, Square::A3);
        assert_eq!(san(diagram, Color::White, m, SanOptions::default()), "R1a3");
    }

    #[test]
    fn test_captures() {
        let diagram = "....k.../......../......../...p..../....P.../......../......../....K...";
        let m = Move::normal(Square::E4, Square::D5);
        assert_eq!(san(diagram, Color::White, m, SanOptions::default()), "exd5");
        assert_eq!(san(diagram, Color::White, m, SanOptions { captures: false }), "ed5");

        let diagram = "....k.../......../......../...p..../......../......../......../...QK...";
        let m = Move::normal(Square::D1, Square::D5);
        assert_eq!(san(diagram, Color::White, m, SanOptions::default()), "Qxd5");
        assert_eq!(san(diagram, Color::White, m, SanOptions { captures: false }), "Qd5");
    }

    #[test]
    fn test_promotion_and_suffix() {
        let diagram = "......k./....P.../......K./......../......../......../......../........";
        let m = Move::promote(Square::E7, Square::E8, Promotion::Queen);
        assert_eq!(san(diagram, Color::White, m, SanOptions::default()), "e8=Q#");
        let m = Move::promote(Square::E7, Square::E8, Promotion::Rook);
        assert_eq!(san(diagram, Color::White, m, SanOptions::default()), "e8=R#");
        let m = Move::promote(Square::E7, Square::E8, Promotion::Knight);
        assert_eq!(san(diagram, Color::White, m, SanOptions::default()), "e8=N");
        let m = Move::promote(Square::E7, Square::E8, Promotion::Bishop);
        assert_eq!(san(diagram, Color::White, m, SanOptions::default()), "e8=B");
    }

    #[test]
    fn test_check() {
        let diagram = "....k.../......../......../......../......../......../......../R.....K.";
        let m = Move::normal(Square::A1, Square::A8);
        assert_eq!(san(diagram, Color::White, m, SanOptions::default()), "Ra8+");
    }
}
