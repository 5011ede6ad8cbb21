use std::fmt::{self, Display, Write as _};

use arrayvec::ArrayVec;

use crate::{castling_side::CastlingSide, Role, Square};

/// What a [`Move`] does besides moving a piece from one square to another.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum MoveKind {
    /// A quiet move or a capture, including pawn pushes.
    Normal = 0,
    /// A pawn reaching the back rank. The new piece is given by
    /// [`Move::promotion()`].
    Promotion = 1,
    /// The king moving two squares towards a rook. The rook is implied by
    /// the destination square.
    Castle = 2,
    /// A pawn capturing an adjacent pawn that just made a double push.
    EnPassant = 3,
}

impl MoveKind {
    #[inline]
    const fn from_bits(bits: u16) -> MoveKind {
        match bits & 3 {
            0 => MoveKind::Normal,
            1 => MoveKind::Promotion,
            2 => MoveKind::Castle,
            _ => MoveKind::EnPassant,
        }
    }
}

/// The piece a pawn becomes.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Promotion {
    Knight = 0,
    Bishop = 1,
    Rook = 2,
    Queen = 3,
}

impl Promotion {
    #[inline]
    const fn from_bits(bits: u16) -> Promotion {
        match bits & 3 {
            0 => Promotion::Knight,
            1 => Promotion::Bishop,
            2 => Promotion::Rook,
            _ => Promotion::Queen,
        }
    }

    pub const fn from_role(role: Role) -> Option<Promotion> {
        match role {
            Role::Knight => Some(Promotion::Knight),
            Role::Bishop => Some(Promotion::Bishop),
            Role::Rook => Some(Promotion::Rook),
            Role::Queen => Some(Promotion::Queen),
            Role::Pawn | Role::King => None,
        }
    }

    #[inline]
    pub const fn role(self) -> Role {
        match self {
            Promotion::Knight => Role::Knight,
            Promotion::Bishop => Role::Bishop,
            Promotion::Rook => Role::Rook,
            Promotion::Queen => Role::Queen,
        }
    }

    /// `Knight`, `Bishop`, `Rook` and `Queen`, in generation order.
    pub const ALL: [Promotion; 4] = [
        Promotion::Knight,
        Promotion::Bishop,
        Promotion::Rook,
        Promotion::Queen,
    ];
}

/// A move packed into 16 bits.
///
/// From the most significant bit down: 6 bits origin square, 6 bits
/// destination square, 2 bits [`MoveKind`], 2 bits [`Promotion`]. The
/// promotion bits are ignored unless the kind is [`MoveKind::Promotion`].
///
/// Castling moves are encoded as the king's move, e.g. `e1g1`. En passant
/// moves carry the destination of the capturing pawn; the captured pawn
/// stands one rank behind it.
///
/// Every 16-bit value decodes to some move. Whether it can be played is
/// decided by [`Board::make_move()`](crate::Board::make_move).
///
/// # Display
///
/// `Move` implements [`Display`] using coordinate notation, e.g. `e2e4` or
/// `e7e8q`. For human interfaces use [SAN](crate::san).
///
/// # Examples
///
/// ```
/// use mailbox::{Move, MoveKind, Promotion, Square};
///
/// let m = Move::new(Square::E7, Square::E8, MoveKind::Promotion, Promotion::Queen);
/// assert_eq!(m.from(), Square::E7);
/// assert_eq!(m.to(), Square::E8);
/// assert_eq!(m.promotion(), Some(Promotion::Queen));
/// assert_eq!(Move::from_raw(m.raw()), m);
/// assert_eq!(m.to_string(), "e7e8q");
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Move(u16);

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind, promotion: Promotion) -> Move {
        Move(
            (from.index() as u16) << 10
                | (to.index() as u16) << 4
                | (kind as u16) << 2
                | promotion as u16,
        )
    }

    /// A plain move or capture.
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Move {
        Move::new(from, to, MoveKind::Normal, Promotion::Knight)
    }

    #[inline]
    pub const fn promote(from: Square, to: Square, promotion: Promotion) -> Move {
        Move::new(from, to, MoveKind::Promotion, promotion)
    }

    /// A castling move, given as the king's origin and destination.
    #[inline]
    pub const fn castle(king: Square, to: Square) -> Move {
        Move::new(king, to, MoveKind::Castle, Promotion::Knight)
    }

    #[inline]
    pub const fn en_passant(from: Square, to: Square) -> Move {
        Move::new(from, to, MoveKind::EnPassant, Promotion::Knight)
    }

    #[inline]
    pub const fn from_raw(raw: u16) -> Move {
        Move(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn from(self) -> Square {
        Square::new((self.0 >> 10) as u32)
    }

    #[inline]
    pub const fn to(self) -> Square {
        Square::new(((self.0 >> 4) & 63) as u32)
    }

    #[inline]
    pub const fn kind(self) -> MoveKind {
        MoveKind::from_bits(self.0 >> 2)
    }

    /// Gets the promotion piece, if this is a promotion.
    #[inline]
    pub const fn promotion(self) -> Option<Promotion> {
        match self.kind() {
            MoveKind::Promotion => Some(Promotion::from_bits(self.0)),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self.kind(), MoveKind::Promotion)
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self.kind(), MoveKind::Castle)
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind(), MoveKind::EnPassant)
    }

    /// Gets the castling side from the direction of the king move.
    pub fn castling_side(self) -> Option<CastlingSide> {
        if self.is_castle() {
            Some(CastlingSide::from_king_side(self.from() < self.to()))
        } else {
            None
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promotion) = self.promotion() {
            f.write_char(promotion.role().char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.from(), self.to())?;
        match self.kind() {
            MoveKind::Normal => Ok(()),
            MoveKind::Promotion => match self.promotion() {
                Some(promotion) => write!(f, "={}", promotion.role().upper_char()),
                None => Ok(()),
            },
            MoveKind::Castle => f.write_str("(castle)"),
            MoveKind::EnPassant => f.write_str("(ep)"),
        }
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is large enough for the legal moves of both sides of any
/// chess position.
///
/// # Example
///
/// ```
/// use mailbox::{Board, CastlingRights, Color};
///
/// let mut board = Board::new();
/// let mut moves = board.legal_moves(Color::White, CastlingRights::INITIAL, None);
/// moves.retain(|m| m.from().row() == 6);
/// assert_eq!(moves.len(), 16);
/// ```
pub type MoveList = ArrayVec<Move, 512>;

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Move {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Move> {
        <u16 as arbitrary::Arbitrary>::arbitrary(u).map(Move)
    }

    fn size_hint(depth: usize) -> (usize, Option<usize>) {
        <u16 as arbitrary::Arbitrary>::size_hint(depth)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Move {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Move {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Move, D::Error> {
        <u16 as serde::Deserialize>::deserialize(deserializer).map(Move)
    }
}

#[cfg(test)]
mod tests {
    use std::mem;

    use super::*;

    #[test]
    fn test_move_size() {
        assert_eq!(mem::size_of::<Move>(), 2);
    }

    #[test]
    fn test_layout() {
        let m = Move::new(Square::new(63), Square::new(0), MoveKind::EnPassant, Promotion::Rook);
        assert_eq!(m.raw(), 63 << 10 | 3 << 2 | 2);
        assert_eq!(m.from(), Square::H1);
        assert_eq!(m.to(), Square::A8);
        assert_eq!(m.kind(), MoveKind::EnPassant);
        assert_eq!(m.promotion(), None);
    }

    #[test]
    fn test_zero() {
        let m = Move::from_raw(0);
        assert_eq!(m, Move::normal(Square::A8, Square::A8));
        assert_eq!(m.kind(), MoveKind::Normal);
    }

    #[test]
    fn test_castling_side() {
        assert_eq!(
            Move::castle(Square::E1, Square::G1).castling_side(),
            Some(CastlingSide::KingSide)
        );
        assert_eq!(
            Move::castle(Square::E8, Square::C8).castling_side(),
            Some(CastlingSide::QueenSide)
        );
        assert_eq!(Move::normal(Square::E1, Square::G1).castling_side(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Move::normal(Square::G1, Square::F3).to_string(), "g1f3");
        assert_eq!(
            Move::promote(Square::B2, Square::A1, Promotion::Knight).to_string(),
            "b2a1n"
        );
        assert_eq!(
            format!("{:?}", Move::en_passant(Square::E5, Square::D6)),
            "E5D6(ep)"
        );
    }
}
