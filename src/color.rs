use std::{error::Error, fmt, ops, str::FromStr};

use arrayvec::ArrayVec;

use crate::{
    role::Role,
    square::Rank,
    types::Piece,
};

/// `White` or `Black`.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    pub const fn from_char(ch: char) -> Option<Color> {
        match ch {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    #[inline]
    pub const fn from_white(white: bool) -> Color {
        if white {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    pub fn fold_wb<T>(self, white: T, black: T) -> T {
        match self {
            Color::White => white,
            Color::Black => black,
        }
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, Color::White)
    }

    #[inline]
    pub const fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }

    #[inline]
    pub const fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The rank the pieces of this color start on.
    #[inline]
    pub fn backrank(self) -> Rank {
        self.fold_wb(Rank::First, Rank::Eighth)
    }

    /// The rank a pawn of this color promotes on.
    #[inline]
    pub fn promotion_rank(self) -> Rank {
        self.fold_wb(Rank::Eighth, Rank::First)
    }

    /// Linear board offset of a single pawn push.
    ///
    /// Index 0 is a8, so White advances towards lower indexes.
    #[inline]
    pub fn pawn_push(self) -> i32 {
        self.fold_wb(-8, 8)
    }

    pub fn char(self) -> char {
        self.fold_wb('w', 'b')
    }

    #[inline]
    pub const fn pawn(self) -> Piece {
        Role::Pawn.of(self)
    }
    #[inline]
    pub const fn knight(self) -> Piece {
        Role::Knight.of(self)
    }
    #[inline]
    pub const fn bishop(self) -> Piece {
        Role::Bishop.of(self)
    }
    #[inline]
    pub const fn rook(self) -> Piece {
        Role::Rook.of(self)
    }
    #[inline]
    pub const fn queen(self) -> Piece {
        Role::Queen.of(self)
    }
    #[inline]
    pub const fn king(self) -> Piece {
        Role::King.of(self)
    }

    /// `White` and `Black`, in this order.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];
}

impl ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.other()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fold_wb("white", "black"))
    }
}

/// Error when parsing an invalid color name.
#[derive(Clone, Debug)]
pub struct ParseColorError;

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid color")
    }
}

impl Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Color, ParseColorError> {
        Ok(match s {
            "white" | "w" => Color::White,
            "black" | "b" => Color::Black,
            _ => return Err(ParseColorError),
        })
    }
}

/// The colors an inspection query runs for.
///
/// Queries taking `impl Into<Side>` accept a plain [`Color`]. `Side::Both`
/// runs the single-color query for White and then for Black and combines
/// the answers. It is an inspection mode only: moves are always made by
/// one color.
///
/// # Examples
///
/// ```
/// use mailbox::{Color, Side};
///
/// assert_eq!(Side::from(Color::Black).colors().as_slice(), &[Color::Black]);
/// assert_eq!(Side::Both.colors().as_slice(), &[Color::White, Color::Black]);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Side {
    Only(Color),
    Both,
}

impl Side {
    pub fn colors(self) -> ArrayVec<Color, 2> {
        let mut colors = ArrayVec::new();
        match self {
            Side::Only(color) => colors.push(color),
            Side::Both => colors.extend(Color::ALL),
        }
        colors
    }

    /// Checks if `color` is one of the colors of this side.
    pub fn contains(self, color: Color) -> bool {
        match self {
            Side::Only(c) => c == color,
            Side::Both => true,
        }
    }
}

impl From<Color> for Side {
    #[inline]
    fn from(color: Color) -> Side {
        Side::Only(color)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.fold_wb("white", "black"))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        struct ColorVisitor;

        impl serde::de::Visitor<'_> for ColorVisitor {
            type Value = Color;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("white or black")
            }

            fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Color, E> {
                value.parse().map_err(|_| E::custom("invalid color"))
            }
        }

        deserializer.deserialize_str(ColorVisitor)
    }
}
