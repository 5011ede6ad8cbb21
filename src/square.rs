use std::{error::Error, fmt, str::FromStr};

/// A file of the chessboard, `a` to `h`.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum File {
    A = 0,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    #[inline]
    pub const fn new(index: u32) -> File {
        match index & 7 {
            0 => File::A,
            1 => File::B,
            2 => File::C,
            3 => File::D,
            4 => File::E,
            5 => File::F,
            6 => File::G,
            _ => File::H,
        }
    }

    #[inline]
    pub fn from_char(ch: char) -> Option<File> {
        match ch {
            'a'..='h' => Some(File::new(u32::from(ch) - u32::from('a'))),
            _ => None,
        }
    }

    #[inline]
    pub fn char(self) -> char {
        char::from(b'a' + self as u8)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// `A`, ..., `H`.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A rank of the chessboard, `1` to `8`.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Rank {
    First = 0,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

impl Rank {
    #[inline]
    pub const fn new(index: u32) -> Rank {
        match index & 7 {
            0 => Rank::First,
            1 => Rank::Second,
            2 => Rank::Third,
            3 => Rank::Fourth,
            4 => Rank::Fifth,
            5 => Rank::Sixth,
            6 => Rank::Seventh,
            _ => Rank::Eighth,
        }
    }

    #[inline]
    pub fn from_char(ch: char) -> Option<Rank> {
        match ch {
            '1'..='8' => Some(Rank::new(u32::from(ch) - u32::from('1'))),
            _ => None,
        }
    }

    #[inline]
    pub fn char(self) -> char {
        char::from(b'1' + self as u8)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// `First`, ..., `Eighth`.
    pub const ALL: [Rank; 8] = [
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Sixth,
        Rank::Seventh,
        Rank::Eighth,
    ];
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

/// A square of the chessboard.
///
/// Squares are indexed in print orientation: 0 is a8, 7 is h8, 56 is a1 and
/// 63 is h1. The index therefore grows from the eighth rank downwards, and
/// the *row* of a square (`index / 8`) is 0 on the eighth rank.
///
/// # Examples
///
/// ```
/// use mailbox::{File, Rank, Square};
///
/// assert_eq!(Square::A8.index(), 0);
/// assert_eq!(Square::H1.index(), 63);
/// assert_eq!(Square::from_coords(File::E, Rank::Fourth), Square::E4);
/// assert_eq!(Square::E4.row(), 4);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    /// Gets the square with the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is not in the range `0..64`.
    #[inline]
    pub const fn new(index: u32) -> Square {
        assert!(index < 64);
        Square(index as u8)
    }

    /// Gets the square with the given index, or `None` if it is out of
    /// range.
    #[inline]
    pub const fn from_index(index: i32) -> Option<Square> {
        if 0 <= index && index < 64 {
            Some(Square(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_coords(file: File, rank: Rank) -> Square {
        Square(((7 - rank as u8) << 3) | file as u8)
    }

    /// Parses a square name.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSquareError`] if the input is not a valid square name
    /// in lowercase ASCII characters.
    ///
    /// # Example
    ///
    /// ```
    /// use mailbox::Square;
    ///
    /// assert_eq!(Square::from_ascii(b"h1").ok(), Some(Square::H1));
    /// assert!(Square::from_ascii(b"i9").is_err());
    /// ```
    pub fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        match *s {
            [file, rank] => Ok(Square::from_coords(
                File::from_char(char::from(file)).ok_or(ParseSquareError)?,
                Rank::from_char(char::from(rank)).ok_or(ParseSquareError)?,
            )),
            _ => Err(ParseSquareError),
        }
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    #[inline]
    pub const fn usize(self) -> usize {
        self.0 as usize
    }

    /// Row in print orientation, 0 on the eighth rank.
    #[inline]
    pub const fn row(self) -> u32 {
        (self.0 >> 3) as u32
    }

    /// Column, 0 on the a-file.
    #[inline]
    pub const fn col(self) -> u32 {
        (self.0 & 7) as u32
    }

    #[inline]
    pub const fn file(self) -> File {
        File::new(self.col())
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::new(7 - self.row())
    }

    /// Adds a raw linear offset.
    ///
    /// Only the bounds of the board are checked. The result may have
    /// wrapped around to the opposite edge, which callers walking rays
    /// must reject with [`Square::distance()`].
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox::Square;
    ///
    /// assert_eq!(Square::E2.offset(-8), Some(Square::E3));
    /// assert_eq!(Square::A8.offset(-1), None);
    ///
    /// // Wrapped from the h-file to the a-file of the next row.
    /// assert_eq!(Square::H8.offset(1), Some(Square::A7));
    /// ```
    #[inline]
    pub const fn offset(self, delta: i32) -> Option<Square> {
        Square::from_index(self.0 as i32 + delta)
    }

    /// Chebyshev distance: the number of king steps between two squares.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox::Square;
    ///
    /// assert_eq!(Square::D2.distance(Square::G3), 3);
    /// assert_eq!(Square::H8.distance(Square::A7), 7);
    /// ```
    #[inline]
    pub fn distance(self, other: Square) -> u32 {
        self.col()
            .abs_diff(other.col())
            .max(self.row().abs_diff(other.row()))
    }

    /// Mirrors the square across the middle of the board, e.g. e2 to e7.
    #[must_use]
    #[inline]
    pub const fn flip_vertical(self) -> Square {
        Square(self.0 ^ 0x38)
    }
}

impl From<Square> for u8 {
    #[inline]
    fn from(Square(index): Square) -> u8 {
        index
    }
}

impl From<Square> for usize {
    #[inline]
    fn from(Square(index): Square) -> usize {
        usize::from(index)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file().char(), self.rank().char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.file().char().to_ascii_uppercase(),
            self.rank().char()
        )
    }
}

macro_rules! square_consts {
    ($($name:ident = $index:expr,)+) => {
        impl Square {
            $(pub const $name: Square = Square($index);)+
        }
    }
}

square_consts! {
    A8 = 0, B8 = 1, C8 = 2, D8 = 3, E8 = 4, F8 = 5, G8 = 6, H8 = 7,
    A7 = 8, B7 = 9, C7 = 10, D7 = 11, E7 = 12, F7 = 13, G7 = 14, H7 = 15,
    A6 = 16, B6 = 17, C6 = 18, D6 = 19, E6 = 20, F6 = 21, G6 = 22, H6 = 23,
    A5 = 24, B5 = 25, C5 = 26, D5 = 27, E5 = 28, F5 = 29, G5 = 30, H5 = 31,
    A4 = 32, B4 = 33, C4 = 34, D4 = 35, E4 = 36, F4 = 37, G4 = 38, H4 = 39,
    A3 = 40, B3 = 41, C3 = 42, D3 = 43, E3 = 44, F3 = 45, G3 = 46, H3 = 47,
    A2 = 48, B2 = 49, C2 = 50, D2 = 51, E2 = 52, F2 = 53, G2 = 54, H2 = 55,
    A1 = 56, B1 = 57, C1 = 58, D1 = 59, E1 = 60, F1 = 61, G1 = 62, H1 = 63,
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Square {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Square> {
        u.int_in_range(0..=63).map(Square)
    }

    fn size_hint(_depth: usize) -> (usize, Option<usize>) {
        (1, Some(1))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Square {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Square, D::Error> {
        struct SquareVisitor;

        impl serde::de::Visitor<'_> for SquareVisitor {
            type Value = Square;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("square name")
            }

            fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Square, E> {
                value.parse().map_err(|_| E::custom("invalid square name"))
            }
        }

        deserializer.deserialize_str(SquareVisitor)
    }
}
