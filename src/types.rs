use std::fmt;

use crate::{color::Color, role::Role};

/// A piece with [`Color`] and [`Role`].
///
/// # Examples
///
/// ```
/// use mailbox::{Color, Piece, Role};
///
/// let piece = Role::Knight.of(Color::Black);
/// assert_eq!(piece.char(), 'n');
/// assert_eq!(Piece::from_char('Q'), Some(Color::White.queen()));
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    /// The role letter, upper case for White and lower case for Black.
    pub fn char(self) -> char {
        self.color.fold_wb(self.role.upper_char(), self.role.char())
    }

    pub fn from_char(ch: char) -> Option<Piece> {
        Role::from_char(ch).map(|role| role.of(Color::from_white(ch.is_ascii_uppercase())))
    }

    #[inline]
    pub fn is(self, color: Color, role: Role) -> bool {
        self.color == color && self.role == role
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_char() {
        for color in Color::ALL {
            for role in Role::ALL {
                let piece = role.of(color);
                assert_eq!(Piece::from_char(piece.char()), Some(piece));
            }
        }
        assert_eq!(Color::White.king().char(), 'K');
        assert_eq!(Color::Black.pawn().char(), 'p');
        assert_eq!(Piece::from_char('.'), None);
    }
}
