use std::{
    fmt::{self, Write as _},
    ops,
    str::FromStr,
};

use tracing::debug;

use crate::{
    attacks,
    castling_side::CastlingSide,
    color::{Color, Side},
    errors::{ParseBoardError, PlayError},
    m::{Move, MoveKind},
    role::Role,
    square::{File, Rank, Square},
    types::Piece,
};

/// [`Piece`] positions on a board of 64 cells.
///
/// Cells are stored in [`Square`] index order, so the first cell is a8 and
/// the last is h1.
///
/// # Examples
///
/// ```
/// use mailbox::{Board, Color, Square};
///
/// let board = Board::new();
/// // r n b q k b n r
/// // p p p p p p p p
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // P P P P P P P P
/// // R N B Q K B N R
///
/// assert_eq!(board.piece_at(Square::E1), Some(Color::White.king()));
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Board {
    /// The standard starting position.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for file in File::ALL {
            let role = match file {
                File::A | File::H => Role::Rook,
                File::B | File::G => Role::Knight,
                File::C | File::F => Role::Bishop,
                File::D => Role::Queen,
                File::E => Role::King,
            };
            for color in Color::ALL {
                board.set_piece_at(Square::from_coords(file, color.backrank()), role.of(color));
                let pawn_rank = color.fold_wb(Rank::Second, Rank::Seventh);
                board.set_piece_at(Square::from_coords(file, pawn_rank), color.pawn());
            }
        }
        board
    }

    pub const fn empty() -> Board {
        Board { cells: [None; 64] }
    }

    /// Parses a board diagram.
    ///
    /// The diagram lists the 64 cells from a8 to h1, rank by rank, with a
    /// piece letter (upper case for White) or `.` for an empty cell. Spaces
    /// also count as empty cells. `/` and line breaks are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ParseBoardError`] for unknown characters or when the
    /// diagram does not have exactly 64 cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox::{Board, Color, Square};
    ///
    /// let board = Board::from_ascii(b"....k.../......../......../......../......../......../......../....K..R")?;
    /// assert_eq!(board.piece_at(Square::H1), Some(Color::White.rook()));
    /// # Ok::<_, mailbox::ParseBoardError>(())
    /// ```
    pub fn from_ascii(diagram: &[u8]) -> Result<Board, ParseBoardError> {
        let mut board = Board::empty();
        let mut count = 0;

        for &byte in diagram {
            let cell = match byte {
                b'/' | b'\n' | b'\r' => continue,
                b'.' | b' ' => None,
                _ => Some(Piece::from_char(char::from(byte)).ok_or(
                    ParseBoardError::InvalidChar {
                        ch: char::from(byte),
                    },
                )?),
            };
            if count < 64 {
                board.cells[count] = cell;
            }
            count += 1;
        }

        if count != 64 {
            return Err(ParseBoardError::WrongCellCount { count });
        }

        Ok(board)
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.usize()]
    }

    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|piece| piece.color)
    }

    #[inline]
    pub fn role_at(&self, sq: Square) -> Option<Role> {
        self.piece_at(sq).map(|piece| piece.role)
    }

    /// Puts a piece on `sq`, returning the previous occupant.
    #[inline]
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.cells[sq.usize()].replace(piece)
    }

    #[inline]
    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.usize()].take()
    }

    #[inline]
    fn put(&mut self, sq: Square, cell: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.cells[sq.usize()], cell)
    }

    /// Finds the king of `color` by scanning the board. With several kings
    /// the first one in square order is returned.
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|&(_, piece)| piece == color.king())
            .map(|(sq, _)| sq)
    }

    /// Iterates over all occupied squares in square order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.map(|piece| (Square::new(index as u32), piece)))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Checks if any piece of `by` could move to `sq`.
    ///
    /// Whose turn it is and whether the attacker would expose its own king
    /// are ignored. A square occupied by a piece of the attacking color is
    /// never attacked by that color.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox::{Board, Color, Side, Square};
    ///
    /// let board = Board::new();
    /// assert!(board.is_attacked(Square::F3, Color::White));
    /// assert!(!board.is_attacked(Square::E4, Color::White));
    /// assert!(board.is_attacked(Square::F6, Side::Both));
    /// ```
    pub fn is_attacked(&self, sq: Square, by: impl Into<Side>) -> bool {
        by.into()
            .colors()
            .into_iter()
            .any(|color| self.is_attacked_by(sq, color))
    }

    fn is_attacked_by(&self, sq: Square, attacker: Color) -> bool {
        if self.color_at(sq) == Some(attacker) {
            return false;
        }

        if attacks::pawn_sources(attacker, sq).any(|from| self.piece_at(from) == Some(attacker.pawn())) {
            return true;
        }

        if attacks::knight_targets(sq).any(|from| self.piece_at(from) == Some(attacker.knight())) {
            return true;
        }

        for delta in attacks::ATTACK_DELTAS {
            let orthogonal = attacks::is_orthogonal(delta);
            for (distance, from) in attacks::ray(sq, delta).enumerate() {
                let Some(piece) = self.piece_at(from) else {
                    continue;
                };
                let slides = if orthogonal {
                    piece.role.is_orthogonal_slider()
                } else {
                    piece.role.is_diagonal_slider()
                };
                if piece.color == attacker && (slides || (piece.role == Role::King && distance == 0)) {
                    return true;
                }
                break;
            }
        }

        false
    }

    /// Checks if `piece` attacks `sq`, looking only at pieces of exactly
    /// that kind and color.
    ///
    /// Unlike [`Board::is_attacked()`] this does not care what stands on
    /// `sq` itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox::{Board, Color, Square};
    ///
    /// let board = Board::new();
    /// assert!(board.is_attacked_by_piece(Square::F3, Color::White.knight()));
    /// assert!(!board.is_attacked_by_piece(Square::F3, Color::White.bishop()));
    /// ```
    pub fn is_attacked_by_piece(&self, sq: Square, piece: Piece) -> bool {
        let deltas: &[i32] = match piece.role {
            Role::Pawn => {
                return attacks::pawn_sources(piece.color, sq)
                    .any(|from| self.piece_at(from) == Some(piece));
            }
            Role::Knight => {
                return attacks::knight_targets(sq).any(|from| self.piece_at(from) == Some(piece));
            }
            Role::King => {
                return attacks::king_targets(sq).any(|from| self.piece_at(from) == Some(piece));
            }
            Role::Bishop => &attacks::BISHOP_DELTAS,
            Role::Rook => &attacks::ROOK_DELTAS,
            Role::Queen => &attacks::QUEEN_DELTAS,
        };

        deltas.iter().any(|&delta| {
            attacks::ray(sq, delta)
                .find_map(|from| self.piece_at(from))
                .is_some_and(|blocker| blocker == piece)
        })
    }

    fn validate(&self, m: Move) -> Result<(), PlayError> {
        let from = m.from();
        let to = m.to();
        let piece = self
            .piece_at(from)
            .ok_or(PlayError::EmptySquare { square: from })?;

        if from == to {
            return Err(PlayError::InvalidMoveEncoding);
        }

        match m.kind() {
            MoveKind::Normal => Ok(()),
            MoveKind::Promotion => {
                if piece.role == Role::Pawn
                    && to.rank() == piece.color.promotion_rank()
                    && is_pawn_step(piece.color, from, to)
                {
                    Ok(())
                } else {
                    Err(PlayError::InvalidPromotion)
                }
            }
            MoveKind::Castle => {
                let color = piece.color;
                let side = CastlingSide::from_king_side(from < to);
                if piece.role == Role::King
                    && from == CastlingSide::king_from(color)
                    && to == side.king_to(color)
                    && self.piece_at(side.rook_from(color)) == Some(color.rook())
                    && self.piece_at(to).is_none()
                    && self.piece_at(side.rook_to(color)).is_none()
                {
                    Ok(())
                } else {
                    Err(PlayError::InvalidMoveEncoding)
                }
            }
            MoveKind::EnPassant => {
                let color = piece.color;
                let diagonal = attacks::pawn_targets(color, from).any(|sq| sq == to);
                let victim = to.offset(-color.pawn_push());
                if piece.role == Role::Pawn
                    && diagonal
                    && self.piece_at(to).is_none()
                    && victim.and_then(|sq| self.piece_at(sq)) == Some(color.other().pawn())
                {
                    Ok(())
                } else {
                    Err(PlayError::InvalidMoveEncoding)
                }
            }
        }
    }

    /// Plays a move.
    ///
    /// Returns the previous occupant of the destination square, which
    /// [`Board::undo_move()`] needs to take the move back. For en passant
    /// this is `None`: the captured pawn is restored from the geometry.
    ///
    /// Only the encoding is checked, not legality. Use
    /// [`Board::legal_moves()`] or [`Position::play()`](crate::Position::play)
    /// for that.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError`] if the move does not fit the board. The board
    /// is left unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox::{Board, Move, Square};
    ///
    /// let mut board = Board::new();
    /// let before = board.clone();
    /// let m = Move::normal(Square::G1, Square::F3);
    ///
    /// let captured = board.make_move(m)?;
    /// assert_eq!(captured, None);
    /// board.undo_move(m, captured)?;
    /// assert_eq!(board, before);
    /// # Ok::<_, mailbox::PlayError>(())
    /// ```
    pub fn make_move(&mut self, m: Move) -> Result<Option<Piece>, PlayError> {
        if let Err(err) = self.validate(m) {
            debug!(%m, %err, "rejected move");
            return Err(err);
        }
        Ok(self.play_unchecked(m))
    }

    /// Plays a move without checking that it fits the board.
    ///
    /// Moving from an empty square does nothing. Other malformed moves leave
    /// the board in some unspecified but memory safe state.
    pub fn play_unchecked(&mut self, m: Move) -> Option<Piece> {
        let from = m.from();
        let to = m.to();
        let piece = self.remove_piece_at(from)?;

        match m.kind() {
            MoveKind::Normal => self.set_piece_at(to, piece),
            MoveKind::Promotion => {
                let role = m.promotion().map_or(piece.role, |p| p.role());
                self.set_piece_at(to, role.of(piece.color))
            }
            MoveKind::Castle => {
                let side = CastlingSide::from_king_side(from < to);
                if let Some(rook) = self.remove_piece_at(side.rook_from(piece.color)) {
                    self.set_piece_at(side.rook_to(piece.color), rook);
                }
                self.set_piece_at(to, piece)
            }
            MoveKind::EnPassant => {
                if let Some(victim) = to.offset(-piece.color.pawn_push()) {
                    self.remove_piece_at(victim);
                }
                self.set_piece_at(to, piece)
            }
        }
    }

    fn validate_undo(&self, m: Move) -> Result<(), PlayError> {
        let from = m.from();
        let to = m.to();
        let piece = self
            .piece_at(to)
            .ok_or(PlayError::EmptySquare { square: to })?;

        if from == to || self.piece_at(from).is_some() {
            return Err(PlayError::InvalidMoveEncoding);
        }

        match m.kind() {
            MoveKind::Normal => Ok(()),
            MoveKind::Promotion => {
                if matches!(piece.role, Role::Pawn | Role::King)
                    || to.rank() != piece.color.promotion_rank()
                    || !is_pawn_step(piece.color, from, to)
                {
                    Err(PlayError::InvalidPromotion)
                } else {
                    Ok(())
                }
            }
            MoveKind::Castle => {
                let color = piece.color;
                let side = CastlingSide::from_king_side(from < to);
                if piece.role == Role::King
                    && from == CastlingSide::king_from(color)
                    && to == side.king_to(color)
                    && self.piece_at(side.rook_to(color)) == Some(color.rook())
                    && self.piece_at(side.rook_from(color)).is_none()
                {
                    Ok(())
                } else {
                    Err(PlayError::InvalidMoveEncoding)
                }
            }
            MoveKind::EnPassant => {
                let color = piece.color;
                let diagonal = attacks::pawn_targets(color, from).any(|sq| sq == to);
                let victim = to.offset(-color.pawn_push());
                if piece.role == Role::Pawn
                    && diagonal
                    && victim.is_some_and(|sq| self.piece_at(sq).is_none())
                {
                    Ok(())
                } else {
                    Err(PlayError::InvalidMoveEncoding)
                }
            }
        }
    }

    /// Takes back a move played with [`Board::make_move()`].
    ///
    /// `captured` must be the value `make_move` returned. A promoted piece
    /// turns back into a pawn of its color.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError`] if the board does not look like `m` was just
    /// played on it. The board is left unchanged in that case.
    pub fn undo_move(&mut self, m: Move, captured: Option<Piece>) -> Result<(), PlayError> {
        if let Err(err) = self.validate_undo(m) {
            debug!(%m, %err, "rejected undo");
            return Err(err);
        }
        self.undo_unchecked(m, captured);
        Ok(())
    }

    fn undo_unchecked(&mut self, m: Move, captured: Option<Piece>) {
        let from = m.from();
        let to = m.to();
        let Some(piece) = self.put(to, captured) else {
            return;
        };

        match m.kind() {
            MoveKind::Normal => {
                self.set_piece_at(from, piece);
            }
            MoveKind::Promotion => {
                self.set_piece_at(from, piece.color.pawn());
            }
            MoveKind::Castle => {
                let side = CastlingSide::from_king_side(from < to);
                if let Some(rook) = self.remove_piece_at(side.rook_to(piece.color)) {
                    self.set_piece_at(side.rook_from(piece.color), rook);
                }
                self.set_piece_at(from, piece);
            }
            MoveKind::EnPassant => {
                if let Some(victim) = to.offset(-piece.color.pawn_push()) {
                    self.set_piece_at(victim, piece.color.other().pawn());
                }
                self.set_piece_at(from, piece);
            }
        }
    }

    /// Plays a move for inspection and takes it back when the returned
    /// guard goes out of scope.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError`] like [`Board::make_move()`], without touching
    /// the board.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox::{Board, Color, Move, Square};
    ///
    /// let mut board = Board::new();
    /// {
    ///     let trial = board.trial(Move::normal(Square::E2, Square::E4))?;
    ///     assert_eq!(trial.piece_at(Square::E4), Some(Color::White.pawn()));
    /// }
    /// assert_eq!(board, Board::new());
    /// # Ok::<_, mailbox::PlayError>(())
    /// ```
    pub fn trial(&mut self, m: Move) -> Result<Trial<'_>, PlayError> {
        let captured = self.make_move(m)?;
        Ok(Trial {
            board: self,
            m,
            captured,
        })
    }
}

/// Checks if a pawn of `color` can get from `from` to `to` in one move,
/// by pushing or capturing.
fn is_pawn_step(color: Color, from: Square, to: Square) -> bool {
    attacks::step(from, color.pawn_push(), 1) == Some(to)
        || attacks::pawn_targets(color, from).any(|sq| sq == to)
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

/// A move played on a borrowed [`Board`], taken back on drop.
///
/// Created by [`Board::trial()`].
#[derive(Debug)]
pub struct Trial<'a> {
    board: &'a mut Board,
    m: Move,
    captured: Option<Piece>,
}

impl Trial<'_> {
    /// The move on trial.
    pub fn played(&self) -> Move {
        self.m
    }

    /// The previous occupant of the destination square.
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }
}

impl ops::Deref for Trial<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        self.board.undo_unchecked(self.m, self.captured);
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Board, ParseBoardError> {
        Board::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            f.write_char(rank.char())?;
            for file in File::ALL {
                f.write_char(' ')?;
                f.write_char(
                    self.piece_at(Square::from_coords(file, rank))
                        .map_or('.', Piece::char),
                )?;
            }
            f.write_char('\n')?;
        }

        f.write_char(' ')?;
        for file in File::ALL {
            f.write_char(' ')?;
            f.write_char(file.char())?;
        }
        f.write_char('\n')
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, cell) in self.cells.iter().enumerate() {
            if index > 0 && index % 8 == 0 {
                f.write_char('/')?;
            }
            f.write_char(cell.map_or('.', Piece::char))?;
        }
        Ok(())
    }
}
