use std::fmt;

use tracing::trace;

use crate::{
    board::Board,
    castling_side::CastlingRights,
    color::Color,
    errors::PlayError,
    m::{Move, MoveList},
    san::{SanOptions, SanPlus},
};

/// Outcome of a game.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Outcome {
    Decisive { winner: Color },
    Draw,
}

impl Outcome {
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Decisive { winner } => Some(winner),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Outcome::Decisive {
                winner: Color::White,
            } => "1-0",
            Outcome::Decisive {
                winner: Color::Black,
            } => "0-1",
            Outcome::Draw => "1/2-1/2",
        })
    }
}

/// A board together with the state a caller carries between plies: the
/// side to move, castling rights and the previous move.
///
/// # Examples
///
/// ```
/// use mailbox::{Move, Position, Square};
///
/// let mut pos = Position::new();
/// pos.play(Move::normal(Square::E2, Square::E4))?;
/// pos.play(Move::normal(Square::E7, Square::E5))?;
/// assert_eq!(pos.legal_moves().len(), 29);
/// assert_eq!(pos.outcome(), None);
/// # Ok::<_, mailbox::PlayError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    pub board: Board,
    pub turn: Color,
    pub castles: CastlingRights,
    pub last_move: Option<Move>,
}

impl Position {
    /// The starting position, White to move.
    pub fn new() -> Position {
        Position::from_board(Board::new(), Color::White)
    }

    /// Sets up a position with all castling rights that the board still
    /// allows and no previous move.
    pub fn from_board(board: Board, turn: Color) -> Position {
        let mut castles = CastlingRights::INITIAL;
        castles.refresh(&board);
        Position {
            board,
            turn,
            castles,
            last_move: None,
        }
    }

    /// Legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        let mut board = self.board.clone();
        board.legal_moves(self.turn, self.castles, self.last_move)
    }

    pub fn is_check(&self) -> bool {
        self.board.is_in_check(self.turn)
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.legal_moves().is_empty()
    }

    /// The outcome of the game, if the side to move is mated or stalemated.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.legal_moves().is_empty() {
            None
        } else if self.is_check() {
            Some(Outcome::Decisive {
                winner: !self.turn,
            })
        } else {
            Some(Outcome::Draw)
        }
    }

    /// Plays a legal move of the side to move.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::IllegalMove`] if `m` is not among the
    /// [legal moves](Position::legal_moves). The position is left unchanged.
    pub fn play(&mut self, m: Move) -> Result<(), PlayError> {
        if !self.legal_moves().contains(&m) {
            return Err(PlayError::IllegalMove);
        }
        trace!(%m, turn = %self.turn, "play");
        self.play_unchecked(m);
        Ok(())
    }

    /// Plays a move without checking legality, then hands the turn over and
    /// refreshes castling rights.
    pub fn play_unchecked(&mut self, m: Move) {
        self.board.play_unchecked(m);
        self.castles.refresh(&self.board);
        self.last_move = Some(m);
        self.turn = !self.turn;
    }

    /// Formats a legal move of the side to move with default options.
    pub fn san_plus(&self, m: Move) -> SanPlus {
        self.san_plus_with(m, SanOptions::default())
    }

    pub fn san_plus_with(&self, m: Move, options: SanOptions) -> SanPlus {
        SanPlus::from_move(&self.board, m, &self.legal_moves(), options)
    }
}

impl Default for Position {
    fn default() -> Position {
        Position::new()
    }
}
