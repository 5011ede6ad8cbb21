//! Chess rules on a board of 64 cells.
//!
//! The board is a plain array of optional pieces, indexed from a8 to h1.
//! Moves are packed into 16 bits. Legality is decided by playing every
//! candidate on the board and checking whether the mover's king is left
//! attacked.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use mailbox::Position;
//!
//! let pos = Position::new();
//! let legals = pos.legal_moves();
//! assert_eq!(legals.len(), 20);
//! ```
//!
//! Play moves:
//!
//! ```
//! use mailbox::{Move, Position, Square};
//!
//! let mut pos = Position::new();
//!
//! // 1. e4
//! pos.play(Move::normal(Square::E2, Square::E4))?;
//! # Ok::<_, mailbox::PlayError>(())
//! ```
//!
//! Work on a bare board, carrying castling rights and the last move
//! yourself:
//!
//! ```
//! use mailbox::{Board, CastlingRights, Color, Move, Square};
//!
//! let mut board = Board::new();
//! let mut castles = CastlingRights::INITIAL;
//!
//! let m = Move::normal(Square::E2, Square::E4);
//! let captured = board.make_move(m)?;
//! castles.refresh(&board);
//!
//! let replies = board.legal_moves(Color::Black, castles, Some(m));
//! assert_eq!(replies.len(), 20);
//!
//! board.undo_move(m, captured)?;
//! assert_eq!(board, Board::new());
//! # Ok::<_, mailbox::PlayError>(())
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! # use mailbox::Position;
//! # let pos = Position::new();
//! assert!(!pos.is_checkmate());
//! assert!(!pos.is_stalemate());
//! assert_eq!(pos.outcome(), None); // no winner yet
//! ```
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   [`Square`], [`Color`] and [`Move`].
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.
//! * `arbitrary`: Implements [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for vocabulary types and [`Board`], for fuzzing.

#![doc(html_root_url = "https://docs.rs/mailbox/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod castling_side;
mod color;
mod errors;
mod m;
mod movegen;
mod position;
mod role;
mod square;
mod types;

pub mod attacks;
pub mod board;
pub mod perft;
pub mod san;

pub use board::{Board, Trial};
pub use castling_side::{CastlingRights, CastlingSide};
pub use color::{Color, ParseColorError, Side};
pub use errors::{ParseBoardError, PlayError};
pub use m::{Move, MoveKind, MoveList, Promotion};
pub use perft::{debug_perft, perft, perft_with, TurnOrder};
pub use position::{Outcome, Position};
pub use role::Role;
pub use square::{File, ParseSquareError, Rank, Square};
pub use types::Piece;

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for File {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Rank {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Color {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Move {}
