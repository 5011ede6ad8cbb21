//! Move generation and the queries built on it.
//!
//! Candidates are generated per piece and filtered by playing each one on
//! the board, testing whether the mover's king is attacked, and taking the
//! move back. There is no separate pin or discovered check detection.

use crate::{
    attacks,
    board::Board,
    castling_side::{CastlingRights, CastlingSide},
    color::{Color, Side},
    m::{Move, MoveList, Promotion},
    role::Role,
    square::{Rank, Square},
};

impl Board {
    /// Generates the moves of `color` that follow the movement rules of the
    /// pieces, including those that leave the own king in check.
    ///
    /// Moves are appended in square order, each piece's moves in a fixed
    /// order, and castling last (king side before queen side).
    pub fn pseudo_legal_moves(
        &self,
        color: Color,
        castles: CastlingRights,
        last_move: Option<Move>,
        moves: &mut MoveList,
    ) {
        for (from, piece) in self.pieces() {
            if piece.color != color {
                continue;
            }
            match piece.role {
                Role::Pawn => self.gen_pawn(color, from, last_move, moves),
                Role::Knight => {
                    self.gen_steps(color, from, attacks::knight_targets(from), moves);
                }
                Role::King => self.gen_steps(color, from, attacks::king_targets(from), moves),
                Role::Bishop => self.gen_sliders(color, from, &attacks::BISHOP_DELTAS, moves),
                Role::Rook => self.gen_sliders(color, from, &attacks::ROOK_DELTAS, moves),
                Role::Queen => self.gen_sliders(color, from, &attacks::QUEEN_DELTAS, moves),
            }
        }

        for side in CastlingSide::ALL {
            if self.castling_path_clear(color, side, castles) {
                moves.push(Move::castle(
                    CastlingSide::king_from(color),
                    side.king_to(color),
                ));
            }
        }
    }

    fn gen_pawn(&self, color: Color, from: Square, last_move: Option<Move>, moves: &mut MoveList) {
        let push = color.pawn_push();

        if let Some(to) = attacks::step(from, push, 1).filter(|&to| self.piece_at(to).is_none()) {
            if to.rank() == color.promotion_rank() {
                push_promotions(from, to, moves);
            } else {
                moves.push(Move::normal(from, to));

                let start_rank = color.fold_wb(Rank::Second, Rank::Seventh);
                if from.rank() == start_rank {
                    if let Some(double) = attacks::step(to, push, 1) {
                        if self.piece_at(double).is_none() {
                            moves.push(Move::normal(from, double));
                        }
                    }
                }
            }
        }

        for to in attacks::pawn_targets(color, from) {
            if self.color_at(to) == Some(color.other()) {
                if to.rank() == color.promotion_rank() {
                    push_promotions(from, to, moves);
                } else {
                    moves.push(Move::normal(from, to));
                }
            }
        }

        if let Some(to) = self.en_passant_target(color, from, last_move) {
            moves.push(Move::en_passant(from, to));
        }
    }

    /// The square a pawn of `color` on `from` captures en passant on, if
    /// `last_move` was a double push of an adjacent opposing pawn.
    fn en_passant_target(&self, color: Color, from: Square, last_move: Option<Move>) -> Option<Square> {
        let last = last_move?;
        let pushed = last.to();

        let double_push = last.from().col() == pushed.col() && last.from().row().abs_diff(pushed.row()) == 2;
        let beside = from.row() == pushed.row() && from.col().abs_diff(pushed.col()) == 1;
        let fifth_rank = from.rank() == color.fold_wb(Rank::Fifth, Rank::Fourth);

        if double_push
            && beside
            && fifth_rank
            && self.piece_at(pushed) == Some(color.other().pawn())
        {
            pushed
                .offset(color.pawn_push())
                .filter(|&to| self.piece_at(to).is_none())
        } else {
            None
        }
    }

    fn gen_steps<I>(&self, color: Color, from: Square, targets: I, moves: &mut MoveList)
    where
        I: Iterator<Item = Square>,
    {
        for to in targets {
            if self.color_at(to) != Some(color) {
                moves.push(Move::normal(from, to));
            }
        }
    }

    fn gen_sliders(&self, color: Color, from: Square, deltas: &[i32], moves: &mut MoveList) {
        for &delta in deltas {
            for to in attacks::ray(from, delta) {
                match self.color_at(to) {
                    None => moves.push(Move::normal(from, to)),
                    Some(blocker) => {
                        if blocker != color {
                            moves.push(Move::normal(from, to));
                        }
                        break;
                    }
                }
            }
        }
    }

    fn castling_path_clear(&self, color: Color, side: CastlingSide, castles: CastlingRights) -> bool {
        let king = CastlingSide::king_from(color);
        let them = color.other();
        let rank = color.backrank();

        castles.has(color, side)
            && self.piece_at(king) == Some(color.king())
            && self.piece_at(side.rook_from(color)) == Some(color.rook())
            && !self.is_attacked(king, them)
            && side
                .empty_files()
                .iter()
                .all(|&file| self.piece_at(Square::from_coords(file, rank)).is_none())
            && side
                .transit_files()
                .iter()
                .all(|&file| !self.is_attacked(Square::from_coords(file, rank), them))
    }

    /// Generates the legal moves of `side`.
    ///
    /// With [`Side::Both`], White's moves come first, followed by Black's.
    ///
    /// `castles` should be [refreshed](CastlingRights::refresh) for this
    /// board. Castling additionally requires king and rook to actually
    /// stand on their original squares. `last_move` is only used to detect
    /// en passant captures.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox::{Board, CastlingRights, Color, Side};
    ///
    /// let mut board = Board::new();
    /// assert_eq!(board.legal_moves(Color::White, CastlingRights::INITIAL, None).len(), 20);
    /// assert_eq!(board.legal_moves(Side::Both, CastlingRights::INITIAL, None).len(), 40);
    /// ```
    pub fn legal_moves(
        &mut self,
        side: impl Into<Side>,
        castles: CastlingRights,
        last_move: Option<Move>,
    ) -> MoveList {
        let mut legals = MoveList::new();
        for color in side.into().colors() {
            let mut moves = MoveList::new();
            self.pseudo_legal_moves(color, castles, last_move, &mut moves);
            moves.retain(|m| self.is_safe(color, *m));
            legals.extend(moves);
        }
        legals
    }

    /// Plays `m` on trial and checks that the king of `color` is not
    /// attacked afterwards.
    fn is_safe(&mut self, color: Color, m: Move) -> bool {
        self.trial(m)
            .is_ok_and(|after| !after.is_in_check(color))
    }

    /// Keeps only the moves for which `predicate` returns `true`, given the
    /// current board.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox::{Board, CastlingRights, Color};
    ///
    /// let mut board = Board::new();
    /// let mut moves = board.legal_moves(Color::White, CastlingRights::INITIAL, None);
    /// board.retain_moves(&mut moves, |board, m| board.role_at(m.from()) == Some(mailbox::Role::Knight));
    /// assert_eq!(moves.len(), 4);
    /// ```
    pub fn retain_moves<F>(&self, moves: &mut MoveList, mut predicate: F)
    where
        F: FnMut(&Board, Move) -> bool,
    {
        moves.retain(|m| predicate(self, *m));
    }

    /// Checks if the king of `side` is attacked.
    ///
    /// A board without a king of that color is never in check. With
    /// [`Side::Both`] either king being attacked counts.
    pub fn is_in_check(&self, side: impl Into<Side>) -> bool {
        side.into().colors().into_iter().any(|color| {
            self.king_of(color)
                .is_some_and(|king| self.is_attacked(king, color.other()))
        })
    }

    /// Checks if `side` is in check and has no legal moves.
    ///
    /// Castling is not considered: a king in check cannot castle.
    pub fn is_checkmate(&mut self, side: impl Into<Side>, last_move: Option<Move>) -> bool {
        side.into().colors().into_iter().any(|color| {
            self.is_in_check(color)
                && self
                    .legal_moves(color, CastlingRights::empty(), last_move)
                    .is_empty()
        })
    }

    /// Checks if `side` is not in check but has no legal moves.
    ///
    /// Castling is not considered: it is never the only legal move.
    pub fn is_stalemate(&mut self, side: impl Into<Side>, last_move: Option<Move>) -> bool {
        side.into().colors().into_iter().any(|color| {
            !self.is_in_check(color)
                && self
                    .legal_moves(color, CastlingRights::empty(), last_move)
                    .is_empty()
        })
    }

    /// Checks if a pawn of `side` could capture en passant after
    /// `last_move`, ignoring whether that would expose its own king.
    pub fn can_en_passant(&self, side: impl Into<Side>, last_move: Option<Move>) -> bool {
        side.into().colors().into_iter().any(|color| {
            self.pieces().any(|(from, piece)| {
                piece == color.pawn() && self.en_passant_target(color, from, last_move).is_some()
            })
        })
    }

    /// Checks if playing `m` leaves either king in check.
    ///
    /// Moves that do not fit the board give no check.
    pub fn gives_check(&mut self, m: Move) -> bool {
        self.trial(m)
            .is_ok_and(|after| after.is_in_check(Side::Both))
    }

    /// Checks if `m` takes a piece.
    pub fn is_capture(&self, m: Move) -> bool {
        m.is_en_passant() || self.piece_at(m.to()).is_some()
    }

    /// Checks if `m` is among the legal moves of either color.
    pub fn is_legal(&mut self, m: Move, castles: CastlingRights, last_move: Option<Move>) -> bool {
        self.legal_moves(Side::Both, castles, last_move).contains(&m)
    }
}

fn push_promotions(from: Square, to: Square, moves: &mut MoveList) {
    for promotion in Promotion::ALL {
        moves.push(Move::promote(from, to, promotion));
    }
}
