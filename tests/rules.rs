use mailbox::{
    Board, CastlingRights, CastlingSide, Color, Move, PlayError, Position, Role, Side, Square,
};

const POSITIONS: [(&str, Color); 5] = [
    (
        "rnbqkbnr/pppppppp/......../......../......../......../PPPPPPPP/RNBQKBNR",
        Color::White,
    ),
    (
        "r...k..r/p.ppqpb./bn..pnp./...PN.../.p..P.../..N..Q.p/PPPBBPPP/R...K..R",
        Color::White,
    ),
    (
        "......../..p...../...p..../KP.....r/.R...p.k/......../....P.P./........",
        Color::White,
    ),
    (
        "r..q.rk./pP.p..pp/Q....n../bbp.p.../Np....../.B...NBn/pPPP.PPP/R...K..R",
        Color::Black,
    ),
    (
        "rnbq.k.r/pp.Pbppp/..p...../......../..B...../......../PPP.NnPP/RNBQK..R",
        Color::White,
    ),
];

fn parse_board(diagram: &str) -> Board {
    diagram.parse().expect("valid diagram")
}

#[test]
fn test_make_undo_inverse() {
    for (diagram, turn) in POSITIONS {
        let mut board = parse_board(diagram);
        let mut castles = CastlingRights::INITIAL;
        castles.refresh(&board);

        for m in board.legal_moves(turn, castles, None) {
            let before = board.clone();
            let captured = board.make_move(m).expect("legal move fits");
            assert_eq!(captured, before.piece_at(m.to()));

            // One ply deeper, so that en passant and castling replies are
            // covered too.
            let mut child_castles = castles;
            child_castles.refresh(&board);
            for reply in board.legal_moves(!turn, child_castles, Some(m)) {
                let middle = board.clone();
                let captured = board.make_move(reply).expect("legal reply fits");
                board.undo_move(reply, captured).expect("undo fits");
                assert_eq!(board, middle, "{diagram}: {m} {reply}");
            }

            board.undo_move(m, captured).expect("undo fits");
            assert_eq!(board, before, "{diagram}: {m}");
        }
    }
}

#[test]
fn test_checkmate_stalemate_exclusive() {
    for (diagram, turn) in POSITIONS {
        let mut board = parse_board(diagram);
        for color in [turn, !turn] {
            let has_moves = !board.legal_moves(color, CastlingRights::empty(), None).is_empty();
            let mate = board.is_checkmate(color, None);
            let stalemate = board.is_stalemate(color, None);
            assert!(!(mate && stalemate));
            if has_moves {
                assert!(!mate && !stalemate);
            }
        }
    }

    let mut board = parse_board("k......./.R....../.K....../......../......../......../......../........");
    assert!(board.is_checkmate(Color::Black, None) != board.is_stalemate(Color::Black, None));
}

#[test]
fn test_castling_rejected_despite_rights() {
    let castle = Move::castle(Square::E1, Square::G1);

    // King attacked.
    let mut b = parse_board("....r..k/......../......../......../......../......../......../....K..R");
    assert!(!b.legal_moves(Color::White, CastlingRights::INITIAL, None).contains(&castle));

    // Transit square attacked.
    let mut b = parse_board(".....r.k/......../......../......../......../......../......../....K..R");
    assert!(!b.legal_moves(Color::White, CastlingRights::INITIAL, None).contains(&castle));

    // Destination attacked.
    let mut b = parse_board("......rk/......../......../......../......../......../......../....K..R");
    assert!(!b.legal_moves(Color::White, CastlingRights::INITIAL, None).contains(&castle));

    // Intervening square occupied.
    let mut b = parse_board(".......k/......../......../......../......../......../......../....KB.R");
    assert!(!b.legal_moves(Color::White, CastlingRights::INITIAL, None).contains(&castle));

    // Everything fine.
    let mut b = parse_board(".......k/......../......../......../......../......../......../....K..R");
    assert!(b.legal_moves(Color::White, CastlingRights::INITIAL, None).contains(&castle));
    assert_eq!(castle.castling_side(), Some(CastlingSide::KingSide));

    // Fine, but the rook has moved before.
    let rights = CastlingRights::INITIAL - CastlingRights::WHITE_ROOK_H;
    assert!(!b.legal_moves(Color::White, rights, None).contains(&castle));
}

#[test]
fn test_en_passant_lifetime() {
    let mut pos = Position::from_board(
        parse_board("....k.../...p..../......../....P.../......../......../......../....K..."),
        Color::Black,
    );
    let ep = Move::en_passant(Square::E5, Square::D6);

    pos.play(Move::normal(Square::D7, Square::D5)).expect("double push");
    assert!(pos.legal_moves().contains(&ep));
    assert!(pos.board.can_en_passant(Color::White, pos.last_move));

    // Any other move in between and the chance is gone.
    pos.play(Move::normal(Square::E1, Square::F1)).expect("legal");
    pos.play(Move::normal(Square::E8, Square::F8)).expect("legal");
    assert!(!pos.legal_moves().contains(&ep));
    assert!(!pos.board.can_en_passant(Side::Both, pos.last_move));
    assert_eq!(pos.play(ep), Err(PlayError::IllegalMove));
}

#[test]
fn test_attacks_translation_invariant() {
    for role in Role::ALL {
        for color in Color::ALL {
            let piece = role.of(color);
            for index in 0..64 {
                let sq = Square::new(index);
                if sq.col() == 7 {
                    continue;
                }
                let right = sq.offset(1).expect("on board");

                let mut here = Board::empty();
                here.set_piece_at(sq, piece);
                let mut there = Board::empty();
                there.set_piece_at(right, piece);

                for target in 0..64 {
                    let target = Square::new(target);
                    if target.col() == 7 {
                        continue;
                    }
                    let shifted = target.offset(1).expect("on board");
                    assert_eq!(
                        here.is_attacked(target, color),
                        there.is_attacked(shifted, color),
                        "{piece:?} on {sq} vs {right}, target {target} vs {shifted}"
                    );
                    assert_eq!(
                        here.is_attacked_by_piece(target, piece),
                        there.is_attacked_by_piece(shifted, piece),
                    );
                }
            }
        }
    }
}

#[test]
fn test_no_attacks_across_edges() {
    for index in 0..64 {
        let sq = Square::new(index);
        for role in Role::ALL {
            let mut board = Board::empty();
            board.set_piece_at(sq, role.of(Color::White));
            for target in 0..64 {
                let target = Square::new(target);
                if board.is_attacked(target, Color::White) {
                    let (dc, dr) = (sq.col().abs_diff(target.col()), sq.row().abs_diff(target.row()));
                    let ok = match role {
                        Role::Pawn => dc == 1 && target.row() + 1 == sq.row(),
                        Role::Knight => (dc, dr) == (1, 2) || (dc, dr) == (2, 1),
                        Role::Bishop => dc == dr,
                        Role::Rook => dc == 0 || dr == 0,
                        Role::Queen => dc == dr || dc == 0 || dr == 0,
                        Role::King => dc <= 1 && dr <= 1,
                    };
                    assert!(ok, "{role:?} on {sq} attacks {target}");
                }
            }
        }
    }
}

#[test]
fn test_both_sides() {
    let mut board = Board::new();
    let white = board.legal_moves(Color::White, CastlingRights::INITIAL, None);
    let black = board.legal_moves(Color::Black, CastlingRights::INITIAL, None);
    let both = board.legal_moves(Side::Both, CastlingRights::INITIAL, None);
    assert_eq!(both.len(), white.len() + black.len());
    assert_eq!(&both[..white.len()], &white[..]);
    assert!(!board.is_in_check(Side::Both));
}
