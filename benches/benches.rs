use iai::black_box;
use mailbox::{
    perft, perft_with, san::SanOptions, Board, CastlingRights, Color, Move, Position, Square,
    TurnOrder,
};

fn kiwipete() -> Position {
    let board: Board = "r...k..r/p.ppqpb./bn..pnp./...PN.../.p..P.../..N..Q.p/PPPBBPPP/R...K..R"
        .parse()
        .expect("valid diagram");
    Position::from_board(board, Color::White)
}

fn bench_shallow_perft() {
    let pos = Position::new();
    assert_eq!(black_box(perft(black_box(&pos), 4)), 197_281);
}

fn bench_kiwipete() {
    let pos = kiwipete();
    assert_eq!(perft(black_box(&pos), 3), 97_862);
}

fn bench_knight_tour() {
    let board: Board = "......../......../......../......../......../......../......../.......N"
        .parse()
        .expect("valid diagram");
    assert_eq!(
        perft_with(
            black_box(&board),
            6,
            Color::White,
            CastlingRights::empty(),
            None,
            TurnOrder::SameSide
        ),
        14_396
    );
}

fn bench_generate_moves() {
    let pos = kiwipete();
    assert_eq!(black_box(&pos).legal_moves().len(), 48);
}

fn bench_make_undo() -> Board {
    let mut board = black_box(kiwipete().board);
    let m = Move::castle(Square::E1, Square::C1);
    let captured = board.make_move(m).expect("castle fits");
    board.undo_move(m, captured).expect("undo fits");
    board
}

fn bench_is_attacked() -> bool {
    let board = black_box(kiwipete().board);
    (0..64)
        .map(Square::new)
        .any(|sq| board.is_attacked(sq, Color::Black) && board.is_attacked(sq, Color::White))
}

fn bench_san() -> String {
    let pos = black_box(kiwipete());
    pos.legal_moves()
        .iter()
        .map(|&m| pos.san_plus_with(m, SanOptions::default()).to_string())
        .collect()
}

iai::main!(
    bench_shallow_perft,
    bench_kiwipete,
    bench_knight_tour,
    bench_generate_moves,
    bench_make_undo,
    bench_is_attacked,
    bench_san,
);
