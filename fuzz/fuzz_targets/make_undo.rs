#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mailbox::{Board, Move};

#[derive(Debug, Arbitrary)]
struct Data {
    candidate: Move,
    board: Board,
}

fuzz_target!(|data: Data| {
    let mut board = data.board.clone();
    match board.make_move(data.candidate) {
        Ok(captured) => {
            board
                .undo_move(data.candidate, captured)
                .expect("undo after make");
            assert_eq!(board, data.board);
        }
        Err(_) => assert_eq!(board, data.board),
    }

    let mut trial = data.board.clone();
    let _ = trial.gives_check(data.candidate);
    assert_eq!(trial, data.board);
});
