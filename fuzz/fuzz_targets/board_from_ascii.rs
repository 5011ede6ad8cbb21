#![no_main]

use libfuzzer_sys::fuzz_target;
use mailbox::Board;

fuzz_target!(|data: &[u8]| {
    if let Ok(board) = Board::from_ascii(data) {
        let roundtripped: Board = format!("{board:?}").parse().expect("roundtrip");
        assert_eq!(board, roundtripped);
    }
});
