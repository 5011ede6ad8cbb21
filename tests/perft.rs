use mailbox::{perft_with, Board, CastlingRights, Color, TurnOrder};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};

#[serde_as]
#[derive(Deserialize)]
struct Record {
    name: String,
    #[serde_as(as = "DisplayFromStr")]
    board: Board,
    #[serde_as(as = "DisplayFromStr")]
    turn: Color,
    #[serde_as(as = "DisplayFromStr")]
    order: TurnOrder,
    depth: u32,
    nodes: u64,
}

fn test_perft_file(path: &str, node_limit: u64) {
    let mut reader = csv::Reader::from_path(path).expect("reader");

    for (i, record) in reader.deserialize().enumerate() {
        let record: Record = record.expect("record");

        if record.nodes <= node_limit {
            assert_eq!(
                perft_with(
                    &record.board,
                    record.depth,
                    record.turn,
                    CastlingRights::INITIAL,
                    None,
                    record.order,
                ),
                record.nodes,
                "{} depth {} (line {})",
                record.name,
                record.depth,
                i + 2
            );
        }
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_perft() {
    test_perft_file("tests/perft.csv", 100_000);
}

#[test]
#[ignore = "deep perft takes minutes"]
fn test_perft_deep() {
    test_perft_file("tests/perft.csv", u64::MAX);
}
