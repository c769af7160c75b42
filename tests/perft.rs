use mailbox_chess::utils::{divide, perft};
use mailbox_chess::*;

/// Positions with no promotion or en passant reachable within the tested depth
const CASES: [(&str, &[usize]); 6] = [
    (START_FEN, &[20, 400, 8902, 197281]),
    ("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", &[26, 568, 13744]),
    ("4k3/8/8/8/8/8/8/4K2R w K - 0 1", &[15, 66, 1197, 7059]),
    ("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1", &[16, 71, 1287, 7626]),
    ("4k2r/8/8/8/8/8/8/4K3 w k - 0 1", &[5, 75, 459, 8290]),
    ("r3k3/8/8/8/8/8/8/4K3 w q - 0 1", &[5, 80, 493, 8897]),
];

#[test]
fn test_perft_node_counts() {
    for (fen, counts) in CASES {
        let mut board = Board::from_fen(fen).unwrap();

        for (depth, &expected) in counts.iter().enumerate().map(|(i, n)| (i + 1, n)) {
            assert_eq!(perft(&mut board, depth), expected, "{fen} at depth {depth}");
        }
    }
}

#[test]
fn test_divide_sums_to_perft() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let split = divide(&mut board, 2);

    assert_eq!(split.len(), 26);
    assert_eq!(split.iter().map(|(_, nodes)| nodes).sum::<usize>(), 568);
}
