use crate::Board;
use crate::core::Move;

/// Plays `mv` on a copy of `board` and hands the turn over
fn child(board: &Board, mv: Move) -> Board {
    let mut child = board.clone();
    child.commit_move(mv.from(), mv.to());
    child.pass_turn();
    child
}

/// Counts the leaf positions reachable from `board` in exactly `depth` plies
pub fn perft(board: &mut Board, depth: usize) -> usize {
    if depth == 0 {
        return 1;
    }

    let stm = board.stm();
    let moves: Vec<Move> = board.legal_moves(stm).collect();

    if depth == 1 {
        return moves.len();
    }

    moves
        .into_iter()
        .map(|mv| perft(&mut child(board, mv), depth - 1))
        .sum()
}

/// Splits the perft count by root move, in enumeration order.
///
/// Depth 0 plays no root move, so the split is empty.
pub fn divide(board: &mut Board, depth: usize) -> Vec<(Move, usize)> {
    if depth == 0 {
        return Vec::new();
    }

    let stm = board.stm();
    let moves: Vec<Move> = board.legal_moves(stm).collect();

    moves
        .into_iter()
        .map(|mv| {
            let nodes = match depth {
                1 => 1,
                _ => perft(&mut child(board, mv), depth - 1),
            };
            (mv, nodes)
        })
        .collect()
}

pub fn perft_test(board: &mut Board, depth: usize) -> usize {
    use std::time::Instant;

    println!("=============== PERFT TEST ===============");
    println!("                 Depth: {depth}           ");
    println!("==========================================");

    let start = Instant::now();

    let split = divide(board, depth);
    for (move_, nodes) in split.iter() {
        println!("              {move_}: {nodes}");
    }
    let total_nodes: usize = match depth {
        0 => perft(board, 0),
        _ => split.iter().map(|(_, nodes)| nodes).sum(),
    };

    let time = start.elapsed().as_millis();

    println!("=========================================");
    println!("              Nodes: {total_nodes}       ");
    println!("              Time: {time}ms             ");
    println!("=========================================");

    total_nodes
}
