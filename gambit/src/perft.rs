use std::time::Instant;

use super::{Board, Move};

/// Prints a perft at the specified depth.
///
/// If the generic parameter `SPLIT` is `true`, this will perform a `splitperft`,
/// printing all moves at the first level (`depth`) followed by how many nodes
/// were reached after each of those moves.
///
/// If the generic parameter `PRETTY` is `true`, additional info will be printed.
pub fn print_perft<const PRETTY: bool, const SPLIT: bool>(board: &Board, depth: usize) {
    if PRETTY {
        println!("Computing PERFT({depth}) of the following board:\n{board:?}\n");
    }

    let now = Instant::now();
    let total_nodes = if SPLIT {
        let mut total = 0;
        for (mv, nodes) in split_perft(board, depth) {
            println!("{:>8} {nodes:>width$}", mv.to_uci(), width = depth * 2 + 1);
            total += nodes;
        }
        println!(); // Empty line between last splitperft and total_nodes
        total
    } else {
        perft(board, depth)
    };
    let elapsed = now.elapsed();

    if PRETTY {
        let nps = total_nodes as f32 / elapsed.as_secs_f32();

        println!("Elapsed Time:          {elapsed:.1?}");
        println!("Total Nodes:           {total_nodes}");
        println!("Nodes / Sec:           {nps:.0}");
    } else {
        println!("{total_nodes}");
    }
}

/// Counts the nodes reached after each legal move at the root, in move generation order.
pub fn split_perft(board: &Board, depth: usize) -> Vec<(Move, u64)> {
    let mut results = Vec::new();
    if depth == 0 {
        return results;
    }

    for piece in board.pieces_of(board.side_to_move()) {
        for to in board.legal_moves(piece.id()) {
            let nodes = board
                .simulate_move(piece.id(), to)
                .map_or(0, |next| perft(&next, depth - 1));

            results.push((Move::new(piece.square(), to), nodes));
        }
    }

    results
}

/// Perform a perft at the specified depth, collecting only data about the number of possible states (nodes).
///
/// # Example
/// ```
/// # use gambit::{perft, Board};
/// let board = Board::standard();
/// assert_eq!(perft(&board, 1), 20);
/// assert_eq!(perft(&board, 2), 400);
/// ```
pub fn perft(board: &Board, depth: usize) -> u64 {
    // Recursion limit; return 1, since we're fathoming this node.
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for piece in board.pieces_of(board.side_to_move()) {
        let moves = board.legal_moves(piece.id());

        // Bulk counting; no need to recurse again just to apply a singular move and return 1.
        if depth == 1 {
            nodes += moves.len() as u64;
            continue;
        }

        for to in moves {
            if let Some(next) = board.simulate_move(piece.id(), to) {
                nodes += perft(&next, depth - 1);
            }
        }
    }

    nodes
}
