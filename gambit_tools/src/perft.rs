use anyhow::{Context, Result};
use clap::Parser;
use gambit::{print_perft, Board, FEN_STARTPOS};

/// Count the positions reachable from a board in a given number of moves.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of plies to search
    depth: usize,

    /// FEN string of the position to search from
    #[arg(short, long, default_value = FEN_STARTPOS)]
    fen: String,

    /// Print the node count after each root move
    #[arg(short, long)]
    split: bool,

    /// Print the board and timing information
    #[arg(short, long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let board = Board::from_fen(&args.fen).context(format!("Invalid FEN {:?}", args.fen))?;

    match (args.pretty, args.split) {
        (true, true) => print_perft::<true, true>(&board, args.depth),
        (true, false) => print_perft::<true, false>(&board, args.depth),
        (false, true) => print_perft::<false, true>(&board, args.depth),
        (false, false) => print_perft::<false, false>(&board, args.depth),
    }

    Ok(())
}
