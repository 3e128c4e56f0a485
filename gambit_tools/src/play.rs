use std::io::{self, BufRead};

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use gambit::prelude::*;
use log::warn;

/// Play a game of chess on the terminal by typing moves such as `e2e4`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// FEN string of the starting position
    #[arg(short, long, default_value = FEN_STARTPOS)]
    fen: String,

    /// Draw the board from Black's side
    #[arg(long)]
    flip: bool,
}

/// Commands understood by the prompt.
#[derive(Debug)]
enum Command {
    Help,
    Show,
    Fen,
    Moves(Option<Square>),
    Move(Move),
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut board = Board::from_fen(&args.fen).context("Failed to set up the starting position")?;
    println!("{}", render(&board, args.flip));
    prompt(&board);

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read line from stdin")?;
        let input = line.trim();

        // Ignore empty lines
        if input.is_empty() {
            continue;
        }

        let cmd = match parse_command(input) {
            Ok(cmd) => cmd,
            Err(err) => {
                eprintln!("{}", err.to_string().red());
                continue;
            }
        };

        match cmd {
            Command::Help => help(),
            Command::Show => println!("{}", render(&board, args.flip)),
            Command::Fen => println!("{}", board.to_fen()),
            Command::Moves(from) => moves(&board, from),
            Command::Move(mv) => make_move(&mut board, mv, args.flip),
            Command::Quit => break,
        }

        prompt(&board);
    }

    Ok(())
}

/// Parses an input string and yields a [`Command`], if possible.
fn parse_command(input: &str) -> Result<Command> {
    let (cmd, rest) = input.split_once(' ').unwrap_or((input, ""));

    match cmd {
        "help" => Ok(Command::Help),
        "show" => Ok(Command::Show),
        "fen" => Ok(Command::Fen),
        "moves" => {
            let rest = rest.trim();
            if rest.is_empty() {
                Ok(Command::Moves(None))
            } else {
                Ok(Command::Moves(Some(rest.parse()?)))
            }
        }
        "quit" | "exit" => Ok(Command::Quit),
        _ => match Move::from_uci(input) {
            Ok(mv) => Ok(Command::Move(mv)),
            Err(_) => bail!("Unknown command {input:?}. Type `help` for a list of commands"),
        },
    }
}

fn help() {
    println!("{}", "Commands:".bold());
    println!("  <from><to>       Move the piece on <from> to <to>, e.g. `e2e4`");
    println!("  moves [square]   List the legal moves of the side to move (or of one piece)");
    println!("  show             Draw the board");
    println!("  fen              Print the FEN of the board");
    println!("  quit             Exit");
}

fn prompt(board: &Board) {
    if board.is_checkmate() {
        return;
    }

    let check = if board.in_check() { " (in check)" } else { "" };
    println!("{} to move{check}:", board.side_to_move().name());
}

fn moves(board: &Board, from: Option<Square>) {
    let moves: Vec<Move> = match from {
        Some(square) => {
            let Some(piece) = board.piece_at(square) else {
                eprintln!("{}", format!("No piece on {square}").red());
                return;
            };

            board
                .legal_moves(piece.id())
                .into_iter()
                .map(|to| Move::new(square, to))
                .collect()
        }
        None => board.all_legal_moves(),
    };

    let moves = moves.iter().map(Move::to_uci).collect::<Vec<_>>();
    println!("{} legal move(s): {}", moves.len(), moves.join(" "));
}

fn make_move(board: &mut Board, mv: Move, flip: bool) {
    let Some(piece) = board.piece_at(mv.from).copied() else {
        eprintln!("{}", format!("No piece on {} to move", mv.from).red());
        return;
    };

    match board.try_move(piece.id(), mv.to) {
        MoveOutcome::Rejected(reason) => {
            eprintln!("{}", format!("Illegal move {mv}: {reason}").red());
        }
        MoveOutcome::Committed {
            captured,
            game_over,
        } => {
            println!("{}", render(board, flip));
            if let Some(captured) = captured {
                println!("{} captured {}", piece.kind().name(), captured.kind().name());
            }
            if let Some(outcome) = game_over {
                println!("{}", format!("Game over: {outcome}").green().bold());
                warn!("No further moves will be accepted");
            }
        }
    }
}

/// Draws the board with rank 8 at the top, or rank 1 at the top if `flip` is set.
fn render(board: &Board, flip: bool) -> String {
    let ranks: Vec<Rank> = if flip {
        Rank::iter().collect()
    } else {
        Rank::iter().rev().collect()
    };
    let files: Vec<File> = if flip {
        File::iter().rev().collect()
    } else {
        File::iter().collect()
    };

    let mut out = String::with_capacity(512);
    for &rank in &ranks {
        out += &format!("{rank}| ");
        for &file in &files {
            let tile = board.tile(Square::new(file, rank));
            let glyph = match tile.occupant() {
                Some(piece) if piece.color().is_white() => piece.char().to_string().bold(),
                Some(piece) => piece.char().to_string().cyan(),
                None if tile.color().is_white() => ".".normal(),
                None => ".".dimmed(),
            };
            out += &format!("{glyph} ");
        }
        out += "\n";
    }

    out += " +";
    out += &"--".repeat(files.len());
    out += "\n   ";
    for file in files {
        out += &format!("{file} ");
    }

    out
}
