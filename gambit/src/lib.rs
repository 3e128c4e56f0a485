pub use types::*;

/// The board: squares, pieces, turn order, and the move legality state machine.
///
/// You probably want to look here.
pub mod board;
/// Textual export (and import) of a board's piece placement.
pub mod fen;
/// Per-piece movement geometry: the possible, attacking, and protecting squares of every piece kind.
pub mod movegen;
/// Enums and structs for modeling move attempts and their outcomes.
pub mod moves;
/// Utility function for testing move generation.
pub mod perft;
/// Pieces placed on a board, and their identities.
pub mod piece;
/// A square viewed through the board that owns it.
pub mod tile;

pub use board::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use tile::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::board::*;
    pub use crate::movegen::*;
    pub use crate::moves::*;
    pub use crate::perft::*;
    pub use crate::piece::*;
    pub use crate::tile::*;
    pub use types::prelude::*;
}
