/// Enums for piece kinds and colors.
pub mod piece;
/// Squares on a chessboard (including files and ranks).
pub mod square;
/// Misc utility constants, such as movement deltas and FEN strings.
pub mod utils;

pub use piece::*;
pub use square::*;
pub use utils::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::piece::*;
    pub use crate::square::*;
    pub use crate::utils::*;
}
