use std::fmt;

use super::{Board, Color, Piece, Square};

/// A square on a particular [`Board`].
///
/// The identity and color of a tile never change. Its occupant is looked up against the board's piece list every
/// time it is asked for, so it always reflects the live state of the board.
#[derive(Clone, Copy)]
pub struct Tile<'a> {
    board: &'a Board,
    square: Square,
}

impl<'a> Tile<'a> {
    pub(crate) const fn new(board: &'a Board, square: Square) -> Self {
        Self { board, square }
    }

    /// The coordinate of this tile, such as `e4`.
    pub const fn id(&self) -> Square {
        self.square
    }

    /// The fixed color of this tile.
    pub const fn color(&self) -> Color {
        self.square.color()
    }

    /// The piece currently standing on this tile, if any.
    pub fn occupant(&self) -> Option<&'a Piece> {
        self.board.piece_at(self.square)
    }

    pub fn is_empty(&self) -> bool {
        self.occupant().is_none()
    }
}

impl PartialEq for Tile<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.board, other.board) && self.square == other.square
    }
}

impl fmt::Display for Tile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.square)
    }
}

impl fmt::Debug for Tile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.occupant() {
            Some(piece) => write!(f, "{} ({piece:?})", self.square),
            None => write!(f, "{} (empty {} square)", self.square, self.color().name()),
        }
    }
}
