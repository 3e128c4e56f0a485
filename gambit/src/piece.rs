use std::fmt;

use super::{movegen, Board, Color, PieceKind, Square, SquareList};

/// Identity of a [`Piece`] within the [`Board`] that allocated it.
///
/// Identities are handed out by a board when pieces are added, and are never reused on that board.
/// A cloned board allocates a fresh set of identities; see [`Piece::origin`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct PieceId(pub(crate) u32);

impl PieceId {
    /// Fetches the raw value of this identity.
    pub const fn inner(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A chess piece standing on a [`Board`].
///
/// A piece knows its kind, its color, and the square it currently occupies.
/// It holds no reference to its board: every movement query is answered against a board passed in explicitly.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    id: PieceId,
    origin: PieceId,
    kind: PieceKind,
    color: Color,
    square: Square,
}

impl Piece {
    pub(crate) const fn new(id: PieceId, kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            id,
            origin: id,
            kind,
            color,
            square,
        }
    }

    /// The copy of this piece that lives on a cloned board under the identity `id`.
    pub(crate) const fn cloned_as(&self, id: PieceId) -> Self {
        Self {
            id,
            origin: self.id,
            ..*self
        }
    }

    /// A stand-in piece of a different kind on the same square, used to compose the Queen from a Bishop and a Rook.
    pub(crate) const fn as_kind(&self, kind: PieceKind) -> Self {
        Self { kind, ..*self }
    }

    /// The identity of this piece on its board.
    pub const fn id(&self) -> PieceId {
        self.id
    }

    /// The identity of the piece this one was cloned from.
    ///
    /// For a piece that was added directly to its board, this is the same as [`Piece::id`].
    pub const fn origin(&self) -> PieceId {
        self.origin
    }

    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    /// The square this piece currently stands on.
    pub const fn square(&self) -> Square {
        self.square
    }

    /// Relocates this piece. No other piece is affected.
    pub(crate) fn relocate(&mut self, square: Square) {
        self.square = square;
    }

    /// Returns `true` if this piece is a King.
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Returns `true` if `other` belongs to the opposing side.
    pub fn is_enemy_of(&self, other: &Self) -> bool {
        self.color != other.color
    }

    /// The FEN character of this piece: uppercase for White, lowercase for Black.
    pub const fn char(&self) -> char {
        self.kind.fen_char(self.color)
    }

    /// Alias for [`movegen::possible_moves`].
    pub fn possible_moves(&self, board: &Board) -> SquareList {
        movegen::possible_moves(self, board)
    }

    /// Alias for [`movegen::attacking_squares`].
    pub fn attacking_squares(&self, board: &Board) -> SquareList {
        movegen::attacking_squares(self, board)
    }

    /// Alias for [`movegen::protecting_squares`].
    pub fn protecting_squares(&self, board: &Board) -> SquareList {
        movegen::protecting_squares(self, board)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} on {} ({}, origin {})",
            self.color.name(),
            self.kind.name(),
            self.square,
            self.id,
            self.origin
        )
    }
}
