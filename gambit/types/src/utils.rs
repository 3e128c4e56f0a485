/// FEN string for the starting position of chess.
///
/// Castling and en passant are not supported, so those fields are always placeholders.
pub const FEN_STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 0";

/// Most squares a single piece can ever reach or defend.
///
/// A Queen in the center of an empty board sees 27 squares.
pub const MAX_PIECE_MOVES: usize = 27;

/// Deltas for the movement of the Rook.
pub const ROOK_DELTAS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

/// Deltas for the movement of the Bishop.
pub const BISHOP_DELTAS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// Deltas for the movement of the Knight.
pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (2, 1),
    (2, -1),
];

/// Deltas for the movement of the King.
pub const KING_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];
