use arrayvec::ArrayVec;

use super::{
    Board, Color, Piece, PieceKind, Rank, Square, BISHOP_DELTAS, KING_DELTAS, KNIGHT_DELTAS,
    MAX_PIECE_MOVES, ROOK_DELTAS,
};

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_PIECE_MOVES`] squares.
pub type SquareList = ArrayVec<Square, MAX_PIECE_MOVES>;

/// Which occupied squares a scan may land on before it stops.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Scan {
    /// Land on (and stop at) enemy pieces. Stop short of friendly pieces.
    Capture,
    /// Land on (and stop at) friendly pieces. Stop short of enemy pieces.
    Defend,
}

impl Scan {
    /// Returns `true` if a piece of `color` scanning this way may land on a piece of `occupant`'s color.
    const fn lands_on(self, color: Color, occupant: Color) -> bool {
        let same = color as u8 == occupant as u8;
        match self {
            Self::Capture => !same,
            Self::Defend => same,
        }
    }
}

/// Computes the pseudo-legal destinations of `piece` on `board`.
///
/// Blocking pieces and friendly occupancy are respected, but whether the move would leave the mover's own King in
/// check is not considered. A square holding a King (of either color) is never included.
///
/// # Example
/// ```
/// # use gambit::{Board, Color, PieceKind, Square};
/// let mut board = Board::new();
/// let pawn = board.add_piece(PieceKind::Pawn, Color::White, Square::E2).unwrap();
/// let moves = board.piece(pawn).unwrap().possible_moves(&board);
/// assert_eq!(moves.as_slice(), &[Square::E3, Square::E4]);
/// ```
pub fn possible_moves(piece: &Piece, board: &Board) -> SquareList {
    match piece.kind() {
        PieceKind::Pawn => pawn_moves(piece, board),
        PieceKind::Queen => as_bishop_and_rook(piece, board, possible_moves),
        _ => attacking_squares(piece, board)
            .into_iter()
            .filter(|&square| !board.has_king_at(square))
            .collect(),
    }
}

/// Computes every square `piece` threatens on `board`.
///
/// For everything but Pawns, this is the piece's movement geometry, stopping at (and including) the first enemy
/// piece along each ray. Pawns threaten their two forward diagonals, whether or not anything stands there.
pub fn attacking_squares(piece: &Piece, board: &Board) -> SquareList {
    match piece.kind() {
        PieceKind::Pawn => pawn_attacks(piece.square(), piece.color()),
        PieceKind::Knight => leap(piece, board, &KNIGHT_DELTAS, Scan::Capture),
        PieceKind::Bishop => slide(piece, board, &BISHOP_DELTAS, Scan::Capture),
        PieceKind::Rook => slide(piece, board, &ROOK_DELTAS, Scan::Capture),
        PieceKind::Queen => as_bishop_and_rook(piece, board, attacking_squares),
        PieceKind::King => leap(piece, board, &KING_DELTAS, Scan::Capture),
    }
}

/// Computes the squares `piece` defends on `board`.
///
/// Sliders scan through empty squares (which are collected) up to and including the first friendly piece on each
/// ray, and stop short of enemy pieces. Knights and Kings defend every empty or friendly square they reach.
/// Pawns defend their two forward diagonals.
pub fn protecting_squares(piece: &Piece, board: &Board) -> SquareList {
    match piece.kind() {
        PieceKind::Pawn => pawn_attacks(piece.square(), piece.color()),
        PieceKind::Knight => leap(piece, board, &KNIGHT_DELTAS, Scan::Defend),
        PieceKind::Bishop => slide(piece, board, &BISHOP_DELTAS, Scan::Defend),
        PieceKind::Rook => slide(piece, board, &ROOK_DELTAS, Scan::Defend),
        PieceKind::Queen => as_bishop_and_rook(piece, board, protecting_squares),
        PieceKind::King => leap(piece, board, &KING_DELTAS, Scan::Defend),
    }
}

/// The two diagonal squares in front of a pawn of `color` on `square`.
///
/// # Example
/// ```
/// # use gambit::{pawn_attacks, Color, Square};
/// assert_eq!(pawn_attacks(Square::E4, Color::White).as_slice(), &[Square::D5, Square::F5]);
/// assert_eq!(pawn_attacks(Square::A7, Color::Black).as_slice(), &[Square::B6]);
/// ```
pub fn pawn_attacks(square: Square, color: Color) -> SquareList {
    [-1, 1]
        .into_iter()
        .filter_map(|file_delta| square.offset(file_delta, color.forward()))
        .collect()
}

fn pawn_moves(pawn: &Piece, board: &Board) -> SquareList {
    let mut moves = SquareList::new();
    let (from, color) = (pawn.square(), pawn.color());

    // Pushes only land on empty squares, and the double push needs the first square clear too
    if let Some(ahead) = from.forward_by(color, 1).filter(|&to| !board.has(to)) {
        moves.push(ahead);

        if from.rank() == Rank::second(color) {
            if let Some(twice) = from.forward_by(color, 2).filter(|&to| !board.has(to)) {
                moves.push(twice);
            }
        }
    }

    // Diagonals only land on enemy pieces
    for to in pawn_attacks(from, color) {
        if board
            .piece_at(to)
            .is_some_and(|other| pawn.is_enemy_of(other) && !other.is_king())
        {
            moves.push(to);
        }
    }

    moves
}

/// Single-step movement (Knight, King): each destination is checked independently.
fn leap(piece: &Piece, board: &Board, deltas: &[(i8, i8)], scan: Scan) -> SquareList {
    deltas
        .iter()
        .filter_map(|&(df, dr)| piece.square().offset(df, dr))
        .filter(|&to| {
            board
                .piece_at(to)
                .map_or(true, |other| scan.lands_on(piece.color(), other.color()))
        })
        .collect()
}

/// Ray movement (Bishop, Rook): walk each ray until the edge of the board or the first occupied square.
fn slide(piece: &Piece, board: &Board, deltas: &[(i8, i8)], scan: Scan) -> SquareList {
    let mut squares = SquareList::new();

    for &(df, dr) in deltas {
        let mut current = piece.square();
        while let Some(next) = current.offset(df, dr) {
            if let Some(other) = board.piece_at(next) {
                if scan.lands_on(piece.color(), other.color()) {
                    squares.push(next);
                }
                break;
            }

            squares.push(next);
            current = next;
        }
    }

    squares
}

/// A Queen moves exactly like a Bishop and a Rook standing on her square.
fn as_bishop_and_rook(
    queen: &Piece,
    board: &Board,
    query: fn(&Piece, &Board) -> SquareList,
) -> SquareList {
    let mut squares = query(&queen.as_kind(PieceKind::Bishop), board);
    squares.extend(query(&queen.as_kind(PieceKind::Rook), board));
    squares
}

#[cfg(test)]
mod test {
    use super::*;

    /// Checks if `squares` and `expected` contain all the same elements, ignoring order
    fn lists_match(squares: &[Square], expected: &[&str]) {
        assert_eq!(
            squares.len(),
            expected.len(),
            "\nGot:      {squares:?}\nExpected: {expected:?}"
        );

        for square in squares {
            assert!(
                expected.iter().any(|e| square == e),
                "{square} not found in {expected:?}"
            );
        }
    }

    fn board_with(pieces: &[(PieceKind, Color, Square)]) -> Board {
        let mut board = Board::new();
        for &(kind, color, square) in pieces {
            board.add_piece(kind, color, square).unwrap();
        }
        board
    }

    fn piece_on(board: &Board, square: Square) -> Piece {
        *board.piece_at(square).unwrap()
    }

    #[test]
    fn rook_blockers() {
        // Friendly blocker on d6, enemy blocker on f4
        let board = board_with(&[
            (PieceKind::Rook, Color::White, Square::D4),
            (PieceKind::Pawn, Color::White, Square::D6),
            (PieceKind::Knight, Color::Black, Square::F4),
        ]);
        let rook = piece_on(&board, Square::D4);

        lists_match(
            &rook.possible_moves(&board),
            &["d5", "d3", "d2", "d1", "a4", "b4", "c4", "e4", "f4"],
        );
        lists_match(
            &rook.protecting_squares(&board),
            &["d5", "d6", "d3", "d2", "d1", "a4", "b4", "c4", "e4"],
        );
    }

    #[test]
    fn bishop_stops_at_first_piece() {
        let board = board_with(&[
            (PieceKind::Bishop, Color::Black, Square::C1),
            (PieceKind::Pawn, Color::White, Square::E3),
            (PieceKind::Pawn, Color::Black, Square::B2),
        ]);
        let bishop = piece_on(&board, Square::C1);

        lists_match(&bishop.possible_moves(&board), &["d2", "e3"]);
        lists_match(&bishop.protecting_squares(&board), &["d2", "b2"]);
    }

    #[test]
    fn queen_is_bishop_plus_rook() {
        let board = board_with(&[(PieceKind::Queen, Color::White, Square::D4)]);
        let queen = piece_on(&board, Square::D4);
        let bishop = queen.as_kind(PieceKind::Bishop).possible_moves(&board);
        let rook = queen.as_kind(PieceKind::Rook).possible_moves(&board);

        let moves = queen.possible_moves(&board);
        assert_eq!(moves.len(), MAX_PIECE_MOVES);
        assert_eq!(&moves[..bishop.len()], bishop.as_slice());
        assert_eq!(&moves[bishop.len()..], rook.as_slice());
    }

    #[test]
    fn knight_jumps_over_pieces() {
        let board = board_with(&[
            (PieceKind::Knight, Color::White, Square::B1),
            (PieceKind::Pawn, Color::White, Square::B2),
            (PieceKind::Pawn, Color::White, Square::C2),
            (PieceKind::Pawn, Color::White, Square::D2),
            (PieceKind::Pawn, Color::Black, Square::A3),
        ]);
        let knight = piece_on(&board, Square::B1);

        lists_match(&knight.possible_moves(&board), &["a3", "c3"]);
        lists_match(&knight.protecting_squares(&board), &["c3", "d2"]);
    }

    #[test]
    fn king_steps_one_square() {
        let board = board_with(&[
            (PieceKind::King, Color::White, Square::A1),
            (PieceKind::Rook, Color::White, Square::A2),
        ]);
        let king = piece_on(&board, Square::A1);

        lists_match(&king.possible_moves(&board), &["b1", "b2"]);
        lists_match(&king.protecting_squares(&board), &["a2", "b1", "b2"]);
    }

    #[test]
    fn pawn_pushes_and_captures() {
        let board = board_with(&[
            (PieceKind::Pawn, Color::White, Square::E2),
            (PieceKind::Pawn, Color::Black, Square::D3),
            (PieceKind::Pawn, Color::White, Square::F3),
        ]);
        let pawn = piece_on(&board, Square::E2);

        lists_match(&pawn.possible_moves(&board), &["e3", "e4", "d3"]);
        lists_match(&pawn.attacking_squares(&board), &["d3", "f3"]);
        lists_match(&pawn.protecting_squares(&board), &["d3", "f3"]);
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let board = board_with(&[
            (PieceKind::Pawn, Color::Black, Square::C7),
            (PieceKind::Knight, Color::White, Square::C6),
        ]);
        let pawn = piece_on(&board, Square::C7);

        assert!(pawn.possible_moves(&board).is_empty());
        lists_match(&pawn.attacking_squares(&board), &["b6", "d6"]);
    }

    #[test]
    fn pawn_double_push_only_from_start() {
        let board = board_with(&[(PieceKind::Pawn, Color::Black, Square::H6)]);
        let pawn = piece_on(&board, Square::H6);

        lists_match(&pawn.possible_moves(&board), &["h5"]);
    }

    #[test]
    fn kings_are_attacked_but_never_moved_onto() {
        let board = board_with(&[
            (PieceKind::Rook, Color::White, Square::A1),
            (PieceKind::King, Color::Black, Square::A5),
            (PieceKind::Knight, Color::White, Square::B3),
            (PieceKind::Pawn, Color::White, Square::B4),
        ]);

        let rook = piece_on(&board, Square::A1);
        assert!(rook.attacking_squares(&board).contains(&Square::A5));
        assert!(!rook.possible_moves(&board).contains(&Square::A5));

        let knight = piece_on(&board, Square::B3);
        assert!(knight.attacking_squares(&board).contains(&Square::A5));
        assert!(!knight.possible_moves(&board).contains(&Square::A5));

        let pawn = piece_on(&board, Square::B4);
        assert!(pawn.attacking_squares(&board).contains(&Square::A5));
        assert!(!pawn.possible_moves(&board).contains(&Square::A5));
    }
}
