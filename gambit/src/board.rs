use std::fmt;

use anyhow::{bail, Context, Result};
use log::{debug, info, trace, warn};

use super::{
    Color, File, Move, MoveOutcome, Outcome, Piece, PieceId, PieceKind, Rank, Rejection, Square,
    SquareList, Tile,
};

/// Order of the pieces on each player's first rank, from the `a` file to the `h` file.
const BACK_RANK: [PieceKind; File::COUNT] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A chessboard: its 64 squares, the pieces standing on them, whose turn it is, and whether the game has ended.
///
/// Every move attempt goes through [`Board::try_move`], which only ever changes the board once the move has been
/// found legal. Legality is decided by replaying the move on a disposable clone of the board, so there is no undo.
///
/// Castling, en passant, and promotion are not supported.
pub struct Board {
    /// Every square of the board, in reading order (`a8` through `h1`).
    squares: [Square; Square::COUNT],

    /// The pieces currently on the board. Grows only during setup, shrinks on capture.
    pieces: Vec<Piece>,

    /// The [`Color`] of the current player.
    side_to_move: Color,

    /// Set once the side to move is found without a legal move. Never unset.
    checkmate: bool,

    /// Last identity handed out by this board.
    last_id: u32,
}

impl Board {
    /// Creates a new, empty [`Board`] with White to move.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Color};
    /// let board = Board::new();
    /// assert_eq!(board.side_to_move(), Color::White);
    /// assert_eq!(board.to_fen(), "8/8/8/8/8/8/8/8 w - - 0 0");
    /// ```
    pub fn new() -> Self {
        let mut squares = [Square::default(); Square::COUNT];
        for (slot, square) in squares.iter_mut().zip(Square::reading_order()) {
            *slot = square;
        }

        Self {
            squares,
            pieces: Vec::with_capacity(32),
            side_to_move: Color::White,
            checkmate: false,
            last_id: 0,
        }
    }

    /// Creates a [`Board`] with all 32 pieces on their standard starting squares, White to move.
    pub fn standard() -> Self {
        let mut board = Self::new();

        for color in [Color::Black, Color::White] {
            for (file, kind) in File::iter().zip(BACK_RANK) {
                board.insert(kind, color, Square::new(file, Rank::first(color)));
            }
            for file in File::iter() {
                board.insert(PieceKind::Pawn, color, Square::new(file, Rank::second(color)));
            }
        }

        board
    }

    /// Places a new piece on the board, returning its identity.
    ///
    /// Fails if `square` is already occupied.
    pub fn add_piece(&mut self, kind: PieceKind, color: Color, square: Square) -> Result<PieceId> {
        if let Some(occupant) = self.piece_at(square) {
            bail!("Cannot place a {} {} on {square}: it holds {occupant:?}", color.name(), kind.name());
        }

        if kind == PieceKind::King && self.king(color).is_some() {
            warn!("Placing a second {} king on {square}; check detection only sees the first", color.name());
        }

        Ok(self.insert(kind, color, square))
    }

    fn insert(&mut self, kind: PieceKind, color: Color, square: Square) -> PieceId {
        let id = self.allocate_id();
        self.pieces.push(Piece::new(id, kind, color, square));
        id
    }

    fn allocate_id(&mut self) -> PieceId {
        self.last_id += 1;
        PieceId(self.last_id)
    }

    /// Fetches the piece with the given identity, if it is still on the board.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.id() == id)
    }

    /// All pieces on the board, in the order they were added.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// All pieces of the given [`Color`].
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |piece| piece.color() == color)
    }

    /// Fetches the piece standing on `square`, if any.
    ///
    /// This is a scan over the piece list, so it always reflects the current state of the board.
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.square() == square)
    }

    /// Returns `true` if a piece stands on `square`.
    pub fn has(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    /// Returns `true` if a King (of either color) stands on `square`.
    pub fn has_king_at(&self, square: Square) -> bool {
        self.piece_at(square).is_some_and(Piece::is_king)
    }

    /// Fetches the King of the given [`Color`], if there is one.
    pub fn king(&self, color: Color) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|piece| piece.is_king() && piece.color() == color)
    }

    /// Looks up a square by its coordinate, such as `"e4"`.
    ///
    /// Fails if `id` is not one of the 64 squares of the board.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Color};
    /// let board = Board::standard();
    /// let e2 = board.square("e2").unwrap();
    /// assert_eq!(e2.occupant().unwrap().color(), Color::White);
    /// assert!(board.square("e9").is_err());
    /// ```
    pub fn square(&self, id: &str) -> Result<Tile<'_>> {
        let square = Square::from_uci(id).context(format!("Square not found: {id:?}"))?;
        Ok(self.tile(square))
    }

    /// Views `square` through this board.
    pub const fn tile(&self, square: Square) -> Tile<'_> {
        Tile::new(self, square)
    }

    /// All 64 squares of this board, in reading order (`a8` through `h1`).
    pub fn squares(&self) -> impl Iterator<Item = Tile<'_>> + '_ {
        self.squares.iter().map(|&square| self.tile(square))
    }

    /// Returns the current player as a [`Color`].
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Sets the current player.
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// Toggles the current player from White to Black (or vice versa).
    pub fn change_turn(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Returns `true` once the game has ended because the side to move had no legal move.
    pub const fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    /// How the game ended, if it has.
    ///
    /// The checkmate flag is raised whenever the side to move has no legal move. If that side is in check, it is
    /// checkmate. Otherwise it is stalemate.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.checkmate {
            return None;
        }

        let stuck = self.side_to_move;
        Some(if self.is_in_check(stuck) {
            Outcome::Checkmate {
                winner: stuck.opponent(),
            }
        } else {
            Outcome::Stalemate
        })
    }

    /// Every square attacked by the pieces of `color`. May contain duplicates.
    pub fn attacked_squares(&self, color: Color) -> Vec<Square> {
        self.pieces_of(color)
            .flat_map(|piece| piece.attacking_squares(self))
            .collect()
    }

    /// Every square protected by the pieces of `color`. May contain duplicates.
    pub fn protected_squares(&self, color: Color) -> Vec<Square> {
        self.pieces_of(color)
            .flat_map(|piece| piece.protecting_squares(self))
            .collect()
    }

    /// Returns `true` if the King of `color` stands on a square attacked by the opponent.
    ///
    /// A side without a King is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        let Some(king) = self.king(color) else {
            return false;
        };

        self.pieces_of(color.opponent())
            .any(|piece| piece.attacking_squares(self).contains(&king.square()))
    }

    /// Returns `true` if the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.is_in_check(self.side_to_move)
    }

    /// Screens a King's destination against the opponent's attacked and protected squares.
    fn screen_king_target(
        to: Square,
        (attacked, protected): &(Vec<Square>, Vec<Square>),
    ) -> Result<(), Rejection> {
        if attacked.contains(&to) {
            return Err(Rejection::IntoCheck);
        }
        if protected.contains(&to) {
            return Err(Rejection::ProtectedPiece);
        }

        Ok(())
    }

    /// The opponent's attacked and protected squares, if `piece` is a King.
    fn king_danger(&self, piece: &Piece) -> Option<(Vec<Square>, Vec<Square>)> {
        piece.is_king().then(|| {
            let opponent = piece.color().opponent();
            (
                self.attacked_squares(opponent),
                self.protected_squares(opponent),
            )
        })
    }

    /// The possible moves of `piece`, minus King captures and, for Kings, any square the opponent attacks or
    /// protects.
    ///
    /// This does not check whether each move would leave the mover's King in check. See [`Board::legal_moves`].
    pub fn candidate_moves(&self, piece: &Piece) -> SquareList {
        let king_danger = self.king_danger(piece);

        piece
            .possible_moves(self)
            .into_iter()
            .filter(|&to| !self.has_king_at(to))
            .filter(|&to| {
                king_danger
                    .as_ref()
                    .map_or(true, |danger| Self::screen_king_target(to, danger).is_ok())
            })
            .collect()
    }

    /// Every square the piece `id` may legally move to right now.
    ///
    /// Empty if the piece is not on the board, if it is not its side's turn, or if the game is over.
    pub fn legal_moves(&self, id: PieceId) -> SquareList {
        let Some(piece) = self.piece(id) else {
            return SquareList::new();
        };

        if self.checkmate || piece.color() != self.side_to_move {
            return SquareList::new();
        }

        self.candidate_moves(piece)
            .into_iter()
            .filter(|&to| !self.leaves_king_in_check(piece, to))
            .collect()
    }

    /// Every legal move for the side to move.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        self.pieces_of(self.side_to_move)
            .flat_map(|piece| {
                self.legal_moves(piece.id())
                    .into_iter()
                    .map(|to| Move::new(piece.square(), to))
            })
            .collect()
    }

    /// Decides whether the piece `id` may move to `to`.
    ///
    /// If `Ok(())`, the move is legal.
    /// If `Err(reason)`, then `reason` explains the first rule the move broke.
    ///
    /// Nothing on this board is changed. The final check is made on a clone.
    pub fn check_legality_of(&self, id: PieceId, to: Square) -> Result<(), Rejection> {
        if self.checkmate {
            return Err(Rejection::GameOver);
        }

        let piece = self.piece(id).ok_or(Rejection::UnknownPiece)?;

        if piece.color() != self.side_to_move {
            return Err(Rejection::NotYourTurn);
        }

        // Kings are never captured, even where the mover could otherwise reach
        if self.has_king_at(to) {
            return Err(Rejection::KingCapture);
        }

        if !piece.possible_moves(self).contains(&to) {
            return Err(Rejection::Unreachable);
        }

        if let Some(danger) = self.king_danger(piece) {
            Self::screen_king_target(to, &danger)?;
        }

        // Replay the move on a clone and see whether our own King ends up attacked
        if self.leaves_king_in_check(piece, to) {
            return Err(Rejection::LeavesKingInCheck);
        }

        Ok(())
    }

    /// Attempts to move the piece `id` to `to`.
    ///
    /// If the move is legal, any piece on `to` is captured, the mover is relocated, the turn passes to the opponent,
    /// and the opponent is checked for checkmate. Otherwise nothing changes and the reason is returned.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Color, PieceKind, Square, Rejection};
    /// let mut board = Board::new();
    /// let queen = board.add_piece(PieceKind::Queen, Color::White, Square::E1).unwrap();
    /// board.add_piece(PieceKind::King, Color::Black, Square::E8).unwrap();
    ///
    /// let outcome = board.try_move(queen, Square::E8);
    /// assert_eq!(outcome.rejection(), Some(Rejection::KingCapture));
    /// assert_eq!(board.piece(queen).unwrap().square(), Square::E1);
    ///
    /// assert!(board.try_move(queen, Square::E7).is_committed());
    /// assert_eq!(board.side_to_move(), Color::Black);
    /// ```
    pub fn try_move(&mut self, id: PieceId, to: Square) -> MoveOutcome {
        if let Err(reason) = self.check_legality_of(id, to) {
            debug!("Rejected {id} -> {to}: {reason}");
            return MoveOutcome::Rejected(reason);
        }

        let captured = self.move_or_capture(id, to);
        debug!("Committed {id} -> {to}, capturing {captured:?}");

        let game_over = if self.verify_checkmate(self.side_to_move) {
            self.outcome()
        } else {
            None
        };

        MoveOutcome::Committed {
            captured,
            game_over,
        }
    }

    /// Attempts the move written in long algebraic notation (e.g. `e2e4`), moving whatever stands on its source square.
    ///
    /// Fails if the move cannot be parsed or if its source square is empty.
    pub fn try_move_uci(&mut self, uci: &str) -> Result<MoveOutcome> {
        let mv = Move::from_uci(uci)?;
        let Some(piece) = self.piece_at(mv.from) else {
            bail!("No piece on {} to move", mv.from);
        };

        Ok(self.try_move(piece.id(), mv.to))
    }

    /// Captures whatever stands on `to`, relocates `id` there, and passes the turn. No legality checks.
    ///
    /// Returns the captured piece, if any.
    fn move_or_capture(&mut self, id: PieceId, to: Square) -> Option<Piece> {
        let victim = self
            .pieces
            .iter()
            .position(|piece| piece.square() == to && piece.id() != id);
        let captured = victim.map(|index| self.pieces.remove(index));

        if let Some(piece) = self.pieces.iter_mut().find(|piece| piece.id() == id) {
            piece.relocate(to);
        }

        self.change_turn();
        captured
    }

    /// Returns a clone of this board on which the piece `id` has been moved to `to` (capturing, if needed) and the
    /// turn has passed. No legality checks are made, and this board is left untouched.
    ///
    /// Returns `None` if `id` is not on this board.
    pub fn simulate_move(&self, id: PieceId, to: Square) -> Option<Self> {
        let mut board = self.clone();
        let mirror = board.pieces.iter().find(|piece| piece.origin() == id)?.id();

        trace!("Simulating {id} -> {to} as {mirror}");
        board.move_or_capture(mirror, to);
        Some(board)
    }

    /// Returns `true` if moving `piece` to `to` would leave its own King in check.
    fn leaves_king_in_check(&self, piece: &Piece, to: Square) -> bool {
        self.simulate_move(piece.id(), to)
            .is_some_and(|board| board.is_in_check(piece.color()))
    }

    /// Checks whether `color` has any move that leaves its King out of check. If not, the game is over.
    ///
    /// Once the checkmate flag is raised it stays raised. A side without a King is never checkmated.
    pub fn verify_checkmate(&mut self, color: Color) -> bool {
        if self.king(color).is_none() {
            return false;
        }

        let can_escape = self.pieces_of(color).any(|piece| {
            piece
                .possible_moves(self)
                .into_iter()
                .any(|to| !self.leaves_king_in_check(piece, to))
        });

        if can_escape {
            return false;
        }

        self.checkmate = true;
        if let Some(outcome) = self.outcome() {
            info!("Game over: {outcome}");
        }

        true
    }
}

impl Clone for Board {
    /// Deep-copies the board.
    ///
    /// Pieces on the clone get fresh identities from the clone's own allocator. Each one's [`Piece::origin`] is the
    /// identity of the piece it was copied from.
    fn clone(&self) -> Self {
        let mut board = Self {
            squares: self.squares,
            pieces: Vec::with_capacity(self.pieces.len()),
            side_to_move: self.side_to_move,
            checkmate: self.checkmate,
            last_id: 0,
        };

        for piece in &self.pieces {
            let id = board.allocate_id();
            board.pieces.push(piece.cloned_as(id));
        }

        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Allocate just enough capacity
        let mut board = String::with_capacity(198);

        for rank in Rank::iter().rev() {
            board += &format!("{rank}| ");

            for file in File::iter() {
                let occupant = self
                    .piece_at(Square::new(file, rank))
                    .map_or('.', Piece::char);

                board += &format!("{occupant} ");
            }

            board += "\n"
        }
        board += " +";
        for _ in File::iter() {
            board += "--";
        }
        board += "\n   ";
        for file in File::iter() {
            board += &format!("{file} ");
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;
        writeln!(f, "FEN: {}", self.to_fen())?;
        write!(f, "Checkmate: {}", self.checkmate)
    }
}
