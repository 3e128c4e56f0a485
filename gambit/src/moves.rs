use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

use super::{Color, Piece, Square};

/// A move intent: take whatever stands on `from` and bring it to `to`.
///
/// This is the shape in which input collaborators hand moves to a [`crate::Board`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Parses a move in long algebraic notation, such as `e2e4`.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Move, Square};
    /// let mv = Move::from_uci("g1f3").unwrap();
    /// assert_eq!(mv, Move::new(Square::G1, Square::F3));
    /// assert!(Move::from_uci("g1").is_err());
    /// assert!(Move::from_uci("g1f9").is_err());
    /// ```
    pub fn from_uci(uci: &str) -> Result<Self> {
        let uci = uci.trim();
        if uci.len() != 4 || !uci.is_ascii() {
            bail!("Move strings must be 4 characters in length, such as `e2e4`. Got {uci:?}");
        }

        let from = Square::from_uci(&uci[0..2])?;
        let to = Square::from_uci(&uci[2..4])?;

        Ok(Self::new(from, to))
    }

    pub fn to_uci(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

/// Why a move attempt was refused.
///
/// A rejected attempt is a normal outcome, not an error: the board is left exactly as it was.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Rejection {
    /// The game has already ended in checkmate.
    GameOver,
    /// No piece with the given identity is on the board.
    UnknownPiece,
    /// The piece does not belong to the side to move.
    NotYourTurn,
    /// The destination holds a King. Kings are never captured.
    KingCapture,
    /// The piece's movement cannot reach the destination.
    Unreachable,
    /// A King may not step onto a square the opponent attacks.
    IntoCheck,
    /// A King may not capture a piece the opponent defends.
    ProtectedPiece,
    /// The move would leave the mover's own King in check.
    LeavesKingInCheck,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::GameOver => "the game is over",
            Self::UnknownPiece => "no such piece on this board",
            Self::NotYourTurn => "it is not that side's turn",
            Self::KingCapture => "kings cannot be captured",
            Self::Unreachable => "the piece cannot reach that square",
            Self::IntoCheck => "the king cannot move into check",
            Self::ProtectedPiece => "the king cannot capture a protected piece",
            Self::LeavesKingInCheck => "the move leaves the king in check",
        };

        write!(f, "{reason}")
    }
}

/// How a finished game ended.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Outcome {
    /// The side to move is in check and has no legal moves.
    Checkmate { winner: Color },
    /// The side to move is not in check, but has no legal moves.
    Stalemate,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checkmate { winner } => write!(f, "checkmate, {} wins", winner.name()),
            Self::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// The result of [`crate::Board::try_move`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    /// The move was made. `captured` is the piece it took, if any, and `game_over` is set if the opponent was left
    /// without a legal reply.
    Committed {
        captured: Option<Piece>,
        game_over: Option<Outcome>,
    },
    /// The move was refused and nothing on the board changed.
    Rejected(Rejection),
}

impl MoveOutcome {
    /// Returns `true` if the move was made.
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    /// Returns `true` if the move was refused.
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// The reason the move was refused, if it was.
    pub const fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Rejected(reason) => Some(*reason),
            Self::Committed { .. } => None,
        }
    }
}
