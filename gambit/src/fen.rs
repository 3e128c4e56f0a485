use anyhow::{anyhow, bail, Context, Result};

use super::{Board, Color, File, PieceKind, Rank, Square};

impl Board {
    /// Generates a FEN string from this [`Board`].
    ///
    /// Castling, en passant, and the move counters are not tracked, so those fields are always `- - 0 0`.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, FEN_STARTPOS};
    /// let board = Board::standard();
    /// assert_eq!(board.to_fen(), FEN_STARTPOS);
    /// ```
    pub fn to_fen(&self) -> String {
        let mut placements = String::with_capacity(64);
        let mut empty = 0;

        for (i, tile) in self.squares().enumerate() {
            if let Some(piece) = tile.occupant() {
                if empty > 0 {
                    placements += &empty.to_string();
                    empty = 0;
                }
                placements.push(piece.char());
            } else {
                empty += 1;
            }

            // End of a rank
            if (i + 1) % File::COUNT == 0 {
                if empty > 0 {
                    placements += &empty.to_string();
                    empty = 0;
                }
                if i + 1 < Square::COUNT {
                    placements.push('/');
                }
            }
        }

        format!("{placements} {} - - 0 0", self.side_to_move().to_uci())
    }

    /// Constructs a [`Board`] from the provided FEN string.
    ///
    /// Only the piece placements and the active color are read. The active color defaults to White if absent,
    /// and every field after it is ignored.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Color, PieceKind, Square};
    /// let board = Board::from_fen("k7/8/8/8/8/8/8/R3K3 b - - 0 0").unwrap();
    /// assert_eq!(board.side_to_move(), Color::Black);
    /// assert_eq!(board.piece_at(Square::A1).unwrap().kind(), PieceKind::Rook);
    /// assert!(Board::from_fen("k7/8/8/8/8/8/8").is_err());
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut board = Self::new();
        let mut split = fen.split_whitespace();
        let placements = split.next().ok_or(anyhow!(
            "Invalid FEN string: FEN string must have piece placements."
        ))?;

        // Check if the placements string is the correct length
        if placements.matches('/').count() != 7 {
            bail!("Invalid FEN string: Missing placements for all 8 ranks. Got {placements:?}");
        }

        // Placements start at the 8th rank
        for (rank, row) in Rank::iter().rev().zip(placements.split('/')) {
            let mut file = 0;

            for c in row.chars() {
                if let Some(empty) = c.to_digit(10) {
                    file += empty as usize;
                    continue;
                }

                if file >= File::COUNT {
                    bail!("Invalid FEN string: Rank {rank} overflows the board. Got {row:?}");
                }

                let kind = PieceKind::from_uci(c).context(format!(
                    "Invalid FEN string: Found non-piece, non-numeric char {c:?} on rank {rank}"
                ))?;
                let square = Square::new(File::new(file as u8)?, rank);

                board
                    .add_piece(kind, Color::from_case(c), square)
                    .context(format!("Invalid FEN string: Could not place {c:?}"))?;
                file += 1;
            }

            if file != File::COUNT {
                bail!("Invalid FEN string: Rank {rank} covers {file} squares instead of 8. Got {row:?}");
            }
        }

        let active_color = split.next().unwrap_or("w");
        let mut chars = active_color.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => board.set_side_to_move(Color::from_uci(c)?),
            _ => bail!("Invalid FEN string: Active color must be `w` or `b`. Got {active_color:?}"),
        }

        Ok(board)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::FEN_STARTPOS;

    #[test]
    fn startpos_round_trips() {
        let board = Board::from_fen(FEN_STARTPOS).unwrap();
        assert_eq!(board.pieces().len(), 32);
        assert_eq!(board.to_fen(), Board::standard().to_fen());
    }

    #[test]
    fn empty_runs_are_merged() {
        let mut board = Board::new();
        board
            .add_piece(PieceKind::King, Color::Black, Square::E8)
            .unwrap();
        board
            .add_piece(PieceKind::Pawn, Color::White, Square::D4)
            .unwrap();
        board
            .add_piece(PieceKind::King, Color::White, Square::H1)
            .unwrap();
        board.change_turn();

        assert_eq!(board.to_fen(), "4k3/8/8/8/3P4/8/8/7K b - - 0 0");
    }

    #[test]
    fn placements_only() {
        let board = Board::from_fen("8/8/8/8/8/8/8/4K3").unwrap();
        assert_eq!(board.side_to_move(), Color::White);
        assert!(board.has_king_at(Square::E1));
    }

    #[test]
    fn malformed_placements_are_refused() {
        // Too many squares on the first rank
        assert!(Board::from_fen("8/8/8/8/8/8/8/4K4 w").is_err());
        // Too few
        assert!(Board::from_fen("8/8/8/8/8/8/8/4K2 w").is_err());
        // Unknown piece
        assert!(Board::from_fen("8/8/8/8/8/8/8/4X3 w").is_err());
        // Bad active color
        assert!(Board::from_fen("8/8/8/8/8/8/8/4K3 x").is_err());
        assert!(Board::from_fen("").is_err());
    }
}
