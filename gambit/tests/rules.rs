use gambit::prelude::*;

fn board_with(pieces: &[(PieceKind, Color, &str)]) -> (Board, Vec<PieceId>) {
    let mut board = Board::new();
    let ids = pieces
        .iter()
        .map(|&(kind, color, square)| {
            board
                .add_piece(kind, color, square.parse().unwrap())
                .unwrap()
        })
        .collect();

    (board, ids)
}

fn square_of(board: &Board, id: PieceId) -> Square {
    board.piece(id).unwrap().square()
}

#[test]
fn test_queen_crosses_empty_board() {
    let (mut board, ids) = board_with(&[(PieceKind::Queen, Color::White, "e1")]);

    let outcome = board.try_move(ids[0], Square::E8);
    assert!(outcome.is_committed());
    assert_eq!(square_of(&board, ids[0]), "e8");
}

#[test]
fn test_king_cannot_be_captured() {
    let (mut board, ids) = board_with(&[
        (PieceKind::King, Color::Black, "e8"),
        (PieceKind::Queen, Color::White, "e1"),
    ]);

    let outcome = board.try_move(ids[1], Square::E8);
    assert_eq!(outcome.rejection(), Some(Rejection::KingCapture));
    assert_eq!(square_of(&board, ids[1]), "e1");
    assert_eq!(board.side_to_move(), Color::White);
}

#[test]
fn test_attacks_stop_at_first_piece() {
    let (board, ids) = board_with(&[
        (PieceKind::Queen, Color::White, "d1"),
        (PieceKind::Queen, Color::Black, "d7"),
        (PieceKind::King, Color::Black, "d8"),
    ]);

    let attacks = board.piece(ids[0]).unwrap().attacking_squares(&board);
    assert!(attacks.contains(&Square::D7));
    assert!(!attacks.contains(&Square::D8));
}

#[test]
fn test_must_answer_knight_check() {
    let (mut board, ids) = board_with(&[
        (PieceKind::King, Color::White, "d1"),
        (PieceKind::Pawn, Color::White, "g2"),
        (PieceKind::Knight, Color::Black, "e3"),
    ]);
    let (king, pawn) = (ids[0], ids[1]);
    assert!(board.in_check());

    let outcome = board.try_move(pawn, Square::G3);
    assert_eq!(outcome.rejection(), Some(Rejection::LeavesKingInCheck));
    assert_eq!(square_of(&board, pawn), "g2");

    assert!(board.try_move(king, Square::E1).is_committed());
    assert_eq!(square_of(&board, king), "e1");
    assert!(!board.is_in_check(Color::White));
}

#[test]
fn test_pinned_pawn_cannot_move() {
    let (mut board, ids) = board_with(&[
        (PieceKind::King, Color::White, "a1"),
        (PieceKind::Pawn, Color::White, "b2"),
        (PieceKind::Bishop, Color::Black, "h8"),
    ]);
    let (king, pawn) = (ids[0], ids[1]);
    assert!(!board.in_check());

    let outcome = board.try_move(pawn, Square::B4);
    assert_eq!(outcome.rejection(), Some(Rejection::LeavesKingInCheck));
    assert_eq!(square_of(&board, pawn), "b2");

    assert!(board.try_move(king, Square::A2).is_committed());
    assert_eq!(square_of(&board, king), "a2");
}

#[test]
fn test_back_rank_mate() {
    let (mut board, ids) = board_with(&[
        (PieceKind::King, Color::Black, "a8"),
        (PieceKind::Pawn, Color::Black, "a7"),
        (PieceKind::Pawn, Color::Black, "b7"),
        (PieceKind::Pawn, Color::Black, "c7"),
        (PieceKind::Rook, Color::White, "h1"),
    ]);
    let rook = ids[4];

    let outcome = board.try_move(rook, Square::H8);
    assert_eq!(
        outcome,
        MoveOutcome::Committed {
            captured: None,
            game_over: Some(Outcome::Checkmate {
                winner: Color::White
            }),
        }
    );
    assert!(board.in_check());
    assert!(board.is_in_check(Color::Black));
    assert!(board.is_checkmate());
}

#[test]
fn test_checkmate_is_final() {
    let mut board = Board::from_fen("k7/ppp5/8/8/8/8/8/7R w").unwrap();
    assert!(board.try_move_uci("h1h8").unwrap().is_committed());
    assert!(board.is_checkmate());

    // Every piece of either side is now frozen
    let ids: Vec<_> = board.pieces().iter().map(Piece::id).collect();
    for id in ids {
        assert!(board.legal_moves(id).is_empty());
        assert_eq!(
            board.try_move(id, Square::D4).rejection(),
            Some(Rejection::GameOver)
        );
    }

    assert!(board.all_legal_moves().is_empty());
    assert!(board.is_checkmate());
    assert_eq!(board.to_fen(), "k6R/ppp5/8/8/8/8/8/8 b - - 0 0");
}

#[test]
fn test_stalemate_is_flagged_but_not_check() {
    let mut board = Board::from_fen("7k/5K2/8/6Q1/8/8/8/8 w").unwrap();

    let outcome = board.try_move_uci("g5g6").unwrap();
    assert_eq!(
        outcome,
        MoveOutcome::Committed {
            captured: None,
            game_over: Some(Outcome::Stalemate),
        }
    );
    assert!(board.is_checkmate());
    assert!(!board.in_check());
    assert_eq!(board.outcome(), Some(Outcome::Stalemate));
}

#[test]
fn test_block_check() {
    let (mut board, ids) = board_with(&[
        (PieceKind::King, Color::White, "d1"),
        (PieceKind::Queen, Color::White, "a2"),
        (PieceKind::Queen, Color::Black, "d8"),
        (PieceKind::King, Color::Black, "h8"),
    ]);
    let queen = ids[1];
    assert!(board.in_check());

    // Moving elsewhere does not help
    assert_eq!(
        board.try_move(queen, Square::A3).rejection(),
        Some(Rejection::LeavesKingInCheck)
    );

    assert!(board.try_move(queen, Square::D2).is_committed());
    assert!(!board.is_in_check(Color::White));
    assert_eq!(board.side_to_move(), Color::Black);
}

#[test]
fn test_king_cannot_capture_protected_piece() {
    let (mut board, ids) = board_with(&[
        (PieceKind::King, Color::White, "d4"),
        (PieceKind::Knight, Color::Black, "d5"),
        (PieceKind::Queen, Color::Black, "d8"),
    ]);
    let (king, knight) = (ids[0], ids[1]);

    let outcome = board.try_move(king, Square::D5);
    assert_eq!(outcome.rejection(), Some(Rejection::ProtectedPiece));
    assert_eq!(square_of(&board, king), "d4");
    assert_eq!(square_of(&board, knight), "d5");
}

#[test]
fn test_king_cannot_step_into_knight_attack() {
    let (mut board, ids) = board_with(&[
        (PieceKind::King, Color::Black, "d8"),
        (PieceKind::Knight, Color::White, "d6"),
    ]);
    let king = ids[0];
    board.change_turn();

    let outcome = board.try_move(king, Square::E8);
    assert_eq!(outcome.rejection(), Some(Rejection::IntoCheck));
    assert_eq!(square_of(&board, king), "d8");

    assert!(!board.legal_moves(king).contains(&Square::E8));
    assert!(board.try_move(king, Square::D7).is_committed());
}

#[test]
fn test_turns_alternate() {
    let mut board = Board::standard();
    let black_pawn = board.piece_at(Square::E7).unwrap().id();

    let outcome = board.try_move(black_pawn, Square::E5);
    assert_eq!(outcome.rejection(), Some(Rejection::NotYourTurn));

    assert!(board.try_move_uci("e2e4").unwrap().is_committed());
    assert!(board.try_move(black_pawn, Square::E5).is_committed());
    assert_eq!(board.side_to_move(), Color::White);
}

#[test]
fn test_unreachable_squares_are_rejected() {
    let mut board = Board::standard();
    let knight = board.piece_at(Square::G1).unwrap().id();

    assert_eq!(
        board.try_move(knight, Square::G3).rejection(),
        Some(Rejection::Unreachable)
    );
    assert_eq!(board.legal_moves(knight).as_slice(), &[Square::F3, Square::H3]);
}

#[test]
fn test_committed_move_changes_one_piece() {
    let mut board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w").unwrap();
    let before: Vec<Piece> = board.pieces().to_vec();
    let pawn = board.piece_at(Square::E4).unwrap().id();

    let MoveOutcome::Committed { captured, .. } = board.try_move(pawn, Square::D5) else {
        panic!("exd5 should be legal");
    };
    let captured = captured.unwrap();
    assert_eq!(captured.square(), Square::D5);
    assert_eq!(captured.kind(), PieceKind::Pawn);

    assert_eq!(board.pieces().len(), before.len() - 1);
    for piece in before.iter().filter(|p| p.id() != pawn && p.id() != captured.id()) {
        assert_eq!(board.piece(piece.id()), Some(piece));
    }
    assert_eq!(square_of(&board, pawn), Square::D5);
    assert_eq!(board.side_to_move(), Color::Black);
}

#[test]
fn test_rejected_move_changes_nothing() {
    let mut board = Board::standard();
    let fen = board.to_fen();
    let rook = board.piece_at(Square::A1).unwrap().id();

    assert!(board.try_move(rook, Square::A4).is_rejected());
    assert_eq!(board.to_fen(), fen);
}

#[test]
fn test_simulation_is_isolated() {
    let board = Board::standard();
    let pawn = board.piece_at(Square::D2).unwrap().id();

    let mut clone = board.simulate_move(pawn, Square::D4).unwrap();
    assert!(clone.try_move_uci("d7d5").unwrap().is_committed());
    assert!(clone.try_move_uci("c1g5").unwrap().is_committed());

    assert_eq!(board.to_fen(), FEN_STARTPOS);
    assert_eq!(square_of(&board, pawn), Square::D2);
    assert_eq!(board.side_to_move(), Color::White);
}

#[test]
fn test_possible_moves_never_include_kings() {
    let fens = [
        FEN_STARTPOS,
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w",
        "4k3/3P4/8/8/8/8/8/4K2R w",
        "k7/ppp5/8/8/8/8/8/7R b",
        "3qk3/8/8/8/8/8/8/3QK3 w",
    ];

    for fen in fens {
        let board = Board::from_fen(fen).unwrap();
        for piece in board.pieces() {
            for to in piece.possible_moves(&board) {
                assert!(!board.has_king_at(to), "{piece:?} may move onto a king at {to} in {fen}");
            }
        }
    }
}

#[test]
fn test_kings_avoid_attacked_and_protected_squares() {
    let board = Board::from_fen("3qk3/8/8/2n5/3K4/8/8/8 w").unwrap();
    let king = board.king(Color::White).unwrap();

    let attacked = board.attacked_squares(Color::Black);
    let protected = board.protected_squares(Color::Black);
    for to in board.legal_moves(king.id()) {
        assert!(!attacked.contains(&to), "{to} is attacked");
        assert!(!protected.contains(&to), "{to} is protected");
    }
}

#[test]
fn test_square_lookup() {
    let board = Board::standard();

    let e1 = board.square("e1").unwrap();
    assert_eq!(e1.id(), Square::E1);
    assert_eq!(e1.occupant().unwrap().kind(), PieceKind::King);

    assert_eq!(board.square("a1").unwrap().color(), Color::Black);
    assert_eq!(board.square("h1").unwrap().color(), Color::White);
    assert!(board.square("e4").unwrap().is_empty());

    assert!(board.square("i1").is_err());
    assert!(board.square("a0").is_err());
    assert!(board.square("e10").is_err());
}

#[test]
fn test_missing_king_is_never_in_check() {
    let mut board = Board::from_fen("8/8/8/8/8/8/8/R7 b").unwrap();
    assert!(!board.is_in_check(Color::Black));
    assert!(!board.verify_checkmate(Color::Black));
    assert!(!board.is_checkmate());
}
