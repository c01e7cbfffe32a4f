//! Game lifecycle through the service.

use tictactoe_core::{
    Game, GameStatus, Move, Piece, Player, PlayerKind, StandardGameEngine, Strategy, StrategyKind,
};
use tictactoe_server::{
    AppContext, Environment, GameCreated, GameService, ServerConfig, ServiceError, simulate,
};
use uuid::Uuid;

fn service() -> GameService {
    let config = ServerConfig::default().with_environment(Environment::Testing);
    GameService::new(AppContext::from_config(&config))
}

fn new_game(svc: &GameService) -> GameCreated {
    svc.create_game("human", "computer", "X", "O")
        .expect("valid game")
}

/// Plays `cells` alternately for player 1 and player 2.
fn play(svc: &GameService, game: &GameCreated, cells: &[&str]) {
    for (i, cell) in cells.iter().enumerate() {
        let player = if i % 2 == 0 {
            &game.player1_uuid
        } else {
            &game.player2_uuid
        };
        svc.add_move(&game.game_uuid, player, cell)
            .unwrap_or_else(|e| panic!("move {cell}: {e}"));
    }
}

#[test]
fn test_create_game_parses_case_insensitively() {
    let svc = service();
    let created = svc
        .create_game("COMPUTER", "Human", "o", "x")
        .expect("valid game");
    assert_eq!(created.message, "Game created successfully");

    let state = svc.game_state(&created.game_uuid).expect("stored");
    assert_eq!(state.players[0].kind, PlayerKind::Computer);
    assert_eq!(state.players[0].piece, Piece::O);
    assert_eq!(state.players[1].piece, Piece::X);
    assert_eq!(state.winner, None);
}

#[test]
fn test_create_game_rejects_bad_input() {
    let svc = service();
    assert!(matches!(
        svc.create_game("human", "human", "X", "x"),
        Err(ServiceError::DuplicatePieces { piece: Piece::X })
    ));
    assert!(matches!(
        svc.create_game("alien", "human", "X", "O"),
        Err(ServiceError::InvalidPlayerKind { .. })
    ));
    assert!(matches!(
        svc.create_game("human", "human", "X", "Q"),
        Err(ServiceError::InvalidPiece { .. })
    ));
    assert!(svc.context().storage().list_games().is_empty());
}

#[test]
fn test_unknown_and_malformed_game_ids() {
    let svc = service();
    let missing = Uuid::new_v4().to_string();
    assert!(matches!(
        svc.display_board(&missing),
        Err(ServiceError::GameNotFound { .. })
    ));
    assert!(matches!(
        svc.add_move(&missing, &Uuid::new_v4().to_string(), "A1"),
        Err(ServiceError::GameNotFound { .. })
    ));
    assert!(matches!(
        svc.check_status(&missing),
        Err(ServiceError::GameNotFound { .. })
    ));
    assert!(matches!(
        svc.list_moves("game-1"),
        Err(ServiceError::InvalidId { what: "game", .. })
    ));

    let game = new_game(&svc);
    assert!(matches!(
        svc.add_move(&game.game_uuid, "nobody", "A1"),
        Err(ServiceError::InvalidId { what: "player", .. })
    ));
}

#[test]
fn test_add_move_normalizes_and_numbers() {
    let svc = service();
    let game = new_game(&svc);

    let first = svc
        .add_move(&game.game_uuid, &game.player1_uuid, "b2")
        .expect("free cell");
    assert_eq!(first.mv.position, "B2");
    assert_eq!(first.mv.order, 1);
    assert_eq!(first.status, GameStatus::Ongoing);
    assert_eq!(first.message, "Move added: B2");

    let second = svc
        .add_move(&game.game_uuid, &game.player2_uuid, "A1")
        .expect("free cell");
    assert_eq!(second.mv.order, 2);

    let history = svc.list_moves(&game.game_uuid).expect("stored");
    let cells: Vec<&str> = history.moves.iter().map(|m| m.position.as_str()).collect();
    assert_eq!(cells, vec!["B2", "A1"]);
}

#[test]
fn test_add_move_rejections() {
    let svc = service();
    let game = new_game(&svc);
    play(&svc, &game, &["B2"]);

    for bad in ["B2", "b2", "D4", "A0", "", " A1", "A1 "] {
        assert!(
            matches!(
                svc.add_move(&game.game_uuid, &game.player2_uuid, bad),
                Err(ServiceError::InvalidMove { .. })
            ),
            "{bad:?} should be rejected"
        );
    }

    let stranger = Uuid::new_v4().to_string();
    assert!(matches!(
        svc.add_move(&game.game_uuid, &stranger, "A1"),
        Err(ServiceError::UnknownPlayer { .. })
    ));
    assert_eq!(svc.list_moves(&game.game_uuid).expect("stored").moves.len(), 1);
}

#[test]
fn test_win_records_winner_and_closes_game() {
    let svc = service();
    let game = new_game(&svc);
    play(&svc, &game, &["A1", "B1", "A2", "B2"]);

    let winning = svc
        .add_move(&game.game_uuid, &game.player1_uuid, "A3")
        .expect("free cell");
    assert_eq!(winning.status, GameStatus::Win);
    assert_eq!(winning.winner.as_deref(), Some(game.player1_uuid.as_str()));

    let report = svc.check_status(&game.game_uuid).expect("stored");
    assert!(report.is_game_over);
    assert_eq!(report.winner.as_deref(), Some(game.player1_uuid.as_str()));

    assert!(matches!(
        svc.add_move(&game.game_uuid, &game.player2_uuid, "C3"),
        Err(ServiceError::GameOver { status: GameStatus::Win, .. })
    ));
    assert!(matches!(
        svc.next_move(&game.game_uuid, &game.player2_uuid, None),
        Err(ServiceError::GameOver { .. })
    ));

    let board = svc.display_board(&game.game_uuid).expect("stored");
    assert!(board.contains("Status: Win"));
    assert!(board.contains("Winner: X"));
    assert!(board.contains("Moves made: 5"));
}

#[test]
fn test_full_board_without_line_is_draw() {
    let svc = service();
    let game = new_game(&svc);
    play(&svc, &game, &["B2", "A1", "A3", "C1", "B1", "B3", "C3", "A2"]);

    let last = svc
        .add_move(&game.game_uuid, &game.player1_uuid, "C2")
        .expect("free cell");
    assert_eq!(last.status, GameStatus::Draw);
    assert_eq!(last.winner, None);

    let report = svc.check_status(&game.game_uuid).expect("stored");
    assert_eq!(report.status, GameStatus::Draw);
    assert!(report.is_game_over);
}

#[test]
fn test_next_move_does_not_modify_game() {
    let svc = service();
    let game = new_game(&svc);
    play(&svc, &game, &["A1", "B2", "A2"]);
    let before = svc.game_state(&game.game_uuid).expect("stored");

    let suggestion = svc
        .next_move(&game.game_uuid, &game.player2_uuid, None)
        .expect("free cells");
    assert_eq!(suggestion.position, "A3");
    assert_eq!(suggestion.ai_type, "strategic");
    assert_eq!(suggestion.message, "Suggested move: A3");

    let random = svc
        .next_move(&game.game_uuid, &game.player2_uuid, Some("Random"))
        .expect("free cells");
    assert_eq!(random.ai_type, "random");
    assert!(!["A1", "B2", "A2"].contains(&random.position.as_str()));

    assert_eq!(svc.game_state(&game.game_uuid).expect("stored"), before);
}

#[test]
fn test_configured_ai_is_default() {
    let config = ServerConfig::default().with_ai_type(StrategyKind::Random);
    let svc = GameService::new(AppContext::from_config(&config));
    let game = new_game(&svc);
    let suggestion = svc
        .next_move(&game.game_uuid, &game.player1_uuid, None)
        .expect("free cells");
    assert_eq!(suggestion.ai_type, "random");
}

#[test]
fn test_check_status_repairs_stale_status() {
    let svc = service();
    let x = Player::new(Uuid::new_v4(), PlayerKind::Human, Piece::X);
    let o = Player::new(Uuid::new_v4(), PlayerKind::Computer, Piece::O);
    let (x_id, o_id) = (*x.id(), *o.id());
    let game = Game::new(Uuid::new_v4(), vec![x, o]).with_moves([
        Move::new("C1", o_id, 1),
        Move::new("A1", x_id, 2),
        Move::new("C2", o_id, 3),
        Move::new("A2", x_id, 4),
        Move::new("C3", o_id, 5),
    ]);
    let game_uuid = game.id().to_string();
    svc.context().storage().write_game(game);

    // Stored as ongoing; the move log says O completed row C.
    assert_eq!(
        svc.game_state(&game_uuid).expect("stored").status,
        GameStatus::Ongoing
    );
    let report = svc.check_status(&game_uuid).expect("stored");
    assert_eq!(report.status, GameStatus::Win);
    assert_eq!(report.winner, Some(o_id.to_string()));

    let state = svc.game_state(&game_uuid).expect("stored");
    assert_eq!(state.status, GameStatus::Win);
    assert_eq!(state.winner, Some(o_id.to_string()));
}

#[test]
fn test_stale_ongoing_win_rejects_moves_and_suggestions() {
    let svc = service();
    let x = Player::new(Uuid::new_v4(), PlayerKind::Human, Piece::X);
    let o = Player::new(Uuid::new_v4(), PlayerKind::Computer, Piece::O);
    let (x_id, o_id) = (*x.id(), *o.id());
    // O holds row C; X could still complete row A at A3.
    let game = Game::new(Uuid::new_v4(), vec![x, o]).with_moves([
        Move::new("C1", o_id, 1),
        Move::new("A1", x_id, 2),
        Move::new("C2", o_id, 3),
        Move::new("A2", x_id, 4),
        Move::new("C3", o_id, 5),
    ]);
    let game_uuid = game.id().to_string();
    svc.context().storage().write_game(game);

    assert!(matches!(
        svc.next_move(&game_uuid, &x_id.to_string(), None),
        Err(ServiceError::GameOver { status: GameStatus::Win, .. })
    ));
    assert!(matches!(
        svc.add_move(&game_uuid, &x_id.to_string(), "A3"),
        Err(ServiceError::GameOver { status: GameStatus::Win, .. })
    ));

    let state = svc.game_state(&game_uuid).expect("stored");
    assert_eq!(state.moves.len(), 5);
    assert_eq!(state.winner, None);

    let report = svc.check_status(&game_uuid).expect("stored");
    assert_eq!(report.winner, Some(o_id.to_string()));
}

#[test]
fn test_concurrent_moves_get_distinct_orders() {
    let svc = service();
    let game = new_game(&svc);
    // Final layout has no line, so no subset of it does either.
    let x_cells = ["B2", "A3", "B1", "C3", "C2"];
    let o_cells = ["A1", "C1", "B3", "A2"];

    std::thread::scope(|scope| {
        for cell in x_cells {
            let (svc, game) = (&svc, &game);
            scope.spawn(move || svc.add_move(&game.game_uuid, &game.player1_uuid, cell));
        }
        for cell in o_cells {
            let (svc, game) = (&svc, &game);
            scope.spawn(move || svc.add_move(&game.game_uuid, &game.player2_uuid, cell));
        }
    });

    let history = svc.list_moves(&game.game_uuid).expect("stored");
    let orders: Vec<u8> = history.moves.iter().map(|m| m.order).collect();
    assert_eq!(orders, (1..=9).collect::<Vec<u8>>());
    assert_eq!(
        svc.check_status(&game.game_uuid).expect("stored").status,
        GameStatus::Draw
    );
}

#[test]
fn test_simulated_games_finish() {
    let svc = service();
    let engine = StandardGameEngine::new();

    let strategic = Strategy::from_kind(StrategyKind::Strategic, engine);
    let mut seen = 0;
    let report = simulate(&svc, &strategic, &strategic, |_| seen += 1).expect("game completes");
    assert_eq!(report.status, GameStatus::Draw);
    assert_eq!(report.winner, None);
    assert_eq!(report.moves, 9);
    assert_eq!(seen, 9);

    for seed in 0..20 {
        let random = Strategy::seeded(StrategyKind::Random, engine, seed);
        let report = simulate(&svc, &random, &strategic, |_| {}).expect("game completes");
        assert!(report.status.is_terminal(), "seed {seed}");
        match report.status {
            GameStatus::Win => assert!(report.winner.is_some()),
            _ => assert_eq!(report.winner, None),
        }
    }
}
