//! End-to-end matches through the default arena and the HTTP driver

use arena_cli::{MATCH_ID, default_arena, router};
use arena_core::{Action, ArenaError, Outcome, Question, Reply, Step};
use arena_engine::{Strategy, run_match};
use arena_games::tictactoe::StupidTictactoe;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tower::ServiceExt;

async fn first_free_cell(Json(question): Json<Question>) -> Json<Reply> {
    if question.action == Action::Init {
        return Json(Reply {
            name: Some("first-free".into()),
            ..Default::default()
        });
    }
    let play = StupidTictactoe
        .play(&question, &mut StdRng::seed_from_u64(0))
        .unwrap();
    Json(Reply::play(play, question.player_index))
}

/// Greets fine, then fails every turn
async fn broken(Json(question): Json<Question>) -> Result<Json<Reply>, StatusCode> {
    match question.action {
        Action::Init => Ok(Json(Reply::default())),
        Action::PlayTurn => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// Serve HTTP bots on an ephemeral port, return `host:port`
async fn bot_server() -> String {
    let app = Router::new()
        .route("/first-free", post(first_free_cell))
        .route("/broken", post(broken));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr.to_string()
}

#[tokio::test]
async fn test_failing_bot_ends_the_match() {
    let host = bot_server().await;
    let bots = vec![
        format!("http://{}/first-free", host),
        format!("http+post://{}/broken", host),
    ];

    let game = default_arena().prepare("tictactoe", &bots, 1).unwrap();
    let report = run_match(game, MATCH_ID, Vec::new()).await.unwrap();

    let steps = &report.consumer;
    assert_eq!(steps.len(), 4, "{:?}", steps);
    assert!(matches!(&steps[0], Step::Question(q) if q.player_index == 0));
    assert!(matches!(&steps[1], Step::Reply(r) if r.play == "0-0"));
    assert!(matches!(&steps[2], Step::Question(q) if q.player_index == 1));
    match &steps[3] {
        Step::Error(ArenaError::Transport(msg)) => assert!(msg.contains("500"), "{}", msg),
        other => panic!("Expected a transport error, got {:?}", other),
    }
    assert!(report.outcome.is_error());
    assert_eq!(report.steps, 4);
}

#[tokio::test]
async fn test_http_bot_against_stupid() {
    let host = bot_server().await;
    let bots = vec![format!("http+post://{}/first-free", host), "stupid".to_string()];

    let report = default_arena()
        .play("tictactoe", &bots, 2, MATCH_ID, Vec::new())
        .await
        .unwrap();

    // Both play the first free cell, so the first seat takes the anti-diagonal
    assert_eq!(
        report.outcome,
        Outcome::Winner {
            index: 0,
            name: format!("http+post://{}/first-free", host),
        }
    );
}

#[tokio::test]
async fn test_bad_scheme_over_http() {
    let app = router(Arc::new(default_arena()));
    let response = app
        .oneshot(
            Request::post("/run")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("game=tictactoe&bot1=stupid&bot2=badscheme%3A%2F%2Fx"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8_lossy(&bytes);
    assert!(body.contains("bot registering error"), "{}", body);
    assert!(body.contains("badscheme"), "{}", body);
    assert!(!body.contains("steps"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_file_bot_calls_heads() {
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("heads.sh");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "#!/bin/sh\necho '{{\"play\":\"heads\"}}'").unwrap();
    drop(file);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

    let bots = vec![format!("file://{}", path.display()), "stupid".to_string()];
    let report = default_arena()
        .play("coinflip", &bots, 11, MATCH_ID, Vec::new())
        .await
        .unwrap();

    assert!(matches!(report.outcome, Outcome::Winner { .. }));
    let landed = report.consumer.iter().find_map(|step| match step {
        Step::Message(message) => Some(message.clone()),
        _ => None,
    });
    let expected_winner = if landed.as_deref() == Some("coin landed on heads") { 0 } else { 1 };
    assert!(matches!(report.outcome, Outcome::Winner { index, .. } if index == expected_winner));
    assert!(report.game.ascii_output().starts_with("called heads"));
}
