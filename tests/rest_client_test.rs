//! Tests for the REST persistence client against a local stub service.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tictactoe::{
    BoardSize, GameResult, Mark, PersistenceClient, PersistenceErrorKind, RestPersistenceClient,
    SessionId, StatsSnapshot,
};

type Seen = Arc<Mutex<Vec<(String, Value)>>>;

const CREATED_AT: &str = "2024-05-01T12:00:00.000000Z";

async fn create_game(State(seen): State<Seen>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let board_size = body["board_size"].clone();
    seen.lock().unwrap().push(("POST games/".to_string(), body));
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 7,
            "board_size": board_size,
            "winner": null,
            "is_tie": false,
            "created_at": CREATED_AT,
        })),
    )
}

async fn record_move(State(seen): State<Seen>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    seen.lock().unwrap().push(("POST moves/".to_string(), body.clone()));
    (StatusCode::CREATED, Json(body))
}

async fn complete_game(
    State(seen): State<Seen>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    seen.lock()
        .unwrap()
        .push((format!("PATCH games/{}/", id), body.clone()));
    Json(json!({
        "id": id,
        "board_size": 3,
        "winner": body.get("winner").cloned().unwrap_or(Value::Null),
        "is_tie": body.get("is_tie").cloned().unwrap_or(json!(false)),
        "created_at": CREATED_AT,
    }))
}

async fn stats() -> Json<Value> {
    Json(json!({"total_games": 5, "x_wins": 2, "o_wins": 1, "ties": 2}))
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "message": "Tic Tac Toe API is running"}))
}

/// Starts the stub on an ephemeral port and returns its root URL.
async fn spawn_stub() -> (String, Seen) {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .route("/api/games/", post(create_game))
        .route("/api/games/{id}/", patch(complete_game))
        .route("/api/moves/", post(record_move))
        .route("/api/stats/", get(stats))
        .route("/api/health/", get(health))
        .route("/broken/stats/", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/garbled/stats/", get(|| async { "not json" }))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub");
    let addr = listener.local_addr().expect("No local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub server failed");
    });

    (format!("http://{}", addr), seen)
}

fn client(root: &str, prefix: &str) -> RestPersistenceClient {
    RestPersistenceClient::new(format!("{}/{}", root, prefix), Duration::from_secs(5))
        .expect("Failed to build client")
}

#[tokio::test]
async fn test_create_game_posts_board_size() {
    let (root, seen) = spawn_stub().await;
    let id = client(&root, "api")
        .create_game(BoardSize::new(4).unwrap())
        .await
        .expect("create failed");

    assert_eq!(id, SessionId(7));
    assert_eq!(
        seen.lock().unwrap().as_slice(),
        &[("POST games/".to_string(), json!({"board_size": 4}))]
    );
}

#[tokio::test]
async fn test_record_move_body() {
    let (root, seen) = spawn_stub().await;
    client(&root, "api")
        .record_move(SessionId(7), Mark::O, 2, 0, 4)
        .await
        .expect("record failed");

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].0, "POST moves/");
    assert_eq!(
        seen[0].1,
        json!({"game": 7, "player": "O", "row": 2, "column": 0, "move_number": 4})
    );
}

#[tokio::test]
async fn test_complete_game_patches_winner_or_tie() {
    let (root, seen) = spawn_stub().await;
    let client = client(&root, "api/");

    client
        .complete_game(SessionId(7), GameResult::Winner(Mark::X))
        .await
        .expect("winner patch failed");
    client
        .complete_game(SessionId(8), GameResult::Tie)
        .await
        .expect("tie patch failed");

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0], ("PATCH games/7/".to_string(), json!({"winner": "X"})));
    assert_eq!(seen[1], ("PATCH games/8/".to_string(), json!({"is_tie": true})));
}

#[tokio::test]
async fn test_fetch_stats_and_health() {
    let (root, _) = spawn_stub().await;
    let client = client(&root, "api");

    let stats = client.fetch_stats().await.expect("stats failed");
    assert_eq!(stats, StatsSnapshot::new(2, 1, 2, 5));

    let health = client.health().await.expect("health failed");
    assert!(health.is_healthy());
    assert_eq!(health.message(), "Tic Tac Toe API is running");
}

#[tokio::test]
async fn test_trailing_slash_trimmed() {
    let client = RestPersistenceClient::new("http://localhost:8000/api/", Duration::from_secs(1))
        .expect("Failed to build client");
    assert_eq!(client.base_url(), "http://localhost:8000/api");
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let (root, _) = spawn_stub().await;
    let err = client(&root, "broken").fetch_stats().await.unwrap_err();

    assert_eq!(
        err.kind,
        PersistenceErrorKind::Status {
            endpoint: "stats/".to_string(),
            status: 500,
        }
    );
}

#[tokio::test]
async fn test_unexpected_body_is_decode_error() {
    let (root, _) = spawn_stub().await;
    let err = client(&root, "garbled").fetch_stats().await.unwrap_err();
    assert!(matches!(err.kind, PersistenceErrorKind::Decode { .. }));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}", addr), "api")
        .health()
        .await
        .unwrap_err();
    assert!(matches!(err.kind, PersistenceErrorKind::Transport { .. }));
}
