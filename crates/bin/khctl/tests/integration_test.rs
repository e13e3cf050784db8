//! End-to-end tests for the full khctl stack.
//!
//! Each test binds a fake game server to an ephemeral port and drives the
//! real game client through the real `reqwest` adapter.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use kh_adapter_http_reqwest::ReqwestGameApi;
use kh_app::event_bus::InProcessEventBus;
use kh_app::services::game_client::{ClientOptions, GameClient};
use kh_domain::api::ApiBase;
use kh_domain::session::LoginForm;
use kh_domain::status::{EMPTY, ids};
use serde_json::{Value, json};

const USERS: [(&str, &str); 2] = [("alice", "alicepw"), ("bob", "bobpw")];

#[derive(Default)]
struct Game {
    sessions: Mutex<HashMap<String, String>>,
    round: AtomicUsize,
    state_requests: AtomicUsize,
    logouts: AtomicUsize,
}

type Shared = Arc<Game>;

fn authed(game: &Game, headers: &HeaderMap) -> Option<String> {
    let token = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .to_string();
    game.sessions.lock().unwrap().get(&token).cloned()
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"ok": false, "error": message}))).into_response()
}

async fn login(State(game): State<Shared>, Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    if !USERS.iter().any(|&(u, p)| u == username && p == password) {
        return failure(StatusCode::UNAUTHORIZED, "bad credentials");
    }
    let token = format!("{username}-session");
    game.sessions
        .lock()
        .unwrap()
        .insert(token.clone(), username.to_string());
    Json(json!({"ok": true, "token": token, "username": username})).into_response()
}

async fn logout(State(game): State<Shared>, headers: HeaderMap) -> Response {
    let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    else {
        return failure(StatusCode::UNAUTHORIZED, "not authenticated");
    };
    game.sessions.lock().unwrap().remove(token);
    game.logouts.fetch_add(1, Ordering::SeqCst);
    Json(json!({"ok": true})).into_response()
}

async fn state(State(game): State<Shared>, headers: HeaderMap) -> Response {
    let Some(user) = authed(&game, &headers) else {
        return failure(StatusCode::UNAUTHORIZED, "not authenticated");
    };
    game.state_requests.fetch_add(1, Ordering::SeqCst);
    let (owner, peer, peer_owner) = if user == "alice" {
        ("A", "bob", "B")
    } else {
        ("B", "alice", "A")
    };
    Json(json!({
        "ok": true,
        "state": {
            "gameId": 1,
            "scenario": "learning",
            "round": game.round.load(Ordering::SeqCst),
            "activePlayer": "A",
            "phaseIndex": 0,
            "phase": "Setup",
            "vp": {"A": 0, "B": 0},
            "bp": {"A": 12, "B": 8},
            "notes": "Setup"
        },
        "self": {"owner": owner, "username": user},
        "peer": {"owner": peer_owner, "username": peer, "online": false, "last_seen": ""}
    }))
    .into_response()
}

async fn command(State(game): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if authed(&game, &headers).is_none() {
        return failure(StatusCode::UNAUTHORIZED, "not authenticated");
    }
    match body["command"].as_str().unwrap_or_default() {
        "start learning" => {
            game.round.store(1, Ordering::SeqCst);
            Json(json!({"ok": true, "event": "Scenario: learning\nRound 1\n"})).into_response()
        }
        other => failure(StatusCode::BAD_REQUEST, &format!("unknown command: {other}")),
    }
}

async fn spawn_server() -> (String, Shared) {
    let game = Shared::default();
    let router = Router::new()
        .route("/kh/api/login", post(login))
        .route("/kh/api/logout", post(logout))
        .route("/kh/api/state", get(state))
        .route("/kh/api/command", post(command))
        .with_state(Arc::clone(&game));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}/kh/api/"), game)
}

type Client = GameClient<ReqwestGameApi, Arc<InProcessEventBus>>;

async fn client(poll_interval: Duration) -> (Arc<Client>, Shared) {
    let (base, game) = spawn_server().await;
    let api = ReqwestGameApi::new(ApiBase::new(base)).unwrap();
    let client = GameClient::new(
        api,
        Arc::new(InProcessEventBus::new(256)),
        ClientOptions {
            poll_interval,
            ..ClientOptions::default()
        },
    );
    (Arc::new(client), game)
}

fn texts(client: &Client) -> Vec<String> {
    client.log_lines().into_iter().map(|l| l.text).collect()
}

#[tokio::test]
async fn should_log_in_and_out_as_alice() {
    let (client, game) = client(Duration::from_secs(60)).await;

    client.submit_login(&LoginForm::new("alice", "alicepw")).await;

    let status = client.status();
    assert_eq!(status.badge.label(), "LOGGED IN");
    assert_eq!(status.field(ids::USER), Some("alice"));
    assert_eq!(status.field(ids::PEER), Some("bob (B)"));
    assert_eq!(status.field(ids::PEER_ONLINE), Some("no"));
    assert_eq!(status.field(ids::BP), Some("A:12"));

    client.logout().await;

    let status = client.status();
    assert_eq!(status.badge.label(), "LOGGED OUT");
    for (id, text) in status.fields() {
        assert_eq!(text, EMPTY, "field {id}");
    }
    assert_eq!(game.logouts.load(Ordering::SeqCst), 1);
    assert!(game.sessions.lock().unwrap().is_empty());
    assert_eq!(texts(&client), ["Login OK.", "Logged out."]);
}

#[tokio::test]
async fn should_report_refused_login() {
    let (client, _game) = client(Duration::from_secs(60)).await;

    client.submit_login(&LoginForm::new("alice", "bobpw")).await;

    assert_eq!(texts(&client), ["Login error: bad credentials"]);
    assert_eq!(client.status().badge.label(), "LOGGED OUT");
}

#[tokio::test]
async fn should_run_command_and_refresh_state() {
    let (client, game) = client(Duration::from_secs(60)).await;
    client.submit_login(&LoginForm::new("bob", "bobpw")).await;
    assert_eq!(client.status().field(ids::ROUND), Some("0"));

    client.submit_command("start learning").await;
    client.submit_command("fly").await;

    assert_eq!(
        texts(&client),
        [
            "Login OK.",
            "> start learning",
            "Scenario: learning",
            "Round 1",
            "> fly",
            "Error: unknown command: fly",
        ]
    );
    assert_eq!(client.status().field(ids::ROUND), Some("1"));
    assert_eq!(client.status().field(ids::PEER), Some("alice (A)"));
    assert_eq!(game.state_requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn should_poll_until_logout() {
    let (client, game) = client(Duration::from_millis(50)).await;
    client.submit_login(&LoginForm::new("alice", "alicepw")).await;

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(game.state_requests.load(Ordering::SeqCst) >= 3);

    client.logout().await;
    let after_logout = game.state_requests.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert!(!client.is_polling());
    assert_eq!(game.state_requests.load(Ordering::SeqCst), after_logout);
}
