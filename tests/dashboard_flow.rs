use std::time::Duration;

use apidash::{
    ApiClient, AppActor, AppState, EndpointKey, FetchRecord, NetworkActor, NetworkCommand,
    NetworkResponse, RenderState, UiEvent,
};
use httpmock::prelude::*;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

/// Issue a full refresh through a real network actor and apply every settlement
async fn run_refresh(base_url: String) -> AppState {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (resp_tx, mut resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    tokio::spawn(NetworkActor::new(ApiClient::new(base_url.clone()), resp_tx).run(cmd_rx));

    let mut state = AppState::new(base_url);
    for cmd in state.refresh_all() {
        cmd_tx.send(cmd).unwrap();
    }
    for (key, record) in state.dashboard.iter() {
        assert_eq!(record, &FetchRecord::loading(), "{:?} should start loading", key);
    }

    for _ in EndpointKey::ALL {
        let response = timeout(WAIT, resp_rx.recv())
            .await
            .expect("settlement timed out")
            .expect("network actor stopped");
        state.handle_response(response);
    }

    cmd_tx.send(NetworkCommand::Shutdown).unwrap();
    state
}

#[tokio::test]
async fn hello_succeeds_while_health_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/hello");
            then.status(200).json_body(json!({"message": "hello"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/health");
            then.status(500);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/data");
            then.status(200).json_body(json!({"items": [1, 2]}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/user");
            then.status(404);
        })
        .await;

    let state = run_refresh(server.url("/api")).await;
    let dashboard = &state.dashboard;

    let hello = dashboard.record(EndpointKey::Hello);
    assert_eq!(hello.payload, Some(json!({"message": "hello"})));
    assert!(!hello.is_loading);
    assert_eq!(hello.error, None);

    let health = dashboard.record(EndpointKey::Health);
    assert!(!health.is_loading);
    assert_eq!(health.error.as_deref(), Some("Request failed with status code 500"));

    assert_eq!(dashboard.record(EndpointKey::Data).payload, Some(json!({"items": [1, 2]})));
    assert_eq!(
        dashboard.record(EndpointKey::User).error.as_deref(),
        Some("Request failed with status code 404")
    );
    assert!(state.pending.is_empty());
}

#[tokio::test]
async fn offline_backend_fails_every_card_independently() {
    let state = run_refresh("http://127.0.0.1:1/api".to_string()).await;

    for (key, record) in state.dashboard.iter() {
        assert!(!record.is_loading, "{:?} still loading", key);
        assert_eq!(record.payload, None);
        let message = record.error.as_deref().unwrap_or_default();
        assert!(!message.is_empty(), "{:?} has no error message", key);
    }
}

#[tokio::test]
async fn app_actor_settles_all_cards_and_quits() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!({"ok": true}));
        })
        .await;
    let base_url = server.url("/api");

    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (resp_tx, resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    tokio::spawn(NetworkActor::new(ApiClient::new(base_url.clone()), resp_tx).run(cmd_rx));
    let app = tokio::spawn(AppActor::new(AppState::new(base_url), cmd_tx, render_tx).run(ui_rx, resp_rx));

    let first = timeout(WAIT, render_rx.recv()).await.unwrap().unwrap();
    assert_eq!(first.dashboard.loading_count(), 4);

    let settled = timeout(WAIT, async {
        while let Some(state) = render_rx.recv().await {
            if state.dashboard.loading_count() == 0 {
                return Some(state);
            }
        }
        None
    })
    .await
    .expect("cards never settled")
    .expect("app actor stopped early");

    for (_, record) in settled.dashboard.iter() {
        assert_eq!(record.payload, Some(json!({"ok": true})));
    }

    // A refresh puts every card back into loading
    ui_tx.send(UiEvent::Refresh).unwrap();
    let refreshed = timeout(WAIT, render_rx.recv()).await.unwrap().unwrap();
    assert_eq!(refreshed.dashboard.loading_count(), 4);

    ui_tx.send(UiEvent::Quit).unwrap();
    timeout(WAIT, app).await.expect("app actor did not stop").unwrap();
}
