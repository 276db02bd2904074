use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use beacon_core::{ConnectionId, PeerIdentity, RoomId};
use beacon_server::{AppState, INDEX_BANNER, ServerConfig, SignalingHandler, build_app};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use crate::integration::init_tracing;

#[tokio::test]
async fn test_index_banner() {
    init_tracing();

    let app = build_app(Arc::new(AppState::new(&ServerConfig::default())));

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], INDEX_BANNER.as_bytes());
}

#[tokio::test]
async fn test_health_reports_router_stats() {
    init_tracing();

    let state = Arc::new(AppState::new(&ServerConfig::default()));
    let alice = ConnectionId::new();
    state.router.on_connect(alice).await;
    state
        .router
        .on_join_room(alice, RoomId::from("room1"), PeerIdentity::from("alice"))
        .await;

    let response = build_app(state)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let report: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(report, json!({"status": "ok", "connections": 1, "rooms": 1}));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    init_tracing();

    let app = build_app(Arc::new(AppState::new(&ServerConfig::default())));

    let response = app
        .oneshot(
            Request::get("/health")
                .header(header::ORIGIN, "https://app.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
