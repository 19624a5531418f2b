use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, header};
use tower::ServiceExt;

use super::*;
use crate::routes::api_routes;
use crate::state::test_helpers::test_app_state;

fn publish_request(body: serde_json::Value) -> Request<Body> {
    Request::post("/api/commands")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn publish_create_reaches_subscribers() {
    let state = test_app_state();
    let mut rx = state.commands.subscribe();

    let resp = api_routes(state).oneshot(publish_request(serde_json::json!({"name": "create"}))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, serde_json::json!({"receivers": 1}));
    let frame = rx.recv().await.unwrap();
    assert_eq!(serde_json::from_value::<Command>(frame.data.clone()).unwrap(), Command::create());
    assert_eq!(frame.from.as_deref(), Some("api"));
}

#[tokio::test]
async fn publish_edit_carries_params() {
    let state = test_app_state();
    let mut rx = state.commands.subscribe();

    let body = serde_json::json!({"name": "edit", "params": {"gistId": "abc", "gistName": "foo"}});
    let resp = api_routes(state).oneshot(publish_request(body)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(serde_json::from_value::<Command>(rx.recv().await.unwrap().data).unwrap(), Command::edit("abc", "foo"));
}

#[tokio::test]
async fn publish_with_nobody_listening_reports_zero() {
    let resp = api_routes(test_app_state())
        .oneshot(publish_request(serde_json::json!({"name": "create"})))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await, serde_json::json!({"receivers": 0}));
}

#[tokio::test]
async fn unknown_command_is_bad_request() {
    let resp = api_routes(test_app_state())
        .oneshot(publish_request(serde_json::json!({"name": "delete"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn edit_without_params_is_bad_request() {
    let resp = api_routes(test_app_state())
        .oneshot(publish_request(serde_json::json!({"name": "edit"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let resp = api_routes(test_app_state())
        .oneshot(publish_request(serde_json::json!({"params": 1})))
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn close_notifies_shutdown() {
    let state = test_app_state();
    let shutdown = state.shutdown.clone();

    let resp = api_routes(state)
        .oneshot(Request::post("/api/app/close").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::ACCEPTED);

    tokio::time::timeout(Duration::from_secs(1), shutdown.notified())
        .await
        .expect("shutdown should be signalled");
}

// =============================================================================
// Origin checks
// =============================================================================

const APP_ORIGIN: &str = "http://127.0.0.1:3000";
const FOREIGN_ORIGIN: &str = "https://evil.example";

fn close_request(origin: Option<&str>) -> Request<Body> {
    let mut req = Request::post("/api/app/close");
    if let Some(origin) = origin {
        req = req.header(header::ORIGIN, origin);
    }
    req.body(Body::empty()).unwrap()
}

async fn shutdown_fired(shutdown: &tokio::sync::Notify) -> bool {
    tokio::time::timeout(Duration::from_millis(50), shutdown.notified()).await.is_ok()
}

#[tokio::test]
async fn close_from_foreign_origin_is_forbidden() {
    let state = test_app_state();
    let shutdown = state.shutdown.clone();

    let resp = api_routes(state).oneshot(close_request(Some(FOREIGN_ORIGIN))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(!shutdown_fired(&shutdown).await);
}

#[tokio::test]
async fn close_from_app_origin_is_accepted() {
    let state = test_app_state();
    let shutdown = state.shutdown.clone();

    let resp = api_routes(state).oneshot(close_request(Some(APP_ORIGIN))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    assert!(shutdown_fired(&shutdown).await);
}

#[tokio::test]
async fn publish_from_foreign_origin_is_forbidden() {
    let state = test_app_state();
    let mut rx = state.commands.subscribe();

    let mut req = publish_request(serde_json::json!({"name": "create"}));
    req.headers_mut().insert(header::ORIGIN, FOREIGN_ORIGIN.parse().unwrap());
    let resp = api_routes(state).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn preflight_from_foreign_origin_gets_no_cors_grant() {
    let req = Request::options("/api/app/close")
        .header(header::ORIGIN, FOREIGN_ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let resp = api_routes(test_app_state()).oneshot(req).await.unwrap();

    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn preflight_from_app_origin_is_granted() {
    let req = Request::options("/api/app/close")
        .header(header::ORIGIN, APP_ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let resp = api_routes(test_app_state()).oneshot(req).await.unwrap();

    assert_eq!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), APP_ORIGIN);
}
