use axum::body::{Body, to_bytes};
use axum::extract::State;
use axum::http::{Request, StatusCode};
use soapserver::{LogState, ServerBuilder};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_json_route() {
    let mut server = ServerBuilder::new("Test", "127.0.0.1", 0).build();
    server
        .add_route("/api/status", || async { serde_json::json!({"status": "ok"}) })
        .await;

    let response = server
        .router()
        .await
        .oneshot(Request::get("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_post_handler_with_state() {
    async fn echo(State(prefix): State<String>, body: String) -> String {
        format!("{prefix}{body}")
    }

    let mut server = ServerBuilder::new("Test", "127.0.0.1", 0).build();
    server
        .add_post_handler_with_state("/echo", echo, "got:".to_string())
        .await;
    let router = server.router().await;

    let response = router
        .clone()
        .oneshot(Request::post("/echo").body(Body::from("hello")).unwrap())
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"got:hello");

    let response = router
        .oneshot(Request::get("/echo").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_log_routes() {
    let mut server = ServerBuilder::new("Test", "127.0.0.1", 0).build();
    server.add_log_routes(LogState::new(10)).await;
    let router = server.router().await;

    let response = router
        .clone()
        .oneshot(Request::get("/log-dump").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));

    let response = router
        .clone()
        .oneshot(
            Request::post("/log-setup")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"level":"debug"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["current_level"], "DEBUG");

    let response = router
        .oneshot(
            Request::post("/log-setup")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"level":"loud"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_start_binds_an_ephemeral_port() {
    let mut server = ServerBuilder::new("Test", "127.0.0.1", 0).build();
    server.start().await.unwrap();

    let addr = server.local_addr().unwrap();
    assert_ne!(addr.port(), 0);
    assert_eq!(server.info().http_port, addr.port());
}
