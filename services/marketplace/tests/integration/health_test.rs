use axum::http::StatusCode;

use ucademic_core::middleware::REQUEST_ID_HEADER;

use crate::helpers::spawn_app;

#[tokio::test]
async fn should_report_live_and_ready() {
    let app = spawn_app().await;

    let live = app.server.get("/healthz").await;
    assert_eq!(live.status_code(), StatusCode::OK);

    let ready = app.server.get("/readyz").await;
    assert_eq!(ready.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn should_tag_responses_with_request_id() {
    let app = spawn_app().await;

    let response = app.server.get("/healthz").await;
    let id = response.header(REQUEST_ID_HEADER);
    assert!(uuid::Uuid::parse_str(id.to_str().unwrap()).is_ok());
}
