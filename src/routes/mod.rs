use axum::Router;

use crate::state::SharedState;

/// `POST /api/color`.
pub mod color;
/// Swagger UI and the OpenAPI document.
pub mod docs;
/// SVG and PNG downloads.
pub mod export;
pub mod extractors;
/// `/healthcheck`.
pub mod health;
/// Designer session editing.
pub mod session;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(color::router())
        .merge(session::router(&state))
        .merge(export::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{HeaderMap, Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::AppConfig, services::color_service::tests::CannedModel, state::AppState,
    };

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body.to_vec())
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn error_message(body: &[u8]) -> String {
        let value: Value = serde_json::from_slice(body).unwrap();
        value["error"].as_str().unwrap().to_string()
    }

    async fn new_session(app: &Router) -> String {
        let request = Request::post("/sessions").body(Body::empty()).unwrap();
        let (status, _, body) = send(app, request).await;
        assert_eq!(status, StatusCode::CREATED);
        let value: Value = serde_json::from_slice(&body).unwrap();
        value["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn prompt_answer_carries_greeting_and_colors() {
        let model = CannedModel::replying(r##"["#FF5733", "#FFC300"]"##);
        let app = router(AppState::new(AppConfig::default(), Some(model)));

        let (status, _, body) = send(&app, post_json("/api/color", r#"{"prompt": "sunset"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value,
            json!({ "message": "Hello God!", "colors": ["#FF5733", "#FFC300"] })
        );
    }

    #[tokio::test]
    async fn blank_and_missing_prompts_get_the_exact_error_body() {
        let model = CannedModel::replying(r##"["#FF5733"]"##);
        let app = router(AppState::new(AppConfig::default(), Some(model.clone())));

        for payload in [r#"{"prompt": "   "}"#, "{}"] {
            let (status, _, body) = send(&app, post_json("/api/color", payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, br#"{"error":"Please provide prompt."}"#);
        }
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn unreadable_bodies_answer_with_an_error_object() {
        let app = router(AppState::new(AppConfig::default(), None));

        let (status, _, body) = send(&app, post_json("/api/color", r#"{"prompt": 42}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(!error_message(&body).is_empty());

        let (status, _, body) = send(&app, post_json("/api/color", "not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!error_message(&body).is_empty());
    }

    #[tokio::test]
    async fn bad_path_and_query_answer_with_an_error_object() {
        let app = router(AppState::new(AppConfig::default(), None));

        let (status, _, body) = send(&app, get("/sessions/not-a-uuid")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!error_message(&body).is_empty());

        let id = new_session(&app).await;
        let request = Request::post(format!("/sessions/{id}/image?method=sepia"))
            .body(Body::from(vec![1, 2, 3]))
            .unwrap();
        let (status, _, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!error_message(&body).is_empty());
    }

    #[tokio::test]
    async fn unknown_session_is_a_json_not_found() {
        let app = router(AppState::new(AppConfig::default(), None));
        let uri = format!("/sessions/{}", uuid::Uuid::new_v4());

        let (status, _, body) = send(&app, get(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(error_message(&body).contains("not found"));
    }

    #[tokio::test]
    async fn add_color_without_a_body_appends_white() {
        let app = router(AppState::new(AppConfig::default(), None));
        let id = new_session(&app).await;

        let request = Request::post(format!("/sessions/{id}/colors"))
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["colors"][3], "#FFFFFF");
    }

    #[tokio::test]
    async fn svg_export_is_an_attachment() {
        let app = router(AppState::new(AppConfig::default(), None));
        let id = new_session(&app).await;

        let (status, headers, body) = send(&app, get(&format!("/sessions/{id}/export/svg"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "image/svg+xml;charset=utf-8");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            r#"attachment; filename="diamond_logo.svg""#
        );
        assert!(body.starts_with(b"<svg "));
    }

    #[tokio::test]
    async fn png_export_is_an_attachment() {
        let app = router(AppState::new(AppConfig::default(), None));
        let id = new_session(&app).await;

        let (status, headers, body) = send(&app, get(&format!("/sessions/{id}/export/png"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "image/png");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            r#"attachment; filename="diamond_logo.png""#
        );
        assert_eq!(&body[1..4], b"PNG");
    }
}
