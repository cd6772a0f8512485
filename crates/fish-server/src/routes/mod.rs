//! Route definitions for the HTTP API.

pub mod admin;
pub mod fishes;
pub mod health;
pub mod path;

use axum::{Router, http::Uri};

use crate::error::ApiError;
use crate::state::AppState;

/// Answer unknown paths with a JSON 404.
async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}

/// Build the complete router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(fishes::routes())
        .merge(admin::routes())
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
        response::Response,
    };
    use base64::{Engine, engine::general_purpose::STANDARD};
    use fish_store::{Fish, IdGenerator, Store};
    use futures::stream;
    use std::io;
    use tower::ServiceExt;

    use crate::config::ServerConfig;

    const PASSWORD: &str = "correct horse";

    fn app_with(store: Store) -> (AppState, Router) {
        let state = AppState::new(store, ServerConfig::with_admin_password(PASSWORD));
        (state.clone(), build_router(state))
    }

    fn app() -> (AppState, Router) {
        app_with(Store::new())
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_fish(content_type: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder().method(Method::POST).uri("/fishes");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_list_empty_store_is_empty_array() {
        let (_, app) = app();
        let response = send(&app, get("/fishes")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let (_, app) = app();
        let response = send(
            &app,
            post_fish(
                Some("application/json"),
                r#"{"name":"Salmon","environment":"river","max_length":90}"#,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert!(!id.is_empty());

        let listed = body_json(send(&app, get("/fishes")).await).await;
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["id"], id.as_str());
        assert_eq!(listed[0]["name"], "Salmon");
        assert_eq!(listed[0]["environment"], "river");
        assert_eq!(listed[0]["max_length"], 90);
    }

    #[tokio::test]
    async fn test_create_ignores_client_id() {
        let (state, app) = app_with(Store::with_id_generator(IdGenerator::with_clock(|| 77)));
        let response = send(
            &app,
            post_fish(Some("application/json"), r#"{"id":"mine","name":"Eel"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["id"], "77");
        assert!(state.store().get("mine").is_err());
    }

    #[tokio::test]
    async fn test_create_wrong_content_type() {
        let (state, app) = app();
        let response = send(
            &app,
            post_fish(Some("text/plain"), r#"{"name":"Salmon"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body = body_json(response).await;
        assert!(body["error"]["message"].as_str().unwrap().contains("text/plain"));
        assert!(state.store().is_empty());
    }

    #[tokio::test]
    async fn test_create_missing_content_type() {
        let (state, app) = app();
        let response = send(&app, post_fish(None, r#"{"name":"Salmon"}"#)).await;

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(state.store().is_empty());
    }

    #[tokio::test]
    async fn test_create_content_type_must_match_exactly() {
        let (state, app) = app();
        let response = send(
            &app,
            post_fish(Some("application/json; charset=utf-8"), r#"{}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(state.store().is_empty());
    }

    #[tokio::test]
    async fn test_create_malformed_body_does_not_insert() {
        let (state, app) = app();
        let response = send(&app, post_fish(Some("application/json"), "{not json")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert!(state.store().is_empty());
    }

    #[tokio::test]
    async fn test_create_empty_object_is_accepted() {
        let (state, app) = app();
        let response = send(&app, post_fish(Some("application/json"), "{}")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.store().len(), 1);
    }

    #[tokio::test]
    async fn test_collection_other_methods_not_allowed() {
        let (_, app) = app();
        for method in [Method::HEAD, Method::PUT, Method::DELETE, Method::PATCH] {
            let request = Request::builder()
                .method(method.clone())
                .uri("/fishes")
                .body(Body::empty())
                .unwrap();
            let response = send(&app, request).await;
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        }
    }

    #[tokio::test]
    async fn test_item_paths_reject_head() {
        let (state, app) = app();
        let fish = state.store().insert(Fish::named("Pike"));

        for uri in [format!("/fishes/{}", fish.id), "/fishes/random".to_string()] {
            let request = Request::builder()
                .method(Method::HEAD)
                .uri(&uri)
                .body(Body::empty())
                .unwrap();
            let response = send(&app, request).await;
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_create_body_read_failure() {
        let (state, app) = app();
        let chunks: Vec<Result<&'static str, io::Error>> = vec![
            Ok(r#"{"name":"#),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer went away")),
        ];
        let request = Request::builder()
            .method(Method::POST)
            .uri("/fishes")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from_stream(stream::iter(chunks)))
            .unwrap();

        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"]["code"], "INTERNAL_ERROR");
        assert!(state.store().is_empty());
    }

    #[tokio::test]
    async fn test_create_oversized_body() {
        let (state, app) = app();
        // One byte past axum's default 2 MB body limit.
        let oversized = " ".repeat(2 * 1024 * 1024 + 1);

        let response = send(&app, post_fish(Some("application/json"), &oversized)).await;

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert!(state.store().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let (state, app) = app();
        let fish = state.store().insert(Fish::named("Pike").with_max_length(150));

        let response = send(&app, get(&format!("/fishes/{}", fish.id))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body, serde_json::to_value(&fish).unwrap());
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let (state, app) = app();
        state.store().insert(Fish::named("Pike"));

        let response = send(&app, get("/fishes/doesnotexist")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_item_paths() {
        let (state, app) = app();
        let fish = state.store().insert(Fish::named("Pike"));

        for uri in [
            "/fishes/".to_string(),
            format!("/fishes/{}/extra", fish.id),
            format!("/fishes/{}/", fish.id),
            "/fishes/random/".to_string(),
        ] {
            let response = send(&app, get(&uri)).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_random_empty_store() {
        let (_, app) = app();
        let response = send(&app, get("/fishes/random")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_random_single_record_redirects() {
        let (state, app) = app_with(Store::with_id_generator(IdGenerator::with_clock(|| 123)));
        state.store().insert(Fish::named("Trout"));

        let response = send(&app, get("/fishes/random")).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/fishes/123"
        );
    }

    #[tokio::test]
    async fn test_random_redirect_target_exists() {
        let (state, app) = app();
        for name in ["Cod", "Tuna", "Zander"] {
            state.store().insert(Fish::named(name));
        }

        let response = send(&app, get("/fishes/random")).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        let location = response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();

        let followed = send(&app, get(&location)).await;
        assert_eq!(followed.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let (_, app) = app();
        let response = send(&app, get("/sharks")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
    }

    fn admin_request(credentials: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/admin");
        if let Some(raw) = credentials {
            builder = builder.header(
                header::AUTHORIZATION,
                format!("Basic {}", STANDARD.encode(raw)),
            );
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_admin_without_credentials() {
        let (_, app) = app();
        let response = send(&app, admin_request(None)).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    }

    #[tokio::test]
    async fn test_admin_wrong_password() {
        let (_, app) = app();
        let response = send(&app, admin_request(Some("admin:wrong"))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_wrong_user() {
        let (_, app) = app();
        let response = send(&app, admin_request(Some(&format!("root:{PASSWORD}")))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_correct_credentials() {
        let (_, app) = app();
        let response = send(&app, admin_request(Some(&format!("admin:{PASSWORD}")))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        assert!(body_text(response).await.contains("<html>"));
    }

    #[tokio::test]
    async fn test_health() {
        let (_, app) = app();
        let response = send(&app, get("/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }
}
