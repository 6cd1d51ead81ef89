//! Axum router configuration with middleware.
//!
//! Middleware: CORS (restricted to the configured frontend origin), tracing.

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.frontend_origin);

    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route(
            "/conversations",
            get(handlers::conversation::list_conversations)
                .post(handlers::conversation::create_conversation),
        )
        .route(
            "/conversations/{id}",
            get(handlers::conversation::get_conversation),
        )
        .route(
            "/conversations/{id}/messages",
            post(handlers::conversation::send_message),
        )
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the single frontend origin; `*` allows any origin.
fn cors_layer(frontend_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if frontend_origin.trim() == "*" {
        tracing::warn!("CORS: allowing all origins");
        return layer.allow_origin(Any);
    }

    match HeaderValue::from_str(frontend_origin.trim()) {
        Ok(origin) => {
            tracing::info!(origin = %frontend_origin, "CORS: allowing frontend origin");
            layer.allow_origin(AllowOrigin::exact(origin))
        }
        Err(e) => {
            tracing::warn!(origin = %frontend_origin, error = %e, "CORS: invalid frontend origin, cross-origin requests disabled");
            layer
        }
    }
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    use chatdesk_core::relay::{BoxDialogueRelay, DialogueRelay};
    use chatdesk_types::chat::Turn;
    use chatdesk_types::config::GlobalConfig;
    use chatdesk_types::error::RelayError;

    use super::*;

    struct FixedRelay(&'static str);

    impl DialogueRelay for FixedRelay {
        async fn send(
            &self,
            _conversation_id: Uuid,
            _utterance: &str,
            _deadline: Duration,
        ) -> Result<Vec<Turn>, RelayError> {
            Ok(vec![Turn::agent(self.0)])
        }
    }

    struct DownRelay;

    impl DialogueRelay for DownRelay {
        async fn send(
            &self,
            _conversation_id: Uuid,
            _utterance: &str,
            _deadline: Duration,
        ) -> Result<Vec<Turn>, RelayError> {
            Err(RelayError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    fn app<R: DialogueRelay + 'static>(relay: R) -> Router {
        build_router(AppState::with_relay(
            GlobalConfig::default(),
            BoxDialogueRelay::new(relay),
        ))
    }

    async fn call(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn login(app: &Router, username: &str) -> String {
        let (status, body) = call(
            app,
            "POST",
            "/auth/login",
            None,
            Some(json!({"username": username, "password": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(DownRelay);
        let (status, body) = call(&app, "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_login_validation() {
        let app = app(DownRelay);
        let (status, body) = call(
            &app,
            "POST",
            "/auth/login",
            None,
            Some(json!({"username": "  Alex "})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["displayName"], "Alex");

        let (status, body) =
            call(&app, "POST", "/auth/login", None, Some(json!({"username": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_login_rejects_unusable_bodies_with_error_body() {
        let app = app(DownRelay);
        let cases: [(Option<&str>, &str); 5] = [
            (None, r#"{"username":"alex"}"#),
            (Some("application/json"), r#"{"username":42}"#),
            (Some("application/json"), ""),
            (Some("application/json"), "{not json"),
            (Some("application/json"), "{}"),
        ];

        for (content_type, raw) in cases {
            let mut builder = Request::builder().method("POST").uri("/auth/login");
            if let Some(content_type) = content_type {
                builder = builder.header(header::CONTENT_TYPE, content_type);
            }
            let response = app
                .clone()
                .oneshot(builder.body(Body::from(raw)).unwrap())
                .await
                .unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();

            if content_type.is_none() {
                // A missing content type is tolerated; the body decides.
                assert_eq!(status, StatusCode::OK, "{raw}");
                assert_eq!(body["displayName"], "alex");
            } else {
                assert_eq!(status, StatusCode::BAD_REQUEST, "{raw}");
                assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR", "{raw}");
                assert!(body["meta"]["timestamp"].is_string());
            }
        }
    }

    #[tokio::test]
    async fn test_requires_bearer_identity() {
        let app = app(DownRelay);
        for (method, uri) in [
            ("GET", "/conversations".to_string()),
            ("POST", "/conversations".to_string()),
            ("GET", format!("/conversations/{}", Uuid::now_v7())),
        ] {
            let (status, _) = call(&app, method, &uri, None, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
            let (status, _) = call(&app, method, &uri, Some("not-a-token"), None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        }

        let uri = format!("/conversations/{}/messages", Uuid::now_v7());
        let (status, _) = call(&app, "POST", &uri, None, Some(json!({"message": "hi"}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_end_to_end_conversation() {
        let app = app(FixedRelay("ARPU is revenue per user"));
        let token = login(&app, "alex").await;

        let (status, created) =
            call(&app, "POST", "/conversations", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["title"], "New conversation");
        assert_eq!(created["turns"], json!([]));
        let id = created["id"].as_str().unwrap().to_string();

        let (status, detail) = call(
            &app,
            "POST",
            &format!("/conversations/{id}/messages"),
            Some(&token),
            Some(json!({"message": "what is ARPU"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["title"], "what is ARPU");
        assert_eq!(detail["turns"][0]["role"], "human");
        assert_eq!(detail["turns"][0]["text"], "what is ARPU");
        assert_eq!(detail["turns"][1]["role"], "agent");
        assert_eq!(detail["turns"][1]["text"], "ARPU is revenue per user");
        assert_eq!(detail["turns"].as_array().unwrap().len(), 2);

        let (status, fetched) =
            call(&app, "GET", &format!("/conversations/{id}"), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, detail);

        let (status, list) = call(&app, "GET", "/conversations", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list[0]["id"], id.as_str());
        assert_eq!(list[0]["turnCount"], 2);
    }

    #[tokio::test]
    async fn test_create_with_title() {
        let app = app(DownRelay);
        let token = login(&app, "alex").await;
        let (status, created) = call(
            &app,
            "POST",
            "/conversations",
            Some(&token),
            Some(json!({"title": "Q3 churn"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["title"], "Q3 churn");
    }

    #[tokio::test]
    async fn test_relay_failure_still_succeeds() {
        let app = app(DownRelay);
        let token = login(&app, "alex").await;
        let (_, created) = call(&app, "POST", "/conversations", Some(&token), None).await;
        let id = created["id"].as_str().unwrap();

        let (status, detail) = call(
            &app,
            "POST",
            &format!("/conversations/{id}/messages"),
            Some(&token),
            Some(json!({"message": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["turns"][0]["role"], "human");
        assert_eq!(detail["turns"][0]["text"], "hello");
        assert_eq!(detail["turns"][1]["role"], "system");
        assert_eq!(detail["turns"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_send_validation_and_ownership() {
        let app = app(FixedRelay("ok"));
        let alex = login(&app, "alex").await;
        let blair = login(&app, "blair").await;
        let (_, created) = call(&app, "POST", "/conversations", Some(&alex), None).await;
        let id = created["id"].as_str().unwrap();
        let uri = format!("/conversations/{id}/messages");

        let (status, _) = call(&app, "POST", &uri, Some(&alex), Some(json!({"message": "   "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(&app, "POST", &uri, Some(&blair), Some(json!({"message": "hi"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) =
            call(&app, "GET", &format!("/conversations/{id}"), Some(&blair), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, list) = call(&app, "GET", "/conversations", Some(&blair), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([]));

        let (status, _) = call(
            &app,
            "POST",
            "/conversations/not-a-uuid/messages",
            Some(&alex),
            Some(json!({"message": "hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, detail) =
            call(&app, "GET", &format!("/conversations/{id}"), Some(&alex), None).await;
        assert_eq!(detail["turns"], json!([]));
    }

    #[tokio::test]
    async fn test_owner_identity_ignores_case() {
        let app = app(FixedRelay("ok"));
        let lower = login(&app, "alex").await;
        let upper = login(&app, "ALEX").await;
        let (_, created) = call(&app, "POST", "/conversations", Some(&lower), None).await;
        let id = created["id"].as_str().unwrap();

        let (status, _) =
            call(&app, "GET", &format!("/conversations/{id}"), Some(&upper), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn test_cors_layer_variants_build() {
        let _ = cors_layer("*");
        let _ = cors_layer("http://localhost:5173");
        let _ = cors_layer("bad\norigin");
    }
}
