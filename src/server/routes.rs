//! HTTP server for the emotion classifier.
//!
//! `GET /` liveness, `GET /health` status, `POST /predict` classification.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info, warn};

use crate::classifier::{EmotionClassifier, EmotionLabel};

use super::types::{ApiError, HealthResponse, PredictRequest, PredictResponse, StatusMessage};

/// Largest accepted request body
const MAX_BODY_BYTES: usize = 64 * 1024;

pub const STATUS_MESSAGE: &str = "MoodTune AI App running";

/// Shared state for the HTTP server
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<EmotionClassifier>,
}

/// Build the router with CORS and a body size limit
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_endpoint))
        .route("/health", get(health_endpoint))
        .route("/predict", post(predict_endpoint))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Serve until Ctrl+C
pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind server to {}: {}", addr, e);
        anyhow::anyhow!("Failed to bind {}: {}", addr, e)
    })?;
    info!("Emotion classifier listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("Server error: {}", e);
            anyhow::anyhow!("Server error: {}", e)
        })?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("Received Ctrl+C, shutting down...");
}

async fn root_endpoint() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: STATUS_MESSAGE,
    })
}

async fn health_endpoint(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        healthy: true,
        labels: EmotionLabel::ALL.iter().map(|label| label.name()).collect(),
        threshold: state.classifier.policy().threshold,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

async fn predict_endpoint(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let classifier = state.classifier.clone();

    // Inference is CPU-bound; keep it off the async workers
    let result = tokio::task::spawn_blocking(move || classifier.classify(&req.text))
        .await
        .map_err(|e| {
            error!("Classification task failed: {}", e);
            ApiError::internal(format!("Classification task failed: {}", e))
        })?;

    match result {
        Ok(prediction) => Ok(Json(PredictResponse {
            emotions: prediction.emotions,
        })),
        Err(e) => {
            warn!("Prediction failed: {}", e);
            Err(ApiError::internal(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{DecisionPolicy, Encoder, FailingEncoder, FixedEncoder};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app_with(encoder: Arc<dyn Encoder>) -> Router {
        let classifier = EmotionClassifier::new(encoder, DecisionPolicy::default()).unwrap();
        router(AppState {
            classifier: Arc::new(classifier),
        })
    }

    fn predict_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_returns_status_message() {
        let app = app_with(Arc::new(FixedEncoder::new([0.0; 6])));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "MoodTune AI App running");
    }

    #[tokio::test]
    async fn test_predict_returns_emotions() {
        let app = app_with(Arc::new(FixedEncoder::new([2.0, 1.0, -4.0, -4.0, -4.0, -4.0])));
        let response = app
            .oneshot(predict_request(r#"{"text": "lol this is great"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({"emotions": ["Fun", "Sadness"]}));
    }

    #[tokio::test]
    async fn test_predict_fallback_single_label() {
        let app = app_with(Arc::new(FixedEncoder::new([-4.0, -4.0, -4.0, -1.0, -4.0, -4.0])));
        let response = app.oneshot(predict_request(r#"{"text": ""}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["emotions"], serde_json::json!(["Love"]));
    }

    #[tokio::test]
    async fn test_predict_missing_text_rejected() {
        let app = app_with(Arc::new(FixedEncoder::new([0.0; 6])));
        let response = app.oneshot(predict_request(r#"{"message": "hi"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_predict_non_string_text_rejected() {
        let app = app_with(Arc::new(FixedEncoder::new([0.0; 6])));
        let response = app.oneshot(predict_request(r#"{"text": 42}"#)).await.unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_predict_encoder_failure_is_500() {
        let app = app_with(Arc::new(FailingEncoder));
        let response = app
            .oneshot(predict_request(r#"{"text": "hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("out of memory"));
    }

    #[tokio::test]
    async fn test_health_lists_labels() {
        let app = app_with(Arc::new(FixedEncoder::new([0.0; 6])));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["healthy"], true);
        assert_eq!(json["threshold"], 0.5);
        assert_eq!(
            json["labels"],
            serde_json::json!(["Fun", "Sadness", "Angry", "Love", "General", "Motivation"])
        );
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let app = app_with(Arc::new(FixedEncoder::new([0.0; 6])));
        let body = format!(r#"{{"text": "{}"}}"#, "a".repeat(MAX_BODY_BYTES + 1));
        let request = Request::builder()
            .method("POST")
            .uri("/predict")
            .header("content-type", "application/json")
            .header("content-length", body.len())
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
