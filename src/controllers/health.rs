use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Reports which collaborators this instance talks to
pub struct HealthController {
    tts_provider: String,
    translation_model: String,
    encoder_available: bool,
}

impl HealthController {
    pub fn new(tts_provider: String, translation_model: String, encoder_available: bool) -> Self {
        Self {
            tts_provider,
            translation_model,
            encoder_available,
        }
    }

    /// GET /health/ready
    pub async fn health_ready(State(controller): State<Arc<HealthController>>) -> impl IntoResponse {
        let (status, readiness, encoder) = if controller.encoder_available {
            (StatusCode::OK, "ready", "available")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "not_ready", "missing")
        };

        (
            status,
            Json(json!({
                "status": readiness,
                "tts": controller.tts_provider,
                "translation": controller.translation_model,
                "encoder": encoder,
            })),
        )
    }
}
