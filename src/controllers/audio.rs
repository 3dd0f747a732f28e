use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Extension, Json,
};
use std::sync::Arc;

use super::phrases::attachment;
use super::progress::log_progress;
use crate::{
    domain::audio::{AudioService, AudioServiceApi, GenerateRequest, GenerationReport},
    error::{AppError, AppResult},
    infrastructure::auth::{AuthUser, RequestId},
};

pub struct AudioController {
    audio_service: Arc<AudioService>,
}

impl AudioController {
    pub fn new(audio_service: Arc<AudioService>) -> Self {
        Self { audio_service }
    }

    /// POST /api/audio/generate - Assemble the spaced-repetition track
    pub async fn generate(
        State(controller): State<Arc<AudioController>>,
        Extension(auth_user): Extension<AuthUser>,
        Extension(request_id): Extension<RequestId>,
        Json(request): Json<GenerateRequest>,
    ) -> AppResult<Json<GenerationReport>> {
        tracing::info!(
            username = %auth_user.username,
            request_id = %request_id.0,
            pairs = request.pairs.len(),
            "Audio generation requested"
        );

        let report = controller
            .audio_service
            .generate(request, log_progress("audio_generation"))
            .await?;

        Ok(Json(report))
    }

    /// GET /api/audio/:hash - Download a generated track
    pub async fn download(
        State(controller): State<Arc<AudioController>>,
        Path(hash): Path<String>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let stored = controller
            .audio_service
            .fetch(&hash)
            .await
            .ok_or_else(|| AppError::NotFound(format!("No generated audio for {}", hash)))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(controller.audio_service.content_type()),
        );
        headers.insert(header::CONTENT_DISPOSITION, attachment(&stored.file_name())?);
        headers.insert(
            "X-Duration-Ms",
            HeaderValue::from(stored.track.duration_ms),
        );
        headers.insert(
            "X-Pairs-Rendered",
            HeaderValue::from(stored.track.pairs_rendered as u64),
        );

        Ok((StatusCode::OK, headers, Body::from(stored.track.audio.clone())))
    }

    /// DELETE /api/audio/:hash - Forget a generated track
    pub async fn invalidate(
        State(controller): State<Arc<AudioController>>,
        Path(hash): Path<String>,
    ) -> AppResult<StatusCode> {
        if controller.audio_service.invalidate(&hash).await {
            Ok(StatusCode::NO_CONTENT)
        } else {
            Err(AppError::NotFound(format!("No generated audio for {}", hash)))
        }
    }
}
