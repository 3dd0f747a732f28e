use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Extension, Json,
};
use std::sync::Arc;

use super::progress::log_progress;
use crate::{
    domain::phrases::{
        export_file_name, ExportRequest, PhraseBatch, PhraseBatchRequest, PhraseService,
        PhraseServiceApi,
    },
    error::{AppError, AppResult},
    infrastructure::auth::AuthUser,
};

/// Uploads larger than this are rejected before parsing
const MAX_FILE_BYTES: usize = 1024 * 1024;

pub struct PhrasesController {
    phrase_service: Arc<PhraseService>,
}

impl PhrasesController {
    pub fn new(phrase_service: Arc<PhraseService>) -> Self {
        Self { phrase_service }
    }

    /// POST /api/phrases/batch - Parse uploaded files and fill in translations
    pub async fn prepare_batch(
        State(controller): State<Arc<PhrasesController>>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<PhraseBatchRequest>,
    ) -> AppResult<Json<PhraseBatch>> {
        tracing::info!(
            username = %auth_user.username,
            files = request.files.len(),
            "Phrase batch requested"
        );

        if let Some(file) = request.files.iter().find(|f| f.content.len() > MAX_FILE_BYTES) {
            return Err(AppError::PayloadTooLarge(format!(
                "{} is larger than {} bytes",
                file.name, MAX_FILE_BYTES
            )));
        }

        let batch = controller
            .phrase_service
            .prepare_batch(request, log_progress("phrase_batch"))
            .await?;

        Ok(Json(batch))
    }

    /// POST /api/phrases/export - Download edited pairs as a text file
    pub async fn export(
        State(controller): State<Arc<PhrasesController>>,
        Json(request): Json<ExportRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, String)> {
        let body = controller.phrase_service.export_text(&request)?;
        let file_name = export_file_name(
            request.native_language,
            request.foreign_language,
            request.pairs.len(),
        );

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        headers.insert(header::CONTENT_DISPOSITION, attachment(&file_name)?);

        Ok((StatusCode::OK, headers, body))
    }
}

pub(crate) fn attachment(file_name: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file_name))
        .map_err(|e| AppError::Internal(format!("Invalid file name header: {}", e)))
}
