use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tracing::{error, info, instrument, warn};

use defectscan_analyzer::DefectAssembler;
use defectscan_core::{AnalysisResult, ScanError};

use crate::storage::UploadStore;

/// Multipart field carrying the image.
const IMAGE_FIELD: &str = "image";
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Shared application state for API handlers.
pub struct AppState {
    pub assembler: Arc<DefectAssembler>,
    pub store: UploadStore,
    /// Bound on one whole analysis; the analyzer itself never times out.
    pub analysis_timeout: Duration,
}

/// Build the Axum router with all API routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/upload", post(upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Error response: `{"error": message}` with a status per failure kind.
pub struct ApiError(ScanError);

impl From<ScanError> for ApiError {
    fn from(err: ScanError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ScanError::NoFileUploaded => StatusCode::BAD_REQUEST,
            ScanError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Health check endpoint.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running",
    }))
}

/// Accept an image, store it, and return the assembled analysis.
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, ApiError> {
    info!("Received upload request");

    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ScanError::Other(anyhow::anyhow!("invalid multipart body: {e}")))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ScanError::Other(anyhow::anyhow!("failed to read upload: {e}")))?;
        image = Some((file_name, bytes));
        break;
    }

    let Some((file_name, bytes)) = image else {
        warn!("No file uploaded");
        return Err(ScanError::NoFileUploaded.into());
    };

    let path = state
        .store
        .save(file_name.as_deref(), &bytes)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to store upload");
            ScanError::Storage(e.to_string())
        })?;
    let file_path = path.to_string_lossy().into_owned();

    let result = tokio::time::timeout(
        state.analysis_timeout,
        state.assembler.assemble_analysis(&file_path),
    )
    .await
    .map_err(|_| {
        error!(file_path = %file_path, "Analysis timed out");
        ScanError::Timeout(state.analysis_timeout.as_secs())
    })?;

    info!(
        file_path = %result.file_path,
        defects = result.defects.len(),
        "Sending analysis"
    );
    Ok(Json(result))
}
