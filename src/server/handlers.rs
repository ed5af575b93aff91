//! HTTP request handlers for the grid splitter API.
//!
//! # Endpoints
//!
//! - `POST /upload` - Upload an image and split it into a 3x3 grid
//! - `GET /health` - Health check endpoint
//! - `GET /` - Service banner

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use rand::Rng;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::SplitError;
use crate::grid::GridPartitioner;
use crate::storage::ArtifactStore;

/// Name of the multipart field carrying the image.
pub const UPLOAD_FIELD: &str = "file";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state, passed to handlers via Axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    /// The partitioner shared across all requests
    pub partitioner: Arc<GridPartitioner>,

    /// The artifact store for uploads and pieces
    pub store: Arc<ArtifactStore>,
}

impl AppState {
    /// Create application state from a partitioner and store.
    pub fn new(partitioner: GridPartitioner, store: ArtifactStore) -> Self {
        Self {
            partitioner: Arc::new(partitioner),
            store: Arc::new(store),
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Payload of a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadData {
    /// Public URL of the persisted original upload
    pub original_url: String,

    /// Public URLs of the nine grid pieces, row-major order
    pub grid_urls: Vec<String>,

    /// The unique name namespacing this request's artifacts
    pub unique_name: String,
}

/// JSON envelope returned by the upload endpoint, success or failure.
///
/// `code` mirrors the HTTP status so mini-program clients that only see the
/// body can still branch on it; `data` is null on failure.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Status code (200 on success)
    pub code: u16,

    /// Human-readable outcome message
    pub message: String,

    /// Upload result, absent on failure
    pub data: Option<UploadData>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service name
    pub service: String,

    /// Service version
    pub version: String,
}

/// Root endpoint response.
#[derive(Debug, Serialize)]
pub struct ServiceInfoResponse {
    /// Service banner message
    pub message: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert SplitError to an HTTP response.
///
/// Validation failures are the client's fault and map to 400; decode, encode
/// and storage failures map to 500. 5xx errors are logged at ERROR level,
/// 4xx at WARN.
impl IntoResponse for SplitError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            SplitError::Validation { reason } => (StatusCode::BAD_REQUEST, reason.clone()),

            SplitError::Decode { .. } | SplitError::Encode { .. } | SplitError::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), "Server error: {}", message);
        } else {
            warn!(status = status.as_u16(), "Client error: {}", message);
        }

        let envelope = UploadResponse {
            code: status.as_u16(),
            message,
            data: None,
        };

        (status, Json(envelope)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle image upload and 3x3 split.
///
/// # Endpoint
///
/// `POST /upload` with a multipart body carrying the image in a field named
/// `file`.
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "code": 200,
///   "message": "image split succeeded",
///   "data": {
///     "original_url": "/static/uploads/{unique_name}_{filename}",
///     "grid_urls": ["/static/grid_images/{unique_name}_1.jpg", "..."],
///     "unique_name": "{unique_name}"
///   }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing `file` field, non-image media type, or image
///   smaller than 3x3 pixels
/// - `500 Internal Server Error`: decode, encode or storage failure
///
/// Failures return the same envelope with `data: null` and `code` set to the
/// HTTP status.
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, SplitError> {
    let upload = read_image_field(&mut multipart).await?;
    let unique_name = generate_unique_name();

    // Persist the original first so its URL survives even if a client
    // retries the split with the same file.
    let original_filename = format!("{}_{}", unique_name, upload.filename);
    let original_url = state
        .store
        .persist_upload(&original_filename, &upload.data)
        .await?;

    // The decode/crop/encode pipeline is CPU-bound; run it off the async
    // runtime so it cannot stall other requests.
    let partitioner = Arc::clone(&state.partitioner);
    let source = upload.data.clone();
    let name = unique_name.clone();
    let result = tokio::task::spawn_blocking(move || partitioner.partition(&source, &name))
        .await
        .map_err(|e| SplitError::Encode {
            message: format!("partition task failed: {}", e),
        })??;

    // No partial commit: pieces exist only in memory until all nine encoded
    // successfully, so this loop never persists a truncated grid.
    let mut grid_urls = Vec::with_capacity(result.pieces.len());
    for piece in &result.pieces {
        grid_urls.push(state.store.persist_piece(piece).await?);
    }

    info!(
        unique_name = %unique_name,
        pieces = grid_urls.len(),
        "image split succeeded"
    );

    Ok(Json(UploadResponse {
        code: StatusCode::OK.as_u16(),
        message: "image split succeeded".to_string(),
        data: Some(UploadData {
            original_url,
            grid_urls,
            unique_name,
        }),
    }))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "grid-splitter".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle root requests with a service banner.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        message: "grid splitter service running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Upload Extraction
// =============================================================================

/// The image part extracted from a multipart upload.
struct ImageUpload {
    /// Sanitized client-supplied filename
    filename: String,

    /// Raw image bytes
    data: Bytes,
}

/// Pull the image out of the multipart body.
///
/// Skips unrelated fields; the first field named [`UPLOAD_FIELD`] wins. Media
/// type checking happens here, before any bytes are buffered, so non-image
/// uploads are rejected cheaply.
async fn read_image_field(multipart: &mut Multipart) -> Result<ImageUpload, SplitError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| SplitError::Validation {
            reason: format!("malformed multipart body: {}", e),
        })?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default();
        if !content_type.starts_with("image/") {
            return Err(SplitError::Validation {
                reason: "please upload an image file".to_string(),
            });
        }

        let filename = sanitize_filename(field.file_name());
        let data = field.bytes().await.map_err(|e| SplitError::Validation {
            reason: format!("failed to read upload: {}", e),
        })?;

        if data.is_empty() {
            return Err(SplitError::Validation {
                reason: "uploaded file is empty".to_string(),
            });
        }

        return Ok(ImageUpload { filename, data });
    }

    Err(SplitError::Validation {
        reason: format!("missing multipart field '{}'", UPLOAD_FIELD),
    })
}

/// Generate the unique name namespacing one request's artifacts.
///
/// 128 random bits, hex-encoded: collision-free in practice and safe to
/// embed in filenames and URLs without escaping.
pub fn generate_unique_name() -> String {
    let raw: [u8; 16] = rand::rng().random();
    hex::encode(raw)
}

/// Reduce a client-supplied filename to a safe basename.
///
/// Strips any path components (browsers may send full paths) and falls back
/// to a fixed name when the client sent none.
fn sanitize_filename(file_name: Option<&str>) -> String {
    let name = file_name
        .map(|n| n.rsplit(['/', '\\']).next().unwrap_or(n))
        .unwrap_or("");

    if name.is_empty() {
        "upload".to_string()
    } else {
        name.to_string()
    }
}

// =============================================================================
// Tests
// =============================================================================
