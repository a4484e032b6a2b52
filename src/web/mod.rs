//! Web API module for MigEmulator.
//!
//! A small stateless JSON API exposing both converters, so a browser front end
//! can upload a file's content and get the converted text back.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/baseline` - Baseline keymap and PCOMM key mappings
//! - `POST /api/keymap` - Merge a PCOMM keymap with the ZIE baseline
//! - `POST /api/srl` - Convert an SRL script to SFTL
//! - `GET /api/config` - Current conversion defaults
//!
//! Output files are only written when the request names one, and always
//! inside the workspace directory.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::keymap::baseline::{BASELINE_KEYMAP, VENDOR_KEY_MAP};
use crate::keymap::{MergeOptions, UnmappedKeyPolicy};
use crate::services::{ConversionError, ConversionService};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Directory output files are written to
    workspace_root: PathBuf,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: Config, workspace_root: PathBuf) -> Self {
        Self {
            config: Arc::new(config),
            workspace_root,
        }
    }

    /// Returns the workspace root directory.
    #[must_use]
    pub fn workspace_root(&self) -> &PathBuf {
        &self.workspace_root
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Baseline entry in API responses.
#[derive(Debug, Serialize)]
pub struct BaselineEntry {
    /// ZIE key identifier.
    pub key: &'static str,
    /// Default value.
    pub value: &'static str,
}

/// Vendor key mapping in API responses.
#[derive(Debug, Serialize)]
pub struct KeyMapping {
    /// PCOMM key identifier.
    pub vendor: &'static str,
    /// ZIE key identifier it maps to.
    pub baseline: &'static str,
}

/// Baseline listing response.
#[derive(Debug, Serialize)]
pub struct BaselineResponse {
    /// Baseline keymap in output order.
    pub entries: Vec<BaselineEntry>,
    /// PCOMM to ZIE key mappings.
    pub mappings: Vec<KeyMapping>,
}

/// Keymap conversion request.
#[derive(Debug, Deserialize)]
pub struct KeymapRequest {
    /// Full text of the PCOMM keymap file.
    pub content: String,
    /// Policy for unmapped vendor keys (defaults to config).
    #[serde(default)]
    pub unmapped: Option<UnmappedKeyPolicy>,
    /// Header lines to skip (defaults to config).
    #[serde(default)]
    pub header_lines: Option<usize>,
    /// Output filename inside the workspace; nothing is written when absent.
    #[serde(default)]
    pub output: Option<String>,
}

/// Keymap conversion response.
#[derive(Debug, Serialize)]
pub struct KeymapResponse {
    /// Rendered ZIE keymap.
    pub output: String,
    /// File written, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Number of merged rows.
    pub entries: usize,
    /// Number of baseline keys overridden by the vendor file.
    pub overridden: usize,
}

/// SRL conversion request.
#[derive(Debug, Deserialize)]
pub struct SrlRequest {
    /// Full text of the SRL script.
    pub content: String,
    /// Output filename inside the workspace; nothing is written when absent.
    #[serde(default)]
    pub output: Option<String>,
}

/// SRL conversion response.
#[derive(Debug, Serialize)]
pub struct SrlResponse {
    /// Rendered SFTL script (CRLF line endings).
    pub output: String,
    /// File written, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Number of transfer actions.
    pub directives: usize,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

impl From<ConversionError> for (StatusCode, Json<ApiError>) {
    fn from(err: ConversionError) -> Self {
        if err.is_input_error() {
            (StatusCode::BAD_REQUEST, Json(ApiError::new(err.to_string())))
        } else {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::with_details("Failed to write output", format!("{err:#}"))),
            )
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Validates a filename to prevent path traversal attacks.
fn validate_filename(filename: &str) -> Result<&str, ApiError> {
    if filename.is_empty() {
        return Err(ApiError::new("Filename cannot be empty"));
    }

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(ApiError::new("Invalid filename: path traversal not allowed"));
    }

    if filename.starts_with('.') {
        return Err(ApiError::new("Invalid filename: hidden files not allowed"));
    }

    Ok(filename)
}

/// Resolves an optional output filename against the workspace.
fn resolve_output(
    state: &AppState,
    output: Option<&str>,
) -> Result<Option<PathBuf>, (StatusCode, Json<ApiError>)> {
    output
        .map(|name| {
            validate_filename(name)
                .map(|name| state.workspace_root.join(name))
                .map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))
        })
        .transpose()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health - Health check.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/baseline - Embedded tables.
async fn get_baseline() -> Json<BaselineResponse> {
    Json(BaselineResponse {
        entries: BASELINE_KEYMAP
            .iter()
            .map(|&(key, value)| BaselineEntry { key, value })
            .collect(),
        mappings: VENDOR_KEY_MAP
            .iter()
            .map(|&(vendor, baseline)| KeyMapping { vendor, baseline })
            .collect(),
    })
}

/// GET /api/config - Conversion defaults.
async fn get_config(State(state): State<AppState>) -> Json<Config> {
    Json(state.config.as_ref().clone())
}

/// POST /api/keymap - Merge a PCOMM keymap.
async fn convert_keymap(
    State(state): State<AppState>,
    Json(request): Json<KeymapRequest>,
) -> ApiResult<KeymapResponse> {
    let output = resolve_output(&state, request.output.as_deref())?;
    let options = MergeOptions {
        header_lines: request
            .header_lines
            .unwrap_or(state.config.keymap.header_lines),
        unmapped: request
            .unmapped
            .unwrap_or(state.config.keymap.unmapped_keys),
    };

    let lines: Vec<&str> = request.content.lines().collect();
    let result = ConversionService::convert_keymap(&lines, &options, output.as_deref())?;

    Ok(Json(KeymapResponse {
        entries: result.document.entries().len(),
        overridden: result.document.overridden_count(),
        path: result.path.map(|p| p.display().to_string()),
        output: result.text,
    }))
}

/// POST /api/srl - Convert an SRL script.
async fn convert_srl(
    State(state): State<AppState>,
    Json(request): Json<SrlRequest>,
) -> ApiResult<SrlResponse> {
    let output = resolve_output(&state, request.output.as_deref())?;

    let lines: Vec<&str> = request.content.lines().collect();
    let result = ConversionService::convert_srl(&lines, output.as_deref())?;

    Ok(Json(SrlResponse {
        directives: result.directives,
        path: result.path.map(|p| p.display().to_string()),
        output: result.text,
    }))
}

// ============================================================================
// Router
// ============================================================================

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    // The server runs locally next to its front end, so any origin is allowed.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/baseline", get(get_baseline))
        .route("/api/config", get(get_config))
        .route("/api/keymap", post(convert_keymap))
        .route("/api/srl", post(convert_srl))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(
    config: Config,
    workspace_root: PathBuf,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let state = AppState::new(config, workspace_root);
    info!("Workspace root: {}", state.workspace_root().display());
    let app = create_router(state);

    info!("Starting MigEmulator web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
