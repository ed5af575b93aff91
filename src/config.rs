//! Configuration management for the grid splitter.
//!
//! Supports command-line arguments via clap, environment variables with the
//! `SPLITTER_` prefix, and sensible defaults for all optional settings.
//!
//! # Environment Variables
//!
//! - `SPLITTER_HOST` - Server bind address (default: 0.0.0.0)
//! - `SPLITTER_PORT` - Server port (default: 8000)
//! - `SPLITTER_STATIC_ROOT` - Directory for uploads and pieces (default: static)
//! - `SPLITTER_JPEG_QUALITY` - Piece JPEG quality (default: 90)
//! - `SPLITTER_MAX_UPLOAD_MB` - Upload size limit in MB (default: 10)
//! - `SPLITTER_CORS_ORIGINS` - Allowed CORS origins, comma-separated

use std::path::PathBuf;

use clap::Parser;

use crate::grid::DEFAULT_JPEG_QUALITY;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default static root directory.
pub const DEFAULT_STATIC_ROOT: &str = "static";

/// Default upload size limit in megabytes.
pub const DEFAULT_MAX_UPLOAD_MB: usize = 10;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Grid Splitter - slices uploaded images into a 3x3 puzzle grid.
///
/// Accepts a single image upload over HTTP, splits it into nine contiguous
/// JPEG pieces, and serves the pieces as static files.
#[derive(Parser, Debug, Clone)]
#[command(name = "grid-splitter")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "SPLITTER_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "SPLITTER_PORT")]
    pub port: u16,

    // =========================================================================
    // Storage Configuration
    // =========================================================================
    /// Root directory for uploaded originals and grid pieces.
    ///
    /// Served over HTTP under the /static prefix. Created at startup if
    /// missing.
    #[arg(long, default_value = DEFAULT_STATIC_ROOT, env = "SPLITTER_STATIC_ROOT")]
    pub static_root: PathBuf,

    // =========================================================================
    // Encoding Configuration
    // =========================================================================
    /// JPEG quality for grid pieces (1-100).
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY, env = "SPLITTER_JPEG_QUALITY")]
    pub jpeg_quality: u8,

    /// Maximum accepted upload size in megabytes.
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_MB, env = "SPLITTER_MAX_UPLOAD_MB")]
    pub max_upload_mb: usize,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "SPLITTER_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err("jpeg_quality must be between 1 and 100".to_string());
        }

        if self.max_upload_mb == 0 {
            return Err("max_upload_mb must be greater than 0".to_string());
        }

        if self.static_root.as_os_str().is_empty() {
            return Err(
                "static_root is required. Set --static-root or SPLITTER_STATIC_ROOT".to_string(),
            );
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the upload size limit in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

// =============================================================================
// Tests
// =============================================================================
