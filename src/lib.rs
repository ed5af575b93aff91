//! # Grid Splitter
//!
//! An HTTP service that slices an uploaded raster image into a 3x3 puzzle
//! grid of JPEG pieces.
//!
//! A single upload is decoded, normalized to RGB, partitioned into nine
//! contiguous, non-overlapping crop rectangles that exactly tile the source
//! (remainder pixels go to the last row and column), and each piece is
//! encoded as JPEG and persisted under a per-request unique name. The pieces
//! are then addressable as static files for a sliding-puzzle game client.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`grid`] - Partition core: pure rectangle geometry, JPEG piece encoding,
//!   and the decode → crop → encode pipeline
//! - [`storage`] - Artifact store: directory bootstrap, persistence, public
//!   URL construction
//! - [`server`] - Axum-based HTTP server, upload handling, and routes
//! - [`config`] - CLI and configuration types
//! - [`error`] - Error taxonomy shared across the layers
//!
//! ## Example
//!
//! ```rust,no_run
//! use grid_splitter::grid::GridPartitioner;
//! use grid_splitter::server::{create_router, AppState, RouterConfig};
//! use grid_splitter::storage::ArtifactStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = ArtifactStore::new("static");
//!     store.bootstrap().await.expect("artifact directories");
//!
//!     let state = AppState::new(GridPartitioner::new(), store);
//!     let router = create_router(state, RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod server;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use error::{SplitError, StorageError};
pub use grid::{
    compute_grid, piece_filename, GridPartitioner, JpegPieceEncoder, PartitionResult, PieceArtifact,
    PieceRect, DEFAULT_JPEG_QUALITY, GRID_DIM, MIN_DIMENSION, PIECE_COUNT,
};
pub use server::{create_router, generate_unique_name, AppState, RouterConfig, UploadResponse};
pub use storage::{piece_url, upload_url, ArtifactStore, GRID_SUBDIR, STATIC_URL_PREFIX, UPLOADS_SUBDIR};
