//! Grid partition core.
//!
//! Splits an uploaded image into a 3x3 grid of contiguous, non-overlapping
//! JPEG pieces.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            GridPartitioner              │
//! │  decode → normalize RGB8 → 9x crop+enc  │
//! │  ┌──────────────┐  ┌─────────────────┐  │
//! │  │   geometry   │  │ JpegPieceEncoder│  │
//! │  │ (pure rects) │  │ (crop → JPEG)   │  │
//! │  └──────────────┘  └─────────────────┘  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`compute_grid`] / [`PieceRect`]: pure rectangle computation, no I/O
//! - [`JpegPieceEncoder`]: RGB8 normalization, pixel-exact crops, JPEG output
//! - [`GridPartitioner`]: the full pipeline, fanned out over worker threads
//! - [`PieceArtifact`] / [`PartitionResult`]: encoded output in row-major order

pub mod encoder;
pub mod geometry;
pub mod partitioner;

pub use encoder::{
    clamp_quality, is_valid_quality, JpegPieceEncoder, DEFAULT_JPEG_QUALITY, MAX_JPEG_QUALITY,
    MIN_JPEG_QUALITY,
};
pub use geometry::{compute_grid, PieceRect, GRID_DIM, PIECE_COUNT};
pub use partitioner::{
    piece_filename, GridPartitioner, PartitionResult, PieceArtifact, MIN_DIMENSION,
    PIECE_EXTENSION,
};
