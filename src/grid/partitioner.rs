//! Grid partitioner: the full decode → crop → encode pipeline.
//!
//! [`GridPartitioner`] turns uploaded image bytes into nine encoded JPEG
//! pieces. Rectangle computation is pure (see [`super::geometry`]); the
//! per-piece crop+encode units are independent and fan out across scoped
//! worker threads sharing the immutable decoded buffer, then join back into
//! row-major order.
//!
//! The pipeline is all-or-nothing: the first decode or encode failure aborts
//! the partition and no partial result is returned.

use std::thread;

use bytes::Bytes;
use tracing::debug;

use crate::error::SplitError;

use super::encoder::JpegPieceEncoder;
use super::geometry::{compute_grid, GRID_DIM, PIECE_COUNT};

/// File extension for encoded pieces.
pub const PIECE_EXTENSION: &str = "jpg";

/// Smallest accepted width/height.
///
/// Below this, floor division yields zero-width or zero-height pieces, which
/// JPEG cannot represent, so such uploads are rejected up front.
pub const MIN_DIMENSION: u32 = GRID_DIM;

// =============================================================================
// Partition Output
// =============================================================================

/// One encoded grid piece, ready to be persisted.
#[derive(Debug, Clone)]
pub struct PieceArtifact {
    /// 1-based row-major sequence number (1-9)
    pub sequence: u32,

    /// Artifact filename: `{unique_name}_{sequence}.jpg`
    pub filename: String,

    /// Encoded JPEG bytes
    pub data: Bytes,
}

/// The nine pieces of a completed partition, in row-major order.
#[derive(Debug, Clone)]
pub struct PartitionResult {
    /// Exactly nine artifacts, sequence 1 first
    pub pieces: Vec<PieceArtifact>,
}

// =============================================================================
// Grid Partitioner
// =============================================================================

/// Splits a decoded image into a 3x3 grid of JPEG pieces.
///
/// Stateless apart from the encoder settings; one instance is shared across
/// all requests. The partition itself is CPU-bound and synchronous — callers
/// on an async runtime should wrap it in `spawn_blocking`.
///
/// # Example
///
/// ```ignore
/// use grid_splitter::grid::GridPartitioner;
///
/// let partitioner = GridPartitioner::new();
/// let result = partitioner.partition(&upload_bytes, "a1b2c3")?;
/// assert_eq!(result.pieces.len(), 9);
/// ```
#[derive(Debug, Clone)]
pub struct GridPartitioner {
    encoder: JpegPieceEncoder,
}

impl Default for GridPartitioner {
    fn default() -> Self {
        Self::new()
    }
}

impl GridPartitioner {
    /// Create a partitioner encoding at the default JPEG quality.
    pub fn new() -> Self {
        Self {
            encoder: JpegPieceEncoder::new(),
        }
    }

    /// Create a partitioner encoding at a specific JPEG quality (clamped to 1-100).
    pub fn with_quality(quality: u8) -> Self {
        Self {
            encoder: JpegPieceEncoder::with_quality(quality),
        }
    }

    /// Decode `source` and split it into nine JPEG pieces named after
    /// `unique_name`.
    ///
    /// Deterministic: the same bytes and name always yield pixel-identical
    /// pieces with identical filenames, regardless of worker scheduling.
    ///
    /// # Errors
    ///
    /// - [`SplitError::Decode`] if the bytes are not a parseable image
    /// - [`SplitError::Validation`] if either dimension is below
    ///   [`MIN_DIMENSION`]
    /// - [`SplitError::Encode`] if any piece fails to serialize; the whole
    ///   partition is abandoned, no partial result is returned
    pub fn partition(
        &self,
        source: &[u8],
        unique_name: &str,
    ) -> Result<PartitionResult, SplitError> {
        let img = self.encoder.decode(source)?;
        let (width, height) = img.dimensions();

        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(SplitError::Validation {
                reason: format!(
                    "image is {}x{}, needs at least {}x{} pixels to split into a 3x3 grid",
                    width, height, MIN_DIMENSION, MIN_DIMENSION
                ),
            });
        }

        let rects = compute_grid(width, height);

        debug!(
            width,
            height,
            piece_w = width / GRID_DIM,
            piece_h = height / GRID_DIM,
            "partitioning image"
        );

        // Fan out: one worker per piece over the shared read-only buffer.
        // The handles vec preserves row-major order, so join order does not
        // depend on completion order.
        let encoded: Vec<Result<Bytes, SplitError>> = thread::scope(|scope| {
            let handles: Vec<_> = rects
                .iter()
                .map(|rect| {
                    let encoder = &self.encoder;
                    let img = &img;
                    scope.spawn(move || encoder.encode_piece(img, rect))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        Err(SplitError::Encode {
                            message: "piece worker panicked".to_string(),
                        })
                    })
                })
                .collect()
        });

        let mut pieces = Vec::with_capacity(PIECE_COUNT);
        for (rect, result) in rects.iter().zip(encoded) {
            let data = result?;
            pieces.push(PieceArtifact {
                sequence: rect.sequence(),
                filename: piece_filename(unique_name, rect.sequence()),
                data,
            });
        }

        Ok(PartitionResult { pieces })
    }
}

/// Build the artifact filename for a piece: `{unique_name}_{sequence}.jpg`.
pub fn piece_filename(unique_name: &str, sequence: u32) -> String {
    format!("{}_{}.{}", unique_name, sequence, PIECE_EXTENSION)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn create_test_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 11 % 256) as u8, 40])
        });

        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_partition_produces_nine_pieces() {
        let partitioner = GridPartitioner::new();
        let result = partitioner.partition(&create_test_png(90, 60), "abc123").unwrap();

        assert_eq!(result.pieces.len(), PIECE_COUNT);
        for (i, piece) in result.pieces.iter().enumerate() {
            assert_eq!(piece.sequence, i as u32 + 1);
            assert_eq!(piece.filename, format!("abc123_{}.jpg", i + 1));
            assert!(!piece.data.is_empty());
        }
    }

    #[test]
    fn test_partition_piece_dimensions() {
        let partitioner = GridPartitioner::new();
        let encoder = JpegPieceEncoder::new();
        let result = partitioner.partition(&create_test_png(100, 70), "dims").unwrap();

        // 100 / 3 = 33 rem 1, 70 / 3 = 23 rem 1
        for piece in &result.pieces {
            let decoded = encoder.decode(&piece.data).unwrap();
            let col = (piece.sequence - 1) % GRID_DIM;
            let row = (piece.sequence - 1) / GRID_DIM;
            let expected_w = if col == 2 { 34 } else { 33 };
            let expected_h = if row == 2 { 24 } else { 23 };
            assert_eq!(decoded.dimensions(), (expected_w, expected_h));
        }
    }

    #[test]
    fn test_partition_is_deterministic() {
        let partitioner = GridPartitioner::new();
        let source = create_test_png(64, 48);

        let first = partitioner.partition(&source, "same").unwrap();
        let second = partitioner.partition(&source, "same").unwrap();

        for (a, b) in first.pieces.iter().zip(&second.pieces) {
            assert_eq!(a.filename, b.filename);
            assert_eq!(a.data, b.data);
        }
    }

    #[test]
    fn test_partition_rejects_non_image_bytes() {
        let partitioner = GridPartitioner::new();
        let result = partitioner.partition(b"definitely not an image", "bad");

        assert!(matches!(result, Err(SplitError::Decode { .. })));
    }

    #[test]
    fn test_partition_rejects_tiny_image() {
        let partitioner = GridPartitioner::new();
        let result = partitioner.partition(&create_test_png(2, 10), "tiny");

        assert!(matches!(result, Err(SplitError::Validation { .. })));
    }

    #[test]
    fn test_partition_accepts_minimum_size() {
        let partitioner = GridPartitioner::new();
        let result = partitioner.partition(&create_test_png(3, 3), "min").unwrap();

        assert_eq!(result.pieces.len(), PIECE_COUNT);
    }

    #[test]
    fn test_piece_filename_format() {
        assert_eq!(piece_filename("u-1", 1), "u-1_1.jpg");
        assert_eq!(piece_filename("u-1", 9), "u-1_9.jpg");
    }
}
