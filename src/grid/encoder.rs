//! JPEG piece encoder.
//!
//! This module handles decoding the uploaded source image and encoding
//! individual grid pieces as JPEG.
//!
//! # Design Decisions
//!
//! - **Normalize before cropping**: The source is converted to RGB8 once,
//!   right after decoding, so all nine pieces share one channel layout.
//!   Alpha channels are flattened away.
//!
//! - **Pixel-exact crops**: Pieces are cut at their computed rectangles with
//!   no resampling or rescaling.
//!
//! - **Fixed output format**: Pieces are always JPEG, encoded at a fixed
//!   quality configured at service startup (default 90).

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, ImageReader, RgbImage};
use std::io::Cursor;

use crate::error::SplitError;

use super::geometry::PieceRect;

/// Default JPEG quality for piece encoding (1-100).
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Minimum allowed JPEG quality.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Maximum allowed JPEG quality.
pub const MAX_JPEG_QUALITY: u8 = 100;

// =============================================================================
// JPEG Encoder
// =============================================================================

/// Decodes uploaded images and encodes grid pieces as JPEG.
///
/// # Example
///
/// ```ignore
/// use grid_splitter::grid::{compute_grid, JpegPieceEncoder};
///
/// let encoder = JpegPieceEncoder::new();
/// let img = encoder.decode(&upload_bytes)?;
/// let rects = compute_grid(img.width(), img.height());
/// let jpeg = encoder.encode_piece(&img, &rects[0])?;
/// ```
#[derive(Debug, Clone)]
pub struct JpegPieceEncoder {
    quality: u8,
}

impl Default for JpegPieceEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JpegPieceEncoder {
    /// Create an encoder with the default quality.
    pub fn new() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Create an encoder with a specific quality (clamped to 1-100).
    pub fn with_quality(quality: u8) -> Self {
        Self {
            quality: clamp_quality(quality),
        }
    }

    /// The JPEG quality this encoder emits.
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Decode uploaded bytes into an RGB8 raster.
    ///
    /// The container format is sniffed from the bytes (JPEG, PNG, GIF and
    /// WebP are enabled). The decoded image is normalized to RGB8 before
    /// being returned, so cropping always operates on a consistent layout.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Decode`] if the bytes are not a parseable image.
    pub fn decode(&self, source: &[u8]) -> Result<RgbImage, SplitError> {
        let reader = ImageReader::new(Cursor::new(source))
            .with_guessed_format()
            .map_err(|e| SplitError::Decode {
                message: e.to_string(),
            })?;

        let img = reader.decode().map_err(|e| SplitError::Decode {
            message: e.to_string(),
        })?;

        Ok(img.to_rgb8())
    }

    /// Crop one piece out of the source and encode it as JPEG.
    ///
    /// The crop is pixel-exact; the source is only read, never modified, so
    /// the nine piece encodes can run concurrently over one shared buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Encode`] if JPEG serialization fails.
    pub fn encode_piece(&self, source: &RgbImage, rect: &PieceRect) -> Result<Bytes, SplitError> {
        let piece = imageops::crop_imm(source, rect.left, rect.top, rect.width(), rect.height())
            .to_image();

        let mut output = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut output, self.quality);

        encoder
            .encode_image(&piece)
            .map_err(|e| SplitError::Encode {
                message: format!("piece {}: {}", rect.sequence(), e),
            })?;

        Ok(Bytes::from(output))
    }
}

// =============================================================================
// Utility Functions
// =============================================================================

/// Validate a JPEG quality parameter.
///
/// Returns `true` if quality is in the valid range (1-100).
#[inline]
pub fn is_valid_quality(quality: u8) -> bool {
    quality >= MIN_JPEG_QUALITY && quality <= MAX_JPEG_QUALITY
}

/// Clamp quality to the valid range.
#[inline]
pub fn clamp_quality(quality: u8) -> u8 {
    quality.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::geometry::compute_grid;
    use image::{ImageFormat, Rgb, Rgba, RgbaImage};

    fn create_test_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });

        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_valid_png() {
        let encoder = JpegPieceEncoder::new();
        let source = create_test_png(30, 21);

        let img = encoder.decode(&source).unwrap();
        assert_eq!(img.dimensions(), (30, 21));
    }

    #[test]
    fn test_decode_normalizes_alpha() {
        // RGBA input must come back as a 3-channel raster.
        let img = RgbaImage::from_pixel(9, 9, Rgba([10, 20, 30, 128]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();

        let encoder = JpegPieceEncoder::new();
        let decoded = encoder.decode(&buf.into_inner()).unwrap();
        assert_eq!(decoded.dimensions(), (9, 9));
        assert_eq!(decoded.get_pixel(4, 4).0.len(), 3);
    }

    #[test]
    fn test_decode_invalid_data() {
        let encoder = JpegPieceEncoder::new();
        let result = encoder.decode(&[0x00, 0x01, 0x02, 0x03]);

        assert!(matches!(result, Err(SplitError::Decode { .. })));
    }

    #[test]
    fn test_decode_empty_data() {
        let encoder = JpegPieceEncoder::new();
        assert!(encoder.decode(&[]).is_err());
    }

    #[test]
    fn test_encode_piece_is_valid_jpeg() {
        let encoder = JpegPieceEncoder::new();
        let img = encoder.decode(&create_test_png(30, 21)).unwrap();
        let rects = compute_grid(30, 21);

        let output = encoder.encode_piece(&img, &rects[0]).unwrap();

        // SOI and EOI markers
        assert_eq!(&output[..2], &[0xFF, 0xD8]);
        assert_eq!(&output[output.len() - 2..], &[0xFF, 0xD9]);

        // Decoding the piece back gives the rectangle's dimensions.
        let piece = encoder.decode(&output).unwrap();
        assert_eq!(piece.dimensions(), (10, 7));
    }

    #[test]
    fn test_encode_remainder_piece_dimensions() {
        let encoder = JpegPieceEncoder::new();
        let img = encoder.decode(&create_test_png(10, 7)).unwrap();
        let rects = compute_grid(10, 7);

        // Bottom-right piece absorbs the remainders: 10 - 2*3 = 4, 7 - 2*2 = 3.
        let last = rects.last().unwrap();
        let output = encoder.encode_piece(&img, last).unwrap();
        let piece = encoder.decode(&output).unwrap();
        assert_eq!(piece.dimensions(), (4, 3));
    }

    #[test]
    fn test_quality_clamping() {
        assert_eq!(JpegPieceEncoder::with_quality(0).quality(), 1);
        assert_eq!(JpegPieceEncoder::with_quality(90).quality(), 90);
        assert_eq!(JpegPieceEncoder::with_quality(255).quality(), 100);
    }

    #[test]
    fn test_is_valid_quality() {
        assert!(!is_valid_quality(0));
        assert!(is_valid_quality(1));
        assert!(is_valid_quality(90));
        assert!(is_valid_quality(100));
        assert!(!is_valid_quality(101));
    }
}
