//! Pure 3x3 grid geometry.
//!
//! Computes the nine crop rectangles for an image of arbitrary size. The
//! computation is total for all widths and heights >= 1 and involves no
//! pixel data or I/O, so every property is testable in isolation.
//!
//! # Remainder Policy
//!
//! Base piece dimensions use floor division (`width / 3`, `height / 3`).
//! Any remainder pixels go entirely to the last column and last row, so
//! pieces there are equal to or larger than the others, never smaller.
//! This guarantees the nine rectangles tile the image exactly, with zero
//! overlap and zero gap, even when a dimension is not divisible by 3.

/// Number of rows and columns in the grid.
pub const GRID_DIM: u32 = 3;

/// Total number of pieces produced by a partition.
pub const PIECE_COUNT: usize = (GRID_DIM * GRID_DIM) as usize;

// =============================================================================
// Piece Rectangle
// =============================================================================

/// A crop rectangle for one grid piece, in pixel coordinates.
///
/// `right` and `bottom` are exclusive: the rectangle covers
/// `[left, right) x [top, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceRect {
    /// Grid row (0-2, top to bottom)
    pub row: u32,

    /// Grid column (0-2, left to right)
    pub col: u32,

    /// Left edge in pixels (inclusive)
    pub left: u32,

    /// Top edge in pixels (inclusive)
    pub top: u32,

    /// Right edge in pixels (exclusive)
    pub right: u32,

    /// Bottom edge in pixels (exclusive)
    pub bottom: u32,
}

impl PieceRect {
    /// The 1-based sequence number used for artifact naming.
    ///
    /// Follows row-major traversal: `(0,0)` is 1, `(2,2)` is 9.
    pub fn sequence(&self) -> u32 {
        self.row * GRID_DIM + self.col + 1
    }

    /// Width of the rectangle in pixels.
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    /// Height of the rectangle in pixels.
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

// =============================================================================
// Grid Computation
// =============================================================================

/// Compute the nine crop rectangles for an image of the given size.
///
/// Rectangles are returned in row-major order (row 0 first, columns left to
/// right within each row), matching their sequence numbers 1-9.
///
/// For dimensions smaller than 3 the base piece size floors to zero and the
/// early columns/rows produce zero-area rectangles while the last column/row
/// absorbs the full extent. The tiling invariant still holds; rejecting such
/// inputs is the caller's policy decision, not this function's.
pub fn compute_grid(width: u32, height: u32) -> [PieceRect; PIECE_COUNT] {
    debug_assert!(width >= 1 && height >= 1);

    let piece_w = width / GRID_DIM;
    let piece_h = height / GRID_DIM;

    let mut rects = [PieceRect {
        row: 0,
        col: 0,
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    }; PIECE_COUNT];

    for row in 0..GRID_DIM {
        for col in 0..GRID_DIM {
            let left = col * piece_w;
            let top = row * piece_h;

            // Last column/row absorbs the remainder pixels.
            let right = if col == GRID_DIM - 1 {
                width
            } else {
                left + piece_w
            };
            let bottom = if row == GRID_DIM - 1 {
                height
            } else {
                top + piece_h
            };

            rects[(row * GRID_DIM + col) as usize] = PieceRect {
                row,
                col,
                left,
                top,
                right,
                bottom,
            };
        }
    }

    rects
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Assert the nine rectangles exactly tile `[0,w) x [0,h)`.
    ///
    /// The grid is axis-aligned, so it suffices to check that column edges
    /// chain from 0 to `w` within each row, row edges chain from 0 to `h`
    /// within each column, and the areas sum to the full extent.
    fn assert_exact_tiling(w: u32, h: u32) {
        let rects = compute_grid(w, h);

        for row in 0..GRID_DIM {
            for col in 0..GRID_DIM {
                let rect = &rects[(row * GRID_DIM + col) as usize];
                assert_eq!(rect.row, row);
                assert_eq!(rect.col, col);

                // Horizontal chaining: left edge meets the previous right edge.
                if col == 0 {
                    assert_eq!(rect.left, 0);
                } else {
                    let prev = &rects[(row * GRID_DIM + col - 1) as usize];
                    assert_eq!(rect.left, prev.right, "gap or overlap at {}x{}", w, h);
                }
                if col == GRID_DIM - 1 {
                    assert_eq!(rect.right, w);
                }

                // Vertical chaining: top edge meets the previous bottom edge.
                if row == 0 {
                    assert_eq!(rect.top, 0);
                } else {
                    let above = &rects[((row - 1) * GRID_DIM + col) as usize];
                    assert_eq!(rect.top, above.bottom, "gap or overlap at {}x{}", w, h);
                }
                if row == GRID_DIM - 1 {
                    assert_eq!(rect.bottom, h);
                }
            }
        }

        let total_area: u64 = rects
            .iter()
            .map(|r| u64::from(r.width()) * u64::from(r.height()))
            .sum();
        assert_eq!(total_area, u64::from(w) * u64::from(h));
    }

    #[test]
    fn test_divisible_dimensions() {
        let rects = compute_grid(900, 900);
        for rect in &rects {
            assert_eq!(rect.width(), 300);
            assert_eq!(rect.height(), 300);
        }
        assert_exact_tiling(900, 900);
    }

    #[test]
    fn test_non_divisible_dimensions() {
        // 1000 / 3 = 333 rem 1, 700 / 3 = 233 rem 1
        let rects = compute_grid(1000, 700);

        for rect in &rects {
            let expected_w = if rect.col == 2 { 334 } else { 333 };
            let expected_h = if rect.row == 2 { 234 } else { 233 };
            assert_eq!(rect.width(), expected_w);
            assert_eq!(rect.height(), expected_h);
        }
        assert_exact_tiling(1000, 700);
    }

    #[test]
    fn test_degenerate_width() {
        // Width 2 floors to piece_w = 0: columns 0 and 1 are empty,
        // column 2 spans the full width. Must not panic.
        let rects = compute_grid(2, 10);

        for rect in &rects {
            if rect.col < 2 {
                assert_eq!(rect.width(), 0);
            } else {
                assert_eq!(rect.width(), 2);
            }
        }
        assert_exact_tiling(2, 10);
    }

    #[test]
    fn test_single_pixel_image() {
        let rects = compute_grid(1, 1);
        assert_eq!(rects[PIECE_COUNT - 1].width(), 1);
        assert_eq!(rects[PIECE_COUNT - 1].height(), 1);
        assert_exact_tiling(1, 1);
    }

    #[test]
    fn test_tiling_invariant_sweep() {
        // Exhaustive check over a band of small sizes plus a few larger ones.
        for w in 1..=16 {
            for h in 1..=16 {
                assert_exact_tiling(w, h);
            }
        }
        for &(w, h) in &[(301, 299), (1024, 768), (4032, 3024), (9999, 1)] {
            assert_exact_tiling(w, h);
        }
    }

    #[test]
    fn test_monotonic_sizing() {
        // Last-column/row pieces are never smaller than the others.
        for &(w, h) in &[(10, 10), (11, 7), (100, 101), (5, 3), (302, 4)] {
            let rects = compute_grid(w, h);
            let base = &rects[0];
            for rect in &rects {
                if rect.col == 2 {
                    assert!(rect.width() >= base.width());
                }
                if rect.row == 2 {
                    assert!(rect.height() >= base.height());
                }
            }
        }
    }

    #[test]
    fn test_row_major_sequence() {
        let rects = compute_grid(300, 300);
        for (i, rect) in rects.iter().enumerate() {
            assert_eq!(rect.sequence(), i as u32 + 1);
        }

        // Explicit traversal order check.
        let coords: Vec<(u32, u32)> = rects.iter().map(|r| (r.row, r.col)).collect();
        assert_eq!(
            coords,
            vec![
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 0),
                (1, 1),
                (1, 2),
                (2, 0),
                (2, 1),
                (2, 2)
            ]
        );
    }

    #[test]
    fn test_determinism() {
        assert_eq!(compute_grid(1000, 700), compute_grid(1000, 700));
    }
}
