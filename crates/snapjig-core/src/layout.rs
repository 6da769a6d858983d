//! Board layout: canvas dimensions, snapping, and correct positions.

use crate::{Cell, GRID_SIZE, PieceId};

/// Geometry of the play canvas.
///
/// The canvas is square and divided into a `GRID_SIZE` × `GRID_SIZE`
/// grid of equally sized cells. All snapping and correct-position math
/// lives here so that stored piece coordinates are always produced by
/// the same computation and can be compared exactly.
///
/// # Examples
///
/// ```
/// use snapjig_core::{BoardLayout, Cell, PieceId};
///
/// let layout = BoardLayout::default();
/// assert_eq!(layout.piece_size(), 150.0);
///
/// // Raw drop coordinates snap to the nearest cell, clamped in range.
/// assert_eq!(layout.snap(160.0, -40.0), Cell::new(1, 0));
/// assert_eq!(layout.snap(9_000.0, 9_000.0), Cell::new(3, 3));
///
/// // A piece's correct position is derived from its id alone.
/// assert_eq!(layout.correct_origin(PieceId::new(6)), (300.0, 150.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    canvas_size: f32,
}

impl BoardLayout {
    /// Side length of the default play canvas, in points.
    pub const DEFAULT_CANVAS_SIZE: f32 = 600.0;

    /// Creates a layout for a square canvas of the given side length.
    ///
    /// # Panics
    ///
    /// Panics if `canvas_size` is not a positive finite number.
    #[must_use]
    pub fn new(canvas_size: f32) -> Self {
        assert!(canvas_size.is_finite() && canvas_size > 0.0);
        Self { canvas_size }
    }

    /// Returns the canvas side length.
    #[must_use]
    pub const fn canvas_size(self) -> f32 {
        self.canvas_size
    }

    /// Returns the side length of one piece.
    #[must_use]
    pub fn piece_size(self) -> f32 {
        self.canvas_size / f32::from(GRID_SIZE)
    }

    /// Returns the inclusive upper bound for scattered piece origins.
    ///
    /// A piece whose origin lies in `[0, scatter_range()]` on each axis
    /// is fully contained in the canvas.
    #[must_use]
    pub fn scatter_range(self) -> f32 {
        self.canvas_size - self.piece_size()
    }

    /// Returns the top-left origin of a cell.
    #[must_use]
    pub fn cell_origin(self, cell: Cell) -> (f32, f32) {
        let size = self.piece_size();
        (f32::from(cell.col()) * size, f32::from(cell.row()) * size)
    }

    /// Returns the correct top-left origin for a piece.
    #[must_use]
    pub fn correct_origin(self, id: PieceId) -> (f32, f32) {
        self.cell_origin(id.cell())
    }

    /// Snaps a raw canvas position to the nearest grid cell.
    ///
    /// The nearest cell per axis is `round(coordinate / piece_size)`,
    /// clamped to the grid. This is total for any finite input: raw
    /// positions outside the canvas (including negative ones) clamp to
    /// the border cells, so a dropped piece never rests off-grid.
    #[must_use]
    pub fn snap(self, x: f32, y: f32) -> Cell {
        let max = f32::from(GRID_SIZE - 1);
        let size = self.piece_size();
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let axis = |p: f32| (p / size).round().clamp(0.0, max) as u8;
        Cell::new(axis(x), axis(y))
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CANVAS_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn default_layout_dimensions() {
        let layout = BoardLayout::default();
        assert_eq!(layout.canvas_size(), 600.0);
        assert_eq!(layout.piece_size(), 150.0);
        assert_eq!(layout.scatter_range(), 450.0);
    }

    #[test]
    fn snap_rounds_to_nearest_cell() {
        let layout = BoardLayout::default();
        // Just under and just over the halfway point between cells 0 and 1.
        assert_eq!(layout.snap(74.9, 0.0), Cell::new(0, 0));
        assert_eq!(layout.snap(75.1, 0.0), Cell::new(1, 0));
        assert_eq!(layout.snap(0.0, 150.0), Cell::new(0, 1));
        assert_eq!(layout.snap(449.0, 451.0), Cell::new(3, 3));
    }

    #[test]
    fn snap_clamps_out_of_canvas_positions() {
        let layout = BoardLayout::default();
        assert_eq!(layout.snap(-1_000.0, -0.1), Cell::new(0, 0));
        assert_eq!(layout.snap(600.0, 10_000.0), Cell::new(3, 3));
    }

    #[test]
    fn correct_origin_is_row_major() {
        let layout = BoardLayout::default();
        assert_eq!(layout.correct_origin(PieceId::new(0)), (0.0, 0.0));
        assert_eq!(layout.correct_origin(PieceId::new(3)), (450.0, 0.0));
        assert_eq!(layout.correct_origin(PieceId::new(4)), (0.0, 150.0));
        assert_eq!(layout.correct_origin(PieceId::new(15)), (450.0, 450.0));
    }

    proptest! {
        #[test]
        fn snapped_origins_are_grid_aligned_and_in_range(
            x in -1e6_f32..1e6,
            y in -1e6_f32..1e6,
        ) {
            let layout = BoardLayout::default();
            let (sx, sy) = layout.cell_origin(layout.snap(x, y));
            let size = layout.piece_size();
            prop_assert!(sx >= 0.0 && sx <= layout.scatter_range());
            prop_assert!(sy >= 0.0 && sy <= layout.scatter_range());
            prop_assert_eq!(sx % size, 0.0);
            prop_assert_eq!(sy % size, 0.0);
        }

        #[test]
        fn snap_is_idempotent(x in -1e6_f32..1e6, y in -1e6_f32..1e6) {
            let layout = BoardLayout::default();
            let cell = layout.snap(x, y);
            let (sx, sy) = layout.cell_origin(cell);
            prop_assert_eq!(layout.snap(sx, sy), cell);
        }
    }
}
