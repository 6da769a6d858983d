//! Piece identity and grid cells.

use std::fmt;

use crate::{GRID_SIZE, PIECE_COUNT};

/// The identity of a jigsaw piece.
///
/// A piece id is the row-major index of the cell the piece belongs in,
/// in the range `0..PIECE_COUNT`. It is assigned when the board is
/// sliced and never changes for the lifetime of the piece.
///
/// # Examples
///
/// ```
/// use snapjig_core::{Cell, PieceId};
///
/// let id = PieceId::new(6);
/// assert_eq!(id.cell(), Cell::new(2, 1));
/// assert_eq!(id.cell().piece_id(), id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId {
    index: u8,
}

impl PieceId {
    /// Creates a piece id.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in the range `0..PIECE_COUNT`.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!(index < PIECE_COUNT);
        Self { index }
    }

    /// Returns the underlying row-major index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.index
    }

    /// Returns the cell this piece belongs in.
    #[must_use]
    pub const fn cell(self) -> Cell {
        Cell::new(self.index % GRID_SIZE, self.index / GRID_SIZE)
    }

    /// Returns an iterator over all piece ids in row-major order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use snapjig_core::PieceId;
    /// let ids: Vec<_> = PieceId::all().collect();
    /// assert_eq!(ids.len(), 16);
    /// assert_eq!(ids[0].index(), 0);
    /// assert_eq!(ids[15].index(), 15);
    /// ```
    pub fn all() -> impl Iterator<Item = Self> {
        (0..PIECE_COUNT).map(PieceId::new)
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

/// One cell of the play grid.
///
/// Both coordinates are in the range `0..GRID_SIZE`, with `(0, 0)` the
/// top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    col: u8,
    row: u8,
}

impl Cell {
    /// Creates a cell.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is not in the range `0..GRID_SIZE`.
    #[must_use]
    pub const fn new(col: u8, row: u8) -> Self {
        assert!(col < GRID_SIZE && row < GRID_SIZE);
        Self { col, row }
    }

    /// Returns the column (0-based, left to right).
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the row (0-based, top to bottom).
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the id of the piece that belongs in this cell.
    #[must_use]
    pub const fn piece_id(self) -> PieceId {
        PieceId::new(self.row * GRID_SIZE + self.col)
    }

    /// Returns an iterator over all cells in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Cell::new(col, row)))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}
