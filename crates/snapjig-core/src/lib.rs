//! Core grid geometry for the snapjig puzzle board.
//!
//! This crate defines the vocabulary types shared by the game state,
//! the layout generator, and the UI:
//!
//! - [`PieceId`] — the identity of a piece, equal to the row-major
//!   index of the cell it belongs in.
//! - [`Cell`] — one cell of the fixed play grid.
//! - [`BoardLayout`] — canvas/piece dimensions and the snapping and
//!   correct-position math derived from them.
//!
//! All position math is pure: a piece's correct position is a function
//! of its id and the layout, and is never stored as mutable state.

pub use self::{
    layout::BoardLayout,
    piece_id::{Cell, PieceId},
};

mod layout;
mod piece_id;

/// Number of cells per board axis.
pub const GRID_SIZE: u8 = 4;

/// Total number of pieces on a populated board.
pub const PIECE_COUNT: u8 = GRID_SIZE * GRID_SIZE;
