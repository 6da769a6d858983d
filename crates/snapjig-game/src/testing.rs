//! Shared fixtures for session and interaction tests.

use std::sync::Arc;

use image::RgbaImage;
use snapjig_core::{BoardLayout, PieceId};

use crate::Piece;

pub(crate) fn layout() -> BoardLayout {
    BoardLayout::default()
}

pub(crate) fn test_image(width: u32, height: u32) -> Arc<RgbaImage> {
    Arc::new(RgbaImage::from_pixel(
        width,
        height,
        image::Rgba([0x20, 0x40, 0x60, 0xff]),
    ))
}

/// A full piece set with every piece at its correct origin.
pub(crate) fn placed_pieces(layout: BoardLayout) -> Vec<Piece> {
    PieceId::all()
        .map(|id| {
            let (x, y) = layout.correct_origin(id);
            Piece::new(id, x, y, layout.piece_size(), test_image(1, 1))
        })
        .collect()
}

/// A full piece set with every piece away from its correct origin.
pub(crate) fn scattered_pieces(layout: BoardLayout) -> Vec<Piece> {
    PieceId::all()
        .map(|id| {
            // Shift one cell (wrapping) so no piece is placed.
            let wrong = PieceId::new((id.index() + 1) % snapjig_core::PIECE_COUNT);
            let (x, y) = layout.correct_origin(wrong);
            Piece::new(id, x, y, layout.piece_size(), test_image(1, 1))
        })
        .collect()
}
