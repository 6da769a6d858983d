//! Slicing a source image into scattered pieces.

use std::sync::Arc;

use image::{RgbaImage, imageops};
use log::{debug, warn};
use rand::{Rng, RngExt as _};
use snapjig_core::{BoardLayout, Cell, GRID_SIZE, PieceId};
use snapjig_game::Piece;

use crate::LayoutSeed;

/// A freshly generated piece set together with the seed that scattered
/// it.
#[derive(Debug, Clone)]
pub struct ScatteredPieces {
    /// Pieces in row-major creation order, at random origins.
    pub pieces: Vec<Piece>,
    /// The seed that produced the scatter.
    pub seed: LayoutSeed,
}

/// Slices a source image into a grid of pieces and scatters them.
///
/// Piece bitmaps are cropped with integer cell sizes (`width / N`), so
/// up to `N - 1` pixel columns/rows at the right and bottom edge of the
/// source are dropped. Origins are drawn independently and uniformly
/// from `[0, scatter_range]` per axis.
///
/// An image too small to yield at least one pixel per cell degrades to
/// an empty piece set instead of failing; the caller's session then
/// simply stays in its pre-game state.
///
/// # Examples
///
/// ```
/// use image::RgbaImage;
/// use snapjig_core::BoardLayout;
/// use snapjig_generator::PieceLayoutGenerator;
///
/// let image = RgbaImage::new(400, 400);
/// let generator = PieceLayoutGenerator::new(BoardLayout::default());
/// let layout = generator.generate(&image);
/// assert_eq!(layout.pieces.len(), 16);
/// assert_eq!(layout.pieces[0].bitmap().dimensions(), (100, 100));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PieceLayoutGenerator {
    layout: BoardLayout,
}

impl PieceLayoutGenerator {
    /// Creates a generator for the given board layout.
    #[must_use]
    pub fn new(layout: BoardLayout) -> Self {
        Self { layout }
    }

    /// Generates a scattered piece set with a fresh random seed.
    #[must_use]
    pub fn generate(&self, image: &RgbaImage) -> ScatteredPieces {
        self.generate_with_seed(image, LayoutSeed::random())
    }

    /// Generates a scattered piece set reproducibly from `seed`.
    #[must_use]
    pub fn generate_with_seed(&self, image: &RgbaImage, seed: LayoutSeed) -> ScatteredPieces {
        let bitmaps = slice_image(image);
        let mut rng = seed.rng();
        let pieces = bitmaps
            .into_iter()
            .zip(PieceId::all())
            .map(|(bitmap, id)| {
                let (x, y) = random_origin(&mut rng, self.layout);
                Piece::new(id, x, y, self.layout.piece_size(), bitmap)
            })
            .collect();
        debug!("generated layout with seed {seed}");
        ScatteredPieces { pieces, seed }
    }

    /// Draws fresh random origins for an existing piece set, one per
    /// piece, using the same distribution as initial generation.
    #[must_use]
    pub fn reshuffle_origins(&self, count: usize, rng: &mut impl Rng) -> Vec<(f32, f32)> {
        (0..count).map(|_| random_origin(rng, self.layout)).collect()
    }
}

fn random_origin(rng: &mut impl Rng, layout: BoardLayout) -> (f32, f32) {
    let range = layout.scatter_range();
    (
        rng.random_range(0.0..=range),
        rng.random_range(0.0..=range),
    )
}

/// Crops the source into `GRID_SIZE²` cell bitmaps in row-major order.
///
/// Returns an empty vector if the image cannot supply at least one
/// pixel per cell.
fn slice_image(image: &RgbaImage) -> Vec<Arc<RgbaImage>> {
    let piece_w = image.width() / u32::from(GRID_SIZE);
    let piece_h = image.height() / u32::from(GRID_SIZE);
    if piece_w == 0 || piece_h == 0 {
        warn!(
            "image {}x{} is too small to slice, producing no pieces",
            image.width(),
            image.height()
        );
        return Vec::new();
    }

    Cell::all()
        .map(|cell| {
            let x = u32::from(cell.col()) * piece_w;
            let y = u32::from(cell.row()) * piece_h;
            Arc::new(imageops::crop_imm(image, x, y, piece_w, piece_h).to_image())
        })
        .collect()
}
