//! Piece layout generation for the snapjig puzzle game.
//!
//! Given a decoded source image, the generator slices it into a fixed
//! grid of piece bitmaps and scatters them at random positions inside
//! the play canvas, so the puzzle starts shuffled.
//!
//! Randomness is seedable: every generated layout carries the
//! [`LayoutSeed`] that produced it, and the same seed reproduces the
//! same scatter. This keeps layouts testable while the interactive app
//! simply draws fresh seeds from OS entropy.

pub use self::{
    generator::{PieceLayoutGenerator, ScatteredPieces},
    seed::{LayoutSeed, ParseLayoutSeedError},
};

mod generator;
mod seed;
