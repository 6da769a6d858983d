//! Example demonstrating piece layout generation.
//!
//! Slices an image into the fixed 4x4 grid and prints each piece's
//! crop size and scattered origin, along with the seed that produced
//! the layout. Pass `--seed` to replay a layout, or `--image` to slice
//! a real file instead of the built-in synthetic gradient.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example scatter_layout
//! cargo run --example scatter_layout -- --seed <64-hex-chars>
//! cargo run --example scatter_layout -- --image photo.jpg
//! ```

use std::{path::PathBuf, process};

use clap::Parser;
use image::RgbaImage;
use snapjig_core::BoardLayout;
use snapjig_generator::{LayoutSeed, PieceLayoutGenerator};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Seed to replay, as 64 hex characters. Random if omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<LayoutSeed>,

    /// Image file to slice. A synthetic gradient if omitted.
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let image = match &args.image {
        Some(path) => match image::open(path) {
            Ok(image) => image.to_rgba8(),
            Err(err) => {
                eprintln!("failed to open {}: {err}", path.display());
                process::exit(1);
            }
        },
        None => synthetic_image(),
    };

    let seed = args.seed.unwrap_or_else(LayoutSeed::random);
    let generator = PieceLayoutGenerator::new(BoardLayout::default());
    let layout = generator.generate_with_seed(&image, seed);

    println!("Seed:");
    println!("  {}", layout.seed);
    println!();
    println!("Source: {}x{}", image.width(), image.height());
    println!();

    if layout.pieces.is_empty() {
        println!("Image too small to slice; no pieces generated.");
        return;
    }

    println!("Pieces:");
    for piece in &layout.pieces {
        let (w, h) = piece.bitmap().dimensions();
        let (x, y) = piece.origin();
        println!(
            "  #{:<2} cell {} crop {w}x{h} scattered at ({x:.1}, {y:.1})",
            piece.id(),
            piece.id().cell(),
        );
    }
}

fn synthetic_image() -> RgbaImage {
    RgbaImage::from_fn(400, 400, |x, y| {
        #[expect(clippy::cast_possible_truncation)]
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 0x80, 0xff])
    })
}
