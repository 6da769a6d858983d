//! Snapjig desktop application using egui/eframe.
//!
//! # Design Notes
//! - Three screens: catalog browser, upload form, and the play canvas.
//! - All game mutation flows through actions handled against the
//!   session store; screens only read state and emit actions.
//! - Catalog I/O runs on a background worker thread polled each frame.

use clap::Parser;
use eframe::{
    NativeOptions,
    egui::{self, Vec2},
};
use snapjig_catalog::CatalogClient;
use snapjig_game::ShufflePolicy;

use crate::app::SnapjigApp;

mod app;
mod state;
mod ui;
mod worker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ShufflePolicyArg {
    /// Re-shuffling a solved board keeps it marked complete.
    Keep,
    /// Re-shuffling clears the completion flag.
    Clear,
}

impl From<ShufflePolicyArg> for ShufflePolicy {
    fn from(arg: ShufflePolicyArg) -> Self {
        match arg {
            ShufflePolicyArg::Keep => ShufflePolicy::KeepCompletion,
            ShufflePolicyArg::Clear => ShufflePolicy::ClearCompletion,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the puzzle catalog service.
    #[arg(long, value_name = "URL", default_value = "http://localhost:8080")]
    catalog_url: String,

    /// What re-shuffling does to a solved board.
    #[arg(long, value_enum, default_value_t = ShufflePolicyArg::Clear)]
    shuffle_policy: ShufflePolicyArg,
}

fn main() -> eframe::Result<()> {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_resizable(true)
            .with_inner_size(Vec2::new(900.0, 760.0))
            .with_min_inner_size(Vec2::new(640.0, 700.0)),
        ..Default::default()
    };
    eframe::run_native(
        "Snapjig",
        options,
        Box::new(move |cc| {
            let catalog = CatalogClient::new(&args.catalog_url)?;
            Ok(Box::new(SnapjigApp::new(
                cc,
                catalog,
                args.shuffle_policy.into(),
            )))
        }),
    )
}
