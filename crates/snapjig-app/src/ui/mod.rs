//! Screens and the actions they emit.
//!
//! Screens are pure views: they read state and return [`Action`]s; all
//! mutation happens in the app's action handler.

use std::path::PathBuf;

use eframe::egui::{Color32, RichText, Ui};
use snapjig_core::PieceId;

pub(crate) mod browse_screen;
pub(crate) mod play_screen;
pub(crate) mod timer_panel;
pub(crate) mod upload_screen;

/// An input event translated into an application intent.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Action {
    /// Switch to the catalog browser.
    ShowBrowse,
    /// Switch to the upload form.
    ShowUpload,
    /// Switch back to the play canvas.
    ShowPlay,
    /// Re-fetch the catalog list.
    RefreshCatalog,
    /// Fetch a catalog puzzle and start playing it.
    PlayCatalogPuzzle(u32),
    /// Start playing a local file without uploading it.
    PlayLocalFile(PathBuf),
    /// Validate and upload a local file as a new catalog puzzle.
    SubmitUpload { name: String, path: PathBuf },
    /// A piece drag began.
    DragStart(PieceId),
    /// The held piece was dropped at a raw canvas position.
    Drop { x: f32, y: f32 },
    /// Re-scatter all pieces.
    Shuffle,
}

/// Renders an inline error message next to the action that caused it.
pub(crate) fn error_label(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(message).color(Color32::LIGHT_RED));
}
