//! Application state split into game state and ephemeral UI state.

use std::sync::Arc;

use eframe::egui::{self, TextureHandle, TextureOptions, Vec2};
use image::RgbaImage;
use log::warn;
use snapjig_catalog::PuzzleRecord;
use snapjig_core::{BoardLayout, PieceId};
use snapjig_game::{
    DragController, Piece, Session, SessionTransition, ShufflePolicy, TimerDriver,
};
use snapjig_generator::PieceLayoutGenerator;

use crate::worker::WorkHandle;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Screen {
    /// Catalog browser.
    #[default]
    Browse,
    /// Upload form.
    Upload,
    /// The play canvas.
    Play,
}

// AppState holds the game-facing state: the session store and the
// controllers that mutate it.
#[derive(Debug)]
pub(crate) struct AppState {
    pub(crate) session: Session,
    pub(crate) layout: BoardLayout,
    pub(crate) drag: DragController,
    pub(crate) timer: TimerDriver,
    pub(crate) generator: PieceLayoutGenerator,
    pub(crate) shuffle_policy: ShufflePolicy,
    /// The catalog record being played, if the image came from there.
    pub(crate) current_puzzle: Option<PuzzleRecord>,
    /// Set once a completion has been reported to the catalog.
    pub(crate) best_time_submitted: bool,
}

impl AppState {
    #[must_use]
    pub(crate) fn new(shuffle_policy: ShufflePolicy) -> Self {
        let layout = BoardLayout::default();
        Self {
            session: Session::new(),
            layout,
            drag: DragController::new(),
            timer: TimerDriver::new(),
            generator: PieceLayoutGenerator::new(layout),
            shuffle_policy,
            current_puzzle: None,
            best_time_submitted: false,
        }
    }

    /// Installs a new source image: slices it, scatters the pieces,
    /// and starts the game. Returns `false` if the image degraded to
    /// zero pieces, leaving the session pre-game.
    pub(crate) fn start_session(
        &mut self,
        image: Arc<RgbaImage>,
        record: Option<PuzzleRecord>,
    ) -> bool {
        self.session
            .apply(SessionTransition::SetImage(Arc::clone(&image)));
        self.current_puzzle = record;
        self.best_time_submitted = false;
        self.drag = DragController::new();

        let scattered = self.generator.generate(&image);
        if scattered.pieces.is_empty() {
            warn!("image produced no pieces; session stays pre-game");
            return false;
        }
        self.session
            .apply(SessionTransition::SetPieces(scattered.pieces));
        self.session.apply(SessionTransition::StartGame);
        true
    }

    /// Re-scatters every piece and restarts the clock, honoring the
    /// configured shuffle policy.
    pub(crate) fn shuffle(&mut self) {
        let count = self.session.pieces().len();
        if count == 0 {
            return;
        }
        let mut rng = snapjig_generator::LayoutSeed::random().rng();
        let origins = self.generator.reshuffle_origins(count, &mut rng);
        self.session.reshuffle(&origins, self.shuffle_policy);
    }
}

// UiState holds ephemeral UI-only state (screen, inline errors,
// in-flight work, textures). None of it survives a restart.
#[derive(Debug, Default)]
pub(crate) struct UiState {
    pub(crate) screen: Screen,
    pub(crate) catalog_records: Option<Vec<PuzzleRecord>>,
    pub(crate) catalog_error: Option<String>,
    pub(crate) catalog_loading: bool,
    pub(crate) upload_name: String,
    pub(crate) upload_path: String,
    pub(crate) upload_error: Option<String>,
    pub(crate) upload_in_flight: bool,
    pub(crate) play_error: Option<String>,
    pub(crate) pending: Vec<WorkHandle>,
    pub(crate) textures: TextureCache,
    /// Accumulated pointer delta of the active drag, in canvas points.
    pub(crate) drag_offset: Vec2,
}

/// Piece textures uploaded to the GPU, rebuilt whenever the piece set
/// changes.
#[derive(Default)]
pub(crate) struct TextureCache {
    entries: Vec<(PieceId, TextureHandle)>,
}

impl std::fmt::Debug for TextureCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureCache")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl TextureCache {
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the texture for a piece, uploading it on first use.
    pub(crate) fn texture_for(
        &mut self,
        ctx: &egui::Context,
        piece: &Piece,
    ) -> TextureHandle {
        if let Some((_, handle)) = self
            .entries
            .iter()
            .find(|(id, _)| *id == piece.id())
        {
            return handle.clone();
        }
        let bitmap = piece.bitmap();
        let size = [bitmap.width() as usize, bitmap.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, bitmap.as_raw());
        let handle = ctx.load_texture(
            format!("piece-{}", piece.id()),
            color_image,
            TextureOptions::LINEAR,
        );
        self.entries.push((piece.id(), handle.clone()));
        handle
    }
}
