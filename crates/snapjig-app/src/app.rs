//! The eframe application: worker polling, action handling, screens.

use std::{
    path::Path,
    sync::Arc,
    time::{Duration, Instant},
};

use eframe::egui::{CentralPanel, Context, TopBottomPanel};
use image::RgbaImage;
use log::{error, info};
use snapjig_catalog::{CatalogClient, PuzzleRecord};
use snapjig_game::ShufflePolicy;

use crate::{
    state::{AppState, Screen, UiState},
    ui::{self, Action},
    worker::{CatalogWorker, WorkRequest, WorkResponse},
};

/// Upload size limit enforced before any bytes leave the machine.
const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

pub(crate) struct SnapjigApp {
    app_state: AppState,
    ui_state: UiState,
    worker: CatalogWorker,
}

impl SnapjigApp {
    pub(crate) fn new(
        _cc: &eframe::CreationContext<'_>,
        catalog: CatalogClient,
        shuffle_policy: ShufflePolicy,
    ) -> Self {
        let worker = CatalogWorker::spawn(catalog);

        let mut app = Self {
            app_state: AppState::new(shuffle_policy),
            ui_state: UiState::default(),
            worker,
        };
        app.handle_action(Action::RefreshCatalog);
        app
    }

    fn poll_worker(&mut self) {
        let mut responses = vec![];
        self.ui_state.pending.retain_mut(|handle| match handle.poll() {
            Ok(Some(response)) => {
                responses.push(response);
                false
            }
            Ok(None) => true,
            Err(err) => {
                error!("{err}");
                false
            }
        });
        for response in responses {
            self.handle_response(response);
        }
    }

    fn handle_response(&mut self, response: WorkResponse) {
        match response {
            WorkResponse::PuzzleList(result) => {
                self.ui_state.catalog_loading = false;
                match result {
                    Ok(records) => {
                        self.ui_state.catalog_records = Some(records);
                        self.ui_state.catalog_error = None;
                    }
                    Err(message) => self.ui_state.catalog_error = Some(message),
                }
            }
            WorkResponse::PuzzleFetched(result) => {
                self.ui_state.catalog_loading = false;
                match result.and_then(|(record, bytes)| {
                    decode_image(&bytes).map(|image| (record, image))
                }) {
                    Ok((record, image)) => self.start_session(image, Some(record)),
                    Err(message) => self.ui_state.catalog_error = Some(message),
                }
            }
            WorkResponse::UploadDone(result) => {
                self.ui_state.upload_in_flight = false;
                match result {
                    Ok(record) => {
                        info!("uploaded puzzle {:?} as id {}", record.name, record.id);
                        self.ui_state.upload_name.clear();
                        self.ui_state.upload_path.clear();
                        self.ui_state.upload_error = None;
                        self.ui_state.screen = Screen::Browse;
                        self.handle_action(Action::RefreshCatalog);
                    }
                    Err(message) => self.ui_state.upload_error = Some(message),
                }
            }
            WorkResponse::BestTimeDone(result) => match result {
                Ok(()) => self.handle_action(Action::RefreshCatalog),
                Err(message) => self.ui_state.play_error = Some(message),
            },
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::ShowBrowse => self.ui_state.screen = Screen::Browse,
            Action::ShowUpload => self.ui_state.screen = Screen::Upload,
            Action::ShowPlay => self.ui_state.screen = Screen::Play,
            Action::RefreshCatalog => {
                self.ui_state.catalog_loading = true;
                self.ui_state.catalog_error = None;
                self.enqueue(WorkRequest::ListPuzzles);
            }
            Action::PlayCatalogPuzzle(id) => {
                self.ui_state.catalog_loading = true;
                self.ui_state.catalog_error = None;
                self.enqueue(WorkRequest::FetchPuzzle(id));
            }
            Action::PlayLocalFile(path) => match load_and_decode(&path) {
                Ok(image) => self.start_session(image, None),
                Err(message) => self.ui_state.upload_error = Some(message),
            },
            Action::SubmitUpload { name, path } => match load_jpeg(&path) {
                Ok(bytes) => {
                    self.ui_state.upload_error = None;
                    self.ui_state.upload_in_flight = true;
                    self.enqueue(WorkRequest::UploadPuzzle {
                        name,
                        file_name: file_name_of(&path),
                        bytes,
                    });
                }
                Err(message) => self.ui_state.upload_error = Some(message),
            },
            Action::DragStart(id) => self.app_state.drag.begin(id),
            Action::Drop { x, y } => {
                let outcome = self.app_state.drag.drop(
                    &mut self.app_state.session,
                    self.app_state.layout,
                    x,
                    y,
                );
                if outcome.is_some_and(|outcome| outcome.completed) {
                    self.submit_best_time();
                }
            }
            Action::Shuffle => {
                self.app_state.shuffle();
                if self.app_state.shuffle_policy == ShufflePolicy::ClearCompletion {
                    // A fresh run can set a new best time.
                    self.app_state.best_time_submitted = false;
                }
            }
        }
    }

    fn start_session(&mut self, image: Arc<RgbaImage>, record: Option<PuzzleRecord>) {
        if self.app_state.start_session(image, record) {
            self.ui_state.textures.clear();
            self.ui_state.play_error = None;
            self.ui_state.upload_error = None;
            self.ui_state.screen = Screen::Play;
        } else {
            self.ui_state.play_error =
                Some("image is too small to slice into pieces".to_owned());
        }
    }

    /// Reports the elapsed time once per completion, for catalog
    /// puzzles only.
    fn submit_best_time(&mut self) {
        if self.app_state.best_time_submitted {
            return;
        }
        let Some(record) = &self.app_state.current_puzzle else {
            return;
        };
        let seconds = self.app_state.session.elapsed_seconds();
        let millis = i64::try_from(seconds.saturating_mul(1000)).unwrap_or(i64::MAX);
        info!("completed {:?} in {seconds}s", record.name);
        self.app_state.best_time_submitted = true;
        self.enqueue(WorkRequest::SubmitBestTime {
            id: record.id,
            millis,
        });
    }

    fn enqueue(&mut self, request: WorkRequest) {
        let handle = self.worker.enqueue(request);
        self.ui_state.pending.push(handle);
    }

    fn show_screens(&mut self, ctx: &Context) -> Vec<Action> {
        let mut actions = vec![];
        TopBottomPanel::top("nav").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.ui_state.screen, Screen::Browse, "Catalog");
                ui.selectable_value(&mut self.ui_state.screen, Screen::Upload, "Upload");
                ui.selectable_value(&mut self.ui_state.screen, Screen::Play, "Play");
            });
        });
        actions.extend(CentralPanel::default()
            .show(ctx, |ui| match self.ui_state.screen {
                Screen::Browse => ui::browse_screen::show(ui, &self.ui_state),
                Screen::Upload => ui::upload_screen::show(ui, &mut self.ui_state),
                Screen::Play => ui::play_screen::show(ui, &self.app_state, &mut self.ui_state),
            })
            .inner);
        actions
    }
}

impl eframe::App for SnapjigApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_worker();

        if self.app_state.timer.poll(Instant::now(), &mut self.app_state.session) {
            ctx.request_repaint();
        }

        let actions = self.show_screens(ctx);
        for action in actions {
            self.handle_action(action);
        }

        // Keep the clock ticking and in-flight work polled without
        // waiting for input events.
        if self.app_state.timer.is_running() || !self.ui_state.pending.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

/// Validates a candidate upload without reading its content.
fn validate_jpeg(path: &Path, len: u64) -> Result<(), String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    if !extension.eq_ignore_ascii_case("jpg") && !extension.eq_ignore_ascii_case("jpeg") {
        return Err("only JPEG images are accepted".to_owned());
    }
    if len > MAX_UPLOAD_BYTES {
        return Err("image must be 5 MB or smaller".to_owned());
    }
    Ok(())
}

fn load_jpeg(path: &Path) -> Result<Vec<u8>, String> {
    let metadata =
        std::fs::metadata(path).map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    validate_jpeg(path, metadata.len())?;
    std::fs::read(path).map_err(|err| format!("cannot read {}: {err}", path.display()))
}

fn load_and_decode(path: &Path) -> Result<Arc<RgbaImage>, String> {
    let bytes = load_jpeg(path)?;
    decode_image(&bytes)
}

fn decode_image(bytes: &[u8]) -> Result<Arc<RgbaImage>, String> {
    let image = image::load_from_memory(bytes)
        .map_err(|err| format!("cannot decode image: {err}"))?;
    Ok(Arc::new(image.to_rgba8()))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.jpg")
        .to_owned()
}
