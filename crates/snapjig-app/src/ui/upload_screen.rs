//! The upload form: name a JPEG and push it to the catalog, or play a
//! local file directly.

use std::path::PathBuf;

use eframe::egui::{TextEdit, Ui};

use crate::{
    state::UiState,
    ui::{self, Action},
};

pub(crate) fn show(ui: &mut Ui, ui_state: &mut UiState) -> Vec<Action> {
    let mut actions = vec![];

    ui.heading("New puzzle");
    ui.label("JPEG images only, up to 5 MB.");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        ui.label("Name:");
        ui.add(TextEdit::singleline(&mut ui_state.upload_name).hint_text("puzzle name"));
    });
    ui.horizontal(|ui| {
        ui.label("Image file:");
        ui.add(
            TextEdit::singleline(&mut ui_state.upload_path)
                .hint_text("/path/to/image.jpg")
                .desired_width(320.0),
        );
    });

    if let Some(error) = &ui_state.upload_error {
        ui::error_label(ui, error);
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        let ready = !ui_state.upload_in_flight && !ui_state.upload_path.trim().is_empty();
        if ui
            .add_enabled(
                ready && !ui_state.upload_name.trim().is_empty(),
                eframe::egui::Button::new("Upload to catalog"),
            )
            .clicked()
        {
            actions.push(Action::SubmitUpload {
                name: ui_state.upload_name.trim().to_owned(),
                path: PathBuf::from(ui_state.upload_path.trim()),
            });
        }
        if ui
            .add_enabled(ready, eframe::egui::Button::new("Play without uploading"))
            .clicked()
        {
            actions.push(Action::PlayLocalFile(PathBuf::from(
                ui_state.upload_path.trim(),
            )));
        }
        if ui_state.upload_in_flight {
            ui.spinner();
        }
    });

    actions
}
