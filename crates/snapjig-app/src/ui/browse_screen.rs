//! The catalog browser: list records, pick one to play.

use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use snapjig_game::format_elapsed;

use crate::{
    state::UiState,
    ui::{self, Action},
};

pub(crate) fn show(ui: &mut Ui, ui_state: &UiState) -> Vec<Action> {
    let mut actions = vec![];

    ui.horizontal(|ui| {
        ui.heading("Puzzle catalog");
        if ui.button("Refresh").clicked() {
            actions.push(Action::RefreshCatalog);
        }
        if ui_state.catalog_loading {
            ui.spinner();
        }
    });
    if let Some(error) = &ui_state.catalog_error {
        ui::error_label(ui, error);
    }

    let Some(records) = &ui_state.catalog_records else {
        if !ui_state.catalog_loading && ui_state.catalog_error.is_none() {
            ui.label("Refresh to load the catalog.");
        }
        return actions;
    };
    if records.is_empty() {
        ui.label("The catalog is empty. Upload an image to create a puzzle.");
        return actions;
    }

    ScrollArea::vertical().show(ui, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto())
            .column(Column::remainder())
            .column(Column::auto())
            .column(Column::auto())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Id");
                });
                header.col(|ui| {
                    ui.strong("Name");
                });
                header.col(|ui| {
                    ui.strong("Best time");
                });
                header.col(|_| {});
            })
            .body(|mut body| {
                for record in records {
                    body.row(24.0, |mut row| {
                        row.col(|ui| {
                            ui.label(record.id.to_string());
                        });
                        row.col(|ui| {
                            ui.label(&record.name);
                        });
                        row.col(|ui| {
                            ui.label(best_time_text(record.best_time));
                        });
                        row.col(|ui| {
                            if ui.button("Play").clicked() {
                                actions.push(Action::PlayCatalogPuzzle(record.id));
                            }
                        });
                    });
                }
            });
    });

    actions
}

fn best_time_text(millis: i64) -> String {
    if millis <= 0 {
        return "—".to_owned();
    }
    format_elapsed(u64::try_from(millis / 1000).unwrap_or_default())
}
