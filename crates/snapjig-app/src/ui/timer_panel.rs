//! Elapsed-time display and the completion banner.

use eframe::egui::{RichText, Ui};
use snapjig_game::{Session, format_elapsed};

use crate::ui::Action;

pub(crate) fn show(ui: &mut Ui, session: &Session) -> Vec<Action> {
    ui.label(
        RichText::new(format_elapsed(session.elapsed_seconds()))
            .monospace()
            .size(24.0)
            .strong(),
    );
    if session.is_complete() {
        ui.label(
            RichText::new("Puzzle completed!")
                .color(ui.visuals().warn_fg_color)
                .strong(),
        );
    }
    vec![]
}
