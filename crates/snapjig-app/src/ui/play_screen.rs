//! The play canvas: grid, draggable pieces, shuffle control.

use eframe::egui::{
    Color32, Id, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, Vec2, pos2, vec2,
};
use snapjig_core::GRID_SIZE;
use snapjig_game::Piece;

use crate::{
    state::{AppState, UiState},
    ui::{self, Action},
};

pub(crate) fn show(ui: &mut Ui, app_state: &AppState, ui_state: &mut UiState) -> Vec<Action> {
    let mut actions = vec![];

    ui.vertical_centered(|ui| {
        timer_row(ui, app_state, &mut actions);
        if let Some(error) = &ui_state.play_error {
            ui::error_label(ui, error);
        }
        if app_state.session.pieces().is_empty() {
            ui.label("No puzzle loaded. Pick one from the catalog or upload an image.");
            return;
        }
        canvas(ui, app_state, ui_state, &mut actions);
    });

    actions
}

fn timer_row(ui: &mut Ui, app_state: &AppState, actions: &mut Vec<Action>) {
    ui.horizontal(|ui| {
        actions.extend(super::timer_panel::show(ui, &app_state.session));
        if !app_state.session.pieces().is_empty() && ui.button("Shuffle pieces").clicked() {
            actions.push(Action::Shuffle);
        }
    });
}

fn canvas(ui: &mut Ui, app_state: &AppState, ui_state: &mut UiState, actions: &mut Vec<Action>) {
    let layout = app_state.layout;
    let canvas_size = Vec2::splat(layout.canvas_size());
    let (canvas_rect, _) = ui.allocate_exact_size(canvas_size, Sense::hover());
    let painter = ui.painter_at(canvas_rect);

    painter.rect_filled(canvas_rect, 0.0, ui.visuals().extreme_bg_color);
    draw_grid_lines(&painter, canvas_rect, layout.piece_size());

    let held = app_state.drag.held();

    // Draw resting pieces first so the held piece stays on top.
    for piece in app_state.session.pieces() {
        if held == Some(piece.id()) {
            continue;
        }
        draw_piece(ui, ui_state, canvas_rect.min, piece, Vec2::ZERO, 1.0);
    }
    if let Some(id) = held
        && let Some(piece) = app_state.session.piece(id)
    {
        draw_piece(ui, ui_state, canvas_rect.min, piece, ui_state.drag_offset, 0.8);
    }

    // Interaction: one drag region per piece, last-started drag wins.
    for piece in app_state.session.pieces() {
        let offset = if held == Some(piece.id()) {
            ui_state.drag_offset
        } else {
            Vec2::ZERO
        };
        let rect = piece_rect(canvas_rect.min, piece, offset);
        let response = ui.interact(rect, Id::new(("piece", piece.id())), Sense::drag());

        if response.drag_started() {
            ui_state.drag_offset = Vec2::ZERO;
            actions.push(Action::DragStart(piece.id()));
        }
        if held == Some(piece.id()) {
            ui_state.drag_offset += response.drag_delta();
            if response.drag_stopped() {
                let (px, py) = piece.origin();
                actions.push(Action::Drop {
                    x: px + ui_state.drag_offset.x,
                    y: py + ui_state.drag_offset.y,
                });
            }
        }
    }
}

fn draw_grid_lines(painter: &eframe::egui::Painter, canvas_rect: Rect, piece_size: f32) {
    let stroke = Stroke::new(1.0, Color32::from_gray(90));
    for i in 0..=GRID_SIZE {
        let offset = f32::from(i) * piece_size;
        let top = pos2(canvas_rect.min.x + offset, canvas_rect.min.y);
        let left = pos2(canvas_rect.min.x, canvas_rect.min.y + offset);
        painter.line_segment([top, pos2(top.x, canvas_rect.max.y)], stroke);
        painter.line_segment([left, pos2(canvas_rect.max.x, left.y)], stroke);
    }
    painter.rect_stroke(canvas_rect, 0.0, stroke, StrokeKind::Inside);
}

fn piece_rect(canvas_origin: Pos2, piece: &Piece, offset: Vec2) -> Rect {
    let (x, y) = piece.origin();
    Rect::from_min_size(
        canvas_origin + vec2(x, y) + offset,
        vec2(piece.width(), piece.height()),
    )
}

fn draw_piece(
    ui: &Ui,
    ui_state: &mut UiState,
    canvas_origin: Pos2,
    piece: &Piece,
    offset: Vec2,
    opacity: f32,
) {
    let rect = piece_rect(canvas_origin, piece, offset);
    let texture = ui_state.textures.texture_for(ui.ctx(), piece);
    let tint = Color32::WHITE.gamma_multiply(opacity);
    ui.painter().image(
        texture.id(),
        rect,
        Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
        tint,
    );
    ui.painter()
        .rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::from_gray(40)), StrokeKind::Inside);
}
