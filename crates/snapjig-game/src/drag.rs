//! The drag/snap/complete interaction state machine.

use log::debug;
use snapjig_core::{BoardLayout, Cell, PieceId};

use crate::{Session, SessionTransition};

/// Interaction state: at most one piece is held at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum DragState {
    /// No piece is being dragged.
    #[default]
    Idle,
    /// One piece is actively held.
    Dragging(PieceId),
}

/// The result of a successful drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOutcome {
    /// The piece that was dropped.
    pub piece: PieceId,
    /// The cell the piece snapped to.
    pub cell: Cell,
    /// Whether this drop completed the puzzle.
    pub completed: bool,
}

/// Processes drag-start and drag-end events against the session store.
///
/// The machine moves `Idle` → `Dragging(id)` → `Idle`. Starting a new
/// drag while another is in progress is not a supported input; if the
/// host UI delivers one anyway, the last start wins. On every drop the
/// raw position is snapped to the nearest cell (clamped into the grid)
/// and global completion is re-evaluated.
///
/// # Examples
///
/// ```
/// use snapjig_core::{BoardLayout, PieceId};
/// use snapjig_game::{DragController, Session};
///
/// let mut drag = DragController::new();
/// assert!(drag.state().is_idle());
///
/// drag.begin(PieceId::new(0));
/// assert_eq!(drag.held(), Some(PieceId::new(0)));
///
/// // Dropping with no session pieces still returns the machine to idle.
/// let mut session = Session::new();
/// let outcome = drag.drop(&mut session, BoardLayout::default(), -50.0, 700.0);
/// assert!(drag.state().is_idle());
/// assert!(outcome.is_some());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current interaction state.
    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Returns the held piece, if a drag is in progress.
    #[must_use]
    pub fn held(&self) -> Option<PieceId> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging(id) => Some(id),
        }
    }

    /// Begins dragging a piece. Last writer wins.
    pub fn begin(&mut self, id: PieceId) {
        self.state = DragState::Dragging(id);
    }

    /// Drops the held piece at a raw canvas position.
    ///
    /// Snaps the position to the nearest grid cell, writes the move
    /// into the session, returns the machine to idle, and re-evaluates
    /// global completion. Returns `None` if no drag was in progress.
    ///
    /// A drop may complete the puzzle only when the board actually has
    /// pieces; the vacuous empty-board case never marks completion.
    pub fn drop(
        &mut self,
        session: &mut Session,
        layout: BoardLayout,
        raw_x: f32,
        raw_y: f32,
    ) -> Option<DropOutcome> {
        let id = self.held()?;
        self.state = DragState::Idle;

        let cell = layout.snap(raw_x, raw_y);
        let (x, y) = layout.cell_origin(cell);
        session.apply(SessionTransition::MovePiece { id, x, y });
        debug!("piece {id} dropped at ({raw_x}, {raw_y}), snapped to {cell}");

        let completed = !session.pieces().is_empty() && session.is_solved(layout);
        if completed {
            session.apply(SessionTransition::CompleteGame);
        }

        Some(DropOutcome {
            piece: id,
            cell,
            completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use snapjig_core::PIECE_COUNT;

    use super::*;
    use crate::testing::{layout, placed_pieces, scattered_pieces};

    #[test]
    fn drop_without_drag_is_ignored() {
        let layout = layout();
        let mut session = Session::new();
        session.apply(SessionTransition::SetPieces(scattered_pieces(layout)));

        let mut drag = DragController::new();
        assert_eq!(drag.drop(&mut session, layout, 10.0, 10.0), None);
    }

    #[test]
    fn drop_snaps_to_nearest_cell() {
        let layout = layout();
        let mut session = Session::new();
        session.apply(SessionTransition::SetPieces(scattered_pieces(layout)));

        let mut drag = DragController::new();
        drag.begin(PieceId::new(2));
        let outcome = drag
            .drop(&mut session, layout, 290.0, 10.0)
            .expect("a drag was in progress");

        assert_eq!(outcome.cell, Cell::new(2, 0));
        assert!(!outcome.completed);
        assert_eq!(
            session.piece(PieceId::new(2)).unwrap().origin(),
            (300.0, 0.0)
        );
        assert!(drag.state().is_idle());
    }

    #[test]
    fn drop_outside_canvas_clamps_into_the_grid() {
        let layout = layout();
        let mut session = Session::new();
        session.apply(SessionTransition::SetPieces(scattered_pieces(layout)));

        let mut drag = DragController::new();
        drag.begin(PieceId::new(7));
        let outcome = drag
            .drop(&mut session, layout, -400.0, 99_999.0)
            .expect("a drag was in progress");

        assert_eq!(outcome.cell, Cell::new(0, 3));
        assert_eq!(
            session.piece(PieceId::new(7)).unwrap().origin(),
            (0.0, 450.0)
        );
    }

    #[test]
    fn restarting_a_drag_replaces_the_held_piece() {
        let mut drag = DragController::new();
        drag.begin(PieceId::new(1));
        drag.begin(PieceId::new(9));
        assert_eq!(drag.held(), Some(PieceId::new(9)));
    }

    #[test]
    fn completion_fires_only_on_the_final_correct_drop() {
        let layout = layout();
        let mut session = Session::new();
        session.apply(SessionTransition::SetPieces(scattered_pieces(layout)));
        session.apply(SessionTransition::StartGame);

        let mut drag = DragController::new();
        for id in PieceId::all() {
            assert!(!session.is_complete());
            let (cx, cy) = layout.correct_origin(id);
            drag.begin(id);
            let outcome = drag
                .drop(&mut session, layout, cx, cy)
                .expect("a drag was in progress");
            let is_last = id.index() == PIECE_COUNT - 1;
            assert_eq!(outcome.completed, is_last, "piece {id}");
        }
        assert!(session.is_complete());
    }

    #[test]
    fn misplacing_a_piece_after_near_completion_does_not_complete() {
        let layout = layout();
        let mut session = Session::new();
        session.apply(SessionTransition::SetPieces(placed_pieces(layout)));

        // Knock the last piece one cell out, then drop it wrong again.
        let mut drag = DragController::new();
        drag.begin(PieceId::new(15));
        let outcome = drag
            .drop(&mut session, layout, 0.0, 0.0)
            .expect("a drag was in progress");

        assert!(!outcome.completed);
        assert!(!session.is_complete());
    }

    proptest! {
        #[test]
        fn dropped_pieces_always_rest_grid_aligned(
            x in -1e5_f32..1e5,
            y in -1e5_f32..1e5,
            index in 0..PIECE_COUNT,
        ) {
            let layout = layout();
            let mut session = Session::new();
            session.apply(SessionTransition::SetPieces(scattered_pieces(layout)));

            let id = PieceId::new(index);
            let mut drag = DragController::new();
            drag.begin(id);
            drag.drop(&mut session, layout, x, y);

            let (px, py) = session.piece(id).unwrap().origin();
            let size = layout.piece_size();
            prop_assert!(px >= 0.0 && px <= layout.scatter_range());
            prop_assert!(py >= 0.0 && py <= layout.scatter_range());
            prop_assert_eq!(px % size, 0.0);
            prop_assert_eq!(py % size, 0.0);
        }
    }
}
