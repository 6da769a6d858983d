//! The session store: pieces, flags, and named state transitions.

use std::sync::Arc;

use image::RgbaImage;
use snapjig_core::{BoardLayout, PieceId};

/// One jigsaw piece.
///
/// The id is immutable and identifies the piece's correct cell; the
/// origin is mutated by drag operations and is always grid-aligned
/// after a drop. The bitmap is the cropped sub-image for this piece and
/// never changes once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    id: PieceId,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    bitmap: Arc<RgbaImage>,
}

impl Piece {
    /// Creates a piece at the given origin.
    ///
    /// `size` is the on-canvas side length (pieces are square on
    /// screen regardless of the bitmap's pixel dimensions).
    #[must_use]
    pub fn new(id: PieceId, x: f32, y: f32, size: f32, bitmap: Arc<RgbaImage>) -> Self {
        Self {
            id,
            x,
            y,
            width: size,
            height: size,
            bitmap,
        }
    }

    /// Returns the piece id.
    #[must_use]
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Returns the current top-left origin on the canvas.
    #[must_use]
    pub fn origin(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Returns the on-canvas width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the on-canvas height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the cropped bitmap for this piece.
    #[must_use]
    pub fn bitmap(&self) -> &Arc<RgbaImage> {
        &self.bitmap
    }

    /// Returns whether this piece currently sits at its correct origin.
    #[must_use]
    pub fn is_placed(&self, layout: BoardLayout) -> bool {
        (self.x, self.y) == layout.correct_origin(self.id)
    }
}

/// A named state transition of the [`Session`] store.
///
/// Every transition is a synchronous total function of the prior state
/// and its payload: none may fail, and none has side effects beyond the
/// state replacement itself.
#[derive(Debug, Clone)]
pub enum SessionTransition {
    /// Stores a new source image and returns the session to a pre-game
    /// state. Does not itself create pieces.
    SetImage(Arc<RgbaImage>),
    /// Replaces the piece sequence wholesale.
    SetPieces(Vec<Piece>),
    /// Moves one piece by id. A no-op if the id is not present.
    MovePiece {
        /// Piece to move.
        id: PieceId,
        /// New origin x.
        x: f32,
        /// New origin y.
        y: f32,
    },
    /// Marks the session started and resets the clock.
    StartGame,
    /// Marks the session complete. Idempotent.
    CompleteGame,
    /// Sets the elapsed time. The caller owns monotonic increase.
    UpdateTimer(u64),
    /// Clears the started/complete flags and the clock, leaving pieces
    /// and image untouched.
    ResetGame,
}

/// Governs whether re-shuffling clears an earlier completion.
///
/// The original game keeps `is_complete` set when a solved board is
/// shuffled, which is observable behavior but likely unintended. Both
/// variants are supported; callers pick one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShufflePolicy {
    /// Keep an earlier completion (source behavior).
    #[default]
    KeepCompletion,
    /// Clear the completion flag along with the re-scatter.
    ClearCompletion,
}

/// One play-through of a single puzzle image.
///
/// The session is created empty, becomes populated when an image is
/// sliced into pieces, and is reused until a new image replaces it.
/// All mutation goes through [`Session::apply`].
///
/// # Examples
///
/// ```
/// use snapjig_game::{Session, SessionTransition};
///
/// let mut session = Session::new();
/// assert!(!session.is_started());
///
/// session.apply(SessionTransition::StartGame);
/// session.apply(SessionTransition::UpdateTimer(3));
/// assert_eq!(session.elapsed_seconds(), 3);
///
/// session.apply(SessionTransition::ResetGame);
/// assert!(!session.is_started());
/// assert_eq!(session.elapsed_seconds(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    original_image: Option<Arc<RgbaImage>>,
    pieces: Vec<Piece>,
    is_started: bool,
    is_complete: bool,
    elapsed_seconds: u64,
}

impl Session {
    /// Creates an empty session with no image and no pieces.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one named transition to the store.
    pub fn apply(&mut self, transition: SessionTransition) {
        match transition {
            SessionTransition::SetImage(image) => {
                self.original_image = Some(image);
                self.is_started = false;
                self.is_complete = false;
            }
            SessionTransition::SetPieces(pieces) => {
                self.pieces = pieces;
            }
            SessionTransition::MovePiece { id, x, y } => {
                if let Some(piece) = self.pieces.iter_mut().find(|piece| piece.id == id) {
                    piece.x = x;
                    piece.y = y;
                }
            }
            SessionTransition::StartGame => {
                self.is_started = true;
                self.elapsed_seconds = 0;
            }
            SessionTransition::CompleteGame => {
                self.is_complete = true;
            }
            SessionTransition::UpdateTimer(seconds) => {
                self.elapsed_seconds = seconds;
            }
            SessionTransition::ResetGame => {
                self.is_started = false;
                self.is_complete = false;
                self.elapsed_seconds = 0;
            }
        }
    }

    /// Returns the source image, if one has been supplied.
    #[must_use]
    pub fn original_image(&self) -> Option<&Arc<RgbaImage>> {
        self.original_image.as_ref()
    }

    /// Returns the pieces in creation (row-major id) order.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Returns the piece with the given id, if present.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.id() == id)
    }

    /// Returns whether a game is in progress or finished.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.is_started
    }

    /// Returns whether the puzzle has been completed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Returns the elapsed play time in whole seconds.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Evaluates the completion predicate against the current piece
    /// positions.
    ///
    /// True iff every piece sits at its correct origin. An empty board
    /// is vacuously solved, so callers gate on [`Session::pieces`]
    /// being non-empty before acting on this.
    #[must_use]
    pub fn is_solved(&self, layout: BoardLayout) -> bool {
        self.pieces.iter().all(|piece| piece.is_placed(layout))
    }

    /// Re-scatters every piece to the given origins and restarts the
    /// clock.
    ///
    /// `origins` are applied to pieces in creation order; any surplus
    /// origins are ignored. Whether an earlier completion survives is
    /// decided by `policy`.
    pub fn reshuffle(&mut self, origins: &[(f32, f32)], policy: ShufflePolicy) {
        let moves: Vec<_> = self
            .pieces
            .iter()
            .zip(origins)
            .map(|(piece, &(x, y))| SessionTransition::MovePiece {
                id: piece.id(),
                x,
                y,
            })
            .collect();
        for transition in moves {
            self.apply(transition);
        }
        if policy == ShufflePolicy::ClearCompletion {
            self.apply(SessionTransition::ResetGame);
        }
        self.apply(SessionTransition::StartGame);
    }
}

#[cfg(test)]
mod tests {
    use snapjig_core::PIECE_COUNT;

    use super::*;
    use crate::testing::{layout, placed_pieces, scattered_pieces, test_image};

    #[test]
    fn set_image_resets_flags_but_not_pieces() {
        let mut session = Session::new();
        session.apply(SessionTransition::SetPieces(scattered_pieces(layout())));
        session.apply(SessionTransition::StartGame);
        session.apply(SessionTransition::CompleteGame);

        session.apply(SessionTransition::SetImage(test_image(8, 8)));

        assert!(!session.is_started());
        assert!(!session.is_complete());
        assert_eq!(session.pieces().len(), PIECE_COUNT as usize);
        assert!(session.original_image().is_some());
    }

    #[test]
    fn move_piece_updates_only_the_target() {
        let layout = layout();
        let mut session = Session::new();
        session.apply(SessionTransition::SetPieces(placed_pieces(layout)));

        let id = PieceId::new(5);
        session.apply(SessionTransition::MovePiece {
            id,
            x: 300.0,
            y: 450.0,
        });

        assert_eq!(session.piece(id).unwrap().origin(), (300.0, 450.0));
        for piece in session.pieces().iter().filter(|p| p.id() != id) {
            assert!(piece.is_placed(layout));
        }
    }

    #[test]
    fn move_piece_with_unknown_id_is_a_no_op() {
        let layout = layout();
        // A partial piece set, so some ids are genuinely absent.
        let subset: Vec<_> = placed_pieces(layout)
            .into_iter()
            .filter(|piece| piece.id().index() < 4)
            .collect();
        let mut session = Session::new();
        session.apply(SessionTransition::SetPieces(subset.clone()));

        session.apply(SessionTransition::MovePiece {
            id: PieceId::new(10),
            x: 123.0,
            y: 456.0,
        });

        assert_eq!(session.pieces(), &subset[..]);
    }

    #[test]
    fn start_game_resets_the_clock() {
        let mut session = Session::new();
        session.apply(SessionTransition::UpdateTimer(41));
        session.apply(SessionTransition::StartGame);
        assert!(session.is_started());
        assert_eq!(session.elapsed_seconds(), 0);
    }

    #[test]
    fn complete_game_is_idempotent() {
        let mut session = Session::new();
        session.apply(SessionTransition::SetPieces(placed_pieces(layout())));
        session.apply(SessionTransition::StartGame);
        session.apply(SessionTransition::UpdateTimer(7));

        session.apply(SessionTransition::CompleteGame);
        let after_first = session.clone();
        session.apply(SessionTransition::CompleteGame);

        assert!(session.is_complete());
        assert_eq!(session.elapsed_seconds(), after_first.elapsed_seconds());
        assert_eq!(session.pieces(), after_first.pieces());
        assert_eq!(session.is_started(), after_first.is_started());
    }

    #[test]
    fn reset_game_leaves_pieces_and_image_untouched() {
        let mut session = Session::new();
        session.apply(SessionTransition::SetImage(test_image(8, 8)));
        session.apply(SessionTransition::SetPieces(scattered_pieces(layout())));
        session.apply(SessionTransition::StartGame);
        session.apply(SessionTransition::UpdateTimer(10));
        session.apply(SessionTransition::CompleteGame);

        session.apply(SessionTransition::ResetGame);

        assert!(!session.is_started());
        assert!(!session.is_complete());
        assert_eq!(session.elapsed_seconds(), 0);
        assert_eq!(session.pieces().len(), PIECE_COUNT as usize);
        assert!(session.original_image().is_some());
    }

    #[test]
    fn is_solved_requires_every_piece_in_place() {
        let layout = layout();
        let mut session = Session::new();
        session.apply(SessionTransition::SetPieces(placed_pieces(layout)));
        assert!(session.is_solved(layout));

        // One piece off by a single cell breaks the predicate.
        let (cx, cy) = layout.correct_origin(PieceId::new(0));
        session.apply(SessionTransition::MovePiece {
            id: PieceId::new(0),
            x: cx + layout.piece_size(),
            y: cy,
        });
        assert!(!session.is_solved(layout));
    }

    #[test]
    fn pieces_may_share_a_cell() {
        let layout = layout();
        let mut session = Session::new();
        session.apply(SessionTransition::SetPieces(placed_pieces(layout)));

        // Stack piece 1 on top of piece 0's cell. Legal, but not solved.
        let (x, y) = layout.correct_origin(PieceId::new(0));
        session.apply(SessionTransition::MovePiece {
            id: PieceId::new(1),
            x,
            y,
        });

        assert_eq!(session.piece(PieceId::new(0)).unwrap().origin(), (x, y));
        assert_eq!(session.piece(PieceId::new(1)).unwrap().origin(), (x, y));
        assert!(!session.is_solved(layout));
    }

    #[test]
    fn reshuffle_keep_completion_preserves_the_flag() {
        let mut session = Session::new();
        session.apply(SessionTransition::SetPieces(placed_pieces(layout())));
        session.apply(SessionTransition::StartGame);
        session.apply(SessionTransition::CompleteGame);

        let origins = vec![(10.0, 20.0); PIECE_COUNT as usize];
        session.reshuffle(&origins, ShufflePolicy::KeepCompletion);

        assert!(session.is_complete());
        assert!(session.is_started());
        assert_eq!(session.elapsed_seconds(), 0);
        assert_eq!(session.piece(PieceId::new(0)).unwrap().origin(), (10.0, 20.0));
    }

    #[test]
    fn reshuffle_clear_completion_clears_the_flag() {
        let mut session = Session::new();
        session.apply(SessionTransition::SetPieces(placed_pieces(layout())));
        session.apply(SessionTransition::StartGame);
        session.apply(SessionTransition::CompleteGame);

        let origins = vec![(10.0, 20.0); PIECE_COUNT as usize];
        session.reshuffle(&origins, ShufflePolicy::ClearCompletion);

        assert!(!session.is_complete());
        assert!(session.is_started());
        assert_eq!(session.elapsed_seconds(), 0);
    }
}
