//! Play-session state for the snapjig puzzle game.
//!
//! This crate implements the session store and the interaction logic
//! around it, with no UI framework involved:
//!
//! - [`Session`] — the single mutable store for one play-through,
//!   updated only through named [`SessionTransition`]s.
//! - [`DragController`] — the drag/snap/complete state machine that
//!   turns raw drop coordinates into grid-aligned moves and evaluates
//!   completion after every drop.
//! - [`TimerDriver`] — advances the session clock once per wall-clock
//!   second while a game is running.
//!
//! The store is a single-writer design: all transitions are synchronous
//! total functions applied on the caller's thread, and observers (the
//! UI) read the state back between events.

pub use self::{
    drag::{DragController, DragState, DropOutcome},
    session::{Piece, Session, SessionTransition, ShufflePolicy},
    timer::{TimerDriver, format_elapsed},
};

mod drag;
mod session;
mod timer;

#[cfg(test)]
pub(crate) mod testing;
