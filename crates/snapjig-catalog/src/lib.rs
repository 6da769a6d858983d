//! HTTP client for the external puzzle-catalog service.
//!
//! The catalog stores puzzle records (name, uploaded image, best solve
//! time) behind a small JSON API and serves the uploaded images from a
//! static path. This crate consumes that contract as plain blocking
//! request/response calls; the play-session core has no network
//! dependency and works the same whether its image came from here or
//! from a local file.
//!
//! Calls are best-effort with no retry policy: a failed call surfaces
//! as a [`CatalogError`] and the user may simply resubmit.

pub use self::client::{CatalogClient, CatalogError, PuzzleRecord};

mod client;
