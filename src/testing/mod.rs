//! Headless testing framework: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a [`Document`](crate::dom::Document) with the
//! sample widgets defined. Use [`render_to_string`] and related helpers to
//! capture shadow roots as markup for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::{EventLog, Pilot};
pub use snapshot::{content_to_string, outline, render_to_string};
