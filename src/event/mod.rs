//! Event system: named component events, listeners, bubbling dispatch.

pub mod handler;
pub mod message;

pub use handler::{bubble_path, Listener, Listeners};
pub use message::ComponentEvent;
