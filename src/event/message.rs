//! `ComponentEvent`: a named event with an arbitrary payload.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::dom::node::ElementId;

/// A named event emitted by an element.
///
/// Events bubble by default: after the target's listeners run, each ancestor's
/// listeners run in turn until the root or until a listener calls
/// [`stop_propagation`](Self::stop_propagation).
#[derive(Clone)]
pub struct ComponentEvent {
    name: String,
    payload: Rc<dyn Any>,
    bubbles: bool,
    pub(crate) target: Option<ElementId>,
    pub(crate) current_target: Option<ElementId>,
    propagation_stopped: bool,
}

impl ComponentEvent {
    /// A bubbling event carrying `payload`.
    pub fn new(name: impl Into<String>, payload: impl Any) -> Self {
        Self {
            name: name.into(),
            payload: Rc::new(payload),
            bubbles: true,
            target: None,
            current_target: None,
            propagation_stopped: false,
        }
    }

    /// A bubbling event with no payload.
    pub fn signal(name: impl Into<String>) -> Self {
        Self::new(name, ())
    }

    /// Deliver to the target only (builder).
    pub fn non_bubbling(mut self) -> Self {
        self.bubbles = false;
        self
    }

    /// The event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether delivery continues past the target.
    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    /// The element the event was dispatched on.
    pub fn target(&self) -> Option<ElementId> {
        self.target
    }

    /// The element whose listeners are running.
    pub fn current_target(&self) -> Option<ElementId> {
        self.current_target
    }

    /// Attempt to downcast the payload to a concrete type.
    pub fn detail<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Skip the remaining ancestors. Listeners on the current element still run.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether a listener called [`stop_propagation`](Self::stop_propagation).
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

impl fmt::Debug for ComponentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentEvent")
            .field("name", &self.name)
            .field("bubbles", &self.bubbles)
            .field("target", &self.target)
            .field("current_target", &self.current_target)
            .field("propagation_stopped", &self.propagation_stopped)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Selected {
        index: usize,
    }

    #[test]
    fn payload_downcast() {
        let event = ComponentEvent::new("x-select", Selected { index: 2 });
        assert_eq!(event.detail::<Selected>(), Some(&Selected { index: 2 }));
        assert!(event.detail::<String>().is_none());
    }

    #[test]
    fn defaults() {
        let event = ComponentEvent::signal("x-close");
        assert_eq!(event.name(), "x-close");
        assert!(event.bubbles());
        assert!(event.target().is_none());
        assert!(!event.is_propagation_stopped());
        assert_eq!(event.detail::<()>(), Some(&()));
    }

    #[test]
    fn non_bubbling_and_stop() {
        let mut event = ComponentEvent::signal("x-focus").non_bubbling();
        assert!(!event.bubbles());
        event.stop_propagation();
        assert!(event.is_propagation_stopped());
    }

    #[test]
    fn clones_share_payload() {
        let event = ComponentEvent::new("x-input", String::from("abc"));
        let copy = event.clone();
        assert_eq!(copy.detail::<String>().map(String::as_str), Some("abc"));
    }
}
