//! Listener storage, bubble path computation and delivery.
//!
//! [`Listeners`] keeps the per-element listener lists. The `bubble_path`
//! function computes the traversal order from a target up to the document
//! root for bubble-phase delivery.

use slotmap::SecondaryMap;

use super::message::ComponentEvent;
use crate::dom::node::ElementId;
use crate::dom::Document;

/// Callback invoked for matching events.
pub type Listener = Box<dyn FnMut(&mut ComponentEvent)>;

// ---------------------------------------------------------------------------
// Listeners
// ---------------------------------------------------------------------------

/// Per-element event listeners, keyed by event name.
#[derive(Default)]
pub struct Listeners {
    by_element: SecondaryMap<ElementId, Vec<(String, Listener)>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for events named `name` on `id`.
    pub fn add(&mut self, id: ElementId, name: impl Into<String>, listener: Listener) {
        match self.by_element.get_mut(id) {
            Some(list) => list.push((name.into(), listener)),
            None => {
                self.by_element.insert(id, vec![(name.into(), listener)]);
            }
        }
    }

    /// Drop every listener on `id`.
    pub fn remove_all(&mut self, id: ElementId) {
        self.by_element.remove(id);
    }

    /// Number of listeners on `id` for `name`.
    pub fn count(&self, id: ElementId, name: &str) -> usize {
        self.by_element
            .get(id)
            .map_or(0, |list| list.iter().filter(|(n, _)| n == name).count())
    }

    /// Run the listeners along `path` in order, honouring `stop_propagation`.
    ///
    /// Returns the number of listener calls.
    pub fn deliver(&mut self, path: &[ElementId], event: &mut ComponentEvent) -> usize {
        let mut calls = 0;
        for &id in path {
            event.current_target = Some(id);
            if let Some(list) = self.by_element.get_mut(id) {
                for (name, listener) in list.iter_mut() {
                    if name == event.name() {
                        listener(&mut *event);
                        calls += 1;
                    }
                }
            }
            if event.is_propagation_stopped() || !event.bubbles() {
                break;
            }
        }
        event.current_target = None;
        calls
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("elements", &self.by_element.len())
            .finish()
    }
}

/// Compute the bubble path from `start` up to the root (inclusive).
///
/// Returns `[start, parent, grandparent, ..., root]`.
/// If `start` does not exist in the document, returns an empty vec.
pub fn bubble_path(doc: &Document, start: ElementId) -> Vec<ElementId> {
    if !doc.contains(start) {
        return Vec::new();
    }
    let mut path = vec![start];
    path.extend(doc.ancestors(start));
    path
}
