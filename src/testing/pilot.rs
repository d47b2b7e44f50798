//! Pilot: programmatic interaction with a headless document.
//!
//! The `Pilot` owns a [`Document`] whose registry has the sample widgets
//! defined, and provides methods to mount elements, write properties and
//! attributes, record events, and serialize shadow roots for assertions.

use std::cell::RefCell;
use std::rc::Rc;

use crate::component::{Component, ComponentInstance, ComponentRegistry, RegistryError};
use crate::config::RuntimeConfig;
use crate::dom::{Document, ElementId};
use crate::event::ComponentEvent;
use crate::reactive::{ChangeResult, RawValue};
use crate::tokens::{HeadlessProbe, TokenResolver};
use crate::widgets;

/// Events captured by [`Pilot::record`]: `(name, target)` in delivery order.
pub type EventLog = Rc<RefCell<Vec<(String, Option<ElementId>)>>>;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless document driver for testing.
///
/// # Examples
///
/// ```ignore
/// use weft::testing::Pilot;
///
/// let mut pilot = Pilot::new();
/// let button = pilot.mount("x-button", [("size", "large")]);
/// assert_eq!(pilot.instance(button).render_count(), 1);
/// ```
pub struct Pilot {
    doc: Document,
}

impl Pilot {
    /// Default configuration, theme color probe, sample widgets defined.
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// A pilot whose registry uses `config`.
    pub fn with_config(config: RuntimeConfig) -> Self {
        let resolver = Rc::new(TokenResolver::with_config(&config));
        Self::build(config, resolver)
    }

    /// Like [`new`](Self::new) but every color probe fails, as in an
    /// environment with no rendering surface.
    pub fn headless() -> Self {
        let config = RuntimeConfig::default();
        let resolver = Rc::new(TokenResolver::with_config(&config).with_probe(HeadlessProbe));
        Self::build(config, resolver)
    }

    fn build(config: RuntimeConfig, resolver: Rc<TokenResolver>) -> Self {
        let registry = ComponentRegistry::with_resolver(config, resolver);
        // Fresh registry: the sample tags are free and their schemas are valid.
        let _ = widgets::define_all(&registry);
        Self {
            doc: Document::new(Rc::new(registry)),
        }
    }

    /// Define an extra component type.
    pub fn define<C: Component + Default>(&self) -> Result<(), RegistryError> {
        self.doc.registry().define::<C>()
    }

    /// The underlying document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable access to the underlying document.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// The registry's token resolver.
    pub fn resolver(&self) -> &TokenResolver {
        self.doc.registry().resolver()
    }

    // ── Tree ─────────────────────────────────────────────────────────

    /// Create `tag` with markup attributes and append it to the root.
    pub fn mount<K, V, I>(&mut self, tag: &str, attributes: I) -> ElementId
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let root = self.doc.root();
        self.mount_in(root, tag, attributes)
    }

    /// Create `tag` with markup attributes and append it under `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not in the document.
    pub fn mount_in<K, V, I>(&mut self, parent: ElementId, tag: &str, attributes: I) -> ElementId
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let id = self.doc.create_element_with(tag, attributes);
        if let Err(err) = self.doc.append_child(parent, id) {
            panic!("mount_in({tag}): {err}");
        }
        id
    }

    /// Detach `id` from its parent, keeping it alive.
    pub fn unmount(&mut self, id: ElementId) {
        if let Some(parent) = self.doc.parent(id) {
            let _ = self.doc.remove_child(parent, id);
        }
    }

    /// Re-append a previously unmounted element to the root.
    pub fn remount(&mut self, id: ElementId) {
        let root = self.doc.root();
        let _ = self.doc.append_child(root, id);
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Write a property. Returns `Unknown` for plain or missing elements.
    pub fn set(&mut self, id: ElementId, name: &str, value: impl Into<RawValue>) -> ChangeResult {
        self.doc
            .set_property(id, name, value)
            .unwrap_or(ChangeResult::Unknown)
    }

    /// Set an attribute.
    pub fn set_attr(&mut self, id: ElementId, name: &str, value: &str) -> ChangeResult {
        self.doc
            .set_attribute(id, name, value)
            .unwrap_or(ChangeResult::Unknown)
    }

    /// Remove an attribute.
    pub fn remove_attr(&mut self, id: ElementId, name: &str) -> ChangeResult {
        self.doc
            .remove_attribute(id, name)
            .unwrap_or(ChangeResult::Unknown)
    }

    /// Read an attribute.
    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.doc.get_attribute(id, name)
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Record every `name` event that reaches `id`.
    pub fn record(&mut self, id: ElementId, name: &str) -> EventLog {
        let log: EventLog = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let _ = self.doc.add_event_listener(id, name, move |event: &mut ComponentEvent| {
            sink.borrow_mut()
                .push((event.name().to_owned(), event.target()));
        });
        log
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// The component instance at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a component element.
    pub fn instance(&self, id: ElementId) -> &ComponentInstance {
        match self.doc.instance(id) {
            Some(instance) => instance,
            None => panic!("element {id:?} is not a component"),
        }
    }

    /// The whole shadow root as markup.
    pub fn markup(&self, id: ElementId) -> String {
        super::render_to_string(self.instance(id))
    }

    /// The instance's dynamic variable block, or `""`.
    pub fn dynamic_vars(&self, id: ElementId) -> &str {
        self.instance(id).dynamic_vars_css().unwrap_or("")
    }
}

impl Default for Pilot {
    fn default() -> Self {
        Self::new()
    }
}
