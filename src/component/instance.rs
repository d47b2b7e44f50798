//! `ComponentInstance`: one live element with values, lifecycle and shadow root.

use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use super::lifecycle::{Lifecycle, LifecycleState};
use super::registry::ComponentMeta;
use super::shadow::ShadowRoot;
use super::traits::{Component, UpdateContext};
use crate::dom::node::Attributes;
use crate::event::ComponentEvent;
use crate::reactive::{ChangeResult, PropValue, PropertyStore, Props, RawValue};
use crate::tokens::TokenResolver;

/// A constructed component.
///
/// Property writes and observed attribute mutations re-render synchronously
/// once the instance is initialized. Before the first attach, and after a
/// detach, they only update values.
pub struct ComponentInstance {
    meta: Rc<ComponentMeta>,
    store: PropertyStore,
    component: Box<dyn Component>,
    lifecycle: Lifecycle,
    shadow: ShadowRoot,
    resolver: Rc<TokenResolver>,
    dynamic_style_id: Rc<str>,
    outbox: Vec<ComponentEvent>,
    render_count: usize,
}

impl ComponentInstance {
    pub(crate) fn new(
        meta: Rc<ComponentMeta>,
        resolver: Rc<TokenResolver>,
        dynamic_style_id: Rc<str>,
    ) -> Self {
        let store = PropertyStore::new(Rc::clone(meta.schema()));
        let component = meta.construct();
        Self {
            meta,
            store,
            component,
            lifecycle: Lifecycle::new(),
            shadow: ShadowRoot::new(),
            resolver,
            dynamic_style_id,
            outbox: Vec::new(),
            render_count: 0,
        }
    }

    /// The registered tag name.
    pub fn tag(&self) -> &str {
        self.meta.tag()
    }

    /// Shared per-type metadata.
    pub fn meta(&self) -> &Rc<ComponentMeta> {
        &self.meta
    }

    /// Current value of a declared property.
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.store.get(name)
    }

    /// Typed view over the current values.
    pub fn props(&self) -> Props<'_> {
        self.store.props()
    }

    /// The element's attributes, kept in sync with reflected properties.
    pub fn attributes(&self) -> &Attributes {
        self.store.attributes()
    }

    /// The rendered shadow root.
    pub fn shadow(&self) -> &ShadowRoot {
        &self.shadow
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// Whether property changes currently re-render.
    pub fn is_initialized(&self) -> bool {
        self.lifecycle.is_initialized()
    }

    /// Renders performed so far.
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// The concrete component, if it is a `T`.
    pub fn component<T: Component>(&self) -> Option<&T> {
        self.component.as_any().downcast_ref::<T>()
    }

    /// Mutable access to the concrete component, if it is a `T`.
    pub fn component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.component.as_any_mut().downcast_mut::<T>()
    }

    // -----------------------------------------------------------------------
    // Properties and attributes
    // -----------------------------------------------------------------------

    /// Write a property; re-renders when the value changed and the instance
    /// is initialized.
    pub fn set_property(&mut self, name: &str, value: impl Into<RawValue>) -> ChangeResult {
        let result = self.store.set(name, value);
        if result.is_changed() {
            self.request_render();
        }
        result
    }

    /// Apply an attribute mutation (`None` removes it).
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> ChangeResult {
        let result = self.store.set_attribute(name, value);
        if result.is_changed() {
            self.request_render();
        }
        result
    }

    /// Remove an attribute, syncing its property.
    pub fn remove_attribute(&mut self, name: &str) -> ChangeResult {
        self.set_attribute(name, None)
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// The attach sequence.
    ///
    /// Adopts the type stylesheet once, back-fills properties from attributes,
    /// marks the instance initialized, and renders once. Returns `false` when
    /// already connected.
    pub fn connect(&mut self) -> bool {
        if !self.lifecycle.attach() {
            return false;
        }
        let css = self.meta.stylesheet();
        if !css.is_empty() && self.shadow.adopt_style(self.meta.tag(), &css) {
            debug!(tag = self.meta.tag(), "stylesheet adopted");
        }
        let backfilled = self.store.backfill();
        self.lifecycle.initialize();
        debug!(
            tag = self.meta.tag(),
            attach = self.lifecycle.attach_count(),
            backfilled,
            "connected"
        );
        self.render();
        true
    }

    /// Leave the tree; renders are silenced until the next [`connect`](Self::connect).
    pub fn disconnect(&mut self) -> bool {
        let detached = self.lifecycle.detach();
        if detached {
            debug!(tag = self.meta.tag(), "disconnected");
        }
        detached
    }

    /// Render now if initialized. Returns whether a render happened.
    pub fn request_render(&mut self) -> bool {
        if !self.lifecycle.is_initialized() {
            debug!(
                tag = self.meta.tag(),
                state = %self.lifecycle.state(),
                "render request swallowed"
            );
            return false;
        }
        self.render();
        true
    }

    fn render(&mut self) {
        let output = {
            let props = self.store.props();
            self.component.render(&props)
        };
        self.shadow.reconcile(output);
        self.render_count += 1;
        trace!(tag = self.meta.tag(), count = self.render_count, "rendered");

        let mut ctx = UpdateContext {
            props: self.store.props(),
            shadow: &mut self.shadow,
            resolver: &self.resolver,
            dynamic_style_id: &self.dynamic_style_id,
            outbox: &mut self.outbox,
        };
        self.component.updated(&mut ctx);
    }

    // -----------------------------------------------------------------------
    // Styling and events
    // -----------------------------------------------------------------------

    /// Replace the instance's dynamic style variables directly.
    pub fn set_dynamic_vars<K, V, I>(&mut self, vars: I)
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, Option<V>)>,
    {
        self.shadow.set_dynamic_vars(&self.dynamic_style_id, vars);
    }

    /// The dynamic variable block, if any variables are set.
    pub fn dynamic_vars_css(&self) -> Option<&str> {
        self.shadow
            .style(&self.dynamic_style_id)
            .map(|s| s.css.as_str())
    }

    /// Queue an event for the document to dispatch from this element.
    pub fn emit(&mut self, event: ComponentEvent) {
        self.outbox.push(event);
    }

    /// Drain events queued by `emit` or the `updated` hook.
    pub fn take_events(&mut self) -> Vec<ComponentEvent> {
        std::mem::take(&mut self.outbox)
    }
}

impl fmt::Debug for ComponentInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentInstance")
            .field("tag", &self.meta.tag())
            .field("state", &self.lifecycle.state())
            .field("attributes", self.store.attributes())
            .field("render_count", &self.render_count)
            .finish_non_exhaustive()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
