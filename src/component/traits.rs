//! Component trait: tag, property declarations, styles, render, updated hook.
//!
//! A component type declares its schema and stylesheet through `Self: Sized`
//! associated functions (read once by the registry) and renders through
//! object-safe methods on `&self`.

use std::any::Any;

use super::shadow::{RenderOutput, ShadowRoot};
use crate::event::ComponentEvent;
use crate::reactive::{PropertyDecl, Props};
use crate::tokens::TokenResolver;

// ---------------------------------------------------------------------------
// Component trait
// ---------------------------------------------------------------------------

/// A custom element type.
pub trait Component: Any {
    /// The custom element tag, e.g. `"x-button"`.
    fn tag() -> &'static str
    where
        Self: Sized;

    /// Declared properties, in order. Read once per type at definition.
    fn properties() -> Vec<PropertyDecl>
    where
        Self: Sized,
    {
        Vec::new()
    }

    /// Component-scoped stylesheet. Computed once per type, on first attach.
    fn styles() -> String
    where
        Self: Sized,
    {
        String::new()
    }

    /// Produce the shadow content for the current property values.
    fn render(&self, props: &Props<'_>) -> RenderOutput;

    /// Runs after every render, with access to the shadow root and the resolver.
    fn updated(&mut self, _ctx: &mut UpdateContext<'_>) {}

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ---------------------------------------------------------------------------
// UpdateContext
// ---------------------------------------------------------------------------

/// What the `updated` hook can see and touch.
pub struct UpdateContext<'a> {
    pub(crate) props: Props<'a>,
    pub(crate) shadow: &'a mut ShadowRoot,
    pub(crate) resolver: &'a TokenResolver,
    pub(crate) dynamic_style_id: &'a str,
    pub(crate) outbox: &'a mut Vec<ComponentEvent>,
}

impl<'a> UpdateContext<'a> {
    /// Typed view over the instance's current values.
    pub fn props(&self) -> Props<'a> {
        self.props
    }

    /// The shared token resolver.
    pub fn resolver(&self) -> &'a TokenResolver {
        self.resolver
    }

    /// The shadow root as rendered.
    pub fn shadow(&self) -> &ShadowRoot {
        self.shadow
    }

    /// Replace the instance's dynamic style variables.
    pub fn set_dynamic_vars<K, V, I>(&mut self, vars: I)
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, Option<V>)>,
    {
        self.shadow.set_dynamic_vars(self.dynamic_style_id, vars);
    }

    /// Queue an event; the document dispatches it from this element once the
    /// current operation finishes.
    pub fn emit(&mut self, event: ComponentEvent) {
        self.outbox.push(event);
    }
}

impl std::fmt::Debug for UpdateContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateContext")
            .field("dynamic_style_id", &self.dynamic_style_id)
            .field("queued_events", &self.outbox.len())
            .finish_non_exhaustive()
    }
}
