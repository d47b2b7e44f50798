//! Node types: ElementId, Attributes, Element.

use slotmap::new_key_type;

use crate::component::ComponentInstance;

new_key_type! {
    /// Unique identifier for an element in a [`Document`](super::Document).
    /// Copy, lightweight (u64).
    pub struct ElementId;
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// An element's markup attributes, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, value)` pairs (builder). Later duplicates overwrite earlier ones.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Value of attribute `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether attribute `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set an attribute, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Remove an attribute, returning its value. No-op if absent.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(pos).1)
    }

    /// Set when `Some`, remove when `None`. Returns the previous value.
    pub fn replace(&mut self, name: &str, value: Option<&str>) -> Option<String> {
        match value {
            Some(v) => self.set(name, v),
            None => self.remove(name),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// What lives in a document slot: a plain element or an upgraded component.
#[derive(Debug)]
pub enum Element {
    /// An element whose tag has no registered component.
    Plain {
        tag: String,
        attributes: Attributes,
    },
    /// A component instance (owns its own attributes).
    Component(ComponentInstance),
}

impl Element {
    /// A plain element with no attributes.
    pub fn plain(tag: impl Into<String>) -> Self {
        Element::Plain {
            tag: tag.into(),
            attributes: Attributes::new(),
        }
    }

    /// The element's tag name.
    pub fn tag(&self) -> &str {
        match self {
            Element::Plain { tag, .. } => tag,
            Element::Component(instance) => instance.tag(),
        }
    }

    /// The element's attributes, whether plain or component-backed.
    pub fn attributes(&self) -> &Attributes {
        match self {
            Element::Plain { attributes, .. } => attributes,
            Element::Component(instance) => instance.attributes(),
        }
    }

    /// The component instance, if this element is one.
    pub fn as_component(&self) -> Option<&ComponentInstance> {
        match self {
            Element::Component(instance) => Some(instance),
            Element::Plain { .. } => None,
        }
    }

    /// Mutable access to the component instance.
    pub fn as_component_mut(&mut self) -> Option<&mut ComponentInstance> {
        match self {
            Element::Component(instance) => Some(instance),
            Element::Plain { .. } => None,
        }
    }
}
