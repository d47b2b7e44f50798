//! `PropertyStore`: one value slot per declared property, kept in sync with attributes.
//!
//! The store only observes. Each write reports a [`ChangeResult`] and leaves the
//! decision to re-render with the owning
//! [`ComponentInstance`](crate::component::ComponentInstance).

use std::rc::Rc;

use tracing::trace;

use super::schema::PropertySchema;
use super::value::{coerce, from_attribute, to_attribute, PropValue, RawValue, ValueType};
use crate::dom::node::Attributes;

/// Outcome of a property write or an attribute mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeResult {
    /// No declared property (or observed attribute) has that name.
    Unknown,
    /// The coerced value equals the current one; nothing happened.
    Unchanged,
    /// The property's value changed.
    Changed {
        /// Slot index of the property.
        property: usize,
    },
}

impl ChangeResult {
    /// Whether the write changed a value.
    pub fn is_changed(&self) -> bool {
        matches!(self, ChangeResult::Changed { .. })
    }
}

// ---------------------------------------------------------------------------
// PropertyStore
// ---------------------------------------------------------------------------

/// Current property values plus the element's attributes.
#[derive(Debug, Clone)]
pub struct PropertyStore {
    schema: Rc<PropertySchema>,
    values: Vec<PropValue>,
    attributes: Attributes,
}

impl PropertyStore {
    /// Seed every slot with its declared default. Attributes start empty.
    pub fn new(schema: Rc<PropertySchema>) -> Self {
        Self::with_attributes(schema, Attributes::new())
    }

    /// Seed defaults and start from existing markup attributes.
    ///
    /// Attributes are not read into properties until [`backfill`](Self::backfill).
    pub fn with_attributes(schema: Rc<PropertySchema>, attributes: Attributes) -> Self {
        let values = schema.iter().map(|m| m.default.clone()).collect();
        Self {
            schema,
            values,
            attributes,
        }
    }

    /// The schema this store was built from.
    pub fn schema(&self) -> &Rc<PropertySchema> {
        &self.schema
    }

    /// Current value of property `name`.
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.schema.index_of(name).map(|i| &self.values[i])
    }

    /// The backing attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Read-only view handed to render functions.
    pub fn props(&self) -> Props<'_> {
        Props { store: self }
    }

    /// Write a property.
    ///
    /// The value is coerced to the declared type. If it differs from the current
    /// value and the property is reflected, the backing attribute is updated; the
    /// resulting attribute echo is a no-op because it decodes to the same value.
    pub fn set(&mut self, name: &str, value: impl Into<RawValue>) -> ChangeResult {
        let Some(index) = self.schema.index_of(name) else {
            return ChangeResult::Unknown;
        };
        let meta = self.schema.meta(index);
        let next = coerce(meta.value_type, &value.into());
        if self.values[index] == next {
            return ChangeResult::Unchanged;
        }
        self.values[index] = next;

        if meta.reflected {
            let attribute = meta.attribute.clone();
            let encoded = to_attribute(&self.values[index]);
            let previous = self.attributes.replace(&attribute, encoded.as_deref());
            if previous != encoded {
                let echo = self.attribute_changed(&attribute);
                debug_assert_eq!(echo, ChangeResult::Unchanged);
            }
        }
        ChangeResult::Changed { property: index }
    }

    /// Apply an external attribute mutation (`None` removes the attribute).
    ///
    /// Unobserved attributes are stored and report [`ChangeResult::Unknown`].
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> ChangeResult {
        let previous = self.attributes.replace(name, value);
        if previous.as_deref() == value {
            return if self.schema.by_attribute(name).is_some() {
                ChangeResult::Unchanged
            } else {
                ChangeResult::Unknown
            };
        }
        self.attribute_changed(name)
    }

    /// Sync a property from its observed attribute's current value.
    fn attribute_changed(&mut self, attribute: &str) -> ChangeResult {
        let Some((index, meta)) = self.schema.by_attribute(attribute) else {
            return ChangeResult::Unknown;
        };
        let next = from_attribute(meta.value_type, self.attributes.get(attribute));
        if self.values[index] == next {
            return ChangeResult::Unchanged;
        }
        trace!(attribute, property = %meta.name, value = %next, "attribute synced to property");
        self.values[index] = next;
        ChangeResult::Changed { property: index }
    }

    /// First-attach pass: present attributes win over current values, and true
    /// Boolean properties with no attribute are written back to markup.
    ///
    /// Returns the number of attributes written. A repeated pass writes none.
    pub fn backfill(&mut self) -> usize {
        let mut written = 0;
        for (index, meta) in self.schema.iter().enumerate().filter(|(_, m)| m.reflected) {
            match self.attributes.get(&meta.attribute) {
                Some(raw) => self.values[index] = from_attribute(meta.value_type, Some(raw)),
                None if self.values[index] == PropValue::Bool(true) => {
                    self.attributes.set(meta.attribute.as_str(), "");
                    written += 1;
                }
                None => {}
            }
        }
        written
    }
}

// ---------------------------------------------------------------------------
// Props
// ---------------------------------------------------------------------------

/// Read-only, typed access to a store's values.
///
/// Typed getters return the type's empty value for unknown names or mismatched
/// types, so render functions never need to handle errors.
#[derive(Debug, Clone, Copy)]
pub struct Props<'a> {
    store: &'a PropertyStore,
}

impl<'a> Props<'a> {
    /// Current value of property `name`.
    pub fn get(&self, name: &str) -> Option<&'a PropValue> {
        self.store.get(name)
    }

    /// Boolean value, or `false`.
    pub fn bool(&self, name: &str) -> bool {
        self.get(name).and_then(PropValue::as_bool).unwrap_or(false)
    }

    /// Numeric value, or `0.0`.
    pub fn number(&self, name: &str) -> f64 {
        self.get(name).and_then(PropValue::as_number).unwrap_or(0.0)
    }

    /// String value, or `""`.
    pub fn str(&self, name: &str) -> &'a str {
        self.get(name).and_then(PropValue::as_str).unwrap_or("")
    }

    /// The element's attributes, for render functions that forward markup.
    pub fn attributes(&self) -> &'a Attributes {
        &self.store.attributes
    }

    /// `(name, type, value)` for every property in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, ValueType, &'a PropValue)> {
        let store = self.store;
        store
            .schema
            .iter()
            .zip(&store.values)
            .map(|(meta, value)| (meta.name.as_str(), meta.value_type, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::schema::PropertyDecl;

    fn store() -> PropertyStore {
        let schema = PropertySchema::new([
            PropertyDecl::boolean("disabled"),
            PropertyDecl::string("size"),
            PropertyDecl::number("count").default_value(1),
            PropertyDecl::boolean("open").default_value(true),
            PropertyDecl::string("note").reflect(false),
        ])
        .unwrap();
        PropertyStore::new(Rc::new(schema))
    }

    #[test]
    fn seeded_with_defaults() {
        let s = store();
        assert_eq!(s.get("disabled"), Some(&PropValue::Bool(false)));
        assert_eq!(s.get("size"), Some(&PropValue::Str(String::new())));
        assert_eq!(s.get("count"), Some(&PropValue::Number(1.0)));
        assert!(s.attributes().is_empty());
    }

    #[test]
    fn boolean_write_reflects_presence() {
        let mut s = store();
        assert_eq!(s.set("disabled", true), ChangeResult::Changed { property: 0 });
        assert_eq!(s.attributes().get("disabled"), Some(""));
        assert_eq!(s.set("disabled", true), ChangeResult::Unchanged);
        assert_eq!(s.set("disabled", 0), ChangeResult::Changed { property: 0 });
        assert!(!s.attributes().contains("disabled"));
    }

    #[test]
    fn string_write_reflects_value_or_removal() {
        let mut s = store();
        s.set("size", "large");
        assert_eq!(s.attributes().get("size"), Some("large"));
        s.set("size", RawValue::Null);
        assert_eq!(s.get("size"), Some(&PropValue::Str(String::new())));
        assert!(!s.attributes().contains("size"));
    }

    #[test]
    fn number_write_reflects_text() {
        let mut s = store();
        assert!(s.set("count", "2.5").is_changed());
        assert_eq!(s.attributes().get("count"), Some("2.5"));
        assert_eq!(s.set("count", 2.5), ChangeResult::Unchanged);
        assert!(s.set("count", "garbage").is_changed());
        assert_eq!(s.get("count"), Some(&PropValue::Number(0.0)));
        assert_eq!(s.attributes().get("count"), Some("0"));
    }

    #[test]
    fn unreflected_write_leaves_attributes_alone() {
        let mut s = store();
        assert!(s.set("note", "hi").is_changed());
        assert!(!s.attributes().contains("note"));
    }

    #[test]
    fn unknown_property() {
        let mut s = store();
        assert_eq!(s.set("nope", true), ChangeResult::Unknown);
    }

    #[test]
    fn attribute_mutation_syncs_property() {
        let mut s = store();
        assert!(s.set_attribute("disabled", Some("")).is_changed());
        assert_eq!(s.get("disabled"), Some(&PropValue::Bool(true)));
        assert!(s.set_attribute("disabled", Some("false")).is_changed());
        assert_eq!(s.get("disabled"), Some(&PropValue::Bool(false)));
        assert!(s.set_attribute("count", Some("9")).is_changed());
        assert_eq!(s.get("count"), Some(&PropValue::Number(9.0)));
        assert!(s.set_attribute("count", None).is_changed());
        assert_eq!(s.get("count"), Some(&PropValue::Number(0.0)));
    }

    #[test]
    fn attribute_mutation_reproducing_value_is_noop() {
        let mut s = store();
        s.set("size", "large");
        assert_eq!(s.set_attribute("size", Some("large")), ChangeResult::Unchanged);
        // Different text, same decoded value.
        s.set("count", 3);
        assert_eq!(s.set_attribute("count", Some("3.0")), ChangeResult::Unchanged);
        assert_eq!(s.attributes().get("count"), Some("3.0"));
    }

    #[test]
    fn unobserved_attribute_is_stored() {
        let mut s = store();
        assert_eq!(s.set_attribute("title", Some("x")), ChangeResult::Unknown);
        assert_eq!(s.set_attribute("note", Some("x")), ChangeResult::Unknown);
        assert_eq!(s.attributes().get("title"), Some("x"));
        assert_eq!(s.get("note"), Some(&PropValue::Str(String::new())));
    }

    #[test]
    fn backfill_prefers_attributes_and_writes_true_booleans() {
        let schema = store().schema().clone();
        let attrs = Attributes::new().with("size", "large").with("count", "4");
        let mut s = PropertyStore::with_attributes(schema, attrs);
        s.backfill();
        assert_eq!(s.get("size"), Some(&PropValue::Str("large".into())));
        assert_eq!(s.get("count"), Some(&PropValue::Number(4.0)));
        assert_eq!(s.attributes().get("open"), Some(""));
        assert!(!s.attributes().contains("disabled"));
    }

    #[test]
    fn backfill_is_idempotent() {
        let mut s = store();
        assert_eq!(s.backfill(), 1);
        let once = s.clone();
        assert_eq!(s.backfill(), 0);
        assert_eq!(s.attributes(), once.attributes());
        assert_eq!(s.get("open"), once.get("open"));
    }

    #[test]
    fn written_value_matches_decoded_attribute() {
        let mut s = store();
        s.set("size", "x-large");
        s.set("count", -7);
        s.set("disabled", "yes");
        s.backfill();
        let schema = s.schema().clone();
        for meta in schema.iter().filter(|m| m.reflected) {
            let decoded = from_attribute(meta.value_type, s.attributes().get(&meta.attribute));
            assert_eq!(Some(&decoded), s.get(&meta.name), "{}", meta.name);
        }
    }

    #[test]
    fn props_view() {
        let mut s = store();
        s.set("size", "small");
        let props = s.props();
        assert_eq!(props.str("size"), "small");
        assert!(props.bool("open"));
        assert_eq!(props.number("count"), 1.0);
        assert_eq!(props.str("missing"), "");
        assert!(!props.bool("size"));
        assert_eq!(props.iter().count(), 5);
    }
}
