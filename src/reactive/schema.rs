//! Property declarations, the per-type `PropertySchema`, and its `AttributeIndex`.

use std::cell::OnceCell;
use std::collections::HashMap;

use super::value::{coerce, PropValue, RawValue, ValueType};

/// Errors from building a property schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A property or attribute name was empty.
    #[error("property names and attribute names must not be empty")]
    EmptyName,
    /// Two declarations share a property name.
    #[error("property `{0}` is declared more than once")]
    DuplicateProperty(String),
    /// Two declarations map to the same attribute.
    #[error("properties `{first}` and `{second}` both map to attribute `{attribute}`")]
    DuplicateAttribute {
        attribute: String,
        first: String,
        second: String,
    },
}

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

/// Builder for one declared property.
///
/// Properties reflect to an attribute by default; the attribute name is the
/// kebab-case form of the property name unless overridden.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    name: String,
    value_type: ValueType,
    default: RawValue,
    reflected: bool,
    attribute: Option<String>,
}

impl PropertyDecl {
    /// Declare a property of type `value_type` with the type's empty default.
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            default: RawValue::Null,
            reflected: true,
            attribute: None,
        }
    }

    /// A Boolean property (default `false`).
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Boolean)
    }

    /// A Number property (default `0`).
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Number)
    }

    /// A String property (default `""`).
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::String)
    }

    /// Set the default value (builder). Coerced to the declared type.
    pub fn default_value(mut self, value: impl Into<RawValue>) -> Self {
        self.default = value.into();
        self
    }

    /// Override the attribute name (builder).
    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Set whether the property reflects to its attribute (builder).
    pub fn reflect(mut self, reflected: bool) -> Self {
        self.reflected = reflected;
        self
    }
}

/// Resolved metadata for one property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMeta {
    pub name: String,
    pub value_type: ValueType,
    pub default: PropValue,
    pub reflected: bool,
    pub attribute: String,
}

// ---------------------------------------------------------------------------
// PropertySchema
// ---------------------------------------------------------------------------

/// Ordered, validated property declarations for one component type.
#[derive(Debug)]
pub struct PropertySchema {
    properties: Vec<PropertyMeta>,
    by_name: HashMap<String, usize>,
    attributes: OnceCell<AttributeIndex>,
}

impl PropertySchema {
    /// Validate declarations and build the schema. Declaration order is kept.
    pub fn new(decls: impl IntoIterator<Item = PropertyDecl>) -> Result<Self, SchemaError> {
        let mut properties: Vec<PropertyMeta> = Vec::new();
        let mut by_name = HashMap::new();
        let mut attribute_owner: HashMap<String, usize> = HashMap::new();

        for decl in decls {
            if decl.name.is_empty() {
                return Err(SchemaError::EmptyName);
            }
            let attribute = decl.attribute.unwrap_or_else(|| kebab_case(&decl.name));
            if attribute.is_empty() {
                return Err(SchemaError::EmptyName);
            }
            if by_name.contains_key(&decl.name) {
                return Err(SchemaError::DuplicateProperty(decl.name));
            }
            if let Some(&owner) = attribute_owner.get(&attribute) {
                return Err(SchemaError::DuplicateAttribute {
                    attribute,
                    first: properties[owner].name.clone(),
                    second: decl.name,
                });
            }

            let index = properties.len();
            by_name.insert(decl.name.clone(), index);
            attribute_owner.insert(attribute.clone(), index);
            properties.push(PropertyMeta {
                default: coerce(decl.value_type, &decl.default),
                name: decl.name,
                value_type: decl.value_type,
                reflected: decl.reflected,
                attribute,
            });
        }

        Ok(Self {
            properties,
            by_name,
            attributes: OnceCell::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Slot index of property `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Metadata for property `name`.
    pub fn get(&self, name: &str) -> Option<&PropertyMeta> {
        self.index_of(name).map(|i| &self.properties[i])
    }

    /// Metadata by slot index. Panics when out of range.
    pub fn meta(&self, index: usize) -> &PropertyMeta {
        &self.properties[index]
    }

    /// Properties in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyMeta> {
        self.properties.iter()
    }

    /// The reverse attribute → property index, built on first use.
    pub fn attribute_index(&self) -> &AttributeIndex {
        self.attributes.get_or_init(|| AttributeIndex::build(&self.properties))
    }

    /// Resolve an observed attribute back to its property.
    pub fn by_attribute(&self, attribute: &str) -> Option<(usize, &PropertyMeta)> {
        let index = self.attribute_index().get(attribute)?;
        Some((index, &self.properties[index]))
    }
}

// ---------------------------------------------------------------------------
// AttributeIndex
// ---------------------------------------------------------------------------

/// Maps observed attribute names to property slots.
///
/// Only reflected properties are observed; non-reflected properties live purely
/// in memory.
#[derive(Debug, Clone, Default)]
pub struct AttributeIndex {
    map: HashMap<String, usize>,
    observed: Vec<String>,
}

impl AttributeIndex {
    fn build(properties: &[PropertyMeta]) -> Self {
        let mut index = Self::default();
        for (i, meta) in properties.iter().enumerate().filter(|(_, m)| m.reflected) {
            index.map.insert(meta.attribute.clone(), i);
            index.observed.push(meta.attribute.clone());
        }
        index
    }

    /// Property slot for an attribute, if observed.
    pub fn get(&self, attribute: &str) -> Option<usize> {
        self.map.get(attribute).copied()
    }

    /// Observed attribute names, in declaration order.
    pub fn observed_attributes(&self) -> &[String] {
        &self.observed
    }
}

/// `helpText` / `help_text` → `help-text`.
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch == '_' {
            out.push('-');
        } else if ch.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
