//! Reactive properties: typed values, schemas, and attribute reflection.
//!
//! - [`PropertySchema`]: validated, ordered declarations for one component type.
//! - [`PropertyStore`]: value slots plus attributes, kept consistent both ways.
//! - [`ChangeResult`]: what a write did, so the caller decides whether to render.

pub mod schema;
pub mod store;
pub mod value;

pub use schema::{
    kebab_case, AttributeIndex, PropertyDecl, PropertyMeta, PropertySchema, SchemaError,
};
pub use store::{ChangeResult, PropertyStore, Props};
pub use value::{coerce, from_attribute, to_attribute, PropValue, RawValue, ValueType};
