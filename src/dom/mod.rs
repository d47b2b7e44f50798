//! Document arena: slotmap-backed element tree with attribute routing and queries.

pub mod node;
pub mod query;
pub mod tree;

pub use node::{Attributes, Element, ElementId};
pub use tree::{ChildrenChanged, Document, DomError};
