//! Component runtime: the `Component` trait, registry, instances, shadow roots.

pub mod instance;
pub mod lifecycle;
pub mod registry;
pub mod shadow;
pub mod traits;

pub use instance::ComponentInstance;
pub use lifecycle::{Lifecycle, LifecycleState};
pub use registry::{ComponentMeta, ComponentRegistry, RegistryError};
pub use shadow::{MarkupElement, RenderOutput, ShadowNode, ShadowRoot, StyleNode};
pub use traits::{Component, UpdateContext};
