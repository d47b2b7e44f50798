//! Sample widgets built on the runtime: Button, Card.

pub mod button;
pub mod card;

pub use button::{Button, ButtonClick, CLICK_EVENT};
pub use card::{Card, ITEM_COUNT_ATTRIBUTE};

use crate::component::{ComponentRegistry, RegistryError};

/// Define every sample widget on `registry`.
pub fn define_all(registry: &ComponentRegistry) -> Result<(), RegistryError> {
    registry.define::<Button>()?;
    registry.define::<Card>()?;
    Ok(())
}
