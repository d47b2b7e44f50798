//! Runtime configuration shared by the token resolver and the component registry.

/// Default number of entries kept by the color cache.
pub const DEFAULT_COLOR_CACHE_CAPACITY: usize = 64;

/// Default custom-property prefix for palette references (`var(--color-…)`).
pub const DEFAULT_COLOR_VAR_PREFIX: &str = "color";

/// Default id of the per-instance dynamic variable style block.
pub const DEFAULT_DYNAMIC_STYLE_ID: &str = "dynamic-vars";

// ---------------------------------------------------------------------------
// RuntimeConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`ComponentRegistry`](crate::component::ComponentRegistry)
/// and its [`TokenResolver`](crate::tokens::TokenResolver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Maximum entries in the color cache.
    pub color_cache_capacity: usize,
    /// Prefix for palette custom properties.
    pub color_var_prefix: String,
    /// Id of the style block written by dynamic variable injection.
    pub dynamic_style_id: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            color_cache_capacity: DEFAULT_COLOR_CACHE_CAPACITY,
            color_var_prefix: DEFAULT_COLOR_VAR_PREFIX.to_owned(),
            dynamic_style_id: DEFAULT_DYNAMIC_STYLE_ID.to_owned(),
        }
    }
}

impl RuntimeConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color cache capacity (builder).
    pub fn with_color_cache_capacity(mut self, capacity: usize) -> Self {
        self.color_cache_capacity = capacity;
        self
    }

    /// Set the palette custom-property prefix (builder).
    pub fn with_color_var_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.color_var_prefix = prefix.into();
        self
    }

    /// Set the dynamic style block id (builder).
    pub fn with_dynamic_style_id(mut self, id: impl Into<String>) -> Self {
        self.dynamic_style_id = id.into();
        self
    }
}
