//! `TokenResolver`: the entry point widgets call with raw token strings.
//!
//! Every resolver here is total. Misses either pass the input through unchanged
//! or return a safe default; nothing errors or panics, because these calls sit
//! on the styling path of every render.

use std::cell::RefCell;
use std::fmt;

use tracing::{debug, trace};

use super::cache::ColorCache;
use super::color::{parse_color, Contrast, Rgb};
use super::palette::PaletteRef;
use super::{elevation, size};
use crate::config::RuntimeConfig;

// ---------------------------------------------------------------------------
// ColorProbe
// ---------------------------------------------------------------------------

/// The rendering environment used to turn an arbitrary color token into RGB.
///
/// `probe` receives the normalized (trimmed, lower-cased) token. Returning
/// `None` means "unresolved"; it is cached like any other result.
pub trait ColorProbe {
    fn probe(&self, token: &str) -> Option<Rgb>;
}

/// Resolves palette tokens, their `var(--prefix-…)` references, and plain CSS colors
/// against the built-in theme tables.
#[derive(Debug, Clone)]
pub struct ThemeProbe {
    var_prefix: String,
}

impl ThemeProbe {
    /// A probe that recognizes `var(--{var_prefix}-…)` palette references.
    pub fn new(var_prefix: impl Into<String>) -> Self {
        Self {
            var_prefix: var_prefix.into(),
        }
    }

    fn palette_from_var(&self, token: &str) -> Option<PaletteRef> {
        let inner = token.strip_prefix("var(")?.strip_suffix(')')?.trim();
        let name = inner.strip_prefix("--")?.strip_prefix(self.var_prefix.as_str())?;
        PaletteRef::parse(name.strip_prefix('-')?)
    }
}

impl Default for ThemeProbe {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_COLOR_VAR_PREFIX)
    }
}

impl ColorProbe for ThemeProbe {
    fn probe(&self, token: &str) -> Option<Rgb> {
        if let Some(palette) = PaletteRef::parse(token).or_else(|| self.palette_from_var(token)) {
            return Some(palette.rgb());
        }
        parse_color(token)
    }
}

/// A probe for contexts with no rendering surface: nothing resolves.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessProbe;

impl ColorProbe for HeadlessProbe {
    fn probe(&self, _token: &str) -> Option<Rgb> {
        None
    }
}

// ---------------------------------------------------------------------------
// TokenResolver
// ---------------------------------------------------------------------------

/// Resolves design tokens to concrete style values.
///
/// Owns the only mutable state in the token engine: the bounded color cache
/// behind [`resolve_rgb`](Self::resolve_rgb). Single-threaded by construction
/// (`RefCell`), shared between component instances through `Rc`.
pub struct TokenResolver {
    var_prefix: String,
    probe: Box<dyn ColorProbe>,
    cache: RefCell<ColorCache>,
}

impl TokenResolver {
    /// A resolver with default configuration and the built-in [`ThemeProbe`].
    pub fn new() -> Self {
        Self::with_config(&RuntimeConfig::default())
    }

    /// A resolver using the palette prefix and cache size from `config`.
    pub fn with_config(config: &RuntimeConfig) -> Self {
        Self {
            var_prefix: config.color_var_prefix.clone(),
            probe: Box::new(ThemeProbe::new(config.color_var_prefix.clone())),
            cache: RefCell::new(ColorCache::new(config.color_cache_capacity)),
        }
    }

    /// Replace the color probe (builder). Clears the cache.
    pub fn with_probe(mut self, probe: impl ColorProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self.cache.get_mut().clear();
        self
    }

    /// `"large"` → `"1.125em"`; anything else unchanged; empty → `None`.
    pub fn resolve_size(&self, token: &str) -> Option<String> {
        size::resolve_size(token)
    }

    /// `"indigo-500"` → `"var(--color-indigo-500)"`; anything else unchanged; empty → `None`.
    pub fn resolve_color(&self, token: &str) -> Option<String> {
        if token.trim().is_empty() {
            return None;
        }
        Some(match PaletteRef::parse(token) {
            Some(palette) => palette.var_ref(&self.var_prefix),
            None => token.to_owned(),
        })
    }

    /// One shade darker than a palette token.
    ///
    /// `None` for non-palette input and for tokens already at the darkest shade.
    pub fn resolve_color_hover(&self, token: &str) -> Option<String> {
        let next = PaletteRef::parse(token)?.next_darker()?;
        Some(next.var_ref(&self.var_prefix))
    }

    /// Move `steps` toward the light end, clamping at the lightest shade.
    pub fn resolve_color_lighter(&self, token: &str, steps: usize) -> Option<String> {
        let palette = PaletteRef::parse(token)?.lighter(steps);
        Some(palette.var_ref(&self.var_prefix))
    }

    /// Move `steps` toward the dark end, clamping at the darkest shade.
    pub fn resolve_color_darker(&self, token: &str, steps: usize) -> Option<String> {
        let palette = PaletteRef::parse(token)?.darker(steps);
        Some(palette.var_ref(&self.var_prefix))
    }

    /// `"1"`–`"5"` → a pair of shadows; anything else unchanged; empty → `None`.
    pub fn resolve_elevation(&self, token: &str) -> Option<String> {
        elevation::resolve_elevation(token)
    }

    /// Resolve any color token to RGB through the probe, caching the result.
    ///
    /// The cache key is the trimmed, lower-cased token. Misses are cached too.
    pub fn resolve_rgb(&self, token: &str) -> Option<Rgb> {
        let key = token.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        if let Some(cached) = self.cache.borrow().get(&key) {
            trace!(key = %key, hit = cached.is_some(), "color cache hit");
            return cached;
        }

        let resolved = self.probe.probe(&key);
        if let Some(evicted) = self.cache.borrow_mut().insert(key.clone(), resolved) {
            debug!(evicted = %evicted, inserted = %key, "color cache full, evicted oldest entry");
        }
        resolved
    }

    /// Black or white, whichever contrasts more with the background. Black when
    /// the background cannot be resolved.
    pub fn contrast_color_for(&self, background: &str) -> Contrast {
        self.resolve_rgb(background)
            .map(Contrast::for_background)
            .unwrap_or(Contrast::Black)
    }

    /// Number of entries currently in the color cache.
    pub fn cached_colors(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Whether `key` (already normalized) is present in the color cache.
    pub fn is_cached(&self, key: &str) -> bool {
        self.cache.borrow().contains(key)
    }

    /// Maximum number of cached color lookups.
    pub fn cache_capacity(&self) -> usize {
        self.cache.borrow().capacity()
    }
}

impl Default for TokenResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TokenResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.cache.borrow();
        f.debug_struct("TokenResolver")
            .field("var_prefix", &self.var_prefix)
            .field("cached_colors", &cache.len())
            .field("cache_capacity", &cache.capacity())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
