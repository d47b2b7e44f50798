//! Component registry: tag → type metadata, schema and stylesheet memoization.

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use super::instance::ComponentInstance;
use super::traits::Component;
use crate::config::RuntimeConfig;
use crate::reactive::{PropertySchema, SchemaError};
use crate::tokens::TokenResolver;

/// Errors from defining a component type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Tags must be lowercase ASCII, start with a letter, and contain a `-`.
    #[error("invalid custom element tag `{0}`")]
    InvalidTag(String),
    /// The tag is already bound to a type.
    #[error("custom element `{0}` is already defined")]
    AlreadyDefined(String),
    /// The type's property declarations are inconsistent.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

type Factory = Box<dyn Fn() -> Box<dyn Component>>;

// ---------------------------------------------------------------------------
// ComponentMeta
// ---------------------------------------------------------------------------

/// Everything the runtime knows about one component type.
pub struct ComponentMeta {
    tag: &'static str,
    schema: Rc<PropertySchema>,
    styles: fn() -> String,
    stylesheet: OnceCell<Rc<str>>,
    factory: Factory,
}

impl ComponentMeta {
    /// The registered tag.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// The memoized property schema.
    pub fn schema(&self) -> &Rc<PropertySchema> {
        &self.schema
    }

    /// Attribute names whose mutations sync into properties.
    pub fn observed_attributes(&self) -> &[String] {
        self.schema.attribute_index().observed_attributes()
    }

    /// The type's stylesheet, computed on first request and shared afterwards.
    pub fn stylesheet(&self) -> Rc<str> {
        self.stylesheet
            .get_or_init(|| {
                let css: Rc<str> = (self.styles)().into();
                debug!(tag = self.tag, bytes = css.len(), "stylesheet memoized");
                css
            })
            .clone()
    }

    /// Whether [`stylesheet`](Self::stylesheet) has run.
    pub fn has_stylesheet(&self) -> bool {
        self.stylesheet.get().is_some()
    }

    pub(crate) fn construct(&self) -> Box<dyn Component> {
        (self.factory)()
    }
}

impl fmt::Debug for ComponentMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentMeta")
            .field("tag", &self.tag)
            .field("properties", &self.schema.len())
            .field("stylesheet_memoized", &self.has_stylesheet())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ComponentRegistry
// ---------------------------------------------------------------------------

/// Tag-keyed component definitions plus the shared runtime context.
pub struct ComponentRegistry {
    config: RuntimeConfig,
    resolver: Rc<TokenResolver>,
    types: RefCell<HashMap<&'static str, Rc<ComponentMeta>>>,
}

impl ComponentRegistry {
    /// A registry with default configuration.
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// A registry with its own token resolver built from `config`.
    pub fn with_config(config: RuntimeConfig) -> Self {
        let resolver = Rc::new(TokenResolver::with_config(&config));
        Self::with_resolver(config, resolver)
    }

    /// Share an existing resolver (and its color cache).
    pub fn with_resolver(config: RuntimeConfig, resolver: Rc<TokenResolver>) -> Self {
        Self {
            config,
            resolver,
            types: RefCell::new(HashMap::new()),
        }
    }

    /// Runtime configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The token resolver shared by every instance.
    pub fn resolver(&self) -> &Rc<TokenResolver> {
        &self.resolver
    }

    /// Define `C` under `C::tag()`, constructing instances with `C::default()`.
    pub fn define<C: Component + Default>(&self) -> Result<(), RegistryError> {
        self.define_with(C::default)
    }

    /// Define `C` under `C::tag()` with a custom constructor.
    pub fn define_with<C, F>(&self, factory: F) -> Result<(), RegistryError>
    where
        C: Component,
        F: Fn() -> C + 'static,
    {
        let tag = C::tag();
        validate_tag(tag)?;
        if self.types.borrow().contains_key(tag) {
            return Err(RegistryError::AlreadyDefined(tag.to_owned()));
        }

        let schema = PropertySchema::new(C::properties())?;
        debug!(tag, properties = schema.len(), "schema memoized");

        let meta = ComponentMeta {
            tag,
            schema: Rc::new(schema),
            styles: C::styles,
            stylesheet: OnceCell::new(),
            factory: Box::new(move || Box::new(factory()) as Box<dyn Component>),
        };
        self.types.borrow_mut().insert(tag, Rc::new(meta));
        Ok(())
    }

    /// Whether `tag` has been defined.
    pub fn is_defined(&self, tag: &str) -> bool {
        self.types.borrow().contains_key(tag)
    }

    /// Metadata for `tag`.
    pub fn get(&self, tag: &str) -> Option<Rc<ComponentMeta>> {
        self.types.borrow().get(tag).cloned()
    }

    /// Defined tags, sorted.
    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<_> = self.types.borrow().keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    /// Construct an instance of the type defined under `tag`.
    ///
    /// Every property is seeded with its default; nothing renders yet.
    pub fn create(&self, tag: &str) -> Option<ComponentInstance> {
        let meta = self.get(tag)?;
        Some(ComponentInstance::new(
            meta,
            Rc::clone(&self.resolver),
            Rc::from(self.config.dynamic_style_id.as_str()),
        ))
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("config", &self.config)
            .field("tags", &self.tags())
            .finish_non_exhaustive()
    }
}

fn validate_tag(tag: &str) -> Result<(), RegistryError> {
    let starts_with_letter = tag.chars().next().is_some_and(|c| c.is_ascii_lowercase());
    let allowed = tag
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_'));
    if starts_with_letter && allowed && tag.contains('-') {
        Ok(())
    } else {
        Err(RegistryError::InvalidTag(tag.to_owned()))
    }
}
