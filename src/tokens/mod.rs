//! Design-token engine: palette, named sizes, elevations, colors, resolver.
//!
//! - [`TokenResolver`]: the entry point widgets call with raw token strings.
//! - [`palette`]: the 18 × 11 palette table and shade-ladder navigation.
//! - [`cache`]: the bounded FIFO color cache behind [`TokenResolver::resolve_rgb`].

pub mod cache;
pub mod color;
pub mod elevation;
pub mod lexer;
pub mod palette;
pub mod resolver;
pub mod size;

pub use cache::ColorCache;
pub use color::{parse_color, Contrast, Rgb};
pub use elevation::resolve_elevation;
pub use palette::{Family, PaletteRef, SHADES};
pub use resolver::{ColorProbe, HeadlessProbe, ThemeProbe, TokenResolver};
pub use size::{resolve_size, Em};
