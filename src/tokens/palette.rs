//! Static color palette: 18 families × 11 shades, and shade-ladder navigation.
//!
//! A palette token has the form `<family>-<shade>`, e.g. `indigo-500`. Resolution
//! yields an indirect reference (`var(--color-indigo-500)`) so that themes which
//! restyle the palette are picked up by consumers; the literal values below are
//! only used when a concrete RGB triple is required.

use std::fmt;

use super::color::Rgb;
use super::lexer::{classify, TokenShape};

/// The fixed shade ladder, lightest first.
pub const SHADES: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// Index of the darkest shade on the ladder.
pub const MAX_SHADE_INDEX: usize = SHADES.len() - 1;

/// A color family in the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Gray,
    Red,
    Orange,
    Amber,
    Yellow,
    Lime,
    Green,
    Emerald,
    Teal,
    Cyan,
    Sky,
    Blue,
    Indigo,
    Violet,
    Purple,
    Fuchsia,
    Pink,
    Rose,
}

impl Family {
    /// Every family, in palette order.
    pub const ALL: [Family; 18] = [
        Family::Gray,
        Family::Red,
        Family::Orange,
        Family::Amber,
        Family::Yellow,
        Family::Lime,
        Family::Green,
        Family::Emerald,
        Family::Teal,
        Family::Cyan,
        Family::Sky,
        Family::Blue,
        Family::Indigo,
        Family::Violet,
        Family::Purple,
        Family::Fuchsia,
        Family::Pink,
        Family::Rose,
    ];

    /// The token name of this family.
    pub fn name(self) -> &'static str {
        match self {
            Family::Gray => "gray",
            Family::Red => "red",
            Family::Orange => "orange",
            Family::Amber => "amber",
            Family::Yellow => "yellow",
            Family::Lime => "lime",
            Family::Green => "green",
            Family::Emerald => "emerald",
            Family::Teal => "teal",
            Family::Cyan => "cyan",
            Family::Sky => "sky",
            Family::Blue => "blue",
            Family::Indigo => "indigo",
            Family::Violet => "violet",
            Family::Purple => "purple",
            Family::Fuchsia => "fuchsia",
            Family::Pink => "pink",
            Family::Rose => "rose",
        }
    }

    /// Look up a family by its token name. Case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    fn swatches(self) -> &'static [u32; 11] {
        match self {
            Family::Gray => &GRAY,
            Family::Red => &RED,
            Family::Orange => &ORANGE,
            Family::Amber => &AMBER,
            Family::Yellow => &YELLOW,
            Family::Lime => &LIME,
            Family::Green => &GREEN,
            Family::Emerald => &EMERALD,
            Family::Teal => &TEAL,
            Family::Cyan => &CYAN,
            Family::Sky => &SKY,
            Family::Blue => &BLUE,
            Family::Indigo => &INDIGO,
            Family::Violet => &VIOLET,
            Family::Purple => &PURPLE,
            Family::Fuchsia => &FUCHSIA,
            Family::Pink => &PINK,
            Family::Rose => &ROSE,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One cell of the palette table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteRef {
    family: Family,
    index: usize,
}

impl PaletteRef {
    /// Build a reference from a family and a shade value on the ladder.
    pub fn new(family: Family, shade: u16) -> Option<Self> {
        let index = SHADES.iter().position(|&s| s == shade)?;
        Some(Self { family, index })
    }

    /// Parse a `<family>-<shade>` token. Returns `None` for anything else.
    pub fn parse(token: &str) -> Option<Self> {
        if classify(token) != TokenShape::Palette {
            return None;
        }
        let (family, shade) = token.rsplit_once('-')?;
        Self::new(Family::from_name(family)?, shade.parse().ok()?)
    }

    /// The hue family.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Position on the shade ladder (0 = lightest).
    pub fn index(&self) -> usize {
        self.index
    }

    /// The shade step, such as `500`.
    pub fn shade(&self) -> u16 {
        SHADES[self.index]
    }

    /// Move `steps` toward the dark end, stopping at the darkest shade.
    pub fn darker(self, steps: usize) -> Self {
        Self {
            index: self.index.saturating_add(steps).min(MAX_SHADE_INDEX),
            ..self
        }
    }

    /// Move `steps` toward the light end, stopping at the lightest shade.
    pub fn lighter(self, steps: usize) -> Self {
        Self {
            index: self.index.saturating_sub(steps),
            ..self
        }
    }

    /// The next darker shade, or `None` when already at the darkest.
    pub fn next_darker(self) -> Option<Self> {
        (self.index < MAX_SHADE_INDEX).then(|| self.darker(1))
    }

    /// The literal swatch value from the static table.
    pub fn rgb(&self) -> Rgb {
        Rgb::from_u32(self.family.swatches()[self.index])
    }

    /// Custom property name, e.g. `--color-indigo-500` for prefix `color`.
    pub fn var_name(&self, prefix: &str) -> String {
        format!("--{prefix}-{self}")
    }

    /// Indirect reference, e.g. `var(--color-indigo-500)`.
    pub fn var_ref(&self, prefix: &str) -> String {
        format!("var({})", self.var_name(prefix))
    }
}

impl fmt::Display for PaletteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.family, self.shade())
    }
}

// ---------------------------------------------------------------------------
// Swatches
// ---------------------------------------------------------------------------

#[rustfmt::skip]
const GRAY: [u32; 11] = [0xf9fafb, 0xf3f4f6, 0xe5e7eb, 0xd1d5db, 0x9ca3af, 0x6b7280, 0x4b5563, 0x374151, 0x1f2937, 0x111827, 0x030712];
#[rustfmt::skip]
const RED: [u32; 11] = [0xfef2f2, 0xfee2e2, 0xfecaca, 0xfca5a5, 0xf87171, 0xef4444, 0xdc2626, 0xb91c1c, 0x991b1b, 0x7f1d1d, 0x450a0a];
#[rustfmt::skip]
const ORANGE: [u32; 11] = [0xfff7ed, 0xffedd5, 0xfed7aa, 0xfdba74, 0xfb923c, 0xf97316, 0xea580c, 0xc2410c, 0x9a3412, 0x7c2d12, 0x431407];
#[rustfmt::skip]
const AMBER: [u32; 11] = [0xfffbeb, 0xfef3c7, 0xfde68a, 0xfcd34d, 0xfbbf24, 0xf59e0b, 0xd97706, 0xb45309, 0x92400e, 0x78350f, 0x451a03];
#[rustfmt::skip]
const YELLOW: [u32; 11] = [0xfefce8, 0xfef9c3, 0xfef08a, 0xfde047, 0xfacc15, 0xeab308, 0xca8a04, 0xa16207, 0x854d0e, 0x713f12, 0x422006];
#[rustfmt::skip]
const LIME: [u32; 11] = [0xf7fee7, 0xecfccb, 0xd9f99d, 0xbef264, 0xa3e635, 0x84cc16, 0x65a30d, 0x4d7c0f, 0x3f6212, 0x365314, 0x1a2e05];
#[rustfmt::skip]
const GREEN: [u32; 11] = [0xf0fdf4, 0xdcfce7, 0xbbf7d0, 0x86efac, 0x4ade80, 0x22c55e, 0x16a34a, 0x15803d, 0x166534, 0x14532d, 0x052e16];
#[rustfmt::skip]
const EMERALD: [u32; 11] = [0xecfdf5, 0xd1fae5, 0xa7f3d0, 0x6ee7b7, 0x34d399, 0x10b981, 0x059669, 0x047857, 0x065f46, 0x064e3b, 0x022c22];
#[rustfmt::skip]
const TEAL: [u32; 11] = [0xf0fdfa, 0xccfbf1, 0x99f6e4, 0x5eead4, 0x2dd4bf, 0x14b8a6, 0x0d9488, 0x0f766e, 0x115e59, 0x134e4a, 0x042f2e];
#[rustfmt::skip]
const CYAN: [u32; 11] = [0xecfeff, 0xcffafe, 0xa5f3fc, 0x67e8f9, 0x22d3ee, 0x06b6d4, 0x0891b2, 0x0e7490, 0x155e75, 0x164e63, 0x083344];
#[rustfmt::skip]
const SKY: [u32; 11] = [0xf0f9ff, 0xe0f2fe, 0xbae6fd, 0x7dd3fc, 0x38bdf8, 0x0ea5e9, 0x0284c7, 0x0369a1, 0x075985, 0x0c4a6e, 0x082f49];
#[rustfmt::skip]
const BLUE: [u32; 11] = [0xeff6ff, 0xdbeafe, 0xbfdbfe, 0x93c5fd, 0x60a5fa, 0x3b82f6, 0x2563eb, 0x1d4ed8, 0x1e40af, 0x1e3a8a, 0x172554];
#[rustfmt::skip]
const INDIGO: [u32; 11] = [0xeef2ff, 0xe0e7ff, 0xc7d2fe, 0xa5b4fc, 0x818cf8, 0x6366f1, 0x4f46e5, 0x4338ca, 0x3730a3, 0x312e81, 0x1e1b4b];
#[rustfmt::skip]
const VIOLET: [u32; 11] = [0xf5f3ff, 0xede9fe, 0xddd6fe, 0xc4b5fd, 0xa78bfa, 0x8b5cf6, 0x7c3aed, 0x6d28d9, 0x5b21b6, 0x4c1d95, 0x2e1065];
#[rustfmt::skip]
const PURPLE: [u32; 11] = [0xfaf5ff, 0xf3e8ff, 0xe9d5ff, 0xd8b4fe, 0xc084fc, 0xa855f7, 0x9333ea, 0x7e22ce, 0x6b21a8, 0x581c87, 0x3b0764];
#[rustfmt::skip]
const FUCHSIA: [u32; 11] = [0xfdf4ff, 0xfae8ff, 0xf5d0fe, 0xf0abfc, 0xe879f9, 0xd946ef, 0xc026d3, 0xa21caf, 0x86198f, 0x701a75, 0x4a044e];
#[rustfmt::skip]
const PINK: [u32; 11] = [0xfdf2f8, 0xfce7f3, 0xfbcfe8, 0xf9a8d4, 0xf472b6, 0xec4899, 0xdb2777, 0xbe185d, 0x9d174d, 0x831843, 0x500724];
#[rustfmt::skip]
const ROSE: [u32; 11] = [0xfff1f2, 0xffe4e6, 0xfecdd3, 0xfda4af, 0xfb7185, 0xf43f5e, 0xe11d48, 0xbe123c, 0x9f1239, 0x881337, 0x4c0519];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_tokens() {
        let r = PaletteRef::parse("indigo-500").unwrap();
        assert_eq!(r.family(), Family::Indigo);
        assert_eq!(r.shade(), 500);
        assert_eq!(r.index(), 5);

        let r = PaletteRef::parse("gray-950").unwrap();
        assert_eq!(r.index(), MAX_SHADE_INDEX);
    }

    #[test]
    fn parse_rejects_unknown_family_or_shade() {
        assert!(PaletteRef::parse("mauve-500").is_none());
        assert!(PaletteRef::parse("indigo-550").is_none());
        assert!(PaletteRef::parse("indigo").is_none());
        assert!(PaletteRef::parse("Indigo-500").is_none());
        assert!(PaletteRef::parse("indigo-500 ").is_none());
        assert!(PaletteRef::parse("").is_none());
    }

    #[test]
    fn every_family_round_trips_its_name() {
        for family in Family::ALL {
            assert_eq!(Family::from_name(family.name()), Some(family));
        }
    }

    #[test]
    fn darker_and_lighter_clamp() {
        let top = PaletteRef::parse("gray-950").unwrap();
        assert_eq!(top.darker(1), top);
        assert_eq!(top.darker(usize::MAX), top);

        let bottom = PaletteRef::parse("gray-50").unwrap();
        assert_eq!(bottom.lighter(1), bottom);
        assert_eq!(bottom.lighter(100), bottom);

        let mid = PaletteRef::parse("teal-400").unwrap();
        assert_eq!(mid.darker(2).to_string(), "teal-600");
        assert_eq!(mid.lighter(3).to_string(), "teal-100");
        assert_eq!(mid.lighter(4).to_string(), "teal-50");
    }

    #[test]
    fn next_darker_stops_at_the_end() {
        let r = PaletteRef::parse("indigo-500").unwrap();
        assert_eq!(r.next_darker().unwrap().to_string(), "indigo-600");
        let end = PaletteRef::parse("indigo-950").unwrap();
        assert!(end.next_darker().is_none());
    }

    #[test]
    fn var_references() {
        let r = PaletteRef::parse("rose-300").unwrap();
        assert_eq!(r.var_name("color"), "--color-rose-300");
        assert_eq!(r.var_ref("wf"), "var(--wf-rose-300)");
    }

    #[test]
    fn swatch_lookup() {
        let r = PaletteRef::parse("gray-50").unwrap();
        assert_eq!(r.rgb(), Rgb::new(0xf9, 0xfa, 0xfb));
    }
}
