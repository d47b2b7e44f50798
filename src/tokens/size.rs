//! Named sizes: `small`, `large`, … mapped to em multipliers.

use std::fmt;

/// The named-size table, smallest first.
pub const NAMED_SIZES: [(&str, f64); 9] = [
    ("2x-small", 0.625),
    ("x-small", 0.75),
    ("small", 0.875),
    ("medium", 1.0),
    ("large", 1.125),
    ("x-large", 1.25),
    ("2x-large", 1.5),
    ("3x-large", 1.875),
    ("4x-large", 2.25),
];

/// A length in `em` units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Em(pub f64);

impl Em {
    /// Look up a named size. Case-sensitive.
    pub fn named(name: &str) -> Option<Self> {
        NAMED_SIZES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, multiplier)| Em(multiplier))
    }
}

impl fmt::Display for Em {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{}em", self.0 as i64)
        } else {
            write!(f, "{}em", self.0)
        }
    }
}

/// Resolve a size token.
///
/// Known names become `"{multiplier}em"`; anything else is treated as a literal
/// length and returned unchanged. Empty or blank input yields `None`.
pub fn resolve_size(token: &str) -> Option<String> {
    if token.trim().is_empty() {
        return None;
    }
    Some(match Em::named(token) {
        Some(em) => em.to_string(),
        None => token.to_owned(),
    })
}
