//! Elevation keys `1`–`5` mapped to static pairs of box-shadow descriptors.

/// Shadow pairs, indexed by elevation key minus one.
pub const ELEVATIONS: [[&str; 2]; 5] = [
    ["0 1px 2px 0 rgb(0 0 0 / 0.05)", "0 1px 1px 0 rgb(0 0 0 / 0.03)"],
    ["0 1px 3px 0 rgb(0 0 0 / 0.1)", "0 1px 2px -1px rgb(0 0 0 / 0.1)"],
    ["0 4px 6px -1px rgb(0 0 0 / 0.1)", "0 2px 4px -2px rgb(0 0 0 / 0.1)"],
    ["0 10px 15px -3px rgb(0 0 0 / 0.1)", "0 4px 6px -4px rgb(0 0 0 / 0.1)"],
    ["0 20px 25px -5px rgb(0 0 0 / 0.1)", "0 8px 10px -6px rgb(0 0 0 / 0.1)"],
];

/// The shadow pair for an elevation key, if the key is known.
pub fn shadows(key: &str) -> Option<[&'static str; 2]> {
    let level: usize = key.trim().parse().ok()?;
    ELEVATIONS.get(level.checked_sub(1)?).copied()
}

/// Resolve an elevation token to a `box-shadow` value.
///
/// Unknown keys pass through unchanged; empty input yields `None`.
pub fn resolve_elevation(token: &str) -> Option<String> {
    if token.trim().is_empty() {
        return None;
    }
    Some(match shadows(token) {
        Some(pair) => pair.join(", "),
        None => token.to_owned(),
    })
}
