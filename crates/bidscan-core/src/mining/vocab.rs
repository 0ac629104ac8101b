//! Fixed vocabularies used by the miner.
//!
//! Extending either list changes what is mined, not how.

/// Units of measure recognised after a number, in match priority order.
///
/// Longer spellings come before their prefixes ("inch" before "in", "mm"
/// before "m"). A space inside a unit matches any amount of whitespace,
/// including none.
pub const UNITS: &[&str] = &["sq ft", "ft", "inch", "in", "mm", "cm", "m", "yards", "yd"];

/// Construction material keywords, matched as whole words.
pub const MATERIALS: &[&str] = &[
    "concrete",
    "steel",
    "wood",
    "timber",
    "drywall",
    "gypsum",
    "insulation",
    "paint",
    "flooring",
    "tile",
    "brick",
    "glass",
    "aluminum",
    "copper",
    "pvc",
    "vinyl",
];
