//! Nearest-named-color matching
//!
//! Maps an arbitrary hex color to the closest entry of a fixed table of
//! Papirus folder color families, used to pick a matching icon-theme
//! folder color for the generated accent.

use crate::theme::Rgb;

/// Papirus folder color families and their reference values. Order matters:
/// on an exact distance tie the earlier entry wins.
pub const NAMED_COLORS: [(&str, &str); 13] = [
    ("black", "#4f4f4f"),
    ("blue", "#5294e2"),
    ("brown", "#ae8e6c"),
    ("cyan", "#57bdc6"),
    ("green", "#87b158"),
    ("grey", "#8e8e8e"),
    ("magenta", "#ca71df"),
    ("orange", "#ee923a"),
    ("pink", "#f2799d"),
    ("red", "#e25252"),
    ("violet", "#7c6fdb"),
    ("white", "#e4e4e4"),
    ("yellow", "#f9bd30"),
];

fn distance_sq(a: Rgb, b: Rgb) -> u32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Name of the table entry closest to `hex` by Euclidean RGB distance.
/// Unparseable input matches as black (#000000). Squared distance gives the
/// same argmin as the true distance.
pub fn nearest_named(hex: &str) -> &'static str {
    nearest_in(hex, &NAMED_COLORS)
}

/// Same lookup against an arbitrary table; first minimal entry wins.
pub fn nearest_in(hex: &str, table: &[(&'static str, &str)]) -> &'static str {
    let target = Rgb::parse_hex_or_black(hex);
    let mut best_name = "black";
    let mut best = u32::MAX;
    for (name, reference) in table {
        let d = distance_sq(target, Rgb::parse_hex_or_black(reference));
        if d < best {
            best = d;
            best_name = name;
        }
    }
    best_name
}
