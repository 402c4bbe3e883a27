// region:    --- Imports
use std::collections::HashMap;
use std::sync::OnceLock;

// endregion: --- Imports

// region:    --- Categories

/// Fixed category set: short code stored on the listing, label shown to users.
pub const CATEGORIES: &[(&str, &str)] = &[
    ("FAS", "Fashion"),
    ("TOY", "Toys"),
    ("ELE", "Electronics"),
    ("HOM", "Home"),
    ("OTH", "Other"),
];

/// Label shown when a listing carries no category or an unknown code.
pub const UNCATEGORIZED: &str = "N/A";

fn label_map() -> &'static HashMap<&'static str, &'static str> {
    static LABELS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    LABELS.get_or_init(|| CATEGORIES.iter().copied().collect())
}

/// Display label for a category code, `UNCATEGORIZED` for unknown codes.
pub fn label(code: &str) -> &'static str {
    label_map().get(code).copied().unwrap_or(UNCATEGORIZED)
}

/// Whether a code belongs to the fixed category set.
pub fn is_valid(code: &str) -> bool {
    label_map().contains_key(code)
}

// endregion: --- Categories
