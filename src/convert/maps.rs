//! Fixed dialect vocabulary tables
//!
//! These mappings are wire-format contracts with the two renderers; the
//! entries must match what each renderer actually parses. Anything absent
//! from a table passes through unchanged.

pub const INTEGRATOR_MAP: &[(&str, &str)] = &[
    ("path_mis", "path"),
    ("path_mats", "path"),
    ("direct_mis", "direct"),
    ("direct_mats", "direct"),
    ("direct_ems", "direct"),
];

pub const TAG_MAP: &[(&str, &str)] = &[
    ("mesh", "shape"),
    ("color", "rgb"),
];

// Value substitution is keyed on the attribute name alone, not on the
// element it appears in. A `type="mirror"` maps to conductor wherever it
// occurs. Context-aware translation is a known open question.
const TYPE_VALUE_MAP: &[(&str, &str)] = &[
    // BSDFs
    ("disney", "principled"),
    ("transparent", "null"),
    ("blended", "blendbsdf"),
    ("mirror", "conductor"),
    // Textures
    ("image_color", "bitmap"),
    ("image_float", "bitmap"),
];

const NAME_VALUE_MAP: &[(&str, &str)] = &[
    // Diffuse BRDF
    ("albedo", "reflectance"),
    // Disney BRDF
    ("specularTint", "spec_tint"),
    ("sheenTint", "sheen_tint"),
    ("clearcoatGloss", "clearcoat_gloss"),
    ("subsurface", "flatness"),
    // Texture modes
    ("interpolation", "filter_type"),
    ("extension", "wrap_mode"),
    // Emitters
    ("power", "intensity"),
];

/// Translate through a table, passing unknown words through unchanged.
pub fn lookup<'a>(word: &'a str, table: &'static [(&'static str, &'static str)]) -> &'a str {
    table
        .iter()
        .find(|(from, _)| *from == word)
        .map(|(_, to)| *to)
        .unwrap_or(word)
}

/// The value table scoped to an attribute key, if that key is mapped.
pub fn value_table(attribute: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match attribute {
        "type" => Some(TYPE_VALUE_MAP),
        "name" => Some(NAME_VALUE_MAP),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_passes_unknown_words_through() {
        assert_eq!(lookup("path_mis", INTEGRATOR_MAP), "path");
        assert_eq!(lookup("custom_integrator", INTEGRATOR_MAP), "custom_integrator");
        assert_eq!(lookup("mesh", TAG_MAP), "shape");
        assert_eq!(lookup("transform", TAG_MAP), "transform");
    }

    #[test]
    fn test_value_tables_are_scoped_by_attribute() {
        assert_eq!(lookup("mirror", value_table("type").unwrap()), "conductor");
        assert_eq!(lookup("albedo", value_table("name").unwrap()), "reflectance");
        assert!(value_table("value").is_none());
    }
}
