//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! text normalization so every entry point trims and defaults the same way.

/// Trim an optional text field, collapsing blank values to `None`.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Case-insensitive comparison key used by filters.
pub(crate) fn normalize_match_key(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_collapses_to_none() {
        assert_eq!(normalize_optional_text(None), None);
        assert_eq!(normalize_optional_text(Some("   ")), None);
        assert_eq!(
            normalize_optional_text(Some("  Pix ")),
            Some("Pix".to_string())
        );
    }

    #[test]
    fn match_key_ignores_case_and_padding() {
        assert_eq!(normalize_match_key("  Compras "), "compras");
        assert_eq!(normalize_match_key("SALÁRIO"), "salário");
    }
}
