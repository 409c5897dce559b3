// crates/flagtable-core/src/text.rs

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Wyspy Świętego Tomasza` -> `Wyspy Swietego Tomasza`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use flagtable_core::text::fold_key;
///
/// assert_eq!(fold_key("Łotwa"), "lotwa");
/// assert_eq!(fold_key("Côte d'Ivoire"), "cote d'ivoire");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Article slug for a display name: every space becomes an underscore.
///
/// No other escaping is applied; the name is used verbatim otherwise.
pub fn article_slug(name: &str) -> String {
    name.replace(' ', "_")
}
