// crates/geopick-core/src/text.rs
use crate::traits::NameMatch;

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Łódź` -> `Lodz`)
/// 2\) Normalize to lowercase
///
/// ```rust
/// use geopick_core::text::fold_key;
///
/// assert_eq!(fold_key("Łódź"), "lodz");
/// assert_eq!(fold_key("MÜNCHEN"), "munchen");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Equality after [`fold_key`] on both sides.
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// Keeps the items whose name contains `query`, ignoring case and accents.
///
/// A blank query keeps everything. Order is preserved.
pub fn filter_by_name<'a, T: NameMatch>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let q = fold_key(query.trim());
    if q.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| fold_key(item.name_str()).contains(&q))
        .collect()
}
