// ── Free-text row filter ──

use crate::join::ViewRow;
use crate::model::Entity;

/// Case-insensitive substring match against any of `values`.
/// An empty query matches everything.
pub fn matches<'a>(query: &str, values: impl IntoIterator<Item = &'a str>) -> bool {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    values
        .into_iter()
        .any(|value| value.to_lowercase().contains(&needle))
}

/// Rows whose searchable values match `query`, in their original order.
pub fn apply<E: Entity>(rows: &[ViewRow<E>], query: &str) -> Vec<ViewRow<E>> {
    rows.iter()
        .filter(|row| matches(query, row.search_values()))
        .cloned()
        .collect()
}
