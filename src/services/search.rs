use crate::{catalog::Catalog, models::ProductView};

/// Shown when a substring search matches nothing
pub const NO_RESULTS_MESSAGE: &str = "No results found.";

/// Case-insensitive substring match on product names.
///
/// Returns at most `limit` matches in catalog order. An empty query matches every row.
pub fn filter_by_substring(catalog: &Catalog, query: &str, limit: usize) -> Vec<ProductView> {
    let needle = query.to_lowercase();
    catalog
        .products()
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .take(limit)
        .map(ProductView::from)
        .collect()
}

/// Interprets a client-supplied limit. Missing, unparseable or non-positive values become 0.
pub fn parse_limit(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}
