use serde::Deserialize;

use super::deserializers::parse_page;

pub const DEFAULT_PAGE: i64 = 1;

/// `?page=N`, 1-based. Anything that is not an integer falls back to page 1,
/// and only the first `page` counts when it is repeated.
#[derive(Debug, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct PageQuery {
    pub page: i64,
}

impl From<Vec<(String, String)>> for PageQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let page = pairs
            .iter()
            .find(|(key, _)| key == "page")
            .map_or(DEFAULT_PAGE, |(_, value)| parse_page(value));
        PageQuery { page }
    }
}

/// Slice `items` to the requested page. Pages past the end, and pages below 1,
/// are empty.
pub fn paginate<T>(items: &[T], page: i64, per_page: usize) -> &[T] {
    if page < 1 {
        return &[];
    }
    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(per_page))
        .unwrap_or(usize::MAX)
        .min(items.len());
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}
