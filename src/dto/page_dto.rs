use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paged<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Slices an already filtered and sorted list. `page` is 1-based; both `page` and
/// `page_size` are clamped to at least 1 and echoed back in the meta.
pub fn paginate<T>(
    items: Vec<T>,
    page: Option<i64>,
    page_size: Option<i64>,
    default_page_size: i64,
) -> Paged<T> {
    let page = page.unwrap_or(1).max(1);
    let page_size = page_size.unwrap_or(default_page_size).max(1);
    let total = items.len() as i64;

    let start = usize::try_from((page - 1).saturating_mul(page_size)).unwrap_or(usize::MAX);
    let take = usize::try_from(page_size).unwrap_or(usize::MAX);
    let data = items.into_iter().skip(start).take(take).collect();

    Paged {
        data,
        meta: PageMeta {
            page,
            page_size,
            total,
        },
    }
}
