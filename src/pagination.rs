//! Links between pages of a listing.

use crate::storage::types::Page;

/// `path?[term=..&]page=n` with the values form-encoded.
pub fn page_url(path: &str, term: Option<&str>, page: usize) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    if let Some(term) = term {
        query.append_pair("term", term);
    }
    query.append_pair("page", &page.to_string());
    format!("{}?{}", path, query.finish())
}

/// Next/previous links for a listing of `total` rows shown `per_page` at a time.
pub fn neighbours(
    path: &str,
    term: Option<&str>,
    page: usize,
    per_page: usize,
    total: usize,
) -> (Option<String>, Option<String>) {
    let next_url =
        (total > page.saturating_mul(per_page)).then(|| page_url(path, term, page + 1));
    let prev_url = (page > 1).then(|| page_url(path, term, page - 1));
    (next_url, prev_url)
}

pub fn page_neighbours<T>(path: &str, page: &Page<T>) -> (Option<String>, Option<String>) {
    neighbours(path, None, page.page, page.per_page, page.total)
}
