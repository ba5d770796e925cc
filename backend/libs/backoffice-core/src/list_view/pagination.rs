// Page arithmetic shared by every list screen
use std::ops::Range;

/// Number of page links shown around the current page.
pub const MAX_VISIBLE_PAGES: usize = 5;

/// `ceil(item_count / page_size)`; an empty list has zero pages, not one.
pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    item_count.div_ceil(page_size)
}

/// Index range of `page` (1-based) within a list of `len` items.
pub fn page_bounds(page: usize, page_size: usize, len: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Up to [`MAX_VISIBLE_PAGES`] page numbers centred on `current`.
///
/// Near either end the window slides toward the valid range instead of
/// shrinking, so it always holds `min(MAX_VISIBLE_PAGES, total)` numbers.
pub fn page_window(current: usize, total: usize) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }

    let mut start = current.saturating_sub(MAX_VISIBLE_PAGES / 2).max(1);
    let end = (start + MAX_VISIBLE_PAGES - 1).min(total);

    if end + 1 - start < MAX_VISIBLE_PAGES {
        start = (end + 1).saturating_sub(MAX_VISIBLE_PAGES).max(1);
    }

    (start..=end).collect()
}
