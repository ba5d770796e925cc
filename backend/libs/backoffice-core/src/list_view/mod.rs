//! Generic list view controller
//!
//! Every back-office list screen runs the same pipeline over an in-memory
//! collection: free-text search, categorical filters, an optional sort, then
//! pagination. [`ListView`] owns that state and recomputes it synchronously
//! whenever an input changes.

mod pagination;

use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseEnumError;

pub use pagination::{page_bounds, page_window, total_pages, MAX_VISIBLE_PAGES};

/// Page size used by every screen until the operator picks another.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// An entity that can be shown in a [`ListView`].
///
/// Implementors choose which fields the free-text search looks at, which
/// categorical filters exist and how each sort key orders two items.
pub trait Listable {
    /// Categorical filter. Filters are told apart by enum variant: setting a
    /// filter replaces any active filter of the same variant.
    type Filter: Clone + fmt::Debug;
    type SortKey: Copy + Eq + fmt::Debug;

    /// Fields matched case-insensitively against the search term.
    fn search_fields(&self) -> Vec<&str>;

    fn matches_filter(&self, filter: &Self::Filter) -> bool;

    /// Ascending comparison under `key`.
    fn compare_by(&self, other: &Self, key: Self::SortKey) -> Ordering;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(ParseEnumError::new("sort direction", s)),
        }
    }
}

/// One rendered page plus the derived pagination state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub filtered_count: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub page_numbers: Vec<usize>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            filtered_count: self.filtered_count,
            total_pages: self.total_pages,
            current_page: self.current_page,
            page_size: self.page_size,
            page_numbers: self.page_numbers,
        }
    }
}

/// Search / filter / sort / paginate state for one list.
///
/// `current_page` stays within `[1, total_pages]` whenever there is at least
/// one page; with no matching items it is 1 and `total_pages` is 0.
pub struct ListView<T: Listable> {
    source: Vec<T>,
    search_term: String,
    filters: Vec<T::Filter>,
    sort: Option<(T::SortKey, SortDirection)>,
    // indices into `source`, filtered and sorted
    visible: Vec<usize>,
    current_page: usize,
    page_size: usize,
}

impl<T: Listable> ListView<T> {
    pub fn new(source: Vec<T>) -> Self {
        let mut view = Self {
            source,
            search_term: String::new(),
            filters: Vec::new(),
            sort: None,
            visible: Vec::new(),
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        };
        view.apply_filters();
        view
    }

    /// Starts the view sorted by `key` without going through the toggle rules.
    pub fn with_sort(mut self, key: T::SortKey, direction: SortDirection) -> Self {
        self.sort_by(key, direction);
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.set_page_size(page_size);
        self
    }

    /// Replaces the underlying collection, keeping search, filters and sort.
    pub fn set_source(&mut self, source: Vec<T>) {
        self.source = source;
        self.apply_filters();
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.apply_filters();
    }

    pub fn set_filter(&mut self, filter: T::Filter) {
        let slot = self
            .filters
            .iter_mut()
            .find(|active| mem::discriminant(*active) == mem::discriminant(&filter));

        match slot {
            Some(active) => *active = filter,
            None => self.filters.push(filter),
        }
        self.apply_filters();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.apply_filters();
    }

    /// Same key toggles the direction; a new key starts descending.
    pub fn set_sort(&mut self, key: T::SortKey) {
        let direction = match self.sort {
            Some((active, direction)) if active == key => direction.toggled(),
            _ => SortDirection::Desc,
        };
        self.sort_by(key, direction);
    }

    pub fn sort_by(&mut self, key: T::SortKey, direction: SortDirection) {
        self.sort = Some((key, direction));
        self.apply_filters();
    }

    /// Re-slices without re-filtering and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    /// Moves to `page` if it exists; out-of-range requests leave the view
    /// untouched and return `false`.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        match self.current_page.checked_sub(1) {
            Some(page) => self.go_to_page(page),
            None => false,
        }
    }

    pub fn source_count(&self) -> usize {
        self.source.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.visible.len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.visible.len(), self.page_size)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sort(&self) -> Option<(T::SortKey, SortDirection)> {
        self.sort
    }

    /// Every item that passed search and filters, in display order.
    pub fn filtered_items(&self) -> impl Iterator<Item = &T> + '_ {
        self.visible.iter().map(move |&index| &self.source[index])
    }

    pub fn current_page_items(&self) -> Vec<&T> {
        let bounds = page_bounds(self.current_page, self.page_size, self.visible.len());
        self.visible[bounds]
            .iter()
            .map(|&index| &self.source[index])
            .collect()
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        page_window(self.current_page, self.total_pages())
    }

    pub fn page(&self) -> Page<&T> {
        Page {
            items: self.current_page_items(),
            filtered_count: self.filtered_count(),
            total_pages: self.total_pages(),
            current_page: self.current_page,
            page_size: self.page_size,
            page_numbers: self.page_numbers(),
        }
    }

    fn apply_filters(&mut self) {
        let term = self.search_term.to_lowercase();

        let mut visible: Vec<usize> = self
            .source
            .iter()
            .enumerate()
            .filter(|(_, item)| term.is_empty() || matches_term(*item, &term))
            .filter(|(_, item)| self.filters.iter().all(|filter| item.matches_filter(filter)))
            .map(|(index, _)| index)
            .collect();

        if let Some((key, direction)) = self.sort {
            let source = &self.source;
            // stable: equal keys keep their source order
            visible.sort_by(|&a, &b| direction.apply(source[a].compare_by(&source[b], key)));
        }

        self.visible = visible;
        self.current_page = 1;
    }
}

fn matches_term<T: Listable>(item: &T, term: &str) -> bool {
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(term))
}
