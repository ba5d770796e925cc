// Query handling shared by every list endpoint
use std::str::FromStr;

use backoffice_core::{ListView, Listable, Page, ParseEnumError, SortDirection};
use serde::Deserialize;

use crate::config::ListConfig;
use crate::error::{AppError, Result};

/// `search`, `sort`, `order`, `page` and `page_size` query parameters.
///
/// Kept as strings so the struct can be flattened into each endpoint's own
/// query type; numbers are parsed here.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl ListQuery {
    /// Applies search, sort and pagination to `view` and returns the
    /// requested page. A page outside the result set falls back to the first.
    pub fn render<T>(&self, mut view: ListView<T>, config: &ListConfig) -> Result<Page<T>>
    where
        T: Listable + Clone,
        T::SortKey: FromStr<Err = ParseEnumError>,
    {
        if let Some(key) = parse_optional::<T::SortKey>(self.sort.as_deref())? {
            let direction = parse_optional::<SortDirection>(self.order.as_deref())?
                .unwrap_or(SortDirection::Desc);
            view.sort_by(key, direction);
        }
        if let Some(term) = self.search.as_deref() {
            view.set_search_term(term.trim());
        }

        let page_size = parse_number(self.page_size.as_deref(), "page_size")?;
        view.set_page_size(config.page_size(page_size));
        if let Some(page) = parse_number(self.page.as_deref(), "page")? {
            view.go_to_page(page);
        }

        Ok(view.page().map(Clone::clone))
    }
}

/// Parses an optional categorical filter. Empty and `all` mean no filter.
pub fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>>
where
    T: FromStr<Err = ParseEnumError>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => Ok(Some(v.parse()?)),
    }
}

fn parse_number(value: Option<&str>, name: &str) -> Result<Option<usize>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("{} must be a positive integer", name))),
    }
}
