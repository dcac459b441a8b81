// Search/pagination service

use crate::config::SearchConfig;
use crate::search::{PageWindow, Predicate, QueryFailure, QuerySource};
use log::debug;
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_NAV_RADIUS: u32 = 4;

/// Number of pages needed for `total` results; never less than one.
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    total.div_ceil(u64::from(page_size)).max(1)
}

/// Rendering-ready page of formatted results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<S> {
    pub items: Vec<S>,
    /// Current page, always within `1..=total_pages`
    pub page: u64,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
    /// First page number of the navigation window
    pub nav_start: u64,
    /// Last page number of the navigation window
    pub nav_end: u64,
}

impl<S> PageResult<S> {
    /// Offset of the first item of this page within the full result set
    pub fn offset(&self) -> u64 {
        PageWindow::for_page(self.page, self.page_size).offset
    }

    pub fn nav_pages(&self) -> std::ops::RangeInclusive<u64> {
        self.nav_start..=self.nav_end
    }
}

/// Runs paginated searches for any entity type. Holds only configuration,
/// so one instance is shared by every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchService {
    page_size: u32,
    nav_radius: u32,
}

impl Default for SearchService {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_NAV_RADIUS)
    }
}

impl SearchService {
    /// Panics when `page_size` is zero.
    pub fn new(page_size: u32, nav_radius: u32) -> Self {
        assert!(page_size > 0, "page size must be positive");
        Self {
            page_size,
            nav_radius,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.page_size, config.nav_radius)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Run `predicate` against `source` and format the requested page.
    ///
    /// Page numbers below 1 become 1 and numbers past the last page become
    /// the last page; an out-of-range page is never an error.
    pub fn handle_search<Q, S, F>(
        &self,
        page: i64,
        predicate: Q::Predicate,
        source: &Q,
        formatter: F,
    ) -> Result<PageResult<S>, QueryFailure>
    where
        Q: QuerySource + ?Sized,
        F: Fn(&Q::Entity) -> S,
    {
        let requested = u64::try_from(page.max(1)).unwrap_or(1);
        let mut current = requested;
        let mut result = source.find_page(&predicate, PageWindow::for_page(current, self.page_size))?;

        let last = total_pages(result.total, self.page_size);
        if current > last {
            debug!("Page {} past last page {}, clamping", current, last);
            current = last;
            result = source.find_page(&predicate, PageWindow::for_page(current, self.page_size))?;
        }

        // The second query may see a different total if the data moved.
        let last = total_pages(result.total, self.page_size);
        let current = current.min(last);

        let items = result
            .items
            .iter()
            .take(self.page_size as usize)
            .map(formatter)
            .collect();

        Ok(self.assemble(items, current, result.total, last))
    }

    /// [`handle_search`](Self::handle_search) with the match-all predicate
    pub fn handle_get_all<Q, S, F>(
        &self,
        page: i64,
        source: &Q,
        formatter: F,
    ) -> Result<PageResult<S>, QueryFailure>
    where
        Q: QuerySource + ?Sized,
        F: Fn(&Q::Entity) -> S,
    {
        self.handle_search(page, Q::Predicate::match_all(), source, formatter)
    }

    fn assemble<S>(&self, items: Vec<S>, page: u64, total: u64, last: u64) -> PageResult<S> {
        let radius = u64::from(self.nav_radius);
        PageResult {
            items,
            page,
            page_size: self.page_size,
            total_count: total,
            total_pages: last,
            has_previous: page > 1,
            has_next: page < last,
            nav_start: page.saturating_sub(radius).max(1),
            nav_end: page.saturating_add(radius).min(last),
        }
    }
}
