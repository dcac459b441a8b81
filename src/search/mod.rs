//! Generic search and pagination engine.
//!
//! One [`SearchService`] serves every table: callers hand it a composed
//! [`Predicate`], a [`QuerySource`] for one entity type and a formatter
//! callback, and get back a clamped [`PageResult`]. The predicate type is
//! owned by the query source, so storage backends choose their own
//! representation without the service knowing about it.

pub mod dispatch;
pub mod error;
pub mod params;
pub mod predicate;
pub mod service;

pub use error::{QueryFailure, ViewError};
pub use params::SearchParams;
pub use predicate::{combine, non_blank, Predicate};
pub use service::{total_pages, PageResult, SearchService};

/// Entity with a stable identifier, used as storage key and as the last
/// segment of view URLs.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// One page of a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u32,
}

impl PageWindow {
    /// Window for a 1-based page number
    pub fn for_page(page: u64, page_size: u32) -> Self {
        Self {
            offset: page.saturating_sub(1).saturating_mul(u64::from(page_size)),
            limit: page_size,
        }
    }
}

/// Entities in one window plus the total number of matches
#[derive(Debug, Clone, PartialEq)]
pub struct Page<E> {
    pub items: Vec<E>,
    pub total: u64,
}

/// Storage capability: evaluate a predicate over one entity type for a
/// page window.
pub trait QuerySource {
    type Entity;
    type Predicate: Predicate;

    fn find_page(
        &self,
        predicate: &Self::Predicate,
        window: PageWindow,
    ) -> Result<Page<Self::Entity>, QueryFailure>;
}
