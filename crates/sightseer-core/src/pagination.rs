//! Paging over a stored result list.
//!
//! A [`PaginationState`] always holds at least one attraction and a page index
//! inside `[0, total_pages - 1]`. Requests for pages outside that range are
//! clamped, never rejected.

use crate::config::PAGE_SIZE;
use crate::models::Attraction;

/// How a result list was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// Search by city name
    City,
    /// Search around a geolocation
    Location,
}

/// What the user searched for.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOrigin {
    /// City name as sent by the user
    City(String),
    /// Point the user shared
    Location {
        /// Latitude in degrees
        latitude: f64,
        /// Longitude in degrees
        longitude: f64,
    },
}

impl SearchOrigin {
    /// Search kind for this origin.
    #[must_use]
    pub const fn kind(&self) -> SearchKind {
        match self {
            Self::City(_) => SearchKind::City,
            Self::Location { .. } => SearchKind::Location,
        }
    }
}

/// Number of pages needed for `len` results.
#[must_use]
pub const fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// Clamps a requested page into `[0, total_pages - 1]`.
///
/// Returns 0 when there are no pages at all.
#[must_use]
pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    let last = total_pages.saturating_sub(1);
    usize::try_from(requested).map_or(0, |page| page.min(last))
}

/// Search results of one conversation together with the page being viewed.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationState {
    origin: SearchOrigin,
    attractions: Vec<Attraction>,
    page: usize,
}

/// One page of a [`PaginationState`], ready for rendering.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    /// What the results were searched by
    pub origin: &'a SearchOrigin,
    /// Zero-based page index
    pub page: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Index of the first item of this page in the full list
    pub offset: usize,
    /// Items on this page
    pub items: &'a [Attraction],
}

impl PageView<'_> {
    /// Whether a page before this one exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Whether a page after this one exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }
}

impl PaginationState {
    /// Starts viewing page 0 of `attractions`.
    ///
    /// Returns `None` for an empty list; empty searches are not stored.
    #[must_use]
    pub fn new(origin: SearchOrigin, attractions: Vec<Attraction>) -> Option<Self> {
        if attractions.is_empty() {
            return None;
        }
        Some(Self {
            origin,
            attractions,
            page: 0,
        })
    }

    /// What the results were searched by.
    #[must_use]
    pub const fn origin(&self) -> &SearchOrigin {
        &self.origin
    }

    /// Kind of the search that produced this state.
    #[must_use]
    pub const fn kind(&self) -> SearchKind {
        self.origin.kind()
    }

    /// All stored results in backend order.
    #[must_use]
    pub fn attractions(&self) -> &[Attraction] {
        &self.attractions
    }

    /// Page currently being viewed.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Number of pages.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        total_pages(self.attractions.len())
    }

    /// Moves to `requested`, clamped into range, and returns the page index used.
    pub fn go_to(&mut self, requested: i64) -> usize {
        self.page = clamp_page(requested, self.total_pages());
        self.page
    }

    /// The page currently being viewed.
    #[must_use]
    pub fn current(&self) -> PageView<'_> {
        let offset = self.page * PAGE_SIZE;
        let end = (offset + PAGE_SIZE).min(self.attractions.len());
        PageView {
            origin: &self.origin,
            page: self.page,
            total_pages: self.total_pages(),
            offset,
            items: &self.attractions[offset..end],
        }
    }

    /// Item at `slot` of `page`, with its index in the full list.
    #[must_use]
    pub fn item(&self, page: usize, slot: usize) -> Option<(usize, &Attraction)> {
        if slot >= PAGE_SIZE {
            return None;
        }
        let index = page.checked_mul(PAGE_SIZE)?.checked_add(slot)?;
        self.attractions.get(index).map(|item| (index, item))
    }
}
