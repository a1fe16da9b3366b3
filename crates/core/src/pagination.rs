//! Client-side pagination over a pre-sorted flat list.
//!
//! The paginator never sorts; callers order the list first (see
//! [`crate::ordering`]). Page numbers are 1-based.

use serde::Serialize;

use crate::auth::AuthContext;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Line ads shown per page when the caller does not choose.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Upper bound on a caller-chosen page size.
pub const MAX_PAGE_SIZE: usize = 100;

pub const FIRST_PAGE: usize = 1;

// ---------------------------------------------------------------------------
// Slicing
// ---------------------------------------------------------------------------

/// One fixed-size slice of a sorted list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page_number > FIRST_PAGE
    }
}

/// `ceil(total_items / page_size)`, never less than 1.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(FIRST_PAGE)
}

/// Clamp a caller-supplied page size to `1..=MAX_PAGE_SIZE`, falling back to
/// [`DEFAULT_PAGE_SIZE`].
pub fn clamp_page_size(page_size: Option<usize>) -> usize {
    page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}

/// Slice out page `page_number` (clamped into range) of `items`.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page_number: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);
    let page_number = page_number.clamp(FIRST_PAGE, total_pages);

    let start = ((page_number - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        page_number,
        page_size,
        total_pages,
        total_items,
    }
}

/// The page a caller may actually see: anonymous callers are held to the
/// first page regardless of what they ask for.
pub fn effective_page(requested: usize, auth: &AuthContext) -> usize {
    if auth.is_authenticated() {
        requested
    } else {
        FIRST_PAGE
    }
}

/// [`paginate`] with authentication gating applied.
pub fn paginate_gated<T: Clone>(
    items: &[T],
    page_size: usize,
    requested: usize,
    auth: &AuthContext,
) -> Page<T> {
    paginate(items, page_size, effective_page(requested, auth))
}

// ---------------------------------------------------------------------------
// Navigation state
// ---------------------------------------------------------------------------

/// Current-page state for a paginated view.
///
/// Starts at page 1; out-of-range navigation is ignored. Call [`reset`]
/// whenever the upstream query changes.
///
/// [`reset`]: Paginator::reset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    current_page: usize,
    page_size: usize,
    total_items: usize,
}

impl Paginator {
    pub fn new(page_size: usize, total_items: usize) -> Self {
        Self {
            current_page: FIRST_PAGE,
            page_size: page_size.max(1),
            total_items,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    /// Move to `page`. Returns `false` and leaves state untouched when `page`
    /// is outside `1..=total_pages`.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if (FIRST_PAGE..=self.total_pages()).contains(&page) {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) -> bool {
        self.go_to_page(self.current_page + 1)
    }

    pub fn prev(&mut self) -> bool {
        match self.current_page.checked_sub(1) {
            Some(page) => self.go_to_page(page),
            None => false,
        }
    }

    /// New result set: back to page 1 with the new item count.
    pub fn reset(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = FIRST_PAGE;
    }

    /// The current page of `items`, gated for `auth`.
    pub fn page_of<T: Clone>(&self, items: &[T], auth: &AuthContext) -> Page<T> {
        paginate_gated(items, self.page_size, self.current_page, auth)
    }
}
