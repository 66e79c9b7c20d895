// Offset/limit pagination for the Integration dialect.
//
// `build_query` turns a cursor into query parameters. `scan_for_id` and
// `collect_all` walk a paginated list endpoint with a fixed page size and a
// set of termination guards, so a controller that misreports `totalCount` or
// ignores `offset` cannot keep the loop alive.

use std::future::Future;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::Error;

/// Page size used by scan-based lookups.
pub const DEFAULT_SCAN_PAGE_SIZE: i64 = 200;

/// Hard ceiling on pages fetched by a single walk when the controller
/// reports no usable total.
const MAX_PAGES: u64 = 1_000;

/// `(offset, limit)` cursor. `0` for either means "server default".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: i64,
    pub limit: i64,
}

impl PageRequest {
    pub const fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }

    /// Query parameters for this cursor. See [`build_query`].
    pub fn query(self) -> Result<Vec<(&'static str, String)>, Error> {
        build_query(self.offset, self.limit)
    }
}

/// Build `offset`/`limit` query parameters.
///
/// Zero values are omitted entirely; negative values are rejected with
/// [`Error::Validation`] so they never reach the controller.
pub fn build_query(offset: i64, limit: i64) -> Result<Vec<(&'static str, String)>, Error> {
    if offset < 0 {
        return Err(Error::Validation(format!(
            "offset must be non-negative, got {offset}"
        )));
    }
    if limit < 0 {
        return Err(Error::Validation(format!(
            "limit must be non-negative, got {limit}"
        )));
    }

    let mut params = Vec::with_capacity(2);
    if offset > 0 {
        params.push(("offset", offset.to_string()));
    }
    if limit > 0 {
        params.push(("limit", limit.to_string()));
    }
    Ok(params)
}

/// Integration list envelope: `{data, totalCount, offset, limit, count}`.
///
/// `data` is required; a missing or malformed `data` field is a decode
/// error rather than an empty page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub count: i64,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Items that can be located by a scan.
pub trait Identified {
    fn id(&self) -> &str;
}

// ── Page walker ──────────────────────────────────────────────────────

/// Outcome of observing one fetched page.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    /// The page is new; `more` says whether another fetch is warranted.
    Fresh { more: bool },
    /// The page starts with the same item as the previous one.
    Repeated,
}

/// Termination bookkeeping shared by `scan_for_id` and `collect_all`.
struct PageWalker {
    page_size: i64,
    offset: i64,
    fetches: u64,
    /// `totalCount` from the first page; later pages cannot raise it.
    first_total: Option<i64>,
    previous_first_id: Option<String>,
}

impl PageWalker {
    fn new(page_size: i64) -> Result<Self, Error> {
        if page_size <= 0 {
            return Err(Error::Validation(format!(
                "page size must be positive, got {page_size}"
            )));
        }
        Ok(Self {
            page_size,
            offset: 0,
            fetches: 0,
            first_total: None,
            previous_first_id: None,
        })
    }

    fn request(&self) -> PageRequest {
        PageRequest::new(self.offset, self.page_size)
    }

    fn max_fetches(&self) -> u64 {
        match self.first_total {
            Some(total) if total > 0 => {
                let pages = total.saturating_add(self.page_size - 1) / self.page_size;
                u64::try_from(pages).unwrap_or(MAX_PAGES).min(MAX_PAGES)
            }
            _ => MAX_PAGES,
        }
    }

    fn observe(&mut self, received: usize, total_count: i64, first_id: Option<&str>) -> Step {
        self.fetches += 1;

        if let (Some(prev), Some(cur)) = (self.previous_first_id.as_deref(), first_id) {
            if prev == cur {
                warn!(offset = self.offset, "page repeated previous page, stopping");
                return Step::Repeated;
            }
        }
        self.previous_first_id = first_id.map(str::to_owned);

        let total = *self.first_total.get_or_insert(total_count);
        let received = i64::try_from(received).unwrap_or(i64::MAX);

        if received == 0 || received < self.page_size {
            return Step::Fresh { more: false };
        }

        self.offset = self.offset.saturating_add(received);
        if total > 0 && self.offset >= total {
            return Step::Fresh { more: false };
        }
        if self.fetches >= self.max_fetches() {
            warn!(
                fetches = self.fetches,
                total, "page budget exhausted, stopping"
            );
            return Step::Fresh { more: false };
        }
        Step::Fresh { more: true }
    }
}

/// Page through a list endpoint until the item with `target` id is found.
///
/// Stops with [`Error::NotFound`] when the list is exhausted: an empty or
/// short page, the offset reaching the first reported `totalCount`, a
/// repeated page, or ⌈totalCount / page_size⌉ fetches. A fetch failure
/// aborts the scan and propagates unchanged.
pub async fn scan_for_id<T, F, Fut>(
    resource: &'static str,
    target: &str,
    page_size: i64,
    mut fetch: F,
) -> Result<T, Error>
where
    T: Identified,
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>, Error>>,
{
    let mut walker = PageWalker::new(page_size)?;

    loop {
        let page = fetch(walker.request()).await?;
        let first_id = page.data.first().map(|item| item.id().to_owned());
        let step = walker.observe(page.data.len(), page.total_count, first_id.as_deref());
        if step == Step::Repeated {
            break;
        }

        if let Some(hit) = page.data.into_iter().find(|item| item.id() == target) {
            debug!(resource, id = target, fetches = walker.fetches, "scan hit");
            return Ok(hit);
        }

        if step == (Step::Fresh { more: false }) {
            break;
        }
    }

    Err(Error::NotFound {
        resource,
        id: target.to_owned(),
    })
}

/// Collect every item from a paginated list endpoint.
///
/// Uses the same termination guards as [`scan_for_id`].
pub async fn collect_all<T, F, Fut>(page_size: i64, mut fetch: F) -> Result<Vec<T>, Error>
where
    T: Identified,
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>, Error>>,
{
    let mut walker = PageWalker::new(page_size)?;
    let mut all = Vec::new();

    loop {
        let page = fetch(walker.request()).await?;
        let first_id = page.data.first().map(|item| item.id().to_owned());
        match walker.observe(page.data.len(), page.total_count, first_id.as_deref()) {
            Step::Repeated => break,
            Step::Fresh { more } => {
                all.extend(page.data);
                if !more {
                    break;
                }
            }
        }
    }

    Ok(all)
}
