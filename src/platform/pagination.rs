//! Drain-all-pages driver for paginated listings

use crate::error::{Error, Result};
use std::future::Future;
use tracing::debug;

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Total page count, when the server declared one
    pub total_pages: Option<u32>,
}

impl<T> Page<T> {
    /// Page that declares the total page count
    pub const fn new(items: Vec<T>, total_pages: Option<u32>) -> Self {
        Self { items, total_pages }
    }

    /// Page without pagination metadata
    pub const fn single(items: Vec<T>) -> Self {
        Self {
            items,
            total_pages: None,
        }
    }
}

/// Parse a total-pages header value.
///
/// Absent or empty values mean "no metadata"; anything that is not an
/// unsigned integer is an error.
pub fn parse_total_pages(raw: Option<&str>) -> Result<Option<u32>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(|e| Error::Pagination(format!("total pages {value:?}: {e}"))),
    }
}

/// Fetch every page of a listing, starting at page 1.
///
/// The running total starts at 1 and is replaced by every total the
/// server declares, so the first response discovers the real page count.
/// The first failing page aborts the whole listing; nothing partial is
/// returned and no retry happens here.
pub async fn fetch_all_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut current_page: u32 = 1;
    let mut total_pages: u32 = 1;

    while current_page <= total_pages {
        let page = fetch(current_page).await?;
        if let Some(total) = page.total_pages {
            total_pages = total;
        }

        debug!(page = current_page, total_pages, count = page.items.len(), "fetched page");
        items.extend(page.items);
        current_page += 1;
    }

    Ok(items)
}
