use std::future::Future;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A requested result window: row offset plus page size. A page size of zero
/// is rejected up front rather than passed through to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    offset: u64,
    size: u64,
}

impl PageRequest {
    pub fn new(offset: u64, size: u64) -> Result<Self, ValidationError> {
        if size == 0 {
            return Err(ValidationError::new(
                "Page size must be at least 1".to_string(),
            ));
        }
        Ok(Self { offset, size })
    }

    /// The first window of a given size.
    pub fn first(size: u64) -> Result<Self, ValidationError> {
        Self::new(0, size)
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// One fetched window of results plus the request that produced it and the
/// total number of matching rows across all windows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    rows: Vec<T>,
    request: PageRequest,
    total: u64,
}

impl<T> Page<T> {
    pub fn new(rows: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            rows,
            request,
            total,
        }
    }

    /// Builds a page from an already-fetched window, calling `fetch_total`
    /// only when the total cannot be derived from the window itself. On the
    /// first page, fewer fetched rows than the page size proves no further
    /// rows exist, so the fetched count is the total and the count query is
    /// skipped entirely.
    pub async fn from_window<F, Fut, E>(
        rows: Vec<T>,
        request: PageRequest,
        fetch_total: F,
    ) -> Result<Self, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<u64, E>>,
    {
        let total =
            match total_from_window(request.offset(), request.size(), rows.len()) {
                Some(total) => total,
                None => fetch_total().await?,
            };
        Ok(Self::new(rows, request, total))
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }

    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_last(&self) -> bool {
        self.request.offset() + self.rows.len() as u64 >= self.total
    }
}

/// Derives the total from a fetched window when structurally possible:
/// offset zero with fewer rows than the page size means the window already
/// holds every matching row. Any other shape needs a count query.
pub fn total_from_window(offset: u64, size: u64, fetched: usize) -> Option<u64> {
    if offset == 0 && (fetched as u64) < size {
        Some(fetched as u64)
    } else {
        None
    }
}
