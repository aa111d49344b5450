//! Page slicing of ordered listings.

use serde::{Deserialize, Serialize};

/// Page number used when the caller does not provide one.
pub const DEFAULT_PAGE_NUMBER: u32 = 0;
/// Page size used when the caller does not provide one.
pub const DEFAULT_PAGE_SIZE: u32 = 3;

/// Zero-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index.
    pub number: u32,
    /// Number of items per page.
    pub size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a page request, applying defaults for absent values.
    pub fn new(number: Option<u32>, size: Option<u32>) -> Self {
        Self {
            number: number.unwrap_or(DEFAULT_PAGE_NUMBER),
            size: size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    fn bounds(&self, len: usize) -> (usize, usize) {
        let size = self.size as usize;
        let from = size.saturating_mul(self.number as usize);
        let to = from.saturating_add(size).min(len);
        (from, to)
    }
}

/// Items `[size * number, min(size * number + size, len))` of `items`.
///
/// Pages past the end are empty.
pub fn paginate<T>(items: Vec<T>, page: PageRequest) -> Vec<T> {
    let (from, to) = page.bounds(items.len());
    if from >= to {
        return Vec::new();
    }
    items.into_iter().skip(from).take(to - from).collect()
}
