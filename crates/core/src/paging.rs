//! Offset-based pagination for list operations.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

/// A window into a tenant's record list.
///
/// Lists are ordered by creation time (then id) so repeated calls with the
/// same page and no intervening writes return identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl Page {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    /// Clamps the page to sane bounds before it reaches a query.
    pub fn normalized(self) -> Self {
        Self {
            limit: self.limit.clamp(1, MAX_PAGE_LIMIT),
            offset: self.offset.max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page() {
        let page = Page::default();
        assert_eq!(page.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn test_normalized_clamps_limit() {
        assert_eq!(Page::new(0, 0).normalized().limit, 1);
        assert_eq!(Page::new(-5, 0).normalized().limit, 1);
        assert_eq!(Page::new(MAX_PAGE_LIMIT + 1, 0).normalized().limit, MAX_PAGE_LIMIT);
    }

    #[test]
    fn test_normalized_clamps_offset() {
        assert_eq!(Page::new(10, -1).normalized().offset, 0);
        assert_eq!(Page::new(10, 42).normalized().offset, 42);
    }
}
