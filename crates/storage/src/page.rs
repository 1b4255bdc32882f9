//! Pagination

use serde::{Deserialize, Serialize};

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    10
}

/// Requested page, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }
    }

    /// Clamp page and limit to at least 1, and limit to `max_limit`
    pub fn normalized(self, max_limit: usize) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, max_limit.max(1)),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(default_page(), default_limit())
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total: usize,
}

/// Cut one page out of an already sorted list
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let request = request.normalized(usize::MAX);
    let total = items.len();
    let start = (request.page - 1).saturating_mul(request.limit);

    let data = items.into_iter().skip(start).take(request.limit).collect();

    Page {
        data,
        current_page: request.page,
        total_pages: total.div_ceil(request.limit),
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_middle_page() {
        let page = paginate((1..=25).collect(), PageRequest::new(2, 10));
        assert_eq!(page.data, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total, 25);
        assert_eq!(page.current_page, 2);
    }

    #[test]
    fn test_paginate_past_end() {
        let page = paginate(vec![1, 2, 3], PageRequest::new(5, 10));
        assert!(page.data.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_paginate_empty() {
        let page: Page<u8> = paginate(Vec::new(), PageRequest::default());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_zero_page_and_limit_are_clamped() {
        let page = paginate(vec![1, 2, 3], PageRequest::new(0, 0));
        assert_eq!(page.current_page, 1);
        assert_eq!(page.data, vec![1]);
        assert_eq!(page.total_pages, 3);
    }
}
