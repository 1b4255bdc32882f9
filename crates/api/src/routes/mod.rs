//! Route Handlers
//!
//! Every handler reads the owner from [`OwnerId`](crate::extract::OwnerId)
//! and scopes storage calls to it.

pub mod alerts;
pub mod analytics;
pub mod aquariums;
pub mod fish;
pub mod health_logs;
pub mod treatments;
pub mod triage;

use storage::PageRequest;

/// Build a page request from optional query values
pub(crate) fn page_request(page: Option<usize>, limit: Option<usize>, default_limit: usize) -> PageRequest {
    PageRequest::new(page.unwrap_or(1), limit.unwrap_or(default_limit))
}
