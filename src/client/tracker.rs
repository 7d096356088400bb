use async_trait::async_trait;

use crate::error::DepGraphResult;
use crate::models::Issue;

/// Read-only access to an issue tracker.
///
/// Absence is reported as `Ok(None)` / `Ok(false)`; `Err` is reserved for failures the
/// caller is not expected to recover from (transport errors, unexpected statuses).
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetch a single issue by key.
    async fn fetch_issue(&self, key: &str) -> DepGraphResult<Option<Issue>>;

    /// Fetch every issue that directly belongs to `epic_key`.
    async fn fetch_epic_issues(&self, epic_key: &str) -> DepGraphResult<Option<Vec<Issue>>>;

    /// Whether the tracker answers for `key` as an epic.
    async fn probe_epic(&self, key: &str) -> DepGraphResult<bool>;
}

