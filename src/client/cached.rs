use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::IssueTracker;
use crate::error::DepGraphResult;
use crate::models::Issue;

/// Memoizes issue fetches and epic probes for the lifetime of one run.
///
/// The annotation passes touch every node again after the walk, so without this a
/// graph of N issues costs roughly 3N round-trips instead of 2N. Only successful
/// answers are cached, including "not found".
pub struct CachedTracker<T> {
    inner: T,
    issues: Mutex<HashMap<String, Option<Issue>>>,
    epics: Mutex<HashMap<String, bool>>,
}

impl<T: IssueTracker> CachedTracker<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            issues: Mutex::new(HashMap::new()),
            epics: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    fn cached_issue(&self, key: &str) -> Option<Option<Issue>> {
        self.issues.lock().ok()?.get(key).cloned()
    }

    fn cached_probe(&self, key: &str) -> Option<bool> {
        self.epics.lock().ok()?.get(key).copied()
    }
}

#[async_trait]
impl<T: IssueTracker> IssueTracker for CachedTracker<T> {
    async fn fetch_issue(&self, key: &str) -> DepGraphResult<Option<Issue>> {
        if let Some(hit) = self.cached_issue(key) {
            return Ok(hit);
        }

        let issue = self.inner.fetch_issue(key).await?;
        if let Ok(mut issues) = self.issues.lock() {
            issues.insert(key.to_string(), issue.clone());
        }
        Ok(issue)
    }

    async fn fetch_epic_issues(&self, epic_key: &str) -> DepGraphResult<Option<Vec<Issue>>> {
        let members = self.inner.fetch_epic_issues(epic_key).await?;

        // A key with a membership list is an epic; record it so the shape pass skips the probe.
        if let Ok(mut epics) = self.epics.lock() {
            epics.insert(epic_key.to_string(), members.is_some());
        }
        Ok(members)
    }

    async fn probe_epic(&self, key: &str) -> DepGraphResult<bool> {
        if let Some(hit) = self.cached_probe(key) {
            return Ok(hit);
        }

        let is_epic = self.inner.probe_epic(key).await?;
        if let Ok(mut epics) = self.epics.lock() {
            epics.insert(key.to_string(), is_epic);
        }
        Ok(is_epic)
    }
}
