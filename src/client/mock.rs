//! In-memory tracker for tests and offline runs.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::IssueTracker;
use crate::error::{DepGraphError, DepGraphResult};
use crate::models::Issue;

/// Serves issues from memory and counts how often each key is requested.
#[derive(Default)]
pub struct MockTracker {
    issues: HashMap<String, Issue>,
    epics: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    fetches: Mutex<HashMap<String, usize>>,
    probes: Mutex<HashMap<String, usize>>,
    order: Mutex<Vec<String>>,
}

impl MockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issues.insert(issue.key.clone(), issue);
        self
    }

    /// Register `epic_key` as an epic whose members are `members`.
    pub fn with_epic(mut self, epic_key: &str, members: &[&str]) -> Self {
        self.epics.insert(
            epic_key.to_string(),
            members.iter().map(|m| m.to_string()).collect(),
        );
        self
    }

    /// Make every request for `key` fail as if the server returned a 500.
    pub fn with_failure(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    pub fn fetch_count(&self, key: &str) -> usize {
        count(&self.fetches, key)
    }

    pub fn probe_count(&self, key: &str) -> usize {
        count(&self.probes, key)
    }

    /// Keys passed to `fetch_issue`, in call order.
    pub fn fetched_keys(&self) -> Vec<String> {
        self.order.lock().map(|o| o.clone()).unwrap_or_default()
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches
            .lock()
            .map(|f| f.values().sum())
            .unwrap_or(0)
    }

    fn check_failure(&self, key: &str) -> DepGraphResult<()> {
        if self.failing.contains(key) {
            return Err(DepGraphError::ApiError {
                status: 500,
                body: format!("simulated failure for {}", key),
            });
        }
        Ok(())
    }
}

fn count(counter: &Mutex<HashMap<String, usize>>, key: &str) -> usize {
    counter
        .lock()
        .ok()
        .and_then(|c| c.get(key).copied())
        .unwrap_or(0)
}

fn bump(counter: &Mutex<HashMap<String, usize>>, key: &str) {
    if let Ok(mut c) = counter.lock() {
        *c.entry(key.to_string()).or_insert(0) += 1;
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    async fn fetch_issue(&self, key: &str) -> DepGraphResult<Option<Issue>> {
        bump(&self.fetches, key);
        if let Ok(mut order) = self.order.lock() {
            order.push(key.to_string());
        }
        self.check_failure(key)?;
        Ok(self.issues.get(key).cloned())
    }

    async fn fetch_epic_issues(&self, epic_key: &str) -> DepGraphResult<Option<Vec<Issue>>> {
        self.check_failure(epic_key)?;
        Ok(self.epics.get(epic_key).map(|members| {
            members
                .iter()
                .map(|key| {
                    self.issues
                        .get(key)
                        .cloned()
                        .unwrap_or_else(|| Issue::new(key, "", ""))
                })
                .collect()
        }))
    }

    async fn probe_epic(&self, key: &str) -> DepGraphResult<bool> {
        bump(&self.probes, key);
        self.check_failure(key)?;
        Ok(self.epics.contains_key(key))
    }
}
