use serde::{Deserialize, Serialize};

use super::Issue;

/// One page of the agile `epic/{key}/issue` listing.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct EpicIssuesPage {
    #[serde(default)]
    pub start_at: u32,
    #[serde(default)]
    pub max_results: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl EpicIssuesPage {
    /// True once a page requested at `start_at` reaches the reported total or comes
    /// back empty. The offset is the caller's, not the echoed `startAt`.
    pub fn is_last(&self, start_at: u32) -> bool {
        self.issues.is_empty() || start_at as usize + self.issues.len() >= self.total as usize
    }
}
