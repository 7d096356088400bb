pub mod cached;
pub mod jira_client;
pub mod mock;
pub mod tracker;

pub use cached::CachedTracker;
pub use jira_client::JiraClient;
pub use mock::MockTracker;
pub use tracker::IssueTracker;
