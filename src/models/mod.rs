pub mod epic;
pub mod issue;

// Re-export commonly used types
pub use epic::EpicIssuesPage;
pub use issue::{Issue, IssueFields, IssueLink, IssueRef, IssueRefFields, LinkType, Status};
