pub const DEFAULT_JIRA_URL: &str = "http://localhost:8080";
pub const DEFAULT_IMAGE_FILE: &str = "issue_graph.png";
pub const CONFIG_FILE: &str = ".jira-depgraph-config.json";

// Jira agile REST endpoints, relative to the base URL
pub const ISSUE_PATH: &str = "/rest/agile/1.0/issue";
pub const EPIC_PATH: &str = "/rest/agile/1.0/epic";

pub const EPIC_PAGE_SIZE: u32 = 50;

pub const ENV_JIRA_URL: &str = "JIRA_URL";
pub const ENV_JIRA_USER: &str = "JIRA_USER";
pub const ENV_JIRA_PASSWORD: &str = "JIRA_PASSWORD";
