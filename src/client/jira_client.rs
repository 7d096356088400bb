use async_trait::async_trait;
use colored::*;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{RequestBuilder, Response, StatusCode};

use crate::client::IssueTracker;
use crate::constants::{EPIC_PAGE_SIZE, EPIC_PATH, ISSUE_PATH};
use crate::error::{DepGraphError, DepGraphResult};
use crate::logging::{log_debug, log_info};
use crate::models::*;

/// Jira agile REST client using HTTP Basic authentication.
pub struct JiraClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl JiraClient {
    pub fn new(base_url: &str, username: String, password: String) -> DepGraphResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            password,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn issue_url(&self, key: &str) -> String {
        format!("{}{}/{}", self.base_url, ISSUE_PATH, key)
    }

    pub fn epic_url(&self, key: &str) -> String {
        format!("{}{}/{}", self.base_url, EPIC_PATH, key)
    }

    pub fn epic_issues_url(&self, key: &str) -> String {
        format!("{}/issue", self.epic_url(key))
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
    }

    async fn unexpected_status(response: Response) -> DepGraphError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        DepGraphError::ApiError { status, body }
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn fetch_issue(&self, key: &str) -> DepGraphResult<Option<Issue>> {
        println!("{} {}", "Fetching".bright_black(), key.bold());
        log_info(&format!("Fetching {}", key));

        let response = self.get(&self.issue_url(key)).send().await?;

        match response.status() {
            StatusCode::OK => Ok(Some(response.json::<Issue>().await?)),
            StatusCode::NOT_FOUND => {
                log_debug(&format!("{} returned 404", key));
                Ok(None)
            }
            _ => Err(Self::unexpected_status(response).await),
        }
    }

    async fn fetch_epic_issues(&self, epic_key: &str) -> DepGraphResult<Option<Vec<Issue>>> {
        log_info(&format!("Fetching issues in epic {}", epic_key));

        let url = self.epic_issues_url(epic_key);
        let mut issues = Vec::new();
        let mut start_at: u32 = 0;

        loop {
            let response = self
                .get(&url)
                .query(&[("startAt", start_at), ("maxResults", EPIC_PAGE_SIZE)])
                .send()
                .await?;

            let status = response.status();
            let page = match status {
                StatusCode::OK => response.json::<EpicIssuesPage>().await?,
                // A client error for the epic itself means "not an epic", as in the epic check.
                _ if status.is_client_error() && start_at == 0 => {
                    log_debug(&format!("{} is not an epic ({})", epic_key, status));
                    return Ok(None);
                }
                _ => return Err(Self::unexpected_status(response).await),
            };

            let last = page.is_last(start_at);
            start_at += page.issues.len() as u32;
            issues.extend(page.issues);

            if last {
                break;
            }
        }

        log_debug(&format!("Epic {} has {} issues", epic_key, issues.len()));
        Ok(Some(issues))
    }

    async fn probe_epic(&self, key: &str) -> DepGraphResult<bool> {
        let response = self.get(&self.epic_url(key)).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(true)
        } else if status.is_client_error() {
            Ok(false)
        } else {
            Err(Self::unexpected_status(response).await)
        }
    }
}
