use serde::{Deserialize, Serialize};

/// An issue as returned by the agile `issue/{key}` endpoint.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Issue {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub subtasks: Vec<IssueRef>,
    #[serde(default)]
    pub issuelinks: Vec<IssueLink>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Status {
    #[serde(default)]
    pub name: String,
}

/// The compact issue shape embedded in link records and subtask lists.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IssueRef {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<IssueRefFields>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct IssueRefFields {
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IssueLink {
    #[serde(rename = "type")]
    pub link_type: LinkType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outward_issue: Option<IssueRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inward_issue: Option<IssueRef>,
}

/// Link type as Jira describes it. Only the outward phrase is used for edge labels,
/// whichever side of the link the record came from.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct LinkType {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub outward: String,
    #[serde(default)]
    pub inward: String,
}

impl Issue {
    pub fn new(key: &str, summary: &str, status: &str) -> Self {
        Self {
            key: key.to_string(),
            fields: IssueFields {
                summary: summary.to_string(),
                status: Status { name: status.to_string() },
                subtasks: Vec::new(),
                issuelinks: Vec::new(),
            },
        }
    }

    pub fn summary(&self) -> &str {
        &self.fields.summary
    }

    pub fn status_name(&self) -> &str {
        &self.fields.status.name
    }

    /// Add a link record pointing from this issue to `key`.
    pub fn with_outward_link(mut self, key: &str, outward: &str) -> Self {
        self.fields.issuelinks.push(IssueLink {
            link_type: LinkType::from_outward(outward),
            outward_issue: Some(IssueRef::new(key)),
            inward_issue: None,
        });
        self
    }

    /// Add a link record pointing from `key` to this issue.
    pub fn with_inward_link(mut self, key: &str, outward: &str) -> Self {
        self.fields.issuelinks.push(IssueLink {
            link_type: LinkType::from_outward(outward),
            outward_issue: None,
            inward_issue: Some(IssueRef::new(key)),
        });
        self
    }

    pub fn with_subtask(mut self, key: &str) -> Self {
        self.fields.subtasks.push(IssueRef::new(key));
        self
    }
}

impl IssueRef {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            fields: None,
        }
    }

    pub fn summary(&self) -> Option<&str> {
        self.fields
            .as_ref()
            .and_then(|f| f.summary.as_deref())
            .filter(|s| !s.is_empty())
    }
}

impl LinkType {
    pub fn from_outward(outward: &str) -> Self {
        Self {
            name: String::new(),
            outward: outward.to_string(),
            inward: String::new(),
        }
    }
}
