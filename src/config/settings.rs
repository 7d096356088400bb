use std::env;
use std::path::PathBuf;

use clap::ArgMatches;
use regex::Regex;

use crate::config::Config;
use crate::depgraph_error;
use crate::constants::{DEFAULT_IMAGE_FILE, DEFAULT_JIRA_URL, ENV_JIRA_PASSWORD, ENV_JIRA_URL, ENV_JIRA_USER};
use crate::error::DepGraphResult;
use crate::graph::WalkOptions;
use crate::pipeline::BuildOptions;
use crate::render::LayoutEngine;

lazy_static::lazy_static! {
    static ref ISSUE_KEY: Regex = Regex::new(r"^[A-Z][A-Z0-9_]*-[0-9]+$").expect("issue key pattern");
}

/// Normalize and check an issue key such as `DEMO-1`.
pub fn validate_issue_key(raw: &str) -> DepGraphResult<String> {
    let key = raw.trim().to_uppercase();
    if ISSUE_KEY.is_match(&key) {
        Ok(key)
    } else {
        Err(depgraph_error!(
            InvalidInput,
            "'{}' is not an issue key. Must specify exactly one issue key (e.g. DEMO-1)",
            raw
        ))
    }
}

/// Everything a run needs, resolved from flags, environment and the config file
/// (in that order of precedence).
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub start_key: String,
    pub base_url: String,
    pub username: String,
    /// `None` means the password still has to be prompted for.
    pub password: Option<String>,
    pub image_file: PathBuf,
    pub expand_epic: bool,
    pub include_subtasks: bool,
    pub layout: LayoutEngine,
    pub save_config: bool,
}

impl Settings {
    pub fn from_matches(matches: &ArgMatches, config: &Config) -> DepGraphResult<Self> {
        Self::resolve(matches, config, |name| env::var(name).ok())
    }

    pub fn resolve<F>(matches: &ArgMatches, config: &Config, lookup_env: F) -> DepGraphResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |name: &str| matches.get_one::<String>(name).cloned();

        let raw_key = flag("issue").ok_or_else(|| {
            depgraph_error!(InvalidInput, "Must specify exactly one issue key. (e.g. DEMO-1)")
        })?;
        let start_key = validate_issue_key(&raw_key)?;

        let base_url = flag("jira")
            .or_else(|| lookup_env(ENV_JIRA_URL))
            .or_else(|| config.base_url.clone())
            .unwrap_or_else(|| DEFAULT_JIRA_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(depgraph_error!(
                ConfigError,
                "Jira URL must start with http:// or https://, got '{}'",
                base_url
            ));
        }

        let username = flag("user")
            .or_else(|| lookup_env(ENV_JIRA_USER))
            .or_else(|| config.username.clone())
            .ok_or_else(|| {
                depgraph_error!(ConfigError, "No Jira user given. Pass --user or set {}.", ENV_JIRA_USER)
            })?;

        let password = flag("password").or_else(|| lookup_env(ENV_JIRA_PASSWORD));

        let image_file = PathBuf::from(flag("file").unwrap_or_else(|| DEFAULT_IMAGE_FILE.to_string()));

        Ok(Self {
            start_key,
            base_url,
            username,
            password,
            image_file,
            expand_epic: matches.get_flag("verbose"),
            include_subtasks: !matches.get_flag("no-subtasks"),
            layout: matches.get_one::<LayoutEngine>("layout").copied().unwrap_or_default(),
            save_config: matches.get_flag("save-config"),
        })
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            walk: WalkOptions {
                include_subtasks: self.include_subtasks,
            },
            expand_epic: self.expand_epic,
        }
    }

    pub fn to_config(&self) -> Config {
        Config {
            base_url: Some(self.base_url.clone()),
            username: Some(self.username.clone()),
        }
    }
}
