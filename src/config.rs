use std::env;

use crate::services::{get_github_token, ClientError};

pub const DEFAULT_LOG_FILTER: &str = "ghproj=warn";

/// Settings read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub token: Option<String>,
    pub prompt_disabled: bool,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = non_empty("GH_TOKEN").or_else(|| non_empty("GITHUB_TOKEN"));
        let prompt_disabled = non_empty("GH_PROMPT_DISABLED")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false"))
            .unwrap_or(false);
        let log_filter =
            non_empty("GHPROJ_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Config {
            token,
            prompt_disabled,
            log_filter,
        }
    }

    /// The environment token, falling back to `gh auth token`.
    pub fn token(&self) -> Result<String, ClientError> {
        match &self.token {
            Some(token) => Ok(token.clone()),
            None => get_github_token(),
        }
    }
}
