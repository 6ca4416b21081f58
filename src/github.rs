use anyhow::{Context, Result, anyhow};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::GithubConfig;
use crate::report::CommentPoster;

const USER_AGENT: &str = concat!("gpt-translate/", env!("CARGO_PKG_VERSION"));

/// Replies on the issue or pull request that carried the command.
#[derive(Debug)]
pub struct GithubClient {
    client: Client,
    token: String,
    comments_url: Option<String>,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

impl GithubClient {
    pub fn new(config: &GithubConfig, issue_number: Option<u64>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build GitHub HTTP client")?;

        Ok(Self {
            client,
            token: config.token.clone(),
            comments_url: issue_number
                .map(|n| comments_url(&config.api_url, &config.repository, n)),
        })
    }
}

impl CommentPoster for GithubClient {
    fn post_comment(&self, body: &str) -> Result<()> {
        let url = self
            .comments_url
            .as_deref()
            .ok_or_else(|| anyhow!("No issue or pull request to comment on"))?;
        debug!(%url, "posting comment");

        let res = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&CommentBody { body })
            .send()?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().unwrap_or_default();
            return Err(anyhow!("GitHub API error {}: {}", status, text));
        }
        info!("posted comment");
        Ok(())
    }
}

fn comments_url(api_url: &str, repository: &str, issue_number: u64) -> String {
    format!(
        "{}/repos/{}/issues/{}/comments",
        api_url.trim_end_matches('/'),
        repository,
        issue_number
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn github() -> GithubConfig {
        GithubConfig {
            token: "t".to_string(),
            api_url: "https://ghe.example.com/api/v3/".to_string(),
            repository: "octo/docs".to_string(),
        }
    }

    #[test]
    fn test_comments_url() {
        assert_eq!(
            comments_url("https://api.github.com", "octo/docs", 12),
            "https://api.github.com/repos/octo/docs/issues/12/comments"
        );
    }

    #[test]
    fn test_new_trims_trailing_slash() -> Result<()> {
        let client = GithubClient::new(&github(), Some(3))?;
        assert_eq!(
            client.comments_url.as_deref(),
            Some("https://ghe.example.com/api/v3/repos/octo/docs/issues/3/comments")
        );
        Ok(())
    }

    #[test]
    fn test_post_comment_without_issue() -> Result<()> {
        let client = GithubClient::new(&github(), None)?;
        let err = client.post_comment("hello").unwrap_err();
        assert_eq!(err.to_string(), "No issue or pull request to comment on");
        Ok(())
    }
}
