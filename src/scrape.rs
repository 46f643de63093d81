use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Identity presented to fetched sites.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimal URL contract: parses, has a scheme and a host. Parse failures
/// classify as invalid; this never errors. No normalization is applied.
pub fn parse_valid_url(raw: &str) -> Option<Url> {
    Url::parse(raw)
        .ok()
        .filter(|url| !url.scheme().is_empty() && url.has_host())
}

pub fn validate_url(raw: &str) -> bool {
    parse_valid_url(raw).is_some()
}

/// Page-fetch collaborator. Injectable so the pipeline can be exercised
/// without a live network.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch_html(&self, url: &Url) -> Result<String>;
}

pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .gzip(true)
            .timeout(FETCH_TIMEOUT)
            .build()
            .context("building http client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch_html(&self, url: &Url) -> Result<String> {
        let res = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()
            .context("unsuccessful http status")?;
        let body = res.text().await.context("reading response body")?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_urls() {
        assert!(validate_url("https://example.com/a"));
        assert!(validate_url("http://example.com"));
    }

    #[test]
    fn rejects_free_text() {
        assert!(!validate_url("not a url"));
        assert!(!validate_url(""));
        assert!(!validate_url("example.com/path"));
    }

    #[test]
    fn rejects_hostless_urls() {
        assert!(!validate_url("ftp://"));
        assert!(!validate_url("mailto:someone@example.com"));
    }

    #[test]
    fn no_normalization_of_accepted_urls() {
        let url = parse_valid_url("https://Example.com/A/").unwrap();
        assert_eq!(url.path(), "/A/");
    }
}
