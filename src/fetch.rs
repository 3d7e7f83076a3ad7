//! Blocking page fetch using ureq

use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

use crate::error::{Error, Result};

/// Options forwarded to the HTTP client when no HTML is supplied
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    /// User-Agent header; the client's default when unset
    pub user_agent: Option<String>,
    /// Global timeout for the whole request, in seconds
    pub timeout_secs: Option<u64>,
    /// Extra request headers, sent as-is
    pub headers: BTreeMap<String, String>,
    /// Body read limit; the client's default (10 MiB) when unset
    pub max_body_bytes: Option<u64>,
    pub max_redirects: Option<u32>,
}

impl FetchOptions {
    /// Parse options from a JSON object, e.g. `{"timeout_secs": 5}`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn agent(&self) -> ureq::Agent {
        let mut builder = ureq::Agent::config_builder()
            .timeout_global(self.timeout_secs.map(Duration::from_secs));

        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if let Some(max_redirects) = self.max_redirects {
            builder = builder.max_redirects(max_redirects);
        }

        ureq::Agent::new_with_config(builder.build())
    }
}

/// Fetch `url` and return the whole response body as text.
///
/// Non-UTF-8 bytes are replaced rather than rejected. The agent, response and
/// body reader live only inside this call, so the connection is released on
/// every return path.
pub fn fetch_html(url: &str, options: &FetchOptions) -> Result<String> {
    debug!(url, "fetching page");

    let agent = options.agent();
    let mut request = agent.get(url);
    for (name, value) in &options.headers {
        request = request.header(name.as_str(), value.as_str());
    }

    let response = request.call().map_err(|e| Error::fetch(url, e))?;
    let mut body = response.into_body();
    let bytes = match options.max_body_bytes {
        Some(limit) => body.with_config().limit(limit).read_to_vec(),
        None => body.read_to_vec(),
    }
    .map_err(|e| Error::fetch(url, e))?;

    debug!(url, bytes = bytes.len(), "fetched page");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_fetch_ok() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/page");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body("<html><head></head></html>");
        });

        let html = fetch_html(&server.url("/page"), &FetchOptions::default()).unwrap();
        mock.assert();
        assert_eq!(html, "<html><head></head></html>");
    }

    #[test]
    fn test_fetch_forwards_options() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/page")
                .header("user-agent", "ogp-test")
                .header("accept-language", "fi");
            then.status(200).body("ok");
        });

        let mut options = FetchOptions {
            user_agent: Some("ogp-test".to_string()),
            timeout_secs: Some(5),
            ..Default::default()
        };
        options
            .headers
            .insert("Accept-Language".to_string(), "fi".to_string());

        let html = fetch_html(&server.url("/page"), &options).unwrap();
        mock.assert();
        assert_eq!(html, "ok");
    }

    #[test]
    fn test_fetch_http_error_status() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("not found");
        });

        let err = fetch_html(&server.url("/missing"), &FetchOptions::default()).unwrap_err();
        mock.assert();
        assert!(err.is_fetch());
    }

    #[test]
    fn test_fetch_body_limit() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/big");
            then.status(200).body("x".repeat(1024));
        });

        let options = FetchOptions {
            max_body_bytes: Some(16),
            ..Default::default()
        };
        let err = fetch_html(&server.url("/big"), &options).unwrap_err();
        assert!(err.is_fetch());
    }

    #[test]
    fn test_fetch_unreachable_host() {
        let err = fetch_html("http://127.0.0.1:1/", &FetchOptions::default()).unwrap_err();
        assert!(err.is_fetch());
    }

    #[test]
    fn test_options_from_json() {
        let options = FetchOptions::from_json(
            r#"{"user_agent": "bot/1.0", "timeout_secs": 3, "headers": {"X-Test": "1"}}"#,
        )
        .unwrap();
        assert_eq!(options.user_agent.as_deref(), Some("bot/1.0"));
        assert_eq!(options.timeout_secs, Some(3));
        assert_eq!(options.headers.get("X-Test").map(String::as_str), Some("1"));
        assert_eq!(options.max_redirects, None);

        assert_eq!(FetchOptions::from_json("{}").unwrap(), FetchOptions::default());
        assert!(matches!(
            FetchOptions::from_json("{not json"),
            Err(Error::InvalidOptions(_))
        ));
    }
}
