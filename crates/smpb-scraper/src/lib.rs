//! Source-site adapter (pocket.shonenmagazine.com).
//!
//! Implements the core `ChapterSource` port with reqwest: an optional login
//! POST on a fresh cookie session, the chapter GET, and per-page image
//! downloads for archive mode.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use smpb_core::{
    config::{Config, Credentials},
    domain::ChapterResult,
    errors::Error,
    ports::ChapterSource,
    Result,
};

pub mod parse;

/// The site only serves the reader markup to mobile clients that look like
/// an in-app request, hence the fixed UA and the AJAX marker header.
const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 14_6 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0.3 Mobile/15E148 Safari/604.1";

pub struct PocketClient {
    base_url: String,
    credentials: Credentials,
    timeout: Duration,
    /// Plain client for page images; no cookies needed there.
    images: reqwest::Client,
}

impl PocketClient {
    pub fn new(cfg: &Config) -> Self {
        let images = reqwest::Client::builder()
            .timeout(cfg.request_timeout)
            .build()
            .expect("reqwest client build");

        Self {
            base_url: cfg.site_base_url.clone(),
            credentials: cfg.credentials.clone(),
            timeout: cfg.request_timeout,
            images,
        }
    }

    /// A fresh cookie-bearing session, created per chapter fetch and dropped
    /// afterwards. Every fetch re-authenticates; nothing is reused.
    fn session(&self) -> Result<reqwest::Client> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(MOBILE_USER_AGENT));
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));

        reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::External(format!("http client build failed: {e}")))
    }

    async fn login(&self, http: &reqwest::Client, email: &str, password: &str) -> Result<()> {
        debug!("logging in before chapter fetch");
        let resp = http
            .post(format!("{}/user_account/login", self.base_url))
            .form(&[("email_address", email), ("password", password)])
            .send()
            .await
            .map_err(net_err)?;

        if resp.status() != reqwest::StatusCode::OK {
            return Err(Error::LoginFailed);
        }
        Ok(())
    }
}

#[async_trait]
impl ChapterSource for PocketClient {
    async fn fetch_chapter(&self, chapter_id: &str) -> Result<ChapterResult> {
        let http = self.session()?;

        if let Some((email, password)) = self.credentials.pair() {
            self.login(&http, email, password).await?;
        }

        let resp = http
            .get(format!("{}/episode/{chapter_id}", self.base_url))
            .send()
            .await
            .map_err(net_err)?;
        let body = resp.text().await.map_err(net_err)?;

        parse::parse_chapter(&body)
    }

    async fn fetch_page(&self, url: &str) -> Result<Option<Vec<u8>>> {
        let resp = self.images.get(url).send().await.map_err(net_err)?;

        if !resp.status().is_success() {
            debug!("page fetch returned {} for {url}", resp.status());
            return Ok(None);
        }

        let bytes = resp.bytes().await.map_err(net_err)?;
        Ok(Some(bytes.to_vec()))
    }
}

fn net_err(e: reqwest::Error) -> Error {
    Error::Network(e.to_string())
}
