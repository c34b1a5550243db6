use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use rand::seq::SliceRandom;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::Value;
use solpot_api::consts::*;

use crate::accounts::Credential;
use crate::error::TransportError;

/// Browser user agents a session picks from, so consecutive sessions don't look identical.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.0.0",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1",
];

/// Picks a user agent at random from the pool.
pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Something that can POST a JSON body to an API endpoint and hand back the decoded JSON
/// reply. Non-2xx replies are not errors here, the API reports failure inside the body.
#[async_trait(?Send)]
pub trait Transport {
    async fn post(&self, endpoint: &str, body: Option<Value>) -> Result<Value, TransportError>;
}

/// Builds one transport per account attempt.
pub trait SessionFactory {
    type Session: Transport;

    fn create(&self, credential: &Credential) -> Result<Self::Session>;
}

/// Request context for a single account: the shared HTTP pool plus this account's headers.
pub struct Session {
    http: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

impl Session {
    pub fn new(http: reqwest::Client, base_url: &str, credential: &Credential) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        let cookie = HeaderValue::from_str(credential.as_str())
            .map_err(|e| anyhow!("Cookie is not a valid header value: {}", e))?;
        let origin = HeaderValue::from_str(base_url)
            .map_err(|e| anyhow!("Base URL {} is not a valid origin: {}", base_url, e))?;

        let mut headers = HeaderMap::new();
        headers.insert("authority", HeaderValue::from_static(AUTHORITY));
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(header::ORIGIN, origin);
        headers.insert(header::USER_AGENT, HeaderValue::from_static(random_user_agent()));
        headers.insert(header::COOKIE, cookie);

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            headers,
        })
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[async_trait(?Send)]
impl Transport for Session {
    async fn post(&self, endpoint: &str, body: Option<Value>) -> Result<Value, TransportError> {
        let url = self.url(endpoint);
        debug!("POST {}", url);

        let mut request = self.http.post(&url).headers(self.headers.clone());
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        debug!("POST {} -> {}", url, response.status());

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Hands out [`Session`]s that share one connection pool.
pub struct HttpSessions {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSessions {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }
}

impl SessionFactory for HttpSessions {
    type Session = Session;

    fn create(&self, credential: &Credential) -> Result<Session> {
        Session::new(self.http.clone(), &self.base_url, credential)
    }
}
