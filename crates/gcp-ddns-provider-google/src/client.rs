//! Shared HTTP plumbing for the Google REST APIs
//!
//! Both providers authenticate the same way, share the same timeout and
//! map HTTP status codes to core errors identically.

use gcp_ddns_core::{Credentials, Error, Result};
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default HTTP timeout for API requests (30 seconds)
pub(crate) const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request
const USER_AGENT: &str = concat!("gcp-ddns/", env!("CARGO_PKG_VERSION"));

/// Authenticated JSON client bound to one API base URL
#[derive(Debug, Clone)]
pub(crate) struct ApiClient {
    /// Provider name used in error messages
    provider: &'static str,

    /// API base URL, without trailing slash
    base_url: String,

    /// Credential pair; the key is sent as a bearer token
    /// ⚠️ NEVER log the key
    credentials: Credentials,

    /// HTTP client for API requests
    http: reqwest::Client,
}

impl ApiClient {
    pub(crate) fn new(
        provider: &'static str,
        base_url: &str,
        credentials: Credentials,
    ) -> Result<Self> {
        credentials.validate()?;

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            provider,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            http,
        })
    }

    pub(crate) fn set_base_url(&mut self, base_url: &str) {
        self.base_url = base_url.trim_end_matches('/').to_string();
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn user_id(&self) -> &str {
        &self.credentials.user_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a JSON document
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        context: &str,
    ) -> Result<T> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.credentials.key)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::http(format!("{}: request failed: {}", context, e)))?;

        self.decode(response, context).await
    }

    /// GET every page of a paginated listing
    ///
    /// `split` turns one page into its items and the next page token.
    pub(crate) async fn get_all_pages<P, T, F>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        context: &str,
        split: F,
    ) -> Result<Vec<T>>
    where
        P: DeserializeOwned,
        F: Fn(P) -> (Vec<T>, Option<String>),
    {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page: P = {
                let mut params: Vec<(&str, &str)> = query.to_vec();
                if let Some(ref token) = page_token {
                    params.push(("pageToken", token.as_str()));
                }
                self.get_json(path, &params, context).await?
            };
            let (mut batch, next) = split(page);
            items.append(&mut batch);

            match next {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(items)
    }

    /// POST a JSON body and decode the JSON response
    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        context: &str,
    ) -> Result<T> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.credentials.key)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::http(format!("{}: request failed: {}", context, e)))?;

        self.decode(response, context).await
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        context: &str,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(status_error(self.provider, status, &error_text, context));
        }

        response.json::<T>().await.map_err(|e| {
            Error::provider(
                self.provider,
                format!("{}: failed to parse response: {}", context, e),
            )
        })
    }
}

/// Map a non-success HTTP status to a core error
pub(crate) fn status_error(
    provider: &str,
    status: StatusCode,
    error_text: &str,
    context: &str,
) -> Error {
    match status.as_u16() {
        401 | 403 => Error::auth(format!(
            "{}: invalid credentials or insufficient permissions. Status: {}",
            context, status
        )),
        404 => Error::not_found(format!("{}: {}", context, error_text)),
        409 => Error::provider(
            provider,
            format!("{}: conflict (record set already exists?). Status: {}", context, status),
        ),
        429 => Error::rate_limited(format!(
            "{}: rate limit exceeded. Status: {}",
            context, status
        )),
        500..=599 => Error::provider(
            provider,
            format!("{}: server error (transient): {} - {}", context, status, error_text),
        ),
        _ => Error::provider(
            provider,
            format!("{}: {} - {}", context, status, error_text),
        ),
    }
}
