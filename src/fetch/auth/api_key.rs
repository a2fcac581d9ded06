use crate::fetch::client::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};

/// Header the MTA realtime API reads the key from.
pub const X_API_KEY: &str = "x-api-key";

/// An [`HttpClient`] wrapper that injects an API key as an HTTP header.
///
/// The header name and value are validated up front so sending never fails on
/// a malformed key.
pub struct ApiKey<C> {
    inner: C,
    header_name: HeaderName,
    key: HeaderValue,
}

impl<C> ApiKey<C> {
    pub fn new(inner: C, header_name: &str, key: &str) -> Result<Self> {
        let header_name = HeaderName::from_bytes(header_name.as_bytes())
            .with_context(|| format!("invalid API key header name '{header_name}'"))?;
        let mut key = HeaderValue::from_str(key).context("API key is not a valid header value")?;
        key.set_sensitive(true);

        Ok(Self {
            inner,
            header_name,
            key,
        })
    }

    /// Sends the key as `x-api-key: <key>`.
    pub fn x_api_key(inner: C, key: &str) -> Result<Self> {
        Self::new(inner, X_API_KEY, key)
    }

    pub fn header_name(&self) -> &HeaderName {
        &self.header_name
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut()
            .insert(self.header_name.clone(), self.key.clone());
        self.inner.execute(req).await
    }
}
