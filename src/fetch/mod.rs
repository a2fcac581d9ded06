mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use tracing::debug;

/// GETs `url` and returns the body; a non-success status is an error.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse::<reqwest::Url>().with_context(|| format!("invalid feed URL '{url}'"))?,
    );

    let resp = client.execute(req).await?.error_for_status()?;
    let bytes = resp.bytes().await?;
    debug!(bytes = bytes.len(), "Feed body received");

    Ok(bytes.to_vec())
}

/// Reads a saved snapshot from disk, or fetches it through `client` when
/// `source` is an HTTP(S) URL.
pub async fn load_source<C: HttpClient>(client: &C, source: &str) -> Result<Vec<u8>> {
    if source.starts_with("http") {
        fetch_bytes(client, source).await
    } else {
        std::fs::read(source).with_context(|| format!("reading snapshot '{source}'"))
    }
}
