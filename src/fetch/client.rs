use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes HTTP requests for the feed fetcher; wrappers layer auth on top.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
