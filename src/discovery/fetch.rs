// src/discovery/fetch.rs
use async_trait::async_trait;
use reqwest::header;

use super::DocumentFetcher;
use crate::corpus::SourceLocation;
use crate::utils::error::FetchError;

// Some investor-relations CDNs reject requests without a browser-like agent.
const DOWNLOAD_USER_AGENT: &str = "Mozilla/5.0 (compatible; earnings-digest/0.1)";

/// Creates a reqwest client configured for document downloads.
pub fn build_download_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(DOWNLOAD_USER_AGENT)
        .timeout(std::time::Duration::from_secs(20))
        .build()
}

/// Reads local paths from disk and downloads URLs over HTTP.
pub struct LocalFetcher {
    client: reqwest::Client,
}

impl LocalFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self {
            client: build_download_client()?,
        })
    }
}

/// Downloads a document from its URL, mapping non-2xx statuses to errors.
pub async fn download(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, FetchError> {
    tracing::info!("Downloading document from: {}", url);

    let response = client
        .get(url)
        .header(header::ACCEPT, "application/pdf,*/*")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        return Err(FetchError::Http(status));
    }

    let body = response.bytes().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);
    Ok(body.to_vec())
}

#[async_trait]
impl DocumentFetcher for LocalFetcher {
    async fn fetch(&self, location: &SourceLocation) -> Result<Vec<u8>, FetchError> {
        match location {
            SourceLocation::Path(path) => match tokio::fs::read(path).await {
                Ok(bytes) => Ok(bytes),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    Err(FetchError::NotFound(path.display().to_string()))
                }
                Err(e) => Err(FetchError::Io(e)),
            },
            SourceLocation::Url(url) => download(&self.client, url).await,
        }
    }
}
