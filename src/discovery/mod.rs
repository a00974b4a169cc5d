// src/discovery/mod.rs
pub mod fetch;
pub mod folders;
pub mod harvest;

use async_trait::async_trait;

use crate::corpus::{Document, SourceLocation};
use crate::utils::error::{DiscoveryError, FetchError};

pub use fetch::LocalFetcher;
pub use folders::{company_from_folder, FolderSource};

/// Produces the full, unordered set of documents for a run.
pub trait DocumentSource {
    fn list(&self) -> Result<Vec<Document>, DiscoveryError>;
}

/// Turns a document locator into its raw bytes.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, location: &SourceLocation) -> Result<Vec<u8>, FetchError>;
}
