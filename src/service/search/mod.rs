pub mod extract;
pub mod naver;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;

use crate::base::types::{ResultRecord, SearchQuery};

// Errors.

/// Failures while fetching or picking apart the search page.
#[derive(Error, Debug)]
pub enum CrawlingError {
    #[error("Failed to fetch search page: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Search page returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Expected a <script> block at index {index}, but the page only has {found}")]
    MissingScript { index: usize, found: usize },

    #[error("Script block does not contain an `=` assignment")]
    MissingAssignment,

    #[error("Embedded payload does not match the expected shape: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Embedded payload has no bucket `{key}`")]
    MissingBucket { key: String },
}

// Traits.

/// Generic restaurant search trait that clients must implement.
///
/// Implementations own everything between a query and the records: the fetch,
/// the page layout assumptions, and the payload schema.
#[async_trait]
pub trait GenericSearchClient: Send + Sync + 'static {
    /// Return the top results for `query`, best first.
    ///
    /// An empty list means the page was understood but had no results.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<ResultRecord>, CrawlingError>;
}

// Structs.

/// Search client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct SearchClient {
    inner: Arc<dyn GenericSearchClient>,
}

impl Deref for SearchClient {
    type Target = dyn GenericSearchClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl SearchClient {
    pub fn new(inner: Arc<dyn GenericSearchClient>) -> Self {
        Self { inner }
    }
}
