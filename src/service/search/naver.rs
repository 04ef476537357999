//! Restaurant search backed by the Naver store search page.

use std::sync::Arc;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, instrument};

use crate::base::{
    config::Config,
    types::{Res, ResultRecord, SearchQuery},
};

use super::{CrawlingError, GenericSearchClient, SearchClient, extract};

/// Bytes left unescaped in the query: alphanumerics and `_.-~/`; a space becomes `%20`.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'_').remove(b'.').remove(b'-').remove(b'~').remove(b'/');

// Extra methods on `SearchClient` applied by the naver implementation.

impl SearchClient {
    /// Creates a new search client that scrapes the configured search page.
    pub fn naver(config: &Config) -> Res<Self> {
        let client = NaverSearchClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }
}

// Specific implementations.

/// Naver search client implementation.
#[derive(Clone)]
pub struct NaverSearchClient {
    http: reqwest::Client,
    config: Config,
}

impl NaverSearchClient {
    /// Create a new Naver search client.
    #[instrument(name = "NaverSearchClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let http = reqwest::Client::builder().timeout(config.fetch_timeout()).build()?;

        Ok(Self { http, config: config.clone() })
    }

    /// The search page URL for `query`.
    pub fn search_url(&self, query: &SearchQuery) -> String {
        format!("{}{}", self.config.search_url, utf8_percent_encode(query.as_str(), QUERY_ENCODE_SET))
    }

    /// Fetch the raw search page HTML.
    #[instrument(name = "NaverSearchClient::fetch", skip(self))]
    async fn fetch(&self, query: &SearchQuery) -> Result<String, CrawlingError> {
        let response = self.http.get(self.search_url(query)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlingError::Status(status));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl GenericSearchClient for NaverSearchClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &SearchQuery) -> Result<Vec<ResultRecord>, CrawlingError> {
        let html = self.fetch(query).await?;
        let records = extract::extract_records(&html, query, self.config.script_index, self.config.result_limit)?;

        debug!("Extracted {} records for `{}`.", records.len(), query);

        Ok(records)
    }
}

// Tests.
