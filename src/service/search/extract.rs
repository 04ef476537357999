//! Extraction of result records from the search page HTML.
//!
//! The page embeds its data as a JS assignment (`var x = {...};`) inside one
//! of its `<script>` blocks. Which block is a positional contract with the
//! site, so it is passed in as `index` rather than hard-coded here. Blocks
//! are counted on the parsed document, so commented-out markup is skipped.

use std::{collections::HashMap, sync::LazyLock};

use scraper::{Html, Selector};
use serde::Deserialize;

use crate::base::types::{ResultRecord, SearchQuery};

use super::CrawlingError;

static SCRIPT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("script").expect("script selector is valid"));

// Payload schema.

#[derive(Debug, Deserialize)]
struct Payload {
    businesses: HashMap<String, Bucket>,
}

#[derive(Debug, Deserialize)]
struct Bucket {
    items: Vec<ResultRecord>,
}

// Functions.

/// The bodies of every `<script>` block, in document order.
pub fn script_blocks(html: &str) -> Vec<String> {
    Html::parse_document(html).select(&SCRIPT_SELECTOR).map(|e| e.text().collect::<String>()).collect()
}

/// The right-hand side of the assignment in the `index`-th script block.
pub fn embedded_payload(html: &str, index: usize) -> Result<String, CrawlingError> {
    let scripts = script_blocks(html);

    let script = scripts.get(index).ok_or(CrawlingError::MissingScript { index, found: scripts.len() })?;
    let (_, payload) = script.split_once('=').ok_or(CrawlingError::MissingAssignment)?;

    Ok(payload.to_string())
}

/// Pull at most `limit` records for `query` out of the search page.
pub fn extract_records(html: &str, query: &SearchQuery, index: usize, limit: usize) -> Result<Vec<ResultRecord>, CrawlingError> {
    let payload = embedded_payload(html, index)?;

    // Only the first JSON value matters; a trailing `;` or more script may follow it.
    let mut stream = serde_json::Deserializer::from_str(&payload).into_iter::<Payload>();
    let payload = match stream.next() {
        Some(parsed) => parsed?,
        None => return Err(CrawlingError::MissingAssignment),
    };

    let key = query.bucket_key();
    let mut businesses = payload.businesses;
    let bucket = businesses.remove(&key).ok_or(CrawlingError::MissingBucket { key })?;

    Ok(bucket.items.into_iter().take(limit).collect())
}

// Tests.
