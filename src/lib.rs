//! Library root for `matjip-bot`.
//!
//! Matjip-bot is a Slack bot that recommends restaurants:
//! - Listens for messages that open by @-mentioning the bot
//! - Recognizes "<location> 맛집" requests
//! - Scrapes the restaurant search page for that location
//! - Replies with one of the top results, picked at random, and a detail link
//!
//! The architecture is built around small traits for the chat transport and
//! the search backend, so either can be swapped (or mocked) independently.

pub mod base;
pub mod interaction;
pub mod prelude;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the matjip-bot runtime:
/// - Initializes the crypto provider
/// - Creates the runtime context with chat and search clients
/// - Starts the poll loop for processing messages
pub async fn start(config: Config) -> Void {
    info!("Starting matjip-bot ...");

    // Start the crypto provider; a second install (e.g. in tests) is harmless.
    let _ = crypto::ring::default_provider().install_default();

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
