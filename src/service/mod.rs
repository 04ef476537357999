//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for the services used by the matjip-bot:
//! - Chat services (e.g., Slack)
//! - Restaurant search services (e.g., the Naver store search page)
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod chat;
pub mod search;
