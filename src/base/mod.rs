//! Core components, types, and utilities for the matjip-bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Reply texts sent back to chat channels.
//! - Common types and result handling.

pub mod config;
pub mod replies;
pub mod types;
