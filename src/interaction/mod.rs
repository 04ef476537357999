//! Event handling and user interactions for matjip-bot.
//!
//! This module provides functionality for handling chat events:
//! - Recognizing direct mentions of the bot
//! - Picking the command out of a batch of events
//! - Searching for a recommendation and replying to the channel

pub mod command;
pub mod mention;
pub mod recommend;
pub mod respond;
