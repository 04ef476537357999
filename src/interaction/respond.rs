//! Sends the bot's reply for a handled command.

use tracing::instrument;

use crate::{
    base::{
        replies::{self, HELP_REPLY, UNAVAILABLE_REPLY},
        types::{ResultRecord, Void},
    },
    service::chat::ChatClient,
};

/// What the bot is going to say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The command was not a recommendation request (or nothing was found).
    Help,
    /// A recommendation for the given record.
    Recommendation(ResultRecord),
    /// The search page could not be fetched or understood.
    Unavailable,
}

impl Reply {
    /// The message text for this reply.
    pub fn text(&self, detail_url: &str) -> String {
        match self {
            Reply::Help => HELP_REPLY.to_string(),
            Reply::Recommendation(record) => replies::recommendation_reply(record, detail_url),
            Reply::Unavailable => UNAVAILABLE_REPLY.to_string(),
        }
    }
}

/// Send `reply` to `channel`.
///
/// Delivery is not retried; a transport error is returned to the caller.
#[instrument(skip(chat, detail_url))]
pub async fn respond(chat: &ChatClient, channel: &str, reply: &Reply, detail_url: &str) -> Void {
    chat.send_message(channel, &reply.text(detail_url)).await
}

// Tests.
