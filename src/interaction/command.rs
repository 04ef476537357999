//! Picks out the command addressed to the bot from a batch of events.

use tracing::debug;

use crate::{
    base::types::{BotCommand, BotIdentity, ChatEvent},
    interaction::mention::parse_direct_mention,
};

/// Scans a batch of events, in order, for a plain message that opens by mentioning the bot.
///
/// The first match wins; the rest of the batch is not inspected. Events with a `subtype`,
/// events mentioning someone else, and events missing text or a channel are skipped.
pub fn parse_bot_commands(events: &[ChatEvent], identity: &BotIdentity) -> Option<BotCommand> {
    for event in events {
        if !event.is_plain_message() {
            continue;
        }

        let (Some(text), Some(channel)) = (event.text.as_deref(), event.channel.as_deref()) else {
            debug!("Skipping message event without text or channel.");
            continue;
        };

        let Some(mention) = parse_direct_mention(text) else {
            continue;
        };

        if mention.user_id == identity.as_str() {
            return Some(BotCommand {
                text: mention.remainder.to_string(),
                channel: channel.to_string(),
            });
        }
    }

    None
}

// Tests.
