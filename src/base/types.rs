use std::fmt;

use serde::{Deserialize, Serialize};

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// The bot's own user ID, resolved once after the transport connects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity(String);

impl BotIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self(user_id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BotIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One item from the real-time transport.
///
/// Only plain `message` events (no `subtype`) are ever acted upon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
}

impl ChatEvent {
    /// Whether this is a user-authored message, as opposed to edits, joins, bot posts, etc.
    pub fn is_plain_message(&self) -> bool {
        self.kind == "message" && self.subtype.is_none()
    }
}

/// A command addressed to the bot, along with the channel to reply in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotCommand {
    pub text: String,
    pub channel: String,
}

/// One scraped restaurant candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: String,
    pub name: String,
}

/// The search string sent to the restaurant search page (e.g. `강남 맛집`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Derive a query from a command, if the command contains the trigger keyword.
    ///
    /// The location is whatever precedes the first occurrence of the keyword.
    pub fn from_command(command: &str, keyword: &str) -> Option<Self> {
        if keyword.is_empty() || !command.contains(keyword) {
            return None;
        }

        let location = command.split(keyword).next().unwrap_or_default().trim();

        if location.is_empty() {
            return Some(Self(keyword.to_string()));
        }

        Some(Self(format!("{location} {keyword}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key under `businesses` that the search page files this query's results under.
    pub fn bucket_key(&self) -> String {
        format!("[query:{}]", self.0)
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_search_query_from_command() {
        let query = SearchQuery::from_command("강남 맛집", "맛집").unwrap();

        assert_eq!(query.as_str(), "강남 맛집");
        assert_eq!(query.bucket_key(), "[query:강남 맛집]");
    }

    #[test]
    fn test_search_query_uses_text_before_first_keyword() {
        let query = SearchQuery::from_command("홍대 맛집 말고 이태원 맛집", "맛집").unwrap();

        assert_eq!(query.as_str(), "홍대 맛집");
    }

    #[test]
    fn test_search_query_keyword_mid_word() {
        let query = SearchQuery::from_command("을지로맛집 알려줘", "맛집").unwrap();

        assert_eq!(query.as_str(), "을지로 맛집");
    }

    #[test]
    fn test_search_query_without_location() {
        let query = SearchQuery::from_command("맛집", "맛집").unwrap();

        assert_eq!(query.as_str(), "맛집");
    }

    #[test]
    fn test_search_query_no_keyword() {
        assert!(SearchQuery::from_command("안녕", "맛집").is_none());
        assert!(SearchQuery::from_command("", "맛집").is_none());
    }

    #[test]
    fn test_chat_event_deserialize() {
        let event: ChatEvent = serde_json::from_value(json!({
            "type": "message",
            "user": "U54321",
            "text": "<@U123> 강남 맛집",
            "channel": "C1",
            "ts": "1234567890.123456",
        }))
        .unwrap();

        assert!(event.is_plain_message());
        assert_eq!(event.text.as_deref(), Some("<@U123> 강남 맛집"));
        assert_eq!(event.channel.as_deref(), Some("C1"));
    }

    #[test]
    fn test_chat_event_with_subtype_is_not_plain() {
        let event: ChatEvent = serde_json::from_value(json!({
            "type": "message",
            "subtype": "message_changed",
            "channel": "C1",
        }))
        .unwrap();

        assert!(!event.is_plain_message());
        assert!(event.text.is_none());
    }
}
