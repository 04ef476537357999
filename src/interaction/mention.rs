//! Direct-mention parsing.

use std::sync::LazyLock;

use regex::Regex;

/// A user mention (`<@U…>` or `<@W…>`) that opens the message, followed by the rest of the text.
static MENTION_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)^<@(|[WU].+?)>(.*)").expect("mention regex is valid"));

/// A message that opens with a direct mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectMention<'a> {
    /// The mentioned user ID.
    pub user_id: &'a str,
    /// Everything after the mention, trimmed.
    pub remainder: &'a str,
}

/// Finds a direct mention at the very start of `text`.
///
/// Returns `None` when the text does not open with a mention, which is the common case for ordinary chatter.
pub fn parse_direct_mention(text: &str) -> Option<DirectMention<'_>> {
    let captures = MENTION_REGEX.captures(text)?;

    let user_id = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let remainder = captures.get(2).map(|m| m.as_str().trim()).unwrap_or_default();

    Some(DirectMention { user_id, remainder })
}

// Tests.
