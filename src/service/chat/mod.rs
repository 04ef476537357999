pub mod slack;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{BotIdentity, ChatEvent, Res, Void};

// Traits.

/// Generic "chat" trait that clients must implement.
///
/// This trait defines the real-time transport the bot polls: connect once,
/// read batches of pending events, and post replies back to channels.
#[async_trait]
pub trait GenericChatClient: Send + Sync + 'static {
    /// Connect to the chat platform and resolve the bot's own identity.
    ///
    /// Called exactly once, before the first read. The returned identity is
    /// what mentions are compared against for the lifetime of the process.
    async fn connect(&self) -> Res<BotIdentity>;

    /// Read every event received since the previous read.
    ///
    /// Returns an empty batch when nothing is pending.
    async fn read_events(&self) -> Res<Vec<ChatEvent>>;

    /// Send a message to a channel.
    async fn send_message(&self, channel_id: &str, text: &str) -> Void;
}

// Structs.

/// Chat client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient>,
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ChatClient {
    pub fn new(inner: Arc<dyn GenericChatClient>) -> Self {
        Self { inner }
    }
}
