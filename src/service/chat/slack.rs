//! Slack implementation of the chat transport.
//!
//! Events arrive over a Socket Mode connection and are buffered until the
//! poll loop reads them, so the bot still processes one batch at a time.
//! Replies go out through `chat.postMessage`.

use crate::base::{
    config::Config,
    types::{BotIdentity, ChatEvent, Res, Void},
};
use async_trait::async_trait;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use slack_morphism::prelude::*;
use tokio::sync::{
    Mutex,
    mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
};
use tracing::{debug, info, instrument};

use std::sync::Arc;

use super::{ChatClient, GenericChatClient};

// Type aliases.

type FullClient = slack_morphism::SlackClient<SlackClientHyperConnector<HttpsConnector<HttpConnector>>>;
type Listener = SlackClientSocketModeListener<SlackClientHyperConnector<HttpsConnector<HttpConnector>>>;

// Extra methods on `ChatClient` applied by the slack implementation.

impl ChatClient {
    /// Creates a new Slack chat client.
    pub fn slack(config: &Config) -> Res<Self> {
        let client = SlackChatClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }
}

// Structs.

/// User state for the slack socket client.
struct SlackUserState {
    events: UnboundedSender<ChatEvent>,
}

/// Slack client implementation.
struct SlackChatClient {
    app_token: SlackApiToken,
    bot_token: SlackApiToken,
    client: Arc<FullClient>,
    events_tx: UnboundedSender<ChatEvent>,
    events_rx: Mutex<UnboundedReceiver<ChatEvent>>,
    listener: Mutex<Option<Arc<Listener>>>,
}

impl SlackChatClient {
    /// Create a new Slack chat client.
    #[instrument(name = "SlackChatClient::new", skip_all)]
    fn new(config: &Config) -> Res<Self> {
        // Initialize tokens.

        let app_token = SlackApiToken::new(SlackApiTokenValue(config.slack_app_token.clone()));
        let bot_token = SlackApiToken::new(SlackApiTokenValue(config.slack_bot_token.clone()));

        // Initialize the Slack client.

        let https_connector = HttpsConnector::<HttpConnector>::builder().with_native_roots()?.https_only().enable_all_versions().build();
        let connector = SlackClientHyperConnector::with_connector(https_connector);
        let client = Arc::new(slack_morphism::SlackClient::new(connector));

        let (events_tx, events_rx) = unbounded_channel();

        Ok(Self {
            app_token,
            bot_token,
            client,
            events_tx,
            events_rx: Mutex::new(events_rx),
            listener: Mutex::new(None),
        })
    }
}

#[async_trait]
impl GenericChatClient for SlackChatClient {
    #[instrument(skip(self))]
    async fn connect(&self) -> Res<BotIdentity> {
        // Initialize the socket mode listener.

        let socket_mode_callbacks = SlackSocketModeListenerCallbacks::new().with_push_events(handle_push_event);

        let listener_environment = Arc::new(SlackClientEventsListenerEnvironment::new(self.client.clone()).with_user_state(SlackUserState { events: self.events_tx.clone() }));

        let socket_mode_listener = Arc::new(SlackClientSocketModeListener::new(
            &SlackClientSocketModeConfig::new(),
            listener_environment,
            socket_mode_callbacks,
        ));

        // Register the app token, and open the WS connections in the background.
        socket_mode_listener.listen_for(&self.app_token).await?;
        socket_mode_listener.start().await;

        *self.listener.lock().await = Some(socket_mode_listener);

        // Get the bot's user ID.

        let session = self.client.open_session(&self.bot_token);
        let bot_user = session.auth_test().await?;
        let identity = BotIdentity::new(bot_user.user_id.0);

        info!("Slack bot user ID: {}", identity);

        Ok(identity)
    }

    async fn read_events(&self) -> Res<Vec<ChatEvent>> {
        let mut receiver = self.events_rx.lock().await;
        let mut batch = Vec::new();

        while let Ok(event) = receiver.try_recv() {
            batch.push(event);
        }

        Ok(batch)
    }

    #[instrument(skip(self, text))]
    async fn send_message(&self, channel_id: &str, text: &str) -> Void {
        let message = SlackMessageContent::new().with_text(text.to_string());
        let request = SlackApiChatPostMessageRequest::new(SlackChannelId(channel_id.to_string()), message);

        let session = self.client.open_session(&self.bot_token);

        session.chat_post_message(&request).await.map_err(|e| anyhow::anyhow!("Failed to send message: {}", e))?;

        Ok(())
    }
}

// Conversions.

/// Flattens a Slack message event into the fields the command filter looks at.
fn chat_event_from_message(event: &SlackMessageEvent) -> ChatEvent {
    ChatEvent {
        kind: "message".to_string(),
        subtype: event.subtype.as_ref().map(subtype_name),
        text: event.content.as_ref().and_then(|c| c.text.clone()),
        channel: event.origin.channel.as_ref().map(|c| c.0.clone()),
    }
}

/// The wire name of a message subtype (e.g. `message_changed`).
fn subtype_name(subtype: &SlackMessageEventType) -> String {
    serde_json::to_value(subtype)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("{subtype:?}"))
}

// Socket mode listener callbacks for Slack.

/// Handles push events from Slack by buffering message events for the poll loop.
#[instrument(skip_all)]
async fn handle_push_event(event_callback: SlackPushEventCallback, _client: Arc<SlackHyperClient>, states: SlackClientEventsUserState) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let states = states.read().await;
    let user_state = states.get_user_state::<SlackUserState>().ok_or(anyhow::anyhow!("Failed to get user state"))?;

    match event_callback.event {
        SlackEventCallbackBody::Message(slack_message_event) => {
            debug!("Received message event ...");
            user_state.events.send(chat_event_from_message(&slack_message_event))?;
        }
        _ => {
            debug!("Ignoring non-message push event.")
        }
    }

    Ok(())
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtype_name_uses_wire_name() {
        assert_eq!(subtype_name(&SlackMessageEventType::MessageChanged), "message_changed");
        assert_eq!(subtype_name(&SlackMessageEventType::BotMessage), "bot_message");
    }
}
