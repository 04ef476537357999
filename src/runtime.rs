//! Runtime services and the poll loop for the matjip-bot.

use crate::{
    base::replies::{CONNECT_FAILED_STATUS, CONNECTED_STATUS},
    interaction::{command::parse_bot_commands, recommend::handle_command},
    prelude::*,
    service::{chat::ChatClient, search::SearchClient},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the chat client, search client, and configuration.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The chat client instance.
    pub chat: ChatClient,
    /// The restaurant search client instance.
    pub search: SearchClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        // Initialize the chat client.
        let chat = ChatClient::slack(&config)?;

        // Initialize the search client.
        let search = SearchClient::naver(&config)?;

        Ok(Self { config, chat, search })
    }

    /// Connect, then poll for commands until Ctrl-C.
    ///
    /// A failed connection is reported and ends the run without an error.
    pub async fn start(&self) -> Void {
        let identity = match self.chat.connect().await {
            Ok(identity) => identity,
            Err(err) => {
                error!("{} ({})", CONNECT_FAILED_STATUS, err);
                return Ok(());
            }
        };

        info!("{}", CONNECTED_STATUS);

        tokio::select! {
            _ = self.poll(&identity) => {}
            result = tokio::signal::ctrl_c() => {
                result?;
                info!("Shutting down ...");
            }
        }

        Ok(())
    }

    /// Run poll cycles forever, sleeping the configured interval between them.
    async fn poll(&self, identity: &BotIdentity) {
        loop {
            if let Err(err) = self.run_cycle(identity).await {
                error!("Error while handling: {}", err);
            }

            tokio::time::sleep(self.config.poll_interval()).await;
        }
    }

    /// One poll cycle: read a batch, find a command for the bot, and handle it.
    ///
    /// Returns whether a command was handled.
    #[instrument(skip_all)]
    pub async fn run_cycle(&self, identity: &BotIdentity) -> Res<bool> {
        let events = match tokio::time::timeout(self.config.read_timeout(), self.chat.read_events()).await {
            Ok(events) => events?,
            Err(_) => {
                warn!("Timed out reading events.");
                return Ok(false);
            }
        };

        let Some(command) = parse_bot_commands(&events, identity) else {
            return Ok(false);
        };

        debug!("Received command `{}` in {}.", command.text, command.channel);

        handle_command(&command.text, &command.channel, &self.config, &self.search, &self.chat).await?;

        Ok(true)
    }
}
