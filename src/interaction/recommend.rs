//! Turns a command into a restaurant recommendation.

use rand::prelude::IndexedRandom;
use tracing::{info, instrument, warn};

use crate::{
    base::{
        config::Config,
        types::{ResultRecord, SearchQuery, Void},
    },
    interaction::respond::{Reply, respond},
    service::{chat::ChatClient, search::SearchClient},
};

/// Handle one command addressed to the bot, sending exactly one reply to `channel`.
///
/// Commands without the trigger keyword get the help text, and no search is made.
/// A failed search is logged and answered with an apology instead of aborting the loop.
#[instrument(skip(config, search, chat))]
pub async fn handle_command(command: &str, channel: &str, config: &Config, search: &SearchClient, chat: &ChatClient) -> Void {
    let reply = match SearchQuery::from_command(command, &config.trigger_keyword) {
        Some(query) => recommend(&query, search).await,
        None => Reply::Help,
    };

    respond(chat, channel, &reply, &config.detail_url).await
}

/// Search for `query` and pick one of the results.
async fn recommend(query: &SearchQuery, search: &SearchClient) -> Reply {
    match search.search(query).await {
        Ok(records) => match pick(&records) {
            Some(record) => {
                info!("Recommending `{}` for `{}`.", record.name, query);
                Reply::Recommendation(record.clone())
            }
            None => {
                warn!("No results for `{}`; falling back to help.", query);
                Reply::Help
            }
        },
        Err(err) => {
            warn!("Search for `{}` failed: {}", query, err);
            Reply::Unavailable
        }
    }
}

/// Choose one record uniformly at random, or `None` if there are none.
pub fn pick(records: &[ResultRecord]) -> Option<&ResultRecord> {
    records.choose(&mut rand::rng())
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> ResultRecord {
        ResultRecord {
            id: id.to_string(),
            name: format!("Name {id}"),
        }
    }

    #[test]
    fn test_pick_empty() {
        assert!(pick(&[]).is_none());
    }

    #[test]
    fn test_pick_single() {
        let records = vec![record("1")];

        assert_eq!(pick(&records), Some(&records[0]));
    }

    #[test]
    fn test_pick_is_from_the_list() {
        let records = (0..30).map(|i| record(&i.to_string())).collect::<Vec<_>>();

        for _ in 0..100 {
            let chosen = pick(&records).unwrap();
            assert!(records.contains(chosen));
        }
    }
}
