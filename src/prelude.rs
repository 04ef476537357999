pub use crate::base::{
    config::Config,
    types::{BotIdentity, Err, Res, Void},
};
pub use anyhow::anyhow;
pub use tracing::{debug, error, info, instrument, warn};
