pub mod check;
pub mod search;

use std::time::Duration;

use anyhow::Result;
use talkmed_client::{ClientConfig, TalkMedClient};

pub fn create_client(base_url: Option<&str>, timeout_secs: u64) -> Result<TalkMedClient> {
    let mut config = ClientConfig::new().with_timeout(Duration::from_secs(timeout_secs));

    if let Some(url) = base_url {
        config = config.with_base_url(url);
    }

    let client = TalkMedClient::with_config(config)?;
    Ok(client)
}
