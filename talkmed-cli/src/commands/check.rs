use std::process::ExitCode;

use anyhow::Result;
use talkmed_client::TalkMedClient;
use tracing::info;

/// Probe the search endpoint and report whether it answered
pub async fn execute(client: &TalkMedClient) -> Result<ExitCode> {
    let api = client.api_info();
    println!("API base URL: {}", api.base_url);
    println!("Search endpoint: {}", api.endpoint);

    if client.test_connection().await {
        info!("Connection check succeeded");
        println!("Connection OK");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("Connection failed, see the log output above for details");
        Ok(ExitCode::FAILURE)
    }
}
