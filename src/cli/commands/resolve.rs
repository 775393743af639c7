//! Resolve command handler

use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_resolve(config: Config, query: &str) -> anyhow::Result<()> {
    let shared = SharedState::new(config).await?;

    match shared.location_service.resolve(query).await {
        Ok(location) => {
            println!("{}", serde_json::to_string_pretty(&location)?);
            Ok(())
        }
        Err(e) => {
            println!("Could not resolve \"{query}\": {e}");
            Err(e.into())
        }
    }
}
