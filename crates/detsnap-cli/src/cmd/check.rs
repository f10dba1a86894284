//! Check subcommand - verify API connectivity and token

use anyhow::Result;

use detsnap_signalfx::Client;

use crate::config::Config;

pub fn run(config: &Config) -> Result<()> {
    let token = config.api.token.clone().ok_or_else(|| {
        anyhow::anyhow!("no API token; pass --token, set SFX_TOKEN, or add it to detsnap.toml")
    })?;

    let client = Client::new(&token, &config.api.realm);
    log::info!("Testing connection to {}", client.base_url());

    if client.probe() {
        eprintln!("Connection OK ({})", client.base_url());
        Ok(())
    } else {
        anyhow::bail!("connection test failed for {}", client.base_url())
    }
}
