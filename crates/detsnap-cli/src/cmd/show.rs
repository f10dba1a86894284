//! Show subcommand - print a single detector as YAML

use anyhow::{Context, Result};
use clap::Args;

use detsnap_signalfx::Client;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Detector ID
    pub id: String,

    /// Strip server-managed fields, as the export would
    #[arg(long)]
    pub clean: bool,
}

pub fn run(args: ShowArgs, config: &Config) -> Result<()> {
    let token = config.api.token.clone().ok_or_else(|| {
        anyhow::anyhow!("no API token; pass --token, set SFX_TOKEN, or add it to detsnap.toml")
    })?;

    let client = Client::new(&token, &config.api.realm);
    let detector = client.get_detector(&args.id)?;

    let yaml = if args.clean {
        serde_yaml::to_string(&detsnap_signalfx::clean_detector(&detector))
    } else {
        serde_yaml::to_string(&detector)
    }
    .context("cannot serialize detector")?;
    print!("{yaml}");
    Ok(())
}
