//! detsnap - Export Splunk Observability Cloud detectors to YAML
//!
//! Pulls every detector definition from the SignalFx API and writes them
//! as version-controllable YAML documents, one file per detector.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "detsnap")]
#[command(about = "Export Splunk Observability Cloud detectors to YAML")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// SignalFx API token (overrides config file and SFX_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// SignalFx realm, e.g. us0, us1, eu0
    #[arg(short, long, global = true)]
    realm: Option<String>,

    /// Config file path (default: ./detsnap.toml or ~/.config/detsnap/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Export all detectors to YAML files
    Export(cmd::export::ExportArgs),
    /// Test API connectivity with a single-record request
    Check,
    /// Fetch one detector by ID and print it as YAML
    Show(cmd::show::ShowArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    detsnap_core::init_logging(cli.quiet, cli.verbose);

    // Load configuration
    let mut config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    // CLI flags override the config file
    if let Some(token) = cli.token {
        config.api.token = Some(token);
    }
    if let Some(realm) = cli.realm {
        config.api.realm = realm;
    }

    match cli.command {
        Command::Export(args) => cmd::export::run(args, &config),
        Command::Check => cmd::check::run(&config),
        Command::Show(args) => cmd::show::run(args, &config),
        Command::Config => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            table.add_row(vec!["Realm", &config.api.realm]);
            table.add_row(vec![
                "API base URL",
                &detsnap_signalfx::base_url_for_realm(&config.api.realm),
            ]);
            table.add_row(vec![
                "API token",
                if config.api.token.is_some() {
                    "configured"
                } else {
                    "not set"
                },
            ]);
            table.add_row(vec![
                "Output directory",
                &config.output.default_dir.display().to_string(),
            ]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
