//! Export subcommand - write all detectors as YAML files

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output directory for YAML documents
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Maximum number of detectors to export
    #[arg(short = 'l', long)]
    pub limit: Option<usize>,
}

/// Print a key-value summary table on stderr
fn print_summary(title: &str, rows: &[(&str, String)]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new(title).fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    eprintln!("\n{table}");
}

pub fn run(args: ExportArgs, config: &Config) -> Result<()> {
    let token = config.api.token.clone().ok_or_else(|| {
        anyhow::anyhow!("no API token; pass --token, set SFX_TOKEN, or add it to detsnap.toml")
    })?;
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| config.output.default_dir.clone());

    let sfx_config = detsnap_signalfx::Config {
        token,
        realm: config.api.realm.clone(),
        output_dir: output_dir.clone(),
        limit: args.limit,
    };

    log::info!("Exporting detectors");
    log::info!("  Realm: {}", sfx_config.realm);
    log::info!("  Output: {}", output_dir.display());
    if let Some(limit) = args.limit {
        log::info!("  Limit: {limit}");
    }

    let summary = detsnap_signalfx::run(&sfx_config)?;

    if summary.is_empty() {
        eprintln!("\nNo detectors found.");
        return Ok(());
    }

    print_summary(
        "Export",
        &[
            (
                "Detectors",
                format!(
                    "{}/{} ({} failed)",
                    summary.exported, summary.total_detectors, summary.failed
                ),
            ),
            (
                "Summary file",
                summary
                    .summary_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            ("Time", format!("{:.1}s", summary.elapsed.as_secs_f64())),
        ],
    );

    // Individual export failures are logged and counted but do not fail
    // the run; only a fully failed fetch does.
    Ok(())
}
