//! blockport - Command-line entry point
//!
//! Exports a block from a JSON graph snapshot to the system clipboard.

use blockport::config::load_config;
use blockport::{BlockStore, ClipboardWriter, Dialect, Exporter, MemoryStore};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Application name constant.
const APP_NAME: &str = "blockport";

/// Copy an outliner block and its children to the clipboard.
#[derive(Debug, Parser)]
#[command(name = APP_NAME, version, about)]
struct Cli {
    /// Uid of the block to export
    uid: String,

    /// JSON snapshot mapping block uids to pull responses
    #[arg(short, long)]
    store: PathBuf,

    /// Target dialect: slack, whatsapp, googledocs or richtext
    #[arg(short, long)]
    dialect: Option<Dialect>,

    /// Fetch timeout in milliseconds (overrides the config file)
    #[arg(long)]
    timeout_ms: Option<u64>,
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    info!("Starting {}", APP_NAME);

    let mut settings = load_config();
    if cli.timeout_ms.is_some() {
        settings.fetch_timeout_ms = cli.timeout_ms;
        settings.sanitize();
    }
    let dialect = cli.dialect.unwrap_or(settings.default_dialect);

    let store: Option<Arc<dyn BlockStore>> = match MemoryStore::load(&cli.store) {
        Ok(store) => Some(Arc::new(store)),
        Err(e) => {
            eprintln!("{}", e);
            None
        }
    };

    let exporter = Exporter::from_settings(store, ClipboardWriter::system(), &settings);
    match exporter.export_node(&cli.uid, dialect) {
        Ok(report) => {
            println!("Block exported to {} format!", report.dialect);
            if report.dropped_children > 0 {
                println!(
                    "{} child block(s) could not be resolved and were left out.",
                    report.dropped_children
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error exporting to {} format: {}", dialect, e);
            ExitCode::FAILURE
        }
    }
}
