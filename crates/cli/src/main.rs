// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! caseport: Import a test-management project export into a remote service.

use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use cprs::cli::Cli;
use cprs::client::HttpRemoteService;
use cprs::config::Config;
use cprs::import::{run_import, ImportOptions};
use cprs::source::FsExportSource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = Config::load(&cli.config)?;
    config.apply_overrides(&cli);
    config.validate()?;

    info!("Starting caseport import");
    info!("  Remote: {}", config.remote.url);
    info!("  Export: {}", config.source.export_dir.display());

    let remote = HttpRemoteService::new(&config.remote.url, &config.remote.token)?;
    let source = FsExportSource::new(&config.source.export_dir);
    let options = ImportOptions::from(&config);

    let report = run_import(&source, &remote, &options).await?;

    info!(
        "Imported {} sections, {} attributes, {} shared steps, {} test cases",
        report.sections, report.attributes, report.shared_steps, report.test_cases
    );
    if !report.not_imported.is_empty() {
        warn!("{} test cases were not imported:", report.not_imported.len());
        for name in &report.not_imported {
            warn!("  {name}");
        }
    }

    Ok(())
}
