//! taxcn CLI
//!
//! Loads (or creates) the profile and prints the monthly withholding table

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use taxcn::profile::{load_or_init, JsonFileStore};
use taxcn::projection::ProjectionEngine;
use taxcn::report;

/// Project monthly income tax and take-home pay from ~/TaxcnSrc.json.
///
/// The profile is created with starter values on first run; edit it to
/// change salary, bonus, insurance or deductions. Set TAXCN_PROFILE to use
/// another file and RUST_LOG for diagnostics.
#[derive(Debug, Parser)]
#[command(name = "taxcn", version, about)]
struct Cli {}

fn main() -> Result<()> {
    env_logger::init();
    let _cli = Cli::parse();

    let store = JsonFileStore::from_env().context("Unable to locate profile")?;
    info!("Using profile {}", store.path().display());

    let profile = load_or_init(&store).context("Unable to load profile")?;

    let engine = ProjectionEngine::new(profile);

    let stdout = std::io::stdout();
    let summary = report::write_table(&mut stdout.lock(), engine.rows())
        .context("Unable to write report")?;

    info!(
        "Projected {} months: tax withheld {:.2}, net income {:.2}",
        summary.total_months, summary.total_tax_withheld, summary.total_net_income
    );

    Ok(())
}
