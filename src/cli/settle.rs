//! Settlement command
//!
//! Computes balances, plans the payments that clear them, and prints or
//! exports the plan.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::config::Settings;
use crate::display::format_settlement_plan;
use crate::error::{ZenSplitError, ZenSplitResult};
use crate::export::{export_report_json, export_report_yaml, export_transfers_csv, SettlementReport};
use crate::models::Transfer;
use crate::services::LedgerReport;
use crate::storage::ExpenseStore;

/// Output format for a settlement plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SettleFormat {
    /// Human-readable table
    #[default]
    Text,
    /// CSV (transfers only)
    Csv,
    /// JSON (balances, transfers and diagnostics)
    Json,
    /// YAML (same content as JSON, human-readable)
    Yaml,
}

/// Arguments for `zensplit settle`
#[derive(Args, Debug)]
pub struct SettleArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: SettleFormat,

    /// Write to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the settlement plan
pub fn handle_settle_command(
    settings: &Settings,
    store: &ExpenseStore,
    args: SettleArgs,
) -> ZenSplitResult<()> {
    let report = settings.ledger().compute_stored(store.entries(), None);
    let transfers = settings.planner().plan(&report.balances)?;

    if report.diagnostics.has_warnings() {
        eprintln!(
            "Warning: {} malformed record(s) were skipped; run 'zensplit balances' for details",
            report.diagnostics.skipped_count()
        );
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                ZenSplitError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_plan(settings, &report, transfers, args.format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| ZenSplitError::Export(e.to_string()))?;
            println!("Settlement plan written to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write_plan(settings, &report, transfers, args.format, &mut handle)?;
        }
    }

    Ok(())
}

fn write_plan<W: Write>(
    settings: &Settings,
    report: &LedgerReport,
    transfers: Vec<Transfer>,
    format: SettleFormat,
    writer: &mut W,
) -> ZenSplitResult<()> {
    match format {
        SettleFormat::Text => {
            let text = format_settlement_plan(&transfers, &settings.currency_symbol);
            writeln!(writer, "{}", text.trim_end())
                .map_err(|e| ZenSplitError::Export(e.to_string()))?;
        }
        SettleFormat::Csv => export_transfers_csv(&transfers, writer)?,
        SettleFormat::Json => {
            let export = SettlementReport::new(
                report,
                transfers,
                settings.currency_symbol.clone(),
                settings.epsilon,
            );
            export_report_json(&export, writer, true)?;
            writeln!(writer).map_err(|e| ZenSplitError::Export(e.to_string()))?;
        }
        SettleFormat::Yaml => {
            let export = SettlementReport::new(
                report,
                transfers,
                settings.currency_symbol.clone(),
                settings.epsilon,
            );
            export_report_yaml(&export, writer)?;
        }
    }

    Ok(())
}
