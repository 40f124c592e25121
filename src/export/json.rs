//! JSON export of a settlement run
//!
//! A [`SettlementReport`] bundles the balance sheet, the suggested transfers
//! and the ledger diagnostics into one versioned document.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{ZenSplitError, ZenSplitResult};
use crate::models::{Balances, Money, Transfer};
use crate::services::{LedgerDiagnostics, LedgerReport, LedgerSummary};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Everything needed to settle up, as one document
#[derive(Debug, Clone, Serialize)]
pub struct SettlementReport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Currency symbol amounts were entered in
    pub currency_symbol: String,

    /// Zero tolerance used for this run, in cents
    pub epsilon: Money,

    /// Net balance per participant, in cents
    pub balances: Balances,

    /// Suggested payments, in planner order
    pub transfers: Vec<Transfer>,

    pub summary: LedgerSummary,

    pub diagnostics: LedgerDiagnostics,
}

impl SettlementReport {
    /// Assemble a report from one ledger run and its settlement plan
    pub fn new(
        report: &LedgerReport,
        transfers: Vec<Transfer>,
        currency_symbol: impl Into<String>,
        epsilon: Money,
    ) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            currency_symbol: currency_symbol.into(),
            epsilon,
            balances: report.balances.clone(),
            transfers,
            summary: report.summary,
            diagnostics: report.diagnostics.clone(),
        }
    }
}

/// Write a settlement report as JSON
pub fn export_report_json<W: Write>(
    report: &SettlementReport,
    writer: &mut W,
    pretty: bool,
) -> ZenSplitResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, report)
    } else {
        serde_json::to_writer(writer, report)
    }
    .map_err(|e| ZenSplitError::Export(e.to_string()))?;

    Ok(())
}
