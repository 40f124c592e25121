//! YAML export of a settlement run

use std::io::Write;

use super::json::SettlementReport;
use crate::error::{ZenSplitError, ZenSplitResult};

/// Write a settlement report as commented YAML
pub fn export_report_yaml<W: Write>(report: &SettlementReport, writer: &mut W) -> ZenSplitResult<()> {
    let header = format!(
        "# ZenSplit Settlement Report\n\
         # Generated: {}\n\
         # App Version: {}\n\
         #\n\
         # Amounts are in cents of {}.\n\n",
        report.exported_at, report.app_version, report.currency_symbol
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| ZenSplitError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, report).map_err(|e| ZenSplitError::Export(e.to_string()))?;

    Ok(())
}
