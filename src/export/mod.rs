//! Export module for ZenSplit
//!
//! Settlement results in several formats:
//! - CSV: transfers or balances, spreadsheet-compatible
//! - JSON: the full machine-readable settlement report
//! - YAML: the same report, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_balances_csv, export_transfers_csv};
pub use json::{export_report_json, SettlementReport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_report_yaml;
