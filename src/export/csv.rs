//! CSV export of settlement transfers and balances
//!
//! Amounts are written as decimal strings (`100.00`) so the files open
//! cleanly in a spreadsheet.

use std::io::Write;

use serde::Serialize;

use crate::error::{ZenSplitError, ZenSplitResult};
use crate::models::{Balances, Transfer};

#[derive(Serialize)]
struct TransferRow<'a> {
    #[serde(rename = "From")]
    from: &'a str,
    #[serde(rename = "To")]
    to: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
}

#[derive(Serialize)]
struct BalanceRow<'a> {
    #[serde(rename = "Participant")]
    participant: &'a str,
    #[serde(rename = "Balance")]
    balance: String,
}

fn export_error(e: impl std::fmt::Display) -> ZenSplitError {
    ZenSplitError::Export(e.to_string())
}

/// Export settlement transfers to CSV
pub fn export_transfers_csv<W: Write>(transfers: &[Transfer], writer: &mut W) -> ZenSplitResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if transfers.is_empty() {
        csv_writer
            .write_record(["From", "To", "Amount"])
            .map_err(export_error)?;
    }

    for transfer in transfers {
        csv_writer
            .serialize(TransferRow {
                from: transfer.from.as_str(),
                to: transfer.to.as_str(),
                amount: transfer.amount.to_string(),
            })
            .map_err(export_error)?;
    }

    csv_writer.flush().map_err(export_error)?;
    Ok(())
}

/// Export the balance sheet to CSV
pub fn export_balances_csv<W: Write>(balances: &Balances, writer: &mut W) -> ZenSplitResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if balances.is_empty() {
        csv_writer
            .write_record(["Participant", "Balance"])
            .map_err(export_error)?;
    }

    for (participant, balance) in balances.iter() {
        csv_writer
            .serialize(BalanceRow {
                participant: participant.as_str(),
                balance: balance.to_string(),
            })
            .map_err(export_error)?;
    }

    csv_writer.flush().map_err(export_error)?;
    Ok(())
}
