//! Balance sheet formatting
//!
//! Renders a [`LedgerReport`]: one line per participant, the caller's own
//! standing, totals, and a data-integrity warning when records were skipped.

use crate::models::Standing;
use crate::services::LedgerReport;

/// Format a full balance sheet
pub fn format_balance_sheet(report: &LedgerReport, symbol: &str) -> String {
    let mut output = String::new();

    if report.balances.is_empty() {
        output.push_str("No balances yet.\n");
    } else {
        let name_width = report
            .balances
            .iter()
            .map(|(p, _)| p.as_str().len())
            .max()
            .unwrap_or(11)
            .max(11);

        output.push_str(&format!(
            "{:<name_width$}  {:>14}\n",
            "Participant",
            "Balance",
            name_width = name_width,
        ));
        output.push_str(&format!(
            "{:-<name_width$}  {:->14}\n",
            "",
            "",
            name_width = name_width,
        ));

        for (participant, balance) in report.balances.iter() {
            output.push_str(&format!(
                "{:<name_width$}  {:>14}\n",
                participant.as_str(),
                balance.format_signed(symbol),
                name_width = name_width,
            ));
        }
    }

    if let Some(standing) = report.self_standing {
        output.push('\n');
        output.push_str(&format_standing(standing, symbol));
        output.push('\n');
    }

    output.push_str(&format!(
        "\n{} expense(s), {} spent in total\n",
        report.summary.expense_count,
        report.summary.total_spent.format_with_symbol(symbol),
    ));

    if report.diagnostics.has_warnings() {
        output.push_str(&format!(
            "\nWarning: {} record(s) were skipped as malformed:\n",
            report.diagnostics.skipped_count()
        ));
        for skipped in &report.diagnostics.skipped {
            let label = skipped
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_else(|| format!("#{}", skipped.index));
            output.push_str(&format!("  {}: {}\n", label, skipped.reason));
        }
    }

    output
}

/// One-line summary of where the caller stands
pub fn format_standing(standing: Standing, symbol: &str) -> String {
    let amount = match standing {
        Standing::Owed(amount) | Standing::Owes(amount) => amount,
        Standing::Settled | Standing::NoData => return standing.to_string(),
    };
    format!("{}: {}", standing, amount.format_with_symbol(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseRecord, Money, ParticipantId};
    use crate::services::BalanceLedger;
    use serde_json::json;

    fn record(value: serde_json::Value) -> ExpenseRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_balance_sheet_with_standing() {
        let records = vec![record(json!({
            "description": "Dinner",
            "amount": 30000,
            "payer": "a",
            "splits": {"a": 10000, "b": 10000, "c": 10000}
        }))];
        let me = ParticipantId::from("b");
        let report = BalanceLedger::default().compute_balances(&records, Some(&me));

        let output = format_balance_sheet(&report, "₹");
        assert!(output.contains("+₹200.00"));
        assert!(output.contains("-₹100.00"));
        assert!(output.contains("You owe others: ₹100.00"));
        assert!(output.contains("1 expense(s), ₹300.00 spent in total"));
        assert!(!output.contains("Warning"));
    }

    #[test]
    fn test_balance_sheet_warns_on_skipped() {
        let records = vec![record(json!({
            "description": "Broken",
            "amount": 500,
            "payer": "a",
            "splits": null
        }))];
        let report = BalanceLedger::default().compute_balances(&records, None);

        let output = format_balance_sheet(&report, "$");
        assert!(output.contains("No balances yet."));
        assert!(output.contains("Warning: 1 record(s) were skipped"));
        assert!(output.contains("#0"));
    }

    #[test]
    fn test_format_standing() {
        assert_eq!(format_standing(Standing::Settled, "$"), "All settled up");
        assert_eq!(
            format_standing(Standing::Owed(Money::from_cents(2000)), "$"),
            "Others owe you: $20.00"
        );
    }
}
