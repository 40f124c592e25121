//! Expense display formatting
//!
//! Stored entries are shown as they are on disk, including ones the ledger
//! would skip, so the user can find and remove them.

use serde_json::Value;

use crate::models::{Expense, ExpenseRecord, Money};

/// One table row
struct ListRow {
    id: String,
    date: String,
    description: String,
    amount: String,
    payer: String,
    split: String,
}

impl ListRow {
    fn new(index: usize, entry: &Value, epsilon: Money, symbol: &str) -> Self {
        let id = ExpenseRecord::stored_id(entry)
            .map(|id| id.to_string())
            .unwrap_or_else(|| format!("#{}", index));

        let record = match ExpenseRecord::from_json(entry) {
            Ok(record) => record,
            Err(reason) => {
                return Self {
                    id,
                    date: String::new(),
                    description: ExpenseRecord::stored_description(entry).to_string(),
                    amount: "?".to_string(),
                    payer: "?".to_string(),
                    split: format!("INVALID ({})", reason),
                }
            }
        };

        Self {
            id,
            date: record
                .created_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            amount: record
                .amount
                .map(|a| a.format_with_symbol(symbol))
                .unwrap_or_else(|| "?".to_string()),
            payer: record
                .payer
                .as_ref()
                .map(|p| p.display_name().to_string())
                .unwrap_or_else(|| "?".to_string()),
            split: match record.validate(epsilon) {
                Ok(expense) => split_label(&expense),
                Err(reason) => format!("INVALID ({})", reason),
            },
            description: record.description,
        }
    }
}

/// Format stored expense entries as a table
pub fn format_expense_list(entries: &[Value], epsilon: Money, symbol: &str) -> String {
    if entries.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let rows: Vec<ListRow> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| ListRow::new(index, entry, epsilon, symbol))
        .collect();

    let desc_width = rows
        .iter()
        .map(|r| r.description.chars().count())
        .max()
        .unwrap_or(11)
        .clamp(11, 32);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<desc_width$}  {:>12}  {:<12}  {}\n",
        "ID",
        "Date",
        "Description",
        "Amount",
        "Paid by",
        "Split",
        desc_width = desc_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<desc_width$}  {:->12}  {:-<12}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        desc_width = desc_width,
    ));

    for row in &rows {
        output.push_str(&format!(
            "{:<12}  {:<10}  {:<desc_width$}  {:>12}  {:<12}  {}\n",
            row.id,
            row.date,
            truncate(&row.description, desc_width),
            row.amount,
            row.payer,
            row.split,
            desc_width = desc_width,
        ));
    }

    output
}

/// Format one expense with its per-participant shares
pub fn format_expense_details(expense: &Expense, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.description()));
    output.push_str(&format!("  ID:      {}\n", expense.id()));
    output.push_str(&format!(
        "  Amount:  {}\n",
        expense.amount().format_with_symbol(symbol)
    ));
    output.push_str(&format!("  Paid by: {}\n", expense.payer()));
    if let Some(group) = expense.group() {
        output.push_str(&format!("  Group:   {}\n", group));
    }
    output.push_str(&format!("  Split:   {}\n", split_label(expense)));

    for (participant, share) in expense.splits() {
        output.push_str(&format!(
            "    {:<24} {:>12}\n",
            participant.as_str(),
            share.format_with_symbol(symbol)
        ));
    }

    output
}

fn split_label(expense: &Expense) -> String {
    let policy = expense
        .policy()
        .map(|kind| kind.to_string())
        .unwrap_or_else(|| "custom".to_string());
    format!("{} x{}", policy, expense.participants().len())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
