//! Settlement plan formatting

use crate::models::Transfer;

/// Format a settlement plan, one numbered transfer per line
pub fn format_settlement_plan(transfers: &[Transfer], symbol: &str) -> String {
    if transfers.is_empty() {
        return "Everyone is settled up. No payments needed.".to_string();
    }

    let from_width = transfers
        .iter()
        .map(|t| t.from.as_str().len())
        .max()
        .unwrap_or(4)
        .max(4);
    let to_width = transfers
        .iter()
        .map(|t| t.to.as_str().len())
        .max()
        .unwrap_or(2)
        .max(2);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>3}  {:<from_width$}  {:<to_width$}  {:>12}\n",
        "#",
        "From",
        "To",
        "Amount",
        from_width = from_width,
        to_width = to_width,
    ));
    output.push_str(&format!(
        "{:->3}  {:-<from_width$}  {:-<to_width$}  {:->12}\n",
        "",
        "",
        "",
        "",
        from_width = from_width,
        to_width = to_width,
    ));

    for (idx, transfer) in transfers.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}  {:<from_width$}  {:<to_width$}  {:>12}\n",
            idx + 1,
            transfer.from.as_str(),
            transfer.to.as_str(),
            transfer.amount.format_with_symbol(symbol),
            from_width = from_width,
            to_width = to_width,
        ));
    }

    output.push_str(&format!("\n{} payment(s) settle all balances.\n", transfers.len()));
    output
}
