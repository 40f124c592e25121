//! Allocation preview formatting

use crate::models::{Money, Splits};

/// Format an allocation as a two-column table with a total row
pub fn format_split(splits: &Splits, symbol: &str) -> String {
    if splits.is_empty() {
        return "Nobody to split with.".to_string();
    }

    let name_width = splits
        .keys()
        .map(|p| p.as_str().len())
        .max()
        .unwrap_or(11)
        .max(11);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}\n",
        "Participant",
        "Share",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->12}\n",
        "",
        "",
        name_width = name_width,
    ));

    for (participant, share) in splits {
        output.push_str(&format!(
            "{:<name_width$}  {:>12}\n",
            participant.as_str(),
            share.format_with_symbol(symbol),
            name_width = name_width,
        ));
    }

    let total: Money = splits.values().sum();
    output.push_str(&format!(
        "{:-<name_width$}  {:->12}\n",
        "",
        "",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:<name_width$}  {:>12}\n",
        "Total",
        total.format_with_symbol(symbol),
        name_width = name_width,
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParticipantId;

    #[test]
    fn test_format_split() {
        let splits: Splits = [
            (ParticipantId::from("alice"), Money::from_cents(334)),
            (ParticipantId::from("bob"), Money::from_cents(333)),
            (ParticipantId::from("carol"), Money::from_cents(333)),
        ]
        .into_iter()
        .collect();

        let output = format_split(&splits, "$");
        assert!(output.contains("alice"));
        assert!(output.contains("$3.34"));
        assert!(output.contains("$10.00"));
    }

    #[test]
    fn test_format_empty_split() {
        assert_eq!(format_split(&Splits::new(), "$"), "Nobody to split with.");
    }
}
