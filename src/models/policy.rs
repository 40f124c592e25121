//! Split policies
//!
//! A policy tells the allocator how an expense amount is divided among its
//! participants. The resulting per-participant mapping is a [`Splits`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::ids::ParticipantId;
use super::money::Money;

/// Per-participant owed amounts for one expense, in sorted-id order
pub type Splits = BTreeMap<ParticipantId, Money>;

/// Per-participant percentages, each in `[0, 100]`
pub type Percentages = BTreeMap<ParticipantId, Decimal>;

/// Tag stored on an expense recording which policy produced its splits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitKind {
    Equal,
    Percentage,
    Fixed,
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "Equal"),
            Self::Percentage => write!(f, "% Split"),
            Self::Fixed => write!(f, "Fixed"),
        }
    }
}

/// How an expense amount is divided
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SplitPolicy {
    /// Everyone owes the same amount, residual cents go to the first ids
    #[default]
    Equal,
    /// Each participant owes a percentage of the amount
    Percentage { percentages: Percentages },
    /// Caller-provided amounts, passed through after verification
    Fixed { amounts: Splits },
}

impl SplitPolicy {
    /// The tag to store alongside the allocated splits
    pub fn kind(&self) -> SplitKind {
        match self {
            Self::Equal => SplitKind::Equal,
            Self::Percentage { .. } => SplitKind::Percentage,
            Self::Fixed { .. } => SplitKind::Fixed,
        }
    }
}

/// An even percentage table for `participants`, summing to exactly 100
///
/// Percentages carry two decimal places; leftover hundredths of a percent go
/// to the first participants in sorted-id order.
pub fn even_percentages(participants: &BTreeSet<ParticipantId>) -> Percentages {
    if participants.is_empty() {
        return Percentages::new();
    }

    let n = participants.len() as i64;
    let base = 10_000 / n;
    let leftover = 10_000 % n;

    participants
        .iter()
        .enumerate()
        .map(|(idx, id)| {
            let hundredths = if (idx as i64) < leftover { base + 1 } else { base };
            (id.clone(), Decimal::new(hundredths, 2))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ids(names: &[&str]) -> BTreeSet<ParticipantId> {
        names.iter().map(|n| ParticipantId::from(*n)).collect()
    }

    #[test]
    fn test_even_percentages_three_way() {
        let table = even_percentages(&ids(&["carol", "alice", "bob"]));
        assert_eq!(table[&ParticipantId::from("alice")], dec!(33.34));
        assert_eq!(table[&ParticipantId::from("bob")], dec!(33.33));
        assert_eq!(table[&ParticipantId::from("carol")], dec!(33.33));
        assert_eq!(table.values().sum::<Decimal>(), dec!(100));
    }

    #[test]
    fn test_even_percentages_empty() {
        assert!(even_percentages(&BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_policy_kind() {
        assert_eq!(SplitPolicy::Equal.kind(), SplitKind::Equal);
        let fixed = SplitPolicy::Fixed {
            amounts: Splits::new(),
        };
        assert_eq!(fixed.kind(), SplitKind::Fixed);
    }

    #[test]
    fn test_policy_serialization() {
        let json = r#"{"type":"percentage","percentages":{"alice":"60","bob":"40"}}"#;
        let policy: SplitPolicy = serde_json::from_str(json).unwrap();
        match policy {
            SplitPolicy::Percentage { percentages } => {
                assert_eq!(percentages[&ParticipantId::from("alice")], dec!(60));
            }
            other => panic!("unexpected policy: {:?}", other),
        }

        let kind: SplitKind = serde_json::from_str("\"fixed\"").unwrap();
        assert_eq!(kind, SplitKind::Fixed);
    }
}
