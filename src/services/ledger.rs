//! Balance ledger
//!
//! Aggregates stored expense records into one net balance per participant.
//! The sheet is rebuilt from the full record list on every call; nothing is
//! cached between calls.

use serde::Serialize;
use tracing::warn;

use crate::models::{
    Balances, Expense, ExpenseId, ExpenseRecord, Money, ParticipantId, SkipReason, Standing,
};

/// A stored record the ledger could not use
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Position of the record in the input
    pub index: usize,
    pub id: Option<ExpenseId>,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: SkipReason,
}

fn serialize_reason<S: serde::Serializer>(reason: &SkipReason, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(reason)
}

/// Data-integrity findings from one ledger run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerDiagnostics {
    pub skipped: Vec<SkippedRecord>,
}

impl LedgerDiagnostics {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Whether the caller should surface a data-integrity warning
    pub fn has_warnings(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Totals over the records that were posted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub expense_count: usize,
    /// Saturates at the largest representable amount
    pub total_spent: Money,
}

/// Everything one ledger run produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerReport {
    pub balances: Balances,
    /// The requesting participant's own position, when one was given
    pub self_standing: Option<Standing>,
    pub summary: LedgerSummary,
    pub diagnostics: LedgerDiagnostics,
}

/// Computes balances from expense records
#[derive(Debug, Clone, Copy)]
pub struct BalanceLedger {
    epsilon: Money,
}

impl Default for BalanceLedger {
    fn default() -> Self {
        Self::new(Money::CENT)
    }
}

impl BalanceLedger {
    pub fn new(epsilon: Money) -> Self {
        Self { epsilon }
    }

    /// Compute net balances over `records`
    ///
    /// Malformed records are skipped and listed in the diagnostics; they
    /// never abort the computation.
    pub fn compute_balances(
        &self,
        records: &[ExpenseRecord],
        self_id: Option<&ParticipantId>,
    ) -> LedgerReport {
        self.tally(
            records
                .iter()
                .map(|record| (record.id.clone(), record.validate(self.epsilon))),
            self_id,
        )
    }

    /// Compute net balances over raw stored entries
    ///
    /// An entry that cannot even be read as a record is skipped like any
    /// other malformed record, under its position in `entries`.
    pub fn compute_stored(
        &self,
        entries: &[serde_json::Value],
        self_id: Option<&ParticipantId>,
    ) -> LedgerReport {
        self.tally(
            entries
                .iter()
                .map(|entry| match ExpenseRecord::from_json(entry) {
                    Ok(record) => (record.id.clone(), record.validate(self.epsilon)),
                    Err(reason) => (ExpenseRecord::stored_id(entry), Err(reason)),
                }),
            self_id,
        )
    }

    /// Compute net balances over already-validated expenses
    ///
    /// Returns `None` if posting the expenses would overflow a balance.
    pub fn balances_for(&self, expenses: &[Expense]) -> Option<Balances> {
        let mut balances = Balances::new();
        for expense in expenses {
            post_expense(&mut balances, expense)?;
        }
        Some(balances)
    }

    fn tally(
        &self,
        outcomes: impl Iterator<Item = (Option<ExpenseId>, Result<Expense, SkipReason>)>,
        self_id: Option<&ParticipantId>,
    ) -> LedgerReport {
        let mut balances = Balances::new();
        let mut summary = LedgerSummary::default();
        let mut diagnostics = LedgerDiagnostics::default();

        for (index, (id, outcome)) in outcomes.enumerate() {
            let posted = outcome.and_then(|expense| {
                post_expense(&mut balances, &expense).ok_or(SkipReason::BalanceOverflow)?;
                summary.expense_count += 1;
                summary.total_spent = summary.total_spent.saturating_add(expense.amount());
                Ok(())
            });

            if let Err(reason) = posted {
                warn!(index, id = ?id, %reason, "skipping malformed expense record");
                diagnostics.skipped.push(SkippedRecord { index, id, reason });
            }
        }

        let self_standing = self_id.map(|id| Standing::from_balance(balances.get(id), self.epsilon));

        LedgerReport {
            balances,
            self_standing,
            summary,
            diagnostics,
        }
    }
}

/// Post one expense: the payer is credited everything except their own
/// share, every other participant is debited their share
///
/// Nothing is posted if any balance would overflow.
fn post_expense(balances: &mut Balances, expense: &Expense) -> Option<()> {
    let payer = expense.payer();
    let mut changes = Balances::new();

    for (participant, owed) in expense.splits() {
        if participant == payer {
            changes.credit(payer, expense.amount().checked_sub(*owed)?)?;
        } else {
            changes.debit(participant, *owed)?;
        }
    }

    // A payer outside the split owes no share of their own
    if !expense.payer_participates() {
        changes.credit(payer, expense.amount())?;
    }

    balances.absorb(&changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SplitPolicy, Splits};
    use crate::services::allocator::{ExpenseDraft, SplitAllocator};
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn p(id: &str) -> ParticipantId {
        ParticipantId::from(id)
    }

    fn record(value: serde_json::Value) -> ExpenseRecord {
        serde_json::from_value(value).unwrap()
    }

    fn cents(balances: &Balances, id: &str) -> Option<i64> {
        balances.get(&p(id)).map(|m| m.cents())
    }

    #[test]
    fn test_three_way_dinner() {
        let records = vec![record(json!({
            "amount": 30000,
            "payer": "A",
            "participants": ["A", "B", "C"],
            "splits": {"A": 10000, "B": 10000, "C": 10000}
        }))];

        let report = BalanceLedger::default().compute_balances(&records, Some(&p("A")));

        assert_eq!(cents(&report.balances, "A"), Some(20000));
        assert_eq!(cents(&report.balances, "B"), Some(-10000));
        assert_eq!(cents(&report.balances, "C"), Some(-10000));
        assert_eq!(
            report.self_standing,
            Some(Standing::Owed(Money::from_cents(20000)))
        );
        assert_eq!(report.summary.expense_count, 1);
        assert_eq!(report.summary.total_spent, Money::from_cents(30000));
        assert!(!report.diagnostics.has_warnings());
    }

    #[test]
    fn test_two_expenses_net_out() {
        // A pays 100 split 50/50, B pays 60 split 30/30.
        // A: +(100 - 50) - 30 = +20; B: -50 + (60 - 30) = -20
        let records = vec![
            record(json!({
                "amount": 10000,
                "payer": "A",
                "splits": {"A": 5000, "B": 5000}
            })),
            record(json!({
                "amount": 6000,
                "payer": "B",
                "splits": {"A": 3000, "B": 3000}
            })),
        ];

        let report = BalanceLedger::default().compute_balances(&records, Some(&p("B")));

        assert_eq!(cents(&report.balances, "A"), Some(2000));
        assert_eq!(cents(&report.balances, "B"), Some(-2000));
        assert_eq!(
            report.self_standing,
            Some(Standing::Owes(Money::from_cents(2000)))
        );
    }

    #[test]
    fn test_payer_outside_split_is_credited_in_full() {
        let records = vec![record(json!({
            "amount": 1000,
            "payer": "A",
            "splits": {"B": 500, "C": 500}
        }))];

        let report = BalanceLedger::default().compute_balances(&records, None);

        assert_eq!(cents(&report.balances, "A"), Some(1000));
        assert_eq!(cents(&report.balances, "B"), Some(-500));
        assert_eq!(cents(&report.balances, "C"), Some(-500));
        assert!(report.balances.total().is_zero());
        assert_eq!(report.self_standing, None);
    }

    #[test]
    fn test_payer_alone_nets_to_zero() {
        let records = vec![record(json!({
            "amount": 1000,
            "payer": "A",
            "splits": {"A": 1000}
        }))];

        let report = BalanceLedger::default().compute_balances(&records, Some(&p("A")));
        assert_eq!(cents(&report.balances, "A"), Some(0));
        assert_eq!(report.self_standing, Some(Standing::Settled));
    }

    #[test]
    fn test_absent_participant_has_no_entry() {
        let records = vec![record(json!({
            "amount": 1000,
            "payer": "A",
            "splits": {"A": 500, "B": 500}
        }))];

        let report = BalanceLedger::default().compute_balances(&records, Some(&p("Z")));
        assert_eq!(report.balances.get(&p("Z")), None);
        assert_eq!(report.self_standing, Some(Standing::NoData));
    }

    #[test]
    fn test_malformed_record_is_skipped_and_counted() {
        let records = vec![
            record(json!({
                "id": "550e8400-e29b-41d4-a716-446655440000",
                "amount": 1000,
                "payer": "A",
                "participants": ["A", "B"],
                "splits": null
            })),
            record(json!({
                "amount": 1000,
                "payer": "A",
                "splits": {"A": 500, "B": 500}
            })),
        ];

        let report = BalanceLedger::default().compute_balances(&records, None);

        assert_eq!(report.diagnostics.skipped_count(), 1);
        let skipped = &report.diagnostics.skipped[0];
        assert_eq!(skipped.index, 0);
        assert_eq!(skipped.reason, SkipReason::MissingSplits);
        assert!(skipped.id.is_some());

        assert_eq!(cents(&report.balances, "A"), Some(500));
        assert_eq!(cents(&report.balances, "B"), Some(-500));
        assert_eq!(report.summary.expense_count, 1);
    }

    #[test]
    fn test_every_kind_of_malformed_record() {
        let records = vec![
            record(json!({"amount": 1000, "payer": "A"})),
            record(json!({"amount": 1000, "payer": "A", "splits": [1, 2]})),
            record(json!({"payer": "A", "splits": {"A": 10}})),
            record(json!({"amount": 10, "splits": {"A": 10}})),
            record(json!({"amount": 10, "payer": "A", "splits": {"A": 3}})),
        ];

        let report = BalanceLedger::default().compute_balances(&records, None);
        assert_eq!(report.diagnostics.skipped_count(), 5);
        assert!(report.balances.is_empty());
    }

    #[test]
    fn test_compute_is_idempotent() {
        let records = vec![
            record(json!({"amount": 999, "payer": "A", "splits": {"A": 333, "B": 333, "C": 333}})),
            record(json!({"amount": 500, "payer": "C", "splits": {"B": 500}})),
            record(json!({"amount": 1, "payer": "B", "splits": "broken"})),
        ];

        let ledger = BalanceLedger::default();
        let first = ledger.compute_balances(&records, Some(&p("B")));
        let second = ledger.compute_balances(&records, Some(&p("B")));
        assert_eq!(first, second);
    }

    #[test]
    fn test_balances_for_typed_expenses() {
        let allocator = SplitAllocator::default();
        let expense = allocator
            .create_expense(ExpenseDraft {
                description: "Rent".into(),
                amount: Money::from_cents(100),
                payer: p("A"),
                participants: [p("A"), p("B"), p("C")].into_iter().collect(),
                policy: SplitPolicy::Equal,
                group: None,
            })
            .unwrap();

        let balances = BalanceLedger::default().balances_for(&[expense]).unwrap();
        // Shares are 34 / 33 / 33
        assert_eq!(cents(&balances, "A"), Some(66));
        assert_eq!(cents(&balances, "B"), Some(-33));
        assert_eq!(cents(&balances, "C"), Some(-33));
    }

    #[test]
    fn test_overflowing_splits_are_skipped() {
        let records = vec![
            record(json!({
                "amount": 100,
                "payer": "a",
                "splits": {"a": i64::MAX, "b": 1}
            })),
            record(json!({
                "amount": 1000,
                "payer": "a",
                "splits": {"a": 500, "b": 500}
            })),
        ];

        let report = BalanceLedger::default().compute_balances(&records, None);

        assert_eq!(report.diagnostics.skipped_count(), 1);
        assert_eq!(report.diagnostics.skipped[0].index, 0);
        assert_eq!(report.diagnostics.skipped[0].reason, SkipReason::SplitsOverflow);
        assert_eq!(cents(&report.balances, "a"), Some(500));
        assert_eq!(cents(&report.balances, "b"), Some(-500));
    }

    #[test]
    fn test_record_that_would_overflow_a_balance_is_skipped() {
        let huge = json!({
            "amount": i64::MAX,
            "payer": "a",
            "splits": {"b": i64::MAX}
        });
        let records = vec![record(huge.clone()), record(huge)];

        let report = BalanceLedger::default().compute_balances(&records, None);

        assert_eq!(report.diagnostics.skipped_count(), 1);
        assert_eq!(report.diagnostics.skipped[0].index, 1);
        assert_eq!(report.diagnostics.skipped[0].reason, SkipReason::BalanceOverflow);
        assert_eq!(cents(&report.balances, "a"), Some(i64::MAX));
        assert_eq!(cents(&report.balances, "b"), Some(-i64::MAX));
        assert_eq!(report.summary.expense_count, 1);
    }

    #[test]
    fn test_overflow_leaves_no_partial_posting() {
        let records = vec![
            record(json!({"amount": i64::MAX, "payer": "x", "splits": {"b": i64::MAX}})),
            record(json!({"amount": 1, "payer": "y", "splits": {"b": 1}})),
            record(json!({"amount": 2, "payer": "c", "splits": {"a": 1, "b": 1}})),
        ];

        let report = BalanceLedger::default().compute_balances(&records, None);

        assert_eq!(report.diagnostics.skipped_count(), 1);
        assert_eq!(report.diagnostics.skipped[0].index, 2);
        assert_eq!(cents(&report.balances, "b"), Some(i64::MIN));
        assert_eq!(report.balances.get(&p("a")), None);
        assert_eq!(report.balances.get(&p("c")), None);
        assert_eq!(report.summary.total_spent, Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_stored_entries_are_read_one_at_a_time() {
        let entries = vec![
            json!({
                "id": "64b7f1c2a9e3d40012345678",
                "amount": 1000,
                "payer": "A",
                "participants": null,
                "splits": {"A": 500, "B": 500}
            }),
            json!({
                "id": "64b7f1c2a9e3d40087654321",
                "amount": 10.5,
                "payer": "A",
                "splits": {"A": 1050}
            }),
            json!("not a record"),
        ];

        let report = BalanceLedger::default().compute_stored(&entries, Some(&p("B")));

        assert_eq!(report.summary.expense_count, 1);
        assert_eq!(cents(&report.balances, "A"), Some(500));
        assert_eq!(
            report.self_standing,
            Some(Standing::Owes(Money::from_cents(500)))
        );

        assert_eq!(report.diagnostics.skipped_count(), 2);
        let float_amount = &report.diagnostics.skipped[0];
        assert_eq!(float_amount.index, 1);
        assert_eq!(
            float_amount.id,
            Some(ExpenseId::from_raw("64b7f1c2a9e3d40087654321"))
        );
        assert!(matches!(float_amount.reason, SkipReason::Unreadable(_)));
        assert_eq!(report.diagnostics.skipped[1].index, 2);
        assert_eq!(report.diagnostics.skipped[1].id, None);
    }

    fn arb_expense() -> impl Strategy<Value = ExpenseRecord> {
        (1i64..=1_000_000, 0usize..5, prop::collection::btree_set(0usize..5, 1..=5)).prop_map(
            |(amount, payer, members)| {
                let participants: BTreeSet<ParticipantId> =
                    members.iter().map(|i| p(&format!("m{}", i))).collect();
                let splits: Splits = SplitAllocator::default()
                    .allocate(Money::from_cents(amount), &participants, &SplitPolicy::Equal)
                    .unwrap();
                record(json!({
                    "amount": amount,
                    "payer": format!("m{}", payer),
                    "splits": splits,
                }))
            },
        )
    }

    proptest! {
        #[test]
        fn balances_sum_to_zero(records in prop::collection::vec(arb_expense(), 0..30)) {
            let report = BalanceLedger::default().compute_balances(&records, None);
            prop_assert_eq!(report.diagnostics.skipped_count(), 0);
            prop_assert!(report.balances.total().is_zero());
        }
    }
}
