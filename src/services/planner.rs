//! Settlement planner
//!
//! Greedy debt matching: repeatedly pair the largest remaining creditor with
//! the largest remaining debtor (ties broken by ascending participant id)
//! and transfer the smaller of the two amounts. This is deterministic and
//! runs in `O(p log p)` for `p` participants, but it does not always find
//! the fewest possible transfers.
//!
//! A balance counts as outstanding when it is not negligible, that is when
//! its magnitude is at least epsilon (`>= epsilon`, the complement of
//! [`Money::is_negligible`]). Planning stops once no outstanding balance is
//! left on either side. Parties below epsilon are never paired with each
//! other, but they do take part once the other side has nobody outstanding
//! left: several sub-epsilon debts can add up to a creditor who is owed well
//! over epsilon, and that creditor is still paid.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::error::{ZenSplitError, ZenSplitResult};
use crate::models::{Balances, Money, ParticipantId, Transfer};

/// A creditor or debtor with an outstanding (absolute) amount
#[derive(Debug, Clone, PartialEq, Eq)]
struct Party {
    remaining: Money,
    id: ParticipantId,
}

impl Ord for Party {
    /// Larger amounts first; among equals, the smaller id first
    fn cmp(&self, other: &Self) -> Ordering {
        self.remaining
            .cmp(&other.remaining)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Party {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Plans the transfers that settle a balance sheet
#[derive(Debug, Clone, Copy)]
pub struct SettlementPlanner {
    epsilon: Money,
}

impl Default for SettlementPlanner {
    fn default() -> Self {
        Self::new(Money::CENT)
    }
}

impl SettlementPlanner {
    pub fn new(epsilon: Money) -> Self {
        Self { epsilon }
    }

    /// Plan transfers that drive every balance to zero
    ///
    /// # Errors
    ///
    /// Returns `UnbalancedInput` if the balances do not sum to zero within
    /// epsilon. The input is never adjusted to make it fit.
    pub fn plan(&self, balances: &Balances) -> ZenSplitResult<Vec<Transfer>> {
        let total = balances.total();
        if !total.within(Money::zero(), self.epsilon) {
            return Err(ZenSplitError::UnbalancedInput {
                total,
                epsilon: self.epsilon,
            });
        }

        let mut creditors = BinaryHeap::new();
        let mut debtors = BinaryHeap::new();
        for (id, balance) in balances.iter() {
            if balance.is_zero() {
                continue;
            }
            let party = Party {
                remaining: balance.abs(),
                id: id.clone(),
            };
            if balance.is_positive() {
                creditors.push(party);
            } else {
                debtors.push(party);
            }
        }

        let mut transfers = Vec::new();
        while self.outstanding(&creditors) || self.outstanding(&debtors) {
            let (Some(mut creditor), Some(mut debtor)) = (creditors.pop(), debtors.pop()) else {
                break;
            };

            let amount = creditor.remaining.min(debtor.remaining);
            transfers.push(Transfer::new(debtor.id.clone(), creditor.id.clone(), amount));

            creditor.remaining -= amount;
            debtor.remaining -= amount;

            if !creditor.remaining.is_zero() {
                creditors.push(creditor);
            }
            if !debtor.remaining.is_zero() {
                debtors.push(debtor);
            }
        }

        debug!(
            participants = balances.len(),
            transfers = transfers.len(),
            "planned settlement"
        );

        Ok(transfers)
    }

    /// Whether the largest party on one side still has a non-negligible amount
    fn outstanding(&self, side: &BinaryHeap<Party>) -> bool {
        side.peek()
            .is_some_and(|party| !party.remaining.is_negligible(self.epsilon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(id: &str) -> ParticipantId {
        ParticipantId::from(id)
    }

    fn balances(entries: &[(&str, i64)]) -> Balances {
        entries
            .iter()
            .map(|(id, cents)| (p(id), Money::from_cents(*cents)))
            .collect()
    }

    fn transfer(from: &str, to: &str, cents: i64) -> Transfer {
        Transfer::new(p(from), p(to), Money::from_cents(cents))
    }

    #[test]
    fn test_one_creditor_two_debtors() {
        let sheet = balances(&[("A", 20000), ("B", -10000), ("C", -10000)]);
        let transfers = SettlementPlanner::default().plan(&sheet).unwrap();

        assert_eq!(
            transfers,
            vec![transfer("B", "A", 10000), transfer("C", "A", 10000)]
        );
        assert!(sheet.apply(&transfers).unwrap().is_settled(Money::CENT));
    }

    #[test]
    fn test_largest_pairs_first() {
        let sheet = balances(&[("A", 5000), ("B", 3000), ("C", -6000), ("D", -2000)]);
        let transfers = SettlementPlanner::default().plan(&sheet).unwrap();

        assert_eq!(
            transfers,
            vec![
                transfer("C", "A", 5000),
                transfer("D", "B", 2000),
                transfer("C", "B", 1000),
            ]
        );
    }

    #[test]
    fn test_ties_broken_by_id() {
        let sheet = balances(&[("Z", 100), ("Y", 100), ("B", -100), ("A", -100)]);
        let transfers = SettlementPlanner::default().plan(&sheet).unwrap();

        assert_eq!(
            transfers,
            vec![transfer("A", "Y", 100), transfer("B", "Z", 100)]
        );
    }

    #[test]
    fn test_settled_sheet_needs_no_transfers() {
        let sheet = balances(&[("A", 0), ("B", 0)]);
        assert!(SettlementPlanner::default().plan(&sheet).unwrap().is_empty());
        assert!(SettlementPlanner::default()
            .plan(&Balances::new())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unbalanced_input_is_reported() {
        let sheet = balances(&[("A", 10000), ("B", -9000)]);
        let err = SettlementPlanner::default().plan(&sheet).unwrap_err();
        assert!(matches!(
            err,
            ZenSplitError::UnbalancedInput { total, .. } if total == Money::from_cents(1000)
        ));
    }

    #[test]
    fn test_drift_within_epsilon_is_tolerated() {
        let sheet = balances(&[("A", 10001), ("B", -10000)]);
        let transfers = SettlementPlanner::default().plan(&sheet).unwrap();
        assert_eq!(transfers, vec![transfer("B", "A", 10000)]);
    }

    #[test]
    fn test_wider_epsilon_ignores_dust() {
        let sheet = balances(&[("A", 1003), ("B", -1000), ("C", -3)]);
        let transfers = SettlementPlanner::new(Money::from_cents(5)).plan(&sheet).unwrap();
        assert_eq!(transfers, vec![transfer("B", "A", 1000)]);
    }

    #[test]
    fn test_sub_epsilon_debts_still_pay_a_large_creditor() {
        let sheet = balances(&[("A", 16), ("B", -4), ("C", -4), ("D", -4), ("E", -4)]);
        let eps = Money::from_cents(5);
        let transfers = SettlementPlanner::new(eps).plan(&sheet).unwrap();

        // A is left with 4, which is below epsilon like E's remaining debt
        assert_eq!(
            transfers,
            vec![
                transfer("B", "A", 4),
                transfer("C", "A", 4),
                transfer("D", "A", 4),
            ]
        );
        let after = sheet.apply(&transfers).unwrap();
        assert!(after.is_settled(eps));
        assert_eq!(after.get(&p("A")), Some(Money::from_cents(4)));
    }

    #[test]
    fn test_dust_on_both_sides_needs_no_transfers() {
        let sheet = balances(&[("A", 4), ("B", 3), ("C", -7)]);
        let transfers = SettlementPlanner::new(Money::from_cents(10)).plan(&sheet).unwrap();
        assert!(transfers.is_empty());
    }

    #[test]
    fn test_balance_equal_to_epsilon_is_outstanding() {
        let sheet = balances(&[("A", 5), ("B", -5)]);
        let transfers = SettlementPlanner::new(Money::from_cents(5)).plan(&sheet).unwrap();
        assert_eq!(transfers, vec![transfer("B", "A", 5)]);
    }

    fn arb_balances() -> impl Strategy<Value = Balances> {
        prop::collection::vec(-1_000_000i64..=1_000_000, 1..12).prop_map(|mut amounts| {
            let total: i64 = amounts.iter().sum();
            amounts.push(-total);
            amounts
                .into_iter()
                .enumerate()
                .map(|(i, cents)| (p(&format!("p{:02}", i)), Money::from_cents(cents)))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn plan_settles_every_balance(sheet in arb_balances(), eps in 1i64..=500) {
            let eps = Money::from_cents(eps);
            let transfers = SettlementPlanner::new(eps).plan(&sheet).unwrap();

            prop_assert!(transfers.iter().all(|t| t.amount.is_positive()));
            prop_assert!(transfers.iter().all(|t| t.from != t.to));
            prop_assert!(sheet.apply(&transfers).unwrap().is_settled(eps));
            prop_assert!(transfers.len() < sheet.len().max(1));
        }

        #[test]
        fn plan_is_deterministic(sheet in arb_balances()) {
            let planner = SettlementPlanner::default();
            prop_assert_eq!(planner.plan(&sheet).unwrap(), planner.plan(&sheet).unwrap());
        }
    }
}
