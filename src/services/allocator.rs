//! Split allocator
//!
//! Turns an expense amount and a [`SplitPolicy`] into per-participant owed
//! amounts. Allocation is deterministic: residual cents that cannot be
//! divided evenly always land on the same participants, in sorted-id order,
//! so the shares add up to the amount exactly.

use rust_decimal::Decimal;
use std::collections::BTreeSet;

use crate::error::{ZenSplitError, ZenSplitResult};
use crate::models::{Expense, Money, ParticipantId, Percentages, SplitPolicy, Splits};

/// Tolerance on a percentage table's total
const PERCENT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Everything needed to allocate and record one expense
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: Money,
    pub payer: ParticipantId,
    pub participants: BTreeSet<ParticipantId>,
    pub policy: SplitPolicy,
    pub group: Option<String>,
}

/// Allocates expense amounts across participants
#[derive(Debug, Clone, Copy)]
pub struct SplitAllocator {
    epsilon: Money,
}

impl Default for SplitAllocator {
    fn default() -> Self {
        Self::new(Money::CENT)
    }
}

impl SplitAllocator {
    /// Create an allocator; `epsilon` bounds how far fixed amounts may
    /// drift from the expense total
    pub fn new(epsilon: Money) -> Self {
        Self { epsilon }
    }

    /// Allocate `amount` across `participants` according to `policy`
    pub fn allocate(
        &self,
        amount: Money,
        participants: &BTreeSet<ParticipantId>,
        policy: &SplitPolicy,
    ) -> ZenSplitResult<Splits> {
        if !amount.is_positive() {
            return Err(ZenSplitError::NonPositiveAmount(amount));
        }
        if participants.is_empty() {
            return Err(ZenSplitError::EmptyParticipants);
        }

        match policy {
            SplitPolicy::Equal => Ok(allocate_equal(amount, participants)),
            SplitPolicy::Percentage { percentages } => {
                allocate_percentage(amount, participants, percentages)
            }
            SplitPolicy::Fixed { amounts } => self.allocate_fixed(amount, participants, amounts),
        }
    }

    /// Allocate a draft and build the resulting [`Expense`]
    pub fn create_expense(&self, draft: ExpenseDraft) -> ZenSplitResult<Expense> {
        let splits = self.allocate(draft.amount, &draft.participants, &draft.policy)?;
        let expense = Expense::new(
            draft.description,
            draft.amount,
            draft.payer,
            splits,
            Some(draft.policy.kind()),
            self.epsilon,
        )?;

        Ok(match draft.group {
            Some(group) => expense.in_group(group),
            None => expense,
        })
    }

    fn allocate_fixed(
        &self,
        amount: Money,
        participants: &BTreeSet<ParticipantId>,
        amounts: &Splits,
    ) -> ZenSplitResult<Splits> {
        if let Some(stranger) = amounts.keys().find(|id| !participants.contains(*id)) {
            return Err(ZenSplitError::InvalidSplit(format!(
                "{} is not a participant",
                stranger
            )));
        }
        if let Some(missing) = participants.iter().find(|id| !amounts.contains_key(*id)) {
            return Err(ZenSplitError::InvalidSplit(format!(
                "no amount given for {}",
                missing
            )));
        }
        if let Some((id, _)) = amounts.iter().find(|(_, owed)| owed.is_negative()) {
            return Err(ZenSplitError::InvalidSplit(format!(
                "{} cannot owe a negative amount",
                id
            )));
        }

        let total = Money::checked_sum(amounts.values()).ok_or_else(|| {
            ZenSplitError::InvalidSplit("amounts overflow when added up".to_string())
        })?;
        if !total.within(amount, self.epsilon) {
            return Err(ZenSplitError::InvalidSplit(format!(
                "amounts sum to {}, expected {}",
                total, amount
            )));
        }

        Ok(amounts.clone())
    }
}

fn allocate_equal(amount: Money, participants: &BTreeSet<ParticipantId>) -> Splits {
    let n = participants.len() as i64;
    let share = Money::from_cents(amount.cents() / n);

    let mut splits: Splits = participants.iter().map(|id| (id.clone(), share)).collect();
    let allocated: Money = splits.values().sum();
    let residual = amount - allocated;
    let eligible: Vec<ParticipantId> = participants.iter().cloned().collect();
    distribute_residual(&mut splits, &eligible, residual);
    splits
}

fn allocate_percentage(
    amount: Money,
    participants: &BTreeSet<ParticipantId>,
    percentages: &Percentages,
) -> ZenSplitResult<Splits> {
    if let Some(stranger) = percentages.keys().find(|id| !participants.contains(*id)) {
        return Err(ZenSplitError::InvalidSplit(format!(
            "{} is not a participant",
            stranger
        )));
    }
    if let Some((id, pct)) = percentages
        .iter()
        .find(|(_, pct)| **pct < Decimal::ZERO || **pct > Decimal::ONE_HUNDRED)
    {
        return Err(ZenSplitError::InvalidSplit(format!(
            "percentage for {} must be between 0 and 100, got {}",
            id, pct
        )));
    }

    let total: Decimal = percentages.values().sum();
    if (total - Decimal::ONE_HUNDRED).abs() > PERCENT_TOLERANCE {
        return Err(ZenSplitError::InvalidSplit(format!(
            "percentages sum to {}, expected 100",
            total
        )));
    }

    let mut splits = Splits::new();
    for id in participants {
        let pct = percentages.get(id).copied().unwrap_or(Decimal::ZERO);
        let raw = amount.to_decimal() * pct / Decimal::ONE_HUNDRED;
        let share = Money::floor_from_decimal(raw).ok_or_else(|| {
            ZenSplitError::InvalidSplit(format!("share for {} is out of range", id))
        })?;
        splits.insert(id.clone(), share);
    }

    // Participants at 0% never absorb residual cents
    let eligible: Vec<ParticipantId> = participants
        .iter()
        .filter(|id| percentages.get(*id).is_some_and(|pct| !pct.is_zero()))
        .cloned()
        .collect();

    let allocated: Money = splits.values().sum();
    distribute_residual(&mut splits, &eligible, amount - allocated);
    Ok(splits)
}

/// Spread `residual` over `eligible` one cent at a time, in order, so the
/// splits add up to the expense amount exactly
///
/// A positive residual is dealt round-robin; a negative one is taken back
/// round-robin from participants who still hold a positive share.
fn distribute_residual(splits: &mut Splits, eligible: &[ParticipantId], residual: Money) {
    if eligible.is_empty() || residual.is_zero() {
        return;
    }

    if residual.is_positive() {
        let n = eligible.len() as i64;
        let per_head = residual.cents() / n;
        let extra = residual.cents() % n;
        for (idx, id) in eligible.iter().enumerate() {
            let bump = per_head + i64::from((idx as i64) < extra);
            if let Some(share) = splits.get_mut(id) {
                *share += Money::from_cents(bump);
            }
        }
        return;
    }

    let mut owed_back = residual.abs().cents();
    while owed_back > 0 {
        let mut progressed = false;
        for id in eligible {
            if owed_back == 0 {
                break;
            }
            if let Some(share) = splits.get_mut(id) {
                if share.is_positive() {
                    *share -= Money::CENT;
                    owed_back -= 1;
                    progressed = true;
                }
            }
        }
        if !progressed {
            break;
        }
    }
}
