//! Expense model
//!
//! An [`Expense`] is a validated, immutable record of one shared payment.
//! An [`ExpenseRecord`] is the shape an expense has once it has been stored
//! and read back: older or corrupted records may lack splits entirely, carry
//! them in the wrong shape, or have no policy tag. The ledger works from
//! records and validates each one before posting it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use super::ids::{ExpenseId, ParticipantId};
use super::money::Money;
use super::policy::{SplitKind, Splits};
use crate::error::{ZenSplitError, ZenSplitResult};

/// Why a stored record cannot be turned into an [`Expense`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("record has no amount")]
    MissingAmount,

    #[error("record has no payer")]
    MissingPayer,

    #[error("amount {0} is not positive")]
    NonPositiveAmount(Money),

    #[error("record has no splits")]
    MissingSplits,

    #[error("splits are not a participant-to-amount mapping")]
    SplitsNotAMapping,

    #[error("splits are empty")]
    EmptyParticipants,

    #[error("{0} owes a negative amount")]
    NegativeShare(ParticipantId),

    #[error("split keys do not match the participant list")]
    ParticipantMismatch,

    #[error("splits sum to {actual}, expected {expected}")]
    UnreconciledSplits { expected: Money, actual: Money },

    #[error("split amounts overflow when added up")]
    SplitsOverflow,

    #[error("posting the record would overflow a balance")]
    BalanceOverflow,

    #[error("record cannot be read: {0}")]
    Unreadable(String),
}

/// Check the invariants every expense must satisfy
fn check_invariants(amount: Money, splits: &Splits, epsilon: Money) -> Result<(), SkipReason> {
    if !amount.is_positive() {
        return Err(SkipReason::NonPositiveAmount(amount));
    }

    if splits.is_empty() {
        return Err(SkipReason::EmptyParticipants);
    }

    if let Some((participant, _)) = splits.iter().find(|(_, owed)| owed.is_negative()) {
        return Err(SkipReason::NegativeShare(participant.clone()));
    }

    let actual = Money::checked_sum(splits.values()).ok_or(SkipReason::SplitsOverflow)?;
    if !actual.within(amount, epsilon) {
        return Err(SkipReason::UnreconciledSplits {
            expected: amount,
            actual,
        });
    }

    Ok(())
}

/// A shared payment with its per-participant split
///
/// Fields are read-only once built; a correction is a delete followed by a
/// new expense.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    id: ExpenseId,
    description: String,
    amount: Money,
    payer: ParticipantId,
    participants: BTreeSet<ParticipantId>,
    splits: Splits,
    policy: Option<SplitKind>,
    group: Option<String>,
    created_at: DateTime<Utc>,
}

impl Expense {
    /// Build an expense from already-allocated splits
    ///
    /// The participant set is the key set of `splits`.
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        payer: ParticipantId,
        splits: Splits,
        policy: Option<SplitKind>,
        epsilon: Money,
    ) -> ZenSplitResult<Self> {
        check_invariants(amount, &splits, epsilon).map_err(|reason| match reason {
            SkipReason::NonPositiveAmount(amount) => ZenSplitError::NonPositiveAmount(amount),
            SkipReason::EmptyParticipants => ZenSplitError::EmptyParticipants,
            other => ZenSplitError::InvalidSplit(other.to_string()),
        })?;

        Ok(Self {
            id: ExpenseId::new(),
            description: description.into(),
            amount,
            payer,
            participants: splits.keys().cloned().collect(),
            splits,
            policy,
            group: None,
            created_at: Utc::now(),
        })
    }

    /// Attach the expense to a group
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn id(&self) -> &ExpenseId {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn payer(&self) -> &ParticipantId {
        &self.payer
    }

    pub fn participants(&self) -> &BTreeSet<ParticipantId> {
        &self.participants
    }

    pub fn splits(&self) -> &Splits {
        &self.splits
    }

    pub fn policy(&self) -> Option<SplitKind> {
        self.policy
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// What `participant` owes for this expense, if they take part
    pub fn share_of(&self, participant: &ParticipantId) -> Option<Money> {
        self.splits.get(participant).copied()
    }

    /// Whether the payer is also one of the participants
    pub fn payer_participates(&self) -> bool {
        self.splits.contains_key(&self.payer)
    }
}

/// An expense as read back from storage
///
/// Everything except the split mapping is typed; `splits` is kept as raw
/// JSON so that a single corrupt record can be skipped instead of failing
/// the whole load. Stored entries that do not even fit this shape are read
/// one at a time with [`ExpenseRecord::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ExpenseId>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub amount: Option<Money>,

    #[serde(default)]
    pub payer: Option<ParticipantId>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub participants: Vec<ParticipantId>,

    #[serde(default)]
    pub splits: Option<serde_json::Value>,

    /// Absent on records written before the policy tag existed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<SplitKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Treat an explicit `null` like a missing list
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ParticipantId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ParticipantId>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ExpenseRecord {
    /// Read one stored JSON entry
    pub fn from_json(entry: &serde_json::Value) -> Result<Self, SkipReason> {
        Self::deserialize(entry).map_err(|e| SkipReason::Unreadable(e.to_string()))
    }

    /// The id of a stored entry, readable even when the rest of it is not
    pub fn stored_id(entry: &serde_json::Value) -> Option<ExpenseId> {
        entry
            .get("id")
            .and_then(serde_json::Value::as_str)
            .map(ExpenseId::from_raw)
    }

    /// The description of a stored entry, or an empty string
    pub fn stored_description(entry: &serde_json::Value) -> &str {
        entry
            .get("description")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
    }

    /// Validate the record and turn it into an [`Expense`]
    ///
    /// An empty participant list is accepted and taken from the split keys;
    /// a non-empty one must match them exactly.
    pub fn validate(&self, epsilon: Money) -> Result<Expense, SkipReason> {
        let amount = self.amount.ok_or(SkipReason::MissingAmount)?;
        let payer = self.payer.clone().ok_or(SkipReason::MissingPayer)?;

        let splits: Splits = match &self.splits {
            None | Some(serde_json::Value::Null) => return Err(SkipReason::MissingSplits),
            Some(value @ serde_json::Value::Object(_)) => serde_json::from_value(value.clone())
                .map_err(|_| SkipReason::SplitsNotAMapping)?,
            Some(_) => return Err(SkipReason::SplitsNotAMapping),
        };

        if !self.participants.is_empty() {
            let listed: BTreeSet<&ParticipantId> = self.participants.iter().collect();
            if listed.len() != splits.len() || !splits.keys().all(|k| listed.contains(k)) {
                return Err(SkipReason::ParticipantMismatch);
            }
        }

        check_invariants(amount, &splits, epsilon)?;

        Ok(Expense {
            id: self.id.clone().unwrap_or_default(),
            description: self.description.clone(),
            amount,
            payer,
            participants: splits.keys().cloned().collect(),
            splits,
            policy: self.policy,
            group: self.group.clone(),
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}

impl From<&Expense> for ExpenseRecord {
    fn from(expense: &Expense) -> Self {
        Self {
            id: Some(expense.id.clone()),
            description: expense.description.clone(),
            amount: Some(expense.amount),
            payer: Some(expense.payer.clone()),
            participants: expense.participants.iter().cloned().collect(),
            splits: serde_json::to_value(&expense.splits).ok(),
            policy: expense.policy,
            group: expense.group.clone(),
            created_at: Some(expense.created_at),
        }
    }
}
