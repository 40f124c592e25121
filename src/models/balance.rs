//! Net balances
//!
//! A positive balance means the participant is owed money overall; a
//! negative balance means they owe money overall. A participant missing
//! from the mapping has no data, which is not the same as being settled.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::ids::ParticipantId;
use super::money::Money;
use super::settlement::Transfer;

/// Net balance per participant, in sorted-id order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balances(BTreeMap<ParticipantId, Money>);

impl Balances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of one participant, `None` if they never appeared
    pub fn get(&self, participant: &ParticipantId) -> Option<Money> {
        self.0.get(participant).copied()
    }

    /// Increase what `participant` is owed
    ///
    /// Returns `None`, leaving the balance unchanged, if it would overflow.
    pub fn credit(&mut self, participant: &ParticipantId, amount: Money) -> Option<()> {
        let updated = self.get(participant).unwrap_or_default().checked_add(amount)?;
        self.0.insert(participant.clone(), updated);
        Some(())
    }

    /// Increase what `participant` owes
    ///
    /// Returns `None`, leaving the balance unchanged, if it would overflow.
    pub fn debit(&mut self, participant: &ParticipantId, amount: Money) -> Option<()> {
        let updated = self.get(participant).unwrap_or_default().checked_sub(amount)?;
        self.0.insert(participant.clone(), updated);
        Some(())
    }

    /// Add every entry of `changes` to these balances
    ///
    /// All-or-nothing: if any balance would overflow, nothing is changed and
    /// `None` is returned.
    pub fn absorb(&mut self, changes: &Balances) -> Option<()> {
        let updated = changes
            .iter()
            .map(|(id, change)| {
                let current = self.get(id).unwrap_or_default();
                current.checked_add(change).map(|total| (id.clone(), total))
            })
            .collect::<Option<Vec<_>>>()?;
        self.0.extend(updated);
        Some(())
    }

    /// Sum of all balances; zero for a consistent ledger
    ///
    /// Saturates at the bounds of [`Money`] when the true total does not fit.
    pub fn total(&self) -> Money {
        let total: i128 = self.0.values().map(|amount| i128::from(amount.cents())).sum();
        let clamped = total.clamp(i128::from(i64::MIN), i128::from(i64::MAX));
        Money::from_cents(i64::try_from(clamped).unwrap_or_default())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, Money)> {
        self.0.iter().map(|(id, amount)| (id, *amount))
    }

    /// A copy of these balances with `transfers` paid out
    ///
    /// Paying a transfer raises the sender's balance and lowers the
    /// receiver's by the transferred amount. Returns `None` if a balance
    /// would overflow.
    pub fn apply(&self, transfers: &[Transfer]) -> Option<Balances> {
        let mut after = self.clone();
        for transfer in transfers {
            after.credit(&transfer.from, transfer.amount)?;
            after.debit(&transfer.to, transfer.amount)?;
        }
        Some(after)
    }

    /// True when every balance is negligible
    pub fn is_settled(&self, epsilon: Money) -> bool {
        self.0.values().all(|amount| amount.is_negligible(epsilon))
    }
}

impl FromIterator<(ParticipantId, Money)> for Balances {
    fn from_iter<I: IntoIterator<Item = (ParticipantId, Money)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Balances {
    type Item = (&'a ParticipantId, &'a Money);
    type IntoIter = std::collections::btree_map::Iter<'a, ParticipantId, Money>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Where one participant stands overall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "amount", rename_all = "snake_case")]
pub enum Standing {
    /// Others owe this participant the amount
    Owed(Money),
    /// This participant owes others the amount
    Owes(Money),
    /// Took part in expenses and is square
    Settled,
    /// Never appeared in any expense
    NoData,
}

impl Standing {
    /// Classify a balance lookup result
    pub fn from_balance(balance: Option<Money>, epsilon: Money) -> Self {
        match balance {
            None => Self::NoData,
            Some(amount) if amount.is_negligible(epsilon) => Self::Settled,
            Some(amount) if amount.is_positive() => Self::Owed(amount),
            Some(amount) => Self::Owes(amount.abs()),
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owed(_) => write!(f, "Others owe you"),
            Self::Owes(_) => write!(f, "You owe others"),
            Self::Settled => write!(f, "All settled up"),
            Self::NoData => write!(f, "No expenses yet"),
        }
    }
}
