//! Settlement transfers

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ParticipantId;
use super::money::Money;

/// A suggested payment from a debtor to a creditor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
}

impl Transfer {
    pub fn new(from: ParticipantId, to: ParticipantId, amount: Money) -> Self {
        Self { from, to, amount }
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} {}", self.from, self.to, self.amount)
    }
}
