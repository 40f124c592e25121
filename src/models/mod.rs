//! Core data models for ZenSplit
//!
//! Money, identifiers, expenses and their splits, and the derived balance
//! and settlement values the engine produces.

pub mod balance;
pub mod expense;
pub mod ids;
pub mod money;
pub mod policy;
pub mod settlement;

pub use balance::{Balances, Standing};
pub use expense::{Expense, ExpenseRecord, SkipReason};
pub use ids::{ExpenseId, ParticipantId};
pub use money::{Money, MoneyParseError};
pub use policy::{even_percentages, Percentages, SplitKind, SplitPolicy, Splits};
pub use settlement::Transfer;
