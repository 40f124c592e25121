//! Engine layer for ZenSplit
//!
//! The three engine stages, each pure and stateless:
//! allocator (amount + policy -> splits), ledger (records -> balances) and
//! planner (balances -> transfers). Data only flows forward through them.

pub mod allocator;
pub mod ledger;
pub mod planner;

pub use allocator::{ExpenseDraft, SplitAllocator};
pub use ledger::{BalanceLedger, LedgerDiagnostics, LedgerReport, LedgerSummary, SkippedRecord};
pub use planner::SettlementPlanner;
