//! ZenSplit - shared expense splitting and settlement
//!
//! This library provides the engine behind the `zensplit` command line tool:
//! it divides an expense among participants, nets every recorded expense into
//! per-participant balances, and plans a short list of payments that clears
//! those balances.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Money, ids, split policies, expenses, balances and transfers
//! - `services`: The engine (split allocator, balance ledger, settlement planner)
//! - `error`: Custom error types
//! - `config`: Configuration and path management
//! - `storage`: Local JSON expense file used by the CLI
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML settlement exports
//! - `cli`: Command handlers
//!
//! The engine is pure: it never reads files or prints, and the same input
//! always gives the same output.
//!
//! # Example
//!
//! ```rust
//! use zensplit::models::{ExpenseRecord, Money, ParticipantId, SplitPolicy};
//! use zensplit::services::{BalanceLedger, ExpenseDraft, SettlementPlanner, SplitAllocator};
//!
//! let participants = ["a", "b", "c"].into_iter().map(ParticipantId::from).collect();
//! let dinner = SplitAllocator::default().create_expense(ExpenseDraft {
//!     description: "Dinner".into(),
//!     amount: Money::from_cents(30000),
//!     payer: ParticipantId::from("a"),
//!     participants,
//!     policy: SplitPolicy::Equal,
//!     group: None,
//! })?;
//!
//! let records = vec![ExpenseRecord::from(&dinner)];
//! let report = BalanceLedger::default().compute_balances(&records, None);
//! let transfers = SettlementPlanner::default().plan(&report.balances)?;
//!
//! assert_eq!(transfers.len(), 2);
//! assert_eq!(transfers[0].amount, Money::from_cents(10000));
//! # Ok::<(), zensplit::ZenSplitError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ZenSplitError, ZenSplitResult};
pub use models::{Money, ParticipantId, Transfer};
pub use services::{BalanceLedger, SettlementPlanner, SplitAllocator};
