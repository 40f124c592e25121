//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the engine.

pub mod args;
pub mod balances;
pub mod expense;
pub mod settle;
pub mod split;

pub use args::PolicyArgs;
pub use balances::{handle_balances_command, BalancesArgs};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use settle::{handle_settle_command, SettleArgs, SettleFormat};
pub use split::{handle_split_command, SplitArgs};
