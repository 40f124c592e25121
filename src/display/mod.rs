//! Display formatting for terminal output
//!
//! Plain-text tables for allocations, expenses, balance sheets and
//! settlement plans.

pub mod balance;
pub mod expense;
pub mod settlement;
pub mod split;

pub use balance::{format_balance_sheet, format_standing};
pub use expense::{format_expense_details, format_expense_list};
pub use settlement::format_settlement_plan;
pub use split::format_split;
