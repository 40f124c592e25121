//! Storage layer for the ZenSplit command line
//!
//! The engine never touches storage; this layer only exists so the CLI can
//! keep a local expense file between runs.

pub mod expenses;
pub mod file_io;

pub use expenses::ExpenseStore;
