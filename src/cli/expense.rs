//! Expense CLI commands
//!
//! Implements adding, listing, showing and removing recorded expenses.

use clap::Subcommand;

use super::args::{parse_amount, parse_participant, PolicyArgs};
use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::{ZenSplitError, ZenSplitResult};
use crate::models::ExpenseRecord;
use crate::services::ExpenseDraft;
use crate::storage::ExpenseStore;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        description: String,

        /// Amount paid (e.g. 100, 12.50, ₹1,200)
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Who paid (defaults to the configured identity)
        #[arg(short, long)]
        payer: Option<String>,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Optional group label (e.g. goa-trip)
        #[arg(short, long)]
        group: Option<String>,
    },

    /// List recorded expenses
    #[command(alias = "ls")]
    List,

    /// Show one expense with its shares
    Show {
        /// Expense ID (or a prefix of it)
        id: String,
    },

    /// Remove an expense
    #[command(alias = "rm")]
    Remove {
        /// Expense ID (or a prefix of it)
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    settings: &Settings,
    store: &mut ExpenseStore,
    cmd: ExpenseCommands,
) -> ZenSplitResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            payer,
            policy,
            group,
        } => {
            let payer = match payer {
                Some(p) => parse_participant(&p)?,
                None => settings.default_identity.clone().ok_or_else(|| {
                    ZenSplitError::Validation(
                        "No payer given; pass --payer or set default_identity in config.json"
                            .into(),
                    )
                })?,
            };
            let (participants, policy) = policy.resolve()?;

            let expense = settings.allocator().create_expense(ExpenseDraft {
                description,
                amount: parse_amount(&amount)?,
                payer,
                participants,
                policy,
                group,
            })?;

            store.add(&expense)?;
            store.save()?;

            println!("Recorded expense {}", expense.id());
            println!();
            print!("{}", format_expense_details(&expense, symbol));
        }

        ExpenseCommands::List => {
            print!(
                "{}",
                format_expense_list(store.entries(), settings.epsilon, symbol)
            );
            if !store.is_empty() {
                println!();
            }
            println!("Total: {} expense(s)", store.len());
        }

        ExpenseCommands::Show { id } => {
            let entry = store.find(&id)?;
            match ExpenseRecord::from_json(entry).and_then(|r| r.validate(settings.epsilon)) {
                Ok(expense) => print!("{}", format_expense_details(&expense, symbol)),
                Err(reason) => {
                    println!("Expense: {}", ExpenseRecord::stored_description(entry));
                    println!("  This record is malformed and is ignored in balances: {}", reason);
                }
            }
        }

        ExpenseCommands::Remove { id } => {
            let removed = store.remove(&id)?;
            store.save()?;
            println!(
                "Removed expense: {}",
                ExpenseRecord::stored_description(&removed)
            );
        }
    }

    Ok(())
}
