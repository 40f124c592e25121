//! Balance sheet command

use clap::Args;

use super::args::parse_participant;
use crate::config::Settings;
use crate::display::format_balance_sheet;
use crate::error::ZenSplitResult;
use crate::export::export_balances_csv;
use crate::storage::ExpenseStore;

/// Arguments for `zensplit balances`
#[derive(Args, Debug)]
pub struct BalancesArgs {
    /// Show your own standing as this participant (defaults to the configured identity)
    #[arg(long)]
    pub me: Option<String>,

    /// Print balances as CSV instead of a table
    #[arg(long)]
    pub csv: bool,
}

/// Handle the balance sheet
pub fn handle_balances_command(
    settings: &Settings,
    store: &ExpenseStore,
    args: BalancesArgs,
) -> ZenSplitResult<()> {
    let me = match args.me {
        Some(id) => Some(parse_participant(&id)?),
        None => settings.default_identity.clone(),
    };

    let report = settings
        .ledger()
        .compute_stored(store.entries(), me.as_ref());

    if args.csv {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        export_balances_csv(&report.balances, &mut handle)?;
    } else {
        print!("{}", format_balance_sheet(&report, &settings.currency_symbol));
    }

    Ok(())
}
