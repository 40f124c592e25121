//! Split preview command
//!
//! Shows how an amount would be divided without recording anything.

use clap::Args;

use super::args::{parse_amount, PolicyArgs};
use crate::config::Settings;
use crate::display::format_split;
use crate::error::ZenSplitResult;
use crate::models::SplitPolicy;

/// Arguments for `zensplit split`
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Amount to split (e.g. 100, 12.50, ₹1,200)
    #[arg(allow_hyphen_values = true)]
    pub amount: String,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

/// Handle the split preview
pub fn handle_split_command(settings: &Settings, args: SplitArgs) -> ZenSplitResult<()> {
    let amount = parse_amount(&args.amount)?;
    let (participants, policy) = args.policy.resolve()?;

    let splits = settings.allocator().allocate(amount, &participants, &policy)?;

    println!(
        "Splitting {} ({}):",
        amount.format_with_symbol(&settings.currency_symbol),
        policy.kind()
    );
    if let SplitPolicy::Percentage { percentages } = &policy {
        let table: Vec<String> = percentages
            .iter()
            .map(|(id, pct)| format!("{} {}%", id, pct))
            .collect();
        println!("Percentages: {}", table.join(", "));
    }
    println!();
    print!("{}", format_split(&splits, &settings.currency_symbol));

    Ok(())
}
