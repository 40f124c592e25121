use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use zensplit::cli::{
    handle_balances_command, handle_expense_command, handle_settle_command, handle_split_command,
    BalancesArgs, ExpenseCommands, SettleArgs, SplitArgs,
};
use zensplit::config::{paths::DATA_DIR_ENV, Settings, ZenSplitPaths};
use zensplit::storage::ExpenseStore;

/// Environment variable holding the log filter
const LOG_ENV: &str = "ZENSPLIT_LOG";

#[derive(Parser)]
#[command(
    name = "zensplit",
    version,
    about = "Split shared expenses and settle up with the fewest payments",
    long_about = "ZenSplit records who paid for what, works out how much each \
                  participant owes or is owed, and suggests a short list of \
                  payments that settles everyone up."
)]
struct Cli {
    /// Expense file to use instead of the default one
    #[arg(long, global = true, env = "ZENSPLIT_FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Preview how an amount would be split
    Split(SplitArgs),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Show everyone's net balance
    #[command(alias = "bal")]
    Balances(BalancesArgs),

    /// Suggest the payments that settle all balances
    Settle(SettleArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();

    // Initialize paths and settings
    let paths = ZenSplitPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let expenses_file = cli.file.unwrap_or_else(|| paths.expenses_file());

    match cli.command {
        Some(Commands::Split(args)) => {
            handle_split_command(&settings, args)?;
        }
        Some(Commands::Expense(cmd)) => {
            let mut store = ExpenseStore::open(&expenses_file)?;
            handle_expense_command(&settings, &mut store, cmd)?;
        }
        Some(Commands::Balances(args)) => {
            let store = ExpenseStore::open(&expenses_file)?;
            handle_balances_command(&settings, &store, args)?;
        }
        Some(Commands::Settle(args)) => {
            let store = ExpenseStore::open(&expenses_file)?;
            handle_settle_command(&settings, &store, args)?;
        }
        Some(Commands::Config) => {
            println!("ZenSplit Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Expense file:   {}", expenses_file.display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Zero tolerance:   {}", settings.epsilon);
            match &settings.default_identity {
                Some(me) => println!("  Default identity: {}", me),
                None => println!("  Default identity: (not set)"),
            }
            println!();
            println!("Set {} to use a different base directory.", DATA_DIR_ENV);
        }
        None => {
            println!("ZenSplit - shared expense splitting and settlement");
            println!();
            println!("Run 'zensplit --help' for usage information.");
        }
    }

    Ok(())
}
