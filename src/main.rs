use account_ledger::{logging, seed, AccountStore, LedgerConfig, SqliteCollection, TransactionType};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser)]
#[command(name = "account-ledger", version, about = "Bank account ledger over SQLite")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file (overrides config and LEDGER_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reset the database and load the demo accounts
    Seed,
    /// Import accounts from a CSV file (name,account_number,balance)
    Import { csv: PathBuf },
    /// Print every account
    List,
    /// Print one account with its transactions
    Show { account_number: String },
    /// Open a named account
    Create {
        name: String,
        account_number: String,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        balance: i64,
    },
    /// Add money and log a deposit
    Deposit {
        account_number: String,
        #[arg(allow_hyphen_values = true)]
        amount: i64,
    },
    /// Take money out and log a withdrawal (sign is optional)
    Withdraw {
        account_number: String,
        #[arg(allow_hyphen_values = true)]
        amount: i64,
    },
    /// Set the balance outright (logged as a balance-update entry)
    SetBalance {
        account_number: String,
        #[arg(allow_hyphen_values = true)]
        balance: i64,
    },
    /// Remove an account and its transactions
    Delete { account_number: String },
    /// Remove same-name duplicates and unnamed accounts
    Cleanup,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = LedgerConfig::load(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config.database = db;
    }
    logging::init(&config.log_level);

    let mut store = AccountStore::<SqliteCollection>::open(&config)
        .with_context(|| format!("Failed to open {}", config.database.display()))?;

    match cli.command {
        Command::Seed => {
            let report = seed::run(&mut store, &config.seed)?;
            println!(
                "✓ Seeded {} accounts with {} mock transactions",
                report.accounts_created, report.mock_transactions
            );
            println!(
                "✓ Removed {} duplicates, {} unnamed, {} deleted",
                report.duplicates_removed, report.unnamed_removed, report.accounts_deleted
            );
            print_accounts(&store)?;
        }
        Command::Import { csv } => {
            let accounts = seed::load_accounts_csv(&csv)?;
            let total = accounts.len();
            let mut imported = 0;
            for account in accounts {
                match store.insert_account(account) {
                    Ok(_) => imported += 1,
                    Err(e) => warn!(error = %e, "skipped row"),
                }
            }
            println!("✓ Imported {} of {} accounts", imported, total);
        }
        Command::List => print_accounts(&store)?,
        Command::Show { account_number } => {
            let account = store.find_account(&account_number)?;
            println!("{}", serde_json::to_string_pretty(&account)?);
        }
        Command::Create {
            name,
            account_number,
            balance,
        } => {
            let account = store.create_account(&name, &account_number, balance)?;
            println!("✓ {}", account);
        }
        Command::Deposit {
            account_number,
            amount,
        } => {
            let account =
                store.apply_transaction(&account_number, TransactionType::Deposit, amount)?;
            println!("✓ {}", account);
        }
        Command::Withdraw {
            account_number,
            amount,
        } => {
            let account =
                store.apply_transaction(&account_number, TransactionType::Withdrawal, amount)?;
            println!("✓ {}", account);
        }
        Command::SetBalance {
            account_number,
            balance,
        } => {
            let account = store.update_balance(&account_number, balance)?;
            println!("✓ {}", account);
        }
        Command::Delete { account_number } => {
            if store.delete_account(&account_number)? {
                println!("✓ Deleted {}", account_number);
            } else {
                println!("Nothing to delete for {}", account_number);
            }
        }
        Command::Cleanup => {
            let duplicates = store.deduplicate_by_name()?;
            let unnamed = store.purge_unnamed()?;
            println!(
                "✓ Removed {} duplicate and {} unnamed accounts",
                duplicates, unnamed
            );
        }
    }

    Ok(())
}

fn print_accounts(store: &AccountStore<SqliteCollection>) -> Result<()> {
    let accounts = store.list_accounts()?;
    if accounts.is_empty() {
        println!("No accounts.");
    }
    for account in accounts {
        println!("{}", account);
        for tx in &account.transactions {
            println!("    {} {:>8} {}", tx.timestamp.to_rfc3339(), tx.amount, tx.kind);
        }
    }
    Ok(())
}
