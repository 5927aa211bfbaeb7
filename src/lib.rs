// Account Ledger - Core Library
// Accounts with embedded transaction logs over a document collection

pub mod collection;
pub mod config;
pub mod deduplication;
pub mod error;
pub mod logging;
pub mod model;
pub mod seed;
pub mod store;

// Re-export commonly used types
pub use collection::{Collection, MemoryCollection, SqliteCollection};
pub use config::{LedgerConfig, SeedConfig};
pub use deduplication::{DeduplicationEngine, DuplicateMatch, MatchStrategy};
pub use error::{LedgerError, Result};
pub use model::{Account, Transaction, TransactionType};
pub use seed::{load_accounts_csv, MockTransactionGenerator, SeedReport};
pub use store::AccountStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
