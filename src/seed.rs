// 🌱 Seed Procedure - sample accounts, mock activity, one-off cleanup
//
// Populates a store the way a demo bank is set up: four customers, a few
// random deposits/withdrawals each, a handful of fixed example entries,
// then the cleanup sweeps and a final balance correction.

use crate::collection::Collection;
use crate::config::SeedConfig;
use crate::model::{Account, TransactionType};
use crate::store::AccountStore;
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

// ============================================================================
// SAMPLE DATA
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedAccount {
    #[serde(default)]
    pub name: Option<String>,
    pub account_number: String,
    pub balance: i64,
}

impl SeedAccount {
    fn named(name: &str, account_number: &str, balance: i64) -> Self {
        SeedAccount {
            name: Some(name.to_string()),
            account_number: account_number.to_string(),
            balance,
        }
    }

    pub fn into_account(self) -> Account {
        match self.name.filter(|n| !n.trim().is_empty()) {
            Some(name) => Account::new(&name, &self.account_number, self.balance),
            None => Account::unnamed(&self.account_number, self.balance),
        }
    }
}

pub fn default_accounts() -> Vec<SeedAccount> {
    vec![
        SeedAccount::named("Alice", "1", 1000),
        SeedAccount::named("Bob", "2", 2500),
        SeedAccount::named("Charlie", "3", 500),
        SeedAccount::named("David", "4", 1500),
    ]
}

/// Fixed entries applied after the random ones
pub fn example_transactions() -> Vec<(&'static str, TransactionType, i64)> {
    vec![
        ("1", TransactionType::Deposit, 500),
        ("2", TransactionType::Withdrawal, 300),
        ("3", TransactionType::Deposit, 200),
        ("4", TransactionType::Withdrawal, 100),
    ]
}

/// Load accounts from CSV with headers `name,account_number,balance`.
/// An empty name produces an unnamed document.
pub fn load_accounts_csv(csv_path: &Path) -> Result<Vec<Account>> {
    let mut rdr = csv::Reader::from_path(csv_path).context("Failed to open CSV file")?;

    let mut accounts = Vec::new();
    for result in rdr.deserialize() {
        let row: SeedAccount = result.context("Failed to deserialize account row")?;
        accounts.push(row.into_account());
    }

    Ok(accounts)
}

// ============================================================================
// MOCK TRANSACTIONS
// ============================================================================

pub struct MockTransactionGenerator {
    rng: StdRng,
    config: SeedConfig,
}

impl MockTransactionGenerator {
    pub fn new(config: &SeedConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        MockTransactionGenerator {
            rng,
            config: config.clone(),
        }
    }

    /// Random deposits and withdrawals for one account. Amounts are
    /// magnitudes; the store applies the sign.
    pub fn generate(&mut self) -> Vec<(TransactionType, i64)> {
        let count = self
            .rng
            .gen_range(self.config.min_transactions..=self.config.max_transactions);

        (0..count)
            .map(|_| {
                let kind = if self.rng.gen_bool(0.5) {
                    TransactionType::Deposit
                } else {
                    TransactionType::Withdrawal
                };
                let amount = self
                    .rng
                    .gen_range(self.config.min_amount..=self.config.max_amount);
                (kind, amount)
            })
            .collect()
    }
}

// ============================================================================
// SEED RUN
// ============================================================================

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SeedReport {
    pub accounts_created: usize,
    pub mock_transactions: usize,
    pub duplicates_removed: usize,
    pub unnamed_removed: usize,
    pub accounts_deleted: usize,
}

/// Reset the store and run the whole demo sequence
pub fn run<C: Collection>(store: &mut AccountStore<C>, config: &SeedConfig) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    store.clear().context("Failed to reset account collection")?;

    for seed in default_accounts() {
        store
            .insert_account(seed.into_account())
            .context("Failed to create seed account")?;
        report.accounts_created += 1;
    }

    let mut generator = MockTransactionGenerator::new(config);
    for account in store.list_accounts()? {
        for (kind, amount) in generator.generate() {
            store.apply_transaction(&account.account_number, kind.clone(), amount)?;
            info!("{} of {} for {}", kind, amount, account.display_name());
            report.mock_transactions += 1;
        }
    }

    for (account_number, kind, amount) in example_transactions() {
        store.apply_transaction(account_number, kind, amount)?;
    }

    report.duplicates_removed = store.deduplicate_by_name()?;
    report.unnamed_removed = store.purge_unnamed()?;

    store.update_balance("1", 1200)?;
    if store.delete_account("3")? {
        report.accounts_deleted += 1;
    }

    info!(?report, "seed complete");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::MemoryCollection;

    fn seeded_config() -> SeedConfig {
        SeedConfig {
            rng_seed: Some(42),
            ..SeedConfig::default()
        }
    }

    #[test]
    fn test_generator_respects_ranges() {
        let mut generator = MockTransactionGenerator::new(&seeded_config());

        for _ in 0..50 {
            let batch = generator.generate();
            assert!((2..=3).contains(&batch.len()));
            for (kind, amount) in batch {
                assert!(matches!(kind, TransactionType::Deposit | TransactionType::Withdrawal));
                assert!((50..=300).contains(&amount));
            }
        }
    }

    #[test]
    fn test_generator_is_deterministic_with_seed() {
        let a = MockTransactionGenerator::new(&seeded_config()).generate();
        let b = MockTransactionGenerator::new(&seeded_config()).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_run() {
        let mut store = AccountStore::new(MemoryCollection::new());
        store.create_account("Leftover", "99", 0).unwrap();

        let report = run(&mut store, &seeded_config()).unwrap();

        assert_eq!(report.accounts_created, 4);
        assert!((8..=12).contains(&report.mock_transactions));
        assert_eq!(report.duplicates_removed, 0);
        assert_eq!(report.unnamed_removed, 0);
        assert_eq!(report.accounts_deleted, 1);

        let numbers: Vec<String> = store
            .list_accounts()
            .unwrap()
            .into_iter()
            .map(|a| a.account_number)
            .collect();
        assert_eq!(numbers, vec!["1", "2", "4"]);

        let alice = store.find_account("1").unwrap();
        assert_eq!(alice.balance, 1200);
        let last = alice.transactions.last().unwrap();
        assert_eq!(last.kind, TransactionType::BalanceUpdate);
        assert_eq!(last.amount, 1200);
    }

    #[test]
    fn test_seed_balances_follow_transactions() {
        let mut store = AccountStore::new(MemoryCollection::new());
        run(&mut store, &seeded_config()).unwrap();

        // Bob and David only ever move through apply_transaction
        for number in ["2", "4"] {
            let account = store.find_account(number).unwrap();
            let opening = default_accounts()
                .into_iter()
                .find(|s| s.account_number == number)
                .unwrap()
                .balance;
            assert_eq!(account.balance, opening + account.transaction_total());
        }
    }

    #[test]
    fn test_blank_name_becomes_unnamed() {
        let seed = SeedAccount {
            name: Some("  ".to_string()),
            account_number: "5".to_string(),
            balance: 10,
        };
        assert!(seed.into_account().name.is_none());
    }
}
