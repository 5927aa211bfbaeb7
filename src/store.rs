// 🏦 Account Ledger Store - create, look up, mutate and clean up accounts
//
// Every operation goes through an injected Collection. Balance changes and
// their log entries are issued as one document mutation.

use crate::collection::{Collection, MemoryCollection, SqliteCollection};
use crate::config::LedgerConfig;
use crate::deduplication::DeduplicationEngine;
use crate::error::{LedgerError, Result};
use crate::model::{Account, Transaction, TransactionType};
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct AccountStore<C: Collection> {
    collection: C,
    dedup: DeduplicationEngine,
}

impl AccountStore<SqliteCollection> {
    /// Open the SQLite database named in the config
    pub fn open(config: &LedgerConfig) -> Result<Self> {
        let collection = SqliteCollection::open(
            &config.database,
            Duration::from_millis(config.busy_timeout_ms),
        )?;
        info!(database = %config.database.display(), "ledger store opened");
        Ok(Self::new(collection))
    }
}

impl AccountStore<MemoryCollection> {
    pub fn in_memory() -> Self {
        Self::new(MemoryCollection::new())
    }
}

fn validate_account_number(account_number: &str) -> Result<()> {
    if account_number.trim().is_empty() {
        return Err(LedgerError::InvalidInput(
            "account number must not be empty".to_string(),
        ));
    }
    Ok(())
}

impl<C: Collection> AccountStore<C> {
    pub fn new(collection: C) -> Self {
        AccountStore {
            collection,
            dedup: DeduplicationEngine::new(),
        }
    }

    /// Swap the engine used by `deduplicate_by_name` (e.g. case-insensitive)
    pub fn with_dedup_engine(mut self, dedup: DeduplicationEngine) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    // ========================================================================
    // CREATE / READ
    // ========================================================================

    /// Create a named account with an empty transaction log.
    /// Rejects an account number that is already live.
    pub fn create_account(
        &mut self,
        name: &str,
        account_number: &str,
        initial_balance: i64,
    ) -> Result<Account> {
        self.insert_account(Account::new(name, account_number, initial_balance))
    }

    /// Persist a fully-formed document (imports, legacy data). The name may
    /// be missing; the account number must still be unique.
    pub fn insert_account(&mut self, account: Account) -> Result<Account> {
        validate_account_number(&account.account_number)?;
        self.collection.insert(&account)?;
        info!(
            account_number = %account.account_number,
            name = account.display_name(),
            balance = account.balance,
            "account created"
        );
        Ok(account)
    }

    pub fn find_account(&self, account_number: &str) -> Result<Account> {
        debug!(account_number, "looking up account");
        self.collection
            .find_one(account_number)?
            .ok_or_else(|| LedgerError::not_found(account_number))
    }

    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        self.collection.find_all()
    }

    pub fn count(&self) -> Result<usize> {
        self.collection.count()
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    fn mutate<F>(&mut self, account_number: &str, mut apply: F) -> Result<Account>
    where
        F: FnMut(&mut Account) -> Result<()>,
    {
        match self.collection.update_one(account_number, &mut apply)? {
            Some(account) => Ok(account),
            None => {
                warn!(account_number, "mutation targeted a missing account");
                Err(LedgerError::not_found(account_number))
            }
        }
    }

    /// Append one entry to the log. The balance is NOT changed.
    pub fn append_transaction(
        &mut self,
        account_number: &str,
        kind: TransactionType,
        amount: i64,
    ) -> Result<Transaction> {
        let mut appended = None;
        self.mutate(account_number, |account| {
            appended = Some(account.push_transaction(kind.clone(), amount));
            Ok(())
        })?;

        let transaction = appended.ok_or_else(|| LedgerError::not_found(account_number))?;
        info!(
            account_number,
            kind = %transaction.kind,
            amount = transaction.amount,
            "transaction appended"
        );
        Ok(transaction)
    }

    /// Append one entry AND move the balance by its signed amount, as a
    /// single mutation
    pub fn apply_transaction(
        &mut self,
        account_number: &str,
        kind: TransactionType,
        amount: i64,
    ) -> Result<Account> {
        if kind == TransactionType::BalanceUpdate {
            return Err(LedgerError::InvalidInput(
                "balance-update entries are written by update_balance".to_string(),
            ));
        }

        let account = self.mutate(account_number, |account| {
            let delta = kind.signed_amount(amount);
            account.balance = account.balance.checked_add(delta).ok_or_else(|| {
                LedgerError::BalanceOverflow {
                    account_number: account.account_number.clone(),
                }
            })?;
            account.push_transaction(kind.clone(), amount);
            Ok(())
        })?;

        info!(
            account_number,
            kind = %kind,
            amount = kind.signed_amount(amount),
            balance = account.balance,
            "transaction applied"
        );
        Ok(account)
    }

    /// Absolute set of the balance, logged as a `balance-update` entry
    /// carrying the new value
    pub fn update_balance(&mut self, account_number: &str, new_balance: i64) -> Result<Account> {
        let account = self.mutate(account_number, |account| {
            account.balance = new_balance;
            account.push_transaction(TransactionType::BalanceUpdate, new_balance);
            Ok(())
        })?;

        info!(account_number, balance = new_balance, "balance updated");
        Ok(account)
    }

    // ========================================================================
    // DELETION / CLEANUP
    // ========================================================================

    /// Remove the account and its log. Missing accounts are a no-op;
    /// the return value says whether anything was removed.
    pub fn delete_account(&mut self, account_number: &str) -> Result<bool> {
        let Some(account) = self.collection.find_one(account_number)? else {
            debug!(account_number, "delete of missing account ignored");
            return Ok(false);
        };

        let removed = self.collection.delete_one(&account.id)?;
        if removed {
            info!(account_number, "account deleted");
        }
        Ok(removed)
    }

    /// Keep the first account of every name (storage order), delete the rest.
    /// Returns how many records were deleted.
    pub fn deduplicate_by_name(&mut self) -> Result<usize> {
        let accounts = self.collection.find_all()?;
        let matches = self.dedup.find_duplicates(&accounts);

        let mut deleted = 0;
        for m in &matches {
            let account = &accounts[m.index];
            if self.collection.delete_one(&account.id)? {
                info!(
                    id = %account.id,
                    account_number = %account.account_number,
                    reason = %m.reason,
                    "deleted duplicate entry"
                );
                deleted += 1;
            }
        }

        Ok(deleted)
    }

    /// Delete every account document that has no name field
    pub fn purge_unnamed(&mut self) -> Result<usize> {
        let accounts = self.collection.find_all()?;
        let matches = self.dedup.find_unnamed(&accounts);

        let mut deleted = 0;
        for m in &matches {
            let account = &accounts[m.index];
            if self.collection.delete_one(&account.id)? {
                info!(
                    id = %account.id,
                    account_number = %account.account_number,
                    "deleted unnamed account"
                );
                deleted += 1;
            }
        }

        Ok(deleted)
    }

    /// Drop every account
    pub fn clear(&mut self) -> Result<usize> {
        let removed = self.collection.clear()?;
        info!(removed, "collection cleared");
        Ok(removed)
    }
}
