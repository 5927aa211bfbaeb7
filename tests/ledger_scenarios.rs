use account_ledger::{
    load_accounts_csv, Account, AccountStore, Collection, LedgerError, MemoryCollection,
    SqliteCollection, TransactionType,
};

fn sqlite_store() -> AccountStore<SqliteCollection> {
    AccountStore::new(SqliteCollection::open_in_memory().unwrap())
}

fn memory_store() -> AccountStore<MemoryCollection> {
    AccountStore::new(MemoryCollection::new())
}

fn bank_scenario<C: Collection>(mut store: AccountStore<C>) {
    for (name, number, balance) in [
        ("Alice", "1", 1000),
        ("Bob", "2", 2500),
        ("Charlie", "3", 500),
        ("David", "4", 1500),
    ] {
        store.create_account(name, number, balance).unwrap();
    }

    store
        .append_transaction("1", TransactionType::Deposit, 500)
        .unwrap();
    store.update_balance("1", 1200).unwrap();

    let alice = store.find_account("1").unwrap();
    assert_eq!(alice.balance, 1200);
    assert_eq!(alice.transactions.len(), 2);
    assert_eq!(alice.transactions[0].kind, TransactionType::Deposit);
    assert_eq!(alice.transactions[0].amount, 500);
    assert_eq!(alice.transactions[1].kind, TransactionType::BalanceUpdate);
    assert_eq!(alice.transactions[1].amount, 1200);
    assert!(alice.transactions[0].timestamp <= alice.transactions[1].timestamp);

    // Other accounts untouched
    assert_eq!(store.find_account("2").unwrap().balance, 2500);
    assert!(store.find_account("3").unwrap().transactions.is_empty());
}

#[test]
fn test_bank_scenario_sqlite() {
    bank_scenario(sqlite_store());
}

#[test]
fn test_bank_scenario_memory() {
    bank_scenario(memory_store());
}

fn dedup_scenario<C: Collection>(mut store: AccountStore<C>) {
    store.create_account("Alice", "1", 1000).unwrap();
    store.create_account("Alice", "9", 900).unwrap();
    store.create_account("Bob", "2", 2500).unwrap();

    assert_eq!(store.deduplicate_by_name().unwrap(), 1);

    let remaining = store.list_accounts().unwrap();
    assert_eq!(remaining.len(), 2);
    assert_eq!(
        remaining.iter().filter(|a| a.name.as_deref() == Some("Alice")).count(),
        1
    );
    assert_eq!(remaining[0].account_number, "1");
    assert!(store.find_account("9").unwrap_err().is_not_found());
}

#[test]
fn test_dedup_sqlite() {
    dedup_scenario(sqlite_store());
}

#[test]
fn test_dedup_memory() {
    dedup_scenario(memory_store());
}

fn reused_id_scenario<C: Collection>(mut store: AccountStore<C>) {
    let alice = store.create_account("Alice", "1", 10).unwrap();
    let copy = Account {
        account_number: "9".to_string(),
        ..alice.clone()
    };

    assert!(matches!(
        store.insert_account(copy),
        Err(LedgerError::DuplicateId { .. })
    ));
    store.create_account("Alice", "2", 20).unwrap();

    assert_eq!(store.deduplicate_by_name().unwrap(), 1);
    let remaining = store.list_accounts().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].account_number, "1");

    assert!(store.delete_account("1").unwrap());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_reused_id_sqlite() {
    reused_id_scenario(sqlite_store());
}

#[test]
fn test_reused_id_memory() {
    reused_id_scenario(memory_store());
}

#[test]
fn test_cleanup_sweeps_are_independent() {
    let mut store = sqlite_store();
    store.insert_account(Account::unnamed("50", 0)).unwrap();
    store.insert_account(Account::unnamed("51", 0)).unwrap();
    store.create_account("Eve", "5", 10).unwrap();
    store.create_account("Eve", "6", 20).unwrap();

    // Unnamed records are not name-duplicates of each other
    assert_eq!(store.deduplicate_by_name().unwrap(), 1);
    assert_eq!(store.count().unwrap(), 3);

    assert_eq!(store.purge_unnamed().unwrap(), 2);
    let remaining = store.list_accounts().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].account_number, "5");
}

#[test]
fn test_missing_account_mutations() {
    let mut store = memory_store();

    assert!(matches!(
        store.append_transaction("404", TransactionType::Withdrawal, 10),
        Err(LedgerError::NotFound { .. })
    ));
    assert!(matches!(
        store.update_balance("404", 10),
        Err(LedgerError::NotFound { .. })
    ));
    assert!(!store.delete_account("404").unwrap());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_file_backed_store_persists() {
    let path = std::env::temp_dir().join(format!("ledger-{}.db", uuid::Uuid::new_v4()));

    {
        let mut store = AccountStore::new(
            SqliteCollection::open(&path, std::time::Duration::from_secs(1)).unwrap(),
        );
        store.create_account("Alice", "1", 1000).unwrap();
        store
            .apply_transaction("1", TransactionType::Withdrawal, 250)
            .unwrap();
    }

    let store = AccountStore::new(
        SqliteCollection::open(&path, std::time::Duration::from_secs(1)).unwrap(),
    );
    let alice = store.find_account("1").unwrap();
    assert_eq!(alice.balance, 750);
    assert_eq!(alice.transactions[0].amount, -250);

    drop(store);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
    }
}

#[test]
fn test_csv_import() {
    let path = std::env::temp_dir().join(format!("accounts-{}.csv", uuid::Uuid::new_v4()));
    std::fs::write(
        &path,
        "name,account_number,balance\nAlice,1,1000\n,2,50\nBob,3,-20\n",
    )
    .unwrap();

    let accounts = load_accounts_csv(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(accounts.len(), 3);
    assert_eq!(accounts[0].name.as_deref(), Some("Alice"));
    assert!(accounts[1].name.is_none());
    assert_eq!(accounts[2].balance, -20);

    let mut store = memory_store();
    for account in accounts {
        store.insert_account(account).unwrap();
    }
    assert_eq!(store.purge_unnamed().unwrap(), 1);
    assert_eq!(store.count().unwrap(), 2);
}
