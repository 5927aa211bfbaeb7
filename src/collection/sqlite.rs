use super::{Collection, Mutation};
use crate::error::{LedgerError, Result};
use crate::model::Account;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

/// Accounts stored as JSON documents in one SQLite table.
/// `account_number` and `name` are projected into columns for lookups.
pub struct SqliteCollection {
    conn: Connection,
}

impl SqliteCollection {
    /// Open (or create) a database file with WAL enabled
    pub fn open(path: &Path, busy_timeout: Duration) -> Result<Self> {
        let conn = Connection::open(path)?;
        // WAL for crash recovery
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
        conn.busy_timeout(busy_timeout)?;
        Self::from_connection(conn)
    }

    /// Private in-memory database (tests, dry runs)
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        setup_schema(&conn)?;
        Ok(SqliteCollection { conn })
    }
}

pub fn setup_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS accounts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            doc_id TEXT UNIQUE NOT NULL,
            account_number TEXT UNIQUE NOT NULL,
            name TEXT,
            document TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_accounts_name ON accounts(name)",
        [],
    )?;

    Ok(())
}

fn decode(document: &str) -> Result<Account> {
    Ok(serde_json::from_str(document)?)
}

impl Collection for SqliteCollection {
    fn insert(&mut self, account: &Account) -> Result<()> {
        let document = serde_json::to_string(account)?;

        let result = self.conn.execute(
            "INSERT INTO accounts (doc_id, account_number, name, document)
             VALUES (?1, ?2, ?3, ?4)",
            params![account.id, account.account_number, account.name, document],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, Some(msg)))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                // "UNIQUE constraint failed: accounts.<column>"
                if msg.ends_with("accounts.account_number") {
                    Err(LedgerError::duplicate(&account.account_number))
                } else if msg.ends_with("accounts.doc_id") {
                    Err(LedgerError::duplicate_id(&account.id))
                } else {
                    Err(LedgerError::InvalidInput(msg))
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    fn find_one(&self, account_number: &str) -> Result<Option<Account>> {
        let document: Option<String> = self
            .conn
            .query_row(
                "SELECT document FROM accounts WHERE account_number = ?1",
                params![account_number],
                |row| row.get(0),
            )
            .optional()?;

        document.as_deref().map(decode).transpose()
    }

    fn find_all(&self) -> Result<Vec<Account>> {
        let mut stmt = self
            .conn
            .prepare("SELECT document FROM accounts ORDER BY id ASC")?;

        let documents = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        documents.iter().map(|doc| decode(doc)).collect()
    }

    fn update_one(&mut self, account_number: &str, apply: Mutation<'_>) -> Result<Option<Account>> {
        // IMMEDIATE takes the write lock up front so the read and the write
        // see the same document
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let document: Option<String> = tx
            .query_row(
                "SELECT document FROM accounts WHERE account_number = ?1",
                params![account_number],
                |row| row.get(0),
            )
            .optional()?;

        let Some(document) = document else {
            return Ok(None);
        };

        let mut account = decode(&document)?;
        apply(&mut account)?;

        tx.execute(
            "UPDATE accounts SET document = ?1, name = ?2 WHERE account_number = ?3",
            params![serde_json::to_string(&account)?, account.name, account_number],
        )?;
        tx.commit()?;

        Ok(Some(account))
    }

    fn delete_one(&mut self, id: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM accounts WHERE doc_id = ?1", params![id])?;
        Ok(removed > 0)
    }

    fn clear(&mut self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM accounts", [])?)
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
