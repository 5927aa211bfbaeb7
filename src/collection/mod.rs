// 🗄️ Backing Store - document collection seam
//
// The ledger store never talks to a database directly; it goes through a
// Collection. SQLite is the durable backend, memory is for tests and
// throwaway runs.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryCollection;
pub use sqlite::SqliteCollection;

use crate::error::Result;
use crate::model::Account;

/// Mutation applied to one document inside `update_one`
pub type Mutation<'a> = &'a mut dyn FnMut(&mut Account) -> Result<()>;

pub trait Collection {
    /// Insert a new document. Fails with `DuplicateKey` if a live document
    /// already uses the same account number.
    fn insert(&mut self, account: &Account) -> Result<()>;

    /// Exact match on account number
    fn find_one(&self, account_number: &str) -> Result<Option<Account>>;

    /// Every document, in stable insertion order
    fn find_all(&self) -> Result<Vec<Account>>;

    /// Read-modify-write one document as a single unit.
    /// Returns `None` when no document matches; an error from `apply`
    /// leaves the stored document untouched.
    fn update_one(&mut self, account_number: &str, apply: Mutation<'_>) -> Result<Option<Account>>;

    /// Delete by document id. Returns whether anything was removed.
    fn delete_one(&mut self, id: &str) -> Result<bool>;

    /// Drop every document, returning how many were removed
    fn clear(&mut self) -> Result<usize>;

    fn count(&self) -> Result<usize> {
        Ok(self.find_all()?.len())
    }
}
