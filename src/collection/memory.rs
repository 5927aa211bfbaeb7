use super::{Collection, Mutation};
use crate::error::{LedgerError, Result};
use crate::model::Account;

/// Vec-backed collection. Insertion order is the enumeration order.
#[derive(Debug, Default)]
pub struct MemoryCollection {
    documents: Vec<Account>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Collection for MemoryCollection {
    fn insert(&mut self, account: &Account) -> Result<()> {
        if self.documents.iter().any(|a| a.id == account.id) {
            return Err(LedgerError::duplicate_id(&account.id));
        }
        if self
            .documents
            .iter()
            .any(|a| a.account_number == account.account_number)
        {
            return Err(LedgerError::duplicate(&account.account_number));
        }
        self.documents.push(account.clone());
        Ok(())
    }

    fn find_one(&self, account_number: &str) -> Result<Option<Account>> {
        Ok(self
            .documents
            .iter()
            .find(|a| a.account_number == account_number)
            .cloned())
    }

    fn find_all(&self) -> Result<Vec<Account>> {
        Ok(self.documents.clone())
    }

    fn update_one(&mut self, account_number: &str, apply: Mutation<'_>) -> Result<Option<Account>> {
        let Some(slot) = self
            .documents
            .iter_mut()
            .find(|a| a.account_number == account_number)
        else {
            return Ok(None);
        };

        // Mutate a copy so a failed mutation leaves the document as it was
        let mut account = slot.clone();
        apply(&mut account)?;
        *slot = account.clone();

        Ok(Some(account))
    }

    fn delete_one(&mut self, id: &str) -> Result<bool> {
        match self.documents.iter().position(|a| a.id == id) {
            Some(index) => {
                self.documents.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn clear(&mut self) -> Result<usize> {
        let removed = self.documents.len();
        self.documents.clear();
        Ok(removed)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.documents.len())
    }
}
