// ⚠️ Ledger Errors - every backing-store fault is normalised here
// Callers only ever see LedgerError, never a raw rusqlite error

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Lookup or mutation targeted an account number with no live record
    #[error("account not found: {account_number}")]
    NotFound { account_number: String },

    /// A live record already uses this account number
    #[error("duplicate account number: {account_number}")]
    DuplicateKey { account_number: String },

    /// A stored document already carries this document id
    #[error("duplicate document id: {id}")]
    DuplicateId { id: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("balance overflow on account {account_number}")]
    BalanceOverflow { account_number: String },

    /// Stored document could not be (de)serialized
    #[error("malformed account document: {0}")]
    MalformedDocument(#[from] serde_json::Error),

    #[error("backing store unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),
}

impl LedgerError {
    pub fn not_found(account_number: &str) -> Self {
        LedgerError::NotFound {
            account_number: account_number.to_string(),
        }
    }

    pub fn duplicate(account_number: &str) -> Self {
        LedgerError::DuplicateKey {
            account_number: account_number.to_string(),
        }
    }

    pub fn duplicate_id(id: &str) -> Self {
        LedgerError::DuplicateId { id: id.to_string() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::NotFound { .. })
    }

    /// Only store faults are worth retrying; the rest are caller mistakes
    pub fn is_transient(&self) -> bool {
        matches!(self, LedgerError::StoreUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = LedgerError::not_found("42");
        assert!(err.is_not_found());
        assert!(!err.is_transient());
        assert_eq!(err.to_string(), "account not found: 42");
    }

    #[test]
    fn test_store_error_is_transient() {
        let err: LedgerError = rusqlite::Error::InvalidQuery.into();
        assert!(err.is_transient());
        assert!(err.to_string().starts_with("backing store unavailable"));
    }
}
