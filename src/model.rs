// 💳 Account Documents - one document per account, transactions embedded
//
// Identity: `id` (UUID, never changes) plays the role of a document key.
// Lookup key: `account_number` (unique across live documents).
// `name` is a display value and may be missing on legacy documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// TRANSACTION TYPE
// ============================================================================

/// Closed set of known entry types plus a fallback for anything else
/// found in stored documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    BalanceUpdate,
    Other(String),
}

impl TransactionType {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdrawal => "withdrawal",
            TransactionType::BalanceUpdate => "balance-update",
            TransactionType::Other(kind) => kind,
        }
    }

    /// Apply the sign convention: deposits are positive, withdrawals are
    /// negative, everything else is stored as given.
    pub fn signed_amount(&self, amount: i64) -> i64 {
        match self {
            TransactionType::Deposit => amount.saturating_abs(),
            TransactionType::Withdrawal => amount.saturating_abs().saturating_neg(),
            TransactionType::BalanceUpdate | TransactionType::Other(_) => amount,
        }
    }
}

impl From<String> for TransactionType {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "deposit" => TransactionType::Deposit,
            "withdrawal" => TransactionType::Withdrawal,
            // legacy documents spell it with a space
            "balance-update" | "balance update" => TransactionType::BalanceUpdate,
            _ => TransactionType::Other(value),
        }
    }
}

impl From<&str> for TransactionType {
    fn from(value: &str) -> Self {
        TransactionType::from(value.to_string())
    }
}

impl From<TransactionType> for String {
    fn from(value: TransactionType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TRANSACTION
// ============================================================================

/// Immutable log entry. `amount` is signed (see `TransactionType::signed_amount`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: i64,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// ACCOUNT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Stable document identity
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub account_number: String,

    pub balance: i64,

    /// Append-only, insertion order is chronological order
    #[serde(default)]
    pub transactions: Vec<Transaction>,

    pub created_at: DateTime<Utc>,
}

impl Account {
    /// New named account with an empty log
    pub fn new(name: &str, account_number: &str, balance: i64) -> Self {
        Account {
            id: uuid::Uuid::new_v4().to_string(),
            name: Some(name.to_string()),
            account_number: account_number.to_string(),
            balance,
            transactions: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Account document without a `name` field (legacy/imported data)
    pub fn unnamed(account_number: &str, balance: i64) -> Self {
        Account {
            name: None,
            ..Account::new("", account_number, balance)
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    /// Timestamp for the next entry: never earlier than the last one logged
    pub fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        match self.transactions.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        }
    }

    /// Append an entry with a store-assigned timestamp; balance is untouched
    pub fn push_transaction(&mut self, kind: TransactionType, amount: i64) -> Transaction {
        let transaction = Transaction {
            amount: kind.signed_amount(amount),
            kind,
            timestamp: self.next_timestamp(),
        };
        self.transactions.push(transaction.clone());
        transaction
    }

    /// Sum of every logged deposit/withdrawal/custom amount.
    /// Balance-update entries record absolute values and are skipped.
    pub fn transaction_total(&self) -> i64 {
        self.transactions
            .iter()
            .filter(|t| t.kind != TransactionType::BalanceUpdate)
            .map(|t| t.amount)
            .sum()
    }

    pub fn is_overdrawn(&self) -> bool {
        self.balance < 0
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | balance {} | {} transactions",
            self.account_number,
            self.display_name(),
            self.balance,
            self.transactions.len()
        )
    }
}
