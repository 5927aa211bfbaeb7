// 🔍 Deduplication Engine - detect account documents that should not survive
// Two rules: Same Name (keep the first, drop the rest) and Missing Name

use crate::model::Account;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// MATCH STRATEGY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchStrategy {
    /// Another account earlier in storage order has the same name
    SameName,

    /// Document has no name field at all
    MissingName,
}

// ============================================================================
// DUPLICATE MATCH RESULT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateMatch {
    /// Index of the record to remove
    pub index: usize,

    /// Index of the record that is kept in its place (SameName only)
    pub kept_index: Option<usize>,

    pub strategy: MatchStrategy,

    /// Human-readable reason
    pub reason: String,
}

// ============================================================================
// DEDUPLICATION ENGINE
// ============================================================================

pub struct DeduplicationEngine {
    /// Compare names case-insensitively (default: false, exact match)
    pub ignore_case: bool,

    /// Trim surrounding whitespace before comparing (default: false)
    pub trim_whitespace: bool,
}

impl DeduplicationEngine {
    /// Exact-match engine
    pub fn new() -> Self {
        DeduplicationEngine {
            ignore_case: false,
            trim_whitespace: false,
        }
    }

    fn normalize(&self, name: &str) -> String {
        let name = if self.trim_whitespace { name.trim() } else { name };
        if self.ignore_case {
            name.to_lowercase()
        } else {
            name.to_string()
        }
    }

    /// Find every account whose name was already seen earlier in `accounts`.
    /// The first occurrence of each name is the one kept. Unnamed accounts
    /// are never grouped here; see `find_unnamed`.
    pub fn find_duplicates(&self, accounts: &[Account]) -> Vec<DuplicateMatch> {
        let mut first_seen: HashMap<String, usize> = HashMap::new();
        let mut matches = Vec::new();

        for (i, account) in accounts.iter().enumerate() {
            let Some(name) = account.name.as_deref() else {
                continue;
            };

            let key = self.normalize(name);
            match first_seen.get(&key) {
                Some(&kept) => matches.push(DuplicateMatch {
                    index: i,
                    kept_index: Some(kept),
                    strategy: MatchStrategy::SameName,
                    reason: format!(
                        "Same name: {} | keeping {} | dropping {}",
                        name, accounts[kept].account_number, account.account_number
                    ),
                }),
                None => {
                    first_seen.insert(key, i);
                }
            }
        }

        matches
    }

    /// Find every account document with no name field
    pub fn find_unnamed(&self, accounts: &[Account]) -> Vec<DuplicateMatch> {
        accounts
            .iter()
            .enumerate()
            .filter(|(_, account)| account.name.is_none())
            .map(|(i, account)| DuplicateMatch {
                index: i,
                kept_index: None,
                strategy: MatchStrategy::MissingName,
                reason: format!("Missing name: {}", account.account_number),
            })
            .collect()
    }
}

impl Default for DeduplicationEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
