//! Bank Policy Resolver
//!
//! Maps a free-text phrase containing a bank's name to a lending policy
//! record. Resolution never fails: an unknown bank silently degrades to
//! the universal defaults, with `matched = false` so the caller can warn
//! the user the data is generic.
//!
//! Lookup order: exact key after normalization, then containment in table
//! order (normalized phrase inside a key, or a key inside the phrase),
//! then defaults only.

use crate::error::{FactsError, Result};
use crate::models::{BankPolicy, BankPolicyOverride, ResolvedPolicy};
use tracing::debug;

/// Filler tokens stripped before lookup. Users type "get a HDFC bank home
/// loan", the table keys are bare bank names.
const FILLER_PREFIXES: &[&str] = &["GET AN ", "GET A ", "APPLY FOR ", "I WANT A "];
const FILLER_SUFFIXES: &[&str] = &[" HOME LOAN", " LOAN"];

/// Immutable bank policy table: universal defaults plus ordered
/// bank-specific overrides. Built once at process start.
#[derive(Debug, Clone)]
pub struct BankPolicyDirectory {
    defaults: BankPolicy,
    entries: Vec<(String, BankPolicyOverride)>,
    conservative: Vec<String>,
}

impl BankPolicyDirectory {
    /// Validate and normalize the table. Keys are uppercased; duplicates
    /// and empty keys are construction errors, not runtime surprises.
    pub fn new(
        defaults: BankPolicy,
        entries: Vec<(String, BankPolicyOverride)>,
        conservative: Vec<String>,
    ) -> Result<Self> {
        let mut normalized_entries = Vec::with_capacity(entries.len());
        for (key, overrides) in entries {
            let key = key.trim().to_uppercase();
            if key.is_empty() {
                return Err(FactsError::PolicyTableError(
                    "bank table key must not be empty".to_string(),
                ));
            }
            if normalized_entries.iter().any(|(existing, _)| *existing == key) {
                return Err(FactsError::PolicyTableError(format!(
                    "duplicate bank table key '{}'",
                    key
                )));
            }
            normalized_entries.push((key, overrides));
        }

        let conservative = conservative
            .into_iter()
            .map(|name| name.trim().to_uppercase())
            .filter(|name| !name.is_empty())
            .collect();

        Ok(Self {
            defaults,
            entries: normalized_entries,
            conservative,
        })
    }

    pub fn defaults(&self) -> &BankPolicy {
        &self.defaults
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a bank name or a loan phrase mentioning one. Always returns
    /// a fully-populated policy; `matched` reports whether any bank-specific
    /// record contributed.
    pub fn resolve(&self, text_or_name: &str) -> ResolvedPolicy {
        let normalized = normalize_bank_phrase(text_or_name);

        let hit = if normalized.is_empty() {
            // An empty phrase is contained in every key; never match it.
            None
        } else {
            self.entries
                .iter()
                .find(|(key, _)| *key == normalized)
                .or_else(|| {
                    self.entries.iter().find(|(key, _)| {
                        key.contains(&normalized) || normalized.contains(key.as_str())
                    })
                })
        };

        match hit {
            Some((key, overrides)) => {
                debug!(bank = %key, phrase = %normalized, "Bank policy matched");
                ResolvedPolicy {
                    policy: self.merged(key, overrides),
                    matched: true,
                }
            }
            None => {
                debug!(phrase = %normalized, "No bank matched; universal defaults apply");
                ResolvedPolicy {
                    policy: self.defaults.clone(),
                    matched: false,
                }
            }
        }
    }

    /// Canonical key of the conservative institution matching `bank`, if any.
    pub fn conservative_match(&self, bank: &str) -> Option<&str> {
        let normalized = normalize_bank_phrase(bank);
        if normalized.is_empty() {
            return None;
        }
        self.conservative
            .iter()
            .find(|key| {
                **key == normalized
                    || key.contains(&normalized)
                    || normalized.contains(key.as_str())
            })
            .map(|key| key.as_str())
    }

    pub fn is_conservative(&self, bank: &str) -> bool {
        self.conservative_match(bank).is_some()
    }

    fn merged(&self, bank: &str, overrides: &BankPolicyOverride) -> BankPolicy {
        let mut policy = self.defaults.clone();
        policy.bank = bank.to_string();

        if let Some(v) = &overrides.age_eligibility {
            policy.age_eligibility = v.clone();
        }
        if let Some(v) = overrides.benchmark {
            policy.benchmark = v;
        }
        if let Some(v) = &overrides.fee_structure {
            policy.fee_structure = v.clone();
        }
        if let Some(v) = &overrides.income_rule {
            policy.income_rule = v.clone();
        }
        if let Some(v) = &overrides.doc_recency {
            policy.doc_recency = v.clone();
        }

        policy
    }
}

/// Strip known filler tokens, uppercase, trim. Repeats until stable so
/// stacked fillers ("get a ... home loan") reduce fully.
pub fn normalize_bank_phrase(input: &str) -> String {
    let mut phrase = input.trim().to_uppercase();

    loop {
        let before = phrase.len();

        for prefix in FILLER_PREFIXES {
            if let Some(rest) = phrase.strip_prefix(prefix) {
                phrase = rest.trim_start().to_string();
            }
        }
        for suffix in FILLER_SUFFIXES {
            if let Some(rest) = phrase.strip_suffix(suffix) {
                phrase = rest.trim_end().to_string();
            }
        }

        if phrase.len() == before {
            break;
        }
    }

    phrase.trim().to_string()
}

//
// ================= Tests =================
//
