//! Topic Classifier
//!
//! Routes raw user text to a topic from a fixed, ordered catalog:
//! - Uppercase the input, scan categories in declaration order
//! - First category with any keyword substring hit wins
//! - No hit is `None`, not an error
//!
//! Catalog order is the designed tie-break: urgent/specific categories are
//! declared before general ones, so overlapping keyword sets resolve the
//! same way on every call.

use crate::error::{FactsError, Result};
use crate::models::{TopicCategory, TopicId};
use std::collections::HashSet;

/// Validated, immutable topic catalog. Built once at process start.
#[derive(Debug, Clone)]
pub struct TopicCatalog {
    categories: Vec<TopicCategory>,
}

impl TopicCatalog {
    /// Validate and normalize a catalog: ids must be unique, every category
    /// needs at least one keyword, and keywords are uppercased so matching
    /// is case-insensitive by construction.
    pub fn new(categories: Vec<TopicCategory>) -> Result<Self> {
        if categories.is_empty() {
            return Err(FactsError::CatalogError(
                "topic catalog must contain at least one category".to_string(),
            ));
        }

        let mut seen: HashSet<&str> = HashSet::with_capacity(categories.len());
        for category in &categories {
            if !seen.insert(category.id.as_str()) {
                return Err(FactsError::CatalogError(format!(
                    "duplicate topic id '{}'",
                    category.id
                )));
            }
            if category.keywords.is_empty() {
                return Err(FactsError::CatalogError(format!(
                    "topic '{}' has no keywords",
                    category.id
                )));
            }
            if category.keywords.iter().any(|kw| kw.trim().is_empty()) {
                return Err(FactsError::CatalogError(format!(
                    "topic '{}' has an empty keyword",
                    category.id
                )));
            }
        }

        let categories = categories
            .into_iter()
            .map(|category| TopicCategory {
                id: category.id,
                keywords: category
                    .keywords
                    .into_iter()
                    .map(|kw| kw.trim().to_uppercase())
                    .collect(),
            })
            .collect();

        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[TopicCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Topic classifier over an immutable catalog
pub struct TopicClassifier {
    catalog: TopicCatalog,
}

impl TopicClassifier {
    pub fn new(catalog: TopicCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    /// Classify free text. Deterministic: same text + same catalog means
    /// the same result, with no dependency on prior calls.
    pub fn classify(&self, text: &str) -> Option<TopicId> {
        let upper = text.to_uppercase();

        self.catalog
            .categories
            .iter()
            .find(|category| contains_any(&upper, &category.keywords))
            .map(|category| category.id.clone())
    }
}

fn contains_any(input: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| input.contains(needle.as_str()))
}

//
// ================= Tests =================
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_topic_catalog;
    use crate::models::TopicCategory;

    fn classifier() -> TopicClassifier {
        TopicClassifier::new(default_topic_catalog())
    }

    #[test]
    fn test_routes_common_requests() {
        let cases = vec![
            ("apply for PF withdrawal", "pf_withdrawal"),
            ("HDFC home loan", "home_loan"),
            ("recovery agent keeps calling my family", "recovery_harassment"),
            ("my cheque bounce case under NI Act", "cheque_bounce"),
            ("is an 11 month rent agreement legal?", "rent_agreement"),
        ];

        let classifier = classifier();
        for (text, expected) in cases {
            assert_eq!(
                classifier.classify(text),
                Some(TopicId::from(expected)),
                "text: {}",
                text
            );
        }
    }

    #[test]
    fn test_first_declared_category_wins() {
        // "recovery agent" text also mentions a loan; the earlier-declared
        // harassment category must take it.
        let classifier = classifier();
        let topic = classifier.classify("recovery agent threatening me over my home loan");
        assert_eq!(topic, Some(TopicId::from("recovery_harassment")));
    }

    #[test]
    fn test_no_match_is_none() {
        let classifier = classifier();
        assert_eq!(classifier.classify("completely unrelated gibberish"), None);
        assert_eq!(classifier.classify(""), None);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let classifier = classifier();
        assert_eq!(
            classifier.classify("hdfc HOME loan"),
            classifier.classify("HDFC home LOAN")
        );
    }

    #[test]
    fn test_classification_is_pure() {
        let classifier = classifier();
        let first = classifier.classify("education loan under 80E");
        let second = classifier.classify("education loan under 80E");
        assert_eq!(first, second);
        assert_eq!(first, Some(TopicId::from("education_loan")));
    }

    #[test]
    fn test_unique_keyword_selects_its_category() {
        let classifier = classifier();
        // "passing off" belongs only to merchandise_ip and no earlier category
        // keyword appears in the text.
        assert_eq!(
            classifier.classify("is selling passing off goods illegal"),
            Some(TopicId::from("merchandise_ip"))
        );
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = TopicCatalog::new(vec![
            TopicCategory {
                id: TopicId::from("a"),
                keywords: vec!["X".to_string()],
            },
            TopicCategory {
                id: TopicId::from("a"),
                keywords: vec!["Y".to_string()],
            },
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_empty_catalog() {
        assert!(TopicCatalog::new(vec![]).is_err());
    }

    #[test]
    fn test_keywords_normalized_to_uppercase() {
        let catalog = TopicCatalog::new(vec![TopicCategory {
            id: TopicId::from("greeting"),
            keywords: vec!["namaste".to_string()],
        }])
        .unwrap();
        let classifier = TopicClassifier::new(catalog);
        assert_eq!(
            classifier.classify("Namaste, I need help"),
            Some(TopicId::from("greeting"))
        );
    }
}
