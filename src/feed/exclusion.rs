use regex::{Regex, RegexBuilder};

use crate::domain::ProductEntry;
use crate::errors::{MarketError, MarketResult};

/// Keeps disallowed categories out of the feed.
///
/// A product is excluded when any configured term occurs, ignoring case, in
/// its title, classification fields or description.
#[derive(Debug, Clone, Default)]
pub struct ExclusionPolicy {
    pattern: Option<Regex>,
}

impl ExclusionPolicy {
    pub fn new<S: AsRef<str>>(terms: &[S]) -> MarketResult<Self> {
        let escaped: Vec<String> = terms
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .map(regex::escape)
            .collect();

        if escaped.is_empty() {
            return Ok(Self::allow_all());
        }

        let pattern = RegexBuilder::new(&escaped.join("|"))
            .case_insensitive(true)
            .build()
            .map_err(|e| MarketError::Config(format!("Invalid exclusion terms: {}", e)))?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    pub fn allow_all() -> Self {
        Self { pattern: None }
    }

    pub fn is_excluded(&self, entry: &ProductEntry) -> bool {
        match &self.pattern {
            Some(pattern) => entry.exclusion_fields().any(|field| pattern.is_match(field)),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ExclusionPolicy {
        ExclusionPolicy::new(&["innerwear", "briefs"]).unwrap()
    }

    #[test]
    fn test_matches_title_case_insensitively() {
        let entry = ProductEntry::new("1", "Cotton BRIEFS pack");
        assert!(policy().is_excluded(&entry));
    }

    #[test]
    fn test_matches_sub_category_and_article_type() {
        let by_sub = ProductEntry::new("1", "Basic set").with_sub_category(Some("Innerwear".into()));
        let by_type = ProductEntry::new("2", "Basic set").with_article_type(Some("Briefs".into()));

        assert!(policy().is_excluded(&by_sub));
        assert!(policy().is_excluded(&by_type));
    }

    #[test]
    fn test_matches_description_substring() {
        let entry = ProductEntry::new("1", "Bundle").with_description("comes with innerwear items");
        assert!(policy().is_excluded(&entry));
    }

    #[test]
    fn test_clean_entry_kept() {
        let entry = ProductEntry::new("1", "Leather Boots")
            .with_category(Some("Footwear".into()))
            .with_description("Resoled last year");
        assert!(!policy().is_excluded(&entry));
    }

    #[test]
    fn test_master_category_alone_is_not_excluded() {
        let policy = ExclusionPolicy::new(&["apparel"]).unwrap();
        let entry = ProductEntry::new("1", "Denim Jacket").with_category(Some("Apparel".into()));

        assert!(!policy.is_excluded(&entry));
        assert!(entry.matches_text("apparel"));
    }

    #[test]
    fn test_terms_are_literal_not_regex() {
        let policy = ExclusionPolicy::new(&["a+b"]).unwrap();
        assert!(policy.is_excluded(&ProductEntry::new("1", "the a+b set")));
        assert!(!policy.is_excluded(&ProductEntry::new("2", "aab")));
    }

    #[test]
    fn test_empty_terms_exclude_nothing() {
        let policy = ExclusionPolicy::new(&["", "  "]).unwrap();
        assert!(!policy.is_excluded(&ProductEntry::new("1", "Innerwear")));
    }
}
