//! Purchase-label text matching.

/// Case-tolerant substring match for a purchase-action label.
///
/// Accepts two spellings of the label: first letter lowercase and first
/// letter uppercase (`do koszyka` / `Do koszyka`). The rest of the label is
/// matched exactly. Whitespace runs are collapsed on both sides so text
/// split across inline elements still matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMatcher {
    label: String,
    lower: String,
    upper: String,
}

impl LabelMatcher {
    pub fn new(label: &str) -> Self {
        let label = collapse_whitespace(label);
        let (lower, upper) = first_letter_variants(&label);
        Self {
            label,
            lower,
            upper,
        }
    }

    /// The label as configured, whitespace collapsed.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn matches(&self, text: &str) -> bool {
        if self.label.is_empty() {
            return false;
        }
        let text = collapse_whitespace(text);
        text.contains(&self.lower) || text.contains(&self.upper)
    }
}

fn first_letter_variants(label: &str) -> (String, String) {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str();
            (
                first.to_lowercase().chain(rest.chars()).collect(),
                first.to_uppercase().chain(rest.chars()).collect(),
            )
        }
        None => (String::new(), String::new()),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_both_leading_cases() {
        let matcher = LabelMatcher::new("do koszyka");

        assert!(matcher.matches("Do koszyka"));
        assert!(matcher.matches("do koszyka"));
    }

    #[test]
    fn test_uppercase_label_matches_lowercase_text() {
        let matcher = LabelMatcher::new("Do koszyka");
        assert!(matcher.matches("dodaj do koszyka"));
    }

    #[test]
    fn test_substring_within_longer_text() {
        let matcher = LabelMatcher::new("do koszyka");
        assert!(matcher.matches("Dodaj do koszyka i zapłać"));
    }

    #[test]
    fn test_only_leading_letter_is_case_tolerant() {
        let matcher = LabelMatcher::new("do koszyka");

        assert!(!matcher.matches("DO KOSZYKA"));
        assert!(!matcher.matches("do Koszyka"));
    }

    #[test]
    fn test_unrelated_text_does_not_match() {
        let matcher = LabelMatcher::new("do koszyka");

        assert!(!matcher.matches("Powiadom o dostępności"));
        assert!(!matcher.matches(""));
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        let matcher = LabelMatcher::new("  do   koszyka ");

        assert_eq!(matcher.label(), "do koszyka");
        assert!(matcher.matches("Do\n      koszyka"));
    }

    #[test]
    fn test_non_ascii_leading_letter() {
        let matcher = LabelMatcher::new("łap okazję");

        assert!(matcher.matches("Łap okazję"));
        assert!(matcher.matches("łap okazję"));
    }

    #[test]
    fn test_empty_label_never_matches() {
        let matcher = LabelMatcher::new("   ");
        assert!(!matcher.matches("anything"));
    }
}
