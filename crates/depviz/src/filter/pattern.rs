//! Anchored regular expressions.

use regex::Regex;

use super::FilterError;

/// A regular expression that must match a whole value.
///
/// `Model` matches `"Model"` but not `"ModelX"`; `.*` matches the empty
/// string.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles `pattern` for the configuration field `field`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Pattern`] if the expression does not compile.
    pub fn new(field: impl Into<String>, pattern: &str) -> Result<Self, FilterError> {
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
            FilterError::Pattern {
                field: field.into(),
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// The pattern as written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchoring() {
        let pattern = Pattern::new("class_pattern", "^Model$").unwrap();
        assert!(pattern.is_match("Model"));
        assert!(!pattern.is_match("ModelX"));

        let pattern = Pattern::new("class_pattern", "Model").unwrap();
        assert!(pattern.is_match("Model"));
        assert!(!pattern.is_match("ModelX"));
        assert!(!pattern.is_match("XModel"));
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let pattern = Pattern::new("class_pattern", "Model|Geometry").unwrap();
        assert!(pattern.is_match("Geometry"));
        assert!(!pattern.is_match("ModelGeometry"));
        assert!(!pattern.is_match("Geometry2"));
    }

    #[test]
    fn test_case_sensitive() {
        let pattern = Pattern::new("class_pattern", "Model").unwrap();
        assert!(!pattern.is_match("model"));
    }

    #[test]
    fn test_match_all_accepts_empty() {
        let pattern = Pattern::new("subclass_pattern", ".*").unwrap();
        assert!(pattern.is_match(""));
        assert_eq!(pattern.as_str(), ".*");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Pattern::new("subclass_pattern", "(Mesh").unwrap_err();
        let FilterError::Pattern { field, pattern, .. } = err else {
            panic!("expected a pattern error");
        };
        assert_eq!(field, "subclass_pattern");
        assert_eq!(pattern, "(Mesh");
    }
}
