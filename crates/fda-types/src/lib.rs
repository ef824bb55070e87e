//! Validated text primitives shared across the drug records crates.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string that is guaranteed to contain at least one non-whitespace character.
///
/// Construction trims leading and trailing whitespace, so holders of a
/// `NonEmptyText` can rely on the value being both non-empty and trimmed.
/// Required request fields are parsed into this type at the REST boundary
/// before they reach the record core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the input is empty or contains only
    /// whitespace after trimming.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the value and returns the inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_surrounding_whitespace() {
        let text = NonEmptyText::new("  TARO  ").expect("should accept non-empty input");
        assert_eq!(text.as_str(), "TARO");
    }

    #[test]
    fn test_new_rejects_empty_input() {
        let err = NonEmptyText::new("").expect_err("empty input should be rejected");
        assert!(matches!(err, TextError::Empty));
    }

    #[test]
    fn test_new_rejects_whitespace_only_input() {
        let err = NonEmptyText::new("   \t ").expect_err("blank input should be rejected");
        assert!(matches!(err, TextError::Empty));
    }

    #[test]
    fn test_into_string_returns_trimmed_value() {
        let text = NonEmptyText::new(" LORATADINE ").expect("should accept non-empty input");
        assert_eq!(text.into_string(), "LORATADINE");
    }
}
