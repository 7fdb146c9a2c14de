//! Whitespace handling applied to raw text before parsing.

/// Strategy for trimming raw source text before it is parsed.
///
/// Both strategies map blank text to `None`, which loaders record as an
/// explicit null.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Trimmer {
    /// Remove surrounding whitespace.
    #[default]
    TrimToNull,
    /// Remove surrounding whitespace, then strip one pair of enclosing
    /// double quotes while keeping whatever they contain, whitespace included.
    QuotedSpacePreserving,
}

impl Trimmer {
    /// Applies the strategy to `raw`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::Trimmer;
    ///
    /// assert_eq!(Trimmer::TrimToNull.trim("  8080 "), Some("8080"));
    /// assert_eq!(Trimmer::TrimToNull.trim("   "), None);
    /// assert_eq!(Trimmer::QuotedSpacePreserving.trim(r#" "  hi " "#), Some("  hi "));
    /// assert_eq!(Trimmer::QuotedSpacePreserving.trim(r#""""#), Some(""));
    /// ```
    #[must_use]
    pub fn trim(self, raw: &str) -> Option<&str> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match self {
            Self::TrimToNull => Some(trimmed),
            Self::QuotedSpacePreserving => Some(unquote(trimmed).unwrap_or(trimmed)),
        }
    }
}

fn unquote(text: &str) -> Option<&str> {
    if text.len() < 2 {
        return None;
    }
    text.strip_prefix('"')?.strip_suffix('"')
}
