//! Company-name query normalization and the slug used for LinkedIn URLs.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a company name")]
    EmptyQuery,
}

/// A company name as typed by the user, trimmed and guaranteed non-empty.
///
/// Case is preserved: matching against the directory is case-insensitive,
/// but the user's casing flows into the rendered template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyQuery(String);

impl CompanyQuery {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn slug(&self) -> String {
        slugify(&self.0)
    }
}

impl std::fmt::Display for CompanyQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lower-cases `text` and replaces each run of whitespace with a single hyphen.
/// Leading and trailing whitespace is dropped.
pub fn slugify(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
