use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudyItemError {
    #[error("term cannot be empty")]
    EmptyTerm,

    #[error("definition cannot be empty for term {term:?}")]
    EmptyDefinition { term: String },
}

/// One glossary entry: the front of a flashcard is the term, the back is the
/// definition plus a worked example.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudyItem {
    term: String,
    definition: String,
    example: String,
    category: String,
}

impl StudyItem {
    /// Creates a study item.
    ///
    /// # Errors
    ///
    /// Returns `StudyItemError::EmptyTerm` if the term is blank and
    /// `StudyItemError::EmptyDefinition` if the definition is blank.
    pub fn new(
        term: impl Into<String>,
        definition: impl Into<String>,
        example: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, StudyItemError> {
        let term = term.into();
        let definition = definition.into();
        if term.trim().is_empty() {
            return Err(StudyItemError::EmptyTerm);
        }
        if definition.trim().is_empty() {
            return Err(StudyItemError::EmptyDefinition { term });
        }

        Ok(Self {
            term,
            definition,
            example: example.into(),
            category: category.into(),
        })
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    #[must_use]
    pub fn example(&self) -> &str {
        &self.example
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Case-insensitive substring match against the term or the definition.
    ///
    /// An empty needle matches every item.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.term.to_lowercase().contains(&needle)
            || self.definition.to_lowercase().contains(&needle)
    }

    /// Exact category match; `None` or an empty string means no constraint.
    #[must_use]
    pub fn matches_category(&self, category: Option<&str>) -> bool {
        match category {
            None => true,
            Some(c) if c.is_empty() => true,
            Some(c) => self.category == c,
        }
    }
}
