//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical inventory record and its lending status.
//! - Validate raw presentation input before it reaches persistence.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - `title` and `author` are non-empty after trimming.
//! - `status` is always exactly one of `Available` / `CheckedOut`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static YEAR_DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid year regex"));

/// Store-assigned book identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type BookId = i64;

/// Lending state of one book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    /// On the shelf and can be lent out.
    Available,
    /// Currently lent out.
    CheckedOut,
}

impl BookStatus {
    /// Label used for the `Status` column and for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::CheckedOut => "Checked Out",
        }
    }

    /// Domain ordering rank: available books come first.
    pub fn rank(self) -> u8 {
        match self {
            Self::Available => 0,
            Self::CheckedOut => 1,
        }
    }
}

impl Display for BookStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BookStatus {
    type Err = BookValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "checked out" | "checkedout" | "checked_out" => Ok(Self::CheckedOut),
            _ => Err(BookValidationError::InvalidStatus(value.to_string())),
        }
    }
}

/// Validation errors for book input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    EmptyTitle,
    EmptyAuthor,
    EmptyYear,
    /// Year text is not a whole number that fits the year range.
    InvalidYear(String),
    InvalidStatus(String),
    InvalidSortKey(String),
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyAuthor => write!(f, "author must not be empty"),
            Self::EmptyYear => write!(f, "year must not be empty"),
            Self::InvalidYear(value) => write!(f, "year must be a whole number, got `{value}`"),
            Self::InvalidStatus(value) => write!(
                f,
                "unsupported status `{value}`; expected Available|Checked Out"
            ),
            Self::InvalidSortKey(value) => write!(
                f,
                "unsupported sort key `{value}`; expected ID|Title|Author|Year|Status"
            ),
        }
    }
}

impl Error for BookValidationError {}

/// Canonical inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Release year.
    pub year: i32,
    pub status: BookStatus,
}

impl Book {
    /// Returns whether this book can be lent out right now.
    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }

    /// Returns the editable fields of this book.
    pub fn fields(&self) -> BookFields {
        BookFields {
            title: self.title.clone(),
            author: self.author.clone(),
            year: self.year,
        }
    }
}

/// Validated write model for create and field-edit operations.
///
/// Status is not part of this shape: new books always start `Available`,
/// and field edits never touch lending state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    title: String,
    author: String,
    year: i32,
}

impl BookFields {
    /// Builds fields from typed values, trimming text.
    ///
    /// # Errors
    /// - `EmptyTitle` / `EmptyAuthor` when text is blank after trimming.
    pub fn new(
        title: impl AsRef<str>,
        author: impl AsRef<str>,
        year: i32,
    ) -> Result<Self, BookValidationError> {
        let title = title.as_ref().trim();
        if title.is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        let author = author.as_ref().trim();
        if author.is_empty() {
            return Err(BookValidationError::EmptyAuthor);
        }

        Ok(Self {
            title: title.to_string(),
            author: author.to_string(),
            year,
        })
    }

    /// Builds fields from raw presentation text.
    ///
    /// Checks run in form order (title, author, year), so the first
    /// offending field is the one reported.
    pub fn parse(title: &str, author: &str, year: &str) -> Result<Self, BookValidationError> {
        if title.trim().is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        if author.trim().is_empty() {
            return Err(BookValidationError::EmptyAuthor);
        }
        let year = parse_year(year)?;
        Self::new(title, author, year)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Re-checks text invariants.
    ///
    /// Fields built through the constructors always pass; this guards
    /// repository writes the same way persisted rows are re-validated.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.trim().is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        if self.author.trim().is_empty() {
            return Err(BookValidationError::EmptyAuthor);
        }
        Ok(())
    }
}

/// Parses a release year typed by the user.
///
/// Only plain ASCII digits are accepted: no sign, no fraction, no inner
/// whitespace. Surrounding whitespace is ignored.
pub fn parse_year(value: &str) -> Result<i32, BookValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BookValidationError::EmptyYear);
    }
    if !YEAR_DIGITS_RE.is_match(trimmed) {
        return Err(BookValidationError::InvalidYear(trimmed.to_string()));
    }
    trimmed
        .parse::<i32>()
        .map_err(|_| BookValidationError::InvalidYear(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{parse_year, BookStatus, BookValidationError};

    #[test]
    fn parse_year_accepts_plain_digits() {
        assert_eq!(parse_year("1965"), Ok(1965));
        assert_eq!(parse_year(" 0451 "), Ok(451));
    }

    #[test]
    fn parse_year_rejects_non_integer_text() {
        for input in ["19.5", "-1", "+2000", "nineteen", "19 65", "1e3"] {
            assert!(
                matches!(parse_year(input), Err(BookValidationError::InvalidYear(_))),
                "`{input}` should be rejected"
            );
        }
        assert_eq!(parse_year("   "), Err(BookValidationError::EmptyYear));
    }

    #[test]
    fn parse_year_rejects_overflow() {
        assert!(matches!(
            parse_year("99999999999"),
            Err(BookValidationError::InvalidYear(_))
        ));
    }

    #[test]
    fn status_rank_puts_available_first() {
        assert!(BookStatus::Available.rank() < BookStatus::CheckedOut.rank());
    }
}
