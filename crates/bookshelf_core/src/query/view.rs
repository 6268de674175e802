//! Display-ordered book views.
//!
//! # Responsibility
//! - Combine the repository filter lookup with an optional in-memory sort.
//! - Track column-header sort state (same key toggles direction).
//!
//! # Invariants
//! - Read-only: no repository mutation happens here.
//! - Sorting is stable in both directions; ties keep candidate order.
//! - Identical arguments against an unchanged store yield identical output.

use crate::model::book::{Book, BookValidationError};
use crate::repo::book_repo::{BookFilter, BookRepository, RepoResult};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Column a view can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Id,
    Title,
    Author,
    Year,
    Status,
}

impl SortKey {
    /// Column label as shown in list headers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Year => "Year",
            Self::Status => "Status",
        }
    }

    /// Ascending comparison of two books under this key.
    pub fn compare(self, left: &Book, right: &Book) -> Ordering {
        match self {
            Self::Id => left.id.cmp(&right.id),
            Self::Year => left.year.cmp(&right.year),
            Self::Title => compare_case_insensitive(&left.title, &right.title),
            Self::Author => compare_case_insensitive(&left.author, &right.author),
            Self::Status => left.status.rank().cmp(&right.status.rank()),
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = BookValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "year" => Ok(Self::Year),
            "status" => Ok(Self::Status),
            _ => Err(BookValidationError::InvalidSortKey(value.to_string())),
        }
    }
}

fn compare_case_insensitive(left: &str, right: &str) -> Ordering {
    left.chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase))
}

/// Arguments for [`view`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub title_filter: Option<String>,
    pub author_filter: Option<String>,
    /// `None` keeps store order.
    pub sort_key: Option<SortKey>,
    pub descending: bool,
}

impl ViewQuery {
    /// Unfiltered, unsorted view of the whole inventory.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> BookFilter {
        BookFilter::new(self.title_filter.as_deref(), self.author_filter.as_deref())
    }
}

/// Produces the display-ordered book list for one query.
pub fn view<R: BookRepository + ?Sized>(repo: &R, query: &ViewQuery) -> RepoResult<Vec<Book>> {
    let filter = query.filter();
    let mut books = if filter.is_empty() {
        repo.list_books()?
    } else {
        repo.find_books(&filter)?
    };

    if let Some(key) = query.sort_key {
        sort_books(&mut books, key, query.descending);
    }

    Ok(books)
}

/// Sorts in place with the per-key policy of [`SortKey::compare`].
///
/// Descending order reverses the key comparison rather than the output,
/// so equal records keep their relative order either way.
pub fn sort_books(books: &mut [Book], key: SortKey, descending: bool) {
    if descending {
        books.sort_by(|left, right| key.compare(left, right).reverse());
    } else {
        books.sort_by(|left, right| key.compare(left, right));
    }
}

/// Column-header sort state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    key: Option<SortKey>,
    descending: bool,
}

impl SortState {
    pub fn key(&self) -> Option<SortKey> {
        self.key
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }

    /// Selects `key`: flips direction when it is already active, otherwise
    /// switches to it ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.descending = !self.descending;
        } else {
            self.key = Some(key);
            self.descending = false;
        }
    }

    /// Drops the active key; views fall back to store order.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Writes this state into a view query.
    pub fn apply(&self, query: &mut ViewQuery) {
        query.sort_key = self.key;
        query.descending = self.descending;
    }
}

#[cfg(test)]
mod tests {
    use super::{compare_case_insensitive, SortKey, SortState};
    use std::cmp::Ordering;

    #[test]
    fn text_comparison_ignores_case() {
        assert_eq!(compare_case_insensitive("dune", "Dune"), Ordering::Equal);
        assert_eq!(compare_case_insensitive("asimov", "Austen"), Ordering::Less);
        assert_eq!(compare_case_insensitive("Émile", "émile"), Ordering::Equal);
    }

    #[test]
    fn sort_key_parses_column_labels() {
        assert_eq!("ID".parse::<SortKey>(), Ok(SortKey::Id));
        assert_eq!(" status ".parse::<SortKey>(), Ok(SortKey::Status));
        assert!("Publisher".parse::<SortKey>().is_err());
    }

    #[test]
    fn toggle_flips_same_key_and_resets_on_new_key() {
        let mut state = SortState::default();
        state.toggle(SortKey::Year);
        assert_eq!(state.key(), Some(SortKey::Year));
        assert!(!state.is_descending());

        state.toggle(SortKey::Year);
        assert!(state.is_descending());

        state.toggle(SortKey::Title);
        assert_eq!(state.key(), Some(SortKey::Title));
        assert!(!state.is_descending());

        state.clear();
        assert_eq!(state.key(), None);
    }
}
