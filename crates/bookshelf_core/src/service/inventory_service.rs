//! Inventory use-case service.
//!
//! # Responsibility
//! - Accept raw presentation input and turn it into validated writes.
//! - Classify failures into validation / not-found / store kinds.
//! - Expose the display view over the injected repository.
//!
//! # Invariants
//! - Malformed input is rejected before any repository call.
//! - New books always start `Available`.
//! - Every failure is returned to the caller; nothing is swallowed.

use crate::model::book::{Book, BookFields, BookId, BookStatus, BookValidationError};
use crate::query::view::{view, ViewQuery};
use crate::repo::book_repo::{BookFilter, BookRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Service error for inventory use-cases.
#[derive(Debug)]
pub enum InventoryError {
    /// Input violates a data-model constraint; re-prompt the user.
    Validation(BookValidationError),
    /// Referenced book does not exist; refresh the view.
    NotFound(BookId),
    /// Persistence-layer failure, surfaced verbatim.
    Store(RepoError),
}

impl Display for InventoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid book input: {err}"),
            Self::NotFound(id) => write!(f, "book not found: {id}"),
            Self::Store(err) => write!(f, "inventory store failure: {err}"),
        }
    }
}

impl Error for InventoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<BookValidationError> for InventoryError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for InventoryError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Store(other),
        }
    }
}

impl InventoryError {
    /// Short machine-readable kind, used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Store(_) => "store",
        }
    }
}

/// Outcome of a check-in / check-out request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// Book moved to the requested status.
    Applied,
    /// Book already held the requested status; nothing changed.
    Unchanged,
}

/// Inventory service facade over repository implementations.
pub struct InventoryService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> InventoryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a book from raw form input and returns its assigned id.
    ///
    /// # Contract
    /// - Title and author must be non-blank; year must be a whole number.
    /// - The new book is `Available`.
    pub fn add_book(&self, title: &str, author: &str, year: &str) -> InventoryResult<BookId> {
        let fields = BookFields::parse(title, author, year)?;
        self.add_fields(&fields)
    }

    /// Adds a book from already-validated fields.
    pub fn add_fields(&self, fields: &BookFields) -> InventoryResult<BookId> {
        let result = self.repo.create_book(fields).map_err(InventoryError::from);
        match &result {
            Ok(id) => info!("event=book_add module=service status=ok book_id={id}"),
            Err(err) => warn!(
                "event=book_add module=service status=error error_code={}",
                err.code()
            ),
        }
        result
    }

    /// Replaces title/author/year of one book. Lending status is kept.
    pub fn update_book(
        &self,
        id: BookId,
        title: &str,
        author: &str,
        year: &str,
    ) -> InventoryResult<()> {
        let fields = BookFields::parse(title, author, year)?;
        self.update_fields(id, &fields)
    }

    pub fn update_fields(&self, id: BookId, fields: &BookFields) -> InventoryResult<()> {
        let result = self
            .repo
            .update_book_fields(id, fields)
            .map_err(InventoryError::from);
        log_mutation("book_update", id, &result);
        result
    }

    /// Sets lending status. Re-applying the current status succeeds.
    pub fn set_status(&self, id: BookId, status: BookStatus) -> InventoryResult<()> {
        let result = self
            .repo
            .set_book_status(id, status)
            .map_err(InventoryError::from);
        log_mutation("book_status", id, &result);
        result
    }

    /// Parses status text (`Available` / `Checked Out`) then sets it.
    pub fn set_status_text(&self, id: BookId, status: &str) -> InventoryResult<()> {
        let status = status.parse::<BookStatus>()?;
        self.set_status(id, status)
    }

    /// Marks a book as returned to the shelf.
    pub fn check_in(&self, id: BookId) -> InventoryResult<StatusChange> {
        self.transition(id, BookStatus::Available)
    }

    /// Marks a book as lent out.
    pub fn check_out(&self, id: BookId) -> InventoryResult<StatusChange> {
        self.transition(id, BookStatus::CheckedOut)
    }

    fn transition(&self, id: BookId, target: BookStatus) -> InventoryResult<StatusChange> {
        let current = self.get_book(id)?;
        if current.status == target {
            return Ok(StatusChange::Unchanged);
        }
        self.set_status(id, target)?;
        Ok(StatusChange::Applied)
    }

    /// Permanently removes a book.
    pub fn remove_book(&self, id: BookId) -> InventoryResult<()> {
        let result = self.repo.delete_book(id).map_err(InventoryError::from);
        log_mutation("book_remove", id, &result);
        result
    }

    /// Point lookup; unknown ids are `NotFound`.
    pub fn get_book(&self, id: BookId) -> InventoryResult<Book> {
        self.repo
            .get_book(id)?
            .ok_or(InventoryError::NotFound(id))
    }

    /// Every book, in no guaranteed order.
    pub fn list_books(&self) -> InventoryResult<Vec<Book>> {
        Ok(self.repo.list_books()?)
    }

    /// Substring lookup; blank filters are ignored.
    pub fn find_books(
        &self,
        title: Option<&str>,
        author: Option<&str>,
    ) -> InventoryResult<Vec<Book>> {
        let filter = BookFilter::new(title, author);
        if filter.is_empty() {
            return self.list_books();
        }
        Ok(self.repo.find_books(&filter)?)
    }

    /// Display-ordered view; see [`crate::query::view::view`].
    pub fn view(&self, query: &ViewQuery) -> InventoryResult<Vec<Book>> {
        Ok(view(&self.repo, query)?)
    }
}

fn log_mutation(event: &str, id: BookId, result: &InventoryResult<()>) {
    match result {
        Ok(()) => info!("event={event} module=service status=ok book_id={id}"),
        Err(err) => warn!(
            "event={} module=service status=error book_id={} error_code={}",
            event,
            id,
            err.code()
        ),
    }
}
