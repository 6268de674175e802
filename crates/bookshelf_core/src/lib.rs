//! Core inventory logic for Bookshelf.
//! This crate is the single source of truth for book invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use db::{close_db, open_db, open_db_in_memory, DbError, DbResult, DEFAULT_DB_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{parse_year, Book, BookFields, BookId, BookStatus, BookValidationError};
pub use query::view::{sort_books, view, SortKey, SortState, ViewQuery};
pub use repo::book_repo::{
    BookFilter, BookRepository, RepoError, RepoResult, SqliteBookRepository,
};
pub use service::inventory_service::{
    InventoryError, InventoryResult, InventoryService, StatusChange,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
