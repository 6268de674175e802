//! Book repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and filter APIs over the `Books` table.
//! - Keep SQL details inside the core persistence boundary.
//! - Map positional rows into typed `Book` values immediately.
//!
//! # Invariants
//! - Write paths must call `BookFields::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Unknown ids on write paths fail with `NotFound`, never a silent no-op.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::book::{Book, BookFields, BookId, BookStatus, BookValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_SELECT_SQL: &str = "SELECT
    BookID,
    Title,
    Author,
    Year,
    Status
FROM Books";

const REQUIRED_BOOK_COLUMNS: [&str; 5] = ["BookID", "Title", "Author", "Year", "Status"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(BookValidationError),
    Db(DbError),
    NotFound(BookId),
    /// Persisted row cannot be converted to a valid `Book`.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "book not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "book repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "book repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "book repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Substring filter for title/author lookups.
///
/// Blank filters are normalized to `None`, so an all-blank filter matches
/// every book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl BookFilter {
    pub fn new(title: Option<&str>, author: Option<&str>) -> Self {
        Self {
            title: normalize_filter(title),
            author: normalize_filter(author),
        }
    }

    /// Returns whether no filter text is active.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none()
    }
}

fn normalize_filter(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Repository interface for book inventory operations.
pub trait BookRepository {
    /// Inserts a new `Available` book and returns its assigned id.
    fn create_book(&self, fields: &BookFields) -> RepoResult<BookId>;
    /// Replaces title/author/year; lending status is left untouched.
    fn update_book_fields(&self, id: BookId, fields: &BookFields) -> RepoResult<()>;
    fn set_book_status(&self, id: BookId, status: BookStatus) -> RepoResult<()>;
    /// Permanently deletes one book.
    fn delete_book(&self, id: BookId) -> RepoResult<()>;
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    /// Case-insensitive, AND-combined substring lookup.
    fn find_books(&self, filter: &BookFilter) -> RepoResult<Vec<Book>>;
}

impl<T: BookRepository + ?Sized> BookRepository for &T {
    fn create_book(&self, fields: &BookFields) -> RepoResult<BookId> {
        (**self).create_book(fields)
    }

    fn update_book_fields(&self, id: BookId, fields: &BookFields) -> RepoResult<()> {
        (**self).update_book_fields(id, fields)
    }

    fn set_book_status(&self, id: BookId, status: BookStatus) -> RepoResult<()> {
        (**self).set_book_status(id, status)
    }

    fn delete_book(&self, id: BookId) -> RepoResult<()> {
        (**self).delete_book(id)
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        (**self).get_book(id)
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        (**self).list_books()
    }

    fn find_books(&self, filter: &BookFilter) -> RepoResult<Vec<Book>> {
        (**self).find_books(filter)
    }
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_book_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn create_book(&self, fields: &BookFields) -> RepoResult<BookId> {
        fields.validate()?;

        self.conn.execute(
            "INSERT INTO Books (Title, Author, Year, Status)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                fields.title(),
                fields.author(),
                fields.year(),
                BookStatus::Available.label(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_book_fields(&self, id: BookId, fields: &BookFields) -> RepoResult<()> {
        fields.validate()?;

        let changed = self.conn.execute(
            "UPDATE Books
             SET
                Title = ?1,
                Author = ?2,
                Year = ?3
             WHERE BookID = ?4;",
            params![fields.title(), fields.author(), fields.year(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn set_book_status(&self, id: BookId, status: BookStatus) -> RepoResult<()> {
        // SQLite counts matched rows, so re-applying the same status still
        // reports one change.
        let changed = self.conn.execute(
            "UPDATE Books SET Status = ?1 WHERE BookID = ?2;",
            params![status.label(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_book(&self, id: BookId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM Books WHERE BookID = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE BookID = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        self.find_books(&BookFilter::default())
    }

    fn find_books(&self, filter: &BookFilter) -> RepoResult<Vec<Book>> {
        let mut sql = format!("{BOOK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(title) = filter.title.as_deref() {
            sql.push_str(" AND Title LIKE ? ESCAPE '\\'");
            bind_values.push(Value::Text(like_contains_pattern(title)));
        }

        if let Some(author) = filter.author.as_deref() {
            sql.push_str(" AND Author LIKE ? ESCAPE '\\'");
            bind_values.push(Value::Text(like_contains_pattern(author)));
        }

        sql.push_str(" ORDER BY BookID ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let id: BookId = row.get("BookID")?;

    let title: String = row.get("Title")?;
    if title.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty Books.Title for BookID {id}"
        )));
    }

    let author: String = row.get("Author")?;
    if author.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty Books.Author for BookID {id}"
        )));
    }

    let year_raw: i64 = row.get("Year")?;
    let year = i32::try_from(year_raw).map_err(|_| {
        RepoError::InvalidData(format!("year `{year_raw}` out of range in Books.Year"))
    })?;

    let status_text: String = row.get("Status")?;
    let status = parse_status_label(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in Books.Status"))
    })?;

    Ok(Book {
        id,
        title,
        author,
        year,
        status,
    })
}

/// Strict inverse of `BookStatus::label` for persisted values.
fn parse_status_label(value: &str) -> Option<BookStatus> {
    match value {
        "Available" => Some(BookStatus::Available),
        "Checked Out" => Some(BookStatus::CheckedOut),
        _ => None,
    }
}

/// Builds a `LIKE` pattern that matches `text` literally anywhere.
fn like_contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn ensure_book_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "Books")? {
        return Err(RepoError::MissingRequiredTable("Books"));
    }

    for column in REQUIRED_BOOK_COLUMNS {
        if !table_has_column(conn, "Books", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "Books",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
