//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open the local inventory database and print a one-screen summary.
//! - Verify `bookshelf_core` wiring without any presentation layer.
//!
//! # Invariants
//! - The database is closed exactly once, via `close_db` on the normal
//!   path and via `Drop` on early returns.

use bookshelf_core::{
    close_db, core_version, default_log_level, init_logging, open_db, InventoryService,
    SortKey, SqliteBookRepository, ViewQuery, DEFAULT_DB_FILE_NAME,
};
use log::error;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("bookshelf: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cwd = std::env::current_dir()?;
    let log_dir = cwd.join("logs");
    init_logging(default_log_level(), &log_dir.to_string_lossy())?;

    let conn = open_db(cwd.join(DEFAULT_DB_FILE_NAME))?;
    {
        let repo = SqliteBookRepository::try_new(&conn)?;
        let service = InventoryService::new(repo);
        let books = service.view(&ViewQuery {
            sort_key: Some(SortKey::Status),
            ..ViewQuery::all()
        })?;
        let available = books.iter().filter(|book| book.is_available()).count();

        println!("bookshelf_core version={}", core_version());
        println!(
            "books total={} available={} checked_out={}",
            books.len(),
            available,
            books.len() - available
        );
    }
    close_db(conn)?;
    Ok(())
}
