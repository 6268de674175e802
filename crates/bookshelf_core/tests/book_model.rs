use bookshelf_core::{Book, BookFields, BookStatus, BookValidationError};

#[test]
fn fields_parse_trims_text_and_reads_year() {
    let fields = BookFields::parse("  Dune ", " Frank Herbert", " 1965 ").unwrap();

    assert_eq!(fields.title(), "Dune");
    assert_eq!(fields.author(), "Frank Herbert");
    assert_eq!(fields.year(), 1965);
}

#[test]
fn fields_parse_reports_first_offending_field() {
    assert_eq!(
        BookFields::parse("", "", "abc").unwrap_err(),
        BookValidationError::EmptyTitle
    );
    assert_eq!(
        BookFields::parse("Dune", "   ", "abc").unwrap_err(),
        BookValidationError::EmptyAuthor
    );
    assert_eq!(
        BookFields::parse("Dune", "Herbert", "").unwrap_err(),
        BookValidationError::EmptyYear
    );
    assert_eq!(
        BookFields::parse("Dune", "Herbert", "1965.5").unwrap_err(),
        BookValidationError::InvalidYear("1965.5".to_string())
    );
}

#[test]
fn fields_new_rejects_blank_text() {
    assert_eq!(
        BookFields::new(" ", "Herbert", 1965).unwrap_err(),
        BookValidationError::EmptyTitle
    );
    assert_eq!(
        BookFields::new("Dune", "", 1965).unwrap_err(),
        BookValidationError::EmptyAuthor
    );
    assert!(BookFields::new("Dune", "Herbert", 1965)
        .unwrap()
        .validate()
        .is_ok());
}

#[test]
fn status_parses_labels_and_identifiers() {
    assert_eq!("Available".parse::<BookStatus>(), Ok(BookStatus::Available));
    assert_eq!(
        "Checked Out".parse::<BookStatus>(),
        Ok(BookStatus::CheckedOut)
    );
    assert_eq!(
        " checkedout ".parse::<BookStatus>(),
        Ok(BookStatus::CheckedOut)
    );
    assert_eq!(
        "Reserved".parse::<BookStatus>(),
        Err(BookValidationError::InvalidStatus("Reserved".to_string()))
    );
}

#[test]
fn status_label_matches_persisted_text() {
    assert_eq!(BookStatus::Available.to_string(), "Available");
    assert_eq!(BookStatus::CheckedOut.to_string(), "Checked Out");
}

#[test]
fn book_serialization_uses_expected_wire_fields() {
    let book = Book {
        id: 7,
        title: "Emma".to_string(),
        author: "Austen".to_string(),
        year: 1815,
        status: BookStatus::CheckedOut,
    };

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["title"], "Emma");
    assert_eq!(json["author"], "Austen");
    assert_eq!(json["year"], 1815);
    assert_eq!(json["status"], "checked_out");

    let decoded: Book = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, book);
    assert!(!decoded.is_available());
}

#[test]
fn book_fields_copy_editable_values() {
    let book = Book {
        id: 1,
        title: "Foundation".to_string(),
        author: "Asimov".to_string(),
        year: 1951,
        status: BookStatus::Available,
    };

    let fields = book.fields();
    assert_eq!(fields.title(), "Foundation");
    assert_eq!(fields.author(), "Asimov");
    assert_eq!(fields.year(), 1951);
}
