use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{
    sort_books, view, Book, BookStatus, InventoryService, SortKey, SortState,
    SqliteBookRepository, ViewQuery,
};

fn titles(books: &[Book]) -> Vec<&str> {
    books.iter().map(|book| book.title.as_str()).collect()
}

fn sorted_by(key: SortKey, descending: bool) -> ViewQuery {
    ViewQuery {
        sort_key: Some(key),
        descending,
        ..ViewQuery::all()
    }
}

fn book(id: i64, title: &str, author: &str, year: i32, status: BookStatus) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        year,
        status,
    }
}

#[test]
fn year_descending_orders_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let service = InventoryService::new(SqliteBookRepository::try_new(&conn).unwrap());
    service.add_book("Foundation", "Asimov", "1951").unwrap();
    service.add_book("Dune", "Herbert", "1965").unwrap();
    service.add_book("Emma", "Austen", "1815").unwrap();

    let books = service.view(&sorted_by(SortKey::Year, true)).unwrap();

    assert_eq!(titles(&books), vec!["Dune", "Foundation", "Emma"]);
}

#[test]
fn status_view_is_deterministic_and_available_first() {
    let conn = open_db_in_memory().unwrap();
    let service = InventoryService::new(SqliteBookRepository::try_new(&conn).unwrap());
    let a = service.add_book("A", "X", "2001").unwrap();
    service.add_book("B", "X", "2002").unwrap();
    let c = service.add_book("C", "X", "2003").unwrap();
    service.add_book("D", "X", "2004").unwrap();
    service.check_out(a).unwrap();
    service.check_out(c).unwrap();

    let first = service.view(&sorted_by(SortKey::Status, false)).unwrap();
    let second = service.view(&sorted_by(SortKey::Status, false)).unwrap();

    assert_eq!(first, second);
    assert_eq!(titles(&first), vec!["B", "D", "A", "C"]);
    let first_checked_out = first
        .iter()
        .position(|book| book.status == BookStatus::CheckedOut)
        .unwrap();
    assert!(first[first_checked_out..]
        .iter()
        .all(|book| book.status == BookStatus::CheckedOut));
}

#[test]
fn status_descending_keeps_ties_in_store_order() {
    let conn = open_db_in_memory().unwrap();
    let service = InventoryService::new(SqliteBookRepository::try_new(&conn).unwrap());
    let a = service.add_book("A", "X", "2001").unwrap();
    service.add_book("B", "X", "2002").unwrap();
    let c = service.add_book("C", "X", "2003").unwrap();
    service.add_book("D", "X", "2004").unwrap();
    service.check_out(a).unwrap();
    service.check_out(c).unwrap();

    let books = service.view(&sorted_by(SortKey::Status, true)).unwrap();

    assert_eq!(titles(&books), vec!["A", "C", "B", "D"]);
}

#[test]
fn title_sort_ignores_case_in_both_directions() {
    let mut books = vec![
        book(1, "beta", "X", 2000, BookStatus::Available),
        book(2, "Alpha", "X", 2000, BookStatus::Available),
        book(3, "Charlie", "X", 2000, BookStatus::Available),
    ];

    sort_books(&mut books, SortKey::Title, false);
    assert_eq!(titles(&books), vec!["Alpha", "beta", "Charlie"]);

    sort_books(&mut books, SortKey::Title, true);
    assert_eq!(titles(&books), vec!["Charlie", "beta", "Alpha"]);
}

#[test]
fn author_sort_is_stable_for_equal_authors() {
    let mut books = vec![
        book(1, "Dune", "Herbert", 1965, BookStatus::Available),
        book(2, "Emma", "Austen", 1815, BookStatus::Available),
        book(3, "Dune Messiah", "HERBERT", 1969, BookStatus::CheckedOut),
        book(4, "Persuasion", "austen", 1817, BookStatus::Available),
    ];

    sort_books(&mut books, SortKey::Author, false);
    assert_eq!(
        titles(&books),
        vec!["Emma", "Persuasion", "Dune", "Dune Messiah"]
    );

    sort_books(&mut books, SortKey::Author, true);
    assert_eq!(
        titles(&books),
        vec!["Dune", "Dune Messiah", "Emma", "Persuasion"]
    );
}

#[test]
fn id_sort_is_numeric() {
    let mut books = vec![
        book(10, "Ten", "X", 2000, BookStatus::Available),
        book(9, "Nine", "X", 2000, BookStatus::Available),
        book(100, "Hundred", "X", 2000, BookStatus::Available),
    ];

    sort_books(&mut books, SortKey::Id, false);
    assert_eq!(titles(&books), vec!["Nine", "Ten", "Hundred"]);
}

#[test]
fn unsorted_view_keeps_store_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();
    let service = InventoryService::new(&repo);
    service.add_book("Zebra", "X", "2001").unwrap();
    service.add_book("Apple", "X", "2002").unwrap();

    let books = view(&repo, &ViewQuery::all()).unwrap();

    assert_eq!(titles(&books), vec!["Zebra", "Apple"]);
}

#[test]
fn filtered_view_sorts_only_matching_books() {
    let conn = open_db_in_memory().unwrap();
    let service = InventoryService::new(SqliteBookRepository::try_new(&conn).unwrap());
    service.add_book("Dune Messiah", "Herbert", "1969").unwrap();
    service.add_book("Emma", "Austen", "1815").unwrap();
    service.add_book("Dune", "Herbert", "1965").unwrap();

    let query = ViewQuery {
        title_filter: Some("dune".to_string()),
        author_filter: Some("herbert".to_string()),
        sort_key: Some(SortKey::Year),
        descending: false,
    };
    let books = service.view(&query).unwrap();

    assert_eq!(titles(&books), vec!["Dune", "Dune Messiah"]);
}

#[test]
fn sort_state_drives_view_direction() {
    let conn = open_db_in_memory().unwrap();
    let service = InventoryService::new(SqliteBookRepository::try_new(&conn).unwrap());
    service.add_book("Foundation", "Asimov", "1951").unwrap();
    service.add_book("Dune", "Herbert", "1965").unwrap();
    service.add_book("Emma", "Austen", "1815").unwrap();

    let mut state = SortState::default();
    let mut query = ViewQuery::all();

    state.toggle("Year".parse().unwrap());
    state.apply(&mut query);
    assert_eq!(
        titles(&service.view(&query).unwrap()),
        vec!["Emma", "Foundation", "Dune"]
    );

    state.toggle(SortKey::Year);
    state.apply(&mut query);
    assert_eq!(
        titles(&service.view(&query).unwrap()),
        vec!["Dune", "Foundation", "Emma"]
    );
}
