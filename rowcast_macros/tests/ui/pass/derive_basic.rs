use rowcast_core::Mappable as _;
use rowcast_core::{MemoryRow, TupleMapper};
use rowcast_macros::Mappable;

#[derive(Mappable, Debug, Default, PartialEq)]
struct Book {
    #[db]
    title: String,
    #[db(column = "page_count")]
    pages: i64,
    // Unannotated fields stay at their default.
    checked_out: bool,
}

fn main() {
    let labels: Vec<String> = Book::bindings()
        .iter()
        .map(|b| b.label().to_string())
        .collect();
    assert_eq!(labels, ["title", "page_count"]);

    let mapper = TupleMapper::new();
    let row = MemoryRow::new().with("title", "Dune").with("page_count", 412i64);
    let book = mapper.map_one::<Book, _>(&row).require_complete().unwrap();
    assert_eq!(
        book,
        Book {
            title: "Dune".into(),
            pages: 412,
            checked_out: false
        }
    );
}
