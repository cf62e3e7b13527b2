use rowcast_core::Mappable as _;
use rowcast_core::{MemoryRow, TupleMapper};
use rowcast_macros::Mappable;

#[derive(Mappable, Debug, Default, PartialEq)]
struct Audit {
    #[db]
    created_by: String,
    #[db]
    note: String,
}

#[derive(Mappable, Debug, Default, PartialEq)]
struct Invoice {
    #[db(flatten)]
    audit: Audit,
    #[db]
    total: i64,
    // Shares a label with Audit::note; the outer field wins.
    #[db]
    note: String,
}

fn main() {
    let labels: Vec<String> = Invoice::bindings()
        .iter()
        .map(|b| b.label().to_string())
        .collect();
    assert_eq!(labels, ["created_by", "note", "total"]);

    let mapper = TupleMapper::new();
    let row = MemoryRow::new()
        .with("created_by", "mara")
        .with("note", "paid in full")
        .with("total", 9000i64);
    let invoice = mapper.map_one::<Invoice, _>(&row).require_complete().unwrap();
    assert_eq!(invoice.audit.created_by, "mara");
    assert_eq!(invoice.audit.note, ""); // its binding was overwritten
    assert_eq!(invoice.note, "paid in full");
    assert_eq!(invoice.total, 9000);
}
