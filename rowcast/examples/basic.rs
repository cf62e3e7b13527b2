// Run with:
//   cargo run -p rowcast --example basic

use rowcast::{ColumnValue, Mappable, MemoryRow, TupleMapper};

#[derive(Mappable, Clone, Debug, Default)]
pub struct User {
    #[db]
    pub id: i64,
    #[db(column = "email_address")]
    pub email: String,
    #[db]
    pub active: bool,
    #[db]
    pub last_seen: Option<i64>,
}

fn main() {
    // Rows as a driver would hand them over: label/value pairs.
    let rows = vec![
        MemoryRow::new()
            .with("id", 1_i64)
            .with("email_address", "ada@example.com")
            .with("active", true)
            .with("last_seen", 1_700_000_000_i64),
        MemoryRow::new()
            .with("id", 2_i64)
            .with("email_address", "grace@example.com")
            .with("active", false)
            .with("last_seen", ColumnValue::Null),
        // A broken row: `id` holds text, so that one field fails while the
        // rest of the row still maps.
        MemoryRow::new()
            .with("id", "not-a-number")
            .with("email_address", "brendan@example.com")
            .with("active", true)
            .with("last_seen", ColumnValue::Null),
    ];

    let mapper = TupleMapper::new();
    for mapped in mapper.map_many::<User, _>(&rows) {
        if mapped.is_complete() {
            println!("mapped: {:?}", mapped.value);
        } else {
            println!(
                "partially mapped: {:?} ({} failure(s))",
                mapped.value,
                mapped.failures.len()
            );
            for failure in &mapped.failures {
                println!("  {failure}: {}", failure.error);
            }
        }
    }
}
