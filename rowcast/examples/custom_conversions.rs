// Run with:
//   cargo run -p rowcast --example custom_conversions
//
// Shows the fallback conversion service: field types outside the built-in
// table (UUIDs, domain enums) are served by a ConversionTable installed on
// the mapper.

use std::sync::Arc;

use rowcast::{ColumnValue, ConversionTable, ConvertError, Mappable, MemoryRow, TupleMapper};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Status {
    #[default]
    Unknown,
    Active,
    Suspended,
}

#[derive(Mappable, Clone, Debug, Default)]
pub struct Device {
    #[db(column = "device_id")]
    pub id: Uuid,
    #[db]
    pub firmware: String,
    #[db]
    pub status: Status,
}

fn text_of(value: &ColumnValue) -> Result<&str, ConvertError> {
    value.as_text().ok_or(ConvertError::TypeMismatch {
        expected: "text",
        found: value.kind(),
    })
}

fn conversions() -> ConversionTable {
    ConversionTable::new()
        .register(|value: &ColumnValue| {
            Uuid::parse_str(text_of(value)?).map_err(|_| ConvertError::TypeMismatch {
                expected: "uuid text",
                found: "text",
            })
        })
        .register(|value: &ColumnValue| match text_of(value)? {
            "active" => Ok(Status::Active),
            "suspended" => Ok(Status::Suspended),
            _ => Ok(Status::Unknown),
        })
}

fn main() {
    let mapper = TupleMapper::with_service(Arc::new(conversions()));

    let row = MemoryRow::new()
        .with("device_id", "a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8")
        .with("firmware", "1.2.7")
        .with("status", "suspended");

    match mapper.map_one::<Device, _>(&row).require_complete() {
        Ok(device) => println!("mapped: {device:?}"),
        Err(err) => {
            eprintln!("{err}");
            for failure in &err.failures {
                eprintln!("  {failure}: {}", failure.error);
            }
        }
    }
}
