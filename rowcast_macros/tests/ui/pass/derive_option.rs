use rowcast_core::{ColumnValue, MemoryRow, TupleMapper};
use rowcast_macros::Mappable;

#[derive(Mappable, Debug, Default, PartialEq)]
struct Session {
    #[db]
    token: String,
    // Optional fields observe NULL as None; that is a success, not a failure.
    #[db]
    expires_at: Option<i64>,
}

fn main() {
    let mapper = TupleMapper::new();

    let row = MemoryRow::new()
        .with("token", "abc")
        .with("expires_at", ColumnValue::Null);
    let mapped = mapper.map_one::<Session, _>(&row);
    assert!(mapped.is_complete());
    assert_eq!(
        mapped.into_value(),
        Session {
            token: "abc".into(),
            expires_at: None
        }
    );

    let row = MemoryRow::new().with("token", "abc").with("expires_at", 99i64);
    let mapped = mapper.map_one::<Session, _>(&row);
    assert_eq!(mapped.into_value().expires_at, Some(99));
}
