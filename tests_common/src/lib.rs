//! Common fixtures and generic mapping scenarios reusable across the
//! workspace's test crates.

use rowcast_core::{ColumnValue, MemoryRow, TupleMapper};
use rowcast_macros::Mappable;

/// The canonical test entity, shared so every test crate maps the same shape.
#[derive(Mappable, Clone, Debug, Default, PartialEq)]
pub struct User {
    #[db]
    pub id: i64,
    #[db(column = "email_address")]
    pub email: String,
    #[db]
    pub active: bool,
    #[db]
    pub last_seen: Option<i64>,
    /// Never mapped; must keep its default after mapping.
    pub session_token: Option<String>,
}

/// Audit columns embedded into other entities via `#[db(flatten)]`.
#[derive(Mappable, Clone, Debug, Default, PartialEq)]
pub struct Audited {
    #[db]
    pub created_by: String,
    #[db]
    pub revision: i64,
}

/// Entity with an embedded [`Audited`]. Its own `revision` field shares a
/// label with the embedded one, so the outer binding must win.
#[derive(Mappable, Clone, Debug, Default, PartialEq)]
pub struct AuditedNote {
    #[db(flatten)]
    pub audit: Audited,
    #[db]
    pub body: String,
    #[db]
    pub revision: i64,
}

/// A fully-populated row for [`User`].
pub fn user_row(id: i64) -> MemoryRow {
    MemoryRow::new()
        .with("id", id)
        .with("email_address", format!("user{id}@example.com"))
        .with("active", true)
        .with("last_seen", 1_700_000_000_i64)
}

/// Like [`user_row`], but the `id` column holds text so exactly that field
/// fails to map.
pub fn user_row_mistyped_id(id: i64) -> MemoryRow {
    MemoryRow::new()
        .with("id", ColumnValue::Text(id.to_string()))
        .with("email_address", format!("user{id}@example.com"))
        .with("active", true)
        .with("last_seen", 1_700_000_000_i64)
}

/// Like [`user_row`], but without the `email_address` column.
pub fn user_row_missing_email(id: i64) -> MemoryRow {
    MemoryRow::new()
        .with("id", id)
        .with("active", true)
        .with("last_seen", 1_700_000_000_i64)
}

/// The entity [`user_row`] is expected to map into.
pub fn expected_user(id: i64) -> User {
    User {
        id,
        email: format!("user{id}@example.com"),
        active: true,
        last_seen: Some(1_700_000_000),
        session_token: None,
    }
}

/// Generic happy-path scenario: a complete row populates every mapped field.
pub fn assert_user_roundtrip(mapper: &TupleMapper) {
    let mapped = mapper.map_one::<User, _>(&user_row(7));
    assert!(
        mapped.is_complete(),
        "unexpected field failures: {:?}",
        mapped.failures
    );
    assert_eq!(mapped.value, expected_user(7));
}

/// Generic partial-failure scenario: one mistyped column is recorded as a
/// failure while every other field still maps.
pub fn assert_user_partial_failure(mapper: &TupleMapper) {
    let mapped = mapper.map_one::<User, _>(&user_row_mistyped_id(7));
    assert_eq!(mapped.failures.len(), 1);
    assert_eq!(mapped.failures[0].field, "id");
    assert_eq!(mapped.failures[0].label, "id");
    // The failed field keeps its default; the rest of the row still lands.
    assert_eq!(mapped.value.id, 0);
    assert_eq!(mapped.value.email, expected_user(7).email);
    assert!(mapped.value.active);
}
