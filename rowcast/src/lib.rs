#![forbid(unsafe_code)]
//! Facade crate re-exporting core types and macros for the `rowcast-rs` library.
//!
//! This crate provides the main public API. It re-exports the mapper, the
//! conversion layer and the `Mappable` derive so that you only need to add this
//! single crate as a dependency in your application.
//!
//! # Example: Deriving `Mappable`
//!
//! The `#[derive(Mappable)]` macro inspects `#[db]` attributes and generates the
//! field bindings a [`TupleMapper`] uses to populate a struct from a row.
//! ```
//! use rowcast::{Mappable, MemoryRow, TupleMapper};
//!
//! // Column labels are deduced from field names unless overridden; `last_seen`
//! // is optional, so a NULL column becomes `None` instead of a field failure.
//! #[derive(Mappable, Debug, Default, PartialEq)]
//! struct User {
//!     #[db]
//!     id: i64,
//!     #[db(column = "email_address")]
//!     email: String,
//!     #[db]
//!     active: bool,
//!     #[db]
//!     last_seen: Option<i64>,
//! }
//!
//! let row = MemoryRow::new()
//!     .with("id", 7_i64)
//!     .with("email_address", "ada@example.com")
//!     .with("active", 1_i64)
//!     .with("last_seen", None::<i64>);
//!
//! let mapped = TupleMapper::new().map_one::<User, _>(&row);
//! assert!(mapped.is_complete());
//! assert_eq!(
//!     mapped.value,
//!     User {
//!         id: 7,
//!         email: "ada@example.com".into(),
//!         active: true,
//!         last_seen: None,
//!     }
//! );
//! ```
//!
//! # Example: Custom conversions
//!
//! Field types outside the built-in conversion table (UUIDs, enums, newtypes)
//! are served by a fallback [`ConvertService`] installed via
//! [`TupleMapper::with_service`]. Runnable examples live under
//! `rowcast/examples/`.

// Re-export the whole core surface.
pub use rowcast_core::{
    camel_to_snake, BindFn, BindingSet, BoxedValue, ColumnValue, ConversionTable, ConvertError,
    ConvertService, ConverterRegistry, FieldBinding, FieldFailure, IncompleteMapping, Mappable,
    Mapped, MemoryRow, NoConversions, Number, TargetType, TupleMapper, TupleRow,
};

// Re-export the derive macro under the trait's name, serde-style.
pub use rowcast_macros::Mappable;
