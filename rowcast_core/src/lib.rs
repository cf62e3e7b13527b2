#![forbid(unsafe_code)]
//! Core engine for the rowcast tuple mapper.
//! The row and value abstractions, the conversion registry, field bindings,
//! and the mapper live here. The derive macro lives in `rowcast_macros` and
//! the user-facing surface is re-exported by the `rowcast` facade crate.

pub mod binding;
pub mod case;
pub mod convert;
pub mod mapper;
pub mod row;
pub mod value;

pub use binding::{BindFn, BindingSet, FieldBinding};
pub use case::camel_to_snake;
pub use convert::{
    BoxedValue, ConversionTable, ConvertService, ConverterRegistry, NoConversions, TargetType,
};
pub use mapper::{FieldFailure, IncompleteMapping, Mapped, TupleMapper};
pub use row::{MemoryRow, TupleRow};
pub use value::{ColumnValue, Number};

/// A struct the mapper can populate from a row.
///
/// `bindings()` is the discovery step: it produces the set of
/// (column label, application closure) pairs the mapper runs per row.
/// Normally implemented with `#[derive(Mappable)]` from `rowcast_macros`;
/// hand-written impls over [`BindingSet::bind`] and [`BindingSet::merge`]
/// are equally supported.
///
/// The `Default` bound is what makes construction infallible: the mapper
/// builds the default instance first and populates bound fields after, so
/// a failed field simply keeps its default.
pub trait Mappable: Default + Sized {
    fn bindings() -> BindingSet<Self>;
}

/// A single field conversion error.
///
/// These are per-field: the mapper records them in [`Mapped::failures`]
/// and moves on; they never abort a row.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The column's value kind does not satisfy the target type's policy.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// NULL (or an absent column) routed into a field that cannot hold it.
    #[error("null value for a required field")]
    NullValue,
    /// The fallback service has no conversion for this pair.
    #[error("unsupported conversion from {from} to {target}")]
    UnsupportedConversion {
        from: &'static str,
        target: &'static str,
    },
}
