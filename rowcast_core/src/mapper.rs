//! The mapper: rows in, populated structs plus per-field failures out.

use std::sync::Arc;

use crate::binding::BindingSet;
use crate::convert::{ConvertService, ConverterRegistry};
use crate::row::TupleRow;
use crate::{ConvertError, Mappable};

/// The outcome of mapping one row: the populated value plus whatever
/// per-field failures occurred. A failed field keeps its default; a
/// failure never aborts the row.
#[derive(Debug)]
pub struct Mapped<T> {
    pub value: T,
    pub failures: Vec<FieldFailure>,
}

impl<T> Mapped<T> {
    /// True when every binding applied cleanly.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Adopt the value, discarding any recorded failures.
    pub fn into_value(self) -> T {
        self.value
    }

    /// The value, but only if every field mapped.
    pub fn require_complete(self) -> Result<T, IncompleteMapping> {
        if self.failures.is_empty() {
            Ok(self.value)
        } else {
            Err(IncompleteMapping {
                failures: self.failures,
            })
        }
    }
}

/// One field's failure inside an otherwise-mapped row.
#[derive(Debug, thiserror::Error)]
#[error("column `{label}` could not be mapped into field `{field}`")]
pub struct FieldFailure {
    pub field: &'static str,
    pub label: String,
    #[source]
    pub error: ConvertError,
}

/// Returned by [`Mapped::require_complete`] when any field failed.
#[derive(Debug, thiserror::Error)]
#[error("mapping finished with {} field failure(s)", .failures.len())]
pub struct IncompleteMapping {
    pub failures: Vec<FieldFailure>,
}

/// Maps rows of named-column values into [`Mappable`] structs.
///
/// Construction picks the fallback conversion service; after that the
/// mapper is immutable, `Send + Sync`, and one instance can serve
/// concurrent callers. Mapping is pure and synchronous.
///
/// ```
/// use rowcast_core::{BindingSet, ConvertError, Mappable, MemoryRow, TupleMapper};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Tag {
///     name: String,
/// }
///
/// impl Mappable for Tag {
///     fn bindings() -> BindingSet<Self> {
///         let mut set = BindingSet::new();
///         set.bind(
///             "name",
///             "name",
///             Box::new(|tag: &mut Tag, row, converters, label| {
///                 match converters.extract::<String>(row, label)? {
///                     Some(v) => {
///                         tag.name = v;
///                         Ok(())
///                     }
///                     None => Err(ConvertError::NullValue),
///                 }
///             }),
///         );
///         set
///     }
/// }
///
/// let mapper = TupleMapper::new();
/// let row = MemoryRow::new().with("name", "alpha");
/// let mapped = mapper.map_one::<Tag, _>(&row);
/// assert!(mapped.is_complete());
/// assert_eq!(mapped.into_value(), Tag { name: "alpha".to_string() });
/// ```
pub struct TupleMapper {
    converters: ConverterRegistry,
}

impl TupleMapper {
    /// A mapper with the built-in conversions only.
    pub fn new() -> Self {
        TupleMapper {
            converters: ConverterRegistry::new(),
        }
    }

    /// A mapper that delegates unknown field types to `service`.
    pub fn with_service(service: Arc<dyn ConvertService>) -> Self {
        TupleMapper {
            converters: ConverterRegistry::with_service(service),
        }
    }

    /// The registry this mapper extracts through.
    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    /// Map a single row into a fresh `T`.
    pub fn map_one<T: Mappable, R: TupleRow>(&self, row: &R) -> Mapped<T> {
        self.apply(&T::bindings(), row)
    }

    /// Map an ordered batch of rows.
    ///
    /// The binding set is computed once for the whole batch. The output is
    /// eager, order-preserving, and exactly 1:1 with the input; rows are
    /// mapped independently, so one bad row never affects its neighbors.
    pub fn map_many<T: Mappable, R: TupleRow>(&self, rows: &[R]) -> Vec<Mapped<T>> {
        let bindings = T::bindings();
        rows.iter().map(|row| self.apply(&bindings, row)).collect()
    }

    fn apply<T: Mappable>(&self, bindings: &BindingSet<T>, row: &dyn TupleRow) -> Mapped<T> {
        let mut value = T::default();
        let mut failures = Vec::new();
        for binding in bindings.iter() {
            if let Err(error) = (binding.apply)(&mut value, row, &self.converters, &binding.label)
            {
                #[cfg(feature = "tracing")]
                tracing::error!(
                    field = binding.field,
                    label = %binding.label,
                    %error,
                    "field mapping failed; leaving the default value"
                );
                failures.push(FieldFailure {
                    field: binding.field,
                    label: binding.label.clone(),
                    error,
                });
            }
        }
        Mapped { value, failures }
    }
}

impl Default for TupleMapper {
    fn default() -> Self {
        Self::new()
    }
}
