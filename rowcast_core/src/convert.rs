//! The type conversion registry and its fallback seam.
//!
//! A fixed table maps target types to extraction policies; everything
//! outside the table is delegated to a pluggable [`ConvertService`]. The
//! per-type policies live in the free functions below so they can be called
//! (and tested) directly, independent of the registry.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use num_bigint::BigInt;
use rust_decimal::Decimal;

use crate::row::TupleRow;
use crate::value::{ColumnValue, Number};
use crate::ConvertError;

/// Type-erased conversion output.
pub type BoxedValue = Box<dyn Any>;

/// Direct text extraction. Non-text values are a type mismatch.
pub fn text(row: &dyn TupleRow, label: &str) -> Result<Option<String>, ConvertError> {
    match row.get(label) {
        None | Some(ColumnValue::Null) => Ok(None),
        Some(ColumnValue::Text(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ConvertError::TypeMismatch {
            expected: "text",
            found: other.kind(),
        }),
    }
}

/// Read a column through the numeric tower. NULL and absent are `None`;
/// non-numeric values are a type mismatch. The shared primitive behind all
/// integer, float, and boolean conversions.
pub fn numeric<'a>(
    row: &'a dyn TupleRow,
    label: &str,
) -> Result<Option<Number<'a>>, ConvertError> {
    match row.get(label) {
        None | Some(ColumnValue::Null) => Ok(None),
        Some(value) => match value.as_number() {
            Some(n) => Ok(Some(n)),
            None => Err(ConvertError::TypeMismatch {
                expected: "numeric",
                found: value.kind(),
            }),
        },
    }
}

/// Boolean policy: NULL stays NULL, otherwise strictly-positive is true.
/// `1` is true; `0` and `-1` are false.
pub fn boolean(row: &dyn TupleRow, label: &str) -> Result<Option<bool>, ConvertError> {
    Ok(numeric(row, label)?.map(|n| n.int_value() > 0))
}

/// Truncating narrowing to `i8`.
pub fn int8(row: &dyn TupleRow, label: &str) -> Result<Option<i8>, ConvertError> {
    Ok(numeric(row, label)?.map(|n| n.int_value() as i8))
}

/// Truncating narrowing to `i16`.
pub fn int16(row: &dyn TupleRow, label: &str) -> Result<Option<i16>, ConvertError> {
    Ok(numeric(row, label)?.map(|n| n.int_value() as i16))
}

/// Truncating narrowing to `i32`.
pub fn int32(row: &dyn TupleRow, label: &str) -> Result<Option<i32>, ConvertError> {
    Ok(numeric(row, label)?.map(|n| n.int_value()))
}

/// Truncating narrowing to `i64`.
pub fn int64(row: &dyn TupleRow, label: &str) -> Result<Option<i64>, ConvertError> {
    Ok(numeric(row, label)?.map(|n| n.long_value()))
}

/// Assert-cast to an arbitrary-precision integer: the column must already
/// hold the big-integer variant. Other numerics are a mismatch, never
/// coerced.
pub fn big_integer(row: &dyn TupleRow, label: &str) -> Result<Option<BigInt>, ConvertError> {
    match numeric(row, label)? {
        None => Ok(None),
        Some(Number::BigInt(b)) => Ok(Some(b.clone())),
        Some(other) => Err(ConvertError::TypeMismatch {
            expected: "big integer",
            found: other.kind(),
        }),
    }
}

/// Standard narrowing conversion to `f32`.
pub fn float32(row: &dyn TupleRow, label: &str) -> Result<Option<f32>, ConvertError> {
    Ok(numeric(row, label)?.map(|n| n.float_value()))
}

/// Standard widening conversion to `f64`.
pub fn float64(row: &dyn TupleRow, label: &str) -> Result<Option<f64>, ConvertError> {
    Ok(numeric(row, label)?.map(|n| n.double_value()))
}

/// Assert-cast to a decimal, same contract as [`big_integer`].
pub fn decimal(row: &dyn TupleRow, label: &str) -> Result<Option<Decimal>, ConvertError> {
    match numeric(row, label)? {
        None => Ok(None),
        Some(Number::Decimal(d)) => Ok(Some(d)),
        Some(other) => Err(ConvertError::TypeMismatch {
            expected: "decimal",
            found: other.kind(),
        }),
    }
}

/// Direct typed extraction of a calendar date. Variant-exact: a timestamp
/// column does not narrow to a date.
pub fn date(row: &dyn TupleRow, label: &str) -> Result<Option<NaiveDate>, ConvertError> {
    match row.get(label) {
        None | Some(ColumnValue::Null) => Ok(None),
        Some(value) => match value.as_date() {
            Some(d) => Ok(Some(d)),
            None => Err(ConvertError::TypeMismatch {
                expected: "date",
                found: value.kind(),
            }),
        },
    }
}

/// Direct typed extraction of a wall-clock timestamp.
pub fn timestamp(row: &dyn TupleRow, label: &str) -> Result<Option<NaiveDateTime>, ConvertError> {
    match row.get(label) {
        None | Some(ColumnValue::Null) => Ok(None),
        Some(value) => match value.as_timestamp() {
            Some(t) => Ok(Some(t)),
            None => Err(ConvertError::TypeMismatch {
                expected: "timestamp",
                found: value.kind(),
            }),
        },
    }
}

/// Extract a timestamp column as a UTC instant.
pub fn instant(row: &dyn TupleRow, label: &str) -> Result<Option<DateTime<Utc>>, ConvertError> {
    Ok(timestamp(row, label)?
        .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc)))
}

/// Runtime descriptor of a conversion target, handed to the fallback
/// service in place of the compile-time type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetType {
    id: TypeId,
    name: &'static str,
}

impl TargetType {
    pub fn of<V: Any>() -> Self {
        TargetType {
            id: TypeId::of::<V>(),
            name: type_name::<V>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The target's type name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is<V: Any>(&self) -> bool {
        self.id == TypeId::of::<V>()
    }
}

/// The pluggable conversion seam consulted for every target type outside
/// the fixed table. Implementations never see NULL: the registry resolves
/// NULL and absent columns to `None` before delegating.
pub trait ConvertService: Send + Sync {
    fn convert(&self, value: &ColumnValue, target: &TargetType)
        -> Result<BoxedValue, ConvertError>;
}

/// The default service: every request is an unsupported conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConversions;

impl ConvertService for NoConversions {
    fn convert(
        &self,
        value: &ColumnValue,
        target: &TargetType,
    ) -> Result<BoxedValue, ConvertError> {
        Err(ConvertError::UnsupportedConversion {
            from: value.kind(),
            target: target.name(),
        })
    }
}

type TableEntry = Box<dyn Fn(&ColumnValue) -> Result<BoxedValue, ConvertError> + Send + Sync>;

/// A ready-made [`ConvertService`]: user conversions keyed by target type.
///
/// ```
/// use std::sync::Arc;
/// use rowcast_core::{ColumnValue, ConversionTable, ConvertError, TupleMapper};
/// use uuid::Uuid;
///
/// let table = ConversionTable::new().register(|value: &ColumnValue| {
///     match value.as_text() {
///         Some(s) => Uuid::parse_str(s).map_err(|_| ConvertError::TypeMismatch {
///             expected: "uuid text",
///             found: "text",
///         }),
///         None => Err(ConvertError::TypeMismatch {
///             expected: "text",
///             found: value.kind(),
///         }),
///     }
/// });
/// let mapper = TupleMapper::with_service(Arc::new(table));
/// # let _ = mapper;
/// ```
#[derive(Default)]
pub struct ConversionTable {
    entries: HashMap<TypeId, TableEntry>,
}

impl ConversionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a conversion producing `V`, builder style. A later
    /// registration for the same target replaces the earlier one.
    pub fn register<V, F>(mut self, convert: F) -> Self
    where
        V: Any,
        F: Fn(&ColumnValue) -> Result<V, ConvertError> + Send + Sync + 'static,
    {
        self.entries.insert(
            TypeId::of::<V>(),
            Box::new(move |value| convert(value).map(|v| Box::new(v) as BoxedValue)),
        );
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConvertService for ConversionTable {
    fn convert(
        &self,
        value: &ColumnValue,
        target: &TargetType,
    ) -> Result<BoxedValue, ConvertError> {
        match self.entries.get(&target.id()) {
            Some(convert) => convert(value),
            None => Err(ConvertError::UnsupportedConversion {
                from: value.kind(),
                target: target.name(),
            }),
        }
    }
}

type FixedEntry =
    Box<dyn Fn(&dyn TupleRow, &str) -> Result<Option<BoxedValue>, ConvertError> + Send + Sync>;

/// The per-field extraction front door: a fixed table of built-in
/// conversion policies plus the fallback service for everything else.
///
/// Immutable after construction and safe to share across threads; one
/// registry (inside its [`crate::TupleMapper`]) can serve concurrent
/// callers.
pub struct ConverterRegistry {
    table: HashMap<TypeId, FixedEntry>,
    service: Arc<dyn ConvertService>,
}

impl ConverterRegistry {
    /// A registry with the built-in table and no fallback conversions.
    pub fn new() -> Self {
        Self::with_service(Arc::new(NoConversions))
    }

    /// A registry delegating unknown target types to `service`.
    pub fn with_service(service: Arc<dyn ConvertService>) -> Self {
        let mut table: HashMap<TypeId, FixedEntry> = HashMap::new();
        table.insert(TypeId::of::<String>(), fixed(text));
        table.insert(TypeId::of::<bool>(), fixed(boolean));
        table.insert(TypeId::of::<i8>(), fixed(int8));
        table.insert(TypeId::of::<i16>(), fixed(int16));
        table.insert(TypeId::of::<i32>(), fixed(int32));
        table.insert(TypeId::of::<i64>(), fixed(int64));
        table.insert(TypeId::of::<BigInt>(), fixed(big_integer));
        table.insert(TypeId::of::<f32>(), fixed(float32));
        table.insert(TypeId::of::<f64>(), fixed(float64));
        table.insert(TypeId::of::<Decimal>(), fixed(decimal));
        table.insert(TypeId::of::<NaiveDate>(), fixed(date));
        table.insert(TypeId::of::<NaiveDateTime>(), fixed(timestamp));
        table.insert(TypeId::of::<DateTime<Utc>>(), fixed(instant));
        ConverterRegistry { table, service }
    }

    /// True when `V` is served by the fixed table rather than the fallback.
    pub fn has_fixed<V: Any>(&self) -> bool {
        self.table.contains_key(&TypeId::of::<V>())
    }

    /// Typed extraction of one column. `Ok(None)` means NULL or absent.
    ///
    /// ```
    /// use rowcast_core::{ConverterRegistry, MemoryRow};
    ///
    /// let registry = ConverterRegistry::new();
    /// let row = MemoryRow::new().with("age", 41i64).with("nickname", "kip");
    ///
    /// assert_eq!(registry.extract::<i16>(&row, "age").unwrap(), Some(41));
    /// assert_eq!(
    ///     registry.extract::<String>(&row, "nickname").unwrap(),
    ///     Some("kip".to_string())
    /// );
    /// assert_eq!(registry.extract::<i64>(&row, "absent").unwrap(), None);
    /// ```
    pub fn extract<V: Any>(
        &self,
        row: &dyn TupleRow,
        label: &str,
    ) -> Result<Option<V>, ConvertError> {
        if let Some(entry) = self.table.get(&TypeId::of::<V>()) {
            return match entry(row, label)? {
                Some(boxed) => Ok(Some(unbox::<V>(boxed)?)),
                None => Ok(None),
            };
        }
        let value = match row.get(label) {
            None => return Ok(None),
            Some(value) if value.is_null() => return Ok(None),
            Some(value) => value,
        };
        let boxed = self.service.convert(value, &TargetType::of::<V>())?;
        Ok(Some(unbox::<V>(boxed)?))
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn fixed<V: Any>(
    convert: fn(&dyn TupleRow, &str) -> Result<Option<V>, ConvertError>,
) -> FixedEntry {
    Box::new(move |row, label| Ok(convert(row, label)?.map(|v| Box::new(v) as BoxedValue)))
}

fn unbox<V: Any>(boxed: BoxedValue) -> Result<V, ConvertError> {
    match boxed.downcast::<V>() {
        Ok(v) => Ok(*v),
        Err(_) => Err(ConvertError::TypeMismatch {
            expected: type_name::<V>(),
            found: "mistyped conversion output",
        }),
    }
}
