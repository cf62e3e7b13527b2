//! The dynamically-typed column value model.
//!
//! Rows hand back [`ColumnValue`]s; the conversion layer narrows them into
//! the field types of the target struct. Numeric variants are unified by the
//! borrowed [`Number`] view, which carries the truncation contract shared by
//! every integer/float conversion in the registry.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

/// A single column value as produced by a database driver.
///
/// Machine integers widen into `Int` and binary floats into `Float` on the
/// row side; arbitrary-precision values keep their own variants. There is no
/// boolean variant on purpose: booleans arrive as numeric columns and are
/// produced by the boolean conversion policy.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ColumnValue {
    #[default]
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    BigInt(BigInt),
    Decimal(Decimal),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl ColumnValue {
    /// Returns true for SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    /// Short tag for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ColumnValue::Null => "null",
            ColumnValue::Text(_) => "text",
            ColumnValue::Int(_) => "integer",
            ColumnValue::Float(_) => "float",
            ColumnValue::BigInt(_) => "big integer",
            ColumnValue::Decimal(_) => "decimal",
            ColumnValue::Date(_) => "date",
            ColumnValue::Timestamp(_) => "timestamp",
        }
    }

    /// Borrow the value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ColumnValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// View the value through the numeric tower, if it is numeric.
    pub fn as_number(&self) -> Option<Number<'_>> {
        match self {
            ColumnValue::Int(v) => Some(Number::Int(*v)),
            ColumnValue::Float(v) => Some(Number::Float(*v)),
            ColumnValue::BigInt(b) => Some(Number::BigInt(b)),
            ColumnValue::Decimal(d) => Some(Number::Decimal(*d)),
            _ => None,
        }
    }

    /// Borrow the value as a calendar date, if it is one.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            ColumnValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Borrow the value as a wall-clock timestamp, if it is one.
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            ColumnValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }
}

impl From<&str> for ColumnValue {
    fn from(v: &str) -> Self {
        ColumnValue::Text(v.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(v: String) -> Self {
        ColumnValue::Text(v)
    }
}

impl From<i32> for ColumnValue {
    fn from(v: i32) -> Self {
        ColumnValue::Int(v as i64)
    }
}

impl From<i64> for ColumnValue {
    fn from(v: i64) -> Self {
        ColumnValue::Int(v)
    }
}

impl From<f32> for ColumnValue {
    fn from(v: f32) -> Self {
        ColumnValue::Float(v as f64)
    }
}

impl From<f64> for ColumnValue {
    fn from(v: f64) -> Self {
        ColumnValue::Float(v)
    }
}

/// Booleans are stored numerically, the way SQLite-family drivers do it.
impl From<bool> for ColumnValue {
    fn from(v: bool) -> Self {
        ColumnValue::Int(v as i64)
    }
}

impl From<BigInt> for ColumnValue {
    fn from(v: BigInt) -> Self {
        ColumnValue::BigInt(v)
    }
}

impl From<Decimal> for ColumnValue {
    fn from(v: Decimal) -> Self {
        ColumnValue::Decimal(v)
    }
}

impl From<NaiveDate> for ColumnValue {
    fn from(v: NaiveDate) -> Self {
        ColumnValue::Date(v)
    }
}

impl From<NaiveDateTime> for ColumnValue {
    fn from(v: NaiveDateTime) -> Self {
        ColumnValue::Timestamp(v)
    }
}

/// Instants are stored as their UTC wall-clock reading.
impl From<DateTime<Utc>> for ColumnValue {
    fn from(v: DateTime<Utc>) -> Self {
        ColumnValue::Timestamp(v.naive_utc())
    }
}

impl<T> From<Option<T>> for ColumnValue
where
    ColumnValue: From<T>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => ColumnValue::from(v),
            None => ColumnValue::Null,
        }
    }
}

/// A borrowed view over the numeric [`ColumnValue`] variants.
///
/// The accessors reproduce the classic numeric-tower narrowing contract:
/// integer narrowing keeps low bits, float-to-integer truncates toward zero
/// and saturates at the bounds (NaN reads as 0), arbitrary-precision
/// integers contribute their low bits, decimals drop their fractional part
/// first. There are no range checks anywhere on this path.
#[derive(Debug, Clone, Copy)]
pub enum Number<'a> {
    Int(i64),
    Float(f64),
    BigInt(&'a BigInt),
    Decimal(Decimal),
}

impl Number<'_> {
    /// Short tag for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Number::Int(_) => "integer",
            Number::Float(_) => "float",
            Number::BigInt(_) => "big integer",
            Number::Decimal(_) => "decimal",
        }
    }

    /// Narrow to `i32`, truncating.
    pub fn int_value(&self) -> i32 {
        match self {
            Number::Int(v) => *v as i32,
            Number::Float(v) => *v as i32,
            Number::BigInt(b) => low_bits(b) as i32,
            Number::Decimal(d) => d.trunc().to_i128().unwrap_or(0) as i32,
        }
    }

    /// Narrow (or read) as `i64`, truncating.
    pub fn long_value(&self) -> i64 {
        match self {
            Number::Int(v) => *v,
            Number::Float(v) => *v as i64,
            Number::BigInt(b) => low_bits(b) as i64,
            Number::Decimal(d) => d.trunc().to_i128().unwrap_or(0) as i64,
        }
    }

    /// Convert to `f32`; magnitudes beyond the float range become infinities.
    pub fn float_value(&self) -> f32 {
        match self {
            Number::Int(v) => *v as f32,
            Number::Float(v) => *v as f32,
            Number::BigInt(b) => big_to_f32(b),
            Number::Decimal(d) => d.to_f32().unwrap_or(f32::NAN),
        }
    }

    /// Convert to `f64`; magnitudes beyond the double range become infinities.
    pub fn double_value(&self) -> f64 {
        match self {
            Number::Int(v) => *v as f64,
            Number::Float(v) => *v,
            Number::BigInt(b) => big_to_f64(b),
            Number::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
        }
    }
}

/// Low 64 bits of a big integer in two's-complement form.
fn low_bits(value: &BigInt) -> u64 {
    let modulus = BigInt::from(1u128 << 64);
    let mut low = value % &modulus;
    if low.sign() == Sign::Minus {
        low += &modulus;
    }
    low.to_u64().unwrap_or(0)
}

fn big_to_f32(value: &BigInt) -> f32 {
    match value.to_f32() {
        Some(v) => v,
        None if value.sign() == Sign::Minus => f32::NEG_INFINITY,
        None => f32::INFINITY,
    }
}

fn big_to_f64(value: &BigInt) -> f64 {
    match value.to_f64() {
        Some(v) => v,
        None if value.sign() == Sign::Minus => f64::NEG_INFINITY,
        None => f64::INFINITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_the_default_variant() {
        assert!(ColumnValue::default().is_null());
        assert!(!ColumnValue::Int(0).is_null());
    }

    #[test]
    fn kinds_name_every_variant() {
        assert_eq!(ColumnValue::Null.kind(), "null");
        assert_eq!(ColumnValue::Text("x".into()).kind(), "text");
        assert_eq!(ColumnValue::Int(1).kind(), "integer");
        assert_eq!(ColumnValue::Float(1.0).kind(), "float");
        assert_eq!(ColumnValue::BigInt(BigInt::from(1)).kind(), "big integer");
        assert_eq!(ColumnValue::Decimal(Decimal::new(1, 0)).kind(), "decimal");
    }

    #[test]
    fn from_impls_choose_the_expected_variant() {
        assert_eq!(ColumnValue::from("s"), ColumnValue::Text("s".to_string()));
        assert_eq!(ColumnValue::from(7i32), ColumnValue::Int(7));
        assert_eq!(ColumnValue::from(7i64), ColumnValue::Int(7));
        assert_eq!(ColumnValue::from(1.5f64), ColumnValue::Float(1.5));
        assert_eq!(ColumnValue::from(true), ColumnValue::Int(1));
        assert_eq!(ColumnValue::from(false), ColumnValue::Int(0));
        assert_eq!(ColumnValue::from(None::<i64>), ColumnValue::Null);
        assert_eq!(ColumnValue::from(Some(3i64)), ColumnValue::Int(3));
    }

    #[test]
    fn instant_from_impl_stores_the_utc_wall_clock() {
        let naive = NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let instant = DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc);
        assert_eq!(ColumnValue::from(instant), ColumnValue::Timestamp(naive));
    }

    #[test]
    fn integer_narrowing_keeps_low_bits() {
        assert_eq!(Number::Int(300).int_value() as i8, 44);
        assert_eq!(Number::Int(0x1_0000_0001).int_value(), 1);
        assert_eq!(Number::Int(-1).int_value(), -1);
    }

    #[test]
    fn float_to_integer_truncates_and_saturates() {
        assert_eq!(Number::Float(3.99).long_value(), 3);
        assert_eq!(Number::Float(-3.99).long_value(), -3);
        assert_eq!(Number::Float(1e300).int_value(), i32::MAX);
        assert_eq!(Number::Float(-1e300).int_value(), i32::MIN);
        assert_eq!(Number::Float(f64::NAN).int_value(), 0);
    }

    #[test]
    fn big_integer_contributes_low_bits() {
        let big = BigInt::from(u64::MAX) + BigInt::from(43); // 2^64 + 42
        assert_eq!(Number::BigInt(&big).long_value(), 42);
        assert_eq!(Number::BigInt(&big).int_value(), 42);

        let negative = BigInt::from(-1);
        assert_eq!(Number::BigInt(&negative).long_value(), -1);
    }

    #[test]
    fn decimal_truncates_the_fraction_first() {
        let d = Decimal::new(12345, 2); // 123.45
        assert_eq!(Number::Decimal(d).int_value(), 123);
        assert_eq!(Number::Decimal(d).long_value(), 123);
        let neg = Decimal::new(-12345, 2);
        assert_eq!(Number::Decimal(neg).int_value(), -123);
    }

    #[test]
    fn widening_to_floats() {
        assert_eq!(Number::Int(3).double_value(), 3.0);
        assert_eq!(Number::Int(3).float_value(), 3.0);
        let big = BigInt::from(1) << 2000; // far outside the f64 range
        assert_eq!(Number::BigInt(&big).double_value(), f64::INFINITY);
        assert_eq!(Number::BigInt(&(-big)).double_value(), f64::NEG_INFINITY);
    }
}
