//! Type-directed parsing of raw string values.
//!
//! A type is hydratable as a field value when it implements [`Coerce`]. The
//! built-in implementations cover text, every numeric primitive, `bool`,
//! `char`, paths and the common `chrono` date types. Any other type that
//! implements [`FromStr`](std::str::FromStr) can opt in with
//! [`coerce_from_str!`](crate::coerce_from_str).
//!
//! Empty values never reach a coercer: the binder skips them and the field
//! keeps its default.

use std::fmt::Display;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

/// Failure to turn a raw string into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CoerceError {
    message: String,
}

impl CoerceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Wraps the display output of an underlying parse error.
    pub fn from_display(err: impl Display) -> Self {
        Self::new(err.to_string())
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Capability to parse a value of `Self` from its string serialization.
pub trait Coerce: Sized {
    /// Name used for this type in error messages.
    const TYPE_NAME: &'static str;

    fn coerce(raw: &str) -> Result<Self, CoerceError>;
}

/// Coerces `raw` into `T`.
pub fn coerce<T: Coerce>(raw: &str) -> Result<T, CoerceError> {
    T::coerce(raw)
}

/// Implements [`Coerce`] for types that already implement `FromStr`.
///
/// ```ignore
/// #[derive(Debug, Default)]
/// struct Celsius(f64);
///
/// impl std::str::FromStr for Celsius { /* ... */ }
///
/// hydrate_core::coerce_from_str!(Celsius);
/// ```
#[macro_export]
macro_rules! coerce_from_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Coerce for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn coerce(raw: &str) -> ::std::result::Result<Self, $crate::CoerceError> {
                    <$ty as ::std::str::FromStr>::from_str(raw)
                        .map_err($crate::CoerceError::from_display)
                }
            }
        )+
    };
}

coerce_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, char, PathBuf, NaiveDate,
    NaiveDateTime,
);

/// Floats accept surrounding whitespace and a trailing `d`/`D`/`f`/`F` type
/// suffix, e.g. `" 3.14"` or `"2.5f"`.
macro_rules! coerce_float {
    ($($ty:ty),+) => {
        $(
            impl Coerce for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn coerce(raw: &str) -> Result<Self, CoerceError> {
                    float_literal(raw)
                        .parse::<$ty>()
                        .map_err(CoerceError::from_display)
                }
            }
        )+
    };
}

coerce_float!(f32, f64);

fn float_literal(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.strip_suffix(['d', 'D', 'f', 'F']) {
        // "inf" keeps its trailing 'f'
        Some(number) if number.ends_with(|c: char| c.is_ascii_digit() || c == '.') => number,
        _ => trimmed,
    }
}

impl Coerce for String {
    const TYPE_NAME: &'static str = "String";

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        Ok(raw.to_string())
    }
}

impl Coerce for bool {
    const TYPE_NAME: &'static str = "bool";

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        if raw.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(CoerceError::new("expected 'true' or 'false'"))
        }
    }
}

impl Coerce for DateTime<Utc> {
    const TYPE_NAME: &'static str = "DateTime<Utc>";

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(CoerceError::from_display)
    }
}

impl<V: Coerce> Coerce for Option<V> {
    const TYPE_NAME: &'static str = V::TYPE_NAME;

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        V::coerce(raw).map(Some)
    }
}
