//! Fixed-shape argument records built from placeholder captures.
//!
//! Every step handler receives its placeholders as one [`StepArgs`] value.
//! The registry compares the record's field list with the pattern's
//! placeholders when the step is registered, so arity mistakes surface at
//! start-up instead of mid-scenario. Conversion of the captured text happens
//! just before the handler runs; a failure there is reported as
//! [`ExecutionError::InvalidArguments`](crate::ExecutionError::InvalidArguments)
//! and the handler is never called.
//!
//! Implementations exist for `()` and tuples of up to four [`FromStr`]
//! values. Structs with named fields use [`impl_step_args!`](crate::impl_step_args):
//!
//! ```
//! use stepwise::{StepArgs, impl_step_args};
//!
//! struct Order {
//!     item: String,
//!     count: u32,
//! }
//! impl_step_args!(Order { item, count });
//!
//! let order = Order::from_captures(vec!["pears".into(), "3".into()])
//!     .expect("captures convert");
//! assert_eq!(order.item, "pears");
//! assert_eq!(order.count, 3);
//! assert_eq!(Order::FIELD_NAMES, ["item", "count"]);
//! ```

use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Field name used by records whose fields are matched by position only.
pub const POSITIONAL: &str = "_";

/// Captured text could not be turned into an argument record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StepArgsError {
    message: String,
}

impl StepArgsError {
    /// Construct an error with a custom message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// `raw` could not be parsed into the type of `field`.
    #[must_use]
    pub fn parse_failure(field: impl Display, raw: &str) -> Self {
        Self::new(format!("failed to parse field '{field}' from value '{raw}'"))
    }

    /// The number of captures differs from the number of fields.
    #[must_use]
    pub fn count_mismatch(expected: usize, actual: usize) -> Self {
        Self::new(format!(
            "expected {expected} captured value(s) but received {actual}"
        ))
    }

    /// The underlying message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Record populated from the ordered placeholder captures of a step.
pub trait StepArgs: Sized {
    /// Field names in capture order. [`POSITIONAL`] marks fields that accept
    /// any placeholder name.
    const FIELD_NAMES: &'static [&'static str];

    /// Convert the ordered captures into the record.
    ///
    /// # Errors
    /// Returns [`StepArgsError`] when the number of captures is wrong or a
    /// value does not parse.
    fn from_captures(values: Vec<String>) -> Result<Self, StepArgsError>;
}

/// Parse one captured value for `field`.
///
/// # Errors
/// Returns [`StepArgsError::parse_failure`] when `raw` does not parse as `T`.
pub fn parse_field<T: FromStr>(field: impl Display, raw: &str) -> Result<T, StepArgsError> {
    raw.parse()
        .map_err(|_| StepArgsError::parse_failure(field, raw))
}

/// Check that `values` holds exactly `expected` captures.
///
/// # Errors
/// Returns [`StepArgsError::count_mismatch`] otherwise.
pub fn expect_count(values: &[String], expected: usize) -> Result<(), StepArgsError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(StepArgsError::count_mismatch(expected, values.len()))
    }
}

impl StepArgs for () {
    const FIELD_NAMES: &'static [&'static str] = &[];

    fn from_captures(values: Vec<String>) -> Result<Self, StepArgsError> {
        expect_count(&values, 0)
    }
}

macro_rules! tuple_step_args {
    (@name $index:tt) => {
        POSITIONAL
    };
    ($($index:tt => $ty:ident),+) => {
        impl<$($ty: FromStr),+> StepArgs for ($($ty,)+) {
            const FIELD_NAMES: &'static [&'static str] = &[$(tuple_step_args!(@name $index)),+];

            fn from_captures(values: Vec<String>) -> Result<Self, StepArgsError> {
                expect_count(&values, Self::FIELD_NAMES.len())?;
                let mut values = values.into_iter();
                Ok(($(parse_field::<$ty>(
                    concat!("#", stringify!($index)),
                    &values.next().unwrap_or_default(),
                )?,)+))
            }
        }
    };
}

tuple_step_args!(0 => A);
tuple_step_args!(0 => A, 1 => B);
tuple_step_args!(0 => A, 1 => B, 2 => C);
tuple_step_args!(0 => A, 1 => B, 2 => C, 3 => D);

/// Implement [`StepArgs`] for a struct with named fields.
///
/// Fields are filled in the listed order and each field type must implement
/// [`FromStr`]. The field names are checked against named placeholders at
/// registration.
#[macro_export]
macro_rules! impl_step_args {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl $crate::StepArgs for $ty {
            const FIELD_NAMES: &'static [&'static str] = &[$(::core::stringify!($field)),+];

            fn from_captures(
                values: ::std::vec::Vec<::std::string::String>,
            ) -> ::core::result::Result<Self, $crate::StepArgsError> {
                $crate::step_args::expect_count(&values, Self::FIELD_NAMES.len())?;
                let mut values = values.into_iter();
                ::core::result::Result::Ok(Self {
                    $($field: $crate::step_args::parse_field(
                        ::core::stringify!($field),
                        &values.next().unwrap_or_default(),
                    )?,)+
                })
            }
        }
    };
}
