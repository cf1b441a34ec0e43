//! Assertion helpers for tests that drive step handlers directly.
//!
//! The macros are exported at the crate root.

/// Assert that a [`Result`] is `Ok` and unwrap it.
///
/// Panics with a message including the error when the value is an `Err`.
/// The error type must implement [`std::fmt::Display`].
///
/// # Examples
/// ```
/// use stepwise::assert_step_ok;
///
/// let res: Result<u8, &str> = Ok(3);
/// assert_eq!(assert_step_ok!(res), 3);
/// ```
#[macro_export]
macro_rules! assert_step_ok {
    ($expr:expr $(,)?) => {
        match $expr {
            ::core::result::Result::Ok(value) => value,
            ::core::result::Result::Err(e) => ::core::panic!("step returned error: {e}"),
        }
    };
}

/// Assert that a [`Result`] is `Err` and unwrap the error.
///
/// The two-argument form also checks that the error's display contains a
/// substring.
///
/// # Examples
/// ```
/// use stepwise::{StepError, assert_step_err};
///
/// let res: Result<(), StepError> = Err(StepError::mismatch("hello", "world"));
/// let err = assert_step_err!(res, "hello != world");
/// assert!(err.is_mismatch());
/// ```
#[macro_export]
macro_rules! assert_step_err {
    ($expr:expr $(,)?) => {
        match $expr {
            ::core::result::Result::Ok(_) => ::core::panic!("step succeeded unexpectedly"),
            ::core::result::Result::Err(e) => e,
        }
    };
    ($expr:expr, $msg:expr $(,)?) => {
        match $expr {
            ::core::result::Result::Ok(_) => ::core::panic!("step succeeded unexpectedly"),
            ::core::result::Result::Err(e) => {
                let __stepwise_display = e.to_string();
                let __stepwise_msg: &str = ::core::convert::AsRef::as_ref(&$msg);
                assert!(
                    __stepwise_display.contains(__stepwise_msg),
                    "error '{__stepwise_display}' does not contain '{__stepwise_msg}'",
                );
                e
            }
        }
    };
}
