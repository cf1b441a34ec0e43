//! Assertions returning [`StepError`] instead of panicking.
//!
//! Handlers use these so a failed expectation aborts the scenario through the
//! normal error path and is recorded with its message.

use std::fmt::Display;

use crate::error::{StepError, StepResult};

/// Compare `actual` with `expected`.
///
/// # Errors
/// Returns [`StepError::Mismatch`] carrying both values when they differ.
///
/// # Examples
/// ```
/// use stepwise::assert;
///
/// assert!(assert::equal("hello", "hello").is_ok());
/// let err = assert::equal("hello", "world").unwrap_err();
/// assert_eq!(err.to_string(), "Text mismatch: hello != world");
/// ```
pub fn equal<T>(actual: &T, expected: &T) -> StepResult
where
    T: PartialEq + Display + ?Sized,
{
    if actual == expected {
        Ok(())
    } else {
        Err(StepError::mismatch(actual.to_string(), expected.to_string()))
    }
}

/// Check that `condition` holds.
///
/// # Errors
/// Returns [`StepError::Failed`] with `message` otherwise.
pub fn that(condition: bool, message: impl Into<String>) -> StepResult {
    if condition {
        Ok(())
    } else {
        Err(StepError::failed(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_step_err, assert_step_ok};

    #[test]
    fn equal_values_pass() {
        assert_step_ok!(equal("apple juice", "apple juice"));
        assert_step_ok!(equal(&3_u32, &3));
    }

    #[test]
    fn unequal_values_report_both_sides() {
        let err = assert_step_err!(equal("mush", "whoops"));
        assert_eq!(err, StepError::mismatch("mush", "whoops"));
    }

    #[test]
    fn that_uses_the_message() {
        assert_step_ok!(that(true, "unused"));
        let err = assert_step_err!(that(false, "blender is off"), "blender");
        assert_eq!(err, StepError::failed("blender is off"));
    }

    #[test]
    #[should_panic(expected = "step succeeded unexpectedly")]
    fn assert_step_err_panics_on_ok() {
        let _ = assert_step_err!(that(true, "fine"));
    }

    #[test]
    #[should_panic(expected = "step returned error")]
    fn assert_step_ok_panics_on_err() {
        assert_step_ok!(equal("a", "b"));
    }
}
