//! Steps that record typed text and check it back.

use stepwise::{ContextKey, ScenarioContext, StepResult, assert};

/// Text recorded by [`record_input`].
pub const DATA: ContextKey<String> = ContextKey::new("data");

/// Line emitted every time text is typed in.
pub const CONSOLE_LINE: &str = "Some console output!";

/// Pattern of [`record_input`].
pub const RECORD_INPUT: &str = r#"I type in "{}""#;
/// Pattern of [`verify_output`].
pub const VERIFY_OUTPUT: &str = r#"It should print "{}""#;

/// `When I type in "{}"`: store the text and emit [`CONSOLE_LINE`].
///
/// # Errors
/// Never fails.
pub fn record_input(ctx: &mut ScenarioContext, (text,): (String,)) -> StepResult {
    ctx.set(&DATA, text);
    ctx.emit(CONSOLE_LINE);
    Ok(())
}

/// `Then It should print "{}"`: compare the stored text with `text`.
///
/// # Errors
/// [`StepError::Mismatch`](stepwise::StepError::Mismatch) when they differ,
/// and [`StepError::MissingValue`](stepwise::StepError::MissingValue) when
/// nothing was typed in.
pub fn verify_output(ctx: &mut ScenarioContext, (text,): (String,)) -> StepResult {
    assert::equal(ctx.require(&DATA)?, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use stepwise::{StepError, assert_step_err, assert_step_ok};

    #[fixture]
    fn typed() -> ScenarioContext {
        let mut ctx = ScenarioContext::new();
        assert_step_ok!(record_input(&mut ctx, ("hello".to_owned(),)));
        ctx
    }

    #[rstest]
    fn recording_stores_and_emits(typed: ScenarioContext) {
        assert_eq!(typed.get(&DATA).map(String::as_str), Some("hello"));
        assert_eq!(typed.output(), [CONSOLE_LINE]);
    }

    #[rstest]
    #[case("")]
    #[case("hello")]
    #[case("with \"quotes\" and ünïcode")]
    fn typed_text_prints_back(#[case] text: &str) {
        let mut ctx = ScenarioContext::new();
        assert_step_ok!(record_input(&mut ctx, (text.to_owned(),)));
        assert_step_ok!(verify_output(&mut ctx, (text.to_owned(),)));
    }

    #[rstest]
    fn other_text_is_a_mismatch(mut typed: ScenarioContext) {
        let err = assert_step_err!(verify_output(&mut typed, ("world".to_owned(),)));
        assert_eq!(err.to_string(), "Text mismatch: hello != world");
        assert_eq!(err, StepError::mismatch("hello", "world"));
    }

    #[test]
    fn verifying_before_typing_fails() {
        let err = assert_step_err!(verify_output(
            &mut ScenarioContext::new(),
            ("hello".to_owned(),)
        ));
        assert_eq!(err, StepError::MissingValue { key: "data" });
    }

    #[rstest]
    fn typing_again_replaces_the_text(mut typed: ScenarioContext) {
        assert_step_ok!(record_input(&mut typed, ("again".to_owned(),)));
        assert_step_ok!(verify_output(&mut typed, ("again".to_owned(),)));
        assert_eq!(typed.output().len(), 2);
    }
}
