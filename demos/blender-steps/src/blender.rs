//! Steps that put a thing in a blender and check what comes out.
//!
//! Switching the blender on replaces the thing with its entry in
//! [`TRANSFORMATIONS`]. A thing with no entry is an authoring mistake in the
//! scenario, so the step fails with a lookup error and leaves the context as
//! it was.

use stepwise::{ContextKey, ScenarioContext, StepError, StepResult, assert, impl_step_args};

/// The thing currently in the blender.
pub const THING: ContextKey<String> = ContextKey::new("thing");

/// Name of the table in lookup errors.
pub const TABLE: &str = "the transformation table";

/// What each thing turns into.
pub const TRANSFORMATIONS: [(&str, &str); 5] = [
    ("thing", "other thing"),
    ("Red Tree Frog", "mush"),
    ("apples", "apple juice"),
    ("iPhone", "toxic waste"),
    ("Galaxy Nexus", "whoops"),
];

/// Pattern of [`place_in_container`].
pub const PLACE_IN_CONTAINER: &str = r#"I put "{thing}" in a blender"#;
/// Pattern of [`apply_transformation`].
pub const APPLY_TRANSFORMATION: &str = "I switch the blender on";
/// Pattern of [`assert_equal`].
pub const ASSERT_EQUAL: &str = r#"it should transform into "{other_thing}""#;

/// Arguments of [`place_in_container`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thing {
    /// What goes into the blender.
    pub thing: String,
}
impl_step_args!(Thing { thing });

/// Arguments of [`assert_equal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherThing {
    /// What should come out.
    pub other_thing: String,
}
impl_step_args!(OtherThing { other_thing });

/// Look up what `input` turns into.
///
/// # Examples
/// ```
/// use blender_steps::blender::transform;
///
/// assert_eq!(transform("apples"), Some("apple juice"));
/// assert_eq!(transform("unknown item"), None);
/// ```
#[must_use]
pub fn transform(input: &str) -> Option<&'static str> {
    TRANSFORMATIONS
        .iter()
        .find(|(from, _)| *from == input)
        .map(|&(_, to)| to)
}

/// `Given I put "{thing}" in a blender`.
///
/// # Errors
/// Never fails.
pub fn place_in_container(ctx: &mut ScenarioContext, Thing { thing }: Thing) -> StepResult {
    ctx.set(&THING, thing);
    Ok(())
}

/// `When I switch the blender on`.
///
/// # Errors
/// [`StepError::Lookup`] when the thing has no entry in [`TRANSFORMATIONS`];
/// [`StepError::MissingValue`] when the blender is empty.
pub fn apply_transformation(ctx: &mut ScenarioContext, (): ()) -> StepResult {
    let current = ctx.require(&THING)?;
    let Some(result) = transform(current) else {
        return Err(StepError::lookup(TABLE, current.as_str()));
    };
    tracing::debug!("blending '{current}' into '{result}'");
    ctx.set(&THING, result.to_owned());
    Ok(())
}

/// `Then it should transform into "{other_thing}"`.
///
/// # Errors
/// [`StepError::Mismatch`] when the blender holds something else.
pub fn assert_equal(ctx: &mut ScenarioContext, expected: OtherThing) -> StepResult {
    assert::equal(ctx.require(&THING)?, &expected.other_thing)
}
