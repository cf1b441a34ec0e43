//! Tests for step registration and lookup.

use super::*;
use crate::error::StepError;
use rstest::{fixture, rstest};

const PICKED: crate::ContextKey<String> = crate::ContextKey::new("picked");

struct Thing {
    thing: String,
}
crate::impl_step_args!(Thing { thing });

#[fixture]
fn registry() -> StepRegistry {
    let mut registry = StepRegistry::new();
    registry
        .given(r#"I put "{thing}" in a blender"#, |ctx, args: Thing| {
            ctx.set(&PICKED, args.thing);
            Ok(())
        })
        .and_then(|r| {
            r.given(r#"I put "apples" in a blender"#, |ctx, ()| {
                ctx.set(&PICKED, "exactly apples".to_owned());
                Ok(())
            })
        })
        .and_then(|r| {
            r.when("I count {n:u32} items", |_, (n,): (u32,)| {
                if n > 10 {
                    Err(StepError::failed("too many"))
                } else {
                    Ok(())
                }
            })
        })
        .unwrap_or_else(|err| panic!("fixture steps register: {err}"));
    registry
}

#[rstest]
fn placeholder_step_captures_values(registry: StepRegistry) {
    let found = registry
        .find(StepKeyword::Given, r#"I put "iPhone" in a blender"#)
        .unwrap_or_else(|err| panic!("step resolves: {err}"));
    assert_eq!(found.captures(), ["iPhone"]);

    let mut ctx = ScenarioContext::new();
    assert_eq!(found.invoke(&mut ctx), Ok(Ok(())));
    assert_eq!(ctx.get(&PICKED).map(String::as_str), Some("iPhone"));
}

#[rstest]
fn exact_literal_wins_over_placeholder(registry: StepRegistry) {
    let found = registry
        .find(StepKeyword::Given, r#"I put "apples" in a blender"#)
        .unwrap_or_else(|err| panic!("step resolves: {err}"));
    assert!(found.definition().pattern().is_literal());
    assert!(found.captures().is_empty());
}

#[rstest]
fn keyword_must_match(registry: StepRegistry) {
    let err = registry
        .find(StepKeyword::Then, r#"I put "apples" in a blender"#)
        .err();
    assert_eq!(
        err,
        Some(ResolveError::NotFound {
            keyword: StepKeyword::Then,
            text: r#"I put "apples" in a blender"#.to_owned(),
        })
    );
}

#[rstest]
fn typed_placeholders_reject_other_text(registry: StepRegistry) {
    assert!(registry.find(StepKeyword::When, "I count 4 items").is_ok());
    assert!(registry.find(StepKeyword::When, "I count four items").is_err());
}

#[rstest]
fn handler_errors_are_returned_unchanged(registry: StepRegistry) {
    let found = registry
        .find(StepKeyword::When, "I count 11 items")
        .unwrap_or_else(|err| panic!("step resolves: {err}"));
    let outcome = found.invoke(&mut ScenarioContext::new());
    assert_eq!(outcome, Ok(Err(StepError::failed("too many"))));
}

#[rstest]
fn invocation_marks_steps_used(registry: StepRegistry) {
    assert_eq!(registry.unused_steps().len(), 3);
    let found = registry
        .find(StepKeyword::When, "I count 1 items")
        .unwrap_or_else(|err| panic!("step resolves: {err}"));
    let _ = found.invoke(&mut ScenarioContext::new());
    let unused: Vec<_> = registry
        .unused_steps()
        .into_iter()
        .map(|step| step.pattern().as_str().to_owned())
        .collect();
    assert_eq!(
        unused,
        [r#"I put "{thing}" in a blender"#, r#"I put "apples" in a blender"#]
    );
}

#[test]
fn equally_specific_matches_are_ambiguous() {
    let mut registry = StepRegistry::new();
    registry
        .then("{a} is {b}", |_, (_a, _b): (String, String)| Ok(()))
        .and_then(|r| r.then("{c} is {d}", |_, (_c, _d): (String, String)| Ok(())))
        .unwrap_or_else(|err| panic!("steps register: {err}"));

    let Err(ResolveError::Ambiguous { candidates, .. }) = registry.find(StepKeyword::Then, "x is y")
    else {
        panic!("two patterns with equal specificity should be ambiguous");
    };
    assert_eq!(candidates, ["{a} is {b}", "{c} is {d}"]);
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut registry = StepRegistry::new();
    registry
        .when("I switch the blender on", |_, ()| Ok(()))
        .unwrap_or_else(|err| panic!("first registration succeeds: {err}"));
    let err = registry
        .when("I switch the blender on", |_, ()| Ok(()))
        .err();
    assert!(matches!(err, Some(RegistryError::Duplicate { .. })));
    // The same text under another keyword is a different step.
    assert!(registry.then("I switch the blender on", |_, ()| Ok(())).is_ok());
    assert_eq!(registry.len(), 2);
}

#[test]
fn arity_is_checked_at_registration() {
    let mut registry = StepRegistry::new();
    let err = registry
        .given("I put {thing} in a {container}", |_, args: Thing| {
            drop(args);
            Ok(())
        })
        .err();
    assert!(matches!(
        err,
        Some(RegistryError::Arity {
            placeholders: 2,
            fields: 1,
            ..
        })
    ));
    assert!(registry.is_empty());
}

#[test]
fn field_names_must_match_named_placeholders() {
    let mut registry = StepRegistry::new();
    let err = registry
        .given(r#"I put "{item}" in a blender"#, |_, args: Thing| {
            drop(args);
            Ok(())
        })
        .err();
    let Some(RegistryError::FieldName {
        placeholder, field, ..
    }) = err
    else {
        panic!("mismatched field should be rejected");
    };
    assert_eq!((placeholder.as_str(), field), ("item", "thing"));
}

#[test]
fn positional_placeholders_accept_named_fields() {
    let mut registry = StepRegistry::new();
    assert!(
        registry
            .given(r#"I put "{}" in a blender"#, |_, args: Thing| {
                drop(args);
                Ok(())
            })
            .is_ok()
    );
}

#[rstest]
#[case(StepKeyword::And)]
#[case(StepKeyword::But)]
fn conjunctions_cannot_be_registered(#[case] keyword: StepKeyword) {
    let mut registry = StepRegistry::new();
    let err = registry.register(keyword, "anything", |_, ()| Ok(())).err();
    assert!(matches!(err, Some(RegistryError::Conjunction { .. })));
}

#[test]
fn malformed_patterns_are_rejected() {
    let mut registry = StepRegistry::new();
    let err = registry.given("unclosed {thing", |_, ()| Ok(())).err();
    let Some(RegistryError::Pattern { pattern, .. }) = err else {
        panic!("malformed pattern should be rejected");
    };
    assert_eq!(pattern, "unclosed {thing");
}

#[test]
fn definitions_record_registration_site() {
    let mut registry = StepRegistry::new();
    registry
        .given("a step", |_, ()| Ok(()))
        .unwrap_or_else(|err| panic!("step registers: {err}"));
    let definition = registry
        .definitions()
        .next()
        .unwrap_or_else(|| panic!("one definition"));
    assert!(definition.file().ends_with("tests.rs"));
    assert!(definition.line() > 0);
    assert_eq!(definition.keyword(), StepKeyword::Given);
}
