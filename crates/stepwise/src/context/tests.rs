//! Tests for typed context storage and captured output.

use super::*;
use rstest::{fixture, rstest};

const THING: ContextKey<String> = ContextKey::new("thing");
const COUNT: ContextKey<u32> = ContextKey::new("count");
const THING_AS_NUMBER: ContextKey<u32> = ContextKey::new("thing");

#[fixture]
fn ctx() -> ScenarioContext {
    let mut ctx = ScenarioContext::new();
    ctx.set(&THING, "apples".to_string());
    ctx
}

#[rstest]
fn get_returns_stored_value(ctx: ScenarioContext) {
    assert_eq!(ctx.get(&THING).map(String::as_str), Some("apples"));
    assert!(ctx.get(&COUNT).is_none());
}

#[rstest]
fn set_returns_previous_value_of_same_type(mut ctx: ScenarioContext) {
    let previous = ctx.set(&THING, "apple juice".to_string());
    assert_eq!(previous.as_deref(), Some("apples"));
    assert_eq!(ctx.get(&THING).map(String::as_str), Some("apple juice"));
}

#[rstest]
fn set_with_other_type_replaces_silently(mut ctx: ScenarioContext) {
    assert_eq!(ctx.set(&THING_AS_NUMBER, 3), None);
    assert_eq!(ctx.get(&THING_AS_NUMBER), Some(&3));
    assert!(ctx.get(&THING).is_none());
}

#[rstest]
fn get_mut_allows_in_place_updates(mut ctx: ScenarioContext) {
    if let Some(thing) = ctx.get_mut(&THING) {
        thing.push_str(" and pears");
    }
    assert_eq!(
        ctx.get(&THING).map(String::as_str),
        Some("apples and pears")
    );
}

#[rstest]
fn require_reports_missing_key(ctx: ScenarioContext) {
    let Err(err) = ctx.require(&COUNT) else {
        panic!("count was never stored");
    };
    assert_eq!(err, StepError::MissingValue { key: "count" });
    assert_eq!(err.to_string(), "no value stored under 'count'");
}

#[rstest]
fn require_reports_type_mismatch(ctx: ScenarioContext) {
    let Err(err) = ctx.require(&THING_AS_NUMBER) else {
        panic!("thing holds a String");
    };
    assert!(matches!(
        err,
        StepError::WrongType {
            key: "thing",
            expected: "u32",
            found: "alloc::string::String",
        }
    ));
}

#[rstest]
fn require_mut_updates_value(mut ctx: ScenarioContext) {
    let updated = ctx.require_mut(&THING).map(|thing| {
        thing.clear();
        thing.push_str("mush");
    });
    assert!(updated.is_ok());
    assert_eq!(ctx.get(&THING).map(String::as_str), Some("mush"));
}

#[rstest]
fn remove_only_takes_matching_type(mut ctx: ScenarioContext) {
    assert_eq!(ctx.remove(&THING_AS_NUMBER), None);
    assert!(ctx.contains("thing"));
    assert_eq!(ctx.remove(&THING).as_deref(), Some("apples"));
    assert!(ctx.is_empty());
}

#[rstest]
fn names_are_sorted(mut ctx: ScenarioContext) {
    ctx.set(&COUNT, 2);
    assert_eq!(ctx.names(), vec!["count", "thing"]);
    assert_eq!(ctx.len(), 2);
}

#[test]
fn emit_appends_to_output() {
    let mut ctx = ScenarioContext::new();
    ctx.emit("Some console output!");
    ctx.emit(String::from("second"));
    assert_eq!(ctx.output(), ["Some console output!", "second"]);
}

#[test]
fn debug_lists_names_and_types() {
    let mut ctx = ScenarioContext::new();
    ctx.set(&COUNT, 1);
    let rendered = format!("{ctx:?}");
    assert!(rendered.contains("\"count\""), "{rendered}");
    assert!(rendered.contains("u32"), "{rendered}");
}

#[test]
fn keys_are_copy_and_debug() {
    let copy = THING;
    assert_eq!(copy.name(), THING.name());
    assert!(format!("{copy:?}").contains("thing"));
}
