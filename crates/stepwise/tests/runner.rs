//! End-to-end runs through the public API: a registry shared between
//! threads, each scenario with its own context.

use std::thread;

use stepwise::reporting::{Status, text};
use stepwise::{
    ContextKey, ExecutionError, Runner, Scenario, StepError, StepRegistry, assert, assert_step_err,
    assert_step_ok,
};

const COUNT: ContextKey<u32> = ContextKey::new("count");

fn counter_registry() -> StepRegistry {
    let mut registry = StepRegistry::new();
    registry
        .given("a counter at {start:u32}", |ctx, (start,): (u32,)| {
            ctx.set(&COUNT, start);
            Ok(())
        })
        .and_then(|r| {
            r.when("I add {step:u32}", |ctx, (step,): (u32,)| {
                let count = ctx.require_mut(&COUNT)?;
                *count = count
                    .checked_add(step)
                    .ok_or_else(|| StepError::failed("counter overflow"))?;
                Ok(())
            })
        })
        .and_then(|r| {
            r.then("the counter reads {expected:u32}", |ctx, (expected,): (u32,)| {
                assert::equal(ctx.require(&COUNT)?, &expected)
            })
        })
        .unwrap_or_else(|err| panic!("steps register: {err}"));
    registry
}

fn counting(start: u32, add: u32) -> Scenario {
    let total = start + add;
    Scenario::new(format!("{start} plus {add}"))
        .given(format!("a counter at {start}"))
        .when(format!("I add {add}"))
        .then(format!("the counter reads {total}"))
}

#[test]
fn scenarios_on_separate_threads_do_not_share_state() {
    let registry = counter_registry();
    let records: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8_u32)
            .map(|n| {
                let registry = &registry;
                scope.spawn(move || Runner::new(registry).run(&counting(n, n)))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|_| panic!("runner thread panicked")))
            .collect()
    });
    assert_eq!(records.len(), 8);
    assert!(records.iter().all(|record| record.status() == Status::Passed));
    assert!(registry.unused_steps().is_empty());
}

#[test]
fn handler_errors_surface_unchanged() {
    let registry = counter_registry();
    let runner = Runner::new(&registry);

    let ctx = assert_step_ok!(runner.execute(&counting(2, 3)));
    assert_eq!(ctx.get(&COUNT), Some(&5));

    let scenario = Scenario::new("overflow")
        .given(format!("a counter at {}", u32::MAX))
        .when("I add 1");
    let err = assert_step_err!(runner.execute(&scenario), "counter overflow");
    assert!(matches!(
        err,
        ExecutionError::HandlerFailed {
            source: StepError::Failed { .. },
            ..
        }
    ));
}

#[test]
fn text_report_summarises_a_batch() {
    let registry = counter_registry();
    let scenarios = [
        counting(1, 1),
        Scenario::new("wrong").given("a counter at 1").then("the counter reads 2"),
    ];
    let report = Runner::new(&registry).run_all(&scenarios);
    let mut output = String::new();
    text::write(&mut output, &report).unwrap_or_else(|err| panic!("write text: {err}"));
    assert!(output.contains("Text mismatch: 1 != 2"));
    assert!(output.contains("1 scenarios passed, 1 failed, 0 skipped, 0 untested"));
}
