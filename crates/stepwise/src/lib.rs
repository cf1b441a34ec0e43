//! Core runtime for `stepwise`.
//!
//! The crate binds step patterns to handler functions in an explicit
//! [`StepRegistry`], runs [`Scenario`]s against it with a fresh
//! [`ScenarioContext`] per scenario, and records behave-style results for
//! reporting.
//!
//! ```
//! use stepwise::{ContextKey, Runner, Scenario, StepRegistry, assert};
//!
//! const GREETING: ContextKey<String> = ContextKey::new("greeting");
//!
//! let mut registry = StepRegistry::new();
//! registry
//!     .when("I say {word}", |ctx, (word,): (String,)| {
//!         ctx.set(&GREETING, word);
//!         Ok(())
//!     })?
//!     .then("I hear {word}", |ctx, (word,): (String,)| {
//!         assert::equal(ctx.require(&GREETING)?, &word)
//!     })?;
//!
//! let scenario = Scenario::new("echo").when("I say hi").then("I hear hi");
//! let record = Runner::new(&registry).run(&scenario);
//! assert!(record.status().is_passed());
//! # Ok::<(), stepwise::RegistryError>(())
//! ```

pub mod assert;
pub mod config;
mod context;
mod error;
pub mod execution;
mod macros;
mod pattern;
mod registry;
pub mod reporting;
mod scenario;
pub mod step_args;

pub use config::RunnerConfig;
pub use context::{ContextKey, ScenarioContext};
pub use error::{StepError, StepResult};
pub use execution::{ExecutionError, Runner, StepSite};
pub use pattern::StepPattern;
pub use registry::{RegistryError, ResolveError, StepDefinition, StepMatch, StepRegistry};
pub use scenario::{Scenario, ScenarioStep};
pub use step_args::{StepArgs, StepArgsError};
pub use stepwise_patterns::{PatternError, Placeholder, StepKeyword, StepKeywordParseError};
