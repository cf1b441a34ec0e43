//! Step registration and lookup.
//! This module defines the `StepDefinition` record and the `StepRegistry`
//! used to find steps by keyword and exact text or by placeholder matching.
//!
//! A registry is an ordinary value: build one, hand it to a
//! [`Runner`](crate::Runner), and share it between threads by reference.
//! Registration validates the pattern and the handler's argument record up
//! front, so a registry that was built successfully never fails a lookup for
//! structural reasons.

use hashbrown::HashMap;
use std::{cmp, fmt};
use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};
use stepwise_patterns::{PatternError, StepKeyword};
use thiserror::Error;

use crate::context::ScenarioContext;
use crate::error::StepResult;
use crate::pattern::StepPattern;
use crate::step_args::{POSITIONAL, StepArgs, StepArgsError};

type Handler =
    Box<dyn Fn(&mut ScenarioContext, Vec<String>) -> Result<StepResult, StepArgsError> + Send + Sync>;

/// Problems detected while registering a step.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// The pattern text could not be compiled.
    #[error("invalid step pattern '{pattern}': {source}")]
    Pattern {
        /// Offending pattern.
        pattern: String,
        /// Underlying parse failure.
        #[source]
        source: PatternError,
    },
    /// A step with the same keyword and pattern already exists.
    #[error("duplicate step for '{keyword}' + '{pattern}' (first defined at {first})")]
    Duplicate {
        /// Keyword of both definitions.
        keyword: StepKeyword,
        /// Pattern of both definitions.
        pattern: String,
        /// `file:line` of the earlier definition.
        first: String,
    },
    /// The argument record does not have one field per placeholder.
    #[error(
        "step '{pattern}' declares {placeholders} placeholder(s) but its arguments have {fields} field(s)"
    )]
    Arity {
        /// Offending pattern.
        pattern: String,
        /// Placeholder count of the pattern.
        placeholders: usize,
        /// Field count of the argument record.
        fields: usize,
    },
    /// A named placeholder and the field at the same position disagree.
    #[error("placeholder '{placeholder}' in step '{pattern}' does not match argument field '{field}'")]
    FieldName {
        /// Offending pattern.
        pattern: String,
        /// Placeholder name in the pattern.
        placeholder: String,
        /// Field name in the argument record.
        field: &'static str,
    },
    /// Steps are registered under `Given`, `When` or `Then` only.
    #[error("steps cannot be registered under the conjunction '{keyword}'")]
    Conjunction {
        /// The rejected keyword.
        keyword: StepKeyword,
    },
}

/// Why a step line could not be resolved to a single definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// No definition matches the line.
    #[error("no step definition matches '{keyword} {text}'")]
    NotFound {
        /// Effective keyword of the line.
        keyword: StepKeyword,
        /// Step text.
        text: String,
    },
    /// Several equally specific definitions match the line.
    #[error("'{keyword} {text}' matches several steps: {}", .candidates.join(", "))]
    Ambiguous {
        /// Effective keyword of the line.
        keyword: StepKeyword,
        /// Step text.
        text: String,
        /// Patterns of the competing definitions.
        candidates: Vec<String>,
    },
}

/// A single step definition held by a [`StepRegistry`].
pub struct StepDefinition {
    keyword: StepKeyword,
    pattern: StepPattern,
    handler: Handler,
    fields: &'static [&'static str],
    location: &'static Location<'static>,
    used: AtomicBool,
}

impl StepDefinition {
    /// The keyword the step was registered under.
    #[must_use]
    pub fn keyword(&self) -> StepKeyword {
        self.keyword
    }

    /// The compiled pattern.
    #[must_use]
    pub fn pattern(&self) -> &StepPattern {
        &self.pattern
    }

    /// Field names of the handler's argument record.
    #[must_use]
    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    /// Source file of the registration call.
    #[must_use]
    pub fn file(&self) -> &'static str {
        self.location.file()
    }

    /// Line of the registration call.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.location.line()
    }

    /// Whether the step has been invoked since the registry was built.
    #[must_use]
    pub fn was_used(&self) -> bool {
        self.used.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("keyword", &self.keyword)
            .field("pattern", &self.pattern.as_str())
            .field("fields", &self.fields)
            .field("location", &format_args!("{}", self.location))
            .field("used", &self.was_used())
            .finish_non_exhaustive()
    }
}

/// A definition selected for one step line, with its captured values.
#[derive(Debug)]
pub struct StepMatch<'r> {
    definition: &'r StepDefinition,
    captures: Vec<String>,
}

impl<'r> StepMatch<'r> {
    /// The selected definition.
    #[must_use]
    pub fn definition(&self) -> &'r StepDefinition {
        self.definition
    }

    /// Placeholder values in capture order.
    #[must_use]
    pub fn captures(&self) -> &[String] {
        &self.captures
    }

    /// Convert the captures and run the handler against `ctx`.
    ///
    /// The outer `Result` reports argument conversion; the handler is not
    /// called when it fails. The inner [`StepResult`] is the handler's own
    /// outcome.
    ///
    /// # Errors
    /// Returns [`StepArgsError`] when the captures do not convert into the
    /// handler's argument record.
    pub fn invoke(self, ctx: &mut ScenarioContext) -> Result<StepResult, StepArgsError> {
        self.definition.used.store(true, Ordering::Relaxed);
        (self.definition.handler)(ctx, self.captures)
    }
}

/// Explicit collection of step definitions.
///
/// # Examples
/// ```
/// use stepwise::{ScenarioContext, StepKeyword, StepRegistry};
///
/// let mut registry = StepRegistry::new();
/// registry.given("I switch the blender on", |_, ()| Ok(()))?;
///
/// let found = registry.find(StepKeyword::Given, "I switch the blender on")?;
/// let outcome = found.invoke(&mut ScenarioContext::new());
/// assert_eq!(outcome, Ok(Ok(())));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct StepRegistry {
    steps: Vec<StepDefinition>,
    exact: HashMap<StepKeyword, HashMap<String, usize>>,
}

impl StepRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `pattern` under `keyword`.
    ///
    /// The handler receives the scenario context and an argument record `A`
    /// built from the placeholder captures. `A` must have one field per
    /// placeholder; named placeholders must agree with the field at the same
    /// position unless that field is positional.
    ///
    /// # Errors
    /// Returns [`RegistryError`] when the keyword is a conjunction, the
    /// pattern is malformed, the argument record does not fit the pattern, or
    /// the keyword and pattern are already registered.
    #[track_caller]
    pub fn register<A, F>(
        &mut self,
        keyword: StepKeyword,
        pattern: &str,
        handler: F,
    ) -> Result<&mut Self, RegistryError>
    where
        A: StepArgs + 'static,
        F: Fn(&mut ScenarioContext, A) -> StepResult + Send + Sync + 'static,
    {
        let location = Location::caller();
        if keyword.is_conjunction() {
            return Err(RegistryError::Conjunction { keyword });
        }
        let pattern = StepPattern::compile(pattern).map_err(|source| RegistryError::Pattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        check_fields(&pattern, A::FIELD_NAMES)?;
        if let Some(first) = self
            .steps
            .iter()
            .find(|step| step.keyword == keyword && step.pattern == pattern)
        {
            return Err(RegistryError::Duplicate {
                keyword,
                pattern: pattern.as_str().to_owned(),
                first: first.location.to_string(),
            });
        }

        log::debug!(
            "registered step '{} {}' at {location}",
            keyword.as_str(),
            pattern.as_str()
        );
        let index = self.steps.len();
        if pattern.is_literal() {
            self.exact
                .entry(keyword)
                .or_default()
                .insert(pattern.as_str().to_owned(), index);
        }
        let handler: Handler = Box::new(move |ctx, captures| {
            let args = A::from_captures(captures)?;
            Ok(handler(ctx, args))
        });
        self.steps.push(StepDefinition {
            keyword,
            pattern,
            handler,
            fields: A::FIELD_NAMES,
            location,
            used: AtomicBool::new(false),
        });
        Ok(self)
    }

    /// Register a `Given` step.
    ///
    /// # Errors
    /// See [`register`](Self::register).
    #[track_caller]
    pub fn given<A, F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RegistryError>
    where
        A: StepArgs + 'static,
        F: Fn(&mut ScenarioContext, A) -> StepResult + Send + Sync + 'static,
    {
        self.register(StepKeyword::Given, pattern, handler)
    }

    /// Register a `When` step.
    ///
    /// # Errors
    /// See [`register`](Self::register).
    #[track_caller]
    pub fn when<A, F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RegistryError>
    where
        A: StepArgs + 'static,
        F: Fn(&mut ScenarioContext, A) -> StepResult + Send + Sync + 'static,
    {
        self.register(StepKeyword::When, pattern, handler)
    }

    /// Register a `Then` step.
    ///
    /// # Errors
    /// See [`register`](Self::register).
    #[track_caller]
    pub fn then<A, F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RegistryError>
    where
        A: StepArgs + 'static,
        F: Fn(&mut ScenarioContext, A) -> StepResult + Send + Sync + 'static,
    {
        self.register(StepKeyword::Then, pattern, handler)
    }

    /// Find the definition for a step line.
    ///
    /// Literal patterns equal to `text` win outright. Otherwise the matching
    /// pattern with the highest specificity is chosen; a tie between the best
    /// candidates is reported as ambiguous.
    ///
    /// # Errors
    /// Returns [`ResolveError`] when nothing matches or the best match is
    /// not unique.
    pub fn find(&self, keyword: StepKeyword, text: &str) -> Result<StepMatch<'_>, ResolveError> {
        if let Some(definition) = self
            .exact
            .get(&keyword)
            .and_then(|by_text| by_text.get(text))
            .and_then(|&index| self.steps.get(index))
        {
            return Ok(StepMatch {
                definition,
                captures: Vec::new(),
            });
        }

        let mut best: Vec<StepMatch<'_>> = Vec::new();
        for definition in self.steps.iter().filter(|step| step.keyword == keyword) {
            let Some(captures) = definition.pattern.captures(text) else {
                continue;
            };
            let candidate = StepMatch {
                definition,
                captures,
            };
            let ranking = best.first().map(|current| {
                definition
                    .pattern
                    .specificity()
                    .cmp(&current.definition.pattern.specificity())
            });
            match ranking {
                None | Some(cmp::Ordering::Equal) => best.push(candidate),
                Some(cmp::Ordering::Greater) => best = vec![candidate],
                Some(cmp::Ordering::Less) => {}
            }
        }

        if best.len() > 1 {
            return Err(ResolveError::Ambiguous {
                keyword,
                text: text.to_owned(),
                candidates: best
                    .iter()
                    .map(|found| found.definition.pattern.as_str().to_owned())
                    .collect(),
            });
        }
        best.pop().ok_or_else(|| ResolveError::NotFound {
            keyword,
            text: text.to_owned(),
        })
    }

    /// All definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &StepDefinition> {
        self.steps.iter()
    }

    /// Definitions that were never invoked.
    #[must_use]
    pub fn unused_steps(&self) -> Vec<&StepDefinition> {
        self.steps.iter().filter(|step| !step.was_used()).collect()
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no steps are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn check_fields(pattern: &StepPattern, fields: &'static [&'static str]) -> Result<(), RegistryError> {
    let placeholders = pattern.placeholders();
    if placeholders.len() != fields.len() {
        return Err(RegistryError::Arity {
            pattern: pattern.as_str().to_owned(),
            placeholders: placeholders.len(),
            fields: fields.len(),
        });
    }
    for (placeholder, &field) in placeholders.iter().zip(fields) {
        let Some(name) = placeholder.name.as_deref() else {
            continue;
        };
        if field != POSITIONAL && field != name {
            return Err(RegistryError::FieldName {
                pattern: pattern.as_str().to_owned(),
                placeholder: name.to_owned(),
                field,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
