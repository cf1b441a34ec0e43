//! Scenario-scoped, typed key-value storage shared by the steps of one
//! scenario.
//!
//! Values are addressed through [`ContextKey`]s which pair a name with the
//! value type, so a step reading `ContextKey<String>` never has to downcast by
//! hand. The context also buffers output emitted by steps; the runner
//! attributes each line to the step that produced it.

use hashbrown::HashMap;
use std::any::{Any, type_name};
use std::fmt;
use std::marker::PhantomData;

use crate::error::StepError;

/// Name of a context value together with its type.
///
/// Keys are usually declared as constants next to the steps that share them:
///
/// ```
/// use stepwise::{ContextKey, ScenarioContext};
///
/// const THING: ContextKey<String> = ContextKey::new("thing");
///
/// let mut ctx = ScenarioContext::new();
/// ctx.set(&THING, "apples".to_string());
/// assert_eq!(ctx.get(&THING).map(String::as_str), Some("apples"));
/// ```
pub struct ContextKey<T> {
    name: &'static str,
    marker: PhantomData<fn() -> T>,
}

impl<T> ContextKey<T> {
    /// Declare a key.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            marker: PhantomData,
        }
    }

    /// The key's name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for ContextKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ContextKey<T> {}

impl<T> fmt::Debug for ContextKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextKey")
            .field("name", &self.name)
            .field("type", &type_name::<T>())
            .finish()
    }
}

struct Entry {
    value: Box<dyn Any + Send>,
    type_name: &'static str,
}

/// State shared by the steps of a single scenario.
///
/// A fresh context is created for every scenario run and dropped (or handed
/// back to the caller) when the scenario ends; nothing in it is visible to
/// other scenarios.
#[derive(Default)]
pub struct ScenarioContext {
    values: HashMap<&'static str, Entry>,
    output: Vec<String>,
}

impl ScenarioContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, returning the previous value when it had
    /// the same type.
    pub fn set<T: Any + Send>(&mut self, key: &ContextKey<T>, value: T) -> Option<T> {
        log::trace!("context set '{}'", key.name);
        let previous = self.values.insert(
            key.name,
            Entry {
                value: Box::new(value),
                type_name: type_name::<T>(),
            },
        )?;
        previous.value.downcast::<T>().ok().map(|boxed| *boxed)
    }

    /// Borrow the value stored under `key`.
    ///
    /// Returns `None` when the key is absent or holds a different type.
    #[must_use]
    pub fn get<T: Any>(&self, key: &ContextKey<T>) -> Option<&T> {
        self.values.get(key.name)?.value.downcast_ref::<T>()
    }

    /// Mutably borrow the value stored under `key`.
    pub fn get_mut<T: Any>(&mut self, key: &ContextKey<T>) -> Option<&mut T> {
        self.values.get_mut(key.name)?.value.downcast_mut::<T>()
    }

    /// Borrow the value stored under `key`, failing when it is absent.
    ///
    /// # Errors
    /// [`StepError::MissingValue`] when nothing is stored under the key and
    /// [`StepError::WrongType`] when the stored value has another type.
    ///
    /// # Examples
    /// ```
    /// use stepwise::{ContextKey, ScenarioContext, StepError};
    ///
    /// const DATA: ContextKey<String> = ContextKey::new("data");
    ///
    /// let ctx = ScenarioContext::new();
    /// assert!(matches!(ctx.require(&DATA), Err(StepError::MissingValue { .. })));
    /// ```
    pub fn require<T: Any>(&self, key: &ContextKey<T>) -> Result<&T, StepError> {
        let entry = self
            .values
            .get(key.name)
            .ok_or(StepError::MissingValue { key: key.name })?;
        entry
            .value
            .downcast_ref::<T>()
            .ok_or_else(|| wrong_type::<T>(key, entry))
    }

    /// Mutable counterpart of [`require`](Self::require).
    ///
    /// # Errors
    /// As for [`require`](Self::require).
    pub fn require_mut<T: Any>(&mut self, key: &ContextKey<T>) -> Result<&mut T, StepError> {
        let entry = self
            .values
            .get_mut(key.name)
            .ok_or(StepError::MissingValue { key: key.name })?;
        let found = entry.type_name;
        entry
            .value
            .downcast_mut::<T>()
            .ok_or_else(|| StepError::WrongType {
                key: key.name,
                expected: type_name::<T>(),
                found,
            })
    }

    /// Remove and return the value stored under `key`.
    ///
    /// A value of another type is left in place and `None` is returned.
    pub fn remove<T: Any>(&mut self, key: &ContextKey<T>) -> Option<T> {
        if !self.values.get(key.name)?.value.is::<T>() {
            return None;
        }
        let entry = self.values.remove(key.name)?;
        entry.value.downcast::<T>().ok().map(|boxed| *boxed)
    }

    /// Whether anything is stored under `name`, regardless of type.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Names of the stored values in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.values.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Write a line to the scenario's captured output.
    ///
    /// The line is also logged at `info` level under the `stepwise::output`
    /// target.
    pub fn emit(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::info!(target: "stepwise::output", "{line}");
        self.output.push(line);
    }

    /// Every line emitted so far, oldest first.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }
}

fn wrong_type<T: Any>(key: &ContextKey<T>, entry: &Entry) -> StepError {
    StepError::WrongType {
        key: key.name,
        expected: type_name::<T>(),
        found: entry.type_name,
    }
}

impl fmt::Debug for ScenarioContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<_> = self
            .names()
            .into_iter()
            .filter_map(|name| Some((name, self.values.get(name)?.type_name)))
            .collect();
        f.debug_struct("ScenarioContext")
            .field("values", &values)
            .field("output", &self.output)
            .finish()
    }
}

#[cfg(test)]
mod tests;
