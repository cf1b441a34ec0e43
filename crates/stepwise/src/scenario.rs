//! Programmatic scenario descriptions.
//!
//! Scenarios arrive already split into keyword and text, so there is no
//! feature-file parsing here; callers build them with the chained methods on
//! [`Scenario`].

use stepwise_patterns::StepKeyword;

/// One line of a scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioStep {
    /// Keyword as written; `And` and `But` are resolved at run time.
    pub keyword: StepKeyword,
    /// Text after the keyword.
    pub text: String,
}

/// An ordered list of steps sharing one context.
///
/// # Examples
/// ```
/// use stepwise::{Scenario, StepKeyword};
///
/// let scenario = Scenario::new("Blenders")
///     .in_feature("Blender", "features/blender.feature")
///     .at(12)
///     .given(r#"I put "apples" in a blender"#)
///     .when("I switch the blender on")
///     .then(r#"it should transform into "apple juice""#);
/// assert_eq!(scenario.steps().len(), 3);
/// assert_eq!(scenario.steps()[1].keyword, StepKeyword::When);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    name: String,
    feature_name: String,
    feature_path: String,
    line: u32,
    tags: Vec<String>,
    steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Start a scenario with no steps.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            feature_name: "<unnamed>".to_owned(),
            feature_path: "<unknown>".to_owned(),
            line: 1,
            tags: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Attribute the scenario to a feature.
    #[must_use]
    pub fn in_feature(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.feature_name = name.into();
        self.feature_path = path.into();
        self
    }

    /// Set the line the scenario starts on.
    #[must_use]
    pub fn at(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    /// Add a tag; a leading `@` is stripped.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let tag = tag.strip_prefix('@').map_or_else(|| tag.clone(), str::to_owned);
        self.tags.push(tag);
        self
    }

    /// Append a step.
    #[must_use]
    pub fn step(mut self, keyword: StepKeyword, text: impl Into<String>) -> Self {
        self.steps.push(ScenarioStep {
            keyword,
            text: text.into(),
        });
        self
    }

    /// Append a `Given` step.
    #[must_use]
    pub fn given(self, text: impl Into<String>) -> Self {
        self.step(StepKeyword::Given, text)
    }

    /// Append a `When` step.
    #[must_use]
    pub fn when(self, text: impl Into<String>) -> Self {
        self.step(StepKeyword::When, text)
    }

    /// Append a `Then` step.
    #[must_use]
    pub fn then(self, text: impl Into<String>) -> Self {
        self.step(StepKeyword::Then, text)
    }

    /// Append an `And` step.
    #[must_use]
    pub fn and(self, text: impl Into<String>) -> Self {
        self.step(StepKeyword::And, text)
    }

    /// Append a `But` step.
    #[must_use]
    pub fn but(self, text: impl Into<String>) -> Self {
        self.step(StepKeyword::But, text)
    }

    /// Scenario name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the feature the scenario belongs to.
    #[must_use]
    pub fn feature_name(&self) -> &str {
        &self.feature_name
    }

    /// Path of the feature file.
    #[must_use]
    pub fn feature_path(&self) -> &str {
        &self.feature_path
    }

    /// Line the scenario starts on.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Tags without their `@` prefix.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[ScenarioStep] {
        &self.steps
    }

    /// Steps paired with their effective keyword.
    ///
    /// `And` and `But` take the keyword of the closest preceding primary
    /// step, or `Given` when they open the scenario.
    pub fn resolved_steps(&self) -> impl Iterator<Item = (StepKeyword, &ScenarioStep)> {
        let mut previous = None;
        self.steps
            .iter()
            .map(move |step| (step.keyword.resolve(&mut previous), step))
    }
}
