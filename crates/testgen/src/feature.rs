//! Gherkin ingestion and feature classification.

use crate::classifier::StepClassifier;
use crate::config::{base_name, FEATURE_SUFFIX};
use crate::lexical::LexicalClassifier;
use crate::result::{TestgenError, TestgenResult};
use crate::step_map::StepMap;
use gherkin::GherkinEnv;
use std::path::{Path, PathBuf};

/// A scenario reduced to what classification needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioSource {
    /// Scenario name
    pub name: String,
    /// Step sentences, background steps first
    pub steps: Vec<String>,
}

/// A parsed feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSource {
    /// File name without `.feature`
    pub base_name: String,
    /// Source path
    pub path: PathBuf,
    /// Feature title
    pub title: String,
    /// Scenarios in document order, including those inside rules
    pub scenarios: Vec<ScenarioSource>,
}

impl FeatureSource {
    /// Parse feature text.
    ///
    /// Backgrounds are folded into each scenario they cover. Two scenarios
    /// with the same name are rejected.
    pub fn parse(text: &str, path: &Path) -> TestgenResult<Self> {
        let base = base_name(path, FEATURE_SUFFIX).ok_or_else(|| TestgenError::UnsupportedInput {
            path: path.to_path_buf(),
            expected: FEATURE_SUFFIX,
        })?;
        let feature = gherkin::Feature::parse(text, GherkinEnv::default()).map_err(|e| {
            TestgenError::MalformedFeature {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        let feature_background = step_texts(feature.background.as_ref());
        let mut scenarios = Vec::new();
        for scenario in &feature.scenarios {
            scenarios.push(scenario_source(scenario, &feature_background, &[]));
        }
        for rule in &feature.rules {
            let rule_background = step_texts(rule.background.as_ref());
            for scenario in &rule.scenarios {
                scenarios.push(scenario_source(scenario, &feature_background, &rule_background));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for scenario in &scenarios {
            if !seen.insert(scenario.name.as_str()) {
                return Err(TestgenError::DuplicateScenario {
                    path: path.to_path_buf(),
                    scenario: scenario.name.clone(),
                });
            }
        }

        Ok(Self {
            base_name: base,
            path: path.to_path_buf(),
            title: feature.name,
            scenarios,
        })
    }

    /// Read and parse a feature file.
    pub fn load(path: &Path) -> TestgenResult<Self> {
        if !path.is_file() {
            return Err(TestgenError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, path)
    }

    /// Classify every step into a [`StepMap`].
    #[must_use]
    pub fn classify<L: LexicalClassifier>(&self, classifier: &StepClassifier<L>) -> StepMap {
        let mut map = StepMap::new();
        for scenario in &self.scenarios {
            let steps = scenario
                .steps
                .iter()
                .map(|step| classifier.classify(step))
                .collect();
            map.insert(scenario.name.clone(), steps);
        }
        tracing::debug!(
            feature = %self.base_name,
            title = %self.title,
            scenarios = map.len(),
            "classified feature"
        );
        map
    }
}

fn step_texts(background: Option<&gherkin::Background>) -> Vec<String> {
    background
        .map(|bg| bg.steps.iter().map(|s| s.value.clone()).collect())
        .unwrap_or_default()
}

fn scenario_source(scenario: &gherkin::Scenario, feature_bg: &[String], rule_bg: &[String]) -> ScenarioSource {
    let steps = feature_bg
        .iter()
        .chain(rule_bg)
        .cloned()
        .chain(scenario.steps.iter().map(|s| s.value.clone()))
        .collect();
    ScenarioSource {
        name: scenario.name.clone(),
        steps,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::SelectorConfig;
    use crate::step::ActionKind;

    const LOGIN: &str = r#"Feature: Login

  Scenario: Login
    Given the user enters "admin" into the username field
    When the user clicks the login button
    Then the user should see the welcome message
"#;

    #[test]
    fn parses_scenarios_and_steps() {
        let feature = FeatureSource::parse(LOGIN, Path::new("features/login.feature")).unwrap();
        assert_eq!(feature.base_name, "login");
        assert_eq!(feature.title, "Login");
        assert_eq!(feature.scenarios.len(), 1);
        assert_eq!(
            feature.scenarios[0].steps,
            [
                "the user enters \"admin\" into the username field",
                "the user clicks the login button",
                "the user should see the welcome message"
            ]
        );
    }

    #[test]
    fn backgrounds_are_prepended() {
        let text = r#"Feature: Shop

  Background:
    Given the user opens the home page

  Scenario: Browse
    When the user clicks the menu

  Rule: Checkout

    Background:
      Given the user clicks the cart

    Scenario: Pay
      When the user clicks checkout
"#;
        let feature = FeatureSource::parse(text, Path::new("shop.feature")).unwrap();
        let names: Vec<_> = feature.scenarios.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Browse", "Pay"]);
        assert_eq!(
            feature.scenarios[0].steps,
            ["the user opens the home page", "the user clicks the menu"]
        );
        assert_eq!(
            feature.scenarios[1].steps,
            [
                "the user opens the home page",
                "the user clicks the cart",
                "the user clicks checkout"
            ]
        );
    }

    #[test]
    fn duplicate_scenarios_are_rejected() {
        let text = r#"Feature: Twice

  Scenario: Same
    When the user clicks the link

  Scenario: Same
    When the user clicks the logout link
"#;
        let err = FeatureSource::parse(text, Path::new("twice.feature")).unwrap_err();
        match err {
            TestgenError::DuplicateScenario { scenario, .. } => assert_eq!(scenario, "Same"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_feature_is_reported() {
        let err = FeatureSource::parse("this is not gherkin", Path::new("bad.feature")).unwrap_err();
        assert!(matches!(err, TestgenError::MalformedFeature { .. }));
    }

    #[test]
    fn wrong_extension_is_rejected() {
        let err = FeatureSource::parse(LOGIN, Path::new("login.txt")).unwrap_err();
        assert!(matches!(err, TestgenError::UnsupportedInput { .. }));
    }

    #[test]
    fn classify_builds_ordered_step_map() {
        let feature = FeatureSource::parse(LOGIN, Path::new("login.feature")).unwrap();
        let map = feature.classify(&StepClassifier::new(SelectorConfig::builtin()));
        let steps = map.get("Login").unwrap();
        let actions: Vec<_> = steps.iter().map(|s| s.action.clone()).collect();
        assert_eq!(
            actions,
            [ActionKind::SetValue, ActionKind::Click, ActionKind::AssertVisible]
        );
        assert_eq!(steps[2].selector_name, "welcomeBanner");
    }
}
