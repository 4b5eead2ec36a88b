//! Persisted intermediate representation of one feature.
//!
//! A [`StepMap`] is an insertion-ordered map from scenario name to the
//! scenario's classified steps. On disk it is a JSON object; the writer keeps
//! the established layout (two-space indent, `fallbackSelector` arrays on one
//! line) so regenerated maps diff cleanly against hand-edited ones.

use crate::result::{TestgenError, TestgenResult};
use crate::step::StepDescriptor;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Scenario name → ordered step descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepMap {
    scenarios: IndexMap<String, Vec<StepDescriptor>>,
}

impl StepMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scenario, returning the steps it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        steps: Vec<StepDescriptor>,
    ) -> Option<Vec<StepDescriptor>> {
        self.scenarios.insert(name.into(), steps)
    }

    /// Whether a scenario of this name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.scenarios.contains_key(name)
    }

    /// Steps of one scenario.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[StepDescriptor]> {
        self.scenarios.get(name).map(Vec::as_slice)
    }

    /// Scenarios in insertion order.
    pub fn scenarios(&self) -> impl Iterator<Item = (&str, &[StepDescriptor])> {
        self.scenarios
            .iter()
            .map(|(name, steps)| (name.as_str(), steps.as_slice()))
    }

    /// Every step of every scenario, in order.
    pub fn steps(&self) -> impl Iterator<Item = &StepDescriptor> {
        self.scenarios.values().flatten()
    }

    /// Number of scenarios.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the map has no scenarios.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Decode a StepMap; `path` is only used for error reporting.
    pub fn parse(text: &str, path: &Path) -> TestgenResult<Self> {
        serde_json::from_str(text).map_err(|source| TestgenError::MalformedStepMap {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and decode a StepMap file.
    pub fn load(path: &Path) -> TestgenResult<Self> {
        if !path.is_file() {
            return Err(TestgenError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, path)
    }

    /// Encode in the persisted layout.
    #[must_use]
    pub fn to_json(&self) -> String {
        if self.scenarios.is_empty() {
            return "{}\n".to_string();
        }
        let mut out = String::from("{\n");
        let count = self.scenarios.len();
        for (i, (name, steps)) in self.scenarios.iter().enumerate() {
            out.push_str(&format!("  {}: ", quote(name)));
            if steps.is_empty() {
                out.push_str("[]");
            } else {
                out.push_str("[\n");
                for (j, step) in steps.iter().enumerate() {
                    write_step(&mut out, step);
                    out.push_str(if j + 1 < steps.len() { ",\n" } else { "\n" });
                }
                out.push_str("  ]");
            }
            out.push_str(if i + 1 < count { ",\n" } else { "\n" });
        }
        out.push_str("}\n");
        out
    }
}

fn write_step(out: &mut String, step: &StepDescriptor) {
    let fallbacks = if step.selector_fallbacks.is_empty() {
        "[]".to_string()
    } else {
        let items: Vec<String> = step.selector_fallbacks.iter().map(|s| quote(s)).collect();
        format!("[ {} ]", items.join(", "))
    };
    out.push_str("    {\n");
    out.push_str(&format!("      \"action\": {},\n", quote(step.action.name())));
    out.push_str(&format!("      \"selectorName\": {},\n", quote(&step.selector_name)));
    out.push_str(&format!("      \"selector\": {},\n", quote(&step.selector)));
    out.push_str(&format!("      \"fallbackSelector\": {fallbacks},\n"));
    out.push_str(&format!("      \"note\": {}\n", quote(step.argument_text())));
    out.push_str("    }");
}

fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::step::ActionKind;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn login_map() -> StepMap {
        let mut map = StepMap::new();
        map.insert(
            "Login",
            vec![
                StepDescriptor {
                    action: ActionKind::SetValue,
                    selector_name: "userNameField".into(),
                    selector: "#username".into(),
                    selector_fallbacks: vec!["input[name=\"username\"]".into(), "input[type=\"email\"]".into()],
                    argument: Some("admin".into()),
                },
                StepDescriptor {
                    action: ActionKind::Click,
                    selector_name: "loginButton".into(),
                    selector: "button:has-text(\"Login\")".into(),
                    selector_fallbacks: vec![],
                    argument: None,
                },
            ],
        );
        map.insert("Empty", vec![]);
        map
    }

    #[test]
    fn legacy_layout() {
        let expected = r##"{
  "Login": [
    {
      "action": "setValue",
      "selectorName": "userNameField",
      "selector": "#username",
      "fallbackSelector": [ "input[name=\"username\"]", "input[type=\"email\"]" ],
      "note": "admin"
    },
    {
      "action": "click",
      "selectorName": "loginButton",
      "selector": "button:has-text(\"Login\")",
      "fallbackSelector": [],
      "note": ""
    }
  ],
  "Empty": []
}
"##;
        assert_eq!(login_map().to_json(), expected);
    }

    #[test]
    fn written_layout_reads_back() {
        let map = login_map();
        let parsed = StepMap::parse(&map.to_json(), Path::new("login.stepMap.json")).unwrap();
        assert_eq!(parsed, map);
    }

    #[test]
    fn empty_map() {
        assert_eq!(StepMap::new().to_json(), "{}\n");
        assert!(StepMap::parse("{}", Path::new("x")).unwrap().is_empty());
    }

    #[test]
    fn scenario_order_is_preserved() {
        let text = r#"{"Zeta": [], "Alpha": [], "Mid": []}"#;
        let map = StepMap::parse(text, Path::new("x")).unwrap();
        let names: Vec<_> = map.scenarios().map(|(name, _)| name).collect();
        assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn compact_encoding_is_accepted() {
        let text = r##"{"Login":[{"action":"setText","selectorName":"userNameField","selector":"#username","fallbackSelector":[],"note":"admin"}]}"##;
        let map = StepMap::parse(text, Path::new("x")).unwrap();
        let step = &map.get("Login").unwrap()[0];
        assert_eq!(step.action, ActionKind::SetValue);
        assert_eq!(step.argument.as_deref(), Some("admin"));
    }

    #[test]
    fn malformed_json_is_reported_with_path() {
        let err = StepMap::parse(r#"{"Login": [{"action": 1}]}"#, Path::new("bad.stepMap.json")).unwrap_err();
        match err {
            TestgenError::MalformedStepMap { path, .. } => assert_eq!(path, PathBuf::from("bad.stepMap.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = StepMap::load(&dir.path().join("nope.stepMap.json")).unwrap_err();
        assert!(matches!(err, TestgenError::NotFound { .. }));
    }

    #[test]
    fn load_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("login.stepMap.json");
        std::fs::write(&path, login_map().to_json()).unwrap();
        assert_eq!(StepMap::load(&path).unwrap(), login_map());
    }

    #[test]
    fn steps_flatten_in_order() {
        let map = login_map();
        let names: Vec<_> = map.steps().map(|s| s.selector_name.as_str()).collect();
        assert_eq!(names, ["userNameField", "loginButton"]);
        assert_eq!(map.len(), 2);
    }
}
