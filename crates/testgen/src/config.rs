//! Configuration tables and project layout.
//!
//! The selector tables are read once per process and handed to the
//! classifier by value; nothing here is mutated after construction.

use crate::result::{TestgenError, TestgenResult};
use crate::step::ActionKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Extension of Gherkin sources.
pub const FEATURE_SUFFIX: &str = ".feature";
/// Suffix of persisted StepMaps.
pub const STEP_MAP_SUFFIX: &str = ".stepMap.json";
/// Suffix of generated page objects.
pub const PAGE_OBJECT_SUFFIX: &str = ".page.js";
/// Suffix of generated test specifications.
pub const SPEC_SUFFIX: &str = ".spec.js";

/// Alternate locators shipped with testgen, keyed by logical selector name.
const BUILTIN_FALLBACKS: &[(&str, &[&str])] = &[
    (
        "userNameField",
        &[
            "#username",
            "input[name=\"username\"]",
            "input[id=\"username\"]",
            "input[type=\"email\"]",
        ],
    ),
    ("passwordField", &["#password", "input[type=\"password\"]"]),
    ("loginButton", &["button:has-text(\"Login\")"]),
    ("countryDropdown", &["#country", "select[name=\"country\"]"]),
    ("termsCheckbox", &["#terms", "input[type=\"checkbox\"]"]),
    ("link", &["a"]),
    ("pageTitle", &["h1", "title"]),
    ("currentUrl", &["window.location.href"]),
    ("welcomeBanner", &["#welcome-message", ".welcome"]),
    ("avatar", &["img.profile-picture"]),
    ("iTheHomepage", &["main.home", "[data-testid=\"homepage\"]"]),
    ("theUpdateButton", &["#update", "button.update"]),
    ("theSaveButton", &["#save", "button.save"]),
    ("completeTheForm", &["#form-complete", ".form-success"]),
];

/// Selector alias and fallback tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Logical name → primary locator override
    pub aliases: BTreeMap<String, String>,
    /// Logical name → ordered alternate locators
    pub fallbacks: BTreeMap<String, Vec<String>>,
}

impl SelectorConfig {
    /// Empty tables: every selector is synthesized, no fallbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in fallback table with no aliases.
    #[must_use]
    pub fn builtin() -> Self {
        let fallbacks = BUILTIN_FALLBACKS
            .iter()
            .map(|(name, sels)| {
                (
                    (*name).to_string(),
                    sels.iter().map(|s| (*s).to_string()).collect(),
                )
            })
            .collect();
        Self {
            aliases: BTreeMap::new(),
            fallbacks,
        }
    }

    /// Add or replace an alias.
    #[must_use]
    pub fn with_alias(mut self, name: impl Into<String>, selector: impl Into<String>) -> Self {
        self.aliases.insert(name.into(), selector.into());
        self
    }

    /// Add or replace a fallback list.
    #[must_use]
    pub fn with_fallbacks(mut self, name: impl Into<String>, selectors: Vec<String>) -> Self {
        self.fallbacks.insert(name.into(), selectors);
        self
    }

    /// Primary locator override for a logical name.
    #[must_use]
    pub fn alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Configured fallbacks for a logical name (empty when none).
    #[must_use]
    pub fn fallbacks(&self, name: &str) -> &[String] {
        self.fallbacks.get(name).map_or(&[], Vec::as_slice)
    }

    /// Built-in tables overlaid with the project's JSON files.
    ///
    /// `aliases` is an object of name → locator; `fallbacks` an object of
    /// name → array of locators, replacing the built-in entry per name.
    /// Missing files are not an error.
    pub fn load(layout: &ProjectLayout) -> TestgenResult<Self> {
        let mut config = Self::builtin();
        if let Some(aliases) = read_json_table::<String>(&layout.alias_file)? {
            config.aliases.extend(aliases);
        }
        if let Some(fallbacks) = read_json_table::<Vec<String>>(&layout.fallback_file)? {
            config.fallbacks.extend(fallbacks);
        }
        tracing::debug!(
            aliases = config.aliases.len(),
            fallbacks = config.fallbacks.len(),
            "selector configuration loaded"
        );
        Ok(config)
    }
}

fn read_json_table<T>(path: &Path) -> TestgenResult<Option<BTreeMap<String, T>>>
where
    T: for<'de> Deserialize<'de>,
{
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| TestgenError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Element patterns each action can reasonably target.
///
/// Checking is a plain substring test against the selector text; `*`
/// accepts anything. Used for diagnostics only, never to reject a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCompatibility {
    table: Vec<(ActionKind, Vec<&'static str>)>,
}

impl Default for TagCompatibility {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TagCompatibility {
    /// The shipped compatibility table.
    #[must_use]
    pub fn builtin() -> Self {
        use ActionKind::*;
        let table = vec![
            (
                Click,
                vec!["button", "a", "input[type=\"submit\"]", "input[type=\"button\"]"],
            ),
            (
                SetValue,
                vec![
                    "input",
                    "textarea",
                    "input[type=\"text\"]",
                    "input[type=\"email\"]",
                    "input[type=\"number\"]",
                    "input[type=\"tel\"]",
                ],
            ),
            (SelectDropdown, vec!["select", "[role=\"combobox\"]", ".dropdown"]),
            (UploadFile, vec!["input[type=\"file\"]"]),
            (ClearText, vec!["input", "textarea"]),
            (ScrollTo, vec!["div", "section", "main"]),
            (Hover, vec!["button", "a", "img", "[role=\"button\"]"]),
            (WaitForVisible, vec!["*"]),
            (AssertVisible, vec!["*"]),
            (AssertText, vec!["*"]),
            (AssertEnabled, vec!["*"]),
            (AssertDisabled, vec!["*"]),
            (AssertTitle, vec!["title"]),
            (AssertUrlContains, vec!["*"]),
        ];
        Self { table }
    }

    /// Patterns for an action; actions without an entry accept anything.
    #[must_use]
    pub fn patterns(&self, action: &ActionKind) -> &[&'static str] {
        self.table
            .iter()
            .find(|(kind, _)| kind == action)
            .map_or(&["*"], |(_, patterns)| patterns.as_slice())
    }

    /// Whether `selector` fits `action`.
    #[must_use]
    pub fn allows(&self, selector: &str, action: &ActionKind) -> bool {
        let patterns = self.patterns(action);
        patterns.contains(&"*") || patterns.iter().any(|p| selector.contains(p))
    }
}

/// Check a selector against the built-in compatibility table.
#[must_use]
pub fn is_selector_valid_for_action(selector: &str, action: &ActionKind) -> bool {
    TagCompatibility::builtin().allows(selector, action)
}

/// Where inputs are read from and outputs written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLayout {
    /// Gherkin sources
    pub feature_dir: PathBuf,
    /// Persisted StepMaps
    pub step_map_dir: PathBuf,
    /// Generated page objects (and the shared base class)
    pub page_object_dir: PathBuf,
    /// Generated test specifications
    pub spec_dir: PathBuf,
    /// Alias table
    pub alias_file: PathBuf,
    /// Fallback table override
    pub fallback_file: PathBuf,
}

impl ProjectLayout {
    /// Conventional layout beneath a project root.
    #[must_use]
    pub fn from_root(root: &Path) -> Self {
        let tests = root.join("tests");
        Self {
            feature_dir: root.join("features"),
            step_map_dir: root.join("stepMaps"),
            page_object_dir: tests.join("pageobjects"),
            spec_dir: tests.join("specs"),
            alias_file: root.join("selector-aliases.json"),
            fallback_file: root.join("selector-fallbacks.json"),
        }
    }

    /// Read features from another directory.
    #[must_use]
    pub fn with_feature_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.feature_dir = dir.into();
        self
    }

    /// Keep StepMaps in another directory.
    #[must_use]
    pub fn with_step_map_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.step_map_dir = dir.into();
        self
    }

    /// Generate into `<dir>/pageobjects` and `<dir>/specs`.
    #[must_use]
    pub fn with_output_dir(mut self, dir: &Path) -> Self {
        self.page_object_dir = dir.join("pageobjects");
        self.spec_dir = dir.join("specs");
        self
    }

    /// StepMap path for a feature base name.
    #[must_use]
    pub fn step_map_path(&self, base_name: &str) -> PathBuf {
        self.step_map_dir.join(format!("{base_name}{STEP_MAP_SUFFIX}"))
    }

    /// Page-object path for a feature base name.
    #[must_use]
    pub fn page_object_path(&self, base_name: &str) -> PathBuf {
        self.page_object_dir
            .join(format!("{base_name}{PAGE_OBJECT_SUFFIX}"))
    }

    /// Test-spec path for a feature base name.
    #[must_use]
    pub fn spec_path(&self, base_name: &str) -> PathBuf {
        self.spec_dir.join(format!("{base_name}{SPEC_SUFFIX}"))
    }
}

/// File name without `suffix`, or `None` when the name does not end with it.
#[must_use]
pub fn base_name(path: &Path, suffix: &str) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    name.strip_suffix(suffix)
        .filter(|base| !base.is_empty())
        .map(str::to_string)
}
