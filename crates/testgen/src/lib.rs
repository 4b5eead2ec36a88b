//! testgen: Gherkin scenarios to Playwright page objects and specs.
//!
//! Two stages joined by a persisted intermediate representation:
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌─────────────┐   ┌────────────────┐
//! │ *.feature    │──►│ StepClassifier │──►│ StepMap     │──►│ CodeGenerator  │
//! │ (gherkin)    │   │ (rule tables)  │   │ (*.stepMap  │   │ (page object + │
//! │              │   │                │   │  .json)     │   │  test spec)    │
//! └──────────────┘   └────────────────┘   └─────────────┘   └────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use testgen::prelude::*;
//!
//! let classifier = StepClassifier::new(SelectorConfig::builtin());
//! let step = classifier.classify(r#"the user enters "admin" into the username field"#);
//! assert_eq!(step.action, ActionKind::SetValue);
//! assert_eq!(step.selector_name, "userNameField");
//!
//! let mut map = StepMap::new();
//! map.insert("Login", vec![step]);
//! let out = CodeGenerator::new().generate("login", &map).unwrap();
//! assert!(out.page_object.contains("async login() {"));
//! ```

#![warn(missing_docs)]

pub mod classifier;
pub mod config;
pub mod feature;
pub mod generator;
pub mod lexical;
pub mod naming;
pub mod pipeline;
mod result;
pub mod step;
pub mod step_map;
pub mod watch;
pub mod writer;

pub use classifier::{ActionRule, SelectorRule, StepClassifier};
pub use config::{
    is_selector_valid_for_action, ProjectLayout, SelectorConfig, TagCompatibility, FEATURE_SUFFIX,
    PAGE_OBJECT_SUFFIX, SPEC_SUFFIX, STEP_MAP_SUFFIX,
};
pub use feature::{FeatureSource, ScenarioSource};
pub use generator::{page_class_name, CodeGenerator, GeneratedArtifactPair};
pub use lexical::{HeuristicTagger, LexicalClassifier};
pub use pipeline::{classify_file, generate_file, select_inputs, FileReport};
pub use result::{TestgenError, TestgenResult};
pub use step::{ActionKind, StepDescriptor};
pub use step_map::StepMap;
pub use watch::{FileChange, FileChangeKind, FileWatcher, WatchConfig, WatchStats};
pub use writer::{ensure_base_page, write_all, WriteOptions, WriteOutcome};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::classifier::*;
    pub use super::config::*;
    pub use super::feature::*;
    pub use super::generator::*;
    pub use super::lexical::*;
    pub use super::naming::*;
    pub use super::pipeline::*;
    pub use super::result::*;
    pub use super::step::*;
    pub use super::step_map::*;
    pub use super::watch::*;
    pub use super::writer::*;
}
