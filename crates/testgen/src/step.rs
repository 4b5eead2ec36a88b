//! Classified step types: [`ActionKind`] and [`StepDescriptor`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a step does to its target element.
///
/// Serialized as the camelCase action name used in StepMap files
/// (`"setValue"`, `"assertUrlContains"`, ...). Names this generator does not
/// know survive a load as [`ActionKind::Unsupported`] so the generated marker
/// can cite them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    /// Primary interaction (click/press/tap)
    Click,
    /// Fill a control with the argument
    SetValue,
    /// Fill a control with the empty string
    ClearText,
    /// Choose the option labeled by the argument
    SelectDropdown,
    /// Attach the file at the argument path
    UploadFile,
    /// Move the pointer over the element
    Hover,
    /// Scroll the element into view
    ScrollTo,
    /// Block until the element is visible
    WaitForVisible,
    /// Expect the element to be visible
    AssertVisible,
    /// Expect the element text to equal the argument
    AssertText,
    /// Expect the element to be enabled
    AssertEnabled,
    /// Expect the element to be disabled
    AssertDisabled,
    /// Expect the document title to equal the argument
    AssertTitle,
    /// Expect the URL to contain the argument
    AssertUrlContains,
    /// No action rule matched the step
    Unknown,
    /// Action name read from a StepMap that this generator does not support
    Unsupported(String),
}

impl ActionKind {
    /// Every action the classifier can produce, `Unknown` last.
    pub const KNOWN: [Self; 15] = [
        Self::Click,
        Self::SetValue,
        Self::ClearText,
        Self::SelectDropdown,
        Self::UploadFile,
        Self::Hover,
        Self::ScrollTo,
        Self::WaitForVisible,
        Self::AssertVisible,
        Self::AssertText,
        Self::AssertEnabled,
        Self::AssertDisabled,
        Self::AssertTitle,
        Self::AssertUrlContains,
        Self::Unknown,
    ];

    /// StepMap name of the action.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Click => "click",
            Self::SetValue => "setValue",
            Self::ClearText => "clearText",
            Self::SelectDropdown => "selectDropdown",
            Self::UploadFile => "uploadFile",
            Self::Hover => "hover",
            Self::ScrollTo => "scrollTo",
            Self::WaitForVisible => "waitForVisible",
            Self::AssertVisible => "assertVisible",
            Self::AssertText => "assertText",
            Self::AssertEnabled => "assertEnabled",
            Self::AssertDisabled => "assertDisabled",
            Self::AssertTitle => "assertTitle",
            Self::AssertUrlContains => "assertUrlContains",
            Self::Unknown => "unknown",
            Self::Unsupported(name) => name,
        }
    }

    /// Whether the step's quoted literal is captured as its argument.
    #[must_use]
    pub const fn needs_argument(&self) -> bool {
        matches!(
            self,
            Self::SetValue
                | Self::UploadFile
                | Self::SelectDropdown
                | Self::AssertText
                | Self::AssertTitle
                | Self::AssertUrlContains
        )
    }

    /// Whether generated code can express this action.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown | Self::Unsupported(_))
    }
}

impl From<String> for ActionKind {
    fn from(name: String) -> Self {
        // Older maps spell the fill action this way
        if name == "setText" {
            return Self::SetValue;
        }
        Self::KNOWN
            .iter()
            .find(|kind| kind.name() == name)
            .cloned()
            .unwrap_or(Self::Unsupported(name))
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Unsupported(name) => name,
            other => other.name().to_string(),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structured form of one classified step.
///
/// Field names follow the persisted StepMap layout: the fallbacks are stored
/// as `fallbackSelector` and the argument as `note` (empty string when
/// absent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDescriptor {
    /// Action kind
    pub action: ActionKind,
    /// Stable logical selector name
    pub selector_name: String,
    /// Primary locator expression
    pub selector: String,
    /// Alternate locators, tried in order after the primary
    #[serde(rename = "fallbackSelector", default)]
    pub selector_fallbacks: Vec<String>,
    /// Literal argument captured from the step text
    #[serde(rename = "note", default, with = "note_field")]
    pub argument: Option<String>,
}

impl StepDescriptor {
    /// Argument text, empty when none was captured.
    #[must_use]
    pub fn argument_text(&self) -> &str {
        self.argument.as_deref().unwrap_or_default()
    }

    /// Primary selector followed by fallbacks, first occurrence kept.
    #[must_use]
    pub fn selector_candidates(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(1 + self.selector_fallbacks.len());
        for candidate in std::iter::once(&self.selector).chain(&self.selector_fallbacks) {
            if !out.contains(candidate) {
                out.push(candidate.clone());
            }
        }
        out
    }
}

/// `note` is a plain string on disk; empty means "no argument".
mod note_field {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_deref().unwrap_or_default())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.filter(|s| !s.is_empty()))
    }
}
