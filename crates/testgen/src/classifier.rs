//! Step classification: sentence → [`StepDescriptor`].
//!
//! Two ordered rule lists drive classification. The selector-name rules map
//! recognizable UI vocabulary to stable logical names; the action rules map
//! verbs and assertion phrases to an [`ActionKind`]. In both lists the first
//! matching rule wins, so the order below is part of the behavior.

use crate::config::{SelectorConfig, TagCompatibility};
use crate::lexical::{HeuristicTagger, LexicalClassifier};
use crate::naming::{extract_quoted, short_name};
use crate::step::{ActionKind, StepDescriptor};
use regex::Regex;

/// Logical selector names, matched case-insensitively and unanchored.
const SELECTOR_RULES: &[(&str, &str)] = &[
    ("username|user name|email", "userNameField"),
    ("password", "passwordField"),
    ("login|submit", "loginButton"),
    ("dropdown.*country|country.*dropdown", "countryDropdown"),
    ("checkbox", "termsCheckbox"),
    ("link", "link"),
    ("title", "pageTitle"),
    ("url", "currentUrl"),
    ("welcome message", "welcomeBanner"),
    ("profile picture", "avatar"),
    ("search", "searchBox"),
    ("logout", "logoutButton"),
    ("add to cart|cart", "addToCartButton"),
    ("checkout", "checkoutButton"),
    ("menu|hamburger", "menuToggle"),
    ("language", "languageSelector"),
    ("payment method", "paymentMethodDropdown"),
    ("card number", "cardNumberField"),
    ("cvv", "cvvField"),
    ("expiry date", "expiryDateField"),
    ("mobile number|phone", "mobileNumberField"),
    ("otp", "otpField"),
    ("account number|iban", "accountNumberField"),
    ("transaction id|txn id", "transactionIdField"),
    ("policy number", "policyNumberField"),
    ("claim id", "claimIdField"),
    ("medical record|mrn", "medicalRecordNumber"),
    ("patient name", "patientNameField"),
    ("doctor name", "doctorNameField"),
    ("appointment date", "appointmentDatePicker"),
    ("shipping address", "shippingAddressField"),
];

/// Action rules, matched against the lower-cased sentence on word boundaries.
///
/// Verbs accept their inflected forms so that "has entered", "clicked" and
/// "is selecting" classify like the present tense.
const ACTION_RULES: &[(&str, ActionKind)] = &[
    (
        r"\b(enter(s|ed|ing)?|typ(e|es|ed|ing)|provid(e|es|ed|ing)|input(s|ted|ting)?|fill(s|ed|ing)?|set(s|ting)?)\b",
        ActionKind::SetValue,
    ),
    (
        r"\b(click(s|ed|ing)?|press(es|ed|ing)?|tap(s|ped|ping)?)\b",
        ActionKind::Click,
    ),
    (r"\bhover(s|ed|ing)?\b", ActionKind::Hover),
    (r"\bupload(s|ed|ing)?\b", ActionKind::UploadFile),
    (
        r"\b(select(s|ed|ing)?|choos(e|es|ing)|chose|chosen)\b",
        ActionKind::SelectDropdown,
    ),
    (r"\bscroll(s|ed|ing)? to\b", ActionKind::ScrollTo),
    (r"\bclear(s|ed|ing)?\b", ActionKind::ClearText),
    (r"\bwait(s|ed|ing)? for\b.*\bvisible\b", ActionKind::WaitForVisible),
    (r"\b(should see|sees)\b", ActionKind::AssertVisible),
    (r"\bshould have text\b", ActionKind::AssertText),
    (r"\bshould be enabled\b", ActionKind::AssertEnabled),
    (r"\bshould be disabled\b", ActionKind::AssertDisabled),
    (r"\btitle should be\b", ActionKind::AssertTitle),
    (r"\burl should contain\b", ActionKind::AssertUrlContains),
];

/// One entry of the selector-name rule list.
#[derive(Debug, Clone)]
pub struct SelectorRule {
    pattern: Regex,
    name: &'static str,
}

impl SelectorRule {
    /// Logical name this rule assigns.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// One entry of the action rule list.
#[derive(Debug, Clone)]
pub struct ActionRule {
    pattern: Regex,
    action: ActionKind,
}

impl ActionRule {
    /// Action this rule assigns.
    #[must_use]
    pub const fn action(&self) -> &ActionKind {
        &self.action
    }
}

/// Maps step sentences to [`StepDescriptor`]s.
///
/// Holds only immutable state; classifying the same text twice yields equal
/// descriptors.
#[derive(Debug)]
pub struct StepClassifier<L: LexicalClassifier = HeuristicTagger> {
    selector_rules: Vec<SelectorRule>,
    action_rules: Vec<ActionRule>,
    config: SelectorConfig,
    tags: TagCompatibility,
    lexical: L,
}

impl StepClassifier<HeuristicTagger> {
    /// Classifier using the bundled lexical tagger.
    #[must_use]
    pub fn new(config: SelectorConfig) -> Self {
        Self::with_lexical(config, HeuristicTagger::new())
    }
}

impl<L: LexicalClassifier> StepClassifier<L> {
    /// Classifier with a custom noun extractor.
    #[must_use]
    pub fn with_lexical(config: SelectorConfig, lexical: L) -> Self {
        let selector_rules = SELECTOR_RULES
            .iter()
            .map(|&(pattern, name)| SelectorRule {
                pattern: Regex::new(&format!("(?i){pattern}")).expect("static pattern"),
                name,
            })
            .collect();
        let action_rules = ACTION_RULES
            .iter()
            .map(|(pattern, action)| ActionRule {
                pattern: Regex::new(pattern).expect("static pattern"),
                action: action.clone(),
            })
            .collect();
        Self {
            selector_rules,
            action_rules,
            config,
            tags: TagCompatibility::builtin(),
            lexical,
        }
    }

    /// Selector-name rules in evaluation order.
    #[must_use]
    pub fn selector_rules(&self) -> &[SelectorRule] {
        &self.selector_rules
    }

    /// Action rules in evaluation order.
    #[must_use]
    pub fn action_rules(&self) -> &[ActionRule] {
        &self.action_rules
    }

    /// Selector configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Noun extractor in use.
    #[must_use]
    pub const fn lexical(&self) -> &L {
        &self.lexical
    }

    /// Logical selector name for a step: first matching rule, otherwise a
    /// synthesized short name.
    #[must_use]
    pub fn selector_name(&self, text: &str) -> String {
        self.selector_rules
            .iter()
            .find(|rule| rule.pattern.is_match(text))
            .map_or_else(|| short_name(text, &self.lexical), |rule| rule.name.to_string())
    }

    /// Action kind for a step; [`ActionKind::Unknown`] when no rule matches.
    #[must_use]
    pub fn action(&self, text: &str) -> ActionKind {
        let lower = text.to_lowercase();
        self.action_rules
            .iter()
            .find(|rule| rule.pattern.is_match(&lower))
            .map_or(ActionKind::Unknown, |rule| rule.action.clone())
    }

    /// Classify one step sentence.
    #[must_use]
    pub fn classify(&self, text: &str) -> StepDescriptor {
        let selector_name = self.selector_name(text);
        let action = self.action(text);
        let argument = if action.needs_argument() {
            extract_quoted(text)
                .filter(|quoted| !quoted.is_empty())
                .map(str::to_string)
        } else {
            None
        };

        let selector = self.config.alias(&selector_name).map_or_else(
            || format!("[data-testid=\"{selector_name}\"]"),
            str::to_string,
        );
        let mut selector_fallbacks: Vec<String> = Vec::new();
        for candidate in self.config.fallbacks(&selector_name) {
            if *candidate != selector && !selector_fallbacks.contains(candidate) {
                selector_fallbacks.push(candidate.clone());
            }
        }

        if !self.tags.allows(&selector, &action) {
            tracing::debug!(%selector, %action, "selector does not look like a target for this action");
        }
        tracing::debug!(step = text, %action, selector_name = %selector_name, "classified step");

        StepDescriptor {
            action,
            selector_name,
            selector,
            selector_fallbacks,
            argument,
        }
    }
}
