//! Noun extraction for short-name synthesis.
//!
//! [`LexicalClassifier`] is the seam: anything that can pick noun-like
//! tokens out of a sentence will do. [`HeuristicTagger`] is the bundled,
//! dictionary-free implementation. It rejects closed-class words (determiners,
//! pronouns, prepositions, conjunctions, auxiliaries), the verbs and
//! adjectives that show up in UI steps, and `-ly` adverbs. Whatever
//! alphabetic token survives counts as a noun.

use std::fmt::Debug;

/// Something that can pick noun-like tokens out of step text.
pub trait LexicalClassifier: Debug + Send + Sync {
    /// Noun-like tokens of `text`, in sentence order.
    fn nouns(&self, text: &str) -> Vec<String>;
}

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "some", "any", "each", "every", "all",
    "no", "my", "your", "his", "her", "its", "our", "their",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
    "yourself", "itself", "themselves", "who", "what", "which",
];

const PREPOSITIONS: &[&str] = &[
    "to", "on", "in", "into", "onto", "at", "of", "for", "with", "without", "from", "by", "as",
    "via", "over", "under", "about", "after", "before", "within", "inside", "up", "down", "out",
    "off", "through", "between", "near", "and", "or", "but", "nor", "then", "if", "when", "while",
    "than", "not",
];

const AUXILIARIES: &[&str] = &[
    "be", "is", "are", "am", "was", "were", "been", "being", "do", "does", "did", "have", "has",
    "had", "should", "shall", "will", "would", "can", "could", "may", "might", "must",
];

/// Verb forms of the interactions step authors describe.
const UI_VERBS: &[&str] = &[
    "click", "clicks", "clicked", "clicking", "press", "presses", "pressed", "tap", "taps",
    "tapped", "enter", "enters", "entered", "type", "types", "typed", "provide", "provides",
    "fill", "fills", "filled", "set", "sets", "hover", "hovers", "upload", "uploads", "uploaded",
    "select", "selects", "selected", "choose", "chooses", "chose", "scroll", "scrolls", "clear",
    "clears", "cleared", "wait", "waits", "see", "sees", "saw", "seen", "navigate", "navigates",
    "navigated", "go", "goes", "went", "open", "opens", "opened", "visit", "visits", "view",
    "views", "land", "lands", "submit", "submits", "submitted", "log", "logs", "logged", "sign",
    "signs", "signed", "check", "checks", "checked", "uncheck", "unchecks", "appear", "appears",
    "contain", "contains", "display", "displays", "displayed", "show", "shows", "shown", "get",
    "gets", "redirect", "redirected", "try", "tries", "attempt", "attempts", "remain", "remains",
];

const ADJECTIVES: &[&str] = &[
    "visible", "invisible", "hidden", "enabled", "disabled", "valid", "invalid", "empty", "new",
    "correct", "incorrect", "wrong", "successful", "successfully", "present", "available",
    "active", "inactive", "same", "different", "first", "last", "next", "previous", "current",
    "main", "primary", "secondary", "other",
];

/// Nouns that happen to end in "-ly".
const LY_NOUNS: &[&str] = &[
    "family", "supply", "reply", "assembly", "anomaly", "butterfly", "monopoly", "rally",
    "jelly", "italy", "ally", "bully", "lily", "belly", "gully",
];

/// Lexicon and suffix heuristics; no external model.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTagger;

impl HeuristicTagger {
    /// Create a tagger.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn is_noun(token: &str) -> bool {
        if !token.chars().all(char::is_alphabetic) {
            return false;
        }
        let lower = token.to_lowercase();
        let word = lower.as_str();
        let closed = [DETERMINERS, PRONOUNS, PREPOSITIONS, AUXILIARIES, UI_VERBS, ADJECTIVES];
        if closed.iter().any(|class| class.contains(&word)) {
            return false;
        }
        // adverbs such as "quickly"
        LY_NOUNS.contains(&word) || !(word.len() > 4 && word.ends_with("ly"))
    }
}

impl LexicalClassifier for HeuristicTagger {
    fn nouns(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .map(|token| token.trim_matches('\''))
            .filter(|token| !token.is_empty() && Self::is_noun(token))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nouns(text: &str) -> Vec<String> {
        HeuristicTagger::new().nouns(text)
    }

    #[test]
    fn keeps_content_words_in_order() {
        assert_eq!(nouns("the user clicks on the login button"), ["user", "login", "button"]);
    }

    #[test]
    fn drops_verbs_auxiliaries_and_adjectives() {
        assert_eq!(nouns("I should see the welcome message visible"), ["welcome", "message"]);
        assert_eq!(nouns("user navigates to dashboard"), ["user", "dashboard"]);
    }

    #[test]
    fn drops_adverbs_and_numbers() {
        assert_eq!(nouns("user quickly opens page 2"), ["user", "page"]);
    }

    #[test]
    fn ly_nouns_survive() {
        assert_eq!(nouns("user quickly opens the family plan"), ["user", "family", "plan"]);
        assert_eq!(nouns("the reply box shows the supply assembly"), ["reply", "box", "supply", "assembly"]);
    }

    #[test]
    fn case_is_preserved() {
        assert_eq!(nouns("Profile Picture appears"), ["Profile", "Picture"]);
    }

    #[test]
    fn function_words_only_yield_nothing() {
        assert!(nouns("it should be on the").is_empty());
        assert!(nouns("").is_empty());
    }
}
