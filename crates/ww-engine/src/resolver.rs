//! Classifies raw player input against the offered choices.

use tracing::{debug, warn};

use crate::narrator::{INVALID_CHOICE_MARKER, Narrator};
use crate::normalize;

/// Result of resolving player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The input maps to this offered choice (canonical spelling).
    Matched(String),
    /// The input maps to no offered choice.
    Invalid {
        /// Why interpretation failed, when the narrator itself errored.
        explanation: Option<String>,
    },
}

/// Two-tier resolver: exact match first, narrator interpretation second.
pub struct ChoiceResolver<'a> {
    narrator: &'a dyn Narrator,
}

impl<'a> ChoiceResolver<'a> {
    /// Create a resolver backed by the given narrator.
    pub fn new(narrator: &'a dyn Narrator) -> Self {
        Self { narrator }
    }

    /// Resolve `raw_input` against `offered`.
    ///
    /// The narrator is only consulted when no offered choice matches the
    /// input exactly (ignoring case and surrounding whitespace), and its
    /// answer is only accepted when it names an offered choice verbatim.
    pub fn resolve(&self, raw_input: &str, offered: &[String]) -> Resolution {
        if let Some(choice) = exact_match(raw_input, offered) {
            debug!(choice, "exact match");
            return Resolution::Matched(choice.to_string());
        }

        if normalize(raw_input).is_empty() || offered.is_empty() {
            return Resolution::Invalid { explanation: None };
        }

        match self.narrator.interpret_choice(offered, raw_input) {
            Ok(answer) => {
                let answer = strip_quotes(&answer);
                if answer.eq_ignore_ascii_case(INVALID_CHOICE_MARKER) {
                    debug!(input = raw_input, "narrator found no matching choice");
                    return Resolution::Invalid { explanation: None };
                }
                match exact_match(answer, offered) {
                    Some(choice) => {
                        debug!(input = raw_input, choice, "interpreted choice");
                        Resolution::Matched(choice.to_string())
                    }
                    None => {
                        debug!(input = raw_input, answer, "narrator answered outside the offered set");
                        Resolution::Invalid { explanation: None }
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "choice interpretation failed");
                Resolution::Invalid {
                    explanation: Some(format!("The narrator could not interpret your words: {e}")),
                }
            }
        }
    }
}

/// Find the first offered choice equal to `input`, ignoring case and
/// surrounding whitespace.
pub fn exact_match<'c>(input: &str, offered: &'c [String]) -> Option<&'c str> {
    let wanted = normalize(input);
    offered
        .iter()
        .find(|choice| normalize(choice) == wanted)
        .map(String::as_str)
}

fn strip_quotes(answer: &str) -> &str {
    answer
        .trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '`'))
        .trim()
}
