//! Session state types

use super::catalog::{Diagnosis, Symptom};
use super::script;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// Step
// ============================================================================

/// Position in the scripted flow.
///
/// Variants are declared in flow order so that `Ord` matches progress:
/// a session's step never decreases except through a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Step {
    /// Greeting and disclaimer (code 0)
    #[default]
    Greeting,
    /// Waiting for a symptom selection (code 1)
    SymptomSelection,
    /// Sampling diagnoses (code 2), never a resting state
    Diagnosis,
    /// Asking whether to search for providers (code 3)
    ProviderPrompt,
    /// Waiting for a location (code 4)
    LocationEntry,
    /// Conversation finished (code -1)
    Finished,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Greeting,
        Step::SymptomSelection,
        Step::Diagnosis,
        Step::ProviderPrompt,
        Step::LocationEntry,
        Step::Finished,
    ];

    /// Integer code shown to clients
    pub fn code(self) -> i8 {
        match self {
            Step::Greeting => 0,
            Step::SymptomSelection => 1,
            Step::Diagnosis => 2,
            Step::ProviderPrompt => 3,
            Step::LocationEntry => 4,
            Step::Finished => -1,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Step::Finished
    }
}

impl From<Step> for i8 {
    fn from(step: Step) -> Self {
        step.code()
    }
}

impl TryFrom<i8> for Step {
    type Error = String;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        Step::ALL
            .into_iter()
            .find(|step| step.code() == code)
            .ok_or_else(|| format!("invalid step code {code}"))
    }
}

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Assistant,
    User,
}

/// One entry of the conversation log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// Complete state of one conversation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    pub step: Step,
    /// Append-only until reset
    pub messages: Vec<Message>,
    /// Selection order, no duplicates
    pub selected_symptoms: Vec<Symptom>,
    /// First sampled diagnosis. Kept for clients; the flow never reads it.
    pub diagnosis: Option<Diagnosis>,
    /// Steps whose entry action already ran
    #[serde(default)]
    pub entered: BTreeSet<Step>,
    /// Location of a requested lookup whose outcome has not been applied
    #[serde(default)]
    pub pending_lookup: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// What the UI should show for the current step
    pub fn prompt(&self) -> Prompt {
        let mut inputs = match self.step {
            Step::SymptomSelection => vec![InputKind::SymptomSelector {
                options: Symptom::labels(),
            }],
            Step::ProviderPrompt => vec![InputKind::YesNo],
            Step::LocationEntry if self.pending_lookup.is_none() => vec![InputKind::LocationField],
            _ => vec![],
        };
        inputs.push(InputKind::Reset);

        let text = match self.step {
            Step::SymptomSelection => Some(script::SYMPTOM_SELECTOR_LABEL),
            Step::ProviderPrompt => Some(script::PROVIDER_PROMPT),
            Step::LocationEntry => Some(script::LOCATION_FIELD_LABEL),
            Step::Greeting | Step::Diagnosis | Step::Finished => None,
        };

        Prompt { text, inputs }
    }
}

// ============================================================================
// Prompt
// ============================================================================

/// Input prompt for the current step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub text: Option<&'static str>,
    pub inputs: Vec<InputKind>,
}

/// Interaction points the UI must offer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputKind {
    /// Multi-choice selector with a submit action
    SymptomSelector { options: Vec<&'static str> },
    YesNo,
    /// Free-text field with a submit action
    LocationField,
    /// Always available
    Reset,
}
