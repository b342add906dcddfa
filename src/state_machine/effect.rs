//! Effects produced by state transitions

use super::state::Message;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A message was appended to the session log
    AppendMessage(Message),

    /// Validation failure shown to the user; not part of the log
    Warn { message: String },

    /// Run the provider lookup and feed the outcome back as `LookupComplete`
    LookupProviders { location: String },
}

impl Effect {
    pub fn assistant(content: impl Into<String>) -> Self {
        Effect::AppendMessage(Message::assistant(content))
    }

    pub fn user(content: impl Into<String>) -> Self {
        Effect::AppendMessage(Message::user(content))
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Effect::Warn {
            message: message.into(),
        }
    }

    #[allow(dead_code)] // Used by tests
    pub fn message(&self) -> Option<&Message> {
        match self {
            Effect::AppendMessage(message) => Some(message),
            _ => None,
        }
    }
}
