//! Events that drive a session

use crate::places::{LookupError, Provider};

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// Re-evaluate the current step without new input
    Render,

    // User events
    SubmitSymptoms {
        symptoms: Vec<String>,
    },
    AnswerSearch {
        search: bool,
    },
    SubmitLocation {
        location: String,
    },
    Reset,

    // Lookup events
    LookupComplete {
        location: String,
        outcome: Result<Vec<Provider>, LookupError>,
    },
}

impl Event {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Event::Render => "render",
            Event::SubmitSymptoms { .. } => "submit_symptoms",
            Event::AnswerSearch { .. } => "answer_search",
            Event::SubmitLocation { .. } => "submit_location",
            Event::Reset => "reset",
            Event::LookupComplete { .. } => "lookup_complete",
        }
    }
}
