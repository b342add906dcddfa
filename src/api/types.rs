//! API request and response types

use crate::places::PlaceSearch;
use crate::runtime::{Dispatch, SessionRuntime};
use crate::state_machine::{Diagnosis, Message, Prompt, Step, Symptom};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to submit the symptom selection
#[derive(Debug, Deserialize)]
pub struct SymptomsRequest {
    #[serde(default)]
    pub symptoms: Vec<String>,
}

/// Answer to "search for providers?"
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub search: bool,
}

/// Request to submit the location
#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    #[serde(default)]
    pub location: String,
}

/// Session as shown to clients
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// Integer step code, -1 once finished
    pub step: Step,
    pub finished: bool,
    pub messages: Vec<Message>,
    pub selected_symptoms: Vec<Symptom>,
    pub diagnosis: Option<Diagnosis>,
    pub prompt: Prompt,
}

impl SessionView {
    pub fn from_runtime<P: PlaceSearch>(runtime: &SessionRuntime<P>) -> Self {
        let session = runtime.session();
        Self {
            id: runtime.id().to_string(),
            created_at: runtime.created_at(),
            step: session.step,
            finished: session.step.is_terminal(),
            messages: session.messages.clone(),
            selected_symptoms: session.selected_symptoms.clone(),
            diagnosis: session.diagnosis,
            prompt: session.prompt(),
        }
    }
}

/// Response to any session event
#[derive(Debug, Serialize)]
pub struct DispatchResponse {
    pub session: SessionView,
    pub new_messages: Vec<Message>,
    pub warnings: Vec<String>,
}

impl DispatchResponse {
    pub fn new<P: PlaceSearch>(runtime: &SessionRuntime<P>, dispatch: Dispatch) -> Self {
        Self {
            session: SessionView::from_runtime(runtime),
            new_messages: dispatch.messages,
            warnings: dispatch.warnings,
        }
    }
}

/// Symptom catalog
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub symptoms: Vec<&'static str>,
}

/// Response for lifecycle actions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
