//! Pure state transition function
//!
//! Given the same session, event and random number generator state, a
//! transition always produces the same result and performs no I/O. The
//! provider lookup is requested through an effect and its outcome comes back
//! as a separate `LookupComplete` event.

use super::catalog::{Diagnosis, Symptom, UnknownSymptom};
use super::script;
use super::state::{Message, Session, Step};
use super::{Effect, Event};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Number of diagnoses drawn at the diagnosis step
pub const DIAGNOSIS_SAMPLE_SIZE: usize = 3;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_session: Session,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(session: Session) -> Self {
        Self {
            new_session: session,
            effects: vec![],
        }
    }

    /// Record an effect, appending messages to the session log as we go
    fn push(&mut self, effect: Effect) {
        if let Effect::AppendMessage(message) = &effect {
            self.new_session.messages.push(message.clone());
        }
        self.effects.push(effect);
    }

    /// Messages appended by this transition
    #[allow(dead_code)] // Used by tests
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.effects.iter().filter_map(Effect::message)
    }

    #[allow(dead_code)] // Used by tests
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.effects.iter().filter_map(|e| match e {
            Effect::Warn { message } => Some(message.as_str()),
            _ => None,
        })
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A provider lookup for {0:?} is already in progress")]
    LookupInFlight(String),
    #[error("Conversation has finished, start over to continue (got {0})")]
    Finished(&'static str),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
pub fn transition<R: Rng + ?Sized>(
    session: &Session,
    event: Event,
    rng: &mut R,
) -> Result<TransitionResult, TransitionError> {
    let mut result = TransitionResult::new(session.clone());

    match (session.step, event) {
        // Reset is accepted everywhere and bypasses entry actions
        (_, Event::Reset) => Ok(TransitionResult::new(Session::default())),

        (step, Event::Render) => {
            render(&mut result, step, rng);
            Ok(result)
        }

        // ============================================================
        // Symptom selection (1 -> 2 -> 3)
        // ============================================================
        (Step::SymptomSelection, Event::SubmitSymptoms { symptoms }) => {
            match parse_selection(&symptoms) {
                Ok(selected) => {
                    result.push(Effect::user(script::symptom_echo(&selected)));
                    result.new_session.selected_symptoms = selected;
                    enter_diagnosis(&mut result, rng);
                }
                Err(warning) => result.push(Effect::warn(warning)),
            }
            Ok(result)
        }

        // ============================================================
        // Provider prompt (3 -> 4 | -1)
        // ============================================================
        (Step::ProviderPrompt, Event::AnswerSearch { search: true }) => {
            enter_location_entry(&mut result);
            Ok(result)
        }

        (Step::ProviderPrompt, Event::AnswerSearch { search: false }) => {
            finish(&mut result);
            Ok(result)
        }

        // ============================================================
        // Location entry and lookup (4 -> -1)
        // ============================================================
        (Step::LocationEntry, Event::SubmitLocation { .. }) if session.pending_lookup.is_some() => {
            Err(TransitionError::LookupInFlight(
                session.pending_lookup.clone().unwrap_or_default(),
            ))
        }

        (Step::LocationEntry, Event::SubmitLocation { location }) => {
            let location = location.trim();
            if location.is_empty() {
                result.push(Effect::warn(script::WARN_NO_LOCATION));
            } else {
                result.new_session.pending_lookup = Some(location.to_string());
                result.push(Effect::LookupProviders {
                    location: location.to_string(),
                });
            }
            Ok(result)
        }

        (Step::LocationEntry, Event::LookupComplete { location, outcome })
            if session.pending_lookup.as_deref() == Some(location.as_str()) =>
        {
            // Success or failure, the conversation always ends here
            result.new_session.pending_lookup = None;
            result.push(Effect::assistant(script::lookup_outcome(&location, &outcome)));
            finish(&mut result);
            Ok(result)
        }

        // ============================================================
        // Invalid Transitions
        // ============================================================
        (Step::Finished, event) => Err(TransitionError::Finished(event.name())),

        (step, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from step {} with event {}",
            step.code(),
            event.name()
        ))),
    }
}

// Entry actions. Each one runs at most once per session (guarded by
// `entered`) and then follows the automatic transition, if any.

fn render<R: Rng + ?Sized>(result: &mut TransitionResult, step: Step, rng: &mut R) {
    match step {
        Step::Greeting => enter_greeting(result),
        Step::SymptomSelection => enter_symptom_selection(result),
        Step::Diagnosis => enter_diagnosis(result, rng),
        Step::ProviderPrompt => enter_provider_prompt(result),
        Step::LocationEntry => enter_location_entry(result),
        Step::Finished => {}
    }
}

/// Mark `step` as current; returns true the first time it is entered
fn arrive(result: &mut TransitionResult, step: Step) -> bool {
    result.new_session.step = step;
    result.new_session.entered.insert(step)
}

fn enter_greeting(result: &mut TransitionResult) {
    if arrive(result, Step::Greeting) {
        result.push(Effect::assistant(script::GREETING));
    }
    enter_symptom_selection(result);
}

fn enter_symptom_selection(result: &mut TransitionResult) {
    if arrive(result, Step::SymptomSelection) {
        result.push(Effect::assistant(script::SYMPTOM_QUESTION));
    }
}

fn enter_diagnosis<R: Rng + ?Sized>(result: &mut TransitionResult, rng: &mut R) {
    if arrive(result, Step::Diagnosis) {
        let diagnoses = sample_diagnoses(rng);
        result.push(Effect::assistant(script::diagnosis_list(&diagnoses)));
        result.new_session.diagnosis = diagnoses.first().copied();
    }
    enter_provider_prompt(result);
}

fn enter_provider_prompt(result: &mut TransitionResult) {
    if arrive(result, Step::ProviderPrompt) {
        result.push(Effect::assistant(script::PROVIDER_PROMPT));
    }
}

fn enter_location_entry(result: &mut TransitionResult) {
    // Only the input field changes, nothing is logged
    arrive(result, Step::LocationEntry);
}

fn finish(result: &mut TransitionResult) {
    result.push(Effect::assistant(script::CLOSING));
    arrive(result, Step::Finished);
}

// Helper functions

/// Draw distinct diagnoses uniformly at random, without replacement
pub fn sample_diagnoses<R: Rng + ?Sized>(rng: &mut R) -> Vec<Diagnosis> {
    Diagnosis::ALL[..]
        .choose_multiple(rng, DIAGNOSIS_SAMPLE_SIZE)
        .copied()
        .collect()
}

/// Validate a symptom selection, returning the warning to show on failure
fn parse_selection(labels: &[String]) -> Result<Vec<Symptom>, String> {
    let mut selected = Vec::new();
    for label in labels.iter().filter(|l| !l.trim().is_empty()) {
        let symptom = label
            .parse::<Symptom>()
            .map_err(|UnknownSymptom(unknown)| script::unknown_symptom_warning(&unknown))?;
        if !selected.contains(&symptom) {
            selected.push(symptom);
        }
    }

    if selected.is_empty() {
        return Err(script::WARN_NO_SYMPTOMS.to_string());
    }
    Ok(selected)
}
