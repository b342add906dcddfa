//! Core conversation state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

pub mod catalog;
mod effect;
pub mod event;
pub mod script;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use catalog::{Diagnosis, Symptom};
pub use effect::Effect;
pub use event::Event;
pub use state::{Message, Prompt, Role, Session, Step};
pub use transition::{transition, TransitionError};
