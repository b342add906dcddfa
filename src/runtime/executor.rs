//! Session runtime executor

use crate::places::PlaceSearch;
use crate::state_machine::{transition, Effect, Event, Message, Session, TransitionError};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// What a dispatched event produced, in emission order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    pub messages: Vec<Message>,
    pub warnings: Vec<String>,
}

/// Drives one session: applies events, executes effects and feeds lookup
/// outcomes back into the state machine
pub struct SessionRuntime<P: PlaceSearch> {
    id: String,
    created_at: DateTime<Utc>,
    last_active: Instant,
    session: Session,
    places: P,
    rng: StdRng,
}

impl<P: PlaceSearch> SessionRuntime<P> {
    pub fn new(id: impl Into<String>, places: P) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            last_active: Instant::now(),
            session: Session::new(),
            places,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the random source, for reproducible diagnosis sampling
    #[allow(dead_code)] // Used by tests
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Time since the last dispatch started or finished
    pub fn idle_for(&self) -> Duration {
        self.last_active.elapsed()
    }

    /// Apply one event and everything it triggers
    #[allow(dead_code)] // Used by tests
    pub async fn dispatch(&mut self, event: Event) -> Result<Dispatch, TransitionError> {
        self.dispatch_all([event]).await
    }

    /// Apply a batch of events as one unit.
    ///
    /// A lookup requested along the way runs here and its outcome is applied
    /// before returning, so the caller always gets back a session at rest.
    /// The session is only committed once every event has been accepted: a
    /// rejected event, or a dispatch dropped mid-lookup, leaves it as it was.
    pub async fn dispatch_all(
        &mut self,
        events: impl IntoIterator<Item = Event>,
    ) -> Result<Dispatch, TransitionError> {
        self.last_active = Instant::now();
        let mut session = self.session.clone();
        let mut dispatch = Dispatch::default();

        for event in events {
            self.apply(&mut session, event, &mut dispatch).await?;
        }

        self.session = session;
        self.last_active = Instant::now();
        Ok(dispatch)
    }

    async fn apply(
        &mut self,
        session: &mut Session,
        event: Event,
        dispatch: &mut Dispatch,
    ) -> Result<(), TransitionError> {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            let event_name = event.name();
            let from = session.step;

            let result = transition(session, event, &mut self.rng).map_err(|e| {
                tracing::warn!(
                    session_id = %self.id,
                    event = event_name,
                    step = from.code(),
                    error = %e,
                    "Rejected event"
                );
                e
            })?;

            *session = result.new_session;
            if session.step != from {
                tracing::info!(
                    session_id = %self.id,
                    event = event_name,
                    from = from.code(),
                    to = session.step.code(),
                    "Step changed"
                );
            }

            for effect in result.effects {
                match effect {
                    Effect::AppendMessage(message) => dispatch.messages.push(message),
                    Effect::Warn { message } => {
                        tracing::debug!(session_id = %self.id, warning = %message, "Validation warning");
                        dispatch.warnings.push(message);
                    }
                    Effect::LookupProviders { location } => {
                        let outcome = self.places.lookup(&location).await;
                        if let Err(e) = &outcome {
                            if e.kind.is_configuration() {
                                tracing::warn!(session_id = %self.id, "Provider search is not configured");
                            }
                        }
                        queue.push_back(Event::LookupComplete { location, outcome });
                    }
                }
            }
        }

        Ok(())
    }
}
