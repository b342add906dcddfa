//! Runtime for executing sessions
//!
//! The state machine never performs I/O. This module owns the driving loop
//! and the set of live sessions.

mod executor;


pub use executor::{Dispatch, SessionRuntime};

use crate::config::DEFAULT_SESSION_IDLE_TIMEOUT;
use crate::places::PlaceSearch;
use crate::state_machine::{Event, TransitionError};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

/// Type alias for production runtime with a shared search backend
pub type ProductionRuntime = SessionRuntime<Arc<dyn PlaceSearch>>;

/// Handle to one session; events for a session are applied one at a time
pub type SessionHandle = Arc<Mutex<ProductionRuntime>>;

/// Errors from a detached dispatch
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Rejected(#[from] TransitionError),
    #[error("Session task failed: {0}")]
    TaskFailed(String),
}

/// Apply `events` to a session on its own task.
///
/// The task owns the session lock until the batch, including any provider
/// lookup, has been applied. Dropping the returned future (a client hanging
/// up) does not cancel it. `view` runs under the same lock so the result
/// reflects exactly this batch.
pub async fn dispatch_detached<T, F>(
    handle: &SessionHandle,
    events: Vec<Event>,
    view: F,
) -> Result<T, DispatchError>
where
    T: Send + 'static,
    F: FnOnce(&ProductionRuntime, Dispatch) -> T + Send + 'static,
{
    let handle = Arc::clone(handle);
    let task = tokio::spawn(async move {
        let mut runtime = handle.lock().await;
        let dispatch = runtime.dispatch_all(events).await?;
        Ok::<T, DispatchError>(view(&*runtime, dispatch))
    });

    task.await.map_err(|e| {
        tracing::error!(error = %e, "Session task failed");
        DispatchError::TaskFailed(e.to_string())
    })?
}

/// Manager for all live sessions
pub struct SessionManager {
    places: Arc<dyn PlaceSearch>,
    idle_timeout: Duration,
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionManager {
    pub fn new(places: Arc<dyn PlaceSearch>) -> Self {
        Self {
            places,
            idle_timeout: DEFAULT_SESSION_IDLE_TIMEOUT,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Create a session in its initial state
    pub async fn create(&self) -> SessionHandle {
        self.expire_idle().await;

        let id = uuid::Uuid::new_v4().to_string();
        let handle = Arc::new(Mutex::new(SessionRuntime::new(
            id.clone(),
            Arc::clone(&self.places),
        )));

        self.sessions
            .write()
            .await
            .insert(id.clone(), Arc::clone(&handle));
        tracing::info!(session_id = %id, "Session created");

        handle
    }

    pub async fn get(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.read().await.get(id).cloned()
    }

    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Session removed");
        }
        removed
    }

    #[allow(dead_code)] // Used by tests
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop sessions idle longer than the timeout
    async fn expire_idle(&self) {
        let idle_timeout = self.idle_timeout;
        let mut sessions = self.sessions.write().await;

        sessions.retain(|id, handle| {
            // A locked session is mid-dispatch
            let Ok(runtime) = handle.try_lock() else {
                return true;
            };
            if runtime.idle_for() < idle_timeout {
                return true;
            }
            tracing::info!(session_id = %id, "Expiring idle session");
            false
        });
    }
}
