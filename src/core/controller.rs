//! Lookup controller
//!
//! Owns the whole request cycle: blank-input rejection, choosing the endpoint
//! variant, running the request on a background task and pushing the mapped
//! display state to the screen. At most one lookup is outstanding at a time,
//! and every lookup belongs to the controller's scope so that tearing the
//! screen down discards results that have not been applied yet.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use futures::FutureExt;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

use crate::core::api::LyricsApi;
use crate::core::query::Query;
use crate::core::result::LyricsResult;
use crate::core::state::{DisplaySink, UiState};

/// What happened to a dispatch request
#[derive(Debug)]
pub enum Dispatch {
    /// Blank input; the prompt was sent to the sink
    Rejected(&'static str),
    /// A lookup is already outstanding
    Busy,
    /// The controller was torn down
    Closed,
    /// Lookup spawned. Resolves to `None` when the result was discarded.
    Started(JoinHandle<Option<LyricsResult>>),
}

/// Clears the in-flight flag when the lookup ends, however it ends
struct InFlightGuard {
    in_flight: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

#[derive(Default)]
struct LookupScope {
    closed: AtomicBool,
    current: Mutex<Option<AbortHandle>>,
}

impl LookupScope {
    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn track(&self, handle: AbortHandle) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = Some(handle);
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Release);
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = current.take() {
            handle.abort();
        }
    }
}

#[derive(Clone)]
pub struct LyricsLookupController {
    api: Arc<dyn LyricsApi>,
    sink: Arc<dyn DisplaySink>,
    in_flight: Arc<AtomicBool>,
    scope: Arc<LookupScope>,
}

impl LyricsLookupController {
    pub fn new(api: Arc<dyn LyricsApi>, sink: Arc<dyn DisplaySink>) -> Self {
        Self {
            api,
            sink,
            in_flight: Arc::new(AtomicBool::new(false)),
            scope: Arc::new(LookupScope::default()),
        }
    }

    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate the raw input and start a lookup for it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn validate_and_dispatch(&self, raw_query: &str) -> Dispatch {
        let query = match Query::parse(raw_query) {
            Ok(query) => query,
            Err(prompt) => {
                debug!("Rejected blank query");
                self.sink.prompt(prompt);
                return Dispatch::Rejected(prompt);
            }
        };

        if self.scope.is_closed() {
            debug!("Ignoring dispatch after teardown");
            return Dispatch::Closed;
        }

        if self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Ignoring dispatch while a lookup is outstanding");
            return Dispatch::Busy;
        }
        let guard = InFlightGuard {
            in_flight: Arc::clone(&self.in_flight),
        };

        let handle = tokio::spawn(Self::lookup(
            Arc::clone(&self.api),
            Arc::clone(&self.sink),
            Arc::clone(&self.scope),
            query,
            guard,
        ));
        self.scope.track(handle.abort_handle());

        Dispatch::Started(handle)
    }

    async fn lookup(
        api: Arc<dyn LyricsApi>,
        sink: Arc<dyn DisplaySink>,
        scope: Arc<LookupScope>,
        query: Query,
        guard: InFlightGuard,
    ) -> Option<LyricsResult> {
        sink.render(UiState::loading());

        let request = query.to_request();
        info!("Looking up lyrics for {}", request);

        let outcome = AssertUnwindSafe(api.get_lyrics(&request)).catch_unwind().await;
        let result = match outcome {
            Ok(response) => LyricsResult::from(response),
            Err(panic) => {
                let reason = panic_message(panic.as_ref());
                warn!("Lyrics lookup panicked: {}", reason);
                LyricsResult::Failure { reason }
            }
        };

        match &result {
            LyricsResult::Success { lyrics } => info!("Found lyrics ({} lines)", lyrics.lines().count()),
            LyricsResult::Failure { reason } => warn!("Lookup failed: {}", reason),
            LyricsResult::Empty => info!("No lyrics found"),
        }

        if scope.is_closed() {
            debug!("Discarding lookup result after teardown");
            return None;
        }

        sink.render(UiState::finished(result.clone()));

        // Only free for the next dispatch once this result has been handed over
        drop(guard);
        Some(result)
    }

    /// Abandon the outstanding lookup, if any, and refuse further dispatches
    pub fn teardown(&self) {
        info!("Tearing down lookup controller");
        self.scope.close();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected failure during lookup".to_string()
    }
}
