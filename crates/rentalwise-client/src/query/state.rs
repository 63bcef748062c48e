use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

/// Observable state of a query or action.
///
/// Every non-idle state carries the id of the request that produced it so a
/// late response can be matched against the request currently in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Idle,
    Loading { request_id: u64 },
    Success { data: T, request_id: u64 },
    Error { message: String, request_id: u64 },
}

impl<T> QueryState<T> {
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success { data, .. } => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading { .. })
    }

    #[must_use]
    pub fn request_id(&self) -> Option<u64> {
        match self {
            QueryState::Idle => None,
            QueryState::Loading { request_id }
            | QueryState::Success { request_id, .. }
            | QueryState::Error { request_id, .. } => Some(*request_id),
        }
    }
}

/// Shared state slot with request-id correlation.
pub(crate) struct QueryCell<T> {
    tx: watch::Sender<QueryState<T>>,
    next_id: AtomicU64,
}

impl<T: Clone> QueryCell<T> {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(QueryState::Idle);
        Self {
            tx,
            next_id: AtomicU64::new(0),
        }
    }

    /// Enters `Loading` under a fresh request id, superseding any request in
    /// flight.
    pub(crate) fn begin(&self) -> u64 {
        let request_id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.tx.send_replace(QueryState::Loading { request_id });
        request_id
    }

    /// Applies the outcome of `request_id`. Returns `false` and leaves the
    /// state untouched when that request has been superseded or cleared.
    pub(crate) fn complete(&self, request_id: u64, outcome: Result<T, String>) -> bool {
        self.tx.send_if_modified(|state| {
            if !matches!(state, QueryState::Loading { request_id: current } if *current == request_id)
            {
                return false;
            }
            *state = match outcome {
                Ok(data) => QueryState::Success { data, request_id },
                Err(message) => QueryState::Error {
                    message,
                    request_id,
                },
            };
            true
        })
    }

    /// Returns to `Idle`; results of requests still in flight are discarded.
    pub(crate) fn reset(&self) {
        self.tx.send_replace(QueryState::Idle);
    }

    pub(crate) fn snapshot(&self) -> QueryState<T> {
        self.tx.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.tx.subscribe()
    }

    /// Waits until the state leaves `Loading`.
    pub(crate) async fn settled(&self) -> QueryState<T> {
        let mut rx = self.tx.subscribe();
        let settled = match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        };
        settled
    }
}
