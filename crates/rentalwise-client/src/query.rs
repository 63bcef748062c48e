//! Reactive query bindings over the vendor client.
//!
//! A [`Query`] owns a fetcher and the last parameters it was given. Changing
//! the parameters issues a new request; its result is applied only while it is
//! still the latest request, so a slow response can never overwrite a newer
//! one. State is published through a `tokio::sync::watch` channel.
//!
//! Issuing a request spawns a task, so queries must be driven from within a
//! Tokio runtime.

mod actions;
mod bindings;
mod state;

use std::sync::{Arc, Mutex, PoisonError};

use futures::future::BoxFuture;
use tokio::sync::watch;

pub use actions::{PropertySearch, ReservationActions};
pub use bindings::{
    availability_query, calendar_query, pricing_quote_query, properties_query, property_query,
    AvailabilityParams, CalendarParams, QuoteParams,
};
pub use state::QueryState;

use crate::error::VendorError;
use state::QueryCell;

type Fetcher<P, T> = Box<dyn Fn(P) -> BoxFuture<'static, Result<T, VendorError>> + Send + Sync>;

pub struct Query<P, T> {
    fetcher: Fetcher<P, T>,
    ready: fn(&P) -> bool,
    fallback: &'static str,
    params: Mutex<Option<P>>,
    cell: Arc<QueryCell<T>>,
}

impl<P, T> Query<P, T>
where
    P: Clone + PartialEq + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Creates an idle query. `fallback` is the error message recorded when a
    /// failure carries no text of its own.
    pub fn new<F>(fetcher: F, fallback: &'static str) -> Self
    where
        F: Fn(P) -> BoxFuture<'static, Result<T, VendorError>> + Send + Sync + 'static,
    {
        Self {
            fetcher: Box::new(fetcher),
            ready: |_| true,
            fallback,
            params: Mutex::new(None),
            cell: Arc::new(QueryCell::new()),
        }
    }

    /// Parameters for which `ready` returns `false` put the query in `Idle`
    /// instead of issuing a request.
    #[must_use]
    pub fn with_ready(mut self, ready: fn(&P) -> bool) -> Self {
        self.ready = ready;
        self
    }

    /// Issues a request if `params` differ from the last parameters.
    ///
    /// Returns the id of the issued request, or `None` when nothing was
    /// issued (unchanged or not-ready parameters).
    pub fn set_params(&self, params: P) -> Option<u64> {
        // Held until the request id is allocated so the latest request always
        // belongs to the stored parameters.
        let mut current = self.params.lock().unwrap_or_else(PoisonError::into_inner);
        if current.as_ref() == Some(&params) {
            return None;
        }
        *current = Some(params.clone());
        self.issue(params)
    }

    /// Reissues the request for the current parameters.
    pub fn refetch(&self) -> Option<u64> {
        let current = self.params.lock().unwrap_or_else(PoisonError::into_inner);
        let params = current.clone()?;
        self.issue(params)
    }

    /// Returns to `Idle` and forgets the parameters. Requests in flight are
    /// left to finish but their results are discarded.
    pub fn clear(&self) {
        let mut current = self.params.lock().unwrap_or_else(PoisonError::into_inner);
        *current = None;
        self.cell.reset();
    }

    #[must_use]
    pub fn state(&self) -> QueryState<T> {
        self.cell.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.cell.subscribe()
    }

    /// Waits for the first state that is not `Loading`.
    pub async fn settled(&self) -> QueryState<T> {
        self.cell.settled().await
    }

    /// Callers hold the `params` lock.
    fn issue(&self, params: P) -> Option<u64> {
        if !(self.ready)(&params) {
            self.cell.reset();
            return None;
        }

        let request_id = self.cell.begin();
        let request = (self.fetcher)(params);
        let cell = Arc::clone(&self.cell);
        let fallback = self.fallback;

        tokio::spawn(async move {
            let outcome = request.await.map_err(|err| {
                tracing::warn!(request_id, status = err.status(), error = %err, "{fallback}");
                err.display_message(fallback)
            });
            if !cell.complete(request_id, outcome) {
                tracing::debug!(request_id, "discarding result of superseded request");
            }
        });

        Some(request_id)
    }
}
