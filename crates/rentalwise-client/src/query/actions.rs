//! Imperative actions: property search and reservation mutations.
//!
//! Unlike queries, actions run on the caller's task. They record their
//! progress in an observable state and also hand the result back, errors
//! included.

use std::sync::Arc;

use rentalwise_core::{
    CanonicalProperty, ReservationDraft, ReservationUpdate, SearchParams, VendorReservation,
};
use tokio::sync::watch;

use super::state::{QueryCell, QueryState};
use crate::client::VendorClient;
use crate::error::VendorError;
use crate::normalize::normalize_list;

/// Runs `request` under a fresh request id and records its outcome.
async fn tracked<T, Fut>(
    cell: &QueryCell<T>,
    fallback: &str,
    request: Fut,
) -> Result<T, VendorError>
where
    T: Clone,
    Fut: std::future::Future<Output = Result<T, VendorError>>,
{
    let request_id = cell.begin();
    let result = request.await;
    let outcome = match &result {
        Ok(data) => Ok(data.clone()),
        Err(err) => {
            tracing::warn!(request_id, status = err.status(), error = %err, "{fallback}");
            Err(err.display_message(fallback))
        }
    };
    if !cell.complete(request_id, outcome) {
        tracing::debug!(request_id, "discarding result of superseded action");
    }
    result
}

/// On-demand property search with normalized results.
pub struct PropertySearch {
    client: Arc<VendorClient>,
    cell: QueryCell<Vec<CanonicalProperty>>,
}

impl PropertySearch {
    #[must_use]
    pub fn new(client: Arc<VendorClient>) -> Self {
        Self {
            client,
            cell: QueryCell::new(),
        }
    }

    /// Searches and returns the normalized results. A newer search started
    /// before this one finishes takes over the state.
    ///
    /// # Errors
    ///
    /// Returns the client's [`VendorError`] after recording its message.
    pub async fn search(
        &self,
        params: &SearchParams,
    ) -> Result<Vec<CanonicalProperty>, VendorError> {
        tracked(&self.cell, "Failed to search properties", async {
            let payload = self.client.search_properties(params).await?;
            Ok::<_, VendorError>(normalize_list(&payload))
        })
        .await
    }

    /// Clears results and error.
    pub fn reset(&self) {
        self.cell.reset();
    }

    #[must_use]
    pub fn state(&self) -> QueryState<Vec<CanonicalProperty>> {
        self.cell.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QueryState<Vec<CanonicalProperty>>> {
        self.cell.subscribe()
    }
}

/// Reservation create/update/cancel with observable progress.
pub struct ReservationActions {
    client: Arc<VendorClient>,
    cell: QueryCell<VendorReservation>,
}

impl ReservationActions {
    #[must_use]
    pub fn new(client: Arc<VendorClient>) -> Self {
        Self {
            client,
            cell: QueryCell::new(),
        }
    }

    /// # Errors
    ///
    /// Returns the client's [`VendorError`] after recording its message.
    pub async fn create(&self, draft: &ReservationDraft) -> Result<VendorReservation, VendorError> {
        tracked(
            &self.cell,
            "Failed to create reservation",
            self.client.create_reservation(draft),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns the client's [`VendorError`] after recording its message.
    pub async fn update(
        &self,
        reservation_id: &str,
        update: &ReservationUpdate,
    ) -> Result<VendorReservation, VendorError> {
        tracked(
            &self.cell,
            "Failed to update reservation",
            self.client.update_reservation(reservation_id, update),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns the client's [`VendorError`] after recording its message.
    pub async fn cancel(&self, reservation_id: &str) -> Result<VendorReservation, VendorError> {
        tracked(
            &self.cell,
            "Failed to cancel reservation",
            self.client.cancel_reservation(reservation_id),
        )
        .await
    }

    #[must_use]
    pub fn state(&self) -> QueryState<VendorReservation> {
        self.cell.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QueryState<VendorReservation>> {
        self.cell.subscribe()
    }
}
