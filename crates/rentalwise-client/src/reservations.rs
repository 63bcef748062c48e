//! Reservation endpoints.

use reqwest::Method;
use rentalwise_core::{Page, ReservationDraft, ReservationQuery, ReservationUpdate, VendorReservation};

use crate::client::{RequestOptions, VendorClient};
use crate::error::VendorError;
use crate::params::QueryParams;

impl VendorClient {
    /// Creates a reservation.
    ///
    /// # Errors
    ///
    /// - [`VendorError::Http`] if the vendor rejects the booking or the request fails.
    /// - [`VendorError::Deserialize`] if the response is not a reservation.
    pub async fn create_reservation(
        &self,
        draft: &ReservationDraft,
    ) -> Result<VendorReservation, VendorError> {
        let options = RequestOptions::json(draft, "POST /reservations")?;
        self.request_typed(Method::POST, &["reservations"], &QueryParams::new(), options)
            .await
    }

    /// # Errors
    ///
    /// - [`VendorError::Http`] on non-2xx responses or network failure.
    /// - [`VendorError::Deserialize`] if the response is not a reservation.
    pub async fn get_reservation(
        &self,
        reservation_id: &str,
    ) -> Result<VendorReservation, VendorError> {
        self.request_typed(
            Method::GET,
            &["reservations", reservation_id],
            &QueryParams::new(),
            RequestOptions::default(),
        )
        .await
    }

    /// Patches a reservation with the fields present in `update`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_reservation`].
    pub async fn update_reservation(
        &self,
        reservation_id: &str,
        update: &ReservationUpdate,
    ) -> Result<VendorReservation, VendorError> {
        let options = RequestOptions::json(update, "PATCH /reservations")?;
        self.request_typed(
            Method::PATCH,
            &["reservations", reservation_id],
            &QueryParams::new(),
            options,
        )
        .await
    }

    /// Cancels a reservation. Whether cancellation is allowed from the
    /// reservation's current status is decided by the vendor.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_reservation`].
    pub async fn cancel_reservation(
        &self,
        reservation_id: &str,
    ) -> Result<VendorReservation, VendorError> {
        self.request_typed(
            Method::POST,
            &["reservations", reservation_id, "cancel"],
            &QueryParams::new(),
            RequestOptions::default(),
        )
        .await
    }

    /// Lists reservations, optionally filtered.
    ///
    /// # Errors
    ///
    /// - [`VendorError::Http`] on non-2xx responses or network failure.
    /// - [`VendorError::Deserialize`] if the body is not a `{data, meta}` page.
    pub async fn list_reservations(
        &self,
        query: Option<&ReservationQuery>,
    ) -> Result<Page<VendorReservation>, VendorError> {
        let params = match query {
            Some(q) => QueryParams::from_serialize(q)?,
            None => QueryParams::new(),
        };
        self.request_typed(
            Method::GET,
            &["reservations"],
            &params,
            RequestOptions::default(),
        )
        .await
    }
}
