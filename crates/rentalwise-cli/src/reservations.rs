use anyhow::Context;
use clap::Subcommand;
use rentalwise_client::{retry_with_policy, VendorClient};
use rentalwise_core::{format_price, ReservationQuery, ReservationStatus, VendorReservation};

/// Sub-commands available under `reservation`.
#[derive(Debug, Subcommand)]
pub enum ReservationCommands {
    /// Show one reservation
    Get {
        /// Reservation id
        id: String,
    },
    /// Cancel a reservation
    Cancel {
        /// Reservation id
        id: String,
    },
    /// List reservations
    List {
        /// pending, confirmed, cancelled or completed
        #[arg(long)]
        status: Option<ReservationStatus>,
        /// Only stays checking in on this date (YYYY-MM-DD)
        #[arg(long)]
        check_in: Option<String>,
        /// Only stays checking out on this date (YYYY-MM-DD)
        #[arg(long)]
        check_out: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
}

/// The vendor may acknowledge a cancel without echoing the reservation.
pub(crate) fn cancel_summary(requested_id: &str, reservation: &VendorReservation) -> String {
    let id = if reservation.id.is_empty() {
        requested_id
    } else {
        reservation.id.as_str()
    };
    format!("reservation {id} is now {}", reservation.status)
}

pub(crate) async fn run(client: &VendorClient, command: ReservationCommands) -> anyhow::Result<()> {
    match command {
        ReservationCommands::Get { id } => {
            let reservation =
                retry_with_policy(&client.retry_policy(), || client.get_reservation(&id))
                    .await
                    .with_context(|| format!("failed to fetch reservation {id}"))?;
            crate::print_json(&reservation)
        }
        ReservationCommands::Cancel { id } => {
            // Not retried: a cancel whose response was lost may already have
            // been applied.
            let reservation = client
                .cancel_reservation(&id)
                .await
                .with_context(|| format!("failed to cancel reservation {id}"))?;
            println!("{}", cancel_summary(&id, &reservation));
            Ok(())
        }
        ReservationCommands::List {
            status,
            check_in,
            check_out,
            page,
            limit,
        } => {
            let query = ReservationQuery {
                status,
                check_in,
                check_out,
                page,
                limit,
            };
            let page = retry_with_policy(&client.retry_policy(), || {
                client.list_reservations(Some(&query))
            })
            .await
            .context("failed to list reservations")?;

            if page.data.is_empty() {
                println!("no reservations found");
                return Ok(());
            }
            let header = format!(
                "{:<14}{:<14}{:<12}{:<12}{:<11}{:>10}",
                "ID", "PROPERTY", "CHECK-IN", "CHECK-OUT", "STATUS", "TOTAL"
            );
            println!("{header}");
            for r in &page.data {
                println!(
                    "{:<14}{:<14}{:<12}{:<12}{:<11}{:>10}",
                    r.id,
                    r.property_id,
                    r.check_in,
                    r.check_out,
                    r.status.as_str(),
                    format_price(r.pricing.total, &r.pricing.currency)
                );
            }
            if let Some(meta) = page.meta {
                println!(
                    "page {} of {} ({} total)",
                    meta.page, meta.total_pages, meta.total
                );
            }
            Ok(())
        }
    }
}
