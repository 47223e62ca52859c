//! Availability guard - runs the matcher against the photographer's slots.

use std::sync::Arc;

use crate::domain::availability::{check_availability, AvailabilityDecision};
use crate::domain::foundation::{TimeRange, UserId};
use crate::domain::session::BookingError;
use crate::ports::AccountStore;

pub struct AvailabilityGuard {
    accounts: Arc<dyn AccountStore>,
}

impl AvailabilityGuard {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    /// Fails with `BookingError::Availability` carrying the matcher's reason.
    pub async fn check(&self, photographer_id: &UserId, range: &TimeRange) -> Result<(), BookingError> {
        let photographer = self
            .accounts
            .find_user(photographer_id)
            .await?
            .ok_or_else(|| BookingError::not_found("Photographer", photographer_id))?;

        match check_availability(&photographer.availability, range) {
            AvailabilityDecision::Accepted => Ok(()),
            AvailabilityDecision::Rejected(reason) => {
                tracing::info!(
                    photographer_id = %photographer_id,
                    reason = %reason,
                    "Booking rejected: outside availability"
                );
                Err(BookingError::Availability(reason))
            }
        }
    }
}
