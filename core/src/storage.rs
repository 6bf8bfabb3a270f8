//! Persistence collaborator contract.

use crate::error::StorageError;
use crate::types::Booking;
use async_trait::async_trait;

/// Transactional persistence for completed bookings.
///
/// Implementations must write the booking record and all of its ticket
/// records as a single atomic unit: either every row commits or none do.
/// A failed save must not leave partial rows behind.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persist `booking` and its tickets atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the transaction could not complete; the
    /// store guarantees nothing was written in that case.
    async fn save(&self, booking: &Booking) -> Result<(), StorageError>;
}
