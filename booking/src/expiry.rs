//! Temporal expiry evaluation. A booking whose window has passed is
//! rewritten to `Expired` on the next load of any status-dependent view.

use abi::{Booking, BookingStatus};
use chrono::{DateTime, Utc};

/// Whether a booking must transition to `Expired`: its status is neither
/// `Cancelled` nor `Expired` and the wall clock is strictly past its end.
/// Idempotent by construction, an already-expired booking never matches.
pub fn should_expire(booking: &Booking, now: DateTime<Utc>) -> bool {
    !booking.status.is_terminal() && booking.end < now
}

/// Batch pass over a collection, rewriting every lapsed booking in place.
/// Returns how many records changed.
pub fn sweep(bookings: &mut [Booking], now: DateTime<Utc>) -> usize {
    let mut changed = 0;
    for booking in bookings.iter_mut() {
        if should_expire(booking, now) {
            booking.status = BookingStatus::Expired;
            changed += 1;
        }
    }
    changed
}
