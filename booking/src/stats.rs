//! KPI and financial reduction over a booking collection. Callers are
//! expected to run the expiry sweep first so a lapsed booking is never
//! counted under its stale status.

use std::collections::HashMap;

use abi::{Booking, BookingStatus};
use serde::Serialize;

/// Bookings per lifecycle status. Always carries all five statuses,
/// zero-filled when absent from the collection.
pub fn status_counts(bookings: &[Booking]) -> HashMap<BookingStatus, usize> {
    let mut counts: HashMap<BookingStatus, usize> =
        BookingStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for booking in bookings {
        *counts.entry(booking.status).or_insert(0) += 1;
    }
    counts
}

/// Bookings per responsible, keyed by the raw name string. No
/// normalization: differing casing or whitespace buckets separately, and
/// bookings with an empty name are skipped.
pub fn responsible_counts(bookings: &[Booking]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for booking in bookings {
        if booking.responsible.is_empty() {
            continue;
        }
        *counts.entry(booking.responsible.clone()).or_insert(0) += 1;
    }
    counts
}

/// Monetary totals split by lifecycle status: confirmed revenue is
/// guaranteed, pending revenue is potential. Free bookings already carry a
/// zero price, so they contribute nothing without special-casing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RevenueSummary {
    pub confirmed_total: f64,
    pub confirmed_count: usize,
    pub pending_total: f64,
    pub pending_count: usize,
}

pub fn revenue_summary(bookings: &[Booking]) -> RevenueSummary {
    let mut summary = RevenueSummary::default();
    for booking in bookings {
        match booking.status {
            BookingStatus::Confirmed => {
                summary.confirmed_total += booking.price;
                summary.confirmed_count += 1;
            }
            BookingStatus::Pending => {
                summary.pending_total += booking.price;
                summary.pending_count += 1;
            }
            _ => {}
        }
    }
    summary
}

/// Entity totals plus the per-status and per-staff booking breakdowns, the
/// dashboard's headline numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateCounts {
    pub customer_count: usize,
    pub space_count: usize,
    pub responsible_count: usize,
    pub booking_count: usize,
    pub per_status: HashMap<BookingStatus, usize>,
    pub per_responsible: HashMap<String, usize>,
}

#[cfg(test)]
mod test {
    use super::*;

    fn make_booking(status: BookingStatus, responsible: &str, price: f64) -> Booking {
        let mut booking = Booking::new_pending(
            "1",
            "1",
            "2024-06-01T10:00:00Z".parse().unwrap(),
            "2024-06-01T12:00:00Z".parse().unwrap(),
            responsible,
            "Workshop",
        );
        booking.status = status;
        booking.price = price;
        booking
    }

    #[test]
    fn status_counts_should_zero_fill_all_statuses() {
        let counts = status_counts(&[]);
        assert_eq!(counts.len(), 5);
        assert!(counts.values().all(|&c| c == 0));

        let bookings = vec![
            make_booking(BookingStatus::Confirmed, "Carlos Santos", 0.0),
            make_booking(BookingStatus::Confirmed, "Carlos Santos", 0.0),
            make_booking(BookingStatus::Visit, "Ana Oliveira", 0.0),
        ];
        let counts = status_counts(&bookings);
        assert_eq!(counts[&BookingStatus::Confirmed], 2);
        assert_eq!(counts[&BookingStatus::Visit], 1);
        assert_eq!(counts[&BookingStatus::Pending], 0);
        assert_eq!(counts.values().sum::<usize>(), bookings.len());
    }

    #[test]
    fn responsible_counts_should_keep_raw_names() {
        let bookings = vec![
            make_booking(BookingStatus::Pending, "Carlos Santos", 0.0),
            make_booking(BookingStatus::Pending, "carlos santos", 0.0),
            make_booking(BookingStatus::Pending, "Carlos Santos", 0.0),
            make_booking(BookingStatus::Pending, "", 0.0),
        ];
        let counts = responsible_counts(&bookings);
        // differing casing buckets separately, empty names are skipped
        assert_eq!(counts["Carlos Santos"], 2);
        assert_eq!(counts["carlos santos"], 1);
        assert_eq!(counts.values().sum::<usize>(), 3);
    }

    #[test]
    fn revenue_should_split_confirmed_and_pending() {
        let bookings = vec![
            make_booking(BookingStatus::Confirmed, "Carlos Santos", 100.0),
            make_booking(BookingStatus::Confirmed, "Carlos Santos", 50.50),
            make_booking(BookingStatus::Pending, "Carlos Santos", 999.0),
            make_booking(BookingStatus::Cancelled, "Carlos Santos", 400.0),
        ];
        let summary = revenue_summary(&bookings);
        assert_eq!(summary.confirmed_total, 150.50);
        assert_eq!(summary.confirmed_count, 2);
        assert_eq!(summary.pending_total, 999.0);
        assert_eq!(summary.pending_count, 1);
    }
}
