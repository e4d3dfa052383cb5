//! Compound filtering shared by the list views. Every dimension defaults
//! to match-everything and the dimensions combine with logical AND, so the
//! same filter type serves the full-history, booking and visit screens.

use abi::{day_end, day_start, Booking, BookingStatus, Customer};
use chrono::NaiveDate;
use derive_builder::Builder;

/// Coarse record category: a visit is a booking whose status marks it as
/// one; everything else is a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordCategory {
    Process,
    Visit,
}

#[derive(Debug, Clone, Default, PartialEq, Builder)]
#[builder(default)]
pub struct BookingFilter {
    /// Case-insensitive substring over event name, customer name and
    /// responsible name.
    #[builder(setter(into, strip_option))]
    pub text: Option<String>,
    #[builder(setter(strip_option))]
    pub category: Option<RecordCategory>,
    #[builder(setter(strip_option))]
    pub status: Option<BookingStatus>,
    #[builder(setter(into, strip_option))]
    pub space_id: Option<String>,
    /// Bookings starting on or after this day (from 00:00:00).
    #[builder(setter(strip_option))]
    pub start_from: Option<NaiveDate>,
    /// Bookings starting on or before this day (whole day included, up to
    /// 23:59:59.999).
    #[builder(setter(strip_option))]
    pub start_until: Option<NaiveDate>,
}

impl BookingFilter {
    /// Reset every dimension to its match-everything default in one step.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a booking passes every set dimension. `customer_name` is the
    /// resolved display name of the booking's customer, empty when the join
    /// target is missing.
    pub fn matches(&self, booking: &Booking, customer_name: &str) -> bool {
        if let Some(text) = &self.text {
            let haystack = format!(
                "{} {} {}",
                booking.event_name, customer_name, booking.responsible
            )
            .to_lowercase();
            if !haystack.contains(&text.to_lowercase()) {
                return false;
            }
        }

        if let Some(category) = self.category {
            let matches_category = match category {
                RecordCategory::Visit => booking.status.is_visit(),
                RecordCategory::Process => !booking.status.is_visit(),
            };
            if !matches_category {
                return false;
            }
        }

        if let Some(status) = self.status {
            if booking.status != status {
                return false;
            }
        }

        if let Some(space_id) = &self.space_id {
            if &booking.space_id != space_id {
                return false;
            }
        }

        if let Some(from) = self.start_from {
            if booking.start < day_start(from) {
                return false;
            }
        }

        if let Some(until) = self.start_until {
            if booking.start > day_end(until) {
                return false;
            }
        }

        true
    }

    /// Filter a collection, resolving customer names from `customers`.
    pub fn apply(&self, bookings: &[Booking], customers: &[Customer]) -> Vec<Booking> {
        bookings
            .iter()
            .filter(|b| {
                let customer_name = customers
                    .iter()
                    .find(|c| c.id == b.customer_id)
                    .map(|c| c.name.as_str())
                    .unwrap_or("");
                self.matches(b, customer_name)
            })
            .cloned()
            .collect()
    }
}

/// Customer list search: case-insensitive substring over the entity name,
/// general email, contact-person names and the legacy company field.
pub fn customer_search(customers: &[Customer], term: &str) -> Vec<Customer> {
    let term = term.to_lowercase();
    customers
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&term)
                || c.email.to_lowercase().contains(&term)
                || c.contacts
                    .iter()
                    .any(|p| p.name.to_lowercase().contains(&term))
                || c.company
                    .as_ref()
                    .map(|company| company.to_lowercase().contains(&term))
                    .unwrap_or(false)
        })
        .cloned()
        .collect()
}
