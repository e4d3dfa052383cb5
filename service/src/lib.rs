mod service;

use abi::{Booking, Config, Responsible, Space};
use booking::{AggregateCounts, BookingManager, MonthCursor, RevenueSummary, SpaceSelection};
use chrono::NaiveDate;

/// Application façade the screens talk to. Owns the store and composes,
/// per view, the expiry sweep, the concurrent loads and the aggregation.
pub struct BookingService {
    manager: BookingManager,
    config: Config,
}

/// Mutable calendar view state: month cursor, selected day and the set of
/// spaces in scope. Owned here, in the controller layer, and passed into
/// the pure aggregation functions as plain parameters.
#[derive(Debug, Clone)]
pub struct CalendarState {
    pub cursor: MonthCursor,
    pub selected_day: NaiveDate,
    pub spaces: SpaceSelection,
}

/// Everything the dashboard renders: headline counts, the normalized
/// booking collection and the join targets for name resolution.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub counts: AggregateCounts,
    pub bookings: Vec<Booking>,
    pub spaces: Vec<Space>,
    pub responsibles: Vec<Responsible>,
    pub calendar: CalendarState,
}

/// Financial view: confirmed revenue is guaranteed, pending is potential.
#[derive(Debug, Clone)]
pub struct RevenueReport {
    pub summary: RevenueSummary,
    /// Confirmed bookings, most recent event first.
    pub confirmed: Vec<Booking>,
    pub pending: Vec<Booking>,
}
