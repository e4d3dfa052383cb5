mod calendar;
mod expiry;
mod filter;
mod manager;
mod stats;
mod subscriptions;

pub use calendar::{day_agenda, month_grid, DayCell, MonthCursor, MonthGrid, SpaceSelection};
pub use expiry::{should_expire, sweep};
pub use filter::{customer_search, BookingFilter, BookingFilterBuilder, RecordCategory};
pub use stats::{
    responsible_counts, revenue_summary, status_counts, AggregateCounts, RevenueSummary,
};
pub use subscriptions::{mark_overdue, subscription_overdue};

use abi::{Booking, Customer, Error, Payment, Plan, Responsible, Space, Subscription};
use async_trait::async_trait;
use tokio::sync::RwLock;

pub type BookingId = String;
pub type CustomerId = String;
pub type SpaceId = String;

/// In-memory store satisfying [`BookingStore`]. Collections keep insertion
/// order behind a read-write lock, so list output is registration order.
#[derive(Debug, Default)]
pub struct BookingManager {
    state: RwLock<manager::StoreState>,
}

/// Persistence facade for bookings, customers, spaces and staff. Any
/// durable or in-memory store satisfies it; views only talk to this trait.
#[async_trait]
pub trait BookingStore {
    /// list every booking
    async fn list_bookings(&self) -> Result<Vec<Booking>, Error>;
    /// register a booking; the store assigns the next sequential id
    async fn create_booking(&self, booking: Booking) -> Result<Booking, Error>;
    /// replace a booking by id (the stored id wins)
    async fn update_booking(&self, id: &str, booking: Booking) -> Result<Booking, Error>;
    /// delete a booking by id
    async fn delete_booking(&self, id: &str) -> Result<(), Error>;
    /// rewrite every lapsed non-terminal booking to expired and persist the
    /// change; idempotent, safe to call redundantly
    async fn sweep_expirations(&self) -> Result<(), Error>;

    /// list every customer
    async fn list_customers(&self) -> Result<Vec<Customer>, Error>;
    /// register a customer
    async fn create_customer(&self, customer: Customer) -> Result<Customer, Error>;
    /// replace a customer by id; legacy contact fields are dropped once a
    /// contacts list exists
    async fn update_customer(&self, id: &str, customer: Customer) -> Result<Customer, Error>;
    /// delete a customer by id; bookings referencing it are not retracted
    async fn delete_customer(&self, id: &str) -> Result<(), Error>;

    /// list every space
    async fn list_spaces(&self) -> Result<Vec<Space>, Error>;
    /// register a space
    async fn create_space(&self, space: Space) -> Result<Space, Error>;
    /// replace a space by id
    async fn update_space(&self, id: &str, space: Space) -> Result<Space, Error>;
    /// delete a space by id; bookings referencing it are not retracted
    async fn delete_space(&self, id: &str) -> Result<(), Error>;

    /// list internal staff
    async fn list_responsibles(&self) -> Result<Vec<Responsible>, Error>;
    /// register a staff member
    async fn create_responsible(&self, responsible: Responsible) -> Result<Responsible, Error>;
    /// replace a staff member by id
    async fn update_responsible(
        &self,
        id: &str,
        responsible: Responsible,
    ) -> Result<Responsible, Error>;
    /// delete a staff member by id; bookings keep referencing the name
    async fn delete_responsible(&self, id: &str) -> Result<(), Error>;

    /// list every plan
    async fn list_plans(&self) -> Result<Vec<Plan>, Error>;
    /// register a plan
    async fn create_plan(&self, plan: Plan) -> Result<Plan, Error>;
    /// replace a plan by id
    async fn update_plan(&self, id: &str, plan: Plan) -> Result<Plan, Error>;
    /// delete a plan by id
    async fn delete_plan(&self, id: &str) -> Result<(), Error>;

    /// list every subscription
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>, Error>;
    /// register a subscription
    async fn create_subscription(&self, sub: Subscription) -> Result<Subscription, Error>;
    /// replace a subscription by id
    async fn update_subscription(&self, id: &str, sub: Subscription) -> Result<Subscription, Error>;
    /// delete a subscription by id
    async fn delete_subscription(&self, id: &str) -> Result<(), Error>;
    /// flip active subscriptions whose renewal lapsed to overdue; idempotent
    async fn mark_overdue_subscriptions(&self) -> Result<(), Error>;

    /// list every payment
    async fn list_payments(&self) -> Result<Vec<Payment>, Error>;
    /// record a payment
    async fn create_payment(&self, payment: Payment) -> Result<Payment, Error>;

    /// entity totals plus per-status and per-staff booking counts
    async fn aggregate_counts(&self) -> Result<AggregateCounts, Error>;
}
