use abi::{Booking, Customer, Error, Payment, Plan, Responsible, Space, Subscription};
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;

use crate::{expiry, stats, subscriptions, AggregateCounts, BookingManager, BookingStore};

#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub(crate) bookings: Vec<Booking>,
    pub(crate) customers: Vec<Customer>,
    pub(crate) spaces: Vec<Space>,
    pub(crate) responsibles: Vec<Responsible>,
    pub(crate) plans: Vec<Plan>,
    pub(crate) subscriptions: Vec<Subscription>,
    pub(crate) payments: Vec<Payment>,
}

/// Booking ids are monotonically increasing decimal strings: one past the
/// numeric maximum already in the collection, or "1" when nothing parses.
fn next_booking_id(bookings: &[Booking]) -> String {
    let max = bookings
        .iter()
        .filter_map(|b| b.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

/// Every other entity gets a random 9-character base-36 id.
fn random_id() -> String {
    const CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..9)
        .map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char)
        .collect()
}

impl BookingManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a customer for editing. Pre-migration records get their legacy
    /// single-contact fields materialized into the contacts list; the
    /// normalized copy is in-memory only until the edit is saved.
    pub async fn edit_customer(&self, id: &str) -> Result<Customer, Error> {
        let state = self.state.read().await;
        let mut customer = state
            .customers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(Error::NotFound)?;
        if customer.migrate_legacy_contact(random_id()) {
            tracing::debug!(id, "materialized legacy contact for editing");
        }
        Ok(customer)
    }
}

#[async_trait]
impl BookingStore for BookingManager {
    async fn list_bookings(&self) -> Result<Vec<Booking>, Error> {
        Ok(self.state.read().await.bookings.clone())
    }

    async fn create_booking(&self, mut booking: Booking) -> Result<Booking, Error> {
        booking.validate()?;
        booking.normalize();
        let mut state = self.state.write().await;
        booking.id = next_booking_id(&state.bookings);
        tracing::debug!(id = %booking.id, event = %booking.event_name, "registered booking");
        state.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn update_booking(&self, id: &str, mut booking: Booking) -> Result<Booking, Error> {
        booking.validate()?;
        booking.normalize();
        let mut state = self.state.write().await;
        let slot = state
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(Error::NotFound)?;
        booking.id = slot.id.clone();
        *slot = booking.clone();
        Ok(booking)
    }

    async fn delete_booking(&self, id: &str) -> Result<(), Error> {
        let mut state = self.state.write().await;
        let index = state
            .bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or(Error::NotFound)?;
        state.bookings.remove(index);
        Ok(())
    }

    async fn sweep_expirations(&self) -> Result<(), Error> {
        let mut state = self.state.write().await;
        let changed = expiry::sweep(&mut state.bookings, Utc::now());
        if changed > 0 {
            tracing::info!(changed, "expiry sweep rewrote lapsed bookings");
        }
        Ok(())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, Error> {
        Ok(self.state.read().await.customers.clone())
    }

    async fn create_customer(&self, mut customer: Customer) -> Result<Customer, Error> {
        customer.validate()?;
        let mut state = self.state.write().await;
        customer.id = random_id();
        state.customers.push(customer.clone());
        Ok(customer)
    }

    async fn update_customer(&self, id: &str, mut customer: Customer) -> Result<Customer, Error> {
        customer.validate()?;
        // once a contacts list exists the legacy fields never come back
        if !customer.contacts.is_empty() {
            customer.company = None;
            customer.phone = None;
        }
        let mut state = self.state.write().await;
        let slot = state
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(Error::NotFound)?;
        customer.id = slot.id.clone();
        *slot = customer.clone();
        Ok(customer)
    }

    async fn delete_customer(&self, id: &str) -> Result<(), Error> {
        let mut state = self.state.write().await;
        let index = state
            .customers
            .iter()
            .position(|c| c.id == id)
            .ok_or(Error::NotFound)?;
        // no cascade: bookings keep their customer_id and views render the
        // missing join target as unknown
        state.customers.remove(index);
        Ok(())
    }

    async fn list_spaces(&self) -> Result<Vec<Space>, Error> {
        Ok(self.state.read().await.spaces.clone())
    }

    async fn create_space(&self, mut space: Space) -> Result<Space, Error> {
        space.validate()?;
        let mut state = self.state.write().await;
        space.id = random_id();
        state.spaces.push(space.clone());
        Ok(space)
    }

    async fn update_space(&self, id: &str, mut space: Space) -> Result<Space, Error> {
        space.validate()?;
        let mut state = self.state.write().await;
        let slot = state
            .spaces
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(Error::NotFound)?;
        space.id = slot.id.clone();
        *slot = space.clone();
        Ok(space)
    }

    async fn delete_space(&self, id: &str) -> Result<(), Error> {
        let mut state = self.state.write().await;
        let index = state
            .spaces
            .iter()
            .position(|s| s.id == id)
            .ok_or(Error::NotFound)?;
        state.spaces.remove(index);
        Ok(())
    }

    async fn list_responsibles(&self) -> Result<Vec<Responsible>, Error> {
        Ok(self.state.read().await.responsibles.clone())
    }

    async fn create_responsible(&self, mut responsible: Responsible) -> Result<Responsible, Error> {
        responsible.validate()?;
        let mut state = self.state.write().await;
        responsible.id = random_id();
        state.responsibles.push(responsible.clone());
        Ok(responsible)
    }

    async fn update_responsible(
        &self,
        id: &str,
        mut responsible: Responsible,
    ) -> Result<Responsible, Error> {
        responsible.validate()?;
        let mut state = self.state.write().await;
        let slot = state
            .responsibles
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(Error::NotFound)?;
        responsible.id = slot.id.clone();
        *slot = responsible.clone();
        Ok(responsible)
    }

    async fn delete_responsible(&self, id: &str) -> Result<(), Error> {
        let mut state = self.state.write().await;
        let index = state
            .responsibles
            .iter()
            .position(|r| r.id == id)
            .ok_or(Error::NotFound)?;
        state.responsibles.remove(index);
        Ok(())
    }

    async fn list_plans(&self) -> Result<Vec<Plan>, Error> {
        Ok(self.state.read().await.plans.clone())
    }

    async fn create_plan(&self, mut plan: Plan) -> Result<Plan, Error> {
        let mut state = self.state.write().await;
        plan.id = random_id();
        state.plans.push(plan.clone());
        Ok(plan)
    }

    async fn update_plan(&self, id: &str, mut plan: Plan) -> Result<Plan, Error> {
        let mut state = self.state.write().await;
        let slot = state
            .plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(Error::NotFound)?;
        plan.id = slot.id.clone();
        *slot = plan.clone();
        Ok(plan)
    }

    async fn delete_plan(&self, id: &str) -> Result<(), Error> {
        let mut state = self.state.write().await;
        let index = state
            .plans
            .iter()
            .position(|p| p.id == id)
            .ok_or(Error::NotFound)?;
        state.plans.remove(index);
        Ok(())
    }

    async fn list_subscriptions(&self) -> Result<Vec<Subscription>, Error> {
        Ok(self.state.read().await.subscriptions.clone())
    }

    async fn create_subscription(&self, mut sub: Subscription) -> Result<Subscription, Error> {
        let mut state = self.state.write().await;
        sub.id = random_id();
        state.subscriptions.push(sub.clone());
        Ok(sub)
    }

    async fn update_subscription(&self, id: &str, mut sub: Subscription) -> Result<Subscription, Error> {
        let mut state = self.state.write().await;
        let slot = state
            .subscriptions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(Error::NotFound)?;
        sub.id = slot.id.clone();
        *slot = sub.clone();
        Ok(sub)
    }

    async fn delete_subscription(&self, id: &str) -> Result<(), Error> {
        let mut state = self.state.write().await;
        let index = state
            .subscriptions
            .iter()
            .position(|s| s.id == id)
            .ok_or(Error::NotFound)?;
        state.subscriptions.remove(index);
        Ok(())
    }

    async fn mark_overdue_subscriptions(&self) -> Result<(), Error> {
        let mut state = self.state.write().await;
        let changed = subscriptions::mark_overdue(&mut state.subscriptions, Utc::now());
        if changed > 0 {
            tracing::info!(changed, "marked lapsed subscriptions overdue");
        }
        Ok(())
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, Error> {
        Ok(self.state.read().await.payments.clone())
    }

    async fn create_payment(&self, mut payment: Payment) -> Result<Payment, Error> {
        let mut state = self.state.write().await;
        payment.id = random_id();
        state.payments.push(payment.clone());
        Ok(payment)
    }

    async fn aggregate_counts(&self) -> Result<AggregateCounts, Error> {
        let state = self.state.read().await;
        Ok(AggregateCounts {
            customer_count: state.customers.len(),
            space_count: state.spaces.len(),
            responsible_count: state.responsibles.len(),
            booking_count: state.bookings.len(),
            per_status: stats::status_counts(&state.bookings),
            per_responsible: stats::responsible_counts(&state.bookings),
        })
    }
}
