use abi::{format_currency, Booking, BookingStatus, Config, Customer, Error, Space};
use booking::{
    day_agenda, month_grid, revenue_summary, BookingFilter, BookingManager, BookingStore,
    MonthCursor, MonthGrid, RecordCategory, SpaceSelection,
};
use chrono::{NaiveDate, Utc};

use crate::{BookingService, CalendarState, Dashboard, RevenueReport};

impl BookingService {
    pub fn new(manager: BookingManager) -> Self {
        Self {
            manager,
            config: Config::default(),
        }
    }

    pub fn with_config(manager: BookingManager, config: Config) -> Self {
        Self { manager, config }
    }

    pub fn manager(&self) -> &BookingManager {
        &self.manager
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Monetary display formatting with the configured currency symbol.
    pub fn format_price(&self, value: f64) -> String {
        format_currency(value, &self.config.display.currency)
    }

    /// Dashboard load: sweep expirations first so every count and calendar
    /// cell sees normalized statuses, then fetch the collections
    /// concurrently. The returned calendar state starts on today's month
    /// with every space in scope.
    pub async fn load_dashboard(&self) -> Result<Dashboard, Error> {
        self.manager.sweep_expirations().await?;
        let (bookings, spaces, responsibles, counts) = futures::try_join!(
            self.manager.list_bookings(),
            self.manager.list_spaces(),
            self.manager.list_responsibles(),
            self.manager.aggregate_counts(),
        )?;
        tracing::debug!(bookings = bookings.len(), "dashboard loaded");
        let calendar = CalendarState::new(Utc::now().date_naive(), &spaces);
        Ok(Dashboard {
            counts,
            bookings,
            spaces,
            responsibles,
            calendar,
        })
    }

    /// Full-history list: sweep, load, apply the compound filter, newest
    /// registration first.
    pub async fn load_records(&self, filter: &BookingFilter) -> Result<Vec<Booking>, Error> {
        self.manager.sweep_expirations().await?;
        let (bookings, customers) = futures::try_join!(
            self.manager.list_bookings(),
            self.manager.list_customers(),
        )?;
        let mut records = filter.apply(&bookings, &customers);
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Visit list: the same engine scoped to the visit category, with an
    /// optional text search.
    pub async fn load_visits(&self, search: &str) -> Result<Vec<Booking>, Error> {
        let filter = BookingFilter {
            text: (!search.is_empty()).then(|| search.to_string()),
            category: Some(RecordCategory::Visit),
            ..Default::default()
        };
        self.load_records(&filter).await
    }

    /// Financial view over the normalized collection: totals plus the
    /// confirmed detail table, most recent event first.
    pub async fn load_revenue(&self) -> Result<RevenueReport, Error> {
        self.manager.sweep_expirations().await?;
        let bookings = self.manager.list_bookings().await?;
        let summary = revenue_summary(&bookings);
        let mut confirmed: Vec<Booking> = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Confirmed)
            .cloned()
            .collect();
        confirmed.sort_by(|a, b| b.start.cmp(&a.start));
        let pending = bookings
            .into_iter()
            .filter(|b| b.status == BookingStatus::Pending)
            .collect();
        Ok(RevenueReport {
            summary,
            confirmed,
            pending,
        })
    }

    /// Customer list with the customer-specific search. Status-independent
    /// screen, so no expiry sweep here.
    pub async fn load_customers(&self, search: &str) -> Result<Vec<Customer>, Error> {
        let customers = self.manager.list_customers().await?;
        if search.is_empty() {
            return Ok(customers);
        }
        Ok(booking::customer_search(&customers, search))
    }

    /// Load a customer for the edit form, with legacy contact fields
    /// materialized into the contacts list.
    pub async fn edit_customer(&self, id: &str) -> Result<Customer, Error> {
        self.manager.edit_customer(id).await
    }
}

impl CalendarState {
    /// Initial state: today's month, today selected, every space in scope.
    pub fn new(today: NaiveDate, spaces: &[Space]) -> Self {
        Self {
            cursor: MonthCursor::from_date(today),
            selected_day: today,
            spaces: SpaceSelection::all(spaces),
        }
    }

    pub fn prev_month(&mut self) {
        self.cursor = self.cursor.prev();
    }

    pub fn next_month(&mut self) {
        self.cursor = self.cursor.next();
    }

    /// The "today" shortcut resets both the cursor and the selected day.
    pub fn jump_to_today(&mut self, today: NaiveDate) {
        self.cursor = MonthCursor::from_date(today);
        self.selected_day = today;
    }

    pub fn select_day(&mut self, date: NaiveDate) {
        self.selected_day = date;
    }

    pub fn toggle_space(&mut self, space_id: &str) {
        self.spaces.toggle(space_id);
    }

    pub fn toggle_all_spaces(&mut self, spaces: &[Space]) {
        self.spaces.toggle_all(spaces);
    }

    /// The month grid for the current cursor, scoped to the selection.
    pub fn grid(&self, bookings: &[Booking]) -> Result<MonthGrid, Error> {
        month_grid(bookings, &self.spaces, self.cursor.year, self.cursor.month0)
    }

    /// The agenda for the selected day, scoped to the selection.
    pub fn agenda(&self, bookings: &[Booking]) -> Vec<Booking> {
        day_agenda(bookings, &self.spaces, self.selected_day)
    }
}
