use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Lifecycle status of a booking. `Visit` marks an informational/technical
/// visit; it is a first-class booking, not a separate entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Expired,
    Visit,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
        BookingStatus::Expired,
        BookingStatus::Visit,
    ];

    /// Cancelled and Expired never leave their state automatically. Only an
    /// explicit administrative edit can move a booking out of them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Expired)
    }

    pub fn is_visit(&self) -> bool {
        matches!(self, BookingStatus::Visit)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Expired => "expired",
            BookingStatus::Visit => "visit",
        };
        f.write_str(s)
    }
}

/// Whether the cession of the space is charged or free. A free booking
/// always carries a price of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingKind {
    Paid,
    Free,
}

/// Administrative approval annotation. Orthogonal to the lifecycle status:
/// it may change in any state and gates no transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Authorized,
    FreeCession,
    NotAuthorized,
    Dm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Overdue,
    Cancelled,
}

/// A reservation of a space for an event, tracked from request through
/// confirmation, cancellation or automatic expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub space_id: String,
    pub customer_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<DateTime<Utc>>,
    /// Internal staff member in charge, referenced by name only.
    pub responsible: String,
    pub event_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub situation_notes: Option<String>,
    pub status: BookingStatus,
    #[serde(rename = "type")]
    pub kind: BookingKind,
    #[serde(default)]
    pub approval_status: ApprovalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    pub price: f64,
    pub attendees: u32,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Create a pending booking request. The store assigns the id.
    pub fn new_pending(
        space_id: impl Into<String>,
        customer_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        responsible: impl Into<String>,
        event_name: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            space_id: space_id.into(),
            customer_id: customer_id.into(),
            start,
            end,
            setup: None,
            breakdown: None,
            responsible: responsible.into(),
            event_name: event_name.into(),
            description: None,
            situation_notes: None,
            status: BookingStatus::Pending,
            kind: BookingKind::Paid,
            approval_status: ApprovalStatus::Pending,
            contact_name: None,
            contact_email: None,
            price: 0.0,
            attendees: 0,
            created_at: Utc::now(),
        }
    }

    /// Create a technical/commercial visit. A visit is a booking whose
    /// status marks it as informational; it carries no charge.
    pub fn new_visit(
        space_id: impl Into<String>,
        customer_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        responsible: impl Into<String>,
    ) -> Self {
        let mut booking = Self::new_pending(space_id, customer_id, start, end, responsible, "Technical visit");
        booking.status = BookingStatus::Visit;
        booking.attendees = 1;
        booking
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.space_id.is_empty() {
            return Err(Error::MissingField("space_id"));
        }
        if self.customer_id.is_empty() {
            return Err(Error::MissingField("customer_id"));
        }
        if self.responsible.is_empty() {
            return Err(Error::MissingField("responsible"));
        }
        if self.event_name.is_empty() {
            return Err(Error::MissingField("event_name"));
        }
        if self.price.is_sign_negative() {
            return Err(Error::NegativePrice(self.price));
        }
        Ok(())
    }

    /// A free cession never carries a price, regardless of what the edit
    /// form submitted. Applied on every save.
    pub fn normalize(&mut self) {
        if self.kind == BookingKind::Free {
            self.price = 0.0;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactPerson {
    pub id: String,
    pub name: String,
    pub gdpr_consent: bool,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type.
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
}

/// A company or entity that books spaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    /// General contact address of the entity.
    pub email: String,
    #[serde(default)]
    pub contacts: Vec<ContactPerson>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Legacy single contact name, present only on pre-migration records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Legacy general phone, present only on pre-migration records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub status: EntityStatus,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            email: email.into(),
            contacts: Vec::new(),
            attachments: Vec::new(),
            company: None,
            phone: None,
            status: EntityStatus::Active,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.name.is_empty() {
            return Err(Error::MissingField("name"));
        }
        if self.email.is_empty() {
            return Err(Error::MissingField("email"));
        }
        Ok(())
    }

    /// Materialize the legacy single-contact fields into the contacts list.
    /// Runs when a pre-migration record is loaded for editing; a record that
    /// already has contacts is left untouched so the legacy contact is never
    /// duplicated. Returns whether a contact was materialized.
    pub fn migrate_legacy_contact(&mut self, contact_id: impl Into<String>) -> bool {
        if !self.contacts.is_empty() {
            return false;
        }
        let Some(name) = self.company.clone() else {
            return false;
        };
        self.contacts.push(ContactPerson {
            id: contact_id.into(),
            name,
            gdpr_consent: true,
            email: String::new(),
            phone: self.phone.clone().unwrap_or_default(),
        });
        true
    }
}

/// A physical venue belonging to the organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub map_link: String,
    pub capacity: u32,
    /// Free-text amenities ("projector, sound, AC").
    #[serde(default)]
    pub extras: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    /// Inactive spaces display as "under maintenance". Nothing in the write
    /// path excludes them from new bookings.
    pub active: bool,
}

impl Space {
    pub fn new(name: impl Into<String>, address: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            address: address.into(),
            map_link: String::new(),
            capacity,
            extras: String::new(),
            images: Vec::new(),
            description: String::new(),
            active: true,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.name.is_empty() {
            return Err(Error::MissingField("name"));
        }
        if self.address.is_empty() {
            return Err(Error::MissingField("address"));
        }
        if self.capacity < 1 {
            return Err(Error::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

/// Internal staff member ("responsible"). Bookings reference staff by name,
/// not by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Responsible {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Internal role label.
    pub role: String,
}

impl Responsible {
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.is_empty() {
            return Err(Error::MissingField("name"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub customer_id: String,
    pub plan_id: String,
    pub start: DateTime<Utc>,
    pub next_renewal: DateTime<Utc>,
    pub status: SubscriptionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub subscription_id: String,
    pub amount: f64,
    pub paid_at: DateTime<Utc>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn free_booking_normalize_should_zero_price() {
        let mut booking = Booking::new_pending(
            "1",
            "1",
            "2024-06-01T10:00:00Z".parse().unwrap(),
            "2024-06-01T12:00:00Z".parse().unwrap(),
            "Carlos Santos",
            "Workshop",
        );
        booking.kind = BookingKind::Free;
        booking.price = 250.0;
        booking.normalize();
        assert_eq!(booking.price, 0.0);

        booking.kind = BookingKind::Paid;
        booking.price = 250.0;
        booking.normalize();
        assert_eq!(booking.price, 250.0);
    }

    #[test]
    fn booking_validate_should_reject_missing_fields() {
        let booking = Booking::new_pending(
            "",
            "1",
            "2024-06-01T10:00:00Z".parse().unwrap(),
            "2024-06-01T12:00:00Z".parse().unwrap(),
            "Carlos Santos",
            "Workshop",
        );
        assert_eq!(booking.validate(), Err(Error::MissingField("space_id")));

        let mut booking = Booking::new_pending(
            "1",
            "1",
            "2024-06-01T10:00:00Z".parse().unwrap(),
            "2024-06-01T12:00:00Z".parse().unwrap(),
            "Carlos Santos",
            "Workshop",
        );
        booking.price = -1.0;
        assert_eq!(booking.validate(), Err(Error::NegativePrice(-1.0)));
    }

    #[test]
    fn legacy_contact_should_migrate_once() {
        let mut customer = Customer::new("Tech Solutions", "contact@tech.pt");
        customer.company = Some("Maria Silva".into());
        customer.phone = Some("+351 912 345 678".into());

        assert!(customer.migrate_legacy_contact("c1"));
        assert_eq!(customer.contacts.len(), 1);
        assert_eq!(customer.contacts[0].name, "Maria Silva");
        assert_eq!(customer.contacts[0].phone, "+351 912 345 678");

        // second pass is a no-op, the legacy contact is never duplicated
        assert!(!customer.migrate_legacy_contact("c2"));
        assert_eq!(customer.contacts.len(), 1);
    }

    #[test]
    fn space_validate_should_reject_zero_capacity() {
        let space = Space::new("Main Auditorium", "Largo Trindade Coelho, Lisboa", 0);
        assert_eq!(space.validate(), Err(Error::InvalidCapacity(0)));
    }

    #[test]
    fn booking_wire_shape_should_round_trip() {
        let booking = Booking::new_visit(
            "2",
            "1",
            "2024-03-05T09:00:00Z".parse().unwrap(),
            "2024-03-05T10:00:00Z".parse().unwrap(),
            "Ana Oliveira",
        );
        let yaml = serde_yaml::to_string(&booking).unwrap();
        assert!(yaml.contains("type: paid"));
        assert!(yaml.contains("status: visit"));
        let back: Booking = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, booking);
    }
}
