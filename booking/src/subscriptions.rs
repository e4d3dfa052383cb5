//! Overdue evaluation for plan subscriptions, the same advisory batch
//! shape as the booking expiry sweep.

use abi::{Subscription, SubscriptionStatus};
use chrono::{DateTime, Utc};

/// An active subscription whose renewal date has passed is overdue.
/// Cancelled and already-overdue subscriptions are left alone.
pub fn subscription_overdue(sub: &Subscription, now: DateTime<Utc>) -> bool {
    sub.status == SubscriptionStatus::Active && sub.next_renewal < now
}

/// Batch pass flipping lapsed subscriptions to overdue in place. Returns
/// how many records changed.
pub fn mark_overdue(subs: &mut [Subscription], now: DateTime<Utc>) -> usize {
    let mut changed = 0;
    for sub in subs.iter_mut() {
        if subscription_overdue(sub, now) {
            sub.status = SubscriptionStatus::Overdue;
            changed += 1;
        }
    }
    changed
}
