//! Eligibility rules shared by both offer generations.
//!
//! A coupon (v2) and a promotion (v1) differ in wire shape but activate
//! under the same conditions, so the workflow filters both through one
//! trait seam instead of duplicating the window checks per generation.

use chrono::{DateTime, Utc};

use lidly_api::Validity;
use lidly_api::coupons::Coupon;
use lidly_api::promotions::Promotion;

/// An offer that can be activated: either API generation's view of a
/// discount with an activation flag and a validity window.
pub trait Activatable {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn is_activated(&self) -> bool;
    fn validity(&self) -> Validity;
}

impl Activatable for Coupon {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn is_activated(&self) -> bool {
        self.is_activated
    }

    fn validity(&self) -> Validity {
        self.validity()
    }
}

impl Activatable for Promotion {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn is_activated(&self) -> bool {
        self.is_activated
    }

    fn validity(&self) -> Validity {
        self.validity
    }
}

/// Whether `offer` should be activated at `now`.
///
/// An offer is eligible iff it is not already activated and `now` falls
/// inside its validity window, boundaries inclusive: reject only when
/// `now` is strictly before the start or strictly after the end.
pub fn is_eligible<T: Activatable>(offer: &T, now: DateTime<Utc>) -> bool {
    !offer.is_activated() && offer.validity().contains(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn coupon(is_activated: bool, start: DateTime<Utc>, end: DateTime<Utc>) -> Coupon {
        Coupon {
            id: "c-1".into(),
            title: "test coupon".into(),
            is_activated,
            start_validity_date: start,
            end_validity_date: end,
        }
    }

    #[test]
    fn active_window_is_eligible() {
        let now = Utc::now();
        let c = coupon(false, now - Duration::days(1), now + Duration::days(1));
        assert!(is_eligible(&c, now));
    }

    #[test]
    fn already_activated_is_never_eligible() {
        let now = Utc::now();
        let c = coupon(true, now - Duration::days(1), now + Duration::days(1));
        assert!(!is_eligible(&c, now));
    }

    #[test]
    fn window_starting_tomorrow_is_skipped() {
        let now = Utc::now();
        let c = coupon(false, now + Duration::days(1), now + Duration::days(7));
        assert!(!is_eligible(&c, now));
    }

    #[test]
    fn window_ended_yesterday_is_skipped() {
        let now = Utc::now();
        let c = coupon(false, now - Duration::days(7), now - Duration::days(1));
        assert!(!is_eligible(&c, now));
    }

    #[test]
    fn window_boundaries_are_inclusive() {
        let now = Utc::now();
        let starts_now = coupon(false, now, now + Duration::days(1));
        let ends_now = coupon(false, now - Duration::days(1), now);
        assert!(is_eligible(&starts_now, now));
        assert!(is_eligible(&ends_now, now));
    }

    #[test]
    fn promotion_uses_same_rules() {
        let now = Utc::now();
        let p = Promotion {
            id: "p-1".into(),
            title: "test promotion".into(),
            is_activated: false,
            validity: Validity {
                start: now - Duration::days(1),
                end: now + Duration::days(1),
            },
        };
        assert!(is_eligible(&p, now));
    }
}
