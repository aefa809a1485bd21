//! Territory and tier eligibility rules.
//!
//! Pure functions of the user (and a lot's territory). Eligibility is a gate,
//! not part of a lifecycle transition: the presentation layer queries these
//! before rendering bid entry, and the lifecycle engine re-checks them at the
//! submission boundary so a stale client cannot bypass them.

use crate::domain::{Territory, User, UserRole};
use rust_decimal::Decimal;

/// Monthly turnover at or above which a bidder is classified high volume.
/// One shared threshold for the elite display badge and the admin attention
/// flag.
pub const HIGH_VOLUME_TURNOVER: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Three-month turnover at or above which a fourth bidding territory unlocks.
pub const EXPANSION_TURNOVER: Decimal = Decimal::from_parts(2_000_000, 0, 0, false, 0);

/// Fixed cap on viewing territories. No tier bonus.
pub const MAX_VIEWING_STATES: usize = 6;

/// Cap on bidding territories for this user: 4 with the expansion tier
/// (three-month turnover of 20 lakh or more, boundary inclusive), else 3.
pub fn max_bidding_states(user: &User) -> usize {
    if user.three_month_turnover_or_zero() >= EXPANSION_TURNOVER {
        4
    } else {
        3
    }
}

/// Whether the user may place bids on lots located in `state`.
pub fn can_bid_on_territory(user: &User, state: &Territory) -> bool {
    user.bidding_states.contains(state)
}

/// Whether lots located in `state` are visible to the user. Admins see
/// everything.
pub fn can_view_territory(user: &User, state: &Territory) -> bool {
    user.role == UserRole::Admin || user.viewing_states.contains(state)
}

/// Turnover-based high-volume classification. Purely presentational: it
/// drives the elite badge and flags submissions for admin attention, and
/// gates no lifecycle action.
pub fn is_high_volume(user: &User) -> bool {
    user.monthly_turnover_or_zero() >= HIGH_VOLUME_TURNOVER
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;

    fn user(role: UserRole) -> User {
        User {
            id: UserId::new("u1"),
            password: None,
            name: "U".to_string(),
            email: "u@example.com".to_string(),
            role,
            is_kyc_verified: true,
            state: Territory::new("Delhi"),
            district: "Central Delhi".to_string(),
            city: "New Delhi".to_string(),
            bidding_states: vec![Territory::new("Delhi")],
            viewing_states: vec![Territory::new("Delhi"), Territory::new("Haryana")],
            registration_expiry: None,
            is_blocked: false,
            activity_history: Vec::new(),
            monthly_turnover: None,
            three_month_turnover: None,
        }
    }

    #[test]
    fn test_max_bidding_states_boundary_inclusive() {
        let mut u = user(UserRole::Bidder);
        u.three_month_turnover = Some(Decimal::from(2_000_000));
        assert_eq!(max_bidding_states(&u), 4);

        u.three_month_turnover = Some(Decimal::from(1_999_999));
        assert_eq!(max_bidding_states(&u), 3);

        u.three_month_turnover = None;
        assert_eq!(max_bidding_states(&u), 3);
    }

    #[test]
    fn test_can_bid_on_territory_is_membership() {
        let u = user(UserRole::Bidder);
        assert!(can_bid_on_territory(&u, &Territory::new("Delhi")));
        assert!(!can_bid_on_territory(&u, &Territory::new("Haryana")));
    }

    #[test]
    fn test_admin_views_every_territory() {
        let admin = user(UserRole::Admin);
        assert!(can_view_territory(&admin, &Territory::new("Goa")));

        let bidder = user(UserRole::Bidder);
        assert!(can_view_territory(&bidder, &Territory::new("Haryana")));
        assert!(!can_view_territory(&bidder, &Territory::new("Goa")));
    }

    #[test]
    fn test_high_volume_threshold() {
        let mut u = user(UserRole::Bidder);
        u.monthly_turnover = Some(Decimal::from(1_000_000));
        assert!(is_high_volume(&u));

        u.monthly_turnover = Some(Decimal::from(999_999));
        assert!(!is_high_volume(&u));

        u.monthly_turnover = None;
        assert!(!is_high_volume(&u));
    }
}
