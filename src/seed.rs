//! Deterministic mock data generators.
//!
//! There is no real backend; the portal boots from a generated registry of
//! one admin, fifty bidders with diverse turnovers, and forty lots split
//! across live, upcoming, and closed status.

use crate::domain::{
    ActivityDraft, ActivityType, Auction, AuctionId, AuctionStatus, PaymentTrack, SalePhase,
    Territory, User, UserId, UserRole, Vehicle, VehicleId,
};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;

const STATES: &[&str] = &[
    "Maharashtra",
    "Karnataka",
    "Delhi",
    "Gujarat",
    "Tamil Nadu",
    "Telangana",
    "West Bengal",
    "Uttar Pradesh",
    "Rajasthan",
    "Haryana",
];

const CITIES: &[&str] = &[
    "Mumbai",
    "Bangalore",
    "New Delhi",
    "Ahmedabad",
    "Chennai",
    "Hyderabad",
    "Kolkata",
    "Lucknow",
    "Jaipur",
    "Gurugram",
];

const BANKS: &[&str] = &[
    "HDFC Bank",
    "ICICI Bank",
    "SBI",
    "Axis Bank",
    "Kotak Bank",
    "BOB",
    "PNB",
    "Canara Bank",
    "Union Bank",
    "IDFC First",
];

const VEHICLE_DATA: &[(&str, &str, &str)] = &[
    ("Mahindra", "Thar 4x4", "Diesel"),
    ("Tata", "Safari Dark", "Diesel"),
    ("Maruti", "Swift ZXi", "Petrol"),
    ("Hyundai", "Creta SX", "Petrol"),
    ("Toyota", "Fortuner", "Diesel"),
    ("Mahindra", "XUV700", "Petrol"),
    ("Tata", "Nexon EV", "Electric"),
    ("MG", "Hector", "Petrol"),
    ("Kia", "Seltos", "Diesel"),
    ("Skoda", "Slavia", "Petrol"),
];

/// The full user registry: admin first, then fifty bidders.
pub fn seed_users() -> Vec<User> {
    let mut users = vec![seed_admin()];
    users.extend(seed_bidders());
    users
}

pub fn seed_admin() -> User {
    User {
        id: UserId::new("admin01"),
        password: Some("admin".to_string()),
        name: "Sandeep Khurana".to_string(),
        email: "admin@auctionfloor.example".to_string(),
        role: UserRole::Admin,
        is_kyc_verified: true,
        state: Territory::new("Delhi"),
        district: "Central Delhi".to_string(),
        city: "New Delhi".to_string(),
        bidding_states: Vec::new(),
        viewing_states: Vec::new(),
        registration_expiry: "2099-12-31T23:59:59Z".parse().ok(),
        is_blocked: false,
        activity_history: vec![
            ActivityDraft::new(ActivityType::Login, "Admin session started").seal(),
        ],
        monthly_turnover: None,
        three_month_turnover: None,
    }
}

/// Fifty bidders with turnovers stepping by 1.5 lakh: every fifth is not
/// KYC-verified, the last is blocked.
pub fn seed_bidders() -> Vec<User> {
    (0..50)
        .map(|i| {
            let turnover = Decimal::from(i as i64 * 150_000);
            let tier = if turnover >= Decimal::from(1_000_000) {
                "Elite"
            } else {
                "Standard"
            };
            let id = format!("bidder{:02}", i + 1);
            let home = Territory::new(STATES[i % STATES.len()]);

            User {
                id: UserId::new(&id),
                password: Some("pass".to_string()),
                name: format!("User {} ({})", i + 1, tier),
                email: format!("{}@auctionfloor.example", id),
                role: UserRole::Bidder,
                is_kyc_verified: i % 5 != 0,
                state: home.clone(),
                district: CITIES[i % CITIES.len()].to_string(),
                city: CITIES[i % CITIES.len()].to_string(),
                bidding_states: vec![home.clone()],
                viewing_states: vec![
                    home,
                    Territory::new(STATES[(i + 1) % STATES.len()]),
                ],
                registration_expiry: "2026-12-31T23:59:59Z".parse().ok(),
                is_blocked: i == 49,
                activity_history: Vec::new(),
                monthly_turnover: Some(turnover),
                three_month_turnover: Some(turnover * Decimal::from(3)),
            }
        })
        .collect()
}

/// Forty lots: the first fifteen live, the next fifteen upcoming, the last
/// ten closed with historical winners and untracked settlement.
pub fn seed_auctions() -> Vec<Auction> {
    let now = Utc::now();

    (0..40)
        .map(|i| {
            let (make, model, fuel) = VEHICLE_DATA[i % VEHICLE_DATA.len()];
            let is_live = i < 15;
            let is_upcoming = (15..30).contains(&i);

            let status = if is_live {
                AuctionStatus::Live
            } else if is_upcoming {
                AuctionStatus::Upcoming
            } else {
                AuctionStatus::Closed
            };

            let (start_offset, end_offset) = if is_live {
                (Duration::hours(-1), Duration::hours(2))
            } else if is_upcoming {
                (Duration::hours(24), Duration::hours(26))
            } else {
                (Duration::days(-7), Duration::days(-5))
            };

            let base_price = Decimal::from(450_000 + i as i64 * 20_000);
            let premium = if is_live {
                Decimal::from(65_000)
            } else if status == AuctionStatus::Closed {
                Decimal::from(180_000)
            } else {
                Decimal::ZERO
            };

            let phase = if status == AuctionStatus::Closed {
                SalePhase::Awarded {
                    winner_id: UserId::new(format!("bidder{:02}", (i % 50) + 1)),
                    payment: PaymentTrack::Untracked,
                }
            } else {
                SalePhase::Open
            };

            Auction {
                id: AuctionId::new(format!("BANK-REPO-2024-{}", 100 + i)),
                vehicle: Vehicle {
                    id: VehicleId::new(format!("V-ASSET-{}", 500 + i)),
                    make: make.to_string(),
                    model: model.to_string(),
                    year: 2018 + (i as i32 % 6),
                    vin: format!("IN{}{:04}99X", make.chars().next().unwrap_or('R'), 500 + i),
                    fuel_type: fuel.to_string(),
                    kms: 12_000 + (i as u32 * 4_800),
                    state: Territory::new(STATES[i % STATES.len()]),
                    images: Vec::new(),
                    bank_name: Some(BANKS[i % BANKS.len()].to_string()),
                    is_accidental: Some(i % 10 == 0),
                    rc_available: Some(i % 7 != 0),
                },
                start_time: now + start_offset,
                end_time: now + end_offset,
                base_price,
                current_bid: base_price + premium,
                bid_increment: Decimal::from(5_000),
                status,
                bids_count: if is_live {
                    8 + i as u32
                } else if status == AuctionStatus::Closed {
                    25
                } else {
                    0
                },
                phase,
            }
        })
        .collect()
}
