//! Domain primitives: UserId, AuctionId, VehicleId, Territory.

use serde::{Deserialize, Serialize};

/// Stable user identifier (e.g. "bidder01", "admin01").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    /// Create a UserId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    /// Get the id as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Auction lot identifier (e.g. "BANK-REPO-2024-100").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AuctionId(pub String);

impl AuctionId {
    /// Create an AuctionId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        AuctionId(id.into())
    }

    /// Get the id as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AuctionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vehicle asset identifier (e.g. "V-ASSET-500").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub String);

impl VehicleId {
    /// Create a VehicleId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        VehicleId(id.into())
    }

    /// Get the id as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An Indian state, used both as a vehicle's location and as a user's
/// bidding/viewing permission scope.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Territory(pub String);

impl Territory {
    /// Create a Territory from a string.
    pub fn new(name: impl Into<String>) -> Self {
        Territory(name.into())
    }

    /// Get the territory name as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Territory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Territories recognised by the portal.
pub const INDIAN_STATES: &[&str] = &[
    "Maharashtra",
    "Karnataka",
    "Delhi",
    "Gujarat",
    "Tamil Nadu",
    "Telangana",
    "Uttar Pradesh",
    "West Bengal",
    "Rajasthan",
    "Haryana",
    "Punjab",
    "Madhya Pradesh",
    "Bihar",
    "Odisha",
    "Kerala",
    "Assam",
    "Jharkhand",
    "Chhattisgarh",
    "Goa",
];
