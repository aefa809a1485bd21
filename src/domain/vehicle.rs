//! Repossessed vehicle asset description. Immutable once listed; owned by
//! exactly one auction.

use crate::domain::{Territory, VehicleId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: String,
    pub fuel_type: String,
    pub kms: u32,
    pub state: Territory,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_accidental: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rc_available: Option<bool>,
}

impl Vehicle {
    /// Display label used in activity descriptions and notifications.
    pub fn label(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}
