//! Bulk lot import from the admin spreadsheet template.
//!
//! Rows follow the fixed column set `Make, Model, Year, VIN, FuelType, Kms,
//! State, BasePrice, Increment, StartTime, DurationMins`. Valid rows become
//! STAGING lots awaiting publication; row-level failures are reported per
//! line and never abort the batch.

use crate::domain::{
    Auction, AuctionId, AuctionStatus, Decimal, SalePhase, Territory, Vehicle, VehicleId,
};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct LotRow {
    #[serde(rename = "Make")]
    make: String,
    #[serde(rename = "Model")]
    model: String,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "VIN")]
    vin: String,
    #[serde(rename = "FuelType")]
    fuel_type: String,
    #[serde(rename = "Kms")]
    kms: u32,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "BasePrice")]
    base_price: Decimal,
    #[serde(rename = "Increment")]
    increment: Decimal,
    #[serde(rename = "StartTime")]
    start_time: String,
    #[serde(rename = "DurationMins")]
    duration_mins: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRowError {
    pub line: u64,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub lots: Vec<Auction>,
    pub errors: Vec<ImportRowError>,
}

/// Parse a CSV batch into staged lots.
pub fn parse_lots(csv_text: &str) -> ImportReport {
    let mut report = ImportReport::default();
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());

    for result in reader.deserialize::<LotRow>() {
        match result {
            Ok(row) => {
                let line = report.lots.len() as u64 + report.errors.len() as u64 + 2;
                match stage_lot(row) {
                    Ok(lot) => report.lots.push(lot),
                    Err(message) => report.errors.push(ImportRowError { line, message }),
                }
            }
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                report.errors.push(ImportRowError {
                    line,
                    message: e.to_string(),
                });
            }
        }
    }

    report
}

fn stage_lot(row: LotRow) -> Result<Auction, String> {
    if row.base_price <= Decimal::ZERO {
        return Err(format!("base price must be positive, got {}", row.base_price));
    }
    if row.duration_mins <= 0 {
        return Err(format!("duration must be positive, got {}", row.duration_mins));
    }
    let start_time: DateTime<Utc> = row
        .start_time
        .parse()
        .map_err(|e| format!("invalid start time {:?}: {}", row.start_time, e))?;

    let tag = Uuid::new_v4().simple().to_string();
    let tag = &tag[..8];

    Ok(Auction {
        id: AuctionId::new(format!("BANK-IMP-{}", tag)),
        vehicle: Vehicle {
            id: VehicleId::new(format!("V-IMP-{}", tag)),
            make: row.make,
            model: row.model,
            year: row.year,
            vin: row.vin,
            fuel_type: row.fuel_type,
            kms: row.kms,
            state: Territory::new(row.state),
            images: Vec::new(),
            bank_name: None,
            is_accidental: None,
            rc_available: None,
        },
        start_time,
        end_time: start_time + Duration::minutes(row.duration_mins),
        base_price: row.base_price,
        current_bid: row.base_price,
        bid_increment: row.increment,
        status: AuctionStatus::Staging,
        bids_count: 0,
        phase: SalePhase::Open,
    })
}
