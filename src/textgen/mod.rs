//! External text-generation collaborator.
//!
//! Optional AI-generated vehicle descriptions and lot-data validation. The
//! boundary is request/response, single-shot, no retry; any failure is caught
//! here, logged, and replaced with a safe default. Nothing in the lifecycle
//! core depends on this module.

use crate::domain::Vehicle;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;
use tracing::warn;

pub mod gemini;
pub mod r#static;

pub use gemini::GeminiTextGenerator;
pub use r#static::StaticTextGenerator;

/// Fallback prose when generation is unavailable.
pub const FALLBACK_SUMMARY: &str = "High-quality bank-repossessed vehicle available for auction.";

#[derive(Debug, Error)]
pub enum TextGenError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Malformed response: {0}")]
    Parse(String),
}

/// A single validation issue reported against uploaded lot data. The
/// generator returns free-form findings; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFinding {
    #[serde(default)]
    pub row: Option<usize>,
    #[serde(default)]
    pub field: Option<String>,
    pub issue: String,
}

#[async_trait]
pub trait TextGenerator: Send + Sync + fmt::Debug {
    /// Generate a short prose auction summary for a vehicle.
    async fn vehicle_summary(&self, vehicle: &Vehicle) -> Result<String, TextGenError>;

    /// Check uploaded lot records for inconsistencies.
    async fn validate_lots(
        &self,
        rows: &[serde_json::Value],
    ) -> Result<Vec<ValidationFinding>, TextGenError>;
}

/// Summary with the non-fatal failure policy applied.
pub async fn summary_or_fallback(gen: &dyn TextGenerator, vehicle: &Vehicle) -> String {
    match gen.vehicle_summary(vehicle).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Text generation failed, using fallback: {}", e);
            FALLBACK_SUMMARY.to_string()
        }
    }
}

/// Validation findings with the non-fatal failure policy applied.
pub async fn findings_or_empty(
    gen: &dyn TextGenerator,
    rows: &[serde_json::Value],
) -> Vec<ValidationFinding> {
    match gen.validate_lots(rows).await {
        Ok(findings) => findings,
        Err(e) => {
            warn!("Lot validation failed, reporting no findings: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Territory, VehicleId};

    #[derive(Debug)]
    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn vehicle_summary(&self, _vehicle: &Vehicle) -> Result<String, TextGenError> {
            Err(TextGenError::Network("connection refused".to_string()))
        }

        async fn validate_lots(
            &self,
            _rows: &[serde_json::Value],
        ) -> Result<Vec<ValidationFinding>, TextGenError> {
            Err(TextGenError::Parse("not json".to_string()))
        }
    }

    fn vehicle() -> Vehicle {
        Vehicle {
            id: VehicleId::new("V-ASSET-500"),
            make: "Toyota".to_string(),
            model: "Fortuner".to_string(),
            year: 2021,
            vin: "INT050099X".to_string(),
            fuel_type: "Diesel".to_string(),
            kms: 40_000,
            state: Territory::new("Tamil Nadu"),
            images: vec![],
            bank_name: Some("Axis Bank".to_string()),
            is_accidental: Some(false),
            rc_available: Some(true),
        }
    }

    #[tokio::test]
    async fn test_summary_failure_degrades_to_fallback() {
        let text = summary_or_fallback(&FailingGenerator, &vehicle()).await;
        assert_eq!(text, FALLBACK_SUMMARY);
    }

    #[tokio::test]
    async fn test_validation_failure_degrades_to_empty() {
        let findings = findings_or_empty(&FailingGenerator, &[serde_json::json!({})]).await;
        assert!(findings.is_empty());
    }

    #[test]
    fn test_finding_deserializes_partial_fields() {
        let f: ValidationFinding =
            serde_json::from_str(r#"{"issue":"unrealistic price"}"#).unwrap();
        assert_eq!(f.issue, "unrealistic price");
        assert!(f.row.is_none());
    }
}
