//! Canned text generator used when no API key is configured, and in tests.

use super::{TextGenError, TextGenerator, ValidationFinding, FALLBACK_SUMMARY};
use crate::domain::Vehicle;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct StaticTextGenerator {
    summary: Option<String>,
    findings: Vec<ValidationFinding>,
}

impl StaticTextGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the canned summary text.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Override the canned validation findings.
    pub fn with_findings(mut self, findings: Vec<ValidationFinding>) -> Self {
        self.findings = findings;
        self
    }
}

#[async_trait]
impl TextGenerator for StaticTextGenerator {
    async fn vehicle_summary(&self, vehicle: &Vehicle) -> Result<String, TextGenError> {
        Ok(self.summary.clone().unwrap_or_else(|| {
            format!(
                "{} {} ({}), {} kms. {}",
                vehicle.year,
                vehicle.label(),
                vehicle.fuel_type,
                vehicle.kms,
                FALLBACK_SUMMARY
            )
        }))
    }

    async fn validate_lots(
        &self,
        _rows: &[serde_json::Value],
    ) -> Result<Vec<ValidationFinding>, TextGenError> {
        Ok(self.findings.clone())
    }
}
