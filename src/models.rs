// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::HeatmapError;

/// One monthly temperature anomaly, in °C relative to the dataset's base temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub year: i32,
    pub month: u32,
    pub variance: f64,
}

impl Observation {
    pub fn new(year: i32, month: u32, variance: f64) -> Self {
        Self {
            year,
            month,
            variance,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub base_temperature: f64,
    pub observations: Vec<Observation>,
}

impl Dataset {
    pub fn new(base_temperature: f64, observations: Vec<Observation>) -> Self {
        Self {
            base_temperature,
            observations,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Smallest and largest variance, or `None` for an empty dataset.
    pub fn variance_extent(&self) -> Option<(f64, f64)> {
        variance_extent(&self.observations)
    }
}

pub fn variance_extent(observations: &[Observation]) -> Option<(f64, f64)> {
    if observations.is_empty() {
        return None;
    }
    let min = observations
        .iter()
        .map(|o| o.variance)
        .fold(f64::INFINITY, f64::min);
    let max = observations
        .iter()
        .map(|o| o.variance)
        .fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

/// Observation as it appears on the wire. Every field is optional so a single
/// bad record does not fail the whole document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawObservation {
    pub year: Option<f64>,
    pub month: Option<f64>,
    pub variance: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDataset {
    pub base_temperature: f64,
    #[serde(default)]
    pub monthly_variance: Vec<RawObservation>,
}

/// A dataset with malformed records removed, plus one error per skipped record.
#[derive(Debug, Clone)]
pub struct ValidatedDataset {
    pub dataset: Dataset,
    pub skipped: Vec<HeatmapError>,
}

impl RawObservation {
    pub fn validate(&self, index: usize) -> Result<Observation, HeatmapError> {
        let year = self
            .year
            .ok_or_else(|| HeatmapError::malformed(index, "missing year"))?;
        let month = self
            .month
            .ok_or_else(|| HeatmapError::malformed(index, "missing month"))?;
        let variance = self
            .variance
            .ok_or_else(|| HeatmapError::malformed(index, "missing variance"))?;

        if year.fract() != 0.0 || year < i32::MIN as f64 || year > i32::MAX as f64 {
            return Err(HeatmapError::malformed(
                index,
                format!("year {} is not an integer", year),
            ));
        }
        let year = year as i32;
        if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
            return Err(HeatmapError::malformed(
                index,
                format!("year {} is outside the supported calendar", year),
            ));
        }

        if month.fract() != 0.0 || !(1.0..=12.0).contains(&month) {
            return Err(HeatmapError::malformed(
                index,
                format!("month {} outside 1..=12", month),
            ));
        }

        if !variance.is_finite() {
            return Err(HeatmapError::malformed(index, "variance is not finite"));
        }

        Ok(Observation::new(year, month as u32, variance))
    }
}

impl RawDataset {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> ValidatedDataset {
        let mut observations = Vec::with_capacity(self.monthly_variance.len());
        let mut skipped = Vec::new();

        for (index, raw) in self.monthly_variance.iter().enumerate() {
            match raw.validate(index) {
                Ok(observation) => observations.push(observation),
                Err(e) => {
                    debug!("Skipping record: {}", e);
                    skipped.push(e);
                }
            }
        }

        ValidatedDataset {
            dataset: Dataset::new(self.base_temperature, observations),
            skipped,
        }
    }
}

impl From<&Dataset> for RawDataset {
    fn from(dataset: &Dataset) -> Self {
        Self {
            base_temperature: dataset.base_temperature,
            monthly_variance: dataset
                .observations
                .iter()
                .map(|o| RawObservation {
                    year: Some(o.year as f64),
                    month: Some(o.month as f64),
                    variance: Some(o.variance),
                })
                .collect(),
        }
    }
}
