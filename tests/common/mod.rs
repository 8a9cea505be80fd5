// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Common test utilities and helpers
//!
//! Dataset builders shared by the integration tests.

#![allow(dead_code)]

use global_temp_heatmap::models::{Dataset, Observation, RawDataset, RawObservation};
use std::io::Write;
use tempfile::NamedTempFile;

pub const BASE_TEMPERATURE: f64 = 8.66;

/// `years` full years of monthly observations starting in 1753, with a
/// variance that walks upward so every palette bucket is used.
pub fn monthly_dataset(years: i32) -> Dataset {
    let observations = (0..years * 12)
        .map(|i| {
            Observation::new(
                1753 + i / 12,
                (i % 12) as u32 + 1,
                ((i * 37) % 101) as f64 / 10.0 - 5.0,
            )
        })
        .collect();
    Dataset::new(BASE_TEMPERATURE, observations)
}

pub fn two_point_dataset() -> Dataset {
    Dataset::new(
        BASE_TEMPERATURE,
        vec![
            Observation::new(1753, 1, -1.5),
            Observation::new(2015, 12, 1.2),
        ],
    )
}

pub fn raw_with_bad_records() -> RawDataset {
    let mut raw = RawDataset::from(&monthly_dataset(1));
    raw.monthly_variance.push(RawObservation {
        year: Some(1754.0),
        month: None,
        variance: Some(0.4),
    });
    raw.monthly_variance.push(RawObservation {
        year: Some(1754.0),
        month: Some(13.0),
        variance: Some(0.4),
    });
    raw
}

/// Writes the dataset as JSON in the wire format to a temp file.
pub fn write_dataset_file(dataset: &Dataset) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    let json = serde_json::to_string(&RawDataset::from(dataset)).expect("Failed to serialize");
    file.write_all(json.as_bytes()).expect("Failed to write");
    file
}
