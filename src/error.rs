// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for the heatmap pipeline

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeatmapError {
    #[error("dataset contains no observations")]
    EmptyDataset,

    #[error("malformed observation at index {index}: {reason}")]
    MalformedObservation { index: usize, reason: String },

    #[error("all observations share variance {variance}; colour scale collapsed to one colour")]
    ScaleDomainDegenerate { variance: f64 },

    #[error("drawing error: {0}")]
    Drawing(String),
}

impl HeatmapError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        HeatmapError::MalformedObservation {
            index,
            reason: reason.into(),
        }
    }

    pub(crate) fn drawing(err: impl std::fmt::Display) -> Self {
        HeatmapError::Drawing(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HeatmapError>;
