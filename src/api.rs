// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{Context, Result};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::models::RawDataset;

pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/FreeCodeCamp/ProjectReferenceData/master/global-temperature.json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct DatasetClient {
    client: Client,
}

impl Default for DatasetClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetClient {
    pub fn new() -> Self {
        let client = match Client::builder().timeout(REQUEST_TIMEOUT).build() {
            Ok(client) => client,
            Err(e) => {
                warn!(
                    "Failed to build HTTP client with a {:?} timeout, using defaults: {}",
                    REQUEST_TIMEOUT, e
                );
                Client::new()
            }
        };
        Self { client }
    }

    pub async fn fetch(&self, url: &str) -> Result<RawDataset> {
        info!("Fetching dataset from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?
            .error_for_status()
            .with_context(|| format!("Dataset request to {} failed", url))?;

        let dataset: RawDataset = response
            .json()
            .await
            .context("Failed to parse dataset response")?;

        info!(
            "Fetched {} monthly records, base temperature {}",
            dataset.monthly_variance.len(),
            dataset.base_temperature
        );
        Ok(dataset)
    }
}

pub fn read_dataset(path: &Path) -> Result<RawDataset> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file: {}", path.display()))?;
    RawDataset::from_json(&json)
        .with_context(|| format!("Failed to parse dataset file: {}", path.display()))
}
