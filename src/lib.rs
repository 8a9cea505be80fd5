// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

pub mod api;
pub mod config;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod legend;
pub mod models;
pub mod palette;
pub mod renderer;
pub mod scales;

pub use error::{HeatmapError, Result};
pub use models::{Dataset, Observation, RawDataset};
pub use renderer::{HeatmapRenderer, HeatmapView};
