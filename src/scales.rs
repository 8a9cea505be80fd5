// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Data-to-visual mappings for the heatmap.
//!
//! Each scale is a plain value holding its domain and range; nothing is
//! registered globally and every mapping is a pure function of its inputs.

use chrono::NaiveDate;
use plotters::style::RGBColor;
use tracing::{debug, warn};

use crate::error::{HeatmapError, Result};
use crate::models::{Observation, variance_extent};
use crate::palette::{self, MIDPOINT_INDEX, PALETTE_SIZE};

/// First year of the time axis; the axis starts on 1 January of this year.
pub const REFERENCE_YEAR: i32 = 1753;

/// Pixels kept free below the month axis for the time axis.
pub const MONTH_AXIS_RESERVE: f64 = 34.0;

const MILLIS_PER_YEAR: f64 = 365.2425 * 86_400_000.0;

const NICE_YEAR_STEPS: [i32; 11] = [1, 2, 5, 10, 20, 25, 50, 100, 200, 500, 1000];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value into the range. A zero-width domain maps everything
    /// to the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Milliseconds since the Unix epoch at 00:00 UTC on 1 January of `year`.
pub fn year_instant_millis(year: i32) -> f64 {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis() as f64)
        .unwrap_or_else(|| (year as f64 - 1970.0) * MILLIS_PER_YEAR)
}

/// Horizontal scale from a year's first instant to pixels.
///
/// The domain closes on 1 January after `last_year`, so the last year owns a
/// full column and consecutive years tile the chart width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    linear: LinearScale,
    first_year: i32,
    last_year: i32,
}

impl TimeScale {
    pub fn new(last_year: i32, chart_width: f64) -> Self {
        Self {
            linear: LinearScale::new(
                (
                    year_instant_millis(REFERENCE_YEAR),
                    year_instant_millis(last_year.saturating_add(1)),
                ),
                (0.0, chart_width),
            ),
            first_year: REFERENCE_YEAR,
            last_year,
        }
    }

    pub fn map_year(&self, year: i32) -> f64 {
        self.linear.map(year_instant_millis(year))
    }

    pub fn year_span(&self) -> (i32, i32) {
        (self.first_year, self.last_year)
    }

    /// Tick years at a round step, at most `max_ticks` of them.
    pub fn ticks(&self, max_ticks: usize) -> Vec<i32> {
        let lo = self.first_year.min(self.last_year);
        let hi = self.first_year.max(self.last_year);
        let span = (hi - lo) as usize;
        let max_ticks = max_ticks.max(1);

        let step = NICE_YEAR_STEPS
            .iter()
            .copied()
            .find(|&step| span / step as usize + 1 <= max_ticks)
            .unwrap_or(NICE_YEAR_STEPS[NICE_YEAR_STEPS.len() - 1]);

        let first = lo.div_euclid(step) * step;
        let first = if first < lo { first + step } else { first };
        (first..=hi).step_by(step as usize).collect()
    }
}

/// Vertical scale from month number (1..=12) to pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthScale {
    linear: LinearScale,
}

impl MonthScale {
    pub fn new(chart_height: f64) -> Self {
        Self {
            linear: LinearScale::new((1.0, 12.0), (0.0, chart_height - MONTH_AXIS_RESERVE)),
        }
    }

    pub fn map_month(&self, month: u32) -> f64 {
        self.linear.map(month as f64)
    }

    pub fn range(&self) -> (f64, f64) {
        self.linear.range()
    }
}

/// Quantile colour scale: the sorted variances are cut into eleven groups of
/// roughly equal size and each group gets one palette entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    thresholds: Vec<f64>,
    min: f64,
    max: f64,
}

impl ColorScale {
    /// Build from the sample of variances. Non-finite values are ignored;
    /// returns `None` when no finite value remains.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        let thresholds = (1..PALETTE_SIZE)
            .map(|i| quantile_sorted(&sorted, i as f64 / PALETTE_SIZE as f64))
            .collect();

        Some(Self {
            thresholds,
            min,
            max,
        })
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Palette index for a variance, always in `0..PALETTE_SIZE`.
    pub fn index_of(&self, variance: f64) -> usize {
        if self.is_degenerate() {
            return MIDPOINT_INDEX;
        }
        if variance <= self.min {
            return 0;
        }
        if variance >= self.max {
            return PALETTE_SIZE - 1;
        }
        self.thresholds.partition_point(|&t| t <= variance)
    }

    pub fn color_of(&self, variance: f64) -> RGBColor {
        palette::color_at(self.index_of(variance))
    }
}

/// Linear-interpolated quantile of an ascending slice (`p` in `[0, 1]`).
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let i = h.floor() as usize;
    let lower = sorted[i];
    match sorted.get(i + 1) {
        Some(&upper) => lower + (upper - lower) * (h - i as f64),
        None => lower,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scales {
    pub color: ColorScale,
    pub time: TimeScale,
    pub month: MonthScale,
    pub min_variance: f64,
    pub max_variance: f64,
}

/// Derive every scale the heatmap needs from one pass over the observations.
pub fn build(observations: &[Observation], chart_width: f64, chart_height: f64) -> Result<Scales> {
    if let Some(index) = observations.iter().position(|o| !o.variance.is_finite()) {
        return Err(HeatmapError::malformed(index, "variance is not finite"));
    }

    let (min_variance, max_variance) =
        variance_extent(observations).ok_or(HeatmapError::EmptyDataset)?;

    let variances: Vec<f64> = observations.iter().map(|o| o.variance).collect();
    let color = ColorScale::from_values(&variances).ok_or(HeatmapError::EmptyDataset)?;
    if color.is_degenerate() {
        warn!(
            "All {} observations have variance {}; using a single colour",
            observations.len(),
            min_variance
        );
    }

    let last_year = observations
        .iter()
        .map(|o| o.year)
        .max()
        .ok_or(HeatmapError::EmptyDataset)?;

    debug!(
        "Built scales: variance {}..{}, years {}..{}",
        min_variance, max_variance, REFERENCE_YEAR, last_year
    );

    Ok(Scales {
        color,
        time: TimeScale::new(last_year, chart_width),
        month: MonthScale::new(chart_height),
        min_variance,
        max_variance,
    })
}
