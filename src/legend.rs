// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::palette::PALETTE_SIZE;

const LEGEND_STEPS: usize = 10;

pub const SWATCH_WIDTH: f64 = 50.0;
pub const SWATCH_HEIGHT: f64 = 25.0;
pub const SWATCH_TOP: f64 = 25.0;
pub const LABEL_BASELINE: f64 = 65.0;
const LABEL_INSET: f64 = 5.0;

/// Boundary labels for the legend, measured as offsets from the coldest variance.
///
/// The result always has eleven entries, starts at `"0.0"` and ends at the full
/// variance range, each rounded to one decimal place.
pub fn labels(min_variance: f64, max_variance: f64) -> Vec<String> {
    let range = max_variance - min_variance;
    let step = range / LEGEND_STEPS as f64;

    (0..=LEGEND_STEPS)
        .map(|k| {
            // The last boundary is the range itself so it formats identically.
            let boundary = if k == LEGEND_STEPS {
                range
            } else {
                step * k as f64
            };
            format!("{:.1}", boundary)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendSwatch {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color_index: usize,
    pub label: String,
    pub label_x: f64,
    pub label_y: f64,
}

/// One swatch per palette colour, laid out in a row centred on the canvas.
pub fn swatches(canvas_width: f64, labels: &[String]) -> Vec<LegendSwatch> {
    let row_width = SWATCH_WIDTH * PALETTE_SIZE as f64;
    let start_x = (canvas_width - row_width) / 2.0;

    (0..PALETTE_SIZE)
        .map(|i| {
            let x = start_x + i as f64 * SWATCH_WIDTH;
            LegendSwatch {
                x,
                y: SWATCH_TOP,
                width: SWATCH_WIDTH,
                height: SWATCH_HEIGHT,
                color_index: i,
                label: labels.get(i).cloned().unwrap_or_default(),
                label_x: x + LABEL_INSET,
                label_y: LABEL_BASELINE,
            }
        })
        .collect()
}
