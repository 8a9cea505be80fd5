// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::models::Observation;
use crate::scales::{MONTH_AXIS_RESERVE, Scales};

const MONTHS_PER_YEAR: f64 = 12.0;

/// Canvas and plotting-area dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub chart_width: f64,
    pub chart_height: f64,
    /// Left edge of the plotting area.
    pub x_offset: f64,
    /// Top edge of the plotting area, below the legend.
    pub y_offset: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            canvas_width: 262.0 * 4.0 + 200.0,
            canvas_height: 600.0,
            chart_width: 262.0 * 4.0,
            chart_height: 408.0,
            x_offset: 100.0,
            y_offset: 84.0,
        }
    }
}

impl Layout {
    /// Width of one year column and height of one month row.
    ///
    /// The row height is the month scale's step, so row `m` starts exactly where
    /// row `m - 1` ends. On the default 408 px plot this is `chart_height / 12`.
    pub fn bar_size(&self, observation_count: usize) -> (f64, f64) {
        let columns = observation_count as f64 / MONTHS_PER_YEAR;
        (self.chart_width / columns, self.month_row_height())
    }

    pub fn month_row_height(&self) -> f64 {
        (self.chart_height - MONTH_AXIS_RESERVE) / (MONTHS_PER_YEAR - 1.0)
    }

    /// Height covered by the twelve month rows.
    pub fn grid_height(&self) -> f64 {
        self.chart_height - MONTH_AXIS_RESERVE + self.month_row_height()
    }

    /// Baseline of the time axis, just below the month rows.
    pub fn time_axis_y(&self) -> f64 {
        self.y_offset + self.grid_height() + 16.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color_index: usize,
}

impl Rect {
    /// Half-open containment: the right and bottom edges belong to the neighbour.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// Place one observation on the canvas.
///
/// The vertical position comes from the month scale, the same mapping the month
/// axis is drawn from, so every cell sits in its axis band.
pub fn map_to_rect(
    observation: &Observation,
    scales: &Scales,
    bar_width: f64,
    bar_height: f64,
    x_offset: f64,
    y_offset: f64,
) -> Rect {
    Rect {
        x: scales.time.map_year(observation.year) + x_offset,
        y: scales.month.map_month(observation.month) + y_offset,
        width: bar_width,
        height: bar_height,
        color_index: scales.color.index_of(observation.variance),
    }
}

pub fn map_all(observations: &[Observation], scales: &Scales, layout: &Layout) -> Vec<Rect> {
    let (bar_width, bar_height) = layout.bar_size(observations.len());
    observations
        .iter()
        .map(|o| {
            map_to_rect(
                o,
                scales,
                bar_width,
                bar_height,
                layout.x_offset,
                layout.y_offset,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scales;
    use approx::assert_relative_eq;

    fn two_year_observations() -> Vec<Observation> {
        (0..24)
            .map(|i| Observation::new(1753 + i / 12, (i % 12) as u32 + 1, (i as f64 - 12.0) / 10.0))
            .collect()
    }

    #[test]
    fn test_default_layout_dimensions() {
        let layout = Layout::default();
        assert_eq!(layout.canvas_width, 1248.0);
        assert_eq!(layout.canvas_height, 600.0);
        assert_eq!(layout.chart_width, 1048.0);
        assert_eq!(layout.chart_height, 408.0);
    }

    #[test]
    fn test_bar_size_two_years() {
        let (w, h) = Layout::default().bar_size(24);
        assert_relative_eq!(w, 1048.0 / 2.0);
        assert_relative_eq!(h, 408.0 / 12.0);
    }

    #[test]
    fn test_map_to_rect_positions() {
        let layout = Layout::default();
        let observations = two_year_observations();
        let scales = scales::build(&observations, layout.chart_width, layout.chart_height).unwrap();
        let rect = map_to_rect(&observations[13], &scales, 524.0, 34.0, 100.0, 84.0);

        assert_relative_eq!(rect.x, 524.0 + 100.0);
        assert_relative_eq!(rect.y, 34.0 + 84.0);
        assert_eq!(rect.width, 524.0);
        assert_eq!(rect.height, 34.0);
    }

    #[test]
    fn test_month_bands_stack_without_gaps() {
        let layout = Layout::default();
        let observations = two_year_observations();
        let scales = scales::build(&observations, layout.chart_width, layout.chart_height).unwrap();
        let rects = map_all(&observations, &scales, &layout);

        for pair in rects[..12].windows(2) {
            assert_relative_eq!(pair[0].y + pair[0].height, pair[1].y, epsilon = 1e-9);
        }
        assert_relative_eq!(rects[11].y + rects[11].height, layout.y_offset + layout.chart_height);
    }

    #[test]
    fn test_month_rows_tile_on_custom_height() {
        for chart_height in [300.0, 408.0, 600.0] {
            let layout = Layout {
                chart_height,
                ..Layout::default()
            };
            let observations = two_year_observations();
            let scales =
                scales::build(&observations, layout.chart_width, layout.chart_height).unwrap();
            let rects = map_all(&observations, &scales, &layout);

            for pair in rects[..12].windows(2) {
                assert_relative_eq!(pair[0].y + pair[0].height, pair[1].y, epsilon = 1e-9);
            }
            assert_relative_eq!(rects[0].y, layout.y_offset);
            assert_relative_eq!(
                rects[11].y + rects[11].height,
                layout.y_offset + layout.grid_height(),
                epsilon = 1e-9
            );
            assert!(layout.time_axis_y() > rects[11].y + rects[11].height);
        }
    }

    #[test]
    fn test_year_columns_tile() {
        let layout = Layout::default();
        let observations = two_year_observations();
        let scales = scales::build(&observations, layout.chart_width, layout.chart_height).unwrap();
        let rects = map_all(&observations, &scales, &layout);

        assert_relative_eq!(rects[11].x + rects[11].width, rects[12].x);
        assert_relative_eq!(rects[23].x + rects[23].width, layout.x_offset + layout.chart_width);
    }

    #[test]
    fn test_same_month_shares_band() {
        let layout = Layout::default();
        let observations = two_year_observations();
        let scales = scales::build(&observations, layout.chart_width, layout.chart_height).unwrap();
        let rects = map_all(&observations, &scales, &layout);
        for month in 0..12 {
            assert_eq!(rects[month].y, rects[month + 12].y);
        }
    }

    #[test]
    fn test_map_to_rect_is_deterministic() {
        let layout = Layout::default();
        let observations = two_year_observations();
        let scales = scales::build(&observations, layout.chart_width, layout.chart_height).unwrap();
        let first = map_to_rect(&observations[5], &scales, 10.0, 34.0, 100.0, 84.0);
        let second = map_to_rect(&observations[5], &scales, 10.0, 34.0, 100.0, 84.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect {
            x: 10.0,
            y: 20.0,
            width: 5.0,
            height: 5.0,
            color_index: 0,
        };
        assert!(rect.contains(10.0, 20.0));
        assert!(rect.contains(14.9, 24.9));
        assert!(!rect.contains(15.0, 22.0));
        assert!(!rect.contains(12.0, 25.0));
    }
}
