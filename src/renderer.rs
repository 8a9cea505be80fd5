// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{HeatmapError, Result};
use crate::geometry::{self, Layout, Rect};
use crate::interaction::{InteractionController, Tooltip, month_name};
use crate::legend::{self, LegendSwatch};
use crate::models::{Dataset, Observation, RawDataset};
use crate::palette;
use crate::scales::{self, Scales};

const COLOR_AXIS: RGBColor = RGBColor(51, 51, 51);
const COLOR_TOOLTIP_BG: RGBColor = RGBColor(250, 250, 250);

pub const DEFAULT_TITLE: &str = "Monthly Global Land-Surface Temperature";

const MAX_YEAR_TICKS: usize = 14;
const TICK_LENGTH: i32 = 6;
const TOOLTIP_WIDTH: i32 = 150;
const TOOLTIP_HEIGHT: i32 = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
}

/// A drawn cell together with the record it represents, so hover events can
/// be resolved back to data.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub observation: Observation,
    pub rect: Rect,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSummary {
    pub cells: usize,
    /// One `MalformedObservation` per record left out of the chart.
    pub skipped: Vec<HeatmapError>,
    /// Non-fatal conditions such as a collapsed colour scale.
    pub warnings: Vec<HeatmapError>,
}

impl RenderSummary {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

#[derive(Debug, Clone)]
pub struct HeatmapScene {
    pub layout: Layout,
    pub title: String,
    pub base_temperature: f64,
    pub scales: Scales,
    pub bar_size: (f64, f64),
    pub cells: Vec<Cell>,
    pub legend: Vec<LegendSwatch>,
    pub time_ticks: Vec<AxisTick>,
    pub month_ticks: Vec<AxisTick>,
    pub summary: RenderSummary,
}

#[derive(Debug, Clone)]
pub struct HeatmapRenderer {
    layout: Layout,
    title: String,
}

impl Default for HeatmapRenderer {
    fn default() -> Self {
        Self::new(Layout::default())
    }
}

impl HeatmapRenderer {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Validate a raw document and lay it out; malformed records are skipped
    /// and listed in the summary.
    pub fn prepare(&self, raw: &RawDataset) -> Result<HeatmapView> {
        let validated = raw.validate();
        let mut view = self.prepare_dataset(&validated.dataset)?;
        view.scene.summary.skipped = validated.skipped;
        if view.scene.summary.skipped_count() > 0 {
            info!(
                "Skipped {} malformed records",
                view.scene.summary.skipped_count()
            );
        }
        Ok(view)
    }

    pub fn prepare_dataset(&self, dataset: &Dataset) -> Result<HeatmapView> {
        let layout = self.layout;
        let observations = &dataset.observations;

        let scales = scales::build(observations, layout.chart_width, layout.chart_height)?;
        let labels = legend::labels(scales.min_variance, scales.max_variance);
        let bar_size = layout.bar_size(observations.len());

        let cells: Vec<Cell> = observations
            .iter()
            .zip(geometry::map_all(observations, &scales, &layout))
            .map(|(observation, rect)| Cell {
                observation: *observation,
                rect,
            })
            .collect();

        let mut summary = RenderSummary {
            cells: cells.len(),
            ..Default::default()
        };
        if scales.color.is_degenerate() {
            summary.warnings.push(HeatmapError::ScaleDomainDegenerate {
                variance: scales.min_variance,
            });
        }

        let time_ticks = scales
            .time
            .ticks(MAX_YEAR_TICKS)
            .into_iter()
            .map(|year| AxisTick {
                position: scales.time.map_year(year) + layout.x_offset,
                label: year.to_string(),
            })
            .collect();

        let month_ticks = (1..=12)
            .map(|month| AxisTick {
                position: scales.month.map_month(month) + bar_size.1 / 2.0 + layout.y_offset,
                label: month_name(month).to_string(),
            })
            .collect();

        debug!(
            "Laid out {} cells, bar size {:.2}x{:.2}",
            cells.len(),
            bar_size.0,
            bar_size.1
        );

        let scene = HeatmapScene {
            layout,
            title: self.title.clone(),
            base_temperature: dataset.base_temperature,
            legend: legend::swatches(layout.canvas_width, &labels),
            scales,
            bar_size,
            cells,
            time_ticks,
            month_ticks,
            summary,
        };

        Ok(HeatmapView {
            controller: InteractionController::new(dataset.base_temperature),
            scene,
        })
    }
}

/// A laid-out heatmap plus its hover state.
#[derive(Debug, Clone)]
pub struct HeatmapView {
    scene: HeatmapScene,
    controller: InteractionController,
}

impl HeatmapView {
    pub fn scene(&self) -> &HeatmapScene {
        &self.scene
    }

    pub fn summary(&self) -> &RenderSummary {
        &self.scene.summary
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn tooltip(&self) -> Tooltip {
        self.controller.tooltip()
    }

    /// Pointer entered the cell at `index`. Unknown indices are ignored.
    pub fn pointer_enter(&mut self, index: usize, x: f64, y: f64) -> bool {
        match self.scene.cells.get(index) {
            Some(cell) => {
                self.controller.pointer_enter(cell.observation, x, y);
                true
            }
            None => false,
        }
    }

    pub fn pointer_leave(&mut self) {
        self.controller.pointer_leave();
    }

    /// Index of the topmost cell under the pointer.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.scene.cells.iter().rposition(|c| c.rect.contains(x, y))
    }

    /// Route raw pointer motion into enter/leave events.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<usize> {
        let hit = self.hit_test(x, y);
        match hit {
            Some(index) => {
                self.pointer_enter(index, x, y);
            }
            None if self.controller.is_hovering() => self.pointer_leave(),
            None => {}
        }
        hit
    }

    pub fn render_svg(&self) -> Result<String> {
        let layout = &self.scene.layout;
        let size = (layout.canvas_width as u32, layout.canvas_height as u32);
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            draw_scene(&root, &self.scene, &self.tooltip())?;
            root.present().map_err(HeatmapError::drawing)?;
        }
        Ok(svg)
    }

    pub fn save_svg(&self, output_path: &Path) -> Result<()> {
        let layout = &self.scene.layout;
        let size = (layout.canvas_width as u32, layout.canvas_height as u32);
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_scene(&root, &self.scene, &self.tooltip())?;
        root.present().map_err(HeatmapError::drawing)?;
        info!("Wrote heatmap to {}", output_path.display());
        Ok(())
    }
}

fn px(value: f64) -> i32 {
    value.round() as i32
}

fn draw_scene<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    scene: &HeatmapScene,
    tooltip: &Tooltip,
) -> Result<()> {
    root.fill(&WHITE).map_err(HeatmapError::drawing)?;

    draw_legend(root, &scene.legend)?;
    draw_cells(root, &scene.cells)?;
    draw_axes(root, scene)?;

    let layout = &scene.layout;
    root.draw_text(
        &scene.title,
        &TextStyle::from(("sans-serif", 18).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom)),
        (px(layout.canvas_width / 2.0), px(layout.canvas_height - 8.0)),
    )
    .map_err(HeatmapError::drawing)?;

    if tooltip.visible {
        draw_tooltip(root, tooltip, layout)?;
    }
    Ok(())
}

fn draw_legend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    swatches: &[LegendSwatch],
) -> Result<()> {
    let label_style = TextStyle::from(("sans-serif", 12).into_font()).color(&BLACK);
    for swatch in swatches {
        root.draw(&Rectangle::new(
            [
                (px(swatch.x), px(swatch.y)),
                (px(swatch.x + swatch.width), px(swatch.y + swatch.height)),
            ],
            palette::color_at(swatch.color_index).filled(),
        ))
        .map_err(HeatmapError::drawing)?;

        root.draw_text(
            &format!("{} ℃", swatch.label),
            &label_style,
            (px(swatch.label_x), px(swatch.label_y - 12.0)),
        )
        .map_err(HeatmapError::drawing)?;
    }
    Ok(())
}

fn draw_cells<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, cells: &[Cell]) -> Result<()> {
    for cell in cells {
        let rect = &cell.rect;
        root.draw(&Rectangle::new(
            [
                (px(rect.x), px(rect.y)),
                (px(rect.x + rect.width), px(rect.y + rect.height)),
            ],
            palette::color_at(rect.color_index).filled(),
        ))
        .map_err(HeatmapError::drawing)?;
    }
    Ok(())
}

fn draw_axes<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, scene: &HeatmapScene) -> Result<()> {
    let layout = &scene.layout;
    let axis_style = ShapeStyle::from(&COLOR_AXIS).stroke_width(1);
    let tick_font = TextStyle::from(("sans-serif", 11).into_font()).color(&COLOR_AXIS);

    // Time axis along the bottom
    let axis_y = px(layout.time_axis_y());
    let left = px(layout.x_offset);
    let right = px(layout.x_offset + layout.chart_width);
    root.draw(&PathElement::new(vec![(left, axis_y), (right, axis_y)], axis_style))
        .map_err(HeatmapError::drawing)?;

    for tick in &scene.time_ticks {
        let x = px(tick.position);
        root.draw(&PathElement::new(
            vec![(x, axis_y), (x, axis_y + TICK_LENGTH)],
            axis_style,
        ))
        .map_err(HeatmapError::drawing)?;
        root.draw_text(
            &tick.label,
            &tick_font.pos(Pos::new(HPos::Center, VPos::Top)),
            (x, axis_y + TICK_LENGTH + 3),
        )
        .map_err(HeatmapError::drawing)?;
    }

    root.draw_text(
        "Year",
        &TextStyle::from(("sans-serif", 16).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top)),
        (px(layout.canvas_width / 2.0), axis_y + 34),
    )
    .map_err(HeatmapError::drawing)?;

    // Month axis along the left edge
    let axis_x = left - 1;
    let top = px(layout.y_offset);
    let bottom = px(layout.y_offset + layout.grid_height());
    root.draw(&PathElement::new(vec![(axis_x, top), (axis_x, bottom)], axis_style))
        .map_err(HeatmapError::drawing)?;

    for tick in &scene.month_ticks {
        let y = px(tick.position);
        root.draw(&PathElement::new(
            vec![(axis_x - TICK_LENGTH, y), (axis_x, y)],
            axis_style,
        ))
        .map_err(HeatmapError::drawing)?;
        root.draw_text(
            &tick.label,
            &tick_font.pos(Pos::new(HPos::Right, VPos::Center)),
            (axis_x - TICK_LENGTH - 3, y),
        )
        .map_err(HeatmapError::drawing)?;
    }

    root.draw_text(
        "Month",
        &TextStyle::from(
            ("sans-serif", 16)
                .into_font()
                .transform(FontTransform::Rotate270),
        )
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center)),
        (axis_x - 60, px(layout.y_offset + layout.grid_height() / 2.0)),
    )
    .map_err(HeatmapError::drawing)?;

    Ok(())
}

fn draw_tooltip<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    tooltip: &Tooltip,
    layout: &Layout,
) -> Result<()> {
    let Some(content) = &tooltip.content else {
        return Ok(());
    };

    // Keep the box on the canvas near the edges
    let max_x = px(layout.canvas_width) - TOOLTIP_WIDTH;
    let max_y = px(layout.canvas_height) - TOOLTIP_HEIGHT;
    let x = px(tooltip.x).clamp(0, max_x.max(0));
    let y = px(tooltip.y).clamp(0, max_y.max(0));

    let corners = [(x, y), (x + TOOLTIP_WIDTH, y + TOOLTIP_HEIGHT)];
    root.draw(&Rectangle::new(corners, COLOR_TOOLTIP_BG.filled()))
        .map_err(HeatmapError::drawing)?;
    root.draw(&Rectangle::new(corners, ShapeStyle::from(&BLACK).stroke_width(1)))
        .map_err(HeatmapError::drawing)?;

    let heading_style = TextStyle::from(("sans-serif", 15).into_font()).color(&BLACK);
    let body_style = TextStyle::from(("sans-serif", 12).into_font()).color(&COLOR_AXIS);
    root.draw_text(&content.heading(), &heading_style, (x + 8, y + 8))
        .map_err(HeatmapError::drawing)?;
    root.draw_text(&content.temperature_label(), &body_style, (x + 8, y + 28))
        .map_err(HeatmapError::drawing)?;
    root.draw_text(&content.variance_label(), &body_style, (x + 8, y + 44))
        .map_err(HeatmapError::drawing)?;
    Ok(())
}
