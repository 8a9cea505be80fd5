// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use plotters::style::RGBColor;

// Cold to warm, neutral in the middle
const COLOR_VIOLET: RGBColor = RGBColor(102, 85, 170);
const COLOR_BLUE: RGBColor = RGBColor(51, 136, 204);
const COLOR_TEAL: RGBColor = RGBColor(102, 204, 170);
const COLOR_SAGE: RGBColor = RGBColor(170, 221, 170);
const COLOR_LIME_PALE: RGBColor = RGBColor(238, 255, 170);
const COLOR_CREAM: RGBColor = RGBColor(255, 255, 204);
const COLOR_SAND: RGBColor = RGBColor(255, 238, 153);
const COLOR_APRICOT: RGBColor = RGBColor(255, 187, 102);
const COLOR_ORANGE: RGBColor = RGBColor(255, 119, 68);
const COLOR_RED: RGBColor = RGBColor(221, 68, 85);
const COLOR_CRIMSON: RGBColor = RGBColor(170, 0, 68);

pub const PALETTE_SIZE: usize = 11;

/// Index of the neutral colour, used when every observation has the same variance.
pub const MIDPOINT_INDEX: usize = PALETTE_SIZE / 2;

pub const PALETTE: [RGBColor; PALETTE_SIZE] = [
    COLOR_VIOLET,
    COLOR_BLUE,
    COLOR_TEAL,
    COLOR_SAGE,
    COLOR_LIME_PALE,
    COLOR_CREAM,
    COLOR_SAND,
    COLOR_APRICOT,
    COLOR_ORANGE,
    COLOR_RED,
    COLOR_CRIMSON,
];

pub const PALETTE_HEX: [&str; PALETTE_SIZE] = [
    "#65a", "#38c", "#6ca", "#ada", "#efa", "#ffc", "#fe9", "#fb6", "#f74", "#d45", "#a04",
];

/// Palette colour for an index; out-of-range indices clamp to the warm end.
pub fn color_at(index: usize) -> RGBColor {
    PALETTE[index.min(PALETTE_SIZE - 1)]
}
