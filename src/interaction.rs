// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Hover tracking and tooltip state for heatmap cells.

use serde::Serialize;
use tracing::trace;

use crate::models::Observation;

/// The tooltip is drawn this many pixels above the pointer.
pub const TOOLTIP_OFFSET_Y: f64 = 100.0;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("?")
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoverState {
    Idle,
    Hovering {
        observation: Observation,
        x: f64,
        y: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipContent {
    pub year: i32,
    pub month_name: &'static str,
    /// Base temperature plus variance, in °C.
    pub computed_temperature: f64,
    pub variance: f64,
}

impl TooltipContent {
    pub fn new(observation: &Observation, base_temperature: f64) -> Self {
        Self {
            year: observation.year,
            month_name: month_name(observation.month),
            computed_temperature: base_temperature + observation.variance,
            variance: observation.variance,
        }
    }

    pub fn heading(&self) -> String {
        format!("{} - {}", self.year, self.month_name)
    }

    pub fn temperature_label(&self) -> String {
        format!("{:.1} ℃", self.computed_temperature)
    }

    pub fn variance_label(&self) -> String {
        format!("{} ℃", self.variance)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub content: Option<TooltipContent>,
}

impl Tooltip {
    fn hidden() -> Self {
        Self {
            visible: false,
            x: 0.0,
            y: 0.0,
            content: None,
        }
    }
}

/// Tracks the single hovered cell. Events are applied in order and the most
/// recent `pointer_enter` always wins.
#[derive(Debug, Clone)]
pub struct InteractionController {
    base_temperature: f64,
    state: HoverState,
}

impl InteractionController {
    pub fn new(base_temperature: f64) -> Self {
        Self {
            base_temperature,
            state: HoverState::Idle,
        }
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn is_hovering(&self) -> bool {
        matches!(self.state, HoverState::Hovering { .. })
    }

    pub fn pointer_enter(&mut self, observation: Observation, x: f64, y: f64) {
        trace!(
            "pointer_enter {}-{} at ({}, {})",
            observation.year, observation.month, x, y
        );
        self.state = HoverState::Hovering { observation, x, y };
    }

    pub fn pointer_leave(&mut self) {
        trace!("pointer_leave");
        self.state = HoverState::Idle;
    }

    pub fn tooltip(&self) -> Tooltip {
        match self.state {
            HoverState::Idle => Tooltip::hidden(),
            HoverState::Hovering { observation, x, y } => Tooltip {
                visible: true,
                x,
                y: y - TOOLTIP_OFFSET_Y,
                content: Some(TooltipContent::new(&observation, self.base_temperature)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_starts_idle_with_hidden_tooltip() {
        let controller = InteractionController::new(8.66);
        assert_eq!(controller.state(), HoverState::Idle);
        let tooltip = controller.tooltip();
        assert!(!tooltip.visible);
        assert!(tooltip.content.is_none());
    }

    #[test]
    fn test_enter_shows_tooltip_above_pointer() {
        let mut controller = InteractionController::new(8.66);
        controller.pointer_enter(Observation::new(1753, 1, -1.5), 300.0, 250.0);

        let tooltip = controller.tooltip();
        assert!(tooltip.visible);
        assert_eq!(tooltip.x, 300.0);
        assert_eq!(tooltip.y, 150.0);

        let content = tooltip.content.unwrap();
        assert_eq!(content.heading(), "1753 - Jan");
        assert_relative_eq!(content.computed_temperature, 7.16, epsilon = 1e-9);
        assert_eq!(content.temperature_label(), "7.2 ℃");
        assert_eq!(content.variance_label(), "-1.5 ℃");
    }

    #[test]
    fn test_reenter_retargets_without_idle() {
        let mut controller = InteractionController::new(8.66);
        controller.pointer_enter(Observation::new(1753, 1, -1.5), 1.0, 2.0);
        controller.pointer_enter(Observation::new(2015, 12, 1.2), 3.0, 4.0);

        assert_eq!(
            controller.state(),
            HoverState::Hovering {
                observation: Observation::new(2015, 12, 1.2),
                x: 3.0,
                y: 4.0
            }
        );
        let content = controller.tooltip().content.unwrap();
        assert_relative_eq!(content.computed_temperature, 9.86, epsilon = 1e-9);
        assert_eq!(content.month_name, "Dec");
    }

    #[test]
    fn test_leave_clears_tooltip() {
        let mut controller = InteractionController::new(8.66);
        controller.pointer_enter(Observation::new(1900, 6, 0.1), 1.0, 2.0);
        controller.pointer_leave();
        assert!(!controller.is_hovering());
        assert_eq!(controller.tooltip().content, None);
    }

    #[test]
    fn test_month_name_out_of_range() {
        assert_eq!(month_name(0), "?");
        assert_eq!(month_name(13), "?");
        assert_eq!(month_name(7), "Jul");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Event {
            Enter(Observation, f64, f64),
            Leave,
        }

        fn event() -> impl Strategy<Value = Event> {
            prop_oneof![
                (1753i32..2016, 1u32..=12, -5.0f64..5.0, 0.0f64..1248.0, 0.0f64..600.0)
                    .prop_map(|(year, month, v, x, y)| Event::Enter(
                        Observation::new(year, month, v),
                        x,
                        y
                    )),
                Just(Event::Leave),
            ]
        }

        proptest! {
            #[test]
            fn final_state_follows_last_event(events in prop::collection::vec(event(), 0..40)) {
                let mut controller = InteractionController::new(8.66);
                for e in &events {
                    match e {
                        Event::Enter(o, x, y) => controller.pointer_enter(*o, *x, *y),
                        Event::Leave => controller.pointer_leave(),
                    }
                }

                match events.last() {
                    None | Some(Event::Leave) => prop_assert_eq!(controller.state(), HoverState::Idle),
                    Some(Event::Enter(o, x, y)) => prop_assert_eq!(
                        controller.state(),
                        HoverState::Hovering { observation: *o, x: *x, y: *y }
                    ),
                }
            }
        }
    }
}
