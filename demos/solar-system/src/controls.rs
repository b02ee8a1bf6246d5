/// Speed sliders and the pause button.
///
/// The host builds its DOM controls from the JSON descriptors and sends the
/// user's changes back as custom events carrying the captured `BodyIndex`.

use serde::Serialize;
use orrery_engine::MAX_ORBIT_SPEED;

use crate::bodies::{BodyIndex, BodyRegistry};

pub const SPEED_MIN: f32 = 0.0;
pub const SPEED_MAX: f32 = MAX_ORBIT_SPEED;
pub const SPEED_STEP: f32 = 0.001;

/// One speed slider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedControl {
    pub index: BodyIndex,
    pub label: String,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub value: f32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ControlPanel {
    pub speeds: Vec<SpeedControl>,
}

/// Serialized view handed to the host.
#[derive(Serialize)]
struct PanelView<'a> {
    speeds: &'a [SpeedControl],
    pause_label: &'static str,
}

/// Button text for the current pause state.
pub fn pause_label(paused: bool) -> &'static str {
    if paused { "Resume" } else { "Pause" }
}

impl ControlPanel {
    /// One slider per body, in declaration order.
    pub fn from_registry(registry: &BodyRegistry) -> Self {
        let speeds = registry
            .iter()
            .enumerate()
            .map(|(index, body)| SpeedControl {
                index,
                label: body.name.clone(),
                min: SPEED_MIN,
                max: SPEED_MAX,
                step: SPEED_STEP,
                value: body.speed,
            })
            .collect();
        Self { speeds }
    }

    /// Clamp `value` into the slider range and apply it to the body.
    /// Returns the applied speed, or `None` for an index with no body.
    pub fn set_speed(&mut self, registry: &mut BodyRegistry, index: BodyIndex, value: f32) -> Option<f32> {
        if !value.is_finite() {
            log::debug!("ignoring non-finite speed for body {}", index);
            return None;
        }
        let (Some(control), Some(body)) = (self.speeds.get_mut(index), registry.body_mut(index)) else {
            log::debug!("ignoring speed change for unknown body {}", index);
            return None;
        };

        let speed = value.clamp(SPEED_MIN, SPEED_MAX);
        control.value = speed;
        body.speed = speed;
        Some(speed)
    }

    pub fn to_json(&self, paused: bool) -> Result<String, serde_json::Error> {
        serde_json::to_string(&PanelView {
            speeds: &self.speeds,
            pause_label: pause_label(paused),
        })
    }
}
