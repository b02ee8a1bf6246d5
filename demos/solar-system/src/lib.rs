use wasm_bindgen::prelude::*;

mod bodies;
mod controls;
mod game;
mod orbit;
mod session;
use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");

// ---- Demo-specific queries for the host page ----

/// Name of the body at `index`, or an empty string.
#[wasm_bindgen]
pub fn solar_body_name(index: u32) -> String {
    with_runner(|r| r.game().body_name(index as usize).unwrap_or_default().to_string())
}

/// Slider descriptors and pause label as JSON.
#[wasm_bindgen]
pub fn solar_controls_json() -> String {
    with_runner(|r| match r.game().controls_json() {
        Ok(json) => json,
        Err(err) => {
            log::warn!("failed to serialize controls: {}", err);
            String::new()
        }
    })
}

#[wasm_bindgen]
pub fn solar_pause_label() -> String {
    with_runner(|r| r.game().pause_label().to_string())
}

#[wasm_bindgen]
pub fn solar_body_count() -> u32 {
    with_runner(|r| r.game().body_count() as u32)
}

/// Selected body index, or -1.
#[wasm_bindgen]
pub fn solar_selected() -> i32 {
    with_runner(|r| r.game().selected().map(|i| i as i32).unwrap_or(-1))
}

#[wasm_bindgen]
pub fn solar_is_zoomed() -> bool {
    with_runner(|r| r.game().is_zoomed())
}

#[wasm_bindgen]
pub fn solar_is_transitioning() -> bool {
    with_runner(|r| r.game().is_transitioning())
}
