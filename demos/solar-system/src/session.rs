/// Per-session interaction state: pause flag, selection, home position,
/// pointer and tooltip.

use glam::{Vec2, Vec3};

use crate::bodies::BodyIndex;

/// Tooltip anchor offset from the pointer, in pixels.
pub const TOOLTIP_OFFSET: f32 = 10.0;

/// Viewport widths (inclusive) at which the camera backs further away.
const PHONE_MAX_WIDTH: f32 = 480.0;
const TABLET_MAX_WIDTH: f32 = 768.0;

/// Default camera position for a viewport width. The camera looks down at
/// the origin from there.
pub fn home_position_for_width(width: f32) -> Vec3 {
    if width <= PHONE_MAX_WIDTH {
        Vec3::new(0.0, 170.0, 0.0)
    } else if width <= TABLET_MAX_WIDTH {
        Vec3::new(0.0, 150.0, 0.0)
    } else {
        Vec3::new(0.0, 100.0, 0.0)
    }
}

/// Viewport pixels (origin top-left, y down) to normalized device
/// coordinates (y up).
pub fn normalize_pointer(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(x / width * 2.0 - 1.0, -(y / height * 2.0 - 1.0))
}

/// A visible tooltip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tooltip {
    /// Anchor in viewport pixels.
    pub x: f32,
    pub y: f32,
    pub body: BodyIndex,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub paused: bool,
    pub selected: Option<BodyIndex>,
    pub zoomed: bool,
    pub home: Vec3,
    pub viewport: (f32, f32),
    /// Last pointer position in NDC.
    pub pointer: Vec2,
    pub tooltip: Option<Tooltip>,
}

impl Session {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            paused: false,
            selected: None,
            zoomed: false,
            home: home_position_for_width(width),
            viewport: (width, height),
            pointer: Vec2::ZERO,
            tooltip: None,
        }
    }

    /// Flip the pause flag, returning the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Record a new viewport size and recompute home.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
        self.home = home_position_for_width(width);
    }

    /// Store the pointer in NDC and return it.
    pub fn track_pointer(&mut self, x: f32, y: f32) -> Vec2 {
        self.pointer = normalize_pointer(x, y, self.viewport.0, self.viewport.1);
        self.pointer
    }

    /// Show the tooltip for `body` next to pixel (x, y), or hide it.
    pub fn set_hover(&mut self, x: f32, y: f32, body: Option<BodyIndex>) -> Option<Tooltip> {
        self.tooltip = body.map(|body| Tooltip {
            x: x + TOOLTIP_OFFSET,
            y: y + TOOLTIP_OFFSET,
            body,
        });
        self.tooltip
    }

    pub fn select(&mut self, body: BodyIndex) {
        self.selected = Some(body);
        self.zoomed = true;
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.zoomed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_tiers() {
        assert_eq!(home_position_for_width(400.0), Vec3::new(0.0, 170.0, 0.0));
        assert_eq!(home_position_for_width(480.0), Vec3::new(0.0, 170.0, 0.0));
        assert_eq!(home_position_for_width(600.0), Vec3::new(0.0, 150.0, 0.0));
        assert_eq!(home_position_for_width(768.0), Vec3::new(0.0, 150.0, 0.0));
        assert_eq!(home_position_for_width(1000.0), Vec3::new(0.0, 100.0, 0.0));
    }

    #[test]
    fn pointer_normalization() {
        assert_eq!(normalize_pointer(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
        assert_eq!(normalize_pointer(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
        assert_eq!(normalize_pointer(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
        assert_eq!(normalize_pointer(10.0, 10.0, 0.0, 600.0), Vec2::ZERO);
    }

    #[test]
    fn hover_offsets_tooltip() {
        let mut session = Session::new(1000.0, 800.0);
        let tip = session.set_hover(100.0, 50.0, Some(2)).unwrap();
        assert_eq!((tip.x, tip.y, tip.body), (110.0, 60.0, 2));
        assert!(session.set_hover(100.0, 50.0, None).is_none());
        assert!(session.tooltip.is_none());
    }

    #[test]
    fn resize_moves_home() {
        let mut session = Session::new(1000.0, 800.0);
        session.resize(600.0, 800.0);
        assert_eq!(session.home, Vec3::new(0.0, 150.0, 0.0));
        assert_eq!(session.viewport, (600.0, 800.0));
    }

    #[test]
    fn selection_and_pause_flags() {
        let mut session = Session::new(1000.0, 800.0);
        session.select(4);
        assert_eq!((session.selected, session.zoomed), (Some(4), true));
        session.clear_selection();
        assert_eq!((session.selected, session.zoomed), (None, false));
        assert!(session.toggle_pause());
        assert!(!session.toggle_pause());
    }
}
