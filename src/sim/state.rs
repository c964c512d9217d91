//! Scene state and drag state machine

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Circle, angle_to_point, tangent, torque, torque_magnitude};

/// Pointer drag phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragState {
    /// Primary button released
    #[default]
    Idle,
    /// Primary button held; the boundary point follows the pointer
    Dragging,
}

/// Mutable scene data, one instance per session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    /// Force application point, always on the circle boundary
    pub boundary_point: DVec2,
    /// Constant applied force
    pub force: DVec2,
    /// Unit tangent at `boundary_point` (derived)
    pub tangent: DVec2,
    /// Torque vector along `tangent` (derived)
    pub torque: DVec2,
    pub drag: DragState,
}

impl SceneState {
    /// Initial scene with the boundary point placed at `initial_angle` degrees
    pub fn new(circle: &Circle, force: DVec2, initial_angle: f64) -> Self {
        let mut state = Self {
            boundary_point: angle_to_point(circle, initial_angle),
            force,
            tangent: DVec2::ZERO,
            torque: DVec2::ZERO,
            drag: DragState::Idle,
        };
        state.refresh_derived(circle);
        state
    }

    /// Recompute tangent and torque from the current boundary point.
    ///
    /// Leaves both untouched if the tangent is degenerate.
    pub fn refresh_derived(&mut self, circle: &Circle) {
        if let Some(t) = tangent(circle, self.boundary_point) {
            self.tangent = t;
            self.torque = torque(t, self.force);
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            boundary_point: self.boundary_point,
            tangent: self.tangent,
            torque: self.torque,
            magnitude: torque_magnitude(self.torque),
        }
    }
}

/// Per-tick output handed to the display surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub boundary_point: DVec2,
    pub tangent: DVec2,
    pub torque: DVec2,
    /// `|torque|` rounded to 5 decimal places
    pub magnitude: f64,
}

impl FrameSnapshot {
    /// Text shown on screen
    ///
    /// Shortest round-trip decimal; magnitudes below 1e-4 switch to exponent
    /// form with a signed two-digit exponent (`3e-05`).
    pub fn label(&self) -> String {
        let m = self.magnitude;
        if m == 0.0 || m.abs() >= 1e-4 {
            return m.to_string();
        }
        let formatted = format!("{:e}", m);
        match formatted.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(d) => ('-', d),
                    None => ('+', exp),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => formatted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_at_top() {
        let circle = Circle::new(DVec2::ZERO, 300.0);
        let state = SceneState::new(&circle, DVec2::new(0.0, -1.0), 0.0);
        assert_eq!(state.drag, DragState::Idle);
        assert!((state.boundary_point - DVec2::new(0.0, 300.0)).length() < 1e-9);
        assert!((state.tangent - DVec2::new(-1.0, 0.0)).length() < 1e-9);
        assert_eq!(state.snapshot().magnitude, 0.0);
    }

    #[test]
    fn test_label_formatting() {
        let circle = Circle::new(DVec2::ZERO, 300.0);
        let state = SceneState::new(&circle, DVec2::new(0.0, -1.0), 45.0);
        assert_eq!(state.snapshot().label(), "0.70711");

        let state = SceneState::new(&circle, DVec2::new(0.0, -1.0), 90.0);
        assert_eq!(state.snapshot().label(), "1");
    }

    #[test]
    fn test_label_small_magnitudes_use_exponent() {
        let snap = |magnitude| FrameSnapshot {
            boundary_point: DVec2::ZERO,
            tangent: DVec2::X,
            torque: DVec2::ZERO,
            magnitude,
        };
        assert_eq!(snap(0.00003).label(), "3e-05");
        assert_eq!(snap(0.00001).label(), "1e-05");
        assert_eq!(snap(0.0001).label(), "0.0001");
        assert_eq!(snap(0.0).label(), "0");
    }
}
