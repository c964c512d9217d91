//! Per-tick interaction update
//!
//! Drag transitions:
//! - `Idle -> Dragging` when the primary button is pressed
//! - `Dragging -> Dragging` while held; the boundary point follows the pointer
//! - `Dragging -> Idle` (or stay `Idle`) when released
//!
//! A pointer sitting exactly on the circle center has no projection direction,
//! so that tick keeps the previous boundary point.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Circle, closest_point_on_circle};
use super::state::{DragState, FrameSnapshot, SceneState};

/// Input sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Pointer position in display space (y-up)
    pub pointer: DVec2,
    /// Primary pointer button held
    pub primary_pressed: bool,
    /// Close/escape requested this tick
    pub close_requested: bool,
}

/// Advance the scene by one tick
pub fn tick(state: &mut SceneState, input: &TickInput, circle: &Circle) -> FrameSnapshot {
    let next = if input.primary_pressed {
        DragState::Dragging
    } else {
        DragState::Idle
    };
    if next != state.drag {
        log::debug!("Drag {:?} -> {:?}", state.drag, next);
        state.drag = next;
    }

    if state.drag == DragState::Dragging {
        match closest_point_on_circle(circle, input.pointer) {
            Some(point) => state.boundary_point = point,
            None => log::trace!("Pointer at circle center, keeping boundary point"),
        }
    }

    state.refresh_derived(circle);

    let snapshot = state.snapshot();
    log::trace!("Torque magnitude {}", snapshot.magnitude);
    snapshot
}

/// Owns the scene and applies [`tick`] each frame
#[derive(Debug, Clone)]
pub struct InteractionController {
    circle: Circle,
    state: SceneState,
}

impl InteractionController {
    pub fn new(circle: Circle, force: DVec2, initial_angle: f64) -> Self {
        let state = SceneState::new(&circle, force, initial_angle);
        Self { circle, state }
    }

    pub fn update(&mut self, input: &TickInput) -> FrameSnapshot {
        tick(&mut self.state, input, &self.circle)
    }

    pub fn circle(&self) -> &Circle {
        &self.circle
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        self.state.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOWN: DVec2 = DVec2::new(0.0, -1.0);

    fn controller() -> InteractionController {
        InteractionController::new(Circle::new(DVec2::ZERO, 300.0), DOWN, 0.0)
    }

    fn press(x: f64, y: f64) -> TickInput {
        TickInput {
            pointer: DVec2::new(x, y),
            primary_pressed: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_ignores_pointer() {
        let mut ctl = controller();
        let before = ctl.state().clone();
        let input = TickInput {
            pointer: DVec2::new(300.0, 0.0),
            ..Default::default()
        };
        let snap = ctl.update(&input);
        assert_eq!(ctl.state(), &before);
        assert_eq!(snap.magnitude, 0.0);
    }

    #[test]
    fn test_drag_to_right() {
        let mut ctl = controller();
        let snap = ctl.update(&press(300.0, 0.0));
        assert_eq!(ctl.state().drag, DragState::Dragging);
        assert_eq!(snap.boundary_point, DVec2::new(300.0, 0.0));
        assert_eq!(snap.tangent, DVec2::new(0.0, 1.0));
        assert_eq!(snap.magnitude, 1.0);
    }

    #[test]
    fn test_drag_projects_far_pointer() {
        let mut ctl = controller();
        let snap = ctl.update(&press(0.0, -900.0));
        assert!((snap.boundary_point - DVec2::new(0.0, -300.0)).length() < 1e-9);
        assert_eq!(snap.magnitude, 0.0);
    }

    #[test]
    fn test_release_returns_to_idle_and_keeps_point() {
        let mut ctl = controller();
        ctl.update(&press(300.0, 0.0));
        let snap = ctl.update(&TickInput {
            pointer: DVec2::new(-300.0, 0.0),
            ..Default::default()
        });
        assert_eq!(ctl.state().drag, DragState::Idle);
        assert_eq!(snap.boundary_point, DVec2::new(300.0, 0.0));
    }

    #[test]
    fn test_pointer_at_center_keeps_state() {
        let mut ctl = controller();
        ctl.update(&press(300.0, 0.0));
        let before = ctl.state().clone();

        let snap = ctl.update(&press(0.0, 0.0));
        assert_eq!(ctl.state(), &before);
        assert!(snap.boundary_point.is_finite());
        assert!(snap.tangent.is_finite());
        assert!(snap.torque.is_finite());
        assert_eq!(snap.magnitude, 1.0);
    }

    #[test]
    fn test_press_at_center_from_idle() {
        let mut ctl = controller();
        let before = ctl.state().boundary_point;
        let snap = ctl.update(&press(0.0, 0.0));
        assert_eq!(ctl.state().drag, DragState::Dragging);
        assert_eq!(snap.boundary_point, before);
        assert!(!snap.magnitude.is_nan());
    }

    #[test]
    fn test_boundary_invariant_over_drag() {
        let mut ctl = controller();
        for i in 0..360 {
            let theta = (i as f64).to_radians();
            let pointer = DVec2::new(theta.cos(), theta.sin()) * (50.0 + i as f64);
            let snap = ctl.update(&press(pointer.x, pointer.y));
            assert!((snap.boundary_point.length() - 300.0).abs() < 1e-9);
            assert!((snap.tangent.length() - 1.0).abs() < 1e-12);
        }
    }
}
