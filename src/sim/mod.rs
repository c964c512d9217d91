//! Torque model and interaction update
//!
//! Everything here is pure and platform-free:
//! - `geometry`: projection, angle conversion, tangent and torque
//! - `state`: scene data and drag state
//! - `tick`: the per-tick update rule and its owning controller

pub mod geometry;
pub mod state;
pub mod tick;

pub use geometry::{
    Circle, angle_to_point, closest_point_on_circle, tangent, torque, torque_magnitude,
};
pub use state::{DragState, FrameSnapshot, SceneState};
pub use tick::{InteractionController, TickInput, tick};
