//! Torque Viz - drag a force application point around a rigid circle
//!
//! Core modules:
//! - `sim`: Torque geometry and per-tick interaction update
//! - `platform`: Input/display seams and frame pacing
//! - `renderer`: Shape tessellation, frame batching and the WebGPU pipeline
//! - `session`: The fixed-rate poll/update/draw/present loop
//! - `settings`: Scene constants with JSON overrides

pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{Session, SessionError, SessionReport, TickOutcome};
pub use settings::{Settings, SettingsError};

/// Scene configuration constants
pub mod consts {
    /// Fixed tick rate
    pub const TICK_RATE_HZ: u32 = 60;
    /// Highest accepted tick rate
    pub const MAX_TICK_RATE_HZ: u32 = 1000;
    /// Maximum ticks run per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta fed to the tick accumulator (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Rigid body radius (pixels)
    pub const CIRCLE_RADIUS: f64 = 300.0;
    /// Applied force, straight down
    pub const FORCE: [f64; 2] = [0.0, -1.0];
    /// Compass angle of the initial application point (degrees, 0 = top)
    pub const INITIAL_ANGLE_DEG: f64 = 0.0;

    /// Length multiplier for drawn force/torque vectors
    pub const VECTOR_SCALE: f64 = 300.0;
    pub const STROKE_WIDTH: f64 = 3.0;
    pub const POINT_RADIUS: f64 = 6.0;
    pub const HALO_RADIUS: f64 = 10.0;

    /// Magnitude text placement
    pub const TEXT_POSITION: [f64; 2] = [500.0, 100.0];
    pub const TEXT_SCALE: f64 = 10.0;

    /// Default display size (pixels)
    pub const WINDOW_SIZE: [u32; 2] = [1280, 800];
}

/// Round `value` to `places` decimal places, half away from zero
#[inline]
pub fn round_to_places(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
