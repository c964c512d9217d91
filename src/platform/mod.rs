//! Platform abstraction layer
//!
//! The scene core talks to the outside world through two seams:
//! - `InputSource`: pointer/button/close state, polled once per tick
//! - `DisplaySurface`: immediate-mode primitives, text, and a present call
//!
//! Plus tick pacing (`clock`) and a replayable input source (`scripted`).

pub mod clock;
pub mod scripted;

use glam::DVec2;
use thiserror::Error;

use crate::sim::TickInput;

pub use clock::TickAccumulator;
#[cfg(not(target_arch = "wasm32"))]
pub use clock::FramePacer;
pub use scripted::ScriptedInput;

/// RGBA color, components in 0-1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const BLACK: Color = Color([0.0, 0.0, 0.0, 1.0]);
    pub const WHITE: Color = Color([1.0, 1.0, 1.0, 1.0]);
    /// rgb(105, 105, 105)
    pub const DIM_GRAY: Color = Color::rgb8(105, 105, 105);
    /// rgb(50, 50, 50)
    pub const HALO: Color = Color::rgb8(50, 50, 50);

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Color([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0])
    }

    pub const fn to_array(self) -> [f32; 4] {
        self.0
    }
}

/// Errors a display surface can report while presenting
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("display surface lost")]
    Lost,
    #[error("display surface out of memory")]
    OutOfMemory,
}

/// Source of per-tick input
pub trait InputSource {
    /// Sample pointer, button and close state for this tick
    fn poll(&mut self) -> TickInput;
}

/// Immediate-mode drawing target, fed once per tick
///
/// Coordinates are display pixels with the origin at the bottom-left, y up.
/// The surface is released when dropped.
pub trait DisplaySurface {
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color);

    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f64, color: Color);

    fn line(&mut self, a: DVec2, b: DVec2, width: f64, color: Color);

    fn text(&mut self, text: &str, position: DVec2, scale: f64);

    /// Flush this tick's primitives
    fn present(&mut self) -> Result<(), SurfaceError>;

    /// Closed externally (window closed, tab gone)
    fn is_closed(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb8_palette() {
        assert_eq!(Color::rgb8(255, 255, 255), Color::WHITE);
        let [r, g, b, a] = Color::DIM_GRAY.to_array();
        assert!((r - 105.0 / 255.0).abs() < 1e-6);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(a, 1.0);
    }

    #[test]
    fn test_surface_error_messages() {
        assert_eq!(SurfaceError::Lost.to_string(), "display surface lost");
        assert_eq!(
            SurfaceError::OutOfMemory.to_string(),
            "display surface out of memory"
        );
    }
}
