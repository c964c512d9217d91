//! Per-frame draw buffer
//!
//! `FrameBatch` is a headless `DisplaySurface`: it tessellates primitives into
//! vertices and collects text. The GPU surface wraps one and uploads its
//! vertices on present.

use glam::DVec2;

use super::shapes;
use super::vertex::Vertex;
use crate::platform::{Color, DisplaySurface, SurfaceError};

/// A text item submitted during a frame
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub position: DVec2,
    pub scale: f64,
}

/// Vertices and text for one frame
#[derive(Debug, Default)]
pub struct FrameBatch {
    vertices: Vec<Vertex>,
    texts: Vec<TextItem>,
    /// Frames presented so far
    frames: u64,
    /// Set once present has run; the next primitive starts a fresh frame
    presented: bool,
    closed: bool,
}

impl FrameBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn texts(&self) -> &[TextItem] {
        &self.texts
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Mark the surface closed (as if the window went away)
    pub fn close(&mut self) {
        self.closed = true;
    }

    fn begin(&mut self) {
        if self.presented {
            self.vertices.clear();
            self.texts.clear();
            self.presented = false;
        }
    }
}

impl DisplaySurface for FrameBatch {
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color) {
        self.begin();
        let radius = radius as f32;
        self.vertices.extend(shapes::circle(
            center.as_vec2(),
            radius,
            color.to_array(),
            shapes::segments_for(radius),
        ));
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f64, color: Color) {
        self.begin();
        let radius = radius as f32;
        self.vertices.extend(shapes::ring(
            center.as_vec2(),
            radius,
            width as f32,
            color.to_array(),
            shapes::segments_for(radius),
        ));
    }

    fn line(&mut self, a: DVec2, b: DVec2, width: f64, color: Color) {
        self.begin();
        self.vertices.extend(shapes::line_segment(
            a.as_vec2(),
            b.as_vec2(),
            width as f32,
            color.to_array(),
        ));
    }

    fn text(&mut self, text: &str, position: DVec2, scale: f64) {
        self.begin();
        self.texts.push(TextItem {
            text: text.to_owned(),
            position,
            scale,
        });
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        self.frames += 1;
        self.presented = true;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_collects_until_next_frame() {
        let mut batch = FrameBatch::new();
        batch.fill_circle(DVec2::ZERO, 6.0, Color::WHITE);
        batch.text("1", DVec2::new(500.0, 100.0), 10.0);
        batch.present().unwrap();
        assert_eq!(batch.frames(), 1);
        assert_eq!(batch.vertices().len(), 16 * 3);
        assert_eq!(batch.texts()[0].text, "1");

        // Next frame clears the previous contents
        batch.line(DVec2::ZERO, DVec2::new(10.0, 0.0), 3.0, Color::WHITE);
        assert_eq!(batch.vertices().len(), 6);
        assert!(batch.texts().is_empty());
    }

    #[test]
    fn test_close_flag() {
        let mut batch = FrameBatch::new();
        assert!(!batch.is_closed());
        batch.close();
        assert!(batch.is_closed());
    }
}
