//! Scene drawing: turns a frame snapshot into surface primitives

use crate::platform::{Color, DisplaySurface};
use crate::settings::Settings;
use crate::sim::{Circle, FrameSnapshot};
use glam::DVec2;

/// Submit one frame of the torque scene (without presenting)
pub fn draw_scene<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    circle: &Circle,
    force: DVec2,
    snapshot: &FrameSnapshot,
    settings: &Settings,
) {
    let point = snapshot.boundary_point;
    let width = settings.stroke_width;

    // Halo behind the application point
    surface.fill_circle(point, settings.halo_radius, Color::HALO);

    surface.line(
        point,
        point + force * settings.vector_scale,
        width,
        Color::DIM_GRAY,
    );

    surface.fill_circle(point, settings.point_radius, Color::WHITE);
    surface.stroke_circle(circle.center, circle.radius, width, Color::WHITE);

    surface.line(
        point,
        point + snapshot.torque * settings.vector_scale,
        width,
        Color::WHITE,
    );

    surface.text(&snapshot.label(), settings.text_position, settings.text_scale);
}
