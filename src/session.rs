//! Fixed-rate session loop
//!
//! Each tick: poll input, check for close, update the scene, draw, present.
//! A close request or an externally closed surface ends the session before any
//! update or draw for that tick.

use thiserror::Error;

use crate::platform::{DisplaySurface, InputSource, SurfaceError};
use crate::renderer::draw_scene;
use crate::settings::Settings;
use crate::sim::{Circle, FrameSnapshot, InteractionController};

/// Fatal session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("present failed: {0}")]
    Surface(#[from] SurfaceError),
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Frame updated, drawn and presented
    Presented(FrameSnapshot),
    /// Close requested or surface gone; nothing was drawn
    Closed,
}

/// Summary returned when a session ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionReport {
    /// Ticks presented
    pub ticks: u64,
    /// Last snapshot shown
    pub last: FrameSnapshot,
}

/// One interactive session: a controller bound to an input source and a surface
pub struct Session<I, S> {
    controller: InteractionController,
    settings: Settings,
    input: I,
    surface: S,
    ticks: u64,
}

impl<I: InputSource, S: DisplaySurface> Session<I, S> {
    pub fn new(settings: Settings, circle: Circle, input: I, surface: S) -> Self {
        let controller =
            InteractionController::new(circle, settings.force, settings.initial_angle_deg);
        Self {
            controller,
            settings,
            input,
            surface,
            ticks: 0,
        }
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one tick
    pub fn step(&mut self) -> Result<TickOutcome, SessionError> {
        let input = self.input.poll();
        if input.close_requested || self.surface.is_closed() {
            return Ok(TickOutcome::Closed);
        }

        let snapshot = self.controller.update(&input);
        let state = self.controller.state();
        draw_scene(
            &mut self.surface,
            self.controller.circle(),
            state.force,
            &snapshot,
            &self.settings,
        );
        self.surface.present()?;
        self.ticks += 1;

        Ok(TickOutcome::Presented(snapshot))
    }

    /// Tick at the configured rate until closed. The surface is released on return.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run(mut self) -> Result<SessionReport, SessionError> {
        let mut pacer = crate::platform::FramePacer::new(self.settings.tick_rate_hz);
        log::info!("Session running at {} Hz", self.settings.tick_rate_hz);

        loop {
            match self.step()? {
                TickOutcome::Presented(_) => pacer.wait(),
                TickOutcome::Closed => break,
            }
        }

        let report = self.report();
        log::info!("Session closed after {} ticks", report.ticks);
        Ok(report)
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            ticks: self.ticks,
            last: self.controller.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Color, ScriptedInput};
    use crate::renderer::FrameBatch;
    use crate::sim::TickInput;
    use glam::DVec2;

    fn press(p: DVec2) -> TickInput {
        TickInput {
            pointer: p,
            primary_pressed: true,
            close_requested: false,
        }
    }

    fn session(inputs: Vec<TickInput>) -> Session<ScriptedInput, FrameBatch> {
        let settings = Settings::default();
        let circle = settings.circle(DVec2::ZERO);
        Session::new(settings, circle, ScriptedInput::new(inputs), FrameBatch::new())
    }

    #[test]
    fn test_step_draws_and_presents() {
        let mut s = session(vec![press(DVec2::new(300.0, 0.0))]);
        let outcome = s.step().unwrap();
        let TickOutcome::Presented(snap) = outcome else {
            panic!("expected a presented frame");
        };
        assert_eq!(snap.magnitude, 1.0);
        assert_eq!(s.surface().frames(), 1);
        assert_eq!(s.surface().texts()[0].text, "1");
    }

    #[test]
    fn test_close_request_skips_update() {
        let mut s = session(vec![TickInput {
            pointer: DVec2::new(300.0, 0.0),
            primary_pressed: true,
            close_requested: true,
        }]);
        let before = s.controller().state().clone();
        assert_eq!(s.step().unwrap(), TickOutcome::Closed);
        assert_eq!(s.controller().state(), &before);
        assert_eq!(s.surface().frames(), 0);
        assert_eq!(s.ticks(), 0);
    }

    #[test]
    fn test_closed_surface_ends_session() {
        let mut s = session(vec![press(DVec2::new(300.0, 0.0))]);
        s.surface_mut().close();
        assert_eq!(s.step().unwrap(), TickOutcome::Closed);
        assert_eq!(s.surface().frames(), 0);
    }

    #[test]
    fn test_center_pointer_freezes_frame() {
        let mut s = session(vec![press(DVec2::new(300.0, 0.0)), press(DVec2::ZERO)]);
        let first = s.step().unwrap();
        let second = s.step().unwrap();
        assert_eq!(first, second);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_run_until_script_ends() {
        let s = session(vec![
            press(DVec2::new(0.0, -500.0)),
            press(DVec2::new(300.0, 0.0)),
            TickInput::default(),
        ]);
        let report = s.run().unwrap();
        assert_eq!(report.ticks, 3);
        assert_eq!(report.last.boundary_point, DVec2::new(300.0, 0.0));
        assert_eq!(report.last.magnitude, 1.0);
    }

    struct FailingSurface;

    impl DisplaySurface for FailingSurface {
        fn fill_circle(&mut self, _: DVec2, _: f64, _: Color) {}
        fn stroke_circle(&mut self, _: DVec2, _: f64, _: f64, _: Color) {}
        fn line(&mut self, _: DVec2, _: DVec2, _: f64, _: Color) {}
        fn text(&mut self, _: &str, _: DVec2, _: f64) {}
        fn present(&mut self) -> Result<(), SurfaceError> {
            Err(SurfaceError::Lost)
        }
        fn is_closed(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_present_failure_is_fatal() {
        let settings = Settings::default();
        let circle = settings.circle(DVec2::ZERO);
        let mut s = Session::new(
            settings,
            circle,
            ScriptedInput::new([TickInput::default()]),
            FailingSurface,
        );
        assert!(matches!(
            s.step(),
            Err(SessionError::Surface(SurfaceError::Lost))
        ));
    }
}
