//! Torque Viz entry point
//!
//! Handles platform-specific initialization and runs the tick loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::DVec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use torque_viz::platform::{Color, DisplaySurface, InputSource, SurfaceError, TickAccumulator};
    use torque_viz::renderer::{FrameBatch, RenderState, Vertex};
    use torque_viz::sim::TickInput;
    use torque_viz::{Session, Settings, TickOutcome};

    /// Base glyph height the text scale multiplies (pixels)
    const GLYPH_HEIGHT: f64 = 13.0;

    /// Pointer state written by DOM event handlers, read once per tick
    #[derive(Debug, Default)]
    struct PointerState {
        pointer: DVec2,
        pressed: bool,
        close_requested: bool,
    }

    struct DomInput {
        pointer: Rc<RefCell<PointerState>>,
    }

    impl InputSource for DomInput {
        fn poll(&mut self) -> TickInput {
            let p = self.pointer.borrow();
            TickInput {
                pointer: p.pointer,
                primary_pressed: p.pressed,
                close_requested: p.close_requested,
            }
        }
    }

    /// WebGPU canvas plus a DOM element for the magnitude text
    struct CanvasSurface {
        render_state: RenderState,
        batch: FrameBatch,
        hud: Option<Element>,
        /// Device pixel ratio (CSS pixels -> backing pixels)
        dpr: f32,
    }

    impl DisplaySurface for CanvasSurface {
        fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color) {
            self.batch.fill_circle(center, radius, color);
        }

        fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f64, color: Color) {
            self.batch.stroke_circle(center, radius, width, color);
        }

        fn line(&mut self, a: DVec2, b: DVec2, width: f64, color: Color) {
            self.batch.line(a, b, width, color);
        }

        fn text(&mut self, text: &str, position: DVec2, scale: f64) {
            self.batch.text(text, position, scale);
        }

        fn present(&mut self) -> Result<(), SurfaceError> {
            let scaled: Vec<Vertex> = self
                .batch
                .vertices()
                .iter()
                .map(|v| Vertex::new(v.position[0] * self.dpr, v.position[1] * self.dpr, v.color))
                .collect();

            match self.render_state.render(&scaled) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => return Err(SurfaceError::OutOfMemory),
                Err(e) => log::warn!("Render error: {:?}", e),
            }

            if let (Some(hud), Some(item)) = (&self.hud, self.batch.texts().first()) {
                hud.set_text_content(Some(&item.text));
                let style = format!(
                    "left:{}px;bottom:{}px;font-size:{}px",
                    item.position.x,
                    item.position.y,
                    GLYPH_HEIGHT * item.scale
                );
                if let Err(e) = hud.set_attribute("style", &style) {
                    log::warn!("HUD style update failed: {:?}", e);
                }
            }

            self.batch.present()
        }

        fn is_closed(&self) -> bool {
            self.batch.is_closed()
        }
    }

    type WebSession = Session<DomInput, CanvasSurface>;

    struct App {
        session: Option<WebSession>,
        clock: TickAccumulator,
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Torque Viz starting...");

        let settings = Settings::load();

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .expect("Failed to create device");

        let surface = CanvasSurface {
            render_state,
            batch: FrameBatch::new(),
            hud: document.get_element_by_id("torque"),
            dpr: dpr as f32,
        };

        let pointer = Rc::new(RefCell::new(PointerState::default()));
        setup_input_handlers(&canvas, pointer.clone());

        let center = DVec2::new(client_w as f64, client_h as f64) / 2.0;
        let circle = settings.circle(center);
        let clock = TickAccumulator::new(settings.tick_rate_hz);
        let session = Session::new(settings, circle, DomInput { pointer }, surface);

        let app = Rc::new(RefCell::new(App {
            session: Some(session),
            clock,
        }));
        request_animation_frame(app);

        log::info!("Torque Viz running!");
    }

    /// Canvas-relative, y-up CSS pixel position
    fn canvas_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> DVec2 {
        let rect = canvas.get_bounding_client_rect();
        let x = client_x as f64 - rect.left();
        let y = client_y as f64 - rect.top();
        DVec2::new(x, canvas.client_height() as f64 - y)
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, pointer: Rc<RefCell<PointerState>>) {
        // Mouse move
        {
            let pointer = pointer.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                pointer.borrow_mut().pointer =
                    canvas_point(&canvas_clone, event.client_x(), event.client_y());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down (primary button only)
        {
            let pointer = pointer.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() == 0 {
                    let mut p = pointer.borrow_mut();
                    p.pointer = canvas_point(&canvas_clone, event.client_x(), event.client_y());
                    p.pressed = true;
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up / leave release the drag
        for name in ["mouseup", "mouseleave"] {
            let pointer = pointer.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                pointer.borrow_mut().pressed = false;
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start / move act as a held primary button
        for name in ["touchstart", "touchmove"] {
            let pointer = pointer.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut p = pointer.borrow_mut();
                    p.pointer = canvas_point(&canvas_clone, touch.client_x(), touch.client_y());
                    p.pressed = true;
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let pointer = pointer.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if event.touches().length() == 0 {
                    pointer.borrow_mut().pressed = false;
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Escape" {
                    pointer.borrow_mut().close_requested = true;
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let ticks = a.clock.advance_to(time);

            for _ in 0..ticks {
                let Some(session) = a.session.as_mut() else {
                    return;
                };
                match session.step() {
                    Ok(TickOutcome::Presented(_)) => {}
                    Ok(TickOutcome::Closed) => {
                        log::info!("Session closed after {} ticks", session.ticks());
                        a.session = None;
                        return;
                    }
                    Err(e) => {
                        log::error!("Fatal: {}", e);
                        a.session = None;
                        return;
                    }
                }
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use torque_viz::platform::ScriptedInput;
    use torque_viz::renderer::FrameBatch;
    use torque_viz::{Session, Settings};

    env_logger::init();
    log::info!("Torque Viz (native) starting...");
    log::info!("Native mode runs a scripted headless sweep - run with `trunk serve` for the interactive version");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let center = settings.display_center();
    let circle = settings.circle(center);
    let input = ScriptedInput::sweep(
        center,
        settings.circle_radius * 1.5,
        settings.tick_rate_hz.saturating_mul(3),
    );
    let session = Session::new(settings, circle, input, FrameBatch::new());

    match session.run() {
        Ok(report) => log::info!(
            "Sweep finished: {} ticks, final torque {}",
            report.ticks,
            report.last.label()
        ),
        Err(e) => {
            log::error!("Fatal: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
