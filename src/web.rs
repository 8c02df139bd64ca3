// web.rs - Browser driver
//
// Finds the canvas, keeps it sized to the window, and runs the field from
// requestAnimationFrame until stopped. Everything runs on the page thread;
// the resize listener and the frame callback never overlap.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Math;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::config::PetalConfig;
use crate::error::{PetalError, Result};
use crate::render::{Canvas, PetalPath, RadialGradient};
use crate::sim::PetalField;
use crate::surface::SurfaceScale;

/// A 2d context as a petal `Canvas`.
struct Context2d(CanvasRenderingContext2d);

impl Canvas for Context2d {
    fn clear(&mut self, width: f32, height: f32) -> Result<()> {
        self.0.clear_rect(0.0, 0.0, width as f64, height as f64);
        Ok(())
    }

    fn save(&mut self) {
        self.0.save();
    }

    fn restore(&mut self) {
        self.0.restore();
    }

    fn translate(&mut self, x: f32, y: f32) -> Result<()> {
        self.0
            .translate(x as f64, y as f64)
            .map_err(PetalError::browser)
    }

    fn rotate(&mut self, angle: f32) -> Result<()> {
        self.0.rotate(angle as f64).map_err(PetalError::browser)
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.0.set_global_alpha(alpha);
    }

    fn fill_petal(&mut self, path: &PetalPath, gradient: &RadialGradient) -> Result<()> {
        let fill = self
            .0
            .create_radial_gradient(0.0, 0.0, 0.0, 0.0, 0.0, gradient.radius as f64)
            .map_err(PetalError::browser)?;
        fill.add_color_stop(0.0, gradient.inner)
            .map_err(PetalError::browser)?;
        fill.add_color_stop(1.0, gradient.outer)
            .map_err(PetalError::browser)?;
        self.0.set_fill_style_canvas_gradient(&fill);

        let ctx = &self.0;
        let [sx, sy] = path.start;
        ctx.begin_path();
        ctx.move_to(sx as f64, sy as f64);
        for curve in [path.right, path.left] {
            ctx.bezier_curve_to(
                curve.c1[0] as f64,
                curve.c1[1] as f64,
                curve.c2[0] as f64,
                curve.c2[1] as f64,
                curve.to[0] as f64,
                curve.to[1] as f64,
            );
        }
        ctx.close_path();
        ctx.fill();
        Ok(())
    }
}

struct Driver {
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: Context2d,
    field: PetalField,
    last_frame: Option<f64>,
    frame_id: Option<i32>,
    running: bool,
}

impl Driver {
    fn measure(window: &Window) -> Result<SurfaceScale> {
        let width = window.inner_width().map_err(PetalError::browser)?;
        let height = window.inner_height().map_err(PetalError::browser)?;
        Ok(SurfaceScale::compute(
            width.as_f64().unwrap_or(0.0),
            height.as_f64().unwrap_or(0.0),
            window.device_pixel_ratio(),
        ))
    }

    // Resizing the canvas resets its transform, so the scale goes on after.
    fn apply(canvas: &HtmlCanvasElement, ctx: &Context2d, scale: &SurfaceScale) -> Result<()> {
        canvas.set_width(scale.pixel_width);
        canvas.set_height(scale.pixel_height);
        let [a, b, c, d, e, f] = scale.transform();
        ctx.0
            .set_transform(a, b, c, d, e, f)
            .map_err(PetalError::browser)
    }

    fn resize(&mut self) -> Result<()> {
        let scale = Self::measure(&self.window)?;
        Self::apply(&self.canvas, &self.ctx, &scale)?;
        self.field.resize(scale.viewport);
        log::debug!(
            "[petals] resized to {}x{} @{} ({}x{} px)",
            scale.viewport.width,
            scale.viewport.height,
            scale.ratio,
            scale.pixel_width,
            scale.pixel_height
        );
        Ok(())
    }

    fn tick(&mut self, now: f64) {
        let delta = self.last_frame.map_or(0.0, |last| (now - last).max(0.0));
        self.last_frame = Some(now);

        match self.field.frame(delta as f32, &mut self.ctx) {
            Ok(stats) if stats.recycled + stats.wrapped > 0 => log::trace!(
                "[petals] {} recycled, {} wrapped",
                stats.recycled,
                stats.wrapped
            ),
            Ok(_) => {}
            Err(err) => log::error!("[petals] frame failed: {err}"),
        }
    }

    fn schedule(&mut self, frame: &Closure<dyn FnMut(f64)>) {
        match self.window.request_animation_frame(frame.as_ref().unchecked_ref()) {
            Ok(id) => self.frame_id = Some(id),
            Err(err) => {
                log::error!("[petals] requestAnimationFrame failed: {err:?}");
                self.frame_id = None;
                self.running = false;
            }
        }
    }
}

struct Callbacks<F = Closure<dyn FnMut(f64)>, R = Closure<dyn FnMut()>> {
    frame: Option<F>,
    resize: Option<R>,
}

impl<F, R> Default for Callbacks<F, R> {
    fn default() -> Self {
        Self {
            frame: None,
            resize: None,
        }
    }
}

impl<F, R> Callbacks<F, R> {
    fn is_held(&self) -> bool {
        self.frame.is_some() || self.resize.is_some()
    }

    /// Drops both callbacks, handing the resize one to `detach` first.
    /// Returns false when there was nothing left to release.
    fn release(&mut self, detach: impl FnOnce(&R)) -> bool {
        let held = self.is_held();
        if let Some(resize) = self.resize.take() {
            detach(&resize);
        }
        self.frame = None;
        held
    }
}

/// Handle to a running petal animation. Dropping it leaves the animation
/// running for the life of the page; call `stop()` to tear it down.
#[wasm_bindgen]
pub struct PetalAnimation {
    driver: Rc<RefCell<Driver>>,
    callbacks: Rc<RefCell<Callbacks>>,
}

impl PetalAnimation {
    /// Returns `None` when the page has no usable canvas with this id.
    pub fn attach(canvas_id: &str, config: PetalConfig) -> Result<Option<Self>> {
        let Some(window) = web_sys::window() else {
            return Ok(None);
        };

        let canvas = window
            .document()
            .and_then(|doc| doc.get_element_by_id(canvas_id))
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
        let Some(canvas) = canvas else {
            log::debug!("[petals] no canvas #{canvas_id}, skipping");
            return Ok(None);
        };

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        let Some(ctx) = ctx else {
            log::debug!("[petals] #{canvas_id} has no 2d context, skipping");
            return Ok(None);
        };
        let ctx = Context2d(ctx);

        let scale = Driver::measure(&window)?;
        Driver::apply(&canvas, &ctx, &scale)?;

        let seed = config
            .seed
            .unwrap_or_else(|| (Math::random() * u64::MAX as f64) as u64);
        let field = PetalField::with_seed(config, scale.viewport, seed)?;
        let count = field.len();
        let last_frame = window.performance().map(|perf| perf.now());

        let animation = Self {
            driver: Rc::new(RefCell::new(Driver {
                window,
                canvas,
                ctx,
                field,
                last_frame,
                frame_id: None,
                running: true,
            })),
            callbacks: Rc::new(RefCell::new(Callbacks::default())),
        };

        animation.listen_resize()?;
        animation.start_loop();

        log::info!("[petals] started on #{canvas_id} with {count} petals");
        Ok(Some(animation))
    }

    fn listen_resize(&self) -> Result<()> {
        let driver = self.driver.clone();
        let resize = Closure::wrap(Box::new(move || {
            if let Err(err) = driver.borrow_mut().resize() {
                log::warn!("[petals] resize failed: {err}");
            }
        }) as Box<dyn FnMut()>);

        self.driver
            .borrow()
            .window
            .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
            .map_err(PetalError::browser)?;
        self.callbacks.borrow_mut().resize = Some(resize);
        Ok(())
    }

    // The frame closure reschedules itself through `callbacks`, which keeps
    // it alive until `stop()` takes it out.
    fn start_loop(&self) {
        let driver = self.driver.clone();
        let callbacks = self.callbacks.clone();
        let frame = Closure::wrap(Box::new(move |now: f64| {
            let callbacks = callbacks.borrow();
            let Some(frame) = callbacks.frame.as_ref() else {
                return;
            };
            let mut driver = driver.borrow_mut();
            if !driver.running {
                return;
            }
            driver.tick(now);
            driver.schedule(frame);
        }) as Box<dyn FnMut(f64)>);

        self.driver.borrow_mut().schedule(&frame);
        self.callbacks.borrow_mut().frame = Some(frame);
    }
}

#[wasm_bindgen]
impl PetalAnimation {
    /// Cancels the pending frame and removes the resize listener. Safe to
    /// call more than once, and still cleans up after the loop has halted
    /// on its own.
    pub fn stop(&self) {
        let mut driver = self.driver.borrow_mut();
        driver.running = false;

        if let Some(id) = driver.frame_id.take() {
            if let Err(err) = driver.window.cancel_animation_frame(id) {
                log::warn!("[petals] cancelAnimationFrame failed: {err:?}");
            }
        }

        let released = self.callbacks.borrow_mut().release(|resize| {
            if let Err(err) = driver
                .window
                .remove_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
            {
                log::warn!("[petals] removing resize listener failed: {err:?}");
            }
        });

        if released {
            log::info!("[petals] stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.driver.borrow().running
    }

    pub fn petal_count(&self) -> u32 {
        self.driver.borrow().field.len() as u32
    }

    pub fn width(&self) -> f32 {
        self.driver.borrow().field.viewport().width
    }

    pub fn height(&self) -> f32 {
        self.driver.borrow().field.viewport().height
    }
}

/// Start petals on the canvas with id `canvas_id`. `config` may be
/// `undefined`, a pool size, or an object like `{ preset: "month" }`.
/// Returns `undefined` when the page has no such canvas.
#[wasm_bindgen(js_name = initPetals)]
pub fn init_petals(canvas_id: &str, config: JsValue) -> std::result::Result<Option<PetalAnimation>, JsValue> {
    let config = PetalConfig::from_js(&config)?;
    Ok(PetalAnimation::attach(canvas_id, config)?)
}
