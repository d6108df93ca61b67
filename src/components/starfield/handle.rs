//! Browser wiring: `requestAnimationFrame` loop and resize listener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, Window};

use super::engine::{LoopToken, RenderMode, Starfield};
use super::error::StarfieldError;
use super::surface::CanvasSurface;
use super::theme::Theme;
use super::types::{StarfieldConfig, Viewport};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A running starfield attached to a canvas.
///
/// Owns the frame callback and resize listener; [`teardown`](Self::teardown)
/// (or dropping the handle) releases both.
pub struct StarfieldHandle {
	window: Window,
	engine: Rc<RefCell<Starfield<CanvasSurface>>>,
	token: LoopToken,
	frame_cb: FrameCallback,
	frame_id: Rc<Cell<Option<i32>>>,
	resize_cb: Option<Closure<dyn FnMut()>>,
}

impl StarfieldHandle {
	/// Attach to `canvas`, size it to the window and start rendering.
	pub fn attach(canvas: HtmlCanvasElement, config: &StarfieldConfig) -> Result<Self, StarfieldError> {
		let window = web_sys::window().ok_or(StarfieldError::NoWindow)?;
		let surface = CanvasSurface::acquire(canvas)?;

		let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
		let reduced = config.motion.reduced(prefers_reduced_motion(&window));
		let mut engine = Starfield::new(surface, Theme::for_intensity(config.intensity), seed);
		let mode = engine.initialize(viewport(&window), reduced);
		let token = engine.token();

		let mut handle = Self {
			window,
			engine: Rc::new(RefCell::new(engine)),
			token,
			frame_cb: Rc::new(RefCell::new(None)),
			frame_id: Rc::new(Cell::new(None)),
			resize_cb: None,
		};

		handle.listen_for_resize()?;
		if mode == RenderMode::Animated {
			handle.start_loop();
		}
		Ok(handle)
	}

	/// Cancel the pending frame, remove the resize listener and discard
	/// particles. Safe to call more than once.
	pub fn teardown(&mut self) {
		self.token.cancel();
		if let Some(id) = self.frame_id.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		if let Some(cb) = self.resize_cb.take() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		// Breaks the closure's reference to itself.
		self.frame_cb.borrow_mut().take();
		if let Ok(mut engine) = self.engine.try_borrow_mut() {
			engine.teardown();
		}
	}

	fn listen_for_resize(&mut self) -> Result<(), StarfieldError> {
		let (engine, window) = (self.engine.clone(), self.window.clone());
		let cb: Closure<dyn FnMut()> = Closure::new(move || {
			let vp = viewport(&window);
			debug!("starfield: resize to {}x{}", vp.width, vp.height);
			engine.borrow_mut().on_resize(vp);
		});

		self.window
			.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
			.map_err(|e| StarfieldError::Listener {
				event: "resize",
				reason: format!("{:?}", e),
			})?;
		self.resize_cb = Some(cb);
		Ok(())
	}

	fn start_loop(&mut self) {
		let (engine, token, window) = (self.engine.clone(), self.token.clone(), self.window.clone());
		let (frame_inner, frame_id) = (self.frame_cb.clone(), self.frame_id.clone());

		*self.frame_cb.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			frame_id.set(None);
			if !token.is_active() {
				return;
			}
			if !engine.borrow_mut().tick(timestamp) {
				return;
			}
			if let Some(ref cb) = *frame_inner.borrow() {
				frame_id.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));

		if let Some(ref cb) = *self.frame_cb.borrow() {
			self.frame_id
				.set(self.window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
		info!("starfield: animation loop started");
	}
}

impl Drop for StarfieldHandle {
	fn drop(&mut self) {
		self.teardown();
	}
}

fn viewport(window: &Window) -> Viewport {
	let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	Viewport::new(dim(window.inner_width()), dim(window.inner_height()))
}

fn prefers_reduced_motion(window: &Window) -> bool {
	window
		.match_media(REDUCED_MOTION_QUERY)
		.ok()
		.flatten()
		.map(|mq| mq.matches())
		.unwrap_or(false)
}
