//! Drawing surface abstraction.
//!
//! The renderer only talks to [`Surface`]; [`CanvasSurface`] backs it with an
//! HTML canvas 2D context.

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::error::StarfieldError;
use super::theme::{BackgroundStyle, Color};
use super::types::Viewport;

/// The drawing operations the starfield needs.
///
/// Colors carry the final display alpha in `a`.
pub trait Surface {
	/// Resize the backing store to the viewport.
	fn resize(&mut self, viewport: Viewport);

	/// Clear and paint the background. Called exactly once per drawn frame.
	fn begin_frame(&mut self, background: &BackgroundStyle, viewport: Viewport);

	/// Solid filled circle.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);

	/// Filled circle with a same-colored shadow glow.
	fn fill_glow(&mut self, x: f64, y: f64, radius: f64, color: Color, blur: f64);

	/// Circle filled with a radial gradient fading to transparent.
	fn fill_radial(&mut self, x: f64, y: f64, radius: f64, color: Color);
}

/// Canvas 2D implementation.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Obtain the 2D context of `canvas`.
	pub fn acquire(canvas: HtmlCanvasElement) -> Result<Self, StarfieldError> {
		let ctx = canvas
			.get_context("2d")
			.map_err(|e| StarfieldError::ContextQuery(format!("{:?}", e)))?
			.ok_or(StarfieldError::ContextUnavailable)?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| StarfieldError::ContextUnavailable)?;
		Ok(Self { canvas, ctx })
	}

	fn circle(&self, x: f64, y: f64, radius: f64) {
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius.max(0.0), 0.0, PI * 2.0);
		self.ctx.fill();
	}
}

impl Surface for CanvasSurface {
	fn resize(&mut self, viewport: Viewport) {
		self.canvas.set_width(viewport.width.max(0.0) as u32);
		self.canvas.set_height(viewport.height.max(0.0) as u32);
	}

	fn begin_frame(&mut self, background: &BackgroundStyle, viewport: Viewport) {
		let (w, h) = (viewport.width, viewport.height);
		self.ctx.set_global_alpha(1.0);
		self.ctx.clear_rect(0.0, 0.0, w, h);

		match background {
			BackgroundStyle::Solid(color) => {
				self.ctx.set_fill_style_str(&color.to_css());
			}
			BackgroundStyle::Vertical { top, bottom } => {
				let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
				let _ = gradient.add_color_stop(0.0, &top.to_css());
				let _ = gradient.add_color_stop(1.0, &bottom.to_css());
				#[allow(deprecated)]
				self.ctx.set_fill_style(&gradient);
			}
		}
		self.ctx.fill_rect(0.0, 0.0, w, h);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.ctx.set_global_alpha(color.a);
		self.ctx.set_fill_style_str(&color.to_css_rgb());
		self.circle(x, y, radius);
		self.ctx.set_global_alpha(1.0);
	}

	fn fill_glow(&mut self, x: f64, y: f64, radius: f64, color: Color, blur: f64) {
		self.ctx.save();
		self.ctx.set_shadow_blur(blur);
		self.ctx.set_shadow_color(&color.to_css_rgb());
		self.ctx.set_global_alpha(color.a);
		self.ctx.set_fill_style_str(&color.to_css_rgb());
		self.circle(x, y, radius);
		self.ctx.restore();
	}

	fn fill_radial(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		let Ok(gradient) = self
			.ctx
			.create_radial_gradient(x, y, 0.0, x, y, radius.max(0.0))
		else {
			return;
		};
		let _ = gradient.add_color_stop(0.0, &color.to_css_rgb());
		let _ = gradient.add_color_stop(1.0, "transparent");

		self.ctx.save();
		self.ctx.set_global_alpha(color.a);
		#[allow(deprecated)]
		self.ctx.set_fill_style(&gradient);
		self.circle(x, y, radius);
		self.ctx.restore();
	}
}
