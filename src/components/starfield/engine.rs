//! Starfield lifecycle: `Uninitialized -> Running -> TornDown`.
//!
//! The engine is platform-independent; the browser layer feeds it viewport
//! sizes and frame timestamps and owns the scheduling.

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::field::ParticleField;
use super::render;
use super::surface::Surface;
use super::theme::Theme;
use super::types::Viewport;

/// Frame duration the per-frame velocities are tuned for.
const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;
/// Longest step taken after a stall (e.g. a background tab).
const MAX_STEP_MS: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
	Uninitialized,
	Running,
	TornDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
	/// Redraw every display refresh.
	Animated,
	/// One frame, no loop.
	Static,
}

/// Shared cancellation flag checked at the top of every loop iteration.
#[derive(Clone, Debug, Default)]
pub struct LoopToken(Rc<Cell<bool>>);

impl LoopToken {
	pub fn is_active(&self) -> bool {
		self.0.get()
	}

	fn activate(&self) {
		self.0.set(true);
	}

	pub fn cancel(&self) {
		self.0.set(false);
	}
}

/// Owns the surface and particle population.
pub struct Starfield<S> {
	surface: S,
	theme: Theme,
	field: ParticleField,
	rng: SmallRng,
	lifecycle: Lifecycle,
	mode: RenderMode,
	token: LoopToken,
	last_timestamp: Option<f64>,
}

impl<S: Surface> Starfield<S> {
	pub fn new(surface: S, theme: Theme, seed: u64) -> Self {
		Self {
			surface,
			theme,
			field: ParticleField::default(),
			rng: SmallRng::seed_from_u64(seed),
			lifecycle: Lifecycle::Uninitialized,
			mode: RenderMode::Animated,
			token: LoopToken::default(),
			last_timestamp: None,
		}
	}

	/// Size the surface, generate particles and start running.
	///
	/// With `reduced_motion`, draws exactly one frame and returns
	/// [`RenderMode::Static`]; the caller must not schedule frames.
	pub fn initialize(&mut self, viewport: Viewport, reduced_motion: bool) -> RenderMode {
		match self.lifecycle {
			Lifecycle::Running => {
				warn!("starfield: initialize called while running, ignoring");
				return self.mode;
			}
			Lifecycle::TornDown => {
				warn!("starfield: initialize called after teardown, ignoring");
				return RenderMode::Static;
			}
			Lifecycle::Uninitialized => {}
		}

		self.mode = if reduced_motion {
			RenderMode::Static
		} else {
			RenderMode::Animated
		};
		self.lifecycle = Lifecycle::Running;
		self.regenerate(viewport);

		match self.mode {
			RenderMode::Static => {
				render::render_static(&mut self.surface, &self.field, &self.theme);
			}
			RenderMode::Animated => self.token.activate(),
		}

		info!(
			"starfield: running ({} preset, {:?}, {} particles)",
			self.theme.name,
			self.mode,
			self.field.len()
		);
		self.mode
	}

	/// Replace the whole population for a new viewport size.
	pub fn on_resize(&mut self, viewport: Viewport) {
		if self.lifecycle != Lifecycle::Running {
			return;
		}
		self.regenerate(viewport);
		if self.mode == RenderMode::Static {
			render::render_static(&mut self.surface, &self.field, &self.theme);
		}
	}

	/// Advance and draw one frame. Returns whether another frame is wanted.
	///
	/// `timestamp_ms` is a monotonic wall-clock reading (the
	/// `requestAnimationFrame` timestamp); twinkle phase derives from it.
	pub fn tick(&mut self, timestamp_ms: f64) -> bool {
		if !self.token.is_active()
			|| self.lifecycle != Lifecycle::Running
			|| self.mode != RenderMode::Animated
		{
			return false;
		}

		let step = self.frame_step(timestamp_ms);
		self.field.update(step, &self.theme, &mut self.rng);
		render::render_frame(&mut self.surface, &self.field, &self.theme, timestamp_ms / 1000.0);
		true
	}

	/// Stop the loop and drop the particles. Idempotent.
	pub fn teardown(&mut self) {
		self.token.cancel();
		if self.lifecycle == Lifecycle::TornDown {
			return;
		}
		self.lifecycle = Lifecycle::TornDown;
		self.field = ParticleField::default();
		debug!("starfield: torn down");
	}

	pub fn lifecycle(&self) -> Lifecycle {
		self.lifecycle
	}

	pub fn mode(&self) -> RenderMode {
		self.mode
	}

	pub fn field(&self) -> &ParticleField {
		&self.field
	}

	pub fn token(&self) -> LoopToken {
		self.token.clone()
	}

	#[cfg(test)]
	pub fn surface(&self) -> &S {
		&self.surface
	}

	fn regenerate(&mut self, viewport: Viewport) {
		if viewport.is_empty() {
			warn!(
				"starfield: empty viewport {}x{}, nothing to draw",
				viewport.width, viewport.height
			);
		}
		self.surface.resize(viewport);
		self.field = ParticleField::generate(&self.theme, viewport, &mut self.rng);
		self.last_timestamp = None;
		debug!(
			"starfield: generated {} particles for {}x{}",
			self.field.len(),
			viewport.width,
			viewport.height
		);
	}

	/// Elapsed time in nominal frames, clamped so a stall cannot teleport.
	fn frame_step(&mut self, timestamp_ms: f64) -> f64 {
		let elapsed = match self.last_timestamp {
			Some(last) => (timestamp_ms - last).clamp(0.0, MAX_STEP_MS),
			None => NOMINAL_FRAME_MS,
		};
		self.last_timestamp = Some(timestamp_ms);
		elapsed / NOMINAL_FRAME_MS
	}
}

#[cfg(test)]
mod tests {
	use super::super::surface::testing::RecordingSurface;
	use super::super::types::ParticleKind;
	use super::*;

	const FRAME: f64 = 1000.0 / 60.0;

	fn starfield(theme: Theme) -> Starfield<RecordingSurface> {
		Starfield::new(RecordingSurface::default(), theme, 1234)
	}

	fn positions(sf: &Starfield<RecordingSurface>) -> Vec<(f64, f64)> {
		sf.field().particles.iter().map(|p| (p.x, p.y)).collect()
	}

	#[test]
	fn initialize_enters_running() {
		let mut sf = starfield(Theme::simple());
		assert_eq!(sf.lifecycle(), Lifecycle::Uninitialized);
		assert!(!sf.tick(0.0));

		let mode = sf.initialize(Viewport::new(1920.0, 1080.0), false);
		assert_eq!(mode, RenderMode::Animated);
		assert_eq!(sf.lifecycle(), Lifecycle::Running);
		assert_eq!(sf.field().len(), 300usize.min((1920.0 * 1080.0 / 10_000.0) as usize));
		assert_eq!(sf.surface().viewport, Viewport::new(1920.0, 1080.0));
		assert!(sf.token().is_active());
	}

	#[test]
	fn second_initialize_is_a_no_op() {
		let mut sf = starfield(Theme::standard());
		sf.initialize(Viewport::new(1280.0, 720.0), false);
		let before = positions(&sf);

		sf.initialize(Viewport::new(640.0, 480.0), true);
		assert_eq!(sf.mode(), RenderMode::Animated);
		assert_eq!(positions(&sf), before);
		assert_eq!(sf.surface().frames, 0);
	}

	#[test]
	fn reduced_motion_draws_exactly_one_frame() {
		let mut sf = starfield(Theme::enhanced());
		let mode = sf.initialize(Viewport::new(1920.0, 1080.0), true);

		assert_eq!(mode, RenderMode::Static);
		assert_eq!(sf.surface().frames, 1);
		assert!(!sf.token().is_active());
		for i in 0..10 {
			assert!(!sf.tick(i as f64 * FRAME));
		}
		assert_eq!(sf.surface().frames, 1);
	}

	#[test]
	fn ticks_draw_and_request_more() {
		let mut sf = starfield(Theme::standard());
		sf.initialize(Viewport::new(800.0, 600.0), false);
		for i in 0..5 {
			assert!(sf.tick(i as f64 * FRAME));
		}
		assert_eq!(sf.surface().frames, 5);
	}

	#[test]
	fn rapid_resizes_keep_only_the_last_population() {
		let theme = Theme::enhanced();
		let mut sf = starfield(theme.clone());
		sf.initialize(Viewport::new(1920.0, 1080.0), false);

		for (w, h) in [(1900.0, 1000.0), (1400.0, 900.0), (1024.0, 768.0), (640.0, 360.0)] {
			sf.on_resize(Viewport::new(w, h));
			sf.tick(16.0);
		}

		let area = 640.0 * 360.0;
		for kind in ParticleKind::ALL {
			assert_eq!(sf.field().count(kind), theme.style(kind).count_for_area(area));
		}
		assert_eq!(sf.surface().viewport, Viewport::new(640.0, 360.0));
	}

	#[test]
	fn static_mode_redraws_on_resize() {
		let mut sf = starfield(Theme::simple());
		sf.initialize(Viewport::new(800.0, 600.0), true);
		sf.on_resize(Viewport::new(1024.0, 768.0));
		assert_eq!(sf.surface().frames, 2);
		assert!(!sf.tick(0.0));
	}

	#[test]
	fn teardown_stops_everything() {
		let mut sf = starfield(Theme::enhanced());
		sf.initialize(Viewport::new(1920.0, 1080.0), false);
		sf.tick(0.0);
		sf.tick(FRAME);
		let frames = sf.surface().frames;
		let ops = sf.surface().total_ops;

		sf.teardown();
		assert_eq!(sf.lifecycle(), Lifecycle::TornDown);
		assert!(sf.field().is_empty());

		for i in 2..60 {
			assert!(!sf.tick(i as f64 * FRAME));
		}
		sf.on_resize(Viewport::new(800.0, 600.0));
		assert_eq!(sf.surface().frames, frames);
		assert_eq!(sf.surface().total_ops, ops);
		assert!(sf.field().is_empty());

		// Cannot be revived.
		sf.initialize(Viewport::new(800.0, 600.0), false);
		assert_eq!(sf.lifecycle(), Lifecycle::TornDown);
		assert!(!sf.tick(1000.0));
		sf.teardown();
	}

	#[test]
	fn cancelled_token_freezes_particles() {
		let mut sf = starfield(Theme::enhanced());
		sf.initialize(Viewport::new(1920.0, 1080.0), false);
		sf.tick(0.0);
		let snapshot = positions(&sf);
		let frames = sf.surface().frames;

		sf.token().cancel();
		for i in 1..30 {
			assert!(!sf.tick(i as f64 * FRAME));
		}
		assert_eq!(positions(&sf), snapshot);
		assert_eq!(sf.surface().frames, frames);
	}

	#[test]
	fn motion_scales_with_elapsed_time() {
		let mut sf = starfield(Theme::enhanced());
		sf.initialize(Viewport::new(100_000.0, 100_000.0), false);
		sf.tick(0.0);
		let before = positions(&sf);
		// Two nominal frames elapse in one tick.
		sf.tick(2.0 * FRAME);
		let after = positions(&sf);

		for (p, (b, a)) in sf.field().particles.iter().zip(before.iter().zip(after.iter())) {
			if let Some((vx, vy)) = p.velocity {
				assert!((a.0 - b.0 - 2.0 * vx).abs() < 1e-9);
				assert!((a.1 - b.1 - 2.0 * vy).abs() < 1e-9);
			}
		}
	}

	#[test]
	fn stalls_are_clamped() {
		let mut sf = starfield(Theme::simple());
		sf.initialize(Viewport::new(100.0, 100.0), false);
		assert_eq!(sf.frame_step(0.0), 1.0);
		assert!((sf.frame_step(10_000.0) - MAX_STEP_MS / NOMINAL_FRAME_MS).abs() < 1e-12);
		assert_eq!(sf.frame_step(5_000.0), 0.0);
	}

	#[test]
	fn empty_viewport_degrades_quietly() {
		let mut sf = starfield(Theme::enhanced());
		sf.initialize(Viewport::new(0.0, 0.0), false);
		assert_eq!(sf.lifecycle(), Lifecycle::Running);
		assert!(sf.field().is_empty());
		assert!(sf.tick(0.0));
	}
}
