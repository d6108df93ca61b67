//! Particle population: generation, motion and twinkle.

use std::f64::consts::TAU;

use rand::Rng;

use super::theme::{Theme, VariantStyle};
use super::types::{Particle, ParticleKind, Trail, TrailPoint, Viewport, Wave};

/// Shooting stars spawn this far left of the canvas and respawn once they pass
/// this far beyond the right or bottom edge.
pub const SHOOTING_MARGIN: f64 = 50.0;

/// The full particle set for one viewport size.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
	pub particles: Vec<Particle>,
	viewport: Viewport,
}

impl ParticleField {
	/// Generate a fresh population sized to `viewport`.
	pub fn generate<R: Rng + ?Sized>(theme: &Theme, viewport: Viewport, rng: &mut R) -> Self {
		if viewport.is_empty() {
			return Self {
				particles: Vec::new(),
				viewport,
			};
		}

		let area = viewport.area();
		let total: usize = ParticleKind::ALL
			.iter()
			.map(|&kind| theme.style(kind).count_for_area(area))
			.sum();
		let mut particles = Vec::with_capacity(total);

		for kind in ParticleKind::ALL {
			let style = theme.style(kind);
			for _ in 0..style.count_for_area(area) {
				particles.push(spawn(kind, style, viewport, rng));
			}
		}

		Self {
			particles,
			viewport,
		}
	}

	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn count(&self, kind: ParticleKind) -> usize {
		self.particles.iter().filter(|p| p.kind == kind).count()
	}

	/// Advance moving particles by `step` nominal 60 Hz frames.
	pub fn update<R: Rng + ?Sized>(&mut self, step: f64, theme: &Theme, rng: &mut R) {
		let Viewport { width, height } = self.viewport;

		for p in &mut self.particles {
			let Some((vx, vy)) = p.velocity else {
				continue;
			};
			p.x += vx * step;
			p.y += vy * step;

			match p.kind {
				ParticleKind::Energy => {
					// Wrap exactly at the edges
					if p.x < 0.0 {
						p.x = width;
					} else if p.x > width {
						p.x = 0.0;
					}
					if p.y < 0.0 {
						p.y = height;
					} else if p.y > height {
						p.y = 0.0;
					}
				}
				ParticleKind::Cosmic => {
					// Wrap once fully off screen
					let r = p.radius;
					if p.x < -r {
						p.x = width + r;
					} else if p.x > width + r {
						p.x = -r;
					}
					if p.y < -r {
						p.y = height + r;
					} else if p.y > height + r {
						p.y = -r;
					}
				}
				ParticleKind::ShootingStar => {
					let alpha = p.base_alpha;
					if let Some(trail) = p.trail.as_mut() {
						trail.push(TrailPoint {
							x: p.x,
							y: p.y,
							alpha,
						});
					}
					if p.x > width + SHOOTING_MARGIN || p.y > height + SHOOTING_MARGIN {
						let band = theme.shooting.spawn_band;
						p.x = -SHOOTING_MARGIN;
						p.y = band.lerp(rng.random()) * height;
						if let Some(trail) = p.trail.as_mut() {
							trail.clear();
						}
					}
				}
				ParticleKind::Star | ParticleKind::Aurora => {}
			}
		}
	}
}

/// Twinkled alpha at `time` (seconds), clamped into the variant's band.
pub fn display_alpha(p: &Particle, style: &VariantStyle, time: f64) -> f64 {
	let raw = p.base_alpha + (time * p.twinkle_rate + p.phase).sin() * style.amplitude;
	raw.clamp(style.alpha_band.min, style.alpha_band.max)
}

/// Resting alpha, used by the static frame.
pub fn resting_alpha(p: &Particle, style: &VariantStyle) -> f64 {
	p.base_alpha
		.clamp(style.alpha_band.min, style.alpha_band.max)
}

/// Vertical position after aurora sway at `time` (seconds).
pub fn swayed_y(p: &Particle, time: f64) -> f64 {
	match p.wave {
		Some(w) => p.y + (time * w.speed + w.offset).sin() * w.amplitude,
		None => p.y,
	}
}

fn spawn<R: Rng + ?Sized>(
	kind: ParticleKind,
	style: &VariantStyle,
	viewport: Viewport,
	rng: &mut R,
) -> Particle {
	let Viewport { width, height } = viewport;
	let mut unit = || rng.random::<f64>();

	let (x, y) = match kind {
		ParticleKind::ShootingStar => (-SHOOTING_MARGIN, style.spawn_band.lerp(unit()) * height),
		ParticleKind::Aurora => (unit() * width, style.spawn_band.lerp(unit()) * height),
		_ => (unit() * width, unit() * height),
	};
	let radius = style.radius.lerp(unit());
	let base_alpha = style.base_alpha.lerp(unit());
	let twinkle_rate = style.twinkle_rate.lerp(unit());
	let phase = if kind == ParticleKind::ShootingStar {
		0.0
	} else {
		unit() * TAU
	};

	let colors = &style.colors;
	let color = if !colors.palette.is_empty() && unit() < colors.accent_chance {
		let idx = (unit() * colors.palette.len() as f64) as usize;
		colors.palette[idx.min(colors.palette.len() - 1)]
	} else {
		colors.fallback
	};

	let velocity = match kind {
		ParticleKind::Cosmic | ParticleKind::Energy | ParticleKind::ShootingStar => Some((
			style.velocity_x.lerp(unit()),
			style.velocity_y.lerp(unit()),
		)),
		ParticleKind::Star | ParticleKind::Aurora => None,
	};

	let trail = (kind == ParticleKind::ShootingStar)
		.then(|| Trail::with_cap(style.trail.lerp(unit()).floor() as usize));

	let wave = (kind == ParticleKind::Aurora).then(|| Wave {
		offset: unit() * TAU,
		speed: style.wave_speed.lerp(unit()),
		amplitude: style.wave_amplitude,
	});

	Particle {
		kind,
		x,
		y,
		radius,
		base_alpha,
		twinkle_rate,
		phase,
		color,
		velocity,
		trail,
		wave,
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn field(theme: &Theme, w: f64, h: f64) -> ParticleField {
		let mut rng = SmallRng::seed_from_u64(42);
		ParticleField::generate(theme, Viewport::new(w, h), &mut rng)
	}

	#[test]
	fn population_follows_area_formula() {
		for theme in [Theme::simple(), Theme::standard(), Theme::enhanced()] {
			for (w, h) in [(320.0, 568.0), (1280.0, 720.0), (1920.0, 1080.0), (3840.0, 2160.0)] {
				let f = field(&theme, w, h);
				let area = w * h;
				for kind in ParticleKind::ALL {
					let style = theme.style(kind);
					let expected = if style.divisor > 0.0 {
						((area / style.divisor).floor() as usize).min(style.cap)
					} else {
						0
					};
					assert_eq!(f.count(kind), expected, "{} {:?} {}x{}", theme.name, kind, w, h);
				}
			}
		}
	}

	#[test]
	fn full_hd_simple_scenario() {
		let f = field(&Theme::simple(), 1920.0, 1080.0);
		assert_eq!(f.len(), 300usize.min((1920.0 * 1080.0 / 10_000.0) as usize));
		assert_eq!(f.len(), 207);
	}

	#[test]
	fn empty_viewport_yields_no_particles() {
		assert!(field(&Theme::enhanced(), 0.0, 900.0).is_empty());
		assert!(field(&Theme::enhanced(), 900.0, -1.0).is_empty());
	}

	#[test]
	fn display_alpha_stays_in_band() {
		let theme = Theme::enhanced();
		let f = field(&theme, 1920.0, 1080.0);
		for p in &f.particles {
			let band = theme.style(p.kind).alpha_band;
			for i in 0..400 {
				let t = i as f64 * 37.3;
				let a = display_alpha(p, theme.style(p.kind), t);
				assert!(band.contains(a), "{:?} alpha {} outside {:?}", p.kind, a, band);
			}
			assert!(band.contains(resting_alpha(p, theme.style(p.kind))));
		}
	}

	#[test]
	fn trail_grows_to_cap() {
		let theme = Theme::enhanced();
		let mut rng = SmallRng::seed_from_u64(7);
		// Wide enough that no shooting star leaves the canvas during the run.
		let mut f = ParticleField::generate(&theme, Viewport::new(100_000.0, 100_000.0), &mut rng);
		assert!(f.count(ParticleKind::ShootingStar) > 0);

		for frame in 1..=80usize {
			f.update(1.0, &theme, &mut rng);
			for p in f.particles.iter().filter(|p| p.kind == ParticleKind::ShootingStar) {
				let trail = p.trail.as_ref().unwrap();
				assert!(trail.len() <= trail.cap);
				assert_eq!(trail.len(), frame.min(trail.cap));
			}
		}
	}

	#[test]
	fn energy_particles_wrap_to_opposite_edge() {
		let theme = Theme::enhanced();
		let mut f = field(&theme, 800.0, 600.0);
		let idx = f
			.particles
			.iter()
			.position(|p| p.kind == ParticleKind::Energy)
			.unwrap();

		f.particles[idx].x = 0.01;
		f.particles[idx].y = 300.0;
		f.particles[idx].velocity = Some((-0.05, 0.0));
		f.update(1.0, &theme, &mut SmallRng::seed_from_u64(1));
		assert_eq!(f.particles[idx].x, 800.0);

		f.particles[idx].x = 799.99;
		f.particles[idx].velocity = Some((0.05, 0.0));
		f.update(1.0, &theme, &mut SmallRng::seed_from_u64(1));
		assert_eq!(f.particles[idx].x, 0.0);

		f.particles[idx].x = 400.0;
		f.particles[idx].y = 599.99;
		f.particles[idx].velocity = Some((0.0, 0.05));
		f.update(1.0, &theme, &mut SmallRng::seed_from_u64(1));
		assert_eq!(f.particles[idx].y, 0.0);

		f.particles[idx].y = 0.01;
		f.particles[idx].velocity = Some((0.0, -0.05));
		f.update(1.0, &theme, &mut SmallRng::seed_from_u64(1));
		assert_eq!(f.particles[idx].y, 600.0);
	}

	#[test]
	fn cosmic_elements_wrap_past_their_radius() {
		let theme = Theme::standard();
		let mut f = field(&theme, 800.0, 600.0);
		let idx = f
			.particles
			.iter()
			.position(|p| p.kind == ParticleKind::Cosmic)
			.unwrap();
		let r = f.particles[idx].radius;

		let mut rng = SmallRng::seed_from_u64(1);
		let mut step = |f: &mut ParticleField, x: f64, y: f64, v: (f64, f64)| {
			f.particles[idx].x = x;
			f.particles[idx].y = y;
			f.particles[idx].velocity = Some(v);
			f.update(1.0, &theme, &mut rng);
			(f.particles[idx].x, f.particles[idx].y)
		};

		// Left and right
		let (x, _) = step(&mut f, -r + 0.001, 300.0, (-0.01, 0.0));
		assert_eq!(x, 800.0 + r);
		let (x, _) = step(&mut f, 800.0 + r - 0.001, 300.0, (0.01, 0.0));
		assert_eq!(x, -r);

		// Top and bottom
		let (_, y) = step(&mut f, 400.0, -r + 0.001, (0.0, -0.01));
		assert_eq!(y, 600.0 + r);
		let (_, y) = step(&mut f, 400.0, 600.0 + r - 0.001, (0.0, 0.01));
		assert_eq!(y, -r);

		// Still inside the margin: no wrap yet.
		let (x, y) = step(&mut f, -r + 0.5, 300.0, (-0.01, 0.0));
		assert!(x > -r && x < 0.0);
		assert_eq!(y, 300.0);
	}

	#[test]
	fn shooting_stars_respawn_on_the_left() {
		let theme = Theme::standard();
		let mut rng = SmallRng::seed_from_u64(3);
		let mut f = ParticleField::generate(&theme, Viewport::new(1000.0, 800.0), &mut rng);
		let idx = f
			.particles
			.iter()
			.position(|p| p.kind == ParticleKind::ShootingStar)
			.unwrap();

		f.particles[idx].x = 1000.0 + SHOOTING_MARGIN - 0.5;
		f.particles[idx].velocity = Some((1.0, 0.0));
		f.update(1.0, &theme, &mut rng);

		let p = &f.particles[idx];
		assert_eq!(p.x, -SHOOTING_MARGIN);
		assert!(p.y >= 0.0 && p.y <= 0.7 * 800.0);
		assert!(p.trail.as_ref().unwrap().is_empty());
		assert_eq!(f.count(ParticleKind::ShootingStar), theme.shooting.count_for_area(800_000.0));
	}

	#[test]
	fn aurora_sway_is_bounded() {
		let theme = Theme::enhanced();
		let f = field(&theme, 1920.0, 1080.0);
		for p in f.particles.iter().filter(|p| p.kind == ParticleKind::Aurora) {
			for i in 0..100 {
				let y = swayed_y(p, i as f64 * 0.37);
				assert!((y - p.y).abs() <= theme.aurora.wave_amplitude + 1e-9);
			}
		}
	}

	#[test]
	fn simple_stars_are_white() {
		let f = field(&Theme::simple(), 1920.0, 1080.0);
		assert!(f.particles.iter().all(|p| p.color == crate::components::starfield::theme::Color::WHITE));
	}
}
