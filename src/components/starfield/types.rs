//! Particle and configuration data structures.

use std::collections::VecDeque;

use serde::Deserialize;

use super::theme::Color;

/// The closed set of particle variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
	/// Static twinkling point.
	Star,
	/// Large glowing blob drifting slowly.
	Cosmic,
	/// Fast mover with a fading trail.
	ShootingStar,
	/// Swaying radial-gradient band.
	Aurora,
	/// Small drifting point that wraps at the edges.
	Energy,
}

impl ParticleKind {
	/// Generation and paint order: back to front.
	pub const ALL: [ParticleKind; 5] = [
		ParticleKind::Cosmic,
		ParticleKind::ShootingStar,
		ParticleKind::Aurora,
		ParticleKind::Energy,
		ParticleKind::Star,
	];
}

/// One recorded position in a shooting-star trail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
	pub x: f64,
	pub y: f64,
	pub alpha: f64,
}

/// Bounded position history; the oldest point is evicted first.
#[derive(Clone, Debug, Default)]
pub struct Trail {
	pub points: VecDeque<TrailPoint>,
	pub cap: usize,
}

impl Trail {
	pub fn with_cap(cap: usize) -> Self {
		Self {
			points: VecDeque::with_capacity(cap),
			cap,
		}
	}

	pub fn push(&mut self, point: TrailPoint) {
		if self.cap == 0 {
			return;
		}
		self.points.push_back(point);
		while self.points.len() > self.cap {
			self.points.pop_front();
		}
	}

	pub fn clear(&mut self) {
		self.points.clear();
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}
}

/// Aurora sway parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wave {
	pub offset: f64,
	pub speed: f64,
	pub amplitude: f64,
}

/// A single animated particle.
#[derive(Clone, Debug)]
pub struct Particle {
	pub kind: ParticleKind,
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub base_alpha: f64,
	pub twinkle_rate: f64,
	pub phase: f64,
	pub color: Color,
	/// Displacement per nominal 60 Hz frame.
	pub velocity: Option<(f64, f64)>,
	pub trail: Option<Trail>,
	pub wave: Option<Wave>,
}

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	pub fn area(&self) -> f64 {
		self.width * self.height
	}

	/// Zero, negative or NaN dimensions.
	pub fn is_empty(&self) -> bool {
		!(self.width > 0.0 && self.height > 0.0)
	}
}

/// Parameter preset for the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
	Simple,
	#[default]
	Standard,
	Enhanced,
}

/// Page backdrop gradient painted on `<body>` behind the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backdrop {
	#[default]
	Default,
	Cosmic,
	Nebula,
	Galaxy,
	/// Gradient only, no starfield.
	Minimal,
}

impl Backdrop {
	pub fn gradient_css(self) -> &'static str {
		match self {
			Backdrop::Default => "linear-gradient(135deg, #0D1128 0%, #15193B 50%, #0F142E 100%)",
			Backdrop::Cosmic => "linear-gradient(135deg, #1A1B3A 0%, #2D1B69 50%, #1A1B3A 100%)",
			Backdrop::Nebula => "linear-gradient(135deg, #2D1B69 0%, #1A1B3A 50%, #2D1B69 100%)",
			Backdrop::Galaxy => "linear-gradient(135deg, #0D1128 0%, #1A1B3A 50%, #2D1B69 100%)",
			Backdrop::Minimal => "linear-gradient(135deg, #0D1128 0%, #15193B 100%)",
		}
	}

	pub fn starfield_enabled(self) -> bool {
		self != Backdrop::Minimal
	}
}

/// How to honor the reduced-motion preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionPreference {
	/// Follow `(prefers-reduced-motion: reduce)`.
	#[default]
	Auto,
	/// Always draw a single static frame.
	Reduced,
	/// Always animate.
	Full,
}

impl MotionPreference {
	/// Resolve against the system preference.
	pub fn reduced(self, system_prefers_reduced: bool) -> bool {
		match self {
			MotionPreference::Auto => system_prefers_reduced,
			MotionPreference::Reduced => true,
			MotionPreference::Full => false,
		}
	}
}

/// Optional page-level configuration, read from a JSON script element.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
	pub intensity: Intensity,
	pub backdrop: Backdrop,
	pub motion: MotionPreference,
	/// Fixed RNG seed; the wall clock is used when absent.
	pub seed: Option<u64>,
}
