//! Visual presets for the starfield.
//!
//! Each [`Intensity`] maps to a [`Theme`] holding one [`VariantStyle`] per
//! particle kind plus the background painted under them.

use super::types::{Intensity, ParticleKind};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const WHITE: Color = Color::rgb(255, 255, 255);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			self.to_css_rgb()
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// Closed range sampled uniformly at particle creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
	pub min: f64,
	pub max: f64,
}

impl Range {
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Symmetric range around zero, `[-half, half]`.
	pub const fn centered(half: f64) -> Self {
		Self { min: -half, max: half }
	}

	pub const ZERO: Range = Range::new(0.0, 0.0);

	/// Map a unit sample `t` in `[0, 1)` into the range.
	pub fn lerp(&self, t: f64) -> f64 {
		self.min + t * (self.max - self.min)
	}

	pub fn contains(&self, v: f64) -> bool {
		v >= self.min && v <= self.max
	}
}

// Palettes from the HackaVerse brand sheet.
const ACCENTS_FULL: [Color; 10] = [
	Color::rgb(0xBF, 0x40, 0xBF), // Purple
	Color::rgb(0xC0, 0x30, 0xD8), // Violet
	Color::rgb(0x00, 0xF2, 0xEA), // Cyan
	Color::rgb(0x2D, 0xD4, 0xBF), // Teal
	Color::rgb(0x3B, 0x82, 0xF6), // Blue
	Color::rgb(0x63, 0x66, 0xF1), // Indigo
	Color::rgb(0xA7, 0x8B, 0xFA), // Lavender
	Color::rgb(0xFF, 0x6B, 0x6B), // Coral
	Color::rgb(0x4E, 0xCD, 0xC4), // Seafoam
	Color::rgb(0x45, 0xB7, 0xD1), // Sky
];
const ACCENTS_SHORT: [Color; 4] = [
	Color::rgb(0xBF, 0x40, 0xBF),
	Color::rgb(0x00, 0xF2, 0xEA),
	Color::rgb(0x2D, 0xD4, 0xBF),
	Color::rgb(0x3B, 0x82, 0xF6),
];
const COSMIC_FULL: [Color; 6] = [
	Color::rgb(0xBF, 0x40, 0xBF),
	Color::rgb(0xC0, 0x30, 0xD8),
	Color::rgb(0x00, 0xF2, 0xEA),
	Color::rgb(0x2D, 0xD4, 0xBF),
	Color::rgb(0xFF, 0x6B, 0x6B),
	Color::rgb(0x4E, 0xCD, 0xC4),
];
const COSMIC_SHORT: [Color; 4] = [
	Color::rgb(0xBF, 0x40, 0xBF),
	Color::rgb(0xC0, 0x30, 0xD8),
	Color::rgb(0x00, 0xF2, 0xEA),
	Color::rgb(0x2D, 0xD4, 0xBF),
];
const SHOOTING_FULL: [Color; 4] = [
	Color::WHITE,
	Color::rgb(0x00, 0xF2, 0xEA),
	Color::rgb(0xBF, 0x40, 0xBF),
	Color::rgb(0x2D, 0xD4, 0xBF),
];
const SHOOTING_SHORT: [Color; 2] = [Color::WHITE, Color::rgb(0x00, 0xF2, 0xEA)];
const AURORA: [Color; 4] = [
	Color::rgb(0x00, 0xF2, 0xEA),
	Color::rgb(0xBF, 0x40, 0xBF),
	Color::rgb(0x2D, 0xD4, 0xBF),
	Color::rgb(0x63, 0x66, 0xF1),
];
const ENERGY: [Color; 6] = [
	Color::rgb(0x00, 0xF2, 0xEA),
	Color::rgb(0x2D, 0xD4, 0xBF),
	Color::rgb(0x3B, 0x82, 0xF6),
	Color::rgb(0x63, 0x66, 0xF1),
	Color::rgb(0xA7, 0x8B, 0xFA),
	Color::rgb(0xFF, 0x6B, 0x6B),
];

/// Color selection for a variant.
#[derive(Clone, Debug)]
pub struct ColorStyle {
	/// Palette sampled uniformly.
	pub palette: &'static [Color],
	/// Probability of picking from `palette` instead of `fallback`.
	pub accent_chance: f64,
	pub fallback: Color,
}

impl ColorStyle {
	const fn palette(palette: &'static [Color]) -> Self {
		Self {
			palette,
			accent_chance: 1.0,
			fallback: Color::WHITE,
		}
	}

	const fn white() -> Self {
		Self {
			palette: &[],
			accent_chance: 0.0,
			fallback: Color::WHITE,
		}
	}
}

/// Per-variant generation and animation parameters.
#[derive(Clone, Debug)]
pub struct VariantStyle {
	/// Upper bound on the population of this variant.
	pub cap: usize,
	/// Viewport area (px²) per particle. Zero disables the variant.
	pub divisor: f64,
	pub radius: Range,
	pub base_alpha: Range,
	/// Twinkle angular rate, radians per second.
	pub twinkle_rate: Range,
	/// Twinkle amplitude added to base alpha.
	pub amplitude: f64,
	/// Display alpha is clamped into this band every frame.
	pub alpha_band: Range,
	pub velocity_x: Range,
	pub velocity_y: Range,
	/// Shooting-star trail cap.
	pub trail: Range,
	/// Vertical spawn band as fractions of the viewport height.
	pub spawn_band: Range,
	/// Shadow blur as a multiple of the radius (cosmic glow).
	pub glow: f64,
	/// Aurora sway speed (radians per second) and height in pixels.
	pub wave_speed: Range,
	pub wave_amplitude: f64,
	pub colors: ColorStyle,
}

impl VariantStyle {
	const fn disabled() -> Self {
		Self {
			cap: 0,
			divisor: 0.0,
			radius: Range::ZERO,
			base_alpha: Range::ZERO,
			twinkle_rate: Range::ZERO,
			amplitude: 0.0,
			alpha_band: Range::new(0.0, 1.0),
			velocity_x: Range::ZERO,
			velocity_y: Range::ZERO,
			trail: Range::ZERO,
			spawn_band: Range::new(0.0, 1.0),
			glow: 0.0,
			wave_speed: Range::ZERO,
			wave_amplitude: 0.0,
			colors: ColorStyle::white(),
		}
	}

	/// `min(cap, floor(area / divisor))`.
	pub fn count_for_area(&self, area: f64) -> usize {
		if self.divisor <= 0.0 || !(area > 0.0) {
			return 0;
		}
		((area / self.divisor).floor() as usize).min(self.cap)
	}
}

/// Background painted under the particles every frame.
#[derive(Clone, Debug)]
pub enum BackgroundStyle {
	Solid(Color),
	/// Vertical linear gradient, top to bottom.
	Vertical { top: Color, bottom: Color },
}

/// Complete visual configuration for one intensity.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub stars: VariantStyle,
	pub cosmic: VariantStyle,
	pub shooting: VariantStyle,
	pub aurora: VariantStyle,
	pub energy: VariantStyle,
}

impl Theme {
	/// Sparse white stars on black.
	pub fn simple() -> Self {
		Self {
			name: "simple",
			background: BackgroundStyle::Solid(Color::rgb(0, 0, 0)),
			stars: VariantStyle {
				cap: 300,
				divisor: 10_000.0,
				radius: Range::new(0.5, 2.0),
				base_alpha: Range::new(0.3, 1.0),
				twinkle_rate: Range::new(0.005, 0.025),
				amplitude: 0.3,
				alpha_band: Range::new(0.1, 1.0),
				..VariantStyle::disabled()
			},
			cosmic: VariantStyle::disabled(),
			shooting: VariantStyle::disabled(),
			aurora: VariantStyle::disabled(),
			energy: VariantStyle::disabled(),
		}
	}

	/// Accent-colored stars, drifting glow blobs and shooting stars (default).
	pub fn standard() -> Self {
		Self {
			name: "standard",
			background: cosmic_gradient(),
			stars: VariantStyle {
				cap: 800,
				divisor: 6_000.0,
				radius: Range::new(0.5, 2.5),
				base_alpha: Range::new(0.2, 0.8),
				twinkle_rate: Range::new(0.005, 0.045),
				amplitude: 0.4,
				alpha_band: Range::new(0.1, 1.0),
				colors: ColorStyle {
					palette: &ACCENTS_SHORT,
					accent_chance: 0.4,
					fallback: Color::WHITE,
				},
				..VariantStyle::disabled()
			},
			cosmic: VariantStyle {
				cap: 6,
				divisor: 40_000.0,
				radius: Range::new(20.0, 60.0),
				base_alpha: Range::new(0.05, 0.15),
				twinkle_rate: Range::new(0.003, 0.013),
				amplitude: 0.2,
				alpha_band: Range::new(0.01, 0.15),
				velocity_x: Range::centered(0.01),
				velocity_y: Range::centered(0.01),
				glow: 1.0,
				colors: ColorStyle::palette(&COSMIC_SHORT),
				..VariantStyle::disabled()
			},
			shooting: VariantStyle {
				cap: 4,
				divisor: 50_000.0,
				radius: Range::new(1.0, 4.0),
				base_alpha: Range::new(0.7, 1.0),
				// Trail points fade from the head toward zero.
				alpha_band: Range::new(0.0, 1.0),
				velocity_x: Range::new(1.0, 7.0),
				velocity_y: Range::new(0.2, 2.2),
				trail: Range::new(15.0, 35.0),
				spawn_band: Range::new(0.0, 0.7),
				colors: ColorStyle::palette(&SHOOTING_SHORT),
				..VariantStyle::disabled()
			},
			aurora: VariantStyle::disabled(),
			energy: VariantStyle::disabled(),
		}
	}

	/// Every variant, denser and brighter.
	pub fn enhanced() -> Self {
		Self {
			name: "enhanced",
			background: cosmic_gradient(),
			stars: VariantStyle {
				cap: 1200,
				divisor: 5_000.0,
				radius: Range::new(0.5, 3.0),
				base_alpha: Range::new(0.3, 1.1),
				twinkle_rate: Range::new(0.008, 0.068),
				amplitude: 0.5,
				alpha_band: Range::new(0.1, 1.0),
				colors: ColorStyle {
					palette: &ACCENTS_FULL,
					accent_chance: 0.6,
					fallback: Color::WHITE,
				},
				..VariantStyle::disabled()
			},
			cosmic: VariantStyle {
				cap: 8,
				divisor: 30_000.0,
				radius: Range::new(30.0, 90.0),
				base_alpha: Range::new(0.08, 0.23),
				twinkle_rate: Range::new(0.005, 0.025),
				amplitude: 0.3,
				alpha_band: Range::new(0.02, 0.2),
				velocity_x: Range::centered(0.025),
				velocity_y: Range::centered(0.025),
				glow: 2.0,
				colors: ColorStyle::palette(&COSMIC_FULL),
				..VariantStyle::disabled()
			},
			shooting: VariantStyle {
				cap: 6,
				divisor: 40_000.0,
				radius: Range::new(1.2, 5.2),
				base_alpha: Range::new(0.8, 1.0),
				alpha_band: Range::new(0.0, 1.0),
				velocity_x: Range::new(2.0, 10.0),
				velocity_y: Range::new(0.5, 3.5),
				trail: Range::new(20.0, 50.0),
				spawn_band: Range::new(0.0, 0.6),
				colors: ColorStyle::palette(&SHOOTING_FULL),
				..VariantStyle::disabled()
			},
			aurora: VariantStyle {
				cap: 3,
				divisor: 80_000.0,
				radius: Range::new(80.0, 200.0),
				base_alpha: Range::new(0.03, 0.11),
				twinkle_rate: Range::new(0.002, 0.012),
				amplitude: 0.05,
				alpha_band: Range::new(0.01, 0.16),
				spawn_band: Range::new(0.1, 0.4),
				wave_speed: Range::new(0.5, 2.0),
				wave_amplitude: 20.0,
				colors: ColorStyle::palette(&AURORA),
				..VariantStyle::disabled()
			},
			energy: VariantStyle {
				cap: 50,
				divisor: 20_000.0,
				radius: Range::new(0.5, 2.0),
				base_alpha: Range::new(0.3, 1.0),
				twinkle_rate: Range::new(0.02, 0.07),
				amplitude: 0.3,
				alpha_band: Range::new(0.1, 1.0),
				velocity_x: Range::centered(0.05),
				velocity_y: Range::centered(0.05),
				colors: ColorStyle::palette(&ENERGY),
				..VariantStyle::disabled()
			},
		}
	}

	pub fn for_intensity(intensity: Intensity) -> Self {
		match intensity {
			Intensity::Simple => Self::simple(),
			Intensity::Standard => Self::standard(),
			Intensity::Enhanced => Self::enhanced(),
		}
	}

	pub fn style(&self, kind: ParticleKind) -> &VariantStyle {
		match kind {
			ParticleKind::Star => &self.stars,
			ParticleKind::Cosmic => &self.cosmic,
			ParticleKind::ShootingStar => &self.shooting,
			ParticleKind::Aurora => &self.aurora,
			ParticleKind::Energy => &self.energy,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::standard()
	}
}

fn cosmic_gradient() -> BackgroundStyle {
	BackgroundStyle::Vertical {
		top: Color::rgb(0x0D, 0x11, 0x28),
		bottom: Color::rgb(0x15, 0x19, 0x3B),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(13, 17, 40).to_css(), "#0d1128");
		assert_eq!(
			Color::rgb(255, 255, 255).with_alpha(0.5).to_css(),
			"rgba(255, 255, 255, 0.5)"
		);
	}

	#[test]
	fn count_is_capped_and_floored() {
		let stars = Theme::simple().stars;
		assert_eq!(stars.count_for_area(1920.0 * 1080.0), 207);
		assert_eq!(stars.count_for_area(9_999.0), 0);
		assert_eq!(stars.count_for_area(1e9), 300);
		assert_eq!(stars.count_for_area(0.0), 0);
		assert_eq!(stars.count_for_area(f64::NAN), 0);
	}

	#[test]
	fn disabled_variants_are_empty() {
		let simple = Theme::simple();
		for kind in [
			ParticleKind::Cosmic,
			ParticleKind::ShootingStar,
			ParticleKind::Aurora,
			ParticleKind::Energy,
		] {
			assert_eq!(simple.style(kind).count_for_area(1e9), 0);
		}
	}

	#[test]
	fn alpha_bands_stay_in_unit_interval() {
		for theme in [Theme::simple(), Theme::standard(), Theme::enhanced()] {
			for kind in ParticleKind::ALL {
				let band = theme.style(kind).alpha_band;
				assert!(band.min >= 0.0 && band.max <= 1.0, "{} {:?}", theme.name, kind);
				assert!(band.min <= band.max);
			}
		}
	}
}
