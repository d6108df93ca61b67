//! Per-variant drawing.
//!
//! Particles are painted in generation order, which puts the large faint
//! variants (cosmic, aurora) behind the stars.

use super::field::{ParticleField, display_alpha, resting_alpha, swayed_y};
use super::surface::Surface;
use super::theme::{Theme, VariantStyle};
use super::types::{Particle, ParticleKind};

/// Draw one animated frame at `time` seconds.
pub fn render_frame<S: Surface + ?Sized>(
	surface: &mut S,
	field: &ParticleField,
	theme: &Theme,
	time: f64,
) {
	surface.begin_frame(&theme.background, field.viewport());

	for p in &field.particles {
		let style = theme.style(p.kind);
		let alpha = display_alpha(p, style, time);
		draw_particle(surface, p, style, alpha, swayed_y(p, time));
	}
}

/// Draw the single frame used when reduced motion is requested.
pub fn render_static<S: Surface + ?Sized>(surface: &mut S, field: &ParticleField, theme: &Theme) {
	surface.begin_frame(&theme.background, field.viewport());

	for p in &field.particles {
		// Shooting stars wait off screen and have no trail yet.
		if p.kind == ParticleKind::ShootingStar {
			continue;
		}
		let style = theme.style(p.kind);
		draw_particle(surface, p, style, resting_alpha(p, style), p.y);
	}
}

fn draw_particle<S: Surface + ?Sized>(
	surface: &mut S,
	p: &Particle,
	style: &VariantStyle,
	alpha: f64,
	y: f64,
) {
	let color = p.color.with_alpha(alpha);

	match p.kind {
		ParticleKind::Star | ParticleKind::Energy => {
			surface.fill_circle(p.x, y, p.radius, color);
		}
		ParticleKind::Cosmic => {
			surface.fill_glow(p.x, y, p.radius, color, p.radius * style.glow);
		}
		ParticleKind::Aurora => {
			surface.fill_radial(p.x, y, p.radius, color);
		}
		ParticleKind::ShootingStar => draw_trail(surface, p, style),
	}
}

/// Oldest points are smallest and faintest; the head is drawn last.
///
/// The faded point alpha is the variant's display alpha, clamped into its band.
fn draw_trail<S: Surface + ?Sized>(surface: &mut S, p: &Particle, style: &VariantStyle) {
	let Some(trail) = p.trail.as_ref() else {
		return;
	};
	let len = trail.len() as f64;

	for (i, point) in trail.points.iter().enumerate() {
		let t = i as f64 / len;
		if t <= 0.0 {
			continue;
		}
		let alpha = (point.alpha * t).clamp(style.alpha_band.min, style.alpha_band.max);
		surface.fill_circle(point.x, point.y, p.radius * t, p.color.with_alpha(alpha));
	}
}
