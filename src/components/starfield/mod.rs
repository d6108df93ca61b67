//! Decorative starfield background.
//!
//! Paints a full-viewport canvas behind the page with:
//! - Twinkling stars sized and counted relative to the viewport area
//! - Glowing cosmic blobs and swaying aurora bands
//! - Shooting stars with fading trails and drifting energy particles
//! - A single static frame when reduced motion is requested
//!
//! # Example
//!
//! ```ignore
//! use hackaverse_starfield::{Intensity, StarfieldCanvas, StarfieldConfig};
//!
//! let config = StarfieldConfig { intensity: Intensity::Enhanced, ..Default::default() };
//! view! { <StarfieldCanvas config=config /> }
//! ```

mod component;
mod engine;
mod error;
mod field;
mod handle;
mod render;
mod surface;
pub mod theme;
mod types;

pub use component::StarfieldCanvas;
pub use engine::{Lifecycle, LoopToken, RenderMode, Starfield};
pub use error::StarfieldError;
pub use field::ParticleField;
pub use handle::StarfieldHandle;
pub use surface::{CanvasSurface, Surface};
pub use theme::Theme;
pub use types::{
	Backdrop, Intensity, MotionPreference, Particle, ParticleKind, StarfieldConfig, Trail,
	TrailPoint, Viewport, Wave,
};
