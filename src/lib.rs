//! hackaverse-starfield: decorative animated starfield for the HackaVerse site.
//!
//! This crate provides a WASM canvas component that paints a full-viewport
//! particle field (twinkling stars, glow blobs, shooting stars) behind the page
//! content, honoring the reduced-motion preference.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::starfield::{
	Backdrop, Intensity, MotionPreference, StarfieldCanvas, StarfieldConfig, StarfieldError,
	StarfieldHandle,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("starfield: logging initialized");
}

/// Load configuration from a script element with id="starfield-config".
/// Expected format: JSON with optional { intensity, backdrop, motion, seed }.
fn load_config() -> Option<StarfieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("starfield-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<StarfieldConfig>(&json_text) {
		Ok(config) => {
			let seed = config
				.seed
				.map_or_else(|| "clock".to_string(), |s| s.to_string());
			info!(
				"starfield: config loaded (intensity={:?}, backdrop={:?}, motion={:?}, seed={})",
				config.intensity, config.backdrop, config.motion, seed
			);
			Some(config)
		}
		Err(e) => {
			warn!("starfield: failed to parse config: {}", e);
			None
		}
	}
}

/// Paint the backdrop gradient on `<body>`.
fn apply_backdrop(backdrop: Backdrop) {
	let Some(body) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.body())
	else {
		return;
	};
	let style = body.style();
	let _ = style.set_property("background", backdrop.gradient_css());
	let _ = style.set_property("background-attachment", "fixed");
	let _ = style.set_property("min-height", "100vh");
}

/// Main application component.
/// Applies the configured backdrop and mounts the starfield behind the hero.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();
	apply_backdrop(config.backdrop);
	let show_starfield = config.backdrop.starfield_enabled();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="HackaVerse" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		{show_starfield.then(|| view! { <StarfieldCanvas config=config /> })}
		<main class="hero">
			<h1>"HackaVerse"</h1>
			<p class="subtitle">"Build, compete and ship among the stars."</p>
		</main>
	}
}
