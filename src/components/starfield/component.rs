//! Leptos component mounting the starfield behind page content.
//!
//! The canvas is fixed to the viewport, sits at `z-index: -1` and ignores
//! pointer events. The renderer attaches once the canvas is in the DOM and is
//! torn down when the owning view is disposed.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use send_wrapper::SendWrapper;
use web_sys::HtmlCanvasElement;

use super::handle::StarfieldHandle;
use super::types::StarfieldConfig;

const CANVAS_STYLE: &str = "position: fixed; inset: 0; width: 100vw; height: 100vh; \
	z-index: -1; pointer-events: none; display: block;";

/// Full-viewport decorative starfield.
///
/// Failure to obtain a 2D context is logged and leaves the page without a
/// background; it never affects sibling content.
#[component]
pub fn StarfieldCanvas(#[prop(optional)] config: StarfieldConfig) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let handle: Rc<RefCell<Option<StarfieldHandle>>> = Rc::new(RefCell::new(None));
	let handle_init = handle.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if handle_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();

		match StarfieldHandle::attach(canvas, &config) {
			Ok(h) => *handle_init.borrow_mut() = Some(h),
			Err(e) => warn!("starfield: disabled: {}", e),
		}
	});

	let handle_cleanup = SendWrapper::new(handle);
	on_cleanup(move || {
		if let Some(mut h) = handle_cleanup.borrow_mut().take() {
			h.teardown();
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="starfield-canvas"
			aria-hidden="true"
			style=CANVAS_STYLE
		/>
	}
}
