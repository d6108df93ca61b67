//! Environmental failures while attaching the starfield.

/// Reasons the starfield could not attach to the page.
///
/// All of these degrade to "no background"; none is fatal to the host page.
#[derive(Debug, thiserror::Error)]
pub enum StarfieldError {
	/// No global `window` (not running in a browser).
	#[error("no global window")]
	NoWindow,

	/// `getContext("2d")` threw.
	#[error("2d context query failed: {0}")]
	ContextQuery(String),

	/// The canvas has no 2D context (or returned something else).
	#[error("2d context unavailable")]
	ContextUnavailable,

	/// `addEventListener` threw.
	#[error("failed to register {event} listener: {reason}")]
	Listener { event: &'static str, reason: String },
}
