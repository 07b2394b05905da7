//! # tactile-controls
//!
//! Touch-driven controls for 2D scenes.
//!
//! [`Control`] is the base for buttons and similar elements: it follows one
//! touch at a time through the momentary-button lifecycle, shows one
//! [`Presentation`] per [`ControlState`], and reports activations to a weakly
//! held [`ControlDelegate`] and to weakly held targets registered per
//! [`ControlEvents`] mask.

mod appearance;
mod control;
mod delegate;
mod events;
mod hooks;
mod presentation;
mod state;
mod targets;

pub use control::*;
pub use delegate::ControlDelegate;
pub use events::*;
pub use hooks::ControlHooks;
pub use presentation::*;
pub use state::*;
pub use targets::{ActionError, ActionResult, DispatchReport, TargetId, TargetList};
