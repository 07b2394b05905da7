//! # tactile
//!
//! Scene-graph agnostic primitives for touch controls.
//!
//! This crate holds the pieces a touch control consumes from its host without
//! depending on any rendering framework. The controls themselves live in
//! `tactile-controls`.
//!
//! ## Geometry
//!
//! - [`Point`], [`Size`], [`Rect`] - scene-space primitives (convertible from `glam::Vec2`)
//! - [`hit_test`] - tolerant bounds containment for forgiving touch targets
//!
//! ## Input
//!
//! - [`Touch`] / [`TouchPhase`] - one touch sample
//! - [`TouchState`] - per-frame touch buffer
//!
//! ## Presentation
//!
//! - [`Color`] - linear RGBA plus `css` and `mocha` palettes
//! - [`SpriteNode`] - minimal sprite + label render node
//! - [`Transition`] / [`DelayedTween`] - frame-driven animation timing

mod color;
mod input;
mod node;
mod primitives;
pub mod transition;

pub use color::*;
pub use hit_test::*;
pub use input::*;
pub use node::*;
pub use primitives::*;
pub use transition::{DelayedTween, EasingFn, Transition, TweenPhase};
