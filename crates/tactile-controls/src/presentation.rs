//! Per-state presentation records and the render-node seam
//!
//! A [`Presentation`] bundles every attribute that varies with control state.
//! Controls hand the whole record to their [`RenderNode`] in one call, so a node
//! never shows the fill of one state next to the label of another.

use std::cell::RefCell;
use std::rc::Rc;

use tactile::{mocha, Color, SpriteNode, Transition};
use tactile_macros::WithBuilders;

use crate::state::{ControlState, StateMap};

/// Everything about a control's look that changes with its state
#[derive(Debug, Clone, PartialEq, WithBuilders)]
pub struct Presentation {
    /// Background fill of the sprite
    pub fill_color: Color,
    /// Label point size
    pub font_size: f32,
    /// Label text
    #[with_builders(into)]
    pub label_text: String,
    /// Label color
    pub font_color: Color,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            fill_color: mocha::SURFACE0,
            font_size: 17.0,
            label_text: String::new(),
            font_color: mocha::TEXT,
        }
    }
}

/// Visual configuration for a control
#[derive(Debug, Clone, WithBuilders)]
pub struct ControlStyle {
    /// Presentation for each state
    pub presentations: StateMap<Presentation>,
    /// Slack added to every edge of the hit-test region
    pub bounds_tolerance: f32,
    /// Timing of the fade run by `Control::appear_with_color`
    pub appear_transition: Transition,
}

impl ControlStyle {
    /// Use the same label text in every state
    pub fn with_label(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        for (_, presentation) in self.presentations.iter_mut() {
            presentation.label_text = text.clone();
        }
        self
    }

    /// Replace the presentation of a single state
    pub fn with_presentation(mut self, state: ControlState, presentation: Presentation) -> Self {
        self.presentations.set(state, presentation);
        self
    }
}

impl Default for ControlStyle {
    fn default() -> Self {
        let normal = Presentation::default();
        Self {
            presentations: StateMap::new(
                normal.clone(),
                normal
                    .clone()
                    .with_fill_color(mocha::SURFACE1)
                    .with_font_color(mocha::LAVENDER),
                normal
                    .clone()
                    .with_fill_color(mocha::BLUE)
                    .with_font_color(mocha::CRUST),
                normal
                    .with_fill_color(mocha::BASE)
                    .with_font_color(mocha::OVERLAY0),
            ),
            bounds_tolerance: 0.0,
            appear_transition: Transition::standard(),
        }
    }
}

/// Scene-graph node that shows a control
///
/// Implemented by whatever the host renders with. The control calls
/// [`RenderNode::apply_presentation`] with a complete record whenever the
/// displayed look changes.
pub trait RenderNode {
    /// Show `presentation`; all four facets belong to the same state
    fn apply_presentation(&mut self, presentation: &Presentation);

    /// Follow the control's geometry
    fn set_geometry(&mut self, _position: tactile::Point, _size: tactile::Size) {}
}

impl RenderNode for SpriteNode {
    fn apply_presentation(&mut self, presentation: &Presentation) {
        self.set_color(presentation.fill_color);
        let label = self.label_mut();
        label.text.clone_from(&presentation.label_text);
        label.font_size = presentation.font_size;
        label.font_color = presentation.font_color;
    }

    fn set_geometry(&mut self, position: tactile::Point, size: tactile::Size) {
        self.set_position(position);
        self.set_size(size);
    }
}

/// Shared nodes: the scene graph keeps one handle, the control another
impl<N: RenderNode> RenderNode for Rc<RefCell<N>> {
    fn apply_presentation(&mut self, presentation: &Presentation) {
        self.borrow_mut().apply_presentation(presentation);
    }

    fn set_geometry(&mut self, position: tactile::Point, size: tactile::Size) {
        self.borrow_mut().set_geometry(position, size);
    }
}
