use crate::color::{css, Color};
use crate::primitives::{Point, Rect, Size};

/// Text drawn on top of a sprite, centered on it
#[derive(Debug, Clone, PartialEq)]
pub struct LabelNode {
    pub text: String,
    pub font_size: f32,
    pub font_color: Color,
}

impl Default for LabelNode {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: 17.0,
            font_color: css::WHITE,
        }
    }
}

/// A colored, center-anchored rectangle with an optional label
///
/// This is the minimal slice of a scene-graph sprite that controls need for
/// visual feedback. Real hosts usually mirror it into their own node types.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteNode {
    name: Option<String>,
    position: Point,
    size: Size,
    color: Color,
    alpha: f32,
    hidden: bool,
    label: LabelNode,
}

impl SpriteNode {
    /// Create a white sprite of the given size at the origin
    pub fn new(size: Size) -> Self {
        Self {
            name: None,
            position: Point::zero(),
            size: size.sanitized(),
            color: css::WHITE,
            alpha: 1.0,
            hidden: false,
            label: LabelNode::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_label(mut self, label: LabelNode) -> Self {
        self.label = label;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size.sanitized();
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn label(&self) -> &LabelNode {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut LabelNode {
        &mut self.label
    }

    /// Bounds in the parent's space
    pub fn frame(&self) -> Rect {
        Rect::from_center_size(self.position, self.size)
    }
}
