use glam::Vec2;

/// A 2D point in scene space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a point at the origin (0, 0)
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

impl From<[f32; 2]> for Point {
    fn from(arr: [f32; 2]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
        }
    }
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Point> for Vec2 {
    fn from(point: Point) -> Self {
        Vec2::new(point.x, point.y)
    }
}

/// Width and height of a node
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Negative or NaN extents collapse to zero
    pub fn sanitized(self) -> Self {
        fn clean(v: f32) -> f32 {
            if v.is_nan() {
                0.0
            } else {
                v.max(0.0)
            }
        }
        Self::new(clean(self.width), clean(self.height))
    }
}

impl From<Vec2> for Size {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Axis-aligned rectangle defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl Rect {
    pub const fn new(min: [f32; 2], max: [f32; 2]) -> Self {
        Self { min, max }
    }

    pub fn from_min_size(min: [f32; 2], size: Size) -> Self {
        Self {
            min,
            max: [min[0] + size.width, min[1] + size.height],
        }
    }

    /// Rectangle of `size` whose center sits at `center`
    ///
    /// This is how a sprite with a (0.5, 0.5) anchor occupies its parent.
    pub fn from_center_size(center: Point, size: Size) -> Self {
        let half = [size.width * 0.5, size.height * 0.5];
        Self {
            min: [center.x - half[0], center.y - half[1]],
            max: [center.x + half[0], center.y + half[1]],
        }
    }

    pub fn width(&self) -> f32 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f32 {
        self.max[1] - self.min[1]
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
        )
    }

    /// Check if a point is inside this rectangle (edges inclusive)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min[0]
            && point.x <= self.max[0]
            && point.y >= self.min[1]
            && point.y <= self.max[1]
    }

    /// Grow every edge outwards by `amount`; negative amounts shrink
    ///
    /// Shrinking never inverts the rectangle: an over-deflated axis collapses
    /// onto its center line.
    pub fn inflate(&self, amount: f32) -> Rect {
        let center = self.center();
        let half_w = (self.width() * 0.5 + amount).max(0.0);
        let half_h = (self.height() * 0.5 + amount).max(0.0);
        Rect {
            min: [center.x - half_w, center.y - half_h],
            max: [center.x + half_w, center.y + half_h],
        }
    }
}
