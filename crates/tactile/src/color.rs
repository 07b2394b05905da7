/// RGBA color in linear space with values in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub const fn transparent() -> Self {
        Self::rgba(0.0, 0.0, 0.0, 0.0)
    }

    /// Convert an 8-bit sRGB color to linear space
    ///
    /// Uses the BT.709 transfer curve with a polynomial stand-in for the 2.4 power,
    /// which keeps the conversion usable in `const` palettes.
    #[inline]
    pub const fn srgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        const fn srgb_to_linear(c: u8) -> f32 {
            let x = c as f32 / 255.0;
            if x <= 0.04045 {
                x / 12.92
            } else {
                let t = (x + 0.055) / 1.055;
                t * t * (0.5870 * t + 0.4130)
            }
        }

        Self::rgba(
            srgb_to_linear(r),
            srgb_to_linear(g),
            srgb_to_linear(b),
            a as f32 / 255.0,
        )
    }

    /// Same color with the alpha channel replaced
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }

    /// Scale the RGB channels towards black, keeping alpha
    ///
    /// `factor` of 1.0 is a no-op, 0.0 gives black.
    pub fn darken(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self::rgba(self.r * f, self.g * f, self.b * f, self.a)
    }

    /// Channel-wise linear interpolation towards `to`
    pub fn lerp(self, to: Color, t: f32) -> Self {
        crate::transition::lerp_color(self, to, t)
    }

    /// Whether every channel is within `epsilon` of `other`
    pub fn approx_eq(&self, other: &Color, epsilon: f32) -> bool {
        (self.r - other.r).abs() <= epsilon
            && (self.g - other.g).abs() <= epsilon
            && (self.b - other.b).abs() <= epsilon
            && (self.a - other.a).abs() <= epsilon
    }
}

impl Default for Color {
    fn default() -> Self {
        css::WHITE
    }
}

/// CSS color constants
pub mod css {
    use super::Color;

    pub const BLACK: Color = Color::srgba(0, 0, 0, 255);
    pub const GRAY: Color = Color::srgba(128, 128, 128, 255);
    pub const RED: Color = Color::srgba(255, 0, 0, 255);
    pub const GREEN: Color = Color::srgba(0, 128, 0, 255);
    pub const BLUE: Color = Color::srgba(0, 0, 255, 255);
    pub const YELLOW: Color = Color::srgba(255, 255, 0, 255);
    pub const WHITE: Color = Color::srgba(255, 255, 255, 255);
}

/// Catppuccin Mocha, the palette the default control style is drawn from
pub mod mocha {
    use super::Color;

    pub const LAVENDER: Color = Color::srgba(180, 190, 254, 255);
    pub const BLUE: Color = Color::srgba(137, 180, 250, 255);
    pub const PEACH: Color = Color::srgba(250, 179, 135, 255);
    pub const TEXT: Color = Color::srgba(205, 214, 244, 255);
    pub const SUBTEXT0: Color = Color::srgba(166, 173, 200, 255);
    pub const OVERLAY0: Color = Color::srgba(108, 112, 134, 255);
    pub const SURFACE1: Color = Color::srgba(69, 71, 90, 255);
    pub const SURFACE0: Color = Color::srgba(49, 50, 68, 255);
    pub const BASE: Color = Color::srgba(30, 30, 46, 255);
    pub const CRUST: Color = Color::srgba(17, 17, 27, 255);
}
