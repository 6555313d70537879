//! Color types and utilities

use std::fmt;

/// RGBA color with f32 components (0.0 to 1.0)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const ORANGE: Color = Color::rgb(1.0, 0.647, 0.0);
    pub const PURPLE: Color = Color::rgb(0.5, 0.0, 0.5);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from u8 components (0-255)
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create from a packed `0xRRGGBBAA` value
    pub fn from_hex(hex: u32) -> Self {
        Self::from_rgba8(
            ((hex >> 24) & 0xFF) as u8,
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Set alpha and return new color
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Lighten the color
    pub fn lighten(self, amount: f32) -> Self {
        Self {
            r: (self.r + amount).clamp(0.0, 1.0),
            g: (self.g + amount).clamp(0.0, 1.0),
            b: (self.b + amount).clamp(0.0, 1.0),
            a: self.a,
        }
    }

    /// Darken the color
    pub fn darken(self, amount: f32) -> Self {
        self.lighten(-amount)
    }

    /// Linear interpolation between two colors.
    ///
    /// Every channel (alpha included) follows `from * (1 - t) + to * t` with
    /// `t` clamped to `0.0..=1.0`. The end points are returned untouched, so
    /// `t = 0.0` yields exactly `from` and `t = 1.0` exactly `to`.
    pub fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        if t.is_nan() || t <= 0.0 {
            return *from;
        }
        if t >= 1.0 {
            return *to;
        }
        let s = 1.0 - t;
        Self {
            r: from.r * s + to.r * t,
            g: from.g * s + to.g * t,
            b: from.b * s + to.b * t,
            a: from.a * s + to.a * t,
        }
    }

    /// Relative luminance (Rec. 709 weights, no gamma correction)
    pub fn luminance(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Convert to u8 array [r, g, b, a], rounding to the nearest step
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Packed `0xRRGGBBAA` value
    pub fn to_hex(&self) -> u32 {
        let [r, g, b, a] = self.to_rgba8();
        u32::from_be_bytes([r, g, b, a])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_hex())
    }
}
