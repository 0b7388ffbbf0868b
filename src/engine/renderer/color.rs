// 8-bit RGBA colors and the named palette used by the screens

use glam::Vec4;

/// Straight-alpha sRGB color with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const YELLOW: Color = Color::rgb(253, 249, 0);
    pub const RED: Color = Color::rgb(230, 41, 55);
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    pub const LIME: Color = Color::rgb(0, 158, 47);
    pub const BLUE: Color = Color::rgb(0, 121, 241);
    pub const PURPLE: Color = Color::rgb(200, 122, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with alpha replaced by `alpha` in [0, 1]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Channels converted from sRGB to linear, alpha untouched
    ///
    /// Every color handed to the GPU goes through this since the surface is sRGB.
    pub fn to_linear(self) -> Vec4 {
        Vec4::new(
            srgb_to_linear(self.r) as f32,
            srgb_to_linear(self.g) as f32,
            srgb_to_linear(self.b) as f32,
            self.a as f32 / 255.0,
        )
    }

    /// Clear value for a render pass
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: srgb_to_linear(self.r),
            g: srgb_to_linear(self.g),
            b: srgb_to_linear(self.b),
            a: self.a as f64 / 255.0,
        }
    }
}

fn srgb_to_linear(c: u8) -> f64 {
    let c = c as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
