// Bitmap font: glyphs rasterized once with ab_glyph, laid out as screen quads

use crate::engine::assets::{AssetError, AtlasBuilder, AtlasRegion};
use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use glam::Vec2;
use log::{info, warn};
use std::collections::HashMap;

/// Pixel height glyphs are rasterized at; other sizes scale the quads
pub const GLYPH_BASE_SIZE: f32 = 48.0;
const ATLAS_SIZE: u32 = 1024;
const FALLBACK_CHAR: char = '?';

/// Placement of one glyph relative to the pen, at the base size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// None for glyphs with no ink (space)
    pub region: Option<AtlasRegion>,
    /// Top-left of the bitmap relative to the pen at the top of the line
    pub offset: Vec2,
    pub advance: f32,
}

/// A glyph quad in pixel space (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    pub min: Vec2,
    pub max: Vec2,
    pub uv_min: Vec2,
    pub uv_max: Vec2,
}

/// Printable ASCII rasterized into an RGBA atlas (white, coverage in alpha)
pub struct FontAtlas {
    base_size: f32,
    line_height: f32,
    glyphs: HashMap<char, GlyphMetrics>,
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl FontAtlas {
    pub fn rasterize(font_bytes: Vec<u8>, base_size: f32) -> Result<Self, AssetError> {
        let font = FontVec::try_from_vec(font_bytes).map_err(|e| AssetError::Decode {
            name: "font".to_string(),
            reason: e.to_string(),
        })?;

        let scale = PxScale::from(base_size);
        let scaled = font.as_scaled(scale);
        let ascent = scaled.ascent();
        let line_height = ascent - scaled.descent() + scaled.line_gap();

        let (width, height) = (ATLAS_SIZE, ATLAS_SIZE);
        let mut pixels = [255u8, 255, 255, 0].repeat((width * height) as usize);
        let mut builder = AtlasBuilder::new(width, height).with_padding(2);
        let mut glyphs = HashMap::new();

        for ch in (32u8..=126).map(char::from) {
            let id = font.glyph_id(ch);
            let advance = scaled.h_advance(id);
            let glyph = id.with_scale_and_position(scale, point(0.0, ascent));

            let mut metrics = GlyphMetrics {
                region: None,
                offset: Vec2::ZERO,
                advance,
            };

            if let Some(outline) = font.outline_glyph(glyph) {
                let bounds = outline.px_bounds();
                let w = bounds.width().ceil().max(1.0) as u32;
                let h = bounds.height().ceil().max(1.0) as u32;

                match builder.add_glyph(w, h) {
                    Some(region) => {
                        outline.draw(|x, y, coverage| {
                            if x >= w || y >= h {
                                return;
                            }
                            let px = ((region.y + y) * width + region.x + x) as usize * 4;
                            pixels[px + 3] = (coverage.clamp(0.0, 1.0) * 255.0) as u8;
                        });
                        metrics.region = Some(region);
                        metrics.offset = Vec2::new(bounds.min.x, bounds.min.y);
                    }
                    None => warn!("Glyph atlas full, dropping '{}'", ch),
                }
            }

            glyphs.insert(ch, metrics);
        }

        info!("Rasterized {} glyphs at {}px", glyphs.len(), base_size);

        Ok(Self {
            base_size,
            line_height,
            glyphs,
            pixels,
            width,
            height,
        })
    }

    /// Atlas with no glyphs; every string lays out to nothing
    pub fn empty() -> Self {
        Self {
            base_size: GLYPH_BASE_SIZE,
            line_height: GLYPH_BASE_SIZE,
            glyphs: HashMap::new(),
            pixels: vec![255, 255, 255, 0],
            width: 1,
            height: 1,
        }
    }

    /// RGBA8 pixels of the atlas
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn metrics(&self, ch: char) -> Option<&GlyphMetrics> {
        self.glyphs
            .get(&ch)
            .or_else(|| self.glyphs.get(&FALLBACK_CHAR))
    }

    /// Lay out `text` with its top-left corner at `origin`, `size` pixels tall
    pub fn layout(&self, text: &str, origin: Vec2, size: f32) -> Vec<GlyphQuad> {
        let scale = size / self.base_size;
        let mut pen = origin;
        let mut quads = Vec::with_capacity(text.len());

        for ch in text.chars() {
            if ch == '\n' {
                pen = Vec2::new(origin.x, pen.y + self.line_height * scale);
                continue;
            }
            let Some(metrics) = self.metrics(ch) else {
                continue;
            };

            if let Some(region) = metrics.region {
                let min = pen + metrics.offset * scale;
                let max = min + Vec2::new(region.width as f32, region.height as f32) * scale;
                quads.push(GlyphQuad {
                    min,
                    max,
                    uv_min: region.uv_min,
                    uv_max: region.uv_max,
                });
            }
            pen.x += metrics.advance * scale;
        }

        quads
    }
}

#[cfg(test)]
impl FontAtlas {
    fn from_glyphs(base_size: f32, line_height: f32, glyphs: HashMap<char, GlyphMetrics>) -> Self {
        Self {
            base_size,
            line_height,
            glyphs,
            pixels: Vec::new(),
            width: 0,
            height: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Two 10x20 glyphs advancing 12px, plus an inkless space, at a 20px base
    fn test_atlas() -> FontAtlas {
        let mut builder = AtlasBuilder::new(64, 64).with_padding(0);
        let mut glyphs = HashMap::new();
        for ch in ['A', '?'] {
            glyphs.insert(
                ch,
                GlyphMetrics {
                    region: builder.add_glyph(10, 20),
                    offset: Vec2::new(1.0, 2.0),
                    advance: 12.0,
                },
            );
        }
        glyphs.insert(
            ' ',
            GlyphMetrics {
                region: None,
                offset: Vec2::ZERO,
                advance: 5.0,
            },
        );
        FontAtlas::from_glyphs(20.0, 24.0, glyphs)
    }

    #[test]
    fn test_layout_positions() {
        let atlas = test_atlas();
        let quads = atlas.layout("A A", Vec2::new(10.0, 40.0), 20.0);

        assert_eq!(quads.len(), 2);
        assert_eq!(quads[0].min, Vec2::new(11.0, 42.0));
        assert_eq!(quads[0].max, Vec2::new(21.0, 62.0));
        // 12 for 'A' + 5 for the space
        assert_eq!(quads[1].min.x, 10.0 + 17.0 + 1.0);
    }

    #[test]
    fn test_layout_scales_with_size() {
        let atlas = test_atlas();
        let quads = atlas.layout("A", Vec2::ZERO, 40.0);

        assert_eq!(quads[0].min, Vec2::new(2.0, 4.0));
        assert_eq!(quads[0].max, Vec2::new(22.0, 44.0));
    }

    #[test]
    fn test_unknown_char_uses_fallback() {
        let atlas = test_atlas();
        let quads = atlas.layout("é", Vec2::ZERO, 20.0);
        let fallback = atlas.glyphs[&'?'].region.unwrap();

        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].uv_min, fallback.uv_min);
    }

    #[test]
    fn test_newline_starts_next_line() {
        let atlas = test_atlas();
        let quads = atlas.layout("A\nA", Vec2::new(5.0, 0.0), 20.0);

        assert_eq!(quads[1].min.x, quads[0].min.x);
        assert_relative_eq!(quads[1].min.y - quads[0].min.y, 24.0);
    }

    #[test]
    fn test_empty_atlas_draws_nothing() {
        let atlas = FontAtlas::empty();
        assert!(atlas.layout("Kills: 3", Vec2::new(670.0, 0.0), 20.0).is_empty());
        assert_eq!(atlas.size(), (1, 1));
        assert_eq!(atlas.pixels().len(), 4);
    }

    #[test]
    fn test_invalid_font_is_rejected() {
        let result = FontAtlas::rasterize(vec![0u8; 32], GLYPH_BASE_SIZE);
        assert!(matches!(result, Err(AssetError::Decode { .. })));
    }
}
