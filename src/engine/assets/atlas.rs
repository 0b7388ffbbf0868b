// Glyph atlas packing

use glam::Vec2;

/// A region within a texture atlas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasRegion {
    /// Position in the atlas (pixels)
    pub x: u32,
    pub y: u32,

    /// Size of the region (pixels)
    pub width: u32,
    pub height: u32,

    /// UV coordinates (0.0 to 1.0)
    pub uv_min: Vec2,
    pub uv_max: Vec2,
}

impl AtlasRegion {
    /// Create a new atlas region with calculated UV coordinates
    pub fn new(x: u32, y: u32, width: u32, height: u32, atlas_width: u32, atlas_height: u32) -> Self {
        let uv_min = Vec2::new(
            x as f32 / atlas_width as f32,
            y as f32 / atlas_height as f32,
        );
        let uv_max = Vec2::new(
            (x + width) as f32 / atlas_width as f32,
            (y + height) as f32 / atlas_height as f32,
        );

        Self {
            x,
            y,
            width,
            height,
            uv_min,
            uv_max,
        }
    }
}

/// Shelf packer: fills rows left to right, opening a new row when one is full
pub struct AtlasBuilder {
    width: u32,
    height: u32,
    padding: u32,
    current_x: u32,
    current_y: u32,
    row_height: u32,
}

impl AtlasBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            padding: 1,
            current_x: 0,
            current_y: 0,
            row_height: 0,
        }
    }

    /// Set the padding between glyphs (keeps linear filtering from bleeding)
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Reserve space for a glyph
    ///
    /// Returns the region if successful, or None if it doesn't fit
    pub fn add_glyph(&mut self, glyph_width: u32, glyph_height: u32) -> Option<AtlasRegion> {
        if glyph_width > self.width {
            return None;
        }

        if self.current_x + glyph_width > self.width {
            self.current_x = 0;
            self.current_y += self.row_height + self.padding;
            self.row_height = 0;
        }

        if self.current_y + glyph_height > self.height {
            return None;
        }

        let region = AtlasRegion::new(
            self.current_x,
            self.current_y,
            glyph_width,
            glyph_height,
            self.width,
            self.height,
        );

        self.current_x += glyph_width + self.padding;
        self.row_height = self.row_height.max(glyph_height);

        Some(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atlas_region_uv() {
        let region = AtlasRegion::new(0, 0, 64, 64, 256, 256);

        assert_eq!(region.uv_min, Vec2::new(0.0, 0.0));
        assert_eq!(region.uv_max, Vec2::new(0.25, 0.25));
    }

    #[test]
    fn test_atlas_builder() {
        let mut builder = AtlasBuilder::new(256, 256);

        let a = builder.add_glyph(20, 24).unwrap();
        let b = builder.add_glyph(18, 24).unwrap();
        let g = builder.add_glyph(16, 30).unwrap();

        assert_eq!((a.x, a.y), (0, 0));
        // Default padding is one pixel
        assert_eq!(b.x, 21);
        assert_eq!(g.x, 40);
    }

    #[test]
    fn test_atlas_builder_overflow() {
        let mut builder = AtlasBuilder::new(64, 64);
        assert!(builder.add_glyph(128, 16).is_none());
        assert!(builder.add_glyph(16, 128).is_none());
    }

    #[test]
    fn test_atlas_builder_wrapping() {
        let mut builder = AtlasBuilder::new(100, 100).with_padding(0);

        let first = builder.add_glyph(60, 30).unwrap();
        let second = builder.add_glyph(60, 30).unwrap();

        assert_eq!(first.y, 0);
        assert_eq!(second.x, 0);
        assert_eq!(second.y, 30);
    }

    #[test]
    fn test_regions_do_not_overlap() {
        let mut builder = AtlasBuilder::new(128, 128);
        let regions: Vec<_> = "0123456789"
            .chars()
            .filter_map(|_| builder.add_glyph(30, 20))
            .collect();
        assert_eq!(regions.len(), 10);

        for (i, a) in regions.iter().enumerate() {
            for b in &regions[i + 1..] {
                let apart = a.x + a.width <= b.x
                    || b.x + b.width <= a.x
                    || a.y + a.height <= b.y
                    || b.y + b.height <= a.y;
                assert!(apart, "{:?} overlaps {:?}", a, b);
            }
        }
    }
}
