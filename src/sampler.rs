//! Texture sampling
//!
//! Point and bilinear lookups over a borrowed [`Texture`], returning
//! normalized float colors for fragment programs. Coordinates are (s, t)
//! in [0,1] with s selecting the column and t the row; values outside the
//! range clamp.

use crate::math::{Vec2, Vec4};
use crate::texture::Texture;

/// Texture sampler borrowing the texture it reads
#[derive(Debug)]
pub struct Sampler<'a> {
    texture: &'a Texture,
}

impl<'a> Sampler<'a> {
    pub fn new(texture: &'a Texture) -> Self {
        Sampler { texture }
    }
    pub fn texture(&self) -> &Texture {
        self.texture
    }
    /// Nearest-texel lookup
    ///
    /// Clamps (s, t) to [0,1], scales by (width-1, height-1) and truncates
    /// to integer texel coordinates. On an empty texture the fetch falls
    /// through to the border color.
    pub fn point(&self, st: Vec2) -> Vec4 {
        let s = st.x.max(0.0).min(1.0);
        let t = st.y.max(0.0).min(1.0);
        let x = (s * (self.texture.width as f32 - 1.0)) as i32;
        let y = (t * (self.texture.height as f32 - 1.0)) as i32;
        self.texture.pixel_at(x, y).to_unit()
    }
    /// Bilinear lookup over the four neighboring texels
    ///
    /// Clamps (s, t) to [0,1], then works in texel space offset by half a
    /// texel so weights are taken between texel centers. At the image
    /// edges the +1 neighbors land outside and fetch the border color;
    /// that is the border's one purpose on a non-empty texture.
    pub fn bilinear(&self, st: Vec2) -> Vec4 {
        let s = st.x.max(0.0).min(1.0);
        let t = st.y.max(0.0).min(1.0);
        let fx = s * self.texture.width as f32 - 0.5;
        let fy = t * self.texture.height as f32 - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let wx = fx - x0;
        let wy = fy - y0;
        let (x0, y0) = (x0 as i32, y0 as i32);
        let c00 = self.texture.pixel_at(x0, y0).to_unit();
        let c10 = self.texture.pixel_at(x0 + 1, y0).to_unit();
        let c01 = self.texture.pixel_at(x0, y0 + 1).to_unit();
        let c11 = self.texture.pixel_at(x0 + 1, y0 + 1).to_unit();
        let top = Vec4::lerp(c00, c10, wx);
        let bottom = Vec4::lerp(c01, c11, wx);
        Vec4::lerp(top, bottom, wy)
    }
}
