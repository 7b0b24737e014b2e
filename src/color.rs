//! Colors
//!
//! Fragment programs work in normalized float color ([`Vec4`], each channel
//! in [0,1]); storage is 8-bit RGBA [`Pixel`]s. Conversion happens exactly
//! once per fragment when the pipeline writes to the pixel buffer.

use crate::math::Vec4;

/// Convert an f32 [0,1] component to a u8 [0,255] component
pub fn cu8(v: f32) -> u8 {
    (v.max(0.0).min(1.0) * 255.0).round() as u8
}

/// Convert a u8 [0,255] component to an f32 [0,1] component
pub fn cf32(v: u8) -> f32 {
    f32::from(v) / 255.0
}

/// Color as Red, Green, Blue, and Alpha; 8 bits per channel
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct Pixel {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Pixel {
    /// Create new color
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Pixel { r, g, b, a }
    }
    /// White Color (255,255,255,255)
    pub fn white() -> Self {
        Self::new(255,255,255,255)
    }
    /// Black Color (0,0,0,255)
    pub fn black() -> Self {
        Self::new(0,0,0,255)
    }
    pub fn red() -> Self {
        Self::new(255,0,0,255)
    }
    pub fn green() -> Self {
        Self::new(0,255,0,255)
    }
    pub fn blue() -> Self {
        Self::new(0,0,255,255)
    }
    /// Fully transparent black (0,0,0,0)
    pub fn transparent() -> Self {
        Self::new(0,0,0,0)
    }
    /// Build from a normalized float color, clamping each channel to [0,1]
    pub fn from_unit(c: Vec4) -> Self {
        Self::new(cu8(c.x), cu8(c.y), cu8(c.z), cu8(c.w))
    }
    /// Normalized float color, each channel in [0,1]
    pub fn to_unit(self) -> Vec4 {
        Vec4::new(cf32(self.r), cf32(self.g), cf32(self.b), cf32(self.a))
    }
}

impl From<Vec4> for Pixel {
    fn from(c: Vec4) -> Pixel {
        Pixel::from_unit(c)
    }
}
