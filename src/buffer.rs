//! Pixel buffer
//!
//! Target surface for the pipeline: a row-major grid of 8-bit RGBA pixels
//! owning its storage. Writes outside the buffer are silently ignored so
//! rasterization code never needs its own bounds bookkeeping; a display
//! collaborator gets at the raw bytes through [`PixelBuffer::pixel_data`]
//! and the row/component metadata.

use crate::color::Pixel;

/// Bytes per pixel, RGBA order
pub const BYTES_PER_PIXEL: usize = 4;

/// Pixel Buffer
///
/// Data is stored as row-major order (C-format), top-left origin, y down
#[derive(Debug,Default)]
pub struct PixelBuffer {
    /// Component level data of the image, RGBA interleaved
    pub data: Vec<u8>,
    /// Image Width in pixels
    pub width: usize,
    /// Image Height in pixels
    pub height: usize,
}

impl PixelBuffer {
    /// Create a new buffer of width and height, filled with opaque black
    pub fn new(width: usize, height: usize) -> Self {
        let mut buf = PixelBuffer {
            width, height, data: vec![0u8; width * height * BYTES_PER_PIXEL]
        };
        buf.fill(Pixel::black());
        buf
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    /// Bytes in one row of pixels
    pub fn bytes_per_row(&self) -> usize {
        self.width * BYTES_PER_PIXEL
    }
    /// Bits in one color component
    pub fn bits_per_component(&self) -> usize {
        8
    }
    /// Size of the underlying byte storage
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    /// Set a single pixel; coordinates outside the buffer are ignored
    pub fn set(&mut self, x: i32, y: i32, pixel: Pixel) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let i = (y as usize * self.width + x as usize) * BYTES_PER_PIXEL;
        self.data[i] = pixel.r;
        self.data[i + 1] = pixel.g;
        self.data[i + 2] = pixel.b;
        self.data[i + 3] = pixel.a;
    }
    /// Read a single pixel, `None` outside the buffer
    pub fn get(&self, x: i32, y: i32) -> Option<Pixel> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        let i = (y as usize * self.width + x as usize) * BYTES_PER_PIXEL;
        Some(Pixel::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ))
    }
    /// Fill the entire buffer with one color
    pub fn fill(&mut self, pixel: Pixel) {
        for chunk in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk[0] = pixel.r;
            chunk[1] = pixel.g;
            chunk[2] = pixel.b;
            chunk[3] = pixel.a;
        }
    }
    /// Reallocate to a new size, refilled with opaque black
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.data = vec![0u8; width * height * BYTES_PER_PIXEL];
        self.fill(Pixel::black());
    }
}

impl crate::PixelData for PixelBuffer {
    fn pixel_data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_opaque_black() {
        let buf = PixelBuffer::new(2, 2);
        assert_eq!(buf.len(), 16);
        assert_eq!(buf.get(0, 0), Some(Pixel::black()));
        assert_eq!(buf.get(1, 1), Some(Pixel::black()));
    }

    #[test]
    fn set_get() {
        let mut buf = PixelBuffer::new(4, 3);
        buf.set(2, 1, Pixel::new(10, 20, 30, 40));
        assert_eq!(buf.get(2, 1), Some(Pixel::new(10, 20, 30, 40)));
        assert_eq!(buf.get(1, 2), Some(Pixel::black()));
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut buf = PixelBuffer::new(4, 3);
        buf.set(-1, 0, Pixel::white());
        buf.set(0, -1, Pixel::white());
        buf.set(4, 0, Pixel::white());
        buf.set(0, 3, Pixel::white());
        assert!(buf.data.iter().step_by(4).all(|&c| c == 0));
        assert_eq!(buf.get(4, 0), None);
        assert_eq!(buf.get(-1, 0), None);
    }

    #[test]
    fn metadata() {
        let buf = PixelBuffer::new(7, 5);
        assert_eq!(buf.width(), 7);
        assert_eq!(buf.height(), 5);
        assert_eq!(buf.bytes_per_row(), 28);
        assert_eq!(buf.bits_per_component(), 8);
    }

    #[test]
    fn resize_clears() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set(0, 0, Pixel::white());
        buf.resize(3, 3);
        assert_eq!(buf.len(), 36);
        assert_eq!(buf.get(0, 0), Some(Pixel::black()));
    }
}
