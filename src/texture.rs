//! Textures
//!
//! Row-major pixel images with a border color. Every fetch goes through
//! [`Texture::pixel_at`], which hands back the border color for any
//! coordinate outside the image; samplers never need their own bounds
//! logic. The coordinate convention is x = column, y = row, everywhere.

use std::path::Path;

use crate::color::Pixel;

/// Texture image with border color
#[derive(Debug,Default,Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Pixel>,
    /// Color returned for out-of-range fetches
    pub border: Pixel,
}

impl Texture {
    /// Create a texture filled with transparent black
    ///
    /// The border color defaults to transparent black as well. A 0x0
    /// texture is valid; every fetch on it returns the border.
    pub fn new(width: usize, height: usize) -> Self {
        Texture {
            width,
            height,
            pixels: vec![Pixel::transparent(); width * height],
            border: Pixel::transparent(),
        }
    }
    /// Wrap an existing pixel vector; `pixels.len()` must be `width * height`
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Pixel>) -> Self {
        assert_eq!(pixels.len(), width * height);
        Texture {
            width, height, pixels, border: Pixel::transparent()
        }
    }
    /// Load from an image file, converting to RGBA
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = (img.width() as usize, img.height() as usize);
        let pixels = img
            .into_raw()
            .chunks_exact(4)
            .map(|c| Pixel::new(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Texture::from_pixels(width, height, pixels))
    }
    /// Procedural checkerboard of `cell`-sized squares alternating `a` and `b`
    pub fn checkerboard(width: usize, height: usize, cell: usize, a: Pixel, b: Pixel) -> Self {
        let mut tex = Texture::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let on = ((x / cell) + (y / cell)) % 2 == 0;
                tex.pixels[y * width + x] = if on { a } else { b };
            }
        }
        tex
    }
    pub fn set_border(&mut self, border: Pixel) {
        self.border = border;
    }
    /// Set a single texel; out-of-range coordinates are ignored
    pub fn set(&mut self, x: usize, y: usize, pixel: Pixel) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = pixel;
        }
    }
    /// Fetch the texel at (x = column, y = row)
    ///
    /// Any coordinate outside the image, including everything on an empty
    /// texture, yields the border color.
    pub fn pixel_at(&self, x: i32, y: i32) -> Pixel {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return self.border;
        }
        self.pixels[y as usize * self.width + x as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_and_border() {
        let mut tex = Texture::new(2, 2);
        tex.set(1, 0, Pixel::red());
        tex.set_border(Pixel::blue());
        assert_eq!(tex.pixel_at(1, 0), Pixel::red());
        assert_eq!(tex.pixel_at(0, 0), Pixel::transparent());
        assert_eq!(tex.pixel_at(-1, 0), Pixel::blue());
        assert_eq!(tex.pixel_at(0, 2), Pixel::blue());
        assert_eq!(tex.pixel_at(2, 0), Pixel::blue());
    }

    #[test]
    fn empty_texture_is_all_border() {
        let mut tex = Texture::new(0, 0);
        tex.set_border(Pixel::green());
        assert_eq!(tex.pixel_at(0, 0), Pixel::green());
    }

    #[test]
    fn checkerboard_pattern() {
        let tex = Texture::checkerboard(4, 4, 2, Pixel::white(), Pixel::black());
        assert_eq!(tex.pixel_at(0, 0), Pixel::white());
        assert_eq!(tex.pixel_at(1, 1), Pixel::white());
        assert_eq!(tex.pixel_at(2, 0), Pixel::black());
        assert_eq!(tex.pixel_at(0, 2), Pixel::black());
        assert_eq!(tex.pixel_at(2, 2), Pixel::white());
    }

    #[test]
    fn rows_are_rows() {
        // 2 wide, 1 tall: both texels live on row 0
        let tex = Texture::from_pixels(2, 1, vec![Pixel::red(), Pixel::green()]);
        assert_eq!(tex.pixel_at(0, 0), Pixel::red());
        assert_eq!(tex.pixel_at(1, 0), Pixel::green());
        assert_eq!(tex.pixel_at(0, 1), tex.border);
    }
}
