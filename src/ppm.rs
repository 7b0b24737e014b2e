//! Reading and writing of image files
//!
//! PNG input/output for render targets, used by the tests and for
//! offline dumps. Data is always 8-bit RGBA, matching [`PixelBuffer`]'s
//! storage, so a frame can be written straight from `pixel_data()`.

use std::path::Path;

use crate::buffer::PixelBuffer;

pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<(Vec<u8>,usize,usize),image::ImageError> {
    let img = image::open(filename)?.to_rgba8();
    let (w, h) = (img.width(), img.height());
    let buf = img.into_raw();
    Ok((buf, w as usize, h as usize))
}

pub fn write_file<P: AsRef<Path>>(buf: &[u8], width: usize, height: usize, filename: P) -> Result<(), image::ImageError> {
    image::save_buffer(filename, buf, width as u32, height as u32, image::ColorType::Rgba8)
}

/// Write a pixel buffer's frame to an image file
pub fn write_buffer<P: AsRef<Path>>(buffer: &PixelBuffer, filename: P) -> Result<(), image::ImageError> {
    write_file(&buffer.data, buffer.width(), buffer.height(), filename)
}

/// Compare two image files byte for byte, reporting mismatched components
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool,image::ImageError> {
    let (d1,w1,h1) = read_file(f1)?;
    let (d2,w2,h2) = read_file(f2)?;
    if w1 != w2 || h1 != h2 {
        return Ok(false);
    }
    let mut flag = true;
    for (i,(v1,v2)) in d1.iter().zip(d2.iter()).enumerate() {
        if v1 != v2 {
            println!("{} [{},{},{}]: {} {}", i, (i/4)%w1,(i/4)/w1,i%4, v1,v2);
            flag = false;
        }
    }
    Ok(flag)
}
