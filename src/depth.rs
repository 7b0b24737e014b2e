//! Depth buffer
//!
//! One f32 per pixel, same dimensions as the pixel buffer. Fragments pass
//! when their window z is less than or equal to the stored value, so ties
//! go to the most recently drawn fragment.

/// Depth Buffer
#[derive(Debug,Default)]
pub struct DepthBuffer {
    pub data: Vec<f32>,
    pub width: usize,
    pub height: usize,
}

impl DepthBuffer {
    /// Create a new buffer cleared to the given far depth
    pub fn new(width: usize, height: usize, far: f32) -> Self {
        DepthBuffer {
            width, height, data: vec![far; width * height]
        }
    }
    /// Reset every entry to the given far depth
    pub fn clear(&mut self, far: f32) {
        self.data.iter_mut().for_each(|v| *v = far);
    }
    /// Reallocate to a new size; contents are unspecified until cleared
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.data = vec![0.0; width * height];
    }
    /// Depth value at a pixel, `None` outside the buffer
    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width + x as usize])
    }
    /// Test a fragment depth and store it on pass
    ///
    /// Passes when `z <= stored` (ties favor the incoming fragment).
    /// Out-of-bounds coordinates fail the test.
    pub fn test_and_set(&mut self, x: i32, y: i32, z: f32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        let i = y as usize * self.width + x as usize;
        if z <= self.data[i] {
            self.data[i] = z;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearer_passes_farther_fails() {
        let mut depth = DepthBuffer::new(2, 2, 1.0);
        assert!(depth.test_and_set(0, 0, 0.6));
        assert!(!depth.test_and_set(0, 0, 0.8));
        assert!(depth.test_and_set(0, 0, 0.4));
        assert_eq!(depth.get(0, 0), Some(0.4));
    }

    #[test]
    fn equal_depth_passes() {
        let mut depth = DepthBuffer::new(1, 1, 1.0);
        assert!(depth.test_and_set(0, 0, 0.5));
        assert!(depth.test_and_set(0, 0, 0.5));
    }

    #[test]
    fn out_of_bounds_fails() {
        let mut depth = DepthBuffer::new(2, 2, 1.0);
        assert!(!depth.test_and_set(-1, 0, 0.0));
        assert!(!depth.test_and_set(2, 0, 0.0));
        assert_eq!(depth.get(2, 0), None);
    }

    #[test]
    fn clear_resets() {
        let mut depth = DepthBuffer::new(2, 1, 1.0);
        depth.test_and_set(0, 0, 0.25);
        depth.clear(1.0);
        assert_eq!(depth.get(0, 0), Some(1.0));
    }
}
