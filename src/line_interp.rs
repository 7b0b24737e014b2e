//! Linear interpolation along a pixel axis
//!
//! DDA helper behind line rasterization. A segment is walked along its
//! major axis (the one with the larger coordinate delta) one pixel at a
//! time while the interpolator supplies the minor-axis coordinate.

/// DDA interpolator stepping a value once per major-axis pixel
///
/// Callers structure the walk as draw-then-check:
///
/// ```
/// use renderlib::LinearInterpolator;
///
/// let mut lerp = LinearInterpolator::new(4.0, 2.0, 10.0, 0.0);
/// let mut pixels = 0;
/// loop {
///     pixels += 1; // plot at lerp.value()
///     if lerp.interpolate() == 0 {
///         break;
///     }
/// }
/// assert_eq!(pixels, 5); // floor(|major|) + 1
/// ```
///
/// so a zero-length segment still plots exactly one pixel.
#[derive(Debug)]
pub struct LinearInterpolator {
    value: f32,
    step: f32,
    steps: u32,
}

impl LinearInterpolator {
    /// Set up a walk of `floor(|major_delta|)` steps
    ///
    /// `start` is the interpolated value at the true segment start and
    /// `offset` the sub-pixel distance from there to the first pixel center
    /// on the major axis; the initial value is prestepped by the signed
    /// slope times that offset. A zero major delta leaves both the step
    /// and the budget at zero rather than dividing.
    pub fn new(major_delta: f32, minor_delta: f32, start: f32, offset: f32) -> Self {
        let major = major_delta.abs();
        let step = if major == 0.0 { 0.0 } else { minor_delta / major };
        LinearInterpolator {
            value: start + step * offset,
            step,
            steps: major as u32,
        }
    }
    /// Current interpolated value
    pub fn value(&self) -> f32 {
        self.value
    }
    /// Advance one major-axis pixel; returns the remaining step budget
    /// from *before* the advance, so the final pixel reports 0
    pub fn interpolate(&mut self) -> u32 {
        self.value += self.step;
        let remaining = self.steps;
        self.steps = self.steps.saturating_sub(1);
        remaining
    }
}
