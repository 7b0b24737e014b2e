//! Vertices
//!
//! The attribute bundle that flows through the whole pipeline: a homogeneous
//! position plus a normalized color and texture coordinates. The same type
//! serves as clip-space input, clipper currency, window-space interpolant
//! and resolved fragment, so it supports component-wise arithmetic over
//! *all* fields; edge and span walkers step whole vertices at a time.

use std::ops::{Add, Mul, Sub};

use crate::math::{Vec2, Vec4};

/// Vertex: position with color and texture coordinate attributes
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Vertex {
    /// Position; clip space before the divide, window space after,
    /// with 1/w parked in `w` once perspective correction kicks in
    pub position: Vec4,
    /// Normalized RGBA color, each channel in [0,1]
    pub color: Vec4,
    /// Texture coordinates (s, t)
    pub tex_coord: Vec2,
}

impl Vertex {
    pub fn new(position: Vec4, color: Vec4, tex_coord: Vec2) -> Self {
        Vertex { position, color, tex_coord }
    }
    /// Position-only vertex, white and untextured
    pub fn from_position(position: Vec4) -> Self {
        Vertex {
            position,
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            tex_coord: Vec2::new(0.0, 0.0),
        }
    }
    /// Interpolate every field, `a` at `t = 0`, `b` at `t = 1`
    pub fn lerp(a: &Vertex, b: &Vertex, t: f32) -> Vertex {
        Vertex {
            position: Vec4::lerp(a.position, b.position, t),
            color: Vec4::lerp(a.color, b.color, t),
            tex_coord: Vec2::lerp(a.tex_coord, b.tex_coord, t),
        }
    }
}

impl Add for Vertex {
    type Output = Vertex;
    fn add(self, other: Vertex) -> Vertex {
        Vertex {
            position: self.position + other.position,
            color: self.color + other.color,
            tex_coord: self.tex_coord + other.tex_coord,
        }
    }
}
impl Sub for Vertex {
    type Output = Vertex;
    fn sub(self, other: Vertex) -> Vertex {
        Vertex {
            position: self.position - other.position,
            color: self.color - other.color,
            tex_coord: self.tex_coord - other.tex_coord,
        }
    }
}
impl Mul<f32> for Vertex {
    type Output = Vertex;
    fn mul(self, s: f32) -> Vertex {
        Vertex {
            position: self.position * s,
            color: self.color * s,
            tex_coord: self.tex_coord * s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_midpoint() {
        let a = Vertex::new(
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec2::new(0.0, 0.0),
        );
        let b = Vertex::new(
            Vec4::new(2.0, 4.0, 6.0, 1.0),
            Vec4::new(1.0, 1.0, 1.0, 1.0),
            Vec2::new(1.0, 0.5),
        );
        let m = Vertex::lerp(&a, &b, 0.5);
        assert_eq!(m.position, Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(m.color, Vec4::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(m.tex_coord, Vec2::new(0.5, 0.25));
    }

    #[test]
    fn arithmetic_steps_all_fields() {
        let a = Vertex::new(
            Vec4::new(1.0, 2.0, 3.0, 4.0),
            Vec4::new(0.1, 0.2, 0.3, 0.4),
            Vec2::new(0.5, 0.6),
        );
        let step = (a - Vertex::default()) * 0.5;
        assert_eq!(step.position, Vec4::new(0.5, 1.0, 1.5, 2.0));
        assert_eq!(step.tex_coord, Vec2::new(0.25, 0.3));
    }
}
