//! Frustum clipping
//!
//! Triangles are clipped in homogeneous clip space, before the perspective
//! divide, using [Sutherland-Hodgman](https://en.wikipedia.org/wiki/Sutherland%E2%80%93Hodgman_algorithm)
//! polygon clipping against the six frustum planes. Clipping before the
//! divide is what keeps vertices behind the eye (w <= 0) from ever being
//! projected.
//!
//! The visible region is `-w <= x <= w`, `-w <= y <= w`, `0 <= z <= w`:
//! x and y are symmetric but depth runs zero-to-one. The asymmetry is
//! deliberate and matches both [`Mat4::perspective`](crate::math::Mat4::perspective)
//! and the window z remapping.

use crate::vertex::Vertex;

/// The six frustum planes in homogeneous clip space
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum ClipPlane {
    /// `x >= -w`
    Left,
    /// `x <= w`
    Right,
    /// `y >= -w`
    Bottom,
    /// `y <= w`
    Top,
    /// `z >= 0`
    Near,
    /// `z <= w`
    Far,
}

/// All six planes, in clipping order
pub const FRUSTUM_PLANES: [ClipPlane; 6] = [
    ClipPlane::Left,
    ClipPlane::Right,
    ClipPlane::Bottom,
    ClipPlane::Top,
    ClipPlane::Near,
    ClipPlane::Far,
];

impl ClipPlane {
    /// Signed boundary value; >= 0 means the vertex is on the visible side
    ///
    /// Points exactly on a plane count as visible.
    pub fn distance(self, v: &Vertex) -> f32 {
        let p = v.position;
        match self {
            ClipPlane::Left => p.x + p.w,
            ClipPlane::Right => p.w - p.x,
            ClipPlane::Bottom => p.y + p.w,
            ClipPlane::Top => p.w - p.y,
            ClipPlane::Near => p.z,
            ClipPlane::Far => p.w - p.z,
        }
    }
    /// Is the vertex on the visible side of this plane?
    pub fn is_inside(self, v: &Vertex) -> bool {
        self.distance(v) >= 0.0
    }
}

/// Intersection of the edge `a -> b` with a plane
///
/// The crossing parameter comes from the two boundary values,
/// `t = da / (da - db)`, and every vertex attribute is interpolated,
/// not just the position.
pub fn intersect(a: &Vertex, b: &Vertex, plane: ClipPlane) -> Vertex {
    let da = plane.distance(a);
    let db = plane.distance(b);
    let t = da / (da - db);
    Vertex::lerp(a, b, t)
}

/// Clip a polygon against a single plane
///
/// Emits each inside vertex, plus the edge intersection whenever an edge
/// crosses the plane. An inside input polygon is emitted unchanged in its
/// original order.
pub fn clip_polygon(input: &[Vertex], plane: ClipPlane, output: &mut Vec<Vertex>) {
    output.clear();
    for (i, current) in input.iter().enumerate() {
        let next = &input[(i + 1) % input.len()];
        let current_inside = plane.is_inside(current);
        let next_inside = plane.is_inside(next);
        if current_inside {
            output.push(*current);
        }
        if current_inside != next_inside {
            output.push(intersect(current, next, plane));
        }
    }
}

/// Clip a triangle against all six frustum planes
///
/// Returns the surviving convex polygon: empty when the triangle is
/// entirely outside, up to 9 vertices when several planes cut it. A
/// triangle entirely inside comes back as its own 3 vertices unchanged.
pub fn clip_triangle_to_frustum(triangle: &[Vertex; 3]) -> Vec<Vertex> {
    let mut polygon: Vec<Vertex> = Vec::with_capacity(9);
    let mut scratch: Vec<Vertex> = Vec::with_capacity(9);
    polygon.extend_from_slice(triangle);
    for &plane in FRUSTUM_PLANES.iter() {
        if polygon.is_empty() {
            break;
        }
        clip_polygon(&polygon, plane, &mut scratch);
        std::mem::swap(&mut polygon, &mut scratch);
    }
    polygon
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Vec2, Vec4};

    fn vert(x: f32, y: f32, z: f32, w: f32) -> Vertex {
        Vertex::from_position(Vec4::new(x, y, z, w))
    }

    #[test]
    fn inside_triangle_unchanged() {
        let tri = [
            vert(-0.5, -0.5, 0.5, 1.0),
            vert(0.5, -0.5, 0.5, 1.0),
            vert(0.0, 0.5, 0.5, 1.0),
        ];
        let out = clip_triangle_to_frustum(&tri);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], tri[0]);
        assert_eq!(out[1], tri[1]);
        assert_eq!(out[2], tri[2]);
    }

    #[test]
    fn on_plane_counts_as_visible() {
        let tri = [
            vert(-1.0, -1.0, 0.0, 1.0),
            vert(1.0, -1.0, 0.0, 1.0),
            vert(0.0, 1.0, 0.0, 1.0),
        ];
        assert_eq!(clip_triangle_to_frustum(&tri).len(), 3);
    }

    #[test]
    fn outside_one_plane_is_empty() {
        // everything behind the near plane
        let tri = [
            vert(-0.5, -0.5, -0.5, 1.0),
            vert(0.5, -0.5, -1.0, 1.0),
            vert(0.0, 0.5, -2.0, 1.0),
        ];
        assert!(clip_triangle_to_frustum(&tri).is_empty());
        // everything past the right plane
        let tri = [
            vert(1.5, -0.5, 0.5, 1.0),
            vert(2.5, -0.5, 0.5, 1.0),
            vert(2.0, 0.5, 0.5, 1.0),
        ];
        assert!(clip_triangle_to_frustum(&tri).is_empty());
    }

    #[test]
    fn near_plane_cut_interpolates_attributes() {
        let mut a = vert(0.0, -0.5, -1.0, 1.0);
        a.color = Vec4::new(0.0, 0.0, 0.0, 1.0);
        a.tex_coord = Vec2::new(0.0, 0.0);
        let mut b = vert(0.0, 0.5, 1.0, 1.0);
        b.color = Vec4::new(1.0, 1.0, 1.0, 1.0);
        b.tex_coord = Vec2::new(1.0, 1.0);
        let cut = intersect(&a, &b, ClipPlane::Near);
        assert_eq!(cut.position.z, 0.0);
        assert_eq!(cut.color.x, 0.5);
        assert_eq!(cut.tex_coord.x, 0.5);
    }

    #[test]
    fn one_vertex_behind_near_yields_quad() {
        let tri = [
            vert(0.0, 0.5, 0.5, 1.0),
            vert(-0.5, -0.5, -0.5, 1.0),
            vert(0.5, -0.5, 0.5, 1.0),
        ];
        let out = clip_triangle_to_frustum(&tri);
        assert_eq!(out.len(), 4);
        for v in &out {
            for &plane in FRUSTUM_PLANES.iter() {
                assert!(
                    plane.distance(v) >= -1e-5,
                    "{:?} violates {:?}",
                    v.position,
                    plane
                );
            }
        }
    }

    #[test]
    fn corner_cut_can_grow_the_polygon() {
        // poke one vertex past both the right and top planes
        let tri = [
            vert(0.0, 0.0, 0.5, 1.0),
            vert(2.0, 1.5, 0.5, 1.0),
            vert(-0.5, -0.5, 0.5, 1.0),
        ];
        let out = clip_triangle_to_frustum(&tri);
        assert!(out.len() > 3);
        for v in &out {
            for &plane in FRUSTUM_PLANES.iter() {
                assert!(plane.distance(v) >= -1e-5);
            }
        }
    }
}
