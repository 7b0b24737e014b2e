//! Scanline triangle rasterization
//!
//! Window-space triangles are filled by edge walking: the triangle is
//! classified once into a flat-top/flat-bottom decomposition around its
//! middle vertex, then up to two loops step the bounding edges one
//! scanline at a time while a span fill interpolates attributes across
//! each row. No barycentric evaluation anywhere.
//!
//! Fill convention: pixel centers sit at integer coordinates and both
//! span ends are center-sampled inclusively, rows `ceil(topY)` through
//! `floor(bottomY)` and columns `ceil(leftX)` through `floor(rightX)`.
//! Interpolants are prestepped by the distance from the true edge start
//! to the first covered center, so clamping to the visible bounds costs
//! nothing extra. Two triangles sharing an edge produce identical
//! interpolated values on any center that edge crosses, which is what
//! keeps shared edges seam-free.

use crate::buffer::PixelBuffer;
use crate::color::Pixel;
use crate::depth::DepthBuffer;
use crate::math::Vec4;
use crate::sampler::Sampler;
use crate::vertex::Vertex;
use crate::FragmentProgram;

/// Inclusive pixel bounds of the fillable region
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Bounds {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Bounds {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Bounds { x0, y0, x1, y1 }
    }
    /// Bounds covering an entire pixel buffer
    pub fn of_buffer(buffer: &PixelBuffer) -> Self {
        Bounds::new(0, 0, buffer.width() as i32 - 1, buffer.height() as i32 - 1)
    }
    /// Intersection; may come back empty
    pub fn intersect(self, other: Bounds) -> Bounds {
        Bounds {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.x0 > self.x1 || self.y0 > self.y1
    }
}

/// Per-fragment behavior of the span fill
#[derive(Debug,Copy,Clone)]
pub struct FillOptions {
    /// Undo the upstream divide of attributes by w using interpolated 1/w
    pub perspective_correct: bool,
    /// Test-and-set against the depth buffer before shading
    pub depth_test: bool,
}

impl Default for FillOptions {
    fn default() -> FillOptions {
        FillOptions {
            perspective_correct: true,
            depth_test: true,
        }
    }
}

/// Twice the signed area of a window-space triangle
///
/// Positive for counter-clockwise winding as seen on screen (y down);
/// zero for degenerate triangles.
pub fn signed_area(a: &Vertex, b: &Vertex, c: &Vertex) -> f32 {
    let (ax, ay) = (a.position.x, a.position.y);
    let (bx, by) = (b.position.x, b.position.y);
    let (cx, cy) = (c.position.x, c.position.y);
    (bx - ax) * (ay - cy) - (ax - cx) * (by - ay)
}

/// Scan plan for one triangle
///
/// Vertices sorted into scanline order with the left/right boundary
/// decided once up front, not per scanline.
#[derive(Debug)]
struct Classified {
    /// Sorted by (y, then x): top, middle, bottom
    v: [Vertex; 3],
    /// Top edge is horizontal; only the mid-to-bottom loop runs
    flat_top: bool,
    /// Bottom edge is horizontal; only the top-to-mid loop runs
    flat_bottom: bool,
    /// The long (top-to-bottom) edge is the left boundary
    long_on_left: bool,
}

/// `a` strictly before `b` in scanline order
fn scan_before(a: &Vertex, b: &Vertex) -> bool {
    let (pa, pb) = (a.position, b.position);
    pa.y < pb.y || (pa.y == pb.y && pa.x < pb.x)
}

fn classify(triangle: &[Vertex; 3]) -> Option<Classified> {
    if signed_area(&triangle[0], &triangle[1], &triangle[2]) == 0.0 {
        return None;
    }
    let mut v = *triangle;
    if scan_before(&v[1], &v[0]) {
        v.swap(0, 1);
    }
    if scan_before(&v[2], &v[1]) {
        v.swap(1, 2);
    }
    if scan_before(&v[1], &v[0]) {
        v.swap(0, 1);
    }
    let flat_top = v[0].position.y == v[1].position.y;
    let flat_bottom = v[1].position.y == v[2].position.y;
    let long_on_left = if flat_top {
        // boundaries v0->v2 and v1->v2 with v0 left of v1 after the sort
        true
    } else if flat_bottom {
        // boundaries v0->v1 and v0->v2 with v1 left of v2 after the sort
        false
    } else {
        // compare the long edge's x against the middle vertex at its row
        let step = (v[2].position.x - v[0].position.x) / (v[2].position.y - v[0].position.y);
        let long_x = v[0].position.x + (v[1].position.y - v[0].position.y) * step;
        long_x < v[1].position.x
    };
    Some(Classified { v, flat_top, flat_bottom, long_on_left })
}

/// One boundary edge stepped a scanline at a time
///
/// The whole vertex is the interpolant; position, color and texture
/// coordinates all advance together.
#[derive(Debug)]
struct Edge {
    current: Vertex,
    step: Vertex,
}

impl Edge {
    /// Edge from `start` down to `end`, prestepped to `first_row`
    ///
    /// Callers guarantee the edge is not horizontal. The prestep covers
    /// both the ceil snap and any clamping of the first row in one move.
    fn new(start: &Vertex, end: &Vertex, first_row: i32) -> Edge {
        let dy = end.position.y - start.position.y;
        let step = (*end - *start) * (1.0 / dy);
        let current = *start + step * (first_row as f32 - start.position.y);
        Edge { current, step }
    }
    fn advance(&mut self) {
        self.current = self.current + self.step;
    }
}

/// Fill one window-space triangle
///
/// `bounds` is the visible region (viewport intersected with the buffer);
/// spans and rows are clamped to it. Degenerate triangles draw nothing.
/// The caller has already done culling, so winding no longer matters here.
pub fn fill_triangle(
    buffer: &mut PixelBuffer,
    depth: &mut DepthBuffer,
    bounds: Bounds,
    triangle: &[Vertex; 3],
    options: FillOptions,
    fragment: &dyn FragmentProgram,
    sampler: &Sampler,
) {
    if bounds.is_empty() {
        return;
    }
    let tri = match classify(triangle) {
        Some(tri) => tri,
        None => return,
    };
    let (top, mid, bot) = (&tri.v[0], &tri.v[1], &tri.v[2]);
    let y_start = (top.position.y.ceil() as i32).max(bounds.y0);
    let y_end = (bot.position.y.floor() as i32).min(bounds.y1);
    if y_start > y_end {
        return;
    }

    if tri.flat_top {
        let mut left = Edge::new(top, bot, y_start);
        let mut right = Edge::new(mid, bot, y_start);
        for y in y_start..=y_end {
            fill_span(buffer, depth, bounds, y, &left.current, &right.current,
                      options, fragment, sampler);
            left.advance();
            right.advance();
        }
        return;
    }
    if tri.flat_bottom {
        let mut left = Edge::new(top, mid, y_start);
        let mut right = Edge::new(top, bot, y_start);
        for y in y_start..=y_end {
            fill_span(buffer, depth, bounds, y, &left.current, &right.current,
                      options, fragment, sampler);
            left.advance();
            right.advance();
        }
        return;
    }

    // general case: the long edge runs the full height while the short
    // side switches from A (top-to-mid) to B (mid-to-bottom) at the
    // middle vertex's first scanline
    let row_mid = mid.position.y.ceil() as i32;
    let mut long = Edge::new(top, bot, y_start);
    let break_row = row_mid.max(y_start).min(y_end + 1);
    if y_start < break_row {
        let mut short = Edge::new(top, mid, y_start);
        for y in y_start..break_row {
            span_for_sides(buffer, depth, bounds, y, &long, &short,
                           tri.long_on_left, options, fragment, sampler);
            long.advance();
            short.advance();
        }
    }
    if break_row <= y_end {
        let mut short = Edge::new(mid, bot, break_row);
        for y in break_row..=y_end {
            span_for_sides(buffer, depth, bounds, y, &long, &short,
                           tri.long_on_left, options, fragment, sampler);
            long.advance();
            short.advance();
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn span_for_sides(
    buffer: &mut PixelBuffer,
    depth: &mut DepthBuffer,
    bounds: Bounds,
    y: i32,
    long: &Edge,
    short: &Edge,
    long_on_left: bool,
    options: FillOptions,
    fragment: &dyn FragmentProgram,
    sampler: &Sampler,
) {
    let (left, right) = if long_on_left {
        (&long.current, &short.current)
    } else {
        (&short.current, &long.current)
    };
    fill_span(buffer, depth, bounds, y, left, right, options, fragment, sampler);
}

/// Fill one span between the left and right boundary interpolants
#[allow(clippy::too_many_arguments)]
fn fill_span(
    buffer: &mut PixelBuffer,
    depth: &mut DepthBuffer,
    bounds: Bounds,
    y: i32,
    left: &Vertex,
    right: &Vertex,
    options: FillOptions,
    fragment: &dyn FragmentProgram,
    sampler: &Sampler,
) {
    let lx = left.position.x;
    let rx = right.position.x;
    let x_start = (lx.ceil() as i32).max(bounds.x0);
    let x_end = (rx.floor() as i32).min(bounds.x1);
    // an inverted span covers no center; float noise on slivers lands here
    if x_start > x_end {
        return;
    }
    let width = rx - lx;
    let step = if width > 0.0 {
        (*right - *left) * (1.0 / width)
    } else {
        Vertex::default()
    };
    let mut interp = *left + step * (x_start as f32 - lx);
    for x in x_start..=x_end {
        shade_fragment(buffer, depth, x, y, &interp, options, fragment, sampler);
        interp = interp + step;
    }
}

fn shade_fragment(
    buffer: &mut PixelBuffer,
    depth: &mut DepthBuffer,
    x: i32,
    y: i32,
    interp: &Vertex,
    options: FillOptions,
    fragment: &dyn FragmentProgram,
    sampler: &Sampler,
) {
    let z = interp.position.z;
    if options.depth_test && !depth.test_and_set(x, y, z) {
        return;
    }
    let resolved = if options.perspective_correct {
        // attributes arrive divided by w and 1/w rides in position.w;
        // dividing by the interpolated 1/w recovers the true values
        let inv_w = interp.position.w;
        Vertex {
            position: Vec4::new(x as f32, y as f32, z, inv_w),
            color: interp.color * (1.0 / inv_w),
            tex_coord: interp.tex_coord * (1.0 / inv_w),
        }
    } else {
        Vertex {
            position: Vec4::new(x as f32, y as f32, z, interp.position.w),
            color: interp.color,
            tex_coord: interp.tex_coord,
        }
    };
    let color = fragment.shade(&resolved, sampler);
    buffer.set(x, y, Pixel::from_unit(color));
}
