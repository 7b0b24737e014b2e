//! Renderer
//!
//! Owns the render targets and drives the full pipeline for each draw
//! call: vertex program, frustum clipping, perspective divide, viewport
//! transform, fan triangulation, back-face culling and scanline fill.
//! Per-frame transform state (rotation angles and the like) belongs in
//! the caller's programs, captured by value; the renderer itself keeps
//! no frame state beyond its buffers and configuration.

use log::{debug, trace};

use crate::buffer::PixelBuffer;
use crate::clip::clip_triangle_to_frustum;
use crate::color::Pixel;
use crate::depth::DepthBuffer;
use crate::line_interp::LinearInterpolator;
use crate::math::{prestep, Vec2, Vec4};
use crate::raster::{fill_triangle, signed_area, Bounds, FillOptions};
use crate::sampler::Sampler;
use crate::texture::Texture;
use crate::vertex::Vertex;
use crate::{FragmentProgram, PixelData, RenderError, VertexProgram};

/// Viewport rectangle mapping NDC onto window pixels
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
}

fn identity_vertex(v: &Vertex) -> Vertex {
    *v
}

fn color_fragment(f: &Vertex, _: &Sampler) -> Vec4 {
    f.color
}

/// Software rasterization pipeline
///
/// ```
/// use renderlib::{Renderer, Vertex, Pixel};
/// use renderlib::math::Vec4;
///
/// // a full-screen quad: two counter-clockwise triangles
/// let mut ren = Renderer::new(4, 4);
/// ren.set_vertex_buffer(vec![
///     Vertex::from_position(Vec4::new(-1.0, -1.0, 0.5, 1.0)),
///     Vertex::from_position(Vec4::new( 1.0, -1.0, 0.5, 1.0)),
///     Vertex::from_position(Vec4::new(-1.0,  1.0, 0.5, 1.0)),
///     Vertex::from_position(Vec4::new( 1.0,  1.0, 0.5, 1.0)),
/// ]);
/// ren.set_index_buffer(vec![0, 2, 1, 1, 2, 3]);
/// ren.render(|r| r.draw_triangles(0, 2)).unwrap();
/// assert_eq!(ren.frame_buffer().get(0, 0), Some(Pixel::white()));
/// assert_eq!(ren.frame_buffer().get(3, 3), Some(Pixel::white()));
/// ```
pub struct Renderer {
    buffer: PixelBuffer,
    depth: DepthBuffer,
    clear_color: Pixel,
    viewport: Viewport,
    depth_range: (f32, f32),
    vertex_buffer: Vec<Vertex>,
    index_buffer: Vec<u32>,
    texture: Texture,
    vertex_program: Box<dyn VertexProgram>,
    fragment_program: Box<dyn FragmentProgram>,
    perspective_correction: bool,
    depth_test: bool,
    backface_culling: bool,
    /// Vertex program results cached per vertex index, one draw call at a time
    transformed: Vec<Option<Vertex>>,
}

impl Renderer {
    /// Create a renderer with its targets sized `width` x `height`
    ///
    /// The viewport covers the whole surface; the default programs pass
    /// positions through untouched and shade with the vertex color.
    pub fn new(width: usize, height: usize) -> Self {
        Renderer {
            buffer: PixelBuffer::new(width, height),
            depth: DepthBuffer::new(width, height, 1.0),
            clear_color: Pixel::black(),
            viewport: Viewport { x: 0, y: 0, width, height },
            depth_range: (0.0, 1.0),
            vertex_buffer: vec![],
            index_buffer: vec![],
            texture: Texture::new(0, 0),
            vertex_program: Box::new(identity_vertex),
            fragment_program: Box::new(color_fragment),
            perspective_correction: true,
            depth_test: true,
            backface_culling: true,
            transformed: vec![],
        }
    }
    /// Resize both render targets and reset the viewport to cover them
    pub fn resize(&mut self, width: usize, height: usize) {
        debug!("resize render targets to {}x{}", width, height);
        self.buffer.resize(width, height);
        self.depth.resize(width, height);
        self.viewport = Viewport { x: 0, y: 0, width, height };
    }
    pub fn frame_buffer(&self) -> &PixelBuffer {
        &self.buffer
    }
    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.depth
    }
    pub fn texture(&self) -> &Texture {
        &self.texture
    }
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_clear_color(&mut self, color: Pixel) {
        self.clear_color = color;
    }
    /// Window region the NDC cube maps onto; fragments never land outside
    /// its intersection with the pixel buffer
    pub fn set_viewport(&mut self, x: i32, y: i32, width: usize, height: usize) {
        self.viewport = Viewport { x, y, width, height };
    }
    /// Window-space depth range; (0, 1) unless told otherwise
    pub fn set_depth_range(&mut self, near: f32, far: f32) {
        self.depth_range = (near, far);
    }
    pub fn set_vertex_program<P: VertexProgram + 'static>(&mut self, program: P) {
        self.vertex_program = Box::new(program);
    }
    pub fn set_fragment_program<P: FragmentProgram + 'static>(&mut self, program: P) {
        self.fragment_program = Box::new(program);
    }
    pub fn set_perspective_correction(&mut self, enabled: bool) {
        self.perspective_correction = enabled;
    }
    pub fn set_depth_test(&mut self, enabled: bool) {
        self.depth_test = enabled;
    }
    pub fn set_backface_culling(&mut self, enabled: bool) {
        self.backface_culling = enabled;
    }
    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = texture;
    }
    /// Upload vertices; the transform cache resizes alongside
    pub fn set_vertex_buffer(&mut self, vertices: Vec<Vertex>) {
        debug!("vertex buffer upload: {} vertices", vertices.len());
        self.transformed.clear();
        self.transformed.resize(vertices.len(), None);
        self.vertex_buffer = vertices;
    }
    pub fn set_index_buffer(&mut self, indices: Vec<u32>) {
        debug!("index buffer upload: {} indices", indices.len());
        self.index_buffer = indices;
    }

    /// Render one frame
    ///
    /// Clears the pixel buffer to the clear color and the depth buffer to
    /// the far depth, then hands `&mut self` to the frame callback to
    /// issue draw calls.
    pub fn render<F>(&mut self, frame: F) -> Result<(), RenderError>
    where
        F: FnOnce(&mut Renderer) -> Result<(), RenderError>,
    {
        self.buffer.fill(self.clear_color);
        self.depth.clear(self.depth_range.1);
        frame(self)
    }

    /// Draw `triangle_count` triangles, three indices each, starting at
    /// `first_index` in the index buffer
    ///
    /// Both the index range and every referenced vertex index are
    /// validated up front by position; a violation reports a structured
    /// error and draws nothing further.
    pub fn draw_triangles(&mut self, first_index: u32, triangle_count: u32) -> Result<(), RenderError> {
        let first = first_index as usize;
        let count = triangle_count as usize;
        if first + count * 3 > self.index_buffer.len() {
            return Err(RenderError::IndexOutOfRange {
                first: first_index,
                count: triangle_count,
                len: self.index_buffer.len(),
            });
        }
        // the transform cache lives for exactly one draw call
        for slot in self.transformed.iter_mut() {
            *slot = None;
        }
        let bounds = self.visible_bounds();
        let mut culled = 0u32;
        let mut clipped_out = 0u32;
        for t in 0..count {
            let mut clip_tri = [Vertex::default(); 3];
            for (k, slot) in clip_tri.iter_mut().enumerate() {
                let index = self.index_buffer[first + t * 3 + k];
                *slot = self.transform_vertex(index)?;
            }
            let polygon = clip_triangle_to_frustum(&clip_tri);
            if polygon.len() < 3 {
                clipped_out += 1;
                continue;
            }
            let mut window = Vec::with_capacity(polygon.len());
            for v in &polygon {
                match self.to_window(v) {
                    Some(w) => window.push(w),
                    None => break,
                }
            }
            if window.len() < polygon.len() {
                clipped_out += 1;
                continue;
            }
            let options = FillOptions {
                perspective_correct: self.perspective_correction,
                depth_test: self.depth_test,
            };
            let sampler = Sampler::new(&self.texture);
            for i in 1..window.len() - 1 {
                let tri = [window[0], window[i], window[i + 1]];
                if self.backface_culling && signed_area(&tri[0], &tri[1], &tri[2]) <= 0.0 {
                    culled += 1;
                    continue;
                }
                fill_triangle(
                    &mut self.buffer,
                    &mut self.depth,
                    bounds,
                    &tri,
                    options,
                    self.fragment_program.as_ref(),
                    &sampler,
                );
            }
        }
        trace!(
            "draw_triangles: {} submitted, {} clipped away, {} culled",
            triangle_count, clipped_out, culled
        );
        Ok(())
    }

    /// Draw a line in window coordinates
    ///
    /// The segment is walked along its major axis one pixel center at a
    /// time, drawing before checking the remaining budget, so a
    /// zero-length segment plots exactly one pixel. Off-screen portions
    /// clip silently at the pixel buffer.
    pub fn rasterize_line(&mut self, start: Vec2, end: Vec2, pixel: Pixel) {
        let delta = end - start;
        if delta.x.abs() >= delta.y.abs() {
            let (a, b) = if start.x <= end.x { (start, end) } else { (end, start) };
            let delta = b - a;
            let mut x = a.x.ceil() as i32;
            let mut lerp = LinearInterpolator::new(delta.x, delta.y, a.y, prestep(a.x));
            loop {
                self.buffer.set(x, lerp.value().round() as i32, pixel);
                x += 1;
                if lerp.interpolate() == 0 {
                    break;
                }
            }
        } else {
            let (a, b) = if start.y <= end.y { (start, end) } else { (end, start) };
            let delta = b - a;
            let mut y = a.y.ceil() as i32;
            let mut lerp = LinearInterpolator::new(delta.y, delta.x, a.x, prestep(a.y));
            loop {
                self.buffer.set(lerp.value().round() as i32, y, pixel);
                y += 1;
                if lerp.interpolate() == 0 {
                    break;
                }
            }
        }
    }

    /// Run the vertex program for an index, at most once per draw call
    fn transform_vertex(&mut self, index: u32) -> Result<Vertex, RenderError> {
        let i = index as usize;
        if i >= self.vertex_buffer.len() {
            return Err(RenderError::VertexOutOfRange {
                index,
                len: self.vertex_buffer.len(),
            });
        }
        if let Some(v) = self.transformed[i] {
            return Ok(v);
        }
        let v = self.vertex_program.transform(&self.vertex_buffer[i]);
        self.transformed[i] = Some(v);
        Ok(v)
    }

    /// Perspective divide and viewport transform for one clipped vertex
    ///
    /// When perspective correction is on, color and texture coordinates
    /// come out divided by w with 1/w stored in the position's w slot;
    /// the span fill undoes that per fragment. Otherwise attributes pass
    /// through for plain affine interpolation.
    fn to_window(&self, v: &Vertex) -> Option<Vertex> {
        let w = v.position.w;
        // w = 0 survives clipping only as the degenerate origin
        if w <= 0.0 {
            return None;
        }
        let inv_w = 1.0 / w;
        let ndc = v.position * inv_w;
        let (vw, vh) = (self.viewport.width as f32, self.viewport.height as f32);
        let x = ndc.x * (vw - 1.0) / 2.0 + self.viewport.x as f32 + (vw - 1.0) / 2.0;
        let y = ndc.y * (vh - 1.0) / 2.0 + self.viewport.y as f32 + (vh - 1.0) / 2.0;
        let (near, far) = self.depth_range;
        let z = (far - near) / 2.0 * ndc.z + (far + near) / 2.0;
        let (color, tex_coord) = if self.perspective_correction {
            (v.color * inv_w, v.tex_coord * inv_w)
        } else {
            (v.color, v.tex_coord)
        };
        Some(Vertex {
            position: Vec4::new(x, y, z, inv_w),
            color,
            tex_coord,
        })
    }

    fn visible_bounds(&self) -> Bounds {
        let vp = Bounds::new(
            self.viewport.x,
            self.viewport.y,
            self.viewport.x + self.viewport.width as i32 - 1,
            self.viewport.y + self.viewport.height as i32 - 1,
        );
        vp.intersect(Bounds::of_buffer(&self.buffer))
    }
}

impl PixelData for Renderer {
    fn pixel_data(&self) -> &[u8] {
        &self.buffer.data
    }
}
