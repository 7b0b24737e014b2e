//! Software 3D rasterization pipeline
//!
//! How a frame is produced
//!   ren = Renderer::new(width, height)
//!   ren.set_vertex_buffer(..) / ren.set_index_buffer(..)
//!   ren.render(|r| r.draw_triangles(first, count))
//!     clear color + depth targets
//!     draw_triangles
//!       vertex program            -- model space to clip space
//!       clip_triangle_to_frustum  -- 6 homogeneous planes
//!       perspective divide        -- NDC; attributes over w, 1/w kept
//!       viewport transform        -- window coordinates
//!       fan triangulation + back-face cull
//!       fill_triangle             -- scanline edge walk
//!         fill_span               -- interpolation across the row
//!           depth test, fragment program, PixelBuffer::set
//!
//! Everything happens on the CPU into owned buffers; displaying a frame
//! is the caller's business, via [`PixelData`] and the [`PixelBuffer`]
//! row metadata, or [`ppm`] for file output.

pub mod math;
pub mod color;
pub mod buffer;
pub mod depth;
pub mod vertex;
pub mod line_interp;
pub mod clip;
pub mod texture;
pub mod sampler;
pub mod raster;
pub mod render;
pub mod ppm;

pub use crate::color::*;
pub use crate::buffer::*;
pub use crate::depth::*;
pub use crate::vertex::*;
pub use crate::line_interp::*;
pub use crate::clip::*;
pub use crate::texture::*;
pub use crate::sampler::*;
pub use crate::raster::*;
pub use crate::render::*;

use crate::math::Vec4;
use thiserror::Error;

/// Draw call validation failures
///
/// Buffer coordinates clip silently; *indices* do not. A draw call that
/// walks off either buffer reports where instead of touching memory.
#[derive(Debug,Clone,PartialEq,Eq,Error)]
pub enum RenderError {
    /// The requested triangle range runs past the end of the index buffer
    #[error("draw of {count} triangles from index {first} overruns index buffer of length {len}")]
    IndexOutOfRange { first: u32, count: u32, len: usize },
    /// An index buffer entry points past the end of the vertex buffer
    #[error("vertex index {index} outside vertex buffer of length {len}")]
    VertexOutOfRange { index: u32, len: usize },
}

/// Access to raw RGBA bytes for display collaborators
pub trait PixelData {
    fn pixel_data(&self) -> &[u8];
}

/// Vertex stage of the pipeline: model space in, clip space out
///
/// Implemented for any `Fn(&Vertex) -> Vertex`, so per-frame transform
/// state is whatever the closure captures:
///
/// ```
/// use renderlib::{Renderer, Vertex};
/// use renderlib::math::{Mat4, Vec3};
///
/// let mut ren = Renderer::new(64, 64);
/// let mvp = Mat4::perspective(1.0, 1.0, 0.1, 100.0)
///     * Mat4::translate(Vec3::new(0.0, 0.0, -3.0));
/// ren.set_vertex_program(move |v: &Vertex| Vertex {
///     position: mvp * v.position,
///     ..*v
/// });
/// ```
pub trait VertexProgram {
    fn transform(&self, vertex: &Vertex) -> Vertex;
}

impl<F> VertexProgram for F
where
    F: Fn(&Vertex) -> Vertex,
{
    fn transform(&self, vertex: &Vertex) -> Vertex {
        self(vertex)
    }
}

/// Fragment stage of the pipeline: resolved fragment in, color out
///
/// The fragment arrives with window position (and 1/w in `position.w`),
/// perspective-corrected color and texture coordinates; the sampler is
/// bound to the renderer's current texture. The returned color is
/// normalized RGBA, clamped on conversion to [`Pixel`].
pub trait FragmentProgram {
    fn shade(&self, fragment: &Vertex, sampler: &Sampler) -> Vec4;
}

impl<F> FragmentProgram for F
where
    F: Fn(&Vertex, &Sampler) -> Vec4,
{
    fn shade(&self, fragment: &Vertex, sampler: &Sampler) -> Vec4 {
        self(fragment, sampler)
    }
}
