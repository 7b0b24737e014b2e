use renderlib::{Pixel, Renderer, Sampler, Vertex};
use renderlib::math::{Vec2, Vec4};

/// Full-screen quad with one color on all four corners, at clip depth `z`
fn tinted_quad(z: f32, color: Vec4) -> (Vec<Vertex>, Vec<u32>) {
    let positions = [
        Vec4::new(-1.0, -1.0, z, 1.0),
        Vec4::new( 1.0, -1.0, z, 1.0),
        Vec4::new(-1.0,  1.0, z, 1.0),
        Vec4::new( 1.0,  1.0, z, 1.0),
    ];
    let vb = positions
        .iter()
        .map(|&p| Vertex::new(p, color, Vec2::default()))
        .collect();
    (vb, vec![0, 2, 1, 1, 2, 3])
}

/// Draw two full-screen quads in one frame and report the resulting color
fn overdraw(first: (f32, Vec4), second: (f32, Vec4), depth_test: bool) -> Pixel {
    let mut ren = Renderer::new(4, 4);
    ren.set_depth_test(depth_test);
    ren.render(|r| {
        for &(z, color) in [first, second].iter() {
            let (vb, ib) = tinted_quad(z, color);
            r.set_vertex_buffer(vb);
            r.set_index_buffer(ib);
            r.draw_triangles(0, 2)?;
        }
        Ok(())
    })
    .unwrap();
    ren.frame_buffer().get(2, 2).unwrap()
}

#[test]
fn depth_test_keeps_the_nearer_surface() {
    let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
    let green = Vec4::new(0.0, 1.0, 0.0, 1.0);
    // red in front, whichever order it is drawn in
    assert_eq!(overdraw((0.2, red), (0.8, green), true), Pixel::red());
    assert_eq!(overdraw((0.8, green), (0.2, red), true), Pixel::red());
}

#[test]
fn equal_depth_favors_the_latest_draw() {
    let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
    let blue = Vec4::new(0.0, 0.0, 1.0, 1.0);
    assert_eq!(overdraw((0.5, red), (0.5, blue), true), Pixel::blue());
}

#[test]
fn disabling_the_depth_test_paints_in_draw_order() {
    let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
    let green = Vec4::new(0.0, 1.0, 0.0, 1.0);
    assert_eq!(overdraw((0.2, red), (0.8, green), false), Pixel::green());
}

#[test]
fn perspective_divides_attributes_hyperbolically() {
    // bottom edge runs from w = 1 (red) to w = 2 (green); in window
    // space both ends sit on row 0 at x = 0 and x = 7
    let mut ren = Renderer::new(8, 8);
    let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
    let green = Vec4::new(0.0, 1.0, 0.0, 1.0);
    ren.set_vertex_buffer(vec![
        Vertex::new(Vec4::new(-1.0, -1.0, 0.5, 1.0), red, Vec2::default()),
        Vertex::new(Vec4::new( 2.0, -2.0, 1.0, 2.0), green, Vec2::default()),
        Vertex::new(Vec4::new(-1.0,  1.0, 0.5, 1.0), red, Vec2::default()),
    ]);
    ren.set_index_buffer(vec![0, 2, 1]);

    // at x = 4, t = 4/7: corrected green is t / (2 - t) = 0.4
    ren.render(|r| r.draw_triangles(0, 1)).unwrap();
    let g = ren.frame_buffer().get(4, 0).unwrap().g;
    assert!((g as i32 - 102).abs() <= 1, "corrected green = {}", g);

    // affine interpolation gives t = 4/7 instead
    ren.set_perspective_correction(false);
    ren.render(|r| r.draw_triangles(0, 1)).unwrap();
    let g = ren.frame_buffer().get(4, 0).unwrap().g;
    assert!((g as i32 - 146).abs() <= 1, "affine green = {}", g);
}

/// Render a tilted 3D-planar quad with the given triangulation
fn tilted_quad(indices: Vec<u32>) -> Renderer {
    // eye-space plane z = -2 - x projected with fovy 90, near 1, far 10;
    // the right edge sits at w = 3, the left at w = 1
    let corner = |x: f32, y: f32| {
        let z = -2.0 - x;
        let clip = Vec4::new(x, y, -10.0 / 9.0 * (z + 1.0), -z);
        let color = Vec4::new((x + 1.0) / 2.0, (y + 1.0) / 2.0, 1.0, 1.0);
        Vertex::new(clip, color, Vec2::default())
    };
    let mut ren = Renderer::new(8, 8);
    ren.set_vertex_buffer(vec![
        corner(-1.0, -1.0),
        corner( 1.0, -1.0),
        corner(-1.0,  1.0),
        corner( 1.0,  1.0),
    ]);
    ren.set_index_buffer(indices);
    ren.render(|r| r.draw_triangles(0, 2)).unwrap();
    ren
}

#[test]
fn planar_quad_renders_the_same_for_either_split() {
    // perspective-correct interpolation makes the diagonal choice
    // invisible: attributes linear on the 3D plane resolve to the same
    // screen values no matter how the quad is triangulated
    let a = tilted_quad(vec![0, 2, 1, 1, 2, 3]);
    let b = tilted_quad(vec![0, 2, 3, 0, 3, 1]);
    let (buf_a, buf_b) = (a.frame_buffer(), b.frame_buffer());
    for (i, (pa, pb)) in buf_a.data.iter().zip(buf_b.data.iter()).enumerate() {
        let delta = (*pa as i32 - *pb as i32).abs();
        assert!(delta <= 2, "byte {} differs: {} vs {}", i, pa, pb);
    }
}

#[test]
fn fragment_program_sees_window_position() {
    let mut ren = Renderer::new(8, 8);
    let (vb, ib) = tinted_quad(0.5, Vec4::new(1.0, 1.0, 1.0, 1.0));
    ren.set_vertex_buffer(vb);
    ren.set_index_buffer(ib);
    ren.set_fragment_program(|f: &Vertex, _: &Sampler| {
        Vec4::new(f.position.x / 7.0, f.position.y / 7.0, 0.0, 1.0)
    });
    ren.render(|r| r.draw_triangles(0, 2)).unwrap();
    assert_eq!(ren.frame_buffer().get(0, 0), Some(Pixel::new(0, 0, 0, 255)));
    assert_eq!(ren.frame_buffer().get(7, 0), Some(Pixel::new(255, 0, 0, 255)));
    assert_eq!(ren.frame_buffer().get(7, 7), Some(Pixel::new(255, 255, 0, 255)));
}

#[test]
fn vertex_program_rescales_the_scene() {
    // shrink the full-screen quad into the upper-right quadrant
    let mut ren = Renderer::new(8, 8);
    let (vb, ib) = tinted_quad(0.5, Vec4::new(1.0, 1.0, 1.0, 1.0));
    ren.set_vertex_buffer(vb);
    ren.set_index_buffer(ib);
    ren.set_vertex_program(|v: &Vertex| Vertex {
        position: Vec4::new(
            v.position.x * 0.5 + 0.5,
            v.position.y * 0.5 + 0.5,
            v.position.z,
            v.position.w,
        ),
        ..*v
    });
    ren.render(|r| r.draw_triangles(0, 2)).unwrap();
    let buf = ren.frame_buffer();
    let mut n = 0;
    for y in 0..8 {
        for x in 0..8 {
            if buf.get(x, y) == Some(Pixel::white()) {
                assert!(x >= 4 && y >= 4, "stray fragment at ({}, {})", x, y);
                n += 1;
            }
        }
    }
    assert_eq!(n, 16);
}
