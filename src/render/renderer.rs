use log::trace;

use super::pipeline::{illuminate, should_cull};
use super::triangle::{sort_by_depth, Triangle};
use super::{RenderContext, RenderMode};
use crate::color::Color;
use crate::display::{ColorBuffer, GRID_SPACING_PX};
use crate::math3d::{Vec3, Vec4};
use crate::matrix::Mat4;
use crate::mesh::Mesh;
use crate::raster::{self, Surface};
use crate::texture::Texture;

/// Per-frame pipeline counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Faces in the mesh
    pub faces: usize,
    /// Faces dropped by back-face culling
    pub culled: usize,
    /// Faces with a vertex index outside the mesh
    pub rejected: usize,
    /// Triangles handed to the rasterizer
    pub emitted: usize,
}

/// Transforms a mesh into screen-space triangles and paints them
pub struct Renderer {
    width: u32,
    height: u32,
    projection: Mat4,
    triangles: Vec<Triangle>,
}

impl Renderer {
    /// Perspective renderer for a `width x height` viewport.
    /// `fov` is the vertical field of view in radians.
    pub fn new(width: u32, height: u32, fov: f32, znear: f32, zfar: f32) -> Self {
        let aspect = height as f32 / width.max(1) as f32;
        Self::with_projection(width, height, Mat4::perspective(fov, aspect, znear, zfar))
    }

    pub fn with_projection(width: u32, height: u32, projection: Mat4) -> Self {
        Self {
            width,
            height,
            projection,
            triangles: Vec::new(),
        }
    }

    #[inline]
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// This frame's triangles, nearest first
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Project a world-space point to screen x/y, keeping NDC z and depth in w
    pub fn to_screen(&self, v: Vec3) -> Vec4 {
        let p = self.projection.project(v);
        let half_w = self.width as f32 / 2.0;
        let half_h = self.height as f32 / 2.0;
        Vec4::new(p.x * half_w + half_w, p.y * half_h + half_h, p.z, p.w)
    }

    /// Rebuild the triangle list from the mesh's current placement
    pub fn update(&mut self, mesh: &Mesh, ctx: &RenderContext) -> FrameStats {
        // Previous frame's triangles must not survive; capacity does
        self.triangles.clear();

        let world = mesh.world_matrix();
        let mut stats = FrameStats {
            faces: mesh.faces.len(),
            ..FrameStats::default()
        };

        for face_ref in mesh.face_refs() {
            let Some(model) = face_ref.vertices() else {
                stats.rejected += 1;
                continue;
            };
            let vertices = model.map(|v| world.transform_point(v));

            if ctx.culling && should_cull(&vertices, ctx.camera_position) {
                stats.culled += 1;
                continue;
            }

            let face = face_ref.face();
            let color = if ctx.lighting {
                illuminate(&vertices, &ctx.light, face.color)
            } else {
                face.color
            };

            self.triangles.push(Triangle {
                points: vertices.map(|v| self.to_screen(v)),
                uvs: face.uvs,
                color,
                border: ctx.wire_color,
                avg_depth: (vertices[0].z + vertices[1].z + vertices[2].z) / 3.0,
            });
        }

        sort_by_depth(&mut self.triangles);
        stats.emitted = self.triangles.len();

        trace!(
            "frame: {} faces, {} culled, {} rejected, {} emitted",
            stats.faces,
            stats.culled,
            stats.rejected,
            stats.emitted
        );
        stats
    }

    /// Paint the current triangles farthest first
    pub fn render<S: Surface>(&self, surface: &mut S, ctx: &RenderContext, texture: Option<&Texture>) {
        for triangle in self.triangles.iter().rev() {
            render_triangle(surface, triangle, ctx.mode, texture, ctx.vertex_color);
        }
    }

    /// Clear, optional grid, then the triangles
    pub fn draw_frame(&self, buffer: &mut ColorBuffer, ctx: &RenderContext, texture: Option<&Texture>) {
        buffer.clear(ctx.background);
        if ctx.grid {
            buffer.draw_grid(GRID_SPACING_PX, Color::GRID);
        }
        self.render(buffer, ctx, texture);
    }
}

/// Rasterize one triangle in the given mode.
///
/// Textured modes fall back to a solid fill when there is no texture.
pub fn render_triangle<S: Surface>(
    surface: &mut S,
    triangle: &Triangle,
    mode: RenderMode,
    texture: Option<&Texture>,
    vertex_color: Color,
) {
    let screen = triangle.screen_points();

    match (mode.draws_texture(), texture) {
        (true, Some(texture)) => {
            raster::texture_triangle(surface, triangle.points, triangle.uvs, texture)
        },
        (true, None) => raster::fill_triangle(surface, screen, triangle.color),
        (false, _) if mode.draws_fill() => raster::fill_triangle(surface, screen, triangle.color),
        (false, _) => {},
    }

    if mode.draws_wireframe() {
        raster::draw_triangle(surface, screen, triangle.border_color());
    }
    if mode.draws_vertices() {
        for point in screen {
            raster::draw_vertex(surface, point, vertex_color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Face, Tex2};
    use crate::render::Light;
    use std::f32::consts::FRAC_PI_2;

    fn unlit() -> RenderContext {
        RenderContext {
            mode: RenderMode::Filled,
            lighting: false,
            ..RenderContext::default()
        }
    }

    fn cube_at(x: f32, y: f32, z: f32) -> Mesh {
        let mut cube = Mesh::cube();
        cube.translation = Vec3::new(x, y, z);
        cube
    }

    fn renderer() -> Renderer {
        Renderer::new(320, 240, FRAC_PI_2, 0.1, 100.0)
    }

    fn colors(renderer: &Renderer) -> Vec<u32> {
        let mut colors: Vec<u32> = renderer.triangles().iter().map(|t| t.color.0).collect();
        colors.sort_unstable();
        colors
    }

    #[test]
    fn test_cube_on_axis_shows_front_only() {
        let mut r = renderer();
        let stats = r.update(&cube_at(0.0, 0.0, 5.0), &unlit());
        assert_eq!(
            stats,
            FrameStats {
                faces: 12,
                culled: 10,
                rejected: 0,
                emitted: 2,
            }
        );
        assert_eq!(colors(&r), vec![Color::RED.0; 2]);
    }

    #[test]
    fn test_cube_off_axis_shows_three_sides() {
        let mut r = renderer();
        let stats = r.update(&cube_at(3.0, 3.0, 5.0), &unlit());
        assert_eq!(stats.culled, 6);
        assert_eq!(stats.emitted, 6);

        let mut expected = vec![
            Color::RED.0,
            Color::RED.0,
            Color::YELLOW.0,
            Color::YELLOW.0,
            Color::CYAN.0,
            Color::CYAN.0,
        ];
        expected.sort_unstable();
        assert_eq!(colors(&r), expected);
    }

    #[test]
    fn test_culling_off_keeps_every_face() {
        let mut r = renderer();
        let ctx = RenderContext {
            culling: false,
            ..unlit()
        };
        let stats = r.update(&cube_at(0.0, 0.0, 5.0), &ctx);
        assert_eq!((stats.culled, stats.emitted), (0, 12));
    }

    #[test]
    fn test_triangle_list_rebuilt_each_frame() {
        let mut r = renderer();
        let ctx = unlit();
        let cube = cube_at(0.0, 0.0, 5.0);
        r.update(&cube, &ctx);
        r.update(&cube, &ctx);
        assert_eq!(r.triangles().len(), 2);

        r.update(&Mesh::new(), &ctx);
        assert!(r.triangles().is_empty());
    }

    #[test]
    fn test_invalid_face_is_rejected() {
        let mut mesh = cube_at(0.0, 0.0, 5.0);
        mesh.faces.push(Face::new(1, 2, 99));
        mesh.faces.push(Face::new(0, 1, 2));
        let stats = renderer().update(&mesh, &unlit());
        assert_eq!(stats.rejected, 2);
        assert_eq!(stats.emitted, 2);
    }

    #[test]
    fn test_triangles_sorted_nearest_first() {
        let mut r = renderer();
        let ctx = RenderContext {
            culling: false,
            ..unlit()
        };
        r.update(&cube_at(0.5, -0.5, 6.0), &ctx);
        let depths: Vec<f32> = r.triangles().iter().map(|t| t.avg_depth).collect();
        assert!(depths.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_lighting_scales_face_color() {
        let mut r = renderer();
        let ctx = RenderContext {
            lighting: true,
            light: Light::default(),
            ..unlit()
        };
        r.update(&cube_at(0.0, 0.0, 5.0), &ctx);
        for t in r.triangles() {
            assert!(t.color.r() > 0);
            assert_eq!((t.color.g(), t.color.b()), (0, 0));
        }
    }

    #[test]
    fn test_identity_projection_only_centers() {
        let mut r = Renderer::with_projection(200, 100, Mat4::identity());
        let mesh = Mesh::from_parts(
            vec![
                Vec3::new(0.5, 0.25, 3.0),
                Vec3::new(-0.5, 0.5, 3.0),
                Vec3::new(0.0, -0.5, 3.0),
            ],
            vec![Face::new(1, 2, 3)],
        );
        let ctx = RenderContext {
            culling: false,
            ..unlit()
        };
        r.update(&mesh, &ctx);
        let t = r.triangles()[0];
        assert!((t.points[0].x - 150.0).abs() < 1e-4);
        assert!((t.points[0].y - 62.5).abs() < 1e-4);
        assert!((t.points[2].x - 100.0).abs() < 1e-4);
        assert!((t.points[2].y - 25.0).abs() < 1e-4);
        assert!((t.avg_depth - 3.0).abs() < 1e-4);
    }

    /// Same screen footprint at depth 1 (red) and depth 5 (blue)
    fn overlapping_pair(near_first: bool) -> Mesh {
        let near = [
            Vec3::new(-0.5, -0.5, 1.0),
            Vec3::new(-0.5, 0.5, 1.0),
            Vec3::new(0.5, 0.5, 1.0),
        ];
        let far = near.map(|v| v * 5.0);
        let vertices = [near, far].concat();
        let red = Face::new(1, 2, 3).with_color(Color::RED);
        let blue = Face::new(4, 5, 6).with_color(Color::BLUE);
        let faces = if near_first {
            vec![red, blue]
        } else {
            vec![blue, red]
        };
        Mesh::from_parts(vertices, faces)
    }

    #[test]
    fn test_nearer_triangle_wins_overlap() {
        for near_first in [true, false] {
            let mut r = Renderer::new(100, 100, FRAC_PI_2, 0.1, 100.0);
            let ctx = RenderContext {
                culling: false,
                ..unlit()
            };
            r.update(&overlapping_pair(near_first), &ctx);
            let mut buf = ColorBuffer::new(100, 100);
            r.draw_frame(&mut buf, &ctx, None);
            // Centroid of the shared footprint
            assert_eq!(buf.get_pixel(42, 58), Some(Color::RED));
        }
    }

    #[test]
    fn test_vertex_at_camera_plane_still_renders() {
        let vertices = vec![
            Vec3::new(1.0, 0.0, 1e-9),
            Vec3::new(-1.0, 1.0, 5.0),
            Vec3::new(1.0, 1.0, 5.0),
        ];
        let mesh = Mesh::from_parts(vertices, vec![Face::new(1, 2, 3).with_color(Color::RED)]);
        let mut r = Renderer::new(100, 100, FRAC_PI_2, 0.1, 100.0);
        let ctx = RenderContext {
            culling: false,
            ..unlit()
        };
        assert_eq!(r.update(&mesh, &ctx).emitted, 1);
        assert!(r.triangles()[0].points[0].x > 1e10);

        let mut buf = ColorBuffer::new(100, 100);
        r.draw_frame(&mut buf, &ctx, None);
        // The two far vertices share row 60 at x = 40 and x = 60
        assert_eq!(buf.get_pixel(40, 60), Some(Color::RED));
        assert_eq!(buf.get_pixel(50, 20), Some(Color::BLACK));
    }

    fn big_triangle() -> Triangle {
        Triangle {
            points: [
                Vec4::new(10.0, 10.0, 0.5, 1.0),
                Vec4::new(90.0, 10.0, 0.5, 1.0),
                Vec4::new(50.0, 90.0, 0.5, 1.0),
            ],
            uvs: [Tex2::new(0.0, 0.0), Tex2::new(0.99, 0.0), Tex2::new(0.5, 0.99)],
            color: Color::GREEN,
            border: Some(Color::WHITE),
            avg_depth: 1.0,
        }
    }

    #[test]
    fn test_render_modes() {
        let t = big_triangle();
        let draw = |mode, texture: Option<&Texture>| {
            let mut buf = ColorBuffer::new(100, 100);
            render_triangle(&mut buf, &t, mode, texture, Color::RED);
            buf
        };

        let buf = draw(RenderMode::Vertices, None);
        assert_eq!(buf.get_pixel(50, 40), Some(Color::BLACK));
        assert_eq!(buf.get_pixel(10, 10), Some(Color::RED));

        let buf = draw(RenderMode::Wireframe, None);
        assert_eq!(buf.get_pixel(50, 40), Some(Color::BLACK));
        assert_eq!(buf.get_pixel(50, 10), Some(Color::WHITE));

        let buf = draw(RenderMode::FilledWireframe, None);
        assert_eq!(buf.get_pixel(50, 40), Some(Color::GREEN));
        assert_eq!(buf.get_pixel(50, 10), Some(Color::WHITE));

        // No texture: solid fill
        let buf = draw(RenderMode::Textured, None);
        assert_eq!(buf.get_pixel(50, 40), Some(Color::GREEN));

        let tex = Texture::from_argb(1, 1, vec![Color::MAGENTA]).unwrap();
        let buf = draw(RenderMode::TexturedWireframe, Some(&tex));
        assert_eq!(buf.get_pixel(50, 40), Some(Color::MAGENTA));
        assert_eq!(buf.get_pixel(50, 10), Some(Color::WHITE));
    }

    #[test]
    fn test_draw_frame_grid() {
        let r = renderer();
        let ctx = RenderContext {
            grid: true,
            background: Color::BLUE,
            ..unlit()
        };
        let mut buf = ColorBuffer::new(320, 240);
        r.draw_frame(&mut buf, &ctx, None);
        assert_eq!(buf.get_pixel(0, 0), Some(Color::GRID));
        assert_eq!(buf.get_pixel(5, 5), Some(Color::BLUE));
    }
}
