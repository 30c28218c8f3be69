//! Scanline rasterizer
//!
//! Lines, wireframes, solid fills and perspective-correct texturing of
//! screen-space triangles. Every routine writes through [`Surface`], whose
//! `set_pixel` drops out-of-range coordinates. Lines and scanlines are still
//! cut down to the surface first, so a vertex projected far off screen costs
//! no more than one that lands on it.
//!
//! Triangles are filled with the flat-top/flat-bottom decomposition: sort the
//! vertices by y, split at the middle vertex's height, then walk both halves
//! one scanline at a time using the inverse gradient (`dx/dy`) of each edge.

use crate::color::Color;
use crate::math3d::{Vec2, Vec3, Vec4};
use crate::mesh::Tex2;
use crate::texture::Texture;

/// Side of the square drawn for each vertex in the vertex render modes
pub const VERTEX_RECT_WIDTH_PX: i32 = 4;

/// A pixel-writing surface of known size
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Write one pixel. Coordinates outside the surface must be ignored.
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);
}

// ============================================================================
// Lines and wireframes
// ============================================================================

/// DDA line: step along the longer axis one pixel at a time and round the
/// position on the shorter axis, so there are no gaps at any slope.
/// Both endpoints are drawn.
pub fn draw_line<S: Surface>(surface: &mut S, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    let dx = i64::from(x1) - i64::from(x0);
    let dy = i64::from(y1) - i64::from(y0);
    let steps = dx.abs().max(dy.abs());
    if steps == 0 {
        surface.set_pixel(x0, y0, color);
        return;
    }

    let x_inc = dx as f64 / steps as f64;
    let y_inc = dy as f64 / steps as f64;
    let Some((x_first, x_last)) = visible_steps(x0, dx, steps, surface.width()) else {
        return;
    };
    let Some((y_first, y_last)) = visible_steps(y0, dy, steps, surface.height()) else {
        return;
    };
    for i in x_first.max(y_first)..=x_last.min(y_last) {
        let x = f64::from(x0) + x_inc * i as f64;
        let y = f64::from(y0) + y_inc * i as f64;
        surface.set_pixel(x.round() as i32, y.round() as i32, color);
    }
}

/// DDA steps `first..=last` along which the coordinate starting at `start`
/// and moving `delta` over `steps` can still round onto `0..size`.
/// The range is one pixel wider on each side than strictly needed.
fn visible_steps(start: i32, delta: i64, steps: i64, size: u32) -> Option<(i64, i64)> {
    let start = f64::from(start);
    let (lo, hi) = (-2.0, f64::from(size) + 1.0);
    if delta == 0 {
        return (start >= lo && start <= hi).then_some((0, steps));
    }
    let inc = delta as f64 / steps as f64;
    let (t0, t1) = ((lo - start) / inc, (hi - start) / inc);
    let first = t0.min(t1).floor().max(0.0);
    let last = t0.max(t1).ceil().min(steps as f64);
    (first <= last).then_some((first as i64, last as i64))
}

/// Outline of a triangle
pub fn draw_triangle<S: Surface>(surface: &mut S, points: [Vec2; 3], color: Color) {
    let [a, b, c] = points.map(snap);
    draw_line(surface, a.x as i32, a.y as i32, b.x as i32, b.y as i32, color);
    draw_line(surface, b.x as i32, b.y as i32, c.x as i32, c.y as i32, color);
    draw_line(surface, c.x as i32, c.y as i32, a.x as i32, a.y as i32, color);
}

/// Small square centred on a vertex
pub fn draw_vertex<S: Surface>(surface: &mut S, point: Vec2, color: Color) {
    let p = snap(point);
    let half = VERTEX_RECT_WIDTH_PX / 2;
    let x0 = (p.x as i32).saturating_sub(half);
    let y0 = (p.y as i32).saturating_sub(half);
    for y in y0..y0.saturating_add(VERTEX_RECT_WIDTH_PX) {
        for x in x0..x0.saturating_add(VERTEX_RECT_WIDTH_PX) {
            surface.set_pixel(x, y, color);
        }
    }
}

// ============================================================================
// Triangle setup
// ============================================================================

/// Round to the pixel grid. All scan conversion works on snapped vertices.
#[inline]
fn snap(p: Vec2) -> Vec2 {
    Vec2::new(p.x.round(), p.y.round())
}

/// Zero height, zero area (collinear or coincident vertices) or a
/// non-finite coordinate
fn is_degenerate(points: &[Vec2; 3]) -> bool {
    if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return true;
    }
    let [a, b, c] = *points;
    if a.y == b.y && b.y == c.y {
        return true;
    }
    (b - a).cross(&(c - a)) == 0.0
}

/// Vertex order sorted ascending by y; ties keep their original order
fn y_order(points: &[Vec2; 3]) -> [usize; 3] {
    let mut order = [0, 1, 2];
    order.sort_by(|&i, &j| points[i].y.total_cmp(&points[j].y));
    order
}

/// Point on the long edge `top-bottom` at the height of `mid`
#[inline]
fn split_point(top: Vec2, mid: Vec2, bottom: Vec2) -> Vec2 {
    let x = (bottom.x - top.x) * (mid.y - top.y) / (bottom.y - top.y) + top.x;
    Vec2::new(x, mid.y)
}

/// Horizontal extent of every scanline of a sorted, non-degenerate triangle
struct Scan {
    top: Vec2,
    mid: Vec2,
    split: Vec2,
    inv_top_mid: f32,
    inv_mid_bottom: f32,
    inv_long: f32,
    y_top: i32,
    y_mid: i32,
    y_bottom: i32,
}

impl Scan {
    fn new(top: Vec2, mid: Vec2, bottom: Vec2) -> Self {
        Self {
            top,
            mid,
            split: split_point(top, mid, bottom),
            inv_top_mid: top.inv_gradient(&mid),
            inv_mid_bottom: mid.inv_gradient(&bottom),
            inv_long: top.inv_gradient(&bottom),
            y_top: top.y as i32,
            y_mid: mid.y as i32,
            y_bottom: bottom.y as i32,
        }
    }

    /// Calls `span(y, x_start, x_end)` for each scanline in `0..rows`, top
    /// to bottom. `x_start` lies on the short edges, `x_end` on the long
    /// edge; either may be the larger one.
    fn for_each_span(&self, rows: i32, mut span: impl FnMut(i32, f32, f32)) {
        // Upper half: rows above the middle vertex
        for y in self.y_top.max(0)..self.y_mid.min(rows) {
            let dy = y as f32 - self.top.y;
            let x_start = self.top.x + dy * self.inv_top_mid;
            let x_end = self.top.x + dy * self.inv_long;
            span(y, x_start, x_end);
        }
        // Lower half: from the middle vertex down to and including the bottom
        for y in self.y_mid.max(0)..=self.y_bottom.min(rows - 1) {
            let dy = y as f32 - self.mid.y;
            let x_start = self.mid.x + dy * self.inv_mid_bottom;
            let x_end = self.split.x + dy * self.inv_long;
            span(y, x_start, x_end);
        }
    }
}

// ============================================================================
// Solid fill
// ============================================================================

/// Fill a triangle with a solid color
pub fn fill_triangle<S: Surface>(surface: &mut S, points: [Vec2; 3], color: Color) {
    let points = points.map(snap);
    if is_degenerate(&points) {
        return;
    }
    let [t, m, b] = y_order(&points);
    let scan = Scan::new(points[t], points[m], points[b]);
    let right = surface.width() as f32;
    let rows = surface.height() as i32;

    scan.for_each_span(rows, |y, x_start, x_end| {
        let x0 = x_start.clamp(-1.0, right).round() as i32;
        let x1 = x_end.clamp(-1.0, right).round() as i32;
        draw_line(surface, x0, y, x1, y, color);
    });
}

// ============================================================================
// Texturing
// ============================================================================

/// Barycentric weights (alpha, beta, gamma) of `p` in triangle `a, b, c`.
///
/// Alpha and beta are ratios of parallelogram areas; gamma is `1 - alpha - beta`
/// so the three always sum to one. `None` for a zero-area triangle.
pub fn barycentric_weights(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> Option<Vec3> {
    let area = (b - a).cross(&(c - a));
    if area == 0.0 {
        return None;
    }
    let alpha = (b - p).cross(&(c - p)) / area;
    let beta = (p - a).cross(&(c - a)) / area;
    Some(Vec3::new(alpha, beta, 1.0 - alpha - beta))
}

/// Reweight screen-space barycentrics by the other two vertices' depths so
/// that attributes interpolate linearly in camera space.
///
/// Falls back to the plain weights if the depths cancel out.
pub fn perspective_weights(weights: Vec3, depths: [f32; 3]) -> Vec3 {
    let [wa, wb, wc] = depths;
    let corrected = Vec3::new(
        weights.x * wb * wc,
        weights.y * wa * wc,
        weights.z * wa * wb,
    );
    let sum = corrected.x + corrected.y + corrected.z;
    if sum == 0.0 || !sum.is_finite() {
        return weights;
    }
    corrected * (1.0 / sum)
}

/// Fill a triangle with texels sampled by perspective-correct UV interpolation.
///
/// `points` are screen x/y with the camera-space depth in `w`. Pixels whose
/// UV maps outside the texture are left untouched.
pub fn texture_triangle<S: Surface>(
    surface: &mut S,
    points: [Vec4; 3],
    uvs: [Tex2; 3],
    texture: &Texture,
) {
    let screen = points.map(|p| snap(p.xy()));
    if is_degenerate(&screen) {
        return;
    }
    let order = y_order(&screen);
    let [a, b, c] = order.map(|i| screen[i]);
    let depths = order.map(|i| points[i].w);
    let uvs = order.map(|i| uvs[i]);

    let width = surface.width() as i32;
    let height = surface.height() as i32;
    let scan = Scan::new(a, b, c);

    scan.for_each_span(height, |y, x_start, x_end| {
        let mut x0 = x_start.round() as i32;
        let mut x1 = x_end.round() as i32;
        if x1 < x0 {
            std::mem::swap(&mut x0, &mut x1);
        }
        for x in x0.max(0)..=x1.min(width - 1) {
            let p = Vec2::new(x as f32, y as f32);
            if let Some(color) = sample(texture, a, b, c, depths, uvs, p) {
                surface.set_pixel(x, y, color);
            }
        }
    });
}

/// Texel for screen point `p`, `None` if it maps outside the texture
fn sample(
    texture: &Texture,
    a: Vec2,
    b: Vec2,
    c: Vec2,
    depths: [f32; 3],
    uvs: [Tex2; 3],
    p: Vec2,
) -> Option<Color> {
    let weights = perspective_weights(barycentric_weights(a, b, c, p)?, depths);
    let u = weights.x * uvs[0].u + weights.y * uvs[1].u + weights.z * uvs[2].u;
    let v = weights.x * uvs[0].v + weights.y * uvs[1].v + weights.z * uvs[2].v;

    let tx = (u * texture.width() as f32).abs().floor();
    let ty = (v * texture.height() as f32).abs().floor();
    if !tx.is_finite() || !ty.is_finite() {
        return None;
    }
    texture.texel(tx as i64, ty as i64)
}
