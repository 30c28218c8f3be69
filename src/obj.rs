//! Wavefront OBJ mesh loading
//!
//! Reads `v`, `vt` and `f` records; everything else (normals, groups,
//! materials, smoothing) is ignored. Polygons are fan-triangulated.

use std::fs;
use std::path::Path;
use std::str::SplitWhitespace;

use anyhow::{anyhow, bail, Context, Result};
use log::debug;

use crate::math3d::Vec3;
use crate::mesh::{Face, Mesh, Tex2};

/// Load and parse an OBJ file
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read mesh {}", path.display()))?;
    let mesh = parse_obj(&text).with_context(|| format!("invalid mesh {}", path.display()))?;
    debug!(
        "loaded {}: {} vertices, {} faces",
        path.display(),
        mesh.vertices.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}

/// Parse OBJ text into a mesh.
///
/// Face corners may be `v`, `v/vt`, `v/vt/vn` or `v//vn`. Indices are
/// 1-based; negative indices count back from the latest record. Every index
/// must refer to a record that precedes the face.
pub fn parse_obj(text: &str) -> Result<Mesh> {
    let mut vertices: Vec<Vec3> = Vec::new();
    let mut uvs: Vec<Tex2> = Vec::new();
    let mut faces: Vec<Face> = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };

        match keyword {
            "v" => {
                let [x, y, z] = parse_floats::<3>(&mut tokens)
                    .with_context(|| format!("line {}: bad vertex", line_no))?;
                vertices.push(Vec3::new(x, y, z));
            },
            "vt" => {
                let [u, v] = parse_floats::<2>(&mut tokens)
                    .with_context(|| format!("line {}: bad texture coordinate", line_no))?;
                // OBJ puts v = 0 at the bottom; texels start at the top
                uvs.push(Tex2::new(u, 1.0 - v));
            },
            "f" => {
                let corners = tokens
                    .map(|t| parse_corner(t, vertices.len(), &uvs))
                    .collect::<Result<Vec<_>>>()
                    .with_context(|| format!("line {}: bad face", line_no))?;
                if corners.len() < 3 {
                    bail!(
                        "line {}: face needs at least 3 vertices, got {}",
                        line_no,
                        corners.len()
                    );
                }
                let first = corners[0];
                for pair in corners[1..].windows(2) {
                    let (b, c) = (pair[0], pair[1]);
                    faces.push(
                        Face::new(first.vertex, b.vertex, c.vertex)
                            .with_uvs([first.uv, b.uv, c.uv]),
                    );
                }
            },
            _ => {},
        }
    }

    Ok(Mesh::from_parts(vertices, faces))
}

#[derive(Debug, Clone, Copy)]
struct Corner {
    vertex: usize,
    uv: Tex2,
}

fn parse_corner(token: &str, vertex_count: usize, uvs: &[Tex2]) -> Result<Corner> {
    let mut parts = token.split('/');
    let vertex = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("missing vertex index in {:?}", token))?;
    let vertex = resolve_index(vertex, vertex_count).context("vertex")?;

    let uv = match parts.next() {
        None | Some("") => Tex2::default(),
        Some(s) => {
            let index = resolve_index(s, uvs.len()).context("texture coordinate")?;
            uvs[index - 1]
        },
    };
    Ok(Corner { vertex, uv })
}

/// 1-based index, with negative values counted back from `count`
fn resolve_index(token: &str, count: usize) -> Result<usize> {
    let raw: i64 = token
        .parse()
        .with_context(|| format!("invalid index {:?}", token))?;
    let index = if raw < 0 { count as i64 + 1 + raw } else { raw };
    if index < 1 || index > count as i64 {
        bail!("index {} out of range (have {})", raw, count);
    }
    Ok(index as usize)
}

/// First `N` whitespace-separated floats; extra components are ignored
fn parse_floats<const N: usize>(tokens: &mut SplitWhitespace<'_>) -> Result<[f32; N]> {
    let mut out = [0.0; N];
    for slot in out.iter_mut() {
        let token = tokens
            .next()
            .ok_or_else(|| anyhow!("expected {} numbers", N))?;
        *slot = token
            .parse()
            .with_context(|| format!("invalid number {:?}", token))?;
    }
    Ok(out)
}
