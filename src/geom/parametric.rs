//! Regular-grid generators over caller-supplied parametric functions.
//!
//! The generators only evaluate the functions on a grid and wire up the
//! topology; they never look at the values they produce.

use super::shape::Shape;
use super::{Vec2, Vec3};

/// A surface parameterized over `[0, 1]²`.
pub trait UvSurface {
    fn position(&self, uv: Vec2) -> Vec3;

    fn normal(&self, uv: Vec2) -> Vec3;

    #[must_use]
    fn texcoord(&self, uv: Vec2) -> Vec2 {
        uv
    }
}

/// A family of curves: `u` runs along a curve, `v` selects the curve.
pub trait ParametricLines {
    fn position(&self, uv: Vec2) -> Vec3;

    fn tangent(&self, uv: Vec2) -> Vec3;

    #[must_use]
    fn texcoord(&self, uv: Vec2) -> Vec2 {
        uv
    }

    #[must_use]
    fn radius(&self, _uv: Vec2) -> f64 {
        1.0
    }
}

/// A point set parameterized over `[0, 1]`.
pub trait ParametricPoints {
    fn position(&self, u: f64) -> Vec3;

    #[must_use]
    fn normal(&self, _u: f64) -> Vec3 {
        Vec3::Z
    }

    #[must_use]
    fn texcoord(&self, u: f64) -> Vec2 {
        Vec2::new(u, 0.0)
    }

    #[must_use]
    fn radius(&self, _u: f64) -> f64 {
        1.0
    }
}

#[allow(clippy::cast_precision_loss)]
fn param(i: usize, steps: usize) -> f64 {
    if steps == 0 { 0.0 } else { i as f64 / steps as f64 }
}

/// Triangulates a `usteps x vsteps` grid of cells over `surface`.
///
/// Vertex `(i, j)` sits at `uv = (i/usteps, j/vsteps)` with id
/// `j * (usteps + 1) + i`. Cell diagonals alternate by the parity of `i + j`.
#[must_use]
pub fn make_uv_surface(usteps: usize, vsteps: usize, surface: &impl UvSurface) -> Shape {
    if usteps == 0 || vsteps == 0 {
        return Shape::default();
    }

    let vid = |i: usize, j: usize| j * (usteps + 1) + i;
    let count = (usteps + 1) * (vsteps + 1);
    let mut shape = Shape {
        positions: Vec::with_capacity(count),
        normals: Vec::with_capacity(count),
        texcoords: Vec::with_capacity(count),
        triangles: Vec::with_capacity(usteps * vsteps * 2),
        ..Shape::default()
    };

    for j in 0..=vsteps {
        for i in 0..=usteps {
            let uv = Vec2::new(param(i, usteps), param(j, vsteps));
            shape.positions.push(surface.position(uv));
            shape.normals.push(surface.normal(uv));
            shape.texcoords.push(surface.texcoord(uv));
        }
    }

    for j in 0..vsteps {
        for i in 0..usteps {
            if (i + j) % 2 == 1 {
                shape.triangles.push([vid(i, j), vid(i + 1, j), vid(i + 1, j + 1)]);
                shape.triangles.push([vid(i + 1, j + 1), vid(i, j + 1), vid(i, j)]);
            } else {
                shape.triangles.push([vid(i, j), vid(i + 1, j), vid(i, j + 1)]);
                shape.triangles.push([vid(i + 1, j + 1), vid(i, j + 1), vid(i + 1, j)]);
            }
        }
    }
    shape
}

/// Emits `count` polylines of `usteps` segments each.
///
/// Tangents are stored in `normals`.
#[must_use]
pub fn make_lines(usteps: usize, count: usize, lines: &impl ParametricLines) -> Shape {
    if usteps == 0 || count == 0 {
        return Shape::default();
    }

    let vid = |i: usize, j: usize| j * (usteps + 1) + i;
    let vertex_count = (usteps + 1) * count;
    let mut shape = Shape {
        positions: Vec::with_capacity(vertex_count),
        normals: Vec::with_capacity(vertex_count),
        texcoords: Vec::with_capacity(vertex_count),
        radius: Vec::with_capacity(vertex_count),
        lines: Vec::with_capacity(usteps * count),
        ..Shape::default()
    };

    for j in 0..count {
        for i in 0..=usteps {
            let uv = Vec2::new(param(i, usteps), param(j, count - 1));
            shape.positions.push(lines.position(uv));
            shape.normals.push(lines.tangent(uv));
            shape.texcoords.push(lines.texcoord(uv));
            shape.radius.push(lines.radius(uv));
        }
    }
    for j in 0..count {
        for i in 0..usteps {
            shape.lines.push([vid(i, j), vid(i + 1, j)]);
        }
    }
    shape
}

/// Emits `count` points at `u = i / (count - 1)`.
#[must_use]
pub fn make_points(count: usize, points: &impl ParametricPoints) -> Shape {
    let mut shape = Shape {
        points: (0..count).collect(),
        ..Shape::default()
    };
    for i in 0..count {
        let u = param(i, count.saturating_sub(1));
        shape.positions.push(points.position(u));
        shape.normals.push(points.normal(u));
        shape.texcoords.push(points.texcoord(u));
        shape.radius.push(points.radius(u));
    }
    shape
}
