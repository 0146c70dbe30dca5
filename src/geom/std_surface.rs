//! Built-in test surfaces: spheres, quads and cubes.
//!
//! Every surface is generated in its canonical unit placement, then mapped
//! through `frame.apply_point(scale * p)` (positions) and `frame.apply_vec`
//! (normals, re-normalized).

use std::f64::consts::PI;

use super::error::ShapeError;
use super::metrics::TimingBucket;
use super::normals::compute_normals;
use super::parametric::{UvSurface, make_uv_surface};
use super::shape::{Shape, ShapeContext};
use super::{Transform, Vec2, Vec3};

/// Highest accepted [`StdSurfaceOptions::level`]. A level-10 sphere already
/// has about eight million vertices.
pub const MAX_STD_SURFACE_LEVEL: u32 = 10;

/// Kinds of built-in surfaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StdSurface {
    UvSphere,
    /// Sphere with inward normals and `v` flipped in the texcoords.
    UvFlippedSphere,
    UvQuad,
    UvCube,
    /// Cube tessellation projected onto the unit sphere.
    UvSphereCube,
    /// Cube tessellation blended towards the unit sphere by `radius`.
    UvSpherizedCube { radius: f64 },
    /// Sphere with the caps above `z` and below `-z` folded inwards.
    UvFlipCapSphere { z: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StdSurfaceOptions {
    /// Subdivision level; each level doubles the grid resolution. At most
    /// [`MAX_STD_SURFACE_LEVEL`].
    pub level: u32,
    pub frame: Transform,
    pub scale: f64,
}

impl Default for StdSurfaceOptions {
    fn default() -> Self {
        Self {
            level: 0,
            frame: Transform::identity(),
            scale: 1.0,
        }
    }
}

impl StdSurfaceOptions {
    #[must_use]
    pub fn with_level(level: u32) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }
}

struct Sphere;

impl UvSurface for Sphere {
    fn position(&self, uv: Vec2) -> Vec3 {
        sphere_point(2.0 * PI * uv.x, PI * (1.0 - uv.y))
    }

    fn normal(&self, uv: Vec2) -> Vec3 {
        self.position(uv)
    }
}

struct FlippedSphere;

impl UvSurface for FlippedSphere {
    fn position(&self, uv: Vec2) -> Vec3 {
        sphere_point(2.0 * PI * uv.x, PI * uv.y)
    }

    fn normal(&self, uv: Vec2) -> Vec3 {
        -self.position(uv)
    }

    fn texcoord(&self, uv: Vec2) -> Vec2 {
        Vec2::new(uv.x, 1.0 - uv.y)
    }
}

struct Quad;

impl UvSurface for Quad {
    fn position(&self, uv: Vec2) -> Vec3 {
        Vec3::new(-1.0 + 2.0 * uv.x, -1.0 + 2.0 * uv.y, 0.0)
    }

    fn normal(&self, _uv: Vec2) -> Vec3 {
        Vec3::Z
    }
}

fn sphere_point(phi: f64, theta: f64) -> Vec3 {
    Vec3::new(phi.cos() * theta.sin(), phi.sin() * theta.sin(), theta.cos())
}

/// Placement of the six cube faces, as `(x, y, z, origin)`.
const CUBE_FACES: [(Vec3, Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::Y, Vec3::Z, Vec3::Z),
    (neg(Vec3::X), Vec3::Y, neg(Vec3::Z), neg(Vec3::Z)),
    (neg(Vec3::X), Vec3::Z, Vec3::Y, Vec3::Y),
    (Vec3::X, Vec3::Z, neg(Vec3::Y), neg(Vec3::Y)),
    (Vec3::Y, Vec3::Z, Vec3::X, Vec3::X),
    (neg(Vec3::Y), Vec3::Z, neg(Vec3::X), neg(Vec3::X)),
];

const fn neg(v: Vec3) -> Vec3 {
    Vec3::new(-v.x, -v.y, -v.z)
}

fn make_cube(level: u32) -> Shape {
    let quad = make_uv_surface(1 << level, 1 << level, &Quad);
    let mut cube = Shape::default();
    for (x, y, z, origin) in CUBE_FACES {
        let face = Transform::from_axes(origin, x, y, z);
        let offset = cube.positions.len();
        cube.positions
            .extend(quad.positions.iter().map(|&p| face.apply_point(p)));
        cube.normals
            .extend(quad.normals.iter().map(|&n| face.apply_vec(n)));
        cube.texcoords.extend_from_slice(&quad.texcoords);
        cube.triangles.extend(
            quad.triangles
                .iter()
                .map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]),
        );
    }
    cube
}

/// Generates `kind` in the placement given by `options`.
///
/// Fails with [`ShapeError::LevelOutOfRange`] above [`MAX_STD_SURFACE_LEVEL`].
pub fn make_std_surface(kind: StdSurface, options: StdSurfaceOptions) -> Result<Shape, ShapeError> {
    let mut ctx = ShapeContext::new();
    make_std_surface_with_context(kind, options, &mut ctx)
}

pub fn make_std_surface_with_context(
    kind: StdSurface,
    options: StdSurfaceOptions,
    ctx: &mut ShapeContext,
) -> Result<Shape, ShapeError> {
    if options.level > MAX_STD_SURFACE_LEVEL {
        return Err(ShapeError::LevelOutOfRange {
            level: options.level,
            max: MAX_STD_SURFACE_LEVEL,
        });
    }
    let mut shape = ctx
        .metrics
        .time(TimingBucket::Generation, || make_unit_surface(kind, options.level))?;

    for p in &mut shape.positions {
        *p = options.frame.apply_point(*p * options.scale);
    }
    for n in &mut shape.normals {
        *n = options.frame.apply_vec(*n).normalized_or_zero();
    }

    log::debug!(
        "{kind:?} level {}: {} vertices, {} triangles",
        options.level,
        shape.vertex_count(),
        shape.triangles.len()
    );
    Ok(shape)
}

fn make_unit_surface(kind: StdSurface, level: u32) -> Result<Shape, ShapeError> {
    let shape = match kind {
        StdSurface::UvSphere => make_uv_surface(1 << (level + 2), 1 << (level + 1), &Sphere),
        StdSurface::UvFlippedSphere => {
            make_uv_surface(1 << (level + 2), 1 << (level + 1), &FlippedSphere)
        }
        StdSurface::UvQuad => make_uv_surface(1 << level, 1 << level, &Quad),
        StdSurface::UvCube => make_cube(level),
        StdSurface::UvSphereCube => {
            let mut shape = make_cube(level);
            for (p, n) in shape.positions.iter_mut().zip(shape.normals.iter_mut()) {
                *p = p.normalized_or_zero();
                *n = *p;
            }
            shape
        }
        StdSurface::UvSpherizedCube { radius } => {
            let mut shape = make_cube(level);
            if radius != 0.0 {
                for p in &mut shape.positions {
                    *p = *p * (1.0 - radius) + p.normalized_or_zero() * radius;
                }
                shape.normals =
                    compute_normals(&[], &[], &shape.triangles, &shape.positions, true)?;
            }
            shape
        }
        StdSurface::UvFlipCapSphere { z } => {
            let mut shape = make_uv_surface(1 << (level + 2), 1 << (level + 1), &Sphere);
            if z != 1.0 {
                for (p, n) in shape.positions.iter_mut().zip(shape.normals.iter_mut()) {
                    if p.z > z {
                        p.z = 2.0 * z - p.z;
                    } else if p.z < -z {
                        p.z = -2.0 * z - p.z;
                    } else {
                        continue;
                    }
                    n.x = -n.x;
                    n.y = -n.y;
                }
            }
            shape
        }
    };
    Ok(shape)
}
