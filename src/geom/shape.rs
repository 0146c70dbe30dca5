use serde::{Deserialize, Serialize};

use super::elements::{Elements, check_vertex_ids};
use super::error::ShapeError;
use super::interpolate::interpolate_vert_with_tolerance;
use super::metrics::ShapeMetrics;
use super::normals::compute_normals;
use super::sampling::ElementSample;
use super::{Tolerance, Vec2, Vec3};

/// An indexed shape: element arrays over a shared vertex buffer.
///
/// Vertex attributes are parallel arrays. An empty array means the attribute
/// is not in use; a non-empty one must hold exactly one entry per vertex.
/// Unlike sampling calls, a shape may carry points, lines and triangles at
/// the same time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Shape {
    pub points: Vec<usize>,
    pub lines: Vec<[usize; 2]>,
    pub triangles: Vec<[usize; 3]>,
    pub positions: Vec<Vec3>,
    /// Vertex normals, or tangents for line shapes.
    pub normals: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub colors: Vec<Vec3>,
    pub radius: Vec<f64>,
}

/// Attribute values evaluated at a sampled element location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub position: Vec3,
    pub normal: Option<Vec3>,
    pub texcoord: Option<Vec2>,
}

/// Per-call settings threaded through the `_with_context` entry points.
#[derive(Debug)]
pub struct ShapeContext {
    /// Slack allowed on sample coordinates before they count as out of domain.
    pub tolerance: Tolerance,
    pub metrics: ShapeMetrics,
}

impl Default for ShapeContext {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::LOOSE,
            metrics: ShapeMetrics::default(),
        }
    }
}

impl ShapeContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Shape {
    /// Create a triangle shape with positions only.
    #[must_use]
    pub fn from_triangles(positions: Vec<Vec3>, triangles: Vec<[usize; 3]>) -> Self {
        Self {
            positions,
            triangles,
            ..Self::default()
        }
    }

    /// Create a line shape with positions only.
    #[must_use]
    pub fn from_lines(positions: Vec<Vec3>, lines: Vec<[usize; 2]>) -> Self {
        Self {
            positions,
            lines,
            ..Self::default()
        }
    }

    /// Number of vertices, taken from the first non-empty attribute array.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        [
            self.positions.len(),
            self.normals.len(),
            self.texcoords.len(),
            self.colors.len(),
            self.radius.len(),
        ]
        .into_iter()
        .find(|&len| len > 0)
        .unwrap_or(0)
    }

    /// The single element kind this shape is made of.
    ///
    /// Fails with [`ShapeError::InvalidElementSelection`] for shapes mixing
    /// kinds or holding no elements at all.
    pub fn elements(&self) -> Result<Elements<'_>, ShapeError> {
        Elements::from_arrays(&self.points, &self.lines, &self.triangles)
    }

    /// Returns true if all non-empty attribute buffers match `vertex_count()`.
    #[must_use]
    pub fn has_valid_attribute_lengths(&self) -> bool {
        self.attribute_lengths().is_ok()
    }

    /// Checks attribute lengths and element indices.
    pub fn validate(&self) -> Result<(), ShapeError> {
        self.attribute_lengths()?;
        let n = self.vertex_count();
        check_vertex_ids(self.points.iter().copied(), n)?;
        check_vertex_ids(self.lines.iter().flatten().copied(), n)?;
        check_vertex_ids(self.triangles.iter().flatten().copied(), n)?;
        Ok(())
    }

    fn attribute_lengths(&self) -> Result<(), ShapeError> {
        let expected = self.vertex_count();
        let lengths = [
            ("positions", self.positions.len()),
            ("normals", self.normals.len()),
            ("texcoords", self.texcoords.len()),
            ("colors", self.colors.len()),
            ("radius", self.radius.len()),
        ];
        for (attribute, len) in lengths {
            if len != 0 && len != expected {
                return Err(ShapeError::AttributeLengthMismatch {
                    attribute,
                    len,
                    expected,
                });
            }
        }
        Ok(())
    }

    /// Recomputes `normals` from the current topology and positions.
    pub fn update_normals(&mut self, weighted: bool) -> Result<(), ShapeError> {
        self.normals = compute_normals(
            &self.points,
            &self.lines,
            &self.triangles,
            &self.positions,
            weighted,
        )?;
        Ok(())
    }

    /// Evaluates position, and normal/texcoord when present, at a sample.
    ///
    /// Normals are re-normalized after interpolation.
    pub fn eval_sample(&self, sample: &ElementSample) -> Result<SurfacePoint, ShapeError> {
        self.eval_sample_with_context(sample, &ShapeContext::new())
    }

    pub fn eval_sample_with_context(
        &self,
        sample: &ElementSample,
        ctx: &ShapeContext,
    ) -> Result<SurfacePoint, ShapeError> {
        let elements = self.elements()?;
        let tol = ctx.tolerance;
        let position = interpolate_vert_with_tolerance(elements, &self.positions, sample, tol)?;
        let normal = if self.normals.is_empty() {
            None
        } else {
            Some(
                interpolate_vert_with_tolerance(elements, &self.normals, sample, tol)?
                    .normalized_or_zero(),
            )
        };
        let texcoord = if self.texcoords.is_empty() {
            None
        } else {
            Some(interpolate_vert_with_tolerance(elements, &self.texcoords, sample, tol)?)
        };
        Ok(SurfacePoint {
            position,
            normal,
            texcoord,
        })
    }
}
