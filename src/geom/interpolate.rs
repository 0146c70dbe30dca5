//! Attribute evaluation at sampled element locations.

use std::ops::{Add, Mul};

use super::elements::{ElementKind, Elements};
use super::error::ShapeError;
use super::sampling::{ElementCoord, ElementSample};
use super::Tolerance;

/// Vertex attribute values that can be blended linearly.
///
/// Implemented for every type with `Copy`, addition and scaling by `f64`,
/// which covers [`Vec2`](super::Vec2), [`Vec3`](super::Vec3) and `f64`.
pub trait VertexAttribute: Copy + Add<Output = Self> + Mul<f64, Output = Self> {}

impl<T> VertexAttribute for T where T: Copy + Add<Output = T> + Mul<f64, Output = T> {}

/// Evaluates `values` at `sample` on `elements`.
///
/// Points copy the vertex value, lines blend with weights `(1-t, t)` and
/// triangles with `(1-u-v, u, v)`. Corner coordinates reproduce the vertex
/// value exactly.
pub fn interpolate_vert<T: VertexAttribute>(
    elements: Elements<'_>,
    values: &[T],
    sample: &ElementSample,
) -> Result<T, ShapeError> {
    interpolate_vert_with_tolerance(elements, values, sample, Tolerance::LOOSE)
}

/// Like [`interpolate_vert`] with an explicit domain tolerance.
///
/// Coordinates may overshoot their domain by at most `tol.eps`; anything
/// further out (or non-finite) fails with [`ShapeError::CoordinateOutOfRange`].
pub fn interpolate_vert_with_tolerance<T: VertexAttribute>(
    elements: Elements<'_>,
    values: &[T],
    sample: &ElementSample,
    tol: Tolerance,
) -> Result<T, ShapeError> {
    let kind = elements.kind();
    if sample.kind() != kind {
        return Err(ShapeError::ElementKindMismatch {
            expected: kind,
            found: sample.kind(),
        });
    }
    check_domain(sample.coord, tol)?;

    let ids = elements
        .vertices(sample.element)
        .ok_or_else(|| ShapeError::element_out_of_range(sample.element, elements.len()))?;
    let value = |slot: usize| -> Result<T, ShapeError> {
        let id = ids[slot];
        values
            .get(id)
            .copied()
            .ok_or_else(|| ShapeError::vertex_out_of_range(id, values.len()))
    };

    match sample.coord {
        ElementCoord::Point => value(0),
        ElementCoord::Line { t } => Ok(interpolate_line(value(0)?, value(1)?, t)),
        ElementCoord::Triangle { u, v } => {
            Ok(interpolate_triangle(value(0)?, value(1)?, value(2)?, u, v))
        }
    }
}

/// `(1-t)·a + t·b`.
#[must_use]
pub fn interpolate_line<T: VertexAttribute>(a: T, b: T, t: f64) -> T {
    a * (1.0 - t) + b * t
}

/// `(1-u-v)·a + u·b + v·c`.
#[must_use]
pub fn interpolate_triangle<T: VertexAttribute>(a: T, b: T, c: T, u: f64, v: f64) -> T {
    a * (1.0 - u - v) + b * u + c * v
}

fn check_domain(coord: ElementCoord, tol: Tolerance) -> Result<(), ShapeError> {
    let ok = match coord {
        ElementCoord::Point => true,
        ElementCoord::Line { t } => t.is_finite() && tol.within(t, 0.0, 1.0),
        ElementCoord::Triangle { u, v } => {
            u.is_finite()
                && v.is_finite()
                && tol.within(u, 0.0, 1.0)
                && tol.within(v, 0.0, 1.0)
                && u + v <= 1.0 + tol.eps
        }
    };
    if ok {
        return Ok(());
    }
    let (kind, coord) = match coord {
        ElementCoord::Point => (ElementKind::Point, [0.0, 0.0]),
        ElementCoord::Line { t } => (ElementKind::Line, [t, 0.0]),
        ElementCoord::Triangle { u, v } => (ElementKind::Triangle, [u, v]),
    };
    Err(ShapeError::CoordinateOutOfRange { kind, coord })
}
