//! Inverse-CDF element selection and in-element coordinate draws.
//!
//! Every sampler consumes caller-supplied uniform draws (`ern` for the
//! element, `uvrn` for the coordinate) so results are reproducible from a
//! fixed random sequence. [`ShapeDistribution::sample_with_rng`] is a thin
//! wrapper that pulls the draws from a [`rand::Rng`].

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::distribution::ShapeDistribution;
use super::elements::ElementKind;
use super::error::ShapeError;

/// Coordinate inside a single element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ElementCoord {
    /// Points have no interior; the whole vertex is selected.
    Point,
    /// Line parameter, weights `(1-t, t)`.
    Line { t: f64 },
    /// Barycentric coordinate, weights `(1-u-v, u, v)`.
    Triangle { u: f64, v: f64 },
}

impl ElementCoord {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Point => ElementKind::Point,
            Self::Line { .. } => ElementKind::Line,
            Self::Triangle { .. } => ElementKind::Triangle,
        }
    }
}

/// An element index plus a coordinate inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementSample {
    pub element: usize,
    pub coord: ElementCoord,
}

impl ElementSample {
    #[must_use]
    pub fn point(element: usize) -> Self {
        Self {
            element,
            coord: ElementCoord::Point,
        }
    }

    #[must_use]
    pub fn line(element: usize, t: f64) -> Self {
        Self {
            element,
            coord: ElementCoord::Line { t },
        }
    }

    #[must_use]
    pub fn triangle(element: usize, u: f64, v: f64) -> Self {
        Self {
            element,
            coord: ElementCoord::Triangle { u, v },
        }
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.coord.kind()
    }
}

fn check_draw(value: f64) -> Result<f64, ShapeError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ShapeError::DrawOutOfRange { value })
    }
}

/// Smallest index `i` with `cdf[i] >= ern`, clamped to the last element.
///
/// `ern` must lie in `[0, 1]`. The clamp keeps draws that land above the
/// last entry through rounding on the last element.
pub fn sample_cdf(cdf: &[f64], ern: f64) -> Result<usize, ShapeError> {
    if cdf.is_empty() {
        return Err(ShapeError::EmptyDistribution);
    }
    let ern = check_draw(ern)?;
    let index = cdf.partition_point(|&c| c < ern);
    Ok(index.min(cdf.len() - 1))
}

/// Maps a uniform square draw to a uniform barycentric coordinate.
///
/// Returns `(1 - sqrt(u), v * sqrt(u))`, which always satisfies
/// `u' >= 0`, `v' >= 0`, `u' + v' <= 1`.
#[must_use]
pub fn uniform_triangle_uv(u: f64, v: f64) -> (f64, f64) {
    let su = u.sqrt();
    (1.0 - su, v * su)
}

pub fn sample_points(cdf: &[f64], ern: f64) -> Result<ElementSample, ShapeError> {
    Ok(ElementSample::point(sample_cdf(cdf, ern)?))
}

/// Picks a line and uses `uvrn.0` unchanged as its parameter.
pub fn sample_lines(cdf: &[f64], ern: f64, uvrn: (f64, f64)) -> Result<ElementSample, ShapeError> {
    let element = sample_cdf(cdf, ern)?;
    let t = check_draw(uvrn.0)?;
    Ok(ElementSample::line(element, t))
}

/// Picks a triangle and remaps `uvrn` to a uniform barycentric coordinate.
pub fn sample_triangles(
    cdf: &[f64],
    ern: f64,
    uvrn: (f64, f64),
) -> Result<ElementSample, ShapeError> {
    let element = sample_cdf(cdf, ern)?;
    let (u, v) = uniform_triangle_uv(check_draw(uvrn.0)?, check_draw(uvrn.1)?);
    Ok(ElementSample::triangle(element, u, v))
}

/// Dispatches to the sampler of the single non-empty CDF.
///
/// Fails with [`ShapeError::InvalidElementSelection`] unless exactly one of
/// the three CDFs is non-empty.
pub fn sample_shape_cdfs(
    point_cdf: &[f64],
    line_cdf: &[f64],
    triangle_cdf: &[f64],
    ern: f64,
    uvrn: (f64, f64),
) -> Result<ElementSample, ShapeError> {
    match (
        point_cdf.is_empty(),
        line_cdf.is_empty(),
        triangle_cdf.is_empty(),
    ) {
        (false, true, true) => sample_points(point_cdf, ern),
        (true, false, true) => sample_lines(line_cdf, ern, uvrn),
        (true, true, false) => sample_triangles(triangle_cdf, ern, uvrn),
        (p, l, t) => Err(ShapeError::InvalidElementSelection {
            populated: [p, l, t].into_iter().filter(|empty| !empty).count(),
        }),
    }
}

impl ShapeDistribution {
    /// Draws an element and coordinate from the caller's uniform draws.
    pub fn sample(&self, ern: f64, uvrn: (f64, f64)) -> Result<ElementSample, ShapeError> {
        match self.kind() {
            ElementKind::Point => sample_points(self.cdf(), ern),
            ElementKind::Line => sample_lines(self.cdf(), ern, uvrn),
            ElementKind::Triangle => sample_triangles(self.cdf(), ern, uvrn),
        }
    }

    /// Draws `ern` and `uvrn` from `rng` and samples with them.
    pub fn sample_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<ElementSample, ShapeError> {
        let ern: f64 = rng.random();
        let uvrn: (f64, f64) = (rng.random(), rng.random());
        self.sample(ern, uvrn)
    }
}

/// Samples once per `(ern, uvrn)` draw, in draw order.
///
/// The first invalid draw fails the whole batch.
#[cfg(feature = "parallel")]
pub fn sample_many(
    dist: &ShapeDistribution,
    draws: &[(f64, (f64, f64))],
) -> Result<Vec<ElementSample>, ShapeError> {
    draws
        .par_iter()
        .map(|&(ern, uvrn)| dist.sample(ern, uvrn))
        .collect()
}

/// Samples once per `(ern, uvrn)` draw, in draw order.
///
/// The first invalid draw fails the whole batch.
#[cfg(not(feature = "parallel"))]
pub fn sample_many(
    dist: &ShapeDistribution,
    draws: &[(f64, (f64, f64))],
) -> Result<Vec<ElementSample>, ShapeError> {
    draws
        .iter()
        .map(|&(ern, uvrn)| dist.sample(ern, uvrn))
        .collect()
}
