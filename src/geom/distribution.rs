//! Element-weighted cumulative distributions for surface sampling.
//!
//! Each element gets a raw weight proportional to its geometric measure
//! (1 per point, length per line, area per triangle). The prefix sums of
//! those weights, divided by their total, form a CDF that
//! [`sample_cdf`](super::sample_cdf) inverts to pick elements with
//! probability proportional to their measure.

use serde::{Deserialize, Serialize};

use super::elements::{ElementKind, Elements};
use super::error::ShapeError;
use super::metrics::TimingBucket;
use super::shape::ShapeContext;
use super::{Tolerance, Vec3};

/// A normalized element CDF plus the total raw weight it was built from.
///
/// Immutable once built, so it can be shared across threads and sampled
/// concurrently. Deserialization re-checks the CDF and weight, so a stored
/// distribution is as trustworthy as a freshly built one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredDistribution")]
pub struct ShapeDistribution {
    kind: ElementKind,
    cdf: Vec<f64>,
    weight: f64,
}

impl ShapeDistribution {
    /// Builds the distribution for one element array over `positions`.
    ///
    /// Fails with [`ShapeError::EmptyDistribution`] for zero elements and
    /// [`ShapeError::DegenerateDistribution`] when the total weight is zero or
    /// not finite (all lines zero-length, all triangles collapsed, or NaN
    /// positions).
    pub fn new(elements: Elements<'_>, positions: &[Vec3]) -> Result<Self, ShapeError> {
        let mut ctx = ShapeContext::new();
        Self::new_with_context(elements, positions, &mut ctx)
    }

    pub fn new_with_context(
        elements: Elements<'_>,
        positions: &[Vec3],
        ctx: &mut ShapeContext,
    ) -> Result<Self, ShapeError> {
        if elements.is_empty() {
            return Err(ShapeError::EmptyDistribution);
        }

        let weights = ctx
            .metrics
            .time(TimingBucket::Distribution, || element_weights(elements, positions))?;
        let (cdf, weight) = normalize_cdf(weights)?;

        log::debug!(
            "{} distribution over {} elements, total weight {weight}",
            elements.kind(),
            cdf.len()
        );
        Ok(Self {
            kind: elements.kind(),
            cdf,
            weight,
        })
    }

    /// Builds the distribution from the three-array form, requiring exactly
    /// one non-empty array.
    pub fn from_arrays(
        points: &[usize],
        lines: &[[usize; 2]],
        triangles: &[[usize; 3]],
        positions: &[Vec3],
    ) -> Result<Self, ShapeError> {
        Self::new(Elements::from_arrays(points, lines, triangles)?, positions)
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// The normalized, non-decreasing CDF; the last entry is 1.
    #[must_use]
    pub fn cdf(&self) -> &[f64] {
        &self.cdf
    }

    /// Total raw weight: point count, total length or total area.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cdf.len()
    }

    /// Always false for a successfully built distribution.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cdf.is_empty()
    }

    /// Probability of drawing element `index`.
    pub fn element_probability(&self, index: usize) -> Result<f64, ShapeError> {
        let upper = *self
            .cdf
            .get(index)
            .ok_or_else(|| ShapeError::element_out_of_range(index, self.cdf.len()))?;
        let lower = if index == 0 { 0.0 } else { self.cdf[index - 1] };
        Ok(upper - lower)
    }

    /// Density of a uniformly sampled location with respect to point count,
    /// length or area.
    #[must_use]
    pub fn pdf(&self) -> f64 {
        1.0 / self.weight
    }
}

/// Raw per-element weights in input order.
///
/// Fails with [`ShapeError::IndexOutOfRange`] for vertex ids outside
/// `positions`.
pub fn element_weights(
    elements: Elements<'_>,
    positions: &[Vec3],
) -> Result<Vec<f64>, ShapeError> {
    elements.validate_indices(positions.len())?;
    let weights = match elements {
        Elements::Points(points) => vec![1.0; points.len()],
        Elements::Lines(lines) => lines
            .iter()
            .map(|&[a, b]| positions[a].distance(positions[b]))
            .collect(),
        Elements::Triangles(triangles) => triangles
            .iter()
            .map(|&[a, b, c]| triangle_area(positions[a], positions[b], positions[c]))
            .collect(),
    };
    Ok(weights)
}

/// Area of the triangle `(p0, p1, p2)`.
#[must_use]
pub fn triangle_area(p0: Vec3, p1: Vec3, p2: Vec3) -> f64 {
    (p1 - p0).cross(p2 - p0).length() / 2.0
}

/// Turns raw weights into a normalized CDF and returns it with the total.
///
/// Every weight must be finite and non-negative, and their sum positive;
/// otherwise [`ShapeError::DegenerateDistribution`] names the offending value.
pub fn normalize_cdf(mut weights: Vec<f64>) -> Result<(Vec<f64>, f64), ShapeError> {
    if weights.is_empty() {
        return Err(ShapeError::EmptyDistribution);
    }
    if let Some(&weight) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(ShapeError::DegenerateDistribution { weight });
    }
    for i in 1..weights.len() {
        weights[i] += weights[i - 1];
    }
    let total = weights[weights.len() - 1];
    if !total.is_finite() || total <= 0.0 {
        return Err(ShapeError::DegenerateDistribution { weight: total });
    }
    for w in &mut weights {
        *w /= total;
    }
    Ok((weights, total))
}

/// Serialized form of [`ShapeDistribution`], validated on the way in.
#[derive(Deserialize)]
struct StoredDistribution {
    kind: ElementKind,
    cdf: Vec<f64>,
    weight: f64,
}

impl TryFrom<StoredDistribution> for ShapeDistribution {
    type Error = ShapeError;

    fn try_from(stored: StoredDistribution) -> Result<Self, Self::Error> {
        let StoredDistribution { kind, cdf, weight } = stored;
        if cdf.is_empty() {
            return Err(ShapeError::EmptyDistribution);
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ShapeError::DegenerateDistribution { weight });
        }

        let mut previous = 0.0;
        for (index, &value) in cdf.iter().enumerate() {
            if !value.is_finite() || value < previous {
                return Err(ShapeError::MalformedCdf { index, value });
            }
            previous = value;
        }
        let last = cdf.len() - 1;
        if !Tolerance::LOOSE.within(cdf[last], 1.0, 1.0) {
            return Err(ShapeError::MalformedCdf {
                index: last,
                value: cdf[last],
            });
        }

        Ok(Self { kind, cdf, weight })
    }
}
