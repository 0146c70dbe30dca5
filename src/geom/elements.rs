use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ShapeError;

/// The kind of primitive a shape element is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Point,
    Line,
    Triangle,
}

impl ElementKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Line => "line",
            Self::Triangle => "triangle",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed element array of a single kind.
///
/// Sampling and interpolation operate on exactly one primitive kind at a
/// time; carrying the kind in the variant makes mixing them unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elements<'a> {
    Points(&'a [usize]),
    Lines(&'a [[usize; 2]]),
    Triangles(&'a [[usize; 3]]),
}

impl<'a> Elements<'a> {
    /// Picks the single populated array out of a points/lines/triangles triple.
    ///
    /// Fails with [`ShapeError::InvalidElementSelection`] when none or more
    /// than one of the arrays is non-empty.
    pub fn from_arrays(
        points: &'a [usize],
        lines: &'a [[usize; 2]],
        triangles: &'a [[usize; 3]],
    ) -> Result<Self, ShapeError> {
        let populated = [!points.is_empty(), !lines.is_empty(), !triangles.is_empty()]
            .into_iter()
            .filter(|&p| p)
            .count();
        if populated != 1 {
            return Err(ShapeError::InvalidElementSelection { populated });
        }

        if !points.is_empty() {
            Ok(Self::Points(points))
        } else if !lines.is_empty() {
            Ok(Self::Lines(lines))
        } else {
            Ok(Self::Triangles(triangles))
        }
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Points(_) => ElementKind::Point,
            Self::Lines(_) => ElementKind::Line,
            Self::Triangles(_) => ElementKind::Triangle,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Points(points) => points.len(),
            Self::Lines(lines) => lines.len(),
            Self::Triangles(triangles) => triangles.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Vertex ids of element `index`, or `None` past the end.
    #[must_use]
    pub fn vertices(&self, index: usize) -> Option<&'a [usize]> {
        match *self {
            Self::Points(points) => points.get(index).map(std::slice::from_ref),
            Self::Lines(lines) => lines.get(index).map(<[usize; 2]>::as_slice),
            Self::Triangles(triangles) => triangles.get(index).map(<[usize; 3]>::as_slice),
        }
    }

    /// Checks that every referenced vertex id is below `vertex_count`.
    pub fn validate_indices(&self, vertex_count: usize) -> Result<(), ShapeError> {
        let ids: Box<dyn Iterator<Item = usize> + '_> = match *self {
            Self::Points(points) => Box::new(points.iter().copied()),
            Self::Lines(lines) => Box::new(lines.iter().flatten().copied()),
            Self::Triangles(triangles) => Box::new(triangles.iter().flatten().copied()),
        };
        check_vertex_ids(ids, vertex_count)
    }
}

pub(crate) fn check_vertex_ids(
    ids: impl IntoIterator<Item = usize>,
    vertex_count: usize,
) -> Result<(), ShapeError> {
    match ids.into_iter().find(|&id| id >= vertex_count) {
        Some(id) => Err(ShapeError::vertex_out_of_range(id, vertex_count)),
        None => Ok(()),
    }
}
