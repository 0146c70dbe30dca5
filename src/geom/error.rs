use super::elements::ElementKind;

/// Contract violations reported by the shape routines.
///
/// None of these are transient: they indicate malformed input topology,
/// mismatched buffers or out-of-domain random draws, and callers are expected
/// to fix the input rather than retry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    #[error("exactly one of points/lines/triangles must be non-empty ({populated} populated)")]
    InvalidElementSelection { populated: usize },
    #[error("edge ({a}, {b}) is not present in the edge map")]
    EdgeNotFound { a: usize, b: usize },
    #[error("cannot build a distribution from zero elements")]
    EmptyDistribution,
    #[error("distribution weight {weight} cannot be normalized")]
    DegenerateDistribution { weight: f64 },
    #[error("cdf entry {index} ({value}) breaks the non-decreasing [0, 1] sequence")]
    MalformedCdf { index: usize, value: f64 },
    #[error("{what} index {index} is out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
    #[error("attribute `{attribute}` has {len} entries, expected {expected}")]
    AttributeLengthMismatch {
        attribute: &'static str,
        len: usize,
        expected: usize,
    },
    #[error("random draw {value} is outside [0, 1]")]
    DrawOutOfRange { value: f64 },
    #[error("sample for a {found} cannot be evaluated on {expected} elements")]
    ElementKindMismatch {
        expected: ElementKind,
        found: ElementKind,
    },
    #[error("{kind} coordinate {coord:?} is outside its domain")]
    CoordinateOutOfRange { kind: ElementKind, coord: [f64; 2] },
    #[error("surface level {level} exceeds the maximum of {max}")]
    LevelOutOfRange { level: u32, max: u32 },
}

impl ShapeError {
    pub(crate) fn vertex_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            what: "vertex",
            index,
            len,
        }
    }

    pub(crate) fn element_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            what: "element",
            index,
            len,
        }
    }
}
