//! Diagnostics for shape refinement.
//!
//! Tessellation never repairs its input, but it does notice a few things a
//! caller usually wants to know about: degenerate (zero-area) triangles that
//! will receive no samples, and normals that collapsed to zero while being
//! re-normalized after averaging.
//!
//! # Example
//!
//! ```ignore
//! use ghx_shape::geom::{tessellate_shape, Shape};
//!
//! let diagnostics = tessellate_shape(&mut shape)?;
//! if !diagnostics.is_clean() {
//!     log::warn!("{}", diagnostics.summary());
//! }
//! ```

use std::fmt;

use super::metrics::ShapeTimingReport;

/// Counts and warnings collected while refining a shape.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ShapeDiagnostics {
    /// Total number of vertices after the operation.
    pub vertex_count: usize,

    /// Number of point elements after the operation.
    pub point_count: usize,

    /// Number of line elements after the operation.
    pub line_count: usize,

    /// Number of triangle elements after the operation.
    pub triangle_count: usize,

    /// Number of tessellation passes applied.
    pub levels: usize,

    /// Number of edges split (equal to the number of new vertices), summed
    /// over all passes.
    pub split_edge_count: usize,

    /// Number of zero-area input triangles seen, summed over all passes.
    ///
    /// Degenerate triangles are kept; they simply carry no sampling weight.
    pub degenerate_triangle_count: usize,

    /// Number of normals that could not be re-normalized and were set to zero.
    pub zero_normal_count: usize,

    /// Optional timing breakdown, populated with the `shape_metrics` feature.
    pub timing: Option<ShapeTimingReport>,

    /// Human-readable warnings.
    pub warnings: Vec<String>,
}

impl ShapeDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no degenerate input or collapsed normals were seen.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.degenerate_triangle_count == 0
            && self.zero_normal_count == 0
            && self.warnings.is_empty()
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Folds the diagnostics of a later pass into this one.
    ///
    /// Element and vertex counts describe the final state and are taken from
    /// `next`; per-pass counters are summed and warnings appended.
    pub fn absorb_pass(&mut self, next: &ShapeDiagnostics) {
        self.vertex_count = next.vertex_count;
        self.point_count = next.point_count;
        self.line_count = next.line_count;
        self.triangle_count = next.triangle_count;
        self.levels += next.levels;
        self.split_edge_count += next.split_edge_count;
        self.degenerate_triangle_count += next.degenerate_triangle_count;
        self.zero_normal_count += next.zero_normal_count;
        self.warnings.extend(next.warnings.iter().cloned());
    }

    /// Returns a short summary string suitable for logging.
    ///
    /// Format: `"V:{vertices} L:{lines} T:{triangles} [issues...]"`
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![format!(
            "V:{} L:{} T:{}",
            self.vertex_count, self.line_count, self.triangle_count
        )];

        if self.point_count > 0 {
            parts.push(format!("P:{}", self.point_count));
        }
        if self.split_edge_count > 0 {
            parts.push(format!("split:{}", self.split_edge_count));
        }
        if self.degenerate_triangle_count > 0 {
            parts.push(format!("degenerate:{}", self.degenerate_triangle_count));
        }
        if self.zero_normal_count > 0 {
            parts.push(format!("zero-normals:{}", self.zero_normal_count));
        }

        parts.join(" ")
    }
}

impl fmt::Display for ShapeDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shape Diagnostics:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Points: {}", self.point_count)?;
        writeln!(f, "  Lines: {}", self.line_count)?;
        writeln!(f, "  Triangles: {}", self.triangle_count)?;
        writeln!(f, "  Levels: {} ({} edges split)", self.levels, self.split_edge_count)?;

        if self.degenerate_triangle_count > 0 {
            writeln!(f, "  Degenerate triangles: {}", self.degenerate_triangle_count)?;
        }
        if self.zero_normal_count > 0 {
            writeln!(f, "  Zero normals: {}", self.zero_normal_count)?;
        }

        if !self.warnings.is_empty() {
            writeln!(f, "  Warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "    - {warning}")?;
            }
        }

        if let Some(ref timing) = self.timing {
            writeln!(f, "  Timing: {} ms total", timing.total_ms())?;
        }

        let status = if self.is_clean() { "CLEAN" } else { "ISSUES DETECTED" };
        writeln!(f, "  Status: {status}")?;

        Ok(())
    }
}
