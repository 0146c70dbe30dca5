//! Opt-in timing hooks for the shape routines.
//!
//! Timing is only collected when the `shape_metrics` feature is enabled and the
//! target is not WASM. Otherwise every call compiles down to running the
//! closure.
//!
//! # Usage
//!
//! ```ignore
//! use ghx_shape::geom::{ShapeMetrics, TimingBucket};
//!
//! let mut metrics = ShapeMetrics::default();
//! metrics.begin();
//! let map = metrics.time(TimingBucket::EdgeMap, || EdgeMap::from_elements(&lines, &triangles));
//! if let Some(report) = metrics.end() {
//!     println!("edge map: {} ns", report.edge_map_ns);
//! }
//! ```

/// Categories for timing shape operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingBucket {
    /// Edge dictionary construction.
    EdgeMap,
    /// Element splitting and attribute growth.
    Tessellation,
    /// Per-element weights and CDF normalization.
    Distribution,
    /// Normal accumulation and re-normalization.
    Normals,
    /// Parametric shape generation.
    Generation,
}

/// Cumulative nanoseconds per bucket.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShapeTimingReport {
    pub edge_map_ns: u64,
    pub tessellation_ns: u64,
    pub distribution_ns: u64,
    pub normals_ns: u64,
    pub generation_ns: u64,
}

impl ShapeTimingReport {
    /// Returns the total time across all buckets in nanoseconds.
    #[must_use]
    pub fn total_ns(&self) -> u64 {
        self.edge_map_ns
            .saturating_add(self.tessellation_ns)
            .saturating_add(self.distribution_ns)
            .saturating_add(self.normals_ns)
            .saturating_add(self.generation_ns)
    }

    /// Returns the total time in milliseconds (for display purposes).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_ms(&self) -> f64 {
        self.total_ns() as f64 / 1_000_000.0
    }
}

/// Accumulator for timing shape operations.
///
/// When the `shape_metrics` feature is disabled (or on WASM), all methods are
/// no-ops and [`end`](Self::end) returns `None`.
#[derive(Debug, Default)]
pub struct ShapeMetrics {
    #[cfg(all(feature = "shape_metrics", not(target_arch = "wasm32")))]
    report: ShapeTimingReport,
}

impl ShapeMetrics {
    /// Resets all timing counters to zero.
    pub fn begin(&mut self) {
        #[cfg(all(feature = "shape_metrics", not(target_arch = "wasm32")))]
        {
            self.report = ShapeTimingReport::default();
        }
    }

    /// Returns the accumulated timing report, or `None` if metrics are disabled.
    #[must_use]
    pub fn end(&self) -> Option<ShapeTimingReport> {
        #[cfg(all(feature = "shape_metrics", not(target_arch = "wasm32")))]
        {
            Some(self.report.clone())
        }
        #[cfg(not(all(feature = "shape_metrics", not(target_arch = "wasm32"))))]
        {
            None
        }
    }

    /// Times the execution of `f` and accumulates the elapsed time in `bucket`.
    pub fn time<R>(&mut self, bucket: TimingBucket, f: impl FnOnce() -> R) -> R {
        #[cfg(all(feature = "shape_metrics", not(target_arch = "wasm32")))]
        {
            let start = std::time::Instant::now();
            let result = f();
            let nanos = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);
            self.add_to_bucket(bucket, nanos);
            result
        }

        #[cfg(not(all(feature = "shape_metrics", not(target_arch = "wasm32"))))]
        {
            let _ = bucket;
            f()
        }
    }

    #[cfg(all(feature = "shape_metrics", not(target_arch = "wasm32")))]
    fn add_to_bucket(&mut self, bucket: TimingBucket, nanos: u64) {
        let slot = match bucket {
            TimingBucket::EdgeMap => &mut self.report.edge_map_ns,
            TimingBucket::Tessellation => &mut self.report.tessellation_ns,
            TimingBucket::Distribution => &mut self.report.distribution_ns,
            TimingBucket::Normals => &mut self.report.normals_ns,
            TimingBucket::Generation => &mut self.report.generation_ns,
        };
        *slot = slot.saturating_add(nanos);
    }
}
