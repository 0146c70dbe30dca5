mod core;
mod diagnostics;
mod distribution;
mod edge_map;
mod elements;
mod error;
mod interpolate;
mod metrics;
mod normals;
mod parametric;
mod sampling;
mod shape;
mod std_surface;
mod tessellation;

pub use self::core::{Tolerance, Transform, Vec2, Vec3};
pub use diagnostics::ShapeDiagnostics;
pub use distribution::{ShapeDistribution, element_weights, normalize_cdf, triangle_area};
pub use edge_map::{EdgeMap, canonical_edge};
pub use elements::{ElementKind, Elements};
pub use error::ShapeError;
pub use interpolate::{
    VertexAttribute, interpolate_line, interpolate_triangle, interpolate_vert,
    interpolate_vert_with_tolerance,
};
pub use metrics::{ShapeMetrics, ShapeTimingReport, TimingBucket};
pub use normals::compute_normals;
pub use parametric::{
    ParametricLines, ParametricPoints, UvSurface, make_lines, make_points, make_uv_surface,
};
pub use sampling::{
    ElementCoord, ElementSample, sample_cdf, sample_lines, sample_many, sample_points,
    sample_shape_cdfs, sample_triangles, uniform_triangle_uv,
};
pub use shape::{Shape, ShapeContext, SurfacePoint};
pub use std_surface::{
    MAX_STD_SURFACE_LEVEL, StdSurface, StdSurfaceOptions, make_std_surface,
    make_std_surface_with_context,
};
pub use tessellation::{
    SplitEdges, TessellationOptions, split_edges, split_edges_with_map, tessellate_shape,
    tessellate_shape_with_context, tessellate_shape_with_options,
};

#[cfg(test)]
mod tests;
