//! Edge-based 1-to-2 line and 1-to-4 triangle subdivision.
//!
//! Every unique undirected edge gets exactly one midpoint vertex. Midpoints
//! are numbered after the original vertices: the midpoint of the edge with
//! id `e` is vertex `n + e`, so the new ids are exactly `[n, n + edges)`.

use super::diagnostics::ShapeDiagnostics;
use super::edge_map::EdgeMap;
use super::elements::check_vertex_ids;
use super::error::ShapeError;
use super::interpolate::VertexAttribute;
use super::metrics::TimingBucket;
use super::shape::{Shape, ShapeContext};
use super::Vec3;

/// Split topology produced by [`split_edges`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitEdges {
    /// Two child lines per input line.
    pub lines: Vec<[usize; 2]>,
    /// Three corner triangles followed by the center triangle, per input triangle.
    pub triangles: Vec<[usize; 3]>,
    /// Canonical endpoints of each split edge, indexed by edge id.
    pub edges: Vec<[usize; 2]>,
}

impl SplitEdges {
    /// Vertex count after materializing one midpoint per edge.
    #[must_use]
    pub fn vertex_count(&self, original: usize) -> usize {
        original + self.edges.len()
    }
}

/// Options for [`tessellate_shape_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TessellationOptions {
    /// Number of subdivision passes; each pass doubles edge resolution.
    pub levels: usize,
    /// Re-normalize normals after averaging.
    pub renormalize_normals: bool,
}

impl Default for TessellationOptions {
    fn default() -> Self {
        Self {
            levels: 1,
            renormalize_normals: true,
        }
    }
}

impl TessellationOptions {
    #[must_use]
    pub fn with_levels(levels: usize) -> Self {
        Self {
            levels,
            ..Default::default()
        }
    }
}

/// Splits every line and triangle along its edges.
///
/// Vertex ids must be below `vertex_count`.
pub fn split_edges(
    vertex_count: usize,
    lines: &[[usize; 2]],
    triangles: &[[usize; 3]],
) -> Result<SplitEdges, ShapeError> {
    check_vertex_ids(lines.iter().flatten().copied(), vertex_count)?;
    check_vertex_ids(triangles.iter().flatten().copied(), vertex_count)?;
    let map = EdgeMap::from_elements(lines, triangles);
    split_edges_with_map(vertex_count, lines, triangles, &map)
}

/// Like [`split_edges`] but reuses a caller-built edge map.
///
/// Given the map [`EdgeMap::from_elements`] would build for the same
/// elements, the output is identical to [`split_edges`]. Any element edge
/// missing from `map` fails with [`ShapeError::EdgeNotFound`].
pub fn split_edges_with_map(
    vertex_count: usize,
    lines: &[[usize; 2]],
    triangles: &[[usize; 3]],
    map: &EdgeMap,
) -> Result<SplitEdges, ShapeError> {
    let n = vertex_count;
    let midpoint = |a: usize, b: usize| map.lookup(a, b).map(|id| n + id);

    let mut tess_lines = Vec::with_capacity(lines.len() * 2);
    for &[a, b] in lines {
        let m = midpoint(a, b)?;
        tess_lines.push([a, m]);
        tess_lines.push([m, b]);
    }

    let mut tess_triangles = Vec::with_capacity(triangles.len() * 4);
    for t in triangles {
        for i in 0..3 {
            tess_triangles.push([
                t[i],
                midpoint(t[i], t[(i + 1) % 3])?,
                midpoint(t[i], t[(i + 2) % 3])?,
            ]);
        }
        tess_triangles.push([
            midpoint(t[0], t[1])?,
            midpoint(t[1], t[2])?,
            midpoint(t[2], t[0])?,
        ]);
    }

    Ok(SplitEdges {
        lines: tess_lines,
        triangles: tess_triangles,
        edges: map.edges().to_vec(),
    })
}

/// Splits the shape once and grows every in-use attribute in place.
pub fn tessellate_shape(shape: &mut Shape) -> Result<ShapeDiagnostics, ShapeError> {
    tessellate_shape_with_options(shape, TessellationOptions::default())
}

pub fn tessellate_shape_with_options(
    shape: &mut Shape,
    options: TessellationOptions,
) -> Result<ShapeDiagnostics, ShapeError> {
    let mut ctx = ShapeContext::new();
    tessellate_shape_with_context(shape, options, &mut ctx)
}

/// Applies `options.levels` subdivision passes.
///
/// Each pass replaces lines and triangles with their children, appends one
/// vertex per split edge whose attributes average the edge endpoints, and
/// (optionally) re-normalizes all normals. Points and empty attribute arrays
/// are left untouched. The shape is validated before the first pass and is
/// not modified if validation fails.
pub fn tessellate_shape_with_context(
    shape: &mut Shape,
    options: TessellationOptions,
    ctx: &mut ShapeContext,
) -> Result<ShapeDiagnostics, ShapeError> {
    ctx.metrics.begin();
    shape.validate()?;

    let mut diagnostics = ShapeDiagnostics::new();
    fill_counts(&mut diagnostics, shape);
    for _ in 0..options.levels {
        let pass = tessellate_pass(shape, options, ctx)?;
        diagnostics.absorb_pass(&pass);
    }
    diagnostics.timing = ctx.metrics.end();

    log::debug!("tessellated shape: {}", diagnostics.summary());
    Ok(diagnostics)
}

fn tessellate_pass(
    shape: &mut Shape,
    options: TessellationOptions,
    ctx: &mut ShapeContext,
) -> Result<ShapeDiagnostics, ShapeError> {
    let n = shape.vertex_count();
    let mut diagnostics = ShapeDiagnostics::new();
    diagnostics.levels = 1;
    diagnostics.degenerate_triangle_count = count_degenerate_triangles(shape);
    if diagnostics.degenerate_triangle_count > 0 {
        log::warn!(
            "tessellating {} zero-area triangles",
            diagnostics.degenerate_triangle_count
        );
    }

    let map = ctx.metrics.time(TimingBucket::EdgeMap, || {
        EdgeMap::from_elements(&shape.lines, &shape.triangles)
    });
    let split = ctx.metrics.time(TimingBucket::Tessellation, || {
        split_edges_with_map(n, &shape.lines, &shape.triangles, &map)
    })?;

    shape.lines = split.lines;
    shape.triangles = split.triangles;
    let edges = split.edges;

    grow_midpoints(&mut shape.positions, &edges);
    grow_midpoints(&mut shape.normals, &edges);
    grow_midpoints(&mut shape.texcoords, &edges);
    grow_midpoints(&mut shape.colors, &edges);
    grow_midpoints(&mut shape.radius, &edges);

    if options.renormalize_normals {
        diagnostics.zero_normal_count = ctx
            .metrics
            .time(TimingBucket::Normals, || renormalize(&mut shape.normals));
        if diagnostics.zero_normal_count > 0 {
            diagnostics.add_warning(format!(
                "{} normals collapsed to zero after averaging",
                diagnostics.zero_normal_count
            ));
        }
    }

    diagnostics.split_edge_count = edges.len();
    fill_counts(&mut diagnostics, shape);
    log::debug!(
        "tessellation pass: {} vertices -> {} ({} edges split)",
        n,
        diagnostics.vertex_count,
        edges.len()
    );
    Ok(diagnostics)
}

/// Appends one averaged value per edge to a non-empty attribute array.
fn grow_midpoints<T: VertexAttribute>(values: &mut Vec<T>, edges: &[[usize; 2]]) {
    if values.is_empty() {
        return;
    }
    values.reserve(edges.len());
    for &[a, b] in edges {
        let mid = (values[a] + values[b]) * 0.5;
        values.push(mid);
    }
}

fn renormalize(normals: &mut [Vec3]) -> usize {
    let mut zero = 0;
    for n in normals.iter_mut() {
        match n.normalized() {
            Some(unit) => *n = unit,
            None => {
                *n = Vec3::ZERO;
                zero += 1;
            }
        }
    }
    zero
}

fn count_degenerate_triangles(shape: &Shape) -> usize {
    if shape.positions.is_empty() {
        return 0;
    }
    shape
        .triangles
        .iter()
        .filter(|t| {
            let p0 = shape.positions[t[0]];
            let e1 = shape.positions[t[1]] - p0;
            let e2 = shape.positions[t[2]] - p0;
            e1.cross(e2).length_squared() == 0.0
        })
        .count()
}

fn fill_counts(diagnostics: &mut ShapeDiagnostics, shape: &Shape) {
    diagnostics.vertex_count = shape.vertex_count();
    diagnostics.point_count = shape.points.len();
    diagnostics.line_count = shape.lines.len();
    diagnostics.triangle_count = shape.triangles.len();
}
