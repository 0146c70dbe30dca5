use super::elements::check_vertex_ids;
use super::error::ShapeError;
use super::Vec3;

/// Accumulates smoothed per-vertex normals, or tangents for lines.
///
/// Points contribute `+Z`, lines their direction and triangles their face
/// normal. With `weighted` the raw line vector and cross product are summed
/// (so longer lines and larger triangles dominate); otherwise each
/// contribution is normalized first. Vertices nobody references, or whose
/// contributions cancel, end up as zero vectors.
///
/// Unlike sampling calls, mixed element kinds are accepted here.
pub fn compute_normals(
    points: &[usize],
    lines: &[[usize; 2]],
    triangles: &[[usize; 3]],
    positions: &[Vec3],
    weighted: bool,
) -> Result<Vec<Vec3>, ShapeError> {
    let n = positions.len();
    check_vertex_ids(points.iter().copied(), n)?;
    check_vertex_ids(lines.iter().flatten().copied(), n)?;
    check_vertex_ids(triangles.iter().flatten().copied(), n)?;

    let contribution = |v: Vec3| if weighted { v } else { v.normalized_or_zero() };

    let mut normals = vec![Vec3::ZERO; n];
    for &p in points {
        normals[p] = normals[p] + Vec3::Z;
    }
    for &[a, b] in lines {
        let tangent = contribution(positions[b] - positions[a]);
        normals[a] = normals[a] + tangent;
        normals[b] = normals[b] + tangent;
    }
    for &[a, b, c] in triangles {
        let p0 = positions[a];
        let normal = contribution((positions[b] - p0).cross(positions[c] - p0));
        for id in [a, b, c] {
            normals[id] = normals[id] + normal;
        }
    }

    let mut zero = 0usize;
    for normal in &mut normals {
        match normal.normalized() {
            Some(unit) => *normal = unit,
            None => {
                *normal = Vec3::ZERO;
                zero += 1;
            }
        }
    }
    if zero > 0 {
        log::debug!("compute_normals: {zero} of {n} vertices have no usable normal");
    }
    Ok(normals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_triangle_faces_plus_z() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let normals = compute_normals(&[], &[], &[[0, 1, 2]], &positions, true).unwrap();
        assert_eq!(normals, vec![Vec3::Z; 3]);
    }

    #[test]
    fn unreferenced_vertex_stays_zero() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::new(5.0, 5.0, 5.0)];
        let normals = compute_normals(&[], &[[0, 1]], &[], &positions, false).unwrap();
        assert_eq!(normals[0], Vec3::X);
        assert_eq!(normals[1], Vec3::X);
        assert_eq!(normals[2], Vec3::ZERO);
    }

    #[test]
    fn rejects_out_of_range_ids() {
        let positions = vec![Vec3::ZERO; 2];
        assert!(matches!(
            compute_normals(&[3], &[], &[], &positions, true),
            Err(ShapeError::IndexOutOfRange { index: 3, .. })
        ));
    }
}
