//! Tests for attribute interpolation at element samples.

use crate::geom::{
    ElementKind, ElementSample, Elements, Shape, ShapeDistribution, ShapeError, Tolerance,
    Vec2, Vec3, interpolate_vert, interpolate_vert_with_tolerance, make_std_surface,
    StdSurface, StdSurfaceOptions,
};

fn attrs() -> Vec<Vec3> {
    vec![
        Vec3::new(0.1, 0.2, 0.3),
        Vec3::new(-4.0, 5.5, 1e-3),
        Vec3::new(7.25, -0.7, 9.0),
    ]
}

#[test]
fn test_triangle_corners_are_exact() {
    let values = attrs();
    let triangles = [[0, 1, 2]];
    let elements = Elements::Triangles(&triangles);

    let at = |u, v| interpolate_vert(elements, &values, &ElementSample::triangle(0, u, v)).unwrap();
    assert_eq!(at(0.0, 0.0), values[0]);
    assert_eq!(at(1.0, 0.0), values[1]);
    assert_eq!(at(0.0, 1.0), values[2]);
}

#[test]
fn test_triangle_centroid() {
    let values = vec![0.0, 3.0, 6.0];
    let triangles = [[0, 1, 2]];
    let third = 1.0 / 3.0;
    let mid = interpolate_vert(
        Elements::Triangles(&triangles),
        &values,
        &ElementSample::triangle(0, third, third),
    )
    .unwrap();
    assert!((mid - 3.0).abs() < 1e-12);
}

#[test]
fn test_line_uses_single_parameter() {
    let values = vec![Vec2::new(0.0, 10.0), Vec2::new(4.0, 20.0)];
    let lines = [[1, 0]];
    let elements = Elements::Lines(&lines);

    let at = |t| interpolate_vert(elements, &values, &ElementSample::line(0, t)).unwrap();
    assert_eq!(at(0.0), values[1]);
    assert_eq!(at(1.0), values[0]);
    assert_eq!(at(0.25), Vec2::new(3.0, 17.5));
}

#[test]
fn test_point_copies_value() {
    let values = vec![1.0, 2.0, 3.0];
    let points = [2, 0];
    let value =
        interpolate_vert(Elements::Points(&points), &values, &ElementSample::point(0)).unwrap();
    assert_eq!(value, 3.0);
}

#[test]
fn test_kind_mismatch() {
    let values = attrs();
    let triangles = [[0, 1, 2]];
    assert_eq!(
        interpolate_vert(
            Elements::Triangles(&triangles),
            &values,
            &ElementSample::line(0, 0.5)
        ),
        Err(ShapeError::ElementKindMismatch {
            expected: ElementKind::Triangle,
            found: ElementKind::Line
        })
    );
}

#[test]
fn test_out_of_range_indices() {
    let values = vec![1.0, 2.0];
    let lines = [[0, 1], [1, 2]];
    let elements = Elements::Lines(&lines);

    assert_eq!(
        interpolate_vert(elements, &values, &ElementSample::line(5, 0.5)),
        Err(ShapeError::IndexOutOfRange {
            what: "element",
            index: 5,
            len: 2
        })
    );
    assert_eq!(
        interpolate_vert(elements, &values, &ElementSample::line(1, 0.5)),
        Err(ShapeError::IndexOutOfRange {
            what: "vertex",
            index: 2,
            len: 2
        })
    );
}

#[test]
fn test_coordinate_domain() {
    let values = attrs();
    let triangles = [[0, 1, 2]];
    let elements = Elements::Triangles(&triangles);

    assert_eq!(
        interpolate_vert(elements, &values, &ElementSample::triangle(0, 0.7, 0.6)),
        Err(ShapeError::CoordinateOutOfRange {
            kind: ElementKind::Triangle,
            coord: [0.7, 0.6]
        })
    );
    assert!(interpolate_vert(elements, &values, &ElementSample::triangle(0, -0.5, 0.2)).is_err());

    // Rounding noise from the uniform remap is tolerated.
    let slightly_over = ElementSample::triangle(0, 0.5 + 1e-9, 0.5);
    assert!(interpolate_vert(elements, &values, &slightly_over).is_ok());
    assert!(
        interpolate_vert_with_tolerance(elements, &values, &slightly_over, Tolerance::new(0.0))
            .is_err()
    );
}

#[test]
fn test_eval_sample_on_sphere() {
    let shape = make_std_surface(StdSurface::UvSphere, StdSurfaceOptions::with_level(1)).unwrap();
    let dist = ShapeDistribution::new(shape.elements().unwrap(), &shape.positions).unwrap();

    for i in 0..16 {
        let ern = f64::from(i) / 16.0;
        let sample = dist.sample(ern, (0.3, 0.8)).unwrap();
        let point = shape.eval_sample(&sample).unwrap();

        // Chords of the unit sphere lie inside it.
        assert!(point.position.length() <= 1.0 + 1e-9);
        let normal = point.normal.unwrap();
        assert!((normal.length() - 1.0).abs() < 1e-9);
        let uv = point.texcoord.unwrap();
        assert!((0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y));
    }
}

#[test]
fn test_eval_sample_without_optional_attributes() {
    let shape = Shape::from_lines(vec![Vec3::ZERO, Vec3::X * 2.0], vec![[0, 1]]);
    let point = shape.eval_sample(&ElementSample::line(0, 0.5)).unwrap();
    assert_eq!(point.position, Vec3::X);
    assert!(point.normal.is_none());
    assert!(point.texcoord.is_none());
}
