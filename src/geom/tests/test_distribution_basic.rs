//! Tests for element-weighted distributions.

use crate::geom::{
    ElementKind, Elements, ShapeDistribution, ShapeError, Vec3, element_weights, normalize_cdf,
};

const EPS: f64 = 1e-12;

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < EPS, "{actual:?} != {expected:?}");
    }
}

#[test]
fn test_point_distribution_is_uniform() {
    let positions = vec![Vec3::ZERO; 4];
    let points = [0, 1, 2, 3];
    let dist = ShapeDistribution::new(Elements::Points(&points), &positions).unwrap();

    assert_eq!(dist.kind(), ElementKind::Point);
    assert_close(dist.cdf(), &[0.25, 0.5, 0.75, 1.0]);
    assert_eq!(dist.weight(), 4.0);
    assert!((dist.pdf() - 0.25).abs() < EPS);
}

#[test]
fn test_line_distribution_weights_by_length() {
    let positions = vec![Vec3::ZERO, Vec3::X, Vec3::X * 3.0];
    let lines = [[0, 1], [1, 2]];
    let dist = ShapeDistribution::new(Elements::Lines(&lines), &positions).unwrap();

    assert_close(dist.cdf(), &[1.0 / 3.0, 1.0]);
    assert!((dist.weight() - 3.0).abs() < EPS);
    assert!((dist.element_probability(1).unwrap() - 2.0 / 3.0).abs() < EPS);
}

#[test]
fn test_triangle_distribution_weights_by_area() {
    let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::X * 3.0];
    let triangles = [[0, 1, 2], [0, 3, 2]];
    let dist = ShapeDistribution::new(Elements::Triangles(&triangles), &positions).unwrap();

    assert_close(dist.cdf(), &[0.25, 1.0]);
    assert!((dist.weight() - 2.0).abs() < EPS);
    assert!((dist.element_probability(0).unwrap() - 0.25).abs() < EPS);
    assert_eq!(dist.len(), 2);
    assert!(!dist.is_empty());
}

#[test]
fn test_cdf_is_monotone_and_ends_at_one() {
    let positions: Vec<Vec3> = (0..20)
        .map(|i| Vec3::new(f64::from(i) * 0.37, f64::from(i * i) * 0.01, 0.0))
        .collect();
    let lines: Vec<[usize; 2]> = (0..19).map(|i| [i, i + 1]).collect();
    let dist = ShapeDistribution::new(Elements::Lines(&lines), &positions).unwrap();

    assert!(dist.cdf().windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*dist.cdf().last().unwrap(), 1.0);
}

#[test]
fn test_zero_weight_elements_keep_cdf_flat() {
    let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
    let lines = [[0, 1], [2, 2], [0, 2]];
    let dist = ShapeDistribution::new(Elements::Lines(&lines), &positions).unwrap();

    assert_close(dist.cdf(), &[0.5, 0.5, 1.0]);
    assert_eq!(dist.element_probability(1).unwrap(), 0.0);
}

#[test]
fn test_empty_and_degenerate_inputs() {
    let positions = vec![Vec3::ZERO, Vec3::X];
    assert_eq!(
        ShapeDistribution::new(Elements::Lines(&[]), &positions),
        Err(ShapeError::EmptyDistribution)
    );
    assert_eq!(
        ShapeDistribution::new(Elements::Lines(&[[0, 0], [1, 1]]), &positions),
        Err(ShapeError::DegenerateDistribution { weight: 0.0 })
    );
    assert_eq!(
        ShapeDistribution::from_arrays(&[], &[], &[], &positions),
        Err(ShapeError::InvalidElementSelection { populated: 0 })
    );
    assert_eq!(
        ShapeDistribution::from_arrays(&[0], &[[0, 1]], &[], &positions),
        Err(ShapeError::InvalidElementSelection { populated: 2 })
    );
}

#[test]
fn test_out_of_range_vertex() {
    let positions = vec![Vec3::ZERO, Vec3::X];
    assert_eq!(
        ShapeDistribution::new(Elements::Points(&[0, 5]), &positions),
        Err(ShapeError::IndexOutOfRange {
            what: "vertex",
            index: 5,
            len: 2
        })
    );
}

#[test]
fn test_element_probability_out_of_range() {
    let positions = vec![Vec3::ZERO];
    let dist = ShapeDistribution::new(Elements::Points(&[0]), &positions).unwrap();
    assert_eq!(dist.element_probability(0), Ok(1.0));
    assert!(matches!(
        dist.element_probability(1),
        Err(ShapeError::IndexOutOfRange { what: "element", .. })
    ));
}

#[test]
fn test_element_weights_rejects_unknown_vertex() {
    let positions = vec![Vec3::ZERO, Vec3::X];
    assert_eq!(
        element_weights(Elements::Lines(&[[0, 1], [1, 7]]), &positions),
        Err(ShapeError::IndexOutOfRange {
            what: "vertex",
            index: 7,
            len: 2
        })
    );
    assert!(element_weights(Elements::Triangles(&[[0, 1, 2]]), &positions).is_err());
    assert_eq!(
        element_weights(Elements::Lines(&[[0, 1]]), &positions),
        Ok(vec![1.0])
    );
}

#[test]
fn test_normalize_cdf_rejects_bad_weights() {
    assert_eq!(
        normalize_cdf(vec![1.0, -0.5, 1.0]),
        Err(ShapeError::DegenerateDistribution { weight: -0.5 })
    );
    assert_eq!(
        normalize_cdf(vec![1.0, f64::INFINITY]),
        Err(ShapeError::DegenerateDistribution {
            weight: f64::INFINITY
        })
    );
    assert!(matches!(
        normalize_cdf(vec![f64::NAN, 1.0]),
        Err(ShapeError::DegenerateDistribution { weight }) if weight.is_nan()
    ));
    assert_eq!(normalize_cdf(vec![]), Err(ShapeError::EmptyDistribution));

    let (cdf, total) = normalize_cdf(vec![1.0, 0.0, 3.0]).unwrap();
    assert_close(&cdf, &[0.25, 0.25, 1.0]);
    assert_eq!(total, 4.0);
}

#[test]
fn test_serde_round_trip() {
    let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::X * 3.0];
    let triangles = [[0, 1, 2], [0, 3, 2]];
    let dist = ShapeDistribution::new(Elements::Triangles(&triangles), &positions).unwrap();

    let json = serde_json::to_string(&dist).unwrap();
    let back: ShapeDistribution = serde_json::from_str(&json).unwrap();
    assert_eq!(back, dist);
}

#[test]
fn test_deserialize_rejects_broken_distributions() {
    let rejected = [
        r#"{"kind":"Triangle","cdf":[],"weight":0.0}"#,
        r#"{"kind":"Line","cdf":[0.5,1.0],"weight":0.0}"#,
        r#"{"kind":"Line","cdf":[0.5,1.0],"weight":-2.0}"#,
        r#"{"kind":"Line","cdf":[0.9,0.2],"weight":1.0}"#,
        r#"{"kind":"Line","cdf":[-0.1,1.0],"weight":1.0}"#,
        r#"{"kind":"Point","cdf":[0.25,0.5],"weight":2.0}"#,
        r#"{"kind":"Point","cdf":[0.5,1.5],"weight":2.0}"#,
    ];
    for json in rejected {
        assert!(
            serde_json::from_str::<ShapeDistribution>(json).is_err(),
            "accepted {json}"
        );
    }

    let accepted: ShapeDistribution =
        serde_json::from_str(r#"{"kind":"Point","cdf":[0.5,1.0],"weight":2.0}"#).unwrap();
    assert_eq!(accepted.kind(), ElementKind::Point);
    assert_eq!(accepted.element_probability(1), Ok(0.5));
}
