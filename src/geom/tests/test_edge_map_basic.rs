//! Tests for the canonical edge map.

use crate::geom::{EdgeMap, ShapeError, canonical_edge};

#[test]
fn test_canonical_edge_is_order_independent() {
    assert_eq!(canonical_edge(7, 2), [2, 7]);
    assert_eq!(canonical_edge(2, 7), [2, 7]);
    assert_eq!(canonical_edge(4, 4), [4, 4]);
}

#[test]
fn test_insert_is_idempotent() {
    let mut map = EdgeMap::new();
    let first = map.insert(3, 1);
    let again = map.insert(1, 3);
    let third = map.insert(3, 1);

    assert_eq!(first, 0);
    assert_eq!(again, first);
    assert_eq!(third, first);
    assert_eq!(map.len(), 1);
    assert_eq!(map.edges(), &[[1, 3]]);
    assert!(map.contains(1, 3) && map.contains(3, 1));
    assert_eq!(map.lookup(1, 3), Ok(first));
}

#[test]
fn test_from_elements_inserts_lines_before_triangles() {
    let lines = [[5, 4]];
    let triangles = [[0, 1, 2], [2, 1, 3]];
    let map = EdgeMap::from_elements(&lines, &triangles);

    assert_eq!(
        map.edges(),
        &[[4, 5], [0, 1], [1, 2], [0, 2], [1, 3], [2, 3]]
    );
    assert_eq!(map.lookup(2, 1), Ok(2));
    assert!(map.contains(3, 2));
    assert!(!map.contains(0, 3));
}

#[test]
fn test_iteration_is_in_id_order() {
    let map = EdgeMap::from_elements(&[], &[[0, 1, 2]]);
    let pairs: Vec<_> = map.iter().collect();
    assert_eq!(pairs, vec![([0, 1], 0), ([1, 2], 1), ([0, 2], 2)]);
}

#[test]
fn test_lookup_missing_edge() {
    let map = EdgeMap::from_elements(&[[0, 1]], &[]);
    assert_eq!(map.lookup(1, 2), Err(ShapeError::EdgeNotFound { a: 1, b: 2 }));
    assert!(EdgeMap::new().is_empty());
}
