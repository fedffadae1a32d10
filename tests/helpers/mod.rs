// Copyright 2025 Lars Brubaker
// Shared test utilities for monotri tests.

#![allow(dead_code)]

use std::collections::HashMap;

use monotri::{PolygonTriangulator, Triangulation};

/// Install a subscriber once so `RUST_LOG=monotri=trace` shows the sweep.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Parse the `.dat` format: one vertex per line as `x y` or `x, y`.
/// Blank lines separate contours. Returns a Vec of contours, each a flat
/// `[x0, y0, x1, y1, ...]` array.
pub fn parse_contours(data: &str) -> Vec<Vec<f64>> {
    let mut contours: Vec<Vec<f64>> = Vec::new();
    let mut current: Vec<f64> = Vec::new();

    for line in data.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            continue;
        }
        if trimmed.is_empty() {
            if !current.is_empty() {
                contours.push(std::mem::take(&mut current));
            }
            continue;
        }
        let floats: Vec<f64> = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse::<f64>().ok())
            .collect();
        current.extend(floats);
    }
    if !current.is_empty() {
        contours.push(current);
    }
    contours
}

/// Signed area of a triangle given 3 vertices.
pub fn triangle_area(x0: f64, y0: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    0.5 * ((x1 - x0) * (y2 - y0) - (x2 - x0) * (y1 - y0))
}

/// Compute the signed area of a simple polygon given as flat [x0,y0,x1,y1,...].
pub fn polygon_signed_area(verts: &[f64]) -> f64 {
    let n = verts.len() / 2;
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += verts[i * 2] * verts[j * 2 + 1];
        area -= verts[j * 2] * verts[i * 2 + 1];
    }
    area * 0.5
}

/// Sum of outer area minus hole areas, independent of the input winding.
pub fn expected_area(contours: &[Vec<f64>]) -> f64 {
    contours
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let a = polygon_signed_area(c).abs();
            if i == 0 {
                a
            } else {
                -a
            }
        })
        .sum()
}

/// Even-odd point-in-polygon test for a flat contour.
pub fn point_in_contour(verts: &[f64], x: f64, y: f64) -> bool {
    let n = verts.len() / 2;
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (verts[i * 2], verts[i * 2 + 1]);
        let (xj, yj) = (verts[j * 2], verts[j * 2 + 1]);
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Helper: triangulate flat contours, the first being the outer boundary.
pub fn triangulate_flat(contours: &[Vec<f64>], normalize: bool) -> Triangulation {
    init_tracing();
    let mut t = PolygonTriangulator::new();
    t.set_option(monotri::TriangulateOption::NormalizeWinding, normalize);
    for contour in contours {
        t.add_contour_flat(contour).expect("contour rejected");
    }
    match t.triangulate() {
        Ok(result) => result,
        Err(e) => panic!("triangulation failed: {e}"),
    }
}

/// Number of triangles a polygon with `points` vertices and `holes` holes
/// must produce.
pub fn expected_triangle_count(points: usize, holes: usize) -> usize {
    points - 2 + 2 * holes
}

/// Verify that all output is valid: indices in range, vertices finite, no
/// repeated vertex inside a triangle.
pub fn verify_valid_output(result: &Triangulation) {
    let verts = result.vertices();
    let vert_count = result.vertex_count();

    for (i, &v) in verts.iter().enumerate() {
        assert!(v.is_finite(), "vertex component [{i}] = {v} is not finite");
    }

    for (i, t) in result.triangles().iter().enumerate() {
        let [a, b, c] = t.vertices;
        assert!(
            (c as usize) < vert_count,
            "triangle {i} = {:?} out of range (vertex_count={vert_count})",
            t.vertices
        );
        assert!(a < b && b < c, "triangle {i} = {:?} is not sorted", t.vertices);
    }
}

/// Verify no degenerate (zero-area) triangles in output.
pub fn verify_no_degenerate_triangles(result: &Triangulation) {
    for (i, t) in result.triangles().iter().enumerate() {
        let area = result.triangle_area(t);
        assert!(
            area > 0.0,
            "triangle {i} {:?} is degenerate (area={area})",
            t.vertices
        );
    }
}

/// How many triangles use each undirected edge.
pub fn edge_multiplicity(result: &Triangulation) -> HashMap<(u32, u32), usize> {
    let mut counts = HashMap::new();
    for t in result.triangles() {
        let [a, b, c] = t.vertices;
        for e in [(a, b), (b, c), (a, c)] {
            *counts.entry(e).or_insert(0) += 1;
        }
    }
    counts
}

/// Every contour edge is used by exactly one triangle and every other edge
/// by exactly two.
pub fn verify_edge_coverage(result: &Triangulation, contour_sizes: &[usize]) {
    let mut counts = edge_multiplicity(result);
    let mut start = 0u32;
    for &n in contour_sizes {
        let n = n as u32;
        for k in 0..n {
            let a = start + k;
            let b = start + (k + 1) % n;
            let key = (a.min(b), a.max(b));
            assert_eq!(
                counts.remove(&key),
                Some(1),
                "boundary edge {key:?} should border exactly one triangle"
            );
        }
        start += n;
    }
    for (edge, count) in counts {
        assert_eq!(count, 2, "internal edge {edge:?} borders {count} triangles");
    }
}

/// The full set of checks for a polygon given as flat contours.
pub fn verify_triangulation(contours: &[Vec<f64>], result: &Triangulation) {
    let sizes: Vec<usize> = contours.iter().map(|c| c.len() / 2).collect();
    let points: usize = sizes.iter().sum();

    verify_valid_output(result);
    verify_no_degenerate_triangles(result);
    assert_eq!(
        result.triangles().len(),
        expected_triangle_count(points, contours.len() - 1)
    );
    verify_edge_coverage(result, &sizes);

    let expected = expected_area(contours);
    let area = result.total_area();
    assert!(
        (area - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "area {area} != polygon area {expected}"
    );
}
