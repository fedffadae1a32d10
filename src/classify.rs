// Copyright 2025 Lars Brubaker
// License: MIT
//
// Vertex classification for the monotone decomposition.

use tracing::debug;

use crate::geom::{above, orient2d, Real};
use crate::polygon::{Polygon, VertexKind};

/// Classify a vertex from its own position and those of its contour
/// neighbours, using sweep order for "above" and the interior angle sign for
/// convexity (contours are assumed to keep the interior on their left).
pub fn classify(p: [Real; 2], prev: [Real; 2], next: [Real; 2]) -> VertexKind {
    let p_above = |q: [Real; 2]| above(p[0], p[1], q[0], q[1]);
    let q_above = |q: [Real; 2]| above(q[0], q[1], p[0], p[1]);

    if p_above(next) && q_above(prev) {
        VertexKind::RegularDown
    } else if p_above(prev) && q_above(next) {
        VertexKind::RegularUp
    } else {
        let convex = orient2d(prev, p, next) > 0.0;
        if q_above(prev) && q_above(next) {
            if convex {
                VertexKind::End
            } else {
                VertexKind::Merge
            }
        } else if p_above(prev) && p_above(next) {
            if convex {
                VertexKind::Start
            } else {
                VertexKind::Split
            }
        } else {
            VertexKind::Unknown
        }
    }
}

/// Assign a kind to every point of the polygon.
pub fn classify_all(polygon: &mut Polygon) {
    let mut counts = [0usize; 8];
    for p in 0..polygon.point_count() as u32 {
        let kind = classify(
            polygon.xy(p),
            polygon.xy(polygon.prev(p)),
            polygon.xy(polygon.next(p)),
        );
        polygon.points[p as usize].kind = kind;
        counts[kind as usize] += 1;
    }
    debug!(
        start = counts[VertexKind::Start as usize],
        end = counts[VertexKind::End as usize],
        split = counts[VertexKind::Split as usize],
        merge = counts[VertexKind::Merge as usize],
        regular = counts[VertexKind::RegularUp as usize] + counts[VertexKind::RegularDown as usize],
        unknown = counts[VertexKind::Unknown as usize],
        "vertices classified"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convex_extremes() {
        // Top of a CCW triangle: both neighbours below, convex.
        assert_eq!(
            classify([1.0, 2.0], [2.0, 0.0], [0.0, 0.0]),
            VertexKind::Start
        );
        // Bottom of a CCW triangle.
        assert_eq!(
            classify([1.0, -2.0], [0.0, 0.0], [2.0, 0.0]),
            VertexKind::End
        );
    }

    #[test]
    fn reflex_extremes() {
        // A notch pointing down into the polygon from above: both neighbours
        // above, reflex.
        assert_eq!(
            classify([1.0, 0.0], [2.0, 1.0], [0.0, 1.0]),
            VertexKind::Merge
        );
        // A notch pointing up from below.
        assert_eq!(
            classify([1.0, 1.0], [0.0, 0.0], [2.0, 0.0]),
            VertexKind::Split
        );
    }

    #[test]
    fn regular_vertices() {
        // Left chain of a CCW polygon walks downwards.
        assert_eq!(
            classify([0.0, 1.0], [0.0, 2.0], [0.0, 0.0]),
            VertexKind::RegularDown
        );
        // Right chain walks upwards.
        assert_eq!(
            classify([4.0, 1.0], [4.0, 0.0], [4.0, 2.0]),
            VertexKind::RegularUp
        );
    }

    #[test]
    fn horizontal_neighbours_use_x_tiebreak() {
        // prev is left at the same height, so it counts as above.
        assert_eq!(
            classify([1.0, 0.0], [0.0, 0.0], [2.0, -1.0]),
            VertexKind::RegularDown
        );
    }

    #[test]
    fn coincident_neighbour_is_unknown() {
        assert_eq!(
            classify([1.0, 1.0], [1.0, 1.0], [2.0, 0.0]),
            VertexKind::Unknown
        );
    }

    #[test]
    fn classify_square() {
        let mut poly = Polygon::new();
        poly.add_contour(&[0.0, 4.0, 4.0, 0.0], &[0.0, 0.0, 4.0, 4.0], false)
            .unwrap();
        classify_all(&mut poly);
        let kinds: Vec<VertexKind> = poly.points.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                VertexKind::RegularDown,
                VertexKind::End,
                VertexKind::RegularUp,
                VertexKind::Start,
            ]
        );
    }
}
