// Copyright 2025 Lars Brubaker
// License: MIT
//
// Monotone decomposition sweep.
//
// Vertices are visited from the top of the polygon down. The edges that bound
// the interior on its left and cross the sweep line are kept in an
// OrderedEdgeSet; each carries a helper, the lowest visited vertex that can see
// it horizontally. Split and Merge vertices get a diagonal to a helper so that
// every resulting piece is y-monotone.
//
// The sweep only ever stores left-boundary edges: input edge i runs from
// point i to next(i), and is inserted at its upper end (Start, Split,
// RegularDown) and removed at its lower end (End, Merge, RegularDown).

use tracing::{debug, trace};

use crate::classify::classify_all;
use crate::dict::{OrderedEdgeSet, SweepKey};
use crate::error::{InputError, InvariantViolation, Result};
use crate::geom::{edge_x_at, sweep_leq, Real, SweepPoint};
use crate::polygon::{EdgeIdx, PointIdx, Polygon, VertexKind, INVALID};
use crate::priorityq::PriorityQ;

/// Classify every vertex of `polygon` and insert the diagonals that split it
/// into y-monotone pieces. Returns the ids of the new diagonals.
pub fn decompose(polygon: &mut Polygon) -> Result<Vec<EdgeIdx>> {
    classify_all(polygon);
    MonotoneDecomposer::new(polygon).run()
}

/// Sweep state for one polygon. Vertex kinds must already be assigned.
pub struct MonotoneDecomposer<'a> {
    polygon: &'a mut Polygon,
    active: OrderedEdgeSet,
    diagonals: Vec<EdgeIdx>,
}

impl<'a> MonotoneDecomposer<'a> {
    pub fn new(polygon: &'a mut Polygon) -> Self {
        MonotoneDecomposer {
            polygon,
            active: OrderedEdgeSet::new(),
            diagonals: Vec::new(),
        }
    }

    /// Process every vertex in sweep order.
    pub fn run(mut self) -> Result<Vec<EdgeIdx>> {
        let events: Vec<SweepPoint> = self
            .polygon
            .points
            .iter()
            .map(|p| SweepPoint::new(p.x, p.y, p.id))
            .collect();
        let mut queue = PriorityQ::from_keys(&events, sweep_leq);

        // The topmost vertex of a correctly wound simple polygon is convex
        // with both neighbours below it.
        if let Some(top) = queue.minimum() {
            let kind = self.polygon.kind(top.id);
            match kind {
                VertexKind::Start => {}
                VertexKind::Unknown | VertexKind::Input => {
                    return Err(InputError::UnclassifiedVertex { point: top.id }.into())
                }
                _ => return Err(InputError::NotSimple { point: top.id, kind }.into()),
            }
        }

        while let Some(event) = queue.extract_min() {
            self.sweep_event(event)?;
        }

        debug!(
            points = self.polygon.point_count(),
            diagonals = self.diagonals.len(),
            "monotone decomposition finished"
        );
        Ok(self.diagonals)
    }

    // ─────── Events ───────────────────────────────────────────────────────────

    fn sweep_event(&mut self, event: SweepPoint) -> Result<()> {
        let i = event.id;
        let kind = self.polygon.kind(i);
        trace!(point = i, ?kind, x = event.x, y = event.y, "sweep event");

        let polygon = &*self.polygon;
        self.active
            .retarget(event.y, |e, y| edge_key(polygon, e, y));

        match kind {
            VertexKind::Start => self.insert_edge(i, event.y),
            VertexKind::End => self.finish_edge(i, event.y),
            VertexKind::Split => {
                let left = self.left_edge(i, event.x)?;
                let helper = self.polygon.edge(left).helper;
                self.add_diagonal(i, helper);
                self.polygon.edge_mut(left).helper = i;
                self.insert_edge(i, event.y)
            }
            VertexKind::Merge => {
                self.finish_edge(i, event.y)?;
                self.update_left_helper(i, event.x)
            }
            VertexKind::RegularDown => {
                self.finish_edge(i, event.y)?;
                self.insert_edge(i, event.y)
            }
            VertexKind::RegularUp => self.update_left_helper(i, event.x),
            VertexKind::Unknown | VertexKind::Input => {
                Err(InputError::UnclassifiedVertex { point: i }.into())
            }
        }
    }

    // ─────── Edge bookkeeping ─────────────────────────────────────────────────

    /// Make the edge leaving `p` active with `p` as its helper.
    fn insert_edge(&mut self, p: PointIdx, y: Real) -> Result<()> {
        let e: EdgeIdx = p;
        self.polygon.edge_mut(e).helper = p;
        let x = edge_key(self.polygon, e, y);
        if !self.active.insert(e, x) {
            return Err(InvariantViolation::DuplicateActiveEdge { edge: e }.into());
        }
        Ok(())
    }

    /// Retire the edge arriving at `p`, connecting `p` to its helper first if
    /// that helper is a Merge vertex.
    fn finish_edge(&mut self, p: PointIdx, y: Real) -> Result<()> {
        let e: EdgeIdx = self.polygon.prev(p);
        let key = SweepKey::new(edge_key(self.polygon, e, y), e);
        if self.active.delete_by_key(key).is_none() {
            return Err(InvariantViolation::MissingActiveEdge { edge: e, point: p }.into());
        }
        let helper = self.polygon.edge(e).helper;
        self.connect_if_merge(p, helper);
        Ok(())
    }

    /// The vertex `p` becomes the helper of the edge directly to its left.
    fn update_left_helper(&mut self, p: PointIdx, x: Real) -> Result<()> {
        let left = self.left_edge(p, x)?;
        let helper = self.polygon.edge(left).helper;
        self.connect_if_merge(p, helper);
        self.polygon.edge_mut(left).helper = p;
        Ok(())
    }

    fn left_edge(&mut self, p: PointIdx, x: Real) -> Result<EdgeIdx> {
        self.active
            .find_greatest_less_than(x)
            .ok_or_else(|| InputError::NoEdgeLeftOf { point: p }.into())
    }

    fn connect_if_merge(&mut self, p: PointIdx, helper: PointIdx) {
        if helper != INVALID && self.polygon.kind(helper) == VertexKind::Merge {
            self.add_diagonal(p, helper);
        }
    }

    fn add_diagonal(&mut self, a: PointIdx, b: PointIdx) {
        let d = self.polygon.add_diagonal(a, b);
        trace!(diagonal = d, from = a, to = b, "diagonal inserted");
        self.diagonals.push(d);
    }
}

/// x-intercept of edge `e` at sweep height `y`.
fn edge_key(polygon: &Polygon, e: EdgeIdx, y: Real) -> Real {
    let edge = polygon.edge(e);
    let [ox, oy] = polygon.xy(edge.org);
    let [dx, dy] = polygon.xy(edge.dst);
    edge_x_at(ox, oy, dx, dy, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TriangulateError;

    fn polygon(xs: &[Real], ys: &[Real]) -> Polygon {
        let mut poly = Polygon::new();
        poly.add_contour(xs, ys, false).unwrap();
        poly
    }

    fn diagonal_ends(poly: &Polygon) -> Vec<(PointIdx, PointIdx)> {
        poly.diagonals()
            .map(|d| {
                let e = poly.edge(d);
                (e.org.min(e.dst), e.org.max(e.dst))
            })
            .collect()
    }

    #[test]
    fn convex_polygons_need_no_diagonals() {
        let mut tri = polygon(&[0.0, 2.0, 1.0], &[0.0, 0.0, 2.0]);
        assert!(decompose(&mut tri).unwrap().is_empty());

        let mut square = polygon(&[0.0, 4.0, 4.0, 0.0], &[0.0, 0.0, 4.0, 4.0]);
        assert!(decompose(&mut square).unwrap().is_empty());
    }

    #[test]
    fn split_vertex_connects_to_helper_above() {
        // A notch cut up into the bottom edge; its tip (2, 2) is a Split
        // vertex and the nearest visited vertex on the left edge's side is
        // the top-right corner.
        let mut poly = polygon(
            &[0.0, 1.0, 2.0, 3.0, 4.0, 4.0, 0.0],
            &[0.0, 0.0, 2.0, 0.0, 0.0, 4.0, 4.0],
        );
        let diagonals = decompose(&mut poly).unwrap();
        assert_eq!(diagonals.len(), 1);
        assert_eq!(poly.kind(2), VertexKind::Split);
        assert_eq!(diagonal_ends(&poly), vec![(2, 5)]);
    }

    #[test]
    fn merge_vertex_connects_to_next_vertex_below() {
        // A notch cut down into the top edge; its tip (2, 2) is a Merge
        // vertex, resolved when the sweep reaches the bottom-left corner.
        let mut poly = polygon(
            &[0.0, 4.0, 4.0, 3.0, 2.0, 1.0, 0.0],
            &[0.0, 0.0, 4.0, 4.0, 2.0, 4.0, 4.0],
        );
        let diagonals = decompose(&mut poly).unwrap();
        assert_eq!(diagonals.len(), 1);
        assert_eq!(poly.kind(4), VertexKind::Merge);
        assert_eq!(diagonal_ends(&poly), vec![(0, 4)]);
    }

    #[test]
    fn hole_gets_connected_from_above_and_below() {
        let mut poly = polygon(&[0.0, 4.0, 4.0, 0.0], &[0.0, 0.0, 4.0, 4.0]);
        poly.add_contour(&[1.0, 1.0, 3.0, 3.0], &[1.0, 3.0, 3.0, 1.0], false)
            .unwrap();
        let diagonals = decompose(&mut poly).unwrap();
        // The top of the hole is a Split vertex and its bottom a Merge vertex.
        assert_eq!(poly.kind(5), VertexKind::Split);
        assert_eq!(poly.kind(7), VertexKind::Merge);
        assert_eq!(diagonals.len(), 2);
    }

    #[test]
    fn clockwise_outer_contour_is_rejected() {
        let mut poly = polygon(&[0.0, 0.0, 4.0, 4.0], &[0.0, 4.0, 4.0, 0.0]);
        let err = decompose(&mut poly).unwrap_err();
        assert_eq!(
            err,
            TriangulateError::Input(InputError::NotSimple {
                point: 1,
                kind: VertexKind::Split,
            })
        );
        assert!(poly.diagonals().is_empty());
    }

    #[test]
    fn edge_keys_follow_the_sweep_line() {
        let poly = polygon(&[0.0, 4.0, 2.0], &[0.0, 0.0, 4.0]);
        // Edge 2 runs from (2, 4) down to (0, 0).
        assert_eq!(edge_key(&poly, 2, 4.0), 2.0);
        assert_eq!(edge_key(&poly, 2, 2.0), 1.0);
        // Edge 0 is horizontal and keys on its left end.
        assert_eq!(edge_key(&poly, 0, 0.0), 0.0);
    }
}
