// Copyright 2025 Lars Brubaker
// License: MIT
//
// Triangulation of a single y-monotone piece.
//
// The piece's vertices are merged top to bottom from its two chains. A vertex
// is on the left chain when it lies above its successor along the
// counter-clockwise boundary. A stack holds the vertices that still have
// unresolved visibility; a vertex on the opposite chain fans out to all of
// them, one on the same chain cuts off ears for as long as the cut stays
// inside the piece.

use crate::error::{InvariantViolation, Result};
use crate::faces::MonotonePiece;
use crate::geom::{above, orient2d, sweep_leq, Real, SweepPoint};
use crate::polygon::{PointIdx, Polygon};
use crate::priorityq::PriorityQ;

/// Three point ids, sorted ascending.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triangle {
    pub vertices: [PointIdx; 3],
}

impl Triangle {
    pub fn new(a: PointIdx, b: PointIdx, c: PointIdx) -> Self {
        let mut vertices = [a, b, c];
        vertices.sort_unstable();
        Triangle { vertices }
    }

    /// Signed area with the vertices taken in ascending id order; `coords`
    /// maps a point id to its position.
    pub fn signed_area(&self, coords: impl Fn(PointIdx) -> [Real; 2]) -> Real {
        let [a, b, c] = self.vertices.map(coords);
        0.5 * orient2d(a, b, c)
    }

    pub fn area(&self, coords: impl Fn(PointIdx) -> [Real; 2]) -> Real {
        self.signed_area(coords).abs()
    }
}

#[derive(Copy, Clone, Debug)]
struct ChainVertex {
    at: SweepPoint,
    left: bool,
}

impl ChainVertex {
    fn xy(&self) -> [Real; 2] {
        [self.at.x, self.at.y]
    }
}

fn chain_leq(a: &ChainVertex, b: &ChainVertex) -> bool {
    sweep_leq(&a.at, &b.at)
}

/// Append the `piece.len() - 2` triangles of one monotone piece to `out`.
pub fn triangulate_piece(
    polygon: &Polygon,
    piece: &MonotonePiece,
    out: &mut Vec<Triangle>,
) -> Result<()> {
    let points = piece.points();
    let n = points.len();
    if n < 3 {
        return Err(InvariantViolation::DegeneratePiece { len: n }.into());
    }

    let vertices: Vec<ChainVertex> = points
        .iter()
        .enumerate()
        .map(|(k, &p)| {
            let [x, y] = polygon.xy(p);
            let [nx, ny] = polygon.xy(points[(k + 1) % n]);
            ChainVertex {
                at: SweepPoint::new(x, y, p),
                left: above(x, y, nx, ny),
            }
        })
        .collect();
    let mut queue = PriorityQ::from_keys(&vertices, chain_leq);

    let mut stack: Vec<ChainVertex> = Vec::with_capacity(n);
    while stack.len() < 2 {
        match queue.extract_min() {
            Some(v) => stack.push(v),
            None => return Err(InvariantViolation::DegeneratePiece { len: n }.into()),
        }
    }

    while queue.len() > 1 {
        let Some(q) = queue.extract_min() else { break };
        let Some(&top) = stack.last() else { break };

        if q.left != top.left {
            // Opposite chain: q sees every stacked vertex.
            while let [.., lower, upper] = stack[..] {
                out.push(Triangle::new(q.at.id, upper.at.id, lower.at.id));
                stack.pop();
            }
            stack.clear();
            stack.push(top);
            stack.push(q);
        } else {
            // Same chain: cut ears while the diagonal from q stays inside.
            while let [.., s2, s1] = stack[..] {
                let area = orient2d(q.xy(), s2.xy(), s1.xy());
                if (area > 0.0 && s1.left) || (area < 0.0 && !s1.left) {
                    out.push(Triangle::new(q.at.id, s2.at.id, s1.at.id));
                    stack.pop();
                } else {
                    break;
                }
            }
            stack.push(q);
        }
    }

    let Some(last) = queue.extract_min() else {
        return Err(InvariantViolation::DegeneratePiece { len: n }.into());
    };
    while let [.., lower, upper] = stack[..] {
        out.push(Triangle::new(last.at.id, upper.at.id, lower.at.id));
        stack.pop();
    }
    Ok(())
}
