// Copyright 2025 Lars Brubaker
// License: MIT
//
// Extraction of the monotone pieces bounded by the input edges and the sweep
// diagonals.
//
// Every point keeps the set of edges that may still leave it: an input edge
// is registered at its origin, a diagonal at both endpoints (one entry per
// direction). A walk starts on the lowest-numbered input edge not yet used
// and keeps the interior on its left: at a branch it takes the sharpest left
// turn, or failing that the gentlest right turn. Each entry is removed once
// walked, so input edges are used once and diagonals once per side.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{InvariantViolation, Result};
use crate::geom::{angle_cos, orient2d, Real};
use crate::polygon::{EdgeIdx, PointIdx, Polygon};

/// A y-monotone sub-polygon as a cyclic, counter-clockwise list of point ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonotonePiece(pub Vec<PointIdx>);

impl MonotonePiece {
    pub fn points(&self) -> &[PointIdx] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Split a decomposed polygon into its monotone pieces.
pub fn find_pieces(polygon: &Polygon) -> Result<Vec<MonotonePiece>> {
    let mut finder = MonotoneFaceFinder::new(polygon);
    let mut pieces = Vec::new();
    while let Some(seed) = finder.next_seed() {
        pieces.push(finder.walk(seed)?);
    }
    debug!(pieces = pieces.len(), "monotone pieces extracted");
    Ok(pieces)
}

struct MonotoneFaceFinder<'a> {
    polygon: &'a Polygon,
    /// outgoing[p]: edges not yet walked away from p.
    outgoing: Vec<BTreeSet<EdgeIdx>>,
    /// Input edges not yet walked.
    unused_input: BTreeSet<EdgeIdx>,
    /// Upper bound on the length of any face.
    max_steps: usize,
}

impl<'a> MonotoneFaceFinder<'a> {
    fn new(polygon: &'a Polygon) -> Self {
        let mut outgoing = vec![BTreeSet::new(); polygon.point_count()];
        let mut unused_input = BTreeSet::new();
        for e in &polygon.edges[..polygon.input_edge_count()] {
            outgoing[e.org as usize].insert(e.id);
            unused_input.insert(e.id);
        }
        for d in polygon.diagonals() {
            let e = polygon.edge(d);
            outgoing[e.org as usize].insert(d);
            outgoing[e.dst as usize].insert(d);
        }
        let max_steps = polygon.input_edge_count() + 2 * polygon.diagonals().len();
        MonotoneFaceFinder {
            polygon,
            outgoing,
            unused_input,
            max_steps,
        }
    }

    fn next_seed(&self) -> Option<EdgeIdx> {
        self.unused_input.first().copied()
    }

    /// Trace the face to the left of input edge `seed` back to its start.
    fn walk(&mut self, seed: EdgeIdx) -> Result<MonotonePiece> {
        let start = self.polygon.edge(seed).org;
        let mut points = vec![start];
        let mut edge = seed;
        let mut from = start;
        loop {
            let to = self.polygon.edge(edge).other(from);
            self.consume(edge, from);
            if to == start {
                break;
            }
            if points.len() >= self.max_steps {
                return Err(InvariantViolation::UnterminatedFace { seed }.into());
            }
            points.push(to);
            edge = self.select_next(edge, from, to)?;
            from = to;
        }
        Ok(MonotonePiece(points))
    }

    fn consume(&mut self, edge: EdgeIdx, from: PointIdx) {
        self.outgoing[from as usize].remove(&edge);
        self.unused_input.remove(&edge);
    }

    /// Choose the edge leaving `b` after arriving along `incoming` from `a`.
    fn select_next(&self, incoming: EdgeIdx, a: PointIdx, b: PointIdx) -> Result<EdgeIdx> {
        let mut candidates = self.outgoing[b as usize]
            .iter()
            .copied()
            .filter(|&e| e != incoming);
        let first = candidates
            .next()
            .ok_or(InvariantViolation::FaceWalk { point: b })?;
        let Some(second) = candidates.next() else {
            return Ok(first);
        };

        let pa = self.polygon.xy(a);
        let pb = self.polygon.xy(b);
        let mut left_turn: Option<(EdgeIdx, Real)> = None;
        let mut right_turn: Option<(EdgeIdx, Real)> = None;
        for e in [first, second].into_iter().chain(candidates) {
            let pc = self.polygon.xy(self.polygon.edge(e).other(b));
            let cos = angle_cos(pa, pb, pc);
            if orient2d(pa, pb, pc) > 0.0 {
                if left_turn.map_or(true, |(_, best)| cos > best) {
                    left_turn = Some((e, cos));
                }
            } else if right_turn.map_or(true, |(_, best)| cos < best) {
                right_turn = Some((e, cos));
            }
        }
        left_turn
            .or(right_turn)
            .map(|(e, _)| e)
            .ok_or_else(|| InvariantViolation::FaceWalk { point: b }.into())
    }
}
