// Copyright 2025 Lars Brubaker
// License: MIT
//
// The polygon model: every point and directed edge of all contours, stored in
// Vec arenas and addressed by dense u32 indices.
//
// Layout:
//   - points[0..n] are the input vertices, contour after contour, in the order
//     the caller supplied them.
//   - edges[i] for i < n is the input edge leaving point i along its contour,
//     so edges[i].org == i and edges[i].dst == next(i).
//   - diagonals inserted by the sweep are appended after the input edges.

use std::ops::Range;

use tracing::debug;

use crate::error::{InputError, Result};
use crate::geom::{orient2d_fast, vert_eq, Real};

pub const INVALID: u32 = u32::MAX;

/// Index into Polygon::points
pub type PointIdx = u32;
/// Index into Polygon::edges
pub type EdgeIdx = u32;

/// Role of a vertex in the monotone decomposition sweep.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Hash)]
pub enum VertexKind {
    #[default]
    Unknown,
    /// Supplied by the caller, not yet classified.
    Input,
    Start,
    End,
    Split,
    Merge,
    RegularUp,
    RegularDown,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub id: PointIdx,
    pub x: Real,
    pub y: Real,
    pub kind: VertexKind,
}

impl Point {
    #[inline]
    pub fn xy(&self) -> [Real; 2] {
        [self.x, self.y]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeOrigin {
    /// Part of a caller-supplied contour.
    Input,
    /// Inserted by the sweep to split the polygon into monotone pieces.
    Diagonal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub id: EdgeIdx,
    pub org: PointIdx,
    pub dst: PointIdx,
    pub origin: EdgeOrigin,
    /// Helper vertex while the edge is active in the sweep.
    pub helper: PointIdx,
}

impl Edge {
    /// The endpoint of this edge that is not `p`.
    #[inline]
    pub fn other(&self, p: PointIdx) -> PointIdx {
        if self.org == p {
            self.dst
        } else {
            self.org
        }
    }
}

/// One closed contour: a contiguous run of point ids.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    pub points: Range<PointIdx>,
    /// Walk the contour from the last point towards the first.
    pub reversed: bool,
}

impl Contour {
    pub fn len(&self) -> usize {
        (self.points.end - self.points.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Axis-aligned bounding box of all contours.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub min: [Real; 2],
    pub max: [Real; 2],
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            min: [Real::INFINITY; 2],
            max: [Real::NEG_INFINITY; 2],
        }
    }
}

impl Bounds {
    fn include(&mut self, x: Real, y: Real) {
        self.min[0] = self.min[0].min(x);
        self.min[1] = self.min[1].min(y);
        self.max[0] = self.max[0].max(x);
        self.max[1] = self.max[1].max(y);
    }
}

#[derive(Clone, Debug, Default)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub edges: Vec<Edge>,
    pub contours: Vec<Contour>,
    /// contour_of[p] is the index into `contours` holding point p.
    contour_of: Vec<u32>,
    /// Number of input edges; diagonals start here.
    input_edges: u32,
    bounds: Bounds,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a contour given as parallel coordinate slices.
    ///
    /// Rejects contours with mismatched lengths, fewer than three points,
    /// non-finite coordinates, or two cyclically consecutive equal points.
    /// Diagonals must not have been added yet.
    pub fn add_contour(&mut self, xs: &[Real], ys: &[Real], reversed: bool) -> Result<()> {
        let contour = self.contours.len();
        debug_assert_eq!(self.input_edges as usize, self.edges.len());
        if xs.len() != ys.len() {
            return Err(InputError::LengthMismatch {
                contour,
                xs: xs.len(),
                ys: ys.len(),
            }
            .into());
        }
        let n = xs.len();
        if n < 3 {
            return Err(InputError::TooFewPoints { contour, count: n }.into());
        }
        for (index, (&x, &y)) in xs.iter().zip(ys).enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(InputError::NonFiniteCoordinate { contour, index }.into());
            }
        }
        for i in 0..n {
            let j = (i + 1) % n;
            if vert_eq(xs[i], ys[i], xs[j], ys[j]) {
                return Err(InputError::DuplicatePoint {
                    contour,
                    index: j,
                    x: xs[j],
                    y: ys[j],
                }
                .into());
            }
        }

        let start = self.points.len() as PointIdx;
        let end = start + n as PointIdx;
        for (k, (&x, &y)) in xs.iter().zip(ys).enumerate() {
            self.points.push(Point {
                id: start + k as PointIdx,
                x,
                y,
                kind: VertexKind::Input,
            });
            self.contour_of.push(contour as u32);
            self.bounds.include(x, y);
        }
        self.contours.push(Contour {
            points: start..end,
            reversed,
        });
        self.rebuild_input_edges(contour);
        self.input_edges = self.edges.len() as u32;

        debug!(contour, points = n, reversed, "contour added");
        Ok(())
    }

    /// Flip the walking direction of a contour. Only valid before the sweep
    /// has added diagonals.
    pub fn set_reversed(&mut self, contour: usize, reversed: bool) {
        debug_assert_eq!(self.input_edges as usize, self.edges.len());
        if self.contours[contour].reversed != reversed {
            self.contours[contour].reversed = reversed;
            self.rebuild_input_edges(contour);
        }
    }

    fn rebuild_input_edges(&mut self, contour: usize) {
        let range = self.contours[contour].points.clone();
        for p in range {
            let edge = Edge {
                id: p,
                org: p,
                dst: self.next(p),
                origin: EdgeOrigin::Input,
                helper: INVALID,
            };
            if (p as usize) < self.edges.len() {
                self.edges[p as usize] = edge;
            } else {
                self.edges.push(edge);
            }
        }
    }

    /// The point preceding `p` along its contour's walking direction.
    pub fn prev(&self, p: PointIdx) -> PointIdx {
        let c = &self.contours[self.contour_of[p as usize] as usize];
        if c.reversed {
            step_forward(&c.points, p)
        } else {
            step_back(&c.points, p)
        }
    }

    /// The point following `p` along its contour's walking direction.
    pub fn next(&self, p: PointIdx) -> PointIdx {
        let c = &self.contours[self.contour_of[p as usize] as usize];
        if c.reversed {
            step_back(&c.points, p)
        } else {
            step_forward(&c.points, p)
        }
    }

    #[inline]
    pub fn point(&self, p: PointIdx) -> &Point {
        &self.points[p as usize]
    }

    #[inline]
    pub fn edge(&self, e: EdgeIdx) -> &Edge {
        &self.edges[e as usize]
    }

    #[inline]
    pub fn edge_mut(&mut self, e: EdgeIdx) -> &mut Edge {
        &mut self.edges[e as usize]
    }

    #[inline]
    pub fn xy(&self, p: PointIdx) -> [Real; 2] {
        self.points[p as usize].xy()
    }

    #[inline]
    pub fn kind(&self, p: PointIdx) -> VertexKind {
        self.points[p as usize].kind
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn input_edge_count(&self) -> usize {
        self.input_edges as usize
    }

    /// Ids of the diagonals added so far.
    pub fn diagonals(&self) -> Range<EdgeIdx> {
        self.input_edges..self.edges.len() as EdgeIdx
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Record a diagonal between two already-visited points.
    pub fn add_diagonal(&mut self, a: PointIdx, b: PointIdx) -> EdgeIdx {
        let id = self.edges.len() as EdgeIdx;
        self.edges.push(Edge {
            id,
            org: a,
            dst: b,
            origin: EdgeOrigin::Diagonal,
            helper: INVALID,
        });
        id
    }

    /// Shoelace signed area of one contour following its walking direction.
    /// Positive for counter-clockwise.
    pub fn contour_signed_area(&self, contour: usize) -> Real {
        let c = &self.contours[contour];
        let origin = self.xy(c.points.start);
        let mut area = 0.0;
        for p in c.points.clone() {
            area += orient2d_fast(origin, self.xy(p), self.xy(self.next(p)));
        }
        area * 0.5
    }

    /// Signed area of the whole polygon: outer contours count positive, holes
    /// negative, when the usual winding convention is followed.
    pub fn signed_area(&self) -> Real {
        (0..self.contours.len())
            .map(|c| self.contour_signed_area(c))
            .sum()
    }
}

#[inline]
fn step_forward(range: &Range<PointIdx>, p: PointIdx) -> PointIdx {
    if p + 1 == range.end {
        range.start
    } else {
        p + 1
    }
}

#[inline]
fn step_back(range: &Range<PointIdx>, p: PointIdx) -> PointIdx {
    if p == range.start {
        range.end - 1
    } else {
        p - 1
    }
}
