// Copyright 2025 Lars Brubaker
// License: MIT
//
// Geometric primitives for the sweep: the sweep-line vertex order, edge
// intercepts, and the orientation predicate. Orientation decisions go through
// the `robust` crate's adaptive-precision orient2d, so their sign is exact.

use robust::Coord;

pub type Real = f64;

/// Returns true if u comes strictly before v in sweep order: higher y first,
/// and for equal y the smaller x first.
#[inline]
pub fn above(u_x: Real, u_y: Real, v_x: Real, v_y: Real) -> bool {
    u_y > v_y || (u_y == v_y && u_x < v_x)
}

/// Returns true if u == v (exact equality).
#[inline]
pub fn vert_eq(u_x: Real, u_y: Real, v_x: Real, v_y: Real) -> bool {
    u_x == v_x && u_y == v_y
}

/// A vertex as seen by a priority queue ordered along the sweep.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SweepPoint {
    pub x: Real,
    pub y: Real,
    pub id: u32,
}

impl SweepPoint {
    pub fn new(x: Real, y: Real, id: u32) -> Self {
        SweepPoint { x, y, id }
    }
}

/// Queue ordering: `a` is popped no later than `b`. Coincident points fall
/// back to id order so the sweep is deterministic.
pub fn sweep_leq(a: &SweepPoint, b: &SweepPoint) -> bool {
    if vert_eq(a.x, a.y, b.x, b.y) {
        a.id <= b.id
    } else {
        above(a.x, a.y, b.x, b.y)
    }
}

/// x-coordinate of the line through (o, d) at height y.
/// A horizontal edge has no single intercept; it is keyed on its left end.
#[inline]
pub fn edge_x_at(o_x: Real, o_y: Real, d_x: Real, d_y: Real, y: Real) -> Real {
    if o_y == d_y {
        o_x.min(d_x)
    } else {
        (y - o_y) * (d_x - o_x) / (d_y - o_y) + o_x
    }
}

/// Cosine of the angle ABC at b.
pub fn angle_cos(a: [Real; 2], b: [Real; 2], c: [Real; 2]) -> Real {
    let (dxab, dyab) = (a[0] - b[0], a[1] - b[1]);
    let (dxcb, dycb) = (c[0] - b[0], c[1] - b[1]);
    let ab = dxab * dxab + dyab * dyab;
    let cb = dxcb * dxcb + dycb * dycb;
    (dxab * dxcb + dyab * dycb) / (ab * cb).sqrt()
}

/// Twice the signed area of the triangle (a, b, c), without any rounding
/// guarantee. Used for areas, never for decisions.
#[inline]
pub fn orient2d_fast(a: [Real; 2], b: [Real; 2], c: [Real; 2]) -> Real {
    (a[0] - c[0]) * (b[1] - c[1]) - (a[1] - c[1]) * (b[0] - c[0])
}

/// Robust orientation test.
///
/// Positive if c lies to the left of the directed line a→b (the three points
/// turn counter-clockwise), negative if to the right, zero if collinear. The
/// sign is always exact; the magnitude approximates twice the signed area.
#[inline]
pub fn orient2d(a: [Real; 2], b: [Real; 2], c: [Real; 2]) -> Real {
    robust::orient2d(coord(a), coord(b), coord(c))
}

#[inline]
fn coord(p: [Real; 2]) -> Coord<Real> {
    Coord { x: p[0], y: p[1] }
}
