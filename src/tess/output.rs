// Copyright 2025 Lars Brubaker
// Result of a triangulation run.

use crate::faces::MonotonePiece;
use crate::geom::Real;
use crate::monotone::Triangle;
use crate::polygon::{Bounds, PointIdx, Polygon, VertexKind};

/// Triangles covering the polygon's interior, together with the points they
/// index and the intermediate decomposition.
#[derive(Clone, Debug)]
pub struct Triangulation {
    polygon: Polygon,
    pieces: Vec<MonotonePiece>,
    triangles: Vec<Triangle>,
}

impl Triangulation {
    pub(crate) fn new(
        polygon: Polygon,
        pieces: Vec<MonotonePiece>,
        triangles: Vec<Triangle>,
    ) -> Self {
        Triangulation {
            polygon,
            pieces,
            triangles,
        }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn pieces(&self) -> &[MonotonePiece] {
        &self.pieces
    }

    /// Endpoints of every diagonal inserted by the sweep, lower id first.
    pub fn diagonals(&self) -> Vec<(PointIdx, PointIdx)> {
        self.polygon
            .diagonals()
            .map(|d| {
                let e = self.polygon.edge(d);
                (e.org.min(e.dst), e.org.max(e.dst))
            })
            .collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.polygon.point_count()
    }

    pub fn contour_count(&self) -> usize {
        self.polygon.contours.len()
    }

    pub fn vertex(&self, id: PointIdx) -> Option<[Real; 2]> {
        self.polygon.points.get(id as usize).map(|p| p.xy())
    }

    /// Classification the sweep assigned to a point.
    pub fn vertex_kind(&self, id: PointIdx) -> Option<VertexKind> {
        self.polygon.points.get(id as usize).map(|p| p.kind)
    }

    /// Flat `[x0, y0, x1, y1, ...]` in point id order.
    pub fn vertices(&self) -> Vec<Real> {
        self.polygon
            .points
            .iter()
            .flat_map(|p| [p.x, p.y])
            .collect()
    }

    /// Flat `[a0, b0, c0, a1, b1, c1, ...]`, three point ids per triangle.
    pub fn elements(&self) -> Vec<u32> {
        self.triangles.iter().flat_map(|t| t.vertices).collect()
    }

    pub fn triangle_area(&self, t: &Triangle) -> Real {
        t.area(|p| self.polygon.xy(p))
    }

    /// Sum of the triangle areas.
    pub fn total_area(&self) -> Real {
        self.triangles.iter().map(|t| self.triangle_area(t)).sum()
    }

    pub fn bounds(&self) -> Bounds {
        self.polygon.bounds()
    }
}
