// Copyright 2025 Lars Brubaker
// License: MIT
//
// Public entry point: collect contours, then run classification, the
// monotone decomposition sweep, piece extraction and piece triangulation.

mod output;

pub use output::Triangulation;

use tracing::debug;

use crate::error::{InputError, Result};
use crate::faces::find_pieces;
use crate::geom::Real;
use crate::monotone::triangulate_piece;
use crate::polygon::Polygon;
use crate::sweep::decompose;

// ─────────────────────────────── Options ───────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriangulateOption {
    /// Contours added while set are walked from their last point to their
    /// first.
    ReverseContours,
    /// Re-orient contours before triangulating: the first contour
    /// counter-clockwise, every later one (a hole) clockwise.
    NormalizeWinding,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub reverse_contours: bool,
    pub normalize_winding: bool,
}

impl Options {
    pub fn set(&mut self, option: TriangulateOption, value: bool) {
        match option {
            TriangulateOption::ReverseContours => self.reverse_contours = value,
            TriangulateOption::NormalizeWinding => self.normalize_winding = value,
        }
    }
}

// ─────────────────────────── Triangulator ─────────────────────────────────────

/// Triangulates a simple polygon, possibly with holes.
///
/// The first contour is the outer boundary and must run counter-clockwise;
/// every further contour is a hole and must run clockwise (or enable
/// [`TriangulateOption::NormalizeWinding`]). Point ids in the result number
/// all contours' points consecutively from 0, in the order they were added.
///
/// ```
/// use monotri::PolygonTriangulator;
///
/// let mut t = PolygonTriangulator::new();
/// t.add_contour(&[0.0, 4.0, 4.0, 0.0], &[0.0, 0.0, 4.0, 4.0]).unwrap();
/// let result = t.triangulate().unwrap();
/// assert_eq!(result.triangles().len(), 2);
/// assert_eq!(result.total_area(), 16.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PolygonTriangulator {
    polygon: Polygon,
    options: Options,
}

impl PolygonTriangulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Options) -> Self {
        PolygonTriangulator {
            polygon: Polygon::new(),
            options,
        }
    }

    pub fn set_option(&mut self, option: TriangulateOption, value: bool) {
        self.options.set(option, value);
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Add a closed contour given as parallel x and y slices. The closing
    /// edge from the last point back to the first is implied.
    pub fn add_contour(&mut self, xs: &[Real], ys: &[Real]) -> Result<()> {
        self.polygon
            .add_contour(xs, ys, self.options.reverse_contours)
    }

    /// Add a closed contour given as interleaved `[x0, y0, x1, y1, ...]`.
    pub fn add_contour_flat(&mut self, coords: &[Real]) -> Result<()> {
        if coords.len() % 2 != 0 {
            return Err(InputError::LengthMismatch {
                contour: self.polygon.contours.len(),
                xs: coords.len() / 2 + 1,
                ys: coords.len() / 2,
            }
            .into());
        }
        let (xs, ys): (Vec<Real>, Vec<Real>) =
            coords.chunks_exact(2).map(|c| (c[0], c[1])).unzip();
        self.add_contour(&xs, &ys)
    }

    pub fn contour_count(&self) -> usize {
        self.polygon.contours.len()
    }

    pub fn point_count(&self) -> usize {
        self.polygon.point_count()
    }

    /// Run the full pipeline. Nothing is returned on error; the contours are
    /// consumed either way.
    pub fn triangulate(mut self) -> Result<Triangulation> {
        if self.polygon.contours.is_empty() {
            return Err(InputError::NoContours.into());
        }
        if self.options.normalize_winding {
            self.normalize_winding();
        }

        let diagonals = decompose(&mut self.polygon)?;
        let pieces = find_pieces(&self.polygon)?;

        let holes = self.polygon.contours.len() - 1;
        let mut triangles = Vec::with_capacity(self.polygon.point_count() - 2 + 2 * holes);
        for piece in &pieces {
            triangulate_piece(&self.polygon, piece, &mut triangles)?;
        }

        debug!(
            contours = self.polygon.contours.len(),
            points = self.polygon.point_count(),
            diagonals = diagonals.len(),
            pieces = pieces.len(),
            triangles = triangles.len(),
            "polygon triangulated"
        );
        Ok(Triangulation::new(self.polygon, pieces, triangles))
    }

    fn normalize_winding(&mut self) {
        for c in 0..self.polygon.contours.len() {
            let area = self.polygon.contour_signed_area(c);
            let want_ccw = c == 0;
            if area != 0.0 && (area > 0.0) != want_ccw {
                let reversed = self.polygon.contours[c].reversed;
                self.polygon.set_reversed(c, !reversed);
                debug!(contour = c, area, "contour winding flipped");
            }
        }
    }
}

/// Triangulate the given contours in one call: the first is the outer
/// boundary, the rest are holes.
pub fn triangulate_contours(contours: &[(&[Real], &[Real])]) -> Result<Triangulation> {
    let mut t = PolygonTriangulator::new();
    for (xs, ys) in contours {
        t.add_contour(xs, ys)?;
    }
    t.triangulate()
}
