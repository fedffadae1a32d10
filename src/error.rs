// Copyright 2025 Lars Brubaker
// License: MIT

use thiserror::Error;

use crate::polygon::{EdgeIdx, PointIdx, VertexKind};

/// Top-level error type for triangulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriangulateError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl TriangulateError {
    /// True when the caller's polygon was rejected, as opposed to an
    /// internal inconsistency.
    pub fn is_input_error(&self) -> bool {
        matches!(self, TriangulateError::Input(_))
    }
}

/// The supplied contours cannot be triangulated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("no contours were supplied")]
    NoContours,

    #[error("contour {contour}: {xs} x-coordinates but {ys} y-coordinates")]
    LengthMismatch { contour: usize, xs: usize, ys: usize },

    #[error("contour {contour} has {count} points, at least 3 are required")]
    TooFewPoints { contour: usize, count: usize },

    #[error("contour {contour}: coordinate {index} is not finite")]
    NonFiniteCoordinate { contour: usize, index: usize },

    #[error("contour {contour}: point {index} ({x}, {y}) repeats its predecessor")]
    DuplicatePoint {
        contour: usize,
        index: usize,
        x: f64,
        y: f64,
    },

    #[error("topmost vertex {point} is {kind:?}, not Start: check contour orientation and self-intersections")]
    NotSimple { point: PointIdx, kind: VertexKind },

    #[error("vertex {point} could not be classified (coincides with a neighbour)")]
    UnclassifiedVertex { point: PointIdx },

    #[error("no active edge lies left of vertex {point}: polygon is not simple")]
    NoEdgeLeftOf { point: PointIdx },
}

/// The pipeline reached a state that valid input cannot produce.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("edge {edge} is not in the active edge set at vertex {point}")]
    MissingActiveEdge { edge: EdgeIdx, point: PointIdx },

    #[error("edge {edge} is already in the active edge set")]
    DuplicateActiveEdge { edge: EdgeIdx },

    #[error("face walk found no outgoing edge at vertex {point}")]
    FaceWalk { point: PointIdx },

    #[error("face walk starting at edge {seed} did not close")]
    UnterminatedFace { seed: EdgeIdx },

    #[error("monotone piece has {len} vertices, at least 3 are required")]
    DegeneratePiece { len: usize },
}

/// Convenience type alias for results using [`TriangulateError`].
pub type Result<T> = std::result::Result<T, TriangulateError>;
