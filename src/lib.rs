// monotri: sweep-line monotone decomposition triangulator
// Copyright 2025 Lars Brubaker
// License: MIT

pub mod bucketalloc;
pub mod classify;
pub mod dict;
pub mod error;
pub mod faces;
pub mod geom;
pub mod monotone;
pub mod polygon;
pub mod priorityq;
pub mod sweep;
pub mod tess;

pub use error::{InputError, InvariantViolation, Result, TriangulateError};
pub use faces::MonotonePiece;
pub use geom::{orient2d, Real};
pub use monotone::Triangle;
pub use polygon::{Bounds, PointIdx, VertexKind};
pub use tess::{
    triangulate_contours, Options, PolygonTriangulator, TriangulateOption, Triangulation,
};
