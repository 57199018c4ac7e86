//! Behaviour shared between geometry variants.
//!
//! The OGC model groups geometries into abstract categories (curves, surfaces and their
//! collections). Here every category is a trait with the shared logic in default methods, so that
//! the concrete types only provide the data access.

use std::collections::HashSet;

use crate::bounding_box::BoundingBox;
use crate::error::{GeometryError, Result};
use crate::geometry_type::{Dimension, GeometryKind};
use crate::point::{Coord, Point};

/// Capabilities every geometry variant provides.
pub trait Shape {
    /// Kind tag of the geometry.
    fn kind(&self) -> GeometryKind;

    /// Inherent dimension of the geometry.
    fn dimension(&self) -> Dimension;

    /// Returns true if the geometry has no coordinate data.
    fn is_empty(&self) -> bool;

    /// Minimum box containing all the points of the geometry, `None` for empty geometries.
    fn bounding_box(&self) -> Option<BoundingBox>;

    /// Total number of points in the geometry and all its descendants.
    fn num_points(&self) -> usize;
}

/// One-dimensional geometry stored as a sequence of points with linear interpolation between them.
pub trait Curve {
    /// Points of the curve.
    fn coords(&self) -> &[Coord];

    /// Number of points.
    fn num_points(&self) -> usize {
        self.coords().len()
    }

    /// Point by zero-based index.
    fn point_n(&self, index: usize) -> Result<Point> {
        let coords = self.coords();
        coords
            .get(index)
            .map(|c| Point::from(*c))
            .ok_or_else(|| GeometryError::out_of_range(index, coords.len()))
    }

    /// First point of the curve.
    fn start_point(&self) -> Result<Point> {
        self.coords()
            .first()
            .map(|c| Point::from(*c))
            .ok_or(GeometryError::EmptyGeometry)
    }

    /// Last point of the curve.
    fn end_point(&self) -> Result<Point> {
        self.coords()
            .last()
            .map(|c| Point::from(*c))
            .ok_or(GeometryError::EmptyGeometry)
    }

    /// Returns true if the curve is not empty and its start point equals its end point.
    fn is_closed(&self) -> bool {
        match (self.coords().first(), self.coords().last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    /// Returns true if no point is visited twice, except for the end point of a closed curve.
    fn is_simple(&self) -> bool {
        let coords = self.coords();
        let distinct = if self.is_closed() {
            &coords[..coords.len() - 1]
        } else {
            coords
        };

        let mut visited = HashSet::with_capacity(distinct.len());
        distinct.iter().all(|c| visited.insert(*c))
    }

    /// Returns true if the curve is closed and simple.
    fn is_ring(&self) -> bool {
        self.is_closed() && self.is_simple()
    }

    /// Sum of the segment lengths.
    fn length(&self) -> f64 {
        self.coords()
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }

    /// Point at the distance `t` from the start, measured along the curve. Values outside of
    /// `[0, length]` are clamped to the start and end points.
    fn value(&self, t: f64) -> Result<Point> {
        let coords = self.coords();
        let first = *coords.first().ok_or(GeometryError::EmptyGeometry)?;
        if t <= 0.0 {
            return Ok(first.into());
        }

        let mut travelled = 0.0;
        for pair in coords.windows(2) {
            let segment = pair[0].distance(&pair[1]);
            if segment > 0.0 && travelled + segment >= t {
                let k = (t - travelled) / segment;
                return Ok((pair[0] + (pair[1] - pair[0]) * k).into());
            }

            travelled += segment;
        }

        self.end_point()
    }
}

/// Two-dimensional geometry.
pub trait Surface {
    /// Area of the surface.
    fn area(&self) -> f64;

    /// Mathematical centroid. Not guaranteed to lie on the surface.
    fn centroid(&self) -> Result<Point>;

    /// A point guaranteed to lie on the surface.
    fn point_on_surface(&self) -> Result<Point>;
}

/// Collection of curves.
pub trait MultiCurve {
    /// Sum of the member lengths.
    fn length(&self) -> f64;

    /// Returns true if every member is closed.
    fn is_closed(&self) -> bool;
}

/// Collection of surfaces.
pub trait MultiSurface {
    /// Sum of the member areas.
    fn area(&self) -> f64;

    /// Area weighted centroid of the members.
    fn centroid(&self) -> Result<Point>;

    /// A point guaranteed to lie on one of the members.
    fn point_on_surface(&self) -> Result<Point>;
}
