use serde::{Deserialize, Serialize};

use crate::bounding_box::BoundingBox;
use crate::error::{GeometryError, Result};
use crate::geometry_type::{Dimension, GeometryKind};
use crate::point::Coord;
use crate::traits::{Curve, Shape};

/// Sequence of points connected with straight segments.
///
/// A line string can be open or closed (first point equals the last one) and can have any number
/// of points, including zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LineString {
    points: Vec<Coord>,
}

impl LineString {
    /// Creates a new line string.
    pub fn new(points: Vec<Coord>) -> Self {
        Self { points }
    }

    /// Appends a point at the end.
    pub fn add_point(&mut self, coord: Coord) {
        self.points.push(coord);
    }

    /// Removes the point at `index`.
    pub fn remove_point(&mut self, index: usize) -> Result<Coord> {
        if index >= self.points.len() {
            return Err(GeometryError::out_of_range(index, self.points.len()));
        }

        Ok(self.points.remove(index))
    }

    /// Replaces the point at `index`.
    pub fn set_point(&mut self, index: usize, coord: Coord) -> Result<()> {
        let len = self.points.len();
        let point = self
            .points
            .get_mut(index)
            .ok_or_else(|| GeometryError::out_of_range(index, len))?;
        *point = coord;

        Ok(())
    }

    /// Consumes the line returning its points.
    pub fn into_coords(self) -> Vec<Coord> {
        self.points
    }
}

impl Curve for LineString {
    fn coords(&self) -> &[Coord] {
        &self.points
    }
}

impl Shape for LineString {
    fn kind(&self) -> GeometryKind {
        GeometryKind::LineString
    }

    fn dimension(&self) -> Dimension {
        Dimension::Curve
    }

    fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_coords(&self.points)
    }

    fn num_points(&self) -> usize {
        self.points.len()
    }
}

impl From<Vec<Coord>> for LineString {
    fn from(points: Vec<Coord>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Coord> for LineString {
    fn from_iter<T: IntoIterator<Item = Coord>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
