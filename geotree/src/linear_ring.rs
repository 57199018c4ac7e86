//! Closed rings and the signed area computations.

use serde::{Deserialize, Serialize};

use crate::bounding_box::BoundingBox;
use crate::error::{GeometryError, Result};
use crate::point::Coord;
use crate::traits::Curve;

/// Direction in which the vertices of a ring go around its interior.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Winding {
    /// Clockwise. Rings with zero area are also considered clockwise.
    Clockwise,
    /// Counterclockwise.
    CounterClockwise,
}

impl Winding {
    /// The other direction.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// Closed sequence of points used as a boundary of a [`Polygon`](crate::Polygon).
///
/// A non-empty ring has at least [`LinearRing::MIN_POINTS`] points and its last point is equal to
/// the first one. The constructors check this, while the point mutation methods only keep the ring
/// closed and leave the point count to the caller (see [`LinearRing::validate`]).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LinearRing {
    points: Vec<Coord>,
}

impl LinearRing {
    /// Minimum number of points in a non-empty ring: three distinct vertices and the closing one.
    pub const MIN_POINTS: usize = 4;

    /// Creates a ring from the points that already include the closing point.
    pub fn new(points: Vec<Coord>) -> Result<Self> {
        let ring = Self { points };
        ring.validate()?;
        Ok(ring)
    }

    /// Creates a ring, appending the first point at the end if the sequence is not closed yet.
    pub fn closing(mut points: Vec<Coord>) -> Result<Self> {
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            if first != last {
                points.push(*first);
            }
        }

        Self::new(points)
    }

    pub(crate) fn closed_unchecked(points: Vec<Coord>) -> Self {
        Self { points }
    }

    /// Ring without points.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Checks the point count and closure of the ring.
    pub fn validate(&self) -> Result<()> {
        if self.points.is_empty() {
            return Ok(());
        }

        if self.points.len() < Self::MIN_POINTS {
            return Err(GeometryError::MalformedRing(format!(
                "ring must have at least {} points, got {}",
                Self::MIN_POINTS,
                self.points.len()
            )));
        }

        if !Curve::is_closed(self) {
            return Err(GeometryError::MalformedRing(
                "first and last points of the ring differ".into(),
            ));
        }

        Ok(())
    }

    /// Returns true if the ring has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Minimum box containing the ring, `None` for an empty ring.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_coords(&self.points)
    }

    fn edges(&self) -> impl Iterator<Item = (&Coord, &Coord)> {
        // the closing edge is implied if the last point was removed by a mutation
        let closing = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if first != last => Some((last, first)),
            _ => None,
        };

        self.points
            .windows(2)
            .map(|pair| (&pair[0], &pair[1]))
            .chain(closing)
    }

    /// Shoelace area. Positive for counterclockwise rings, negative for clockwise ones.
    pub fn signed_area(&self) -> f64 {
        self.edges()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum::<f64>()
            / 2.0
    }

    /// Unsigned area enclosed by the ring.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Orientation of the ring.
    pub fn winding(&self) -> Winding {
        if self.signed_area() <= 0.0 {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }

    /// Returns true if the ring goes counterclockwise.
    pub fn is_ccw(&self) -> bool {
        self.winding() == Winding::CounterClockwise
    }

    /// Same ring traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// Signed area and the first moments of area about the y and x axes.
    pub(crate) fn moments(&self) -> (f64, f64, f64) {
        self.edges().fold((0.0, 0.0, 0.0), |(area, mx, my), (a, b)| {
            let cross = a.x * b.y - b.x * a.y;
            (
                area + cross / 2.0,
                mx + (a.x + b.x) * cross / 6.0,
                my + (a.y + b.y) * cross / 6.0,
            )
        })
    }

    fn is_closed_sequence(&self) -> bool {
        self.points.len() > 1 && Curve::is_closed(self)
    }

    /// Adds a vertex. In a closed ring the vertex goes before the closing point.
    pub fn add_point(&mut self, coord: Coord) {
        if self.is_closed_sequence() {
            let index = self.points.len() - 1;
            self.points.insert(index, coord);
        } else {
            self.points.push(coord);
        }
    }

    /// Removes a vertex. Removing either end of a closed ring moves the closing point too.
    pub fn remove_point(&mut self, index: usize) -> Result<Coord> {
        let len = self.points.len();
        if index >= len {
            return Err(GeometryError::out_of_range(index, len));
        }

        let last = len - 1;
        if self.is_closed_sequence() && (index == 0 || index == last) {
            let removed = self.points.remove(0);
            self.points.pop();
            if let Some(first) = self.points.first().copied() {
                self.points.push(first);
            }
            Ok(removed)
        } else {
            Ok(self.points.remove(index))
        }
    }

    /// Replaces a vertex. Setting either end of a closed ring updates both of them.
    pub fn set_point(&mut self, index: usize, coord: Coord) -> Result<()> {
        let len = self.points.len();
        if index >= len {
            return Err(GeometryError::out_of_range(index, len));
        }

        let last = len - 1;
        if self.is_closed_sequence() && (index == 0 || index == last) {
            self.points[0] = coord;
            self.points[last] = coord;
        } else {
            self.points[index] = coord;
        }

        Ok(())
    }

    /// Consumes the ring returning its points.
    pub fn into_coords(self) -> Vec<Coord> {
        self.points
    }
}

impl Curve for LinearRing {
    fn coords(&self) -> &[Coord] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;

    fn square(size: f64) -> LinearRing {
        LinearRing::closing(vec![
            Coord::new(0.0, 0.0),
            Coord::new(size, 0.0),
            Coord::new(size, size),
            Coord::new(0.0, size),
        ])
        .expect("valid ring")
    }

    #[test]
    fn area() {
        let ring = LinearRing::closing(vec![
            Coord::new(0.0, 0.0),
            Coord::new(0.0, 1.0),
            Coord::new(1.0, 0.0),
        ])
        .expect("valid ring");
        assert_eq!(ring.signed_area(), -0.5);

        let ring = LinearRing::closing(vec![
            Coord::new(0.0, 0.0),
            Coord::new(1.0, 0.0),
            Coord::new(0.0, 1.0),
        ])
        .expect("valid ring");
        assert_eq!(ring.signed_area(), 0.5);
        assert_eq!(ring.area(), 0.5);
    }

    #[test]
    fn winding() {
        let ring = square(2.0);
        assert_eq!(ring.winding(), Winding::CounterClockwise);
        assert!(ring.is_ccw());

        let reversed = ring.reversed();
        assert_eq!(reversed.winding(), Winding::Clockwise);
        assert_abs_diff_eq!(reversed.signed_area(), -ring.signed_area());
        assert_abs_diff_eq!(reversed.area(), ring.area());
        assert_eq!(Winding::Clockwise.opposite(), Winding::CounterClockwise);
    }

    #[test]
    fn degenerate_ring_is_clockwise() {
        let ring = LinearRing::new(vec![
            Coord::new(0.0, 0.0),
            Coord::new(1.0, 1.0),
            Coord::new(2.0, 2.0),
            Coord::new(0.0, 0.0),
        ])
        .expect("valid ring");
        assert_eq!(ring.signed_area(), 0.0);
        assert_eq!(ring.winding(), Winding::Clockwise);
    }

    #[test]
    fn empty_ring() {
        let ring = LinearRing::new(vec![]).expect("empty ring is valid");
        assert!(ring.is_empty());
        assert_eq!(ring.signed_area(), 0.0);
        assert_eq!(ring.bounding_box(), None);
        assert_matches!(ring.start_point(), Err(GeometryError::EmptyGeometry));
    }

    #[test]
    fn malformed_rings() {
        assert_matches!(
            LinearRing::new(vec![
                Coord::new(0.0, 0.0),
                Coord::new(1.0, 0.0),
                Coord::new(0.0, 0.0),
            ]),
            Err(GeometryError::MalformedRing(_))
        );
        assert_matches!(
            LinearRing::new(vec![
                Coord::new(0.0, 0.0),
                Coord::new(1.0, 0.0),
                Coord::new(1.0, 1.0),
                Coord::new(0.0, 1.0),
            ]),
            Err(GeometryError::MalformedRing(_))
        );
    }

    #[test]
    fn ring_is_a_closed_curve() {
        let ring = square(1.0);
        assert_eq!(ring.num_points(), 5);
        assert!(ring.is_ring());
        assert_abs_diff_eq!(ring.length(), 4.0);
        assert_eq!(ring.start_point(), ring.end_point());
    }

    #[test]
    fn mutation_keeps_ring_closed() {
        let mut ring = square(1.0);
        ring.add_point(Coord::new(-1.0, 0.5));
        assert_eq!(ring.num_points(), 6);
        assert!(ring.is_closed());
        assert_abs_diff_eq!(ring.area(), 1.5);

        ring.set_point(0, Coord::new(0.0, -1.0)).expect("in range");
        assert_eq!(ring.end_point().ok(), ring.start_point().ok());

        ring.remove_point(0).expect("in range");
        assert_eq!(ring.num_points(), 5);
        assert!(ring.is_closed());
        assert_eq!(ring.start_point().ok(), Some(Coord::new(1.0, 0.0).into()));
        assert!(ring.validate().is_ok());

        assert_matches!(
            ring.set_point(10, Coord::default()),
            Err(GeometryError::IndexOutOfRange { index: 10, len: 5 })
        );
    }

    #[test]
    fn moments_give_centroid() {
        let (area, mx, my) = square(2.0).moments();
        assert_abs_diff_eq!(area, 4.0);
        assert_abs_diff_eq!(mx / area, 1.0);
        assert_abs_diff_eq!(my / area, 1.0);
    }
}
