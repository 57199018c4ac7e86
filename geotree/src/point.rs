//! Coordinates and the point geometry.

use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Sub};

use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

use crate::bounding_box::BoundingBox;
use crate::error::{GeometryError, Result};
use crate::geometry_type::{Dimension, GeometryKind};
use crate::traits::Shape;

/// A position in the coordinate space. `z` is `0.0` for 2d data.
///
/// Ordering is lexicographic: by `x`, then `y`, then `z`.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Coord {
    /// X ordinate.
    pub x: f64,
    /// Y ordinate.
    pub y: f64,
    /// Z ordinate.
    pub z: f64,
}

impl Coord {
    /// Creates a 2d coordinate (`z` is zero).
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Creates a coordinate with all three ordinates.
    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance between two positions, including the z ordinate.
    pub fn distance(&self, other: &Coord) -> f64 {
        nalgebra::distance(&Point3::from(*self), &Point3::from(*other))
    }

    /// Euclidean distance in the xy plane.
    pub fn distance_2d(&self, other: &Coord) -> f64 {
        nalgebra::distance(&Point2::from(*self), &Point2::from(*other))
    }

    /// Compares positions in the xy plane only.
    pub fn eq_2d(&self, other: &Coord) -> bool {
        self.x == other.x && self.y == other.y
    }
}

fn hash_ordinate<H: Hasher>(value: f64, state: &mut H) {
    // 0.0 and -0.0 compare equal, so they must hash equally
    let value = if value == 0.0 { 0.0 } else { value };
    value.to_bits().hash(state);
}

// Ordinates are compared exactly; NaN coordinates are not supported.
impl Eq for Coord {}

impl Hash for Coord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ordinate(self.x, state);
        hash_ordinate(self.y, state);
        hash_ordinate(self.z, state);
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Self) -> Self::Output {
        Coord::new_3d(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Self) -> Self::Output {
        Coord::new_3d(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Coord {
    type Output = Coord;

    fn mul(self, rhs: f64) -> Self::Output {
        Coord::new_3d(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl From<Coord> for Point2<f64> {
    fn from(value: Coord) -> Self {
        Point2::new(value.x, value.y)
    }
}

impl From<Coord> for Point3<f64> {
    fn from(value: Coord) -> Self {
        Point3::new(value.x, value.y, value.z)
    }
}

impl From<Point2<f64>> for Coord {
    fn from(value: Point2<f64>) -> Self {
        Coord::new(value.x, value.y)
    }
}

impl From<Point3<f64>> for Coord {
    fn from(value: Point3<f64>) -> Self {
        Coord::new_3d(value.x, value.y, value.z)
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Coord::new(x, y)
    }
}

impl From<(f64, f64, f64)> for Coord {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Coord::new_3d(x, y, z)
    }
}

/// Point geometry.
///
/// A point is either empty or holds a [`Coord`]. Empty is a separate state, not a sentinel
/// coordinate value, and reading an ordinate of an empty point fails with
/// [`GeometryError::EmptyGeometry`]. Setting any ordinate of an empty point makes it non-empty,
/// with the other ordinates at zero.
///
/// Two points are equal when both are empty, or when all their ordinates are exactly equal.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Point {
    coord: Option<Coord>,
}

impl Point {
    /// Creates a 2d point.
    pub fn new(x: f64, y: f64) -> Self {
        Coord::new(x, y).into()
    }

    /// Creates a point with a z ordinate.
    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Coord::new_3d(x, y, z).into()
    }

    /// Creates an empty point.
    pub fn empty() -> Self {
        Self { coord: None }
    }

    /// Creates a point from degrees, minutes and seconds of longitude and latitude. Western and
    /// southern values must have all three components negative.
    pub fn from_dms(
        long_degrees: f64,
        long_minutes: f64,
        long_seconds: f64,
        lat_degrees: f64,
        lat_minutes: f64,
        lat_seconds: f64,
    ) -> Self {
        Self::new(
            long_degrees + long_minutes / 60.0 + long_seconds / 3600.0,
            lat_degrees + lat_minutes / 60.0 + lat_seconds / 3600.0,
        )
    }

    /// Returns true if no coordinate was ever assigned.
    pub fn is_empty(&self) -> bool {
        self.coord.is_none()
    }

    /// Coordinate of the point.
    pub fn coord(&self) -> Result<Coord> {
        self.coord.ok_or(GeometryError::EmptyGeometry)
    }

    /// Coordinate of the point, `None` if the point is empty.
    pub fn try_coord(&self) -> Option<Coord> {
        self.coord
    }

    /// X ordinate.
    pub fn x(&self) -> Result<f64> {
        Ok(self.coord()?.x)
    }

    /// Y ordinate.
    pub fn y(&self) -> Result<f64> {
        Ok(self.coord()?.y)
    }

    /// Z ordinate.
    pub fn z(&self) -> Result<f64> {
        Ok(self.coord()?.z)
    }

    /// Ordinate by index: 0 is x, 1 is y, 2 is z.
    pub fn ordinate(&self, index: usize) -> Result<f64> {
        let coord = self.coord()?;
        match index {
            0 => Ok(coord.x),
            1 => Ok(coord.y),
            2 => Ok(coord.z),
            _ => Err(GeometryError::out_of_range(index, Self::NUM_ORDINATES)),
        }
    }

    /// Number of ordinates a point carries.
    pub const NUM_ORDINATES: usize = 3;

    /// Sets the ordinate by index: 0 is x, 1 is y, 2 is z.
    pub fn set_ordinate(&mut self, index: usize, value: f64) -> Result<()> {
        match index {
            0 => self.coord_mut().x = value,
            1 => self.coord_mut().y = value,
            2 => self.coord_mut().z = value,
            _ => return Err(GeometryError::out_of_range(index, Self::NUM_ORDINATES)),
        }

        Ok(())
    }

    /// Sets the x ordinate.
    pub fn set_x(&mut self, x: f64) {
        self.coord_mut().x = x;
    }

    /// Sets the y ordinate.
    pub fn set_y(&mut self, y: f64) {
        self.coord_mut().y = y;
    }

    /// Sets the z ordinate.
    pub fn set_z(&mut self, z: f64) {
        self.coord_mut().z = z;
    }

    /// Replaces the coordinate of the point.
    pub fn set_coord(&mut self, coord: Coord) {
        self.coord = Some(coord);
    }

    fn coord_mut(&mut self) -> &mut Coord {
        self.coord.get_or_insert_with(Coord::default)
    }

    /// Distance to another point, including the z ordinate.
    pub fn distance(&self, other: &Point) -> Result<f64> {
        Ok(self.coord()?.distance(&other.coord()?))
    }
}

impl Shape for Point {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Point
    }

    fn dimension(&self) -> Dimension {
        Dimension::Point
    }

    fn is_empty(&self) -> bool {
        self.coord.is_none()
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        self.coord.map(|c| BoundingBox::from_coord(&c))
    }

    fn num_points(&self) -> usize {
        usize::from(self.coord.is_some())
    }
}

impl From<Coord> for Point {
    fn from(value: Coord) -> Self {
        Self { coord: Some(value) }
    }
}

impl PartialOrd for Point {
    /// Empty points sort before all non-empty ones.
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.coord.partial_cmp(&other.coord)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;

    fn hash_of(p: &Point) -> u64 {
        let mut hasher = DefaultHasher::new();
        p.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn empty_point_fails_on_read() {
        let p = Point::empty();
        assert!(p.is_empty());
        assert_matches!(p.x(), Err(GeometryError::EmptyGeometry));
        assert_matches!(p.ordinate(2), Err(GeometryError::EmptyGeometry));
        assert_eq!(p.bounding_box(), None);
    }

    #[test]
    fn setting_ordinate_makes_point_non_empty() {
        let mut p = Point::empty();
        p.set_y(5.0);
        assert!(!p.is_empty());
        assert_eq!(p.coord(), Ok(Coord::new(0.0, 5.0)));

        assert_matches!(
            p.set_ordinate(3, 1.0),
            Err(GeometryError::IndexOutOfRange { index: 3, len: 3 })
        );
        p.set_ordinate(2, 7.0).expect("valid ordinate");
        assert_eq!(p.z(), Ok(7.0));
    }

    #[test]
    fn equality_includes_empty_state() {
        assert_eq!(Point::empty(), Point::empty());
        assert_ne!(Point::empty(), Point::new(0.0, 0.0));
        assert_eq!(Point::new(1.0, 2.0), Point::new_3d(1.0, 2.0, 0.0));
        assert_ne!(Point::new(1.0, 2.0), Point::new_3d(1.0, 2.0, 0.5));
    }

    #[test]
    fn hash_is_consistent_with_equality() {
        assert_eq!(hash_of(&Point::new(0.0, 1.0)), hash_of(&Point::new(-0.0, 1.0)));

        let set: HashSet<Point> = [
            Point::new(1.0, 1.0),
            Point::new(1.0, 1.0),
            Point::empty(),
            Point::empty(),
            Point::new(1.0, 2.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn distance_uses_all_ordinates() {
        let a = Point::new_3d(0.0, 0.0, 0.0);
        let b = Point::new_3d(1.0, 2.0, 2.0);
        assert_abs_diff_eq!(a.distance(&b).expect("non-empty"), 3.0);
        assert_matches!(a.distance(&Point::empty()), Err(GeometryError::EmptyGeometry));
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(Point::new(1.0, 5.0) < Point::new(2.0, 0.0));
        assert!(Point::new(1.0, 1.0) < Point::new(1.0, 2.0));
        assert!(Point::new_3d(1.0, 1.0, 0.0) < Point::new_3d(1.0, 1.0, 1.0));
        assert!(Point::empty() < Point::new(-100.0, -100.0));
    }

    #[test]
    fn from_dms() {
        let p = Point::from_dms(54.0, 30.0, 0.0, 24.0, 15.0, 36.0);
        assert_abs_diff_eq!(p.x().expect("non-empty"), 54.5);
        assert_abs_diff_eq!(p.y().expect("non-empty"), 24.26, epsilon = 1e-12);
    }

    #[test]
    fn coord_arithmetic() {
        let a = Coord::new_3d(1.0, 2.0, 3.0);
        let b = Coord::new_3d(0.5, 0.5, 0.5);
        assert_eq!(a + b, Coord::new_3d(1.5, 2.5, 3.5));
        assert_eq!(a - b, Coord::new_3d(0.5, 1.5, 2.5));
        assert_eq!(a * 2.0, Coord::new_3d(2.0, 4.0, 6.0));
    }

    #[test]
    fn nalgebra_conversion() {
        let c = Coord::new_3d(1.0, 2.0, 3.0);
        let p3: Point3<f64> = c.into();
        assert_eq!(Coord::from(p3), c);
        let p2: Point2<f64> = c.into();
        assert_eq!(Coord::from(p2), Coord::new(1.0, 2.0));
    }
}
