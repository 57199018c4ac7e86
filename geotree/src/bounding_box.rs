use serde::{Deserialize, Serialize};

use crate::linear_ring::LinearRing;
use crate::point::Coord;
use crate::polygon::Polygon;

/// Axis aligned rectangle.
///
/// A box always satisfies `x_min <= x_max` and `y_min <= y_max`. Absence of a box (e.g. the box of
/// an empty geometry) is represented with `Option<BoundingBox>`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

impl BoundingBox {
    /// Creates a new box. The bounds are swapped if given in the wrong order.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min: x_min.min(x_max),
            y_min: y_min.min(y_max),
            x_max: x_min.max(x_max),
            y_max: y_min.max(y_max),
        }
    }

    /// Creates the box spanned by two opposite corners.
    pub fn from_corners(a: &Coord, b: &Coord) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// Degenerate box containing a single position.
    pub fn from_coord(c: &Coord) -> Self {
        Self {
            x_min: c.x,
            y_min: c.y,
            x_max: c.x,
            y_max: c.y,
        }
    }

    /// Smallest box containing all the given positions, or `None` if there are none.
    pub fn from_coords<'a>(coords: impl IntoIterator<Item = &'a Coord>) -> Option<Self> {
        let mut coords = coords.into_iter();
        let first = coords.next()?;
        let mut bbox = Self::from_coord(first);

        for c in coords {
            bbox.x_min = bbox.x_min.min(c.x);
            bbox.y_min = bbox.y_min.min(c.y);
            bbox.x_max = bbox.x_max.max(c.x);
            bbox.y_max = bbox.y_max.max(c.y);
        }

        Some(bbox)
    }

    /// Joins all the boxes into one. `None` if the iterator is empty.
    pub fn join_all(boxes: impl IntoIterator<Item = BoundingBox>) -> Option<Self> {
        boxes.into_iter().reduce(|acc, b| acc.join(&b))
    }

    /// Joins two optional boxes: an absent box leaves the other one unchanged.
    pub fn join_opt(a: Option<BoundingBox>, b: Option<BoundingBox>) -> Option<BoundingBox> {
        match (a, b) {
            (Some(a), Some(b)) => Some(a.join(&b)),
            (a, None) => a,
            (None, b) => b,
        }
    }

    /// Lower-left corner.
    pub fn min(&self) -> Coord {
        Coord::new(self.x_min, self.y_min)
    }

    /// Upper-right corner.
    pub fn max(&self) -> Coord {
        Coord::new(self.x_max, self.y_max)
    }

    /// Minimum x.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Maximum x.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Minimum y.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Maximum y.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Size along the x axis.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Size along the y axis.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Area of the box.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Smallest box covering both `self` and `other`.
    pub fn join(&self, other: &Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Arithmetic middle of the box.
    ///
    /// This is the centroid of the box itself, not of the geometry the box was computed for.
    pub fn centroid(&self) -> Coord {
        Coord::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Returns true if the point is inside the box or on its boundary.
    pub fn contains(&self, point: &Coord) -> bool {
        self.x_min <= point.x
            && self.x_max >= point.x
            && self.y_min <= point.y
            && self.y_max >= point.y
    }

    /// Returns true if `other` is completely inside `self`.
    pub fn contains_box(&self, other: &Self) -> bool {
        self.x_min <= other.x_min
            && self.y_min <= other.y_min
            && self.x_max >= other.x_max
            && self.y_max >= other.y_max
    }

    /// Returns true if the boxes share at least one point.
    pub fn intersects(&self, other: &Self) -> bool {
        self.x_min <= other.x_max
            && self.x_max >= other.x_min
            && self.y_min <= other.y_max
            && self.y_max >= other.y_min
    }

    /// Returns true if the point lies exactly on the boundary of the box.
    pub fn touches(&self, point: &Coord) -> bool {
        self.contains(point)
            && (point.x == self.x_min
                || point.x == self.x_max
                || point.y == self.y_min
                || point.y == self.y_max)
    }

    /// Distance from the point to the box. Zero for points inside the box.
    pub fn distance(&self, point: &Coord) -> f64 {
        let dx = (self.x_min - point.x).max(point.x - self.x_max).max(0.0);
        let dy = (self.y_min - point.y).max(point.y - self.y_max).max(0.0);
        dx.hypot(dy)
    }

    /// Closed counter-clockwise ring along the box boundary, starting at the lower-left corner.
    pub fn to_ring(&self) -> LinearRing {
        LinearRing::closed_unchecked(vec![
            Coord::new(self.x_min, self.y_min),
            Coord::new(self.x_max, self.y_min),
            Coord::new(self.x_max, self.y_max),
            Coord::new(self.x_min, self.y_max),
            Coord::new(self.x_min, self.y_min),
        ])
    }

    /// The box as a polygon without holes.
    pub fn to_polygon(&self) -> Polygon {
        Polygon::new(self.to_ring(), vec![])
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::traits::Curve;

    fn a() -> BoundingBox {
        BoundingBox::new(0.0, 0.0, 2.0, 2.0)
    }

    fn b() -> BoundingBox {
        BoundingBox::new(1.0, -1.0, 3.0, 1.0)
    }

    fn c() -> BoundingBox {
        BoundingBox::new(-5.0, 4.0, -4.0, 6.0)
    }

    #[test]
    fn new_normalizes_bounds() {
        let bbox = BoundingBox::from_corners(&Coord::new(3.0, 1.0), &Coord::new(1.0, 4.0));
        assert_eq!(bbox.min(), Coord::new(1.0, 1.0));
        assert_eq!(bbox.max(), Coord::new(3.0, 4.0));
    }

    #[test]
    fn join_is_commutative_and_associative() {
        assert_eq!(a().join(&b()), b().join(&a()));
        assert_eq!(a().join(&b()).join(&c()), a().join(&b().join(&c())));
        assert_eq!(a().join(&b()), BoundingBox::new(0.0, -1.0, 3.0, 2.0));
    }

    #[test]
    fn join_with_self_is_noop() {
        assert_eq!(a().join(&a()), a());
    }

    #[test]
    fn join_with_absent_box() {
        assert_eq!(BoundingBox::join_opt(Some(a()), None), Some(a()));
        assert_eq!(BoundingBox::join_opt(None, Some(a())), Some(a()));
        assert_eq!(BoundingBox::join_opt(None, None), None);
        assert_eq!(BoundingBox::join_all(Vec::new()), None);
        assert_eq!(
            BoundingBox::join_all([a(), b(), c()]),
            Some(BoundingBox::new(-5.0, -1.0, 3.0, 6.0))
        );
    }

    #[test]
    fn from_coords() {
        let coords = [
            Coord::new(1.0, 5.0),
            Coord::new(-1.0, 2.0),
            Coord::new(4.0, 3.0),
        ];
        assert_eq!(
            BoundingBox::from_coords(&coords),
            Some(BoundingBox::new(-1.0, 2.0, 4.0, 5.0))
        );
        assert_eq!(BoundingBox::from_coords(std::iter::empty()), None);
    }

    #[test]
    fn distance() {
        let bbox = a();
        assert_eq!(bbox.distance(&Coord::new(1.0, 1.0)), 0.0);
        assert_eq!(bbox.distance(&Coord::new(2.0, 1.0)), 0.0);
        assert_abs_diff_eq!(bbox.distance(&Coord::new(4.0, 1.0)), 2.0);
        assert_abs_diff_eq!(bbox.distance(&Coord::new(1.0, -3.0)), 3.0);
        assert_abs_diff_eq!(bbox.distance(&Coord::new(5.0, 6.0)), 5.0);
    }

    #[test]
    fn touches_only_on_boundary() {
        let bbox = a();
        assert!(bbox.touches(&Coord::new(0.0, 1.0)));
        assert!(bbox.touches(&Coord::new(2.0, 2.0)));
        assert!(!bbox.touches(&Coord::new(1.0, 1.0)));
        assert!(!bbox.touches(&Coord::new(3.0, 2.0)));
    }

    #[test]
    fn centroid_and_size() {
        let bbox = b();
        assert_eq!(bbox.centroid(), Coord::new(2.0, 0.0));
        assert_eq!(bbox.width(), 2.0);
        assert_eq!(bbox.height(), 2.0);
        assert_eq!(bbox.area(), 4.0);
    }

    #[test]
    fn intersection_tests() {
        assert!(a().intersects(&b()));
        assert!(!a().intersects(&c()));
        assert!(a().join(&c()).contains_box(&c()));
        assert!(!a().contains_box(&b()));
    }

    #[test]
    fn polygon_from_box() {
        let polygon = a().to_polygon();
        assert_abs_diff_eq!(polygon.exterior().signed_area(), 4.0);
        assert_eq!(polygon.exterior().num_points(), 5);
    }
}
