use serde::{Deserialize, Serialize};

use crate::bounding_box::BoundingBox;
use crate::error::{GeometryError, Result};
use crate::geometry_type::{Dimension, GeometryKind};
use crate::linear_ring::LinearRing;
use crate::point::{Coord, Point};
use crate::traits::{Curve, Shape, Surface};

/// Planar surface bounded by one exterior ring, with zero or more holes.
///
/// Holes are expected to lie inside the exterior ring and to wind in the opposite direction. The
/// winding is not checked or fixed: a hole wound the same way as the exterior adds its area to the
/// polygon area instead of subtracting it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Polygon {
    exterior: LinearRing,
    interiors: Vec<LinearRing>,
}

impl Polygon {
    /// Creates a new polygon.
    pub fn new(exterior: LinearRing, interiors: Vec<LinearRing>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    /// Exterior ring.
    pub fn exterior(&self) -> &LinearRing {
        &self.exterior
    }

    /// Mutable access to the exterior ring.
    pub fn exterior_mut(&mut self) -> &mut LinearRing {
        &mut self.exterior
    }

    /// Holes of the polygon.
    pub fn interiors(&self) -> &[LinearRing] {
        &self.interiors
    }

    /// Number of holes.
    pub fn num_interior_rings(&self) -> usize {
        self.interiors.len()
    }

    /// Hole by zero-based index.
    pub fn interior_ring_n(&self, index: usize) -> Result<&LinearRing> {
        self.interiors
            .get(index)
            .ok_or_else(|| GeometryError::out_of_range(index, self.interiors.len()))
    }

    /// Adds a hole.
    pub fn add_interior_ring(&mut self, ring: LinearRing) {
        self.interiors.push(ring);
    }

    /// Exterior ring followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    /// Consumes the polygon returning the exterior ring and the holes.
    pub fn into_rings(self) -> (LinearRing, Vec<LinearRing>) {
        (self.exterior, self.interiors)
    }

    /// `-1` for holes that are subtracted from the exterior, `+1` for holes that are added to it.
    fn hole_sign(&self, hole: &LinearRing) -> f64 {
        if hole.winding() == self.exterior.winding() {
            1.0
        } else {
            -1.0
        }
    }

    /// Area and first moments of area aggregated over all rings.
    pub(crate) fn moments(&self) -> (f64, f64, f64) {
        let signed = |ring: &LinearRing| {
            let (area, mx, my) = ring.moments();
            let sign = area.signum();
            (area.abs(), mx * sign, my * sign)
        };

        let exterior = signed(&self.exterior);
        self.interiors
            .iter()
            .fold(exterior, |(area, mx, my), hole| {
                let k = self.hole_sign(hole);
                let (h_area, h_mx, h_my) = signed(hole);
                (area + k * h_area, mx + k * h_mx, my + k * h_my)
            })
    }
}

impl Shape for Polygon {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Polygon
    }

    fn dimension(&self) -> Dimension {
        Dimension::Surface
    }

    fn is_empty(&self) -> bool {
        self.rings().all(LinearRing::is_empty)
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        self.rings()
            .map(LinearRing::bounding_box)
            .fold(None, BoundingBox::join_opt)
    }

    fn num_points(&self) -> usize {
        self.rings().map(|ring| ring.coords().len()).sum()
    }
}

impl Surface for Polygon {
    fn area(&self) -> f64 {
        self.exterior.area()
            + self
                .interiors
                .iter()
                .map(|hole| self.hole_sign(hole) * hole.area())
                .sum::<f64>()
    }

    fn centroid(&self) -> Result<Point> {
        let bbox = self.exterior.bounding_box().ok_or(GeometryError::EmptyGeometry)?;
        let (area, mx, my) = self.moments();
        if area == 0.0 {
            return Ok(bbox.centroid().into());
        }

        Ok(Coord::new(mx / area, my / area).into())
    }

    fn point_on_surface(&self) -> Result<Point> {
        self.exterior.start_point()
    }
}

impl From<LinearRing> for Polygon {
    fn from(exterior: LinearRing) -> Self {
        Self::new(exterior, vec![])
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;

    fn ring(points: &[(f64, f64)]) -> LinearRing {
        LinearRing::closing(points.iter().map(|&p| Coord::from(p)).collect()).expect("valid ring")
    }

    fn exterior() -> LinearRing {
        ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
    }

    fn hole() -> LinearRing {
        ring(&[(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 1.0)])
    }

    #[test]
    fn area_without_holes() {
        let polygon = Polygon::from(exterior());
        assert_abs_diff_eq!(polygon.area(), polygon.exterior().area());
        assert_abs_diff_eq!(polygon.area(), 16.0);
    }

    #[test]
    fn hole_is_subtracted() {
        let polygon = Polygon::new(exterior(), vec![hole()]);
        assert_abs_diff_eq!(polygon.area(), 15.0);
    }

    #[test]
    fn same_winding_hole_is_added() {
        let polygon = Polygon::new(exterior(), vec![hole().reversed()]);
        assert_abs_diff_eq!(polygon.area(), 17.0);
    }

    #[test]
    fn area_does_not_depend_on_exterior_winding() {
        let polygon = Polygon::new(exterior().reversed(), vec![hole().reversed()]);
        assert_abs_diff_eq!(polygon.area(), 15.0);
    }

    #[test]
    fn centroid() {
        let polygon = Polygon::from(exterior());
        let centroid = polygon.centroid().expect("non-empty");
        assert_abs_diff_eq!(centroid.x().expect("x"), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(centroid.y().expect("y"), 2.0, epsilon = 1e-12);

        let polygon = Polygon::new(exterior(), vec![hole()]);
        let centroid = polygon.centroid().expect("non-empty");
        assert_abs_diff_eq!(centroid.x().expect("x"), 30.5 / 15.0, epsilon = 1e-12);
        assert_abs_diff_eq!(centroid.y().expect("y"), 30.5 / 15.0, epsilon = 1e-12);

        let reversed = Polygon::new(exterior().reversed(), vec![hole().reversed()]);
        let same = reversed.centroid().expect("non-empty");
        assert_abs_diff_eq!(same.x().expect("x"), 30.5 / 15.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_centroid_uses_box() {
        let polygon = Polygon::from(ring(&[(0.0, 0.0), (2.0, 2.0), (4.0, 4.0)]));
        assert_eq!(polygon.centroid(), Ok(Point::new(2.0, 2.0)));
    }

    #[test]
    fn empty_polygon() {
        let polygon = Polygon::default();
        assert!(polygon.is_empty());
        assert_eq!(polygon.bounding_box(), None);
        assert_matches!(polygon.centroid(), Err(GeometryError::EmptyGeometry));
        assert_matches!(
            polygon.point_on_surface(),
            Err(GeometryError::EmptyGeometry)
        );
    }

    #[test]
    fn rings_access() {
        let polygon = Polygon::new(exterior(), vec![hole()]);
        assert_eq!(polygon.num_interior_rings(), 1);
        assert_eq!(polygon.interior_ring_n(0), Ok(&hole()));
        assert_matches!(
            polygon.interior_ring_n(1),
            Err(GeometryError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(polygon.num_points(), 10);
        assert_eq!(polygon.point_on_surface(), Ok(Point::new(0.0, 0.0)));
        assert_eq!(
            polygon.bounding_box(),
            Some(BoundingBox::new(0.0, 0.0, 4.0, 4.0))
        );
    }
}
