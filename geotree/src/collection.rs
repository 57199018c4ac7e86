//! Collections of geometries.
//!
//! All four collection kinds share the same representation, [`Collection`], parametrized by the
//! member type. The homogeneous collections ([`MultiPoint`], [`MultiLineString`],
//! [`MultiPolygon`]) hold members of one concrete type, while [`GeometryCollection`] holds any
//! [`Geometry`].

use serde::{Deserialize, Serialize};

use crate::bounding_box::BoundingBox;
use crate::error::{GeometryError, Result};
use crate::geometry::Geometry;
use crate::geometry_type::{Dimension, GeometryKind};
use crate::line_string::LineString;
use crate::point::{Coord, Point};
use crate::polygon::Polygon;
use crate::traits::{Curve, MultiCurve, MultiSurface, Shape, Surface};

/// Geometry type that can be a member of a [`Collection`].
pub trait CollectionMember: Shape + Clone {
    /// Kind of the collection holding members of this type.
    const COLLECTION_KIND: GeometryKind;
}

impl CollectionMember for Point {
    const COLLECTION_KIND: GeometryKind = GeometryKind::MultiPoint;
}

impl CollectionMember for LineString {
    const COLLECTION_KIND: GeometryKind = GeometryKind::MultiLineString;
}

impl CollectionMember for Polygon {
    const COLLECTION_KIND: GeometryKind = GeometryKind::MultiPolygon;
}

impl CollectionMember for Geometry {
    const COLLECTION_KIND: GeometryKind = GeometryKind::GeometryCollection;
}

/// Ordered set of geometries addressable by index.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Collection<G> {
    parts: Vec<G>,
}

/// A set of points.
pub type MultiPoint = Collection<Point>;
/// A set of line strings.
pub type MultiLineString = Collection<LineString>;
/// A set of polygons.
pub type MultiPolygon = Collection<Polygon>;
/// A set of geometries of any kinds.
pub type GeometryCollection = Collection<Geometry>;

impl<G> Default for Collection<G> {
    fn default() -> Self {
        Self { parts: Vec::new() }
    }
}

impl<G: CollectionMember> Collection<G> {
    /// Creates a new collection.
    pub fn new(parts: Vec<G>) -> Self {
        Self { parts }
    }

    /// Number of members.
    pub fn num_geometries(&self) -> usize {
        self.parts.len()
    }

    /// Member by zero-based index.
    pub fn geometry_n(&self, index: usize) -> Result<&G> {
        self.parts
            .get(index)
            .ok_or_else(|| GeometryError::out_of_range(index, self.parts.len()))
    }

    /// Mutable member by zero-based index.
    pub fn geometry_n_mut(&mut self, index: usize) -> Result<&mut G> {
        let len = self.parts.len();
        self.parts
            .get_mut(index)
            .ok_or_else(|| GeometryError::out_of_range(index, len))
    }

    /// Appends a member.
    pub fn push(&mut self, geometry: G) {
        self.parts.push(geometry);
    }

    /// Removes the member at `index`.
    pub fn remove(&mut self, index: usize) -> Result<G> {
        if index >= self.parts.len() {
            return Err(GeometryError::out_of_range(index, self.parts.len()));
        }

        Ok(self.parts.remove(index))
    }

    /// Members of the collection.
    pub fn parts(&self) -> &[G] {
        &self.parts
    }

    /// Iterates over the members.
    pub fn iter(&self) -> impl Iterator<Item = &G> {
        self.parts.iter()
    }

    /// Consumes the collection returning its members.
    pub fn into_parts(self) -> Vec<G> {
        self.parts
    }
}

impl<G: CollectionMember> Shape for Collection<G> {
    fn kind(&self) -> GeometryKind {
        G::COLLECTION_KIND
    }

    fn dimension(&self) -> Dimension {
        match G::COLLECTION_KIND.member_kind() {
            Some(member) => member.dimension(),
            None => self
                .parts
                .iter()
                .map(Shape::dimension)
                .max()
                .unwrap_or(Dimension::Empty),
        }
    }

    fn is_empty(&self) -> bool {
        self.parts.iter().all(Shape::is_empty)
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        self.parts
            .iter()
            .map(Shape::bounding_box)
            .fold(None, BoundingBox::join_opt)
    }

    fn num_points(&self) -> usize {
        self.parts.iter().map(Shape::num_points).sum()
    }
}

impl<G: CollectionMember> From<Vec<G>> for Collection<G> {
    fn from(parts: Vec<G>) -> Self {
        Self::new(parts)
    }
}

impl<G: CollectionMember> FromIterator<G> for Collection<G> {
    fn from_iter<T: IntoIterator<Item = G>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, G> IntoIterator for &'a Collection<G> {
    type Item = &'a G;
    type IntoIter = std::slice::Iter<'a, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

impl MultiCurve for MultiLineString {
    fn length(&self) -> f64 {
        self.parts.iter().map(Curve::length).sum()
    }

    fn is_closed(&self) -> bool {
        !self.parts.is_empty() && self.parts.iter().all(Curve::is_closed)
    }
}

impl MultiSurface for MultiPolygon {
    fn area(&self) -> f64 {
        self.parts.iter().map(Surface::area).sum()
    }

    fn centroid(&self) -> Result<Point> {
        let bbox = self.bounding_box().ok_or(GeometryError::EmptyGeometry)?;
        let (area, mx, my) = self
            .parts
            .iter()
            .map(Polygon::moments)
            .fold((0.0, 0.0, 0.0), |acc, m| (acc.0 + m.0, acc.1 + m.1, acc.2 + m.2));

        if area == 0.0 {
            return Ok(bbox.centroid().into());
        }

        Ok(Coord::new(mx / area, my / area).into())
    }

    fn point_on_surface(&self) -> Result<Point> {
        self.parts
            .iter()
            .find(|polygon| !polygon.is_empty())
            .ok_or(GeometryError::EmptyGeometry)?
            .point_on_surface()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;
    use crate::linear_ring::LinearRing;

    fn square(x: f64, y: f64, size: f64) -> Polygon {
        LinearRing::closing(vec![
            Coord::new(x, y),
            Coord::new(x + size, y),
            Coord::new(x + size, y + size),
            Coord::new(x, y + size),
        ])
        .expect("valid ring")
        .into()
    }

    #[test]
    fn index_access() {
        let multi = MultiPoint::new(vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]);
        assert_eq!(multi.num_geometries(), 2);
        assert_eq!(multi.geometry_n(1), Ok(&Point::new(2.0, 2.0)));
        assert_matches!(
            multi.geometry_n(2),
            Err(GeometryError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(multi.iter().count(), multi.num_geometries());
    }

    #[test]
    fn emptiness() {
        assert!(MultiPoint::default().is_empty());
        assert!(MultiPoint::new(vec![Point::empty()]).is_empty());
        assert!(!MultiPoint::new(vec![Point::empty(), Point::new(0.0, 0.0)]).is_empty());

        let collection = GeometryCollection::new(vec![
            Geometry::Point(Point::empty()),
            Geometry::LineString(LineString::default()),
        ]);
        assert!(collection.is_empty());
    }

    #[test]
    fn dimension() {
        assert_eq!(MultiPoint::default().dimension(), Dimension::Point);
        assert_eq!(MultiPolygon::default().dimension(), Dimension::Surface);
        assert_eq!(GeometryCollection::default().dimension(), Dimension::Empty);

        let collection = GeometryCollection::new(vec![
            Geometry::Point(Point::new(0.0, 0.0)),
            Geometry::LineString(LineString::new(vec![Coord::new(0.0, 0.0)])),
        ]);
        assert_eq!(collection.dimension(), Dimension::Curve);
    }

    #[test]
    fn bounding_box_skips_empty_members() {
        let multi = MultiPoint::new(vec![
            Point::new(1.0, 5.0),
            Point::empty(),
            Point::new(-1.0, 2.0),
        ]);
        assert_eq!(
            multi.bounding_box(),
            Some(BoundingBox::new(-1.0, 2.0, 1.0, 5.0))
        );
        assert_eq!(multi.num_points(), 2);
        assert_eq!(MultiPoint::default().bounding_box(), None);
    }

    #[test]
    fn multi_line_string() {
        let multi = MultiLineString::new(vec![
            LineString::new(vec![
                Coord::new(0.0, 0.0),
                Coord::new(1.0, 0.0),
                Coord::new(0.0, 0.0),
            ]),
            LineString::new(vec![Coord::new(5.0, 5.0), Coord::new(5.0, 8.0)]),
        ]);
        assert_abs_diff_eq!(multi.length(), 5.0);
        assert!(!MultiCurve::is_closed(&multi));
        assert!(!MultiCurve::is_closed(&MultiLineString::default()));
    }

    #[test]
    fn multi_polygon() {
        let multi = MultiPolygon::new(vec![square(0.0, 0.0, 2.0), square(4.0, 0.0, 2.0)]);
        assert_abs_diff_eq!(multi.area(), 8.0);

        let centroid = multi.centroid().expect("non-empty");
        assert_abs_diff_eq!(centroid.x().expect("x"), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(centroid.y().expect("y"), 1.0, epsilon = 1e-12);
        assert_eq!(multi.point_on_surface(), Ok(Point::new(0.0, 0.0)));

        let empty = MultiPolygon::default();
        assert_matches!(empty.centroid(), Err(GeometryError::EmptyGeometry));
        assert_matches!(empty.point_on_surface(), Err(GeometryError::EmptyGeometry));
    }
}
