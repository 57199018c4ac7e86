use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::bounding_box::BoundingBox;
use crate::collection::{GeometryCollection, MultiLineString, MultiPoint, MultiPolygon};
use crate::error::{GeometryError, Result};
use crate::geometry_type::{Dimension, GeometryKind};
use crate::line_string::LineString;
use crate::point::{Coord, Point};
use crate::polygon::Polygon;
use crate::srs::Srid;
use crate::traits::{Curve, Shape};

/// Geometry of any kind.
///
/// A geometry owns all of its children, so a tree of geometries has no sharing and no cycles.
/// Equality compares the structure and the coordinates exactly, it is not topological equality.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum Geometry {
    /// Point.
    Point(Point),
    /// Line string.
    LineString(LineString),
    /// Polygon.
    Polygon(Polygon),
    /// Set of points.
    MultiPoint(MultiPoint),
    /// Set of line strings.
    MultiLineString(MultiLineString),
    /// Set of polygons.
    MultiPolygon(MultiPolygon),
    /// Set of geometries of any kinds.
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// Empty geometry of the given kind.
    pub fn empty(kind: GeometryKind) -> Self {
        match kind {
            GeometryKind::Point => Point::empty().into(),
            GeometryKind::LineString => LineString::default().into(),
            GeometryKind::Polygon => Polygon::default().into(),
            GeometryKind::MultiPoint => MultiPoint::default().into(),
            GeometryKind::MultiLineString => MultiLineString::default().into(),
            GeometryKind::MultiPolygon => MultiPolygon::default().into(),
            GeometryKind::GeometryCollection => GeometryCollection::default().into(),
        }
    }

    /// OGC type name of the geometry, e.g. `"MultiPolygon"`.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Bounding box of the geometry as a closed polygon, `None` for empty geometries.
    pub fn envelope(&self) -> Option<Polygon> {
        self.bounding_box().map(|bbox| bbox.to_polygon())
    }

    /// All positions of the geometry in traversal order.
    pub fn points(&self) -> Vec<Coord> {
        let mut points = Vec::with_capacity(self.num_points());
        self.collect_points(&mut points);
        points
    }

    fn collect_points(&self, target: &mut Vec<Coord>) {
        match self {
            Geometry::Point(v) => target.extend(v.try_coord()),
            Geometry::LineString(v) => target.extend_from_slice(v.coords()),
            Geometry::Polygon(v) => {
                for ring in v.rings() {
                    target.extend_from_slice(ring.coords());
                }
            }
            Geometry::MultiPoint(v) => target.extend(v.iter().filter_map(Point::try_coord)),
            Geometry::MultiLineString(v) => {
                for line in v {
                    target.extend_from_slice(line.coords());
                }
            }
            Geometry::MultiPolygon(v) => {
                for ring in v.iter().flat_map(Polygon::rings) {
                    target.extend_from_slice(ring.coords());
                }
            }
            Geometry::GeometryCollection(v) => {
                for member in v {
                    member.collect_points(target);
                }
            }
        }
    }

    /// Adds a point to the geometry.
    ///
    /// * an empty point gets the coordinate, a non-empty point cannot be extended;
    /// * a line string gets the point appended;
    /// * a polygon gets a new vertex in the exterior ring;
    /// * a multipoint gets a new member.
    ///
    /// Other kinds return [`GeometryError::UnsupportedOperation`].
    pub fn add_point(&mut self, coord: Coord) -> Result<()> {
        match self {
            Geometry::Point(v) if v.is_empty() => v.set_coord(coord),
            Geometry::LineString(v) => v.add_point(coord),
            Geometry::Polygon(v) => v.exterior_mut().add_point(coord),
            Geometry::MultiPoint(v) => v.push(coord.into()),
            _ => return Err(GeometryError::unsupported("add_point", self.kind())),
        }

        Ok(())
    }

    /// Removes the point at `index`. See [`Geometry::add_point`] for the supported kinds.
    pub fn remove_point(&mut self, index: usize) -> Result<Coord> {
        match self {
            Geometry::Point(v) => {
                let coord = v
                    .try_coord()
                    .filter(|_| index == 0)
                    .ok_or_else(|| {
                        GeometryError::out_of_range(index, usize::from(!v.is_empty()))
                    })?;
                *v = Point::empty();
                Ok(coord)
            }
            Geometry::LineString(v) => v.remove_point(index),
            Geometry::Polygon(v) => v.exterior_mut().remove_point(index),
            Geometry::MultiPoint(v) => {
                let coord = v.geometry_n(index)?.coord()?;
                v.remove(index)?;
                Ok(coord)
            }
            _ => Err(GeometryError::unsupported("remove_point", self.kind())),
        }
    }

    /// Replaces the point at `index`. See [`Geometry::add_point`] for the supported kinds.
    pub fn set_point(&mut self, index: usize, coord: Coord) -> Result<()> {
        match self {
            Geometry::Point(v) => {
                if index != 0 {
                    return Err(GeometryError::out_of_range(index, 1));
                }
                v.set_coord(coord);
                Ok(())
            }
            Geometry::LineString(v) => v.set_point(index, coord),
            Geometry::Polygon(v) => v.exterior_mut().set_point(index, coord),
            Geometry::MultiPoint(v) => {
                v.geometry_n_mut(index)?.set_coord(coord);
                Ok(())
            }
            _ => Err(GeometryError::unsupported("set_point", self.kind())),
        }
    }
}

impl Shape for Geometry {
    fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(v) => v.kind(),
            Geometry::LineString(v) => v.kind(),
            Geometry::Polygon(v) => v.kind(),
            Geometry::MultiPoint(v) => v.kind(),
            Geometry::MultiLineString(v) => v.kind(),
            Geometry::MultiPolygon(v) => v.kind(),
            Geometry::GeometryCollection(v) => v.kind(),
        }
    }

    fn dimension(&self) -> Dimension {
        match self {
            Geometry::Point(v) => v.dimension(),
            Geometry::LineString(v) => v.dimension(),
            Geometry::Polygon(v) => v.dimension(),
            Geometry::MultiPoint(v) => v.dimension(),
            Geometry::MultiLineString(v) => v.dimension(),
            Geometry::MultiPolygon(v) => v.dimension(),
            Geometry::GeometryCollection(v) => v.dimension(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(v) => Shape::is_empty(v),
            Geometry::LineString(v) => v.is_empty(),
            Geometry::Polygon(v) => v.is_empty(),
            Geometry::MultiPoint(v) => v.is_empty(),
            Geometry::MultiLineString(v) => v.is_empty(),
            Geometry::MultiPolygon(v) => v.is_empty(),
            Geometry::GeometryCollection(v) => v.is_empty(),
        }
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        match self {
            Geometry::Point(v) => v.bounding_box(),
            Geometry::LineString(v) => v.bounding_box(),
            Geometry::Polygon(v) => v.bounding_box(),
            Geometry::MultiPoint(v) => v.bounding_box(),
            Geometry::MultiLineString(v) => v.bounding_box(),
            Geometry::MultiPolygon(v) => v.bounding_box(),
            Geometry::GeometryCollection(v) => v.bounding_box(),
        }
    }

    fn num_points(&self) -> usize {
        match self {
            Geometry::Point(v) => Shape::num_points(v),
            Geometry::LineString(v) => Shape::num_points(v),
            Geometry::Polygon(v) => v.num_points(),
            Geometry::MultiPoint(v) => v.num_points(),
            Geometry::MultiLineString(v) => v.num_points(),
            Geometry::MultiPolygon(v) => v.num_points(),
            Geometry::GeometryCollection(v) => v.num_points(),
        }
    }
}

impl Display for Geometry {
    /// Writes the geometry as WKT, or `WKT_ERROR` if the writer fails.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match crate::wkt::to_wkt(self) {
            Ok(wkt) => f.write_str(&wkt),
            Err(err) => {
                log::warn!("Failed to write {} as WKT: {err}", self.kind());
                f.write_str("WKT_ERROR")
            }
        }
    }
}

impl From<Point> for Geometry {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

impl From<LineString> for Geometry {
    fn from(value: LineString) -> Self {
        Self::LineString(value)
    }
}

impl From<Polygon> for Geometry {
    fn from(value: Polygon) -> Self {
        Self::Polygon(value)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(value: MultiPoint) -> Self {
        Self::MultiPoint(value)
    }
}

impl From<MultiLineString> for Geometry {
    fn from(value: MultiLineString) -> Self {
        Self::MultiLineString(value)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(value: MultiPolygon) -> Self {
        Self::MultiPolygon(value)
    }
}

impl From<GeometryCollection> for Geometry {
    fn from(value: GeometryCollection) -> Self {
        Self::GeometryCollection(value)
    }
}

/// Root geometry together with the identifier of its spatial reference system.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpatialGeometry {
    srid: Srid,
    geometry: Geometry,
}

impl SpatialGeometry {
    /// Creates a new spatial geometry.
    pub fn new(geometry: impl Into<Geometry>, srid: Srid) -> Self {
        Self {
            srid,
            geometry: geometry.into(),
        }
    }

    /// Spatial reference identifier.
    pub fn srid(&self) -> Srid {
        self.srid
    }

    /// Replaces the spatial reference identifier. The coordinates are not transformed.
    pub fn set_srid(&mut self, srid: Srid) {
        self.srid = srid;
    }

    /// The geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Mutable access to the geometry.
    pub fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }

    /// Consumes the value returning the geometry.
    pub fn into_geometry(self) -> Geometry {
        self.geometry
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::linear_ring::LinearRing;

    fn square() -> Polygon {
        LinearRing::closing(vec![
            Coord::new(0.0, 0.0),
            Coord::new(2.0, 0.0),
            Coord::new(2.0, 2.0),
            Coord::new(0.0, 2.0),
        ])
        .expect("valid ring")
        .into()
    }

    #[test]
    fn empty_geometries() {
        for kind in GeometryKind::ALL {
            let geometry = Geometry::empty(kind);
            assert_eq!(geometry.kind(), kind);
            assert!(geometry.is_empty());
            assert_eq!(geometry.bounding_box(), None);
            assert_eq!(geometry.envelope(), None);
            assert_eq!(geometry.num_points(), 0);
        }
    }

    #[test]
    fn dimensions() {
        assert_eq!(Geometry::from(Point::new(0.0, 0.0)).dimension(), Dimension::Point);
        assert_eq!(Geometry::from(square()).dimension(), Dimension::Surface);
        assert_eq!(
            Geometry::empty(GeometryKind::GeometryCollection)
                .dimension()
                .as_i32(),
            -1
        );

        let collection = GeometryCollection::new(vec![
            Point::new(0.0, 0.0).into(),
            square().into(),
        ]);
        assert_eq!(Geometry::from(collection).dimension(), Dimension::Surface);
    }

    #[test]
    fn points_in_traversal_order() {
        let collection: Geometry = GeometryCollection::new(vec![
            Point::new(9.0, 9.0).into(),
            MultiPoint::new(vec![Point::new(1.0, 1.0), Point::empty()]).into(),
            square().into(),
        ])
        .into();
        let points = collection.points();
        assert_eq!(points.len(), collection.num_points());
        assert_eq!(points.len(), 7);
        assert_eq!(points[0], Coord::new(9.0, 9.0));
        assert_eq!(points[1], Coord::new(1.0, 1.0));
        assert_eq!(points[6], Coord::new(0.0, 0.0));
    }

    #[test]
    fn envelope() {
        let line: Geometry =
            LineString::new(vec![Coord::new(1.0, 3.0), Coord::new(-1.0, 0.0)]).into();
        let envelope = line.envelope().expect("non-empty");
        assert_eq!(
            envelope.bounding_box(),
            Some(BoundingBox::new(-1.0, 0.0, 1.0, 3.0))
        );
        assert!(envelope.exterior().is_ccw());
    }

    #[test]
    fn point_mutation() {
        let mut point = Geometry::Point(Point::empty());
        point.add_point(Coord::new(1.0, 2.0)).expect("empty point");
        assert_eq!(point, Geometry::Point(Point::new(1.0, 2.0)));

        assert_matches!(
            point.add_point(Coord::new(3.0, 4.0)),
            Err(GeometryError::UnsupportedOperation {
                operation: "add_point",
                kind: GeometryKind::Point
            })
        );

        point.set_point(0, Coord::new(5.0, 5.0)).expect("index 0");
        assert_eq!(point.remove_point(0), Ok(Coord::new(5.0, 5.0)));
        assert!(point.is_empty());
        assert_matches!(
            point.remove_point(0),
            Err(GeometryError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn line_and_multipoint_mutation() {
        let mut line = Geometry::LineString(LineString::default());
        line.add_point(Coord::new(0.0, 0.0)).expect("supported");
        line.add_point(Coord::new(1.0, 0.0)).expect("supported");
        line.set_point(1, Coord::new(2.0, 0.0)).expect("supported");
        assert_eq!(line.points(), vec![Coord::new(0.0, 0.0), Coord::new(2.0, 0.0)]);

        let mut multi = Geometry::MultiPoint(MultiPoint::default());
        multi.add_point(Coord::new(1.0, 1.0)).expect("supported");
        multi.add_point(Coord::new(2.0, 2.0)).expect("supported");
        assert_eq!(multi.remove_point(0), Ok(Coord::new(1.0, 1.0)));
        assert_eq!(multi.num_points(), 1);
    }

    #[test]
    fn removing_empty_member_keeps_multipoint() {
        let mut multi = Geometry::MultiPoint(MultiPoint::new(vec![
            Point::empty(),
            Point::new(1.0, 1.0),
        ]));
        let before = multi.clone();
        assert_eq!(multi.remove_point(0), Err(GeometryError::EmptyGeometry));
        assert_eq!(multi, before);
        assert_matches!(
            multi.remove_point(2),
            Err(GeometryError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn polygon_mutation_changes_exterior() {
        let mut polygon = Geometry::Polygon(square());
        polygon.add_point(Coord::new(1.0, -1.0)).expect("supported");
        assert_eq!(polygon.num_points(), 6);
        let Geometry::Polygon(polygon) = polygon else {
            panic!("kind must not change");
        };
        assert!(polygon.exterior().validate().is_ok());
    }

    #[test]
    fn unsupported_mutation() {
        let mut multi = Geometry::MultiPolygon(MultiPolygon::new(vec![square()]));
        assert_matches!(
            multi.add_point(Coord::new(0.0, 0.0)),
            Err(GeometryError::UnsupportedOperation {
                operation: "add_point",
                kind: GeometryKind::MultiPolygon
            })
        );
        assert_matches!(
            multi.set_point(0, Coord::new(0.0, 0.0)),
            Err(GeometryError::UnsupportedOperation { .. })
        );

        let mut lines = Geometry::MultiLineString(MultiLineString::default());
        assert_matches!(
            lines.remove_point(0),
            Err(GeometryError::UnsupportedOperation { .. })
        );
    }

    #[test]
    fn spatial_geometry() {
        let mut geometry = SpatialGeometry::new(Point::new(1.0, 2.0), Srid::WGS84);
        assert_eq!(geometry.srid(), Srid(4326));
        geometry.set_srid(Srid(32640));
        assert_eq!(geometry.srid(), Srid(32640));
        assert_eq!(geometry.geometry().kind(), GeometryKind::Point);
        assert_eq!(geometry.into_geometry(), Point::new(1.0, 2.0).into());
    }
}
