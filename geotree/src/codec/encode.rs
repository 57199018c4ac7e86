use crate::codec::builder::GeometryBuilder;
use crate::codec::event::EventStream;
use crate::collection::{Collection, CollectionMember};
use crate::error::{GeometryError, Result};
use crate::geometry::{Geometry, SpatialGeometry};
use crate::line_string::LineString;
use crate::linear_ring::LinearRing;
use crate::point::{Coord, Point};
use crate::polygon::Polygon;
use crate::traits::{Curve, Shape};

/// Records the builder calls describing the geometry.
pub fn encode(geometry: &SpatialGeometry) -> Result<EventStream> {
    let mut stream = EventStream::new();
    encode_into(geometry, &mut stream)?;
    Ok(stream)
}

/// Describes the geometry to the builder, starting with its spatial reference.
pub fn encode_into<B: GeometryBuilder + ?Sized>(
    geometry: &SpatialGeometry,
    builder: &mut B,
) -> Result<()> {
    log::debug!(
        "Encoding {} with {}",
        geometry.geometry().kind(),
        geometry.srid()
    );

    builder.set_srid(geometry.srid())?;
    encode_geometry(geometry.geometry(), builder)
}

/// Describes the geometry to the builder without setting the spatial reference.
///
/// The traversal is depth first: polygons emit the exterior ring and then the holes, collections
/// emit their members in order.
pub fn encode_geometry<B: GeometryBuilder + ?Sized>(
    geometry: &Geometry,
    builder: &mut B,
) -> Result<()> {
    match geometry {
        Geometry::Point(v) => encode_point(v, builder),
        Geometry::LineString(v) => encode_line_string(v, builder),
        Geometry::Polygon(v) => encode_polygon(v, builder),
        Geometry::MultiPoint(v) => encode_collection(v, builder, encode_point),
        Geometry::MultiLineString(v) => encode_collection(v, builder, encode_line_string),
        Geometry::MultiPolygon(v) => encode_collection(v, builder, encode_polygon),
        Geometry::GeometryCollection(v) => encode_collection(v, builder, encode_geometry),
    }
}

fn encode_figure<B: GeometryBuilder + ?Sized>(coords: &[Coord], builder: &mut B) -> Result<()> {
    let Some((first, rest)) = coords.split_first() else {
        return Ok(());
    };

    builder.begin_figure(*first, coords.len())?;
    for point in rest {
        builder.add_point(*point)?;
    }

    builder.end_figure()
}

fn encode_point<B: GeometryBuilder + ?Sized>(point: &Point, builder: &mut B) -> Result<()> {
    let coord = point.try_coord();
    builder.begin_geometry(point.kind(), usize::from(coord.is_some()))?;
    if let Some(coord) = coord {
        encode_figure(&[coord], builder)?;
    }

    builder.end_geometry()
}

fn encode_line_string<B: GeometryBuilder + ?Sized>(
    line: &LineString,
    builder: &mut B,
) -> Result<()> {
    builder.begin_geometry(line.kind(), usize::from(!line.is_empty()))?;
    encode_figure(line.coords(), builder)?;
    builder.end_geometry()
}

fn encode_polygon<B: GeometryBuilder + ?Sized>(polygon: &Polygon, builder: &mut B) -> Result<()> {
    if polygon.exterior().is_empty() && polygon.interiors().is_empty() {
        builder.begin_geometry(polygon.kind(), 0)?;
        return builder.end_geometry();
    }

    if polygon.exterior().is_empty() {
        return Err(GeometryError::MalformedRing(
            "polygon with holes has an empty exterior ring".into(),
        ));
    }

    if polygon.interiors().iter().any(LinearRing::is_empty) {
        return Err(GeometryError::MalformedRing(
            "polygon has an empty interior ring".into(),
        ));
    }

    builder.begin_geometry(polygon.kind(), polygon.num_interior_rings() + 1)?;
    for ring in polygon.rings() {
        encode_figure(ring.coords(), builder)?;
    }

    builder.end_geometry()
}

fn encode_collection<G, B, F>(
    collection: &Collection<G>,
    builder: &mut B,
    encode_member: F,
) -> Result<()>
where
    G: CollectionMember,
    B: GeometryBuilder + ?Sized,
    F: Fn(&G, &mut B) -> Result<()>,
{
    builder.begin_geometry(collection.kind(), collection.num_geometries())?;
    for member in collection {
        encode_member(member, builder)?;
    }

    builder.end_geometry()
}
