use crate::codec::builder::GeometryBuilder;
use crate::codec::tree_builder::TreeBuilder;
use crate::config::CodecConfig;
use crate::error::{GeometryError, Result};
use crate::geometry::SpatialGeometry;
use crate::geometry_type::GeometryKind;
use crate::point::Coord;
use crate::srs::Srid;

/// Position as reported by an external geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SourcePoint {
    /// X ordinate.
    pub x: f64,
    /// Y ordinate.
    pub y: f64,
    /// Z ordinate, if the source stores one.
    pub z: Option<f64>,
}

impl From<SourcePoint> for Coord {
    fn from(value: SourcePoint) -> Self {
        Coord::new_3d(value.x, value.y, value.z.unwrap_or(0.0))
    }
}

/// Read access to a geometry owned by an external engine.
///
/// The accessors follow the OGC conventions used by database engines: indices of points,
/// sub-geometries and interior rings start at `1`, rings and members are returned as geometries of
/// the same source type, and the kind is reported as an OGC type name.
pub trait GeometrySource: Sized {
    /// OGC type name, e.g. `"MultiLineString"`.
    fn geometry_type(&self) -> String;

    /// Spatial reference identifier, if the source carries one.
    fn srid(&self) -> Option<Srid> {
        None
    }

    /// Returns true if the geometry has no points.
    fn is_empty(&self) -> bool;

    /// Number of members of a collection.
    fn num_geometries(&self) -> usize;

    /// Member of a collection, starting at `1`.
    fn geometry_n(&self, n: usize) -> Result<Self>;

    /// Number of points of a point, line string or ring.
    fn num_points(&self) -> usize;

    /// Point of a point, line string or ring, starting at `1`.
    fn point_n(&self, n: usize) -> Result<SourcePoint>;

    /// Exterior ring of a polygon.
    fn exterior_ring(&self) -> Result<Self>;

    /// Number of holes of a polygon.
    fn num_interior_rings(&self) -> usize;

    /// Hole of a polygon, starting at `1`.
    fn interior_ring_n(&self, n: usize) -> Result<Self>;
}

/// Reads the external geometry into a tree.
///
/// A source without a spatial reference gets [`CodecConfig::default_srid`]. Z ordinates missing in
/// the source are set to `0`. An unknown type name fails with
/// [`GeometryError::UnsupportedGeometryKind`], and no partially read geometry is ever returned.
pub fn decode<S: GeometrySource>(source: &S, config: &CodecConfig) -> Result<SpatialGeometry> {
    log::debug!("Decoding external {}", source.geometry_type());

    let mut builder = TreeBuilder::new();
    if let Some(srid) = source.srid() {
        builder.set_srid(srid)?;
    }

    decode_into(source, &mut builder)?;
    builder.into_spatial(config)
}

/// Describes the external geometry to the builder.
pub fn decode_into<S, B>(source: &S, builder: &mut B) -> Result<()>
where
    S: GeometrySource,
    B: GeometryBuilder + ?Sized,
{
    let kind: GeometryKind = source.geometry_type().parse()?;
    match kind {
        GeometryKind::Point => {
            let parts = usize::from(!source.is_empty());
            builder.begin_geometry(kind, parts)?;
            decode_figure(source, builder)?;
        }
        GeometryKind::LineString => {
            builder.begin_geometry(kind, usize::from(source.num_points() > 0))?;
            decode_figure(source, builder)?;
        }
        GeometryKind::Polygon => {
            if source.is_empty() {
                builder.begin_geometry(kind, 0)?;
            } else {
                let holes = source.num_interior_rings();
                builder.begin_geometry(kind, holes + 1)?;
                decode_ring(&source.exterior_ring()?, "exterior", builder)?;
                for n in 1..=holes {
                    decode_ring(&source.interior_ring_n(n)?, "interior", builder)?;
                }
            }
        }
        GeometryKind::MultiPoint
        | GeometryKind::MultiLineString
        | GeometryKind::MultiPolygon
        | GeometryKind::GeometryCollection => {
            let members = source.num_geometries();
            builder.begin_geometry(kind, members)?;
            for n in 1..=members {
                decode_into(&source.geometry_n(n)?, builder)?;
            }
        }
    }

    builder.end_geometry()
}

fn decode_figure<S, B>(source: &S, builder: &mut B) -> Result<()>
where
    S: GeometrySource,
    B: GeometryBuilder + ?Sized,
{
    if source.is_empty() {
        return Ok(());
    }

    let points = source.num_points();
    if points == 0 {
        return Err(GeometryError::EmptyGeometry);
    }

    builder.begin_figure(source.point_n(1)?.into(), points)?;
    for n in 2..=points {
        builder.add_point(source.point_n(n)?.into())?;
    }

    builder.end_figure()
}

/// Rings of a non-empty polygon cannot be empty, otherwise the next ring would take their place.
fn decode_ring<S, B>(ring: &S, role: &str, builder: &mut B) -> Result<()>
where
    S: GeometrySource,
    B: GeometryBuilder + ?Sized,
{
    if ring.is_empty() || ring.num_points() == 0 {
        return Err(GeometryError::MalformedRing(format!(
            "{role} ring of a non-empty polygon is empty"
        )));
    }

    decode_figure(ring, builder)
}
