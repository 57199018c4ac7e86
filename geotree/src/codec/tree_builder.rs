use crate::codec::builder::GeometryBuilder;
use crate::codec::event::EventStream;
use crate::collection::{GeometryCollection, MultiLineString, MultiPoint, MultiPolygon};
use crate::config::CodecConfig;
use crate::error::{GeometryError, Result};
use crate::geometry::{Geometry, SpatialGeometry};
use crate::geometry_type::GeometryKind;
use crate::line_string::LineString;
use crate::linear_ring::LinearRing;
use crate::point::{Coord, Point};
use crate::polygon::Polygon;
use crate::srs::Srid;

/// Geometry that has been started but not finished yet.
#[derive(Debug)]
enum Partial {
    Point(Option<Coord>),
    LineString(Option<Vec<Coord>>),
    Polygon(Vec<LinearRing>),
    MultiPoint(Vec<Point>),
    MultiLineString(Vec<LineString>),
    MultiPolygon(Vec<Polygon>),
    GeometryCollection(Vec<Geometry>),
}

impl Partial {
    fn new(kind: GeometryKind, parts: usize) -> Self {
        match kind {
            GeometryKind::Point => Self::Point(None),
            GeometryKind::LineString => Self::LineString(None),
            GeometryKind::Polygon => Self::Polygon(Vec::with_capacity(parts)),
            GeometryKind::MultiPoint => Self::MultiPoint(Vec::with_capacity(parts)),
            GeometryKind::MultiLineString => Self::MultiLineString(Vec::with_capacity(parts)),
            GeometryKind::MultiPolygon => Self::MultiPolygon(Vec::with_capacity(parts)),
            GeometryKind::GeometryCollection => {
                Self::GeometryCollection(Vec::with_capacity(parts))
            }
        }
    }

    fn kind(&self) -> GeometryKind {
        match self {
            Self::Point(_) => GeometryKind::Point,
            Self::LineString(_) => GeometryKind::LineString,
            Self::Polygon(_) => GeometryKind::Polygon,
            Self::MultiPoint(_) => GeometryKind::MultiPoint,
            Self::MultiLineString(_) => GeometryKind::MultiLineString,
            Self::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Self::GeometryCollection(_) => GeometryKind::GeometryCollection,
        }
    }

    /// Number of figures or members added so far.
    fn len(&self) -> usize {
        match self {
            Self::Point(coord) => usize::from(coord.is_some()),
            Self::LineString(line) => usize::from(line.is_some()),
            Self::Polygon(rings) => rings.len(),
            Self::MultiPoint(parts) => parts.len(),
            Self::MultiLineString(parts) => parts.len(),
            Self::MultiPolygon(parts) => parts.len(),
            Self::GeometryCollection(parts) => parts.len(),
        }
    }

    fn accepts(&self, kind: GeometryKind) -> bool {
        match self {
            Self::GeometryCollection(_) => true,
            partial => partial.kind().member_kind() == Some(kind),
        }
    }

    fn add_figure(&mut self, points: Vec<Coord>) -> Result<()> {
        match self {
            Self::Point(coord @ None) if points.len() == 1 => *coord = points.first().copied(),
            Self::Point(_) => return Err(protocol("a point takes exactly one figure of one point")),
            Self::LineString(line @ None) => *line = Some(points),
            Self::LineString(_) => return Err(protocol("a line string takes exactly one figure")),
            Self::Polygon(rings) => rings.push(LinearRing::new(points)?),
            partial => {
                return Err(protocol(format!(
                    "{} cannot contain figures",
                    partial.kind()
                )))
            }
        }

        Ok(())
    }

    fn add_member(&mut self, geometry: Geometry) -> Result<()> {
        match (self, geometry) {
            (Self::MultiPoint(parts), Geometry::Point(v)) => parts.push(v),
            (Self::MultiLineString(parts), Geometry::LineString(v)) => parts.push(v),
            (Self::MultiPolygon(parts), Geometry::Polygon(v)) => parts.push(v),
            (Self::GeometryCollection(parts), v) => parts.push(v),
            (partial, v) => {
                return Err(protocol(format!(
                    "{} cannot contain {}",
                    partial.kind(),
                    v.name()
                )))
            }
        }

        Ok(())
    }

    fn finish(self) -> Geometry {
        match self {
            Self::Point(coord) => coord.map(Point::from).unwrap_or_default().into(),
            Self::LineString(points) => LineString::new(points.unwrap_or_default()).into(),
            Self::Polygon(rings) => {
                let mut rings = rings.into_iter();
                let exterior = rings.next().unwrap_or_default();
                Polygon::new(exterior, rings.collect()).into()
            }
            Self::MultiPoint(parts) => MultiPoint::new(parts).into(),
            Self::MultiLineString(parts) => MultiLineString::new(parts).into(),
            Self::MultiPolygon(parts) => MultiPolygon::new(parts).into(),
            Self::GeometryCollection(parts) => GeometryCollection::new(parts).into(),
        }
    }
}

/// Open geometry with the number of parts announced for it.
#[derive(Debug)]
struct Frame {
    partial: Partial,
    parts: usize,
}

/// Open figure with the number of points announced for it.
#[derive(Debug)]
struct Figure {
    points: Vec<Coord>,
    declared: usize,
}

fn protocol(message: impl Into<String>) -> GeometryError {
    GeometryError::BuilderProtocol(message.into())
}

/// [`GeometryBuilder`] that assembles the described geometry.
///
/// Every call is checked against the protocol, and a sequence that does not describe exactly one
/// complete geometry is rejected. The part and point counts passed to
/// [`GeometryBuilder::begin_geometry`] and [`GeometryBuilder::begin_figure`] must match what is
/// actually described, so a truncated sequence fails instead of producing a smaller geometry.
/// Polygon rings are validated as they are finished, so malformed
/// rings fail with [`GeometryError::MalformedRing`].
#[derive(Debug, Default)]
pub struct TreeBuilder {
    srid: Option<Srid>,
    stack: Vec<Frame>,
    figure: Option<Figure>,
    result: Option<Geometry>,
}

impl TreeBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spatial reference set with [`GeometryBuilder::set_srid`], if any.
    pub fn srid(&self) -> Option<Srid> {
        self.srid
    }

    /// Returns the constructed geometry.
    pub fn into_geometry(self) -> Result<Geometry> {
        if !self.stack.is_empty() {
            return Err(protocol("geometry is not finished"));
        }

        self.result
            .ok_or_else(|| protocol("no geometry was described"))
    }

    /// Returns the constructed geometry with its spatial reference. A geometry without one gets the
    /// configured default.
    pub fn into_spatial(self, config: &CodecConfig) -> Result<SpatialGeometry> {
        let srid = config.resolve_srid(self.srid);
        Ok(SpatialGeometry::new(self.into_geometry()?, srid))
    }

    fn check_no_figure(&self, call: &str) -> Result<()> {
        if self.figure.is_some() {
            return Err(protocol(format!("{call} inside of an open figure")));
        }

        Ok(())
    }
}

impl GeometryBuilder for TreeBuilder {
    fn set_srid(&mut self, srid: Srid) -> Result<()> {
        if !self.stack.is_empty() || self.result.is_some() {
            return Err(protocol("srid must be set before the root geometry"));
        }

        self.srid = Some(srid);
        Ok(())
    }

    fn begin_geometry(&mut self, kind: GeometryKind, parts: usize) -> Result<()> {
        log::trace!("Begin {kind} with {parts} parts");
        self.check_no_figure("begin_geometry")?;

        match self.stack.last() {
            Some(parent) if !parent.partial.accepts(kind) => {
                return Err(protocol(format!(
                    "{} cannot contain {kind}",
                    parent.partial.kind()
                )));
            }
            None if self.result.is_some() => {
                return Err(protocol("only one root geometry can be described"));
            }
            _ => {}
        }

        self.stack.push(Frame {
            partial: Partial::new(kind, parts),
            parts,
        });
        Ok(())
    }

    fn begin_figure(&mut self, first: Coord, points: usize) -> Result<()> {
        log::trace!("Begin figure of {points} points");
        self.check_no_figure("begin_figure")?;
        if self.stack.is_empty() {
            return Err(protocol("begin_figure outside of a geometry"));
        }

        let mut figure = Vec::with_capacity(points.max(1));
        figure.push(first);
        self.figure = Some(Figure {
            points: figure,
            declared: points,
        });
        Ok(())
    }

    fn add_point(&mut self, point: Coord) -> Result<()> {
        self.figure
            .as_mut()
            .ok_or_else(|| protocol("add_point outside of a figure"))?
            .points
            .push(point);
        Ok(())
    }

    fn end_figure(&mut self) -> Result<()> {
        let figure = self
            .figure
            .take()
            .ok_or_else(|| protocol("end_figure without begin_figure"))?;
        if figure.points.len() != figure.declared {
            return Err(protocol(format!(
                "figure announced {} points but has {}",
                figure.declared,
                figure.points.len()
            )));
        }

        self.stack
            .last_mut()
            .ok_or_else(|| protocol("end_figure outside of a geometry"))?
            .partial
            .add_figure(figure.points)
    }

    fn end_geometry(&mut self) -> Result<()> {
        self.check_no_figure("end_geometry")?;
        let frame = self
            .stack
            .pop()
            .ok_or_else(|| protocol("end_geometry without begin_geometry"))?;
        if frame.partial.len() != frame.parts {
            return Err(protocol(format!(
                "{} announced {} parts but has {}",
                frame.partial.kind(),
                frame.parts,
                frame.partial.len()
            )));
        }

        let geometry = frame.partial.finish();
        log::trace!("End {}", geometry.name());

        match self.stack.last_mut() {
            Some(parent) => parent.partial.add_member(geometry),
            None => {
                self.result = Some(geometry);
                Ok(())
            }
        }
    }
}

/// Assembles the geometry described by the recorded events.
pub fn decode_events(events: &EventStream, config: &CodecConfig) -> Result<SpatialGeometry> {
    let mut builder = TreeBuilder::new();
    events.replay(&mut builder)?;
    let geometry = builder.into_spatial(config)?;
    log::debug!(
        "Decoded {} with {} from {} events",
        geometry.geometry().name(),
        geometry.srid(),
        events.len()
    );

    Ok(geometry)
}
