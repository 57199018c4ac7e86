use serde::{Deserialize, Serialize};

use crate::codec::builder::GeometryBuilder;
use crate::error::Result;
use crate::geometry_type::GeometryKind;
use crate::point::Coord;
use crate::srs::Srid;

/// One call of the [`GeometryBuilder`] protocol.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum BuilderEvent {
    /// Spatial reference of the root geometry.
    SetSrid(Srid),
    /// Start of a geometry.
    BeginGeometry {
        /// Kind of the geometry.
        kind: GeometryKind,
        /// Number of figures or members.
        parts: usize,
    },
    /// Start of a figure.
    BeginFigure {
        /// First point of the figure.
        first: Coord,
        /// Number of points in the figure.
        points: usize,
    },
    /// Next point of the current figure.
    AddPoint(Coord),
    /// End of the current figure.
    EndFigure,
    /// End of the current geometry.
    EndGeometry,
}

/// Recorded sequence of builder calls.
///
/// The stream is itself a [`GeometryBuilder`], so it can be filled by
/// [`encode_into`](crate::codec::encode_into), stored or sent around, and then replayed into any
/// other builder.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EventStream {
    events: Vec<BuilderEvent>,
}

impl EventStream {
    /// Creates an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events.
    pub fn events(&self) -> &[BuilderEvent] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Calls the builder methods in the recorded order.
    pub fn replay<B: GeometryBuilder + ?Sized>(&self, builder: &mut B) -> Result<()> {
        for event in &self.events {
            match event {
                BuilderEvent::SetSrid(srid) => builder.set_srid(*srid)?,
                BuilderEvent::BeginGeometry { kind, parts } => {
                    builder.begin_geometry(*kind, *parts)?
                }
                BuilderEvent::BeginFigure { first, points } => {
                    builder.begin_figure(*first, *points)?
                }
                BuilderEvent::AddPoint(point) => builder.add_point(*point)?,
                BuilderEvent::EndFigure => builder.end_figure()?,
                BuilderEvent::EndGeometry => builder.end_geometry()?,
            }
        }

        Ok(())
    }

    /// Consumes the stream returning the events.
    pub fn into_events(self) -> Vec<BuilderEvent> {
        self.events
    }

    fn push(&mut self, event: BuilderEvent) -> Result<()> {
        log::trace!("Recorded builder event {event:?}");
        self.events.push(event);
        Ok(())
    }
}

impl From<Vec<BuilderEvent>> for EventStream {
    fn from(events: Vec<BuilderEvent>) -> Self {
        Self { events }
    }
}

impl<'a> IntoIterator for &'a EventStream {
    type Item = &'a BuilderEvent;
    type IntoIter = std::slice::Iter<'a, BuilderEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl GeometryBuilder for EventStream {
    fn set_srid(&mut self, srid: Srid) -> Result<()> {
        self.push(BuilderEvent::SetSrid(srid))
    }

    fn begin_geometry(&mut self, kind: GeometryKind, parts: usize) -> Result<()> {
        self.push(BuilderEvent::BeginGeometry { kind, parts })
    }

    fn begin_figure(&mut self, first: Coord, points: usize) -> Result<()> {
        self.push(BuilderEvent::BeginFigure { first, points })
    }

    fn add_point(&mut self, point: Coord) -> Result<()> {
        self.push(BuilderEvent::AddPoint(point))
    }

    fn end_figure(&mut self) -> Result<()> {
        self.push(BuilderEvent::EndFigure)
    }

    fn end_geometry(&mut self) -> Result<()> {
        self.push(BuilderEvent::EndGeometry)
    }
}
