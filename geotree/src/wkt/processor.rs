//! Adapters between the [`GeometryBuilder`] protocol and geozero's [`GeomProcessor`].

use geozero::error::GeozeroError;
use geozero::{CoordDimensions, GeomProcessor};

use crate::codec::GeometryBuilder;
use crate::error::{GeometryError, Result};
use crate::geometry_type::GeometryKind;
use crate::point::Coord;
use crate::srs::Srid;

#[derive(Debug)]
struct SinkFrame {
    kind: GeometryKind,
    idx: usize,
    tagged: bool,
    multipoint_member: bool,
    parts: usize,
    children: usize,
    line_open: bool,
}

fn write_coord<P: GeomProcessor>(processor: &mut P, coord: Coord, idx: usize) -> Result<()> {
    if processor.multi_dim() {
        processor.coordinate(coord.x, coord.y, Some(coord.z), None, None, None, idx)?;
    } else {
        processor.xy(coord.x, coord.y, idx)?;
    }

    Ok(())
}

fn protocol(message: impl Into<String>) -> GeometryError {
    GeometryError::BuilderProtocol(message.into())
}

/// [`GeometryBuilder`] that drives a geozero processor, e.g. a WKT writer.
///
/// Members of collections are written untagged where geozero expects it: line strings of a multi
/// line string, polygons of a multipolygon and points of a multipoint.
pub struct ProcessorSink<'a, P: GeomProcessor> {
    processor: &'a mut P,
    stack: Vec<SinkFrame>,
    point_idx: usize,
}

impl<'a, P: GeomProcessor> ProcessorSink<'a, P> {
    /// Creates a sink writing into the processor.
    pub fn new(processor: &'a mut P) -> Self {
        Self {
            processor,
            stack: Vec::new(),
            point_idx: 0,
        }
    }
}

impl<P: GeomProcessor> GeometryBuilder for ProcessorSink<'_, P> {
    fn set_srid(&mut self, srid: Srid) -> Result<()> {
        self.processor.srid(Some(srid.code()))?;
        Ok(())
    }

    fn begin_geometry(&mut self, kind: GeometryKind, parts: usize) -> Result<()> {
        let (idx, parent) = match self.stack.last_mut() {
            Some(parent) => {
                parent.children += 1;
                (parent.children - 1, Some(parent.kind))
            }
            None => (0, None),
        };

        let tagged = matches!(parent, None | Some(GeometryKind::GeometryCollection));
        let multipoint_member = parent == Some(GeometryKind::MultiPoint);
        let processor = &mut *self.processor;
        match kind {
            GeometryKind::Point if multipoint_member => {
                if parts == 0 {
                    return Err(GeometryError::Wkt(
                        "empty points inside of a multipoint can not be written".into(),
                    ));
                }
            }
            GeometryKind::Point if parts == 0 => processor.empty_point(idx)?,
            GeometryKind::Point => processor.point_begin(idx)?,
            // the point count is only known when the figure starts
            GeometryKind::LineString => {}
            GeometryKind::Polygon => processor.polygon_begin(tagged, parts, idx)?,
            GeometryKind::MultiPoint => processor.multipoint_begin(parts, idx)?,
            GeometryKind::MultiLineString => processor.multilinestring_begin(parts, idx)?,
            GeometryKind::MultiPolygon => processor.multipolygon_begin(parts, idx)?,
            GeometryKind::GeometryCollection => {
                processor.geometrycollection_begin(parts, idx)?
            }
        }

        self.stack.push(SinkFrame {
            kind,
            idx,
            tagged,
            multipoint_member,
            parts,
            children: 0,
            line_open: false,
        });

        Ok(())
    }

    fn begin_figure(&mut self, first: Coord, points: usize) -> Result<()> {
        let frame = self
            .stack
            .last_mut()
            .ok_or_else(|| protocol("begin_figure outside of a geometry"))?;

        match frame.kind {
            GeometryKind::Point => {
                self.point_idx = if frame.multipoint_member { frame.idx } else { 0 };
            }
            GeometryKind::LineString => {
                self.processor
                    .linestring_begin(frame.tagged, points, frame.idx)?;
                frame.line_open = true;
                self.point_idx = 0;
            }
            GeometryKind::Polygon => {
                self.processor.linestring_begin(false, points, frame.children)?;
                frame.children += 1;
                self.point_idx = 0;
            }
            kind => return Err(protocol(format!("{kind} cannot contain figures"))),
        }

        write_coord(&mut *self.processor, first, self.point_idx)
    }

    fn add_point(&mut self, point: Coord) -> Result<()> {
        self.point_idx += 1;
        write_coord(&mut *self.processor, point, self.point_idx)
    }

    fn end_figure(&mut self) -> Result<()> {
        let frame = self
            .stack
            .last()
            .ok_or_else(|| protocol("end_figure outside of a geometry"))?;

        match frame.kind {
            GeometryKind::LineString => self.processor.linestring_end(frame.tagged, frame.idx)?,
            GeometryKind::Polygon => self
                .processor
                .linestring_end(false, frame.children.saturating_sub(1))?,
            _ => {}
        }

        Ok(())
    }

    fn end_geometry(&mut self) -> Result<()> {
        let frame = self
            .stack
            .pop()
            .ok_or_else(|| protocol("end_geometry without begin_geometry"))?;

        let processor = &mut *self.processor;
        match frame.kind {
            GeometryKind::Point if frame.multipoint_member || frame.parts == 0 => {}
            GeometryKind::Point => processor.point_end(frame.idx)?,
            GeometryKind::LineString if !frame.line_open => {
                processor.linestring_begin(frame.tagged, 0, frame.idx)?;
                processor.linestring_end(frame.tagged, frame.idx)?;
            }
            GeometryKind::LineString => {}
            GeometryKind::Polygon => processor.polygon_end(frame.tagged, frame.idx)?,
            GeometryKind::MultiPoint => processor.multipoint_end(frame.idx)?,
            GeometryKind::MultiLineString => processor.multilinestring_end(frame.idx)?,
            GeometryKind::MultiPolygon => processor.multipolygon_end(frame.idx)?,
            GeometryKind::GeometryCollection => processor.geometrycollection_end(frame.idx)?,
        }

        Ok(())
    }
}

#[derive(Debug)]
enum ReadFrame {
    Point,
    /// geozero skips empty members but counts them in the announced size, so members are collected
    /// and passed on when the multipoint ends.
    MultiPoint(Vec<Coord>),
    Line {
        geometry: bool,
        size: usize,
        started: bool,
    },
    Polygon,
    Collection,
}

/// geozero processor that translates the processed geometry into [`GeometryBuilder`] calls.
///
/// geozero callbacks can only fail with a [`GeozeroError`], so the first error reported by the
/// builder is kept and can be retrieved with [`EventProcessor::take_error`].
pub struct EventProcessor<B: GeometryBuilder> {
    builder: B,
    stack: Vec<ReadFrame>,
    error: Option<GeometryError>,
}

impl<B: GeometryBuilder> EventProcessor<B> {
    /// Creates a processor feeding the builder.
    pub fn new(builder: B) -> Self {
        Self {
            builder,
            stack: Vec::new(),
            error: None,
        }
    }

    /// First error reported by the builder.
    pub fn take_error(&mut self) -> Option<GeometryError> {
        self.error.take()
    }

    /// Returns the builder.
    pub fn into_builder(self) -> B {
        self.builder
    }

    fn check(&mut self, result: Result<()>) -> geozero::error::Result<()> {
        result.map_err(|err| {
            let message = err.to_string();
            self.error.get_or_insert(err);
            GeozeroError::Geometry(message)
        })
    }

    fn push_coord(&mut self, coord: Coord) -> Result<()> {
        let builder = &mut self.builder;
        match self.stack.last_mut() {
            Some(ReadFrame::Point) => {
                builder.begin_figure(coord, 1)?;
                builder.end_figure()
            }
            Some(ReadFrame::MultiPoint(members)) => {
                members.push(coord);
                Ok(())
            }
            Some(ReadFrame::Line { size, started, .. }) => {
                if *started {
                    builder.add_point(coord)
                } else {
                    *started = true;
                    builder.begin_figure(coord, *size)
                }
            }
            _ => Err(protocol("coordinate outside of a figure")),
        }
    }

    fn begin(&mut self, kind: GeometryKind, parts: usize, frame: ReadFrame) -> Result<()> {
        self.builder.begin_geometry(kind, parts)?;
        self.stack.push(frame);
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.stack
            .pop()
            .ok_or_else(|| protocol("end of a geometry that was not started"))?;
        self.builder.end_geometry()
    }

    fn end_multipoint(&mut self) -> Result<()> {
        let Some(ReadFrame::MultiPoint(members)) = self.stack.pop() else {
            return Err(protocol("end of a multipoint that was not started"));
        };

        let builder = &mut self.builder;
        builder.begin_geometry(GeometryKind::MultiPoint, members.len())?;
        for coord in members {
            builder.begin_geometry(GeometryKind::Point, 1)?;
            builder.begin_figure(coord, 1)?;
            builder.end_figure()?;
            builder.end_geometry()?;
        }

        builder.end_geometry()
    }

    fn begin_line(&mut self, size: usize) -> Result<()> {
        let geometry = !matches!(self.stack.last(), Some(ReadFrame::Polygon));
        if geometry {
            self.builder
                .begin_geometry(GeometryKind::LineString, usize::from(size > 0))?;
        }

        self.stack.push(ReadFrame::Line {
            geometry,
            size,
            started: false,
        });
        Ok(())
    }

    fn end_line(&mut self) -> Result<()> {
        let Some(ReadFrame::Line {
            geometry, started, ..
        }) = self.stack.pop()
        else {
            return Err(protocol("end of a line that was not started"));
        };

        if started {
            self.builder.end_figure()?;
        }

        if geometry {
            self.builder.end_geometry()?;
        }

        Ok(())
    }
}

impl<B: GeometryBuilder> GeomProcessor for EventProcessor<B> {
    fn dimensions(&self) -> CoordDimensions {
        CoordDimensions::xyz()
    }

    fn srid(&mut self, srid: Option<i32>) -> geozero::error::Result<()> {
        let result = match srid {
            Some(srid) => self.builder.set_srid(Srid(srid)),
            None => Ok(()),
        };
        self.check(result)
    }

    fn xy(&mut self, x: f64, y: f64, _idx: usize) -> geozero::error::Result<()> {
        let result = self.push_coord(Coord::new(x, y));
        self.check(result)
    }

    fn coordinate(
        &mut self,
        x: f64,
        y: f64,
        z: Option<f64>,
        _m: Option<f64>,
        _t: Option<f64>,
        _tm: Option<u64>,
        _idx: usize,
    ) -> geozero::error::Result<()> {
        let result = self.push_coord(Coord::new_3d(x, y, z.unwrap_or(0.0)));
        self.check(result)
    }

    fn empty_point(&mut self, _idx: usize) -> geozero::error::Result<()> {
        let result = self
            .builder
            .begin_geometry(GeometryKind::Point, 0)
            .and_then(|_| self.builder.end_geometry());
        self.check(result)
    }

    fn point_begin(&mut self, _idx: usize) -> geozero::error::Result<()> {
        let result = self.begin(GeometryKind::Point, 1, ReadFrame::Point);
        self.check(result)
    }

    fn point_end(&mut self, _idx: usize) -> geozero::error::Result<()> {
        let result = self.end();
        self.check(result)
    }

    fn multipoint_begin(&mut self, size: usize, _idx: usize) -> geozero::error::Result<()> {
        self.stack.push(ReadFrame::MultiPoint(Vec::with_capacity(size)));
        Ok(())
    }

    fn multipoint_end(&mut self, _idx: usize) -> geozero::error::Result<()> {
        let result = self.end_multipoint();
        self.check(result)
    }

    fn linestring_begin(
        &mut self,
        _tagged: bool,
        size: usize,
        _idx: usize,
    ) -> geozero::error::Result<()> {
        let result = self.begin_line(size);
        self.check(result)
    }

    fn linestring_end(&mut self, _tagged: bool, _idx: usize) -> geozero::error::Result<()> {
        let result = self.end_line();
        self.check(result)
    }

    fn multilinestring_begin(&mut self, size: usize, _idx: usize) -> geozero::error::Result<()> {
        let result = self.begin(GeometryKind::MultiLineString, size, ReadFrame::Collection);
        self.check(result)
    }

    fn multilinestring_end(&mut self, _idx: usize) -> geozero::error::Result<()> {
        let result = self.end();
        self.check(result)
    }

    fn polygon_begin(
        &mut self,
        _tagged: bool,
        size: usize,
        _idx: usize,
    ) -> geozero::error::Result<()> {
        let result = self.begin(GeometryKind::Polygon, size, ReadFrame::Polygon);
        self.check(result)
    }

    fn polygon_end(&mut self, _tagged: bool, _idx: usize) -> geozero::error::Result<()> {
        let result = self.end();
        self.check(result)
    }

    fn multipolygon_begin(&mut self, size: usize, _idx: usize) -> geozero::error::Result<()> {
        let result = self.begin(GeometryKind::MultiPolygon, size, ReadFrame::Collection);
        self.check(result)
    }

    fn multipolygon_end(&mut self, _idx: usize) -> geozero::error::Result<()> {
        let result = self.end();
        self.check(result)
    }

    fn geometrycollection_begin(&mut self, size: usize, _idx: usize) -> geozero::error::Result<()> {
        let result = self.begin(
            GeometryKind::GeometryCollection,
            size,
            ReadFrame::Collection,
        );
        self.check(result)
    }

    fn geometrycollection_end(&mut self, _idx: usize) -> geozero::error::Result<()> {
        let result = self.end();
        self.check(result)
    }
}
