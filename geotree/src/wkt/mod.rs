//! Well-known text reading and writing.
//!
//! The text grammar is handled by `geozero`. Geometries are passed to and from it through the same
//! builder protocol that is used for the engine codec, so WKT round trips keep the structure and
//! coordinates of the tree.

use geozero::error::GeozeroError;
use geozero::wkt::{WktStr, WktWriter};
use geozero::{CoordDimensions, GeomProcessor, GeozeroGeometry};

use crate::codec::{encode_geometry, TreeBuilder};
use crate::config::CodecConfig;
use crate::error::{GeometryError, Result};
use crate::geometry::{Geometry, SpatialGeometry};
use crate::srs::Srid;
use crate::traits::Shape;

mod processor;
mod verify;

pub use processor::{EventProcessor, ProcessorSink};
pub use verify::{verify, WktVariations};

/// Writes the geometry as WKT.
///
/// Z ordinates are written only if at least one of them is not `0`. Three dimensional output uses
/// the ISO `Z` tag (`POINT Z(1 2 3)`), which the reader requires to parse the third ordinate.
pub fn to_wkt(geometry: &Geometry) -> Result<String> {
    let has_z = geometry.points().iter().any(|coord| coord.z != 0.0);
    let dims = if has_z {
        CoordDimensions::xyz()
    } else {
        CoordDimensions::xy()
    };

    let mut out: Vec<u8> = Vec::new();
    {
        let mut writer = WktWriter::with_dims(&mut out, dims);
        encode_geometry(geometry, &mut ProcessorSink::new(&mut writer))?;
    }

    let wkt = String::from_utf8(out).map_err(|err| GeometryError::Wkt(err.to_string()))?;
    Ok(if has_z { tag_z(&wkt) } else { wkt })
}

/// Adds the `Z` tag to every keyword that opens a coordinate list.
///
/// `WktWriter` writes the third ordinate without tagging it. Collection members carry their own
/// tags, so `GEOMETRYCOLLECTION` stays untagged, and so do `EMPTY` geometries.
fn tag_z(wkt: &str) -> String {
    let mut tagged = String::with_capacity(wkt.len() + 8);
    let mut word_start = 0;
    for (i, ch) in wkt.char_indices() {
        if ch == '(' {
            let word = &wkt[word_start..i];
            if !word.is_empty() && word != "GEOMETRYCOLLECTION" {
                tagged.push_str(" Z");
            }
        }

        if !ch.is_ascii_alphabetic() {
            word_start = i + ch.len_utf8();
        }

        tagged.push(ch);
    }

    tagged
}

/// Reads a geometry from WKT and assigns it the given spatial reference.
pub fn from_wkt(wkt: &str, srid: Srid) -> Result<SpatialGeometry> {
    let geometry = read_geometry(wkt)?;
    log::debug!("Parsed {} from WKT with {srid}", geometry.kind());

    Ok(SpatialGeometry::new(geometry, srid))
}

/// Reads a geometry from WKT and assigns it the configured default spatial reference.
pub fn from_wkt_with_config(wkt: &str, config: &CodecConfig) -> Result<SpatialGeometry> {
    from_wkt(wkt, config.default_srid)
}

fn read_geometry(wkt: &str) -> Result<Geometry> {
    let mut processor = EventProcessor::new(TreeBuilder::new());
    if let Err(err) = WktStr(wkt).process_geom(&mut processor) {
        return Err(processor.take_error().unwrap_or_else(|| err.into()));
    }

    processor.into_builder().into_geometry()
}

impl GeozeroGeometry for Geometry {
    fn process_geom<P: GeomProcessor>(&self, processor: &mut P) -> geozero::error::Result<()> {
        encode_geometry(self, &mut ProcessorSink::new(processor))
            .map_err(|err| GeozeroError::Geometry(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use geozero::ToWkt;

    use super::*;
    use crate::collection::{GeometryCollection, MultiLineString, MultiPoint, MultiPolygon};
    use crate::line_string::LineString;
    use crate::linear_ring::LinearRing;
    use crate::point::{Coord, Point};
    use crate::polygon::Polygon;
    use crate::traits::Surface;

    fn square(x: f64, y: f64, size: f64) -> LinearRing {
        LinearRing::closing(vec![
            Coord::new(x, y),
            Coord::new(x + size, y),
            Coord::new(x + size, y + size),
            Coord::new(x, y + size),
        ])
        .expect("valid ring")
    }

    #[test]
    fn writes_point() {
        let wkt = to_wkt(&Point::new(1.0, 2.0).into()).expect("writable");
        insta::assert_snapshot!(wkt, @"POINT(1 2)");
    }

    #[test]
    fn writes_line_string() {
        let line = LineString::new(vec![Coord::new(0.0, 0.0), Coord::new(1.5, 1.0)]);
        insta::assert_snapshot!(to_wkt(&line.into()).expect("writable"), @"LINESTRING(0 0,1.5 1)");
    }

    #[test]
    fn writes_polygon_with_hole() {
        let polygon = Polygon::new(square(0.0, 0.0, 4.0), vec![square(1.0, 1.0, 1.0)]);
        insta::assert_snapshot!(
            to_wkt(&polygon.into()).expect("writable"),
            @"POLYGON((0 0,4 0,4 4,0 4,0 0),(1 1,2 1,2 2,1 2,1 1))"
        );
    }

    #[test]
    fn writes_z_tags() {
        let point: Geometry = Point::new_3d(1.0, 2.0, 3.0).into();
        insta::assert_snapshot!(to_wkt(&point).expect("writable"), @"POINT Z(1 2 3)");

        let collection: Geometry = GeometryCollection::new(vec![
            point,
            LineString::new(vec![Coord::new(0.0, 0.0), Coord::new(1.0, 0.0)]).into(),
            LineString::default().into(),
        ])
        .into();
        insta::assert_snapshot!(
            to_wkt(&collection).expect("writable"),
            @"GEOMETRYCOLLECTION(POINT Z(1 2 3),LINESTRING Z(0 0 0,1 0 0),LINESTRING EMPTY)"
        );
    }

    #[test]
    fn display_uses_wkt() {
        let geometry: Geometry = Point::new(3.0, 4.0).into();
        assert_eq!(geometry.to_string(), "POINT(3 4)");
    }

    #[test]
    fn geozero_geometry_matches_writer() {
        let geometry: Geometry =
            MultiPoint::new(vec![Point::new(1.0, 1.0), Point::new(2.0, 3.0)]).into();
        let via_geozero = geometry.to_wkt().expect("writable");
        assert_eq!(via_geozero, to_wkt(&geometry).expect("writable"));
    }

    #[test]
    fn round_trips() {
        let geometries: Vec<Geometry> = vec![
            Point::new(1.0, 2.0).into(),
            Point::new_3d(1.0, 2.0, 3.0).into(),
            LineString::new(vec![
                Coord::new(0.0, 0.0),
                Coord::new(1.0, 1.0),
                Coord::new(2.0, 0.0),
            ])
            .into(),
            Polygon::new(square(0.0, 0.0, 4.0), vec![square(1.0, 1.0, 1.0)]).into(),
            MultiPolygon::new(vec![Polygon::new(
                LinearRing::closing(vec![
                    Coord::new_3d(0.0, 0.0, 1.0),
                    Coord::new_3d(1.0, 0.0, 2.0),
                    Coord::new_3d(1.0, 1.0, 3.0),
                ])
                .expect("valid ring"),
                vec![],
            )])
            .into(),
            MultiPoint::new(vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]).into(),
            MultiLineString::new(vec![
                LineString::new(vec![Coord::new(0.0, 0.0), Coord::new(1.0, 1.0)]),
                LineString::new(vec![
                    Coord::new(5.0, 5.0),
                    Coord::new(6.0, 6.0),
                    Coord::new(7.0, 5.0),
                ]),
            ])
            .into(),
            MultiPolygon::new(vec![
                Polygon::from(square(0.0, 0.0, 1.0)),
                Polygon::from(square(5.0, 5.0, 2.0)),
            ])
            .into(),
            GeometryCollection::new(vec![
                Point::new(1.0, 1.0).into(),
                LineString::new(vec![Coord::new(0.0, 0.0), Coord::new(1.0, 0.0)]).into(),
                Polygon::from(square(0.0, 0.0, 1.0)).into(),
            ])
            .into(),
        ];

        for geometry in geometries {
            let wkt = to_wkt(&geometry).expect("writable");
            let parsed = from_wkt(&wkt, Srid::WGS84).expect("readable");
            assert_eq!(parsed.geometry(), &geometry, "{wkt}");
            assert_eq!(parsed.srid(), Srid::WGS84);
        }
    }

    #[test]
    fn empty_round_trips() {
        for geometry in [
            Geometry::empty(crate::geometry_type::GeometryKind::Point),
            Geometry::empty(crate::geometry_type::GeometryKind::LineString),
        ] {
            let wkt = to_wkt(&geometry).expect("writable");
            let parsed = from_wkt(&wkt, Srid::WGS84).expect("readable");
            assert!(parsed.geometry().is_empty(), "{wkt}");
            assert_eq!(parsed.geometry().kind(), geometry.kind());
        }
    }

    #[test]
    fn parses_polygon() {
        let parsed = from_wkt(
            "POLYGON ((0 0, 4 0, 4 4, 0 4, 0 0), (1 1, 1 2, 2 2, 2 1, 1 1))",
            Srid(32640),
        )
        .expect("readable");
        let Geometry::Polygon(polygon) = parsed.geometry() else {
            panic!("expected polygon");
        };
        assert_eq!(polygon.area(), 15.0);
        assert_eq!(parsed.srid(), Srid(32640));
    }

    #[test]
    fn parses_z() {
        let parsed = from_wkt("POINT Z (1 2 3)", Srid::WGS84).expect("readable");
        assert_eq!(parsed.geometry(), &Point::new_3d(1.0, 2.0, 3.0).into());
    }

    #[test]
    fn config_srid() {
        let config = CodecConfig::default().with_default_srid(Srid(3857));
        let parsed = from_wkt_with_config("POINT(1 2)", &config).expect("readable");
        assert_eq!(parsed.srid(), Srid(3857));
    }

    #[test]
    fn invalid_text() {
        assert_matches!(
            from_wkt("POINT(1 2", Srid::WGS84),
            Err(GeometryError::Wkt(_))
        );
        assert_matches!(
            from_wkt("POLYGON((0 0,1 1,0 0))", Srid::WGS84),
            Err(GeometryError::MalformedRing(_))
        );
    }

    #[test]
    fn empty_point_in_multipoint_is_not_writable() {
        let geometry: Geometry = MultiPoint::new(vec![Point::empty()]).into();
        assert_matches!(to_wkt(&geometry), Err(GeometryError::Wkt(_)));
        assert_eq!(geometry.to_string(), "WKT_ERROR");
    }
}
