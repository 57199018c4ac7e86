//! Conversions between the geometry model and [`geo_types`].
//!
//! `geo_types` geometries are two dimensional, so Z ordinates are dropped when converting into
//! them and set to `0` when converting back. Empty points have no `geo_types` counterpart.

use crate::collection::Collection;
use crate::error::{GeometryError, Result};
use crate::geometry::Geometry;
use crate::line_string::LineString;
use crate::linear_ring::LinearRing;
use crate::point::{Coord, Point};
use crate::polygon::Polygon;
use crate::traits::Curve;

impl From<Coord> for ::geo_types::Coord<f64> {
    fn from(value: Coord) -> Self {
        ::geo_types::Coord {
            x: value.x,
            y: value.y,
        }
    }
}

impl From<::geo_types::Coord<f64>> for Coord {
    fn from(value: ::geo_types::Coord<f64>) -> Self {
        Coord::new(value.x, value.y)
    }
}

impl TryFrom<&Point> for ::geo_types::Point<f64> {
    type Error = GeometryError;

    fn try_from(value: &Point) -> Result<Self> {
        Ok(::geo_types::Point(value.coord()?.into()))
    }
}

impl From<::geo_types::Point<f64>> for Point {
    fn from(value: ::geo_types::Point<f64>) -> Self {
        Point::new(value.x(), value.y())
    }
}

fn to_line<C: Curve + ?Sized>(curve: &C) -> ::geo_types::LineString<f64> {
    curve.coords().iter().map(|&c| ::geo_types::Coord::from(c)).collect()
}

fn coords(line: &::geo_types::LineString<f64>) -> Vec<Coord> {
    line.coords().map(|&c| c.into()).collect()
}

impl From<&LineString> for ::geo_types::LineString<f64> {
    fn from(value: &LineString) -> Self {
        to_line(value)
    }
}

impl From<::geo_types::LineString<f64>> for LineString {
    fn from(value: ::geo_types::LineString<f64>) -> Self {
        LineString::new(coords(&value))
    }
}

impl From<&LinearRing> for ::geo_types::LineString<f64> {
    fn from(value: &LinearRing) -> Self {
        to_line(value)
    }
}

impl TryFrom<&::geo_types::LineString<f64>> for LinearRing {
    type Error = GeometryError;

    fn try_from(value: &::geo_types::LineString<f64>) -> Result<Self> {
        LinearRing::closing(coords(value))
    }
}

impl From<&Polygon> for ::geo_types::Polygon<f64> {
    fn from(value: &Polygon) -> Self {
        ::geo_types::Polygon::new(
            value.exterior().into(),
            value.interiors().iter().map(Into::into).collect(),
        )
    }
}

impl TryFrom<::geo_types::Polygon<f64>> for Polygon {
    type Error = GeometryError;

    fn try_from(value: ::geo_types::Polygon<f64>) -> Result<Self> {
        let exterior = value.exterior().try_into()?;
        let interiors = value
            .interiors()
            .iter()
            .map(LinearRing::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Polygon::new(exterior, interiors))
    }
}

impl TryFrom<&Geometry> for ::geo_types::Geometry<f64> {
    type Error = GeometryError;

    fn try_from(value: &Geometry) -> Result<Self> {
        Ok(match value {
            Geometry::Point(v) => ::geo_types::Point::try_from(v)?.into(),
            Geometry::LineString(v) => ::geo_types::LineString::from(v).into(),
            Geometry::Polygon(v) => ::geo_types::Polygon::from(v).into(),
            Geometry::MultiPoint(v) => ::geo_types::MultiPoint(
                v.iter()
                    .map(::geo_types::Point::try_from)
                    .collect::<Result<_>>()?,
            )
            .into(),
            Geometry::MultiLineString(v) => {
                ::geo_types::MultiLineString(v.iter().map(Into::into).collect()).into()
            }
            Geometry::MultiPolygon(v) => {
                ::geo_types::MultiPolygon(v.iter().map(Into::into).collect()).into()
            }
            Geometry::GeometryCollection(v) => {
                ::geo_types::Geometry::GeometryCollection(::geo_types::GeometryCollection(
                    v.iter()
                        .map(::geo_types::Geometry::try_from)
                        .collect::<Result<_>>()?,
                ))
            }
        })
    }
}

impl TryFrom<::geo_types::Geometry<f64>> for Geometry {
    type Error = GeometryError;

    /// Lines, rectangles and triangles are converted into line strings and polygons.
    fn try_from(value: ::geo_types::Geometry<f64>) -> Result<Self> {
        Ok(match value {
            ::geo_types::Geometry::Point(v) => Point::from(v).into(),
            ::geo_types::Geometry::Line(v) => {
                LineString::new(vec![v.start.into(), v.end.into()]).into()
            }
            ::geo_types::Geometry::LineString(v) => LineString::from(v).into(),
            ::geo_types::Geometry::Polygon(v) => Polygon::try_from(v)?.into(),
            ::geo_types::Geometry::MultiPoint(v) => {
                Collection::new(v.into_iter().map(Point::from).collect()).into()
            }
            ::geo_types::Geometry::MultiLineString(v) => {
                Collection::new(v.into_iter().map(LineString::from).collect()).into()
            }
            ::geo_types::Geometry::MultiPolygon(v) => Collection::new(
                v.into_iter()
                    .map(Polygon::try_from)
                    .collect::<Result<Vec<_>>>()?,
            )
            .into(),
            ::geo_types::Geometry::GeometryCollection(v) => Collection::new(
                v.into_iter()
                    .map(Geometry::try_from)
                    .collect::<Result<Vec<_>>>()?,
            )
            .into(),
            ::geo_types::Geometry::Rect(v) => Polygon::try_from(v.to_polygon())?.into(),
            ::geo_types::Geometry::Triangle(v) => Polygon::try_from(v.to_polygon())?.into(),
        })
    }
}
