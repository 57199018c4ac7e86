//! Geometry kind tags and topological dimension.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Kind of a [`Geometry`](crate::Geometry) node.
///
/// The names follow the OGC Simple Features type names, which is also what external engines report
/// for their geometries (`"Point"`, `"MultiLineString"` etc.). Linear rings are not a separate
/// kind: they only exist as boundaries of a [`Polygon`](crate::Polygon).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum GeometryKind {
    /// Single point.
    Point,
    /// Sequence of points connected with straight segments.
    LineString,
    /// Exterior ring with optional holes.
    Polygon,
    /// Set of points.
    MultiPoint,
    /// Set of line strings.
    MultiLineString,
    /// Set of polygons.
    MultiPolygon,
    /// Heterogeneous set of geometries.
    GeometryCollection,
}

impl GeometryKind {
    /// All kinds in the order of their OGC type codes.
    pub const ALL: [GeometryKind; 7] = [
        Self::Point,
        Self::LineString,
        Self::Polygon,
        Self::MultiPoint,
        Self::MultiLineString,
        Self::MultiPolygon,
        Self::GeometryCollection,
    ];

    /// OGC type name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
        }
    }

    /// Returns true for the kinds that contain other geometries.
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            Self::MultiPoint | Self::MultiLineString | Self::MultiPolygon | Self::GeometryCollection
        )
    }

    /// Kind that every member of a homogeneous collection must have. `None` for simple kinds and
    /// for [`GeometryKind::GeometryCollection`].
    pub fn member_kind(&self) -> Option<GeometryKind> {
        match self {
            Self::MultiPoint => Some(Self::Point),
            Self::MultiLineString => Some(Self::LineString),
            Self::MultiPolygon => Some(Self::Polygon),
            _ => None,
        }
    }

    /// Topological dimension of a non-empty geometry of this kind. Collections report the
    /// dimension of their members, which for a [`GeometryKind::GeometryCollection`] cannot be known
    /// from the tag alone and is reported as [`Dimension::Empty`].
    pub fn dimension(&self) -> Dimension {
        match self {
            Self::Point | Self::MultiPoint => Dimension::Point,
            Self::LineString | Self::MultiLineString => Dimension::Curve,
            Self::Polygon | Self::MultiPolygon => Dimension::Surface,
            Self::GeometryCollection => Dimension::Empty,
        }
    }
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeometryKind {
    type Err = GeometryError;

    /// Parses an OGC type name. Matching ignores ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GeometryError::UnsupportedGeometryKind(s.to_string()))
    }
}

/// Inherent dimension of a geometry.
///
/// Variants are ordered, so the dimension of a collection is the maximum of its members'
/// dimensions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Dimension {
    /// Collection without members.
    Empty,
    /// Points.
    Point,
    /// Curves.
    Curve,
    /// Surfaces.
    Surface,
}

impl Dimension {
    /// OGC numeric value: -1 for empty, then 0, 1 and 2.
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Empty => -1,
            Self::Point => 0,
            Self::Curve => 1,
            Self::Surface => 2,
        }
    }
}
