use crate::error::Result;
use crate::geometry_type::GeometryKind;
use crate::point::Coord;
use crate::srs::Srid;

/// Receiver of the geometry construction protocol.
///
/// A geometry is described by a sequence of calls:
///
/// ```text
/// set_srid?                          (once, before the root geometry)
/// begin_geometry(kind, parts)
///     begin_figure(first, points)    (for points, line strings and polygon rings)
///     add_point(p)*
///     end_figure
///   | begin_geometry ... end_geometry   (members of collections)
/// end_geometry
/// ```
///
/// `parts` is the number of direct children: figures for points, line strings and polygons, and
/// members for collections. `points` is the number of points in the figure including the first one.
/// An empty geometry is a `begin_geometry` followed directly by `end_geometry`.
///
/// Implementations report out-of-order calls and counts that do not match the described children
/// with [`GeometryError::BuilderProtocol`](crate::GeometryError::BuilderProtocol).
pub trait GeometryBuilder {
    /// Sets the spatial reference of the root geometry.
    fn set_srid(&mut self, srid: Srid) -> Result<()> {
        let _ = srid;
        Ok(())
    }

    /// Starts a geometry.
    fn begin_geometry(&mut self, kind: GeometryKind, parts: usize) -> Result<()>;

    /// Starts a figure with its first point.
    fn begin_figure(&mut self, first: Coord, points: usize) -> Result<()>;

    /// Adds the next point to the current figure.
    fn add_point(&mut self, point: Coord) -> Result<()>;

    /// Finishes the current figure.
    fn end_figure(&mut self) -> Result<()>;

    /// Finishes the current geometry.
    fn end_geometry(&mut self) -> Result<()>;
}

impl<B: GeometryBuilder + ?Sized> GeometryBuilder for &mut B {
    fn set_srid(&mut self, srid: Srid) -> Result<()> {
        (**self).set_srid(srid)
    }

    fn begin_geometry(&mut self, kind: GeometryKind, parts: usize) -> Result<()> {
        (**self).begin_geometry(kind, parts)
    }

    fn begin_figure(&mut self, first: Coord, points: usize) -> Result<()> {
        (**self).begin_figure(first, points)
    }

    fn add_point(&mut self, point: Coord) -> Result<()> {
        (**self).add_point(point)
    }

    fn end_figure(&mut self) -> Result<()> {
        (**self).end_figure()
    }

    fn end_geometry(&mut self) -> Result<()> {
        (**self).end_geometry()
    }
}
