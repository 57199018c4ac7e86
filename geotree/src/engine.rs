//! Topological operations delegated to an external geometry engine.
//!
//! The crate does not implement predicates or overlays itself. An engine is plugged in through
//! [`SpatialEngine`]: it accepts geometries through the builder protocol and exposes its results
//! through the [`GeometrySource`] accessors. [`SpatialOps`] does the encoding and decoding around
//! each call.

use std::fmt::{Display, Formatter};

use crate::codec::{decode, encode_into, GeometryBuilder, GeometrySource};
use crate::config::CodecConfig;
use crate::error::Result;
use crate::geometry::SpatialGeometry;

/// Spatial relation between two geometries.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// Geometries have no point in common.
    Disjoint,
    /// Geometries have at least one point in common.
    Intersects,
    /// Geometries touch at their boundaries, but their interiors do not intersect.
    Touches,
    /// Geometries have some but not all interior points in common.
    Crosses,
    /// The first geometry lies inside the second one.
    Within,
    /// The second geometry lies inside the first one.
    Contains,
    /// Geometries of the same dimension share some, but not all, of their points.
    Overlaps,
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Point set operation between two geometries.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Overlay {
    /// Points shared by both geometries.
    Intersection,
    /// Points of either geometry.
    Union,
    /// Points of the first geometry that are not in the second one.
    Difference,
    /// Points that are in exactly one of the geometries.
    SymDifference,
}

impl Display for Overlay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// External engine performing topological computations.
///
/// Failures inside of the engine should be reported as
/// [`GeometryError::Engine`](crate::GeometryError::Engine).
pub trait SpatialEngine {
    /// Engine representation of a geometry.
    type Geometry: GeometrySource;
    /// Builder that constructs engine geometries.
    type Builder: GeometryBuilder;

    /// Creates a builder for a new engine geometry.
    fn builder(&self) -> Self::Builder;

    /// Finishes the geometry described to the builder.
    fn build(&self, builder: Self::Builder) -> Result<Self::Geometry>;

    /// Tests the spatial relation `a <predicate> b`.
    fn relate(&self, predicate: Predicate, a: &Self::Geometry, b: &Self::Geometry) -> Result<bool>;

    /// Computes the point set operation `a <operation> b`.
    fn overlay(
        &self,
        operation: Overlay,
        a: &Self::Geometry,
        b: &Self::Geometry,
    ) -> Result<Self::Geometry>;

    /// All points within the given distance of the geometry.
    fn buffer(&self, geometry: &Self::Geometry, distance: f64) -> Result<Self::Geometry>;

    /// Smallest convex geometry containing the geometry.
    fn convex_hull(&self, geometry: &Self::Geometry) -> Result<Self::Geometry>;

    /// Closure of the combinatorial boundary of the geometry.
    fn boundary(&self, geometry: &Self::Geometry) -> Result<Self::Geometry>;

    /// Shortest distance between the geometries.
    fn distance(&self, a: &Self::Geometry, b: &Self::Geometry) -> Result<f64>;

    /// Returns true if the geometry has no anomalous points, such as self intersections.
    fn is_simple(&self, geometry: &Self::Geometry) -> Result<bool>;
}

/// Runs spatial operations on geometry trees with an external engine.
#[derive(Debug, Clone, Default)]
pub struct SpatialOps<E> {
    engine: E,
    config: CodecConfig,
}

impl<E: SpatialEngine> SpatialOps<E> {
    /// Creates a new instance. The config is used to decode engine results that come without a
    /// spatial reference.
    pub fn new(engine: E, config: CodecConfig) -> Self {
        Self { engine, config }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Codec configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Converts the geometry into the engine representation.
    pub fn to_engine(&self, geometry: &SpatialGeometry) -> Result<E::Geometry> {
        let mut builder = self.engine.builder();
        encode_into(geometry, &mut builder)?;
        self.engine.build(builder)
    }

    /// Converts an engine geometry into a tree.
    pub fn from_engine(&self, geometry: &E::Geometry) -> Result<SpatialGeometry> {
        decode(geometry, &self.config)
    }

    /// Tests the spatial relation `a <predicate> b`.
    pub fn relate(
        &self,
        predicate: Predicate,
        a: &SpatialGeometry,
        b: &SpatialGeometry,
    ) -> Result<bool> {
        let (a, b) = self.operands(a, b)?;
        let result = self.engine.relate(predicate, &a, &b)?;
        log::debug!("Predicate {predicate} evaluated to {result}");

        Ok(result)
    }

    /// See [`Predicate::Disjoint`].
    pub fn disjoint(&self, a: &SpatialGeometry, b: &SpatialGeometry) -> Result<bool> {
        self.relate(Predicate::Disjoint, a, b)
    }

    /// See [`Predicate::Intersects`].
    pub fn intersects(&self, a: &SpatialGeometry, b: &SpatialGeometry) -> Result<bool> {
        self.relate(Predicate::Intersects, a, b)
    }

    /// See [`Predicate::Touches`].
    pub fn touches(&self, a: &SpatialGeometry, b: &SpatialGeometry) -> Result<bool> {
        self.relate(Predicate::Touches, a, b)
    }

    /// See [`Predicate::Crosses`].
    pub fn crosses(&self, a: &SpatialGeometry, b: &SpatialGeometry) -> Result<bool> {
        self.relate(Predicate::Crosses, a, b)
    }

    /// See [`Predicate::Within`].
    pub fn within(&self, a: &SpatialGeometry, b: &SpatialGeometry) -> Result<bool> {
        self.relate(Predicate::Within, a, b)
    }

    /// See [`Predicate::Contains`].
    pub fn contains(&self, a: &SpatialGeometry, b: &SpatialGeometry) -> Result<bool> {
        self.relate(Predicate::Contains, a, b)
    }

    /// See [`Predicate::Overlaps`].
    pub fn overlaps(&self, a: &SpatialGeometry, b: &SpatialGeometry) -> Result<bool> {
        self.relate(Predicate::Overlaps, a, b)
    }

    /// Computes the point set operation `a <operation> b`.
    pub fn overlay(
        &self,
        operation: Overlay,
        a: &SpatialGeometry,
        b: &SpatialGeometry,
    ) -> Result<SpatialGeometry> {
        let (a, b) = self.operands(a, b)?;
        let result = self.engine.overlay(operation, &a, &b)?;
        log::debug!("Overlay {operation} finished");

        self.from_engine(&result)
    }

    /// See [`Overlay::Intersection`].
    pub fn intersection(
        &self,
        a: &SpatialGeometry,
        b: &SpatialGeometry,
    ) -> Result<SpatialGeometry> {
        self.overlay(Overlay::Intersection, a, b)
    }

    /// See [`Overlay::Union`].
    pub fn union(&self, a: &SpatialGeometry, b: &SpatialGeometry) -> Result<SpatialGeometry> {
        self.overlay(Overlay::Union, a, b)
    }

    /// See [`Overlay::Difference`].
    pub fn difference(&self, a: &SpatialGeometry, b: &SpatialGeometry) -> Result<SpatialGeometry> {
        self.overlay(Overlay::Difference, a, b)
    }

    /// See [`Overlay::SymDifference`].
    pub fn sym_difference(
        &self,
        a: &SpatialGeometry,
        b: &SpatialGeometry,
    ) -> Result<SpatialGeometry> {
        self.overlay(Overlay::SymDifference, a, b)
    }

    /// All points within the given distance of the geometry, in units of its spatial reference.
    pub fn buffer(&self, geometry: &SpatialGeometry, distance: f64) -> Result<SpatialGeometry> {
        let result = self.engine.buffer(&self.to_engine(geometry)?, distance)?;
        self.from_engine(&result)
    }

    /// Smallest convex geometry containing the geometry.
    pub fn convex_hull(&self, geometry: &SpatialGeometry) -> Result<SpatialGeometry> {
        let result = self.engine.convex_hull(&self.to_engine(geometry)?)?;
        self.from_engine(&result)
    }

    /// Boundary of the geometry.
    pub fn boundary(&self, geometry: &SpatialGeometry) -> Result<SpatialGeometry> {
        let result = self.engine.boundary(&self.to_engine(geometry)?)?;
        self.from_engine(&result)
    }

    /// Shortest distance between the geometries, in units of the spatial reference of `a`.
    pub fn distance(&self, a: &SpatialGeometry, b: &SpatialGeometry) -> Result<f64> {
        let (a, b) = self.operands(a, b)?;
        self.engine.distance(&a, &b)
    }

    /// Returns true if the geometry has no anomalous points, such as self intersections.
    pub fn is_simple(&self, geometry: &SpatialGeometry) -> Result<bool> {
        self.engine.is_simple(&self.to_engine(geometry)?)
    }

    fn operands(
        &self,
        a: &SpatialGeometry,
        b: &SpatialGeometry,
    ) -> Result<(E::Geometry, E::Geometry)> {
        if a.srid() != b.srid() {
            log::warn!(
                "Operands of a spatial operation have different spatial references: {} and {}",
                a.srid(),
                b.srid()
            );
        }

        Ok((self.to_engine(a)?, self.to_engine(b)?))
    }
}
