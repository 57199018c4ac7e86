//! Spatial reference identifiers.
//!
//! Geometries only carry an integer identifier of their spatial reference system. Turning that
//! identifier into a definition is a job of a [`SpatialReferenceResolver`] provided by the
//! application.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::wkt::{self, WktVariations};

/// Spatial reference system identifier, usually an EPSG code.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct Srid(pub i32);

impl Srid {
    /// Unknown or unset reference system.
    pub const UNKNOWN: Srid = Srid(0);
    /// WGS 84 geographic coordinates.
    pub const WGS84: Srid = Srid(4326);

    const UTM_NORTH_BASE: i32 = 32600;
    const UTM_ZONES: u8 = 60;

    /// WGS 84 / UTM zone in the northern hemisphere, e.g. zone 40 is `32640`.
    pub fn utm_north(zone: u8) -> Self {
        Self(Self::UTM_NORTH_BASE + i32::from(zone))
    }

    /// UTM zone number if the identifier belongs to the WGS 84 / UTM north family.
    pub fn utm_zone(&self) -> Option<u8> {
        let zone = self.0 - Self::UTM_NORTH_BASE;
        u8::try_from(zone)
            .ok()
            .filter(|zone| (1..=Self::UTM_ZONES).contains(zone))
    }

    /// Numeric value of the identifier.
    pub fn code(&self) -> i32 {
        self.0
    }
}

impl Display for Srid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

impl From<i32> for Srid {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<Srid> for i32 {
    fn from(value: Srid) -> Self {
        value.0
    }
}

/// Kind of a coordinate system.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ReferenceKind {
    /// Longitude and latitude on an ellipsoid.
    Geographic,
    /// Planar coordinates produced by a map projection.
    Projected,
}

/// Definition of a spatial reference system.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpatialReference {
    /// Identifier.
    pub srid: Srid,
    /// Human readable name.
    pub name: String,
    /// Geographic or projected.
    pub kind: ReferenceKind,
    /// WKT definition of the system.
    pub wkt: String,
}

impl SpatialReference {
    /// Best-effort check that the definition mentions the given datum and, optionally, projection.
    /// See [`wkt::verify`].
    pub fn matches(&self, datum: &WktVariations, projection: Option<&WktVariations>) -> bool {
        wkt::verify(&self.wkt, datum, projection)
    }
}

/// Lookup of spatial reference definitions by identifier.
pub trait SpatialReferenceResolver {
    /// Definition of the system, `None` if the identifier is not known.
    fn resolve(&self, srid: Srid) -> Option<SpatialReference>;
}

impl SpatialReferenceResolver for HashMap<Srid, SpatialReference> {
    fn resolve(&self, srid: Srid) -> Option<SpatialReference> {
        self.get(&srid).cloned()
    }
}

impl<T: SpatialReferenceResolver + ?Sized> SpatialReferenceResolver for &T {
    fn resolve(&self, srid: Srid) -> Option<SpatialReference> {
        (**self).resolve(srid)
    }
}
