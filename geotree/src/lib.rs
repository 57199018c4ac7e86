//! Two dimensional geometry object model with a builder-protocol codec for external spatial engines
//! and WKT support.

pub mod traits;
pub use traits::*;

mod point;
pub use point::*;

mod bounding_box;
pub use bounding_box::BoundingBox;

mod geometry_type;
pub use geometry_type::{Dimension, GeometryKind};

mod line_string;
pub use line_string::LineString;

mod linear_ring;
pub use linear_ring::{LinearRing, Winding};

mod polygon;
pub use polygon::Polygon;

mod collection;
pub use collection::*;

mod geometry;
pub use geometry::{Geometry, SpatialGeometry};

mod error;
pub use error::{GeometryError, Result};

mod srs;
pub use srs::*;

mod config;
pub use config::CodecConfig;

pub mod codec;
pub mod engine;
pub use engine::{Overlay, Predicate, SpatialEngine, SpatialOps};

pub mod wkt;

#[cfg(feature = "geo-types")]
mod geo_types;
