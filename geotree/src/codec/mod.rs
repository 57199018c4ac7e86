//! Conversion between geometry trees and the builder protocol of external engines.
//!
//! Encoding walks a tree depth first and describes it with [`GeometryBuilder`] calls. Decoding goes
//! the other way: either from a sequence of builder calls, collected by a [`TreeBuilder`], or from
//! the read accessors of an external geometry ([`GeometrySource`]).
//!
//! ```
//! use geotree::codec::{decode_events, encode};
//! use geotree::{CodecConfig, Coord, LineString, SpatialGeometry, Srid};
//!
//! let line = LineString::new(vec![Coord::new(0.0, 0.0), Coord::new(1.0, 1.0)]);
//! let geometry = SpatialGeometry::new(line, Srid::WGS84);
//!
//! let events = encode(&geometry).unwrap();
//! let decoded = decode_events(&events, &CodecConfig::default()).unwrap();
//! assert_eq!(decoded, geometry);
//! ```

mod builder;
mod decode;
mod encode;
mod event;
mod tree_builder;

pub use builder::GeometryBuilder;
pub use decode::{decode, decode_into, GeometrySource, SourcePoint};
pub use encode::{encode, encode_geometry, encode_into};
pub use event::{BuilderEvent, EventStream};
pub use tree_builder::{decode_events, TreeBuilder};
