use serde::{Deserialize, Serialize};

use crate::srs::Srid;

/// Settings used by the codecs when the input does not specify them.
///
/// Missing fields of a deserialized config take the default values:
///
/// * `default_srid` - `32640` (WGS 84 / UTM zone 40N), assigned to parsed and decoded geometries
///   without an identifier of their own;
/// * `geographic_srid` - `4326` (WGS 84);
/// * `utm_zone` - `40`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Identifier assigned to geometries that come without one.
    pub default_srid: Srid,
    /// Identifier of the geographic system used by the application.
    pub geographic_srid: Srid,
    /// UTM zone of the projected system used by the application.
    pub utm_zone: u8,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            default_srid: Srid::utm_north(40),
            geographic_srid: Srid::WGS84,
            utm_zone: 40,
        }
    }
}

impl CodecConfig {
    /// Sets the identifier assigned to geometries that come without one.
    pub fn with_default_srid(mut self, srid: Srid) -> Self {
        self.default_srid = srid;
        self
    }

    /// Identifier of the WGS 84 / UTM north system for the configured zone.
    pub fn utm_srid(&self) -> Srid {
        Srid::utm_north(self.utm_zone)
    }

    /// `srid` if it is known, otherwise the configured default.
    pub fn resolve_srid(&self, srid: Option<Srid>) -> Srid {
        match srid {
            Some(srid) if srid != Srid::UNKNOWN => srid,
            _ => self.default_srid,
        }
    }
}
