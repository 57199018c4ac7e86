/// Spellings of a datum or projection name as they appear in spatial reference WKT.
///
/// Variations are matched against a normalized WKT: all characters except letters and digits
/// are removed and the rest is lowercased, so `"WGS 84"` and `"WGS_1984"` both normalize to
/// something containing `"wgs84"` or `"wgs1984"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WktVariations {
    variations: Vec<String>,
}

impl WktVariations {
    /// Creates a list of variations. Each variation is normalized the same way as the WKT.
    pub fn new<I, S>(variations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            variations: variations
                .into_iter()
                .map(|v| normalize(v.as_ref()))
                .filter(|v| !v.is_empty())
                .collect(),
        }
    }

    /// WGS 84 datum.
    pub fn wgs84() -> Self {
        Self::new(["wgs1984", "wgs84"])
    }

    /// UTM zone 40 projection.
    pub fn utm40() -> Self {
        Self::new(["utm40", "utmzone40"])
    }

    /// Normalized variations.
    pub fn variations(&self) -> &[String] {
        &self.variations
    }

    fn found_in(&self, normalized_wkt: &str) -> bool {
        self.variations
            .iter()
            .any(|variation| normalized_wkt.contains(variation.as_str()))
    }
}

fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Checks whether a spatial reference WKT mentions the expected datum.
///
/// When a projection is given the WKT must still match the datum variations; the projection list
/// itself is not consulted. A WKT without any letters or digits never matches.
pub fn verify(wkt: &str, datum: &WktVariations, projection: Option<&WktVariations>) -> bool {
    let normalized = normalize(wkt);
    if normalized.is_empty() {
        log::warn!("Cannot verify an empty spatial reference WKT");
        return false;
    }

    let mut verified = datum.found_in(&normalized);
    if projection.is_some() {
        verified = verified && datum.found_in(&normalized);
    }

    log::debug!("Spatial reference WKT verification result: {verified}");
    verified
}
