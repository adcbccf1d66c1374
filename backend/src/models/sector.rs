use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Industry/category dimension of a time series.
///
/// The aggregate bucket and the two rate pseudo-series carry different
/// aggregation rules than ordinary sectors, so they are explicit variants
/// instead of sentinel strings. Storage keys round-trip losslessly through
/// [`Sector::from_key`] / [`Sector::key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sector {
    /// Catch-all aggregate bucket ("total").
    Total,
    /// Headline unemployment rate pseudo-series.
    UnemploymentRate,
    /// Labor-force participation rate pseudo-series.
    ParticipationRate,
    /// An ordinary named sector ("manufacturing", "unemployment_retail", ...).
    Named(String),
}

impl Sector {
    /// Parse a storage key. Never fails; unknown keys become [`Sector::Named`].
    pub fn from_key(key: &str) -> Sector {
        match key {
            "total" => Sector::Total,
            "unemployment_rate" => Sector::UnemploymentRate,
            "participation_rate" => Sector::ParticipationRate,
            other => Sector::Named(other.to_string()),
        }
    }

    /// Storage/wire key for this sector.
    pub fn key(&self) -> &str {
        match self {
            Sector::Total => "total",
            Sector::UnemploymentRate => "unemployment_rate",
            Sector::ParticipationRate => "participation_rate",
            Sector::Named(key) => key.as_str(),
        }
    }

    /// Display label for known sectors.
    pub fn label(&self) -> Option<&'static str> {
        let label = match self.key() {
            "total" => "TOTAL NONFARM",
            "manufacturing" => "MANUFACTURING",
            "healthcare" => "HEALTHCARE",
            "retail" => "RETAIL",
            "professional" => "PROFESSIONAL SERVICES",
            "information" => "INFORMATION/TECH",
            "government" => "GOVERNMENT",
            "unemployment_rate" => "UNEMPLOYMENT RATE",
            "participation_rate" => "PARTICIPATION RATE",
            _ => return None,
        };
        Some(label)
    }

    /// Chart color for known sectors.
    pub fn color(&self) -> Option<&'static str> {
        let color = match self.key() {
            "total" => "#ef4444",
            "manufacturing" => "#f59e0b",
            "healthcare" => "#22c55e",
            "retail" => "#3b82f6",
            "professional" => "#a855f7",
            "information" => "#ec4899",
            "government" => "#06b6d4",
            "unemployment_rate" => "#06b6d4",
            _ => return None,
        };
        Some(color)
    }

    /// True for the rate pseudo-series (percentage-valued, not counts).
    pub fn is_rate(&self) -> bool {
        matches!(self, Sector::UnemploymentRate | Sector::ParticipationRate)
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl From<&str> for Sector {
    fn from(key: &str) -> Self {
        Sector::from_key(key)
    }
}

impl Serialize for Sector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Sector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Sector::from_key(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::Sector;

    #[test]
    fn test_key_roundtrip() {
        for key in [
            "total",
            "unemployment_rate",
            "participation_rate",
            "manufacturing",
            "unemployment_manufacturing",
        ] {
            assert_eq!(Sector::from_key(key).key(), key);
        }
    }

    #[test]
    fn test_sentinel_keys_become_tagged_variants() {
        assert_eq!(Sector::from_key("total"), Sector::Total);
        assert_eq!(Sector::from_key("unemployment_rate"), Sector::UnemploymentRate);
        assert_eq!(Sector::from_key("participation_rate"), Sector::ParticipationRate);
        assert_eq!(
            Sector::from_key("healthcare"),
            Sector::Named("healthcare".to_string())
        );
    }

    #[test]
    fn test_labels_and_colors() {
        assert_eq!(Sector::Total.label(), Some("TOTAL NONFARM"));
        assert_eq!(Sector::from_key("information").label(), Some("INFORMATION/TECH"));
        assert_eq!(Sector::from_key("information").color(), Some("#ec4899"));
        assert_eq!(Sector::from_key("unknown_sector").label(), None);
    }

    #[test]
    fn test_is_rate() {
        assert!(Sector::UnemploymentRate.is_rate());
        assert!(Sector::ParticipationRate.is_rate());
        assert!(!Sector::Total.is_rate());
        // Industry unemployment series are ordinary sectors, not pseudo-totals.
        assert!(!Sector::from_key("unemployment_manufacturing").is_rate());
    }

    #[test]
    fn test_serde_string_form() {
        let s = Sector::from_key("healthcare");
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"healthcare\"");
        let back: Sector = serde_json::from_str("\"unemployment_rate\"").unwrap();
        assert_eq!(back, Sector::UnemploymentRate);
    }
}
