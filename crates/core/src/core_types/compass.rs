//! 16-point compass sectors

use crate::core_types::units::Degrees;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the 16 compass points, each covering a 22.5° sector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[allow(clippy::upper_case_acronyms, missing_docs)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassPoint {
    /// All points clockwise from North
    pub const ALL: [CompassPoint; 16] = [
        CompassPoint::N,
        CompassPoint::NNE,
        CompassPoint::NE,
        CompassPoint::ENE,
        CompassPoint::E,
        CompassPoint::ESE,
        CompassPoint::SE,
        CompassPoint::SSE,
        CompassPoint::S,
        CompassPoint::SSW,
        CompassPoint::SW,
        CompassPoint::WSW,
        CompassPoint::W,
        CompassPoint::WNW,
        CompassPoint::NW,
        CompassPoint::NNW,
    ];

    /// Sector containing a bearing
    #[must_use]
    pub fn from_bearing(bearing: Degrees) -> Self {
        // Sector 0 spans 348.75..11.25
        let wrapped = (*bearing + 11.25).rem_euclid(360.0);
        let sector = (wrapped / 22.5).floor() as usize % 16;
        Self::ALL[sector]
    }

    /// Position clockwise from North (0-15)
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Abbreviation such as "NNE"
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NNE => "NNE",
            CompassPoint::NE => "NE",
            CompassPoint::ENE => "ENE",
            CompassPoint::E => "E",
            CompassPoint::ESE => "ESE",
            CompassPoint::SE => "SE",
            CompassPoint::SSE => "SSE",
            CompassPoint::S => "S",
            CompassPoint::SSW => "SSW",
            CompassPoint::SW => "SW",
            CompassPoint::WSW => "WSW",
            CompassPoint::W => "W",
            CompassPoint::WNW => "WNW",
            CompassPoint::NW => "NW",
            CompassPoint::NNW => "NNW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_boundaries() {
        assert_eq!(CompassPoint::from_bearing(Degrees::new(0.0)), CompassPoint::N);
        assert_eq!(CompassPoint::from_bearing(Degrees::new(350.0)), CompassPoint::N);
        assert_eq!(CompassPoint::from_bearing(Degrees::new(11.3)), CompassPoint::NNE);
        assert_eq!(CompassPoint::from_bearing(Degrees::new(180.0)), CompassPoint::S);
        assert_eq!(CompassPoint::from_bearing(Degrees::new(225.0)), CompassPoint::SW);
        assert_eq!(CompassPoint::from_bearing(Degrees::new(337.0)), CompassPoint::NNW);
    }

    #[test]
    fn test_bearing_outside_circle_wraps() {
        let west: Degrees = toml::from_str::<toml::Value>("b = -90.0")
            .unwrap()
            .get("b")
            .unwrap()
            .clone()
            .try_into()
            .unwrap();
        assert_eq!(CompassPoint::from_bearing(west), CompassPoint::W);
        assert_eq!(CompassPoint::from_bearing(Degrees::new(-22.5)), CompassPoint::NNW);
        assert_eq!(CompassPoint::from_bearing(Degrees::new(720.0 + 90.0)), CompassPoint::E);
    }

    #[test]
    fn test_display_uses_abbreviation() {
        assert_eq!(CompassPoint::SSW.to_string(), "SSW");
        assert_eq!(CompassPoint::from_bearing(Degrees::new(292.5)).to_string(), "WNW");
    }
}
