//! Beaufort wind classification

use crate::core_types::compass::CompassPoint;
use crate::core_types::units::{Degrees, MetersPerSecond};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower edge (m/s) of Beaufort forces 1-12
const BEAUFORT_LOWER_MS: [f64; 12] = [
    0.5, 1.6, 3.4, 5.5, 8.0, 10.8, 13.9, 17.2, 20.8, 24.5, 28.5, 32.7,
];

/// Wind force on the Beaufort scale with its compass direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindScale {
    /// Beaufort force 0-12
    pub beaufort: u8,
    /// Compass point the wind blows from, if direction is known
    pub direction: Option<CompassPoint>,
}

impl WindScale {
    /// Classify a wind speed and optional direction
    #[must_use]
    pub fn classify(speed: MetersPerSecond, direction: Option<Degrees>) -> Self {
        let beaufort = BEAUFORT_LOWER_MS
            .iter()
            .take_while(|&&edge| *speed >= edge)
            .count() as u8;
        Self {
            beaufort,
            direction: direction.map(CompassPoint::from_bearing),
        }
    }

    /// Beaufort descriptive term
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self.beaufort {
            0 => "Calm",
            1 => "Light air",
            2 => "Light breeze",
            3 => "Gentle breeze",
            4 => "Moderate breeze",
            5 => "Fresh breeze",
            6 => "Strong breeze",
            7 => "Near gale",
            8 => "Gale",
            9 => "Strong gale",
            10 => "Storm",
            11 => "Violent storm",
            _ => "Hurricane force",
        }
    }
}

impl fmt::Display for WindScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, force {}", self.description(), self.beaufort)?;
        if let Some(direction) = self.direction {
            write!(f, " from {direction}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beaufort_edges() {
        let force = |v| WindScale::classify(MetersPerSecond::new(v), None).beaufort;
        assert_eq!(force(0.0), 0);
        assert_eq!(force(0.5), 1);
        assert_eq!(force(5.4), 3);
        assert_eq!(force(17.2), 8);
        assert_eq!(force(32.6), 11);
        assert_eq!(force(35.0), 12);
    }

    #[test]
    fn test_direction_is_compass_point() {
        let scale = WindScale::classify(MetersPerSecond::new(9.0), Some(Degrees::new(200.0)));
        assert_eq!(scale.direction, Some(CompassPoint::SSW));
        assert_eq!(scale.description(), "Fresh breeze");
        assert_eq!(scale.to_string(), "Fresh breeze, force 5 from SSW");

        let calm = WindScale::classify(MetersPerSecond::new(0.1), None);
        assert_eq!(calm.to_string(), "Calm, force 0");
    }
}
