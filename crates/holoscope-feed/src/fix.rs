//! Satellite and planet position records.

use std::str::FromStr;

use holoscope_pointing::{AstralTarget, EARTH_RADIUS_KM};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const KM_PER_MILE: f32 = 1.609_344;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to decode feed JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unknown satellite visibility: {0}")]
    UnknownVisibility(String),
    #[error("unknown units: {0}")]
    UnknownUnits(String),
    #[error("feed channel disconnected")]
    Disconnected,
}

/// Lighting state of a satellite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Daylight,
    Nighttime,
    Eclipsed,
}

impl FromStr for Visibility {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daylight" => Ok(Visibility::Daylight),
            "nighttime" => Ok(Visibility::Nighttime),
            "eclipsed" => Ok(Visibility::Eclipsed),
            other => Err(FeedError::UnknownVisibility(other.to_string())),
        }
    }
}

/// Units of altitude and velocity in a satellite record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    Miles,
    Kilometers,
}

impl FromStr for Units {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "miles" => Ok(Units::Miles),
            "kilometers" => Ok(Units::Kilometers),
            other => Err(FeedError::UnknownUnits(other.to_string())),
        }
    }
}

/// Field layout of the satellite API response. Extra fields are ignored.
#[derive(Deserialize)]
struct RawSatelliteFix {
    name: String,
    latitude: f32,
    longitude: f32,
    altitude: f32,
    velocity: f32,
    visibility: String,
    footprint: f32,
    timestamp: i64,
    units: String,
}

/// One satellite position report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteFix {
    pub name: String,
    /// Degrees.
    pub latitude: f32,
    /// Degrees, geographic convention (east positive).
    pub longitude: f32,
    /// Height above the surface in `units`.
    pub altitude: f32,
    /// Ground speed in `units` per hour.
    pub velocity: f32,
    pub visibility: Visibility,
    /// Diameter of the visible footprint in `units`.
    pub footprint: f32,
    /// Unix seconds.
    pub timestamp: i64,
    pub units: Units,
}

impl SatelliteFix {
    /// Decode one API response body.
    pub fn from_json(body: &str) -> Result<Self, FeedError> {
        let raw: RawSatelliteFix = serde_json::from_str(body)?;
        Ok(Self {
            name: raw.name,
            latitude: raw.latitude,
            longitude: raw.longitude,
            altitude: raw.altitude,
            velocity: raw.velocity,
            visibility: raw.visibility.parse()?,
            footprint: raw.footprint,
            timestamp: raw.timestamp,
            units: raw.units.parse()?,
        })
    }

    pub fn altitude_km(&self) -> f32 {
        match self.units {
            Units::Kilometers => self.altitude,
            Units::Miles => self.altitude * KM_PER_MILE,
        }
    }

    /// Altitude scaled so the Earth's radius maps to `hologram_radius`.
    pub fn relative_altitude(&self, hologram_radius: f32) -> f32 {
        hologram_radius * self.altitude_km() / EARTH_RADIUS_KM
    }
}

/// A planet's position as seen from the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetFix {
    pub target: AstralTarget,
    /// Degrees from north toward east.
    pub azimuth: f32,
    /// Degrees above the horizon.
    pub altitude: f32,
    pub distance_au: f32,
}

impl PlanetFix {
    /// Decode one planet record, e.g. `{"target": "Mars", "azimuth": 120.0, ...}`.
    pub fn from_json(body: &str) -> Result<Self, FeedError> {
        Ok(serde_json::from_str(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISS: &str = r#"{
        "name": "iss", "id": 25544,
        "latitude": 50.11, "longitude": -12.3,
        "altitude": 418.2, "velocity": 27580.1,
        "visibility": "daylight", "footprint": 4491.2,
        "timestamp": 1742300000, "daynum": 2460753.1,
        "solar_lat": 0.5, "solar_lon": 120.0,
        "units": "kilometers"
    }"#;

    #[test]
    fn test_decode_api_response() {
        let fix = SatelliteFix::from_json(ISS).unwrap();
        assert_eq!(fix.name, "iss");
        assert!((fix.latitude - 50.11).abs() < 1e-4);
        assert_eq!(fix.visibility, Visibility::Daylight);
        assert_eq!(fix.units, Units::Kilometers);
        assert_eq!(fix.timestamp, 1_742_300_000);
    }

    #[test]
    fn test_unknown_visibility() {
        let body = ISS.replace("daylight", "twilight");
        let err = SatelliteFix::from_json(&body).unwrap_err();
        assert!(matches!(err, FeedError::UnknownVisibility(ref v) if v == "twilight"));
    }

    #[test]
    fn test_unknown_units() {
        let body = ISS.replace("kilometers", "furlongs");
        assert!(matches!(
            SatelliteFix::from_json(&body),
            Err(FeedError::UnknownUnits(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SatelliteFix::from_json("{\"name\": 3"),
            Err(FeedError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_planet_record() {
        let fix = PlanetFix::from_json(
            r#"{"target": "Mars", "azimuth": 120.5, "altitude": 35.0, "distance_au": 1.4}"#,
        )
        .unwrap();
        assert_eq!(fix.target, AstralTarget::Mars);
        assert_eq!(fix.azimuth, 120.5);
        assert!(matches!(
            PlanetFix::from_json(r#"{"target": "Vulcan", "azimuth": 0.0, "altitude": 0.0, "distance_au": 1.0}"#),
            Err(FeedError::Decode(_))
        ));
    }

    #[test]
    fn test_relative_altitude_in_miles() {
        let body = ISS.replace("kilometers", "miles");
        let fix = SatelliteFix::from_json(&body).unwrap();
        let expected = 0.8 * 418.2 * KM_PER_MILE / 6371.0;
        assert!((fix.relative_altitude(0.8) - expected).abs() < 1e-6);
    }
}
