//! Great-Circle Distance & Nearest-Zone Selection
//!
//! The forecast endpoint receives a caller coordinate and a list of named
//! areas from the weather provider, each with a representative location.
//! This module picks the area closest to the caller using the haversine
//! formula on a spherical Earth.
//!
//! Distances are computed in kilometers but are only ever compared, so
//! the absolute values carry no API meaning. Inputs are degrees; the
//! conversion to radians happens here.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers, as used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLon {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A named region with a representative coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub location: LatLon,
}

impl Zone {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            location: LatLon::new(latitude, longitude),
        }
    }
}

/// Great-circle distance between two points in kilometers.
///
/// Haversine formula on a sphere of radius [`EARTH_RADIUS_KM`]. Accurate
/// to well under a percent for the comparisons this server makes, and
/// total (never NaN) for any finite input.
pub fn haversine_km(from: LatLon, to: LatLon) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    // Floating-point drift can push `a` a hair past 1.0 near antipodal
    // points, which would make sqrt(1 - a) NaN.
    let a = a.min(1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// The zone closest to `point`, or `None` when `zones` is empty.
///
/// Ties keep the earliest zone in the slice, so the result is
/// deterministic for a fixed input ordering.
pub fn nearest_zone(point: LatLon, zones: &[Zone]) -> Option<&Zone> {
    let mut closest: Option<(&Zone, f64)> = None;

    for zone in zones {
        let distance = haversine_km(point, zone.location);
        match closest {
            Some((_, best)) if distance >= best => {}
            _ => closest = Some((zone, distance)),
        }
    }

    closest.map(|(zone, _)| zone)
}
