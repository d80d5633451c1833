use std::fmt::{Display, Formatter};

use ordered_float::OrderedFloat;

use crate::prelude::*;

/// Latitude/longitude pair rounded to a 0.0001° cell.
///
/// Rounding happens on construction, so any two points that land in the same cell compare
/// equal and hash alike – this is what makes the point usable as a cache key.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GeoPoint {
    latitude: OrderedFloat<f64>,
    longitude: OrderedFloat<f64>,
}

impl GeoPoint {
    /// Number of cells per degree.
    const SCALE: f64 = 10_000.0;

    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        ensure!(latitude.is_finite() && longitude.is_finite(), "coordinates must be finite");
        ensure!((-90.0..=90.0).contains(&latitude), "latitude {latitude} is out of range");
        ensure!((-180.0..=180.0).contains(&longitude), "longitude {longitude} is out of range");
        Ok(Self { latitude: Self::round(latitude).into(), longitude: Self::round(longitude).into() })
    }

    pub const fn latitude(self) -> f64 {
        self.latitude.0
    }

    pub const fn longitude(self) -> f64 {
        self.longitude.0
    }

    fn round(degrees: f64) -> f64 {
        // Adding zero turns `-0.0` into `0.0`.
        (degrees * Self::SCALE).round() / Self::SCALE + 0.0
    }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}
