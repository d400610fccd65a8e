pub mod cache;
pub mod error;
pub mod frame;
pub mod ground;
pub mod stack;
pub mod tile;

pub use cache::*;
pub use error::*;
pub use frame::*;
pub use ground::*;

use foundation::math::Geodetic;

/// Ground elevation lookup in a local planar frame (meters).
///
/// Implementations are not reentrant: queries take `&mut self` so tile caches
/// can be filled lazily.
pub trait Topography {
    /// Altitude of the ground below `(x, y)`.
    ///
    /// Fails with [`TopographyError::OutOfCoverage`] outside the loaded tiles.
    fn ground_altitude(&mut self, x: f64, y: f64) -> Result<f64, TopographyError>;

    fn local_to_lla(&self, x: f64, y: f64, z: f64) -> Result<Lla, TopographyError>;
}

impl<T: Topography + ?Sized> Topography for Box<T> {
    fn ground_altitude(&mut self, x: f64, y: f64) -> Result<f64, TopographyError> {
        (**self).ground_altitude(x, y)
    }

    fn local_to_lla(&self, x: f64, y: f64, z: f64) -> Result<Lla, TopographyError> {
        (**self).local_to_lla(x, y, z)
    }
}

/// Latitude and longitude in degrees, altitude in meters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Lla {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Lla {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }
}

impl From<Geodetic> for Lla {
    fn from(g: Geodetic) -> Self {
        Self::new(g.lat_deg(), g.lon_deg(), g.alt_m)
    }
}

/// `lat, lon, alt` with nine decimals on the angles and whole meters.
impl std::fmt::Display for Lla {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.9}, {:.9}, {:.0}",
            self.latitude, self.longitude, self.altitude
        )
    }
}
