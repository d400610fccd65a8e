//! Geodetic coordinates on a reference ellipsoid.
//!
//! Earth-centred, Earth-fixed positions are plain [`Vec3`] in meters.

use super::Vec3;

/// Reference ellipsoid given by its semi-major axis (meters) and flattening.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ellipsoid {
    pub a: f64,
    pub f: f64,
}

pub const WGS84: Ellipsoid = Ellipsoid {
    a: 6_378_137.0,
    f: 1.0 / 298.257_223_563,
};

/// Geodetic coordinates in radians and meters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Geodetic {
    pub lat_rad: f64,
    pub lon_rad: f64,
    pub alt_m: f64,
}

impl Geodetic {
    pub fn new(lat_rad: f64, lon_rad: f64, alt_m: f64) -> Self {
        Self {
            lat_rad,
            lon_rad,
            alt_m,
        }
    }

    pub fn from_degrees(lat_deg: f64, lon_deg: f64, alt_m: f64) -> Self {
        Self::new(lat_deg.to_radians(), lon_deg.to_radians(), alt_m)
    }

    pub fn lat_deg(&self) -> f64 {
        self.lat_rad.to_degrees()
    }

    pub fn lon_deg(&self) -> f64 {
        self.lon_rad.to_degrees()
    }

    /// Same horizontal position at another height.
    pub fn at_height(self, alt_m: f64) -> Self {
        Self { alt_m, ..self }
    }
}

impl Ellipsoid {
    /// Semi-minor axis.
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// First eccentricity squared.
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// Prime vertical radius of curvature.
    fn normal_radius(&self, sin_lat: f64) -> f64 {
        self.a / (1.0 - self.e2() * sin_lat * sin_lat).sqrt()
    }

    pub fn to_ecef(&self, geo: Geodetic) -> Vec3 {
        let (sin_lat, cos_lat) = geo.lat_rad.sin_cos();
        let (sin_lon, cos_lon) = geo.lon_rad.sin_cos();
        let n = self.normal_radius(sin_lat);
        let r = (n + geo.alt_m) * cos_lat;
        Vec3::new(
            r * cos_lon,
            r * sin_lon,
            (n * (1.0 - self.e2()) + geo.alt_m) * sin_lat,
        )
    }

    /// Bowring's closed-form inverse; sub-millimetre within a few hundred km of the surface.
    pub fn to_geodetic(&self, p: Vec3) -> Geodetic {
        let (a, b, e2) = (self.a, self.b(), self.e2());
        let ep2 = (a * a - b * b) / (b * b);
        let rho = p.x.hypot(p.y);

        let (sin_t, cos_t) = (p.z * a).atan2(rho * b).sin_cos();
        let lat = (p.z + ep2 * b * sin_t.powi(3)).atan2(rho - e2 * a * cos_t.powi(3));
        let alt = rho / lat.cos() - self.normal_radius(lat.sin());

        Geodetic::new(lat, p.y.atan2(p.x), alt)
    }
}
