use super::{Geodetic, Vec3, WGS84};

/// East-north-up offsets (meters).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Enu {
    pub east: f64,
    pub north: f64,
    pub up: f64,
}

impl Enu {
    pub fn new(east: f64, north: f64, up: f64) -> Self {
        Self { east, north, up }
    }
}

/// Plane tangent to WGS84 at an origin, with its ECEF axes resolved once.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TangentFrame {
    center: Vec3,
    east: Vec3,
    north: Vec3,
    up: Vec3,
}

impl TangentFrame {
    pub fn new(origin: Geodetic) -> Self {
        let (sin_lat, cos_lat) = origin.lat_rad.sin_cos();
        let (sin_lon, cos_lon) = origin.lon_rad.sin_cos();
        Self {
            center: WGS84.to_ecef(origin),
            east: Vec3::new(-sin_lon, cos_lon, 0.0),
            north: Vec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat),
            up: Vec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat),
        }
    }

    /// Offsets of an ECEF position from the origin.
    pub fn to_enu(&self, ecef: Vec3) -> Enu {
        let d = ecef - self.center;
        Enu::new(d.dot(self.east), d.dot(self.north), d.dot(self.up))
    }

    pub fn to_ecef(&self, enu: Enu) -> Vec3 {
        self.center + self.east * enu.east + self.north * enu.north + self.up * enu.up
    }
}
