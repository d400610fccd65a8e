use foundation::math::{Enu, Geodetic, TangentFrame, Vec3, WGS84};

/// Local Cartesian frame tangent to the WGS84 ellipsoid at an origin.
///
/// Axes: `x` points north, `y` points west, `z` points up. Units are meters.
/// The origin sits on the ellipsoid (zero height).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LocalFrame {
    tangent: TangentFrame,
}

impl LocalFrame {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            tangent: TangentFrame::new(Geodetic::from_degrees(latitude_deg, longitude_deg, 0.0)),
        }
    }

    pub fn to_geodetic(&self, p: Vec3) -> Geodetic {
        let enu = Enu::new(-p.y, p.x, p.z);
        WGS84.to_geodetic(self.tangent.to_ecef(enu))
    }

    pub fn from_geodetic(&self, geo: Geodetic) -> Vec3 {
        let enu = self.tangent.to_enu(WGS84.to_ecef(geo));
        Vec3::new(enu.north, -enu.east, enu.up)
    }
}
