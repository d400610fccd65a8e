//! Pointer handlers turning plot coordinates into geodetic positions.

use foundation::math::Vec3;
use shower::ConeGeometry;
use topography::{Lla, Topography, TopographyError};

/// Reacts to a click at data coordinates `(x, y)` of a figure.
pub trait ClickHandler {
    fn on_click(&self, at: (f64, f64), topo: &mut dyn Topography) -> Result<Lla, TopographyError>;
}

/// Top-down map: `(northing, westing)` in km, snapped to the ground.
#[derive(Debug, Copy, Clone, Default)]
pub struct MapClick;

impl ClickHandler for MapClick {
    fn on_click(
        &self,
        (x, y): (f64, f64),
        topo: &mut dyn Topography,
    ) -> Result<Lla, TopographyError> {
        let (x, y) = (x * 1e3, y * 1e3);
        let z = topo.ground_altitude(x, y)?;
        topo.local_to_lla(x, y, z)
    }
}

/// Profile view: `(distance along the ray, altitude)` in km.
#[derive(Debug, Copy, Clone)]
pub struct ProfileClick {
    r0: Vec3,
    u: Vec3,
}

impl ProfileClick {
    pub fn new(cone: &ConeGeometry) -> Self {
        Self {
            r0: cone.r0,
            u: cone.u,
        }
    }
}

impl ClickHandler for ProfileClick {
    fn on_click(
        &self,
        (s, z): (f64, f64),
        topo: &mut dyn Topography,
    ) -> Result<Lla, TopographyError> {
        let x = (self.r0.x + s * self.u.x) * 1e3;
        let y = (self.r0.y + s * self.u.y) * 1e3;
        topo.local_to_lla(x, y, z * 1e3)
    }
}
