//! Test fixtures shared by the display modules.

use foundation::math::Vec3;
use shower::{CONE_NEAR_KM, ConeGeometry};
use topography::{Lla, Topography, TopographyError};

/// Cone with zero shower energy (far end at 55 km).
pub fn cone(r0: Vec3, u: Vec3, antennas: Vec<Vec3>) -> ConeGeometry {
    let zcmax = shower::cone_far_distance(0.0);
    ConeGeometry {
        r0,
        u,
        zcmin: CONE_NEAR_KM,
        zcmax,
        r1: r0 + u * CONE_NEAR_KM,
        r2: r0 + u * zcmax,
        shower_energy: 0.0,
        antennas,
        amplitudes: None,
    }
}

/// Planar ground whose altitude is `x / 100` (meters), with optional holes.
///
/// `gaps_x` lists northings (km) where every query is out of coverage.
/// `local_to_lla` is a plain scaling: 1 km = 0.01 degree.
#[derive(Debug, Default)]
pub struct StubTopography {
    pub gaps_x: Vec<f64>,
    pub broken: bool,
    pub queries: usize,
}

impl StubTopography {
    pub fn sloped() -> Self {
        Self::default()
    }

    pub fn with_gap_x(mut self, gaps_x: Vec<f64>) -> Self {
        self.gaps_x = gaps_x;
        self
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }
}

impl Topography for StubTopography {
    fn ground_altitude(&mut self, x: f64, y: f64) -> Result<f64, TopographyError> {
        self.queries += 1;
        if self.broken {
            return Err(TopographyError::MissingDataPath("stub".into()));
        }
        let x_km = x * 1e-3;
        if self.gaps_x.iter().any(|g| (g - x_km).abs() < 1e-9) {
            return Err(TopographyError::OutOfCoverage {
                latitude: x_km,
                longitude: y * 1e-3,
            });
        }
        Ok(x / 100.0)
    }

    fn local_to_lla(&self, x: f64, y: f64, z: f64) -> Result<Lla, TopographyError> {
        Ok(Lla::new(x * 1e-5, y * 1e-5, z))
    }
}
