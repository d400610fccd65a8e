//! Shower cone geometry derived from a decay event.
//!
//! All positions are converted from meters to kilometers before use.

use foundation::math::Vec3;
use tracing::warn;

use crate::event::{DecayProduct, Event};

/// Neutrino flavours; they leave no visible shower.
pub const INVISIBLE_PIDS: [i64; 4] = [12, 13, 14, 16];

/// Distance along the decay direction where the visible cone starts (km).
pub const CONE_NEAR_KM: f64 = 14.0;
/// Far cone distance at zero shower energy (km).
pub const CONE_FAR_BASE_KM: f64 = 55.0;
/// Growth of the far cone distance per unit of shower energy (km).
pub const CONE_FAR_SLOPE_KM: f64 = 165e-9;

const M_TO_KM: f64 = 1e-3;

pub fn is_visible(pid: i64) -> bool {
    !INVISIBLE_PIDS.contains(&pid.abs())
}

/// Sum of the momentum magnitudes of the visible decay products.
pub fn shower_energy(decay: &[DecayProduct]) -> f64 {
    decay
        .iter()
        .filter(|p| is_visible(p.pid))
        .map(|p| Vec3::from(p.momentum).norm())
        .sum()
}

/// Far end of the cone (km) for a given shower energy.
pub fn cone_far_distance(shower_energy: f64) -> f64 {
    CONE_FAR_SLOPE_KM * shower_energy + CONE_FAR_BASE_KM
}

/// Signed distance of `p` along the ray `(r0, u)`.
pub fn projected_distance(p: Vec3, r0: Vec3, u: Vec3) -> f64 {
    (p - r0).dot(u)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConeGeometry {
    /// Decay point (km).
    pub r0: Vec3,
    /// Unit decay direction.
    pub u: Vec3,
    pub zcmin: f64,
    pub zcmax: f64,
    /// Cone start, `r0 + u * zcmin`.
    pub r1: Vec3,
    /// Cone end, `r0 + u * zcmax`.
    pub r2: Vec3,
    pub shower_energy: f64,
    /// Antenna positions (km).
    pub antennas: Vec<Vec3>,
    /// Per-antenna peak amplitudes, when the event carries them.
    pub amplitudes: Option<Vec<f64>>,
}

impl ConeGeometry {
    pub fn from_event(event: &Event) -> Self {
        let r0 = Vec3::from(event.tau_at_decay.position) * M_TO_KM;
        let u = Vec3::from(event.tau_at_decay.direction);
        let shower_energy = shower_energy(&event.decay);
        let zcmin = CONE_NEAR_KM;
        let zcmax = cone_far_distance(shower_energy);

        let antennas: Vec<Vec3> = event
            .antennas
            .iter()
            .map(|a| Vec3::from(a.position) * M_TO_KM)
            .collect();

        let amplitudes = match &event.time_peaks {
            Some(peaks) if peaks.len() == antennas.len() => Some(peaks.clone()),
            Some(peaks) => {
                warn!(
                    "ignoring {} time peaks for {} antennas",
                    peaks.len(),
                    antennas.len()
                );
                None
            }
            None => None,
        };

        Self {
            r0,
            u,
            zcmin,
            zcmax,
            r1: r0 + u * zcmin,
            r2: r0 + u * zcmax,
            shower_energy,
            antennas,
            amplitudes,
        }
    }

    pub fn point_on_ray(&self, s: f64) -> Vec3 {
        self.r0 + self.u * s
    }

    pub fn projected_distance(&self, p: Vec3) -> f64 {
        projected_distance(p, self.r0, self.u)
    }

    /// Projected distance of every antenna, in input order.
    pub fn antenna_distances(&self) -> Vec<f64> {
        self.antennas
            .iter()
            .map(|a| self.projected_distance(*a))
            .collect()
    }
}
