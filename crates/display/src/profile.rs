//! Altitude profile along the decay ray.

use foundation::math::linspace;
use shower::ConeGeometry;
use topography::{Topography, TopographyError};
use tracing::debug;

/// Samples taken along the ray.
pub const PROFILE_SAMPLES: usize = 10001;
/// Room kept past the farthest antenna (km).
pub const PROFILE_MARGIN_KM: f64 = 5.0;

/// Far end of the plotted ray: the cone end, pulled in to the farthest
/// antenna plus [`PROFILE_MARGIN_KM`] when that is closer.
pub fn adjusted_far_distance(cone: &ConeGeometry) -> f64 {
    cone.antenna_distances()
        .into_iter()
        .reduce(f64::max)
        .map_or(cone.zcmax, |farthest| {
            cone.zcmax.min(farthest + PROFILE_MARGIN_KM)
        })
}

/// Straight piece of the ray in `(s, z)` coordinates (km).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RaySegment {
    pub start: (f64, f64),
    pub end: (f64, f64),
}

impl RaySegment {
    fn along(cone: &ConeGeometry, s0: f64, s1: f64) -> Self {
        Self {
            start: (s0, cone.point_on_ray(s0).z),
            end: (s1, cone.point_on_ray(s1).z),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Adjusted far distance; the x axis spans `[0, zcmax]`.
    pub zcmax: f64,
    /// Distances along the ray (km).
    pub s: Vec<f64>,
    /// Ground altitude below each sample (km).
    pub terrain: Vec<f64>,
    /// Decay point to cone start.
    pub near: RaySegment,
    /// Cone start to the adjusted far end.
    pub far: RaySegment,
    /// Antennas as `(projected distance, altitude)` (km).
    pub antennas: Vec<(f64, f64)>,
    /// Samples outside the elevation data.
    pub uncovered: usize,
}

impl Profile {
    /// Terrain samples as `(s, z)` points.
    pub fn terrain_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.s.iter().copied().zip(self.terrain.iter().copied())
    }

    /// Altitude range of everything drawn, padded by 5 % on each side.
    pub fn altitude_range(&self) -> (f64, f64) {
        let segment_z = [self.near, self.far]
            .into_iter()
            .flat_map(|seg| [seg.start.1, seg.end.1]);
        let values = self
            .terrain
            .iter()
            .copied()
            .chain(segment_z)
            .chain(self.antennas.iter().map(|a| a.1));

        let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
        for v in values {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        let pad = if hi > lo { 0.05 * (hi - lo) } else { 0.5 };
        (lo - pad, hi + pad)
    }
}

/// Sample the ground below the ray at `samples` points over `[0, zcmax']`.
///
/// A sample outside the elevation data repeats the previous sample's altitude;
/// the first sample has nothing to repeat and reads 0 km. Other lookup
/// failures abort.
pub fn sample_profile<T>(
    cone: &ConeGeometry,
    topo: &mut T,
    samples: usize,
) -> Result<Profile, TopographyError>
where
    T: Topography + ?Sized,
{
    let zcmax = adjusted_far_distance(cone);
    let s = linspace(0.0, zcmax, samples);

    let mut uncovered = 0;
    let mut terrain: Vec<f64> = Vec::with_capacity(s.len());
    for &si in &s {
        let p = cone.point_on_ray(si);
        let z = match topo.ground_altitude(p.x * 1e3, p.y * 1e3) {
            Ok(z) => z * 1e-3,
            Err(e) if e.is_out_of_coverage() => {
                uncovered += 1;
                terrain.last().copied().unwrap_or(0.0)
            }
            Err(e) => return Err(e),
        };
        terrain.push(z);
    }
    debug!(
        "profile over {zcmax:.3} km: {uncovered} of {} samples outside elevation data",
        s.len()
    );

    let antennas = cone
        .antennas
        .iter()
        .map(|a| (cone.projected_distance(*a), a.z))
        .collect();

    Ok(Profile {
        zcmax,
        s,
        terrain,
        near: RaySegment::along(cone, 0.0, cone.zcmin),
        far: RaySegment::along(cone, cone.zcmin, zcmax),
        antennas,
        uncovered,
    })
}
