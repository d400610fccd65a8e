//! Top-down terrain sampling.

use foundation::Aabb2;
use foundation::math::linspace;
use shower::ConeGeometry;
use topography::{Topography, TopographyError};
use tracing::debug;

/// Nodes per side of the map grid.
pub const GRID_NODES: usize = 101;

/// Box holding the horizontal projection of the cone (decay point, cone start,
/// cone end) and every antenna. No margin is added.
pub fn map_bounds(cone: &ConeGeometry) -> Aabb2 {
    let ray = [cone.r0, cone.r1, cone.r2];
    let points = ray.iter().chain(&cone.antennas).map(|p| [p.x, p.y]);
    let r0 = [cone.r0.x, cone.r0.y];
    Aabb2::from_points(points).unwrap_or(Aabb2::new(r0, r0))
}

/// Ground altitude (km) sampled on a regular grid over [`map_bounds`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapGrid {
    pub bounds: Aabb2,
    /// Northing of the grid columns (km).
    pub xs: Vec<f64>,
    /// Westing of the grid rows (km).
    pub ys: Vec<f64>,
    /// `altitude[i][j]` is the ground altitude at `(xs[j], ys[i])`.
    pub altitude: Vec<Vec<f64>>,
    /// Nodes that fell outside the elevation data and were set to 0.
    pub uncovered: usize,
}

impl MapGrid {
    pub fn altitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.altitude.iter().flatten().copied()
    }
}

/// Sample the ground below the cone with `nodes × nodes` points.
///
/// A node outside the elevation data reads 0 km. Other lookup failures abort.
pub fn sample_map<T>(
    cone: &ConeGeometry,
    topo: &mut T,
    nodes: usize,
) -> Result<MapGrid, TopographyError>
where
    T: Topography + ?Sized,
{
    let bounds = map_bounds(cone);
    let xs = linspace(bounds.min[0], bounds.max[0], nodes);
    let ys = linspace(bounds.min[1], bounds.max[1], nodes);

    let mut uncovered = 0;
    let mut altitude = Vec::with_capacity(ys.len());
    for &y in &ys {
        let mut row = Vec::with_capacity(xs.len());
        for &x in &xs {
            let z = match topo.ground_altitude(x * 1e3, y * 1e3) {
                Ok(z) => z * 1e-3,
                Err(e) if e.is_out_of_coverage() => {
                    uncovered += 1;
                    0.0
                }
                Err(e) => return Err(e),
            };
            row.push(z);
        }
        altitude.push(row);
    }

    debug!(
        "map grid {}x{}: {uncovered} nodes outside elevation data",
        xs.len(),
        ys.len()
    );
    Ok(MapGrid {
        bounds,
        xs,
        ys,
        altitude,
        uncovered,
    })
}

#[cfg(test)]
mod tests {
    use super::{GRID_NODES, map_bounds, sample_map};
    use crate::testing::{StubTopography, cone};
    use foundation::Aabb2;
    use foundation::math::Vec3;
    use pretty_assertions::assert_eq;

    #[test]
    fn inner_antennas_do_not_grow_the_box() {
        // Ray from (0, 0) heading +x, +y; cone box is [0, 55*0.6] x [0, 55*0.8].
        let c = cone(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.6, 0.8, 0.0),
            vec![Vec3::new(5.0, 5.0, 1.0), Vec3::new(20.0, 30.0, 1.0)],
        );
        let ray_only = Aabb2::from_points([c.r0, c.r1, c.r2].map(|p| [p.x, p.y])).expect("box");
        assert_eq!(map_bounds(&c), ray_only);
    }

    #[test]
    fn outer_antennas_extend_the_box_exactly() {
        let c = cone(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            vec![Vec3::new(-3.0, 4.0, 0.0), Vec3::new(70.0, -2.0, 0.0)],
        );
        assert_eq!(map_bounds(&c), Aabb2::new([-3.0, -2.0], [70.0, 4.0]));
    }

    #[test]
    fn grid_covers_the_box_with_101_nodes() {
        let c = cone(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            vec![Vec3::new(0.0, 10.0, 0.0)],
        );
        let mut topo = StubTopography::sloped();
        let grid = sample_map(&c, &mut topo, GRID_NODES).expect("grid");
        assert_eq!(grid.xs.len(), 101);
        assert_eq!(grid.ys.len(), 101);
        assert_eq!(grid.altitude.len(), 101);
        assert_eq!(grid.xs[0], 0.0);
        assert_eq!(grid.xs[100], 55.0);
        assert_eq!(grid.ys[100], 10.0);
        // Stub altitude is x / 100 (meters in, meters out), so 0.55 km at the far corner.
        assert!((grid.altitude[0][100] - 0.55).abs() < 1e-12);
        assert_eq!(grid.uncovered, 0);
    }

    #[test]
    fn uncovered_nodes_read_zero() {
        let c = cone(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            vec![Vec3::new(0.0, 10.0, 0.0)],
        );
        // Nodes 3 and 7 along x (at every y) are outside the data.
        let gaps = vec![55.0 * 3.0 / 10.0, 55.0 * 7.0 / 10.0];
        let mut topo = StubTopography::sloped().with_gap_x(gaps);
        let grid = sample_map(&c, &mut topo, 11).expect("grid");

        for row in &grid.altitude {
            assert_eq!(row[3], 0.0);
            assert_eq!(row[7], 0.0);
            assert!(row[4] > 0.0);
        }
        assert_eq!(grid.uncovered, 2 * 11);
    }

    #[test]
    fn other_lookup_failures_propagate() {
        let c = cone(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), vec![]);
        let mut topo = StubTopography::broken();
        assert!(sample_map(&c, &mut topo, 5).is_err());
    }
}
