//! SVG figures for the map and profile views.

use std::ops::Range;
use std::path::Path;

use foundation::math::Vec3;
use plotters::prelude::*;
use shower::ConeGeometry;

use crate::colormap::{Normalize, terrain};
use crate::error::DisplayError;
use crate::grid::MapGrid;
use crate::profile::Profile;
use crate::viewport::Viewport;

/// Opacity of the terrain cells and color scale.
pub const MAP_OPACITY: f64 = 0.75;
/// Width of the color scale strip on the right of the map (pixels).
pub const COLOR_SCALE_WIDTH: i32 = 110;
/// Antenna marker radius without amplitudes, and its growth at full amplitude.
pub const ANTENNA_RADIUS: i32 = 2;
const ANTENNA_RADIUS_GAIN: f64 = 4.0;

const COLOR_SCALE_STEPS: usize = 100;

/// Ordered, non-empty axis range.
fn axis_range(a: f64, b: f64) -> Range<f64> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if hi > lo { lo..hi } else { lo - 0.5..hi + 0.5 }
}

fn terrain_color(t: f64) -> RGBAColor {
    let [r, g, b] = terrain(t);
    RGBColor(r, g, b).mix(MAP_OPACITY)
}

/// Marker radius per antenna, scaled by peak amplitude when available.
pub fn antenna_radii(cone: &ConeGeometry) -> Vec<i32> {
    let n = cone.antennas.len();
    let Some(amplitudes) = &cone.amplitudes else {
        return vec![ANTENNA_RADIUS; n];
    };
    let peak = amplitudes.iter().copied().map(f64::abs).fold(0.0, f64::max);
    if peak <= 0.0 {
        return vec![ANTENNA_RADIUS; n];
    }
    amplitudes
        .iter()
        .map(|a| ANTENNA_RADIUS + (ANTENNA_RADIUS_GAIN * a.abs() / peak).round() as i32)
        .collect()
}

/// Top-down terrain map with the cone and antennas overlaid.
pub fn render_map(
    path: &Path,
    size: (u32, u32),
    grid: &MapGrid,
    cone: &ConeGeometry,
) -> Result<Viewport, DisplayError> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let (plot_area, scale_area) =
        root.split_horizontally((size.0 as i32 - COLOR_SCALE_WIDTH).max(1));

    let x = axis_range(grid.bounds.min[0], grid.bounds.max[0]);
    let y = axis_range(grid.bounds.min[1], grid.bounds.max[1]);
    let mut chart = ChartBuilder::on(&plot_area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x.clone(), y.clone())?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("northing, x (km)")
        .y_desc("westing, y (km)")
        .draw()?;

    let norm = Normalize::spanning(grid.altitudes());
    let cells = grid.ys.windows(2).enumerate().flat_map(|(i, ys)| {
        grid.xs.windows(2).enumerate().map(move |(j, xs)| {
            Rectangle::new(
                [(xs[0], ys[0]), (xs[1], ys[1])],
                terrain_color(norm.apply(grid.altitude[i][j])).filled(),
            )
        })
    });
    chart.draw_series(cells)?;

    let xy = |p: Vec3| (p.x, p.y);
    chart.draw_series(LineSeries::new(
        [xy(cone.r0), xy(cone.r1)],
        RED.stroke_width(2),
    ))?;
    chart.draw_series(DashedLineSeries::new(
        [xy(cone.r1), xy(cone.r2)],
        10,
        6,
        RED.stroke_width(2),
    ))?;
    chart.draw_series(std::iter::once(Circle::new(xy(cone.r0), 5, RED.filled())))?;
    chart.draw_series(std::iter::once(TriangleMarker::new(
        xy(cone.r1),
        7,
        RED.filled(),
    )))?;
    chart.draw_series(
        cone.antennas
            .iter()
            .zip(antenna_radii(cone))
            .map(|(a, r)| Circle::new(xy(*a), r, GREEN.filled())),
    )?;

    let (pixels_x, pixels_y) = chart.plotting_area().get_pixel_range();

    let mut scale = ChartBuilder::on(&scale_area)
        .margin(10)
        .x_label_area_size(40)
        .set_label_area_size(LabelAreaPosition::Right, 60)
        .build_cartesian_2d(0.0..1.0, norm.min..norm.max)?;
    scale
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc("altitude (km)")
        .draw()?;
    let step = (norm.max - norm.min) / COLOR_SCALE_STEPS as f64;
    scale.draw_series((0..COLOR_SCALE_STEPS).map(|k| {
        let z0 = norm.min + step * k as f64;
        Rectangle::new(
            [(0.0, z0), (1.0, z0 + step)],
            terrain_color((k as f64 + 0.5) / COLOR_SCALE_STEPS as f64).filled(),
        )
    }))?;

    root.present()?;
    Ok(Viewport {
        pixels_x,
        pixels_y,
        x,
        y,
    })
}

/// Ground profile under the ray, with the ray itself and the projected antennas.
pub fn render_profile(
    path: &Path,
    size: (u32, u32),
    profile: &Profile,
) -> Result<Viewport, DisplayError> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let x = axis_range(0.0, profile.zcmax);
    let (z_lo, z_hi) = profile.altitude_range();
    let y = axis_range(z_lo, z_hi);
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x.clone(), y.clone())?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("distance to decay, s (km)")
        .y_desc("altitude, z (km)")
        .draw()?;

    chart.draw_series(LineSeries::new(
        profile.terrain_points(),
        BLACK.stroke_width(1),
    ))?;

    chart.draw_series(LineSeries::new(
        [profile.near.start, profile.near.end],
        RED.stroke_width(2),
    ))?;
    chart.draw_series(std::iter::once(Circle::new(
        profile.near.start,
        5,
        RED.filled(),
    )))?;
    chart.draw_series(DashedLineSeries::new(
        [profile.far.start, profile.far.end],
        10,
        6,
        RED.stroke_width(2),
    ))?;
    chart.draw_series(std::iter::once(TriangleMarker::new(
        profile.far.start,
        7,
        RED.filled(),
    )))?;

    chart.draw_series(
        profile
            .antennas
            .iter()
            .map(|a| Circle::new(*a, ANTENNA_RADIUS, GREEN.filled())),
    )?;

    let (pixels_x, pixels_y) = chart.plotting_area().get_pixel_range();
    root.present()?;
    Ok(Viewport {
        pixels_x,
        pixels_y,
        x,
        y,
    })
}

#[cfg(test)]
mod tests {
    use super::{ANTENNA_RADIUS, antenna_radii, axis_range, render_map, render_profile};
    use crate::grid::sample_map;
    use crate::profile::sample_profile;
    use crate::testing::{StubTopography, cone};
    use crate::viewport::PointerClick;
    use foundation::math::Vec3;

    #[test]
    fn axis_ranges_are_ordered_and_non_empty() {
        assert_eq!(axis_range(3.0, -1.0), -1.0..3.0);
        assert_eq!(axis_range(2.0, 2.0), 1.5..2.5);
    }

    #[test]
    fn antenna_markers_scale_with_amplitude() {
        let mut c = cone(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)],
        );
        assert_eq!(antenna_radii(&c), vec![ANTENNA_RADIUS; 2]);

        c.amplitudes = Some(vec![10.0, 5.0]);
        assert_eq!(antenna_radii(&c), vec![6, 4]);
    }

    #[test]
    fn writes_both_figures() {
        let dir = tempfile::tempdir().expect("tempdir");
        let c = cone(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.8, 0.0, 0.6),
            vec![Vec3::new(10.0, 4.0, 2.0), Vec3::new(20.0, -4.0, 2.5)],
        );
        let mut topo = StubTopography::sloped();

        let grid = sample_map(&c, &mut topo, 11).expect("grid");
        let map_path = dir.path().join("map.svg");
        let map_vp = render_map(&map_path, (800, 600), &grid, &c).expect("map");
        let svg = std::fs::read_to_string(&map_path).expect("read map");
        assert!(svg.contains("<svg"));
        assert_eq!(map_vp.x, grid.bounds.min[0]..grid.bounds.max[0]);
        assert!(map_vp.pixels_x.end <= 800 - super::COLOR_SCALE_WIDTH);

        let profile = sample_profile(&c, &mut topo, 101).expect("profile");
        let profile_path = dir.path().join("profile.svg");
        let profile_vp = render_profile(&profile_path, (800, 600), &profile).expect("profile");
        assert!(profile_path.exists());
        assert_eq!(profile_vp.x, 0.0..profile.zcmax);

        let centre_x = (profile_vp.pixels_x.start + profile_vp.pixels_x.end) as f64 / 2.0;
        let centre_y = (profile_vp.pixels_y.start + profile_vp.pixels_y.end) as f64 / 2.0;
        let (s, _) = profile_vp
            .to_data(PointerClick::new(centre_x, centre_y))
            .expect("inside");
        assert!((s - profile.zcmax / 2.0).abs() < 1e-9);
    }
}
