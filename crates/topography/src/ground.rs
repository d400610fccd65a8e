use std::path::PathBuf;

use foundation::math::Vec3;
use tracing::info;

use crate::error::TopographyError;
use crate::frame::LocalFrame;
use crate::stack::TileStack;
use crate::{Lla, Topography};

/// Default location of the elevation tiles, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "share/topography";
/// Default number of tiles kept resident.
pub const DEFAULT_STACK_SIZE: usize = 121;

/// Ground elevation around a geographic origin, backed by a stack of `.hgt` tiles.
#[derive(Debug)]
pub struct GroundTopography {
    frame: LocalFrame,
    stack: TileStack,
}

impl GroundTopography {
    pub fn open(
        latitude: f64,
        longitude: f64,
        path: impl Into<PathBuf>,
        stack_size: usize,
    ) -> Result<Self, TopographyError> {
        let path = path.into();
        if !path.is_dir() {
            return Err(TopographyError::MissingDataPath(path));
        }
        info!(
            "topography at ({latitude}, {longitude}) from {} (stack of {stack_size})",
            path.display()
        );
        Ok(Self {
            frame: LocalFrame::new(latitude, longitude),
            stack: TileStack::new(path, stack_size),
        })
    }
}

impl Topography for GroundTopography {
    fn ground_altitude(&mut self, x: f64, y: f64) -> Result<f64, TopographyError> {
        let foot = self.frame.to_geodetic(Vec3::new(x, y, 0.0));
        let height = self.stack.elevation(foot.lat_deg(), foot.lon_deg())?;
        Ok(self.frame.from_geodetic(foot.at_height(height)).z)
    }

    fn local_to_lla(&self, x: f64, y: f64, z: f64) -> Result<Lla, TopographyError> {
        Ok(Lla::from(self.frame.to_geodetic(Vec3::new(x, y, z))))
    }
}
