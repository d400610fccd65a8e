use std::path::PathBuf;

use shower::{ConeGeometry, Event};
use topography::{
    DEFAULT_DATA_PATH, DEFAULT_STACK_SIZE, GroundTopography, Lla, Origin, Topography,
    TopographyCache, TopographyError,
};
use tracing::{debug, info};

use crate::click::{ClickHandler, MapClick, ProfileClick};
use crate::error::DisplayError;
use crate::grid::{GRID_NODES, sample_map};
use crate::profile::{PROFILE_SAMPLES, sample_profile};
use crate::render::{render_map, render_profile};
use crate::viewport::{PointerClick, Viewport};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum View {
    Map,
    Profile,
}

impl View {
    pub fn file_name(self) -> &'static str {
        match self {
            View::Map => "map.svg",
            View::Profile => "profile.svg",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            View::Map => f.write_str("map"),
            View::Profile => f.write_str("profile"),
        }
    }
}

impl std::str::FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "map" => Ok(View::Map),
            "profile" => Ok(View::Profile),
            other => Err(format!("unknown view '{other}' (expected map or profile)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub topography_path: PathBuf,
    pub stack_size: usize,
    pub output_dir: PathBuf,
    /// Figure size in pixels.
    pub figure_size: (u32, u32),
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            topography_path: PathBuf::from(DEFAULT_DATA_PATH),
            stack_size: DEFAULT_STACK_SIZE,
            output_dir: PathBuf::from("."),
            figure_size: (800, 600),
        }
    }
}

/// A drawn view and the handler its pointer clicks are routed to.
pub struct Figure {
    pub view: View,
    pub path: PathBuf,
    pub viewport: Viewport,
    handler: Box<dyn ClickHandler>,
}

impl std::fmt::Debug for Figure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Figure")
            .field("view", &self.view)
            .field("path", &self.path)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

type Builder<T> = Box<dyn FnMut(Origin) -> Result<T, TopographyError>>;

/// Event display manager.
///
/// Keeps one topography handle, rebuilt only when an event comes from a
/// different origin than the previous one. Not reentrant.
pub struct Display<T = GroundTopography> {
    config: DisplayConfig,
    build: Builder<T>,
    topography: TopographyCache<T>,
    figures: Vec<Figure>,
}

impl Display<GroundTopography> {
    pub fn new(config: DisplayConfig) -> Self {
        let path = config.topography_path.clone();
        let stack_size = config.stack_size;
        Self::with_builder(config, move |o: Origin| {
            GroundTopography::open(o.latitude, o.longitude, path.clone(), stack_size)
        })
    }
}

impl<T: Topography> Display<T> {
    pub fn with_builder<F>(config: DisplayConfig, build: F) -> Self
    where
        F: FnMut(Origin) -> Result<T, TopographyError> + 'static,
    {
        Self {
            config,
            build: Box::new(build),
            topography: TopographyCache::new(),
            figures: Vec::new(),
        }
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    /// Number of topography handles built so far.
    pub fn topography_builds(&self) -> u64 {
        self.topography.builds()
    }

    /// Draw the map and profile views of `event`, replacing any previous figures.
    pub fn show(&mut self, event: &Event) -> Result<&[Figure], DisplayError> {
        self.figures.clear();

        let (latitude, longitude) = event.origin;
        let build = &mut self.build;
        let topo = self
            .topography
            .get_or_build(Origin::new(latitude, longitude), |o| build(o))?;

        let cone = ConeGeometry::from_event(event);
        debug!(
            "shower energy {:.3e}, cone {:.1} to {:.1} km, {} antennas",
            cone.shower_energy,
            cone.zcmin,
            cone.zcmax,
            cone.antennas.len()
        );

        let out = &self.config.output_dir;
        std::fs::create_dir_all(out).map_err(|source| DisplayError::Output {
            path: out.clone(),
            source,
        })?;
        let size = self.config.figure_size;

        let grid = sample_map(&cone, topo, GRID_NODES)?;
        let map_path = out.join(View::Map.file_name());
        let map_viewport = render_map(&map_path, size, &grid, &cone)?;

        let profile = sample_profile(&cone, topo, PROFILE_SAMPLES)?;
        let profile_path = out.join(View::Profile.file_name());
        let profile_viewport = render_profile(&profile_path, size, &profile)?;

        info!(
            "wrote {} and {}",
            map_path.display(),
            profile_path.display()
        );

        self.figures = vec![
            Figure {
                view: View::Map,
                path: map_path,
                viewport: map_viewport,
                handler: Box::new(MapClick),
            },
            Figure {
                view: View::Profile,
                path: profile_path,
                viewport: profile_viewport,
                handler: Box::new(ProfileClick::new(&cone)),
            },
        ];
        Ok(&self.figures)
    }

    /// Route a pointer click to the handler of `view`.
    ///
    /// Returns `Ok(None)` when the click lands outside the plot area. Lookup
    /// failures (for instance outside the elevation data) are returned as is.
    pub fn click(&mut self, view: View, click: PointerClick) -> Result<Option<Lla>, DisplayError> {
        let figure = self
            .figures
            .iter()
            .find(|f| f.view == view)
            .ok_or(DisplayError::NoFigure(view))?;
        let Some(at) = figure.viewport.to_data(click) else {
            debug!("{view} click at {click:?} is outside the plot");
            return Ok(None);
        };
        let topo = self
            .topography
            .current()
            .ok_or(DisplayError::NoFigure(view))?;
        let lla = figure.handler.on_click(at, topo)?;
        Ok(Some(lla))
    }
}
