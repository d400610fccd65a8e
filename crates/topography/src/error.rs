use std::path::PathBuf;

#[derive(Debug)]
pub enum TopographyError {
    /// The queried position falls outside the elevation tiles available on disk.
    OutOfCoverage {
        latitude: f64,
        longitude: f64,
    },
    MissingDataPath(PathBuf),
    TileIo {
        path: PathBuf,
        source: std::io::Error,
    },
    MalformedTile {
        path: PathBuf,
        reason: String,
    },
}

impl TopographyError {
    pub fn is_out_of_coverage(&self) -> bool {
        matches!(self, TopographyError::OutOfCoverage { .. })
    }
}

impl std::fmt::Display for TopographyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopographyError::OutOfCoverage {
                latitude,
                longitude,
            } => write!(
                f,
                "no elevation data at latitude {latitude:.6}, longitude {longitude:.6}"
            ),
            TopographyError::MissingDataPath(path) => {
                write!(f, "topography data path not found: {}", path.display())
            }
            TopographyError::TileIo { path, source } => {
                write!(f, "failed to read tile {}: {source}", path.display())
            }
            TopographyError::MalformedTile { path, reason } => {
                write!(f, "malformed tile {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for TopographyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TopographyError::TileIo { source, .. } => Some(source),
            _ => None,
        }
    }
}
