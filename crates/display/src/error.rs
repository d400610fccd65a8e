use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use topography::TopographyError;

use crate::display::View;

#[derive(Debug)]
pub enum DisplayError {
    Topography(TopographyError),
    Render(String),
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A click was routed to a view that has not been drawn yet.
    NoFigure(View),
}

impl std::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayError::Topography(e) => write!(f, "topography error: {e}"),
            DisplayError::Render(e) => write!(f, "render error: {e}"),
            DisplayError::Output { path, source } => {
                write!(f, "cannot write figures to {}: {source}", path.display())
            }
            DisplayError::NoFigure(view) => write!(f, "no {view} figure is displayed"),
        }
    }
}

impl std::error::Error for DisplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DisplayError::Topography(e) => Some(e),
            DisplayError::Output { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<TopographyError> for DisplayError {
    fn from(e: TopographyError) -> Self {
        DisplayError::Topography(e)
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for DisplayError
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        DisplayError::Render(e.to_string())
    }
}
