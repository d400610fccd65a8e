pub mod click;
pub mod colormap;
pub mod display;
pub mod error;
pub mod grid;
pub mod profile;
pub mod render;
pub mod viewport;

#[cfg(test)]
mod testing;

pub use click::*;
pub use display::*;
pub use error::*;
pub use grid::*;
pub use profile::*;
pub use viewport::*;
