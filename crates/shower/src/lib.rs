pub mod event;
pub mod geometry;

pub use event::*;
pub use geometry::*;
