pub mod geodesy;
pub mod key;
pub mod tangent;
pub mod vec;

pub use geodesy::*;
pub use key::*;
pub use tangent::*;
pub use vec::*;
