pub mod registry;
pub mod style;
pub mod surface;

pub use registry::*;
pub use style::*;
pub use surface::*;
