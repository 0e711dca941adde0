pub mod geo;
pub mod round;

// Foundation crate: small, well-tested primitives only.
pub use geo::*;
pub use round::*;
