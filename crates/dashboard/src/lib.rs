pub mod config;
pub mod controller;
pub mod events;
pub mod legend;
pub mod overlays;
pub mod panels;
pub mod sampler;
pub mod selection;

pub use config::*;
pub use controller::*;
pub use events::*;
pub use legend::*;
pub use overlays::*;
pub use panels::*;
pub use sampler::*;
pub use selection::*;
