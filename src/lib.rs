// Forward-calorimeter fibre shower hit builder: turns simulation steps into
// Cherenkov light hits read out by long and short quartz fibres.
pub mod cherenkov;
pub mod config;
pub mod error;
pub mod fast_rng;
pub mod fiducial;
pub mod fibre;
pub mod geometry;
pub mod hit;
pub mod model;
pub mod settings;
pub mod shower;
pub mod source;
pub mod stats;
pub mod step;
pub mod tallies;

pub use config::ShowerConfig;
pub use error::{ShowerError, ShowerResult};
pub use geometry::{HfConstants, RunGeometry, SimConstants};
pub use hit::Hit;
pub use model::Model;
pub use shower::{HfShower, HitMode};
pub use step::Step;
