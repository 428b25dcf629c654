// Hit tallies and the filters that select which hits they count
pub mod tally;
pub mod filter;
pub mod filter_depth;
pub mod filter_wavelength;

pub use tally::{create_tallies_from_specs, Tally};
pub use filter::Filter;
pub use filter_depth::DepthFilter;
pub use filter_wavelength::WavelengthFilter;
