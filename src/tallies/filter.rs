use crate::hit::Hit;
use crate::tallies::{DepthFilter, WavelengthFilter};

/// Unified filter enum for tallies
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Depth(DepthFilter),
    Wavelength(WavelengthFilter),
}

impl Filter {
    pub fn matches(&self, hit: &Hit) -> bool {
        match self {
            Filter::Depth(f) => f.matches(hit.depth),
            Filter::Wavelength(f) => f.matches(hit.wavelength),
        }
    }
}
