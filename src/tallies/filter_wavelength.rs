use crate::error::{ShowerError, ShowerResult};

/// Wavelength filter for tallies - filters hits based on photon wavelength
/// Bins are defined by edges [L0, L1, ..., Ln] in nm, giving
/// [L0, L1), [L1, L2), ..., [Ln-1, Ln)
#[derive(Debug, Clone, PartialEq)]
pub struct WavelengthFilter {
    /// Strictly ascending bin boundaries in nm
    pub bins: Vec<f64>,
}

impl WavelengthFilter {
    /// Create a filter from bin edges; at least two ascending edges are required
    pub fn new(bins: Vec<f64>) -> ShowerResult<Self> {
        if bins.len() < 2 {
            return Err(ShowerError::ConfigError(
                "WavelengthFilter requires at least 2 bin boundaries".to_string(),
            ));
        }
        if bins.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(ShowerError::ConfigError(
                "Wavelength bins must be in strictly ascending order".to_string(),
            ));
        }
        Ok(Self { bins })
    }

    /// Bin index for a wavelength, `None` outside the filter range
    pub fn get_bin(&self, wavelength: f64) -> Option<usize> {
        let last = self.bins.len() - 1;
        if !(wavelength >= self.bins[0] && wavelength < self.bins[last]) {
            return None;
        }
        // first edge strictly above the wavelength closes its bin
        let upper = self.bins.partition_point(|&edge| edge <= wavelength);
        Some(upper - 1)
    }

    pub fn matches(&self, wavelength: f64) -> bool {
        self.get_bin(wavelength).is_some()
    }
}
