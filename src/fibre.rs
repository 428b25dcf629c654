// Light transport along the quartz fibres: attenuation and time of flight
// to the photomultiplier at the back of the module.

use crate::error::{ShowerError, ShowerResult};
use crate::geometry::HfConstants;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Speed of light (mm/ns)
pub const C_LIGHT: f64 = 299.792458;
/// Fibre length used when the run tables do not cover a radial bin (mm)
const DEFAULT_FIBRE_LENGTH: f64 = 2500.0;

/// Attenuation and propagation delay of light in a fibre.
pub trait FibreTransport: Send {
    /// Receive the run constants. Called once per run before any step.
    fn init_run(&mut self, constants: &dyn HfConstants) -> ShowerResult<()>;
    /// Attenuation coefficient (1/mm) for a wavelength (nm); survival over a
    /// path `z` is `exp(-att_length * z)`.
    fn att_length(&self, wavelength: f64) -> f64;
    /// Propagation time (ns) from a local position to the readout
    fn t_shift(&self, local: &Vector3<f64>, depth: i32, chk_fibre: i32) -> f64;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FibreConfig {
    /// Signal speed in the fibre as a fraction of c
    #[serde(default = "default_c_fibre")]
    pub c_fibre: f64,
    /// Attenuation coefficient (1/mm) per equal-width wavelength bin
    #[serde(default = "default_att_lengths")]
    pub att_lengths: Vec<f64>,
    /// Wavelength range (nm) spanned by `att_lengths`
    #[serde(default = "default_lambda_limits")]
    pub lambda_limits: [f64; 2],
}

fn default_c_fibre() -> f64 {
    0.5
}
fn default_att_lengths() -> Vec<f64> {
    vec![
        1.5e-3, 1.1e-3, 8.0e-4, 6.0e-4, 4.6e-4, 3.6e-4, 3.0e-4, 2.6e-4, 2.3e-4, 2.1e-4, 2.0e-4,
        1.9e-4,
    ]
}
fn default_lambda_limits() -> [f64; 2] {
    [300.0, 600.0]
}

impl Default for FibreConfig {
    fn default() -> Self {
        FibreConfig {
            c_fibre: default_c_fibre(),
            att_lengths: default_att_lengths(),
            lambda_limits: default_lambda_limits(),
        }
    }
}

impl FibreConfig {
    pub fn validate(&self) -> ShowerResult<()> {
        if !(self.c_fibre > 0.0) {
            return Err(ShowerError::ConfigError(format!(
                "CFibre must be positive, got {}",
                self.c_fibre
            )));
        }
        if self.att_lengths.is_empty() || self.att_lengths.iter().any(|a| !(*a >= 0.0)) {
            return Err(ShowerError::ConfigError(
                "AttLengths must be a non-empty list of non-negative values".to_string(),
            ));
        }
        if !(self.lambda_limits[0] < self.lambda_limits[1]) {
            return Err(ShowerError::ConfigError(format!(
                "LambdaLimits must be ascending, got {:?}",
                self.lambda_limits
            )));
        }
        Ok(())
    }
}

/// Binned attenuation table plus per-radius fibre lengths from the run constants.
#[derive(Debug, Clone)]
pub struct HfFibre {
    config: FibreConfig,
    short_dead_length: f64,
    module_length: f64,
    radius: Vec<f64>,
    long_fl: Vec<f64>,
    short_fl: Vec<f64>,
}

impl HfFibre {
    pub fn new(config: FibreConfig) -> Self {
        Self {
            config,
            short_dead_length: 0.0,
            module_length: 0.0,
            radius: Vec::new(),
            long_fl: Vec::new(),
            short_fl: Vec::new(),
        }
    }

    /// Radial bin of a transverse distance, counted from the outermost edge.
    /// Points beyond the table fall in bin 0.
    fn radial_bin(&self, h_r: f64) -> usize {
        let n_bins = self.radius.len();
        (1..n_bins)
            .find(|&i| h_r < self.radius[i])
            .map(|i| n_bins - i - 1)
            .unwrap_or(0)
    }

    /// Light path (mm) from a local position to the end of the fibre.
    /// `chk_fibre > 0` measures from the back face of the module instead.
    pub fn z_shift(&self, local: &Vector3<f64>, depth: i32, chk_fibre: i32) -> f64 {
        let ieta = if chk_fibre >= 0 {
            self.radial_bin((local.x * local.x + local.y * local.y).sqrt())
        } else {
            0
        };
        let length = if depth == 2 {
            self.short_fl
                .get(ieta)
                .map(|l| l + self.short_dead_length)
                .unwrap_or(DEFAULT_FIBRE_LENGTH)
        } else {
            self.long_fl.get(ieta).copied().unwrap_or(DEFAULT_FIBRE_LENGTH)
        };
        if chk_fibre > 0 {
            length - self.module_length
        } else {
            length - local.z
        }
    }
}

impl FibreTransport for HfFibre {
    fn init_run(&mut self, constants: &dyn HfConstants) -> ShowerResult<()> {
        let gpar = constants.gpar_hf();
        if gpar.len() < 2 {
            return Err(ShowerError::GeometryTooShort {
                found: gpar.len(),
                required: 2,
            });
        }
        self.short_dead_length = gpar[0];
        self.module_length = gpar[1];
        self.radius = constants.r_table_hf().to_vec();
        self.long_fl = constants.long_fibre_lengths().to_vec();
        self.short_fl = constants.short_fibre_lengths().to_vec();
        debug!(
            radial_bins = self.radius.len(),
            long = self.long_fl.len(),
            short = self.short_fl.len(),
            "HfFibre run tables loaded"
        );
        Ok(())
    }

    fn att_length(&self, wavelength: f64) -> f64 {
        let table = &self.config.att_lengths;
        if table.is_empty() {
            return 0.0;
        }
        let [low, high] = self.config.lambda_limits;
        let n_bins = table.len();
        let bin = (n_bins as f64 * (wavelength - low) / (high - low)).floor();
        let index = if bin < 0.0 {
            0
        } else {
            (bin as usize).min(n_bins - 1)
        };
        table[index]
    }

    fn t_shift(&self, local: &Vector3<f64>, depth: i32, chk_fibre: i32) -> f64 {
        self.z_shift(local, depth, chk_fibre) / (C_LIGHT * self.config.c_fibre)
    }
}
