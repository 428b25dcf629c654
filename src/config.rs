// Run configuration for the fibre shower hit builder
use crate::cherenkov::CherenkovConfig;
use crate::error::{ShowerError, ShowerResult};
use crate::fiducial::FiducialConfig;
use crate::fibre::FibreConfig;
use serde::{Deserialize, Serialize};

/// Options of the shower hit builder and its sub-models.
///
/// Field names follow the parameter-set spelling used by the detector
/// configuration (`ApplyFiducialCut`, `ProbMax`, ...). Every field has a
/// default, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShowerConfig {
    /// Gate hits on PMT coverage and bypass the optical model
    #[serde(default)]
    pub apply_fiducial_cut: bool,
    /// Ceiling on the detection probability of a photon
    #[serde(default = "default_prob_max")]
    pub prob_max: f64,
    /// Transport check mode: negative disables survival sampling, positive
    /// measures fibre length from the back of the module
    #[serde(default)]
    pub check_fibre: i32,
    #[serde(default)]
    pub cherenkov: CherenkovConfig,
    #[serde(default)]
    pub fibre: FibreConfig,
    #[serde(default)]
    pub fiducial: FiducialConfig,
}

fn default_prob_max() -> f64 {
    1.0
}

impl Default for ShowerConfig {
    fn default() -> Self {
        ShowerConfig {
            apply_fiducial_cut: false,
            prob_max: default_prob_max(),
            check_fibre: 0,
            cherenkov: CherenkovConfig::default(),
            fibre: FibreConfig::default(),
            fiducial: FiducialConfig::default(),
        }
    }
}

impl ShowerConfig {
    /// Load and validate a JSON configuration file
    pub fn from_file(path: &str) -> ShowerResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> ShowerResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ShowerResult<()> {
        if !(self.prob_max.is_finite() && self.prob_max >= 0.0) {
            return Err(ShowerError::ConfigError(format!(
                "ProbMax must be a non-negative number, got {}",
                self.prob_max
            )));
        }
        self.cherenkov.validate()?;
        self.fibre.validate()?;
        self.fiducial.validate()?;
        Ok(())
    }
}
