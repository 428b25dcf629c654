use crate::error::{ShowerError, ShowerResult};
use serde::{Deserialize, Serialize};

/// Minimum number of `gpar` values hit building reads (indices 0, 1 and 4).
pub const MIN_GPAR: usize = 5;

/// Per-run detector constants for the forward calorimeter.
///
/// This is the seam to whatever owns the detector description: a full
/// simulation supplies its own implementation, tests and the run driver use
/// [`SimConstants`].
pub trait HfConstants {
    /// Special geometry parameters: `[0]` short-fibre dead length,
    /// `[1]` module length, `[4]` z of the module front face, others unused here.
    fn gpar_hf(&self) -> &[f64];
    /// Radial bin edges of the towers (mm), innermost first
    fn r_table_hf(&self) -> &[f64];
    /// Full long-fibre length per radial bin (mm)
    fn long_fibre_lengths(&self) -> &[f64];
    /// Full short-fibre length per radial bin (mm)
    fn short_fibre_lengths(&self) -> &[f64];
}

/// Serde-loadable constant set with the standard module layout as default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConstants {
    pub gpar: Vec<f64>,
    pub r_table: Vec<f64>,
    pub long_fl: Vec<f64>,
    pub short_fl: Vec<f64>,
}

impl Default for SimConstants {
    fn default() -> Self {
        Self {
            gpar: vec![220.0, 1650.0, 30.0, 0.0, 11150.0],
            r_table: vec![
                125.0, 169.0, 196.0, 243.0, 294.0, 358.0, 435.0, 530.0, 645.0, 785.0, 955.0,
                1163.0, 1300.0,
            ],
            long_fl: vec![2279.0; 12],
            short_fl: vec![2059.0; 12],
        }
    }
}

impl SimConstants {
    pub fn from_file(path: &str) -> ShowerResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let constants: Self = serde_json::from_str(&contents)?;
        Ok(constants)
    }

    /// Default tables with a replaced `gpar`
    pub fn with_gpar(gpar: Vec<f64>) -> Self {
        Self {
            gpar,
            ..Self::default()
        }
    }
}

impl HfConstants for SimConstants {
    fn gpar_hf(&self) -> &[f64] {
        &self.gpar
    }

    fn r_table_hf(&self) -> &[f64] {
        &self.r_table
    }

    fn long_fibre_lengths(&self) -> &[f64] {
        &self.long_fl
    }

    fn short_fibre_lengths(&self) -> &[f64] {
        &self.short_fl
    }
}

/// Immutable snapshot of `gpar` taken at the start of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunGeometry {
    gpar: Vec<f64>,
}

impl RunGeometry {
    /// Validate and copy `gpar`. A short or non-finite table is a fatal
    /// misconfiguration: nothing downstream may index past it.
    pub fn new(gpar: &[f64]) -> ShowerResult<Self> {
        if gpar.len() < MIN_GPAR {
            return Err(ShowerError::GeometryTooShort {
                found: gpar.len(),
                required: MIN_GPAR,
            });
        }
        if let Some((index, &value)) = gpar.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ShowerError::NonFiniteGeometry { index, value });
        }
        Ok(Self { gpar: gpar.to_vec() })
    }

    pub fn from_constants(constants: &dyn HfConstants) -> ShowerResult<Self> {
        Self::new(constants.gpar_hf())
    }

    /// Depth below which a short fibre carries no light
    pub fn short_fibre_threshold(&self) -> f64 {
        self.gpar[0]
    }

    pub fn fibre_length(&self) -> f64 {
        self.gpar[1]
    }

    pub fn front_face_z(&self) -> f64 {
        self.gpar[4]
    }

    pub fn gpar(&self) -> &[f64] {
        &self.gpar
    }
}
