// Cherenkov light emitted by a charged step inside a quartz fibre and
// trapped by the fibre's numerical aperture.

use crate::error::{ShowerError, ShowerResult};
use crate::step::Step;
use nalgebra::Vector3;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

const FINE_STRUCTURE: f64 = 1.0 / 137.035999084;
const NM_PER_MM: f64 = 1.0e6;
/// Steps shorter than this (mm) emit nothing
const MIN_STEP_LENGTH: f64 = 1.0e-4;
/// Upper bound on photons emitted by a single step
pub const MAX_PHOTONS_PER_STEP: usize = 1_000_000;
/// Below this transverse component the particle counts as aligned with the fibre
const ALIGNED_UV: f64 = 1.0e-3;

/// Photons produced by one step, as returned by a [`CherenkovYield`] model.
///
/// `npe` is the declared count; consumers must call [`PhotonYield::validate`]
/// before indexing the per-photon arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotonYield {
    pub npe: usize,
    pub wavelengths: Vec<f64>,
    pub momenta: Vec<f64>,
}

impl PhotonYield {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_photons(wavelengths: Vec<f64>, momenta: Vec<f64>) -> Self {
        Self {
            npe: wavelengths.len().min(momenta.len()),
            wavelengths,
            momenta,
        }
    }

    /// Single pseudo-photon used when the optical model is bypassed
    pub fn placeholder() -> Self {
        Self {
            npe: 1,
            wavelengths: vec![300.0],
            momenta: vec![1.0],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.npe == 0
    }

    pub fn validate(&self) -> ShowerResult<()> {
        if self.wavelengths.len() < self.npe || self.momenta.len() < self.npe {
            return Err(ShowerError::YieldMismatch {
                npe: self.npe,
                wavelengths: self.wavelengths.len(),
                momenta: self.momenta.len(),
            });
        }
        Ok(())
    }
}

/// Photon yield of a charged step.
pub trait CherenkovYield: Send {
    /// Number of photons reaching the fibre core and, per photon, the
    /// wavelength (nm) and direction cosine along the fibre axis.
    fn compute_npe(
        &self,
        step: &Step,
        p_beta: f64,
        local_dir: &Vector3<f64>,
        step_length: f64,
        z_fibre: f64,
        rng: &mut dyn RngCore,
    ) -> PhotonYield;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CherenkovConfig {
    /// Refractive index of the fibre core
    #[serde(default = "default_ref_index")]
    pub ref_index: f64,
    /// Lower edge of the sensitive spectrum (nm)
    #[serde(default = "default_lambda1")]
    pub lambda1: f64,
    /// Upper edge of the sensitive spectrum (nm)
    #[serde(default = "default_lambda2")]
    pub lambda2: f64,
    /// Numerical aperture for light heading to the readout
    #[serde(default = "default_aperture")]
    pub aperture: f64,
    /// Numerical aperture for light heading away from the readout
    #[serde(default = "default_aperture_trapped")]
    pub aperture_trapped: f64,
    /// Photon to photo-electron conversion probability
    #[serde(default = "default_gain")]
    pub gain: f64,
}

fn default_ref_index() -> f64 {
    1.459
}
fn default_lambda1() -> f64 {
    280.0
}
fn default_lambda2() -> f64 {
    700.0
}
fn default_aperture() -> f64 {
    0.33
}
fn default_aperture_trapped() -> f64 {
    0.22
}
fn default_gain() -> f64 {
    0.33
}

impl Default for CherenkovConfig {
    fn default() -> Self {
        CherenkovConfig {
            ref_index: default_ref_index(),
            lambda1: default_lambda1(),
            lambda2: default_lambda2(),
            aperture: default_aperture(),
            aperture_trapped: default_aperture_trapped(),
            gain: default_gain(),
        }
    }
}

impl CherenkovConfig {
    pub fn validate(&self) -> ShowerResult<()> {
        if !(self.ref_index > 1.0) {
            return Err(ShowerError::ConfigError(format!(
                "RefIndex must exceed 1, got {}",
                self.ref_index
            )));
        }
        if !(self.lambda1 > 0.0 && self.lambda1 < self.lambda2) {
            return Err(ShowerError::ConfigError(format!(
                "Lambda1 ({}) must be positive and below Lambda2 ({})",
                self.lambda1, self.lambda2
            )));
        }
        for (name, value) in [
            ("Aperture", self.aperture),
            ("ApertureTrapped", self.aperture_trapped),
            ("Gain", self.gain),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ShowerError::ConfigError(format!(
                    "{} must lie in [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Frank–Tamm photon yield with fibre trapping and photo-electron gain.
#[derive(Debug, Clone)]
pub struct HfCherenkov {
    config: CherenkovConfig,
    cos_aperture: f64,
    cos_aperture_trapped: f64,
}

impl HfCherenkov {
    pub fn new(config: CherenkovConfig) -> Self {
        let cos_aperture = (1.0 - config.aperture * config.aperture).sqrt();
        let cos_aperture_trapped = (1.0 - config.aperture_trapped * config.aperture_trapped).sqrt();
        Self {
            config,
            cos_aperture,
            cos_aperture_trapped,
        }
    }

    pub fn is_applicable(&self, step: &Step) -> bool {
        step.charge != 0.0
    }

    /// Mean number of photons emitted per mm in the sensitive spectrum.
    /// Zero below the Cherenkov threshold.
    pub fn photons_per_mm(&self, p_beta: f64) -> f64 {
        let beta_n = p_beta * self.config.ref_index;
        if beta_n <= 1.0 {
            return 0.0;
        }
        let cos_theta = 1.0 / beta_n;
        let sin2_theta = 1.0 - cos_theta * cos_theta;
        let lambda_diff = NM_PER_MM / self.config.lambda1 - NM_PER_MM / self.config.lambda2;
        2.0 * std::f64::consts::PI * FINE_STRUCTURE * lambda_diff * sin2_theta
    }

    /// Integer photon count: the fractional part is kept with its own probability.
    /// Capped at [`MAX_PHOTONS_PER_STEP`]; a non-finite mean yields nothing.
    pub fn sample_photon_count(&self, p_beta: f64, step_length: f64, rng: &mut dyn RngCore) -> usize {
        let mean = self.photons_per_mm(p_beta) * step_length;
        if !mean.is_finite() || mean <= 0.0 {
            return 0;
        }
        if mean >= MAX_PHOTONS_PER_STEP as f64 {
            return MAX_PHOTONS_PER_STEP;
        }
        let whole = mean.floor();
        let extra = if rng.gen::<f64>() < mean - whole { 1 } else { 0 };
        whole as usize + extra
    }

    /// Wavelength from the 1/λ² Cherenkov spectrum between Lambda1 and Lambda2
    fn sample_wavelength(&self, rng: &mut dyn RngCore) -> f64 {
        let (l1, l2) = (self.config.lambda1, self.config.lambda2);
        let r: f64 = rng.gen();
        l1 * l2 / (l2 - r * (l2 - l1))
    }

    fn is_trapped(&self, w_ph: f64) -> bool {
        w_ph >= self.cos_aperture || w_ph <= -self.cos_aperture_trapped
    }
}

/// Direction of a photon on the Cherenkov cone (half-angle given by its
/// cosine/sine, azimuth `phi`) around the unit vector `dir`.
pub fn cone_direction(dir: &Vector3<f64>, cos_theta: f64, sin_theta: f64, phi: f64) -> Vector3<f64> {
    let (u, v, w) = (dir.x, dir.y, dir.z);
    let uv = (u * u + v * v).sqrt();
    let u_p = sin_theta * phi.cos();
    let v_p = sin_theta * phi.sin();
    let w_p = cos_theta;
    if uv < ALIGNED_UV {
        let sign = if w < 0.0 { -1.0 } else { 1.0 };
        return Vector3::new(u_p, v_p, sign * w_p);
    }
    Vector3::new(
        u * w / uv * u_p - v / uv * v_p + u * w_p,
        v * w / uv * u_p + u / uv * v_p + v * w_p,
        -uv * u_p + w * w_p,
    )
}

impl CherenkovYield for HfCherenkov {
    fn compute_npe(
        &self,
        step: &Step,
        p_beta: f64,
        local_dir: &Vector3<f64>,
        step_length: f64,
        _z_fibre: f64,
        rng: &mut dyn RngCore,
    ) -> PhotonYield {
        if !self.is_applicable(step) || step_length < MIN_STEP_LENGTH {
            return PhotonYield::empty();
        }
        let norm = local_dir.norm();
        if norm == 0.0 {
            return PhotonYield::empty();
        }
        let dir = local_dir / norm;

        let n_photons = self.sample_photon_count(p_beta, step_length, rng);
        if n_photons == 0 {
            return PhotonYield::empty();
        }
        let cos_theta = 1.0 / (p_beta * self.config.ref_index);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

        let mut wavelengths = Vec::new();
        let mut momenta = Vec::new();
        for _ in 0..n_photons {
            let phi = 2.0 * std::f64::consts::PI * rng.gen::<f64>();
            let photon = cone_direction(&dir, cos_theta, sin_theta, phi);
            let lambda = self.sample_wavelength(rng);
            if self.is_trapped(photon.z) && rng.gen::<f64>() < self.config.gain {
                wavelengths.push(lambda);
                momenta.push(photon.z);
            }
        }
        PhotonYield::from_photons(wavelengths, momenta)
    }
}
