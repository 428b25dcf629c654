use crate::error::{ShowerError, ShowerResult};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Channels above this number read short fibres
pub const LONG_FIBRE_CHANNELS: i32 = 24;

/// Maps a global position to the photomultiplier reading the fibre there.
pub trait FiducialModel: Send {
    /// PMT channel, or a value <= 0 where no PMT collects light
    fn pmt_number(&self, global: &Vector3<f64>) -> i32;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FiducialConfig {
    /// Azimuthal wedges around the beam
    #[serde(default = "default_phi_sectors")]
    pub phi_sectors: u32,
    /// Uninstrumented band (rad) at each wedge edge
    #[serde(default = "default_dead_phi")]
    pub dead_phi: f64,
    /// Fibre grid pitch (mm); long and short fibres alternate on it
    #[serde(default = "default_fibre_pitch")]
    pub fibre_pitch: f64,
    /// Radial tower boundaries (mm), ascending
    #[serde(default = "default_ring_edges")]
    pub ring_edges: Vec<f64>,
}

fn default_phi_sectors() -> u32 {
    18
}
fn default_dead_phi() -> f64 {
    0.005
}
fn default_fibre_pitch() -> f64 {
    5.0
}
fn default_ring_edges() -> Vec<f64> {
    vec![
        125.0, 169.0, 196.0, 243.0, 294.0, 358.0, 435.0, 530.0, 645.0, 785.0, 955.0, 1163.0,
        1300.0,
    ]
}

impl Default for FiducialConfig {
    fn default() -> Self {
        FiducialConfig {
            phi_sectors: default_phi_sectors(),
            dead_phi: default_dead_phi(),
            fibre_pitch: default_fibre_pitch(),
            ring_edges: default_ring_edges(),
        }
    }
}

impl FiducialConfig {
    pub fn validate(&self) -> ShowerResult<()> {
        if self.phi_sectors == 0 {
            return Err(ShowerError::ConfigError("PhiSectors must be at least 1".to_string()));
        }
        let width = 2.0 * std::f64::consts::PI / self.phi_sectors as f64;
        if !(self.dead_phi >= 0.0 && self.dead_phi < 0.5 * width) {
            return Err(ShowerError::ConfigError(format!(
                "DeadPhi must lie in [0, {:.4}), got {}",
                0.5 * width,
                self.dead_phi
            )));
        }
        if !(self.fibre_pitch > 0.0) {
            return Err(ShowerError::ConfigError(format!(
                "FibrePitch must be positive, got {}",
                self.fibre_pitch
            )));
        }
        // two half-towers per ring must fit in the long-fibre channel range
        let max_edges = LONG_FIBRE_CHANNELS as usize / 2 + 1;
        if self.ring_edges.len() < 2 || self.ring_edges.len() > max_edges {
            return Err(ShowerError::ConfigError(format!(
                "RingEdges needs between 2 and {} values, got {}",
                max_edges,
                self.ring_edges.len()
            )));
        }
        if self.ring_edges.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(ShowerError::ConfigError(
                "RingEdges must be strictly ascending".to_string(),
            ));
        }
        Ok(())
    }
}

/// Wedge/ring readout map.
///
/// Each wedge splits every ring into two half-towers, numbered
/// `2 * ring + half + 1`. Fibres on odd grid cells are short and read by
/// the channel offset by [`LONG_FIBRE_CHANNELS`].
#[derive(Debug, Clone)]
pub struct WedgeFiducial {
    config: FiducialConfig,
    sector_width: f64,
}

impl WedgeFiducial {
    pub fn new(config: FiducialConfig) -> Self {
        let sector_width = 2.0 * std::f64::consts::PI / config.phi_sectors.max(1) as f64;
        Self {
            config,
            sector_width,
        }
    }

    fn ring(&self, r: f64) -> Option<usize> {
        let edges = &self.config.ring_edges;
        edges.windows(2).position(|w| r >= w[0] && r < w[1])
    }

    fn is_short_fibre(&self, x: f64, y: f64) -> bool {
        let ix = (x / self.config.fibre_pitch).floor() as i64;
        let iy = (y / self.config.fibre_pitch).floor() as i64;
        (ix + iy).rem_euclid(2) == 1
    }
}

impl FiducialModel for WedgeFiducial {
    fn pmt_number(&self, global: &Vector3<f64>) -> i32 {
        let r = (global.x * global.x + global.y * global.y).sqrt();
        let ring = match self.ring(r) {
            Some(ring) => ring,
            None => return 0,
        };
        let phi = global.y.atan2(global.x).rem_euclid(2.0 * std::f64::consts::PI);
        let local_phi = phi.rem_euclid(self.sector_width);
        if local_phi < self.config.dead_phi || local_phi > self.sector_width - self.config.dead_phi {
            return 0;
        }
        let half = if local_phi < 0.5 * self.sector_width { 0 } else { 1 };
        let channel = (2 * ring + half) as i32 + 1;
        if self.is_short_fibre(global.x, global.y) {
            channel + LONG_FIBRE_CHANNELS
        } else {
            channel
        }
    }
}
