use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Light pulse produced by one photon of a calorimeter step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Fibre segment: 1 long, 2 short, 0 when not assigned (library mode)
    pub depth: i32,
    /// Arrival time at the readout (ns)
    pub time: f64,
    /// Photon wavelength (nm)
    pub wavelength: f64,
    /// Longitudinal momentum fraction of the photon
    pub momentum: f64,
    /// Global position of the parent step
    pub position: Vector3<f64>,
}

impl fmt::Display for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hit depth {} WaveLength {:.2} Time {:.4} Momentum {:.4} Position ({:.2}, {:.2}, {:.2})",
            self.depth,
            self.wavelength,
            self.time,
            self.momentum,
            self.position.x,
            self.position.y,
            self.position.z
        )
    }
}
