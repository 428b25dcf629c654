use crate::stats::AngularDistribution;
use crate::step::Step;
use nalgebra::Vector3;
use rand::{Rng, RngCore};

/// Synthetic step generator: a charged particle at a fixed transverse
/// position, uniformly distributed in depth between `z_min` and `z_max`.
#[derive(Debug, Clone)]
pub struct StepSource {
    pub transverse: [f64; 2],
    pub z_min: f64,
    pub z_max: f64,
    pub angle: AngularDistribution,
    /// Total energy (MeV)
    pub energy: f64,
    pub mass: f64,
    pub charge: f64,
    pub pdg_id: i32,
    pub step_length: f64,
    pub energy_deposit: f64,
}

impl StepSource {
    /// 100 GeV electrons across the default module depth
    pub fn new() -> Self {
        Self {
            transverse: [600.0, 80.0],
            z_min: 11150.0,
            z_max: 12800.0,
            angle: AngularDistribution::ForwardCone { mu_min: 0.5 },
            energy: 100_000.0,
            mass: 0.511,
            charge: -1.0,
            pdg_id: 11,
            step_length: 1.0,
            energy_deposit: 0.2,
        }
    }

    pub fn sample(&self, rng: &mut dyn RngCore) -> Step {
        let z = self.z_min + (self.z_max - self.z_min) * rng.gen::<f64>();
        let direction = self.angle.sample(rng);
        let momentum = (self.energy * self.energy - self.mass * self.mass).max(0.0).sqrt();
        let beta = if self.energy > 0.0 { momentum / self.energy } else { 0.0 };
        // time of flight from the interaction point along z
        let time = if beta > 0.0 {
            z.abs() / (crate::fibre::C_LIGHT * beta)
        } else {
            0.0
        };
        Step::new(Vector3::new(self.transverse[0], self.transverse[1], z), direction, self.energy, momentum)
            .with_particle(self.pdg_id, self.charge)
            .with_deposit(self.energy_deposit, self.step_length)
            .with_time(time)
    }
}

impl Default for StepSource {
    fn default() -> Self {
        Self::new()
    }
}
