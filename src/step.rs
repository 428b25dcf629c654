use nalgebra::Vector3;

/// One charged (or neutral) particle step through a calorimeter volume.
///
/// Positions are global at the pre-step point. `local_direction` is the
/// momentum direction already transformed into the frame of the touchable
/// volume; for a module aligned with the beam axis it equals `direction`.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub position: Vector3<f64>,
    pub direction: Vector3<f64>,
    pub local_direction: Vector3<f64>,
    /// Total energy (MeV)
    pub total_energy: f64,
    /// Total momentum (MeV/c)
    pub total_momentum: f64,
    pub charge: f64,
    pub pdg_id: i32,
    /// Step length (mm)
    pub step_length: f64,
    /// Energy deposited along the step (MeV)
    pub energy_deposit: f64,
    /// Global time at the post-step point (ns)
    pub post_step_time: f64,
    /// Copy number of the volume holding the pre-step point
    pub replica: i32,
    /// z translation of the parent volume (mm)
    pub volume_translation_z: f64,
}

impl Step {
    /// A unit-charge step with direction used for both frames and the
    /// remaining fields zeroed. Use the `with_*` methods to fill them.
    pub fn new(position: Vector3<f64>, direction: Vector3<f64>, total_energy: f64, total_momentum: f64) -> Self {
        Self {
            position,
            direction,
            local_direction: direction,
            total_energy,
            total_momentum,
            charge: -1.0,
            pdg_id: 11,
            step_length: 0.0,
            energy_deposit: 0.0,
            post_step_time: 0.0,
            replica: 1,
            volume_translation_z: 0.0,
        }
    }

    pub fn with_particle(mut self, pdg_id: i32, charge: f64) -> Self {
        self.pdg_id = pdg_id;
        self.charge = charge;
        self
    }

    pub fn with_deposit(mut self, energy_deposit: f64, step_length: f64) -> Self {
        self.energy_deposit = energy_deposit;
        self.step_length = step_length;
        self
    }

    pub fn with_time(mut self, post_step_time: f64) -> Self {
        self.post_step_time = post_step_time;
        self
    }

    pub fn with_local_direction(mut self, local_direction: Vector3<f64>) -> Self {
        self.local_direction = local_direction;
        self
    }

    pub fn with_volume(mut self, replica: i32, translation_z: f64) -> Self {
        self.replica = replica;
        self.volume_translation_z = translation_z;
        self
    }

    /// Step length seen by the light model: neutral particles never radiate.
    pub fn charged_step_length(&self) -> f64 {
        if self.charge != 0.0 {
            self.step_length
        } else {
            0.0
        }
    }

    /// Velocity in units of c (p/E). Zero for a step with no energy.
    pub fn p_beta(&self) -> f64 {
        if self.total_energy > 0.0 {
            self.total_momentum / self.total_energy
        } else {
            0.0
        }
    }
}
