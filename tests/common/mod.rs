// Deterministic stand-ins for the shower sub-models and the random source
#![allow(dead_code)]

use hfsim::cherenkov::{CherenkovYield, PhotonYield};
use hfsim::config::ShowerConfig;
use hfsim::error::ShowerResult;
use hfsim::fiducial::FiducialModel;
use hfsim::fibre::FibreTransport;
use hfsim::geometry::{HfConstants, SimConstants};
use hfsim::shower::HfShower;
use hfsim::step::Step;
use nalgebra::Vector3;
use rand::RngCore;

pub const GPAR: [f64; 5] = [50.0, 100.0, 0.0, 0.0, 20.0];

/// Returns the same photons for every step, without consistency checks
pub struct TableYield(pub PhotonYield);

impl TableYield {
    pub fn wavelengths(wavelengths: &[f64]) -> Self {
        TableYield(PhotonYield::from_photons(
            wavelengths.to_vec(),
            vec![0.9; wavelengths.len()],
        ))
    }
}

impl CherenkovYield for TableYield {
    fn compute_npe(
        &self,
        _step: &Step,
        _p_beta: f64,
        _local_dir: &Vector3<f64>,
        _step_length: f64,
        _z_fibre: f64,
        _rng: &mut dyn RngCore,
    ) -> PhotonYield {
        self.0.clone()
    }
}

/// Same attenuation for every wavelength and a fixed time shift
pub struct ConstantFibre {
    pub att: f64,
    pub shift: f64,
}

impl FibreTransport for ConstantFibre {
    fn init_run(&mut self, _constants: &dyn HfConstants) -> ShowerResult<()> {
        Ok(())
    }

    fn att_length(&self, _wavelength: f64) -> f64 {
        self.att
    }

    fn t_shift(&self, _local: &Vector3<f64>, _depth: i32, _chk_fibre: i32) -> f64 {
        self.shift
    }
}

pub struct FixedPmt(pub i32);

impl FiducialModel for FixedPmt {
    fn pmt_number(&self, _global: &Vector3<f64>) -> i32 {
        self.0
    }
}

/// Replays a fixed list of uniform numbers in [0, 1), cycling at the end.
pub struct ScriptedRng {
    values: Vec<f64>,
    next: usize,
}

impl ScriptedRng {
    pub fn new(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            next: 0,
        }
    }

    pub fn draws(&self) -> usize {
        self.next
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        // inverse of rand's 53-bit float conversion
        ((value * (1u64 << 53) as f64) as u64) << 11
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

pub fn shower_with(config: &ShowerConfig, yield_model: TableYield, fibre: ConstantFibre, pmt: i32) -> HfShower {
    let mut shower = HfShower::with_models(config, Box::new(yield_model), Box::new(fibre), Box::new(FixedPmt(pmt)))
        .expect("test configurations are valid");
    shower
        .init_run(&SimConstants::with_gpar(GPAR.to_vec()))
        .expect("GPAR has five finite values");
    shower
}

/// Charged step with 5 MeV deposit over 1 mm, placed at global `z`
pub fn charged_step(z: f64) -> Step {
    Step::new(Vector3::new(150.0, -40.0, z), Vector3::z(), 1000.0, 999.0)
        .with_deposit(5.0, 1.0)
        .with_time(12.0)
        .with_volume(1, 0.0)
}
