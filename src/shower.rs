// Hit building for one step in a forward-calorimeter fibre module.
//
// A step is first placed along the fibre (zv), gated on the physical fibre
// length and optionally on PMT coverage, then its Cherenkov photons are
// transported to the readout and sampled for survival.

use crate::cherenkov::{CherenkovYield, HfCherenkov, PhotonYield};
use crate::config::ShowerConfig;
use crate::error::{ShowerError, ShowerResult};
use crate::fiducial::{FiducialModel, WedgeFiducial, LONG_FIBRE_CHANNELS};
use crate::fibre::{FibreTransport, HfFibre};
use crate::geometry::{HfConstants, RunGeometry};
use crate::hit::Hit;
use crate::step::Step;
use nalgebra::Vector3;
use rand::{Rng, RngCore};
use tracing::{debug, info, trace};

/// How a step is placed along the fibre and whether photons are filtered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitMode {
    /// Digitization: `zv = |z| - gpar[4]`, deposit scaled by the track weight
    Standard { weight: f64 },
    /// Caller frame: `zv = gpar[1] - (|z| - z_offset)`
    OffsetFrame { z_offset: f64 },
    /// Photon library building: `zv = |z| - gpar[4] - gpar[1] / 2`,
    /// every photon becomes a hit and depth is left at 0
    LibraryUnfiltered,
}

impl HitMode {
    /// Standard mode with unit weight
    pub fn standard() -> Self {
        HitMode::Standard { weight: 1.0 }
    }

    /// Position of the step along the fibre, measured in the mode's frame
    pub fn local_z(&self, global_z: f64, geometry: &RunGeometry) -> f64 {
        let abs_z = global_z.abs();
        match *self {
            HitMode::Standard { .. } => abs_z - geometry.front_face_z(),
            HitMode::OffsetFrame { z_offset } => geometry.fibre_length() - (abs_z - z_offset),
            HitMode::LibraryUnfiltered => {
                abs_z - geometry.front_face_z() - 0.5 * geometry.fibre_length()
            }
        }
    }

    fn deposit(&self, step: &Step) -> f64 {
        match *self {
            HitMode::Standard { weight } => weight * step.energy_deposit,
            _ => step.energy_deposit,
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        matches!(self, HitMode::LibraryUnfiltered)
    }
}

/// Per-step outcome of the geometric and fiducial gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiducialDecision {
    pub ok: bool,
    pub depth: i32,
    /// PMT channel, 0 when the fiducial cut was not consulted
    pub pmt: i32,
}

/// Converts calorimeter steps into fibre light hits.
///
/// Owns its yield, transport and fiducial models. [`HfShower::init_run`]
/// must be called at the start of every run; one instance per thread when
/// running in parallel.
pub struct HfShower {
    cherenkov: Box<dyn CherenkovYield>,
    fibre: Box<dyn FibreTransport>,
    fiducial: Box<dyn FiducialModel>,
    apply_fid_cut: bool,
    prob_max: f64,
    chk_fibre: i32,
    geometry: Option<RunGeometry>,
}

impl HfShower {
    /// Builder with the standard Cherenkov, fibre and fiducial models
    pub fn new(config: &ShowerConfig) -> ShowerResult<Self> {
        Self::with_models(
            config,
            Box::new(HfCherenkov::new(config.cherenkov.clone())),
            Box::new(HfFibre::new(config.fibre.clone())),
            Box::new(WedgeFiducial::new(config.fiducial.clone())),
        )
    }

    /// Builder with caller-supplied models
    pub fn with_models(
        config: &ShowerConfig,
        cherenkov: Box<dyn CherenkovYield>,
        fibre: Box<dyn FibreTransport>,
        fiducial: Box<dyn FiducialModel>,
    ) -> ShowerResult<Self> {
        config.validate()?;
        info!(
            prob_max = config.prob_max,
            check_fibre = config.check_fibre,
            apply_fiducial_cut = config.apply_fiducial_cut,
            "HfShower: maximum probability cut off"
        );
        Ok(Self {
            cherenkov,
            fibre,
            fiducial,
            apply_fid_cut: config.apply_fiducial_cut,
            prob_max: config.prob_max,
            chk_fibre: config.check_fibre,
            geometry: None,
        })
    }

    /// Refresh the geometry snapshot and hand the run constants to the fibre model.
    /// A failed call leaves the builder uninitialized.
    pub fn init_run(&mut self, constants: &dyn HfConstants) -> ShowerResult<()> {
        self.geometry = None;
        let geometry = RunGeometry::from_constants(constants)?;
        self.fibre.init_run(constants)?;
        info!(gpar = ?geometry.gpar(), "HfShower: run initialized");
        self.geometry = Some(geometry);
        Ok(())
    }

    pub fn geometry(&self) -> Option<&RunGeometry> {
        self.geometry.as_ref()
    }

    /// Validity gate on `zv`, then depth assignment from PMT coverage or
    /// from the replica number.
    pub fn fiducial_decision(&self, step: &Step, zv: f64, geometry: &RunGeometry) -> FiducialDecision {
        let ok = (0.0..=geometry.fibre_length()).contains(&zv);
        if ok && self.apply_fid_cut {
            let pmt = self.fiducial.pmt_number(&step.position);
            let decision = if pmt <= 0 {
                FiducialDecision { ok: false, depth: 1, pmt }
            } else if pmt > LONG_FIBRE_CHANNELS {
                if zv > geometry.short_fibre_threshold() {
                    FiducialDecision { ok: true, depth: 2, pmt }
                } else {
                    FiducialDecision { ok: false, depth: 1, pmt }
                }
            } else {
                FiducialDecision { ok: true, depth: 1, pmt }
            };
            debug!(
                npmt = pmt,
                zv,
                threshold = geometry.short_fibre_threshold(),
                ok = decision.ok,
                depth = decision.depth,
                "HfShower: fiducial decision"
            );
            decision
        } else {
            // every fibre is long in this geometry
            FiducialDecision {
                ok,
                depth: step.replica % 10,
                pmt: 0,
            }
        }
    }

    /// Hits produced by one step.
    ///
    /// Returns an empty vector for steps that cannot produce light (no
    /// deposit, neutral, outside the fibre or the instrumented region).
    pub fn get_hits(&self, step: &Step, mode: HitMode, rng: &mut dyn RngCore) -> ShowerResult<Vec<Hit>> {
        let geometry = self.geometry.as_ref().ok_or(ShowerError::RunNotInitialized)?;

        let edep = mode.deposit(step);
        let stepl = step.charged_step_length();
        if edep == 0.0 || stepl == 0.0 {
            debug!(edep, stepl, "HfShower::get_hits: Number of Hits 0");
            return Ok(Vec::new());
        }

        let p_beta = step.p_beta();
        let zv = mode.local_z(step.position.z, geometry);
        let local_pos = Vector3::new(step.position.x, step.position.y, zv);
        let decision = self.fiducial_decision(step, zv, geometry);

        let z_fibre = 0.5 * geometry.fibre_length() - zv - step.volume_translation_z;
        let t_slice = step.post_step_time;
        let time = t_slice + self.fibre.t_shift(&local_pos, decision.depth, self.chk_fibre);
        debug!(
            zv,
            z_global = step.position.z,
            z_fibre,
            translation = step.volume_translation_z,
            t_slice,
            time,
            "HfShower::get_hits: step placed"
        );

        let unfiltered = mode.is_unfiltered();
        let photons = if self.apply_fid_cut && !unfiltered {
            PhotonYield::placeholder()
        } else if decision.ok {
            self.cherenkov
                .compute_npe(step, p_beta, &step.local_direction, stepl, z_fibre, rng)
        } else {
            PhotonYield::empty()
        };
        if !decision.ok || photons.is_empty() {
            debug!(ok = decision.ok, npe = photons.npe, "HfShower::get_hits: Number of Hits 0");
            return Ok(Vec::new());
        }
        photons.validate()?;

        let depth = if unfiltered { 0 } else { decision.depth };
        let always_accept = unfiltered || self.apply_fid_cut || self.chk_fibre < 0;
        let mut hits = Vec::with_capacity(photons.npe);
        for i in 0..photons.npe {
            let wavelength = photons.wavelengths[i];
            if always_accept || self.survives(i, wavelength, z_fibre, rng) {
                hits.push(Hit {
                    depth,
                    time,
                    wavelength,
                    momentum: photons.momenta[i],
                    position: step.position,
                });
            }
        }

        debug!(npe = photons.npe, hits = hits.len(), "HfShower::get_hits: Number of Hits");
        Ok(hits)
    }

    /// Attenuation along `z_fibre` and the overall detection ceiling, one
    /// uniform draw each.
    fn survives(&self, index: usize, wavelength: f64, z_fibre: f64, rng: &mut dyn RngCore) -> bool {
        let r1: f64 = rng.gen();
        let r2: f64 = rng.gen();
        let p = self.fibre.att_length(wavelength);
        let transmission = (-p * z_fibre).exp();
        let survive = r1 <= transmission && r2 <= self.prob_max;
        trace!(
            photon = index,
            r1,
            transmission,
            r2,
            prob_max = self.prob_max,
            survive,
            "HfShower::get_hits: attenuation"
        );
        survive
    }
}
