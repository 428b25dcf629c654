//! Property-based tests for the hit builder using proptest.
//!
//! Covers: dark steps, the fibre-length validity gate, photon conservation
//! when survival sampling is off, and reproducibility for a fixed seed.

mod common;

use common::{charged_step, shower_with, ConstantFibre, TableYield, GPAR};
use hfsim::config::ShowerConfig;
use hfsim::shower::HitMode;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn mode_strategy() -> impl Strategy<Value = HitMode> {
    prop_oneof![
        (0.1f64..5.0).prop_map(|weight| HitMode::Standard { weight }),
        (-50.0f64..50.0).prop_map(|z_offset| HitMode::OffsetFrame { z_offset }),
        Just(HitMode::LibraryUnfiltered),
    ]
}

fn wavelengths(n: usize) -> Vec<f64> {
    (0..n).map(|i| 300.0 + 10.0 * i as f64).collect()
}

proptest! {
    /// No deposit or no length means no light, whatever the rest of the step.
    #[test]
    fn dark_steps_never_hit(
        z in -300.0f64..300.0,
        mode in mode_strategy(),
        zero_length in any::<bool>(),
        fid_cut in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let config = ShowerConfig { apply_fiducial_cut: fid_cut, ..ShowerConfig::default() };
        let shower = shower_with(&config, TableYield::wavelengths(&wavelengths(5)),
            ConstantFibre { att: 0.0, shift: 1.0 }, 3);
        let step = if zero_length {
            charged_step(z).with_deposit(5.0, 0.0)
        } else {
            charged_step(z).with_deposit(0.0, 1.0)
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let hits = shower.get_hits(&step, mode, &mut rng).unwrap();
        prop_assert!(hits.is_empty());
    }

    /// Steps placed outside [0, gpar[1]] along the fibre never produce hits.
    #[test]
    fn outside_fibre_is_dark(
        beyond in 1e-6f64..19.0,
        before in any::<bool>(),
        check_fibre in -1i32..2,
    ) {
        let config = ShowerConfig { check_fibre, ..ShowerConfig::default() };
        let shower = shower_with(&config, TableYield::wavelengths(&wavelengths(4)),
            ConstantFibre { att: 0.0, shift: 1.0 }, 3);
        let zv = if before { -beyond } else { GPAR[1] + beyond };
        // Standard mode: zv = |z| - gpar[4], with z kept positive
        let z = zv + GPAR[4];
        let mut rng = StdRng::seed_from_u64(1);
        let hits = shower.get_hits(&charged_step(z), HitMode::standard(), &mut rng).unwrap();
        prop_assert!(hits.is_empty());
    }

    /// With survival sampling disabled every photon becomes exactly one hit.
    #[test]
    fn every_photon_kept_without_sampling(
        zv in 0.0f64..100.0,
        npe in 0usize..40,
        att in 0.0f64..1.0,
        seed in any::<u64>(),
    ) {
        let config = ShowerConfig { check_fibre: -1, ..ShowerConfig::default() };
        let shower = shower_with(&config, TableYield::wavelengths(&wavelengths(npe)),
            ConstantFibre { att, shift: 1.0 }, 3);
        let mut rng = StdRng::seed_from_u64(seed);
        let hits = shower.get_hits(&charged_step(zv + GPAR[4]), HitMode::standard(), &mut rng).unwrap();
        prop_assert_eq!(hits.len(), npe);
    }

    /// Survival sampling only removes photons, and a fixed seed gives a fixed answer.
    #[test]
    fn sampling_is_bounded_and_reproducible(
        zv in 0.0f64..100.0,
        npe in 0usize..40,
        att in 0.0f64..0.1,
        prob_max in 0.0f64..1.0,
        seed in any::<u64>(),
    ) {
        let config = ShowerConfig { prob_max, check_fibre: 0, ..ShowerConfig::default() };
        let shower = shower_with(&config, TableYield::wavelengths(&wavelengths(npe)),
            ConstantFibre { att, shift: 1.0 }, 3);
        let step = charged_step(zv + GPAR[4]);

        let mut rng1 = StdRng::seed_from_u64(seed);
        let hits1 = shower.get_hits(&step, HitMode::standard(), &mut rng1).unwrap();
        let mut rng2 = StdRng::seed_from_u64(seed);
        let hits2 = shower.get_hits(&step, HitMode::standard(), &mut rng2).unwrap();

        prop_assert!(hits1.len() <= npe);
        prop_assert_eq!(hits1, hits2);
    }

    /// Library mode keeps every photon of an in-fibre step and never assigns depth.
    #[test]
    fn library_mode_keeps_all_photons(
        zv in 0.0f64..100.0,
        npe in 0usize..40,
        check_fibre in 0i32..2,
    ) {
        let config = ShowerConfig { check_fibre, ..ShowerConfig::default() };
        let shower = shower_with(&config, TableYield::wavelengths(&wavelengths(npe)),
            ConstantFibre { att: 5.0, shift: 1.0 }, 3);
        // library frame: zv = |z| - gpar[4] - gpar[1] / 2
        let z = zv + GPAR[4] + 0.5 * GPAR[1];
        let mut rng = StdRng::seed_from_u64(3);
        let hits = shower.get_hits(&charged_step(z), HitMode::LibraryUnfiltered, &mut rng).unwrap();
        prop_assert_eq!(hits.len(), npe);
        prop_assert!(hits.iter().all(|h| h.depth == 0));
    }
}
