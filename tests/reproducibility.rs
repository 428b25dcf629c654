// Integration test for reproducibility - runs with the same seed must give identical tallies

use hfsim::config::ShowerConfig;
use hfsim::geometry::SimConstants;
use hfsim::model::Model;
use hfsim::settings::Settings;
use hfsim::shower::HitMode;
use hfsim::source::StepSource;
use hfsim::tallies::{DepthFilter, Filter, Tally, WavelengthFilter};

fn model_with_seed(seed: u64, mode: HitMode) -> Model {
    let settings = Settings {
        steps_per_batch: 50,
        batches: 4,
        seed,
        mode,
        source: StepSource::new(),
    };
    let mut model = Model::new(settings, ShowerConfig::default(), SimConstants::default());

    let mut long = Tally::new().with_filter(Filter::Depth(DepthFilter::new(1)));
    long.name = Some("long_fibre_hits".to_string());
    let mut blue = Tally::new()
        .with_filter(Filter::Wavelength(WavelengthFilter::new(vec![280.0, 450.0]).unwrap()));
    blue.name = Some("blue_hits".to_string());
    model.tallies = vec![long, blue];
    model
}

#[test]
fn test_reproducibility_with_same_seed() {
    for mode in [HitMode::standard(), HitMode::LibraryUnfiltered] {
        let first = model_with_seed(42, mode).run().unwrap();
        let second = model_with_seed(42, mode).run().unwrap();
        let third = model_with_seed(42, mode).run().unwrap();

        assert_eq!(first.len(), 3);
        for i in 0..first.len() {
            assert_eq!(first[i].batch_data, second[i].batch_data, "tally {} differs", i);
            assert_eq!(first[i].batch_data, third[i].batch_data, "tally {} differs", i);
            assert_eq!(first[i].mean, second[i].mean);
        }
    }
}

#[test]
fn test_different_seeds_produce_different_results() {
    let a = model_with_seed(42, HitMode::standard()).run().unwrap();
    let b = model_with_seed(123, HitMode::standard()).run().unwrap();
    // hundreds of hits per batch, identical sequences would need every batch to coincide
    assert_ne!(a[0].batch_data, b[0].batch_data);
}

#[test]
fn test_filtered_tallies_are_subsets() {
    let tallies = model_with_seed(7, HitMode::standard()).run().unwrap();
    let hits = &tallies[0];
    let long = &tallies[1];
    let blue = &tallies[2];

    assert_eq!(hits.display_name(), "Hits");
    // replica 1 everywhere: every standard-mode hit is on a long fibre
    assert_eq!(long.batch_data, hits.batch_data);
    for i in 0..hits.batch_data.len() {
        assert!(blue.batch_data[i] <= hits.batch_data[i]);
    }
}

#[test]
fn test_library_mode_has_no_depth() {
    let tallies = model_with_seed(7, HitMode::LibraryUnfiltered).run().unwrap();
    assert!(tallies[0].total_count() > 0);
    assert_eq!(tallies[1].total_count(), 0);
}
