use crate::config::ShowerConfig;
use crate::error::{ShowerError, ShowerResult};
use crate::fast_rng::FastRng;
use crate::geometry::SimConstants;
use crate::settings::Settings;
use crate::shower::HfShower;
use crate::tallies::{create_tallies_from_specs, Tally};
use tracing::{debug, info};

/// A complete hit-building run: settings, hit builder options, detector
/// constants and the user tally specifications.
#[derive(Debug, Clone)]
pub struct Model {
    pub settings: Settings,
    pub config: ShowerConfig,
    pub constants: SimConstants,
    pub tallies: Vec<Tally>,
}

impl Model {
    pub fn new(settings: Settings, config: ShowerConfig, constants: SimConstants) -> Self {
        Self {
            settings,
            config,
            constants,
            tallies: Vec::new(),
        }
    }

    /// Sample `batches * steps_per_batch` steps, build their hits and score
    /// them. The first returned tally always counts every hit.
    pub fn run(&self) -> ShowerResult<Vec<Tally>> {
        let steps_per_batch = u32::try_from(self.settings.steps_per_batch).map_err(|_| {
            ShowerError::ConfigError(format!(
                "steps per batch {} exceeds the tally counter range",
                self.settings.steps_per_batch
            ))
        })?;

        let mut shower = HfShower::new(&self.config)?;
        shower.init_run(&self.constants)?;

        let mut tallies = create_tallies_from_specs(&self.tallies);
        info!(
            batches = self.settings.batches,
            steps_per_batch,
            tallies = tallies.len(),
            "starting hit-building run"
        );

        for batch in 0..self.settings.batches {
            let mut rng = FastRng::for_batch(self.settings.seed, batch as u64);
            let mut batch_counts = vec![0u32; tallies.len()];

            for _ in 0..self.settings.steps_per_batch {
                let step = self.settings.source.sample(&mut rng);
                let hits = shower.get_hits(&step, self.settings.mode, &mut rng)?;
                for (count, tally) in batch_counts.iter_mut().zip(tallies.iter()) {
                    *count = count.saturating_add(tally.count_hits(&hits));
                }
            }

            debug!(batch, hits = batch_counts[0], "batch complete");
            for (tally, count) in tallies.iter_mut().zip(batch_counts) {
                tally.add_batch(count, steps_per_batch);
            }
        }

        Ok(tallies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shower::HitMode;
    use crate::source::StepSource;

    fn small_settings(seed: u64) -> Settings {
        Settings {
            steps_per_batch: 20,
            batches: 3,
            seed,
            mode: HitMode::standard(),
            source: StepSource::new(),
        }
    }

    #[test]
    fn test_run_produces_hits_tally() {
        let model = Model::new(small_settings(4), ShowerConfig::default(), SimConstants::default());
        let tallies = model.run().unwrap();
        assert_eq!(tallies.len(), 1);
        assert_eq!(tallies[0].display_name(), "Hits");
        assert_eq!(tallies[0].n_batches, 3);
        assert_eq!(tallies[0].steps_per_batch, 20);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let config = ShowerConfig {
            prob_max: -1.0,
            ..ShowerConfig::default()
        };
        let model = Model::new(small_settings(4), config, SimConstants::default());
        assert!(matches!(model.run(), Err(ShowerError::ConfigError(_))));
    }

    #[test]
    fn test_short_geometry_is_reported() {
        let model = Model::new(
            small_settings(4),
            ShowerConfig::default(),
            SimConstants::with_gpar(vec![1.0, 2.0]),
        );
        assert!(matches!(
            model.run(),
            Err(ShowerError::GeometryTooShort { found: 2, required: 5 })
        ));
    }

    #[test]
    fn test_zero_batches() {
        let mut settings = small_settings(4);
        settings.batches = 0;
        let model = Model::new(settings, ShowerConfig::default(), SimConstants::default());
        let tallies = model.run().unwrap();
        assert_eq!(tallies[0].n_batches, 0);
        assert_eq!(tallies[0].total_count(), 0);
    }
}
