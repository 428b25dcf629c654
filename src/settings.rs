use crate::shower::HitMode;
use crate::source::StepSource;

#[derive(Debug, Clone)]
pub struct Settings {
    pub steps_per_batch: usize,
    pub batches: usize,
    /// Run seed; batch `i` draws from `FastRng::for_batch(seed, i)`
    pub seed: u64,
    pub mode: HitMode,
    pub source: StepSource,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            steps_per_batch: 100,
            batches: 10,
            seed: 1,
            mode: HitMode::standard(),
            source: StepSource::new(),
        }
    }
}
