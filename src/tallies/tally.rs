use std::fmt;

use crate::hit::Hit;
use crate::tallies::Filter;

/// Unified tally structure serving as both input specification and results container
#[derive(Debug, Clone)]
pub struct Tally {
    // Input specification
    pub id: Option<u32>,
    pub name: Option<String>,
    pub filters: Vec<Filter>,

    // Results, populated during a run
    pub units: String,
    pub batch_data: Vec<u32>, // raw hit counts per batch
    pub mean: f64,            // hits per source step
    pub std_dev: f64,
    pub rel_error: f64,
    pub n_batches: u32,
    pub steps_per_batch: u32,
}

impl Tally {
    pub fn new() -> Self {
        Self {
            id: None,
            name: None,
            filters: Vec::new(),
            units: String::new(),
            batch_data: Vec::new(),
            mean: 0.0,
            std_dev: 0.0,
            rel_error: 0.0,
            n_batches: 0,
            steps_per_batch: 0,
        }
    }

    /// Create a new tally with name and units (for run results)
    pub fn with_name_and_units(name: &str, units: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            units: units.to_string(),
            ..Self::new()
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// A hit counts when every filter accepts it; no filters accepts all hits
    pub fn accepts(&self, hit: &Hit) -> bool {
        self.filters.iter().all(|f| f.matches(hit))
    }

    /// Number of hits in `hits` this tally counts, saturating at `u32::MAX`
    pub fn count_hits(&self, hits: &[Hit]) -> u32 {
        let count = hits.iter().filter(|h| self.accepts(h)).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    pub fn add_batch(&mut self, count: u32, steps_per_batch: u32) {
        self.batch_data.push(count);
        self.update_statistics(steps_per_batch);
    }

    fn update_statistics(&mut self, steps_per_batch: u32) {
        self.steps_per_batch = steps_per_batch;
        if self.batch_data.is_empty() || steps_per_batch == 0 {
            self.mean = 0.0;
            self.std_dev = 0.0;
            self.rel_error = 0.0;
            self.n_batches = 0;
            return;
        }

        let n = self.batch_data.len() as f64;
        let per_step: Vec<f64> = self
            .batch_data
            .iter()
            .map(|&count| count as f64 / steps_per_batch as f64)
            .collect();

        self.mean = per_step.iter().sum::<f64>() / n;
        let variance = per_step
            .iter()
            .map(|x| (x - self.mean).powi(2))
            .sum::<f64>()
            / (n - 1.0).max(1.0);
        self.std_dev = variance.sqrt();
        self.rel_error = if self.mean > 0.0 { self.std_dev / self.mean } else { 0.0 };
        self.n_batches = self.batch_data.len() as u32;
    }

    pub fn total_count(&self) -> u64 {
        self.batch_data.iter().map(|&c| c as u64).sum()
    }

    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| "Unnamed Tally".to_string())
    }
}

impl Default for Tally {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tally name: {}", self.display_name())?;
        writeln!(f, "  Mean: {:.6} per step", self.mean)?;
        writeln!(f, "    Std Dev: {:.6} per step", self.std_dev)?;
        writeln!(f, "    Rel Error: {:.4} ({:.2}%)", self.rel_error, self.rel_error * 100.0)?;
        writeln!(f, "    Batches: {}", self.n_batches)?;
        writeln!(f, "    Steps per batch: {}", self.steps_per_batch)?;
        writeln!(f, "  Total {}: {}", self.units.to_lowercase(), self.total_count())?;
        write!(f, "  Batch data: {:?}", self.batch_data)
    }
}

/// Result tallies for a run: the unfiltered "Hits" tally first, then one per requested tally
pub fn create_tallies_from_specs(tally_specs: &[Tally]) -> Vec<Tally> {
    let mut tallies = Vec::with_capacity(tally_specs.len() + 1);
    tallies.push(Tally::with_name_and_units("Hits", "hits"));

    for (i, spec) in tally_specs.iter().enumerate() {
        let name = spec.name.clone().unwrap_or_else(|| format!("Tally {}", i + 1));
        let mut tally = Tally::with_name_and_units(&name, "hits");
        tally.id = spec.id;
        tally.filters = spec.filters.clone();
        tallies.push(tally);
    }

    tallies
}
