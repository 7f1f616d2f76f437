use serde::{Deserialize, Serialize};
use shelfnest::io::svg::SvgExportOptions;
use shelfnest::packing::PackerConfig;
use shelfnest::{NestError, Result};

/// Configuration for the genetic optimizer
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GAConfig {
    /// Configuration of the packer used to evaluate every ordering
    pub packer: PackerConfig,
    /// Number of individuals in every generation
    pub population_size: usize,
    /// Chance (in percent) for each position of an offspring to be swapped with its neighbour
    pub mutation_rate: f64,
    /// Number of generations, including the initial population
    pub n_generations: usize,
    /// Seed for the PRNG. If undefined, the algorithm will run in non-deterministic mode using entropy
    pub prng_seed: Option<u64>,
    /// Wall-clock budget in seconds, checked between generations
    #[serde(default)]
    pub time_limit_s: Option<f64>,
    #[serde(default)]
    pub svg_export_options: SvgExportOptions,
}

impl Default for GAConfig {
    fn default() -> Self {
        Self {
            packer: PackerConfig::default(),
            population_size: 10,
            mutation_rate: 10.0,
            n_generations: 50,
            prng_seed: Some(0),
            time_limit_s: None,
            svg_export_options: SvgExportOptions::default(),
        }
    }
}

impl GAConfig {
    pub fn validate(&self) -> Result<()> {
        self.packer.validate()?;
        if self.population_size == 0 {
            return Err(NestError::InvalidConfiguration(
                "population size must be at least 1".into(),
            ));
        }
        if !self.mutation_rate.is_finite() || self.mutation_rate < 0.0 {
            return Err(NestError::InvalidConfiguration(format!(
                "mutation rate must be non-negative, got {}",
                self.mutation_rate
            )));
        }
        if let Some(t) = self.time_limit_s {
            if !t.is_finite() || t < 0.0 {
                return Err(NestError::InvalidConfiguration(format!(
                    "time limit must be non-negative, got {t}"
                )));
            }
        }
        Ok(())
    }
}
