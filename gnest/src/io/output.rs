use serde::{Deserialize, Serialize};
use shelfnest::entities::{Item, Placement};
use shelfnest::geometry::primitives::Rect;

use crate::config::GAConfig;
use crate::opt::GASolution;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NestOutput {
    pub config: GAConfig,
    /// Source document of every item, indexed by item id
    pub items: Vec<String>,
    pub placements: Vec<Placement>,
    /// Bounding rectangle including the margin
    pub bbox: Option<Rect>,
    pub area: f64,
    pub generations: usize,
    pub history: Vec<f64>,
    pub run_time_ms: u128,
}

impl NestOutput {
    pub fn new(config: GAConfig, items: &[Item], solution: &GASolution) -> Self {
        Self {
            config,
            items: items.iter().map(|i| i.source.clone()).collect(),
            placements: solution.layout.placements.clone(),
            bbox: solution.layout.bbox,
            area: solution.fitness,
            generations: solution.generations,
            history: solution.history.clone(),
            run_time_ms: solution.time_taken.as_millis(),
        }
    }
}
