//! Per-generation summaries for display and logging.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::entity::Entity;

/// Aggregates of one completed generation, computed just before rollover.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Generation number (0-based).
    pub generation: u32,
    /// Highest consumption count in the population.
    pub best_consumed: u32,
    /// Mean consumption count.
    pub mean_consumed: f32,
    /// Mean nutrition intake.
    pub mean_nutrition: f32,
    /// Mean genome size.
    pub mean_size: f32,
    /// Mean genome speed.
    pub mean_speed: f32,
    /// Mean genome sense radius.
    pub mean_sense_radius: f32,
}

/// Bounded history of generation summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsLog {
    history: VecDeque<GenerationSummary>,
    max_history: usize,
}

impl Default for StatsLog {
    fn default() -> Self {
        Self {
            history: VecDeque::new(),
            // Track the last 100 generations
            max_history: 100,
        }
    }
}

impl StatsLog {
    /// Summarizes a pre-rollover population and appends it to the history.
    pub fn record(&mut self, generation: u32, population: &[Entity]) -> GenerationSummary {
        let n = population.len().max(1) as f32;
        let summary = GenerationSummary {
            generation,
            best_consumed: population.iter().map(|e| e.consumed).max().unwrap_or(0),
            mean_consumed: population.iter().map(|e| e.consumed as f32).sum::<f32>() / n,
            mean_nutrition: population.iter().map(|e| e.nutrition_intake).sum::<f32>() / n,
            mean_size: population.iter().map(|e| e.genome.size).sum::<f32>() / n,
            mean_speed: population.iter().map(|e| e.genome.speed).sum::<f32>() / n,
            mean_sense_radius: population.iter().map(|e| e.genome.sense_radius).sum::<f32>() / n,
        };

        self.history.push_back(summary);
        if self.history.len() > self.max_history {
            self.history.pop_front();
        }

        summary
    }

    /// Most recent summary, if any generation has completed.
    pub fn latest(&self) -> Option<&GenerationSummary> {
        self.history.back()
    }

    /// All retained summaries, oldest first.
    pub fn history(&self) -> &VecDeque<GenerationSummary> {
        &self.history
    }
}
