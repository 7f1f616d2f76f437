use std::time::{Duration, Instant};

use itertools::Itertools;
use log::{debug, info};
use ordered_float::OrderedFloat;
use rand::Rng;
use rand::prelude::SmallRng;
use rayon::prelude::*;
use shelfnest::entities::{Item, Layout};
use shelfnest::packing::ShelfPacker;
use thousands::Separable;

use crate::config::GAConfig;
use crate::opt::Individual;
use crate::util::assertions;

/// Genetic search for the item ordering that packs into the smallest bounding rectangle.
pub struct GAOptimizer {
    pub items: Vec<Item>,
    pub config: GAConfig,
    pub packer: ShelfPacker,
    /// SmallRng is a fast, non-cryptographic PRNG <https://rust-random.github.io/book/guide-rngs.html>
    pub rng: SmallRng,
    pub deadline: Option<Instant>,
    pub n_evaluations: usize,
}

/// Best result found by a [`GAOptimizer`] run.
#[derive(Clone, Debug)]
pub struct GASolution {
    pub layout: Layout,
    /// Area of `layout`'s bounding rectangle
    pub fitness: f64,
    pub order: Vec<usize>,
    pub rotations: Vec<f64>,
    /// Number of evaluated generations, the initial population included
    pub generations: usize,
    /// Best fitness known after each generation
    pub history: Vec<f64>,
    pub time_taken: Duration,
}

impl GAOptimizer {
    /// Fails if `config` is invalid.
    pub fn new(items: Vec<Item>, config: GAConfig, rng: SmallRng) -> shelfnest::Result<Self> {
        config.validate()?;
        debug_assert!(items.iter().enumerate().all(|(i, item)| item.id == i));
        Ok(Self {
            packer: ShelfPacker::new(config.packer),
            items,
            config,
            rng,
            deadline: None,
            n_evaluations: 0,
        })
    }

    /// Stops the search after the first generation that ends past `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn solve(&mut self) -> GASolution {
        let start = Instant::now();
        let time_limit = self
            .config
            .time_limit_s
            .map(|s| start + Duration::from_secs_f64(s));
        let deadline = match (self.deadline, time_limit) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };

        let mut population = self.initial_population();
        self.evaluate(&mut population);
        population.sort_by_key(|ind| OrderedFloat(ind.fitness()));

        let mut best = population[0].clone();
        let mut history = vec![best.fitness()];
        info!(
            "[GA] initial population of {}, best fitness: {:.3} (identity: {:.3})",
            population.len(),
            best.fitness(),
            population
                .iter()
                .find(|ind| ind.order.iter().enumerate().all(|(k, &id)| k == id))
                .map_or(f64::NAN, |ind| ind.fitness())
        );

        for generation in 1..self.config.n_generations {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                info!("[GA] time limit reached after {generation} generations");
                break;
            }

            population = self.next_generation(&population);
            self.evaluate(&mut population);
            population.sort_by_key(|ind| OrderedFloat(ind.fitness()));

            if population[0].fitness() < best.fitness() {
                best = population[0].clone();
                info!(
                    "[GA] generation {generation}: improved best fitness to {:.3}",
                    best.fitness()
                );
            } else {
                debug!(
                    "[GA] generation {generation}: best {:.3}, generation best {:.3}",
                    best.fitness(),
                    population[0].fitness()
                );
            }
            history.push(best.fitness());
        }

        debug_assert!(assertions::is_permutation(&best.order, self.items.len()));
        debug_assert!(assertions::is_non_increasing(&history));

        // packing is deterministic, repacking yields the layout the fitness was computed on
        let layout = best.layout(&self.items, &self.packer);
        let time_taken = start.elapsed();

        info!(
            "[GA] optimization finished in {:.3}ms ({} generations, {} evaluations)",
            time_taken.as_secs_f64() * 1000.0,
            history.len(),
            self.n_evaluations.separate_with_commas()
        );
        info!(
            "[GA] best layout: {} items, area {:.3}",
            layout.placements.len(),
            layout.area()
        );

        GASolution {
            fitness: layout.area(),
            layout,
            order: best.order,
            rotations: best.rotations,
            generations: history.len(),
            history,
            time_taken,
        }
    }

    /// The identity ordering followed by random permutations.
    fn initial_population(&mut self) -> Vec<Individual> {
        let n_items = self.items.len();
        let angles = self.config.packer.rotation.angles();
        let mut population = vec![Individual::identity(n_items)];
        while population.len() < self.config.population_size {
            population.push(Individual::random(n_items, &angles, &mut self.rng));
        }
        population
    }

    /// Evaluates all individuals without a fitness, in parallel.
    fn evaluate(&mut self, population: &mut [Individual]) {
        let (items, packer) = (&self.items, &self.packer);
        let n_evaluated = population
            .par_iter_mut()
            .filter(|ind| ind.fitness.is_none())
            .map(|ind| ind.evaluate(items, packer))
            .count();
        self.n_evaluations += n_evaluated;
    }

    /// Elitism, then select, breed and mutate until the population is full.
    /// `population` must be sorted, best first.
    fn next_generation(&mut self, population: &[Individual]) -> Vec<Individual> {
        let pop_size = self.config.population_size;
        let angles = self.config.packer.rotation.angles();
        let mutation_rate = self.config.mutation_rate;

        let mut next = Vec::with_capacity(pop_size);
        next.push(population[0].clone());

        while next.len() < pop_size {
            let i_male = select_weighted(population.len(), None, &mut self.rng);
            let i_female = select_weighted(population.len(), Some(i_male), &mut self.rng);

            let (mut child_a, mut child_b) =
                population[i_male].crossover(&population[i_female], &mut self.rng);

            child_a.mutate(mutation_rate, &angles, &mut self.rng);
            next.push(child_a);
            if next.len() < pop_size {
                child_b.mutate(mutation_rate, &angles, &mut self.rng);
                next.push(child_b);
            }
        }
        next
    }
}

/// Rank-weighted pick of an index into a sorted population of size `pop_size`.
///
/// A uniform draw walks the cumulative weights: the first of the `m` candidates covers `[0, 1/m)`,
/// candidate `k + 1` a slice of `2(m - k)/m²`. The slices shrink with the rank, the worst ranks
/// may not be reachable at all. `exclude` is left out of the candidates. Without any candidate
/// left, the excluded index itself is returned, so a single individual is crossed with itself.
fn select_weighted(pop_size: usize, exclude: Option<usize>, rng: &mut impl Rng) -> usize {
    let candidates = (0..pop_size).filter(|&i| Some(i) != exclude).collect_vec();
    if candidates.is_empty() {
        return exclude.unwrap_or(0);
    }

    let m = candidates.len() as f64;
    let weight = 1.0 / m;
    let r: f64 = rng.random();

    let (mut lower, mut upper) = (0.0, weight);
    for (k, &i) in candidates.iter().enumerate() {
        if r >= lower && r < upper {
            return i;
        }
        lower = upper;
        upper += 2.0 * weight * ((m - k as f64) / m);
    }
    candidates[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn selection_favours_better_ranks() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut counts = [0usize; 10];
        for _ in 0..10_000 {
            counts[select_weighted(10, None, &mut rng)] += 1;
        }
        assert!(counts[0] > counts[9]);
        assert!(counts[1] > counts[8]);
    }

    #[test]
    fn selection_excludes() {
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..1_000 {
            assert_ne!(select_weighted(4, Some(2), &mut rng), 2);
        }
    }

    #[test]
    fn singleton_selects_itself() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(select_weighted(1, None, &mut rng), 0);
        assert_eq!(select_weighted(1, Some(0), &mut rng), 0);
    }
}
