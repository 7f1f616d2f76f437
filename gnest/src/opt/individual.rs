use rand::Rng;
use rand::seq::SliceRandom;
use shelfnest::entities::{Item, Layout};
use shelfnest::packing::ShelfPacker;

/// Candidate solution: the order in which items are offered to the packer,
/// and the rotation each position is packed with.
#[derive(Clone, Debug, PartialEq)]
pub struct Individual {
    /// Permutation of the item ids
    pub order: Vec<usize>,
    /// Rotation in degrees, `rotations[k]` belongs to `order[k]`
    pub rotations: Vec<f64>,
    /// Area of the layout `order` produces, `None` until evaluated
    pub fitness: Option<f64>,
}

impl Individual {
    /// Items in input order, unrotated.
    pub fn identity(n_items: usize) -> Self {
        Self {
            order: (0..n_items).collect(),
            rotations: vec![0.0; n_items],
            fitness: None,
        }
    }

    /// Uniformly random permutation, each position with a random angle out of `angles`.
    pub fn random(n_items: usize, angles: &[f64], rng: &mut impl Rng) -> Self {
        let mut order: Vec<usize> = (0..n_items).collect();
        order.shuffle(rng);
        let rotations = (0..n_items).map(|_| random_angle(angles, rng)).collect();
        Self {
            order,
            rotations,
            fitness: None,
        }
    }

    /// Unevaluated individuals rank last.
    pub fn fitness(&self) -> f64 {
        self.fitness.unwrap_or(f64::INFINITY)
    }

    pub fn layout(&self, items: &[Item], packer: &ShelfPacker) -> Layout {
        packer.pack_rotated(items, &self.order, &self.rotations)
    }

    pub fn evaluate(&mut self, items: &[Item], packer: &ShelfPacker) -> f64 {
        let fitness = self.layout(items, packer).area();
        self.fitness = Some(fitness);
        fitness
    }

    /// Ordered crossover at a random cut in [10%, 90%] of the length.
    ///
    /// The first child keeps `self`'s genes up to the cut and takes the remaining ones in the order
    /// they appear in `other`, the second child is built the other way around.
    /// Rotations travel along with their genes.
    pub fn crossover(&self, other: &Individual, rng: &mut impl Rng) -> (Individual, Individual) {
        debug_assert_eq!(self.order.len(), other.order.len());
        let cut_frac: f64 = rng.random_range(0.1..0.9);
        let cut = (cut_frac * self.order.len() as f64).round() as usize;
        (
            ordered_crossover(self, other, cut),
            ordered_crossover(other, self, cut),
        )
    }

    /// Swaps every position with its successor with a chance of `mutation_rate` percent.
    /// When more than one angle is allowed, each rotation is re-rolled with that same chance.
    pub fn mutate(&mut self, mutation_rate: f64, angles: &[f64], rng: &mut impl Rng) {
        let p = 0.01 * mutation_rate;
        let n = self.order.len();
        for i in 0..n {
            if rng.random::<f64>() < p && i + 1 < n {
                self.order.swap(i, i + 1);
                self.rotations.swap(i, i + 1);
            }
            if angles.len() > 1 && rng.random::<f64>() < p {
                self.rotations[i] = random_angle(angles, rng);
            }
        }
        self.fitness = None;
    }
}

fn ordered_crossover(head: &Individual, tail: &Individual, cut: usize) -> Individual {
    let n = head.order.len();
    let mut taken = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut rotations = Vec::with_capacity(n);

    for (&id, &r) in head.order.iter().zip(&head.rotations).take(cut) {
        taken[id] = true;
        order.push(id);
        rotations.push(r);
    }
    for (&id, &r) in tail.order.iter().zip(&tail.rotations) {
        if !taken[id] {
            taken[id] = true;
            order.push(id);
            rotations.push(r);
        }
    }

    Individual {
        order,
        rotations,
        fitness: None,
    }
}

fn random_angle(angles: &[f64], rng: &mut impl Rng) -> f64 {
    match angles.len() {
        0 => 0.0,
        1 => angles[0],
        n => angles[rng.random_range(0..n)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::assertions::is_permutation;
    use rand::SeedableRng;
    use rand::prelude::SmallRng;
    use test_case::test_case;

    #[test_case(0; "empty")]
    #[test_case(1; "single")]
    #[test_case(2; "pair")]
    #[test_case(17; "many")]
    fn offspring_are_permutations(n: usize) {
        let mut rng = SmallRng::seed_from_u64(0);
        let angles = [0.0, 90.0, 180.0, 270.0];
        let mut a = Individual::random(n, &angles, &mut rng);
        let mut b = Individual::random(n, &angles, &mut rng);
        for _ in 0..200 {
            let (mut c, mut d) = a.crossover(&b, &mut rng);
            c.mutate(30.0, &angles, &mut rng);
            d.mutate(30.0, &angles, &mut rng);
            assert!(is_permutation(&c.order, n));
            assert!(is_permutation(&d.order, n));
            assert_eq!(c.rotations.len(), n);
            (a, b) = (c, d);
        }
    }

    #[test]
    fn crossover_keeps_prefix_and_tail_order() {
        let mut rng = SmallRng::seed_from_u64(3);
        let a = Individual::identity(10);
        let b = Individual {
            order: (0..10).rev().collect(),
            rotations: vec![90.0; 10],
            fitness: Some(1.0),
        };
        let (c, d) = a.crossover(&b, &mut rng);

        // genes before the cut come from `a`, unrotated
        let cut = c.rotations.iter().take_while(|&&r| r == 0.0).count();
        assert!((1..=9).contains(&cut));
        assert_eq!(&c.order[..cut], &a.order[..cut]);
        // the remaining genes appear in the order of the other parent
        assert!(c.order[cut..].windows(2).all(|w| w[0] > w[1]));
        assert!(c.rotations[cut..].iter().all(|&r| r == 90.0));
        assert_eq!(&d.order[..cut], &b.order[..cut]);
        assert_eq!(c.fitness, None);
    }

    #[test]
    fn rotations_follow_their_genes() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut ind = Individual {
            order: vec![0, 1, 2, 3, 4],
            rotations: vec![0.0, 10.0, 20.0, 30.0, 40.0],
            fitness: None,
        };
        // a single allowed angle never re-rolls
        ind.mutate(100.0, &[0.0], &mut rng);
        for (&id, &r) in ind.order.iter().zip(&ind.rotations) {
            assert_eq!(r, id as f64 * 10.0);
        }
    }

    #[test]
    fn zero_mutation_rate_is_identity() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut ind = Individual::random(25, &[0.0, 180.0], &mut rng);
        let before = ind.clone();
        ind.mutate(0.0, &[0.0, 180.0], &mut rng);
        assert_eq!(ind.order, before.order);
        assert_eq!(ind.rotations, before.rotations);
    }
}
