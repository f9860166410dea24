//! Neighbor topology.
//!
//! Each particle's social pull comes from its local best: the best personal
//! best within its k-nearest neighborhood. Distances are measured in a
//! scale-invariant space where every coordinate is divided by its
//! dimension's baseline, so dimensions of very different magnitude weigh
//! equally.
//!
//! The query structure is an exact linear scan rebuilt every iteration:
//! swarms are tens of particles and the scan preserves the (distance,
//! index) ordering the local-best tie rules depend on.

use super::space::SearchSpace;
use super::swarm::Swarm;

/// K-nearest-neighbor queries over baseline-normalized particle positions.
pub struct NeighborIndex {
    normalized: Vec<f64>,
    particles: usize,
    dimensions: usize,
}

impl NeighborIndex {
    /// Builds the index from the swarm's current positions.
    pub fn build(swarm: &Swarm, space: &SearchSpace) -> Self {
        let particles = swarm.particles();
        let dimensions = swarm.dimensions();
        let mut normalized = Vec::with_capacity(particles * dimensions);
        for p in 0..particles {
            let pos = swarm.position(p);
            for (i, d) in space.dimensions().iter().enumerate() {
                normalized.push(pos[i] / d.scale);
            }
        }
        Self {
            normalized,
            particles,
            dimensions,
        }
    }

    /// The `k` nearest particles to particle `p`, nearest first.
    ///
    /// Euclidean metric over the normalized coordinates. Particle `p`
    /// itself sits at distance 0 and is always first; equal distances
    /// order by particle index.
    pub fn nearest(&self, p: usize, k: usize) -> Vec<usize> {
        let row = |i: usize| &self.normalized[i * self.dimensions..(i + 1) * self.dimensions];
        let origin = row(p);
        let mut order: Vec<(f64, usize)> = (0..self.particles)
            .map(|i| {
                let d2: f64 = row(i)
                    .iter()
                    .zip(origin.iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum();
                (d2, i)
            })
            .collect();
        order.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        order.truncate(k);
        order.into_iter().map(|(_, i)| i).collect()
    }
}

/// Computes every particle's local-best position, row-major P x D.
///
/// With `neighbour == 1` each particle is its own neighborhood and the
/// result is a copy of the personal bests — no query is made. Otherwise
/// the local best is the personal-best position of whichever neighbor
/// (self included) holds the lowest personal-best evaluation, ties going
/// to the earliest index in query order.
pub fn local_bests(swarm: &Swarm, space: &SearchSpace, neighbour: usize) -> Vec<f64> {
    let dims = swarm.dimensions();
    if neighbour == 1 {
        return swarm.pbest_pos.clone();
    }

    let index = NeighborIndex::build(swarm, space);
    let mut result = Vec::with_capacity(swarm.particles() * dims);
    for p in 0..swarm.particles() {
        let neighbors = index.nearest(p, neighbour);
        let mut best = neighbors[0];
        for &n in &neighbors[1..] {
            if swarm.pbest_eval[n] < swarm.pbest_eval[best] {
                best = n;
            }
        }
        result.extend_from_slice(swarm.pbest(best));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::{Catalog, Variable};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn space_1d() -> SearchSpace {
        let mut catalog = Catalog::new();
        catalog
            .add_variable(Variable::continuous("x", -100.0, 100.0, 2.0, 10).unwrap())
            .unwrap();
        SearchSpace::from_catalog(&catalog).unwrap()
    }

    fn swarm_at(positions: &[f64], space: &SearchSpace) -> Swarm {
        let mut rng = StdRng::seed_from_u64(0);
        let mut swarm = Swarm::new(positions.len(), space, &mut rng);
        swarm.position.copy_from_slice(positions);
        swarm.pbest_pos.copy_from_slice(positions);
        swarm
    }

    #[test]
    fn test_self_is_nearest() {
        let space = space_1d();
        let swarm = swarm_at(&[0.0, 10.0, 50.0], &space);
        let index = NeighborIndex::build(&swarm, &space);
        assert_eq!(index.nearest(2, 1), vec![2]);
        assert_eq!(index.nearest(2, 2), vec![2, 1]);
    }

    #[test]
    fn test_nearest_ordering_and_tie() {
        let space = space_1d();
        // particle 1 is equidistant from 0 and 2: index breaks the tie
        let swarm = swarm_at(&[0.0, 10.0, 20.0], &space);
        let index = NeighborIndex::build(&swarm, &space);
        assert_eq!(index.nearest(1, 3), vec![1, 0, 2]);
        assert_eq!(index.nearest(0, 2), vec![0, 1]);
    }

    #[test]
    fn test_normalization_uses_scale() {
        // two dimensions with wildly different magnitude; without the
        // baseline division, dimension y would dominate the metric
        let mut catalog = Catalog::new();
        catalog
            .add_variable(Variable::continuous("x", 0.0, 2.0, 1.0, 10).unwrap())
            .unwrap();
        catalog
            .add_variable(Variable::continuous("y", 0.0, 2000.0, 1000.0, 10).unwrap())
            .unwrap();
        let space = SearchSpace::from_catalog(&catalog).unwrap();

        let mut rng = StdRng::seed_from_u64(0);
        let mut swarm = Swarm::new(3, &space, &mut rng);
        // p0 at (0, 0); p1 near in normalized space (0.1, 100); p2 near in
        // raw space but far normalized (1.9, 0)
        swarm
            .position
            .copy_from_slice(&[0.0, 0.0, 0.1, 100.0, 1.9, 0.0]);
        let index = NeighborIndex::build(&swarm, &space);
        assert_eq!(index.nearest(0, 2), vec![0, 1]);
    }

    #[test]
    fn test_local_bests_neighbour_one_is_pbest() {
        let space = space_1d();
        let mut swarm = swarm_at(&[0.0, 10.0, 20.0], &space);
        swarm.pbest_eval = vec![3.0, 1.0, 2.0];
        let lb = local_bests(&swarm, &space, 1);
        assert_eq!(lb, swarm.pbest_pos);
    }

    #[test]
    fn test_local_bests_pick_best_neighbor() {
        let space = space_1d();
        let mut swarm = swarm_at(&[0.0, 10.0, 50.0], &space);
        swarm.pbest_eval = vec![3.0, 1.0, 0.0];
        // k=2: p0's neighborhood is {0,1} -> best is p1; p2's is {2,1} -> p2
        let lb = local_bests(&swarm, &space, 2);
        assert_eq!(&lb[0..1], &[10.0]);
        assert_eq!(&lb[1..2], &[10.0]);
        assert_eq!(&lb[2..3], &[50.0]);
    }

    #[test]
    fn test_local_bests_tie_keeps_query_order() {
        let space = space_1d();
        let mut swarm = swarm_at(&[0.0, 10.0, 20.0], &space);
        // p1's neighbors in query order: [1, 0, 2]; 0 and 2 tie on
        // evaluation with 1 worse -> earliest in query order wins
        swarm.pbest_eval = vec![1.0, 5.0, 1.0];
        let lb = local_bests(&swarm, &space, 3);
        assert_eq!(&lb[1..2], &[0.0]);
    }
}
