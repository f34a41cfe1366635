use std::collections::HashMap;

use log::debug;
use rand::prelude::SliceRandom;
use rand::RngCore;

use crate::core::{Candidate, OptError};

/// Implements "Algorithm 4" of Deb & Jain (2014): adds candidates from the last front to the new
/// population based on the reference-direction association and the association distance, so that
/// underrepresented directions are filled first.
pub(crate) struct Niching<'a> {
    /// The population being built at the current generation. Candidates from
    /// `potential_candidates` are moved in here.
    selected_candidates: &'a mut Vec<Candidate>,
    /// Candidates from the last front to pick from.
    potential_candidates: &'a mut Vec<Candidate>,
    /// The number of candidates to move into `selected_candidates`.
    missing_item_count: usize,
    /// Maps the reference-direction index to the number of already-selected candidates
    /// associated with it. Directions with no pickable candidate left are removed.
    rho: &'a mut HashMap<usize, usize>,
    /// The random number generator.
    rng: &'a mut dyn RngCore,
}

impl<'a> Niching<'a> {
    /// Build the [`Niching`] struct.
    ///
    /// # Arguments
    ///
    /// * `selected_candidates`: The population being built, without the last front.
    /// * `potential_candidates`: The candidates of the last front.
    /// * `missing_item_count`: The number of candidates to add.
    /// * `rho`: The niche counts of the already-selected candidates, one entry per reference
    ///   direction.
    /// * `rng`: The random number generator.
    ///
    /// returns: `Result<Niching, OptError>`
    pub fn new(
        selected_candidates: &'a mut Vec<Candidate>,
        potential_candidates: &'a mut Vec<Candidate>,
        missing_item_count: usize,
        rho: &'a mut HashMap<usize, usize>,
        rng: &'a mut dyn RngCore,
    ) -> Result<Self, OptError> {
        let name = "UNSGA3-Niching".to_string();
        if rho.is_empty() {
            return Err(OptError::AlgorithmRun(
                name,
                "The niche count map is empty".to_string(),
            ));
        }
        if potential_candidates.len() < missing_item_count {
            return Err(OptError::AlgorithmRun(
                name,
                format!(
                    "The number of candidates to add ({missing_item_count}) is larger than the \
                    number of potential candidates ({})",
                    potential_candidates.len()
                ),
            ));
        }
        Ok(Self {
            selected_candidates,
            potential_candidates,
            missing_item_count,
            rho,
            rng,
        })
    }

    /// Move candidates into the new population. Reference directions left with no unselected
    /// candidate are excluded from the current round.
    ///
    /// return: `Result<(), OptError>`
    pub fn calculate(&mut self) -> Result<(), OptError> {
        let mut k = 1;
        debug!("Choosing {} candidates", self.missing_item_count);
        while k <= self.missing_item_count {
            // every direction exhausted; only reachable on degenerate pools
            if self.rho.is_empty() {
                debug!("No reference direction left to fill");
                break;
            }

            // find the directions with the minimum niche count and pick one at random. The
            // index set is sorted first so that the pick depends only on the RNG stream
            let min_rho = *self.rho.values().min().unwrap();
            let mut min_count_directions: Vec<usize> = self
                .rho
                .iter()
                .filter_map(|(direction, count)| (*count == min_rho).then_some(*direction))
                .collect();
            min_count_directions.sort_unstable();
            let j_hat = *min_count_directions.choose(&mut self.rng).unwrap();
            debug!("Selected reference direction #{j_hat} (niche count {min_rho})");

            // unselected last-front candidates associated with the chosen direction
            let associated: Vec<usize> = self
                .potential_candidates
                .iter()
                .enumerate()
                .filter_map(|(index, c)| {
                    (c.closest_reference_direction() == Some(j_hat)).then_some(index)
                })
                .collect();

            if associated.is_empty() {
                // the direction cannot be satisfied this round
                debug!("Excluding reference direction #{j_hat} - no candidates associated");
                self.rho.remove(&j_hat);
                continue;
            }

            let new_index = if min_rho == 0 {
                // the direction has no selected candidate yet; take the associated candidate
                // with the shortest perpendicular distance
                let mut best = associated[0];
                for &index in &associated[1..] {
                    let distance = |i: usize| {
                        self.potential_candidates[i]
                            .closest_reference_direction_distance()
                            .unwrap_or(f64::INFINITY)
                    };
                    if distance(index) < distance(best) {
                        best = index;
                    }
                }
                best
            } else {
                *associated.choose(&mut self.rng).unwrap()
            };

            *self.rho.get_mut(&j_hat).unwrap() += 1;
            let candidate = self.potential_candidates.remove(new_index);
            debug!(
                "Added candidate #{new_index} to population - reference direction #{j_hat}"
            );
            self.selected_candidates.push(candidate);
            k += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use crate::algorithms::unsga3::niching::Niching;
    use crate::core::utils::{candidates_from_objective_values, get_rng};
    use crate::core::Candidate;

    fn association(candidate: &Candidate, direction: usize, distance: f64) {
        candidate.set_association(direction, distance);
    }

    #[test]
    /// A direction with no selected candidate picks the associated candidate with the minimum
    /// distance.
    fn test_unrepresented_direction_picks_closest() {
        let selected = candidates_from_objective_values(&[vec![0.0, 0.0], vec![0.0, 0.0]]);
        association(&selected[0], 0, 0.1);
        association(&selected[1], 1, 0.2);

        let mut rho: HashMap<usize, usize> = HashMap::from([(0, 1), (1, 1), (2, 0)]);

        let potential = candidates_from_objective_values(&[vec![0.0, 0.0], vec![0.0, 0.0]]);
        association(&potential[0], 2, 0.4);
        association(&potential[1], 2, 0.9);
        let closest = potential[0].clone();

        let mut selected_candidates = selected;
        let mut potential_candidates = potential;
        let mut rng = get_rng(Some(1));
        Niching::new(
            &mut selected_candidates,
            &mut potential_candidates,
            1,
            &mut rho,
            rng.as_mut(),
        )
        .unwrap()
        .calculate()
        .unwrap();

        assert_eq!(rho[&2], 1);
        assert_eq!(selected_candidates.len(), 3);
        assert!(selected_candidates[2].ptr_eq(&closest));
        assert_eq!(potential_candidates.len(), 1);
    }

    #[test]
    /// A direction already represented picks among its associated candidates at random.
    fn test_represented_direction_picks_associated() {
        let selected = candidates_from_objective_values(&[vec![0.0, 0.0], vec![0.0, 0.0]]);
        association(&selected[0], 0, 0.1);
        association(&selected[1], 1, 0.2);

        // direction 1 is the only one with unselected candidates
        let mut rho: HashMap<usize, usize> = HashMap::from([(0, 1), (1, 1)]);

        let potential = candidates_from_objective_values(&[vec![0.0, 0.0], vec![0.0, 0.0]]);
        association(&potential[0], 1, 99.0);
        association(&potential[1], 1, 0.9);

        let mut selected_candidates = selected;
        let mut potential_candidates = potential;
        let mut rng = get_rng(Some(1));
        Niching::new(
            &mut selected_candidates,
            &mut potential_candidates,
            1,
            &mut rho,
            rng.as_mut(),
        )
        .unwrap()
        .calculate()
        .unwrap();

        // direction 0 may or may not have been probed (and excluded) first, depending on the
        // RNG; the pick itself must come from direction 1 either way
        assert_eq!(rho[&1], 2);
        assert_eq!(selected_candidates.len(), 3);
        assert_eq!(selected_candidates[2].closest_reference_direction(), Some(1));
    }

    #[test]
    fn test_too_few_potential_candidates() {
        let mut selected_candidates = vec![];
        let mut potential_candidates = candidates_from_objective_values(&[vec![0.0, 0.0]]);
        let mut rho: HashMap<usize, usize> = HashMap::from([(0, 0)]);
        let mut rng = get_rng(Some(1));
        assert!(Niching::new(
            &mut selected_candidates,
            &mut potential_candidates,
            2,
            &mut rho,
            rng.as_mut(),
        )
        .is_err());
    }
}
