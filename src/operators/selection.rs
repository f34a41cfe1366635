use rand::{Rng, RngCore};

use crate::core::{Candidate, OptError};

/// A trait implementing methods to choose candidates from a population for reproduction.
pub trait Selector {
    /// Select one parent per tournament. The number of selected parents equals the population
    /// size; selected parents may repeat.
    ///
    /// # Arguments
    ///
    /// * `candidates`: The candidates competing for selection.
    /// * `rng`: The random number generator.
    ///
    /// returns: `Result<Vec<Candidate>, OptError>`
    fn select(
        &self,
        candidates: &[Candidate],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Candidate>, OptError>;
}

/// Niching-based binary tournament selection from the U-NSGA-III procedure:
///
/// > Seada, H. & Deb, K. (2016). A Unified Evolutionary Optimization Procedure for Single,
/// > Multiple, and Many Objectives. IEEE Transactions on Evolutionary Computation, 20, 358-369.
///
/// Tournament pairs are formed from the even indices against the odd indices, which guarantees
/// every candidate competes at least once; the remaining half of the tournaments draw both
/// competitors uniformly at random with replacement. Competitors associated with the same
/// reference direction are compared by non-dominated rank, then by association distance;
/// competitors associated with different reference directions, or lacking an association (the
/// first generation has not run selection yet), are chosen between at random.
pub struct NichingTournamentSelector;

impl NichingTournamentSelector {
    /// Run one binary tournament.
    ///
    /// # Arguments
    ///
    /// * `p1`: The first competitor.
    /// * `p2`: The second competitor.
    /// * `rng`: The random number generator.
    ///
    /// returns: `Candidate`. The winner.
    fn tournament(p1: &Candidate, p2: &Candidate, rng: &mut dyn RngCore) -> Candidate {
        if let (Some(d1), Some(d2)) = (
            p1.closest_reference_direction(),
            p2.closest_reference_direction(),
        ) {
            if d1 == d2 {
                if let (Some(r1), Some(r2)) = (p1.non_dominated_rank(), p2.non_dominated_rank()) {
                    if r1 < r2 {
                        return p1.clone();
                    }
                    if r2 < r1 {
                        return p2.clone();
                    }
                }
                if let (Some(dist1), Some(dist2)) = (
                    p1.closest_reference_direction_distance(),
                    p2.closest_reference_direction_distance(),
                ) {
                    return if dist1 < dist2 { p1.clone() } else { p2.clone() };
                }
            }
        }
        // different reference directions, or no association assigned yet
        if rng.gen_range(0.0..=1.0) < 0.5 {
            p1.clone()
        } else {
            p2.clone()
        }
    }
}

impl Selector for NichingTournamentSelector {
    fn select(
        &self,
        candidates: &[Candidate],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Candidate>, OptError> {
        if candidates.len() < 2 {
            return Err(OptError::SelectorOperator(
                "NichingTournament".to_string(),
                format!(
                    "At least 2 candidates are needed for a tournament, but {} given",
                    candidates.len()
                ),
            ));
        }

        // deterministic pairs use every candidate at least once
        let mut pairs: Vec<(usize, usize)> = (0..candidates.len() / 2)
            .map(|i| (2 * i, 2 * i + 1))
            .collect();
        // the remaining tournaments draw both competitors at random, with replacement
        for _ in 0..candidates.len() / 2 {
            pairs.push((
                rng.gen_range(0..candidates.len()),
                rng.gen_range(0..candidates.len()),
            ));
        }

        Ok(pairs
            .iter()
            .map(|(i, j)| Self::tournament(&candidates[*i], &candidates[*j], rng))
            .collect())
    }
}

#[cfg(test)]
mod test {
    use crate::core::utils::get_rng;
    use crate::core::Candidate;
    use crate::operators::{NichingTournamentSelector, Selector};

    fn associated_candidate(direction: usize, rank: usize, distance: f64) -> Candidate {
        let candidate = Candidate::new(vec![0.0]);
        candidate.set_association(direction, distance);
        candidate.set_non_dominated_rank(rank);
        candidate
    }

    #[test]
    /// On a shared reference direction the lower rank wins regardless of the RNG.
    fn test_same_direction_rank_wins() {
        let p1 = associated_candidate(2, 0, 0.9);
        let p2 = associated_candidate(2, 3, 0.1);
        let mut rng = get_rng(Some(1));
        for _ in 0..20 {
            let winner = NichingTournamentSelector::tournament(&p1, &p2, &mut rng);
            assert!(winner.ptr_eq(&p1));
        }
    }

    #[test]
    /// On a shared reference direction and equal rank the smaller distance wins.
    fn test_same_direction_distance_breaks_tie() {
        let p1 = associated_candidate(0, 1, 0.7);
        let p2 = associated_candidate(0, 1, 0.2);
        let mut rng = get_rng(Some(1));
        for _ in 0..20 {
            let winner = NichingTournamentSelector::tournament(&p1, &p2, &mut rng);
            assert!(winner.ptr_eq(&p2));
        }
    }

    #[test]
    /// Unassociated candidates (first generation) fall back to a random pick; both must win
    /// eventually.
    fn test_missing_association_random_branch() {
        let p1 = Candidate::new(vec![0.0]);
        let p2 = associated_candidate(0, 0, 0.1);
        let mut rng = get_rng(Some(4));

        let mut p1_wins = 0;
        let mut p2_wins = 0;
        for _ in 0..100 {
            let winner = NichingTournamentSelector::tournament(&p1, &p2, &mut rng);
            if winner.ptr_eq(&p1) {
                p1_wins += 1;
            } else {
                p2_wins += 1;
            }
        }
        assert!(p1_wins > 0 && p2_wins > 0);
    }

    #[test]
    /// The selector returns as many parents as there are candidates.
    fn test_selected_count() {
        let candidates: Vec<Candidate> = (0..8).map(|i| Candidate::new(vec![i as f64])).collect();
        let mut rng = get_rng(Some(1));
        let selected = NichingTournamentSelector
            .select(&candidates, &mut rng)
            .unwrap();
        assert_eq!(selected.len(), 8);

        // the deterministic pairs guarantee each of the first tournaments drew from a distinct
        // pair, so the first half of the winners come from disjoint index pairs
        for (i, winner) in selected.iter().take(4).enumerate() {
            assert!(
                winner.ptr_eq(&candidates[2 * i]) || winner.ptr_eq(&candidates[2 * i + 1])
            );
        }
    }

    #[test]
    fn test_too_few_candidates() {
        let candidates = vec![Candidate::new(vec![0.0])];
        let mut rng = get_rng(Some(1));
        assert!(NichingTournamentSelector.select(&candidates, &mut rng).is_err());
    }
}
