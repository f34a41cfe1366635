use log::debug;

use crate::core::{Candidate, OptError};
use crate::utils::{argmin, perpendicular_distance};

/// Associates each candidate's normalised fitness with the nearest reference direction by
/// perpendicular distance. This implements "Algorithm 3" of Deb & Jain (2014); steps 1-3 are
/// skipped because the reference directions are generated on the unit simplex and need no
/// normalisation.
pub(crate) struct AssociateToReferenceDirection<'a> {
    /// The candidates containing the normalised fitnesses.
    candidates: &'a [Candidate],
    /// The reference directions.
    reference_directions: &'a [Vec<f64>],
}

impl<'a> AssociateToReferenceDirection<'a> {
    /// Build the [`AssociateToReferenceDirection`] struct.
    ///
    /// # Arguments
    ///
    /// * `candidates`: The candidates containing the normalised fitnesses.
    /// * `reference_directions`: The reference directions to associate the fitnesses to.
    ///
    /// returns: `Result<Self, OptError>`
    pub fn new(
        candidates: &'a [Candidate],
        reference_directions: &'a [Vec<f64>],
    ) -> Result<Self, OptError> {
        if reference_directions.is_empty() {
            return Err(OptError::AlgorithmRun(
                "UNSGA3-Associate".to_string(),
                "The vector of reference directions is empty".to_string(),
            ));
        }
        Ok(Self {
            candidates,
            reference_directions,
        })
    }

    /// Associate every candidate with its nearest reference direction. This stores the
    /// direction index and the perpendicular distance on the candidate. The first direction
    /// wins when distances tie.
    ///
    /// return: `Result<(), OptError>`
    pub fn calculate(&self) -> Result<(), OptError> {
        for candidate in self.candidates {
            let normalised = candidate.normalised_fitness().ok_or_else(|| {
                OptError::AlgorithmRun(
                    "UNSGA3-Associate".to_string(),
                    "The candidate has no normalised fitness; normalisation must run first"
                        .to_string(),
                )
            })?;
            let point = normalised.values();

            let distances = self
                .reference_directions
                .iter()
                .map(|direction| perpendicular_distance(direction, &point))
                .collect::<Result<Vec<f64>, OptError>>()?;

            let (direction_index, min_distance) = argmin(&distances);
            candidate.set_association(direction_index, min_distance);
            debug!(
                "Associated normalised point {:?} to reference direction #{} {:?} - distance = {}",
                point, direction_index, self.reference_directions[direction_index], min_distance
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use crate::algorithms::unsga3::associate::AssociateToReferenceDirection;
    use crate::core::utils::candidates_from_objective_values;
    use crate::core::Fitness;

    #[test]
    /// Candidates near a simplex corner associate with the corner direction; the distances
    /// match hand-computed values.
    fn test_association() {
        let reference_directions = vec![
            vec![1.0, 0.0],
            vec![0.5, 0.5],
            vec![0.0, 1.0],
        ];
        let candidates = candidates_from_objective_values(&[vec![0.0, 0.0], vec![0.0, 0.0]]);
        candidates[0].set_normalised_fitness(Fitness::new(&[0.9, 0.1]));
        candidates[1].set_normalised_fitness(Fitness::new(&[0.2, 0.8]));

        AssociateToReferenceDirection::new(&candidates, &reference_directions)
            .unwrap()
            .calculate()
            .unwrap();

        assert_eq!(candidates[0].closest_reference_direction(), Some(0));
        assert_approx_eq!(
            f64,
            candidates[0].closest_reference_direction_distance().unwrap(),
            0.1,
            epsilon = 1e-9
        );

        assert_eq!(candidates[1].closest_reference_direction(), Some(2));
        assert_approx_eq!(
            f64,
            candidates[1].closest_reference_direction_distance().unwrap(),
            0.2,
            epsilon = 1e-9
        );
    }

    #[test]
    /// A point on a direction has zero distance; equidistant directions resolve to the first.
    fn test_tie_first_direction_wins() {
        let reference_directions = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let candidates = candidates_from_objective_values(&[vec![0.0, 0.0]]);
        candidates[0].set_normalised_fitness(Fitness::new(&[0.5, 0.5]));

        AssociateToReferenceDirection::new(&candidates, &reference_directions)
            .unwrap()
            .calculate()
            .unwrap();
        assert_eq!(candidates[0].closest_reference_direction(), Some(0));
    }

    #[test]
    fn test_missing_normalised_fitness() {
        let reference_directions = vec![vec![1.0, 0.0]];
        let candidates = candidates_from_objective_values(&[vec![0.0, 0.0]]);
        let association =
            AssociateToReferenceDirection::new(&candidates, &reference_directions).unwrap();
        assert!(association.calculate().is_err());
    }
}
