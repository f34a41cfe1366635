use log::debug;

use crate::core::{Candidate, Fitness, OptError};
use crate::utils::{hyperplane_intercepts, vector_min};

/// Normalises the active fitnesses of a population so that all points lie between the origin and
/// the hyperplane through the extreme points, which intersects each translated objective axis at
/// its intercept. This implements the adaptive normalisation of Deb & Jain (2014), section IV-C.
///
/// The procedure translates every fitness by the per-objective population minima, picks the
/// fitness with the largest value in each objective as that objective's extreme point, computes
/// the hyperplane intercepts and stores the rescaled fitness on each candidate.
pub(crate) struct Normalise<'a> {
    /// The candidates that need normalisation.
    candidates: &'a [Candidate],
    /// The number of objectives in the active fitnesses.
    number_of_objectives: usize,
}

/// Calculated points used in the normalisation. Exposed for inspection in tests.
pub(crate) struct NormalisationPoints {
    /// The per-objective minima the fitnesses were translated by.
    pub(crate) ideal_point: Vec<f64>,
    /// The translated extreme points used to calculate the hyperplane intercepts.
    pub(crate) extreme_points: Vec<Vec<f64>>,
    /// The objective intercepts of the plane.
    pub(crate) intercepts: Vec<f64>,
}

impl<'a> Normalise<'a> {
    /// Build the [`Normalise`] struct. This returns an error if the candidate vector is empty.
    ///
    /// # Arguments
    ///
    /// * `candidates`: The candidates that need normalisation.
    ///
    /// returns: `Result<Normalise, OptError>`
    pub fn new(candidates: &'a [Candidate]) -> Result<Self, OptError> {
        if candidates.is_empty() {
            return Err(OptError::AlgorithmRun(
                "UNSGA3-Normalise".to_string(),
                "The vector of candidates is empty".to_string(),
            ));
        }
        let number_of_objectives = candidates[0].fitness().len();
        Ok(Self {
            candidates,
            number_of_objectives,
        })
    }

    /// Normalise the candidates' active fitnesses and store the result on each candidate.
    ///
    /// returns: `Result<NormalisationPoints, OptError>`. The points calculated during the
    /// normalisation.
    pub fn calculate(&self) -> Result<NormalisationPoints, OptError> {
        // the ideal point collects the smallest value seen for each objective in the population
        let mut ideal_point = Vec::with_capacity(self.number_of_objectives);
        for j in 0..self.number_of_objectives {
            let values: Vec<f64> = self
                .candidates
                .iter()
                .map(|c| c.fitness().value(j))
                .collect();
            ideal_point.push(vector_min(&values)?);
        }
        debug!("Set ideal point to {:?}", ideal_point);

        // translate all fitnesses so that the ideal point becomes the origin
        let translated: Vec<Vec<f64>> = self
            .candidates
            .iter()
            .map(|c| {
                c.fitness()
                    .values()
                    .iter()
                    .enumerate()
                    .map(|(j, v)| v - ideal_point[j])
                    .collect()
            })
            .collect();

        // the extreme point for objective j is the translated fitness with the largest value in
        // that objective
        let mut extreme_points = Vec::with_capacity(self.number_of_objectives);
        for j in 0..self.number_of_objectives {
            let index = (0..translated.len())
                .max_by(|a, b| translated[*a][j].total_cmp(&translated[*b][j]))
                .unwrap_or(0);
            extreme_points.push(translated[index].clone());
        }
        debug!("Set extreme points to {:?}", extreme_points);

        let intercepts = hyperplane_intercepts(&extreme_points);
        debug!("Found intercepts {:?}", intercepts);

        // rescale so that the hyperplane intersects every axis at 1. A zero intercept occurs
        // when all candidates share the same value for an objective; the component is set to 1
        // to avoid the division
        for (candidate, translated_fitness) in self.candidates.iter().zip(&translated) {
            let normalised: Vec<f64> = translated_fitness
                .iter()
                .enumerate()
                .map(|(j, v)| if intercepts[j] != 0.0 { v / intercepts[j] } else { 1.0 })
                .collect();
            candidate.set_normalised_fitness(Fitness::new(&normalised));
        }

        Ok(NormalisationPoints {
            ideal_point,
            extreme_points,
            intercepts,
        })
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use crate::algorithms::unsga3::normalise::Normalise;
    use crate::core::utils::candidates_from_objective_values;

    fn assert_approx_array_eq(calculated: &[f64], expected: &[f64]) {
        for (c, e) in calculated.iter().zip(expected) {
            assert_approx_eq!(f64, *c, *e, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_empty_population() {
        assert!(Normalise::new(&[]).is_err());
    }

    #[test]
    /// Translation and intercepts on a hand-picked 2-objective population. The minima are
    /// (1, 1); the translated extremes (4, 0) and (0, 2) give a plane with intercepts 4 and 2.
    fn test_normalisation() {
        let candidates = candidates_from_objective_values(&[
            vec![5.0, 1.0],
            vec![1.0, 3.0],
            vec![2.0, 2.0],
        ]);
        let points = Normalise::new(&candidates).unwrap().calculate().unwrap();

        assert_approx_array_eq(&points.ideal_point, &[1.0, 1.0]);
        assert_approx_array_eq(&points.extreme_points[0], &[4.0, 0.0]);
        assert_approx_array_eq(&points.extreme_points[1], &[0.0, 2.0]);
        assert_approx_array_eq(&points.intercepts, &[4.0, 2.0]);

        let normalised: Vec<Vec<f64>> = candidates
            .iter()
            .map(|c| c.normalised_fitness().unwrap().values())
            .collect();
        assert_approx_array_eq(&normalised[0], &[1.0, 0.0]);
        assert_approx_array_eq(&normalised[1], &[0.0, 1.0]);
        assert_approx_array_eq(&normalised[2], &[0.25, 0.5]);
    }

    #[test]
    /// When the same translated fitness is extreme in every objective the hyperplane is
    /// degenerate; the intercepts fall back to the diagonal of the extreme matrix.
    fn test_degenerate_extremes() {
        let candidates = candidates_from_objective_values(&[
            vec![3.0, 3.0],
            vec![1.0, 1.0],
            vec![2.0, 2.0],
        ]);
        let points = Normalise::new(&candidates).unwrap().calculate().unwrap();

        // both extreme points are the translated (2, 2)
        assert_approx_array_eq(&points.extreme_points[0], &[2.0, 2.0]);
        assert_approx_array_eq(&points.extreme_points[1], &[2.0, 2.0]);
        assert_approx_array_eq(&points.intercepts, &[2.0, 2.0]);
    }

    #[test]
    /// An objective shared by every candidate yields a zero intercept; the normalised component
    /// is set to 1 instead of dividing by zero.
    fn test_zero_intercept() {
        let candidates = candidates_from_objective_values(&[
            vec![4.0, 7.0],
            vec![2.0, 7.0],
            vec![3.0, 7.0],
        ]);
        Normalise::new(&candidates).unwrap().calculate().unwrap();

        for candidate in &candidates {
            let normalised = candidate.normalised_fitness().unwrap();
            assert_eq!(normalised.value(1), 1.0);
        }
    }
}
