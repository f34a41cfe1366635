use rand::{Rng, RngCore};

use crate::core::{Candidate, OptError, SolutionDimension};

/// The trait to implement a mutation operator to modify the solution of a candidate in place.
pub trait Mutation {
    /// Mutate a candidate's solution.
    ///
    /// # Arguments
    ///
    /// * `candidate`: The candidate to mutate.
    /// * `dimensions`: The solution dimensions providing the coordinate bounds.
    /// * `generation`: The 0-based generation index, used by generation-dependent schedules.
    /// * `rng`: The random number generator.
    ///
    /// returns: `Result<(), OptError>`
    fn mutate_offspring(
        &self,
        candidate: &Candidate,
        dimensions: &[SolutionDimension],
        generation: usize,
        rng: &mut dyn RngCore,
    ) -> Result<(), OptError>;
}

/// Bounded polynomial mutation (PM) with a generation-dependent schedule, following Appendix A
/// of:
/// > Deb, K. & Agrawal, S. (1999). A Niched-Penalty Approach for Constraint Handling in Genetic
/// > Algorithms. In: Artificial Neural Nets and Genetic Algorithms, 235-243.
///
/// Each coordinate mutates with probability `1/N + (g/G)(1 - 1/N)` and distribution index
/// `100 + g`, where `N` is the population size, `g` the 0-based generation and `G` the maximum
/// number of generations. Early generations mutate few coordinates by large amounts; late
/// generations mutate most coordinates by small amounts.
pub struct BoundedPolynomialMutation {
    /// The population size. Sets the per-coordinate mutation probability floor at `1/N`.
    population_size: usize,
    /// The maximum number of generations of the run.
    max_generations: usize,
}

impl BoundedPolynomialMutation {
    /// Initialise the bounded polynomial mutation operator.
    ///
    /// # Arguments
    ///
    /// * `population_size`: The population size.
    /// * `max_generations`: The maximum number of generations.
    ///
    /// returns: `Result<BoundedPolynomialMutation, OptError>`
    pub fn new(population_size: usize, max_generations: usize) -> Result<Self, OptError> {
        let name = "BoundedPolynomialMutation".to_string();
        if population_size == 0 {
            return Err(OptError::MutationOperator(
                name,
                "The population size must be a positive number".to_string(),
            ));
        }
        if max_generations == 0 {
            return Err(OptError::MutationOperator(
                name,
                "The number of generations must be a positive number".to_string(),
            ));
        }
        Ok(Self {
            population_size,
            max_generations,
        })
    }

    /// The per-coordinate mutation probability at the given generation.
    ///
    /// # Arguments
    ///
    /// * `generation`: The 0-based generation index.
    ///
    /// return: `f64`
    pub fn mutation_probability(&self, generation: usize) -> f64 {
        let one_n = 1.0 / self.population_size as f64;
        one_n + (generation as f64 / self.max_generations as f64) * (1.0 - one_n)
    }

    /// The mutation distribution index at the given generation.
    ///
    /// # Arguments
    ///
    /// * `generation`: The 0-based generation index.
    ///
    /// return: `f64`
    pub fn index_parameter(generation: usize) -> f64 {
        100.0 + generation as f64
    }

    /// Mutate one coordinate with the polynomial distribution.
    ///
    /// # Arguments
    ///
    /// * `y`: The coordinate value to mutate.
    /// * `y_lower`: The coordinate lower bound.
    /// * `y_upper`: The coordinate upper bound.
    /// * `nm`: The distribution index.
    /// * `rng`: The random number generator reference.
    ///
    /// returns: `f64`
    fn mutate_value(y: f64, y_lower: f64, y_upper: f64, nm: f64, rng: &mut dyn RngCore) -> f64 {
        let u = rng.gen_range(0.0..=1.0);
        let delta = f64::min(y - y_lower, y_upper - y) / (y_upper - y_lower);

        let delta_q = if u <= 0.5 {
            let b = 2.0 * u + (1.0 - 2.0 * u) * f64::powf(1.0 - delta, nm + 1.0);
            f64::powf(b, 1.0 / (nm + 1.0)) - 1.0
        } else {
            let b = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * f64::powf(1.0 - delta, nm + 1.0);
            1.0 - f64::powf(b, 1.0 / (nm + 1.0))
        };
        y + delta_q * (y_upper - y_lower)
    }
}

impl Mutation for BoundedPolynomialMutation {
    fn mutate_offspring(
        &self,
        candidate: &Candidate,
        dimensions: &[SolutionDimension],
        generation: usize,
        rng: &mut dyn RngCore,
    ) -> Result<(), OptError> {
        if candidate.solution().len() != dimensions.len() {
            return Err(OptError::MutationOperator(
                "BoundedPolynomialMutation".to_string(),
                "The solution size does not match the number of dimensions".to_string(),
            ));
        }

        let mutation_probability = self.mutation_probability(generation);
        let nm = Self::index_parameter(generation);
        for (i, dimension) in dimensions.iter().enumerate() {
            if rng.gen_range(0.0..=1.0) <= mutation_probability {
                let (y_lower, y_upper) = dimension.bounds();
                let y = candidate.solution_value(i);
                candidate.set_solution_value(i, Self::mutate_value(y, y_lower, y_upper, nm, rng));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use crate::core::utils::get_rng;
    use crate::core::{Candidate, SolutionDimension};
    use crate::operators::{BoundedPolynomialMutation, Mutation};

    #[test]
    fn test_invalid_args() {
        assert!(BoundedPolynomialMutation::new(0, 10).is_err());
        assert!(BoundedPolynomialMutation::new(8, 0).is_err());
    }

    #[test]
    /// The mutation probability ramps from 1/N at generation 0 to 1 at the last generation.
    fn test_probability_schedule() {
        let pm = BoundedPolynomialMutation::new(20, 50).unwrap();
        assert_approx_eq!(f64, pm.mutation_probability(0), 0.05, epsilon = 1e-12);
        assert_approx_eq!(f64, pm.mutation_probability(50), 1.0, epsilon = 1e-12);
        assert!(pm.mutation_probability(10) < pm.mutation_probability(40));
    }

    #[test]
    fn test_index_parameter_schedule() {
        assert_eq!(BoundedPolynomialMutation::index_parameter(0), 100.0);
        assert_eq!(BoundedPolynomialMutation::index_parameter(42), 142.0);
    }

    #[test]
    /// With a fixed seed the mutation is deterministic across runs.
    fn test_mutation_reproducibility() {
        let dimensions = vec![
            SolutionDimension::new(0.0, 10.0).unwrap(),
            SolutionDimension::new(-5.0, 5.0).unwrap(),
        ];
        let pm = BoundedPolynomialMutation::new(4, 10).unwrap();

        let a = Candidate::new(vec![3.0, 1.0]);
        let mut rng = get_rng(Some(9));
        pm.mutate_offspring(&a, &dimensions, 9, &mut rng).unwrap();

        let b = Candidate::new(vec![3.0, 1.0]);
        let mut rng = get_rng(Some(9));
        pm.mutate_offspring(&b, &dimensions, 9, &mut rng).unwrap();

        assert_eq!(a.solution(), b.solution());
    }

    #[test]
    /// Mutated values stay on the dimension after binding, and late generations (probability
    /// close to 1) perturb most coordinates.
    fn test_mutation_late_generation() {
        let dimensions = vec![SolutionDimension::new(0.0, 1.0).unwrap(); 10];
        let pm = BoundedPolynomialMutation::new(8, 100).unwrap();

        let candidate = Candidate::new(vec![0.5; 10]);
        let mut rng = get_rng(Some(3));
        pm.mutate_offspring(&candidate, &dimensions, 99, &mut rng)
            .unwrap();
        candidate.bind(&dimensions);

        let changed = candidate
            .solution()
            .iter()
            .filter(|v| (**v - 0.5).abs() > 1e-15)
            .count();
        assert!(changed >= 6, "only {} coordinates mutated", changed);
        for value in candidate.solution() {
            assert!((0.0..=1.0).contains(&value));
        }
    }
}
