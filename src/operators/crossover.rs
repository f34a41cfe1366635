use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::core::{Candidate, OptError, SolutionDimension};

/// Struct containing the offsprings from the crossover operation.
#[derive(Debug)]
pub struct CrossoverChildren {
    /// The first generated child.
    pub child1: Candidate,
    /// The second generated child.
    pub child2: Candidate,
}

/// Trait to define a crossover operator to generate new children by recombining the solutions
/// of two parents.
pub trait Crossover {
    /// Generate two children from their parents.
    ///
    /// # Arguments
    ///
    /// * `parent1`: The first parent to use for mating.
    /// * `parent2`: The second parent to use for mating.
    /// * `dimensions`: The solution dimensions providing the coordinate bounds.
    /// * `rng`: The random number generator.
    ///
    /// returns: `Result<CrossoverChildren, OptError>`
    fn generate_offsprings(
        &self,
        parent1: &Candidate,
        parent2: &Candidate,
        dimensions: &[SolutionDimension],
        rng: &mut dyn RngCore,
    ) -> Result<CrossoverChildren, OptError>;
}

/// Input arguments for [`SimulatedBinaryCrossover`].
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SimulatedBinaryCrossoverArgs {
    /// The distribution index for crossover (this is the eta_c in the paper). This directly
    /// controls the spread of children: a large value gives children close to their parents, a
    /// small value generates distant offsprings.
    pub distribution_index: f64,
}

impl Default for SimulatedBinaryCrossoverArgs {
    /// Default parameters for the Simulated Binary Crossover (SBX) with a distribution index
    /// of 0.8.
    fn default() -> Self {
        Self {
            distribution_index: 0.8,
        }
    }
}

/// Simulated Binary Crossover (SBX) operator for bounded real variables.
///
/// Implemented based on the bounded formulation in Appendix A of:
/// > Deb, K. & Agrawal, S. (1999). A Niched-Penalty Approach for Constraint Handling in Genetic
/// > Algorithms. In: Artificial Neural Nets and Genetic Algorithms, 235-243.
pub struct SimulatedBinaryCrossover {
    /// The distribution index for crossover. This is the eta_c in the paper.
    distribution_index: f64,
}

impl SimulatedBinaryCrossover {
    /// Initialise the Simulated Binary Crossover (SBX) operator. This returns an error if the
    /// distribution index is negative.
    ///
    /// # Arguments
    ///
    /// * `args`: The operator input parameters.
    ///
    /// returns: `Result<SimulatedBinaryCrossover, OptError>`
    pub fn new(args: SimulatedBinaryCrossoverArgs) -> Result<Self, OptError> {
        if args.distribution_index < 0.0 {
            return Err(OptError::CrossoverOperator(
                "SBX".to_string(),
                format!(
                    "The distribution index {} must be a positive number",
                    args.distribution_index
                ),
            ));
        }
        Ok(Self {
            distribution_index: args.distribution_index,
        })
    }

    /// Perform the crossover for one coordinate from two parents.
    ///
    /// # Arguments
    ///
    /// * `v1`: The coordinate value from the first parent.
    /// * `v2`: The coordinate value from the second parent.
    /// * `y_lower`: The coordinate lower bound.
    /// * `y_upper`: The coordinate upper bound.
    /// * `rng`: The random number generator reference.
    ///
    /// returns: `(f64, f64)`. The value pair to assign to the two children.
    fn crossover_values(
        &self,
        v1: f64,
        v2: f64,
        y_lower: f64,
        y_upper: f64,
        rng: &mut dyn RngCore,
    ) -> (f64, f64) {
        // the formulation assumes y1 < y2
        let (y1, y2) = if v2 < v1 { (v2, v1) } else { (v1, v2) };
        // avoid division by zero when the parents (nearly) coincide
        if (y1 - y2).abs() < 1e-14 {
            return (y1, y2);
        }

        let beta = 1.0 + (2.0 / (y2 - y1)) * f64::min(y1 - y_lower, y_upper - y2);
        let alpha = 2.0 - f64::powf(beta, -(self.distribution_index + 1.0));
        let u = rng.gen_range(0.0..=1.0);
        let beta_q = if u <= 1.0 / alpha {
            f64::powf(u * alpha, 1.0 / (self.distribution_index + 1.0))
        } else {
            f64::powf(
                1.0 / (2.0 - u * alpha),
                1.0 / (self.distribution_index + 1.0),
            )
        };

        let mut c1 = 0.5 * ((y1 + y2) - beta_q * (y2 - y1));
        let mut c2 = 0.5 * ((y1 + y2) + beta_q * (y2 - y1));
        c1 = c1.clamp(y_lower, y_upper);
        c2 = c2.clamp(y_lower, y_upper);

        // swap at random to mix parent material across the two children
        if rng.gen_range(0.0..=1.0) < 0.5 {
            (c1, c2) = (c2, c1);
        }
        (c1, c2)
    }
}

impl Crossover for SimulatedBinaryCrossover {
    fn generate_offsprings(
        &self,
        parent1: &Candidate,
        parent2: &Candidate,
        dimensions: &[SolutionDimension],
        rng: &mut dyn RngCore,
    ) -> Result<CrossoverChildren, OptError> {
        let child1 = parent1.clone_solution();
        let child2 = parent2.clone_solution();
        if child1.solution().len() != dimensions.len() || child2.solution().len() != dimensions.len()
        {
            return Err(OptError::CrossoverOperator(
                "SBX".to_string(),
                "The parent solution size does not match the number of dimensions".to_string(),
            ));
        }

        for (i, dimension) in dimensions.iter().enumerate() {
            let (y_lower, y_upper) = dimension.bounds();
            let (c1, c2) = self.crossover_values(
                parent1.solution_value(i),
                parent2.solution_value(i),
                y_lower,
                y_upper,
                rng,
            );
            child1.set_solution_value(i, c1);
            child2.set_solution_value(i, c2);
        }

        Ok(CrossoverChildren { child1, child2 })
    }
}

#[cfg(test)]
mod test {
    use crate::core::utils::get_rng;
    use crate::core::{Candidate, SolutionDimension};
    use crate::operators::{Crossover, SimulatedBinaryCrossover, SimulatedBinaryCrossoverArgs};

    #[test]
    /// Check that the input arguments to the SBX operator are valid.
    fn test_new_sbx_args() {
        assert!(SimulatedBinaryCrossover::new(SimulatedBinaryCrossoverArgs {
            distribution_index: -2.0,
        })
        .is_err());
        assert!(SimulatedBinaryCrossover::new(SimulatedBinaryCrossoverArgs::default()).is_ok());
    }

    #[test]
    /// With a fixed seed the generated children are deterministic across runs.
    fn test_sbx_reproducibility() {
        let dimensions = vec![
            SolutionDimension::new(0.0, 1.0).unwrap(),
            SolutionDimension::new(0.0, 1.0).unwrap(),
        ];
        let a = Candidate::new(vec![0.2, 0.8]);
        let b = Candidate::new(vec![0.6, 0.4]);

        let sbx = SimulatedBinaryCrossover::new(SimulatedBinaryCrossoverArgs {
            distribution_index: 2.0,
        })
        .unwrap();

        let mut rng = get_rng(Some(1));
        let first = sbx.generate_offsprings(&a, &b, &dimensions, &mut rng).unwrap();
        let mut rng = get_rng(Some(1));
        let second = sbx.generate_offsprings(&a, &b, &dimensions, &mut rng).unwrap();

        assert_eq!(first.child1.solution(), second.child1.solution());
        assert_eq!(first.child2.solution(), second.child2.solution());
    }

    #[test]
    /// Children always stay within the coordinate bounds.
    fn test_sbx_respects_bounds() {
        let dimensions = vec![SolutionDimension::new(0.0, 1.0).unwrap()];
        let a = Candidate::new(vec![0.01]);
        let b = Candidate::new(vec![0.99]);
        let sbx = SimulatedBinaryCrossover::new(SimulatedBinaryCrossoverArgs {
            distribution_index: 0.5,
        })
        .unwrap();

        let mut rng = get_rng(Some(7));
        for _ in 0..200 {
            let children = sbx.generate_offsprings(&a, &b, &dimensions, &mut rng).unwrap();
            for child in [children.child1, children.child2] {
                let value = child.solution_value(0);
                assert!((0.0..=1.0).contains(&value));
            }
        }
    }

    #[test]
    /// Near-identical parent values are passed through unchanged.
    fn test_sbx_equal_parents() {
        let dimensions = vec![SolutionDimension::new(0.0, 1.0).unwrap()];
        let a = Candidate::new(vec![0.5]);
        let b = Candidate::new(vec![0.5 + 1e-16]);
        let sbx = SimulatedBinaryCrossover::new(SimulatedBinaryCrossoverArgs::default()).unwrap();

        let mut rng = get_rng(Some(1));
        let children = sbx.generate_offsprings(&a, &b, &dimensions, &mut rng).unwrap();
        assert_eq!(children.child1.solution_value(0), 0.5);
    }
}
