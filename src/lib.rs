//! Unified NSGA-III (U-NSGA-III) multi-objective evolutionary optimiser.
//!
//! The crate minimises a vector-valued fitness function over a bounded, optionally discretised,
//! real-valued solution space. The generational loop follows Seada & Deb (2016): niching-based
//! tournament selection, simulated binary crossover, generation-scheduled polynomial mutation
//! and the reference-direction survival stage of NSGA-III (normalisation, association and
//! niching). Pareto ranks are assigned with the generalized divide-and-conquer non-dominated
//! sort of Fortin et al. (2013), which is also exposed on its own through
//! [`non_dominated_sort`] for callers that only need to rank pre-computed objective vectors.
//!
//! A fitness evaluator may return a second, validation-dataset fitness per candidate; the
//! optimiser then tracks a validation Pareto front alongside the training front, measures how
//! much the training front overfits the training dataset and can terminate a run early when a
//! threshold is reached.
//!
//! # Example
//! ```
//! use std::error::Error;
//! use unsga3::algorithms::{EvaluationResult, FitnessEvaluator, PopulationSeeding, UNSGA3,
//! UNSGA3Arg};
//! use unsga3::core::{Candidate, SolutionDimension};
//!
//! // minimise f(x) = (x^2, (x - 2)^2) over one variable
//! struct SchEvaluator;
//! impl FitnessEvaluator for SchEvaluator {
//!     fn evaluate(
//!         &self,
//!         candidates: &[Candidate],
//!         _generation: usize,
//!     ) -> Result<EvaluationResult, Box<dyn Error>> {
//!         let training = candidates
//!             .iter()
//!             .map(|c| {
//!                 let x = c.solution_value(0);
//!                 vec![x.powi(2), (x - 2.0).powi(2)]
//!             })
//!             .collect();
//!         Ok(EvaluationResult { training, validation: None })
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     let dimensions = vec![SolutionDimension::new(-1000.0, 1000.0)?];
//!     let args = UNSGA3Arg {
//!         number_of_objectives: 2,
//!         max_generations: 20,
//!         reference_point_increments: 10,
//!         population_size: None,
//!         overfit_threshold: None,
//!         crossover_operator_options: None,
//!         seeding: PopulationSeeding::LatinHypercube,
//!         seed: Some(1),
//!     };
//!     let mut algorithm = UNSGA3::new(dimensions, Box::new(SchEvaluator), args)?;
//!     let (generations, training_front, _) = algorithm.run()?;
//!     println!("{} front members after {} generations", training_front.len(), generations);
//!     Ok(())
//! }
//! ```

pub mod algorithms;
pub mod core;
pub mod operators;
pub mod utils;

pub use crate::core::{Candidate, Fitness, OptError, SolutionDimension};
pub use crate::utils::non_dominated_sort;
