use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rand::prelude::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::algorithms::unsga3::associate::AssociateToReferenceDirection;
use crate::algorithms::unsga3::niching::Niching;
use crate::algorithms::unsga3::normalise::Normalise;
use crate::core::utils::get_rng;
use crate::core::{Candidate, Fitness, OptError, SolutionDimension};
use crate::operators::{
    BoundedPolynomialMutation, Crossover, Mutation, NichingTournamentSelector, Selector,
    SimulatedBinaryCrossover, SimulatedBinaryCrossoverArgs,
};
use crate::utils::{non_dominated_sort, DasDennis};

mod associate;
mod niching;
mod normalise;

/// The result of a fitness evaluation, one entry per candidate in the order the candidates were
/// given to the evaluator.
#[derive(Debug)]
pub struct EvaluationResult {
    /// The training-dataset fitness vectors.
    pub training: Vec<Vec<f64>>,
    /// The validation-dataset fitness vectors, for problems that carry a validation dataset.
    pub validation: Option<Vec<Vec<f64>>>,
}

/// The trait with the user-defined function evaluating the fitness of new candidates. The
/// optimiser treats the call as opaque and blocking; the implementation may parallelise
/// internally, but the returned vectors must match the order of the supplied candidates.
pub trait FitnessEvaluator {
    /// Evaluate the fitness of the given candidates.
    ///
    /// # Arguments
    ///
    /// * `candidates`: The candidates to evaluate. Read the solution with
    ///   [`Candidate::solution`].
    /// * `generation`: The 0-based generation the candidates were created at.
    ///
    /// returns: `Result<EvaluationResult, Box<dyn Error>>`
    fn evaluate(
        &self,
        candidates: &[Candidate],
        generation: usize,
    ) -> Result<EvaluationResult, Box<dyn Error>>;
}

/// How the initial population is seeded.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PopulationSeeding {
    /// Stratified Latin-hypercube sampling: each dimension's range is split in as many strata
    /// as there are candidates and every candidate draws from a different stratum.
    #[default]
    LatinHypercube,
    /// Plain uniform sampling within each dimension's bounds.
    UniformRandom,
}

/// A read-only view of the optimiser state handed to the per-generation inspector.
pub struct GenerationView<'a> {
    /// The generation that just completed (1-based count of completed generations).
    pub generation: usize,
    /// The training-dataset Pareto front of the current population.
    pub training_pareto_front: &'a [Candidate],
    /// The validation-dataset Pareto front, when the problem has validation fitnesses.
    pub validation_pareto_front: Option<&'a [Candidate]>,
    /// The overfitting measure history, one entry per generation.
    pub overfitting: &'a [f64],
}

/// The per-generation inspector callback.
pub type Inspector = Box<dyn FnMut(&GenerationView)>;

/// Input arguments for the U-NSGA-III algorithm.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UNSGA3Arg {
    /// The number of objectives the fitness evaluator returns per candidate.
    pub number_of_objectives: usize,
    /// The maximum number of generations to evolve.
    pub max_generations: usize,
    /// The number of equally-spaced values, including zero, each reference-direction coordinate
    /// can take. For example 5 increments place coordinates at 0, 0.25, 0.5, 0.75 and 1.
    pub reference_point_increments: usize,
    /// The number of candidates in the population. When `None`, the size is set to the smallest
    /// multiple of 4 that is at least the number of reference directions, so that one candidate
    /// is expected per direction (Seada & Deb 2016, page 361). A custom size must be a multiple
    /// of 4 and exceed the number of reference directions.
    pub population_size: Option<usize>,
    /// Terminate early when the overfitting measure reaches this threshold. Only meaningful for
    /// problems with validation fitnesses. A value of 1 means no training-front member sits on
    /// the validation front. `None` disables the check.
    pub overfit_threshold: Option<f64>,
    /// The options of the Simulated Binary Crossover (SBX) operator. This defaults to
    /// [`SimulatedBinaryCrossoverArgs::default()`].
    pub crossover_operator_options: Option<SimulatedBinaryCrossoverArgs>,
    /// How the initial population is seeded. The Latin hypercube spreads the initial solutions
    /// more evenly; the uniform fallback is always available.
    pub seeding: PopulationSeeding,
    /// The seed used in the random number generator (RNG). Specify a seed to reproduce results;
    /// all randomness in the run flows from this one generator. The seed is randomly picked if
    /// this is `None`.
    pub seed: Option<u64>,
}

/// The Unified Non-dominated Sorting Genetic Algorithm III (U-NSGA-III).
///
/// Implemented based on:
/// > H. Seada and K. Deb, "A Unified Evolutionary Optimization Procedure for Single, Multiple,
/// > and Many Objectives," in IEEE Transactions on Evolutionary Computation, vol. 20, no. 3,
/// > pp. 358-369, June 2016, doi: 10.1109/TEVC.2015.2459718
///
/// with the survival stage of:
/// > K. Deb and H. Jain, "An Evolutionary Many-Objective Optimization Algorithm Using
/// > Reference-Point-Based Nondominated Sorting Approach, Part I: Solving Problems With Box
/// > Constraints," in IEEE Transactions on Evolutionary Computation, vol. 18, no. 4,
/// > pp. 577-601, Aug. 2014, doi: 10.1109/TEVC.2013.2281535
///
/// When the fitness evaluator also returns validation-dataset fitnesses, the optimiser tracks a
/// validation Pareto front alongside the training front and measures, each generation, the
/// fraction of the training front absent from the validation front. The run can terminate early
/// when that overfitting measure reaches a configurable threshold.
pub struct UNSGA3 {
    /// The solution dimensions describing the search space.
    dimensions: Vec<SolutionDimension>,
    /// The user-defined fitness evaluator.
    evaluator: Box<dyn FitnessEvaluator>,
    /// The number of objectives.
    number_of_objectives: usize,
    /// The maximum number of generations.
    max_generations: usize,
    /// The number of candidates in the population.
    population_size: usize,
    /// The reference directions on the unit simplex.
    reference_directions: Vec<Vec<f64>>,
    /// The current population.
    population: Vec<Candidate>,
    /// The training-dataset Pareto front of the current population.
    training_pareto_front: Vec<Candidate>,
    /// The validation-dataset Pareto front. `None` until validation fitnesses are seen.
    validation_pareto_front: Option<Vec<Candidate>>,
    /// The overfitting measure, one entry per generation.
    overfitting: Vec<f64>,
    /// Whether the overfit threshold was reached.
    currently_overfitted: bool,
    /// The overfit threshold, when set.
    overfit_threshold: Option<f64>,
    /// The evolution step.
    generation: usize,
    /// The niching-based binary tournament used to pick parents.
    selector_operator: NichingTournamentSelector,
    /// The SBX operator recombining parent solutions into children.
    crossover_operator: SimulatedBinaryCrossover,
    /// The generation-scheduled polynomial mutation operator.
    mutation_operator: BoundedPolynomialMutation,
    /// How the initial population is seeded.
    seeding: PopulationSeeding,
    /// The random number generator.
    rng: Box<dyn RngCore>,
    /// The optional per-generation inspector.
    inspector: Option<Inspector>,
    /// The time when the algorithm started.
    start_time: Instant,
    /// The algorithm options.
    args: UNSGA3Arg,
}

impl Display for UNSGA3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl UNSGA3 {
    /// Initialise the U-NSGA-III algorithm. This builds the reference directions, resolves the
    /// population size and validates the whole configuration; every configuration error
    /// surfaces here, before the run starts.
    ///
    /// # Arguments
    ///
    /// * `dimensions`: The solution dimensions describing the search space.
    /// * `evaluator`: The user-defined fitness evaluator.
    /// * `args`: The [`UNSGA3Arg`] arguments to customise the algorithm behaviour.
    ///
    /// returns: `Result<UNSGA3, OptError>`
    pub fn new(
        dimensions: Vec<SolutionDimension>,
        evaluator: Box<dyn FitnessEvaluator>,
        args: UNSGA3Arg,
    ) -> Result<Self, OptError> {
        let name = "U-NSGA-III".to_string();
        if dimensions.is_empty() {
            return Err(OptError::NoDimensions);
        }
        if args.max_generations < 1 {
            return Err(OptError::AlgorithmInit(
                name,
                "The number of generations must be at least 1".to_string(),
            ));
        }
        if let Some(threshold) = args.overfit_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(OptError::AlgorithmInit(
                    name,
                    format!(
                        "The overfit threshold ({threshold}) must be a number between 0 and 1"
                    ),
                ));
            }
        }

        let das_dennis =
            DasDennis::new(args.number_of_objectives, args.reference_point_increments)?;
        let reference_directions = das_dennis.get_weights();
        info!(
            "Created {} reference directions",
            reference_directions.len()
        );

        let population_size = match args.population_size {
            None => {
                // smallest multiple of 4 that covers every reference direction with one
                // expected candidate (Seada & Deb 2016, page 361)
                let mut size = reference_directions.len();
                while size % 4 != 0 {
                    size += 1;
                }
                info!(
                    "Population size not specified. Setting it to {} based on the number of \
                    reference directions",
                    size
                );
                size
            }
            Some(size) => {
                if size % 4 != 0 {
                    return Err(OptError::AlgorithmInit(
                        name,
                        format!("The population size ({size}) must be a multiple of 4"),
                    ));
                }
                if size <= reference_directions.len() {
                    return Err(OptError::AlgorithmInit(
                        name,
                        format!(
                            "The population size ({size}) must be larger than the number of \
                            reference directions ({})",
                            reference_directions.len()
                        ),
                    ));
                }
                size
            }
        };
        debug!("Population size set to {}", population_size);

        let crossover_options = args.crossover_operator_options.clone().unwrap_or_default();
        let crossover_operator = SimulatedBinaryCrossover::new(crossover_options)?;
        let mutation_operator =
            BoundedPolynomialMutation::new(population_size, args.max_generations)?;

        Ok(Self {
            dimensions,
            evaluator,
            number_of_objectives: args.number_of_objectives,
            max_generations: args.max_generations,
            population_size,
            reference_directions,
            population: vec![],
            training_pareto_front: vec![],
            validation_pareto_front: None,
            overfitting: vec![],
            currently_overfitted: false,
            overfit_threshold: args.overfit_threshold,
            generation: 0,
            selector_operator: NichingTournamentSelector,
            crossover_operator,
            mutation_operator,
            seeding: args.seeding,
            rng: get_rng(args.seed),
            inspector: None,
            start_time: Instant::now(),
            args,
        })
    }

    /// Set the per-generation inspector. The callback receives a read view of the optimiser
    /// state after every completed generation.
    ///
    /// # Arguments
    ///
    /// * `inspector`: The callback.
    pub fn set_inspector(&mut self, inspector: Inspector) {
        self.inspector = Some(inspector);
    }

    /// Return the algorithm name.
    ///
    /// return: `&str`
    pub fn name(&self) -> &'static str {
        "U-NSGA-III"
    }

    /// Return the number of completed generations.
    ///
    /// return: `usize`
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Return the current population.
    ///
    /// return: `&[Candidate]`
    pub fn population(&self) -> &[Candidate] {
        &self.population
    }

    /// Get the reference directions used in the evolution.
    ///
    /// return: `&[Vec<f64>]`
    pub fn reference_directions(&self) -> &[Vec<f64>] {
        &self.reference_directions
    }

    /// The training-dataset Pareto front of the current population.
    ///
    /// return: `&[Candidate]`
    pub fn training_pareto_front(&self) -> &[Candidate] {
        &self.training_pareto_front
    }

    /// The validation-dataset Pareto front, when the problem has validation fitnesses.
    ///
    /// return: `Option<&[Candidate]>`
    pub fn validation_pareto_front(&self) -> Option<&[Candidate]> {
        self.validation_pareto_front.as_deref()
    }

    /// The overfitting measure history, one entry per generation.
    ///
    /// return: `&[f64]`
    pub fn overfitting(&self) -> &[f64] {
        &self.overfitting
    }

    /// Whether the run terminated because the overfit threshold was reached.
    ///
    /// return: `bool`
    pub fn is_overfitted(&self) -> bool {
        self.currently_overfitted
    }

    /// The algorithm options.
    ///
    /// return: `UNSGA3Arg`
    pub fn algorithm_options(&self) -> UNSGA3Arg {
        self.args.clone()
    }

    /// Run the optimisation.
    ///
    /// returns: `Result<(usize, Vec<Candidate>, Option<Vec<Candidate>>), OptError>`. The number
    /// of completed generations, the training-dataset Pareto front and the validation-dataset
    /// Pareto front (when the problem has validation fitnesses).
    #[allow(clippy::type_complexity)]
    pub fn run(&mut self) -> Result<(usize, Vec<Candidate>, Option<Vec<Candidate>>), OptError> {
        info!("Starting {}", self.name());
        self.start_time = Instant::now();
        self.generation = 0;
        self.initialise();

        while self.generation < self.max_generations && !self.currently_overfitted {
            info!("Generation #{}", self.generation);

            // selection + crossover + mutation
            let offsprings = self.propagate()?;
            // R_t, the combined pool of parents and offsprings
            let mut pool = self.population.clone();
            pool.extend(offsprings);
            debug!("Combined pool size is {}", pool.len());

            self.assign_fitnesses(&pool)?;
            for candidate in &pool {
                candidate.activate_training_fitness();
            }
            self.population = self.select_population(&pool)?;

            // the selected population may contain non-Pareto members
            self.training_pareto_front = self
                .population
                .iter()
                .filter(|c| c.non_dominated_rank() == Some(0))
                .cloned()
                .collect();

            // when the problem has a validation dataset, track the validation Pareto front and
            // the overfitting of the training front
            if self.population[0].validation_fitness().is_some() {
                // the previous validation front re-enters the pool: as the population overfits,
                // its members stop coming from the current population
                let mut extended = self.population.clone();
                if let Some(previous_front) = &self.validation_pareto_front {
                    extended.extend(previous_front.iter().cloned());
                }
                for candidate in &extended {
                    candidate.activate_validation_fitness();
                }
                let selected = self.select_population(&extended)?;
                let validation_front: Vec<Candidate> = selected
                    .iter()
                    .filter(|c| c.non_dominated_rank() == Some(0))
                    .cloned()
                    .collect();

                let measure =
                    Self::measure_overfitting(&validation_front, &self.training_pareto_front);
                debug!("Overfitting measure is {}", measure);
                self.validation_pareto_front = Some(validation_front);
                self.overfitting.push(measure);

                if let Some(threshold) = self.overfit_threshold {
                    if measure >= threshold {
                        self.currently_overfitted = true;
                        warn!(
                            "Terminating the optimisation: the overfitting measure ({measure}) \
                            reached the threshold ({threshold})"
                        );
                    }
                }
            }

            self.generation += 1;
            info!(
                "Evolved generation #{} - Elapsed Time: {}",
                self.generation,
                self.elapsed_as_string()
            );

            if let Some(inspector) = self.inspector.as_mut() {
                inspector(&GenerationView {
                    generation: self.generation,
                    training_pareto_front: &self.training_pareto_front,
                    validation_pareto_front: self.validation_pareto_front.as_deref(),
                    overfitting: &self.overfitting,
                });
            }
        }

        info!("Took {}", self.elapsed_as_string());
        Ok((
            self.generation,
            self.training_pareto_front.clone(),
            self.validation_pareto_front.clone(),
        ))
    }

    /// Seed the initial population and bind every candidate to the dimensions.
    fn initialise(&mut self) {
        self.population = match self.seeding {
            PopulationSeeding::LatinHypercube => self.seed_latin_hypercube(),
            PopulationSeeding::UniformRandom => self.seed_uniform(),
        };
        for candidate in &self.population {
            candidate.bind(&self.dimensions);
        }
        info!(
            "Created initial population with {} candidates",
            self.population.len()
        );
    }

    /// Seed the population with a Latin-hypercube design: per dimension, the range is split in
    /// one stratum per candidate and a shuffled permutation assigns each candidate one draw from
    /// a distinct stratum.
    ///
    /// returns: `Vec<Candidate>`
    fn seed_latin_hypercube(&mut self) -> Vec<Candidate> {
        let size = self.population_size;
        let mut columns: Vec<Vec<f64>> = Vec::with_capacity(self.dimensions.len());
        for dimension in &self.dimensions {
            let mut strata: Vec<usize> = (0..size).collect();
            strata.shuffle(&mut self.rng);

            let (min_value, max_value) = dimension.bounds();
            let range = max_value - min_value;
            let column: Vec<f64> = strata
                .iter()
                .map(|stratum| {
                    let u: f64 = self.rng.gen_range(0.0..1.0);
                    min_value + (*stratum as f64 + u) / size as f64 * range
                })
                .collect();
            columns.push(column);
        }

        (0..size)
            .map(|c| Candidate::new(columns.iter().map(|column| column[c]).collect()))
            .collect()
    }

    /// Seed the population with uniform random draws within each dimension's bounds.
    ///
    /// returns: `Vec<Candidate>`
    fn seed_uniform(&mut self) -> Vec<Candidate> {
        (0..self.population_size)
            .map(|_| {
                let solution = self
                    .dimensions
                    .iter()
                    .map(|d| self.rng.gen_range(d.min_value()..=d.max_value()))
                    .collect();
                Candidate::new(solution)
            })
            .collect()
    }

    /// Create the offsprings for one generation: niching-based tournament selection, SBX
    /// crossover of consecutive selected pairs and generation-scheduled polynomial mutation.
    /// Children are bound to the dimensions before they are returned.
    ///
    /// returns: `Result<Vec<Candidate>, OptError>`. As many offsprings as the population size.
    fn propagate(&mut self) -> Result<Vec<Candidate>, OptError> {
        debug!("Generating offsprings (selection + crossover + mutation)");
        let selected = self
            .selector_operator
            .select(&self.population, &mut self.rng)?;

        let mut offsprings = Vec::with_capacity(self.population_size);
        for parents in selected.chunks_exact(2) {
            let children = self.crossover_operator.generate_offsprings(
                &parents[0],
                &parents[1],
                &self.dimensions,
                &mut self.rng,
            )?;
            for child in [children.child1, children.child2] {
                self.mutation_operator.mutate_offspring(
                    &child,
                    &self.dimensions,
                    self.generation,
                    &mut self.rng,
                )?;
                child.bind(&self.dimensions);
                offsprings.push(child);
            }
        }
        Ok(offsprings)
    }

    /// Assign fitnesses to the candidates that have not been evaluated yet. The user-defined
    /// evaluator receives only the unevaluated candidates; the returned vectors must match
    /// their order and the declared number of objectives.
    ///
    /// # Arguments
    ///
    /// * `pool`: The candidates entering selection.
    ///
    /// return: `Result<(), OptError>`
    fn assign_fitnesses(&mut self, pool: &[Candidate]) -> Result<(), OptError> {
        let unevaluated: Vec<Candidate> = pool
            .iter()
            .filter(|c| !c.is_evaluated())
            .cloned()
            .collect();
        if unevaluated.is_empty() {
            return Ok(());
        }
        debug!("Evaluating {} candidates", unevaluated.len());

        let results = self
            .evaluator
            .evaluate(&unevaluated, self.generation)
            .map_err(|e| OptError::Evaluation(e.to_string()))?;

        if results.training.len() != unevaluated.len() {
            return Err(OptError::FitnessCount {
                expected: unevaluated.len(),
                actual: results.training.len(),
            });
        }
        if let Some(validation) = &results.validation {
            if validation.len() != unevaluated.len() {
                return Err(OptError::FitnessCount {
                    expected: unevaluated.len(),
                    actual: validation.len(),
                });
            }
        }

        for (candidate, values) in unevaluated.iter().zip(&results.training) {
            if values.len() != self.number_of_objectives {
                return Err(OptError::FitnessArity {
                    expected: self.number_of_objectives,
                    actual: values.len(),
                });
            }
            candidate.set_training_fitness(Fitness::new(values));
        }
        if let Some(validation) = &results.validation {
            for (candidate, values) in unevaluated.iter().zip(validation) {
                if values.len() != self.number_of_objectives {
                    return Err(OptError::FitnessArity {
                        expected: self.number_of_objectives,
                        actual: values.len(),
                    });
                }
                candidate.set_validation_fitness(Fitness::new(values));
            }
        }
        Ok(())
    }

    /// Select the next population from the pool using the active fitnesses: non-dominated sort,
    /// front accumulation, normalisation and association over the accumulated set and niching
    /// over the last front. When the pool does not exceed the population size it is returned
    /// unchanged.
    ///
    /// # Arguments
    ///
    /// * `pool`: The candidates to select from.
    ///
    /// returns: `Result<Vec<Candidate>, OptError>`
    fn select_population(&mut self, pool: &[Candidate]) -> Result<Vec<Candidate>, OptError> {
        let name = "U-NSGA-III".to_string();
        let fronts = non_dominated_sort(pool);
        debug!("Collected {} fronts", fronts.len());

        // fill S_t front by front until the population size is covered
        let mut accumulated: Vec<Candidate> = vec![];
        let mut front_index = 0;
        while accumulated.len() < self.population_size && front_index < fronts.len() {
            accumulated.extend(fronts[front_index].iter().cloned());
            front_index += 1;
        }
        if accumulated.len() <= self.population_size {
            return Ok(accumulated);
        }

        // P_{t+1}, the fronts that fit entirely, and F_l, the last accumulated front
        let mut selected: Vec<Candidate> = fronts[..front_index - 1].concat();
        let mut last_front: Vec<Candidate> = fronts[front_index - 1].clone();
        let missing_item_count = self.population_size - selected.len();
        debug!("{missing_item_count} candidates must be added from the last front");

        Normalise::new(&accumulated)?.calculate()?;
        AssociateToReferenceDirection::new(&accumulated, &self.reference_directions)?
            .calculate()?;

        // niche counts of the already-selected candidates, one entry per reference direction
        let mut rho: HashMap<usize, usize> =
            (0..self.reference_directions.len()).map(|j| (j, 0)).collect();
        for candidate in &selected {
            let direction = candidate.closest_reference_direction().ok_or_else(|| {
                OptError::AlgorithmRun(
                    name.clone(),
                    "A selected candidate has no associated reference direction".to_string(),
                )
            })?;
            *rho.get_mut(&direction).ok_or_else(|| {
                OptError::AlgorithmRun(
                    name.clone(),
                    format!("The reference direction index {direction} does not exist"),
                )
            })? += 1;
        }

        Niching::new(
            &mut selected,
            &mut last_front,
            missing_item_count,
            &mut rho,
            self.rng.as_mut(),
        )?
        .calculate()?;

        Ok(selected)
    }

    /// Measure how much the training front is overfitted to the training dataset: the fraction
    /// of training-front members that do not sit on the leading front when training and
    /// validation fronts compete on validation fitnesses. 0 means the whole training front
    /// generalises; 1 means none of it does.
    ///
    /// # Arguments
    ///
    /// * `validation_front`: The validation-dataset Pareto front.
    /// * `training_front`: The training-dataset Pareto front.
    ///
    /// return: `f64`
    fn measure_overfitting(validation_front: &[Candidate], training_front: &[Candidate]) -> f64 {
        let combined: Vec<Candidate> = validation_front
            .iter()
            .chain(training_front)
            .cloned()
            .collect();
        for candidate in &combined {
            candidate.activate_validation_fitness();
        }

        let fronts = non_dominated_sort(&combined);
        let leading = &fronts[0];
        let included = training_front
            .iter()
            .filter(|t| leading.iter().any(|l| l.ptr_eq(t)))
            .count();
        1.0 - included as f64 / training_front.len() as f64
    }

    /// Format the elapsed time since the run started.
    ///
    /// return: `String`
    fn elapsed_as_string(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        format!(
            "{:0>2} hours, {:0>2} minutes and {:0>2} seconds",
            (seconds / 60) / 60,
            (seconds / 60) % 60,
            seconds % 60
        )
    }

    /// Save the fronts of the current generation to a JSON file named
    /// `{prefix}_{algorithm}_gen{generation}.json` in the given folder. This returns an error
    /// if the destination folder does not exist or the file cannot be written.
    ///
    /// # Arguments
    ///
    /// * `destination`: The folder where to save the file.
    /// * `file_prefix`: A prefix prepended to the file name. Defaults to `Results`.
    ///
    /// return: `Result<(), OptError>`
    pub fn save_to_json(
        &self,
        destination: &Path,
        file_prefix: Option<&str>,
    ) -> Result<(), OptError> {
        if !destination.exists() {
            return Err(OptError::AlgorithmExport(format!(
                "The destination folder '{:?}' does not exist",
                destination
            )));
        }
        let export = ResultsExport {
            algorithm: self.name().to_string(),
            generations: self.generation,
            exported_on: Utc::now(),
            overfitting: self.overfitting.clone(),
            training_front: self
                .training_pareto_front
                .iter()
                .map(CandidateExport::from)
                .collect(),
            validation_front: self
                .validation_pareto_front
                .as_ref()
                .map(|front| front.iter().map(CandidateExport::from).collect()),
        };
        let data = serde_json::to_string_pretty(&export).map_err(|e| {
            OptError::AlgorithmExport(format!(
                "The following error occurred while converting the results: {e}"
            ))
        })?;

        let file_prefix = file_prefix.unwrap_or("Results");
        let file = destination.join(format!(
            "{}_{}_gen{}.json",
            file_prefix,
            self.name(),
            self.generation
        ));
        info!("Saving JSON file {:?}", file);
        fs::write(file, data).map_err(|e| {
            OptError::AlgorithmExport(format!(
                "The following error occurred while writing the JSON file: {e}"
            ))
        })
    }
}

/// Serialised data of one candidate.
#[derive(Serialize, Deserialize, Debug)]
pub struct CandidateExport {
    /// The solution values.
    pub solution: Vec<f64>,
    /// The training-dataset fitness.
    pub training_fitness: Vec<f64>,
    /// The validation-dataset fitness, when assigned.
    pub validation_fitness: Option<Vec<f64>>,
    /// The Pareto front rank; 0 is the leading front.
    pub non_dominated_rank: Option<usize>,
}

impl From<&Candidate> for CandidateExport {
    fn from(candidate: &Candidate) -> Self {
        Self {
            solution: candidate.solution(),
            training_fitness: candidate.training_fitness().values(),
            validation_fitness: candidate.validation_fitness().map(|f| f.values()),
            non_dominated_rank: candidate.non_dominated_rank(),
        }
    }
}

/// The struct used to export the results of a run.
#[derive(Serialize, Deserialize, Debug)]
pub struct ResultsExport {
    /// The algorithm name.
    pub algorithm: String,
    /// The number of completed generations.
    pub generations: usize,
    /// The time the export was created at.
    pub exported_on: DateTime<Utc>,
    /// The overfitting measure history.
    pub overfitting: Vec<f64>,
    /// The training-dataset Pareto front.
    pub training_front: Vec<CandidateExport>,
    /// The validation-dataset Pareto front, when the problem has validation fitnesses.
    pub validation_front: Option<Vec<CandidateExport>>,
}
