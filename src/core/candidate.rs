use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::core::{ActiveFitness, DataValue, Fitness, OptError, SolutionDimension};

/// The per-candidate state behind a [`Candidate`] handle.
#[derive(Debug, Default)]
struct CandidateState {
    /// Point in problem space, one value per solution dimension.
    solution: Vec<f64>,
    /// The training-dataset fitness. Empty until the candidate is evaluated.
    training_fitness: Fitness,
    /// The validation-dataset fitness, when the problem carries a validation dataset.
    validation_fitness: Option<Fitness>,
    /// Which of the two fitness vectors drives dominance and normalisation.
    active_fitness: ActiveFitness,
    /// Fitness normalised against the adaptive hyperplane. Recomputed every selection.
    normalised_fitness: Option<Fitness>,
    /// Index of the nearest reference direction, set by the associator.
    closest_reference_direction: Option<usize>,
    /// Perpendicular distance to the nearest reference direction.
    closest_reference_direction_distance: Option<f64>,
    /// Pareto front rank; 0 is the leading front. Set by the non-dominated sort.
    non_dominated_rank: Option<usize>,
    /// Problem-specific data attached by the caller.
    data_store: HashMap<String, DataValue>,
}

/// One solution of the optimisation problem, together with its fitnesses and the bookkeeping
/// written by the selection machinery (rank, reference-direction association, normalised
/// fitness).
///
/// A `Candidate` is a cheap shared handle: cloning it clones the handle, not the state, so the
/// ranks and associations written during selection stay visible through every copy, and fronts
/// can be intersected by identity with [`Candidate::ptr_eq`]. To duplicate a candidate's solution
/// into a fresh, independent candidate use [`Candidate::clone_solution`].
#[derive(Clone, Debug)]
pub struct Candidate(Rc<RefCell<CandidateState>>);

impl Candidate {
    /// Create a new candidate from a solution vector. All fitnesses and derived state start
    /// unset.
    ///
    /// # Arguments
    ///
    /// * `solution`: The solution values, one per dimension.
    ///
    /// returns: `Candidate`
    pub fn new(solution: Vec<f64>) -> Self {
        Self(Rc::new(RefCell::new(CandidateState {
            solution,
            ..Default::default()
        })))
    }

    /// Create a candidate that carries a training fitness only. External harnesses use this to
    /// rank pre-computed objective vectors with [`crate::non_dominated_sort`] without running the
    /// optimiser.
    ///
    /// # Arguments
    ///
    /// * `objective_values`: The objective values (to be minimised).
    ///
    /// returns: `Candidate`
    pub fn with_training_fitness(objective_values: &[f64]) -> Self {
        let candidate = Self::new(vec![]);
        candidate.set_training_fitness(Fitness::new(objective_values));
        candidate
    }

    /// Clone the solution into a new candidate. Only the solution is copied; fitnesses, rank,
    /// association and normalised values are all reset and must be re-calculated.
    ///
    /// return: `Candidate`
    pub fn clone_solution(&self) -> Self {
        Self::new(self.0.borrow().solution.clone())
    }

    /// Whether two handles refer to the same candidate.
    ///
    /// # Arguments
    ///
    /// * `other`: The other candidate handle.
    ///
    /// return: `bool`
    pub fn ptr_eq(&self, other: &Candidate) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Get a copy of the solution vector.
    ///
    /// return: `Vec<f64>`
    pub fn solution(&self) -> Vec<f64> {
        self.0.borrow().solution.clone()
    }

    /// Get one solution coordinate.
    ///
    /// # Arguments
    ///
    /// * `index`: The dimension index.
    ///
    /// return: `f64`
    pub fn solution_value(&self, index: usize) -> f64 {
        self.0.borrow().solution[index]
    }

    /// Overwrite one solution coordinate.
    ///
    /// # Arguments
    ///
    /// * `index`: The dimension index.
    /// * `value`: The new coordinate value.
    pub fn set_solution_value(&self, index: usize, value: f64) {
        self.0.borrow_mut().solution[index] = value;
    }

    /// Bind every solution coordinate to its dimension (clamp to the bounds, snap to the
    /// granularity grid).
    ///
    /// # Arguments
    ///
    /// * `dimensions`: The solution dimensions, in coordinate order.
    pub fn bind(&self, dimensions: &[SolutionDimension]) {
        let mut state = self.0.borrow_mut();
        for (value, dimension) in state.solution.iter_mut().zip(dimensions) {
            *value = dimension.bind(*value);
        }
    }

    /// The fitness currently driving dominance and normalisation. When the validation fitness is
    /// active but not assigned, this returns an empty fitness.
    ///
    /// return: `Fitness`
    pub fn fitness(&self) -> Fitness {
        let state = self.0.borrow();
        match state.active_fitness {
            ActiveFitness::Training => state.training_fitness.clone(),
            ActiveFitness::Validation => state
                .validation_fitness
                .clone()
                .unwrap_or_else(Fitness::empty),
        }
    }

    /// The training-dataset fitness. Empty if the candidate has not been evaluated.
    ///
    /// return: `Fitness`
    pub fn training_fitness(&self) -> Fitness {
        self.0.borrow().training_fitness.clone()
    }

    /// The validation-dataset fitness, when assigned.
    ///
    /// return: `Option<Fitness>`
    pub fn validation_fitness(&self) -> Option<Fitness> {
        self.0.borrow().validation_fitness.clone()
    }

    /// Assign the training fitness.
    ///
    /// # Arguments
    ///
    /// * `fitness`: The evaluated fitness.
    pub fn set_training_fitness(&self, fitness: Fitness) {
        self.0.borrow_mut().training_fitness = fitness;
    }

    /// Assign the validation fitness.
    ///
    /// # Arguments
    ///
    /// * `fitness`: The evaluated fitness.
    pub fn set_validation_fitness(&self, fitness: Fitness) {
        self.0.borrow_mut().validation_fitness = Some(fitness);
    }

    /// Whether the candidate has been evaluated. An empty training fitness signals that the
    /// evaluator has not seen this candidate yet.
    ///
    /// return: `bool`
    pub fn is_evaluated(&self) -> bool {
        !self.0.borrow().training_fitness.is_empty()
    }

    /// Make the training fitness drive dominance and normalisation. Invalidates the normalised
    /// fitness.
    pub fn activate_training_fitness(&self) {
        let mut state = self.0.borrow_mut();
        state.active_fitness = ActiveFitness::Training;
        state.normalised_fitness = None;
    }

    /// Make the validation fitness drive dominance and normalisation. Invalidates the normalised
    /// fitness.
    pub fn activate_validation_fitness(&self) {
        let mut state = self.0.borrow_mut();
        state.active_fitness = ActiveFitness::Validation;
        state.normalised_fitness = None;
    }

    /// The fitness vector normalised against the adaptive hyperplane, when set.
    ///
    /// return: `Option<Fitness>`
    pub fn normalised_fitness(&self) -> Option<Fitness> {
        self.0.borrow().normalised_fitness.clone()
    }

    /// Store the normalised fitness.
    ///
    /// # Arguments
    ///
    /// * `fitness`: The normalised fitness.
    pub fn set_normalised_fitness(&self, fitness: Fitness) {
        self.0.borrow_mut().normalised_fitness = Some(fitness);
    }

    /// The index of the nearest reference direction, when the associator has run.
    ///
    /// return: `Option<usize>`
    pub fn closest_reference_direction(&self) -> Option<usize> {
        self.0.borrow().closest_reference_direction
    }

    /// The perpendicular distance to the nearest reference direction, when the associator has
    /// run.
    ///
    /// return: `Option<f64>`
    pub fn closest_reference_direction_distance(&self) -> Option<f64> {
        self.0.borrow().closest_reference_direction_distance
    }

    /// Associate the candidate with a reference direction.
    ///
    /// # Arguments
    ///
    /// * `direction_index`: The index of the nearest reference direction.
    /// * `distance`: The perpendicular distance to it.
    pub fn set_association(&self, direction_index: usize, distance: f64) {
        let mut state = self.0.borrow_mut();
        state.closest_reference_direction = Some(direction_index);
        state.closest_reference_direction_distance = Some(distance);
    }

    /// The Pareto front rank; 0 is the leading front. `None` until the candidate has been
    /// sorted.
    ///
    /// return: `Option<usize>`
    pub fn non_dominated_rank(&self) -> Option<usize> {
        self.0.borrow().non_dominated_rank
    }

    /// Set the Pareto front rank.
    ///
    /// # Arguments
    ///
    /// * `rank`: The front index; 0 is the leading front.
    pub fn set_non_dominated_rank(&self, rank: usize) {
        self.0.borrow_mut().non_dominated_rank = Some(rank);
    }

    /// Store custom data on the candidate.
    ///
    /// # Arguments
    ///
    /// * `name`: The name of the data.
    /// * `value`: The value.
    pub fn set_data(&self, name: &str, value: DataValue) {
        self.0.borrow_mut().data_store.insert(name.to_string(), value);
    }

    /// Get a copy of the custom data set on the candidate. This returns an error if no custom
    /// data with the provided `name` is set.
    ///
    /// # Arguments
    ///
    /// * `name`: The name of the data.
    ///
    /// returns: `Result<DataValue, OptError>`
    pub fn get_data(&self, name: &str) -> Result<DataValue, OptError> {
        self.0
            .borrow()
            .data_store
            .get(name)
            .cloned()
            .ok_or(OptError::WrongDataName(name.to_string()))
    }
}

impl Display for Candidate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = self.0.borrow();
        write!(f, "Candidate. Training: {}", state.training_fitness)?;
        if let Some(validation) = &state.validation_fitness {
            write!(f, "; validation: {}", validation)?;
        }
        let solution: Vec<String> = state
            .solution
            .iter()
            .map(|v| format!("{:6.3}", v))
            .collect();
        write!(f, "; solution: [{}]", solution.join(" "))
    }
}

#[cfg(test)]
mod test {
    use crate::core::{Candidate, Fitness, SolutionDimension};

    #[test]
    fn test_clone_shares_state() {
        let a = Candidate::new(vec![0.5]);
        let b = a.clone();
        a.set_non_dominated_rank(3);
        assert_eq!(b.non_dominated_rank(), Some(3));
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn test_clone_solution_resets_derived_state() {
        let a = Candidate::new(vec![0.5, 0.7]);
        a.set_training_fitness(Fitness::new(&[1.0, 2.0]));
        a.set_non_dominated_rank(1);
        a.set_association(4, 0.2);

        let b = a.clone_solution();
        assert!(!a.ptr_eq(&b));
        assert_eq!(b.solution(), vec![0.5, 0.7]);
        assert!(!b.is_evaluated());
        assert_eq!(b.non_dominated_rank(), None);
        assert_eq!(b.closest_reference_direction(), None);
    }

    #[test]
    fn test_active_fitness_switch() {
        let a = Candidate::new(vec![0.0]);
        a.set_training_fitness(Fitness::new(&[1.0]));
        a.set_validation_fitness(Fitness::new(&[2.0]));
        a.set_normalised_fitness(Fitness::new(&[0.1]));

        assert_eq!(a.fitness().values(), vec![1.0]);
        a.activate_validation_fitness();
        assert_eq!(a.fitness().values(), vec![2.0]);
        // switching the active fitness invalidates the normalised vector
        assert!(a.normalised_fitness().is_none());
        a.activate_training_fitness();
        assert_eq!(a.fitness().values(), vec![1.0]);
    }

    #[test]
    fn test_bind() {
        let dimensions = vec![
            SolutionDimension::new(0.0, 1.0).unwrap(),
            SolutionDimension::new(0.0, 10.0)
                .unwrap()
                .with_granularity(0.5)
                .unwrap(),
        ];
        let a = Candidate::new(vec![1.7, 3.3]);
        a.bind(&dimensions);
        assert_eq!(a.solution(), vec![1.0, 3.5]);
    }
}
