use thiserror::Error;

#[derive(Error, Debug)]
/// Errors raised by the library.
pub enum OptError {
    #[error("The following error occurred: {0}")]
    Generic(String),
    #[error("You must provide at least one solution dimension to define a search space")]
    NoDimensions,
    #[error("The dimension lower bound ({0}) must be strictly smaller than the upper bound ({1})")]
    InvalidBounds(f64, f64),
    #[error("The dimension granularity ({0}) must be a positive number")]
    InvalidGranularity(f64),
    #[error("The data named '{0}' is not set")]
    WrongDataName(String),
    #[error("The data type is not {0}")]
    WrongDataType(String),
    #[error("An error occurred in the selector operator '{0}': {1}")]
    SelectorOperator(String, String),
    #[error("An error occurred in the crossover operator '{0}': {1}")]
    CrossoverOperator(String, String),
    #[error("An error occurred in the mutation operator '{0}': {1}")]
    MutationOperator(String, String),
    #[error("An error occurred when evaluating a solution: {0}")]
    Evaluation(String),
    #[error("The fitness vector has {actual} objectives but the problem declares {expected}")]
    FitnessArity { expected: usize, actual: usize },
    #[error("The evaluator returned {actual} fitness vectors for {expected} candidates")]
    FitnessCount { expected: usize, actual: usize },
    #[error("An error occurred when initialising {0}: {1}")]
    AlgorithmInit(String, String),
    #[error("An error occurred when running {0}: {1}")]
    AlgorithmRun(String, String),
    #[error("An error occurred when exporting the algorithm data: {0}")]
    AlgorithmExport(String),
}
