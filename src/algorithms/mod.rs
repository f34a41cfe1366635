pub use unsga3::{
    CandidateExport, EvaluationResult, FitnessEvaluator, GenerationView, Inspector,
    PopulationSeeding, ResultsExport, UNSGA3, UNSGA3Arg,
};

mod unsga3;
