pub use candidate::Candidate;
pub use data::DataValue;
pub use dimension::SolutionDimension;
pub use error::OptError;
pub use fitness::{ActiveFitness, Fitness};

mod candidate;
mod data;
mod dimension;
mod error;
mod fitness;
pub(crate) mod utils;
