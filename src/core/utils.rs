use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[cfg(test)]
use crate::core::Candidate;

/// Get the random number generator. If no seed is provided, the generator starts from a default
/// state; pass a seed to reproduce a run.
///
/// # Arguments
///
/// * `seed`: The optional seed number.
///
/// returns: `Box<dyn RngCore>`
pub(crate) fn get_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    let rng = match seed {
        None => ChaCha8Rng::from_entropy(),
        Some(s) => ChaCha8Rng::seed_from_u64(s),
    };
    Box::new(rng)
}

/// Build candidates carrying the given objective vectors as training fitnesses. This is only
/// used in tests.
///
/// # Arguments
///
/// * `objective_values`: One objective vector per candidate.
///
/// returns: `Vec<Candidate>`
#[cfg(test)]
pub(crate) fn candidates_from_objective_values(objective_values: &[Vec<f64>]) -> Vec<Candidate> {
    objective_values
        .iter()
        .map(|values| Candidate::with_training_fitness(values))
        .collect()
}
