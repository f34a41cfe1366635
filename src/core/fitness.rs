use std::fmt;
use std::fmt::{Display, Formatter};

use ordered_float::OrderedFloat;

/// A point in fitness space. The vector is immutable once built and hashable, so that identical
/// fitnesses can key the front table during non-dominated sorting. Ordering is lexicographic.
///
/// All objectives are minimised. Maximisation problems must be converted by the caller by
/// negating (or inverting) the affected objective values.
///
/// Note that Pareto domination is not symmetric: if `a` does not dominate `b`, that does not mean
/// `b` dominates `a`. Two fitnesses can be Pareto-equivalent, either because they are the same
/// point in objective space or because each is better on a different objective.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fitness(Vec<OrderedFloat<f64>>);

impl Fitness {
    /// Create a fitness from raw objective values.
    ///
    /// # Arguments
    ///
    /// * `values`: The objective values, one per objective.
    ///
    /// returns: `Fitness`
    pub fn new(values: &[f64]) -> Self {
        Self(values.iter().map(|v| OrderedFloat(*v)).collect())
    }

    /// Create an empty fitness. An empty fitness marks a candidate that has not been evaluated
    /// yet.
    ///
    /// returns: `Fitness`
    pub fn empty() -> Self {
        Self::default()
    }

    /// The number of objectives in the fitness.
    ///
    /// return: `usize`
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the fitness holds no objective values (i.e. the candidate is unevaluated).
    ///
    /// return: `bool`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get one objective value.
    ///
    /// # Arguments
    ///
    /// * `index`: The objective index.
    ///
    /// return: `f64`
    pub fn value(&self, index: usize) -> f64 {
        self.0[index].into_inner()
    }

    /// Get all the objective values.
    ///
    /// return: `Vec<f64>`
    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(|v| v.into_inner()).collect()
    }

    /// Borrow the first `number_of_objectives` values. Slices of the same length compare
    /// lexicographically, which the sorting sweeps rely on.
    ///
    /// # Arguments
    ///
    /// * `number_of_objectives`: The length of the prefix.
    ///
    /// return: `&[OrderedFloat<f64>]`
    pub(crate) fn prefix(&self, number_of_objectives: usize) -> &[OrderedFloat<f64>] {
        &self.0[..number_of_objectives]
    }

    /// Whether this fitness Pareto-dominates `other`. To dominate, this fitness must be no worse
    /// than `other` on every objective and strictly better on at least one.
    ///
    /// # Arguments
    ///
    /// * `other`: The fitness to compare against.
    ///
    /// return: `bool`
    pub fn dominates(&self, other: &Fitness) -> bool {
        self.dominates_on(other, self.len())
    }

    /// Whether this fitness Pareto-dominates `other` when only the first `number_of_objectives`
    /// objectives are considered.
    ///
    /// # Arguments
    ///
    /// * `other`: The fitness to compare against.
    /// * `number_of_objectives`: The number of leading objectives to compare.
    ///
    /// return: `bool`
    pub fn dominates_on(&self, other: &Fitness, number_of_objectives: usize) -> bool {
        let mut strictly_better = false;
        for (s, o) in self.0[..number_of_objectives]
            .iter()
            .zip(&other.0[..number_of_objectives])
        {
            if o < s {
                // breaks the "no worse" clause
                return false;
            }
            if s < o {
                strictly_better = true;
            }
        }
        strictly_better
    }
}

impl Display for Fitness {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.0.iter().map(|v| format!("{:8.4}", v)).collect();
        write!(f, "[{}]", values.join(" "))
    }
}

/// Selects which of the two fitness vectors stored on a candidate drives dominance, sorting and
/// normalisation. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActiveFitness {
    /// Use the training-dataset fitness.
    #[default]
    Training,
    /// Use the validation-dataset fitness.
    Validation,
}
