use std::collections::BTreeMap;

use crate::core::{Candidate, Fitness};
use crate::utils::median;

/// Sort candidates into Pareto non-dominated fronts using the generalized reduced run-time
/// complexity algorithm presented by Fortin et al. (2013):
///
/// > F.-A. Fortin, S. Grenier and M. Parizeau, "Generalizing the improved run-time complexity
/// > algorithm for non-dominated sorting", Proceedings of the 15th Annual Conference on Genetic
/// > and Evolutionary Computation (GECCO 2013), 615-622.
/// > <https://doi.org/10.1145/2463372.2463454>
///
/// Sorting runs on the distinct fitness tuples of the candidates' active fitnesses: candidates
/// sharing an identical fitness always land on the same front. The fronts partition the input,
/// the leading front comes first, distinct tuples appear in lexicographic order within a front
/// and candidates sharing a tuple keep their input order. The function also writes each
/// candidate's `non_dominated_rank`, which equals its front index.
///
/// # Arguments
///
/// * `population`: The candidates to sort by dominance. An empty input yields an empty front
///   list.
///
/// returns: `Vec<Vec<Candidate>>`
pub fn non_dominated_sort(population: &[Candidate]) -> Vec<Vec<Candidate>> {
    if population.is_empty() {
        return vec![];
    }

    // group candidates by identical fitness; the map key order is lexicographic, which is the
    // tuple order the recursive helpers expect
    let mut fitness_candidates_map: BTreeMap<Fitness, Vec<Candidate>> = BTreeMap::new();
    for candidate in population {
        fitness_candidates_map
            .entry(candidate.fitness())
            .or_default()
            .push(candidate.clone());
    }

    let number_of_objectives = population[0].fitness().len();
    // intern the distinct tuples; helpers pass index lists around one shared front-id table
    let mut ctx = SortContext {
        fitnesses: fitness_candidates_map.keys().cloned().collect(),
        front_ids: vec![0; fitness_candidates_map.len()],
    };
    let ids: Vec<usize> = (0..ctx.fitnesses.len()).collect();

    if number_of_objectives > 1 {
        ctx.helper_a(&ids, number_of_objectives);
    } else {
        // a single objective is easy: the k-th distinct tuple in sorted order gets front k
        for id in ids {
            ctx.front_ids[id] = id;
        }
    }

    // materialise the fronts and restore the candidates sharing each tuple
    let number_of_fronts = ctx.front_ids.iter().max().unwrap() + 1;
    let mut fronts: Vec<Vec<Candidate>> = vec![vec![]; number_of_fronts];
    for (id, fitness) in ctx.fitnesses.iter().enumerate() {
        let front_id = ctx.front_ids[id];
        for candidate in &fitness_candidates_map[fitness] {
            candidate.set_non_dominated_rank(front_id);
            fronts[front_id].push(candidate.clone());
        }
    }
    fronts
}

/// The interned fitness tuples and the front-id table shared by the recursive helpers. Front
/// ids start at zero (the leading front) and are only ever raised, by max-merging the id a
/// dominating tuple imposes.
struct SortContext {
    /// The distinct fitness tuples, sorted lexicographically.
    fitnesses: Vec<Fitness>,
    /// The front id assigned to each tuple, indexed like `fitnesses`.
    front_ids: Vec<usize>,
}

impl SortContext {
    fn value(&self, id: usize, objective: usize) -> f64 {
        self.fitnesses[id].value(objective)
    }

    /// Raise the front id of `id` to at least `minimum`.
    fn raise_front_id(&mut self, id: usize, minimum: usize) {
        if self.front_ids[id] < minimum {
            self.front_ids[id] = minimum;
        }
    }

    /// Create a non-dominated sorting of the tuples on their first `m` objectives. Used
    /// recursively.
    fn helper_a(&mut self, fitnesses: &[usize], m: usize) {
        if fitnesses.len() < 2 {
            return;
        }
        if fitnesses.len() == 2 {
            let (f1, f2) = (fitnesses[0], fitnesses[1]);
            if self.fitnesses[f1].dominates_on(&self.fitnesses[f2], m) {
                // f2 either already holds a higher front id than f1, or it gets f1's id + 1
                self.raise_front_id(f2, self.front_ids[f1] + 1);
            }
        } else if m == 2 {
            self.sweep_a(fitnesses);
        } else if fitnesses
            .iter()
            .all(|&f| self.value(f, m - 1) == self.value(fitnesses[0], m - 1))
        {
            // every tuple shares the same value on the last objective; it cannot discriminate
            self.helper_a(fitnesses, m - 1);
        } else {
            // partition around the median of the last objective and recurse on the halves
            let (low, high) = self.split_a(fitnesses, m - 1);
            self.helper_a(&low, m);
            self.helper_b(&low, &high, m - 1);
            self.helper_a(&high, m);
        }
    }

    /// Two-objective sweep. The tuples arrive sorted on the first objective; front ids are
    /// raised where second-objective values are inferior. `T` holds at most one tuple per front
    /// id.
    fn sweep_a(&mut self, fitnesses: &[usize]) {
        let mut t = vec![fitnesses[0]];
        for &s in &fitnesses[1..] {
            // tuples in T with a better or equal second objective dominate s
            let r = t
                .iter()
                .filter(|&&ti| self.value(ti, 1) <= self.value(s, 1))
                .map(|&ti| self.front_ids[ti])
                .max();
            if let Some(r) = r {
                self.raise_front_id(s, r + 1);
            }
            // s's front id is settled; drop every tuple sharing it
            t.retain(|&ti| self.front_ids[ti] != self.front_ids[s]);
            t.push(s);
        }
    }

    /// Partition the tuples in two lists around the median value of the given objective. Tuples
    /// holding the median value all go to one of the two lists, whichever best balances the list
    /// lengths; both placements preserve the incoming lexicographic order, and the low-side
    /// placement wins ties.
    fn split_a(&self, fitnesses: &[usize], objective: usize) -> (Vec<usize>, Vec<usize>) {
        let values: Vec<f64> = fitnesses.iter().map(|&f| self.value(f, objective)).collect();
        let median_value = median(&values);

        let mut low_a = vec![];
        let mut high_a = vec![];
        let mut low_b = vec![];
        let mut high_b = vec![];
        for &f in fitnesses {
            let value = self.value(f, objective);
            if value < median_value {
                low_a.push(f);
                low_b.push(f);
            } else if value > median_value {
                high_a.push(f);
                high_b.push(f);
            } else {
                // holds the median value
                low_a.push(f);
                high_b.push(f);
            }
        }

        let difference_a = (low_a.len() as isize - high_a.len() as isize).abs();
        let difference_b = (low_b.len() as isize - high_b.len() as isize).abs();
        if difference_a <= difference_b {
            (low_a, high_a)
        } else {
            (low_b, high_b)
        }
    }

    /// Assign front ids across two already-separated sets, considering the first `m` objectives.
    /// Prior recursion established that `low`'s tuples precede `high`'s lexicographically on the
    /// unused tail objectives, so only tuples in `high` can have their id raised.
    fn helper_b(&mut self, low: &[usize], high: &[usize], m: usize) {
        if low.is_empty() || high.is_empty() {
            return;
        }
        let obj_index = m - 1;
        if low.len() == 1 || high.len() == 1 {
            for &l in low {
                for &h in high {
                    // equality counts: earlier calls established l to dominate h on every
                    // objective beyond the first m
                    if self.fitnesses[l].dominates_on(&self.fitnesses[h], m)
                        || self.fitnesses[l].prefix(m) == self.fitnesses[h].prefix(m)
                    {
                        self.raise_front_id(h, self.front_ids[l] + 1);
                    }
                }
            }
        } else if m == 2 {
            self.sweep_b(low, high);
        } else {
            let low_values: Vec<f64> = low.iter().map(|&l| self.value(l, obj_index)).collect();
            let high_values: Vec<f64> = high.iter().map(|&h| self.value(h, obj_index)).collect();
            let low_max = low_values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let low_min = low_values.iter().cloned().fold(f64::INFINITY, f64::min);
            let high_max = high_values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let high_min = high_values.iter().cloned().fold(f64::INFINITY, f64::min);

            if low_max <= high_min {
                // the last objective cannot discriminate any pair across the two sets
                self.helper_b(low, high, m - 1);
            } else if low_min <= high_max {
                // the value ranges overlap; partition both sides around a common pivot
                let (low1, low2, high1, high2) = self.split_b(low, high, obj_index);
                self.helper_b(&low1, &high1, m);
                self.helper_b(&low1, &high2, m - 1);
                self.helper_b(&low2, &high2, m);
            }
        }
    }

    /// The same logic as `split_a`, operating on the two lists simultaneously around a common
    /// pivot drawn from the larger list.
    fn split_b(
        &self,
        low: &[usize],
        high: &[usize],
        objective: usize,
    ) -> (Vec<usize>, Vec<usize>, Vec<usize>, Vec<usize>) {
        let pivot = if low.len() > high.len() {
            let values: Vec<f64> = low.iter().map(|&l| self.value(l, objective)).collect();
            median(&values)
        } else {
            let values: Vec<f64> = high.iter().map(|&h| self.value(h, objective)).collect();
            median(&values)
        };

        let partition = |list: &[usize], pivot_to_first: bool| {
            let mut first = vec![];
            let mut second = vec![];
            for &f in list {
                let value = self.value(f, objective);
                if value < pivot {
                    first.push(f);
                } else if value > pivot {
                    second.push(f);
                } else if pivot_to_first {
                    first.push(f);
                } else {
                    second.push(f);
                }
            }
            (first, second)
        };

        let (low1_a, low2_a) = partition(low, true);
        let (high1_a, high2_a) = partition(high, true);
        let (low1_b, low2_b) = partition(low, false);
        let (high1_b, high2_b) = partition(high, false);

        let difference = |l1: &Vec<usize>, l2: &Vec<usize>, h1: &Vec<usize>, h2: &Vec<usize>| {
            ((l1.len() as isize - l2.len() as isize) + (h1.len() as isize - h2.len() as isize))
                .abs()
        };
        let difference_a = difference(&low1_a, &low2_a, &high1_a, &high2_a);
        let difference_b = difference(&low1_b, &low2_b, &high1_b, &high2_b);
        if difference_a <= difference_b {
            (low1_a, low2_a, high1_a, high2_a)
        } else {
            (low1_b, low2_b, high1_b, high2_b)
        }
    }

    /// Two-objective sweep over separated sets. A pointer advances through `low` while its
    /// tuples precede the current `high` tuple on the first two objectives; `T` keeps, per front
    /// id, the low tuple with the best second objective seen so far.
    fn sweep_b(&mut self, low: &[usize], high: &[usize]) {
        let mut t: Vec<usize> = vec![];
        let mut i = 0;
        for &h in high {
            while i < low.len() && self.fitnesses[low[i]].prefix(2) <= self.fitnesses[h].prefix(2) {
                let li = low[i];
                let has_better = t.iter().any(|&ti| {
                    self.front_ids[ti] == self.front_ids[li]
                        && self.value(ti, 1) < self.value(li, 1)
                });
                if !has_better {
                    t.retain(|&ti| self.front_ids[ti] != self.front_ids[li]);
                    t.push(li);
                }
                i += 1;
            }
            let r = t
                .iter()
                .filter(|&&ti| self.value(ti, 1) <= self.value(h, 1))
                .map(|&ti| self.front_ids[ti])
                .max();
            if let Some(r) = r {
                self.raise_front_id(h, r + 1);
            }
        }
    }
}
