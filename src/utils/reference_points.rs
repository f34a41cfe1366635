use crate::core::OptError;

/// Calculate the binomial coefficient. This gives the number of `k`-subsets possible out of a
/// set of `n` distinct items.
///
/// # Arguments
///
/// * `n`: The number of possibilities.
/// * `k`: The number of outcomes.
///
/// returns: `u64`
fn binomial_coefficient(mut n: u64, k: u64) -> u64 {
    let mut r: u64 = 1;
    if k > n {
        0
    } else {
        for d in 1..=k {
            r *= n;
            n -= 1;
            r /= d;
        }
        r
    }
}

/// Derive the reference directions on the unit simplex using the simplex-lattice methodology in
/// Section 5.2 of the Das & Dennis (1998) paper:
///
/// > Indraneel Das and J. E. Dennis. Normal-Boundary Intersection: A New Method for Generating
/// > the Pareto Surface in Nonlinear Multicriteria Optimization Problems. SIAM Journal on
/// > Optimization. 1998 8:3, 631-657. <https://doi.org/10.1137/S1052623496307510>
///
/// The directions are generated as integer lattice points first and divided by the lattice
/// divisor once at the end, so no floating-point error accumulates along a point's coordinates.
pub struct DasDennis {
    /// The number of problem objectives.
    number_of_objectives: usize,
    /// The number of equally-spaced values each coordinate can take, including zero. For
    /// example 5 increments place coordinates at 0, 0.25, 0.5, 0.75 and 1.
    number_of_increments: usize,
}

impl DasDennis {
    /// Initialise the Das & Dennis approach to calculate the reference directions. This returns
    /// an error if fewer than 2 increments are requested; the lattice needs at least the 0 and 1
    /// coordinates.
    ///
    /// # Arguments
    ///
    /// * `number_of_objectives`: The number of problem objectives.
    /// * `number_of_increments`: The number of lattice values per coordinate, including zero.
    ///
    /// returns: `Result<DasDennis, OptError>`
    pub fn new(number_of_objectives: usize, number_of_increments: usize) -> Result<Self, OptError> {
        let name = "DasDennis".to_string();
        if number_of_objectives < 1 {
            return Err(OptError::AlgorithmInit(
                name,
                "At least one objective is needed to generate reference directions".to_string(),
            ));
        }
        if number_of_increments < 2 {
            return Err(OptError::AlgorithmInit(
                name,
                format!(
                    "The number of increments ({}) must be at least 2",
                    number_of_increments
                ),
            ));
        }
        Ok(Self {
            number_of_objectives,
            number_of_increments,
        })
    }

    /// The lattice divisor. This is `p` in the Das & Dennis paper; coordinates are multiples of
    /// `1/p`.
    ///
    /// return: `usize`
    pub fn divisor(&self) -> usize {
        self.number_of_increments - 1
    }

    /// Determine the number of reference directions on the
    /// `self.number_of_objectives`-dimensional unit simplex from Section 5.2 of the paper.
    ///
    /// returns: `u64`
    pub fn number_of_points(&self) -> u64 {
        // binomial coefficient of M + p - 1 and p, where M is the number of objectives
        binomial_coefficient(
            (self.number_of_objectives + self.divisor() - 1) as u64,
            self.divisor() as u64,
        )
    }

    /// Generate the reference directions. Each direction has one non-negative coordinate per
    /// objective and the coordinates sum to 1.
    ///
    /// return: `Vec<Vec<f64>>`
    pub fn get_weights(&self) -> Vec<Vec<f64>> {
        let mut lattice_points: Vec<Vec<usize>> = vec![];
        let mut point = vec![0; self.number_of_objectives];
        self.recursive_lattice(&mut lattice_points, &mut point, self.divisor(), 0);

        let p = self.divisor() as f64;
        lattice_points
            .iter()
            .map(|point| point.iter().map(|k| *k as f64 / p).collect())
            .collect()
    }

    /// Enumerate the integer lattice points with non-negative coordinates summing to the
    /// divisor, recursing over the objectives.
    ///
    /// # Arguments
    ///
    /// * `lattice_points`: The vector collecting the complete points.
    /// * `point`: The point under construction. Its size equals the number of objectives.
    /// * `left_partitions`: The lattice units still to distribute over the remaining objectives.
    /// * `obj_index`: The objective index being processed.
    fn recursive_lattice(
        &self,
        lattice_points: &mut Vec<Vec<usize>>,
        point: &mut Vec<usize>,
        left_partitions: usize,
        obj_index: usize,
    ) {
        if obj_index == self.number_of_objectives - 1 {
            // the last coordinate takes whatever is left
            point[obj_index] = left_partitions;
            lattice_points.push(point.clone());
            return;
        }
        for k in 0..=left_partitions {
            point[obj_index] = k;
            self.recursive_lattice(lattice_points, point, left_partitions - k, obj_index + 1);
        }
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use crate::utils::DasDennis;

    fn contains_point(weights: &[Vec<f64>], point: &[f64]) -> bool {
        weights.iter().any(|w| {
            w.iter()
                .zip(point)
                .all(|(a, b)| (a - b).abs() < 1e-9)
        })
    }

    #[test]
    /// 3 objectives with 4 increments (p = 3) must give C(5, 3) = 10 directions, including the
    /// simplex vertices and the centroid.
    fn test_3obj_4increments() {
        let das_dennis = DasDennis::new(3, 4).unwrap();
        assert_eq!(das_dennis.number_of_points(), 10);

        let weights = das_dennis.get_weights();
        assert_eq!(weights.len(), 10);
        assert!(contains_point(&weights, &[1.0, 0.0, 0.0]));
        assert!(contains_point(&weights, &[0.0, 1.0, 0.0]));
        assert!(contains_point(&weights, &[0.0, 0.0, 1.0]));
        assert!(contains_point(
            &weights,
            &[1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0]
        ));
    }

    #[test]
    /// Each direction is non-negative and sums to 1.
    fn test_simplex_invariant() {
        let das_dennis = DasDennis::new(5, 7).unwrap();
        let weights = das_dennis.get_weights();
        assert_eq!(weights.len() as u64, das_dennis.number_of_points());

        for weight in &weights {
            assert!(weight.iter().all(|v| *v >= 0.0));
            assert_approx_eq!(f64, weight.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    /// The generation is deterministic for a fixed configuration.
    fn test_stable_order() {
        let a = DasDennis::new(3, 6).unwrap().get_weights();
        let b = DasDennis::new(3, 6).unwrap().get_weights();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_increments() {
        assert!(DasDennis::new(3, 1).is_err());
        assert!(DasDennis::new(0, 4).is_err());
    }
}
