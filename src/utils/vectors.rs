use crate::core::OptError;

/// Calculate the vector minimum value.
///
/// # Arguments
///
/// * `v`: The vector.
///
/// returns: `Result<f64, OptError>`
pub fn vector_min(v: &[f64]) -> Result<f64, OptError> {
    Ok(*v
        .iter()
        .min_by(|a, b| a.total_cmp(b))
        .ok_or(OptError::Generic(
            "Cannot calculate vector min value".to_string(),
        ))?)
}

/// Calculate the vector maximum value.
///
/// # Arguments
///
/// * `v`: The vector.
///
/// returns: `Result<f64, OptError>`
pub fn vector_max(v: &[f64]) -> Result<f64, OptError> {
    Ok(*v
        .iter()
        .max_by(|a, b| a.total_cmp(b))
        .ok_or(OptError::Generic(
            "Cannot calculate vector max value".to_string(),
        ))?)
}

/// Get the index of the smallest value in the vector and the value itself. The first minimum
/// wins when values tie.
///
/// # Arguments
///
/// * `data`: The vector.
///
/// returns: `(usize, f64)`
pub fn argmin(data: &[f64]) -> (usize, f64) {
    let mut min_index = 0;
    let mut min_value = data[0];
    for (index, value) in data.iter().enumerate().skip(1) {
        if *value < min_value {
            min_index = index;
            min_value = *value;
        }
    }
    (min_index, min_value)
}

/// Calculate the median of a vector. For an even number of items this is the mean of the two
/// middle values.
///
/// # Arguments
///
/// * `values`: The vector. Must not be empty.
///
/// returns: `f64`
pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

#[cfg(test)]
mod test {
    use crate::utils::{argmin, median, vector_max, vector_min};

    #[test]
    fn test_min_max() {
        let v = vec![99.0, 11.0, 456.2, 19.0, 0.5];
        assert_eq!(vector_min(&v).unwrap(), 0.5);
        assert_eq!(vector_max(&v).unwrap(), 456.2);
        assert!(vector_min(&[]).is_err());
    }

    #[test]
    fn test_argmin_first_wins() {
        assert_eq!(argmin(&[3.0, 1.0, 1.0, 2.0]), (1, 1.0));
        assert_eq!(argmin(&[0.5]), (0, 0.5));
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
        assert_eq!(median(&[7.0]), 7.0);
    }
}
