use nalgebra::{DMatrix, DVector};

use crate::core::OptError;

/// Calculate the dot product between two vectors. This returns an error if the vector sizes do
/// not match.
///
/// # Arguments
///
/// * `a`: The first vector.
/// * `b`: The second vector.
///
/// returns: `Result<f64, OptError>`
pub fn dot_product(a: &[f64], b: &[f64]) -> Result<f64, OptError> {
    if a.len() != b.len() {
        return Err(OptError::Generic(format!(
            "The length of vector a ({:?}) must match the length of vector b ({:?})",
            a, b
        )));
    }
    Ok(a.iter().zip(b).map(|(v_a, v_b)| v_a * v_b).sum())
}

/// Get the vector magnitude or length.
///
/// # Arguments
///
/// * `vector`: The vector.
///
/// returns: `Result<f64, OptError>`
pub fn vector_magnitude(vector: &[f64]) -> Result<f64, OptError> {
    Ok(dot_product(vector, vector)?.sqrt())
}

/// Calculate the perpendicular distance between a `point` and the line through the origin along
/// `direction`. The point is projected onto the direction and the distance is the length of the
/// residual vector. This returns an error if the vector sizes do not match.
///
/// # Arguments
///
/// * `direction`: The reference direction.
/// * `point`: The point coordinates.
///
/// returns: `Result<f64, OptError>`
pub fn perpendicular_distance(direction: &[f64], point: &[f64]) -> Result<f64, OptError> {
    // scalar such that k * direction is the projection of the point onto the direction
    let k = dot_product(direction, point)? / dot_product(direction, direction)?;

    let residual: Vec<f64> = point
        .iter()
        .zip(direction)
        .map(|(p, w)| p - k * w)
        .collect();
    vector_magnitude(&residual)
}

/// Calculate the axis intercepts of the hyperplane passing through the given extreme points.
/// The plane coefficients `x` solve the linear system `A * x = 1`, where the rows of `A` are the
/// extreme points; the intercept on axis `i` is then `1 / x[i]`.
///
/// The system is degenerate when two extreme points coincide (element-wise) and cannot define a
/// hyperplane, or when the matrix is singular. In both cases this falls back to the diagonal of
/// the extreme-point matrix.
///
/// # Arguments
///
/// * `extreme_points`: The extreme points, one per objective. Each point must have one
///   coordinate per objective.
///
/// returns: `Vec<f64>`
pub fn hyperplane_intercepts(extreme_points: &[Vec<f64>]) -> Vec<f64> {
    let size = extreme_points.len();
    let diagonal = || (0..size).map(|o| extreme_points[o][o]).collect::<Vec<f64>>();

    if has_duplicated_rows(extreme_points) {
        return diagonal();
    }

    let flat: Vec<f64> = extreme_points.iter().flatten().copied().collect();
    let a = DMatrix::from_row_slice(size, size, &flat);
    let b = DVector::from_element(size, 1.0);
    match a.lu().solve(&b) {
        Some(x) => x.iter().map(|v| 1.0 / v).collect(),
        // singular system, same recovery as the duplicate-point case
        None => diagonal(),
    }
}

/// Check whether two rows of the matrix are element-wise identical.
///
/// # Arguments
///
/// * `rows`: The matrix rows.
///
/// returns: `bool`
fn has_duplicated_rows(rows: &[Vec<f64>]) -> bool {
    for i in 0..rows.len() {
        for j in i + 1..rows.len() {
            if rows[i] == rows[j] {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use crate::utils::{dot_product, hyperplane_intercepts, perpendicular_distance};

    #[test]
    fn test_dot_product() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, -5.0, 6.0];
        assert_eq!(12.0, dot_product(&a, &b).unwrap());
        assert!(dot_product(&a, &[1.0]).is_err());
    }

    #[test]
    fn test_perpendicular_distance() {
        // point on the direction has no residual
        let d = perpendicular_distance(&[1.0, 1.0], &[2.0, 2.0]).unwrap();
        assert_approx_eq!(f64, d, 0.0, epsilon = 1e-12);

        let d = perpendicular_distance(&[1.0, 0.0], &[3.0, 4.0]).unwrap();
        assert_approx_eq!(f64, d, 4.0, epsilon = 1e-12);

        let d = perpendicular_distance(&[1.0, 1.0, 1.0], &[0.0, 0.0, 2.0]).unwrap();
        assert_approx_eq!(f64, d, 1.632993, epsilon = 0.0001);
    }

    #[test]
    fn test_intercepts() {
        // plane x/2 + y/4 = 1 passing through (2, 0) and (0, 4)
        let points = vec![vec![2.0, 0.0], vec![0.0, 4.0]];
        let intercepts = hyperplane_intercepts(&points);
        assert_approx_eq!(f64, intercepts[0], 2.0, epsilon = 1e-9);
        assert_approx_eq!(f64, intercepts[1], 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_intercepts_duplicate_points() {
        let points = vec![vec![1.0, 5.0], vec![1.0, 5.0]];
        // falls back to the diagonal of the extreme matrix
        assert_eq!(hyperplane_intercepts(&points), vec![1.0, 5.0]);
    }

    #[test]
    fn test_intercepts_singular_matrix() {
        // distinct but linearly dependent rows
        let points = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        assert_eq!(hyperplane_intercepts(&points), vec![1.0, 4.0]);
    }
}
