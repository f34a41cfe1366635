use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::core::{DataValue, OptError};

/// One axis of the search space: a closed interval `[min, max]` with an optional granularity of
/// permitted values. Dimensions are immutable over a run; the optimiser binds every candidate
/// coordinate back to the dimension with [`SolutionDimension::bind`] after variation.
///
/// # Example
/// ```
/// use unsga3::core::SolutionDimension;
///
/// let dim = SolutionDimension::new(0.0, 10.0)
///     .unwrap()
///     .with_granularity(0.5)
///     .unwrap();
/// assert_eq!(dim.bind(3.26), 3.5);
/// assert_eq!(dim.bind(-4.0), 0.0);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SolutionDimension {
    /// The lower bound.
    min_value: f64,
    /// The upper bound.
    max_value: f64,
    /// The spacing of permitted values, measured from zero. `None` leaves the dimension
    /// continuous.
    granularity: Option<f64>,
    /// Problem-specific data attached by the caller. The optimiser never reads this.
    #[serde(skip)]
    data_store: HashMap<String, DataValue>,
}

impl SolutionDimension {
    /// Create a new continuous dimension. This returns an error unless `min_value` is strictly
    /// smaller than `max_value`; a zero-width dimension can only take one value and does not
    /// belong in an optimisation problem.
    ///
    /// # Arguments
    ///
    /// * `min_value`: The lower bound.
    /// * `max_value`: The upper bound.
    ///
    /// returns: `Result<SolutionDimension, OptError>`
    pub fn new(min_value: f64, max_value: f64) -> Result<Self, OptError> {
        if min_value >= max_value {
            return Err(OptError::InvalidBounds(min_value, max_value));
        }
        Ok(Self {
            min_value,
            max_value,
            granularity: None,
            data_store: HashMap::new(),
        })
    }

    /// Quantise the dimension. Bound values snap to the nearest multiple of `granularity`
    /// measured from zero. This returns an error if the granularity is not a positive number.
    ///
    /// # Arguments
    ///
    /// * `granularity`: The spacing of permitted values.
    ///
    /// returns: `Result<SolutionDimension, OptError>`
    pub fn with_granularity(mut self, granularity: f64) -> Result<Self, OptError> {
        if granularity <= 0.0 || !granularity.is_finite() {
            return Err(OptError::InvalidGranularity(granularity));
        }
        self.granularity = Some(granularity);
        Ok(self)
    }

    /// The dimension lower bound.
    ///
    /// return: `f64`
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// The dimension upper bound.
    ///
    /// return: `f64`
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// The dimension lower and upper bound.
    ///
    /// return: `(f64, f64)`
    pub fn bounds(&self) -> (f64, f64) {
        (self.min_value, self.max_value)
    }

    /// The dimension granularity, when set.
    ///
    /// return: `Option<f64>`
    pub fn granularity(&self) -> Option<f64> {
        self.granularity
    }

    /// Bind a putative value to the dimension: clamp it to `[min, max]` and, when a granularity
    /// is set, snap it to the nearest multiple of the granularity. The snapped value is rounded
    /// to 10 decimal digits to suppress floating-point drift.
    ///
    /// # Arguments
    ///
    /// * `putative_value`: The value to bind.
    ///
    /// return: `f64`
    pub fn bind(&self, putative_value: f64) -> f64 {
        let value = putative_value.clamp(self.min_value, self.max_value);
        match self.granularity {
            None => value,
            Some(g) => {
                let snapped = g * (value / g).round();
                (snapped * 1e10).round() / 1e10
            }
        }
    }

    /// Store custom data on the dimension.
    ///
    /// # Arguments
    ///
    /// * `name`: The name of the data.
    /// * `value`: The value.
    pub fn set_data(&mut self, name: &str, value: DataValue) {
        self.data_store.insert(name.to_string(), value);
    }

    /// Get a copy of the custom data set on the dimension. This returns an error if no custom
    /// data with the provided `name` is set.
    ///
    /// # Arguments
    ///
    /// * `name`: The name of the data.
    ///
    /// returns: `Result<DataValue, OptError>`
    pub fn get_data(&self, name: &str) -> Result<DataValue, OptError> {
        self.data_store
            .get(name)
            .cloned()
            .ok_or(OptError::WrongDataName(name.to_string()))
    }
}

impl Display for SolutionDimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.granularity {
            None => write!(
                f,
                "SolutionDimension [{}; {}]",
                self.min_value, self.max_value
            ),
            Some(g) => write!(
                f,
                "SolutionDimension [{}; {}] every {}",
                self.min_value, self.max_value, g
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::core::{DataValue, SolutionDimension};

    #[test]
    fn test_invalid_bounds() {
        assert!(SolutionDimension::new(1.0, 1.0).is_err());
        assert!(SolutionDimension::new(2.0, -1.0).is_err());
        assert!(SolutionDimension::new(0.0, 1.0).is_ok());
    }

    #[test]
    fn test_invalid_granularity() {
        assert!(SolutionDimension::new(0.0, 1.0)
            .unwrap()
            .with_granularity(0.0)
            .is_err());
        assert!(SolutionDimension::new(0.0, 1.0)
            .unwrap()
            .with_granularity(-0.5)
            .is_err());
    }

    #[test]
    fn test_bind_clamps() {
        let dim = SolutionDimension::new(-1.0, 1.0).unwrap();
        assert_eq!(dim.bind(3.0), 1.0);
        assert_eq!(dim.bind(-7.5), -1.0);
        assert_eq!(dim.bind(0.25), 0.25);
    }

    #[test]
    fn test_bind_snaps_to_grid() {
        let dim = SolutionDimension::new(0.0, 10.0)
            .unwrap()
            .with_granularity(0.25)
            .unwrap();
        assert_eq!(dim.bind(3.3), 3.25);
        assert_eq!(dim.bind(3.4), 3.5);
        // clamped first, then snapped
        assert_eq!(dim.bind(99.0), 10.0);
    }

    #[test]
    fn test_bind_suppresses_drift() {
        // 0.1 * 3 is not representable exactly; the bound value must still land on the grid
        let dim = SolutionDimension::new(0.0, 1.0)
            .unwrap()
            .with_granularity(0.1)
            .unwrap();
        assert_eq!(dim.bind(0.30000000004), 0.3);
    }

    #[test]
    fn test_data_store() {
        let mut dim = SolutionDimension::new(0.0, 1.0).unwrap();
        dim.set_data("label", DataValue::Text("infection rate".to_string()));
        assert_eq!(
            dim.get_data("label").unwrap().as_text().unwrap(),
            "infection rate"
        );
        assert!(dim.get_data("missing").is_err());
    }
}
