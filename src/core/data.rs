use crate::core::OptError;

/// A value that can be stored in the data store of a [`crate::core::Candidate`] or a
/// [`crate::core::SolutionDimension`]. The optimiser never reads these; they let callers attach
/// problem-specific information (file locations, labels, metadata) to the objects they own.
#[derive(Clone, Debug)]
pub enum DataValue {
    /// The value for a floating-point number. This is a f64.
    Real(f64),
    /// The value for an integer number. This is an i64.
    Integer(i64),
    /// The value for a vector of floating-point numbers.
    Vector(Vec<f64>),
    /// The value for a string.
    Text(String),
}

impl PartialEq for DataValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DataValue::Real(s), DataValue::Real(o)) => (s.is_nan() && o.is_nan()) || (*s == *o),
            (DataValue::Integer(s), DataValue::Integer(o)) => *s == *o,
            (DataValue::Vector(s), DataValue::Vector(o)) => s == o,
            (DataValue::Text(s), DataValue::Text(o)) => s == o,
            _ => false,
        }
    }
}

impl DataValue {
    /// Get the value if the data is of real type. This returns an error if the data is not real.
    ///
    /// returns: `Result<f64, OptError>`
    pub fn as_real(&self) -> Result<f64, OptError> {
        if let DataValue::Real(v) = self {
            Ok(*v)
        } else {
            Err(OptError::WrongDataType("real".to_string()))
        }
    }

    /// Get the value if the data is of integer type. This returns an error if the data is not an
    /// integer.
    ///
    /// returns: `Result<i64, OptError>`
    pub fn as_integer(&self) -> Result<i64, OptError> {
        if let DataValue::Integer(v) = self {
            Ok(*v)
        } else {
            Err(OptError::WrongDataType("integer".to_string()))
        }
    }

    /// Get the value if the data is of vector type. This returns an error if the data is not a
    /// vector.
    ///
    /// returns: `Result<&Vec<f64>, OptError>`
    pub fn as_vec(&self) -> Result<&Vec<f64>, OptError> {
        if let DataValue::Vector(v) = self {
            Ok(v)
        } else {
            Err(OptError::WrongDataType("vector".to_string()))
        }
    }

    /// Get the value if the data is of text type. This returns an error if the data is not a
    /// string.
    ///
    /// returns: `Result<&str, OptError>`
    pub fn as_text(&self) -> Result<&str, OptError> {
        if let DataValue::Text(v) = self {
            Ok(v)
        } else {
            Err(OptError::WrongDataType("text".to_string()))
        }
    }
}

#[cfg(test)]
mod test {
    use crate::core::DataValue;

    #[test]
    fn test_accessors() {
        assert_eq!(DataValue::Real(1.5).as_real().unwrap(), 1.5);
        assert!(DataValue::Real(1.5).as_integer().is_err());
        assert_eq!(DataValue::Integer(-2).as_integer().unwrap(), -2);
        assert_eq!(
            DataValue::Vector(vec![0.0, 1.0]).as_vec().unwrap(),
            &vec![0.0, 1.0]
        );
        assert_eq!(DataValue::Text("run-4".to_string()).as_text().unwrap(), "run-4");
    }

    #[test]
    fn test_nan_equality() {
        assert_eq!(DataValue::Real(f64::NAN), DataValue::Real(f64::NAN));
        assert_ne!(DataValue::Real(f64::NAN), DataValue::Real(0.0));
    }
}
