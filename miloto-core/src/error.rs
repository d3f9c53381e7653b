/// Conditions the statistics engine reports to its caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    #[error("insufficient data: no observations to compute probabilities")]
    InsufficientData,

    #[error("invalid combination size {arity}: must be between {min} and {max}")]
    InvalidParameter { arity: usize, min: usize, max: usize },

    #[error("malformed input: {0}")]
    MalformedInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = StatsError::InvalidParameter { arity: 7, min: 2, max: 5 };
        assert_eq!(err.to_string(), "invalid combination size 7: must be between 2 and 5");
    }

    #[test]
    fn test_malformed_input_message() {
        let err = StatsError::MalformedInput("3 draws but 2 dates".to_string());
        assert_eq!(err.to_string(), "malformed input: 3 draws but 2 dates");
    }
}
