//! Error types surfaced by grid construction and generator lifecycles.

use thiserror::Error;

/// A rejected parameter. Always raised before any grid mutation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    GridDimensions { width: i32, height: i32 },
    #[error("{parameter}: maximum {max} is less than minimum {min}")]
    InvertedRange { parameter: &'static str, min: i64, max: i64 },
    #[error("{parameter} must be at least {minimum}, got {value}")]
    BelowMinimum { parameter: &'static str, minimum: i64, value: i64 },
    #[error("{parameter} of {value} does not fit a {width}x{height} grid")]
    DoesNotFit { parameter: &'static str, value: i64, width: i32, height: i32 },
    #[error("{parameter} must lie in [{min}, {max}], got {value}")]
    OutOfRange { parameter: &'static str, min: f64, max: f64, value: f64 },
    #[error("a map needs at least one generator")]
    EmptyGeneratorSequence,
}

impl ConfigError {
    pub(crate) fn check_range(parameter: &'static str, min: i64, max: i64) -> Result<(), Self> {
        if max < min {
            return Err(Self::InvertedRange { parameter, min, max });
        }
        Ok(())
    }

    pub(crate) fn check_minimum(
        parameter: &'static str,
        minimum: i64,
        value: i64,
    ) -> Result<(), Self> {
        if value < minimum {
            return Err(Self::BelowMinimum { parameter, minimum, value });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("generator has already begun")]
    AlreadyStarted,
    #[error("generator must begin before it can step")]
    NotStarted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_is_rejected_and_equal_bounds_are_accepted() {
        assert_eq!(
            ConfigError::check_range("room_count", 5, 2),
            Err(ConfigError::InvertedRange { parameter: "room_count", min: 5, max: 2 })
        );
        assert_eq!(ConfigError::check_range("room_count", 3, 3), Ok(()));
    }

    #[test]
    fn config_errors_convert_into_generate_errors() {
        let error: GenerateError = ConfigError::EmptyGeneratorSequence.into();
        assert_eq!(error.to_string(), "a map needs at least one generator");
    }
}
