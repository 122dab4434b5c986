use thiserror::Error;

/// Errors raised by configuration and validation helpers.
///
/// Game-flow denials (fleeing too late, attacking with no target left) are
/// never errors; they show up in the combat log instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CombatError {
    #[error("{field} out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl CombatError {
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        CombatError::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }
}

/// Checks that `value` is finite and within `min..=max`.
pub fn ensure_in_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, CombatError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(value)
    } else {
        Err(CombatError::out_of_range(field, value, min, max))
    }
}

/// Validates a stamina fraction, which must lie in `[0, 1]`.
pub fn validate_stamina(stamina: f64) -> Result<f64, CombatError> {
    ensure_in_range("stamina", stamina, 0.0, 1.0)
}

/// Validates a challenge rating, which must be finite and non-negative.
pub fn validate_challenge_rating(challenge_rating: f64) -> Result<f64, CombatError> {
    ensure_in_range("challenge_rating", challenge_rating, 0.0, f64::MAX)
}
