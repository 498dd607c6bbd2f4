//! Path parameter validation. Runs before any outbound call.

use crate::error::ApiError;
use crate::services::Direction;

/// Parses an identifier that must be an integer >= 1.
pub fn positive_number(raw: &str, what: &str) -> Result<u32, ApiError> {
    let value: i64 = raw
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("{what} has to be an integer, got {raw}")))?;
    if value < 1 {
        return Err(ApiError::BadRequest(format!(
            "{what} has to be an integer >= 1, got {value}"
        )));
    }
    u32::try_from(value)
        .map_err(|_| ApiError::BadRequest(format!("{what} is out of range, got {value}")))
}

/// Parses a coordinate component that must be a finite float >= 0.
pub fn non_negative_coordinate(raw: &str, what: &str) -> Result<f64, ApiError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ApiError::BadRequest(format!(
            "{what} must be a positive float, got {raw}"
        ))),
    }
}

/// Entity, line and direction of a `/lines/..` or `/vehicles/..` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSelector {
    pub entity: u32,
    pub line: u32,
    pub direction: Direction,
}

impl LineSelector {
    pub fn parse(entity: &str, line: &str, direction: &str) -> Result<Self, ApiError> {
        Ok(Self {
            entity: positive_number(entity, "Entity number")?,
            line: positive_number(line, "Line number")?,
            direction: direction.parse()?,
        })
    }
}
