use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("insufficient funds: need {need}, have {have}")]
    InsufficientFunds { need: u64, have: u64 },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// HTTP status the route layer should map this error to.
    pub fn http_status(&self) -> u16 {
        match self {
            CoreError::NotFound(_) => 404,
            CoreError::InvalidState(_) => 400,
            CoreError::InsufficientFunds { .. } => 400,
            CoreError::Validation(_) => 400,
            CoreError::Serialization(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(CoreError::NotFound("team 9".into()).http_status(), 404);
        assert_eq!(CoreError::InvalidState("already finished".into()).http_status(), 400);
        assert_eq!(CoreError::InsufficientFunds { need: 100, have: 10 }.http_status(), 400);
    }
}
