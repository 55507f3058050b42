use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid engine config: {0}")]
    Config(String),
    #[error("forecast worker is not running")]
    ForecastUnavailable,
    #[error("forecast timed out after {timeout_ms}ms")]
    ForecastTimeout { timeout_ms: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = EngineError::ForecastTimeout { timeout_ms: 5000 };
        assert!(err.to_string().contains("5000"));
        let err = EngineError::Config("forecast.samples must be > 0".to_string());
        assert!(err.to_string().contains("samples"));
    }
}
