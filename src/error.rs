use thiserror::Error;

/// Result type for the DSP core.
pub type DspResult<T> = Result<T, DspError>;

/// Errors raised by the DSP core.
///
/// Every check happens at the API boundary, before any computation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DspError {
    /// Out-of-range scalar, zero-length input, or incompatible shapes.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },
}

impl DspError {
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

pub(crate) fn ensure_positive(name: &str, value: f64) -> DspResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DspError::invalid_param(
            name,
            format!("must be a positive finite number, got {}", value),
        ));
    }
    Ok(())
}
