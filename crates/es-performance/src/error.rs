//! Error types for performance calculations.

use es_core::EsError;
use es_fuels::FuelError;
use thiserror::Error;

/// Errors that can occur while evaluating the performance model.
///
/// A failed call never yields a partial result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PerfError {
    #[error("Invalid parameter: {what}")]
    InvalidParameter { what: String },

    #[error("Non-finite result for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

pub type PerfResult<T> = Result<T, PerfError>;

impl PerfError {
    pub(crate) fn invalid(what: &str) -> Self {
        PerfError::InvalidParameter {
            what: what.to_string(),
        }
    }
}

impl From<EsError> for PerfError {
    fn from(e: EsError) -> Self {
        match e {
            EsError::InvalidParameter { what } => PerfError::invalid(what),
            EsError::NonFinite { what, value } => PerfError::InvalidParameter {
                what: format!("{what} is not finite ({value})"),
            },
        }
    }
}

impl From<FuelError> for PerfError {
    fn from(e: FuelError) -> Self {
        PerfError::InvalidParameter {
            what: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PerfError::invalid("throttle must be within [0, 1]");
        assert!(err.to_string().contains("throttle"));
    }

    #[test]
    fn error_conversion() {
        let err: PerfError = EsError::InvalidParameter { what: "bore" }.into();
        assert!(matches!(err, PerfError::InvalidParameter { .. }));

        let err: PerfError = FuelError::UnknownFuel {
            name: "Kerosene".into(),
        }
        .into();
        assert!(err.to_string().contains("Kerosene"));
    }
}
